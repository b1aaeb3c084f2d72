//! Watch Component Configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Label in logs (default: "watch")
    #[serde(default = "default_name")]
    pub name: String,

    /// Products to record
    pub products: Vec<String>,

    /// Mids kept per product (default: 100)
    #[serde(default = "default_history")]
    pub history: usize,
}

fn default_name() -> String {
    "watch".to_string()
}

fn default_history() -> usize {
    100
}
