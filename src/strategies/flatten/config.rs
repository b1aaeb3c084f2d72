//! Flatten Component Configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlattenConfig {
    /// Label in logs (default: "flatten")
    #[serde(default = "default_name")]
    pub name: String,

    /// Products whose positions are flattened
    pub products: Vec<String>,
}

fn default_name() -> String {
    "flatten".to_string()
}
