//! Basket Component Configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasketConfig {
    /// Label in logs
    pub name: String,

    /// The composite product
    pub basket: String,

    /// Leg product -> units of that leg per basket
    pub legs: BTreeMap<String, i64>,
}
