//! Configuration management
//!
//! Loads the JSON configuration that fixes, at startup, which products get
//! an execution engine, which signal components run each tick, and what the
//! driver reports back to the harness.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::oms::ExecutionSettings;
use crate::Symbol;

/// Products traded in the competition round the template targets
pub const DEFAULT_PRODUCTS: [&str; 14] = [
    "RAINFOREST_RESIN",
    "KELP",
    "SQUID_INK",
    "CROISSANTS",
    "DJEMBES",
    "JAMS",
    "PICNIC_BASKET1",
    "PICNIC_BASKET2",
    "VOLCANIC_ROCK",
    "VOLCANIC_ROCK_VOUCHER_9500",
    "VOLCANIC_ROCK_VOUCHER_9750",
    "VOLCANIC_ROCK_VOUCHER_10000",
    "VOLCANIC_ROCK_VOUCHER_10250",
    "VOLCANIC_ROCK_VOUCHER_10500",
];

/// Configuration errors caught before the first tick
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no products configured")]
    NoProducts,

    #[error("product '{0}' is listed more than once")]
    DuplicateProduct(String),

    #[error("component '{component}' references unknown product '{product}'")]
    UnknownProduct { component: String, product: String },

    #[error("unknown component kind '{kind}'. Available: {available}")]
    UnknownComponent { kind: String, available: String },

    #[error("invalid parameters for component '{kind}': {source}")]
    InvalidParams {
        kind: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("output.max_log_length must be positive")]
    ZeroLogBudget,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_products")]
    pub products: Vec<String>,

    #[serde(default)]
    pub execution: ExecutionSettings,

    /// Signal components, run in the listed order every tick
    #[serde(default)]
    pub components: Vec<ComponentConfig>,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_products() -> Vec<String> {
    DEFAULT_PRODUCTS.iter().map(|p| p.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            products: default_products(),
            execution: ExecutionSettings::default(),
            components: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config =
            serde_json::from_str(&contents).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Check product list and output limits
    ///
    /// Component parameters and their product references are checked when
    /// the components are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.products.is_empty() {
            return Err(ConfigError::NoProducts);
        }

        let mut seen = HashSet::new();
        for product in &self.products {
            if !seen.insert(product.as_str()) {
                return Err(ConfigError::DuplicateProduct(product.clone()));
            }
        }

        if self.output.max_log_length == 0 {
            return Err(ConfigError::ZeroLogBudget);
        }

        Ok(())
    }

    /// Configured products as symbols
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.products.iter().map(Symbol::new)
    }
}

/// One signal component entry
///
/// ```json
/// { "kind": "basket", "params": { "name": "PICNIC", "products": ["CROISSANTS", "JAMS"] } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    pub kind: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// What the driver hands back to the harness besides orders
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Conversion request count returned every tick
    pub conversions: i64,

    /// Carry-forward string returned every tick
    pub trader_data: String,

    /// Byte budget of one diagnostic line
    pub max_log_length: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            conversions: 1,
            trader_data: "SAMPLE".to_string(),
            max_log_length: 3750,
        }
    }
}
