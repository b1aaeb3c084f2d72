//! Watch Component
//!
//! Records top-of-book mids for a set of products. Never trades.

mod config;
mod strategy;

pub use config::WatchConfig;
pub use strategy::WatchComponent;

use crate::strategies::SignalComponent;

/// Create component from params (called by the factory table)
pub fn create(params: &serde_json::Value) -> serde_json::Result<Box<dyn SignalComponent>> {
    let config: WatchConfig = serde_json::from_value(params.clone())?;
    Ok(Box::new(WatchComponent::new(config)))
}
