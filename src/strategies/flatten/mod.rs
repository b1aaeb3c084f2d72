//! Flatten Component
//!
//! Liquidates open positions in its products at market every tick.

mod config;
mod strategy;

pub use config::FlattenConfig;
pub use strategy::FlattenComponent;

use crate::strategies::SignalComponent;

/// Create component from params (called by the factory table)
pub fn create(params: &serde_json::Value) -> serde_json::Result<Box<dyn SignalComponent>> {
    let config: FlattenConfig = serde_json::from_value(params.clone())?;
    Ok(Box::new(FlattenComponent::new(config)))
}
