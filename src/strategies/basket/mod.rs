//! Basket Component
//!
//! Tracks the spread between a basket product and its weighted legs
//! (e.g. a picnic basket against the croissants, jams and djembes inside it).

mod config;
mod strategy;

pub use config::BasketConfig;
pub use strategy::BasketComponent;

use crate::strategies::SignalComponent;

/// Create component from params (called by the factory table)
pub fn create(params: &serde_json::Value) -> serde_json::Result<Box<dyn SignalComponent>> {
    let config: BasketConfig = serde_json::from_value(params.clone())?;
    Ok(Box::new(BasketComponent::new(config)))
}
