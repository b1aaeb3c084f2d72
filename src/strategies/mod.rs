//! Signal Components Module
//!
//! Each component absorbs the tick's snapshot and may hand orders to the
//! driver. Components are picked by `kind` in the config and built through
//! a factory table; none of them is a registered global.

pub mod basket;
pub mod flatten;
pub mod watch;

use crate::config::{ComponentConfig, ConfigError};
use crate::oms::Engines;
use crate::{Order, Symbol, TradingState};

// =============================================================================
// SignalComponent Trait - The contract all components implement
// =============================================================================

/// Signal component interface
pub trait SignalComponent: Send {
    /// Component label used in logs
    fn name(&self) -> &str;

    /// Products this component reads or trades
    fn products(&self) -> &[Symbol];

    /// Absorb the latest market snapshot
    fn update(&mut self, state: &TradingState);

    /// Produce this tick's orders, matching through the engines as needed.
    /// `None` means nothing to trade.
    fn generate_orders(&mut self, engines: &mut Engines) -> Option<Vec<Order>>;
}

// =============================================================================
// Component Factory
// =============================================================================

/// Factory function type for creating components from their params
pub type ComponentFactory = fn(&serde_json::Value) -> serde_json::Result<Box<dyn SignalComponent>>;

const FACTORIES: [(&str, ComponentFactory); 3] = [
    ("basket", basket::create),
    ("flatten", flatten::create),
    ("watch", watch::create),
];

/// Names accepted as a component `kind`
pub fn available_components() -> Vec<&'static str> {
    FACTORIES.iter().map(|(kind, _)| *kind).collect()
}

/// Create a component from its config entry
pub fn create_component(config: &ComponentConfig) -> Result<Box<dyn SignalComponent>, ConfigError> {
    let factory = FACTORIES
        .iter()
        .find(|(kind, _)| *kind == config.kind)
        .map(|(_, factory)| *factory)
        .ok_or_else(|| ConfigError::UnknownComponent {
            kind: config.kind.clone(),
            available: available_components().join(", "),
        })?;

    factory(&config.params).map_err(|source| ConfigError::InvalidParams {
        kind: config.kind.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_available_components() {
        assert_eq!(available_components(), vec!["basket", "flatten", "watch"]);
    }

    #[test]
    fn test_create_known_component() {
        let config = ComponentConfig {
            kind: "watch".to_string(),
            params: json!({"products": ["KELP"]}),
        };
        let component = create_component(&config).unwrap();
        assert_eq!(component.products(), &[Symbol::new("KELP")]);
    }

    #[test]
    fn test_unknown_kind_lists_available() {
        let config = ComponentConfig {
            kind: "momentum".to_string(),
            params: serde_json::Value::Null,
        };
        let err = create_component(&config).err().unwrap();
        assert_eq!(
            err.to_string(),
            "unknown component kind 'momentum'. Available: basket, flatten, watch"
        );
    }

    #[test]
    fn test_bad_params_rejected() {
        let config = ComponentConfig {
            kind: "flatten".to_string(),
            params: json!({"products": 7}),
        };
        assert!(matches!(
            create_component(&config),
            Err(ConfigError::InvalidParams { kind, .. }) if kind == "flatten"
        ));
    }
}
