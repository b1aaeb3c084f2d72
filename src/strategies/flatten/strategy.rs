//! Flatten Component
//!
//! Calls `liquidate` on each product's engine. Flat products contribute
//! nothing; the component returns `None` when every product is flat.

use crate::oms::Engines;
use crate::strategies::SignalComponent;
use crate::{Order, Symbol, TradingState};
use tracing::{info, warn};

use super::config::FlattenConfig;

pub struct FlattenComponent {
    name: String,
    products: Vec<Symbol>,
}

impl FlattenComponent {
    pub fn new(config: FlattenConfig) -> Self {
        Self {
            name: config.name,
            products: config.products.iter().map(Symbol::new).collect(),
        }
    }
}

impl SignalComponent for FlattenComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn products(&self) -> &[Symbol] {
        &self.products
    }

    fn update(&mut self, _state: &TradingState) {}

    fn generate_orders(&mut self, engines: &mut Engines) -> Option<Vec<Order>> {
        let mut orders = Vec::new();
        let mut acted = false;

        for symbol in &self.products {
            let Some(engine) = engines.get_mut(symbol) else {
                warn!(component = %self.name, %symbol, "No engine for product");
                continue;
            };
            if let Some(fills) = engine.liquidate() {
                info!(component = %self.name, %symbol, legs = fills.len(), "Flattening position");
                acted = true;
                orders.extend(fills);
            }
        }

        acted.then_some(orders)
    }
}
