//! Watch Component
//!
//! Keeps a bounded history of mid prices per product. Ticks where a
//! product's book is one-sided or missing record nothing.

use crate::oms::Engines;
use crate::strategies::SignalComponent;
use crate::{Money, Order, Symbol, TradingState};
use std::collections::{HashMap, VecDeque};
use tracing::trace;

use super::config::WatchConfig;

pub struct WatchComponent {
    name: String,
    products: Vec<Symbol>,
    capacity: usize,
    mids: HashMap<Symbol, VecDeque<Money>>,
    last_timestamp: Option<i64>,
}

impl WatchComponent {
    pub fn new(config: WatchConfig) -> Self {
        Self {
            name: config.name,
            products: config.products.iter().map(Symbol::new).collect(),
            capacity: config.history.max(1),
            mids: HashMap::new(),
            last_timestamp: None,
        }
    }

    /// Mids recorded for a product, oldest first
    pub fn history(&self, symbol: &Symbol) -> Option<&VecDeque<Money>> {
        self.mids.get(symbol)
    }

    pub fn latest_mid(&self, symbol: &Symbol) -> Option<Money> {
        self.mids.get(symbol).and_then(|h| h.back().copied())
    }

    /// Timestamp of the last snapshot absorbed
    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }
}

impl SignalComponent for WatchComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn products(&self) -> &[Symbol] {
        &self.products
    }

    fn update(&mut self, state: &TradingState) {
        self.last_timestamp = Some(state.timestamp);

        for symbol in &self.products {
            let Some(mid) = state.order_depths.get(symbol).and_then(|d| d.mid_price()) else {
                continue;
            };
            let history = self.mids.entry(symbol.clone()).or_default();
            if history.len() == self.capacity {
                history.pop_front();
            }
            history.push_back(mid);
            trace!(component = %self.name, %symbol, %mid, "Mid recorded");
        }
    }

    fn generate_orders(&mut self, _engines: &mut Engines) -> Option<Vec<Order>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oms::OrderDepth;

    fn state_with(timestamp: i64, bid: i64, ask: i64) -> TradingState {
        let mut state = TradingState {
            timestamp,
            ..Default::default()
        };
        state.order_depths.insert(
            Symbol::new("KELP"),
            OrderDepth::new().with_bid(bid, 1).with_ask(ask, -1),
        );
        state
    }

    fn watch(history: usize) -> WatchComponent {
        WatchComponent::new(WatchConfig {
            name: "kelp-watch".to_string(),
            products: vec!["KELP".to_string(), "SQUID_INK".to_string()],
            history,
        })
    }

    #[test]
    fn test_records_mid_per_tick() {
        let mut w = watch(10);
        w.update(&state_with(0, 2028, 2032));
        w.update(&state_with(100, 2030, 2032));

        let kelp = Symbol::new("KELP");
        assert_eq!(w.history(&kelp).unwrap().len(), 2);
        assert_eq!(w.latest_mid(&kelp), Some(Money::from_i64(2031)));
        assert_eq!(w.last_timestamp(), Some(100));
        // No book for SQUID_INK in the snapshot
        assert!(w.history(&Symbol::new("SQUID_INK")).is_none());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut w = watch(2);
        for (i, bid) in [10, 20, 30].into_iter().enumerate() {
            w.update(&state_with(i as i64, bid, bid + 2));
        }

        let history = w.history(&Symbol::new("KELP")).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.front(), Some(&Money::from_i64(21)));
    }

    #[test]
    fn test_never_trades() {
        let mut w = watch(2);
        let mut engines = Engines::default();
        w.update(&state_with(0, 10, 12));
        assert!(w.generate_orders(&mut engines).is_none());
    }
}
