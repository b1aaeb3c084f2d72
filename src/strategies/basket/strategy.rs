//! Basket Component
//!
//! spread = mid(basket) - sum(units * mid(leg))
//!
//! The spread is only computed on ticks where every member has a two-sided
//! book; other ticks leave the last value in place.

use crate::oms::Engines;
use crate::strategies::SignalComponent;
use crate::{Money, Order, Symbol, TradingState};
use tracing::debug;

use super::config::BasketConfig;

pub struct BasketComponent {
    name: String,
    basket: Symbol,
    legs: Vec<(Symbol, i64)>,
    /// Basket first, then legs
    products: Vec<Symbol>,
    last_spread: Option<Money>,
    spread_sum: Money,
    observations: i64,
}

impl BasketComponent {
    pub fn new(config: BasketConfig) -> Self {
        let basket = Symbol::new(&config.basket);
        let legs: Vec<(Symbol, i64)> = config
            .legs
            .iter()
            .map(|(leg, units)| (Symbol::new(leg), *units))
            .collect();
        let products = std::iter::once(basket.clone())
            .chain(legs.iter().map(|(leg, _)| leg.clone()))
            .collect();

        Self {
            name: config.name,
            basket,
            legs,
            products,
            last_spread: None,
            spread_sum: Money::ZERO,
            observations: 0,
        }
    }

    /// Spread from the latest complete snapshot
    pub fn last_spread(&self) -> Option<Money> {
        self.last_spread
    }

    /// Mean of every spread observed so far
    pub fn mean_spread(&self) -> Option<Money> {
        (self.observations > 0).then(|| self.spread_sum / Money::from_i64(self.observations))
    }

    pub fn observations(&self) -> i64 {
        self.observations
    }

    fn spread(&self, state: &TradingState) -> Option<Money> {
        let mid = |symbol: &Symbol| state.order_depths.get(symbol).and_then(|d| d.mid_price());

        let basket_mid = mid(&self.basket)?;
        let mut legs_value = Money::ZERO;
        for (leg, units) in &self.legs {
            legs_value += mid(leg)? * Money::from_i64(*units);
        }
        Some(basket_mid - legs_value)
    }
}

impl SignalComponent for BasketComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn products(&self) -> &[Symbol] {
        &self.products
    }

    fn update(&mut self, state: &TradingState) {
        let Some(spread) = self.spread(state) else {
            return;
        };
        self.last_spread = Some(spread);
        self.spread_sum += spread;
        self.observations += 1;
        debug!(component = %self.name, timestamp = state.timestamp, %spread, "Basket spread");
    }

    fn generate_orders(&mut self, _engines: &mut Engines) -> Option<Vec<Order>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oms::OrderDepth;
    use std::collections::BTreeMap;

    fn basket() -> BasketComponent {
        BasketComponent::new(BasketConfig {
            name: "picnic1".to_string(),
            basket: "PICNIC_BASKET1".to_string(),
            legs: BTreeMap::from([
                ("CROISSANTS".to_string(), 6),
                ("DJEMBES".to_string(), 1),
                ("JAMS".to_string(), 3),
            ]),
        })
    }

    fn quote(state: &mut TradingState, symbol: &str, bid: i64, ask: i64) {
        state.order_depths.insert(
            Symbol::new(symbol),
            OrderDepth::new().with_bid(bid, 5).with_ask(ask, -5),
        );
    }

    fn full_state(basket_bid: i64) -> TradingState {
        let mut state = TradingState::default();
        quote(&mut state, "PICNIC_BASKET1", basket_bid, basket_bid + 2);
        quote(&mut state, "CROISSANTS", 4300, 4302);
        quote(&mut state, "DJEMBES", 13400, 13402);
        quote(&mut state, "JAMS", 6600, 6602);
        state
    }

    #[test]
    fn test_products_basket_first() {
        let b = basket();
        let names: Vec<&str> = b.products().iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["PICNIC_BASKET1", "CROISSANTS", "DJEMBES", "JAMS"]);
    }

    #[test]
    fn test_spread_against_legs() {
        let mut b = basket();
        // legs: 6 * 4301 + 13401 + 3 * 6601 = 59010
        b.update(&full_state(59099));
        assert_eq!(b.last_spread(), Some(Money::from_i64(90)));

        b.update(&full_state(59109));
        assert_eq!(b.last_spread(), Some(Money::from_i64(100)));
        assert_eq!(b.mean_spread(), Some(Money::from_i64(95)));
        assert_eq!(b.observations(), 2);
    }

    #[test]
    fn test_missing_leg_keeps_last_spread() {
        let mut b = basket();
        b.update(&full_state(59099));

        let mut partial = full_state(60000);
        partial.order_depths.remove(&Symbol::new("JAMS"));
        b.update(&partial);

        assert_eq!(b.last_spread(), Some(Money::from_i64(90)));
        assert_eq!(b.observations(), 1);
    }

    #[test]
    fn test_no_observation_no_mean() {
        assert!(basket().mean_spread().is_none());
    }
}
