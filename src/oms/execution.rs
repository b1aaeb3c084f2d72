//! Execution engine: matches market orders against the tick's order book
//!
//! One engine per product. Each tick the driver swaps in a fresh book with
//! [`ExecutionEngine::refresh_book`]; matches then consume that book in
//! place, so liquidity taken by one match is gone for the rest of the tick.

use crate::oms::{OrderDepth, Position};
use crate::{Money, Order, Price, Quantity, Side, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Which fill legs feed the weighted fill price of a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPriceBasis {
    /// Only legs whose emitted quantity is positive. Sell matches therefore
    /// price at zero.
    #[default]
    PositiveLegs,

    /// Every leg, weighted by absolute size
    AllLegs,
}

/// What quantity a match advances the net position by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionBasis {
    /// The requested quantity, even when the book could not fill all of it
    #[default]
    Requested,

    /// Only what the book actually filled
    Filled,
}

/// Accounting switches shared by every engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionSettings {
    #[serde(default)]
    pub fill_price_basis: FillPriceBasis,
    #[serde(default)]
    pub position_basis: PositionBasis,
}

/// Order model for a single product: current book, current position
pub struct ExecutionEngine {
    symbol: Symbol,
    book: OrderDepth,
    position: Position,
    settings: ExecutionSettings,
    /// Human-readable notes for the tick's diagnostic line
    journal: Vec<String>,
}

impl ExecutionEngine {
    /// Create an engine with an empty book and a flat position
    pub fn new(symbol: Symbol, settings: ExecutionSettings) -> Self {
        Self {
            symbol,
            book: OrderDepth::new(),
            position: Position::default(),
            settings,
            journal: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The book as left by this tick's matches so far
    pub fn book(&self) -> &OrderDepth {
        &self.book
    }

    /// Replace the order book wholesale. Call once per tick before matching.
    pub fn refresh_book(&mut self, book: OrderDepth) {
        self.book = book;
    }

    /// Wrap a fixed-price order. Touches neither book nor position.
    pub fn send_limit_order(&self, quantity: Quantity, price: Price) -> Vec<Order> {
        vec![Order::new(self.symbol.clone(), price, quantity)]
    }

    /// Sweep the book for `desired` units (positive buys, negative sells).
    ///
    /// Buys walk the asks from the lowest price up, sells walk the bids from
    /// the highest price down, until the quantity is met or the side runs
    /// dry. A partial fill is not an error. The position then advances per
    /// [`PositionBasis`] and takes the weighted fill price as its average.
    pub fn match_market_order(&mut self, desired: Quantity) -> Vec<Order> {
        let Some(side) = Side::of(desired) else {
            return Vec::new();
        };

        match side {
            Side::Buy => self.note(format!("Buying: {}", desired)),
            Side::Sell => self.note(format!("Selling: {}", desired.unsigned_abs())),
        }

        // i64::MIN has no positive counterpart; clamp to i64::MAX
        let wanted = desired.saturating_abs();
        let mut remaining = wanted;
        let mut orders = Vec::new();

        while remaining > 0 {
            let Some((price, taken)) = self.book.take_best(side, remaining) else {
                break;
            };
            debug!(symbol = %self.symbol, ?side, price, taken, "Level consumed");
            orders.push(Order::new(self.symbol.clone(), price, side.signed(taken)));
            remaining -= taken;
        }

        let filled = wanted - remaining;
        if remaining > 0 {
            debug!(
                symbol = %self.symbol,
                requested = desired,
                filled,
                "Book exhausted before quantity was met"
            );
        }

        let fill_price = self.weighted_fill_price(&orders);
        let delta = match self.settings.position_basis {
            PositionBasis::Requested => desired,
            PositionBasis::Filled => side.signed(filled),
        };
        self.position.apply(delta, fill_price);

        debug!(
            symbol = %self.symbol,
            legs = orders.len(),
            %fill_price,
            position = %self.position,
            "Market order matched"
        );

        orders
    }

    /// Flatten the current position at market. `None` when already flat.
    pub fn liquidate(&mut self) -> Option<Vec<Order>> {
        if self.position.is_flat() {
            self.note("No position to liquidate".to_string());
            return None;
        }
        self.note(format!(
            "Liquidating, last price: {}",
            self.position.average_price()
        ));
        let net = self.position.quantity();
        Some(self.match_market_order(net.saturating_neg()))
    }

    /// Take the notes written since the last drain
    pub fn drain_journal(&mut self) -> Vec<String> {
        std::mem::take(&mut self.journal)
    }

    fn note(&mut self, line: String) {
        debug!(symbol = %self.symbol, "{}", line);
        self.journal.push(line);
    }

    fn weighted_fill_price(&self, orders: &[Order]) -> Money {
        let (notional, volume) = match self.settings.fill_price_basis {
            FillPriceBasis::PositiveLegs => {
                if orders.iter().any(|o| o.quantity < 0) {
                    warn!(
                        symbol = %self.symbol,
                        "Sell legs excluded from weighted fill price"
                    );
                }
                orders
                    .iter()
                    .filter(|o| o.quantity > 0)
                    .fold((0, 0), |(n, v), o| (n + o.price * o.quantity, v + o.quantity))
            }
            FillPriceBasis::AllLegs => orders.iter().fold((0, 0), |(n, v), o| {
                (n + o.price * o.quantity.abs(), v + o.quantity.abs())
            }),
        };

        // Money division by zero yields zero
        Money::from_i64(notional) / Money::from_i64(volume)
    }
}

/// Engines keyed by product, built once at startup
#[derive(Default)]
pub struct Engines {
    engines: HashMap<Symbol, ExecutionEngine>,
}

impl Engines {
    pub fn new<I>(symbols: I, settings: ExecutionSettings) -> Self
    where
        I: IntoIterator<Item = Symbol>,
    {
        let engines = symbols
            .into_iter()
            .map(|symbol| (symbol.clone(), ExecutionEngine::new(symbol, settings)))
            .collect();
        Self { engines }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&ExecutionEngine> {
        self.engines.get(symbol)
    }

    pub fn get_mut(&mut self, symbol: &Symbol) -> Option<&mut ExecutionEngine> {
        self.engines.get_mut(symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.engines.contains_key(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &ExecutionEngine)> {
        self.engines.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Symbol, &mut ExecutionEngine)> {
        self.engines.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn engine(settings: ExecutionSettings) -> ExecutionEngine {
        ExecutionEngine::new(Symbol::new("KELP"), settings)
    }

    fn asks() -> OrderDepth {
        OrderDepth::new().with_ask(100, 5).with_ask(101, 10)
    }

    fn bids() -> OrderDepth {
        OrderDepth::new().with_bid(99, 4).with_bid(97, 6)
    }

    #[test]
    fn test_buy_walks_asks_lowest_first() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(asks());

        let orders = eng.match_market_order(8);

        let legs: Vec<(Price, Quantity)> = orders.iter().map(|o| (o.price, o.quantity)).collect();
        assert_eq!(legs, vec![(100, 5), (101, 3)]);
        assert_eq!(eng.position().quantity(), 8);
        assert_eq!(eng.position().average_price(), Money::from(dec!(100.375)));
    }

    #[test]
    fn test_small_buy_consumes_one_level_partially() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(asks());

        let orders = eng.match_market_order(2);

        assert_eq!(orders, vec![Order::new(Symbol::new("KELP"), 100, 2)]);
        assert_eq!(eng.book().sell_orders.get(&100), Some(&3));
        assert_eq!(eng.book().sell_orders.get(&101), Some(&10));
    }

    #[test]
    fn test_sell_walks_bids_highest_first() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(bids());

        let orders = eng.match_market_order(-7);

        let legs: Vec<(Price, Quantity)> = orders.iter().map(|o| (o.price, o.quantity)).collect();
        assert_eq!(legs, vec![(99, -4), (97, -3)]);
        assert_eq!(eng.position().quantity(), -7);
        // Sell legs carry negative quantities and are left out of the average
        assert_eq!(eng.position().average_price(), Money::ZERO);
    }

    #[test]
    fn test_sell_average_with_all_legs_basis() {
        let mut eng = engine(ExecutionSettings {
            fill_price_basis: FillPriceBasis::AllLegs,
            ..Default::default()
        });
        eng.refresh_book(bids());

        eng.match_market_order(-7);

        // (99 * 4 + 97 * 3) / 7
        assert_eq!(
            eng.position().average_price(),
            Money::from_i64(687) / Money::from_i64(7)
        );
    }

    #[test]
    fn test_oversized_buy_drains_side_and_assumes_full_fill() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(asks());

        let orders = eng.match_market_order(40);

        let filled: Quantity = orders.iter().map(|o| o.quantity).sum();
        assert_eq!(filled, 15);
        assert!(eng.book().sell_orders.is_empty());
        assert_eq!(eng.position().quantity(), 40);
    }

    #[test]
    fn test_filled_position_basis_counts_only_fills() {
        let mut eng = engine(ExecutionSettings {
            position_basis: PositionBasis::Filled,
            ..Default::default()
        });
        eng.refresh_book(asks());

        eng.match_market_order(40);

        assert_eq!(eng.position().quantity(), 15);
    }

    #[test]
    fn test_empty_side_yields_no_orders_but_moves_position() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(bids());

        let orders = eng.match_market_order(6);

        assert!(orders.is_empty());
        assert_eq!(eng.position().quantity(), 6);
        assert_eq!(eng.position().average_price(), Money::ZERO);
    }

    #[test]
    fn test_zero_quantity_is_noop() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(asks());
        eng.match_market_order(3);
        let before = eng.position();

        let orders = eng.match_market_order(0);

        assert!(orders.is_empty());
        assert_eq!(eng.position(), before);
        assert_eq!(eng.book().sell_orders.get(&100), Some(&2));
    }

    #[test]
    fn test_book_consumption_persists_within_tick() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(asks());

        eng.match_market_order(5);
        let second = eng.match_market_order(2);

        assert_eq!(second[0].price, 101);
    }

    #[test]
    fn test_refresh_replaces_consumed_book() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(asks());
        eng.match_market_order(15);
        assert!(eng.book().sell_orders.is_empty());

        eng.refresh_book(asks());
        assert_eq!(eng.book().best_ask(), Some(100));
    }

    #[test]
    fn test_send_limit_order() {
        let eng = engine(ExecutionSettings::default());
        let orders = eng.send_limit_order(-3, 2030);

        assert_eq!(orders, vec![Order::new(Symbol::new("KELP"), 2030, -3)]);
        assert!(eng.position().is_flat());
    }

    #[test]
    fn test_liquidate_flat_position_returns_none() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(bids());

        assert!(eng.liquidate().is_none());
        assert_eq!(eng.drain_journal(), vec!["No position to liquidate".to_string()]);
    }

    #[test]
    fn test_liquidate_long_sells_into_bids() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(asks().with_bid(99, 4).with_bid(97, 6));
        eng.match_market_order(8);

        let orders = eng.liquidate().unwrap();

        let legs: Vec<(Price, Quantity)> = orders.iter().map(|o| (o.price, o.quantity)).collect();
        assert_eq!(legs, vec![(99, -4), (97, -4)]);
        assert!(eng.position().is_flat());
    }

    #[test]
    fn test_journal_records_direction_and_size() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(asks().with_bid(99, 4));
        eng.match_market_order(3);
        eng.match_market_order(-2);

        assert_eq!(
            eng.drain_journal(),
            vec!["Buying: 3".to_string(), "Selling: 2".to_string()]
        );
        assert!(eng.drain_journal().is_empty());
    }

    #[test]
    fn test_extreme_sell_quantity_drains_bids() {
        let mut eng = engine(ExecutionSettings::default());
        eng.refresh_book(bids());

        let orders = eng.match_market_order(Quantity::MIN);

        let legs: Vec<(Price, Quantity)> = orders.iter().map(|o| (o.price, o.quantity)).collect();
        assert_eq!(legs, vec![(99, -4), (97, -6)]);
        assert!(eng.book().buy_orders.is_empty());
        assert_eq!(eng.position().quantity(), Quantity::MIN);
        assert_eq!(
            eng.drain_journal(),
            vec![format!("Selling: {}", Quantity::MIN.unsigned_abs())]
        );
    }

    #[test]
    fn test_liquidate_extreme_short_does_not_overflow() {
        let mut eng = engine(ExecutionSettings::default());
        eng.match_market_order(Quantity::MIN);
        eng.refresh_book(asks());

        let orders = eng.liquidate().unwrap();

        assert_eq!(orders.iter().map(|o| o.quantity).sum::<Quantity>(), 15);
        assert_eq!(eng.position().quantity(), -1);
    }

    #[test]
    fn test_engines_registry() {
        let mut engines = Engines::new(
            ["KELP", "SQUID_INK"].into_iter().map(Symbol::new),
            ExecutionSettings::default(),
        );

        assert_eq!(engines.len(), 2);
        assert!(engines.contains(&Symbol::new("KELP")));
        assert!(engines.get(&Symbol::new("JAMS")).is_none());
        assert!(engines.get_mut(&Symbol::new("SQUID_INK")).is_some());
    }
}
