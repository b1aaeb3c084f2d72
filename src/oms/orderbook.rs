//! Per-product resting order book with price priority
//!
//! Uses BTreeMap for price-sorted levels. `buy_orders` holds standing bids
//! (best = highest price), `sell_orders` holds standing asks (best = lowest
//! price). The harness reports ask sizes as negative numbers; every size read
//! here is taken as an absolute value so either convention works.

use crate::{Money, Price, Quantity, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resting liquidity for one product during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDepth {
    /// Standing buy interest: price -> size
    #[serde(default)]
    pub buy_orders: BTreeMap<Price, Quantity>,

    /// Standing sell interest: price -> size
    #[serde(default)]
    pub sell_orders: BTreeMap<Price, Quantity>,
}

/// Best prices and sizes on both sides of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopOfBook {
    pub best_bid: Price,
    pub best_ask: Price,
    pub best_bid_volume: Quantity,
    pub best_ask_volume: Quantity,
    /// Mid weighted by best-level sizes; `None` when either best size is zero
    pub weighted_mid: Option<Money>,
    pub mid: Money,
}

impl OrderDepth {
    /// Create an empty order book
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a resting bid level
    pub fn with_bid(mut self, price: Price, size: Quantity) -> Self {
        self.buy_orders.insert(price, size);
        self
    }

    /// Builder: add a resting ask level
    pub fn with_ask(mut self, price: Price, size: Quantity) -> Self {
        self.sell_orders.insert(price, size);
        self
    }

    /// Get best bid price
    pub fn best_bid(&self) -> Option<Price> {
        self.buy_orders.keys().next_back().copied()
    }

    /// Get best ask price
    pub fn best_ask(&self) -> Option<Price> {
        self.sell_orders.keys().next().copied()
    }

    /// Arithmetic mid of best bid and best ask
    pub fn mid_price(&self) -> Option<Money> {
        self.top_of_book().map(|top| top.mid)
    }

    /// Size-weighted mid of best bid and best ask
    pub fn weighted_mid(&self) -> Option<Money> {
        self.top_of_book().and_then(|top| top.weighted_mid)
    }

    /// Summary of both best levels. `None` unless both sides have liquidity.
    pub fn top_of_book(&self) -> Option<TopOfBook> {
        let (&best_bid, &bid_size) = self.buy_orders.iter().next_back()?;
        let (&best_ask, &ask_size) = self.sell_orders.iter().next()?;
        let best_bid_volume = bid_size.abs();
        let best_ask_volume = ask_size.abs();

        let weighted_mid = if best_bid_volume != 0 && best_ask_volume != 0 {
            let notional = best_bid * best_bid_volume + best_ask * best_ask_volume;
            Some(Money::from_i64(notional) / Money::from_i64(best_bid_volume + best_ask_volume))
        } else {
            None
        };

        Some(TopOfBook {
            best_bid,
            best_ask,
            best_bid_volume,
            best_ask_volume,
            weighted_mid,
            mid: Money::from_i64(best_bid + best_ask) / Money::from_i64(2),
        })
    }

    /// Take up to `wanted` units from the best level of the side a `side`
    /// order trades against (asks for a buy, bids for a sell).
    ///
    /// Returns the level price and the unsigned size taken. A fully taken
    /// level is removed; a partially taken one keeps its remainder (sign
    /// preserved). Empty levels met on the way are dropped. Returns `None`
    /// once the side holds no liquidity.
    pub fn take_best(&mut self, side: Side, wanted: Quantity) -> Option<(Price, Quantity)> {
        let levels = match side {
            Side::Buy => &mut self.sell_orders,
            Side::Sell => &mut self.buy_orders,
        };

        loop {
            let (price, size) = match side {
                Side::Buy => levels.first_key_value(),
                Side::Sell => levels.last_key_value(),
            }
            .map(|(&p, &s)| (p, s))?;

            let available = size.saturating_abs();
            if available == 0 {
                levels.remove(&price);
                continue;
            }

            if available <= wanted {
                levels.remove(&price);
                return Some((price, available));
            }

            let left = available - wanted;
            levels.insert(price, if size < 0 { -left } else { left });
            return Some((price, wanted));
        }
    }

    /// Total absolute size resting on one side
    pub fn depth(&self, side: Side) -> Quantity {
        let levels = match side {
            Side::Buy => &self.buy_orders,
            Side::Sell => &self.sell_orders,
        };
        levels.values().map(|s| s.abs()).sum()
    }

    /// Check if both sides are empty
    pub fn is_empty(&self) -> bool {
        self.buy_orders.is_empty() && self.sell_orders.is_empty()
    }
}
