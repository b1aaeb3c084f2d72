//! Core data types used across the trading system
//!
//! Mirrors the per-tick snapshot handed over by the competition harness
//! (`TradingState`) and the orders handed back (`Order`, `TickOutput`).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::oms::OrderDepth;

/// Price in integer ticks (the exchange's native unit)
pub type Price = i64;

/// Signed quantity: positive = buy, negative = sell
pub type Quantity = i64;

/// Product symbol using Arc<str> for cheap cloning
///
/// Symbols are cloned into every emitted order and every engine lookup.
/// Using Arc<str> instead of String keeps those clones O(1).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(#[serde(with = "arc_str_serde")] std::sync::Arc<str>);

/// Custom serde for Arc<str>
mod arc_str_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::sync::Arc;

    pub fn serialize<S>(value: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Arc::from(s.as_str()))
    }
}

impl Symbol {
    pub fn new(s: impl AsRef<str>) -> Self {
        Symbol(std::sync::Arc::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Direction implied by a signed quantity (`None` for zero)
    pub fn of(quantity: Quantity) -> Option<Side> {
        match quantity {
            q if q > 0 => Some(Side::Buy),
            q if q < 0 => Some(Side::Sell),
            _ => None,
        }
    }

    /// Apply this side's sign to an unsigned size
    pub fn signed(self, size: Quantity) -> Quantity {
        match self {
            Side::Buy => size,
            Side::Sell => -size,
        }
    }
}

/// An order this bot submits. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Quantity,
}

impl Order {
    pub fn new(symbol: Symbol, price: Price, quantity: Quantity) -> Self {
        Self {
            symbol,
            price,
            quantity,
        }
    }
}

/// An executed trade as reported by the harness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub price: Price,
    pub quantity: Quantity,
    #[serde(default)]
    pub buyer: Option<String>,
    #[serde(default)]
    pub seller: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
}

/// Tradable listing metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub symbol: Symbol,
    pub product: String,
    pub denomination: String,
}

/// Conversion venue quote for a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionObservation {
    pub bid_price: f64,
    pub ask_price: f64,
    pub transport_fees: f64,
    pub export_tariff: f64,
    pub import_tariff: f64,
    #[serde(default)]
    pub sugar_price: f64,
    #[serde(default)]
    pub sunlight_index: f64,
}

/// Non-book observations delivered with each tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default)]
    pub plain_value_observations: HashMap<String, f64>,
    #[serde(default)]
    pub conversion_observations: HashMap<String, ConversionObservation>,
}

/// Per-tick market snapshot supplied by the harness
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradingState {
    #[serde(default)]
    pub timestamp: i64,

    /// Opaque string returned by the previous tick
    #[serde(rename = "traderData", default)]
    pub trader_data: String,

    #[serde(default)]
    pub listings: HashMap<Symbol, Listing>,

    #[serde(default)]
    pub order_depths: HashMap<Symbol, OrderDepth>,

    #[serde(default)]
    pub own_trades: HashMap<Symbol, Vec<Trade>>,

    #[serde(default)]
    pub market_trades: HashMap<Symbol, Vec<Trade>>,

    /// Positions as tracked by the harness
    #[serde(default)]
    pub position: HashMap<Symbol, Quantity>,

    #[serde(default)]
    pub observations: Observation,
}

/// Everything a tick hands back to the harness
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub orders: HashMap<Symbol, Vec<Order>>,
    pub conversions: i64,
    pub trader_data: String,
}

impl TickOutput {
    /// Total number of orders across all products
    pub fn order_count(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }
}

// ============================================================================
// Money Type - Precise Decimal Arithmetic for Average Prices
// ============================================================================

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

/// Money type for precise decimal arithmetic on prices.
///
/// Wraps `rust_decimal::Decimal`. Prices and quantities arrive as integers,
/// but volume-weighted averages are fractional (`803 / 8 = 100.375`) and
/// must compare exactly in position accounting.
///
/// # Example
/// ```
/// use tick_trader::Money;
/// let notional = Money::from_i64(803);
/// let qty = Money::from_i64(8);
/// assert_eq!((notional / qty).to_f64(), 100.375);
/// ```
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Money {
    /// Zero value
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Convert to f64 (for JSON diagnostics)
    pub fn to_f64(self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Create from i64 (prices, quantities, notionals)
    pub fn from_i64(value: i64) -> Self {
        Money(Decimal::from(value))
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Mul for Money {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Money(self.0 * rhs.0)
    }
}

impl Div for Money {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        if rhs.0.is_zero() {
            Money::ZERO // a zero-volume average is defined as zero
        } else {
            Money(self.0 / rhs.0)
        }
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money::from_i64(value)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}
