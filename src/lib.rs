//! Tick Trader
//!
//! Template for a tick-driven competition trading bot. Every tick the harness
//! hands over order-book snapshots for a fixed set of products; the bot
//! answers with orders, a conversion count and an opaque carry-forward string.
//!
//! The core is the per-product execution engine ([`oms::ExecutionEngine`]):
//! it sweeps the resting book for a signed quantity, best price first, and
//! keeps a net position with a volume-weighted average price.
//!
//! ```
//! use tick_trader::oms::{ExecutionEngine, ExecutionSettings, OrderDepth};
//! use tick_trader::Symbol;
//!
//! let mut engine = ExecutionEngine::new(Symbol::new("KELP"), ExecutionSettings::default());
//! engine.refresh_book(OrderDepth::new().with_ask(100, 5).with_ask(101, 10));
//!
//! let orders = engine.match_market_order(8);
//! assert_eq!(orders.len(), 2);
//! assert_eq!(engine.position().quantity(), 8);
//! ```

pub mod config;
pub mod logger;
pub mod oms;
pub mod strategies;
pub mod trader;
pub mod types;

pub use config::Config;
pub use trader::Trader;
pub use types::*;
