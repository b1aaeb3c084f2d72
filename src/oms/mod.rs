//! Order Management System (OMS)
//!
//! Per-tick order matching for the trading bot:
//! - Resting order books with price priority
//! - Market-order sweeps with partial fills
//! - Net position with volume-weighted average price

pub mod execution;
pub mod orderbook;
pub mod position;

// Re-export core types
pub use execution::{Engines, ExecutionEngine, ExecutionSettings, FillPriceBasis, PositionBasis};
pub use orderbook::{OrderDepth, TopOfBook};
pub use position::Position;
