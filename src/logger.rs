//! Per-tick diagnostic line
//!
//! The harness keeps one line of output per tick and cuts it at a fixed
//! budget. Each line is a compact JSON array:
//!
//! ```text
//! [state, orders, conversions, trader_data, logs]
//! ```
//!
//! The three free-text fields (incoming trader data, outgoing trader data and
//! accumulated log text) share whatever the budget leaves after the fixed
//! structure, each truncated to the same cap.

use crate::{Order, Symbol, Trade, TradingState};
use itertools::Itertools;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::fmt::Display;
use tracing::trace;

/// Ellipsis appended to truncated fields
const ELLIPSIS: &str = "...";

/// Accumulates free text during a tick and renders the diagnostic line
#[derive(Debug)]
pub struct DiagnosticLogger {
    logs: String,
    max_log_length: usize,
}

impl DiagnosticLogger {
    pub fn new(max_log_length: usize) -> Self {
        Self {
            logs: String::new(),
            max_log_length,
        }
    }

    /// Append one line of text
    pub fn print(&mut self, line: impl AsRef<str>) {
        self.logs.push_str(line.as_ref());
        self.logs.push('\n');
    }

    /// Append values joined by single spaces, then a newline
    pub fn print_all<T: Display>(&mut self, parts: &[T]) {
        let line = parts.iter().join(" ");
        self.print(line);
    }

    /// Text accumulated since the last flush
    pub fn pending(&self) -> &str {
        &self.logs
    }

    /// Render the tick's line and clear the accumulated text
    pub fn flush(
        &mut self,
        state: &TradingState,
        orders: &HashMap<Symbol, Vec<Order>>,
        conversions: i64,
        trader_data: &str,
    ) -> String {
        let compressed_orders = compress_orders(orders);

        let skeleton = json!([
            compress_state(state, ""),
            compressed_orders,
            conversions,
            "",
            "",
        ]);
        let base_length = skeleton.to_string().chars().count();

        let max_item_length = self.max_log_length.saturating_sub(base_length) / 3;

        let line = json!([
            compress_state(state, &truncate(&state.trader_data, max_item_length)),
            compressed_orders,
            conversions,
            truncate(trader_data, max_item_length),
            truncate(&self.logs, max_item_length),
        ])
        .to_string();

        trace!(base_length, max_item_length, length = line.len(), "Diagnostic line rendered");
        self.logs.clear();
        line
    }
}

/// Cut `value` to at most `max_length` characters.
///
/// Longer strings keep their first `max_length - 3` characters followed by
/// `"..."`, so the result is exactly `max_length` characters long. Caps
/// shorter than the ellipsis get a cut-down ellipsis.
pub fn truncate(value: &str, max_length: usize) -> String {
    if value.chars().count() <= max_length {
        return value.to_string();
    }
    if max_length < ELLIPSIS.len() {
        return ELLIPSIS[..max_length].to_string();
    }

    let keep = max_length - ELLIPSIS.len();
    let mut out: String = value.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

/// `[timestamp, trader_data, listings, order_depths, own_trades, market_trades, position, observations]`
pub fn compress_state(state: &TradingState, trader_data: &str) -> Value {
    json!([
        state.timestamp,
        trader_data,
        compress_listings(state),
        compress_order_depths(state),
        compress_trades(&state.own_trades),
        compress_trades(&state.market_trades),
        state.position,
        compress_observations(state),
    ])
}

fn compress_listings(state: &TradingState) -> Value {
    state
        .listings
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(_, l)| json!([l.symbol, l.product, l.denomination]))
        .collect()
}

fn compress_order_depths(state: &TradingState) -> Value {
    let compressed: Map<String, Value> = state
        .order_depths
        .iter()
        .map(|(symbol, depth)| {
            (
                symbol.to_string(),
                json!([depth.buy_orders, depth.sell_orders]),
            )
        })
        .collect();
    Value::Object(compressed)
}

fn compress_trades(trades: &HashMap<Symbol, Vec<Trade>>) -> Value {
    trades
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .flat_map(|(_, list)| list.iter())
        .map(|t| {
            json!([
                t.symbol,
                t.price,
                t.quantity,
                t.buyer,
                t.seller,
                t.timestamp,
            ])
        })
        .collect()
}

fn compress_observations(state: &TradingState) -> Value {
    let conversion: Map<String, Value> = state
        .observations
        .conversion_observations
        .iter()
        .map(|(product, o)| {
            (
                product.clone(),
                json!([
                    o.bid_price,
                    o.ask_price,
                    o.transport_fees,
                    o.export_tariff,
                    o.import_tariff,
                    o.sugar_price,
                    o.sunlight_index,
                ]),
            )
        })
        .collect();

    json!([state.observations.plain_value_observations, conversion])
}

/// `[[symbol, price, quantity], ...]`, products in symbol order
pub fn compress_orders(orders: &HashMap<Symbol, Vec<Order>>) -> Value {
    orders
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .flat_map(|(_, list)| list.iter())
        .map(|o| json!([o.symbol, o.price, o.quantity]))
        .collect()
}
