//! Replay command implementation

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use tick_trader::{Config, Trader, TradingState};
use tracing::{debug, info};

pub fn run(config_path: Option<String>, input_path: String) -> Result<()> {
    info!("Starting replay");

    let config = match &config_path {
        Some(path) => {
            let config = Config::from_file(path)?;
            info!("Loaded configuration from: {}", path);
            config
        }
        None => {
            info!("No configuration given, using defaults");
            Config::default()
        }
    };

    let mut trader = Trader::from_config(&config)?;

    let file = File::open(&input_path)
        .with_context(|| format!("Failed to open tick file {}", input_path))?;
    let reader = BufReader::new(file);

    let mut carried: Option<String> = None;
    let mut total_orders = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_no))?;
        let Some(mut state) = parse_tick(&line, line_no)? else {
            continue;
        };

        // The harness echoes the previous tick's string back
        if let Some(data) = carried.take() {
            state.trader_data = data;
        }

        // Diagnostic line goes to stdout through the trader's default sink
        let output = trader.run(&state);
        total_orders += output.order_count();
        debug!(
            timestamp = state.timestamp,
            orders = output.order_count(),
            "Tick replayed"
        );

        carried = Some(output.trader_data);
    }

    info!(ticks = trader.ticks(), orders = total_orders, "Replay complete");
    for (symbol, engine) in trader.engines().iter() {
        let position = engine.position();
        if !position.is_flat() {
            info!(%symbol, %position, "Open position");
        }
    }

    Ok(())
}

/// Parse one JSON line. Blank lines yield `None`.
fn parse_tick(line: &str, line_no: usize) -> Result<Option<TradingState>> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let state = serde_json::from_str(line)
        .with_context(|| format!("Failed to parse trading state on line {}", line_no))?;
    Ok(Some(state))
}
