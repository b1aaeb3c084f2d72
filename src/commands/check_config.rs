//! Check-config command implementation

use anyhow::Result;
use tick_trader::strategies::available_components;
use tick_trader::{Config, Trader};
use tracing::info;

pub fn run(config_path: String) -> Result<()> {
    let config = Config::from_file(&config_path)?;
    let trader = Trader::from_config(&config)?;

    info!("Configuration OK: {}", config_path);
    info!(
        products = config.products.len(),
        fill_price_basis = ?config.execution.fill_price_basis,
        position_basis = ?config.execution.position_basis,
        "Execution engines"
    );
    for component in trader.components() {
        let products: Vec<&str> = component.products().iter().map(|s| s.as_str()).collect();
        info!(name = component.name(), products = ?products, "Signal component");
    }
    info!("Available component kinds: {}", available_components().join(", "));

    Ok(())
}
