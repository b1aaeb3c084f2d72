//! Tick driver
//!
//! Owns one execution engine per configured product and the configured
//! signal components. Each call to [`Trader::run`] processes one snapshot to
//! completion: refresh books, update components, collect their orders, emit
//! the diagnostic line.

use std::collections::HashMap;

use itertools::Itertools;
use tracing::{debug, info, warn};

use crate::config::{Config, ConfigError, OutputConfig};
use crate::logger::DiagnosticLogger;
use crate::oms::Engines;
use crate::strategies::{create_component, SignalComponent};
use crate::{Order, Symbol, TickOutput, TradingState};

/// Destination of the per-tick diagnostic line
pub type DiagnosticSink = Box<dyn FnMut(&str) + Send>;

/// Result of one tick plus the diagnostic line it produced
#[derive(Debug, Clone)]
pub struct TickReport {
    pub output: TickOutput,
    pub diagnostic: String,
}

pub struct Trader {
    engines: Engines,
    components: Vec<Box<dyn SignalComponent>>,
    logger: DiagnosticLogger,
    output: OutputConfig,
    sink: DiagnosticSink,
    ticks: u64,
}

impl Trader {
    /// Build engines and components from a validated config
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let engines = Engines::new(config.symbols(), config.execution);
        let components = config
            .components
            .iter()
            .map(create_component)
            .collect::<Result<Vec<_>, _>>()?;

        let trader = Self::new(engines, components, config.output.clone())?;
        info!(
            products = trader.engines.len(),
            components = trader.components.len(),
            "Trader initialized"
        );
        Ok(trader)
    }

    /// Assemble a trader from parts. Every product a component names must
    /// have an engine.
    pub fn new(
        engines: Engines,
        components: Vec<Box<dyn SignalComponent>>,
        output: OutputConfig,
    ) -> Result<Self, ConfigError> {
        for component in &components {
            if let Some(missing) = component.products().iter().find(|s| !engines.contains(s)) {
                return Err(ConfigError::UnknownProduct {
                    component: component.name().to_string(),
                    product: missing.to_string(),
                });
            }
        }

        Ok(Self {
            engines,
            components,
            logger: DiagnosticLogger::new(output.max_log_length),
            output,
            sink: Box::new(|line: &str| println!("{}", line)),
            ticks: 0,
        })
    }

    /// Send diagnostic lines somewhere other than stdout
    pub fn with_diagnostic_sink(mut self, sink: impl FnMut(&str) + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn engines(&self) -> &Engines {
        &self.engines
    }

    pub fn engines_mut(&mut self) -> &mut Engines {
        &mut self.engines
    }

    pub fn components(&self) -> &[Box<dyn SignalComponent>] {
        &self.components
    }

    /// Free-text sink for the next diagnostic line
    pub fn logger_mut(&mut self) -> &mut DiagnosticLogger {
        &mut self.logger
    }

    /// Ticks processed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Process one snapshot, emit its diagnostic line to the sink and
    /// return what the harness expects back
    pub fn run(&mut self, state: &TradingState) -> TickOutput {
        let report = self.run_with_report(state);
        (self.sink)(&report.diagnostic);
        report.output
    }

    /// Like [`Trader::run`], but hands the diagnostic line back instead of
    /// emitting it
    pub fn run_with_report(&mut self, state: &TradingState) -> TickReport {
        self.ticks += 1;

        // Products absent from the snapshot get an empty book
        for (symbol, engine) in self.engines.iter_mut() {
            let book = state.order_depths.get(symbol).cloned().unwrap_or_default();
            engine.refresh_book(book);
        }
        for symbol in state.order_depths.keys().filter(|s| !self.engines.contains(s)) {
            warn!(%symbol, timestamp = state.timestamp, "No engine for product, book ignored");
        }

        for component in &mut self.components {
            component.update(state);
        }

        let mut orders: HashMap<Symbol, Vec<Order>> = HashMap::new();
        for component in &mut self.components {
            let Some(generated) = component.generate_orders(&mut self.engines) else {
                continue;
            };
            debug!(component = component.name(), count = generated.len(), "Orders generated");
            for order in generated {
                orders.entry(order.symbol.clone()).or_default().push(order);
            }
        }

        self.collect_journals();

        let diagnostic = self.logger.flush(
            state,
            &orders,
            self.output.conversions,
            &self.output.trader_data,
        );

        debug!(
            timestamp = state.timestamp,
            orders = orders.values().map(Vec::len).sum::<usize>(),
            "Tick complete"
        );

        TickReport {
            output: TickOutput {
                orders,
                conversions: self.output.conversions,
                trader_data: self.output.trader_data.clone(),
            },
            diagnostic,
        }
    }

    /// Move engine notes into the logger, products in symbol order
    fn collect_journals(&mut self) {
        let notes: Vec<String> = self
            .engines
            .iter_mut()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .flat_map(|(_, engine)| engine.drain_journal())
            .collect();
        for note in notes {
            self.logger.print(note);
        }
    }
}
