//! Application context: the top-level registry and the state it shares.
//!
//! An `App` is built once at startup, runs the main menu, and is dropped when
//! the session ends. Nothing here is global.

use std::rc::Rc;

use tracing::info;

use crate::calculator::{History, SharedHistory};
use crate::commands::CommandRegistry;
use crate::config::Config;
use crate::console::Console;
use crate::dispatch::{DispatchLoop, LoopOutcome, MenuOptions};
use crate::plugins::{builtin_plugins, CandidateSource, Discoverer, DiscoveryReport, ManifestDir};

/// Printed once the main menu has stopped.
pub const FINISHED_MESSAGE: &str = "Program finished.";

/// The top-level command registry and its discovery results.
pub struct App {
    registry: CommandRegistry,
    history: SharedHistory,
    report: DiscoveryReport,
}

impl App {
    /// Discover built-in plugins, then the configured plugin directory.
    ///
    /// Directory plugins with a built-in's name replace it in place.
    pub fn bootstrap(config: &Config) -> Self {
        let plugins_dir = ManifestDir::new(config.plugins_dir());
        Self::from_sources(config, &[&plugins_dir])
    }

    /// Discover built-in plugins followed by `extra` sources.
    pub fn from_sources(config: &Config, extra: &[&dyn CandidateSource]) -> Self {
        let history = History::shared();
        let discoverer = Discoverer::new(config.discovery);
        let mut registry = CommandRegistry::new();

        let mut report = discoverer.discover(&builtin_plugins(Rc::clone(&history)), &mut registry);
        for source in extra {
            report.merge(discoverer.discover(*source, &mut registry));
        }

        info!(
            environment = %config.environment,
            commands = registry.len(),
            failed = report.failure_count(),
            "Plugins loaded"
        );

        Self {
            registry,
            history,
            report,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    pub fn report(&self) -> &DiscoveryReport {
        &self.report
    }

    /// Run the main menu until the session ends.
    pub fn run(&self, console: &mut dyn Console) -> LoopOutcome {
        info!("Starting main menu");
        let outcome = DispatchLoop::new(&self.registry, MenuOptions::top_level()).run(console);
        console.print_line(FINISHED_MESSAGE);
        info!(?outcome, "Main menu stopped");
        outcome
    }
}
