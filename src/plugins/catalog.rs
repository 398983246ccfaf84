//! Compiled-in plugin catalogs.
//!
//! The catalogs stand in for a plugin package on disk: each entry is a
//! candidate name and the symbols its module exports, including the command
//! capability itself so that structural discovery has something to skip.

use std::rc::Rc;

use crate::calculator::{CalculatorCommand, Operation, OperationCommand, SharedHistory};
use crate::commands::{Command, ExitCommand, MessageCommand};
use crate::error::Result;

use super::loader::CandidateSource;
use super::types::{Candidate, Export, PluginModule};

/// A fixed, ordered list of candidates.
#[derive(Debug, Clone)]
pub struct PluginCatalog {
    label: String,
    candidates: Vec<Candidate>,
}

impl PluginCatalog {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            candidates: Vec::new(),
        }
    }

    /// Append a candidate; discovery visits candidates in insertion order.
    pub fn with_candidate(mut self, candidate: Candidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl CandidateSource for PluginCatalog {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn candidates(&self) -> Result<Vec<Candidate>> {
        Ok(self.candidates.clone())
    }
}

fn command_export<C, F>(symbol: &str, build: F) -> Export
where
    C: Command + 'static,
    F: Fn() -> C + 'static,
{
    Export::command(symbol, move || {
        let command: Rc<dyn Command> = Rc::new(build());
        Ok(command)
    })
}

fn module_exports(export: Export) -> Vec<Export> {
    vec![Export::abstract_base("Command"), export]
}

/// Top-level plugins, in discovery order.
///
/// The calculator plugin shares `history` with its operations.
pub fn builtin_plugins(history: SharedHistory) -> PluginCatalog {
    PluginCatalog::new("builtin plugins")
        .with_candidate(Candidate::module("calculator", move || {
            let history = Rc::clone(&history);
            Ok(PluginModule::new(
                "calculator",
                module_exports(Export::command("CalculatorCommand", move || {
                    let command: Rc<dyn Command> =
                        Rc::new(CalculatorCommand::new(Rc::clone(&history)));
                    Ok(command)
                })),
            ))
        }))
        .with_candidate(Candidate::with_exports(
            "discord",
            module_exports(command_export("DiscordCommand", MessageCommand::discord)),
        ))
        .with_candidate(Candidate::with_exports(
            "exit",
            module_exports(command_export("ExitCommand", || ExitCommand)),
        ))
        .with_candidate(Candidate::with_exports(
            "greet",
            module_exports(command_export("GreetCommand", MessageCommand::greet)),
        ))
}

/// Arithmetic operations offered by the calculator, in menu order.
pub fn operation_plugins(history: SharedHistory) -> PluginCatalog {
    Operation::ALL
        .iter()
        .fold(PluginCatalog::new("calculator operations"), |catalog, &op| {
            let history = Rc::clone(&history);
            catalog.with_candidate(Candidate::with_exports(
                op.name(),
                module_exports(command_export(op.symbol_name(), move || {
                    OperationCommand::new(op, Rc::clone(&history))
                })),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::History;
    use crate::commands::CommandRegistry;
    use crate::plugins::{Discoverer, DiscoveryStrategy};

    #[test]
    fn test_builtin_plugins_discover_in_order() {
        let history = History::shared();
        let mut registry = CommandRegistry::new();

        let report = Discoverer::default().discover(&builtin_plugins(history), &mut registry);

        assert_eq!(registry.list(), vec!["calculator", "discord", "exit", "greet"]);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_builtin_plugins_follow_name_convention() {
        let history = History::shared();
        let mut registry = CommandRegistry::new();

        let report = Discoverer::new(DiscoveryStrategy::Convention)
            .discover(&builtin_plugins(history), &mut registry);

        assert_eq!(report.loaded.len(), 4);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_operation_plugins_follow_name_convention() {
        let history = History::shared();
        let mut registry = CommandRegistry::new();

        let report = Discoverer::new(DiscoveryStrategy::Convention)
            .discover(&operation_plugins(history), &mut registry);

        assert_eq!(registry.list(), vec!["add", "subtract", "multiply", "divide"]);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_catalog_len() {
        let catalog = operation_plugins(History::shared());
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
        assert!(PluginCatalog::new("empty").is_empty());
    }
}
