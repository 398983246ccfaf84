//! Command registry for ReplCalc
//!
//! This module provides the `CommandRegistry` struct, an ordered mapping from
//! command name to command instance. Insertion order is menu order: the first
//! registered command is shown as `1.` by the dispatch loop.

use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::console::Console;

use super::{Command, LoopControl};

/// Normalize a command name for storage and lookup (trimmed, lower-cased).
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An ordered registry of named commands.
///
/// Names are unique after normalization. Registering a name that is already
/// present replaces the command in place (last write wins) and keeps the
/// original menu position.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use replcalc::commands::{CommandRegistry, MessageCommand};
///
/// let mut registry = CommandRegistry::new();
/// registry.register("greet", Rc::new(MessageCommand::new("greet", "Hello, World!")));
///
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.resolve_by_position(0), Some("greet"));
/// assert!(registry.resolve("GREET").is_some());
/// ```
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<(String, Rc<dyn Command>)>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `command` under `name`.
    ///
    /// Never fails. A name that is empty after normalization cannot be shown
    /// in a menu, so it is logged and ignored.
    pub fn register(&mut self, name: &str, command: Rc<dyn Command>) {
        let name = normalize_name(name);
        if name.is_empty() {
            warn!("Ignoring command registration with an empty name");
            return;
        }

        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            debug!(command = %name, "Replacing previously registered command");
            slot.1 = command;
            return;
        }

        info!(command = %name, position = self.entries.len() + 1, "Registered command");
        self.entries.push((name, command));
    }

    /// Look up a command by name.
    pub fn resolve(&self, name: &str) -> Option<Rc<dyn Command>> {
        let name = normalize_name(name);
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, command)| Rc::clone(command))
    }

    /// Name at 0-based `index` in insertion order.
    pub fn resolve_by_position(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(name, _)| name.as_str())
    }

    /// Snapshot of registered names, in menu order.
    pub fn list(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Resolve `name` and run it.
    ///
    /// An unknown name is reported on the console and the loop continues.
    pub fn execute(&self, name: &str, console: &mut dyn Console) -> LoopControl {
        match self.resolve(name) {
            Some(command) => {
                info!(command = %normalize_name(name), "Executing command");
                command.execute(console)
            }
            None => {
                warn!(command = %name, "Command not found");
                console.print_line(&format!("No such command: {}", name));
                LoopControl::Continue
            }
        }
    }

    /// Whether a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
