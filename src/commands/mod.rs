//! Commands and the command registry.
//!
//! A [`Command`] is the unit of work the dispatch loop invokes. Commands act
//! only through side effects on the console and report how the enclosing loop
//! should proceed with a [`LoopControl`] value instead of unwinding.
//!
//! # Architecture
//!
//! - **registry**: ordered name → command mapping used for lookup and menus
//! - **builtin**: the compiled-in top-level commands (greet, discord, exit)

pub mod builtin;
pub mod registry;

pub use builtin::{builtin_command, ExitCommand, MessageCommand};
pub use registry::{normalize_name, CommandRegistry};

use crate::console::Console;

/// What the enclosing dispatch loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopControl {
    /// Show the menu again.
    Continue,
    /// Leave a nested menu and hand control back to its caller.
    /// Top-level loops treat this like `Continue`.
    Return,
    /// Stop every loop and end the session, printing the message once.
    Terminate(String),
}

/// A unit of work that can be registered and dispatched by name.
pub trait Command {
    /// Run the command against `console`.
    fn execute(&self, console: &mut dyn Console) -> LoopControl;
}
