//! Compiled-in top-level commands.

use std::rc::Rc;

use tracing::info;

use crate::console::Console;
use crate::error::{CalcError, Result};

use super::{Command, LoopControl};

/// Line printed by `ExitCommand` when it ends the session.
pub const EXIT_MESSAGE: &str = "Exiting...";

/// A command that prints one fixed line.
#[derive(Debug, Clone)]
pub struct MessageCommand {
    label: String,
    message: String,
}

impl MessageCommand {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }

    pub fn greet() -> Self {
        Self::new("GreetCommand", "Hello, World!")
    }

    pub fn discord() -> Self {
        Self::new("DiscordCommand", "I will send something to Discord.")
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Command for MessageCommand {
    fn execute(&self, console: &mut dyn Console) -> LoopControl {
        info!(command = %self.label, "Executing message command");
        console.print_line(&self.message);
        LoopControl::Continue
    }
}

/// Ends the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitCommand;

impl Command for ExitCommand {
    fn execute(&self, _console: &mut dyn Console) -> LoopControl {
        info!("Executing ExitCommand - application exiting");
        LoopControl::Terminate(EXIT_MESSAGE.to_string())
    }
}

/// Instantiate a compiled-in command by its exported symbol name.
///
/// Used by filesystem plugin manifests that re-export a builtin.
pub fn builtin_command(symbol: &str) -> Result<Rc<dyn Command>> {
    match symbol {
        "ExitCommand" => Ok(Rc::new(ExitCommand)),
        "GreetCommand" => Ok(Rc::new(MessageCommand::greet())),
        "DiscordCommand" => Ok(Rc::new(MessageCommand::discord())),
        other => Err(CalcError::NotFound(format!(
            "No builtin command named '{}'",
            other
        ))),
    }
}
