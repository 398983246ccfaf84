//! Interactive arithmetic commands run from the calculator menu.

use tracing::{info, warn};

use crate::commands::{Command, LoopControl};
use crate::console::Console;
use crate::error::CalcError;

use super::history::SharedHistory;
use super::operations::{format_number, parse_operand, Operation};

pub const FIRST_OPERAND_PROMPT: &str = "Enter first number: ";
pub const SECOND_OPERAND_PROMPT: &str = "Enter second number: ";
pub const INVALID_OPERANDS_MESSAGE: &str = "Invalid input. Please enter numeric values.";
pub const DIVISION_BY_ZERO_MESSAGE: &str = "Error: Division by zero.";

/// Reads two operands, applies one operation and prints the outcome.
///
/// Exactly one line is printed per run: the result, the division-by-zero
/// message, or the invalid-input message. It never prompts again after an
/// error.
pub struct OperationCommand {
    op: Operation,
    history: SharedHistory,
}

impl OperationCommand {
    pub fn new(op: Operation, history: SharedHistory) -> Self {
        Self { op, history }
    }

    pub fn operation(&self) -> Operation {
        self.op
    }

    fn read_operand(console: &mut dyn Console, prompt: &str) -> Option<f64> {
        match console.read_line(prompt) {
            Ok(Some(line)) => parse_operand(&line).ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read operand");
                None
            }
        }
    }
}

impl Command for OperationCommand {
    fn execute(&self, console: &mut dyn Console) -> LoopControl {
        info!(operation = %self.op, "Executing operation");

        let operands = Self::read_operand(console, FIRST_OPERAND_PROMPT)
            .and_then(|a| Self::read_operand(console, SECOND_OPERAND_PROMPT).map(|b| (a, b)));
        let Some((a, b)) = operands else {
            warn!(operation = %self.op, "Invalid operands");
            console.print_line(INVALID_OPERANDS_MESSAGE);
            return LoopControl::Continue;
        };

        match self.op.apply(a, b) {
            Ok(result) => {
                info!(operation = %self.op, result, "Operation result");
                self.history.borrow_mut().record(a, self.op, b, result);
                console.print_line(&format!("The result is {}", format_number(result)));
            }
            Err(CalcError::DivisionByZero) => {
                console.print_line(DIVISION_BY_ZERO_MESSAGE);
            }
            Err(e) => {
                console.print_line(&format!("Error: {}", e));
            }
        }

        LoopControl::Continue
    }
}
