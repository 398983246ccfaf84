//! The calculator plugin: a nested menu over the arithmetic operations.
//!
//! `CalculatorCommand` owns a private registry filled by the same discovery
//! process as the top-level menu, scoped to the operation catalog. Running it
//! starts a nested dispatch loop whose last entry returns to the caller.

mod history;
mod leaf;
pub mod operations;

pub use history::{
    ClearHistoryCommand, History, HistoryEntry, SharedHistory, ShowHistoryCommand,
    EMPTY_HISTORY_MESSAGE, HISTORY_CLEARED_MESSAGE,
};
pub use leaf::{
    OperationCommand, DIVISION_BY_ZERO_MESSAGE, FIRST_OPERAND_PROMPT, INVALID_OPERANDS_MESSAGE,
    SECOND_OPERAND_PROMPT,
};
pub use operations::Operation;

use std::rc::Rc;

use tracing::info;

use crate::commands::{Command, CommandRegistry, LoopControl};
use crate::console::Console;
use crate::dispatch::{DispatchLoop, LoopOutcome, MenuOptions};
use crate::plugins::{operation_plugins, CandidateSource, Discoverer, DiscoveryReport};

pub const CALCULATOR_TITLE: &str = "Select an operation:";
pub const RETURN_LABEL: &str = "Back to main menu";

/// Nested dispatcher over the arithmetic operations.
pub struct CalculatorCommand {
    registry: CommandRegistry,
    history: SharedHistory,
    report: DiscoveryReport,
}

impl CalculatorCommand {
    /// Discover the built-in operations.
    pub fn new(history: SharedHistory) -> Self {
        let source = operation_plugins(Rc::clone(&history));
        Self::with_source(&source, &Discoverer::default(), history)
    }

    /// Discover operations from `source`.
    pub fn with_source(
        source: &dyn CandidateSource,
        discoverer: &Discoverer,
        history: SharedHistory,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        let report = discoverer.discover(source, &mut registry);
        info!(
            operations = registry.len(),
            failed = report.failure_count(),
            "Calculator operations loaded"
        );
        Self {
            registry,
            history,
            report,
        }
    }

    /// Operation names, in menu order.
    pub fn operation_names(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Menu number of the reserved return entry.
    pub fn return_choice(&self) -> usize {
        self.registry.len() + 1
    }

    pub fn report(&self) -> &DiscoveryReport {
        &self.report
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }
}

impl Command for CalculatorCommand {
    fn execute(&self, console: &mut dyn Console) -> LoopControl {
        info!("Entering calculator menu");

        let outcome = DispatchLoop::new(
            &self.registry,
            MenuOptions::nested(CALCULATOR_TITLE, RETURN_LABEL),
        )
        .with_keyword(
            "history",
            Rc::new(ShowHistoryCommand::new(Rc::clone(&self.history))),
        )
        .with_keyword(
            "clear",
            Rc::new(ClearHistoryCommand::new(Rc::clone(&self.history))),
        )
        .run(console);

        match outcome {
            LoopOutcome::Exited(message) => LoopControl::Terminate(message),
            LoopOutcome::Returned | LoopOutcome::InputClosed => {
                info!("Leaving calculator menu");
                LoopControl::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::dispatch::INVALID_CHOICE_MESSAGE;
    use crate::error::CalcError;
    use crate::plugins::{Candidate, Export, PluginCatalog};

    #[test]
    fn test_discovers_four_operations_in_order() {
        let calculator = CalculatorCommand::new(History::shared());
        assert_eq!(
            calculator.operation_names(),
            vec!["add", "subtract", "multiply", "divide"]
        );
        assert_eq!(calculator.return_choice(), 5);
        assert!(calculator.report().failures.is_empty());
    }

    #[test]
    fn test_return_choice_goes_back_without_running_a_leaf() {
        let calculator = CalculatorCommand::new(History::shared());
        let mut console = ScriptedConsole::new(["5", "1"]);

        let control = calculator.execute(&mut console);

        assert_eq!(control, LoopControl::Continue);
        assert!(console.printed("5. Back to main menu"));
        assert!(!console.prompts().iter().any(|p| p == FIRST_OPERAND_PROMPT));
        assert_eq!(console.remaining_inputs(), 1);
    }

    #[test]
    fn test_leaf_runs_once_then_menu_reappears() {
        let history = History::shared();
        let calculator = CalculatorCommand::new(Rc::clone(&history));
        let mut console = ScriptedConsole::new(["1", "5", "3", "4", "20", "4", "5"]);

        calculator.execute(&mut console);

        assert!(console.printed("The result is 8"));
        assert!(console.printed("The result is 5"));
        assert_eq!(console.count_printed(CALCULATOR_TITLE), 3);
        assert_eq!(history.borrow().len(), 2);
    }

    #[test]
    fn test_divide_by_zero_keeps_menu_running() {
        let calculator = CalculatorCommand::new(History::shared());
        let mut console = ScriptedConsole::new(["4", "9", "0", "5"]);

        let control = calculator.execute(&mut console);

        assert_eq!(control, LoopControl::Continue);
        assert!(console.printed(DIVISION_BY_ZERO_MESSAGE));
    }

    #[test]
    fn test_invalid_selection_in_nested_menu() {
        let calculator = CalculatorCommand::new(History::shared());
        let mut console = ScriptedConsole::new(["0", "6", "5"]);

        calculator.execute(&mut console);

        assert_eq!(console.count_printed(INVALID_CHOICE_MESSAGE), 2);
    }

    #[test]
    fn test_exit_token_terminates_whole_session() {
        let calculator = CalculatorCommand::new(History::shared());
        let mut console = ScriptedConsole::new(["quit"]);

        let control = calculator.execute(&mut console);

        assert_eq!(control, LoopControl::Terminate("Goodbye!".to_string()));
        assert!(!console.printed("Goodbye!"));
    }

    #[test]
    fn test_history_keywords() {
        let calculator = CalculatorCommand::new(History::shared());
        let mut console =
            ScriptedConsole::new(["history", "3", "4", "5", "History", "clear", "history", "5"]);

        calculator.execute(&mut console);

        assert_eq!(console.count_printed(EMPTY_HISTORY_MESSAGE), 2);
        assert!(console.printed("Calculation History:"));
        assert!(console.output().iter().any(|l| l.ends_with("4 * 5 = 20")));
        assert!(console.printed(HISTORY_CLEARED_MESSAGE));
    }

    #[test]
    fn test_broken_operation_does_not_block_the_others() {
        let history = History::shared();
        let good = operation_plugins(Rc::clone(&history));
        let mut source = PluginCatalog::new("partial operations");
        for candidate in good.candidates().unwrap() {
            if candidate.name == "multiply" {
                source = source.with_candidate(Candidate::module("multiply", || {
                    Err(CalcError::Plugin("multiply module missing".into()))
                }));
            } else {
                source = source.with_candidate(candidate);
            }
        }

        let calculator = CalculatorCommand::with_source(&source, &Discoverer::default(), history);

        assert_eq!(calculator.operation_names(), vec!["add", "subtract", "divide"]);
        assert_eq!(calculator.return_choice(), 4);
        assert_eq!(calculator.report().failure_count(), 1);

        let mut console = ScriptedConsole::new(["3", "9", "3", "4"]);
        calculator.execute(&mut console);
        assert!(console.printed("The result is 3"));
        assert!(console.printed("4. Back to main menu"));
    }

    #[test]
    fn test_namespace_in_operation_source_is_skipped() {
        let history = History::shared();
        let op_history = Rc::clone(&history);
        let source = PluginCatalog::new("ops")
            .with_candidate(Candidate::namespace("advanced"))
            .with_candidate(Candidate::with_exports(
                "add",
                vec![Export::command("AddCommand", move || {
                    let command: Rc<dyn Command> =
                        Rc::new(OperationCommand::new(Operation::Add, Rc::clone(&op_history)));
                    Ok(command)
                })],
            ));

        let calculator = CalculatorCommand::with_source(&source, &Discoverer::default(), history);

        assert_eq!(calculator.operation_names(), vec!["add"]);
        assert_eq!(calculator.report().skipped, vec!["advanced"]);
        assert!(calculator.report().failures.is_empty());
    }
}
