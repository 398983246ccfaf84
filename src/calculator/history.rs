//! Calculation history shared by the calculator's operations.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Local};
use tracing::info;

use crate::commands::{Command, LoopControl};
use crate::console::Console;

use super::operations::{format_number, Operation};

/// History handle shared between the calculator and its operation commands.
pub type SharedHistory = Rc<RefCell<History>>;

pub const EMPTY_HISTORY_MESSAGE: &str = "No calculations yet.";
pub const HISTORY_CLEARED_MESSAGE: &str = "History has been erased.";

/// One completed calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub recorded_at: DateTime<Local>,
}

/// Completed calculations, oldest first.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedHistory {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Record `a <op> b = result`.
    pub fn record(&mut self, a: f64, op: Operation, b: f64, result: f64) {
        self.entries.push(HistoryEntry {
            expression: format!(
                "{} {} {} = {}",
                format_number(a),
                op.symbol(),
                format_number(b),
                format_number(result)
            ),
            recorded_at: Local::now(),
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Lines shown by the `history` keyword.
    pub fn render(&self) -> Vec<String> {
        if self.entries.is_empty() {
            return vec![EMPTY_HISTORY_MESSAGE.to_string()];
        }
        let mut lines = vec!["Calculation History:".to_string()];
        lines.extend(self.entries.iter().map(|e| {
            format!("[{}] {}", e.recorded_at.format("%H:%M:%S"), e.expression)
        }));
        lines
    }
}

/// Prints the calculation history.
pub struct ShowHistoryCommand {
    history: SharedHistory,
}

impl ShowHistoryCommand {
    pub fn new(history: SharedHistory) -> Self {
        Self { history }
    }
}

impl Command for ShowHistoryCommand {
    fn execute(&self, console: &mut dyn Console) -> LoopControl {
        for line in self.history.borrow().render() {
            console.print_line(&line);
        }
        LoopControl::Continue
    }
}

/// Erases the calculation history.
pub struct ClearHistoryCommand {
    history: SharedHistory,
}

impl ClearHistoryCommand {
    pub fn new(history: SharedHistory) -> Self {
        Self { history }
    }
}

impl Command for ClearHistoryCommand {
    fn execute(&self, console: &mut dyn Console) -> LoopControl {
        let cleared = {
            let mut history = self.history.borrow_mut();
            let count = history.len();
            history.clear();
            count
        };
        info!(entries = cleared, "Cleared calculation history");
        console.print_line(HISTORY_CLEARED_MESSAGE);
        LoopControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;

    #[test]
    fn test_record_formats_expression() {
        let mut history = History::new();
        history.record(5.0, Operation::Add, 3.0, 8.0);
        history.record(1.0, Operation::Divide, 4.0, 0.25);

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].expression, "5 + 3 = 8");
        assert_eq!(history.entries()[1].expression, "1 / 4 = 0.25");
    }

    #[test]
    fn test_render_empty_and_populated() {
        let mut history = History::new();
        assert_eq!(history.render(), vec!["No calculations yet."]);

        history.record(4.0, Operation::Multiply, 5.0, 20.0);
        let lines = history.render();
        assert_eq!(lines[0], "Calculation History:");
        assert!(lines[1].ends_with("] 4 * 5 = 20"));
    }

    #[test]
    fn test_show_and_clear_commands() {
        let history = History::shared();
        history.borrow_mut().record(10.0, Operation::Subtract, 4.0, 6.0);

        let mut console = ScriptedConsole::new(Vec::<String>::new());
        ShowHistoryCommand::new(Rc::clone(&history)).execute(&mut console);
        assert!(console.output().iter().any(|l| l.ends_with("10 - 4 = 6")));

        let control = ClearHistoryCommand::new(Rc::clone(&history)).execute(&mut console);
        assert_eq!(control, LoopControl::Continue);
        assert!(console.printed("History has been erased."));
        assert!(history.borrow().is_empty());
    }
}
