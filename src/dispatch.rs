//! Numbered-menu dispatch loop.
//!
//! One loop instance renders a registry as a 1-based menu, reads a selection
//! and runs the chosen command, until the user exits, a command asks to
//! terminate, or input ends. The same loop drives the top-level menu and the
//! calculator's nested menu; a nested loop additionally offers a reserved
//! "return to caller" entry numbered one past the last command.
//!
//! Every failure inside an iteration is reported to the user and the loop
//! keeps running. Only an exit request or the end of input stops it.

use std::io::ErrorKind;
use std::rc::Rc;

use tracing::{debug, error, info, warn};

use crate::commands::{normalize_name, Command, CommandRegistry, LoopControl};
use crate::console::Console;

/// Inputs that end the session, matched case-insensitively.
pub const EXIT_TOKENS: [&str; 2] = ["exit", "quit"];

/// Printed when the user types an exit token.
pub const GOODBYE_MESSAGE: &str = "Goodbye!";

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a valid number.";
pub const NOT_A_NUMBER_MESSAGE: &str = "Invalid input. Please enter a number.";
pub const INVALID_CHOICE_MESSAGE: &str = "Invalid choice.";

/// Lifecycle of a dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Why a dispatch loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// The session is over; carries the final message.
    Exited(String),
    /// The reserved return entry was chosen in a nested menu.
    Returned,
    /// Input ended or could not be read.
    InputClosed,
}

/// One line of menu input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Exit,
    Empty,
    Number(i64),
    /// Anything else, trimmed and lower-cased.
    Word(String),
}

/// Classify one line of menu input.
pub fn parse_selection(input: &str) -> Selection {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Selection::Empty;
    }
    if EXIT_TOKENS.iter().any(|t| trimmed.eq_ignore_ascii_case(t)) {
        return Selection::Exit;
    }
    match trimmed.parse::<i64>() {
        Ok(n) => Selection::Number(n),
        Err(_) if is_integer_literal(trimmed) => {
            // Too large for i64; clamp so it is reported as out of range.
            Selection::Number(if trimmed.starts_with('-') { i64::MIN } else { i64::MAX })
        }
        Err(_) => Selection::Word(normalize_name(trimmed)),
    }
}

fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Render a numbered menu: a blank line, the title, then `N. name` lines.
pub fn render_menu(title: &str, names: &[String], return_label: Option<&str>) -> Vec<String> {
    let mut lines = Vec::with_capacity(names.len() + 3);
    lines.push(String::new());
    lines.push(title.to_string());
    for (i, name) in names.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, name));
    }
    if let Some(label) = return_label {
        lines.push(format!("{}. {}", names.len() + 1, label));
    }
    lines
}

/// Presentation and nesting settings for one loop.
#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub title: String,
    pub prompt: String,
    /// Label of the reserved return entry; only nested menus have one.
    pub return_label: Option<String>,
    /// Nested loops hand termination messages to their caller instead of printing them.
    pub nested: bool,
}

impl MenuOptions {
    /// The process's main menu.
    pub fn top_level() -> Self {
        Self {
            title: "Available Commands:".to_string(),
            prompt: "Select a command by number: ".to_string(),
            return_label: None,
            nested: false,
        }
    }

    /// A menu run from inside a command, with a reserved return entry.
    pub fn nested(title: impl Into<String>, return_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt: "Enter a number: ".to_string(),
            return_label: Some(return_label.into()),
            nested: true,
        }
    }
}

/// A read-select-execute loop over a registry.
pub struct DispatchLoop<'a> {
    registry: &'a CommandRegistry,
    keywords: Vec<(String, Rc<dyn Command>)>,
    options: MenuOptions,
    state: LoopState,
}

impl<'a> DispatchLoop<'a> {
    pub fn new(registry: &'a CommandRegistry, options: MenuOptions) -> Self {
        Self {
            registry,
            keywords: Vec::new(),
            options,
            state: LoopState::Running,
        }
    }

    /// Accept `keyword` as an unnumbered selection that runs `command`.
    pub fn with_keyword(mut self, keyword: &str, command: Rc<dyn Command>) -> Self {
        self.keywords.push((normalize_name(keyword), command));
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of the reserved return entry, if this menu has one.
    pub fn return_choice(&self) -> Option<usize> {
        self.options
            .return_label
            .as_ref()
            .map(|_| self.registry.len() + 1)
    }

    /// Run until the loop stops.
    pub fn run(&mut self, console: &mut dyn Console) -> LoopOutcome {
        loop {
            if let Some(outcome) = self.step(console) {
                return outcome;
            }
        }
    }

    /// Process one menu iteration. Returns `Some` when the loop has stopped.
    pub fn step(&mut self, console: &mut dyn Console) -> Option<LoopOutcome> {
        if self.state == LoopState::Terminated {
            return Some(LoopOutcome::InputClosed);
        }

        let names = self.registry.list();
        for line in render_menu(
            &self.options.title,
            &names,
            self.options.return_label.as_deref(),
        ) {
            console.print_line(&line);
        }

        let input = match console.read_line(&self.options.prompt) {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("End of input");
                return Some(self.stop(LoopOutcome::InputClosed));
            }
            Err(e) if matches!(e.kind(), ErrorKind::InvalidData | ErrorKind::Interrupted) => {
                // The bad line has already been consumed; ask again.
                warn!(error = %e, "Unreadable menu input");
                console.print_line(NOT_A_NUMBER_MESSAGE);
                return None;
            }
            Err(e) => {
                error!(error = %e, "Failed to read menu input");
                console.print_line(&format!("Error reading input: {}", e));
                return Some(self.stop(LoopOutcome::InputClosed));
            }
        };

        match parse_selection(&input) {
            Selection::Exit => {
                info!("Exit requested");
                Some(self.finish(console, GOODBYE_MESSAGE.to_string()))
            }
            Selection::Empty => {
                console.print_line(EMPTY_INPUT_MESSAGE);
                None
            }
            Selection::Word(word) => {
                let keyword = self
                    .keywords
                    .iter()
                    .find(|(k, _)| *k == word)
                    .map(|(_, command)| Rc::clone(command));
                match keyword {
                    Some(command) => {
                        let control = command.execute(console);
                        self.apply(console, control)
                    }
                    None => {
                        console.print_line(NOT_A_NUMBER_MESSAGE);
                        None
                    }
                }
            }
            Selection::Number(n) => {
                if self.return_choice().map(|c| c as i64) == Some(n) {
                    info!("Returning to caller");
                    return Some(self.stop(LoopOutcome::Returned));
                }
                if n < 1 || n as usize > names.len() {
                    console.print_line(INVALID_CHOICE_MESSAGE);
                    return None;
                }
                match self.registry.resolve_by_position((n - 1) as usize) {
                    Some(name) => {
                        let control = self.registry.execute(name, console);
                        self.apply(console, control)
                    }
                    None => {
                        console.print_line(INVALID_CHOICE_MESSAGE);
                        None
                    }
                }
            }
        }
    }

    fn apply(&mut self, console: &mut dyn Console, control: LoopControl) -> Option<LoopOutcome> {
        match control {
            LoopControl::Continue => None,
            LoopControl::Return if self.options.nested => Some(self.stop(LoopOutcome::Returned)),
            LoopControl::Return => None,
            LoopControl::Terminate(message) => Some(self.finish(console, message)),
        }
    }

    fn finish(&mut self, console: &mut dyn Console, message: String) -> LoopOutcome {
        if !self.options.nested {
            console.print_line(&message);
        }
        self.stop(LoopOutcome::Exited(message))
    }

    fn stop(&mut self, outcome: LoopOutcome) -> LoopOutcome {
        self.state = LoopState::Terminated;
        outcome
    }
}
