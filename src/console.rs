//! Console collaborator for the dispatch loop and interactive commands.
//!
//! Every prompt is a suspension point: `read_line` blocks until one line of
//! input arrives or the input stream ends.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-oriented console used by menus and commands.
pub trait Console {
    /// Show `prompt` and read one line of input, without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print one line of output.
    fn print_line(&mut self, line: &str);
}

/// Console backed by the process's stdin and stdout.
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        print!("{}", prompt);
        self.stdout.flush()?;

        let mut input = String::new();
        match self.stdin.lock().read_line(&mut input)? {
            0 => Ok(None),
            _ => Ok(Some(input.trim_end_matches(['\r', '\n']).to_string())),
        }
    }

    fn print_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Console that replays scripted input lines and records everything printed.
///
/// Used by tests and benchmarks to drive menus without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    /// Create a console that will answer prompts with `inputs`, in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Lines printed so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Prompts shown so far, one per `read_line` call.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Number of scripted inputs not yet consumed.
    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Whether any printed line equals `line` exactly.
    pub fn printed(&self, line: &str) -> bool {
        self.output.iter().any(|l| l == line)
    }

    /// How many printed lines equal `line` exactly.
    pub fn count_printed(&self, line: &str) -> usize {
        self.output.iter().filter(|l| *l == line).count()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn print_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
