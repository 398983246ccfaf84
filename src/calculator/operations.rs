//! Arithmetic leaves: the four binary operations and their variadic folds.

use std::fmt;
use std::str::FromStr;

use crate::error::{CalcError, Result};

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

pub fn divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / b)
}

/// Parse one operand. Only finite numbers are accepted.
pub fn parse_operand(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidNumber(trimmed.to_string())),
    }
}

/// Format a result the way the menus print it: `8`, `2.5`, `-0.25`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// One of the four arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Menu order.
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Exported symbol of the operation's command type.
    pub fn symbol_name(&self) -> &'static str {
        match self {
            Operation::Add => "AddCommand",
            Operation::Subtract => "SubtractCommand",
            Operation::Multiply => "MultiplyCommand",
            Operation::Divide => "DivideCommand",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    pub fn apply(&self, a: f64, b: f64) -> Result<f64> {
        match self {
            Operation::Add => Ok(add(a, b)),
            Operation::Subtract => Ok(subtract(a, b)),
            Operation::Multiply => Ok(multiply(a, b)),
            Operation::Divide => divide(a, b),
        }
    }

    /// Apply the operation across any number of operands.
    ///
    /// Add sums and multiply takes the product, so both accept an empty list.
    /// Subtract and divide start from the first operand and need at least one.
    pub fn fold(&self, operands: &[f64]) -> Result<f64> {
        match self {
            Operation::Add => Ok(operands.iter().sum()),
            Operation::Multiply => Ok(operands.iter().product()),
            Operation::Subtract | Operation::Divide => {
                let (first, rest) = operands.split_first().ok_or(CalcError::MissingOperands)?;
                rest.iter().try_fold(*first, |acc, &x| self.apply(acc, x))
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" | "addition" | "+" => Ok(Operation::Add),
            "subtract" | "subtraction" | "-" => Ok(Operation::Subtract),
            "multiply" | "multiplication" | "*" | "x" => Ok(Operation::Multiply),
            "divide" | "division" | "/" => Ok(Operation::Divide),
            _ => Err(CalcError::UnsupportedOperation(s.trim().to_string())),
        }
    }
}
