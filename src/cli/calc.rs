//! One-shot calculation mode.

use anyhow::Result;

use replcalc::calculator::operations::{format_number, parse_operand};
use replcalc::calculator::Operation;
use replcalc::CalcError;

/// Evaluate `operation` over `operands` and print the outcome.
///
/// Every failure is printed as a message; the process still exits with 0.
pub(crate) fn cmd_calc(operation: &str, operands: &[String]) -> Result<()> {
    println!("{}", evaluate(operation, operands));
    Ok(())
}

/// The single line `cmd_calc` prints.
fn evaluate(operation: &str, operands: &[String]) -> String {
    let op: Operation = match operation.parse() {
        Ok(op) => op,
        Err(_) => return format!("Error: Unsupported operation '{}'", operation.trim()),
    };

    let numbers: Result<Vec<f64>, CalcError> = operands.iter().map(|s| parse_operand(s)).collect();
    let numbers = match numbers {
        Ok(numbers) => numbers,
        Err(_) => return format!("Error: Please provide valid numbers for {}.", op.name()),
    };

    match op.fold(&numbers) {
        Ok(result) => format!("Result: {}", format_number(result)),
        Err(CalcError::DivisionByZero) => "Error: Division by zero is not allowed.".to_string(),
        Err(e) => format!("Error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_evaluate_each_operation() {
        assert_eq!(evaluate("add", &args(&["5", "3"])), "Result: 8");
        assert_eq!(evaluate("subtract", &args(&["10", "4"])), "Result: 6");
        assert_eq!(evaluate("multiply", &args(&["4", "5"])), "Result: 20");
        assert_eq!(evaluate("divide", &args(&["20", "4"])), "Result: 5");
    }

    #[test]
    fn test_evaluate_variadic() {
        assert_eq!(evaluate("add", &args(&["1", "2", "3", "4"])), "Result: 10");
        assert_eq!(evaluate("subtract", &args(&["10", "1", "-2"])), "Result: 11");
        assert_eq!(evaluate("divide", &args(&["9", "2"])), "Result: 4.5");
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(
            evaluate("divide", &args(&["1", "0"])),
            "Error: Division by zero is not allowed."
        );
    }

    #[test]
    fn test_evaluate_invalid_operand() {
        assert_eq!(
            evaluate("multiply", &args(&["2", "two"])),
            "Error: Please provide valid numbers for multiply."
        );
    }

    #[test]
    fn test_evaluate_unsupported_operation() {
        assert_eq!(
            evaluate("modulo", &args(&["5", "3"])),
            "Error: Unsupported operation 'modulo'"
        );
    }

    #[test]
    fn test_evaluate_missing_operands() {
        assert_eq!(evaluate("add", &[]), "Result: 0");
        assert_eq!(
            evaluate("divide", &[]),
            "Error: At least one operand is required"
        );
    }
}
