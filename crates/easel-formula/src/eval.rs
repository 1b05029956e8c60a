//! Expression evaluation and result formatting.

use crate::error::FormulaResult;
use crate::parser::{BinaryOp, Expr, UnaryOp, parse};

/// Evaluate a parsed expression with IEEE semantics: division by zero gives
/// an infinity (or NaN), never an error.
pub fn evaluate(expr: &Expr) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Unary { op, operand } => {
            let v = evaluate(operand);
            match op {
                UnaryOp::Plus => v,
                UnaryOp::Neg => -v,
            }
        }
        Expr::Binary { op, lhs, rhs } => {
            let a = evaluate(lhs);
            let b = evaluate(rhs);
            match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => a / b,
                BinaryOp::Rem => a % b,
                BinaryOp::Pow => a.powf(b),
            }
        }
    }
}

/// Parse and evaluate in one step.
pub fn evaluate_str(source: &str) -> FormulaResult<f64> {
    parse(source).map(|expr| evaluate(&expr))
}

/// Format a number the way a browser prints it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}
