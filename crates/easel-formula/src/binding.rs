//! A formula bound to the input fields it names.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::FormulaError;
use crate::eval::{evaluate_str, format_number};

/// Field references: a letter followed by letters, digits or underscores.
static IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_]*").expect("static regex"));

/// Identifier matches that start a word. The `e3` in `2e3` or `1.5e3` is
/// part of a number literal.
fn field_refs(expression: &str) -> impl Iterator<Item = regex::Match<'_>> {
    IDENT.find_iter(expression).filter(move |m| {
        !expression[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    })
}

/// What a formula currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaOutcome {
    /// At least one referenced field is empty.
    MissingInputs,
    /// The substituted expression did not parse.
    Invalid(FormulaError),
    Value(f64),
}

impl fmt::Display for FormulaOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaOutcome::MissingInputs => f.write_str("Please enter all inputs."),
            FormulaOutcome::Invalid(_) => f.write_str("Invalid Formula."),
            FormulaOutcome::Value(v) => write!(f, "Result: {}.", format_number(*v)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormulaBinding {
    expression: String,
    inputs: Vec<String>,
}

impl FormulaBinding {
    pub fn new(expression: impl Into<String>) -> Self {
        let expression = expression.into();
        let inputs = identifiers(&expression);
        Self { expression, inputs }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Referenced field ids, in first-appearance order, without repeats.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Replace every field reference with its parenthesized value.
    ///
    /// Returns `None` if any referenced field is missing or blank.
    pub fn substitute(&self, fields: &HashMap<String, String>) -> Option<String> {
        let all_present = self
            .inputs
            .iter()
            .all(|id| fields.get(id).is_some_and(|v| !v.trim().is_empty()));
        if !all_present {
            return None;
        }
        let mut substituted = String::with_capacity(self.expression.len());
        let mut last = 0;
        for m in field_refs(&self.expression) {
            let value = fields.get(m.as_str()).map(String::as_str).unwrap_or_default();
            substituted.push_str(&self.expression[last..m.start()]);
            substituted.push('(');
            substituted.push_str(value);
            substituted.push(')');
            last = m.end();
        }
        substituted.push_str(&self.expression[last..]);
        Some(substituted)
    }

    /// Evaluate against the current field values.
    pub fn evaluate(&self, fields: &HashMap<String, String>) -> FormulaOutcome {
        let Some(substituted) = self.substitute(fields) else {
            return FormulaOutcome::MissingInputs;
        };
        match evaluate_str(&substituted) {
            Ok(value) => FormulaOutcome::Value(value),
            Err(e) => {
                debug!(expression = %self.expression, substituted = %substituted, error = %e, "Formula did not evaluate");
                FormulaOutcome::Invalid(e)
            }
        }
    }
}

/// Distinct identifiers in an expression, in order of first appearance.
pub fn identifiers(expression: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for m in field_refs(expression) {
        if !seen.iter().any(|s: &String| s == m.as_str()) {
            seen.push(m.as_str().to_string());
        }
    }
    seen
}
