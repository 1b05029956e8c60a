//! Formulas over input fields.
//!
//! A formula such as `price * (1 + tax)` names input fields by identifier.
//! Whenever one of those fields changes, every referenced value is
//! substituted (parenthesized) into the expression and the result is
//! evaluated by a small arithmetic parser. Nothing but numbers and
//! `+ - * / % **` with parentheses is ever evaluated.

pub mod binding;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod sheet;

pub use binding::{FormulaBinding, FormulaOutcome};
pub use error::{FormulaError, FormulaResult};
pub use eval::{evaluate_str, format_number};
pub use sheet::{FieldInput, FormulaSheet};
