//! A page of input fields and the formulas that watch them.

use std::collections::HashMap;
use std::rc::Rc;

use easel_core::events::{Event, Flow, HandlerRegistry};

use crate::binding::{FormulaBinding, FormulaOutcome};

/// An input field's value changed.
#[derive(Debug, Clone)]
pub struct FieldInput {
    pub field: String,
}

impl Event for FieldInput {
    type Kind = String;

    fn kind(&self) -> String {
        self.field.clone()
    }
}

/// Field values and the latest outcome of each formula.
#[derive(Debug, Default)]
pub struct SheetState {
    pub fields: HashMap<String, String>,
    pub outcomes: Vec<FormulaOutcome>,
}

#[derive(Default)]
pub struct FormulaSheet {
    state: SheetState,
    bindings: Vec<Rc<FormulaBinding>>,
    handlers: HandlerRegistry<SheetState, FieldInput>,
}

impl FormulaSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an input field with an initial value.
    pub fn add_field(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.state.fields.insert(id.into(), value.into());
    }

    /// Attach a formula, evaluate it once, and re-evaluate it whenever a
    /// field it references changes. Returns the formula's index.
    pub fn add_formula(&mut self, expression: impl Into<String>) -> usize {
        let binding = Rc::new(FormulaBinding::new(expression));
        let index = self.bindings.len();

        for field in binding.inputs() {
            let binding = Rc::clone(&binding);
            self.handlers.register(field.clone(), move |state: &mut SheetState, _| {
                state.outcomes[index] = binding.evaluate(&state.fields);
                Ok(Flow::Continue)
            });
        }

        self.state.outcomes.push(binding.evaluate(&self.state.fields));
        self.bindings.push(binding);
        index
    }

    /// Change a field and re-evaluate the formulas that reference it.
    /// Returns how many formulas were re-evaluated.
    pub fn input(&mut self, field: &str, value: impl Into<String>) -> usize {
        self.state.fields.insert(field.to_string(), value.into());
        self.handlers.dispatch(
            &mut self.state,
            &FieldInput {
                field: field.to_string(),
            },
        )
    }

    pub fn outcome(&self, index: usize) -> Option<&FormulaOutcome> {
        self.state.outcomes.get(index)
    }

    pub fn formulas(&self) -> impl Iterator<Item = (&FormulaBinding, &FormulaOutcome)> {
        self.bindings
            .iter()
            .map(|b| &**b)
            .zip(self.state.outcomes.iter())
    }

    pub fn field(&self, id: &str) -> Option<&str> {
        self.state.fields.get(id).map(String::as_str)
    }
}
