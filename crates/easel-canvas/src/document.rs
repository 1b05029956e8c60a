//! The drawing document.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shape::{Shape, ShapeCounts, ShapeKind};
use crate::viewport::Point;

pub const DEFAULT_TITLE: &str = "Untitled";

/// Title plus the placed shapes, in insertion order.
///
/// Shape ids are unique within a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub shapes: Vec<Shape>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            shapes: Vec::new(),
        }
    }

    /// Append a new shape at a document-space point and return its id.
    pub fn place(&mut self, kind: ShapeKind, at: Point) -> String {
        let shape = Shape::new(kind, at.x, at.y);
        let id = shape.id.clone();
        debug!(id = %id, kind = %kind, x = at.x, y = at.y, "Placed shape");
        self.shapes.push(shape);
        id
    }

    /// Remove the shape with the given id. Returns false if there was none.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.shapes.iter().position(|s| s.id == id) else {
            return false;
        };
        let removed = self.shapes.remove(index);
        debug!(id = %removed.id, kind = %removed.kind, "Deleted shape");
        true
    }

    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn counts(&self) -> ShapeCounts {
        ShapeCounts::tally(&self.shapes)
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
