//! Shape types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three primitives the toolbar offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(ShapeKind::Circle),
            "square" => Ok(ShapeKind::Square),
            "triangle" => Ok(ShapeKind::Triangle),
            other => Err(format!("unknown shape type: {other}")),
        }
    }
}

/// A placed shape. Coordinates are in document space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
}

impl Shape {
    /// Create a shape with a fresh random id.
    pub fn new(kind: ShapeKind, x: f64, y: f64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            x,
            y,
        }
    }
}

/// Number of shapes of each kind in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShapeCounts {
    pub circle: usize,
    pub square: usize,
    pub triangle: usize,
}

impl ShapeCounts {
    pub fn tally<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Self {
        let mut counts = Self::default();
        for shape in shapes {
            match shape.kind {
                ShapeKind::Circle => counts.circle += 1,
                ShapeKind::Square => counts.square += 1,
                ShapeKind::Triangle => counts.triangle += 1,
            }
        }
        counts
    }

    pub fn get(&self, kind: ShapeKind) -> usize {
        match kind {
            ShapeKind::Circle => self.circle,
            ShapeKind::Square => self.square,
            ShapeKind::Triangle => self.triangle,
        }
    }

    pub fn total(&self) -> usize {
        self.circle + self.square + self.triangle
    }
}
