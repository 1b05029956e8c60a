//! Canvas input events.

use serde::{Deserialize, Serialize};

use easel_core::events::Event;

use crate::shape::ShapeKind;
use crate::viewport::Point;

/// UI interactions the canvas reacts to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// Pointer click on the canvas, in screen coordinates.
    Click { at: Point },
    /// A toolbar tool started being dragged.
    DragStart { kind: ShapeKind },
    /// A dragged tool was dropped on the canvas, in screen coordinates.
    Drop { at: Point },
    /// Double click on a rendered shape.
    DoubleClick { id: String },
    /// Toolbar selection changed.
    SelectTool { kind: Option<ShapeKind> },
    /// Title field edited.
    SetTitle { title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasEventKind {
    Click,
    DragStart,
    Drop,
    DoubleClick,
    SelectTool,
    SetTitle,
}

impl Event for CanvasEvent {
    type Kind = CanvasEventKind;

    fn kind(&self) -> CanvasEventKind {
        match self {
            CanvasEvent::Click { .. } => CanvasEventKind::Click,
            CanvasEvent::DragStart { .. } => CanvasEventKind::DragStart,
            CanvasEvent::Drop { .. } => CanvasEventKind::Drop,
            CanvasEvent::DoubleClick { .. } => CanvasEventKind::DoubleClick,
            CanvasEvent::SelectTool { .. } => CanvasEventKind::SelectTool,
            CanvasEvent::SetTitle { .. } => CanvasEventKind::SetTitle,
        }
    }
}
