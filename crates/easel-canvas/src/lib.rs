//! Shape canvas: the document model behind the drawing page.
//!
//! A [`Document`] is a title plus an ordered list of placed shapes. The
//! [`CanvasSession`] wraps it with the toolbar state and viewport, and turns
//! UI events into document mutations. Documents round-trip through a JSON
//! file format ([`file`]) and render to SVG ([`render`]).

pub mod document;
pub mod error;
pub mod file;
pub mod protocol;
pub mod render;
pub mod session;
pub mod shape;
pub mod viewport;

pub use document::Document;
pub use error::ImportError;
pub use protocol::{CanvasEvent, CanvasEventKind};
pub use session::CanvasSession;
pub use shape::{Shape, ShapeCounts, ShapeKind};
pub use viewport::{Point, Viewport};
