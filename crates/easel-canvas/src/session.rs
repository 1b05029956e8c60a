//! Canvas session: the document plus toolbar and viewport state.

use chrono::{DateTime, Utc};
use tracing::debug;

use easel_core::events::{Flow, HandlerRegistry};

use crate::document::Document;
use crate::protocol::{CanvasEvent, CanvasEventKind};
use crate::shape::ShapeKind;
use crate::viewport::{Point, Viewport};

pub type CanvasHandlers = HandlerRegistry<CanvasSession, CanvasEvent>;

/// A drawing session tracks the document and the interaction state around it.
#[derive(Debug, Clone)]
pub struct CanvasSession {
    pub document: Document,
    pub viewport: Viewport,
    /// Tool used by clicks.
    pub selected: Option<ShapeKind>,
    /// Tool currently being dragged from the toolbar, cleared on drop.
    pub dragged: Option<ShapeKind>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new(Document::default(), Some(ShapeKind::Circle))
    }
}

impl CanvasSession {
    pub fn new(document: Document, selected: Option<ShapeKind>) -> Self {
        let now = Utc::now();
        Self {
            document,
            viewport: Viewport::default(),
            selected,
            dragged: None,
            created_at: now,
            last_updated: now,
        }
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Place the selected tool at a screen point. No-op without a selection.
    pub fn click(&mut self, screen: Point) -> Option<String> {
        let kind = self.selected?;
        let at = self.viewport.to_document(screen);
        let id = self.document.place(kind, at);
        self.touch();
        Some(id)
    }

    pub fn drag_start(&mut self, kind: ShapeKind) {
        self.dragged = Some(kind);
    }

    /// Place the dragged tool at a screen point and end the drag.
    pub fn drop_at(&mut self, screen: Point) -> Option<String> {
        let kind = self.dragged.take()?;
        let at = self.viewport.to_document(screen);
        let id = self.document.place(kind, at);
        self.touch();
        Some(id)
    }

    pub fn double_click(&mut self, id: &str) -> bool {
        let removed = self.document.delete(id);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn select(&mut self, kind: Option<ShapeKind>) {
        self.selected = kind;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.title = title.into();
        self.touch();
    }

    /// Swap in a whole new document (import, restore).
    pub fn replace_document(&mut self, document: Document) {
        debug!(
            title = %document.title,
            shapes = document.shapes.len(),
            "Replaced document"
        );
        self.document = document;
        self.touch();
    }

    /// The standard wiring from canvas events to session mutations.
    pub fn default_handlers() -> CanvasHandlers {
        let mut handlers = CanvasHandlers::new();
        handlers.register(CanvasEventKind::Click, |s, e| {
            if let CanvasEvent::Click { at } = e {
                s.click(*at);
            }
            Ok(Flow::Continue)
        });
        handlers.register(CanvasEventKind::DragStart, |s, e| {
            if let CanvasEvent::DragStart { kind } = e {
                s.drag_start(*kind);
            }
            Ok(Flow::Continue)
        });
        handlers.register(CanvasEventKind::Drop, |s, e| {
            if let CanvasEvent::Drop { at } = e {
                s.drop_at(*at);
            }
            Ok(Flow::Continue)
        });
        handlers.register(CanvasEventKind::DoubleClick, |s, e| {
            if let CanvasEvent::DoubleClick { id } = e {
                s.double_click(id);
            }
            Ok(Flow::Continue)
        });
        handlers.register(CanvasEventKind::SelectTool, |s, e| {
            if let CanvasEvent::SelectTool { kind } = e {
                s.select(*kind);
            }
            Ok(Flow::Continue)
        });
        handlers.register(CanvasEventKind::SetTitle, |s, e| {
            if let CanvasEvent::SetTitle { title } = e {
                s.set_title(title.clone());
            }
            Ok(Flow::Continue)
        });
        handlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_session() {
        let mut session = CanvasSession::default();
        assert!(session.document.is_empty());
        assert_eq!(session.selected, Some(ShapeKind::Circle));

        let id = session.click(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(session.document.len(), 1);

        session.select(Some(ShapeKind::Square));
        session.click(Point::new(20.0, 20.0));
        assert_eq!(session.document.counts().square, 1);

        assert!(session.double_click(&id));
        assert_eq!(session.document.len(), 1);
    }

    #[test]
    fn test_click_without_tool_is_noop() {
        let mut session = CanvasSession::new(Document::default(), None);
        assert!(session.click(Point::new(1.0, 1.0)).is_none());
        assert!(session.document.is_empty());
    }

    #[test]
    fn test_drop_uses_and_clears_dragged() {
        let mut session = CanvasSession::default();
        assert!(session.drop_at(Point::new(0.0, 0.0)).is_none());

        session.drag_start(ShapeKind::Triangle);
        session.drop_at(Point::new(5.0, 6.0)).unwrap();
        assert_eq!(session.document.shapes[0].kind, ShapeKind::Triangle);
        assert!(session.dragged.is_none());

        assert!(session.drop_at(Point::new(5.0, 6.0)).is_none());
        assert_eq!(session.document.len(), 1);
    }

    #[test]
    fn test_placement_uses_viewport() {
        let mut session = CanvasSession::default();
        session.viewport.pan(100.0, 100.0);
        session.viewport.set_zoom(2.0);
        session.click(Point::new(120.0, 80.0));
        let shape = &session.document.shapes[0];
        assert_eq!((shape.x, shape.y), (10.0, -10.0));
    }

    #[test]
    fn test_default_handlers_route_events() {
        let handlers = CanvasSession::default_handlers();
        let mut session = CanvasSession::default();

        handlers.dispatch(&mut session, &CanvasEvent::SetTitle { title: "Sky".into() });
        handlers.dispatch(
            &mut session,
            &CanvasEvent::SelectTool {
                kind: Some(ShapeKind::Square),
            },
        );
        handlers.dispatch(&mut session, &CanvasEvent::Click { at: Point::new(1.0, 2.0) });
        handlers.dispatch(
            &mut session,
            &CanvasEvent::DragStart {
                kind: ShapeKind::Circle,
            },
        );
        handlers.dispatch(&mut session, &CanvasEvent::Drop { at: Point::new(3.0, 4.0) });

        assert_eq!(session.document.title, "Sky");
        assert_eq!(session.document.counts().square, 1);
        assert_eq!(session.document.counts().circle, 1);

        let id = session.document.shapes[0].id.clone();
        handlers.dispatch(&mut session, &CanvasEvent::DoubleClick { id: id.clone() });
        assert!(session.document.get(&id).is_none());
        assert_eq!(session.document.len(), 1);
    }

    #[test]
    fn test_bad_zoom_keeps_export_importable() {
        let mut session = CanvasSession::default();
        session.viewport.set_zoom(f64::NAN);
        session.click(Point::new(10.0, 10.0));

        let text = crate::file::encode(&session.document);
        let back = crate::file::decode(&text).unwrap();
        assert_eq!(back, session.document);
    }

    #[test]
    fn test_replace_document_is_wholesale() {
        let mut session = CanvasSession::default();
        session.click(Point::new(1.0, 1.0));
        session.replace_document(Document::new("Fresh"));
        assert_eq!(session.document.title, "Fresh");
        assert!(session.document.is_empty());
    }
}
