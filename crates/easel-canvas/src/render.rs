//! SVG rendering, one function per shape variant.

use std::fmt::Write;

use crate::document::Document;
use crate::shape::{Shape, ShapeKind};

const FILL: &str = "rgba(59, 130, 246, 0.7)";
const STROKE: &str = "rgba(37, 99, 235, 1)";
const STROKE_WIDTH: u32 = 2;

const CIRCLE_RADIUS: f64 = 20.0;
const SQUARE_HALF: f64 = 20.0;
const SQUARE_CORNER: f64 = 3.0;
const TRIANGLE_HALF_BASE: f64 = 20.0;
const TRIANGLE_APEX: f64 = 23.0;
const TRIANGLE_BASE: f64 = 17.0;

/// Render one shape as an SVG element.
pub fn render_shape(shape: &Shape) -> String {
    match shape.kind {
        ShapeKind::Circle => circle(shape),
        ShapeKind::Square => square(shape),
        ShapeKind::Triangle => triangle(shape),
    }
}

fn paint(id: &str) -> String {
    format!(r#"data-id="{}" fill="{FILL}" stroke="{STROKE}" stroke-width="{STROKE_WIDTH}""#, escape(id))
}

fn circle(s: &Shape) -> String {
    format!(
        r#"<circle cx="{}" cy="{}" r="{CIRCLE_RADIUS}" {}/>"#,
        s.x,
        s.y,
        paint(&s.id)
    )
}

fn square(s: &Shape) -> String {
    let side = SQUARE_HALF * 2.0;
    format!(
        r#"<rect x="{}" y="{}" width="{side}" height="{side}" rx="{SQUARE_CORNER}" {}/>"#,
        s.x - SQUARE_HALF,
        s.y - SQUARE_HALF,
        paint(&s.id)
    )
}

fn triangle(s: &Shape) -> String {
    format!(
        r#"<polygon points="{},{} {},{} {},{}" {}/>"#,
        s.x,
        s.y - TRIANGLE_APEX,
        s.x - TRIANGLE_HALF_BASE,
        s.y + TRIANGLE_BASE,
        s.x + TRIANGLE_HALF_BASE,
        s.y + TRIANGLE_BASE,
        paint(&s.id)
    )
}

/// Render the whole document. An empty document shows a "Canvas" placeholder.
pub fn render_document(doc: &Document) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%"><title>{}</title>"#,
        escape(&doc.title)
    );
    out.push_str(r#"<rect width="100%" height="100%" fill="transparent"/>"#);
    out.push('\n');
    if doc.is_empty() {
        out.push_str(
            r##"<text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" fill="#d1d5db" font-size="24">Canvas</text>"##,
        );
        out.push('\n');
    }
    for shape in &doc.shapes {
        out.push_str(&render_shape(shape));
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
