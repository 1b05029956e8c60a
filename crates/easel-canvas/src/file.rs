//! Painting file format.
//!
//! A painting file is pretty-printed JSON: `{"title": ..., "shapes": [...]}`.
//! The same validation applies to imported files and to paintings fetched
//! from the remote store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::ImportError;
use crate::shape::Shape;

/// File name used when the title sanitizes to nothing.
pub const FALLBACK_FILE_STEM: &str = "painting";

/// Serialize a document with two-space indentation.
pub fn encode(doc: &Document) -> String {
    // Plain struct with string keys; non-finite floats are written as null.
    serde_json::to_string_pretty(doc).unwrap_or_else(|_| String::from("{}"))
}

/// Download name for a document: whitespace runs become `_`.
pub fn export_file_name(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut in_space = false;
    for ch in title.chars() {
        if ch.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(ch);
            in_space = false;
        }
    }
    if stem.is_empty() {
        stem.push_str(FALLBACK_FILE_STEM);
    }
    format!("{stem}.json")
}

/// Parse painting text. Undecodable text is `Malformed`; decodable text with
/// the wrong structure is `Invalid`.
pub fn decode(text: &str) -> Result<Document, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;
    validate(value)
}

/// Check an already-decoded value and turn it into a document.
///
/// Requires an object with a non-empty string `title` and an array `shapes`
/// whose elements are shapes with unique ids.
pub fn validate(value: Value) -> Result<Document, ImportError> {
    let Value::Object(mut obj) = value else {
        return Err(ImportError::invalid("expected an object"));
    };

    let title = match obj.remove("title") {
        Some(Value::String(t)) if !t.is_empty() => t,
        Some(Value::String(_)) => return Err(ImportError::invalid("title is empty")),
        Some(_) => return Err(ImportError::invalid("title is not a string")),
        None => return Err(ImportError::invalid("missing title")),
    };

    let shapes = match obj.remove("shapes") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(ImportError::invalid("shapes is not an array")),
        None => return Err(ImportError::invalid("missing shapes")),
    };

    let mut seen = HashSet::with_capacity(shapes.len());
    let mut decoded = Vec::with_capacity(shapes.len());
    for (index, item) in shapes.into_iter().enumerate() {
        let shape: Shape = serde_json::from_value(item)
            .map_err(|e| ImportError::invalid(format!("shape {index}: {e}")))?;
        if !seen.insert(shape.id.clone()) {
            return Err(ImportError::invalid(format!(
                "shape {index}: duplicate id {}",
                shape.id
            )));
        }
        decoded.push(shape);
    }

    Ok(Document {
        title,
        shapes: decoded,
    })
}

/// Write the document into `dir` under its export name. Returns the path.
pub async fn export_to_dir(doc: &Document, dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(export_file_name(&doc.title));
    tokio::fs::write(&path, encode(doc)).await?;
    debug!(path = %path.display(), shapes = doc.shapes.len(), "Exported painting");
    Ok(path)
}

/// Read and validate a painting file. Only `.json` files are accepted.
pub async fn import_file(path: &Path) -> Result<Document, ImportError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        warn!(path = %path.display(), "Rejected non-JSON painting file");
        return Err(ImportError::NotJsonFile);
    }

    let text = tokio::fs::read_to_string(path).await?;
    let doc = decode(&text)?;
    debug!(path = %path.display(), shapes = doc.shapes.len(), "Imported painting");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;
    use crate::viewport::Point;

    fn sample() -> Document {
        let mut doc = Document::new("My Painting");
        doc.place(ShapeKind::Circle, Point::new(10.0, 20.0));
        doc.place(ShapeKind::Triangle, Point::new(-5.5, 300.25));
        doc
    }

    #[test]
    fn test_round_trip_preserves_ids() {
        let doc = sample();
        let back = decode(&encode(&doc)).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_encode_is_pretty() {
        let text = encode(&Document::default());
        assert!(text.contains("\n  \"title\": \"Untitled\""));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("My  Painting\tone"), "My_Painting_one.json");
        assert_eq!(export_file_name(""), "painting.json");
        assert_eq!(export_file_name("solo"), "solo.json");
        assert_eq!(export_file_name("   "), "_.json");
    }

    #[test]
    fn test_malformed_distinct_from_invalid() {
        assert!(matches!(decode("{not json"), Err(ImportError::Malformed(_))));
        assert!(matches!(decode("[1, 2]"), Err(ImportError::Invalid(_))));
    }

    #[test]
    fn test_missing_or_non_array_shapes() {
        assert!(matches!(
            decode(r#"{"title": "x"}"#),
            Err(ImportError::Invalid(_))
        ));
        assert!(matches!(
            decode(r#"{"title": "x", "shapes": {}}"#),
            Err(ImportError::Invalid(_))
        ));
    }

    #[test]
    fn test_empty_title_rejected() {
        assert!(matches!(
            decode(r#"{"title": "", "shapes": []}"#),
            Err(ImportError::Invalid(_))
        ));
    }

    #[test]
    fn test_bad_shape_rejected() {
        let text = r#"{"title": "x", "shapes": [{"id": "a", "type": "hexagon", "x": 0, "y": 0}]}"#;
        assert!(matches!(decode(text), Err(ImportError::Invalid(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let text = r#"{"title": "x", "shapes": [
            {"id": "a", "type": "circle", "x": 0, "y": 0},
            {"id": "a", "type": "square", "x": 1, "y": 1}
        ]}"#;
        let err = decode(text).unwrap_err();
        assert!(err.to_string().contains("duplicate id"));
    }

    #[test]
    fn test_foreign_ids_kept_verbatim() {
        let text = r#"{"title": "x", "shapes": [{"id": "shape-1", "type": "square", "x": 4, "y": 5}]}"#;
        let doc = decode(text).unwrap();
        assert_eq!(doc.shapes[0].id, "shape-1");
        assert_eq!(doc.shapes[0].kind, ShapeKind::Square);
    }

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let doc = sample();
        let path = export_to_dir(&doc, dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "My_Painting.json");
        let back = import_file(&path).await.unwrap();
        assert_eq!(back, doc);
    }

    #[tokio::test]
    async fn test_import_rejects_non_json_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("painting.txt");
        std::fs::write(&path, encode(&sample())).unwrap();
        assert!(matches!(
            import_file(&path).await,
            Err(ImportError::NotJsonFile)
        ));
    }
}
