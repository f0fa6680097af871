//! Short constructors for canvas items.

use easel_core::canvas::{
    CanvasObject, Connector, Geometry, Image, Shape, ShapeKind, StickyNote, UnsupportedItem,
};

/// An image whose URL is derived from its identifier.
pub fn image(id: &str) -> CanvasObject {
    Image::new(id, format!("https://assets.example.com/{id}.png")).into()
}

/// A yellow sticky note.
pub fn sticky_note(id: &str, text: &str) -> CanvasObject {
    StickyNote::new(id, text).into()
}

/// A connector from `start` to `end`.
pub fn connector(id: &str, start: &str, end: &str) -> CanvasObject {
    Connector::new(id, start, end).into()
}

/// A circular region, optionally sitting on another item.
pub fn shape(id: &str, overlaps: Option<&str>) -> CanvasObject {
    let shape = Shape::new(id, ShapeKind::Circle, Geometry::new(120.0, 80.0, 64.0, 64.0));
    match overlaps {
        Some(item) => shape.overlapping(item).into(),
        None => shape.into(),
    }
}

/// A board item of a type no workflow uses, such as `text` or `frame`.
pub fn unsupported(id: &str, kind: &str) -> CanvasObject {
    UnsupportedItem::new(id, kind).into()
}
