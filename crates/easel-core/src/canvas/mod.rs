//! Canvas object model.
//!
//! A board selection is heterogeneous: images, sticky notes, connectors and
//! shapes, plus whatever other items the board offers. [`CanvasObject`] is a
//! sum over the four item types workflows use and one catch-all for the rest,
//! so every consumer discriminates them by exhaustive pattern matching. The
//! serde representation uses the board API's `type` tag (`image`,
//! `sticky_note`, `connector`, `shape`), which lets a board snapshot be read
//! straight from JSON. Any other tag becomes an unsupported item.

mod object;
mod selection;

pub use object::{
    CanvasObject, Connector, Geometry, Image, ObjectId, ObjectKind, Shape, ShapeKind, StickyColor,
    StickyNote, UnsupportedItem,
};
pub use selection::{Selection, SelectionCounts, SelectionPartition};
