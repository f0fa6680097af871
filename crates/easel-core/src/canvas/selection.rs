//! Selection snapshots and their partition by item type.

use serde::{Deserialize, Serialize};

use super::{CanvasObject, Connector, Image, ObjectId, Shape, StickyNote};

/// The items a user had selected at one instant.
///
/// Order carries no meaning; it is kept only so sticky-note prompts come out
/// in the order the board reported them. A selection lives for one dispatch
/// cycle and is never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    objects: Vec<CanvasObject>,
}

impl Selection {
    /// Creates a selection from the items returned by the board.
    pub fn new(objects: Vec<CanvasObject>) -> Self {
        Self { objects }
    }

    /// Returns the number of selected items.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates over the selected items.
    pub fn iter(&self) -> std::slice::Iter<'_, CanvasObject> {
        self.objects.iter()
    }

    /// Looks up a selected item by identifier.
    pub fn get(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|object| object.id() == id)
    }

    /// Returns true if the item is part of this selection.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Splits the selection into per-type views without copying or mutating it.
    pub fn partition(&self) -> SelectionPartition<'_> {
        let mut partition = SelectionPartition {
            images: Vec::new(),
            stickers: Vec::new(),
            connectors: Vec::new(),
            shapes: Vec::new(),
            unsupported: 0,
            total: self.objects.len(),
        };

        for object in &self.objects {
            match object {
                CanvasObject::Image(image) => partition.images.push(image),
                CanvasObject::StickyNote(note) => partition.stickers.push(note),
                CanvasObject::Connector(connector) => partition.connectors.push(connector),
                CanvasObject::Shape(shape) => partition.shapes.push(shape),
                CanvasObject::Unsupported(_) => partition.unsupported += 1,
            }
        }

        partition
    }

    /// Returns the per-type counts of this selection.
    pub fn counts(&self) -> SelectionCounts {
        self.partition().counts()
    }
}

impl From<Vec<CanvasObject>> for Selection {
    fn from(objects: Vec<CanvasObject>) -> Self {
        Self::new(objects)
    }
}

impl FromIterator<CanvasObject> for Selection {
    fn from_iter<I: IntoIterator<Item = CanvasObject>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Selection {
    type IntoIter = std::slice::Iter<'a, CanvasObject>;
    type Item = &'a CanvasObject;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowed per-type views over a [`Selection`].
///
/// Each list preserves the relative order of the source selection.
#[derive(Debug, Clone)]
pub struct SelectionPartition<'a> {
    pub images: Vec<&'a Image>,
    pub stickers: Vec<&'a StickyNote>,
    pub connectors: Vec<&'a Connector>,
    pub shapes: Vec<&'a Shape>,
    /// Items of a type no workflow uses. They appear in no list.
    pub unsupported: usize,
    /// Size of the whole selection.
    pub total: usize,
}

impl SelectionPartition<'_> {
    /// Returns the per-type counts.
    pub fn counts(&self) -> SelectionCounts {
        SelectionCounts {
            images: self.images.len(),
            stickers: self.stickers.len(),
            connectors: self.connectors.len(),
            shapes: self.shapes.len(),
            unsupported: self.unsupported,
            total: self.total,
        }
    }
}

/// Per-type item counts of a selection.
///
/// `total` counts every selected item, so it exceeds the sum of the four
/// workflow types whenever unsupported items are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelectionCounts {
    pub images: usize,
    pub stickers: usize,
    pub connectors: usize,
    pub shapes: usize,
    pub unsupported: usize,
    pub total: usize,
}
