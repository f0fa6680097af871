//! Canvas item types.

use derive_more::{AsRef, Deref, Display, From};
use serde::{Deserialize, Serialize};
use serde::de::Error as _;
use strum::{AsRefStr, Display as StrumDisplay, EnumString, IntoStaticStr};

/// Board-assigned identifier of a canvas item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(AsRef, Deref, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Creates a new identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Type tag of a canvas item, as reported by the board API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, StrumDisplay, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ObjectKind {
    Image,
    StickyNote,
    Connector,
    Shape,
    /// Any other board item: text, frame, card and so on.
    Unsupported,
}

/// A single selected item on the board.
///
/// Items of a type no workflow uses are kept as [`CanvasObject::Unsupported`]
/// so they still count towards the selection size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CanvasObject {
    /// A placed picture.
    Image(Image),
    /// A sticky note carrying free text.
    StickyNote(StickyNote),
    /// A directed link between two items.
    Connector(Connector),
    /// A drawn shape.
    Shape(Shape),
    /// An item of any other type.
    #[serde(untagged)]
    Unsupported(UnsupportedItem),
}

impl CanvasObject {
    /// Returns the item identifier.
    pub fn id(&self) -> &ObjectId {
        match self {
            Self::Image(image) => &image.id,
            Self::StickyNote(note) => &note.id,
            Self::Connector(connector) => &connector.id,
            Self::Shape(shape) => &shape.id,
            Self::Unsupported(item) => &item.id,
        }
    }

    /// Returns the type tag.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Image(_) => ObjectKind::Image,
            Self::StickyNote(_) => ObjectKind::StickyNote,
            Self::Connector(_) => ObjectKind::Connector,
            Self::Shape(_) => ObjectKind::Shape,
            Self::Unsupported(_) => ObjectKind::Unsupported,
        }
    }
}

impl From<Image> for CanvasObject {
    fn from(image: Image) -> Self {
        Self::Image(image)
    }
}

impl From<StickyNote> for CanvasObject {
    fn from(note: StickyNote) -> Self {
        Self::StickyNote(note)
    }
}

impl From<Connector> for CanvasObject {
    fn from(connector: Connector) -> Self {
        Self::Connector(connector)
    }
}

impl From<Shape> for CanvasObject {
    fn from(shape: Shape) -> Self {
        Self::Shape(shape)
    }
}

impl From<UnsupportedItem> for CanvasObject {
    fn from(item: UnsupportedItem) -> Self {
        Self::Unsupported(item)
    }
}

/// A board item whose type plays no part in any workflow.
///
/// Only the identifier and the board's type tag are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUnsupportedItem")]
pub struct UnsupportedItem {
    pub id: ObjectId,
    /// Type tag as reported by the board.
    #[serde(rename = "type")]
    pub kind: String,
}

impl UnsupportedItem {
    pub fn new(id: impl Into<ObjectId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Deserialize)]
struct RawUnsupportedItem {
    id: ObjectId,
    #[serde(rename = "type")]
    kind: String,
}

impl TryFrom<RawUnsupportedItem> for UnsupportedItem {
    type Error = serde_json::Error;

    /// Rejects known tags, so a malformed image or note is an error rather
    /// than an unsupported item.
    fn try_from(raw: RawUnsupportedItem) -> Result<Self, Self::Error> {
        let known = raw.kind.parse::<ObjectKind>();
        if matches!(known, Ok(kind) if kind != ObjectKind::Unsupported) {
            return Err(serde_json::Error::custom(format!(
                "malformed {} item {}",
                raw.kind, raw.id
            )));
        }

        Ok(Self::new(raw.id, raw.kind))
    }
}

/// A picture placed on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: ObjectId,
    /// Source reference: a URL or a storage pointer.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Image {
    pub fn new(id: impl Into<ObjectId>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Fill color of a sticky note.
///
/// Colors are carried through to generation requests untouched. They are not
/// interpreted as prompt roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, StrumDisplay, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StickyColor {
    Gray,
    LightYellow,
    #[default]
    Yellow,
    Orange,
    LightGreen,
    Green,
    DarkGreen,
    Cyan,
    LightPink,
    Pink,
    Violet,
    Red,
    LightBlue,
    Blue,
    DarkBlue,
    Black,
}

/// A sticky note with free text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickyNote {
    pub id: ObjectId,
    pub content: String,
    #[serde(default)]
    pub color: StickyColor,
}

impl StickyNote {
    pub fn new(id: impl Into<ObjectId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            color: StickyColor::default(),
        }
    }

    pub fn with_color(mut self, color: StickyColor) -> Self {
        self.color = color;
        self
    }
}

/// A directed link between two canvas items.
///
/// Either end may be unattached, in which case the endpoint is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ObjectId,
    #[serde(default)]
    pub start: Option<ObjectId>,
    #[serde(default)]
    pub end: Option<ObjectId>,
}

impl Connector {
    pub fn new(
        id: impl Into<ObjectId>,
        start: impl Into<ObjectId>,
        end: impl Into<ObjectId>,
    ) -> Self {
        Self {
            id: id.into(),
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Creates a connector with neither end attached.
    pub fn detached(id: impl Into<ObjectId>) -> Self {
        Self {
            id: id.into(),
            start: None,
            end: None,
        }
    }

    /// Returns true if this connector joins `a` and `b`, in either direction.
    pub fn links(&self, a: &ObjectId, b: &ObjectId) -> bool {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => (start == a && end == b) || (start == b && end == a),
            _ => false,
        }
    }
}

/// Outline of a drawn shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(AsRefStr, StrumDisplay, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    RoundRectangle,
    Circle,
    Triangle,
    Rhombus,
    Star,
}

/// Position and size of a shape in board coordinates.
///
/// `x` and `y` locate the shape's center, as the board API reports them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }
}

/// A drawn shape, used to delimit an inpainting region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ObjectId,
    #[serde(default)]
    pub shape: ShapeKind,
    pub geometry: Geometry,
    /// The item this shape visually sits on, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlaps: Option<ObjectId>,
}

impl Shape {
    pub fn new(id: impl Into<ObjectId>, shape: ShapeKind, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            shape,
            geometry,
            overlaps: None,
        }
    }

    pub fn overlapping(mut self, item: impl Into<ObjectId>) -> Self {
        self.overlaps = Some(item.into());
        self
    }
}
