use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Stable address of one slot placeholder (for example `"3"` or `"s3"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Sequential item identifier. Persisted as a JSON string; numbers are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawItemId", into = "String")]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ItemId> for String {
    fn from(value: ItemId) -> Self {
        value.0.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawItemId> for ItemId {
    type Error = String;

    fn try_from(value: RawItemId) -> Result<Self, Self::Error> {
        match value {
            RawItemId::Number(id) => Ok(Self(id)),
            RawItemId::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| format!("item id `{text}` is not a sequential id")),
        }
    }
}

/// Pixel offset applied on top of a slot's base location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelOffset {
    pub x: f64,
    pub y: f64,
}

impl PixelOffset {
    /// The settled position inside a slot.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_origin(self) -> bool {
        self == Self::ORIGIN
    }
}

/// One placed item. `P` is producer-defined and never inspected by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord<P> {
    pub id: ItemId,
    pub data: P,
    pub slot_id: SlotId,
    #[serde(default)]
    pub position: PixelOffset,
}

impl<P> ItemRecord<P> {
    pub fn new(id: ItemId, data: P, slot_id: SlotId) -> Self {
        Self {
            id,
            data,
            slot_id,
            position: PixelOffset::ORIGIN,
        }
    }
}

/// How a rendered item should travel to a new placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Jump without animation (restore, live drag).
    Instant,
    /// Brief eased transition back to the settled offset.
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub item_id: ItemId,
    pub pointer_start: PointerPosition,
    pub offset_start: PixelOffset,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    /// Items playing their exit transition; they reject every other transition.
    pub removing: BTreeSet<ItemId>,
}

impl InteractionState {
    pub fn dragged_item(&self) -> Option<ItemId> {
        self.dragging.as_ref().map(|session| session.item_id)
    }

    pub fn is_busy(&self, item_id: ItemId) -> bool {
        self.removing.contains(&item_id)
    }
}
