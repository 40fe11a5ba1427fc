//! Block record types
//!
//! Provides [`BlockRecord`] for the new catalog and [`OldRecord`] for the
//! reference catalog. Both share [`BlockAttributes`], the four physical
//! attributes the merger fills in.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Enumerated collision shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    /// Full cube
    Block,

    /// No collision
    Empty,
}

/// Collision geometry of a block
///
/// Most catalogs use the enumerated form (`"block"` / `"empty"`); anything
/// else is carried through untouched as a geometry descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundingBox {
    /// Enumerated shape
    Kind(BoxKind),

    /// Arbitrary geometry descriptor
    Geometry(Value),
}

impl BoundingBox {
    /// Full cube shape
    pub const BLOCK: Self = Self::Kind(BoxKind::Block);

    /// Empty shape
    pub const EMPTY: Self = Self::Kind(BoxKind::Empty);
}

/// The attribute group copied from a donor record
///
/// `None` means "not yet resolved". The group is always replaced as a
/// whole, never field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAttributes {
    /// Whether light passes through the block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,

    /// Amount of light filtered (0-15)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_light: Option<u8>,

    /// Light level emitted (0-15)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emit_light: Option<u8>,

    /// Collision geometry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl BlockAttributes {
    /// Serialized key of each attribute, in canonical order
    pub const FIELDS: [&'static str; 4] = ["transparent", "filterLight", "emitLight", "boundingBox"];

    /// Create fully populated attributes
    #[inline]
    #[must_use]
    pub fn new(
        transparent: bool,
        filter_light: u8,
        emit_light: u8,
        bounding_box: BoundingBox,
    ) -> Self {
        Self {
            transparent: Some(transparent),
            filter_light: Some(filter_light),
            emit_light: Some(emit_light),
            bounding_box: Some(bounding_box),
        }
    }

    /// True if no attribute is set
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transparent.is_none()
            && self.filter_light.is_none()
            && self.emit_light.is_none()
            && self.bounding_box.is_none()
    }
}

/// A record of the new catalog
///
/// Fields other than `name` and the attribute group are kept in `extra`.
/// On output every key read from the source keeps its position; attributes
/// filled in by a merge are appended after them.
#[derive(Debug, Clone)]
pub struct BlockRecord {
    /// Stable identifier, unique within a catalog
    pub name: String,

    /// Physical attributes (possibly unresolved)
    pub attributes: BlockAttributes,

    /// Every other field of the source document, in input order
    pub extra: Map<String, Value>,

    /// Keys in the order they were read
    layout: Vec<String>,
}

impl BlockRecord {
    /// Create unresolved record with only a name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BlockAttributes::default(),
            extra: Map::new(),
            layout: Vec::new(),
        }
    }

    /// Replace the whole attribute group
    #[inline]
    pub fn apply(&mut self, attributes: &BlockAttributes) {
        self.attributes = attributes.clone();
    }

    /// True if any attribute has been filled in
    #[inline]
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Output key order: source keys first, then keys the source lacked
    fn key_order(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::with_capacity(self.layout.len() + 1);
        if !self.layout.iter().any(|k| k == NAME) {
            keys.push(NAME);
        }
        keys.extend(self.layout.iter().map(String::as_str));

        let fields: [&str; 4] = BlockAttributes::FIELDS;
        let tail = fields
            .into_iter()
            .chain(self.extra.keys().map(String::as_str))
            .filter(|key| !self.layout.iter().any(|k| k == key));
        keys.extend(tail);
        keys
    }
}

const NAME: &str = "name";

// Layout only affects output order, not identity.
impl PartialEq for BlockRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.attributes == other.attributes && self.extra == other.extra
    }
}

fn put<M: SerializeMap, T: Serialize>(map: &mut M, key: &str, value: Option<&T>) -> Result<(), M::Error> {
    match value {
        Some(value) => map.serialize_entry(key, value),
        None => Ok(()),
    }
}

impl Serialize for BlockRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let attributes = &self.attributes;
        let mut map = serializer.serialize_map(None)?;
        for key in self.key_order() {
            match key {
                NAME => map.serialize_entry(NAME, &self.name)?,
                "transparent" => put(&mut map, key, attributes.transparent.as_ref())?,
                "filterLight" => put(&mut map, key, attributes.filter_light.as_ref())?,
                "emitLight" => put(&mut map, key, attributes.emit_light.as_ref())?,
                "boundingBox" => put(&mut map, key, attributes.bounding_box.as_ref())?,
                _ => put(&mut map, key, self.extra.get(key))?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BlockRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;

        let mut layout = Vec::with_capacity(fields.len());
        let mut name = None;
        let mut group = Map::new();
        let mut extra = Map::new();
        for (key, value) in fields {
            layout.push(key.clone());
            if key == NAME {
                name = Some(value);
            } else if BlockAttributes::FIELDS.contains(&key.as_str()) {
                group.insert(key, value);
            } else {
                extra.insert(key, value);
            }
        }

        let name = match name {
            Some(Value::String(name)) => name,
            Some(_) => return Err(de::Error::custom("field `name` must be a string")),
            None => return Err(de::Error::missing_field(NAME)),
        };
        let attributes = BlockAttributes::deserialize(Value::Object(group)).map_err(de::Error::custom)?;

        Ok(Self {
            name,
            attributes,
            extra,
            layout,
        })
    }
}

/// A record of the reference catalog
///
/// Fields beyond the name and attribute group are ignored on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OldRecord {
    /// Name in the old naming scheme
    pub name: String,

    /// Recorded physical attributes
    #[serde(flatten)]
    pub attributes: BlockAttributes,
}

impl OldRecord {
    /// Create old record
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: BlockAttributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }
}
