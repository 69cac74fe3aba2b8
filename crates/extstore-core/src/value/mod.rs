
use crate::{
    entity::Entity,
    types::{ElementId, Guid, Uv, Xyz},
};
use extstore_primitives::ValueKind;

///
/// Value
///
/// Loosely typed slot content exchanged with a record store.
/// Scalars map onto one `ValueKind`; `List` and `Map` carry the contents of
/// sequence and associative fields. `Map` keeps insertion order.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(u8),
    Int16(i16),
    Int32(i32),
    Float32(f32),
    Float64(f64),
    Text(String),
    Guid(Guid),
    ElementId(ElementId),
    Xyz(Xyz),
    Uv(Uv),
    Entity(Box<Entity>),
    List(Vec<Self>),
    Map(Vec<(Self, Self)>),
}

impl Value {
    /// Primitive kind of a scalar value; `None` for containers.
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Byte(_) => ValueKind::Byte,
            Self::Int16(_) => ValueKind::Int16,
            Self::Int32(_) => ValueKind::Int32,
            Self::Float32(_) => ValueKind::Float32,
            Self::Float64(_) => ValueKind::Float64,
            Self::Text(_) => ValueKind::Text,
            Self::Guid(_) => ValueKind::Guid,
            Self::ElementId(_) => ValueKind::ElementId,
            Self::Xyz(_) => ValueKind::Xyz,
            Self::Uv(_) => ValueKind::Uv,
            Self::Entity(_) => ValueKind::Entity,
            Self::List(_) | Self::Map(_) => return None,
        };

        Some(kind)
    }

    /// Short label for diagnostics.
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Map(_) => "map",
            scalar => match scalar.kind() {
                Some(kind) => kind.label(),
                None => "unknown",
            },
        }
    }

    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_))
    }

    /// True for a `List` or `Map` without elements.
    #[must_use]
    pub const fn is_empty_container(&self) -> bool {
        match self {
            Self::List(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    #[must_use]
    pub const fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Apply a unit conversion to every measurable number inside the value.
    ///
    /// Map keys are never measurable and pass through untouched.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn map_measure(self, f: &impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Float32(v) => Self::Float32(f(f64::from(v)) as f32),
            Self::Float64(v) => Self::Float64(f(v)),
            Self::Xyz(p) => Self::Xyz(p.map(f)),
            Self::Uv(p) => Self::Uv(p.map(f)),
            Self::List(items) => Self::List(items.into_iter().map(|v| v.map_measure(f)).collect()),
            Self::Map(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, v.map_measure(f)))
                    .collect(),
            ),
            other => other,
        }
    }
}

macro_rules! value_from {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    u8 => Byte,
    i16 => Int16,
    i32 => Int32,
    f32 => Float32,
    f64 => Float64,
    String => Text,
    Guid => Guid,
    ElementId => ElementId,
    Xyz => Xyz,
    Uv => Uv,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Self::Entity(Box::new(entity))
    }
}
