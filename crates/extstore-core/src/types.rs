//! Identity and geometry types shared by schemas, values, and hosts.

use derive_more::Display;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::str::FromStr;
use ulid::Ulid;

// re-exports
pub use ulid::{DecodeError, Ulid as Guid};

///
/// SchemaId
///
/// Globally unique schema identity. Equal ids imply an identical field layout.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{_0}")]
pub struct SchemaId(Ulid);

impl SchemaId {
    #[must_use]
    pub const fn from_u128(raw: u128) -> Self {
        Self(Ulid(raw))
    }

    #[must_use]
    pub const fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        self.0.0
    }

    #[must_use]
    pub const fn ulid(self) -> Ulid {
        self.0
    }
}

impl FromStr for SchemaId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_string(s).map(Self)
    }
}

impl Serialize for SchemaId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SchemaId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;

        raw.parse().map_err(de::Error::custom)
    }
}

///
/// ElementId
///
/// Host-side element reference stored as a primitive.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[display("#{_0}")]
pub struct ElementId(pub i64);

impl ElementId {
    /// Sentinel for "no element".
    pub const INVALID: Self = Self(-1);

    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 >= 0
    }
}

///
/// Xyz
///
/// Three-dimensional point or vector.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, PartialEq, Serialize)]
#[display("({x}, {y}, {z})")]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Apply `f` to every coordinate.
    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }
}

///
/// Uv
///
/// Two-dimensional surface parameter pair.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, PartialEq, Serialize)]
#[display("({u}, {v})")]
pub struct Uv {
    pub u: f64,
    pub v: f64,
}

impl Uv {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    #[must_use]
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.u), f(self.v))
    }
}

///
/// AccessLevel
///
/// Who may read or write entities of a schema.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
pub enum AccessLevel {
    #[default]
    Public,
    Vendor,
    Application,
}

///
/// TESTS
///
