//! Core runtime for extstore: metadata, schema derivation, field
//! classification, the record store boundary, and record/entity conversion.
#![warn(unreachable_pub)]

extern crate self as extstore;

// public exports are one module level down
pub mod build;
pub mod classify;
pub mod config;
pub mod convert;
pub mod entity;
pub mod error;
pub mod host;
pub mod metadata;
pub mod obs;
pub mod reflect;
pub mod schema;
pub mod store;
pub mod traits;
pub mod types;
pub mod units;
pub mod value;

pub use error::Error;
pub use extstore_primitives::{ALL_VALUE_KINDS, ValueFamily, ValueKind};

///
/// CONSTANTS
///

/// Maximum length of schema and field names.
pub const MAX_NAME_LEN: usize = 64;

/// Default limit on record nesting during conversion.
pub const DEFAULT_MAX_DEPTH: usize = 32;

///
/// Prelude
///
/// Domain vocabulary for record types and the code that converts them.
///

pub mod prelude {
    pub use crate::{
        convert::{Context, RecordConverter},
        entity::Entity,
        host::{Element, EntityHost, EntityHostExt},
        schema::{Field, Schema},
        store::{MemoryStore, RecordStore},
        traits::{Record, Storable},
        types::{ElementId, Guid, SchemaId, Uv, Xyz},
        units::{DisplayUnit, UnitCategory},
        value::Value,
    };
}
