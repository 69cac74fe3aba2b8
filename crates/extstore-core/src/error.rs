use crate::{
    config::ConfigError, metadata::AnnotationKind, schema::SchemaError, store::StoreError,
    types::SchemaId, units::UnitCategory, value::Value,
};
use derive_more::Display;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Every failure raised while deriving schemas or converting records.
/// Silent omissions (absent values, empty containers, unloaded sub-schemas)
/// are not errors and never surface here.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("missing {kind} metadata on '{target}'")]
    MissingMetadata { target: String, kind: AnnotationKind },

    #[error(
        "type '{ty}' is not supported; only sequence (Vec<T>-like) and associative (BTreeMap<K, V>-like) generic types can be stored"
    )]
    UnsupportedShape { ty: String },

    #[error("field '{field}' has unsupported value type '{ty}'")]
    UnsupportedType { field: String, ty: String },

    #[error(transparent)]
    InvalidSchema(#[from] SchemaError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("field '{field}' measures {category} but the store accepts none of its display units")]
    UnresolvedUnit {
        field: String,
        category: UnitCategory,
    },

    #[error("record nesting below '{schema}' exceeds the depth limit of {limit}")]
    NestingTooDeep { schema: String, limit: usize },

    #[error("expected {expected} value, found {found}")]
    ValueMismatch { expected: String, found: String },

    #[error("'{ty}' holds an absent element; containers cannot store absent values")]
    NullElement { ty: String },

    #[error("record '{record}' has no property '{property}'")]
    UnknownProperty { record: String, property: String },

    #[error("entity belongs to schema {found}, expected {expected}")]
    SchemaMismatch { expected: SchemaId, found: SchemaId },
}

impl Error {
    pub fn missing_metadata(target: impl Into<String>, kind: AnnotationKind) -> Self {
        Self::MissingMetadata {
            target: target.into(),
            kind,
        }
    }

    pub fn unsupported_type(field: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::UnsupportedType {
            field: field.into(),
            ty: ty.into(),
        }
    }

    /// Construct a mismatch between an expected shape and the value received.
    pub fn value_mismatch(expected: impl fmt::Display, found: &Value) -> Self {
        Self::ValueMismatch {
            expected: expected.to_string(),
            found: found.type_label().to_string(),
        }
    }

    pub fn unknown_property(record: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            record: record.into(),
            property: property.into(),
        }
    }

    /// Stable classification of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingMetadata { .. } => ErrorClass::Metadata,
            Self::UnsupportedShape { .. }
            | Self::UnsupportedType { .. }
            | Self::UnresolvedUnit { .. }
            | Self::NullElement { .. } => ErrorClass::Unsupported,
            Self::InvalidSchema(_)
            | Self::NestingTooDeep { .. }
            | Self::ValueMismatch { .. }
            | Self::UnknownProperty { .. }
            | Self::SchemaMismatch { .. } => ErrorClass::InvariantViolation,
            Self::Store(StoreError::SchemaConflict { .. }) => ErrorClass::Conflict,
            Self::Store(_) => ErrorClass::Store,
            Self::Config(_) => ErrorClass::Config,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
///
/// Coarse error taxonomy for callers that branch on failure kind.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    #[display("config")]
    Config,
    #[display("conflict")]
    Conflict,
    #[display("invariant_violation")]
    InvariantViolation,
    #[display("metadata")]
    Metadata,
    #[display("store")]
    Store,
    #[display("unsupported")]
    Unsupported,
}
