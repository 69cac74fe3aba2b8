use crate::{types::SchemaId, units::UnitCategory};
use extstore_primitives::ValueKind;
use serde::{Serialize, Serializer};
use std::fmt;

///
/// FieldType
///
/// Resolved storage type of a field's values or keys.
/// `Unsupported` keeps the Rust type name so conversion can report it.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldType {
    Stored(ValueKind),
    Unsupported(&'static str),
}

impl FieldType {
    #[must_use]
    pub const fn kind(self) -> Option<ValueKind> {
        match self {
            Self::Stored(kind) => Some(kind),
            Self::Unsupported(_) => None,
        }
    }

    #[must_use]
    pub const fn is_stored(self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

impl From<ValueKind> for FieldType {
    fn from(kind: ValueKind) -> Self {
        Self::Stored(kind)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored(kind) => write!(f, "{kind}"),
            Self::Unsupported(name) => write!(f, "unsupported({name})"),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

///
/// FieldShape
///
/// Container shape of a field together with its resolved element types.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldShape {
    Scalar(FieldType),
    Sequence(FieldType),
    Associative { key: FieldType, value: FieldType },
}

impl FieldShape {
    /// Type of the stored value, or of each element/map value.
    #[must_use]
    pub const fn value_type(&self) -> FieldType {
        match self {
            Self::Scalar(ty) | Self::Sequence(ty) | Self::Associative { value: ty, .. } => *ty,
        }
    }

    #[must_use]
    pub const fn key_type(&self) -> Option<FieldType> {
        match self {
            Self::Associative { key, .. } => Some(*key),
            Self::Scalar(_) | Self::Sequence(_) => None,
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Associative { .. } => "associative",
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(ty) => write!(f, "{ty}"),
            Self::Sequence(ty) => write!(f, "list<{ty}>"),
            Self::Associative { key, value } => write!(f, "map<{key}, {value}>"),
        }
    }
}

///
/// Field
///
/// One persisted property of a schema.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct Field {
    name: String,
    shape: FieldShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    sub_schema: Option<SchemaId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<UnitCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    documentation: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            shape,
            sub_schema: None,
            unit: None,
            documentation: None,
        }
    }

    pub fn scalar(name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        Self::new(name, FieldShape::Scalar(ty.into()))
    }

    pub fn sequence(name: impl Into<String>, element: impl Into<FieldType>) -> Self {
        Self::new(name, FieldShape::Sequence(element.into()))
    }

    pub fn map(
        name: impl Into<String>,
        key: impl Into<FieldType>,
        value: impl Into<FieldType>,
    ) -> Self {
        Self::new(
            name,
            FieldShape::Associative {
                key: key.into(),
                value: value.into(),
            },
        )
    }

    #[must_use]
    pub const fn with_sub_schema(mut self, id: SchemaId) -> Self {
        self.sub_schema = Some(id);
        self
    }

    #[must_use]
    pub const fn with_unit(mut self, unit: UnitCategory) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn shape(&self) -> &FieldShape {
        &self.shape
    }

    #[must_use]
    pub const fn value_type(&self) -> FieldType {
        self.shape.value_type()
    }

    #[must_use]
    pub const fn key_type(&self) -> Option<FieldType> {
        self.shape.key_type()
    }

    /// Schema of nested record values, when the value type is a record.
    #[must_use]
    pub const fn sub_schema(&self) -> Option<SchemaId> {
        self.sub_schema
    }

    #[must_use]
    pub const fn unit(&self) -> Option<UnitCategory> {
        self.unit
    }

    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }
}
