//! Schema descriptors and the builder that assembles them.

mod field;
mod validate;

#[cfg(test)]
mod tests;

use crate::{
    metadata::SchemaAttr,
    types::{AccessLevel, Guid, SchemaId},
};
use serde::{Serialize, Serializer};
use thiserror::Error as ThisError;
use xxhash_rust::xxh3::Xxh3;

// re-exports
pub use field::{Field, FieldShape, FieldType};

///
/// SchemaError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("schema {id} has no name")]
    MissingName { id: SchemaId },

    #[error("invalid schema name '{name}': {reason}")]
    InvalidSchemaName { name: String, reason: String },

    #[error("invalid field name '{name}' in schema '{schema}': {reason}")]
    InvalidFieldName {
        schema: String,
        name: String,
        reason: String,
    },

    #[error("duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },
}

///
/// Schema
///
/// Immutable descriptor of one record type: identity, access policy, and the
/// ordered field list. Fields are unique by name.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Schema {
    id: SchemaId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    documentation: Option<String>,
    #[serde(
        serialize_with = "serialize_guid",
        skip_serializing_if = "Option::is_none"
    )]
    application_id: Option<Guid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vendor_id: Option<String>,
    read_access: AccessLevel,
    write_access: AccessLevel,
    fields: Vec<Field>,
}

impl Schema {
    #[must_use]
    pub const fn id(&self) -> SchemaId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    #[must_use]
    pub const fn application_id(&self) -> Option<Guid> {
        self.application_id
    }

    #[must_use]
    pub fn vendor_id(&self) -> Option<&str> {
        self.vendor_id.as_deref()
    }

    #[must_use]
    pub const fn read_access(&self) -> AccessLevel {
        self.read_access
    }

    #[must_use]
    pub const fn write_access(&self) -> AccessLevel {
        self.write_access
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Structural hash of the layout; equal schemas hash equally.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.update(&self.id.as_u128().to_be_bytes());
        hasher.update(self.name.as_bytes());
        for field in &self.fields {
            hasher.update(&[0]);
            hasher.update(field.name().as_bytes());
            hasher.update(field.shape().to_string().as_bytes());
            if let Some(sub) = field.sub_schema() {
                hasher.update(&sub.as_u128().to_be_bytes());
            }
            if let Some(unit) = field.unit() {
                hasher.update(unit.to_string().as_bytes());
            }
        }

        hasher.digest()
    }
}

fn serialize_guid<S: Serializer>(guid: &Option<Guid>, serializer: S) -> Result<S::Ok, S::Error> {
    match guid {
        Some(guid) => serializer.collect_str(guid),
        None => serializer.serialize_none(),
    }
}

///
/// SchemaBuilder
///
/// Assembles a `Schema`, validating names and field uniqueness as it goes.
///

#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    id: SchemaId,
    name: Option<String>,
    documentation: Option<String>,
    application_id: Option<Guid>,
    vendor_id: Option<String>,
    read_access: AccessLevel,
    write_access: AccessLevel,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    #[must_use]
    pub const fn new(id: SchemaId) -> Self {
        Self {
            id,
            name: None,
            documentation: None,
            application_id: None,
            vendor_id: None,
            read_access: AccessLevel::Public,
            write_access: AccessLevel::Public,
            fields: Vec::new(),
        }
    }

    /// Seed identity, naming and access policy from type-level metadata.
    #[must_use]
    pub fn from_attr(attr: &SchemaAttr) -> Self {
        Self {
            name: Some(attr.name.clone()),
            documentation: attr.documentation.clone(),
            application_id: attr.application_id,
            vendor_id: attr.vendor_id.clone(),
            read_access: attr.read_access,
            write_access: attr.write_access,
            ..Self::new(attr.id)
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    #[must_use]
    pub const fn application_id(mut self, application_id: Guid) -> Self {
        self.application_id = Some(application_id);
        self
    }

    #[must_use]
    pub fn vendor_id(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = Some(vendor_id.into());
        self
    }

    #[must_use]
    pub const fn read_access(mut self, level: AccessLevel) -> Self {
        self.read_access = level;
        self
    }

    #[must_use]
    pub const fn write_access(mut self, level: AccessLevel) -> Self {
        self.write_access = level;
        self
    }

    /// Append a field, rejecting invalid or duplicate names.
    pub fn field(mut self, field: Field) -> Result<Self, SchemaError> {
        self.push_field(field)?;

        Ok(self)
    }

    pub fn push_field(&mut self, field: Field) -> Result<(), SchemaError> {
        let schema = self.display_name();
        validate::validate_name(field.name()).map_err(|reason| SchemaError::InvalidFieldName {
            schema: schema.clone(),
            name: field.name().to_string(),
            reason,
        })?;
        if self.fields.iter().any(|f| f.name() == field.name()) {
            return Err(SchemaError::DuplicateField {
                schema,
                field: field.name().to_string(),
            });
        }
        self.fields.push(field);

        Ok(())
    }

    pub fn finish(self) -> Result<Schema, SchemaError> {
        let name = self.name.ok_or(SchemaError::MissingName { id: self.id })?;
        validate::validate_name(&name).map_err(|reason| SchemaError::InvalidSchemaName {
            name: name.clone(),
            reason,
        })?;

        Ok(Schema {
            id: self.id,
            name,
            documentation: self.documentation,
            application_id: self.application_id,
            vendor_id: self.vendor_id,
            read_access: self.read_access,
            write_access: self.write_access,
            fields: self.fields,
        })
    }

    fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }
}
