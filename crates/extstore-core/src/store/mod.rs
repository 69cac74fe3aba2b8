//! Record store boundary.
//!
//! The converter only ever talks to a `RecordStore`. `MemoryStore` is the
//! in-process implementation used for embedding and tests.

mod memory;


use crate::{
    entity::Entity,
    schema::{Field, Schema},
    types::SchemaId,
    units::DisplayUnit,
    value::Value,
};
use std::sync::Arc;
use thiserror::Error as ThisError;

// re-exports
pub use memory::MemoryStore;

///
/// StoreError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("schema {id} is already registered with a different layout")]
    SchemaConflict { id: SchemaId },

    #[error("field '{field}' does not belong to schema '{schema}'")]
    ForeignField { schema: String, field: String },

    #[error("field '{field}' expects {expected}, got {found}")]
    ValueMismatch {
        field: String,
        expected: String,
        found: String,
    },

    #[error("field '{field}' requires a display unit")]
    MissingUnit { field: String },

    #[error("display unit {unit} is not compatible with field '{field}'")]
    IncompatibleUnit { field: String, unit: DisplayUnit },

    #[error("field '{field}' does not take a display unit")]
    UnexpectedUnit { field: String },
}

///
/// RecordStore
///
/// Identity-keyed schema registry plus typed slot access on entities.
///
/// `create_schema` must be idempotent per id and never register two layouts
/// under one id; concurrent creators observe at most one registration.
///

pub trait RecordStore {
    /// Resolve a schema that is registered and resident.
    fn lookup_schema(&self, id: SchemaId) -> Option<Arc<Schema>>;

    /// Register `schema`, or return the existing registration of an identical
    /// layout under the same id.
    fn create_schema(&self, schema: Schema) -> Result<Arc<Schema>, StoreError>;

    fn new_entity(&self, schema: &Arc<Schema>) -> Entity {
        Entity::new(Arc::clone(schema))
    }

    /// Read a slot; `None` when the slot was never written.
    fn get(
        &self,
        entity: &Entity,
        field: &Field,
        unit: Option<DisplayUnit>,
    ) -> Result<Option<Value>, StoreError>;

    fn set(
        &self,
        entity: &mut Entity,
        field: &Field,
        value: Value,
        unit: Option<DisplayUnit>,
    ) -> Result<(), StoreError>;

    fn is_schema_loaded(&self, id: SchemaId) -> bool {
        self.lookup_schema(id).is_some()
    }

    /// Whether `unit` may be used to read or write `field`.
    fn is_compatible_unit(&self, field: &Field, unit: DisplayUnit) -> bool {
        field.unit() == Some(unit.category())
    }
}
