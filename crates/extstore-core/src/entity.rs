use crate::{schema::Schema, types::SchemaId, value::Value};
use std::{collections::BTreeMap, sync::Arc};

///
/// Entity
///
/// Generic record instance bound to one schema.
///
/// Application code reads and writes slots through a `RecordStore`; the raw
/// slot accessors exist for store implementations, which own the encoding of
/// what they put there.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    schema: Arc<Schema>,
    slots: BTreeMap<String, Value>,
}

impl Entity {
    #[must_use]
    pub const fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            slots: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    #[must_use]
    pub fn schema_id(&self) -> SchemaId {
        self.schema.id()
    }

    /// Number of populated slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Names of populated slots in name order.
    pub fn populated(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    #[must_use]
    pub fn raw_slot(&self, field: &str) -> Option<&Value> {
        self.slots.get(field)
    }

    pub fn set_raw_slot(&mut self, field: &str, value: Value) -> Option<Value> {
        self.slots.insert(field.to_string(), value)
    }
}
