use crate::{
    entity::Entity,
    schema::{Field, FieldShape, FieldType, Schema},
    store::{RecordStore, StoreError},
    types::SchemaId,
    units::DisplayUnit,
    value::Value,
};
use extstore_primitives::ValueKind;
use std::{
    collections::{BTreeMap, btree_map::Entry},
    sync::{Arc, RwLock},
};

///
/// Registration
///

#[derive(Debug)]
struct Registration {
    schema: Arc<Schema>,
    fingerprint: u64,
    loaded: bool,
}

///
/// MemoryStore
///
/// In-process record store.
///
/// Schemas are registered once per id under a write lock. A registered schema
/// can be unloaded to model a store that knows a schema but does not have it
/// resident; lookups then miss until it is loaded or created again.
/// Measurable values are kept in the base unit of their category.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    schemas: RwLock<BTreeMap<SchemaId, Registration>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered schemas, resident or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas
            .read()
            .expect("schema registry lock poisoned")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark a registered schema as not resident. Returns false if unknown.
    pub fn unload_schema(&self, id: SchemaId) -> bool {
        self.set_loaded(id, false)
    }

    /// Mark a registered schema as resident again. Returns false if unknown.
    pub fn load_schema(&self, id: SchemaId) -> bool {
        self.set_loaded(id, true)
    }

    fn set_loaded(&self, id: SchemaId, loaded: bool) -> bool {
        let mut schemas = self.schemas.write().expect("schema registry lock poisoned");

        schemas
            .get_mut(&id)
            .map(|registration| registration.loaded = loaded)
            .is_some()
    }

    fn check_owner(entity: &Entity, field: &Field) -> Result<(), StoreError> {
        if entity.schema().field(field.name()) == Some(field) {
            Ok(())
        } else {
            Err(StoreError::ForeignField {
                schema: entity.schema().name().to_string(),
                field: field.name().to_string(),
            })
        }
    }

    fn check_unit(&self, field: &Field, unit: Option<DisplayUnit>) -> Result<(), StoreError> {
        match (field.unit(), unit) {
            (None, None) => Ok(()),
            (None, Some(_)) => Err(StoreError::UnexpectedUnit {
                field: field.name().to_string(),
            }),
            (Some(_), None) => Err(StoreError::MissingUnit {
                field: field.name().to_string(),
            }),
            (Some(_), Some(unit)) if self.is_compatible_unit(field, unit) => Ok(()),
            (Some(_), Some(unit)) => Err(StoreError::IncompatibleUnit {
                field: field.name().to_string(),
                unit,
            }),
        }
    }
}

impl RecordStore for MemoryStore {
    fn lookup_schema(&self, id: SchemaId) -> Option<Arc<Schema>> {
        let schemas = self.schemas.read().expect("schema registry lock poisoned");

        schemas
            .get(&id)
            .filter(|registration| registration.loaded)
            .map(|registration| Arc::clone(&registration.schema))
    }

    fn create_schema(&self, schema: Schema) -> Result<Arc<Schema>, StoreError> {
        let fingerprint = schema.fingerprint();
        let mut schemas = self.schemas.write().expect("schema registry lock poisoned");

        match schemas.entry(schema.id()) {
            Entry::Occupied(mut occupied) => {
                let registration = occupied.get_mut();
                if registration.fingerprint != fingerprint || *registration.schema != schema {
                    return Err(StoreError::SchemaConflict { id: schema.id() });
                }
                registration.loaded = true;

                Ok(Arc::clone(&registration.schema))
            }
            Entry::Vacant(vacant) => {
                let schema = Arc::new(schema);
                vacant.insert(Registration {
                    schema: Arc::clone(&schema),
                    fingerprint,
                    loaded: true,
                });

                Ok(schema)
            }
        }
    }

    fn get(
        &self,
        entity: &Entity,
        field: &Field,
        unit: Option<DisplayUnit>,
    ) -> Result<Option<Value>, StoreError> {
        Self::check_owner(entity, field)?;
        self.check_unit(field, unit)?;

        let value = entity.raw_slot(field.name()).cloned();

        Ok(match unit {
            Some(unit) => value.map(|v| v.map_measure(&|x| unit.from_internal(x))),
            None => value,
        })
    }

    fn set(
        &self,
        entity: &mut Entity,
        field: &Field,
        value: Value,
        unit: Option<DisplayUnit>,
    ) -> Result<(), StoreError> {
        Self::check_owner(entity, field)?;
        self.check_unit(field, unit)?;
        check_value(field, &value)?;

        let value = match unit {
            Some(unit) => value.map_measure(&|x| unit.to_internal(x)),
            None => value,
        };
        entity.set_raw_slot(field.name(), value);

        Ok(())
    }
}

// Validate a value against the field's shape and element types.
fn check_value(field: &Field, value: &Value) -> Result<(), StoreError> {
    match (field.shape(), value) {
        (FieldShape::Scalar(ty), scalar) if !scalar.is_container() => {
            check_element(field, *ty, scalar)
        }
        (FieldShape::Sequence(ty), Value::List(items)) => items
            .iter()
            .try_for_each(|item| check_element(field, *ty, item)),
        (FieldShape::Associative { key, value: ty }, Value::Map(entries)) => {
            entries.iter().try_for_each(|(k, v)| {
                check_element(field, *key, k)?;
                check_element(field, *ty, v)
            })
        }
        (shape, other) => Err(mismatch(field, shape.to_string(), other)),
    }
}

fn check_element(field: &Field, ty: FieldType, value: &Value) -> Result<(), StoreError> {
    let FieldType::Stored(kind) = ty else {
        return Err(mismatch(field, ty.to_string(), value));
    };
    if value.kind() != Some(kind) {
        return Err(mismatch(field, kind.to_string(), value));
    }

    if kind == ValueKind::Entity {
        let nested = value.as_entity().map(Entity::schema_id);
        if let (Some(expected), Some(found)) = (field.sub_schema(), nested)
            && expected != found
        {
            return Err(StoreError::ValueMismatch {
                field: field.name().to_string(),
                expected: format!("entity of schema {expected}"),
                found: format!("entity of schema {found}"),
            });
        }
    }

    Ok(())
}

fn mismatch(field: &Field, expected: String, found: &Value) -> StoreError {
    StoreError::ValueMismatch {
        field: field.name().to_string(),
        expected,
        found: found.type_label().to_string(),
    }
}
