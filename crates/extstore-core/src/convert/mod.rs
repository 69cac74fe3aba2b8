//! Record/entity conversion.
//!
//! `RecordConverter` resolves (or creates) the schema of a record type and
//! copies persisted properties to and from store entities. Nested records
//! recurse through `Context`, which carries the nesting depth and the field
//! currently being converted.

mod registry;


use crate::{
    build::build_schema_from,
    config::ConvertConfig,
    entity::Entity,
    error::Error,
    metadata::{SchemaAttr, extract},
    obs::{ConvertEvent, OmitReason, sink},
    schema::{Field, FieldShape, FieldType, Schema},
    store::RecordStore,
    traits::Record,
    units::{ALL_DISPLAY_UNITS, DisplayUnit},
    value::Value,
};
use extstore_primitives::ValueKind;
use std::{
    any::{Any, type_name},
    mem,
    sync::Arc,
};

// re-exports
pub use registry::{RecordKind, RecordRegistry};

///
/// Context
///
/// Per-call conversion state threaded through `Storable` implementations.
///

pub struct Context<'a> {
    converter: &'a RecordConverter<'a>,
    depth: usize,
    field: String,
}

impl<'a> Context<'a> {
    pub(crate) const fn new(converter: &'a RecordConverter<'a>) -> Self {
        Self {
            converter,
            depth: 0,
            field: String::new(),
        }
    }

    /// Name of the field being converted; empty outside a record.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Current record nesting depth; the top-level record is depth 1.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub const fn converter(&self) -> &'a RecordConverter<'a> {
        self.converter
    }

    /// Convert a nested record into an entity value.
    pub fn serialize_nested<R: Record>(&mut self, record: &R) -> Result<Value, Error> {
        let converter = self.converter;
        let field = mem::take(&mut self.field);
        let result = converter.to_entity_in(record, self);
        self.field = field;

        result.map(Value::from)
    }

    /// Rebuild a nested record from an entity value.
    pub fn deserialize_nested<R: Record>(&mut self, value: Value) -> Result<R, Error> {
        let entity = match value {
            Value::Entity(entity) => entity,
            other => return Err(Error::value_mismatch(ValueKind::Entity, &other)),
        };

        let converter = self.converter;
        let field = mem::take(&mut self.field);
        let result = converter.from_entity_in::<R>(&entity, self);
        self.field = field;

        result
    }

    fn set_field(&mut self, name: &str) {
        self.field.clear();
        self.field.push_str(name);
    }

    fn enter(&mut self, schema: &str, limit: usize) -> Result<(), Error> {
        if self.depth >= limit {
            return Err(Error::NestingTooDeep {
                schema: schema.to_string(),
                limit,
            });
        }
        self.depth += 1;

        Ok(())
    }

    const fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

///
/// RecordConverter
///
/// Bidirectional mapping between record instances and store entities.
/// Stateless apart from its configuration; the store owns every schema.
///

pub struct RecordConverter<'s> {
    store: &'s dyn RecordStore,
    config: ConvertConfig,
}

impl<'s> RecordConverter<'s> {
    #[must_use]
    pub fn new(store: &'s dyn RecordStore) -> Self {
        Self::with_config(store, ConvertConfig::default())
    }

    #[must_use]
    pub const fn with_config(store: &'s dyn RecordStore, config: ConvertConfig) -> Self {
        Self { store, config }
    }

    /// Enable `[debug]` tracing for this converter.
    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    #[must_use]
    pub fn store(&self) -> &'s dyn RecordStore {
        self.store
    }

    #[must_use]
    pub const fn config(&self) -> &ConvertConfig {
        &self.config
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.config.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    /// Resolve the schema of `R`: reuse the store's registration when one is
    /// resident, otherwise build the descriptor and create it.
    pub fn schema_for<R: Record>(&self) -> Result<Arc<Schema>, Error> {
        let result = self.resolve_schema::<R>();

        self.observe::<R, _>(result)
    }

    /// Convert a record into a new entity of its schema.
    pub fn to_entity<R: Record>(&self, record: &R) -> Result<Entity, Error> {
        let mut cx = Context::new(self);
        let result = self.to_entity_in(record, &mut cx);

        self.observe::<R, _>(result)
    }

    /// Rebuild a record from an entity of its schema.
    pub fn from_entity<R: Record>(&self, entity: &Entity) -> Result<R, Error> {
        let mut cx = Context::new(self);
        let result = self.from_entity_in::<R>(entity, &mut cx);

        self.observe::<R, _>(result)
    }

    /// Rebuild a record whose type is only known at runtime.
    pub fn from_entity_dyn(&self, entity: &Entity, kind: &RecordKind) -> Result<Box<dyn Any>, Error> {
        let result = kind.decode(self, entity);
        if let Err(err) = &result {
            self.report_failure(kind.type_name(), err);
        }

        result
    }

    pub(crate) fn to_entity_in<R: Record>(
        &self,
        record: &R,
        cx: &mut Context<'_>,
    ) -> Result<Entity, Error> {
        let schema = self.resolve_schema::<R>()?;

        cx.enter(schema.name(), self.config.max_depth)?;
        let result = self.write_fields(record, &schema, cx);
        cx.leave();

        result
    }

    pub(crate) fn from_entity_in<R: Record>(
        &self,
        entity: &Entity,
        cx: &mut Context<'_>,
    ) -> Result<R, Error> {
        let ty = R::record_type();
        let attr = extract::<SchemaAttr>(&ty)?;
        if attr.id != entity.schema_id() {
            return Err(Error::SchemaMismatch {
                expected: attr.id,
                found: entity.schema_id(),
            });
        }

        let schema = Arc::clone(entity.schema());
        cx.enter(schema.name(), self.config.max_depth)?;
        let result = self.read_fields::<R>(entity, &schema, cx);
        cx.leave();

        result
    }

    fn resolve_schema<R: Record>(&self) -> Result<Arc<Schema>, Error> {
        let ty = R::record_type();
        let attr = extract::<SchemaAttr>(&ty)?;

        if let Some(schema) = self.store.lookup_schema(attr.id) {
            sink::record(ConvertEvent::SchemaResolved {
                schema: schema.name(),
                created: false,
            });

            return Ok(schema);
        }

        let schema = build_schema_from(&ty, &R::properties())?;
        self.debug_log(format!(
            "creating schema '{}' ({}) with {} field(s)",
            schema.name(),
            schema.id(),
            schema.fields().len()
        ));
        let schema = self.store.create_schema(schema)?;
        sink::record(ConvertEvent::SchemaResolved {
            schema: schema.name(),
            created: true,
        });

        Ok(schema)
    }

    fn write_fields<R: Record>(
        &self,
        record: &R,
        schema: &Arc<Schema>,
        cx: &mut Context<'_>,
    ) -> Result<Entity, Error> {
        let mut entity = self.store.new_entity(schema);
        let mut written = 0u64;
        let mut omitted = 0u64;

        for field in schema.fields() {
            cx.set_field(field.name());
            // unsupported types are known from the layout; nothing is read
            check_field_types(field)?;

            let omission = match record.read_property(field.name(), cx)? {
                None => Some(OmitReason::Absent),
                Some(value) => {
                    check_shape(field, &value)?;

                    match self.empty_omission(&value) {
                        Some(reason) => Some(reason),
                        None => {
                            let unit = self.resolve_unit(field)?;
                            self.store.set(&mut entity, field, value, unit)?;
                            None
                        }
                    }
                }
            };

            match omission {
                Some(reason) => {
                    omitted += 1;
                    self.debug_log(format!(
                        "{}.{}: omitted ({reason})",
                        schema.name(),
                        field.name()
                    ));
                    sink::record(ConvertEvent::FieldOmitted {
                        schema: schema.name(),
                        field: field.name(),
                        reason,
                    });
                }
                None => written += 1,
            }
        }

        self.debug_log(format!(
            "wrote entity of '{}': {written} written, {omitted} omitted",
            schema.name()
        ));
        sink::record(ConvertEvent::EntityWritten {
            schema: schema.name(),
            written,
            omitted,
        });

        Ok(entity)
    }

    fn read_fields<R: Record>(
        &self,
        entity: &Entity,
        schema: &Schema,
        cx: &mut Context<'_>,
    ) -> Result<R, Error> {
        let mut record = R::default();
        let mut read = 0u64;
        let mut skipped = 0u64;

        for field in schema.fields() {
            cx.set_field(field.name());

            if let Some(sub) = field.sub_schema()
                && !self.store.is_schema_loaded(sub)
            {
                skipped += 1;
                self.debug_log(format!(
                    "{}.{}: sub-schema {sub} not loaded, skipped",
                    schema.name(),
                    field.name()
                ));
                sink::record(ConvertEvent::FieldOmitted {
                    schema: schema.name(),
                    field: field.name(),
                    reason: OmitReason::SubSchemaUnloaded,
                });
                continue;
            }

            let unit = self.resolve_unit(field)?;
            match self.store.get(entity, field, unit)? {
                Some(value) => {
                    record.write_property(field.name(), value, cx)?;
                    read += 1;
                }
                None => skipped += 1,
            }
        }

        self.debug_log(format!(
            "read entity of '{}': {read} read, {skipped} skipped",
            schema.name()
        ));
        sink::record(ConvertEvent::EntityRead {
            schema: schema.name(),
            read,
            skipped,
        });

        Ok(record)
    }

    // First catalog unit the store accepts for a measurable field.
    fn resolve_unit(&self, field: &Field) -> Result<Option<DisplayUnit>, Error> {
        let Some(category) = field.unit() else {
            return Ok(None);
        };

        ALL_DISPLAY_UNITS
            .into_iter()
            .find(|unit| self.store.is_compatible_unit(field, *unit))
            .map(Some)
            .ok_or_else(|| Error::UnresolvedUnit {
                field: field.name().to_string(),
                category,
            })
    }

    fn empty_omission(&self, value: &Value) -> Option<OmitReason> {
        if !value.is_empty_container() {
            return None;
        }

        match value {
            Value::Map(_) => self.config.omit_empty_maps.then_some(OmitReason::EmptyMap),
            _ => Some(OmitReason::EmptySequence),
        }
    }

    fn observe<R, T>(&self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(err) = &result {
            self.report_failure(type_name::<R>(), err);
        }

        result
    }

    fn report_failure(&self, record: &str, err: &Error) {
        self.debug_log(format!("{record}: {}", err.display_with_class()));
        sink::record(ConvertEvent::Failed {
            record,
            class: err.class(),
        });
    }
}

// Keys and values must resolve to store types before anything is written.
fn check_field_types(field: &Field) -> Result<(), Error> {
    for ty in field.key_type().into_iter().chain([field.value_type()]) {
        if let FieldType::Unsupported(name) = ty {
            return Err(Error::unsupported_type(field.name(), name));
        }
    }

    if let Some(FieldType::Stored(kind)) = field.key_type()
        && !kind.is_keyable()
    {
        return Err(Error::unsupported_type(field.name(), kind.label()));
    }

    Ok(())
}

fn check_shape(field: &Field, value: &Value) -> Result<(), Error> {
    let matches = match field.shape() {
        FieldShape::Scalar(_) => !value.is_container(),
        FieldShape::Sequence(_) => matches!(value, Value::List(_)),
        FieldShape::Associative { .. } => matches!(value, Value::Map(_)),
    };

    if matches {
        Ok(())
    } else {
        Err(Error::value_mismatch(field.shape(), value))
    }
}
