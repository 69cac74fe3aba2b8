use crate::{
    convert::{Context, RecordConverter},
    entity::Entity,
    error::Error,
    metadata::{SchemaAttr, extract},
    reflect::TypeInfo,
    store::StoreError,
    traits::Record,
    types::SchemaId,
};
use std::{
    any::{Any, type_name},
    collections::BTreeMap,
    fmt,
};

type DecodeFn = fn(&RecordConverter<'_>, &Entity) -> Result<Box<dyn Any>, Error>;

///
/// RecordKind
///
/// Type-erased handle on a record type, used when the target type of a
/// conversion is only known at runtime.
///

#[derive(Clone, Copy)]
pub struct RecordKind {
    type_name: &'static str,
    record_type: fn() -> TypeInfo,
    decode: DecodeFn,
}

impl RecordKind {
    #[must_use]
    pub fn of<R: Record>() -> Self {
        Self {
            type_name: type_name::<R>(),
            record_type: R::record_type,
            decode: decode_boxed::<R>,
        }
    }

    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[must_use]
    pub fn record_type(&self) -> TypeInfo {
        (self.record_type)()
    }

    pub fn schema_id(&self) -> Result<SchemaId, Error> {
        let ty = self.record_type();

        extract::<SchemaAttr>(&ty).map(|attr| attr.id)
    }

    pub(crate) fn decode(
        &self,
        converter: &RecordConverter<'_>,
        entity: &Entity,
    ) -> Result<Box<dyn Any>, Error> {
        (self.decode)(converter, entity)
    }
}

impl fmt::Debug for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordKind")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

fn decode_boxed<R: Record>(
    converter: &RecordConverter<'_>,
    entity: &Entity,
) -> Result<Box<dyn Any>, Error> {
    let mut cx = Context::new(converter);

    converter
        .from_entity_in::<R>(entity, &mut cx)
        .map(|record| Box::new(record) as Box<dyn Any>)
}

///
/// RecordRegistry
///
/// Record kinds keyed by schema id, for decoding entities of mixed schemas.
///

#[derive(Debug, Default)]
pub struct RecordRegistry {
    kinds: BTreeMap<SchemaId, RecordKind>,
}

impl RecordRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `R` under its schema id. Registering the same type twice is a
    /// no-op; a second type claiming the same id is a conflict.
    pub fn register<R: Record>(&mut self) -> Result<(), Error> {
        let kind = RecordKind::of::<R>();
        let id = kind.schema_id()?;

        if let Some(existing) = self.kinds.get(&id)
            && existing.type_name != kind.type_name
        {
            return Err(StoreError::SchemaConflict { id }.into());
        }
        self.kinds.insert(id, kind);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: SchemaId) -> Option<&RecordKind> {
        self.kinds.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: SchemaId) -> bool {
        self.kinds.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Decode `entity` with the kind registered for its schema, if any.
    pub fn decode(
        &self,
        converter: &RecordConverter<'_>,
        entity: &Entity,
    ) -> Result<Option<Box<dyn Any>>, Error> {
        match self.kinds.get(&entity.schema_id()) {
            Some(kind) => converter.from_entity_dyn(entity, kind).map(Some),
            None => Ok(None),
        }
    }
}
