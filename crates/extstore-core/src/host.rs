//! Hosts that carry entities, at most one per schema.

use crate::{
    convert::RecordConverter,
    entity::Entity,
    error::Error,
    metadata::{SchemaAttr, extract},
    store::RecordStore,
    traits::Record,
    types::{ElementId, SchemaId},
};
use std::collections::BTreeMap;

///
/// EntityHost
///
/// An object entities can be attached to, keyed by schema id.
///

pub trait EntityHost {
    /// Attach `entity`, replacing any entity of the same schema.
    fn attach_entity(&mut self, entity: Entity);

    fn entity(&self, schema: SchemaId) -> Option<&Entity>;

    /// Remove the entity of `schema`. Returns false if none was attached.
    fn detach_entity(&mut self, schema: SchemaId) -> bool;
}

///
/// Element
///
/// In-memory host identified by an `ElementId`.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    id: ElementId,
    entities: BTreeMap<SchemaId, Entity>,
}

impl Element {
    #[must_use]
    pub const fn new(id: ElementId) -> Self {
        Self {
            id,
            entities: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Schemas of the attached entities, in id order.
    pub fn schemas(&self) -> impl Iterator<Item = SchemaId> + '_ {
        self.entities.keys().copied()
    }
}

impl EntityHost for Element {
    fn attach_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.schema_id(), entity);
    }

    fn entity(&self, schema: SchemaId) -> Option<&Entity> {
        self.entities.get(&schema)
    }

    fn detach_entity(&mut self, schema: SchemaId) -> bool {
        self.entities.remove(&schema).is_some()
    }
}

///
/// EntityHostExt
///
/// Record-level access on any host.
///

pub trait EntityHostExt: EntityHost {
    /// Convert `record` and attach the resulting entity.
    fn set_record<R: Record>(
        &mut self,
        converter: &RecordConverter<'_>,
        record: &R,
    ) -> Result<(), Error> {
        let entity = converter.to_entity(record)?;
        self.attach_entity(entity);

        Ok(())
    }

    /// Read back a record of type `R`. `None` when the store does not know
    /// the schema or no entity of it is attached.
    fn get_record<R: Record>(&self, converter: &RecordConverter<'_>) -> Result<Option<R>, Error> {
        let id = schema_id_of::<R>()?;
        if converter.store().lookup_schema(id).is_none() {
            return Ok(None);
        }

        self.entity(id)
            .map(|entity| converter.from_entity::<R>(entity))
            .transpose()
    }

    /// Detach the entity of `R`'s schema. Returns false when the store does
    /// not know the schema or nothing was attached.
    fn delete_record<R: Record>(&mut self, store: &dyn RecordStore) -> Result<bool, Error> {
        let id = schema_id_of::<R>()?;
        if store.lookup_schema(id).is_none() {
            return Ok(false);
        }

        Ok(self.detach_entity(id))
    }
}

impl<H: EntityHost + ?Sized> EntityHostExt for H {}

fn schema_id_of<R: Record>() -> Result<SchemaId, Error> {
    let ty = R::record_type();

    extract::<SchemaAttr>(&ty).map(|attr| attr.id)
}

///
/// TESTS
///
