//! Declarative metadata attached to record types and their properties.
//!
//! `extract` is the single lookup used by the schema builder and the
//! converter: it returns the first annotation of the requested kind or a
//! `MissingMetadata` error naming the target.

#[cfg(test)]
mod tests;

use crate::{
    error::Error,
    types::{AccessLevel, Guid, SchemaId},
    units::UnitCategory,
};
use derive_more::Display;

///
/// AnnotationKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum AnnotationKind {
    #[display("schema")]
    Schema,
    #[display("field")]
    Field,
}

///
/// Annotation
///
/// One declarative attribute as seen at runtime.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Schema(SchemaAttr),
    Field(FieldAttr),
}

impl Annotation {
    #[must_use]
    pub const fn kind(&self) -> AnnotationKind {
        match self {
            Self::Schema(_) => AnnotationKind::Schema,
            Self::Field(_) => AnnotationKind::Field,
        }
    }
}

///
/// SchemaAttr
///
/// Type-level record metadata: identity, naming and access policy.
///

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaAttr {
    pub id: SchemaId,
    pub name: String,
    pub documentation: Option<String>,
    pub application_id: Option<Guid>,
    pub vendor_id: Option<String>,
    pub read_access: AccessLevel,
    pub write_access: AccessLevel,
}

impl SchemaAttr {
    pub fn new(id: SchemaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            documentation: None,
            application_id: None,
            vendor_id: None,
            read_access: AccessLevel::default(),
            write_access: AccessLevel::default(),
        }
    }

    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    #[must_use]
    pub const fn with_application_id(mut self, application_id: Guid) -> Self {
        self.application_id = Some(application_id);
        self
    }

    #[must_use]
    pub fn with_vendor_id(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = Some(vendor_id.into());
        self
    }

    #[must_use]
    pub const fn with_access(mut self, read: AccessLevel, write: AccessLevel) -> Self {
        self.read_access = read;
        self.write_access = write;
        self
    }
}

///
/// FieldAttr
///
/// Property-level opt-in marker. Only properties carrying one are persisted.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldAttr {
    pub documentation: Option<String>,
    pub unit: Option<UnitCategory>,
}

impl FieldAttr {
    #[must_use]
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    #[must_use]
    pub const fn with_unit(mut self, unit: UnitCategory) -> Self {
        self.unit = Some(unit);
        self
    }
}

///
/// AnnotationView
///
/// Typed projection of an `Annotation` variant.
///

pub trait AnnotationView: Sized {
    const KIND: AnnotationKind;

    fn view(annotation: &Annotation) -> Option<&Self>;
}

impl AnnotationView for SchemaAttr {
    const KIND: AnnotationKind = AnnotationKind::Schema;

    fn view(annotation: &Annotation) -> Option<&Self> {
        match annotation {
            Annotation::Schema(attr) => Some(attr),
            Annotation::Field(_) => None,
        }
    }
}

impl AnnotationView for FieldAttr {
    const KIND: AnnotationKind = AnnotationKind::Field;

    fn view(annotation: &Annotation) -> Option<&Self> {
        match annotation {
            Annotation::Field(attr) => Some(attr),
            Annotation::Schema(_) => None,
        }
    }
}

///
/// Annotated
///
/// Anything that carries an annotation bag: a type or one of its properties.
///

pub trait Annotated {
    /// Name used in diagnostics.
    fn target_name(&self) -> &str;

    fn annotations(&self) -> &[Annotation];
}

/// Return the first annotation of kind `A` on `target`, failing when absent.
pub fn extract<A: AnnotationView>(target: &(impl Annotated + ?Sized)) -> Result<&A, Error> {
    target
        .annotations()
        .iter()
        .find(|annotation| annotation.kind() == A::KIND)
        .and_then(A::view)
        .ok_or_else(|| Error::missing_metadata(target.target_name(), A::KIND))
}

/// Non-failing variant of [`extract`].
pub fn find<A: AnnotationView>(target: &(impl Annotated + ?Sized)) -> Option<&A> {
    target
        .annotations()
        .iter()
        .find(|annotation| annotation.kind() == A::KIND)
        .and_then(A::view)
}
