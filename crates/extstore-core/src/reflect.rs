//! Static type descriptions standing in for runtime reflection.
//!
//! Every `Storable` type describes itself with a `TypeInfo`; record types add
//! their annotation bag and a property list. The classifier and the schema
//! builder work purely on these descriptions.

use crate::metadata::{Annotated, Annotation, SchemaAttr, find};
use extstore_primitives::ValueKind;

///
/// Capability
///
/// Container capability a generic type advertises.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Capability {
    /// Ordered, index-addressable collection of one element type.
    Sequence,
    /// Key/value collection.
    Associative,
}

impl Capability {
    /// Order in which the classifier probes capabilities; the first match wins.
    pub const SCAN_ORDER: [Self; 2] = [Self::Associative, Self::Sequence];

    /// Number of type parameters the capability requires.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Sequence => 1,
            Self::Associative => 2,
        }
    }
}

///
/// TypeKind
///

#[derive(Clone, Debug, PartialEq)]
pub enum TypeKind {
    /// A store primitive.
    Primitive(ValueKind),
    /// A user type with declarative metadata (possibly none).
    Declared(Vec<Annotation>),
    /// A parameterised type and the capabilities it implements.
    Generic {
        params: Vec<TypeInfo>,
        capabilities: Vec<Capability>,
    },
    /// Anything the store has no representation for.
    Opaque,
}

///
/// TypeInfo
///

#[derive(Clone, Debug, PartialEq)]
pub struct TypeInfo {
    name: &'static str,
    kind: TypeKind,
}

impl TypeInfo {
    #[must_use]
    pub const fn primitive(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind: TypeKind::Primitive(kind),
        }
    }

    #[must_use]
    pub const fn declared(name: &'static str, annotations: Vec<Annotation>) -> Self {
        Self {
            name,
            kind: TypeKind::Declared(annotations),
        }
    }

    #[must_use]
    pub const fn generic(
        name: &'static str,
        params: Vec<Self>,
        capabilities: Vec<Capability>,
    ) -> Self {
        Self {
            name,
            kind: TypeKind::Generic {
                params,
                capabilities,
            },
        }
    }

    #[must_use]
    pub const fn opaque(name: &'static str) -> Self {
        Self {
            name,
            kind: TypeKind::Opaque,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// True when the type carries record-level schema metadata.
    #[must_use]
    pub fn is_record(&self) -> bool {
        find::<SchemaAttr>(self).is_some()
    }
}

impl Annotated for TypeInfo {
    fn target_name(&self) -> &str {
        self.name
    }

    fn annotations(&self) -> &[Annotation] {
        match &self.kind {
            TypeKind::Declared(annotations) => annotations,
            _ => &[],
        }
    }
}

///
/// Property
///
/// One public instance property of a record type, in declaration order.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    name: &'static str,
    ty: TypeInfo,
    annotations: Vec<Annotation>,
}

impl Property {
    #[must_use]
    pub const fn new(name: &'static str, ty: TypeInfo, annotations: Vec<Annotation>) -> Self {
        Self {
            name,
            ty,
            annotations,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn ty(&self) -> &TypeInfo {
        &self.ty
    }
}

impl Annotated for Property {
    fn target_name(&self) -> &str {
        self.name
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
