//! Field-shape classification.
//!
//! A property type is Associative or Sequence when it advertises the matching
//! capability with the right number of type parameters, and Scalar when it is
//! not generic at all. Capabilities are probed in `Capability::SCAN_ORDER`, so
//! a type advertising both is classified as Associative.

use crate::{
    error::Error,
    metadata::{SchemaAttr, find},
    reflect::{Capability, TypeInfo, TypeKind},
    schema::{FieldShape, FieldType},
    types::SchemaId,
};
use extstore_primitives::ValueKind;

///
/// Classification
///
/// Shape of a property plus the nested schema its values reference, if any.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Classification {
    pub shape: FieldShape,
    pub sub_schema: Option<SchemaId>,
}

/// Classify a property type into a field shape.
pub fn classify(ty: &TypeInfo) -> Result<Classification, Error> {
    if let TypeKind::Generic {
        params,
        capabilities,
    } = ty.kind()
    {
        return classify_generic(ty, params, capabilities);
    }

    let (value, sub_schema) = resolve_element(ty);

    Ok(Classification {
        shape: FieldShape::Scalar(value),
        sub_schema,
    })
}

fn classify_generic(
    ty: &TypeInfo,
    params: &[TypeInfo],
    capabilities: &[Capability],
) -> Result<Classification, Error> {
    let capability = Capability::SCAN_ORDER
        .into_iter()
        .find(|cap| capabilities.contains(cap) && params.len() == cap.arity())
        .ok_or_else(|| Error::UnsupportedShape {
            ty: ty.name().to_string(),
        })?;

    let classification = match (capability, params) {
        (Capability::Associative, [key, value]) => {
            let (value, sub_schema) = resolve_element(value);
            Classification {
                shape: FieldShape::Associative {
                    key: resolve_key(key),
                    value,
                },
                sub_schema,
            }
        }
        (Capability::Sequence, [element]) => {
            let (element, sub_schema) = resolve_element(element);
            Classification {
                shape: FieldShape::Sequence(element),
                sub_schema,
            }
        }
        _ => {
            return Err(Error::UnsupportedShape {
                ty: ty.name().to_string(),
            });
        }
    };

    Ok(classification)
}

// Resolve the stored type of a scalar value, sequence element, or map value.
fn resolve_element(ty: &TypeInfo) -> (FieldType, Option<SchemaId>) {
    match ty.kind() {
        TypeKind::Primitive(kind) => (FieldType::Stored(*kind), None),
        TypeKind::Declared(_) => match find::<SchemaAttr>(ty) {
            Some(attr) => (FieldType::Stored(ValueKind::Entity), Some(attr.id)),
            None => (FieldType::Unsupported(ty.name()), None),
        },
        TypeKind::Generic { .. } | TypeKind::Opaque => (FieldType::Unsupported(ty.name()), None),
    }
}

// Map keys are copied as-is, so only keyable primitives are storable.
fn resolve_key(ty: &TypeInfo) -> FieldType {
    match ty.kind() {
        TypeKind::Primitive(kind) if kind.is_keyable() => FieldType::Stored(*kind),
        _ => FieldType::Unsupported(ty.name()),
    }
}

///
/// TESTS
///
