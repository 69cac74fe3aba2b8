//! Derive a `Schema` from a record type's metadata.

use crate::{
    classify::classify,
    error::Error,
    metadata::{FieldAttr, SchemaAttr, extract, find},
    reflect::{Property, TypeInfo},
    schema::{Field, Schema, SchemaBuilder},
    traits::Record,
};

/// Build the schema descriptor of record type `R`.
pub fn build_schema<R: Record>() -> Result<Schema, Error> {
    build_schema_from(&R::record_type(), &R::properties())
}

/// Build a schema descriptor from a type description and its properties.
///
/// Properties without a `FieldAttr` are skipped. A unit category is kept only
/// when the field's value kind is measurable; resolving a concrete display
/// unit is left to conversion.
pub fn build_schema_from(ty: &TypeInfo, properties: &[Property]) -> Result<Schema, Error> {
    let attr = extract::<SchemaAttr>(ty)?;
    let mut builder = SchemaBuilder::from_attr(attr);

    for property in properties {
        let Some(field_attr) = find::<FieldAttr>(property) else {
            continue;
        };
        builder.push_field(build_field(property, field_attr)?)?;
    }

    Ok(builder.finish()?)
}

fn build_field(property: &Property, attr: &FieldAttr) -> Result<Field, Error> {
    let classification = classify(property.ty())?;
    let mut field = Field::new(property.name(), classification.shape);

    if let Some(id) = classification.sub_schema {
        field = field.with_sub_schema(id);
    }
    if let Some(documentation) = &attr.documentation {
        field = field.with_documentation(documentation.clone());
    }

    let measurable = field.value_type().kind().is_some_and(|kind| kind.needs_units());
    if let Some(unit) = attr.unit.filter(|_| measurable) {
        field = field.with_unit(unit);
    }

    Ok(field)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        metadata::Annotation,
        reflect::Capability,
        schema::{FieldShape, FieldType},
        types::SchemaId,
        units::UnitCategory,
    };
    use extstore_primitives::ValueKind;

    fn record_type(name: &'static str, raw: u128) -> TypeInfo {
        TypeInfo::declared(
            name,
            vec![Annotation::Schema(
                SchemaAttr::new(SchemaId::from_u128(raw), name).with_documentation("a record"),
            )],
        )
    }

    fn marked(name: &'static str, ty: TypeInfo, attr: FieldAttr) -> Property {
        Property::new(name, ty, vec![Annotation::Field(attr)])
    }

    fn f64_type() -> TypeInfo {
        TypeInfo::primitive("f64", ValueKind::Float64)
    }

    #[test]
    fn unmarked_properties_are_excluded() {
        let props = [
            marked("kept", TypeInfo::primitive("i32", ValueKind::Int32), FieldAttr::default()),
            Property::new("skipped", TypeInfo::primitive("i32", ValueKind::Int32), Vec::new()),
        ];
        let schema = build_schema_from(&record_type("Rec", 1), &props).expect("schema");

        assert_eq!(schema.fields().len(), 1);
        assert_eq!(schema.fields()[0].name(), "kept");
        assert_eq!(schema.documentation(), Some("a record"));
    }

    #[test]
    fn missing_type_metadata_fails() {
        let err = build_schema_from(&TypeInfo::declared("Bare", Vec::new()), &[])
            .expect_err("missing metadata");

        assert!(matches!(err, Error::MissingMetadata { .. }));
    }

    #[test]
    fn units_attach_only_to_measurable_fields() {
        let props = [
            marked(
                "length",
                f64_type(),
                FieldAttr::default().with_unit(UnitCategory::Length),
            ),
            marked(
                "count",
                TypeInfo::primitive("i32", ValueKind::Int32),
                FieldAttr::default().with_unit(UnitCategory::Length),
            ),
            marked("ratio", f64_type(), FieldAttr::default()),
        ];
        let schema = build_schema_from(&record_type("Units", 2), &props).expect("schema");

        assert_eq!(schema.fields()[0].unit(), Some(UnitCategory::Length));
        assert_eq!(schema.fields()[1].unit(), None);
        assert_eq!(schema.fields()[2].unit(), None);
    }

    #[test]
    fn nested_sequences_carry_sub_schema() {
        let props = [marked(
            "children",
            TypeInfo::generic(
                "Vec<Child>",
                vec![record_type("Child", 9)],
                vec![Capability::Sequence],
            ),
            FieldAttr::default().with_documentation("kids"),
        )];
        let schema = build_schema_from(&record_type("Parent", 3), &props).expect("schema");
        let field = &schema.fields()[0];

        assert_eq!(field.shape(), &FieldShape::Sequence(FieldType::Stored(ValueKind::Entity)));
        assert_eq!(field.sub_schema(), Some(SchemaId::from_u128(9)));
        assert_eq!(field.documentation(), Some("kids"));
    }

    #[test]
    fn unsupported_generic_fails_the_build() {
        let props = [marked(
            "pairs",
            TypeInfo::generic(
                "Pair<i32, i32>",
                vec![
                    TypeInfo::primitive("i32", ValueKind::Int32),
                    TypeInfo::primitive("i32", ValueKind::Int32),
                ],
                Vec::new(),
            ),
            FieldAttr::default(),
        )];
        let err = build_schema_from(&record_type("Bad", 4), &props).expect_err("unsupported");

        assert!(matches!(err, Error::UnsupportedShape { ty } if ty == "Pair<i32, i32>"));
    }

    #[test]
    fn same_type_builds_identical_descriptors() {
        let props = [marked("x", f64_type(), FieldAttr::default())];
        let a = build_schema_from(&record_type("Same", 5), &props).expect("a");
        let b = build_schema_from(&record_type("Same", 5), &props).expect("b");

        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
