use super::*;
use crate::{
    error::ErrorClass,
    reflect::{Property, TypeInfo},
};
use extstore_primitives::ValueKind;

fn schema_attr(raw: u128, name: &str) -> SchemaAttr {
    SchemaAttr::new(SchemaId::from_u128(raw), name)
}

#[test]
fn extract_returns_first_matching_annotation() {
    let info = TypeInfo::declared(
        "Twice",
        vec![
            Annotation::Field(FieldAttr::default()),
            Annotation::Schema(schema_attr(1, "First")),
            Annotation::Schema(schema_attr(2, "Second")),
        ],
    );

    let attr = extract::<SchemaAttr>(&info).expect("schema attr");
    assert_eq!(attr.name, "First");
}

#[test]
fn extract_reports_missing_metadata_with_target() {
    let info = TypeInfo::declared("Bare", Vec::new());
    let err = extract::<SchemaAttr>(&info).expect_err("missing");

    assert_eq!(err.class(), ErrorClass::Metadata);
    assert_eq!(err.to_string(), "missing schema metadata on 'Bare'");
}

#[test]
fn primitives_never_carry_metadata() {
    let info = TypeInfo::primitive("i32", ValueKind::Int32);

    assert!(find::<SchemaAttr>(&info).is_none());
    assert!(!info.is_record());
}

#[test]
fn property_annotations_are_independent_of_the_type() {
    let prop = Property::new(
        "length",
        TypeInfo::primitive("f64", ValueKind::Float64),
        vec![Annotation::Field(
            FieldAttr::default()
                .with_documentation("overall length")
                .with_unit(UnitCategory::Length),
        )],
    );

    let attr = extract::<FieldAttr>(&prop).expect("field attr");
    assert_eq!(attr.unit, Some(UnitCategory::Length));
    assert_eq!(attr.documentation.as_deref(), Some("overall length"));
    assert!(extract::<SchemaAttr>(&prop).is_err());
}

#[test]
fn schema_attr_builders_fill_every_slot() {
    let attr = schema_attr(7, "Full")
        .with_documentation("docs")
        .with_vendor_id("ACME")
        .with_application_id(Guid(9))
        .with_access(AccessLevel::Vendor, AccessLevel::Application);

    assert_eq!(attr.vendor_id.as_deref(), Some("ACME"));
    assert_eq!(attr.read_access, AccessLevel::Vendor);
    assert_eq!(attr.write_access, AccessLevel::Application);
    assert_eq!(attr.application_id, Some(Guid(9)));
}
