use super::*;
use crate::units::UnitCategory;
use extstore_primitives::ValueKind;

fn id(raw: u128) -> SchemaId {
    SchemaId::from_u128(raw)
}

fn sample() -> Schema {
    SchemaBuilder::new(id(1))
        .name("Sample")
        .documentation("sample schema")
        .field(Field::scalar("count", ValueKind::Int32))
        .and_then(|b| b.field(Field::scalar("length", ValueKind::Float64).with_unit(UnitCategory::Length)))
        .and_then(|b| b.field(Field::map("tags", ValueKind::Text, ValueKind::Int16)))
        .and_then(SchemaBuilder::finish)
        .expect("valid schema")
}

#[test]
fn builder_keeps_declaration_order() {
    let schema = sample();
    let names: Vec<_> = schema.fields().iter().map(Field::name).collect();

    assert_eq!(names, ["count", "length", "tags"]);
    assert_eq!(schema.field("length").and_then(Field::unit), Some(UnitCategory::Length));
    assert!(schema.field("missing").is_none());
}

#[test]
fn duplicate_field_names_are_rejected() {
    let err = SchemaBuilder::new(id(2))
        .name("Dup")
        .field(Field::scalar("a", ValueKind::Bool))
        .and_then(|b| b.field(Field::scalar("a", ValueKind::Int32)))
        .expect_err("duplicate must fail");

    assert_eq!(
        err,
        SchemaError::DuplicateField {
            schema: "Dup".to_string(),
            field: "a".to_string(),
        }
    );
}

#[test]
fn finish_requires_a_valid_name() {
    let missing = SchemaBuilder::new(id(3)).finish().expect_err("no name");
    assert_eq!(missing, SchemaError::MissingName { id: id(3) });

    let invalid = SchemaBuilder::new(id(3))
        .name("has space")
        .finish()
        .expect_err("bad name");
    assert!(matches!(invalid, SchemaError::InvalidSchemaName { .. }));
}

#[test]
fn field_names_are_validated() {
    let err = SchemaBuilder::new(id(4))
        .name("Ok")
        .field(Field::scalar("9lives", ValueKind::Int32))
        .expect_err("bad field name");

    assert!(matches!(err, SchemaError::InvalidFieldName { .. }));
}

#[test]
fn fingerprint_tracks_layout() {
    let a = sample();
    let b = sample();
    assert_eq!(a.fingerprint(), b.fingerprint());

    let changed = SchemaBuilder::new(id(1))
        .name("Sample")
        .field(Field::scalar("count", ValueKind::Int16))
        .and_then(SchemaBuilder::finish)
        .expect("valid schema");
    assert_ne!(a.fingerprint(), changed.fingerprint());
}

#[test]
fn shapes_render_their_element_types() {
    let field = Field::map("m", ValueKind::Guid, FieldType::Unsupported("u64"));

    assert_eq!(field.shape().to_string(), "map<guid, unsupported(u64)>");
    assert_eq!(field.key_type(), Some(FieldType::Stored(ValueKind::Guid)));
    assert_eq!(field.shape().label(), "associative");
}

#[test]
fn schema_serializes_for_inspection() {
    let json = serde_json::to_value(sample()).expect("serialize");

    assert_eq!(json["name"], "Sample");
    assert_eq!(json["read_access"], "Public");
    assert_eq!(json["fields"][0]["shape"]["scalar"], "int32");
    assert_eq!(json["fields"][1]["unit"], "Length");
    assert_eq!(json["fields"][2]["shape"]["associative"]["key"], "text");
    assert!(json.get("application_id").is_none());
}
