use extstore::{
    Error,
    build::build_schema,
    metadata::AnnotationKind,
    prelude::*,
    types::AccessLevel,
};
use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
    thread,
};

#[derive(Debug, Default, Record)]
#[schema(
    guid = "5EJYX99M7DN0QRYV85B17FHAHR",
    name = "Column",
    documentation = "vertical member",
    application = "4J79SPK573QY8HMREVW8Q485CB",
    vendor = "ACME",
    read_access = "Public",
    write_access = "Vendor"
)]
pub struct Column {
    #[field(documentation = "member height", unit = "Length")]
    pub height: f64,

    #[field]
    pub mark: String,

    #[field(unit = "Length")]
    pub splices: Vec<f64>,

    #[field(unit = "Angle")]
    pub count: i32,

    pub notes: String,

    cache: u32,
}

#[derive(Debug, Default, Record)]
#[schema(guid = "0RY4TX4QTNE81K062GRPHRZNA7", name = "Tagged")]
pub struct Tagged {
    #[field]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Default, Record)]
#[schema(guid = "4GF9RC640JY0VVCK744A63HYS9", name = "Hashed")]
pub struct Hashed {
    #[field]
    pub ids: HashSet<i32>,
}

#[derive(Debug, Default, Record)]
pub struct Anonymous {
    #[field]
    pub value: i32,
}

#[test]
fn descriptor_reflects_type_metadata() {
    let schema = build_schema::<Column>().expect("schema");

    assert_eq!(schema.id().to_string(), "5EJYX99M7DN0QRYV85B17FHAHR");
    assert_eq!(schema.name(), "Column");
    assert_eq!(schema.documentation(), Some("vertical member"));
    assert_eq!(
        schema.application_id().map(|id| id.to_string()),
        Some("4J79SPK573QY8HMREVW8Q485CB".to_string())
    );
    assert_eq!(schema.vendor_id(), Some("ACME"));
    assert_eq!(schema.read_access(), AccessLevel::Public);
    assert_eq!(schema.write_access(), AccessLevel::Vendor);

    let names: Vec<_> = schema.fields().iter().map(Field::name).collect();
    assert_eq!(names, ["height", "mark", "splices", "count"]);
}

#[test]
fn descriptor_serializes_for_inspection() {
    let schema = build_schema::<Column>().expect("schema");
    let json = serde_json::to_value(&schema).expect("serialize");

    assert_eq!(json["id"], "5EJYX99M7DN0QRYV85B17FHAHR");
    assert_eq!(json["write_access"], "Vendor");
    assert_eq!(json["fields"][0]["shape"]["scalar"], "float64");
    assert_eq!(json["fields"][0]["unit"], "Length");
    assert_eq!(json["fields"][0]["documentation"], "member height");
    assert_eq!(json["fields"][2]["shape"]["sequence"], "float64");
    assert_eq!(json["fields"][2]["unit"], "Length");
    // units only stick to measurable kinds
    assert!(json["fields"][3].get("unit").is_none());
}

#[test]
fn private_and_unmarked_fields_are_invisible() {
    let properties = Column::properties();
    let names: Vec<_> = properties.iter().map(|p| p.name()).collect();

    assert!(names.contains(&"notes"));
    assert!(!names.contains(&"cache"));

    let schema = build_schema::<Column>().expect("schema");
    assert!(schema.field("notes").is_none());
}

#[test]
fn sets_are_not_storable_shapes() {
    let err = build_schema::<Tagged>().expect_err("btree set");
    assert!(matches!(err, Error::UnsupportedShape { ref ty } if ty.contains("BTreeSet")));

    let err = build_schema::<Hashed>().expect_err("hash set");
    assert!(matches!(err, Error::UnsupportedShape { ref ty } if ty.contains("HashSet")));
}

#[test]
fn missing_schema_metadata_is_reported() {
    let err = build_schema::<Anonymous>().expect_err("no metadata");

    assert!(matches!(
        err,
        Error::MissingMetadata {
            kind: AnnotationKind::Schema,
            ..
        }
    ));
    assert_eq!(err.class(), extstore::error::ErrorClass::Metadata);
}

#[test]
fn schema_identity_is_stable_across_converters() {
    let store = MemoryStore::new();

    let first = RecordConverter::new(&store)
        .schema_for::<Column>()
        .expect("first");
    let second = RecordConverter::new(&store)
        .schema_for::<Column>()
        .expect("second");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.len(), 1);
}

#[test]
fn concurrent_first_use_registers_one_schema() {
    let store = MemoryStore::new();

    let schemas: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    RecordConverter::new(&store)
                        .schema_for::<Column>()
                        .expect("schema")
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread"))
            .collect()
    });

    assert_eq!(store.len(), 1);
    assert!(schemas.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn two_parameter_generic_without_capability_fails() {
    #[derive(Debug, Default, Record)]
    #[schema(guid = "7CCTKRF5F7C78QECDF2186QWQF", name = "Span")]
    pub struct Span {
        #[field]
        pub ends: (i32, i32),
    }

    let err = build_schema::<Span>().expect_err("tuple");

    assert!(matches!(err, Error::UnsupportedShape { ref ty } if ty == "(i32, i32)"));
    assert!(err.to_string().contains("(i32, i32)"));
    assert!(err.to_string().contains("sequence"));
    assert!(err.to_string().contains("associative"));
}

#[test]
fn same_type_builds_identical_descriptors() {
    let a = build_schema::<Column>().expect("a");
    let b = build_schema::<Column>().expect("b");

    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn default_name_drops_the_raw_prefix() {
    #[derive(Debug, Default, Record)]
    #[schema(guid = "6QJ0W3V8N5T2K7R9M4B1X8C3D6")]
    pub struct r#Match {
        #[field]
        pub r#type: i32,
    }

    let schema = build_schema::<r#Match>().expect("raw identifiers");

    assert_eq!(schema.name(), "Match");
    assert!(schema.field("type").is_some());
}
