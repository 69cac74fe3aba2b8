use extstore::{
    prelude::*,
    schema::SchemaBuilder,
    ValueKind,
};

#[derive(Clone, Debug, Default, PartialEq, Record)]
#[schema(guid = "3Z2M2J8D5SPQFSWXV9P47M41DM", name = "SomeValueSchema")]
pub struct SomeValue {
    #[field]
    pub some_value: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
#[schema(guid = "66Z1VHGVBPP1Z8G7PHCAQ2XCAM", name = "Camber")]
pub struct Camber {
    #[field(unit = "Length")]
    pub rise: f64,

    #[field]
    pub stations: Vec<f64>,
}

fn some_value_id() -> SchemaId {
    extstore::convert::RecordKind::of::<SomeValue>()
        .schema_id()
        .expect("schema id")
}

#[test]
fn element_carries_one_entity_per_schema() {
    let store = MemoryStore::new();
    let converter = RecordConverter::new(&store);
    let mut element = Element::new(ElementId::new(100));

    let camber = Camber {
        rise: 0.025,
        stations: vec![0.0, 0.5, 1.0],
    };
    element
        .set_record(&converter, &SomeValue { some_value: 888 })
        .expect("some value");
    element.set_record(&converter, &camber).expect("camber");

    assert_eq!(element.len(), 2);
    assert_eq!(
        element.get_record::<SomeValue>(&converter).expect("get"),
        Some(SomeValue { some_value: 888 })
    );
    assert_eq!(element.get_record::<Camber>(&converter).expect("get"), Some(camber));

    assert!(element.delete_record::<Camber>(&store).expect("delete"));
    assert_eq!(element.get_record::<Camber>(&converter).expect("get"), None);
    assert_eq!(element.len(), 1);
}

#[test]
fn hand_built_entity_reads_back_by_field_name() {
    let store = MemoryStore::new();
    let schema = SchemaBuilder::new(some_value_id())
        .name("SomeValueSchema")
        .documentation("hand-built twin of SomeValue")
        .field(Field::scalar("some_value", ValueKind::Int32))
        .and_then(SchemaBuilder::finish)
        .expect("schema");
    let schema = store.create_schema(schema).expect("create");

    let field = schema.field("some_value").expect("field");
    let mut entity = store.new_entity(&schema);
    store
        .set(&mut entity, field, Value::Int32(888), None)
        .expect("set");
    assert_eq!(store.get(&entity, field, None), Ok(Some(Value::Int32(888))));

    let mut element = Element::new(ElementId::new(7));
    element.attach_entity(entity);

    let converter = RecordConverter::new(&store);
    assert_eq!(
        element.get_record::<SomeValue>(&converter).expect("get"),
        Some(SomeValue { some_value: 888 })
    );
}

#[test]
fn records_of_unknown_schemas_read_as_none() {
    let store = MemoryStore::new();
    let converter = RecordConverter::new(&store);
    let element = Element::new(ElementId::new(1));

    assert_eq!(element.get_record::<SomeValue>(&converter).expect("get"), None);
    assert!(store.is_empty());
}
