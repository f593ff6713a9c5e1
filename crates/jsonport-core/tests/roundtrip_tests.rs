use jsonport_core::{
    deserialize, serialize, DateTimeValue, EnumSchema, FieldDefault, RecordSchema, Schema,
    TypedValue,
};
use serde_json::json;

/// Assert that serialize → deserialize reproduces the value, and that a
/// second serialize of the result matches the first (idempotence).
fn assert_roundtrip(value: &TypedValue, schema: &Schema) {
    let plain = serialize(value, schema).expect("serialize failed");
    let back = deserialize(&plain, schema).expect("deserialize failed");
    assert_eq!(
        &back, value,
        "roundtrip mismatch:\n  plain: {plain}\n  schema: {}",
        schema.name()
    );
    let again = serialize(&back, schema).expect("re-serialize failed");
    assert_eq!(plain, again, "serialize not idempotent");
}

// ============================================================================
// Leaves
// ============================================================================

#[test]
fn roundtrip_int() {
    assert_roundtrip(&TypedValue::Int(42), &Schema::Int);
}

#[test]
fn roundtrip_negative_int() {
    assert_roundtrip(&TypedValue::Int(-7), &Schema::Int);
}

#[test]
fn roundtrip_float() {
    assert_roundtrip(&TypedValue::Float(3.25), &Schema::Float);
}

#[test]
fn roundtrip_string() {
    assert_roundtrip(&TypedValue::str("héllo wörld"), &Schema::String);
}

#[test]
fn roundtrip_empty_string() {
    assert_roundtrip(&TypedValue::str(""), &Schema::String);
}

#[test]
fn roundtrip_bool() {
    assert_roundtrip(&TypedValue::Bool(false), &Schema::Bool);
}

#[test]
fn roundtrip_enum_member() {
    let schema = Schema::Enum(
        EnumSchema::new("Status")
            .member("PENDING", "pending")
            .member("SHIPPED", "shipped"),
    );
    assert_roundtrip(&TypedValue::member("SHIPPED"), &schema);
}

#[test]
fn roundtrip_date() {
    let date = chrono::NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
    assert_roundtrip(&TypedValue::Date(date), &Schema::Date);
}

#[test]
fn roundtrip_naive_datetime() {
    let naive = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 250)
        .unwrap();
    assert_roundtrip(
        &TypedValue::DateTime(DateTimeValue::Naive(naive)),
        &Schema::DateTime,
    );
}

#[test]
fn roundtrip_zoned_datetime() {
    let zoned = chrono::DateTime::parse_from_rfc3339("2024-06-01T08:15:00-05:00").unwrap();
    assert_roundtrip(
        &TypedValue::DateTime(DateTimeValue::Zoned(zoned)),
        &Schema::DateTime,
    );
}

// ============================================================================
// Composites
// ============================================================================

#[test]
fn roundtrip_optional_both_ways() {
    let schema = Schema::optional(Schema::Int);
    assert_roundtrip(&TypedValue::Null, &schema);
    assert_roundtrip(&TypedValue::Int(0), &schema);
}

#[test]
fn roundtrip_union() {
    let schema = Schema::union([Schema::Int, Schema::String]);
    assert_roundtrip(&TypedValue::Int(1), &schema);
    assert_roundtrip(&TypedValue::str("one"), &schema);
}

#[test]
fn roundtrip_tuple() {
    let schema = Schema::tuple([Schema::Int, Schema::String, Schema::Bool]);
    let value = TypedValue::Tuple(vec![
        TypedValue::Int(1),
        TypedValue::str("a"),
        TypedValue::Bool(true),
    ]);
    assert_roundtrip(&value, &schema);
}

#[test]
fn roundtrip_list_of_strings() {
    let schema = Schema::list(Schema::String);
    let value = TypedValue::List(vec![
        TypedValue::str("developer"),
        TypedValue::str("rust"),
        TypedValue::str("backend"),
    ]);
    assert_roundtrip(&value, &schema);
}

#[test]
fn roundtrip_set_of_ints() {
    // {3,1,2,1} dumps as exactly three elements and loads back as three.
    let schema = Schema::set(Schema::Int);
    let value = TypedValue::Set(vec![
        TypedValue::Int(3),
        TypedValue::Int(1),
        TypedValue::Int(2),
        TypedValue::Int(1),
    ]);
    let plain = serialize(&value, &schema).unwrap();
    assert_eq!(plain, json!([1, 2, 3]));
    let back = deserialize(&plain, &schema).unwrap();
    assert_eq!(
        back,
        TypedValue::Set(vec![
            TypedValue::Int(1),
            TypedValue::Int(2),
            TypedValue::Int(3)
        ])
    );
}

#[test]
fn roundtrip_map_of_records() {
    let point = RecordSchema::new("Point")
        .field("x", Schema::Float)
        .field("y", Schema::Float);
    let schema = Schema::map(Schema::String, Schema::Record(point));
    let value = TypedValue::map([
        (
            "origin",
            TypedValue::record([
                ("x", TypedValue::Float(0.0)),
                ("y", TypedValue::Float(0.0)),
            ]),
        ),
        (
            "unit",
            TypedValue::record([
                ("x", TypedValue::Float(1.0)),
                ("y", TypedValue::Float(1.0)),
            ]),
        ),
    ]);
    assert_roundtrip(&value, &schema);
}

// ============================================================================
// A realistic nested object graph
// ============================================================================

fn category_schema() -> Schema {
    Schema::Enum(
        EnumSchema::new("Category")
            .member("ELECTRONICS", "electronics")
            .member("BOOKS", "books"),
    )
}

fn product_schema() -> RecordSchema {
    RecordSchema::new("Product")
        .field("id", Schema::Int)
        .field("name", Schema::String)
        .field("price", Schema::Float)
        .field("category", category_schema())
        .field_with_default(
            "tags",
            Schema::set(Schema::String),
            FieldDefault::Supplier(|| TypedValue::Set(Vec::new())),
        )
        .field_with_default(
            "metadata",
            Schema::map(Schema::String, Schema::Any),
            FieldDefault::Supplier(|| TypedValue::Map(Vec::new())),
        )
        .field_with_default(
            "dimensions",
            Schema::optional(Schema::tuple([Schema::Float, Schema::Float, Schema::Float])),
            FieldDefault::Value(TypedValue::Null),
        )
}

fn order_schema() -> Schema {
    let item = RecordSchema::new("OrderItem")
        .field("product", Schema::Record(product_schema()))
        .field("quantity", Schema::Int)
        .field("unit_price", Schema::Float);
    Schema::Record(
        RecordSchema::new("Order")
            .field("id", Schema::Int)
            .field("items", Schema::list(Schema::Record(item)))
            .field("placed_at", Schema::DateTime)
            .field_with_default(
                "notes",
                Schema::optional(Schema::String),
                FieldDefault::Value(TypedValue::Null),
            ),
    )
}

fn laptop() -> TypedValue {
    TypedValue::record([
        ("id", TypedValue::Int(1)),
        ("name", TypedValue::str("Laptop")),
        ("price", TypedValue::Float(999.99)),
        ("category", TypedValue::member("ELECTRONICS")),
        (
            "tags",
            TypedValue::Set(vec![
                TypedValue::str("portable"),
                TypedValue::str("computer"),
            ]),
        ),
        (
            "metadata",
            TypedValue::map([
                ("brand", TypedValue::Any(json!("TechCorp"))),
                ("warranty", TypedValue::Any(json!(2))),
            ]),
        ),
        (
            "dimensions",
            TypedValue::Tuple(vec![
                TypedValue::Float(35.5),
                TypedValue::Float(24.0),
                TypedValue::Float(2.1),
            ]),
        ),
    ])
}

#[test]
fn roundtrip_nested_order_graph() {
    let placed_at = chrono::DateTime::parse_from_rfc3339("2024-03-10T14:00:00+00:00").unwrap();
    let order = TypedValue::record([
        ("id", TypedValue::Int(1001)),
        (
            "items",
            TypedValue::List(vec![TypedValue::record([
                ("product", laptop()),
                ("quantity", TypedValue::Int(1)),
                ("unit_price", TypedValue::Float(999.99)),
            ])]),
        ),
        (
            "placed_at",
            TypedValue::DateTime(DateTimeValue::Zoned(placed_at)),
        ),
        ("notes", TypedValue::str("deliver during business hours")),
    ]);
    assert_roundtrip(&order, &order_schema());
}

#[test]
fn load_nested_order_with_defaults_applied() {
    let plain = json!({
        "id": 1002,
        "items": [{
            "product": {
                "id": 2,
                "name": "Book",
                "price": 49.99,
                "category": "books"
            },
            "quantity": 2,
            "unit_price": 49.99
        }],
        "placed_at": "2024-03-11T09:30:00"
    });
    let order = deserialize(&plain, &order_schema()).unwrap();
    assert_eq!(order.field("notes"), Some(&TypedValue::Null));

    let items = match order.field("items") {
        Some(TypedValue::List(items)) => items,
        other => panic!("expected items list, got {other:?}"),
    };
    let product = items[0].field("product").unwrap();
    assert_eq!(product.field("tags"), Some(&TypedValue::Set(vec![])));
    assert_eq!(product.field("dimensions"), Some(&TypedValue::Null));
    assert_eq!(
        product.field("category"),
        Some(&TypedValue::member("BOOKS"))
    );
}
