//! Schema — the declared type description that drives every conversion.
//!
//! A [`Schema`] is a closed sum type over the supported shapes: primitives,
//! enums, temporal types, optionals, unions, tuples, lists, sets, maps,
//! records, and an untyped passthrough. Conversion never inspects runtime
//! types; it walks the schema and validates the value against it.
//!
//! Schemas are plain data, built once through the constructor helpers and the
//! [`RecordSchema`]/[`EnumSchema`] builders, then shared freely — the engine
//! only ever borrows them.

use crate::value::{PlainValue, TypedValue};

/// Declared type description. Every variant resolves to exactly one
/// conversion shape (see [`crate::shape::classify`]).
#[derive(Debug, Clone)]
pub enum Schema {
    /// UTF-8 string.
    String,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float. Integers are accepted where a float is declared.
    Float,
    /// Boolean. Not interchangeable with integers.
    Bool,
    /// Enumeration with ordered named members, each carrying an underlying
    /// literal value (the wire representation).
    Enum(EnumSchema),
    /// Calendar date, serialized as `YYYY-MM-DD`.
    Date,
    /// Date-time, serialized as ISO-8601; offset-aware values keep their
    /// offset, naive values serialize without one.
    DateTime,
    /// Nullable wrapper around an inner type.
    Optional(Box<Schema>),
    /// Ordered candidate types. The first structural match wins, in both
    /// directions — declaration order is part of the contract.
    Union(Vec<Schema>),
    /// Fixed-arity tuple with one schema per position.
    Tuple(Vec<Schema>),
    /// Homogeneous order-preserving sequence.
    List(Box<Schema>),
    /// Unique-element sequence. Dump order is deterministic (sorted by the
    /// JSON text of each dumped element); duplicates collapse on load.
    Set(Box<Schema>),
    /// Mapping with string keys and one value type. Non-string key schemas
    /// are rejected at classification time.
    Map {
        key: Box<Schema>,
        value: Box<Schema>,
    },
    /// Composite record with a fixed, named, ordered field list.
    Record(RecordSchema),
    /// Untyped passthrough: the value is an arbitrary plain JSON tree,
    /// carried verbatim in both directions.
    Any,
}

impl Schema {
    pub fn optional(inner: Schema) -> Self {
        Schema::Optional(Box::new(inner))
    }

    pub fn list(element: Schema) -> Self {
        Schema::List(Box::new(element))
    }

    pub fn set(element: Schema) -> Self {
        Schema::Set(Box::new(element))
    }

    pub fn map(key: Schema, value: Schema) -> Self {
        Schema::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn union(candidates: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Union(candidates.into_iter().collect())
    }

    pub fn tuple(elements: impl IntoIterator<Item = Schema>) -> Self {
        Schema::Tuple(elements.into_iter().collect())
    }

    /// Short human-readable description used in error messages.
    pub fn name(&self) -> String {
        match self {
            Schema::String => "string".into(),
            Schema::Int => "int".into(),
            Schema::Float => "float".into(),
            Schema::Bool => "bool".into(),
            Schema::Enum(e) => format!("enum {}", e.name),
            Schema::Date => "date".into(),
            Schema::DateTime => "date-time".into(),
            Schema::Optional(inner) => format!("optional {}", inner.name()),
            Schema::Union(_) => "union".into(),
            Schema::Tuple(_) => "tuple".into(),
            Schema::List(_) => "list".into(),
            Schema::Set(_) => "set".into(),
            Schema::Map { .. } => "map".into(),
            Schema::Record(r) => format!("record {}", r.name),
            Schema::Any => "any".into(),
        }
    }
}

/// An enumeration: ordered members, each a name plus an underlying literal
/// value (string or integer in practice; any plain JSON literal is allowed).
#[derive(Debug, Clone)]
pub struct EnumSchema {
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone)]
pub struct EnumMember {
    pub name: String,
    pub value: PlainValue,
}

impl EnumSchema {
    pub fn new(name: impl Into<String>) -> Self {
        EnumSchema {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Append a member. Declaration order is significant for value lookup.
    pub fn member(mut self, name: impl Into<String>, value: impl Into<PlainValue>) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn member_named(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }

    /// First member (in declaration order) whose underlying value equals
    /// `value`.
    pub fn member_for_value(&self, value: &PlainValue) -> Option<&EnumMember> {
        self.members.iter().find(|m| &m.value == value)
    }
}

/// A composite record: a fixed, named, ordered field list.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: String,
    pub schema: Schema,
    pub default: Option<FieldDefault>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        RecordSchema {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a required field.
    pub fn field(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            schema,
            default: None,
        });
        self
    }

    /// Append a field with a default applied when the input mapping omits
    /// its key.
    pub fn field_with_default(
        mut self,
        name: impl Into<String>,
        schema: Schema,
        default: FieldDefault,
    ) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            schema,
            default: Some(default),
        });
        self
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Default-value supplier for a record field: either a stored value cloned
/// on use, or a function invoked per load (for fields that want a fresh
/// container each time).
#[derive(Debug, Clone)]
pub enum FieldDefault {
    Value(TypedValue),
    Supplier(fn() -> TypedValue),
}

impl FieldDefault {
    pub(crate) fn produce(&self) -> TypedValue {
        match self {
            FieldDefault::Value(v) => v.clone(),
            FieldDefault::Supplier(f) => f(),
        }
    }
}
