//! TypedValue — the runtime-instance side of a conversion.
//!
//! A [`TypedValue`] is the in-memory representation that `serialize` consumes
//! and `deserialize` produces. It mirrors the schema shapes one-to-one; the
//! engine validates each node against the schema it is declared under, so a
//! `TypedValue` on its own carries structure but no authority.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

/// The JSON-compatible plain representation: null, bool, number, string,
/// array, or insertion-ordered object (`preserve_order`).
pub type PlainValue = serde_json::Value;

/// A runtime value conforming to some [`crate::Schema`].
///
/// Equality is structural, with one deliberate exception: sets compare as
/// sets, ignoring element order (see the manual [`PartialEq`] impl below).
#[derive(Debug, Clone)]
pub enum TypedValue {
    /// The absent optional.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An enum member, identified by member name within its schema.
    Enum(String),
    Date(NaiveDate),
    DateTime(DateTimeValue),
    Tuple(Vec<TypedValue>),
    List(Vec<TypedValue>),
    /// Unique-element sequence. The engine collapses duplicates on load;
    /// callers constructing one directly need not pre-deduplicate, dump
    /// collapses as well.
    Set(Vec<TypedValue>),
    /// String-keyed mapping, insertion-ordered.
    Map(Vec<(String, TypedValue)>),
    /// Record instance: `(field name, value)` pairs in declared order.
    Record(Vec<(String, TypedValue)>),
    /// Untyped payload carried verbatim under `Schema::Any`.
    Any(PlainValue),
}

/// A date-time that either carries a UTC offset or is naive (wall-clock, no
/// zone). Naive values serialize without an offset suffix; zoned values keep
/// theirs.
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeValue {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        use TypedValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Enum(a), Enum(b)) => a == b,
            (Date(a), Date(b)) => a == b,
            (DateTime(a), DateTime(b)) => a == b,
            (Tuple(a), Tuple(b)) | (List(a), List(b)) => a == b,
            // Sets compare as sets. Elements are unique by construction, so
            // equal length plus mutual containment is a full equality check.
            (Set(a), Set(b)) => {
                a.len() == b.len()
                    && a.iter().all(|x| b.contains(x))
                    && b.iter().all(|x| a.contains(x))
            }
            (Map(a), Map(b)) | (Record(a), Record(b)) => a == b,
            (Any(a), Any(b)) => a == b,
            _ => false,
        }
    }
}

impl TypedValue {
    pub fn str(s: impl Into<String>) -> Self {
        TypedValue::Str(s.into())
    }

    /// An enum member value, by member name.
    pub fn member(name: impl Into<String>) -> Self {
        TypedValue::Enum(name.into())
    }

    /// Build a record value from `(name, value)` pairs in declared order.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, TypedValue)>) -> Self {
        TypedValue::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a map value from `(key, value)` pairs in insertion order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, TypedValue)>) -> Self {
        TypedValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a record field or map entry by name.
    pub fn field(&self, name: &str) -> Option<&TypedValue> {
        match self {
            TypedValue::Record(fields) | TypedValue::Map(fields) => {
                fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Short kind name used in mismatch errors.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            TypedValue::Null => "null",
            TypedValue::Bool(_) => "bool",
            TypedValue::Int(_) => "int",
            TypedValue::Float(_) => "float",
            TypedValue::Str(_) => "string",
            TypedValue::Enum(_) => "enum member",
            TypedValue::Date(_) => "date",
            TypedValue::DateTime(_) => "date-time",
            TypedValue::Tuple(_) => "tuple",
            TypedValue::List(_) => "list",
            TypedValue::Set(_) => "set",
            TypedValue::Map(_) => "map",
            TypedValue::Record(_) => "record",
            TypedValue::Any(_) => "any",
        }
    }
}
