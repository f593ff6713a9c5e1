//! Plain-Value Codec — leaf conversions for primitives, enums, and temporal
//! values. No recursion here; the walkers ([`crate::dump`], [`crate::load`])
//! attach paths to the `ErrorKind`s these return.

use crate::error::ErrorKind;
use crate::schema::EnumSchema;
use crate::shape::{Primitive, Temporal};
use crate::value::{DateTimeValue, PlainValue, TypedValue};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Number;

type CodecResult<T> = std::result::Result<T, ErrorKind>;

const DATE_FORMAT: &str = "%Y-%m-%d";
/// ISO-8601 without offset; `%.f` emits a fraction only when non-zero and
/// accepts an absent fraction when parsing.
const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Dump a primitive: validate the runtime kind, pass the value through.
/// Integers are accepted where floats are declared; nothing else coerces.
pub(crate) fn dump_primitive(value: &TypedValue, prim: Primitive) -> CodecResult<PlainValue> {
    match (prim, value) {
        (Primitive::Str, TypedValue::Str(s)) => Ok(PlainValue::String(s.clone())),
        (Primitive::Int, TypedValue::Int(i)) => Ok(PlainValue::Number((*i).into())),
        (Primitive::Float, TypedValue::Float(f)) => float_number(*f),
        (Primitive::Float, TypedValue::Int(i)) => Ok(PlainValue::Number((*i).into())),
        (Primitive::Bool, TypedValue::Bool(b)) => Ok(PlainValue::Bool(*b)),
        (_, other) => Err(ErrorKind::mismatch(prim.name(), other.kind())),
    }
}

/// Load a primitive: validate the plain-value kind against the declaration.
/// A JSON integer loads into a declared float; a JSON float never loads into
/// a declared int.
pub(crate) fn load_primitive(plain: &PlainValue, prim: Primitive) -> CodecResult<TypedValue> {
    match (prim, plain) {
        (Primitive::Str, PlainValue::String(s)) => Ok(TypedValue::Str(s.clone())),
        (Primitive::Int, PlainValue::Number(n)) => n.as_i64().map(TypedValue::Int).ok_or_else(|| {
            ErrorKind::mismatch(
                "int",
                if n.is_f64() { "float" } else { "out-of-range int" },
            )
        }),
        (Primitive::Float, PlainValue::Number(n)) => n
            .as_f64()
            .map(TypedValue::Float)
            .ok_or_else(|| ErrorKind::mismatch("float", "out-of-range number")),
        (Primitive::Bool, PlainValue::Bool(b)) => Ok(TypedValue::Bool(*b)),
        (_, other) => Err(ErrorKind::mismatch(prim.name(), plain_kind(other))),
    }
}

/// Dump an enum member as its underlying literal value.
pub(crate) fn dump_enum(value: &TypedValue, schema: &EnumSchema) -> CodecResult<PlainValue> {
    let member_name = match value {
        TypedValue::Enum(name) => name,
        other => {
            return Err(ErrorKind::mismatch(
                format!("enum {}", schema.name),
                other.kind(),
            ))
        }
    };
    match schema.member_named(member_name) {
        Some(member) => Ok(member.value.clone()),
        None => Err(ErrorKind::InvalidEnumValue {
            enum_name: schema.name.clone(),
            value: format!("{member_name:?}"),
        }),
    }
}

/// Load an enum by underlying value, scanning members in declaration order.
pub(crate) fn load_enum(plain: &PlainValue, schema: &EnumSchema) -> CodecResult<TypedValue> {
    match schema.member_for_value(plain) {
        Some(member) => Ok(TypedValue::Enum(member.name.clone())),
        None => Err(ErrorKind::InvalidEnumValue {
            enum_name: schema.name.clone(),
            value: plain.to_string(),
        }),
    }
}

/// Dump a temporal value as its canonical ISO-8601 string. Naive date-times
/// serialize without an offset; zoned date-times keep theirs (RFC 3339).
pub(crate) fn dump_temporal(value: &TypedValue, temporal: Temporal) -> CodecResult<PlainValue> {
    match (temporal, value) {
        (Temporal::Date, TypedValue::Date(d)) => {
            Ok(PlainValue::String(d.format(DATE_FORMAT).to_string()))
        }
        (Temporal::DateTime, TypedValue::DateTime(dt)) => {
            let text = match dt {
                DateTimeValue::Naive(n) => n.format(NAIVE_DATETIME_FORMAT).to_string(),
                DateTimeValue::Zoned(z) => z.to_rfc3339(),
            };
            Ok(PlainValue::String(text))
        }
        (t, other) => Err(ErrorKind::mismatch(t.name(), other.kind())),
    }
}

/// Load a temporal string with the inverse rule: offset-bearing strings
/// become zoned date-times, offset-free strings become naive ones.
pub(crate) fn load_temporal(plain: &PlainValue, temporal: Temporal) -> CodecResult<TypedValue> {
    let text = match plain {
        PlainValue::String(s) => s,
        other => return Err(ErrorKind::mismatch(temporal.name(), plain_kind(other))),
    };
    match temporal {
        Temporal::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(TypedValue::Date)
            .map_err(|_| invalid_temporal("date", text)),
        Temporal::DateTime => {
            if let Ok(zoned) = DateTime::parse_from_rfc3339(text) {
                return Ok(TypedValue::DateTime(DateTimeValue::Zoned(zoned)));
            }
            NaiveDateTime::parse_from_str(text, NAIVE_DATETIME_FORMAT)
                .map(|naive| TypedValue::DateTime(DateTimeValue::Naive(naive)))
                .map_err(|_| invalid_temporal("date-time", text))
        }
    }
}

fn invalid_temporal(expected: &'static str, input: &str) -> ErrorKind {
    ErrorKind::InvalidTemporalFormat {
        expected,
        input: input.to_string(),
    }
}

fn float_number(f: f64) -> CodecResult<PlainValue> {
    // JSON has no NaN or infinity.
    Number::from_f64(f)
        .map(PlainValue::Number)
        .ok_or_else(|| ErrorKind::mismatch("finite float", "non-finite float"))
}

/// Short kind name of a plain value, used in mismatch errors.
pub(crate) fn plain_kind(plain: &PlainValue) -> &'static str {
    match plain {
        PlainValue::Null => "null",
        PlainValue::Bool(_) => "bool",
        PlainValue::Number(n) => {
            if n.is_f64() {
                "float"
            } else {
                "int"
            }
        }
        PlainValue::String(_) => "string",
        PlainValue::Array(_) => "array",
        PlainValue::Object(_) => "object",
    }
}
