//! Shape Classifier — maps a [`Schema`] onto its conversion shape.
//!
//! Classification is a single non-recursive match: every valid schema falls
//! into exactly one [`Shape`], and the walkers dispatch on that. The one
//! rejection is a map whose key schema is not a string, since the plain
//! representation is a JSON object and object keys are strings.

use crate::error::{Error, ErrorKind, Path, Result};
use crate::schema::{EnumSchema, RecordSchema, Schema};

/// The closed set of conversion algorithms, as a borrowed view over a
/// [`Schema`]. Each variant carries exactly the data its conversion needs.
#[derive(Debug)]
pub enum Shape<'a> {
    Primitive(Primitive),
    Enum(&'a EnumSchema),
    Temporal(Temporal),
    Optional(&'a Schema),
    Union(&'a [Schema]),
    Tuple(&'a [Schema]),
    List(&'a Schema),
    Set(&'a Schema),
    /// Value schema; the key schema has already been validated as string.
    Map(&'a Schema),
    Record(&'a RecordSchema),
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Str,
    Int,
    Float,
    Bool,
}

impl Primitive {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Primitive::Str => "string",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Bool => "bool",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Temporal {
    Date,
    DateTime,
}

impl Temporal {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Temporal::Date => "date",
            Temporal::DateTime => "date-time",
        }
    }
}

/// Classify a schema into its conversion shape.
///
/// Deterministic, total over valid schemas, no recursion, no side effects.
/// Fails with [`ErrorKind::UnsupportedType`] when a map's key schema is not
/// a string.
pub fn classify(schema: &Schema) -> Result<Shape<'_>> {
    let shape = match schema {
        Schema::String => Shape::Primitive(Primitive::Str),
        Schema::Int => Shape::Primitive(Primitive::Int),
        Schema::Float => Shape::Primitive(Primitive::Float),
        Schema::Bool => Shape::Primitive(Primitive::Bool),
        Schema::Enum(e) => Shape::Enum(e),
        Schema::Date => Shape::Temporal(Temporal::Date),
        Schema::DateTime => Shape::Temporal(Temporal::DateTime),
        Schema::Optional(inner) => Shape::Optional(inner),
        Schema::Union(candidates) => Shape::Union(candidates),
        Schema::Tuple(elements) => Shape::Tuple(elements),
        Schema::List(element) => Shape::List(element),
        Schema::Set(element) => Shape::Set(element),
        Schema::Map { key, value } => {
            if !matches!(**key, Schema::String) {
                return Err(Error::new(
                    ErrorKind::UnsupportedType(format!(
                        "map key must be string, not {}",
                        key.name()
                    )),
                    Path::root(),
                ));
            }
            Shape::Map(value)
        }
        Schema::Record(record) => Shape::Record(record),
        Schema::Any => Shape::Any,
    };
    Ok(shape)
}
