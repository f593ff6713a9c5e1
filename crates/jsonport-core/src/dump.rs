//! Composite Walker, serialize direction — tears a [`TypedValue`] down into
//! a plain JSON tree under the guidance of its [`Schema`].
//!
//! The walker classifies each schema node, recurses into children with the
//! current path and depth tracked, and bottoms out in the leaf codec. Record
//! flattening lives here: each declared field is looked up on the runtime
//! record and dumped in declared order.
//!
//! # Key design decisions
//!
//! - **Path tracking over error wrapping**: the walker keeps one mutable
//!   path, pushed/popped around each descent; an error clones it at the
//!   failure point and then propagates unmodified.
//! - **Set determinism**: dumped set elements are sorted by their JSON text
//!   and deduplicated, so output is stable across runs regardless of the
//!   caller's element order.
//! - **Union depth errors are not mismatches**: a candidate failing with
//!   `RecursionLimitExceeded` aborts the whole union instead of being
//!   swallowed as "candidate rejected".

use crate::codec;
use crate::error::{Error, ErrorKind, Path, Result};
use crate::schema::{RecordSchema, Schema};
use crate::shape::{classify, Shape};
use crate::value::{PlainValue, TypedValue};
use crate::Options;

/// Serialize `value` against `schema` into a plain JSON value, with default
/// [`Options`].
pub fn serialize(value: &TypedValue, schema: &Schema) -> Result<PlainValue> {
    serialize_with(value, schema, Options::default())
}

/// Serialize with explicit conversion limits.
pub fn serialize_with(value: &TypedValue, schema: &Schema, options: Options) -> Result<PlainValue> {
    let mut dumper = Dumper {
        path: Path::root(),
        depth: 0,
        options,
    };
    dumper.dump(value, schema)
}

struct Dumper {
    path: Path,
    depth: usize,
    options: Options,
}

impl Dumper {
    fn fail(&self, kind: ErrorKind) -> Error {
        Error::new(kind, self.path.clone())
    }

    /// Run `f` one level deeper, enforcing the recursion bound.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        let out = if self.depth > self.options.max_depth {
            Err(self.fail(ErrorKind::RecursionLimitExceeded {
                limit: self.options.max_depth,
            }))
        } else {
            f(self)
        };
        self.depth -= 1;
        out
    }

    fn dump(&mut self, value: &TypedValue, schema: &Schema) -> Result<PlainValue> {
        let shape = classify(schema).map_err(|e| self.fail(e.kind))?;
        match shape {
            Shape::Primitive(prim) => codec::dump_primitive(value, prim).map_err(|k| self.fail(k)),
            Shape::Enum(e) => codec::dump_enum(value, e).map_err(|k| self.fail(k)),
            Shape::Temporal(t) => codec::dump_temporal(value, t).map_err(|k| self.fail(k)),
            Shape::Optional(inner) => self.dump_optional(value, inner),
            Shape::Union(candidates) => self.dump_union(value, candidates),
            Shape::Tuple(elements) => self.dump_tuple(value, elements),
            Shape::List(element) => self.dump_list(value, element),
            Shape::Set(element) => self.dump_set(value, element),
            Shape::Map(value_schema) => self.dump_map(value, value_schema),
            Shape::Record(record) => self.dump_record(value, record),
            Shape::Any => match value {
                TypedValue::Any(plain) => Ok(plain.clone()),
                other => Err(self.fail(ErrorKind::mismatch("any", other.kind()))),
            },
        }
    }

    fn dump_optional(&mut self, value: &TypedValue, inner: &Schema) -> Result<PlainValue> {
        match value {
            TypedValue::Null => Ok(PlainValue::Null),
            other => self.nested(|w| w.dump(other, inner)),
        }
    }

    fn dump_union(&mut self, value: &TypedValue, candidates: &[Schema]) -> Result<PlainValue> {
        // First structural match in declaration order wins; the order is part
        // of the schema's observable contract.
        for candidate in candidates {
            match self.nested(|w| w.dump(value, candidate)) {
                Ok(dumped) => return Ok(dumped),
                Err(e) if matches!(e.kind, ErrorKind::RecursionLimitExceeded { .. }) => {
                    return Err(e)
                }
                Err(_) => {}
            }
        }
        Err(self.fail(ErrorKind::NoMatchingUnionVariant))
    }

    fn dump_tuple(&mut self, value: &TypedValue, elements: &[Schema]) -> Result<PlainValue> {
        let items = match value {
            TypedValue::Tuple(items) => items,
            other => return Err(self.fail(ErrorKind::mismatch("tuple", other.kind()))),
        };
        if items.len() != elements.len() {
            return Err(self.fail(ErrorKind::ArityMismatch {
                expected: elements.len(),
                found: items.len(),
            }));
        }
        let mut out = Vec::with_capacity(items.len());
        for (i, (item, element)) in items.iter().zip(elements).enumerate() {
            self.path.push_index(i);
            let dumped = self.nested(|w| w.dump(item, element));
            self.path.pop();
            out.push(dumped?);
        }
        Ok(PlainValue::Array(out))
    }

    fn dump_list(&mut self, value: &TypedValue, element: &Schema) -> Result<PlainValue> {
        let items = match value {
            TypedValue::List(items) => items,
            other => return Err(self.fail(ErrorKind::mismatch("list", other.kind()))),
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            self.path.push_index(i);
            let dumped = self.nested(|w| w.dump(item, element));
            self.path.pop();
            out.push(dumped?);
        }
        Ok(PlainValue::Array(out))
    }

    fn dump_set(&mut self, value: &TypedValue, element: &Schema) -> Result<PlainValue> {
        let items = match value {
            TypedValue::Set(items) => items,
            other => return Err(self.fail(ErrorKind::mismatch("set", other.kind()))),
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            self.path.push_index(i);
            let dumped = self.nested(|w| w.dump(item, element));
            self.path.pop();
            out.push(dumped?);
        }
        // Stable output regardless of the caller's element order. Equal
        // elements sort adjacently, so exact duplicates collapse here too.
        out.sort_by_cached_key(|v| v.to_string());
        out.dedup();
        Ok(PlainValue::Array(out))
    }

    fn dump_map(&mut self, value: &TypedValue, value_schema: &Schema) -> Result<PlainValue> {
        let entries = match value {
            TypedValue::Map(entries) => entries,
            other => return Err(self.fail(ErrorKind::mismatch("map", other.kind()))),
        };
        let mut out = serde_json::Map::with_capacity(entries.len());
        for (key, item) in entries {
            self.path.push_field(key);
            let dumped = self.nested(|w| w.dump(item, value_schema));
            self.path.pop();
            out.insert(key.clone(), dumped?);
        }
        Ok(PlainValue::Object(out))
    }

    fn dump_record(&mut self, value: &TypedValue, record: &RecordSchema) -> Result<PlainValue> {
        let fields = match value {
            TypedValue::Record(fields) => fields,
            other => {
                return Err(self.fail(ErrorKind::mismatch(
                    format!("record {}", record.name),
                    other.kind(),
                )))
            }
        };
        let mut out = serde_json::Map::with_capacity(record.fields.len());
        for field in &record.fields {
            let field_value = fields
                .iter()
                .find(|(name, _)| *name == field.name)
                .map(|(_, v)| v);
            let Some(field_value) = field_value else {
                return Err(self.fail(ErrorKind::MissingRequiredField {
                    field: field.name.clone(),
                }));
            };
            self.path.push_field(&field.name);
            let dumped = self.nested(|w| w.dump(field_value, &field.schema));
            self.path.pop();
            out.insert(field.name.clone(), dumped?);
        }
        Ok(PlainValue::Object(out))
    }
}
