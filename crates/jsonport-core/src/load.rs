//! Composite Walker, deserialize direction — rebuilds a [`TypedValue`] from
//! a plain JSON tree under the guidance of its [`Schema`].
//!
//! The mirror of [`crate::dump`]: classify each schema node, recurse with
//! path and depth tracked, bottom out in the leaf codec. Record
//! materialization lives here: declared fields are converted in order,
//! defaults fill absent keys, unknown input keys are ignored (forward
//! compatibility with newer writers).

use crate::codec::{self, plain_kind};
use crate::error::{Error, ErrorKind, Path, Result};
use crate::schema::{RecordSchema, Schema};
use crate::shape::{classify, Shape};
use crate::value::{PlainValue, TypedValue};
use crate::Options;

/// Deserialize `plain` against `schema` into a typed value, with default
/// [`Options`].
pub fn deserialize(plain: &PlainValue, schema: &Schema) -> Result<TypedValue> {
    deserialize_with(plain, schema, Options::default())
}

/// Deserialize with explicit conversion limits.
pub fn deserialize_with(
    plain: &PlainValue,
    schema: &Schema,
    options: Options,
) -> Result<TypedValue> {
    let mut loader = Loader {
        path: Path::root(),
        depth: 0,
        options,
    };
    loader.load(plain, schema)
}

struct Loader {
    path: Path,
    depth: usize,
    options: Options,
}

impl Loader {
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

    fn load(&mut self, plain: &PlainValue, schema: &Schema) -> Result<TypedValue> {
        let shape = classify(schema).map_err(|e| self.fail(e.kind))?;
        match shape {
            Shape::Primitive(prim) => codec::load_primitive(plain, prim).map_err(|k| self.fail(k)),
            Shape::Enum(e) => codec::load_enum(plain, e).map_err(|k| self.fail(k)),
            Shape::Temporal(t) => codec::load_temporal(plain, t).map_err(|k| self.fail(k)),
            Shape::Optional(inner) => match plain {
                PlainValue::Null => Ok(TypedValue::Null),
                other => self.nested(|w| w.load(other, inner)),
            },
            Shape::Union(candidates) => self.load_union(plain, candidates),
            Shape::Tuple(elements) => self.load_tuple(plain, elements),
            Shape::List(element) => self.load_list(plain, element),
            Shape::Set(element) => self.load_set(plain, element),
            Shape::Map(value_schema) => self.load_map(plain, value_schema),
            Shape::Record(record) => self.load_record(plain, record),
            Shape::Any => Ok(TypedValue::Any(plain.clone())),
        }
    }

    fn load_union(&mut self, plain: &PlainValue, candidates: &[Schema]) -> Result<TypedValue> {
        // Candidates are attempted in declaration order and the first success
        // wins. Inherently ambiguous when several match (an int is also a
        // valid float); the fixed order is what keeps it reproducible.
        for candidate in candidates {
            match self.nested(|w| w.load(plain, candidate)) {
                Ok(loaded) => return Ok(loaded),
                Err(e) if matches!(e.kind, ErrorKind::RecursionLimitExceeded { .. }) => {
                    return Err(e)
                }
                Err(_) => {}
            }
        }
        Err(self.fail(ErrorKind::NoMatchingUnionVariant))
    }

    fn load_tuple(&mut self, plain: &PlainValue, elements: &[Schema]) -> Result<TypedValue> {
        let items = match plain {
            PlainValue::Array(items) => items,
            other => return Err(self.fail(ErrorKind::mismatch("tuple", plain_kind(other)))),
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
            let loaded = self.nested(|w| w.load(item, element));
            self.path.pop();
            out.push(loaded?);
        }
        Ok(TypedValue::Tuple(out))
    }

    fn load_list(&mut self, plain: &PlainValue, element: &Schema) -> Result<TypedValue> {
        let items = match plain {
            PlainValue::Array(items) => items,
            other => return Err(self.fail(ErrorKind::mismatch("list", plain_kind(other)))),
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            self.path.push_index(i);
            let loaded = self.nested(|w| w.load(item, element));
            self.path.pop();
            out.push(loaded?);
        }
        Ok(TypedValue::List(out))
    }

    fn load_set(&mut self, plain: &PlainValue, element: &Schema) -> Result<TypedValue> {
        let items = match plain {
            PlainValue::Array(items) => items,
            other => return Err(self.fail(ErrorKind::mismatch("set", plain_kind(other)))),
        };
        let mut out: Vec<TypedValue> = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            self.path.push_index(i);
            let loaded = self.nested(|w| w.load(item, element));
            self.path.pop();
            let loaded = loaded?;
            // Exact duplicates collapse; first occurrence keeps its position.
            if !out.contains(&loaded) {
                out.push(loaded);
            }
        }
        Ok(TypedValue::Set(out))
    }

    fn load_map(&mut self, plain: &PlainValue, value_schema: &Schema) -> Result<TypedValue> {
        let map = match plain {
            PlainValue::Object(map) => map,
            other => return Err(self.fail(ErrorKind::mismatch("map", plain_kind(other)))),
        };
        let mut out = Vec::with_capacity(map.len());
        for (key, item) in map {
            self.path.push_field(key);
            let loaded = self.nested(|w| w.load(item, value_schema));
            self.path.pop();
            out.push((key.clone(), loaded?));
        }
        Ok(TypedValue::Map(out))
    }

    fn load_record(&mut self, plain: &PlainValue, record: &RecordSchema) -> Result<TypedValue> {
        let map = match plain {
            PlainValue::Object(map) => map,
            other => {
                return Err(self.fail(ErrorKind::mismatch(
                    format!("record {}", record.name),
                    plain_kind(other),
                )))
            }
        };
        let mut fields = Vec::with_capacity(record.fields.len());
        for field in &record.fields {
            let value = match map.get(&field.name) {
                Some(raw) => {
                    self.path.push_field(&field.name);
                    let loaded = self.nested(|w| w.load(raw, &field.schema));
                    self.path.pop();
                    loaded?
                }
                None => match &field.default {
                    Some(default) => default.produce(),
                    None => {
                        return Err(self.fail(ErrorKind::MissingRequiredField {
                            field: field.name.clone(),
                        }))
                    }
                },
            };
            fields.push((field.name.clone(), value));
        }
        // Input keys with no declared field are ignored, never an error.
        Ok(TypedValue::Record(fields))
    }
}
