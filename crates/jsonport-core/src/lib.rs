//! # jsonport-core
//!
//! Schema-driven conversion between richly-typed value trees and plain JSON
//! values. A declared [`Schema`] — primitives, enums, optionals, unions,
//! tuples, lists, sets, maps, temporal types, and nested records — drives
//! both directions: [`serialize`] tears a [`TypedValue`] down into a
//! `serde_json::Value`, [`deserialize`] rebuilds one, validating kinds,
//! applying field defaults, and ignoring unknown keys along the way.
//!
//! Every failure names its location: errors carry the field/index chain from
//! the root, so `type mismatch at $.items[2].price` is the norm, not a
//! needle in a stack trace.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonport_core::{deserialize, serialize, RecordSchema, Schema, TypedValue};
//!
//! let schema = Schema::Record(
//!     RecordSchema::new("Point")
//!         .field("x", Schema::Float)
//!         .field("y", Schema::Float),
//! );
//!
//! let point = TypedValue::record([
//!     ("x", TypedValue::Float(1.0)),
//!     ("y", TypedValue::Float(2.0)),
//! ]);
//!
//! let plain = serialize(&point, &schema).unwrap();
//! assert_eq!(plain.to_string(), r#"{"x":1.0,"y":2.0}"#);
//!
//! let back = deserialize(&plain, &schema).unwrap();
//! assert_eq!(back, point);
//! ```
//!
//! ## Modules
//!
//! - [`schema`] — `Schema` and the enum/record builders
//! - [`value`] — `TypedValue`, the runtime instance side
//! - [`shape`] — the shape classifier (`classify`, `Shape`)
//! - [`dump`] / [`load`] — the recursive walkers for each direction
//! - [`error`] — error taxonomy with value-tree paths
//! - [`io`] — JSON text and file persistence, gzip by `.gz` suffix

pub mod dump;
pub mod error;
pub mod io;
pub mod load;
pub mod schema;
pub mod shape;
pub mod value;

mod codec;

pub use dump::{serialize, serialize_with};
pub use error::{Error, ErrorKind, Path, PathSegment, Result};
pub use io::{dump_file, from_json_str, load_file, to_json_string, to_json_string_pretty};
pub use load::{deserialize, deserialize_with};
pub use schema::{EnumMember, EnumSchema, FieldDefault, FieldSchema, RecordSchema, Schema};
pub use shape::{classify, Primitive, Shape, Temporal};
pub use value::{DateTimeValue, PlainValue, TypedValue};

/// Conversion limits shared by both walkers.
///
/// `max_depth` bounds recursion so cyclic or pathologically deep schemas
/// fail with [`ErrorKind::RecursionLimitExceeded`] instead of overflowing
/// the stack.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { max_depth: 128 }
    }
}
