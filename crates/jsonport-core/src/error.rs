//! Error types for schema-driven conversion.
//!
//! Every failure carries a [`Path`] — the field/index chain from the root of
//! the conversion to the offending location — so a problem deep inside a
//! nested structure is locatable without re-running anything. Errors are
//! raised at the point of failure and propagate unmodified; there are no
//! partial results and nothing to retry.

use std::fmt;
use thiserror::Error;

/// One step from a value's root toward a nested location: a record or map
/// key, or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// The field/index chain from the root of a conversion to a location inside
/// the value tree. Renders as `$.items[2].price`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The root of the value tree (empty chain).
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub(crate) fn push_field(&mut self, name: &str) {
        self.0.push(PathSegment::Field(name.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.0.push(PathSegment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// The failure categories of `serialize`/`deserialize` plus the two wrapper
/// kinds used by the file layer ([`crate::io`]).
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// The schema cannot be classified into a known conversion shape
    /// (currently: a map whose key schema is not a string).
    #[error("unsupported schema: {0}")]
    UnsupportedType(String),

    /// A value's runtime or plain-value kind does not match its declared
    /// schema. Never coerced silently; the one laxity is that integers are
    /// accepted where floats are declared.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// No member of the enum carries the given value (load side) or name
    /// (dump side).
    #[error("no member of enum {enum_name} matches {value}")]
    InvalidEnumValue { enum_name: String, value: String },

    /// A temporal string failed to parse as an ISO-8601 date or date-time.
    #[error("invalid {expected} string: {input:?}")]
    InvalidTemporalFormat {
        expected: &'static str,
        input: String,
    },

    /// A tuple's input sequence length differs from its declared arity.
    #[error("tuple arity mismatch: expected {expected} elements, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// Every union candidate rejected the value.
    #[error("no union candidate accepts the value")]
    NoMatchingUnionVariant,

    /// A field with no declared default is absent from the input mapping
    /// (load) or from the runtime record (dump).
    #[error("missing required field {field:?}")]
    MissingRequiredField { field: String },

    /// The value/schema tree is deeper than the configured bound. Cyclic
    /// record schemas end up here instead of overflowing the stack.
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimitExceeded { limit: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorKind {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        ErrorKind::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// A conversion failure: what went wrong and where in the value tree.
#[derive(Debug)]
pub struct Error {
    pub path: Path,
    pub kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, path: Path) -> Self {
        Error { path, kind }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} at {}", self.kind, self.path)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            ErrorKind::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(e), Path::root())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::new(ErrorKind::Json(e), Path::root())
    }
}

/// Convenience alias used throughout jsonport-core.
pub type Result<T> = std::result::Result<T, Error>;
