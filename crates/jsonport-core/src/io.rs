//! File persistence — UTF-8 JSON text on disk, transparently
//! gzip-compressed when the path ends in `.gz`.
//!
//! This layer is a thin shell around [`serialize`]/[`deserialize`]: the core
//! engine never sees a path or a byte stream, it only ever trades in plain
//! value trees. Compression selection is purely suffix-driven, matching the
//! convention of naming compressed documents `data.json.gz`.

use crate::dump::serialize;
use crate::error::Result;
use crate::load::deserialize;
use crate::schema::Schema;
use crate::value::{PlainValue, TypedValue};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path as FsPath;

/// Serialize `value` against `schema` and return compact JSON text.
pub fn to_json_string(value: &TypedValue, schema: &Schema) -> Result<String> {
    let plain = serialize(value, schema)?;
    Ok(serde_json::to_string(&plain)?)
}

/// Serialize `value` against `schema` and return pretty-printed JSON text.
pub fn to_json_string_pretty(value: &TypedValue, schema: &Schema) -> Result<String> {
    let plain = serialize(value, schema)?;
    Ok(serde_json::to_string_pretty(&plain)?)
}

/// Parse JSON text and deserialize it against `schema`.
pub fn from_json_str(json: &str, schema: &Schema) -> Result<TypedValue> {
    let plain: PlainValue = serde_json::from_str(json)?;
    deserialize(&plain, schema)
}

/// Write `value` to `path` as UTF-8 JSON. A `.gz` suffix selects gzip.
pub fn dump_file(value: &TypedValue, schema: &Schema, path: impl AsRef<FsPath>) -> Result<()> {
    let path = path.as_ref();
    let json = to_json_string(value, schema)?;
    let mut file = File::create(path)?;
    if is_gzip(path) {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(json.as_bytes())?;
        encoder.finish()?;
    } else {
        file.write_all(json.as_bytes())?;
    }
    Ok(())
}

/// Read UTF-8 JSON from `path` and deserialize it against `schema`. A `.gz`
/// suffix selects gzip.
pub fn load_file(path: impl AsRef<FsPath>, schema: &Schema) -> Result<TypedValue> {
    let path = path.as_ref();
    let mut json = String::new();
    let mut file = File::open(path)?;
    if is_gzip(path) {
        GzDecoder::new(file).read_to_string(&mut json)?;
    } else {
        file.read_to_string(&mut json)?;
    }
    from_json_str(&json, schema)
}

fn is_gzip(path: &FsPath) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}
