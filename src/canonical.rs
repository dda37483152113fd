/// Canonical JSON encoding
///
/// The bytes produced here are both hashed and uploaded, so a fingerprint
/// recomputed over stored content always matches the anchored one.
///
/// Rules:
/// - object keys sorted by UTF-8 byte order
/// - no insignificant whitespace
/// - strings and numbers rendered exactly as serde_json renders them
/// - array order preserved
use crate::error::{PublishError, PublishResult};
use serde::Serialize;
use serde_json::Value;

/// Encode a JSON value into its canonical byte form
pub fn to_canonical_bytes(value: &Value) -> PublishResult<Vec<u8>> {
    let mut out = Vec::with_capacity(128);
    write_value(value, &mut out)?;
    Ok(out)
}

/// Serialize any value and encode it canonically
///
/// Fails with `Serialization` when the value has no JSON form
/// (e.g. maps with non-string keys or a failing `Serialize` impl).
pub fn canonicalize<T: Serialize + ?Sized>(value: &T) -> PublishResult<Vec<u8>> {
    let value = serde_json::to_value(value)
        .map_err(|e| PublishError::Serialization(format!("Value is not JSON-serializable: {}", e)))?;
    to_canonical_bytes(&value)
}

fn write_value(value: &Value, out: &mut Vec<u8>) -> PublishResult<()> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            serde_json::to_writer(&mut *out, value)?;
        }
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(item, out)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            // String's Ord is byte-wise, which matches UTF-8 byte order
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                serde_json::to_writer(&mut *out, key)?;
                out.push(b':');
                write_value(item, out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}
