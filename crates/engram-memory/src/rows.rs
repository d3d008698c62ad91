//! Lenient row decoding shared by the typed stores.

use serde::de::DeserializeOwned;
use tracing::warn;

/// Decode backend rows into `T`, skipping rows that fail to deserialize.
///
/// The backend is schemaless from our side; a row written by an older or
/// foreign client must not poison the whole result set.
pub(crate) fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<serde_json::Value>) -> Vec<T> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match serde_json::from_value(row) {
            Ok(record) => out.push(record),
            Err(e) => warn!(table, error = %e, "Skipping row that failed to deserialize"),
        }
    }
    out
}
