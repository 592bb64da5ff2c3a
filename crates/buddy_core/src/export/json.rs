//! JSON export: the full store mapping, pretty-printed.

use crate::model::store::DayStore;

/// Pretty-printed (2-space indent) JSON of every stored day.
pub fn to_json(store: &DayStore) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(store)
}
