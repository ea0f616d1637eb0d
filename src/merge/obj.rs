use indexmap::IndexMap;

use super::merge;
use crate::error::{Container, MergeError};
use crate::schema::Schema;

/// Key union of two records with the same name. Keys seen on one side only
/// become `Optional`. Order: `a`'s keys as they were, then keys new in `b`.
pub(super) fn merge_object(
    name_a: String,
    fields_a: IndexMap<String, Schema>,
    name_b: String,
    mut fields_b: IndexMap<String, Schema>,
) -> Result<Schema, MergeError> {
    if name_a != name_b {
        return Err(MergeError::name_mismatch(Container::Object, &name_a, &name_b));
    }

    let mut out = IndexMap::with_capacity(fields_a.len().max(fields_b.len()));

    // keys from a
    for (key, value_a) in fields_a {
        let value = match fields_b.shift_remove(&key) {
            Some(value_b) => merge(value_a, value_b)?,
            None => Schema::optional(value_a),
        };
        out.insert(key, value);
    }
    // keys only in b
    for (key, value_b) in fields_b {
        out.insert(key, Schema::optional(value_b));
    }

    Ok(Schema::Object { name: name_a, fields: out })
}
