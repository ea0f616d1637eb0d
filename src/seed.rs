//! Seed trees from parsed JSON documents.
//!
//! One seed per sample, using only the pre-upgrade variants. Records and
//! sequences are named by the raw key they sit under (the root by the
//! caller's name); array elements reuse the array's key so they can merge.
use serde_json::{Map, Value};

use crate::schema::{NumberKind, Schema};

pub fn seed_from_value(value: &Value, name: &str) -> Schema {
    match value {
        Value::Null => Schema::absent(),
        Value::Bool(b) => Schema::Bool(*b),
        Value::Number(n) if n.is_f64() => Schema::Number(NumberKind::Double),
        Value::Number(_) => Schema::Number(NumberKind::Int),
        Value::String(s) => Schema::Text(s.clone()),
        Value::Array(xs) => seed_array(xs, name),
        Value::Object(map) => seed_object(map, name),
    }
}

fn seed_array(xs: &[Value], name: &str) -> Schema {
    Schema::Array {
        name: name.to_string(),
        values: xs.iter().map(|x| seed_from_value(x, name)).collect(),
    }
}

fn seed_object(map: &Map<String, Value>, name: &str) -> Schema {
    Schema::Object {
        name: name.to_string(),
        fields: map.iter().map(|(k, v)| (k.clone(), seed_from_value(v, k))).collect(),
    }
}

/// Seeds for a batch of documents sharing one root name, in input order.
pub fn seeds_from_values<'a, I>(values: I, root: &str) -> Vec<Schema>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(|v| seed_from_value(v, root)).collect()
}
