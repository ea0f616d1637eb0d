//! Model emission for code renderers.
//!
//! Flattens an upgraded tree into the list of record types a renderer has to
//! declare, each with its properties' identifiers and type descriptors:
//!
//! ```json
//! { "root": "[Pet]",
//!   "types": [ { "name": "Pet",
//!                "properties": [ { "key": "owner_name", "name": "ownerName",
//!                                  "type": "String?", "optional": true,
//!                                  "sample": "ada" } ] } ] }
//! ```
use indexmap::IndexMap;
use log::{debug, warn};
use serde_json::{json, Map, Value};

use crate::merge::merge;
use crate::naming::{property_name_of, type_name_of};
use crate::schema::Schema;

pub fn emit_model(tree: &Schema) -> Value {
    let mut records = IndexMap::new();
    collect_types(tree, &mut records);
    let types: Vec<Value> = records
        .iter()
        .map(|(name, fields)| {
            let properties: Vec<Value> = fields.iter().map(|(k, v)| emit_property(k, v)).collect();
            json!({ "name": name, "properties": properties })
        })
        .collect();
    json!({
        "root": tree.descriptor(),
        "types": types,
    })
}

type Fields = IndexMap<String, Schema>;

/// Pre-order: a record comes before the records nested in it. Records that
/// share a type name are unified into one, listed where the first appeared.
fn collect_types(node: &Schema, records: &mut IndexMap<String, Fields>) {
    match node {
        Schema::Object { name, fields } => {
            let type_name = type_name_of(name);
            match records.get_mut(&type_name) {
                None => {
                    records.insert(type_name, fields.clone());
                }
                Some(seen) => {
                    debug!("type `{type_name}` seen again; unifying fields");
                    let left = Schema::Object { name: type_name.clone(), fields: seen.clone() };
                    let right = Schema::Object { name: type_name.clone(), fields: fields.clone() };
                    match merge(left, right) {
                        Ok(Schema::Object { fields, .. }) => *seen = fields,
                        Ok(other) => warn!("type `{type_name}` unified into {}; keeping first", other.kind()),
                        Err(e) => warn!("type `{type_name}` occurs with incompatible fields ({e}); keeping first"),
                    }
                }
            }
            for value in fields.values() {
                collect_types(value, records);
            }
        }
        Schema::Array { values, .. } => {
            for value in values {
                collect_types(value, records);
            }
        }
        Schema::Optional(Some(inner)) => collect_types(inner, records),
        _ => {}
    }
}

fn emit_property(key: &str, value: &Schema) -> Value {
    let mut o = Map::new();
    o.insert("key".into(), Value::from(key));
    o.insert("name".into(), Value::from(property_name_of(key)));
    o.insert("type".into(), Value::from(value.descriptor()));
    o.insert("optional".into(), Value::from(value.is_optional()));
    if let Some(sample) = sample_of(value) {
        o.insert("sample".into(), sample);
    }
    Value::Object(o)
}

/// Representative literal kept by the merge, if the leaf carries one.
fn sample_of(value: &Schema) -> Option<Value> {
    match value {
        Schema::Text(s) => Some(Value::from(s.as_str())),
        Schema::Bool(b) => Some(Value::from(*b)),
        Schema::Url(url) => Some(Value::from(url.as_str())),
        Schema::Optional(Some(inner)) => sample_of(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::reduce;
    use crate::seed::seeds_from_values;
    use crate::upgrade::upgrade;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_listed_parent_first_with_descriptors() {
        let docs = [
            json!({"id": 1, "owner_name": "ada", "vet": {"name": "no", "site": "https://vet.example.com"}}),
            json!({"id": 2, "vet": {"name": "who", "site": "https://vet.example.org"}, "tags": ["x"]}),
        ];
        let tree = reduce(seeds_from_values(&docs, "pet")).unwrap();
        let model = emit_model(&upgrade(&tree, "pet").unwrap());

        assert_eq!(model["root"], "Pet");
        assert_eq!(model["types"][0]["name"], "Pet");
        assert_eq!(model["types"][1]["name"], "Vet");

        let props = &model["types"][0]["properties"];
        assert_eq!(props[0], json!({"key": "id", "name": "id", "type": "Int", "optional": false}));
        assert_eq!(props[1], json!({
            "key": "owner_name", "name": "ownerName", "type": "String?", "optional": true, "sample": "ada"
        }));
        assert_eq!(props[3]["type"], "[String]?");

        let vet = &model["types"][1]["properties"];
        assert_eq!(vet[1]["type"], "URL");
        assert_eq!(vet[1]["sample"], "https://vet.example.com");
    }

    #[test]
    fn array_root_lists_element_type() {
        let docs = [json!([{"id": 1}, {"id": 2}])];
        let tree = reduce(seeds_from_values(&docs, "users")).unwrap();
        let model = emit_model(&upgrade(&tree, "users").unwrap());
        assert_eq!(model["root"], "[User]");
        assert_eq!(model["types"][0]["name"], "User");
    }

    #[test]
    fn repeated_type_names_are_unified() {
        let tree = Schema::object("Root", [
            ("a", Schema::object("item", [("x", Schema::Bool(true))])),
            ("b", Schema::object("item", [("y", Schema::Bool(true))])),
        ]);
        let model = emit_model(&tree);
        assert_eq!(model["types"].as_array().unwrap().len(), 2);
        assert_eq!(model["types"][1]["name"], "Item");
        let props = &model["types"][1]["properties"];
        assert_eq!(props[0], json!({"key": "x", "name": "x", "type": "Bool?", "optional": true, "sample": true}));
        assert_eq!(props[1], json!({"key": "y", "name": "y", "type": "Bool?", "optional": true, "sample": true}));
    }

    #[test]
    fn incompatible_repeats_keep_the_first() {
        let tree = Schema::object("Root", [
            ("a", Schema::object("item", [("x", Schema::Bool(true))])),
            ("b", Schema::object("item", [("x", Schema::text("no"))])),
        ]);
        let model = emit_model(&tree);
        let props = &model["types"][1]["properties"];
        assert_eq!(props.as_array().unwrap().len(), 1);
        assert_eq!(props[0]["type"], "Bool");
    }
}
