//! The shared shape tree.
//!
//! One closed enum carries every stage of inference: bare seeds straight out
//! of the seeder, the generalized tree produced by `merge::reduce`, and the
//! named, semantically refined tree produced by `upgrade`. Nodes own their
//! children; nothing is shared and nothing is mutated in place.
use indexmap::IndexMap;
use serde::Serialize;

// ------------------------------- Variants --------------------------------- //

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Schema {
    /// Nothing observed yet. Identity element of `merge`.
    Empty,
    /// Absent (or null) in at least one sample. `None` if never present.
    Optional(Option<Box<Schema>>),
    Bool(bool),
    Number(NumberKind),
    Text(String),
    Object {
        name: String,
        fields: IndexMap<String, Schema>,
    },
    Array {
        name: String,
        values: Vec<Schema>,
    },
    /// Source literal, kept verbatim.
    Url(String),
    Date(DateFormat),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberKind {
    Int,
    Double,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// `yyyy-MM-dd'T'HH:mm:ss.SSSSSSZ`
    Timestamp,
    /// `yyyy-MM-dd`
    DateOnly,
}

// ----------------------------- Constructors ------------------------------- //

impl Schema {
    pub fn text(value: impl Into<String>) -> Self {
        Schema::Text(value.into())
    }

    pub fn object<K, I>(name: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Schema)>,
    {
        Schema::Object {
            name: name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn array(name: impl Into<String>, values: Vec<Schema>) -> Self {
        Schema::Array { name: name.into(), values }
    }

    /// Wrap in `Optional`, collapsing so the wrapper never holds `Empty`
    /// or another `Optional`.
    pub fn optional(inner: Schema) -> Self {
        match inner {
            Schema::Empty => Schema::Optional(None),
            opt @ Schema::Optional(_) => opt,
            other => Schema::Optional(Some(Box::new(other))),
        }
    }

    /// `Optional(none)`: only ever observed absent or null.
    pub fn absent() -> Self {
        Schema::Optional(None)
    }

    /// Variant name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Empty => "empty",
            Schema::Optional(_) => "optional",
            Schema::Bool(_) => "bool",
            Schema::Number(_) => "number",
            Schema::Text(_) => "text",
            Schema::Object { .. } => "object",
            Schema::Array { .. } => "array",
            Schema::Url(_) => "url",
            Schema::Date(_) => "date",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Schema::Optional(_))
    }
}

// ------------------------------ Descriptor -------------------------------- //

impl Schema {
    /// Target-language type annotation for this node.
    pub fn descriptor(&self) -> String {
        match self {
            Schema::Empty => "Any".to_string(),
            Schema::Optional(Some(inner)) => format!("{}?", inner.descriptor()),
            Schema::Optional(None) => "Any?".to_string(),
            Schema::Bool(_) => "Bool".to_string(),
            Schema::Number(NumberKind::Int) => "Int".to_string(),
            Schema::Number(NumberKind::Double) => "Double".to_string(),
            Schema::Text(_) => "String".to_string(),
            Schema::Object { name, .. } => crate::naming::type_name_of(name),
            Schema::Array { values, .. } => match values.first() {
                Some(value) => format!("[{}]", value.descriptor()),
                None => "[Any]".to_string(),
            },
            Schema::Url(_) => "URL".to_string(),
            Schema::Date(_) => "Date".to_string(),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_descriptors() {
        assert_eq!(Schema::Empty.descriptor(), "Any");
        assert_eq!(Schema::Bool(true).descriptor(), "Bool");
        assert_eq!(Schema::Number(NumberKind::Int).descriptor(), "Int");
        assert_eq!(Schema::Number(NumberKind::Double).descriptor(), "Double");
        assert_eq!(Schema::text("x").descriptor(), "String");
        assert_eq!(Schema::Date(DateFormat::DateOnly).descriptor(), "Date");
        assert_eq!(Schema::Url("https://example.com/x".into()).descriptor(), "URL");
    }

    #[test]
    fn absent_and_unobserved_descriptors() {
        assert_eq!(Schema::absent().descriptor(), "Any?");
        assert_eq!(Schema::array("tags", vec![]).descriptor(), "[Any]");
    }

    #[test]
    fn nested_descriptors() {
        let tags = Schema::array("tags", vec![Schema::optional(Schema::text("a"))]);
        assert_eq!(tags.descriptor(), "[String?]");

        let owner = Schema::object("owner_info", [("id", Schema::Number(NumberKind::Int))]);
        assert_eq!(owner.descriptor(), "OwnerInfo");
        assert_eq!(Schema::optional(owner).descriptor(), "OwnerInfo?");
    }

    #[test]
    fn optional_never_wraps_empty_or_optional() {
        assert_eq!(Schema::optional(Schema::Empty), Schema::Optional(None));
        let once = Schema::optional(Schema::Bool(true));
        let twice = Schema::optional(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn serializes_adjacently_tagged() {
        let tree = Schema::object("pet", [("age", Schema::Number(NumberKind::Int))]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["kind"], "object");
        assert_eq!(json["value"]["name"], "pet");
        assert_eq!(json["value"]["fields"]["age"]["value"], "int");
    }
}
