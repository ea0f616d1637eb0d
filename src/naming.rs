//! Identifier derivation from raw document keys.
use std::collections::HashMap;

/// `owner_name` → `OwnerName`. Upper-cases the head of every underscore
/// segment and keeps the rest, so an already-derived name maps to itself.
///
/// Unlike a word-capitalizing transform, the tail of a segment is never
/// lower-cased: `createdOn` gives `CreatedOn`, not `Createdon`.
pub fn type_name_of(name: &str) -> String {
    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(upper_first)
        .collect()
}

/// `owner_name` → `ownerName`. Falls back to the raw name when it has no
/// derivable type name (e.g. `"_"`).
pub fn property_name_of(name: &str) -> String {
    let ty = type_name_of(name);
    let mut chars = ty.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => name.to_string(),
    }
}

fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------- Singularization ----------------------------- //

/// Names an array's element from the array's own name.
pub trait Singularize {
    fn singular(&self, plural: &str) -> String;
}

/// Drops the final character: `tags` → `tag`, `boxes` → `boxe`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropLastChar;

impl Singularize for DropLastChar {
    fn singular(&self, plural: &str) -> String {
        let mut chars = plural.chars();
        chars.next_back();
        chars.as_str().to_string()
    }
}

impl<F> Singularize for F
where
    F: Fn(&str) -> String,
{
    fn singular(&self, plural: &str) -> String {
        self(plural)
    }
}

/// Explicit plural → singular table, deferring to `fallback` for misses.
#[derive(Debug, Clone, Default)]
pub struct SingularTable<S = DropLastChar> {
    table: HashMap<String, String>,
    fallback: S,
}

impl SingularTable {
    pub fn new(table: HashMap<String, String>) -> Self {
        Self { table, fallback: DropLastChar }
    }
}

impl<S: Singularize> SingularTable<S> {
    pub fn with_fallback<T: Singularize>(self, fallback: T) -> SingularTable<T> {
        SingularTable { table: self.table, fallback }
    }

    pub fn insert(&mut self, plural: impl Into<String>, singular: impl Into<String>) {
        self.table.insert(plural.into(), singular.into());
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<S: Singularize> Singularize for SingularTable<S> {
    fn singular(&self, plural: &str) -> String {
        match self.table.get(plural) {
            Some(singular) => singular.clone(),
            None => self.fallback.singular(plural),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(type_name_of("pet"), "Pet");
        assert_eq!(type_name_of("owner_name"), "OwnerName");
        assert_eq!(type_name_of("createdOn"), "CreatedOn");
        assert_eq!(type_name_of("html_URL"), "HtmlURL");
        assert_eq!(type_name_of("__meta__data"), "MetaData");
        assert_eq!(type_name_of("OwnerName"), "OwnerName");
        assert_eq!(type_name_of(""), "");
    }

    #[test]
    fn property_names() {
        assert_eq!(property_name_of("owner_name"), "ownerName");
        assert_eq!(property_name_of("Pet"), "pet");
        assert_eq!(property_name_of("id"), "id");
        assert_eq!(property_name_of("_"), "_");
    }

    #[test]
    fn drop_last_char_is_naive() {
        assert_eq!(DropLastChar.singular("tags"), "tag");
        assert_eq!(DropLastChar.singular("boxes"), "boxe");
        assert_eq!(DropLastChar.singular("cafés"), "café");
        assert_eq!(DropLastChar.singular(""), "");
    }

    #[test]
    fn table_overrides_then_falls_back() {
        let mut table = SingularTable::new(HashMap::new());
        table.insert("people", "person");
        assert_eq!(table.singular("people"), "person");
        assert_eq!(table.singular("tags"), "tag");

        let keep = table.with_fallback(|s: &str| s.to_string());
        assert_eq!(keep.singular("data"), "data");
        assert_eq!(keep.singular("people"), "person");
    }
}
