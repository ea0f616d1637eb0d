//! Naming and semantic refinement pass.
//!
//! Walks a merged tree top-down and rebuilds it:
//! - objects and arrays take the type name derived from the key they sit
//!   under (the root takes the caller's name);
//! - array elements are named after the singular of the array's name and
//!   re-unified, since promotion can change a leaf's variant;
//! - string leaves that hold an absolute URL or one of the fixed date
//!   formats become `Url` / `Date`.
//!
//! The input tree is only borrowed; the result shares nothing with it.
pub mod str;

use indexmap::IndexMap;
use log::{debug, trace};

use crate::error::MergeError;
use crate::merge::arr::representative;
use crate::naming::{type_name_of, DropLastChar, Singularize};
use crate::schema::Schema;

// ------------------------------ Front API --------------------------------- //

/// Upgrade with the default (drop-last-character) singularizer.
pub fn upgrade(tree: &Schema, name: &str) -> Result<Schema, MergeError> {
    Upgrader::new().upgrade(tree, name)
}

pub struct Upgrader<S = DropLastChar> {
    singularize: S,
    through_optionals: bool,
}

impl Upgrader {
    pub fn new() -> Self {
        Self { singularize: DropLastChar, through_optionals: false }
    }
}

impl Default for Upgrader {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Singularize> Upgrader<S> {
    pub fn with_singularizer<T: Singularize>(self, singularize: T) -> Upgrader<T> {
        Upgrader { singularize, through_optionals: self.through_optionals }
    }

    /// Also descend into `Optional` nodes. Off by default: optional subtrees
    /// are passed through as merged.
    pub fn through_optionals(mut self, yes: bool) -> Self {
        self.through_optionals = yes;
        self
    }

    pub fn upgrade(&self, tree: &Schema, name: &str) -> Result<Schema, MergeError> {
        debug!("upgrading `{name}` ({})", tree.kind());
        self.visit(tree, name)
    }

    fn visit(&self, tree: &Schema, name: &str) -> Result<Schema, MergeError> {
        match tree {
            Schema::Text(value) => Ok(promote_text(value, name)),
            Schema::Object { fields, .. } => {
                let fields = fields
                    .iter()
                    .map(|(key, value)| self.visit(value, key).map(|v| (key.clone(), v)))
                    .collect::<Result<IndexMap<_, _>, _>>()?;
                Ok(Schema::Object { name: type_name_of(name), fields })
            }
            Schema::Array { values, .. } => {
                let element_name = self.singularize.singular(name);
                let values = values
                    .iter()
                    .map(|value| self.visit(value, &element_name))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Schema::Array { name: type_name_of(name), values: representative(values)? })
            }
            Schema::Optional(Some(inner)) if self.through_optionals => {
                Ok(Schema::optional(self.visit(inner, name)?))
            }
            other => Ok(other.clone()),
        }
    }
}

fn promote_text(value: &str, name: &str) -> Schema {
    if let Some(url) = str::as_url(value) {
        trace!("`{name}`: text → url");
        return Schema::Url(url);
    }
    if let Some(format) = str::date_format_of(value) {
        trace!("`{name}`: text → date ({format:?})");
        return Schema::Date(format);
    }
    Schema::Text(value.to_string())
}

// ------------------------------- Tests ------------------------------------ //
