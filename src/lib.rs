//! Infer one generalized, named shape from sample JSON documents.
//!
//! ```text
//! documents ─seed─▶ seed trees ─merge::reduce─▶ shape ─upgrade─▶ named shape ─emit─▶ model
//! ```
pub mod schema;
pub mod error;
pub mod naming;
pub mod merge;
pub mod upgrade;
pub mod seed;
pub mod emit;
pub mod cli;
pub mod jq_exec;
pub mod path_de;

pub use error::MergeError;
pub use merge::{merge, reduce};
pub use schema::{DateFormat, NumberKind, Schema};
pub use upgrade::{upgrade, Upgrader};
