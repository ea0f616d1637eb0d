//! Unification of sample trees.
//!
//! `reduce` folds an ordered list of samples into one generalized tree with
//! `merge` as the binary step and `Empty` as the seed. Shape information is
//! never dropped: keys and elements that were not always present end up
//! under `Optional`, numbers widen to `Double` once any sample is fractional.
//!
//! Sample order only decides which literal survives for `Text`/`Bool`/`Url`
//! leaves; the inferred shape does not depend on it.
pub mod arr;
pub mod num;
pub mod obj;

use log::debug;

use crate::error::MergeError;
use crate::schema::Schema;

// ------------------------------ Front API --------------------------------- //

/// Fold `samples` left to right. Failures carry the index of the sample that
/// could not be merged into the accumulated tree.
pub fn reduce<I>(samples: I) -> Result<Schema, MergeError>
where
    I: IntoIterator<Item = Schema>,
{
    let mut acc = Schema::Empty;
    let mut count = 0usize;
    for (i, sample) in samples.into_iter().enumerate() {
        acc = merge(acc, sample).map_err(|e| e.at(i))?;
        count += 1;
    }
    debug!("reduced {count} samples into `{}`", acc.descriptor());
    Ok(acc)
}

/// Same fold without sample bookkeeping; used for array elements so their
/// positions are not mistaken for sample indices.
pub(crate) fn fold<I>(values: I) -> Result<Schema, MergeError>
where
    I: IntoIterator<Item = Schema>,
{
    values.into_iter().try_fold(Schema::Empty, merge)
}

// -------------------------------- Merge ----------------------------------- //

pub fn merge(a: Schema, b: Schema) -> Result<Schema, MergeError> {
    use Schema::*;
    match (a, b) {
        (Empty, b) => Ok(b),
        (a, Empty) => Ok(a),

        (Optional(a), Optional(b)) => match (a, b) {
            (Some(a), Some(b)) => merge(*a, *b).map(Schema::optional),
            (Some(x), None) | (None, Some(x)) => Ok(Schema::optional(*x)),
            (None, None) => Ok(Schema::absent()),
        },
        (Optional(a), b) => match a {
            Some(a) => merge(*a, b).map(Schema::optional),
            None => Ok(Schema::optional(b)),
        },
        // the optional side's literal goes first
        (a, Optional(b)) => match b {
            Some(b) => merge(*b, a).map(Schema::optional),
            None => Ok(Schema::optional(a)),
        },

        // TODO: decide whether AND-ing sample values should become a plain `Bool`.
        (Bool(a), Bool(b)) => Ok(Bool(a && b)),
        (Number(a), Number(b)) => Ok(Number(num::widen(a, b))),
        (Text(a), Text(b)) => Ok(Text(if a.is_empty() { b } else { a })),

        (Object { name: na, fields: fa }, Object { name: nb, fields: fb }) => {
            obj::merge_object(na, fa, nb, fb)
        }
        (Array { name: na, values: va }, Array { name: nb, values: vb }) => {
            arr::merge_array(na, va, nb, vb)
        }

        (Url(a), Url(_)) => Ok(Url(a)),
        (Date(a), Date(b)) if a == b => Ok(Date(a)),

        (a, b) => Err(MergeError::unsupported(a.kind(), b.kind())),
    }
}

// ------------------------------- Tests ------------------------------------ //
