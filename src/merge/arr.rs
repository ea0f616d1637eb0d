use super::fold;
use crate::error::{Container, MergeError};
use crate::schema::Schema;

/// Pool the elements of both arrays and reduce them to one representative
/// element. Stays empty when neither side ever held an element.
pub(super) fn merge_array(
    name_a: String,
    mut values_a: Vec<Schema>,
    name_b: String,
    values_b: Vec<Schema>,
) -> Result<Schema, MergeError> {
    if name_a != name_b {
        return Err(MergeError::name_mismatch(Container::Array, &name_a, &name_b));
    }
    values_a.extend(values_b);
    Ok(Schema::Array { name: name_a, values: representative(values_a)? })
}

/// Zero or one element: the reduction of `values`.
pub(crate) fn representative(values: Vec<Schema>) -> Result<Vec<Schema>, MergeError> {
    match fold(values)? {
        Schema::Empty => Ok(Vec::new()),
        element => Ok(vec![element]),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{Container, MergeError};
    use crate::merge::{merge, reduce};
    use crate::schema::{NumberKind, Schema};
    use pretty_assertions::assert_eq;

    #[test]
    fn elements_flatten_to_one_shape() {
        let merged = reduce(vec![
            Schema::array("Tags", vec![Schema::text("a")]),
            Schema::array("Tags", vec![Schema::text("b")]),
        ])
        .unwrap();
        assert_eq!(merged, Schema::array("Tags", vec![Schema::text("a")]));
    }

    #[test]
    fn multi_element_samples_collapse() {
        let merged = merge(
            Schema::array("scores", vec![Schema::Number(NumberKind::Int), Schema::Number(NumberKind::Int)]),
            Schema::array("scores", vec![Schema::Number(NumberKind::Double)]),
        )
        .unwrap();
        assert_eq!(merged, Schema::array("scores", vec![Schema::Number(NumberKind::Double)]));
    }

    #[test]
    fn never_populated_stays_empty() {
        let merged = merge(Schema::array("tags", vec![]), Schema::array("tags", vec![])).unwrap();
        assert_eq!(merged, Schema::array("tags", vec![]));
        assert_eq!(merged.descriptor(), "[Any]");
    }

    #[test]
    fn element_records_pick_up_optional_keys() {
        let merged = merge(
            Schema::array("pets", vec![Schema::object("pets", [("name", Schema::text("rex"))])]),
            Schema::array("pets", vec![Schema::object("pets", [("age", Schema::Number(NumberKind::Int))])]),
        )
        .unwrap();
        assert_eq!(merged.descriptor(), "[Pets]");
        let Schema::Array { values, .. } = merged else { panic!("array") };
        let Schema::Object { fields, .. } = &values[0] else { panic!("object element") };
        assert!(fields.values().all(Schema::is_optional));
    }

    #[test]
    fn element_mismatch_has_no_sample_index() {
        let err = merge(
            Schema::array("xs", vec![Schema::Bool(true)]),
            Schema::array("xs", vec![Schema::text("x")]),
        )
        .unwrap_err();
        assert_eq!(err.sample(), None);

        let err = merge(Schema::array("a", vec![]), Schema::array("b", vec![])).unwrap_err();
        assert_eq!(err, MergeError::name_mismatch(Container::Array, "a", "b"));
    }
}
