use crate::schema::NumberKind;

/// `Double` wins as soon as either side has seen a fraction.
pub fn widen(a: NumberKind, b: NumberKind) -> NumberKind {
    match (a, b) {
        (NumberKind::Int, NumberKind::Int) => NumberKind::Int,
        _ => NumberKind::Double,
    }
}
