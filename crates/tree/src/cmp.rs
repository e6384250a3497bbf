use std::cmp::Ordering;

/// Ordinal case-insensitive ordering.
///
/// Compares char-wise uppercased forms, then falls back to the ordinal
/// comparison so the order is total and sorting with it is idempotent.
pub fn ordinal_ignore_case(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_uppercase)
        .cmp(b.chars().flat_map(char::to_uppercase));
    folded.then_with(|| a.cmp(b))
}
