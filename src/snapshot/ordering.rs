use std::cmp::Ordering;

/// Strategy deciding the order of names inside a [`Snapshot`](super::Snapshot).
pub trait NameOrdering {
    fn compare(a: &str, b: &str) -> Ordering;
}

/// Shorter names first; names of equal length in ordinal order.
///
/// Length is counted in `char`s, so `"é"` and `"e"` have the same length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthThenLexical;

impl NameOrdering for LengthThenLexical {
    fn compare(a: &str, b: &str) -> Ordering {
        a.chars()
            .count()
            .cmp(&b.chars().count())
            .then_with(|| a.cmp(b))
    }
}
