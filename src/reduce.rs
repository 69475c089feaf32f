use crate::model::RecognizedNumber;

/// Folds candidates into a running maximum. Strict greater-than replaces,
/// so on equal values the earliest candidate in scan order is kept. The
/// same comparator serves both the per-page fold and the document-level
/// fold over page maxima.
pub(crate) fn fold_max(
    current: Option<RecognizedNumber>,
    candidates: impl IntoIterator<Item = RecognizedNumber>,
) -> Option<RecognizedNumber> {
    candidates.into_iter().fold(current, |best, candidate| match best {
        Some(best) if candidate.value > best.value => Some(candidate),
        Some(best) => Some(best),
        None => Some(candidate),
    })
}
