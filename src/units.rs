use std::collections::HashMap;

use crate::error::ExtractError;

/// Header phrases ordered longest-first so the vocabulary scan picks the
/// longest phrase when several start at the same position.
const HEADER_PHRASES: [(&str, f64); 7] = [
    ("in thousands", 1e3),
    ("in millions", 1e6),
    ("$ millions", 1e6),
    ("(millions)", 1e6),
    ("($m)", 1e6),
    ("($)", 1.0),
    ("$m", 1e6),
];

/// Maps a matched unit suffix to its scale factor. The suffix vocabulary is
/// enumerated by the token grammars, so an unknown suffix means the grammar
/// and this table have drifted apart; that is reported as an error rather
/// than silently defaulting to 1.
pub(crate) fn suffix_multiplier(suffix: &str) -> Result<f64, ExtractError> {
    match suffix.to_ascii_lowercase().as_str() {
        "thousand" => Ok(1e3),
        "million" | "m" => Ok(1e6),
        "billion" | "b" => Ok(1e9),
        "trillion" | "t" => Ok(1e12),
        other => Err(ExtractError::UnknownUnit(other.to_string())),
    }
}

/// Finds every non-overlapping header-phrase occurrence in `text`, leftmost
/// first, longest phrase winning at a given position. Case-insensitive.
pub(crate) fn find_header_phrases(text: &str) -> Vec<f64> {
    let lower = text.to_lowercase();
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < lower.len() {
        let rest = &lower[pos..];
        if let Some((phrase, multiplier)) = HEADER_PHRASES
            .iter()
            .find(|(phrase, _)| rest.starts_with(phrase))
        {
            found.push(*multiplier);
            pos += phrase.len();
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    found
}

/// The first header phrase in `text`, if any.
pub(crate) fn first_header_phrase(text: &str) -> Option<f64> {
    find_header_phrases(text).into_iter().next()
}

/// Column-indexed scale factors with a read-only default of 1 for columns no
/// header ever mentioned. Lookups never create entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MultiplierMap {
    by_column: HashMap<usize, f64>,
}

impl MultiplierMap {
    pub(crate) fn insert(&mut self, column: usize, multiplier: f64) {
        self.by_column.insert(column, multiplier);
    }

    pub(crate) fn get(&self, column: usize) -> f64 {
        self.by_column.get(&column).copied().unwrap_or(1.0)
    }
}
