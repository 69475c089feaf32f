use crate::error::ExtractError;
use crate::model::{RecognizedNumber, Table};
use crate::normalize::normalize;
use crate::token_scan::NumberScanner;
use crate::units::{MultiplierMap, first_header_phrase};

/// Rows considered as candidate headers. Unit headers empirically sit in
/// row 0 or 1; row 2 is included defensively.
const HEADER_ROWS: usize = 3;

/// Scans one table for candidates, resolving per-column multipliers from
/// its header rows first.
///
/// If any of the first three rows contains a unit phrase, a fresh
/// column-to-multiplier map replaces `carried`; otherwise the map from the
/// previous table on this page is reused unchanged, treating a header-less
/// table as a visual continuation (sub-table) of its predecessor rather
/// than an independent one.
///
/// Data rows (index 2 onward) are token-scanned cell by cell. Suffix-less
/// matches are scaled by their column's multiplier; matches that already
/// carry a suffix are self-scaled and pass through untouched.
pub(crate) fn scan_table(
    table: &Table,
    carried: &mut MultiplierMap,
    scanner: &NumberScanner,
    page_index: usize,
) -> Result<Vec<RecognizedNumber>, ExtractError> {
    let mut fresh = MultiplierMap::default();
    let mut found_new_headers = false;
    for row in table.rows.iter().take(HEADER_ROWS) {
        for (column, cell) in row.iter().enumerate() {
            let Some(text) = cell else { continue };
            if let Some(multiplier) = first_header_phrase(text) {
                fresh.insert(column, multiplier);
                found_new_headers = true;
            }
        }
    }
    if found_new_headers {
        *carried = fresh;
    }

    let mut candidates = Vec::new();
    for row in table.rows.iter().skip(2) {
        for (column, cell) in row.iter().enumerate() {
            let Some(text) = cell else { continue };
            for token in scanner.scan(text) {
                match normalize(&token, page_index) {
                    Ok(mut number) => {
                        if token.suffix.is_none() {
                            number.value *= carried.get(column);
                        }
                        candidates.push(number);
                    }
                    Err(ExtractError::BadNumericLiteral(literal)) => {
                        tracing::warn!(page = page_index, %literal, "skipping unparseable cell literal");
                    }
                    Err(error) => return Err(error),
                }
            }
        }
    }

    Ok(candidates)
}
