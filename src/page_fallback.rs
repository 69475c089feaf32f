use crate::error::ExtractError;
use crate::model::RecognizedNumber;
use crate::normalize::normalize;
use crate::token_scan::NumberScanner;
use crate::units::find_header_phrases;

/// Minimum line count for a page to plausibly hold a mis-detected table.
const MIN_LINES: usize = 4;
/// Leading lines inspected for a page-wide unit phrase.
const HEADER_LINES: usize = 3;

/// Last-resort pass for pages where table detection found nothing. Some
/// filings lay tables out irregularly enough that no grid is recognized,
/// yet still announce their unit in the first lines ("(dollars in
/// millions)"). When exactly one unit phrase appears there, it is applied
/// as a blanket multiplier to every suffix-less number further down the
/// page. Zero phrases or several occurrences mean the unit cannot be
/// attributed without column structure, so the pass abstains entirely.
pub(crate) fn scan_irregular_page(
    text: &str,
    scanner: &NumberScanner,
    page_index: usize,
) -> Result<Vec<RecognizedNumber>, ExtractError> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < MIN_LINES {
        return Ok(Vec::new());
    }

    let mut page_multipliers = Vec::new();
    for line in &lines[..HEADER_LINES] {
        page_multipliers.extend(find_header_phrases(line));
    }
    let [multiplier] = page_multipliers.as_slice() else {
        return Ok(Vec::new());
    };

    let mut candidates = Vec::new();
    for line in &lines[HEADER_LINES..] {
        for token in scanner.scan(line) {
            match normalize(&token, page_index) {
                Ok(mut number) => {
                    if token.suffix.is_none() {
                        number.value *= multiplier;
                    }
                    candidates.push(number);
                }
                Err(ExtractError::BadNumericLiteral(literal)) => {
                    tracing::warn!(page = page_index, %literal, "skipping unparseable fallback literal");
                }
                Err(error) => return Err(error),
            }
        }
    }

    Ok(candidates)
}
