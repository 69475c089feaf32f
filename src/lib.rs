mod error;
mod model;
mod normalize;
mod options;
mod page_fallback;
mod pdf_reader;
mod reduce;
mod table_detect;
mod table_parse;
mod table_scan;
mod token_scan;
mod units;

use std::path::Path;

use crate::normalize::normalize;
use crate::page_fallback::scan_irregular_page;
use crate::pdf_reader::read_pdf_pages;
use crate::reduce::fold_max;
use crate::table_scan::scan_table;
use crate::token_scan::NumberScanner;
use crate::units::MultiplierMap;

pub use error::ExtractError;
pub use model::{PageInput, RecognizedNumber, Table};
pub use options::{PageSelection, ScanOptions};

/// Free-text pass: every token in the page text, taken at face value (a
/// suffix scales its own literal; nothing else does).
fn scan_page_text(
    scanner: &NumberScanner,
    page: &PageInput,
) -> Result<Vec<RecognizedNumber>, ExtractError> {
    let mut candidates = Vec::new();
    for token in scanner.scan(&page.text) {
        match normalize(&token, page.index) {
            Ok(number) => candidates.push(number),
            Err(ExtractError::BadNumericLiteral(literal)) => {
                tracing::warn!(page = page.index, %literal, "skipping unparseable literal");
            }
            Err(error) => return Err(error),
        }
    }
    Ok(candidates)
}

/// Runs the recognition passes over already-extracted pages and reduces
/// their candidates to the document's largest number.
///
/// Per page: the free-text pass, then the table pass (column multipliers
/// carried across header-less tables), then, only when no tables were
/// detected on the page, the irregular-table fallback. All candidates fold
/// into a page maximum by strict greater-than with first-wins ties, and
/// page maxima fold into the document maximum the same way, in page order.
///
/// Pages are independent of each other apart from that final fold, so this
/// is pure with respect to its input and safe to call on any page subset.
pub fn scan_pages(pages: &[PageInput]) -> Result<Option<RecognizedNumber>, ExtractError> {
    let scanner = NumberScanner::new();
    let mut document_max: Option<RecognizedNumber> = None;

    for page in pages {
        let mut candidates = scan_page_text(&scanner, page)?;

        let mut carried = MultiplierMap::default();
        for table in &page.tables {
            candidates.extend(scan_table(table, &mut carried, &scanner, page.index)?);
        }

        if page.tables.is_empty() {
            candidates.extend(scan_irregular_page(&page.text, &scanner, page.index)?);
        }

        let page_max = fold_max(None, candidates);
        if let Some(page_max) = &page_max {
            tracing::debug!(
                page = page.index,
                value = page_max.value,
                raw = %page_max.raw_text,
                "page maximum"
            );
        }
        document_max = fold_max(document_max, page_max);
    }

    Ok(document_max)
}

/// Extracts the largest recognized number from the PDF at `input_pdf`, or
/// `None` when the document contains no recognizable numbers at all.
pub fn find_largest_number(
    input_pdf: &Path,
    options: &ScanOptions,
) -> Result<Option<RecognizedNumber>, ExtractError> {
    let pages = read_pdf_pages(input_pdf, options.pages.as_ref())?;
    scan_pages(&pages)
}
