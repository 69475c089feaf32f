/// A numeric quantity recognized somewhere in the document, already scaled
/// to its canonical magnitude. `value` is the matched literal times exactly
/// one multiplier (1 when none applies); a suffix-bearing match is never
/// additionally scaled by a table or page multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedNumber {
    pub raw_text: String,
    pub value: f64,
    pub page_index: usize,
}

/// A rectangular grid of cells. `None` marks a cell that was absent from the
/// source row (padding from ragged-row normalization), which is distinct
/// from a cell that contained an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<Option<String>>>,
}

/// Per-page input to the recognition engine: the plain extracted text plus
/// any structurally detected tables. Produced by `pdf_reader`/`table_detect`
/// but the engine accepts it from any source, so the core stays testable
/// without a PDF on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInput {
    pub index: usize,
    pub text: String,
    pub tables: Vec<Table>,
}
