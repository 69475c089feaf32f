use crate::model::Table;
use crate::table_parse::{
    looks_numeric, modal_width, normalize_rows, soft_split_line_into_cells, split_line_into_cells,
};

/// Minimum cells for a line to count as a table row.
const MIN_COLS: usize = 2;
/// Minimum consecutive rows to accept a group as a table.
const MIN_ROWS: usize = 2;

fn line_cells(line: &str) -> Vec<String> {
    let cells = split_line_into_cells(line);
    if cells.len() >= MIN_COLS {
        return cells;
    }

    // Some extractions collapse column gaps to single spaces. Only accept a
    // soft split for lines that are clearly tabular: enough tokens, at
    // least half of them numeric. Prose and "Total: 42"-style summary
    // lines must not form tables, or the irregular-page fallback would
    // never get a chance to run.
    let soft_cells = soft_split_line_into_cells(line);
    let numeric = soft_cells.iter().filter(|cell| looks_numeric(cell)).count();
    if soft_cells.len() >= 4 && numeric * 2 >= soft_cells.len() {
        return soft_cells;
    }

    Vec::new()
}

/// Groups consecutive multi-cell lines of a page's text into rectangular
/// tables. Rows are padded to the widest row with `None` cells; groups
/// whose modal width is below two cells are discarded as noise.
pub(crate) fn detect_tables(page_text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();

    let flush_current = |rows: &mut Vec<Vec<String>>, tables: &mut Vec<Table>| {
        if rows.len() >= MIN_ROWS && modal_width(rows) >= MIN_COLS {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            tables.push(Table {
                rows: normalize_rows(rows, width),
            });
        }
        rows.clear();
    };

    for line in page_text.lines() {
        let cells = line_cells(line);
        if cells.len() >= MIN_COLS {
            current_rows.push(cells);
        } else {
            flush_current(&mut current_rows, &mut tables);
        }
    }

    flush_current(&mut current_rows, &mut tables);
    tables
}
