use std::collections::HashMap;

pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    for ch in trimmed.chars() {
        if ch == '\t' {
            if !current.trim().is_empty() {
                cells.push(current.trim().to_string());
                current.clear();
            }
            whitespace_run = 0;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                if !current.trim().is_empty() {
                    cells.push(current.trim().to_string());
                    current.clear();
                }
                continue;
            }
            current.push(' ');
            continue;
        }

        whitespace_run = 0;
        current.push(ch);
    }

    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }

    cells
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Accepts a digit-led token, optionally signed, $-prefixed, or
/// parenthesized the way financial statements negate values.
pub(crate) fn looks_numeric(cell: &str) -> bool {
    let inner = cell
        .trim()
        .trim_start_matches(['(', '$', '-'])
        .trim_end_matches([')', '%']);
    !inner.is_empty() && inner.chars().all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | ','))
}

/// Pads ragged rows to `width`; padding cells are `None`, distinct from a
/// cell that held an empty string.
pub(crate) fn normalize_rows(rows: &[Vec<String>], width: usize) -> Vec<Vec<Option<String>>> {
    rows.iter()
        .map(|row| {
            let mut out: Vec<Option<String>> = row.iter().cloned().map(Some).collect();
            out.resize(width, None);
            out
        })
        .collect()
}

pub(crate) fn modal_width(rows: &[Vec<String>]) -> usize {
    let mut freq = HashMap::new();
    for width in rows.iter().map(Vec::len) {
        *freq.entry(width).or_insert(0_usize) += 1;
    }

    freq.into_iter()
        .max_by_key(|(width, count)| (*count, *width))
        .map_or(0, |(width, _)| width)
}
