use std::ops::Range;

use regex::Regex;

/// One numeric token: the literal digits (sign and fractional part
/// included) plus the unit suffix that was attached to it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TokenMatch {
    pub literal: String,
    pub suffix: Option<String>,
}

/// Compiled token grammars. Built once at startup and passed to whichever
/// pass needs to scan text; there is no process-global pattern state.
#[derive(Debug)]
pub(crate) struct NumberScanner {
    word: Regex,
    currency: Regex,
    date: Regex,
}

impl NumberScanner {
    pub(crate) fn new() -> Self {
        Self {
            // Grammar A: literal with an optional case-insensitive word
            // suffix, optionally pluralized.
            word: Regex::new(r"(-?\d+(?:\.\d*)?)(?:\s*((?i:million|billion|thousand|trillion))s?)?")
                .expect("hardcoded word-suffix regex is valid"),
            // Grammar B: $-prefixed literal with a mandatory exact-case
            // letter suffix. The `$` is consumed but the literal capture
            // starts after it; lowercase `m` must not trigger this grammar.
            currency: Regex::new(r"\$(-?\d+(?:\.\d*)?)\s*([MBT])")
                .expect("hardcoded currency-suffix regex is valid"),
            // Fiscal-year mentions; tokens inside these spans are not
            // magnitudes and are masked out of every scan.
            date: Regex::new(r"FY\s*(?:19|20)\d\d").expect("hardcoded date regex is valid"),
        }
    }

    /// Scans `text` left to right, yielding non-overlapping matches from
    /// either grammar. Leftmost literal wins; when both grammars start at
    /// the same literal, the currency grammar wins because it is the more
    /// specific of the two. Matches overlapping a fiscal-year span are
    /// dropped.
    pub(crate) fn scan(&self, text: &str) -> Vec<TokenMatch> {
        let date_spans: Vec<Range<usize>> =
            self.date.find_iter(text).map(|found| found.range()).collect();

        let mut matches = Vec::new();
        let mut pos = 0;
        while pos < text.len() {
            let word = self.word.captures_at(text, pos);
            let currency = self.currency.captures_at(text, pos);

            let (span, token) = match (word, currency) {
                (None, None) => break,
                (Some(word), None) => (word_span(&word), word_token(&word)),
                (None, Some(currency)) => (currency_span(&currency), currency_token(&currency)),
                (Some(word), Some(currency)) => {
                    let word_start = word_span(&word).start;
                    let currency_start = currency_span(&currency).start;
                    if currency_start <= word_start {
                        (currency_span(&currency), currency_token(&currency))
                    } else {
                        (word_span(&word), word_token(&word))
                    }
                }
            };

            pos = span.end.max(pos + 1);
            if !overlaps_any(&span, &date_spans) {
                matches.push(token);
            }
        }

        matches
    }
}

fn overlaps_any(span: &Range<usize>, masked: &[Range<usize>]) -> bool {
    masked
        .iter()
        .any(|mask| span.start < mask.end && mask.start < span.end)
}

fn word_span(caps: &regex::Captures<'_>) -> Range<usize> {
    caps.get(0).map_or(0..0, |group| group.range())
}

fn word_token(caps: &regex::Captures<'_>) -> TokenMatch {
    TokenMatch {
        literal: caps[1].to_string(),
        suffix: caps.get(2).map(|group| group.as_str().to_string()),
    }
}

fn currency_span(caps: &regex::Captures<'_>) -> Range<usize> {
    let start = caps.get(1).map_or(0, |group| group.start());
    let end = caps.get(0).map_or(start, |group| group.end());
    start..end
}

fn currency_token(caps: &regex::Captures<'_>) -> TokenMatch {
    TokenMatch {
        literal: caps[1].to_string(),
        suffix: Some(caps[2].to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{NumberScanner, TokenMatch};

    fn matched(literal: &str, suffix: Option<&str>) -> TokenMatch {
        TokenMatch {
            literal: literal.to_string(),
            suffix: suffix.map(str::to_string),
        }
    }

    #[test]
    fn matches_currency_letter_suffix() {
        let scanner = NumberScanner::new();
        let found = scanner.scan("Revenue was $2.5M last year");
        assert_eq!(found, vec![matched("2.5", Some("M"))]);
    }

    #[test]
    fn matches_word_suffix() {
        let scanner = NumberScanner::new();
        let found = scanner.scan("We grew 3.1 million units");
        assert_eq!(found, vec![matched("3.1", Some("million"))]);
    }

    #[test]
    fn word_suffix_is_case_insensitive_and_plural_aware() {
        let scanner = NumberScanner::new();
        assert_eq!(
            scanner.scan("about 4 Billions"),
            vec![matched("4", Some("Billion"))]
        );
    }

    #[test]
    fn bare_literal_yields_empty_suffix() {
        let scanner = NumberScanner::new();
        assert_eq!(scanner.scan("Total: 42"), vec![matched("42", None)]);
    }

    #[test]
    fn lowercase_currency_letter_does_not_trigger_grammar_b() {
        let scanner = NumberScanner::new();
        assert_eq!(scanner.scan("fees of $5m apply"), vec![matched("5", None)]);
    }

    #[test]
    fn currency_wins_over_word_grammar_at_same_literal() {
        let scanner = NumberScanner::new();
        assert_eq!(scanner.scan("$7 B"), vec![matched("7", Some("B"))]);
    }

    #[test]
    fn scans_multiple_tokens_left_to_right() {
        let scanner = NumberScanner::new();
        let found = scanner.scan("sold 3 units for $4M and 2 thousand spares");
        assert_eq!(
            found,
            vec![
                matched("3", None),
                matched("4", Some("M")),
                matched("2", Some("thousand")),
            ]
        );
    }

    #[test]
    fn negative_and_trailing_dot_literals_match() {
        let scanner = NumberScanner::new();
        assert_eq!(
            scanner.scan("a swing of -12. points"),
            vec![matched("-12.", None)]
        );
    }

    #[test]
    fn fiscal_year_spans_are_masked() {
        let scanner = NumberScanner::new();
        assert_eq!(
            scanner.scan("FY 2025 revenue reached 300"),
            vec![matched("300", None)]
        );
        assert_eq!(scanner.scan("see FY2024 guidance"), Vec::<TokenMatch>::new());
    }
}
