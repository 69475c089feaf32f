use crate::error::ExtractError;
use crate::model::RecognizedNumber;
use crate::token_scan::TokenMatch;
use crate::units::suffix_multiplier;

/// Turns one token match into a `RecognizedNumber`. A suffix-less literal
/// keeps its parsed value; a suffixed one is scaled by the suffix's
/// multiplier and its raw text records both parts. The grammar should only
/// produce parseable literals, but float parsing still rejects edge cases
/// (a bare "."), so failures surface as `BadNumericLiteral` for the caller
/// to skip.
pub(crate) fn normalize(
    token: &TokenMatch,
    page_index: usize,
) -> Result<RecognizedNumber, ExtractError> {
    let literal: f64 = token
        .literal
        .parse()
        .map_err(|_| ExtractError::BadNumericLiteral(token.literal.clone()))?;

    match &token.suffix {
        None => Ok(RecognizedNumber {
            raw_text: token.literal.clone(),
            value: literal,
            page_index,
        }),
        Some(suffix) => Ok(RecognizedNumber {
            raw_text: format!("{} {suffix}", token.literal),
            value: literal * suffix_multiplier(suffix)?,
            page_index,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::normalize;
    use crate::error::ExtractError;
    use crate::token_scan::TokenMatch;

    fn token(literal: &str, suffix: Option<&str>) -> TokenMatch {
        TokenMatch {
            literal: literal.to_string(),
            suffix: suffix.map(str::to_string),
        }
    }

    #[test]
    fn suffixless_literal_keeps_its_value_and_text() {
        let number = normalize(&token("450", None), 3).unwrap();
        assert_eq!(number.value, 450.0);
        assert_eq!(number.raw_text, "450");
        assert_eq!(number.page_index, 3);
    }

    #[test]
    fn suffix_scales_value_and_joins_raw_text() {
        let number = normalize(&token("2.5", Some("M")), 0).unwrap();
        assert_eq!(number.value, 2_500_000.0);
        assert_eq!(number.raw_text, "2.5 M");

        let number = normalize(&token("3.1", Some("million")), 1).unwrap();
        assert_eq!(number.value, 3_100_000.0);
        assert_eq!(number.raw_text, "3.1 million");
    }

    #[test]
    fn unparseable_literal_is_reported() {
        let err = normalize(&token("--", None), 0).unwrap_err();
        assert!(matches!(err, ExtractError::BadNumericLiteral(literal) if literal == "--"));
    }
}
