//! Strict parsing of untrusted move text.
//!
//! Input comes from a terminal or a text-completion service. It is never
//! evaluated; anything that is not a comma-separated list of integers fails
//! closed with [`SourceError::Unparsable`].

use crate::error::SourceError;
use tracing::{debug, instrument};

/// Parses `row, col` or `(row, col)` into its integer parts.
///
/// Arity is not checked here. `1, 2, 3` parses to three values and is
/// rejected later by [`crate::GameState::validate`] as malformed.
#[instrument]
pub fn parse_candidate(text: &str) -> Result<Vec<i64>, SourceError> {
    let unparsable = || SourceError::Unparsable {
        input: text.to_string(),
    };

    let trimmed = text.trim();
    let inner = match (trimmed.strip_prefix('('), trimmed.strip_suffix(')')) {
        (Some(_), Some(_)) => &trimmed[1..trimmed.len() - 1],
        (None, None) => trimmed,
        _ => return Err(unparsable()),
    };

    let values = inner
        .split(',')
        .map(|piece| piece.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| unparsable())?;

    debug!(?values, "Parsed candidate");
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_pair() {
        assert_eq!(parse_candidate("2, 3").unwrap(), vec![2, 3]);
        assert_eq!(parse_candidate("  1,1\n").unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_parse_parenthesized_pair() {
        assert_eq!(parse_candidate("(3, 1)").unwrap(), vec![3, 1]);
        assert_eq!(parse_candidate(" ( 2 ,2 ) ").unwrap(), vec![2, 2]);
    }

    #[test]
    fn test_parse_keeps_wrong_arity() {
        assert_eq!(parse_candidate("1, 2, 3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_candidate("5").unwrap(), vec![5]);
    }

    #[test]
    fn test_parse_keeps_out_of_range_values() {
        assert_eq!(parse_candidate("(-1, 7)").unwrap(), vec![-1, 7]);
    }

    #[test]
    fn test_parse_rejects_non_integers() {
        for text in ["", "a, b", "1.5, 2", "(1, 2", "1, 2)", "1,,2", "Your move: (1, 2)"] {
            assert_eq!(
                parse_candidate(text),
                Err(SourceError::Unparsable {
                    input: text.to_string()
                }),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_parse_rejects_code() {
        assert!(parse_candidate("__import__('os').system('ls')").is_err());
    }
}
