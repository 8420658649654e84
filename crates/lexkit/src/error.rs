//! Error kinds carried by `Invalid` tokens.

use thiserror::Error;

/// Errors reported inline as token data, never as control flow.
///
/// Malformed or unrecognized input does not abort tokenization; it surfaces
/// as an `Invalid` token carrying one of these, after which the stream
/// naturally terminates.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenError {
    #[error("found unexpected end of tokens")]
    UnexpectedEndOfTokens,

    /// The remaining input at the point where no lexical rule applied.
    #[error("found unrecognized '{0}' in input")]
    UnrecognizedInput(String),

    /// The partial content consumed before end of input, for diagnostics.
    #[error("found unterminated '{0}' in input")]
    UnterminatedString(String),

    #[error("found malformed number in input")]
    MalformedNumber,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            TokenError::UnrecognizedInput("@#".into()).to_string(),
            "found unrecognized '@#' in input"
        );
        assert_eq!(
            TokenError::UnterminatedString("abc".into()).to_string(),
            "found unterminated 'abc' in input"
        );
        assert_eq!(
            TokenError::MalformedNumber.to_string(),
            "found malformed number in input"
        );
    }
}
