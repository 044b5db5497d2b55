//! Error types for lexer construction and scanning
//!
//! Scan-time failures are returned as [`LexError`] values from
//! [`Lexer::next_token`](crate::Lexer::next_token); the host decides whether to
//! stop or keep pulling tokens. Construction failures are [`ConfigError`]s and
//! never produce a lexer.

use std::fmt;
use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// Scan-time error
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Construction-time error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Radix of an integer literal, used in digit diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Hexadecimal,
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Radix::Binary => "binary",
            Radix::Octal => "octal",
            Radix::Hexadecimal => "hexadecimal",
        })
    }
}

/// What went wrong while scanning a token
///
/// Rendered characters (`digit`, `escape`, `character`) are already formatted
/// the way the active language writes them, e.g. `'g'`, `'\001'`, `Chr(9)`,
/// `#9` or `eof`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A digit that is not valid for the literal's radix
    #[error("invalid digit {digit} in {radix} constant")]
    InvalidDigit { digit: String, radix: Radix },

    /// `e`/`E` with no digits after the optional sign
    #[error("exponent has no digits")]
    EmptyExponent,

    /// Suffix not on the float allow-list
    #[error("invalid float suffix")]
    InvalidFloatSuffix,

    /// Suffix not on the integer allow-list
    #[error("invalid integer suffix")]
    InvalidIntegerSuffix,

    #[error("\\x used with no following hex digits")]
    EmptyHexEscape,

    #[error("\\u needs 4 hexadecimal digits")]
    ShortUniversalName,

    #[error("\\U needs 8 hexadecimal digits")]
    ShortLongUniversalName,

    /// Backslash followed by a character with no escape meaning
    #[error("unknown escape sequence: {escape}")]
    UnknownEscape { escape: String },

    #[error("unterminated string")]
    UnterminatedString,

    #[error("unterminated character constant")]
    UnterminatedChar,

    #[error("empty character constant")]
    EmptyChar,

    #[error("unterminated raw string")]
    UnterminatedRawString,

    #[error("invalid raw string delimiter")]
    InvalidRawDelimiter,

    /// Pascal `#` with no decimal digits after it
    #[error("control string used with no following digits")]
    EmptyControlString,

    #[error("unterminated comment")]
    UnterminatedComment,

    #[error("unterminated directive")]
    UnterminatedDirective,

    #[error("unterminated free-form block")]
    UnterminatedFreeForm,

    /// No block rule, symbol or atom scanner claims the character
    #[error("invalid character in input: {character}")]
    InvalidCharacter { character: String },
}

/// A scan-time error with its source location
///
/// `line` is the line the offending construct started on, which for
/// multi-line constructs is not the line where the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source_name}:{line}: {kind}")]
pub struct LexError {
    /// Name of the source, used verbatim
    pub source_name: String,
    /// 1-based start line of the offending construct
    pub line: u32,
    /// What went wrong
    pub kind: LexErrorKind,
}

impl LexError {
    /// Creates a new scan error
    pub fn new(source_name: impl Into<String>, line: u32, kind: LexErrorKind) -> Self {
        Self {
            source_name: source_name.into(),
            line,
            kind,
        }
    }

    /// The diagnostic text without the location prefix
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Errors raised while building a lexer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A free-form delimiter is the empty string
    #[error("free-form delimiter must not be empty")]
    EmptyDelimiter,

    /// A free-form delimiter exceeds the length bound
    #[error("free-form delimiter '{delimiter}' is longer than {max} bytes")]
    DelimiterTooLong { delimiter: String, max: usize },

    /// The language tag names no known front-end
    #[error("invalid language: {0}")]
    UnknownLanguage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_display_format() {
        let error = LexError::new("main.cpp", 12, LexErrorKind::UnterminatedString);
        assert_eq!(error.to_string(), "main.cpp:12: unterminated string");
        assert_eq!(error.message(), "unterminated string");
    }

    #[test]
    fn test_invalid_digit_message() {
        let kind = LexErrorKind::InvalidDigit {
            digit: "'8'".to_string(),
            radix: Radix::Octal,
        };
        assert_eq!(kind.to_string(), "invalid digit '8' in octal constant");
    }

    #[test]
    fn test_escape_messages() {
        assert_eq!(
            LexErrorKind::EmptyHexEscape.to_string(),
            "\\x used with no following hex digits"
        );
        assert_eq!(
            LexErrorKind::ShortLongUniversalName.to_string(),
            "\\U needs 8 hexadecimal digits"
        );
        let unknown = LexErrorKind::UnknownEscape {
            escape: "'q'".to_string(),
        };
        assert_eq!(unknown.to_string(), "unknown escape sequence: 'q'");
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::DelimiterTooLong {
            delimiter: "<<<<<<<<<<<<<<<<".to_string(),
            max: 15,
        };
        assert_eq!(
            error.to_string(),
            "free-form delimiter '<<<<<<<<<<<<<<<<' is longer than 15 bytes"
        );
        assert_eq!(
            ConfigError::UnknownLanguage("cobol".to_string()).to_string(),
            "invalid language: cobol"
        );
    }

    #[test]
    fn test_error_from_conversions() {
        let lex: Error = LexError::new("a.bas", 1, LexErrorKind::EmptyExponent).into();
        assert!(matches!(lex, Error::Lex(_)));
        assert_eq!(lex.to_string(), "a.bas:1: exponent has no digits");

        let config: Error = ConfigError::EmptyDelimiter.into();
        assert!(matches!(config, Error::Config(ConfigError::EmptyDelimiter)));
    }

    #[test]
    fn test_radix_display() {
        assert_eq!(Radix::Binary.to_string(), "binary");
        assert_eq!(Radix::Hexadecimal.to_string(), "hexadecimal");
    }
}
