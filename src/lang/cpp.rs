//! C++ atoms: identifiers, integer and floating literals, and string and
//! character literals with their encoding and raw forms

use super::{
    AtomScanner, BlockRules, at_leading_fraction, render_with, scan_exponent, scan_identifier,
    scan_radix_digits, suffix_in,
};
use crate::blocks::BlockRule;
use crate::charset::{self, CharacterFlags};
use crate::cursor::Cursor;
use crate::error::{LexErrorKind, Radix};
use crate::token::TokenKind;
use smallvec::smallvec;

const FLOAT_SUFFIXES: &[&str] = &["", "f", "l"];
const INTEGER_SUFFIXES: &[&str] = &["", "u", "ul", "ull", "l", "lu", "ll", "llu"];

/// Longest raw string delimiter, excluding the quote and parentheses
const MAX_RAW_DELIMITER: usize = 16;

/// A literal introduced by an identifier-like prefix
#[derive(Clone, Copy)]
struct Prefixed {
    prefix: &'static str,
    string: TokenKind<'static>,
    /// `None` for raw strings, which have no character form
    character: Option<TokenKind<'static>>,
}

impl Prefixed {
    const fn raw(prefix: &'static str) -> Self {
        Self {
            prefix,
            string: TokenKind::RawString,
            character: None,
        }
    }

    const fn encoded(
        prefix: &'static str,
        string: TokenKind<'static>,
        character: TokenKind<'static>,
    ) -> Self {
        Self {
            prefix,
            string,
            character: Some(character),
        }
    }
}

/// Longer prefixes come first so that `u8` is not read as `u`
const PREFIXED: &[Prefixed] = &[
    Prefixed::raw("u8R"),
    Prefixed::raw("LR"),
    Prefixed::raw("uR"),
    Prefixed::raw("UR"),
    Prefixed::raw("R"),
    Prefixed::encoded("u8", TokenKind::Utf8String, TokenKind::Utf8Char),
    Prefixed::encoded("L", TokenKind::WideString, TokenKind::WideChar),
    Prefixed::encoded("u", TokenKind::Utf16String, TokenKind::Utf16Char),
    Prefixed::encoded("U", TokenKind::Utf32String, TokenKind::Utf32Char),
];

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CppScanner;

impl AtomScanner for CppScanner {
    fn block_rules(&self) -> BlockRules {
        smallvec![
            BlockRule::line_comment("//"),
            BlockRule::block_comment("/*", "*/"),
            BlockRule::continued_line_directive("#", true),
        ]
    }

    fn claims_literal(&self, cursor: &Cursor<'_>) -> bool {
        at_leading_fraction(cursor)
    }

    fn scan(&self, cursor: &mut Cursor<'_>) -> Result<TokenKind<'static>, LexErrorKind> {
        match cursor.peek() {
            Some(b) if charset::is(b, CharacterFlags::ALPHA) => {
                if let Some(literal) = self.scan_prefixed(cursor) {
                    return literal;
                }
                scan_identifier(cursor);
                Ok(TokenKind::Id)
            }
            Some(b) if charset::is(b, CharacterFlags::DIGIT) => self.scan_number(cursor),
            Some(b'.') if at_leading_fraction(cursor) => self.scan_number(cursor),
            Some(b'"') => {
                cursor.bump();
                self.scan_quoted(cursor, b'"', LexErrorKind::UnterminatedString)?;
                Ok(TokenKind::String)
            }
            Some(b'\'') => {
                cursor.bump();
                self.scan_char(cursor)?;
                Ok(TokenKind::Char)
            }
            _ => Err(LexErrorKind::InvalidCharacter {
                character: self.render_char(cursor.peek_char()),
            }),
        }
    }

    fn render_char(&self, ch: Option<char>) -> String {
        render_with(ch, |code| match code {
            0..=0xff => format!("'\\{code:03o}'"),
            0x100..=0xffff => format!("'\\u{code:04X}'"),
            _ => format!("'\\U{code:08X}'"),
        })
    }
}

impl CppScanner {
    /// Scans an encoding-prefixed or raw literal if one starts at the cursor
    fn scan_prefixed(
        &self,
        cursor: &mut Cursor<'_>,
    ) -> Option<Result<TokenKind<'static>, LexErrorKind>> {
        let literal = PREFIXED.iter().find(|literal| {
            cursor.starts_with(literal.prefix)
                && match cursor.peek_at(literal.prefix.len()) {
                    Some(b'"') => true,
                    Some(b'\'') => literal.character.is_some(),
                    _ => false,
                }
        })?;

        cursor.bump_n(literal.prefix.len());
        let result = match (cursor.bump(), literal.character) {
            (_, None) => self.scan_raw(cursor).map(|()| literal.string),
            (Some(b'"'), Some(_)) => self
                .scan_quoted(cursor, b'"', LexErrorKind::UnterminatedString)
                .map(|()| literal.string),
            (_, Some(character)) => self.scan_char(cursor).map(|()| character),
        };
        Some(result)
    }

    fn scan_number(&self, cursor: &mut Cursor<'_>) -> Result<TokenKind<'static>, LexErrorKind> {
        let start = cursor.pos();
        let mut kind = TokenKind::Decimal;

        if cursor.peek() == Some(b'0') && matches!(cursor.peek_at(1), Some(b'x' | b'X')) {
            cursor.bump_n(2);
            scan_radix_digits(cursor, CharacterFlags::XDIGIT, Radix::Hexadecimal, self)?;
            kind = TokenKind::Hexadecimal;
        } else {
            cursor.eat_while(CharacterFlags::DIGIT);
            let digits = cursor.slice_from(start);

            // A leading zero makes an octal constant, which takes no fraction or exponent
            if digits.len() > 1 && digits.starts_with('0') {
                let bad = digits
                    .bytes()
                    .find(|&b| !charset::is(b, CharacterFlags::ODIGIT));
                if let Some(bad) = bad {
                    return Err(LexErrorKind::InvalidDigit {
                        digit: self.render_char(Some(char::from(bad))),
                        radix: Radix::Octal,
                    });
                }
                kind = TokenKind::Octal;
            }

            if kind == TokenKind::Decimal && cursor.eat(b'.') {
                cursor.eat_while(CharacterFlags::DIGIT);
                kind = TokenKind::Float;
            }

            if kind != TokenKind::Octal && scan_exponent(cursor)? {
                kind = TokenKind::Float;
            }
        }

        let suffix_start = cursor.pos();
        cursor.eat_while(CharacterFlags::ALNUM);
        let suffix = cursor.slice_from(suffix_start);

        if kind == TokenKind::Float {
            if !suffix_in(suffix, FLOAT_SUFFIXES) {
                return Err(LexErrorKind::InvalidFloatSuffix);
            }
        } else if !suffix_in(suffix, INTEGER_SUFFIXES) {
            return Err(LexErrorKind::InvalidIntegerSuffix);
        }

        Ok(kind)
    }

    /// Scans the body of a character literal after its opening quote
    fn scan_char(&self, cursor: &mut Cursor<'_>) -> Result<(), LexErrorKind> {
        if cursor.eat(b'\'') {
            return Err(LexErrorKind::EmptyChar);
        }
        self.scan_quoted(cursor, b'\'', LexErrorKind::UnterminatedChar)
    }

    /// Scans through the closing `quote`, validating escape sequences
    fn scan_quoted(
        &self,
        cursor: &mut Cursor<'_>,
        quote: u8,
        unterminated: LexErrorKind,
    ) -> Result<(), LexErrorKind> {
        loop {
            match cursor.peek() {
                None | Some(b'\n') => return Err(unterminated),
                Some(b) if b == quote => {
                    cursor.bump();
                    return Ok(());
                }
                Some(b'\\') => {
                    cursor.bump();
                    if cursor.is_eof() {
                        return Err(unterminated);
                    }
                    self.scan_escape(cursor)?;
                }
                Some(_) => {
                    cursor.bump();
                }
            }
        }
    }

    /// Scans an escape sequence after its backslash
    fn scan_escape(&self, cursor: &mut Cursor<'_>) -> Result<(), LexErrorKind> {
        let escape = cursor.peek_char();
        cursor.bump_char();

        match escape {
            Some('a' | 'b' | 'f' | 'n' | 'r' | 't' | 'v' | '\\' | '\'' | '"' | '?') => Ok(()),
            Some('x') => {
                if cursor.eat_while(CharacterFlags::XDIGIT) == 0 {
                    return Err(LexErrorKind::EmptyHexEscape);
                }
                Ok(())
            }
            Some('u') => scan_fixed_hex(cursor, 4, LexErrorKind::ShortUniversalName),
            Some('U') => scan_fixed_hex(cursor, 8, LexErrorKind::ShortLongUniversalName),
            Some('0'..='7') => {
                // One octal digit is already consumed; up to two more may follow
                let more = cursor.span_at(0, CharacterFlags::ODIGIT).min(2);
                cursor.bump_n(more);
                Ok(())
            }
            other => Err(LexErrorKind::UnknownEscape {
                escape: self.render_char(other),
            }),
        }
    }

    /// Scans a raw string after `R"`: `delimiter( ... )delimiter"`
    fn scan_raw(&self, cursor: &mut Cursor<'_>) -> Result<(), LexErrorKind> {
        let start = cursor.pos();
        loop {
            match cursor.peek() {
                Some(b'(') => break,
                Some(b) if is_raw_delimiter_char(b) && cursor.pos() - start < MAX_RAW_DELIMITER => {
                    cursor.bump();
                }
                _ => return Err(LexErrorKind::InvalidRawDelimiter),
            }
        }
        let delimiter = cursor.slice_from(start);
        cursor.bump();

        loop {
            let Some(close) = cursor.find(")") else {
                cursor.advance_to(cursor.source().len());
                return Err(LexErrorKind::UnterminatedRawString);
            };
            cursor.advance_to(close + 1);
            if cursor.starts_with(delimiter) && cursor.peek_at(delimiter.len()) == Some(b'"') {
                cursor.bump_n(delimiter.len() + 1);
                return Ok(());
            }
        }
    }
}

/// Consumes exactly `count` hex digits
fn scan_fixed_hex(
    cursor: &mut Cursor<'_>,
    count: usize,
    short: LexErrorKind,
) -> Result<(), LexErrorKind> {
    if cursor.span_at(0, CharacterFlags::XDIGIT) < count {
        cursor.eat_while(CharacterFlags::XDIGIT);
        return Err(short);
    }
    cursor.bump_n(count);
    Ok(())
}

/// Raw delimiters are printable ASCII other than space, parentheses and backslash
fn is_raw_delimiter_char(b: u8) -> bool {
    charset::is(b, CharacterFlags::PRINT) && !matches!(b, b' ' | b'(' | b')' | b'\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Result<TokenKind<'static>, LexErrorKind>, &str) {
        let mut cursor = Cursor::new(source);
        let result = CppScanner.scan(&mut cursor);
        (result, cursor.slice_from(0))
    }

    #[test]
    fn test_identifier() {
        assert_eq!(scan("foo_1 bar"), (Ok(TokenKind::Id), "foo_1"));
        assert_eq!(scan("u8x"), (Ok(TokenKind::Id), "u8x"));
        assert_eq!(scan("R"), (Ok(TokenKind::Id), "R"));
    }

    #[test]
    fn test_integer_bases() {
        assert_eq!(scan("0x1F;"), (Ok(TokenKind::Hexadecimal), "0x1F"));
        assert_eq!(scan("017"), (Ok(TokenKind::Octal), "017"));
        assert_eq!(scan("0"), (Ok(TokenKind::Decimal), "0"));
        assert_eq!(scan("42u"), (Ok(TokenKind::Decimal), "42u"));
        assert_eq!(scan("10ULL"), (Ok(TokenKind::Decimal), "10ULL"));
    }

    #[test]
    fn test_floats() {
        assert_eq!(scan("3.14e-2"), (Ok(TokenKind::Float), "3.14e-2"));
        assert_eq!(scan(".5f"), (Ok(TokenKind::Float), ".5f"));
        assert_eq!(scan("1e10"), (Ok(TokenKind::Float), "1e10"));
        assert_eq!(scan("0.5"), (Ok(TokenKind::Float), "0.5"));
        assert_eq!(scan("2.L"), (Ok(TokenKind::Float), "2.L"));
    }

    #[test]
    fn test_number_errors() {
        assert_eq!(
            scan("018").0,
            Err(LexErrorKind::InvalidDigit {
                digit: "'8'".to_string(),
                radix: Radix::Octal
            })
        );
        assert_eq!(
            scan("0xg").0,
            Err(LexErrorKind::InvalidDigit {
                digit: "'g'".to_string(),
                radix: Radix::Hexadecimal
            })
        );
        assert_eq!(scan("1e+").0, Err(LexErrorKind::EmptyExponent));
        assert_eq!(scan("10QQ").0, Err(LexErrorKind::InvalidIntegerSuffix));
        assert_eq!(scan("1.0u").0, Err(LexErrorKind::InvalidFloatSuffix));
        assert_eq!(scan("1lul").0, Err(LexErrorKind::InvalidIntegerSuffix));
    }

    #[test]
    fn test_leading_zero_is_octal_before_fraction() {
        assert_eq!(scan("017.5"), (Ok(TokenKind::Octal), "017"));
        assert_eq!(
            scan("08.5").0,
            Err(LexErrorKind::InvalidDigit {
                digit: "'8'".to_string(),
                radix: Radix::Octal
            })
        );
        assert_eq!(scan("017e2").0, Err(LexErrorKind::InvalidIntegerSuffix));
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(scan(r#""a\n\x41" x"#), (Ok(TokenKind::String), r#""a\n\x41""#));
        assert_eq!(scan(r#""\101\0é\U0001F600""#).0, Ok(TokenKind::String));
        assert_eq!(scan(r#""\x""#).0, Err(LexErrorKind::EmptyHexEscape));
        assert_eq!(scan(r#""\u12""#).0, Err(LexErrorKind::ShortUniversalName));
        assert_eq!(scan(r#""\U1234""#).0, Err(LexErrorKind::ShortLongUniversalName));
        assert_eq!(
            scan(r#""\q""#).0,
            Err(LexErrorKind::UnknownEscape {
                escape: "'q'".to_string()
            })
        );
        assert_eq!(scan("\"a").0, Err(LexErrorKind::UnterminatedString));
        assert_eq!(scan("\"a\nb\"").0, Err(LexErrorKind::UnterminatedString));
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(scan(r"'\''"), (Ok(TokenKind::Char), r"'\''"));
        assert_eq!(scan("''").0, Err(LexErrorKind::EmptyChar));
        assert_eq!(scan("'a").0, Err(LexErrorKind::UnterminatedChar));
    }

    #[test]
    fn test_encoding_prefixes() {
        assert_eq!(scan(r#"L"wide""#).0, Ok(TokenKind::WideString));
        assert_eq!(scan("L'w'").0, Ok(TokenKind::WideChar));
        assert_eq!(scan(r#"u8"x""#).0, Ok(TokenKind::Utf8String));
        assert_eq!(scan("u8'x'").0, Ok(TokenKind::Utf8Char));
        assert_eq!(scan(r#"u"x""#).0, Ok(TokenKind::Utf16String));
        assert_eq!(scan("U'x'").0, Ok(TokenKind::Utf32Char));
    }

    #[test]
    fn test_raw_strings() {
        let source = r#"R"xy(a)" )x" )xy" tail"#;
        assert_eq!(scan(source), (Ok(TokenKind::RawString), r#"R"xy(a)" )x" )xy""#));
        assert_eq!(scan(r#"u8R"(\n)""#).0, Ok(TokenKind::RawString));
        assert_eq!(scan(r#"R"a b(x)a b""#).0, Err(LexErrorKind::InvalidRawDelimiter));
        assert_eq!(
            scan(r#"R"abcdefghijklmnopq(x)abcdefghijklmnopq""#).0,
            Err(LexErrorKind::InvalidRawDelimiter)
        );
        assert_eq!(scan(r#"R"(never"#).0, Err(LexErrorKind::UnterminatedRawString));
        assert_eq!(scan("R'x'"), (Ok(TokenKind::Id), "R"));
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            scan("@").0,
            Err(LexErrorKind::InvalidCharacter {
                character: "'@'".to_string()
            })
        );
        assert_eq!(CppScanner.render_char(Some('\x01')), "'\\001'");
        assert_eq!(CppScanner.render_char(Some('\'')), "'\\047'");
        assert_eq!(CppScanner.render_char(Some('é')), "'\\351'");
        assert_eq!(CppScanner.render_char(Some('€')), "'\\u20AC'");
        assert_eq!(CppScanner.render_char(None), "eof");
    }
}
