//! BASIC atoms
//!
//! Numbers take `&H`, `&O` and `&B` radix prefixes and a type suffix; strings
//! escape a quote by doubling it. `REM` starts a comment rather than naming
//! anything.

use super::{
    AtomScanner, BlockRules, at_leading_fraction, render_with, scan_exponent, scan_identifier,
    scan_radix_digits, suffix_in,
};
use crate::blocks::{self, BlockRule};
use crate::charset::{self, CharacterFlags};
use crate::cursor::Cursor;
use crate::error::{LexErrorKind, Radix};
use crate::token::TokenKind;
use smallvec::smallvec;

const FLOAT_SUFFIXES: &[&str] = &["", "f", "r", "d", "@", "!", "#"];
const INTEGER_SUFFIXES: &[&str] = &["", "s", "us", "i", "ui", "l", "ul", "%", "&"];

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BasicScanner;

impl AtomScanner for BasicScanner {
    fn block_rules(&self) -> BlockRules {
        smallvec![
            BlockRule::line_comment("'"),
            BlockRule::free_form("[{", "}]"),
            BlockRule::line_directive("#", true),
        ]
    }

    fn claims_literal(&self, cursor: &Cursor<'_>) -> bool {
        at_leading_fraction(cursor)
            || radix_prefix(cursor).is_some_and(|(digits, _, _)| cursor.peek_is(2, digits))
    }

    fn scan(&self, cursor: &mut Cursor<'_>) -> Result<TokenKind<'static>, LexErrorKind> {
        match cursor.peek() {
            Some(b) if charset::is(b, CharacterFlags::ALPHA) => {
                let start = cursor.pos();
                scan_identifier(cursor);
                if cursor.slice_from(start).eq_ignore_ascii_case("rem") {
                    return Ok(blocks::finish_line_comment(cursor));
                }
                Ok(TokenKind::Id)
            }
            Some(b) if charset::is(b, CharacterFlags::DIGIT) => self.scan_number(cursor),
            Some(b'.') if at_leading_fraction(cursor) => self.scan_number(cursor),
            Some(b'&') if radix_prefix(cursor).is_some() => self.scan_number(cursor),
            Some(b'"') => {
                cursor.bump();
                scan_string(cursor)?;
                Ok(TokenKind::String)
            }
            _ => Err(LexErrorKind::InvalidCharacter {
                character: self.render_char(cursor.peek_char()),
            }),
        }
    }

    fn render_char(&self, ch: Option<char>) -> String {
        render_with(ch, |code| format!("Chr({code})"))
    }
}

impl BasicScanner {
    fn scan_number(&self, cursor: &mut Cursor<'_>) -> Result<TokenKind<'static>, LexErrorKind> {
        let mut kind = TokenKind::Decimal;

        if let Some((digits, radix, radix_kind)) = radix_prefix(cursor) {
            cursor.bump_n(2);
            scan_radix_digits(cursor, digits, radix, self)?;
            kind = radix_kind;
        } else {
            cursor.eat_while(CharacterFlags::DIGIT);
            if cursor.eat(b'.') {
                cursor.eat_while(CharacterFlags::DIGIT);
                kind = TokenKind::Float;
            }
            if scan_exponent(cursor)? {
                kind = TokenKind::Float;
            }
        }

        let suffix_start = cursor.pos();
        while cursor.peek().is_some_and(is_suffix_char) {
            cursor.bump();
        }
        let suffix = cursor.slice_from(suffix_start);

        match kind {
            TokenKind::Float if !suffix_in(suffix, FLOAT_SUFFIXES) => {
                Err(LexErrorKind::InvalidFloatSuffix)
            }
            TokenKind::Float => Ok(kind),
            // A float suffix turns a plain decimal integer into a float
            TokenKind::Decimal if suffix_in(suffix, FLOAT_SUFFIXES) && !suffix.is_empty() => {
                Ok(TokenKind::Float)
            }
            _ if suffix_in(suffix, INTEGER_SUFFIXES) => Ok(kind),
            _ => Err(LexErrorKind::InvalidIntegerSuffix),
        }
    }
}

/// The radix selected by an `&H`, `&O` or `&B` prefix at the cursor
fn radix_prefix(cursor: &Cursor<'_>) -> Option<(CharacterFlags, Radix, TokenKind<'static>)> {
    if cursor.peek() != Some(b'&') {
        return None;
    }
    match cursor.peek_at(1)?.to_ascii_lowercase() {
        b'h' => Some((CharacterFlags::XDIGIT, Radix::Hexadecimal, TokenKind::Hexadecimal)),
        b'o' => Some((CharacterFlags::ODIGIT, Radix::Octal, TokenKind::Octal)),
        b'b' => Some((CharacterFlags::BDIGIT, Radix::Binary, TokenKind::Binary)),
        _ => None,
    }
}

fn is_suffix_char(b: u8) -> bool {
    charset::is(b, CharacterFlags::ALNUM) || matches!(b, b'@' | b'!' | b'#' | b'%' | b'&')
}

/// Scans a string after its opening quote; `""` stands for one quote
fn scan_string(cursor: &mut Cursor<'_>) -> Result<(), LexErrorKind> {
    loop {
        match cursor.peek() {
            None | Some(b'\n') => return Err(LexErrorKind::UnterminatedString),
            Some(b'"') => {
                cursor.bump();
                if !cursor.eat(b'"') {
                    return Ok(());
                }
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }
}
