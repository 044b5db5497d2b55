//! Pascal atoms
//!
//! Numbers use `$`, `&` and `%` radix prefixes and carry no suffix. A string
//! is a chain of quoted segments and `#nnn` control characters, e.g.
//! `'line'#13#10'next'`.

use super::{
    AtomScanner, BlockRules, render_with, scan_exponent, scan_identifier, scan_radix_digits,
};
use crate::blocks::BlockRule;
use crate::charset::{self, CharacterFlags};
use crate::cursor::Cursor;
use crate::error::{LexErrorKind, Radix};
use crate::token::TokenKind;
use smallvec::smallvec;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PascalScanner;

impl AtomScanner for PascalScanner {
    fn block_rules(&self) -> BlockRules {
        smallvec![
            BlockRule::line_comment("//"),
            BlockRule::block_directive("(*$", "*)", false),
            BlockRule::block_directive("{$", "}", false),
            BlockRule::block_comment("(*", "*)"),
            BlockRule::block_comment("{", "}"),
        ]
    }

    fn claims_literal(&self, cursor: &Cursor<'_>) -> bool {
        match cursor.peek() {
            Some(b'#') => cursor.peek_is(1, CharacterFlags::DIGIT),
            Some(prefix) => {
                radix_prefix(prefix).is_some_and(|(digits, _, _)| cursor.peek_is(1, digits))
            }
            None => false,
        }
    }

    fn scan(&self, cursor: &mut Cursor<'_>) -> Result<TokenKind<'static>, LexErrorKind> {
        match cursor.peek() {
            Some(b) if charset::is(b, CharacterFlags::ALPHA) => {
                scan_identifier(cursor);
                Ok(TokenKind::Id)
            }
            Some(b) if charset::is(b, CharacterFlags::DIGIT) || radix_prefix(b).is_some() => {
                self.scan_number(cursor)
            }
            Some(b'\'' | b'#') => {
                scan_string(cursor)?;
                Ok(TokenKind::String)
            }
            _ => Err(LexErrorKind::InvalidCharacter {
                character: self.render_char(cursor.peek_char()),
            }),
        }
    }

    fn render_char(&self, ch: Option<char>) -> String {
        render_with(ch, |code| format!("#{code}"))
    }
}

impl PascalScanner {
    fn scan_number(&self, cursor: &mut Cursor<'_>) -> Result<TokenKind<'static>, LexErrorKind> {
        if let Some((digits, radix, kind)) = cursor.peek().and_then(radix_prefix) {
            cursor.bump();
            scan_radix_digits(cursor, digits, radix, self)?;
            return Ok(kind);
        }

        let mut kind = TokenKind::Decimal;
        cursor.eat_while(CharacterFlags::DIGIT);

        // `1..10` is a range, not the float `1.`
        if cursor.peek() == Some(b'.') && cursor.peek_at(1) != Some(b'.') {
            cursor.bump();
            cursor.eat_while(CharacterFlags::DIGIT);
            kind = TokenKind::Float;
        }
        if scan_exponent(cursor)? {
            kind = TokenKind::Float;
        }

        Ok(kind)
    }
}

fn radix_prefix(prefix: u8) -> Option<(CharacterFlags, Radix, TokenKind<'static>)> {
    match prefix {
        b'$' => Some((CharacterFlags::XDIGIT, Radix::Hexadecimal, TokenKind::Hexadecimal)),
        b'&' => Some((CharacterFlags::ODIGIT, Radix::Octal, TokenKind::Octal)),
        b'%' => Some((CharacterFlags::BDIGIT, Radix::Binary, TokenKind::Binary)),
        _ => None,
    }
}

/// Scans a chain of quoted segments and control characters
///
/// A doubled quote inside a segment reads as the end of one segment and the
/// start of the next, so it needs no special case.
fn scan_string(cursor: &mut Cursor<'_>) -> Result<(), LexErrorKind> {
    loop {
        match cursor.peek() {
            Some(b'\'') => {
                cursor.bump();
                scan_segment(cursor)?;
            }
            Some(b'#') => {
                cursor.bump();
                if cursor.eat_while(CharacterFlags::DIGIT) == 0 {
                    return Err(LexErrorKind::EmptyControlString);
                }
            }
            _ => return Ok(()),
        }
    }
}

/// Scans a quoted segment after its opening quote
fn scan_segment(cursor: &mut Cursor<'_>) -> Result<(), LexErrorKind> {
    loop {
        match cursor.bump() {
            None | Some(b'\n') => return Err(LexErrorKind::UnterminatedString),
            Some(b'\'') => return Ok(()),
            Some(_) => {}
        }
    }
}
