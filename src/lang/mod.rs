//! Language front-ends
//!
//! Each supported language contributes its default block rules and an atom
//! scanner for identifiers, numbers and string literals. The scanner for a
//! lexer is picked once, from its [`Language`], when the lexer is built.

mod basic;
mod cpp;
mod pascal;

use crate::blocks::BlockRule;
use crate::charset::CharacterFlags;
use crate::config::Language;
use crate::cursor::Cursor;
use crate::error::{LexErrorKind, Radix};
use crate::token::TokenKind;
use smallvec::SmallVec;

pub(crate) use basic::BasicScanner;
pub(crate) use cpp::CppScanner;
pub(crate) use pascal::PascalScanner;

/// Block rules of a lexer; small enough to stay inline for every language
pub type BlockRules = SmallVec<[BlockRule; 8]>;

/// Language-specific scanning of atoms
pub(crate) trait AtomScanner: Sync {
    /// Block rules every lexer for this language starts with
    fn block_rules(&self) -> BlockRules;

    /// Whether a literal starts at the cursor whose first character could
    /// also begin a symbol; such literals win over the symbol table
    fn claims_literal(&self, cursor: &Cursor<'_>) -> bool;

    /// Scans one identifier, number or string literal
    fn scan(&self, cursor: &mut Cursor<'_>) -> Result<TokenKind<'static>, LexErrorKind>;

    /// Renders a character for diagnostics; `None` is end of input
    fn render_char(&self, ch: Option<char>) -> String;
}

/// The atom scanner for `language`
pub(crate) fn scanner(language: Language) -> &'static dyn AtomScanner {
    match language {
        Language::Cpp => &CppScanner,
        Language::Basic => &BasicScanner,
        Language::Pascal => &PascalScanner,
    }
}

/// Renders printable ASCII as `'x'`, end of input as `eof`, and everything
/// else through the language's `fallback`
pub(crate) fn render_with(ch: Option<char>, fallback: impl FnOnce(u32) -> String) -> String {
    match ch {
        None => "eof".to_string(),
        Some(c) if (' '..='~').contains(&c) && c != '\'' => format!("'{c}'"),
        Some(c) => fallback(u32::from(c)),
    }
}

/// Consumes an identifier; the cursor must be on an identifier start
pub(crate) fn scan_identifier(cursor: &mut Cursor<'_>) {
    cursor.eat_while(CharacterFlags::ALNUM);
}

/// Consumes the digits after a radix prefix; at least one is required
pub(crate) fn scan_radix_digits(
    cursor: &mut Cursor<'_>,
    digits: CharacterFlags,
    radix: Radix,
    scanner: &dyn AtomScanner,
) -> Result<(), LexErrorKind> {
    if cursor.eat_while(digits) == 0 {
        return Err(LexErrorKind::InvalidDigit {
            digit: scanner.render_char(cursor.peek_char()),
            radix,
        });
    }
    Ok(())
}

/// Consumes an exponent if one starts at the cursor
///
/// Returns whether an exponent was present. The sign is optional but at
/// least one digit must follow it.
pub(crate) fn scan_exponent(cursor: &mut Cursor<'_>) -> Result<bool, LexErrorKind> {
    if !cursor.eat_ignore_case(b'e') {
        return Ok(false);
    }
    if !cursor.eat(b'+') {
        cursor.eat(b'-');
    }
    if cursor.eat_while(CharacterFlags::DIGIT) == 0 {
        return Err(LexErrorKind::EmptyExponent);
    }
    Ok(true)
}

/// Whether `suffix` matches one of `allowed`, ignoring ASCII case
pub(crate) fn suffix_in(suffix: &str, allowed: &[&str]) -> bool {
    allowed.iter().any(|candidate| candidate.eq_ignore_ascii_case(suffix))
}

/// Whether `.` followed by a decimal digit is at the cursor
pub(crate) fn at_leading_fraction(cursor: &Cursor<'_>) -> bool {
    cursor.peek() == Some(b'.') && cursor.peek_is(1, CharacterFlags::DIGIT)
}
