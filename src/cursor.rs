//! Byte cursor over the source buffer
//!
//! Every scanning primitive works on byte offsets into the immutable source
//! and is bounds-checked against its length. Line tracking lives here so that
//! every consumed `\n`, wherever it is consumed, bumps the line counter exactly
//! once and moves `line_start`.

use crate::charset::{self, CharacterFlags};

/// Scan position within a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    /// The source text being scanned
    source: &'a str,
    /// Current byte offset
    pos: usize,
    /// Current line (1-based)
    line: u32,
    /// Offset of the first byte of the current line
    line_start: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `source`
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    #[inline(always)]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline(always)]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline(always)]
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// The unconsumed bytes
    #[inline(always)]
    pub fn rest(&self) -> &'a [u8] {
        &self.source.as_bytes()[self.pos.min(self.source.len())..]
    }

    /// The byte at the cursor
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// The byte `offset` bytes past the cursor
    #[inline(always)]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + offset).copied()
    }

    /// The character at the cursor
    pub fn peek_char(&self) -> Option<char> {
        self.source.get(self.pos..)?.chars().next()
    }

    /// Checks whether `text` appears at the cursor
    #[inline]
    pub fn starts_with(&self, text: &str) -> bool {
        self.rest().starts_with(text.as_bytes())
    }

    /// Checks whether the byte at `offset` past the cursor is in `flags`
    #[inline]
    pub fn peek_is(&self, offset: usize, flags: CharacterFlags) -> bool {
        self.peek_at(offset).is_some_and(|b| charset::is(b, flags))
    }

    /// Length of the run of `flags` bytes starting `offset` bytes past the cursor
    pub fn span_at(&self, offset: usize, flags: CharacterFlags) -> usize {
        self.rest()
            .iter()
            .skip(offset)
            .take_while(|&&b| charset::is(b, flags))
            .count()
    }

    /// Absolute offset of the next occurrence of `needle` at or after the cursor
    pub fn find(&self, needle: &str) -> Option<usize> {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return Some(self.pos);
        }
        self.rest()
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|index| self.pos + index)
    }

    /// Source text from `start` up to the cursor
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or_default()
    }

    /// Consumes one byte, tracking line breaks
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(byte)
    }

    /// Moves the cursor to a previously recorded position
    pub fn reset(&mut self, pos: usize, line: u32, line_start: usize) {
        self.pos = pos.min(self.source.len());
        self.line = line;
        self.line_start = line_start.min(self.pos);
    }

    /// Consumes `count` bytes, tracking line breaks
    pub fn bump_n(&mut self, count: usize) {
        let end = (self.pos + count).min(self.source.len());
        self.advance_to(end);
    }

    /// Consumes one whole character, so the cursor stays on a char boundary
    pub fn bump_char(&mut self) {
        let width = self.peek_char().map_or(1, char::len_utf8);
        self.bump_n(width);
    }

    /// Consumes everything up to the absolute offset `end`
    pub fn advance_to(&mut self, end: usize) {
        let end = end.min(self.source.len());
        while self.pos < end {
            self.bump();
        }
    }

    /// Consumes the run of `flags` bytes at the cursor and returns its length
    pub fn eat_while(&mut self, flags: CharacterFlags) -> usize {
        let length = self.span_at(0, flags);
        self.bump_n(length);
        length
    }

    /// Consumes `byte` if it is at the cursor
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes either case of an ASCII letter if it is at the cursor
    pub fn eat_ignore_case(&mut self, letter: u8) -> bool {
        match self.peek() {
            Some(b) if b.eq_ignore_ascii_case(&letter) => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    /// Skips whitespace and line feeds
    pub fn skip_whitespace(&mut self) {
        self.eat_while(CharacterFlags::WHITESPACE);
    }

    /// Consumes the rest of the current line, leaving the line feed (and a
    /// carriage return right before it) unconsumed
    pub fn skip_to_line_end(&mut self) {
        let rest = self.rest();
        let mut length = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
        if length > 0 && rest[length - 1] == b'\r' {
            length -= 1;
        }
        self.bump_n(length);
    }

    /// Checks whether only horizontal whitespace precedes `pos` on its line
    pub fn only_space_before(&self, pos: usize) -> bool {
        self.source.as_bytes()[self.line_start..pos]
            .iter()
            .all(|&b| charset::is(b, CharacterFlags::SPACE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_tracks_lines() {
        let mut cursor = Cursor::new("a\nb\n");
        assert_eq!(cursor.bump(), Some(b'a'));
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.bump(), Some(b'\n'));
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.line_start(), 2);
        cursor.bump_n(10);
        assert!(cursor.is_eof());
        assert_eq!(cursor.line(), 3);
        assert_eq!(cursor.bump(), None);
    }

    #[test]
    fn test_eat_while_and_span() {
        let mut cursor = Cursor::new("0x1Fg");
        assert_eq!(cursor.span_at(2, CharacterFlags::XDIGIT), 2);
        assert_eq!(cursor.eat_while(CharacterFlags::DIGIT), 1);
        assert_eq!(cursor.peek(), Some(b'x'));
    }

    #[test]
    fn test_find_is_absolute() {
        let mut cursor = Cursor::new("/* a */ b */");
        cursor.bump_n(2);
        assert_eq!(cursor.find("*/"), Some(5));
        assert_eq!(cursor.find("??"), None);
    }

    #[test]
    fn test_skip_to_line_end_leaves_crlf() {
        let mut cursor = Cursor::new("// x\r\nnext");
        cursor.skip_to_line_end();
        assert_eq!(cursor.slice_from(0), "// x");
        assert_eq!(cursor.peek(), Some(b'\r'));
    }

    #[test]
    fn test_only_space_before() {
        let mut cursor = Cursor::new("x\n  #if");
        cursor.bump_n(4);
        assert!(cursor.only_space_before(cursor.pos()));
        let mut cursor = Cursor::new("x #if");
        cursor.bump_n(2);
        assert!(!cursor.only_space_before(cursor.pos()));
    }

    #[test]
    fn test_bump_char_keeps_char_boundary() {
        let mut cursor = Cursor::new("é!");
        cursor.bump_char();
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.peek_char(), Some('!'));
    }

    #[test]
    fn test_eat_ignore_case() {
        let mut cursor = Cursor::new("Hh");
        assert!(cursor.eat_ignore_case(b'h'));
        assert!(cursor.eat_ignore_case(b'H'));
        assert!(!cursor.eat_ignore_case(b'h'));
    }
}
