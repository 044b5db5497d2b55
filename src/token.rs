//! Token types
//!
//! A token is a classified slice of the source plus the line it started on.
//! Punctuation is not enumerated: a symbol token's kind carries the symbol
//! text itself, since the host defines which strings are symbols.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind<'a> {
    Eof,
    Id,

    // Numeric literals
    Decimal,
    Octal,
    Hexadecimal,
    Binary,
    Float,

    // String and character literals
    String,
    Char,
    RawString,
    WideString,
    WideChar,
    Utf8String,
    Utf8Char,
    Utf16String,
    Utf16Char,
    Utf32String,
    Utf32Char,

    // Block constructs
    LineComment,
    BlockComment,
    FreeForm,
    LineDirective,
    BlockDirective,

    /// A host-declared symbol; the text doubles as the kind tag
    Symbol(&'a str),
}

impl<'a> TokenKind<'a> {
    /// The tag the host sees for this kind
    pub fn name(&self) -> &'a str {
        match self {
            TokenKind::Eof => "<eof>",
            TokenKind::Id => "<id>",
            TokenKind::Decimal => "<decimal>",
            TokenKind::Octal => "<octal>",
            TokenKind::Hexadecimal => "<hexadecimal>",
            TokenKind::Binary => "<binary>",
            TokenKind::Float => "<float>",
            TokenKind::String => "<string>",
            TokenKind::Char => "<char>",
            TokenKind::RawString => "<rawstring>",
            TokenKind::WideString => "<wide string>",
            TokenKind::WideChar => "<wide char>",
            TokenKind::Utf8String => "<utf8 string>",
            TokenKind::Utf8Char => "<utf8 char>",
            TokenKind::Utf16String => "<utf16 string>",
            TokenKind::Utf16Char => "<utf16 char>",
            TokenKind::Utf32String => "<utf32 string>",
            TokenKind::Utf32Char => "<utf32 char>",
            TokenKind::LineComment => "<linecomment>",
            TokenKind::BlockComment => "<blockcomment>",
            TokenKind::FreeForm => "<freeform>",
            TokenKind::LineDirective => "<linedirective>",
            TokenKind::BlockDirective => "<blockdirective>",
            TokenKind::Symbol(text) => *text,
        }
    }

    /// Line and block comments
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    /// Line and block directives
    pub fn is_directive(&self) -> bool {
        matches!(self, TokenKind::LineDirective | TokenKind::BlockDirective)
    }

    /// Integer and floating point literals
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            TokenKind::Decimal
                | TokenKind::Octal
                | TokenKind::Hexadecimal
                | TokenKind::Binary
                | TokenKind::Float
        )
    }

    /// String and character literals of every encoding
    pub fn is_text_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Char
                | TokenKind::RawString
                | TokenKind::WideString
                | TokenKind::WideChar
                | TokenKind::Utf8String
                | TokenKind::Utf8Char
                | TokenKind::Utf16String
                | TokenKind::Utf16Char
                | TokenKind::Utf32String
                | TokenKind::Utf32Char
        )
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Exact source text consumed; `"<eof>"` for end of input
    pub lexeme: &'a str,
    /// Line the token started on (1-based)
    pub line: u32,
    /// Byte offset of the lexeme in the source
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, lexeme: &'a str, line: u32, offset: usize) -> Self {
        Self {
            kind,
            lexeme,
            line,
            offset,
        }
    }

    /// The end-of-input token
    pub fn eof(line: u32, offset: usize) -> Self {
        Self::new(TokenKind::Eof, "<eof>", line, offset)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Byte length of the lexeme in the source (zero for end of input)
    pub fn len(&self) -> usize {
        if self.is_eof() { 0 } else { self.lexeme.len() }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at line {}", self.kind, self.lexeme, self.line)
    }
}

/// Serializes as the host-facing record `{token, lexeme, line}`
impl Serialize for Token<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Token", 3)?;
        state.serialize_field("token", self.kind.name())?;
        state.serialize_field("lexeme", self.lexeme)?;
        state.serialize_field("line", &self.line)?;
        state.end()
    }
}
