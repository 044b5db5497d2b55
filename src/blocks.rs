//! Block constructs: comments, directives and free-form regions
//!
//! A block construct is recognized by a literal prefix and, for the delimited
//! kinds, runs until a literal end delimiter. Rules are tried in declaration
//! order and the first one that matches and applies wins.

use crate::cursor::Cursor;
use crate::error::LexErrorKind;
use crate::token::TokenKind;
use std::borrow::Cow;

/// What a block rule scans and how it ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Runs to the end of the line
    LineComment,
    /// Runs through the first `end`
    BlockComment { end: Cow<'static, str> },
    /// Runs through the `end` that balances the opening prefix
    FreeForm { end: Cow<'static, str> },
    /// Runs to the end of the line; with `continuation`, a backslash before
    /// the line feed carries it onto the next line
    LineDirective {
        at_line_start: bool,
        continuation: bool,
    },
    /// Runs through the first `end`
    BlockDirective {
        end: Cow<'static, str>,
        at_line_start: bool,
    },
}

/// A block construct recognized by its prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRule {
    pub begin: Cow<'static, str>,
    pub kind: BlockKind,
}

impl BlockRule {
    pub fn line_comment(begin: impl Into<Cow<'static, str>>) -> Self {
        Self {
            begin: begin.into(),
            kind: BlockKind::LineComment,
        }
    }

    pub fn block_comment(
        begin: impl Into<Cow<'static, str>>,
        end: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            begin: begin.into(),
            kind: BlockKind::BlockComment { end: end.into() },
        }
    }

    pub fn free_form(
        begin: impl Into<Cow<'static, str>>,
        end: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            begin: begin.into(),
            kind: BlockKind::FreeForm { end: end.into() },
        }
    }

    /// A directive that ends at the first line feed
    pub fn line_directive(begin: impl Into<Cow<'static, str>>, at_line_start: bool) -> Self {
        Self {
            begin: begin.into(),
            kind: BlockKind::LineDirective {
                at_line_start,
                continuation: false,
            },
        }
    }

    /// A directive whose lines can be spliced with backslash-newline
    pub fn continued_line_directive(
        begin: impl Into<Cow<'static, str>>,
        at_line_start: bool,
    ) -> Self {
        Self {
            begin: begin.into(),
            kind: BlockKind::LineDirective {
                at_line_start,
                continuation: true,
            },
        }
    }

    pub fn block_directive(
        begin: impl Into<Cow<'static, str>>,
        end: impl Into<Cow<'static, str>>,
        at_line_start: bool,
    ) -> Self {
        Self {
            begin: begin.into(),
            kind: BlockKind::BlockDirective {
                end: end.into(),
                at_line_start,
            },
        }
    }

    /// The token kind this rule produces
    pub fn token_kind(&self) -> TokenKind<'static> {
        match self.kind {
            BlockKind::LineComment => TokenKind::LineComment,
            BlockKind::BlockComment { .. } => TokenKind::BlockComment,
            BlockKind::FreeForm { .. } => TokenKind::FreeForm,
            BlockKind::LineDirective { .. } => TokenKind::LineDirective,
            BlockKind::BlockDirective { .. } => TokenKind::BlockDirective,
        }
    }

    /// Whether the construct must be the first thing on its line
    pub fn at_line_start(&self) -> bool {
        match self.kind {
            BlockKind::LineDirective { at_line_start, .. }
            | BlockKind::BlockDirective { at_line_start, .. } => at_line_start,
            _ => false,
        }
    }

    /// Checks whether the rule applies at the cursor without consuming input
    ///
    /// A directive prefix that is preceded by anything but whitespace on its
    /// line does not apply; the position is then open to the next rule.
    pub fn applies(&self, cursor: &Cursor<'_>) -> bool {
        if !cursor.starts_with(&self.begin) {
            return false;
        }
        if self.at_line_start() && !cursor.only_space_before(cursor.pos()) {
            log::trace!(
                "directive prefix {:?} at line {} is not at line start",
                self.begin,
                cursor.line()
            );
            return false;
        }
        true
    }

    /// Scans the construct at the cursor; call only when [`applies`](Self::applies)
    pub fn scan(&self, cursor: &mut Cursor<'_>) -> Result<TokenKind<'static>, LexErrorKind> {
        cursor.bump_n(self.begin.len());

        match &self.kind {
            BlockKind::LineComment => Ok(finish_line_comment(cursor)),
            BlockKind::BlockComment { end } => {
                scan_through(cursor, end, LexErrorKind::UnterminatedComment)?;
                Ok(TokenKind::BlockComment)
            }
            BlockKind::FreeForm { end } => {
                scan_nested(cursor, &self.begin, end)?;
                Ok(TokenKind::FreeForm)
            }
            BlockKind::LineDirective { continuation, .. } => {
                if *continuation {
                    scan_logical_line(cursor);
                } else {
                    cursor.skip_to_line_end();
                }
                Ok(TokenKind::LineDirective)
            }
            BlockKind::BlockDirective { end, .. } => {
                scan_through(cursor, end, LexErrorKind::UnterminatedDirective)?;
                Ok(TokenKind::BlockDirective)
            }
        }
    }
}

/// Consumes the rest of a line comment whose prefix is already consumed
pub(crate) fn finish_line_comment(cursor: &mut Cursor<'_>) -> TokenKind<'static> {
    cursor.skip_to_line_end();
    TokenKind::LineComment
}

/// Consumes through the first `end`, or to end of input with `unterminated`
fn scan_through(
    cursor: &mut Cursor<'_>,
    end: &str,
    unterminated: LexErrorKind,
) -> Result<(), LexErrorKind> {
    match cursor.find(end) {
        Some(found) => {
            cursor.advance_to(found + end.len());
            Ok(())
        }
        None => {
            cursor.advance_to(cursor.source().len());
            Err(unterminated)
        }
    }
}

/// Consumes a nestable region whose opening `begin` is already consumed
fn scan_nested(cursor: &mut Cursor<'_>, begin: &str, end: &str) -> Result<(), LexErrorKind> {
    let mut depth = 0usize;

    while !cursor.is_eof() {
        if cursor.starts_with(end) {
            cursor.bump_n(end.len());
            if depth == 0 {
                return Ok(());
            }
            depth -= 1;
        } else if cursor.starts_with(begin) {
            cursor.bump_n(begin.len());
            depth += 1;
        } else {
            cursor.bump();
        }
    }

    Err(LexErrorKind::UnterminatedFreeForm)
}

/// Consumes to the end of the line, following backslash continuations
fn scan_logical_line(cursor: &mut Cursor<'_>) {
    loop {
        cursor.skip_to_line_end();
        let continued = cursor.pos() > 0 && cursor.source().as_bytes()[cursor.pos() - 1] == b'\\';
        if !continued {
            return;
        }
        cursor.eat(b'\r');
        if !cursor.eat(b'\n') {
            return;
        }
    }
}
