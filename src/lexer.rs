//! The scan engine
//!
//! [`Lexer`] pulls one token at a time out of a borrowed source. Each call
//! skips whitespace, then tries in order: the block rules, a literal the
//! language claims ahead of the symbol table, the longest declared symbol,
//! and finally the language's atom scanner.

use crate::blocks::BlockRule;
use crate::config::{Language, LexerConfig, LexerOptions};
use crate::cursor::Cursor;
use crate::error::{ConfigError, LexError, LexErrorKind};
use crate::lang::{self, AtomScanner, BlockRules};
use crate::symbols::{SymbolRecognizer, SymbolTable};
use crate::token::{Token, TokenKind};

/// Minimal snapshot of lexer state for backtracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerSnapshot {
    position: usize,
    line: u32,
    line_start: usize,
}

/// Lexer for one source buffer
pub struct Lexer<'a> {
    /// Scan position and line tracking
    cursor: Cursor<'a>,
    /// Name used in diagnostics
    source_name: &'a str,
    language: Language,
    scanner: &'static dyn AtomScanner,
    /// Language rules followed by the configured free-form regions
    rules: BlockRules,
    symbols: SymbolRecognizer<'a>,
    config: LexerConfig,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer with default configuration
    pub fn new(
        source: &'a str,
        source_name: &'a str,
        language: Language,
        symbols: impl SymbolTable + 'a,
    ) -> Self {
        Self::build(source, source_name, language, symbols, LexerConfig::default())
    }

    /// Creates a lexer with custom configuration
    pub fn with_config(
        source: &'a str,
        source_name: &'a str,
        language: Language,
        symbols: impl SymbolTable + 'a,
        config: LexerConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(source, source_name, language, symbols, config))
    }

    /// Creates a lexer from a host construction record
    pub fn from_options(options: &'a LexerOptions) -> Result<Self, ConfigError> {
        Self::with_config(
            &options.source,
            &options.file,
            options.language()?,
            &options.symbols,
            options.config.clone(),
        )
    }

    fn build(
        source: &'a str,
        source_name: &'a str,
        language: Language,
        symbols: impl SymbolTable + 'a,
        config: LexerConfig,
    ) -> Self {
        let scanner = lang::scanner(language);
        let mut rules = scanner.block_rules();
        rules.extend(
            config
                .freeform
                .iter()
                .map(|pair| BlockRule::free_form(pair.begin.clone(), pair.end.clone())),
        );
        let symbols = SymbolRecognizer::new(symbols);

        log::debug!(
            "lexer for {source_name}: language {language}, {} block rules, {} symbol characters",
            rules.len(),
            symbols.alphabet().len()
        );

        Self {
            cursor: Cursor::new(source),
            source_name,
            language,
            scanner,
            rules,
            symbols,
            config,
        }
    }

    /// Creates a snapshot of the current lexer state for backtracking
    pub fn snapshot(&self) -> LexerSnapshot {
        LexerSnapshot {
            position: self.cursor.pos(),
            line: self.cursor.line(),
            line_start: self.cursor.line_start(),
        }
    }

    /// Restores the lexer state from a snapshot
    pub fn restore(&mut self, snapshot: LexerSnapshot) {
        self.cursor
            .reset(snapshot.position, snapshot.line, snapshot.line_start);
    }

    /// Current line (1-based)
    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    /// Current byte offset
    pub fn offset(&self) -> usize {
        self.cursor.pos()
    }

    pub fn source(&self) -> &'a str {
        self.cursor.source()
    }

    pub fn source_name(&self) -> &'a str {
        self.source_name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Block rules in the order they are tried
    pub fn block_rules(&self) -> &[BlockRule] {
        &self.rules
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Returns the next token, or the error that stopped it
    ///
    /// After an error the lexer has moved past at least one character, so
    /// calling again resumes scanning. At end of input every call returns an
    /// `Eof` token.
    pub fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        loop {
            self.cursor.skip_whitespace();

            let start = self.cursor.pos();
            let line = self.cursor.line();
            if self.cursor.is_eof() {
                return Ok(Token::eof(line, start));
            }

            match self.scan() {
                Ok(kind) if self.is_skipped(kind) => {
                    log::trace!("skipped {kind} at line {line}");
                }
                Ok(kind) => {
                    let token = Token::new(kind, self.cursor.slice_from(start), line, start);
                    log::trace!("{token}");
                    return Ok(token);
                }
                Err(kind) => {
                    if self.cursor.pos() == start {
                        self.cursor.bump_char();
                    }
                    let error = LexError::new(self.source_name, line, kind);
                    log::debug!("{error}");
                    return Err(error);
                }
            }
        }
    }

    /// Dispatches one construct at the cursor
    fn scan(&mut self) -> Result<TokenKind<'a>, LexErrorKind> {
        if let Some(rule) = self.rules.iter().find(|rule| rule.applies(&self.cursor)) {
            return rule.scan(&mut self.cursor);
        }

        if !self.scanner.claims_literal(&self.cursor)
            && let Some(length) = self.symbols.longest_match(&self.cursor)
        {
            let start = self.cursor.pos();
            self.cursor.bump_n(length);
            return Ok(TokenKind::Symbol(self.cursor.slice_from(start)));
        }

        self.scanner.scan(&mut self.cursor)
    }

    fn is_skipped(&self, kind: TokenKind<'_>) -> bool {
        (self.config.skip_comments && kind.is_comment())
            || (self.config.skip_directives && kind.is_directive())
    }
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("source_name", &self.source_name)
            .field("language", &self.language)
            .field("line", &self.cursor.line())
            .field("offset", &self.cursor.pos())
            .field("rules", &self.rules)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Yields tokens up to, but not including, end of input
impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.is_eof() => None,
            result => Some(result),
        }
    }
}
