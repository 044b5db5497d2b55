//! # Polyglot Lexer
//!
//! A config-driven lexical scanner for C++, BASIC and Pascal dialects.
//!
//! ## Overview
//!
//! The lexer turns source text into a stream of classified tokens for a host
//! that builds parsers and code generators on top of it. Comments and
//! directives are tokens too, so concatenating every lexeme in order gives
//! back the source minus whitespace. The host decides which punctuation
//! strings are symbols by handing the lexer a symbol table.
//!
//! ## Key Features
//!
//! - **Three front-ends**: identifiers, numbers and string literals per
//!   language, including C++ raw and encoding-prefixed literals, BASIC type
//!   suffixes and Pascal control-character strings
//! - **Block constructs**: line and block comments, line directives with
//!   continuation lines, block directives and nestable free-form regions
//! - **Longest-match symbols**: `>>=` is one token whenever it is declared
//! - **Zero-copy tokens**: every lexeme borrows from the source
//! - **Recoverable errors**: a scan error is a value, and the next call
//!   picks up after the offending character
//!
//! ## Basic Usage
//!
//! ```rust
//! use polyglot_lexer::{Language, Lexer, SymbolSet, TokenKind};
//!
//! let symbols: SymbolSet = ["=", "==", ";"].into_iter().collect();
//! let mut lexer = Lexer::new("x == 0x1F; // check", "main.cpp", Language::Cpp, symbols);
//!
//! let token = lexer.next_token()?;
//! assert_eq!(token.kind, TokenKind::Id);
//! assert_eq!(lexer.next_token()?.lexeme, "==");
//! assert_eq!(lexer.next_token()?.kind, TokenKind::Hexadecimal);
//! # Ok::<(), polyglot_lexer::LexError>(())
//! ```
//!
//! ## Host Records
//!
//! A host can describe a lexer as data. Missing or mistyped fields fail
//! deserialization; an unknown language or a bad delimiter fails
//! construction.
//!
//! ```rust
//! use polyglot_lexer::{Lexer, LexerOptions};
//!
//! let options: LexerOptions = serde_json::from_str(r#"{
//!     "source": "[{ raw }] x",
//!     "file": "gen.bas",
//!     "language": "bas",
//!     "symbols": ["=", "+"]
//! }"#).unwrap();
//!
//! let tokens = Lexer::from_options(&options)?
//!     .collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(tokens[0].kind.name(), "<freeform>");
//! # Ok::<(), polyglot_lexer::Error>(())
//! ```
//!
//! ## Symbol Tables
//!
//! A [`SymbolSet`] lists the symbols explicitly. A [`SymbolFn`] wraps any
//! predicate, together with the characters its symbols may contain:
//!
//! ```rust
//! use polyglot_lexer::{Language, Lexer, SymbolFn};
//!
//! let symbols = SymbolFn::new(":=;", |s: &str| matches!(s, ":=" | ";"));
//! let mut lexer = Lexer::new("n := 1;", "unit.pas", Language::Pascal, symbols);
//! assert_eq!(lexer.nth(1).unwrap()?.lexeme, ":=");
//! # Ok::<(), polyglot_lexer::LexError>(())
//! ```

pub mod blocks;
pub mod charset;
pub mod config;
pub mod cursor;
pub mod error;
mod lang;
pub mod lexer;
pub mod symbols;
pub mod token;


// Re-export main types
pub use blocks::{BlockKind, BlockRule};
pub use config::{FreeFormDelimiters, Language, LexerConfig, LexerOptions, MAX_DELIMITER_LEN};
pub use error::{ConfigError, Error, LexError, LexErrorKind, Radix};
pub use lexer::{Lexer, LexerSnapshot};
pub use symbols::{SymbolFn, SymbolRecognizer, SymbolSet, SymbolTable};
pub use token::{Token, TokenKind};
