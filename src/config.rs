//! Lexer configuration
//!
//! [`LexerConfig`] carries the knobs a host can turn on top of a language's
//! defaults. [`LexerOptions`] is the complete construction record a host
//! hands over, typically deserialized from JSON or another `serde` format.

use crate::error::ConfigError;
use crate::symbols::SymbolSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest accepted free-form delimiter, in bytes
pub const MAX_DELIMITER_LEN: usize = 15;

/// Source languages with a front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "cpp", alias = "c++")]
    Cpp,
    #[serde(rename = "bas", alias = "basic")]
    Basic,
    #[serde(rename = "pas", alias = "pascal")]
    Pascal,
}

impl Language {
    /// The host tag for this language
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Cpp => "cpp",
            Language::Basic => "bas",
            Language::Pascal => "pas",
        }
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "cpp" | "c++" => Ok(Language::Cpp),
            "bas" | "basic" => Ok(Language::Basic),
            "pas" | "pascal" => Ok(Language::Pascal),
            _ => Err(ConfigError::UnknownLanguage(tag.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Opening and closing delimiters of a free-form region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeFormDelimiters {
    pub begin: String,
    pub end: String,
}

impl FreeFormDelimiters {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Checks both delimiters against the length bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        for delimiter in [&self.begin, &self.end] {
            if delimiter.is_empty() {
                return Err(ConfigError::EmptyDelimiter);
            }
            if delimiter.len() > MAX_DELIMITER_LEN {
                return Err(ConfigError::DelimiterTooLong {
                    delimiter: delimiter.clone(),
                    max: MAX_DELIMITER_LEN,
                });
            }
        }
        Ok(())
    }
}

/// Configuration options for the lexer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Extra free-form regions, tried after the language's own block rules
    pub freeform: Vec<FreeFormDelimiters>,
    /// Consume comments without returning them
    pub skip_comments: bool,
    /// Consume directives without returning them
    pub skip_directives: bool,
}

impl LexerConfig {
    /// Adds a free-form region
    pub fn with_freeform(mut self, begin: impl Into<String>, end: impl Into<String>) -> Self {
        self.freeform.push(FreeFormDelimiters::new(begin, end));
        self
    }

    pub fn skip_comments(mut self, skip: bool) -> Self {
        self.skip_comments = skip;
        self
    }

    pub fn skip_directives(mut self, skip: bool) -> Self {
        self.skip_directives = skip;
        self
    }

    /// Checks every free-form delimiter
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.freeform.iter().try_for_each(FreeFormDelimiters::validate)
    }
}

/// The record a host builds a lexer from
///
/// Field names follow the host convention: `file` is the source name used in
/// diagnostics and `language` is a tag such as `"cpp"`. Missing or mistyped
/// fields are rejected by the deserializer; the language tag and delimiters
/// are checked by [`Lexer::from_options`](crate::Lexer::from_options).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LexerOptions {
    pub source: String,
    pub file: String,
    pub language: String,
    pub symbols: SymbolSet,
    #[serde(flatten)]
    pub config: LexerConfig,
}

impl LexerOptions {
    /// Parses the language tag
    pub fn language(&self) -> Result<Language, ConfigError> {
        self.language.parse()
    }
}
