//! Host-supplied symbol tables and the longest-match symbol recognizer
//!
//! Which punctuation strings are symbols is decided by the host. The lexer
//! only needs a membership test plus the set of bytes that can occur in a
//! symbol, which bounds how far a candidate can extend.

use crate::charset::ByteSet;
use crate::cursor::Cursor;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Membership test for symbol lexemes
///
/// Implementations must be pure: the same candidate always gets the same
/// answer for the lifetime of a lexer.
pub trait SymbolTable {
    /// Whether `candidate` is exactly a declared symbol
    fn is_symbol(&self, candidate: &str) -> bool;

    /// Every byte that occurs in some declared symbol
    fn alphabet(&self) -> ByteSet;
}

/// A symbol table holding the declared symbols, in declaration order
///
/// Deserializes from a list of strings through [`insert`](Self::insert), so
/// duplicates and empty strings are dropped there too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SymbolSet {
    symbols: IndexSet<String>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a symbol; empty strings are ignored
    pub fn insert(&mut self, symbol: impl Into<String>) -> bool {
        let symbol = symbol.into();
        !symbol.is_empty() && self.symbols.insert(symbol)
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.symbols.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymbolSet::new();
        for symbol in iter {
            set.insert(symbol);
        }
        set
    }
}

impl From<Vec<String>> for SymbolSet {
    fn from(symbols: Vec<String>) -> Self {
        symbols.into_iter().collect()
    }
}

impl From<SymbolSet> for Vec<String> {
    fn from(set: SymbolSet) -> Self {
        set.symbols.into_iter().collect()
    }
}

impl SymbolTable for SymbolSet {
    fn is_symbol(&self, candidate: &str) -> bool {
        self.contains(candidate)
    }

    fn alphabet(&self) -> ByteSet {
        let mut alphabet = ByteSet::new();
        for symbol in &self.symbols {
            alphabet.extend(symbol.as_bytes());
        }
        alphabet
    }
}

/// A symbol table backed by a host predicate
///
/// A predicate cannot enumerate its members, so the alphabet is given
/// explicitly.
pub struct SymbolFn<F> {
    predicate: F,
    alphabet: ByteSet,
}

impl<F: Fn(&str) -> bool> SymbolFn<F> {
    /// `alphabet` lists every character any accepted symbol may contain
    pub fn new(alphabet: &str, predicate: F) -> Self {
        Self {
            predicate,
            alphabet: ByteSet::from_bytes(alphabet.as_bytes()),
        }
    }
}

impl<F> std::fmt::Debug for SymbolFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolFn")
            .field("alphabet", &self.alphabet)
            .finish_non_exhaustive()
    }
}

impl<F: Fn(&str) -> bool> SymbolTable for SymbolFn<F> {
    fn is_symbol(&self, candidate: &str) -> bool {
        (self.predicate)(candidate)
    }

    fn alphabet(&self) -> ByteSet {
        self.alphabet
    }
}

impl<T: SymbolTable + ?Sized> SymbolTable for &T {
    fn is_symbol(&self, candidate: &str) -> bool {
        (**self).is_symbol(candidate)
    }

    fn alphabet(&self) -> ByteSet {
        (**self).alphabet()
    }
}

/// Finds the longest declared symbol at a scan position
pub struct SymbolRecognizer<'a> {
    table: Box<dyn SymbolTable + 'a>,
    alphabet: ByteSet,
}

impl<'a> SymbolRecognizer<'a> {
    /// Wraps `table`, computing its alphabet once
    pub fn new(table: impl SymbolTable + 'a) -> Self {
        let alphabet = table.alphabet();
        Self {
            table: Box::new(table),
            alphabet,
        }
    }

    pub fn alphabet(&self) -> &ByteSet {
        &self.alphabet
    }

    /// Length of the longest symbol at the cursor, if any
    ///
    /// The candidate is bounded by the run of alphabet bytes at the cursor and
    /// shrunk one byte at a time until the table accepts it.
    pub fn longest_match(&self, cursor: &Cursor<'_>) -> Option<usize> {
        let rest = cursor.rest();
        let start = cursor.pos();
        let source = cursor.source();

        (1..=self.alphabet.span(rest)).rev().find(|&length| {
            source
                .get(start..start + length)
                .is_some_and(|candidate| self.table.is_symbol(candidate))
        })
    }
}

impl std::fmt::Debug for SymbolRecognizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolRecognizer")
            .field("alphabet", &self.alphabet)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn cpp_symbols() -> SymbolSet {
        [">", ">>", ">>=", "=", "==", "+", "++", "+=", "."]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_symbol_set_alphabet() {
        let set = cpp_symbols();
        let alphabet = set.alphabet();
        assert!(alphabet.contains(b'>'));
        assert!(alphabet.contains(b'.'));
        assert!(!alphabet.contains(b'<'));
        assert_eq!(alphabet.len(), 4);
    }

    #[test]
    fn test_symbol_set_ignores_empty_and_duplicates() {
        let mut set = SymbolSet::new();
        assert!(set.insert("+"));
        assert!(!set.insert("+"));
        assert!(!set.insert(""));
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["+"]);
    }

    #[test]
    fn test_longest_match_prefers_longer() {
        let recognizer = SymbolRecognizer::new(cpp_symbols());
        assert_eq!(recognizer.longest_match(&Cursor::new(">>=1")), Some(3));
        assert_eq!(recognizer.longest_match(&Cursor::new(">> 1")), Some(2));
        assert_eq!(recognizer.longest_match(&Cursor::new(">=")), Some(1));
        assert_eq!(recognizer.longest_match(&Cursor::new("+++")), Some(2));
    }

    #[test]
    fn test_longest_match_outside_alphabet() {
        let recognizer = SymbolRecognizer::new(cpp_symbols());
        assert_eq!(recognizer.longest_match(&Cursor::new("abc")), None);
        assert_eq!(recognizer.longest_match(&Cursor::new("<")), None);
        assert_eq!(recognizer.longest_match(&Cursor::new("")), None);
    }

    #[test]
    fn test_predicate_table_bounded_calls() {
        let calls = Cell::new(0);
        let table = SymbolFn::new("<>=", |candidate: &str| {
            calls.set(calls.get() + 1);
            candidate == "<"
        });
        let recognizer = SymbolRecognizer::new(&table);
        assert_eq!(recognizer.longest_match(&Cursor::new("<=>x")), Some(1));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_predicate_table_no_match() {
        let table = SymbolFn::new("!", |_: &str| false);
        let recognizer = SymbolRecognizer::new(table);
        assert_eq!(recognizer.longest_match(&Cursor::new("!!")), None);
    }
}
