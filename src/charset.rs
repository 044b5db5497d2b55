//! Byte classification tables
//!
//! All three language front-ends scan ASCII character classes (identifier
//! characters, digits of a radix, whitespace). Classification goes through a
//! const 256-entry lookup table so every test is a single indexed load.

/// Bitfield flags for byte classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterFlags(u8);

impl CharacterFlags {
    /// Horizontal whitespace (space, tab, vertical tab, form feed, carriage return)
    pub const SPACE: Self = Self(1 << 0);
    /// Line feed
    pub const NEWLINE: Self = Self(1 << 1);
    /// Characters that can start an identifier
    pub const ALPHA: Self = Self(1 << 2);
    /// Decimal digits
    pub const DIGIT: Self = Self(1 << 3);
    /// Hexadecimal digits
    pub const XDIGIT: Self = Self(1 << 4);
    /// Octal digits
    pub const ODIGIT: Self = Self(1 << 5);
    /// Binary digits
    pub const BDIGIT: Self = Self(1 << 6);
    /// Printable ASCII, including the space character
    pub const PRINT: Self = Self(1 << 7);

    /// Characters that can continue an identifier
    pub const ALNUM: Self = Self::ALPHA.union(Self::DIGIT);
    /// Any whitespace, including line feeds
    pub const WHITESPACE: Self = Self::SPACE.union(Self::NEWLINE);

    /// Creates empty flags
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Checks if any of the given flags are set
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Checks if all of the given flags are set
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Returns the union of two flag sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns true if no flags are set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for CharacterFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Byte lookup table for O(1) classification
#[derive(Debug, Clone)]
pub struct CharacterTable([CharacterFlags; 256]);

impl CharacterTable {
    /// Creates the table at compile time
    pub const fn new() -> Self {
        let mut table = [CharacterFlags::empty(); 256];
        let mut i = 0;

        while i < 256 {
            let ch = i as u8;
            let mut flags = CharacterFlags::empty();

            match ch {
                b' ' | b'\t' | b'\r' | 0x0b | 0x0c => flags = flags.union(CharacterFlags::SPACE),
                b'\n' => flags = flags.union(CharacterFlags::NEWLINE),
                _ => {}
            }

            match ch {
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => flags = flags.union(CharacterFlags::ALPHA),
                _ => {}
            }

            match ch {
                b'0' | b'1' => {
                    flags = flags
                        .union(CharacterFlags::BDIGIT)
                        .union(CharacterFlags::ODIGIT)
                        .union(CharacterFlags::DIGIT)
                        .union(CharacterFlags::XDIGIT)
                }
                b'2'..=b'7' => {
                    flags = flags
                        .union(CharacterFlags::ODIGIT)
                        .union(CharacterFlags::DIGIT)
                        .union(CharacterFlags::XDIGIT)
                }
                b'8' | b'9' => {
                    flags = flags
                        .union(CharacterFlags::DIGIT)
                        .union(CharacterFlags::XDIGIT)
                }
                b'a'..=b'f' | b'A'..=b'F' => flags = flags.union(CharacterFlags::XDIGIT),
                _ => {}
            }

            if ch >= 0x20 && ch < 0x7f {
                flags = flags.union(CharacterFlags::PRINT);
            }

            table[i] = flags;
            i += 1;
        }

        Self(table)
    }

    /// Tests if a byte has any of the given flags
    #[inline(always)]
    pub const fn test(&self, ch: u8, flags: CharacterFlags) -> bool {
        self.0[ch as usize].intersects(flags)
    }

    /// Returns the flags for a byte
    #[inline(always)]
    pub const fn get_flags(&self, ch: u8) -> CharacterFlags {
        self.0[ch as usize]
    }
}

impl Default for CharacterTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Global classification table
pub static CHARACTER_TABLE: CharacterTable = CharacterTable::new();

/// Tests a byte against a character class
#[inline(always)]
pub fn is(ch: u8, flags: CharacterFlags) -> bool {
    CHARACTER_TABLE.test(ch, flags)
}

/// A set of bytes, used for the symbol alphabet
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteSet([u64; 4]);

impl ByteSet {
    /// Creates an empty set
    pub const fn new() -> Self {
        Self([0; 4])
    }

    /// Creates a set containing every byte of `text`
    pub fn from_bytes(text: &[u8]) -> Self {
        let mut set = Self::new();
        set.extend(text);
        set
    }

    /// Adds a byte to the set
    pub fn insert(&mut self, byte: u8) {
        self.0[(byte >> 6) as usize] |= 1u64 << (byte & 63);
    }

    /// Adds every byte of `text` to the set
    pub fn extend(&mut self, text: &[u8]) {
        for &byte in text {
            self.insert(byte);
        }
    }

    /// Checks membership
    #[inline(always)]
    pub const fn contains(&self, byte: u8) -> bool {
        self.0[(byte >> 6) as usize] & (1u64 << (byte & 63)) != 0
    }

    /// Number of bytes in the set
    pub fn len(&self) -> usize {
        self.0.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Returns true if the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&word| word == 0)
    }

    /// Length of the leading run of `bytes` drawn from this set
    pub fn span(&self, bytes: &[u8]) -> usize {
        bytes.iter().take_while(|&&b| self.contains(b)).count()
    }
}

impl std::fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members: String = (0..=255u8)
            .filter(|&b| self.contains(b))
            .map(|b| b as char)
            .collect();
        f.debug_tuple("ByteSet").field(&members).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_classes_nest() {
        assert!(is(b'1', CharacterFlags::BDIGIT));
        assert!(!is(b'2', CharacterFlags::BDIGIT));
        assert!(is(b'7', CharacterFlags::ODIGIT));
        assert!(!is(b'8', CharacterFlags::ODIGIT));
        assert!(is(b'9', CharacterFlags::DIGIT));
        assert!(is(b'F', CharacterFlags::XDIGIT));
        assert!(!is(b'g', CharacterFlags::XDIGIT));
    }

    #[test]
    fn test_identifier_classes() {
        assert!(is(b'_', CharacterFlags::ALPHA));
        assert!(!is(b'0', CharacterFlags::ALPHA));
        assert!(is(b'0', CharacterFlags::ALNUM));
        assert!(!is(b'$', CharacterFlags::ALNUM));
        assert!(!is(0xc3, CharacterFlags::ALNUM));
    }

    #[test]
    fn test_whitespace_classes() {
        assert!(is(b'\n', CharacterFlags::NEWLINE));
        assert!(!is(b'\n', CharacterFlags::SPACE));
        assert!(is(b'\r', CharacterFlags::SPACE));
        assert!(is(b'\t', CharacterFlags::WHITESPACE));
        assert!(!is(b'x', CharacterFlags::WHITESPACE));
    }

    #[test]
    fn test_character_flags_union() {
        let flags = CharacterFlags::ALPHA | CharacterFlags::DIGIT;
        assert_eq!(flags, CharacterFlags::ALNUM);
        assert!(flags.contains(CharacterFlags::DIGIT));
        assert!(!flags.is_empty());
        assert!(CHARACTER_TABLE.get_flags(b'a').contains(CharacterFlags::XDIGIT));
    }

    #[test]
    fn test_byte_set() {
        let set = ByteSet::from_bytes(b">>=");
        assert_eq!(set.len(), 2);
        assert!(set.contains(b'>'));
        assert!(set.contains(b'='));
        assert!(!set.contains(b'<'));
        assert_eq!(set.span(b">=>a"), 3);
        assert_eq!(set.span(b"a>"), 0);
        assert!(ByteSet::new().is_empty());
    }

    #[test]
    fn test_byte_set_high_bytes() {
        let mut set = ByteSet::new();
        set.insert(0xff);
        set.insert(0x80);
        assert!(set.contains(0xff));
        assert!(set.contains(0x80));
        assert!(!set.contains(0x7f));
        assert_eq!(set.len(), 2);
    }
}
