// Retrotape - BASIC tokenizers and cassette audio encoders for 1980s home computers
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Keyword tables for the supported BASIC dialects.
//!
//! A [`KeywordTable`] is an ordered list: when several keywords match at
//! the same position, the first one in table order wins. Tables must list
//! longer keywords before any keyword that is a prefix of them (`INPUT`
//! before `INP`); [`KeywordTable::shadowed`] reports violations.
//!
//! A [`Dialect`] bundles a keyword table with the extra byte mappings a
//! platform uses (special characters, backslash escapes) and the reverse
//! lookups derived from them. Dialects are built once and shared.

pub mod phc;
pub mod x07;
pub mod zx81;

use std::collections::HashMap;

/// Per-keyword encoding flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenFlags(u8);

impl TokenFlags {
    /// No special handling.
    pub const NONE: TokenFlags = TokenFlags(0);
    /// A colon byte is stored before the token.
    pub const PREFIX_COLON: TokenFlags = TokenFlags(0x01);
    /// The REM token is stored before the token.
    pub const REM_BEFORE: TokenFlags = TokenFlags(0x02);
    /// The rest of the line is stored verbatim.
    pub const TRANSPARENT: TokenFlags = TokenFlags(0x04);

    /// Check whether all bits of `other` are set.
    pub const fn contains(self, other: TokenFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two flag sets.
    pub const fn union(self, other: TokenFlags) -> TokenFlags {
        TokenFlags(self.0 | other.0)
    }

    /// Get the raw bit mask.
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for TokenFlags {
    type Output = TokenFlags;

    fn bitor(self, rhs: TokenFlags) -> TokenFlags {
        self.union(rhs)
    }
}

/// A reserved word and the byte that stands for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    /// Keyword text in canonical (upper) case.
    pub text: &'static str,
    /// Token byte.
    pub code: u8,
    /// Encoding flags.
    pub flags: TokenFlags,
}

impl Keyword {
    /// Create a keyword without flags.
    pub const fn new(text: &'static str, code: u8) -> Self {
        Self {
            text,
            code,
            flags: TokenFlags::NONE,
        }
    }

    /// Create a keyword with flags.
    pub const fn with_flags(text: &'static str, code: u8, flags: TokenFlags) -> Self {
        Self { text, code, flags }
    }

    /// Check whether `input` starts with this keyword, ignoring ASCII case.
    pub fn is_prefix_of(&self, input: &str) -> bool {
        let kw = self.text.as_bytes();
        let input = input.as_bytes();
        !kw.is_empty() && input.len() >= kw.len() && input[..kw.len()].eq_ignore_ascii_case(kw)
    }
}

/// An ordered keyword table; table order is match priority.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: Vec<Keyword>,
}

impl KeywordTable {
    /// Create a table from keywords in priority order.
    pub fn new(entries: Vec<Keyword>) -> Self {
        Self { entries }
    }

    /// Get all keywords in priority order.
    pub fn entries(&self) -> &[Keyword] {
        &self.entries
    }

    /// Get the number of keywords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the first keyword (in table order) that prefixes `input`.
    pub fn match_at(&self, input: &str) -> Option<&Keyword> {
        self.entries.iter().find(|kw| kw.is_prefix_of(input))
    }

    /// Find the keyword for a token byte.
    pub fn by_code(&self, code: u8) -> Option<&Keyword> {
        self.entries.iter().find(|kw| kw.code == code)
    }

    /// List `(earlier, later)` pairs where the earlier keyword is a proper
    /// prefix of the later one and therefore hides it from matching.
    pub fn shadowed(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs = Vec::new();
        for (i, earlier) in self.entries.iter().enumerate() {
            for later in &self.entries[i + 1..] {
                if later.text.len() > earlier.text.len() && earlier.is_prefix_of(later.text) {
                    pairs.push((earlier.text, later.text));
                }
            }
        }
        pairs
    }
}

/// Reverse lookup from byte to keyword, derived from a [`KeywordTable`].
#[derive(Debug, Clone)]
pub struct InverseTable {
    slots: Vec<Option<Keyword>>,
}

impl InverseTable {
    /// Build the reverse lookup; the first keyword for a code wins.
    pub fn from_table(table: &KeywordTable) -> Self {
        let mut slots = vec![None; 256];
        for kw in table.entries() {
            let slot = &mut slots[kw.code as usize];
            if slot.is_none() {
                *slot = Some(*kw);
            }
        }
        Self { slots }
    }

    /// Get the keyword for a byte.
    pub fn get(&self, code: u8) -> Option<&Keyword> {
        self.slots[code as usize].as_ref()
    }
}

/// A BASIC dialect: keywords plus the platform's extra byte mappings.
#[derive(Debug)]
pub struct Dialect {
    /// Human readable name.
    pub name: &'static str,
    /// Keyword table in match priority order.
    pub keywords: KeywordTable,
    /// Token byte of `REM`, stored before `REM_BEFORE` keywords.
    pub rem_code: Option<u8>,
    /// Render unknown bytes >= 0x80 outside strings as `{TOK:xx}`.
    pub mark_unknown_tokens: bool,
    inverse: InverseTable,
    specials: HashMap<char, u8>,
    special_inverse: Vec<Option<char>>,
    escapes: HashMap<&'static str, u8>,
    escape_inverse: Vec<Option<&'static str>>,
    prefixed: Vec<(Vec<u8>, Keyword)>,
}

impl Dialect {
    /// Build a dialect and its derived reverse lookups.
    pub fn new(
        name: &'static str,
        keywords: KeywordTable,
        rem_code: Option<u8>,
        specials: &[(char, u8)],
        escapes: &[(&'static str, u8)],
    ) -> Self {
        let inverse = InverseTable::from_table(&keywords);

        let mut special_inverse = vec![None; 256];
        for &(ch, code) in specials {
            special_inverse[code as usize].get_or_insert(ch);
        }

        let mut escape_inverse = vec![None; 256];
        for &(esc, code) in escapes {
            escape_inverse[code as usize].get_or_insert(esc);
        }

        // Byte sequences the encoder writes for flagged keywords.
        let prefixed = keywords
            .entries()
            .iter()
            .filter(|kw| {
                kw.flags.contains(TokenFlags::PREFIX_COLON)
                    || kw.flags.contains(TokenFlags::REM_BEFORE)
            })
            .map(|kw| (encoded_prefix(kw, rem_code), *kw))
            .collect();

        Self {
            name,
            keywords,
            rem_code,
            mark_unknown_tokens: false,
            inverse,
            specials: specials.iter().copied().collect(),
            special_inverse,
            escapes: escapes.iter().copied().collect(),
            escape_inverse,
            prefixed,
        }
    }

    /// Render unknown high bytes with a `{TOK:xx}` placeholder.
    pub fn marking_unknown_tokens(mut self) -> Self {
        self.mark_unknown_tokens = true;
        self
    }

    /// Get the keyword for a token byte.
    pub fn keyword_for(&self, code: u8) -> Option<&Keyword> {
        self.inverse.get(code)
    }

    /// Get the byte for a special character.
    pub fn special_byte(&self, ch: char) -> Option<u8> {
        self.specials.get(&ch).copied()
    }

    /// Get the special character stored as `code`.
    pub fn special_char(&self, code: u8) -> Option<char> {
        self.special_inverse[code as usize]
    }

    /// Check whether the dialect understands backslash escapes.
    pub fn has_escapes(&self) -> bool {
        !self.escapes.is_empty()
    }

    /// Get the byte for an escape name (without the backslash).
    pub fn escape_byte(&self, name: &str) -> Option<u8> {
        self.escapes.get(name).copied()
    }

    /// Get the first escape name declared for `code`.
    pub fn escape_name(&self, code: u8) -> Option<&'static str> {
        self.escape_inverse[code as usize]
    }

    /// Find a flagged keyword whose full stored form starts `bytes`.
    ///
    /// Returns the keyword and the number of bytes its stored form takes.
    pub fn match_prefixed(&self, bytes: &[u8]) -> Option<(&Keyword, usize)> {
        self.prefixed
            .iter()
            .find(|(seq, _)| bytes.starts_with(seq))
            .map(|(seq, kw)| (kw, seq.len()))
    }
}

/// The bytes the encoder writes for a keyword, including flag prefixes.
fn encoded_prefix(kw: &Keyword, rem_code: Option<u8>) -> Vec<u8> {
    let mut seq = Vec::with_capacity(3);
    if kw.flags.contains(TokenFlags::PREFIX_COLON) {
        seq.push(b':');
    }
    if kw.flags.contains(TokenFlags::REM_BEFORE) {
        if let Some(rem) = rem_code {
            seq.push(rem);
        }
    }
    seq.push(kw.code);
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> KeywordTable {
        KeywordTable::new(vec![
            Keyword::new("INPUT", 0x84),
            Keyword::new("INP", 0x90),
            Keyword::new("TO", 0x91),
        ])
    }

    #[test]
    fn test_flags() {
        let flags = TokenFlags::PREFIX_COLON | TokenFlags::TRANSPARENT;
        assert!(flags.contains(TokenFlags::PREFIX_COLON));
        assert!(flags.contains(TokenFlags::TRANSPARENT));
        assert!(!flags.contains(TokenFlags::REM_BEFORE));
        assert_eq!(flags.bits(), 0x05);
        assert!(TokenFlags::NONE.is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let table = sample_table();
        assert_eq!(table.match_at("input a").unwrap().code, 0x84);
        assert_eq!(table.match_at("Inp(1)").unwrap().code, 0x90);
        assert!(table.match_at("IN").is_none());
    }

    #[test]
    fn test_first_entry_wins() {
        let table = KeywordTable::new(vec![Keyword::new("INP", 0x90), Keyword::new("INPUT", 0x84)]);
        assert_eq!(table.match_at("INPUT").unwrap().code, 0x90);
        assert_eq!(table.shadowed(), vec![("INP", "INPUT")]);
    }

    #[test]
    fn test_no_shadowing_in_sample() {
        assert!(sample_table().shadowed().is_empty());
    }

    #[test]
    fn test_inverse_table() {
        let table = sample_table();
        let inverse = InverseTable::from_table(&table);
        assert_eq!(inverse.get(0x91).unwrap().text, "TO");
        assert!(inverse.get(0x92).is_none());
    }

    #[test]
    fn test_dialect_reverse_maps_keep_first() {
        let dialect = Dialect::new(
            "test",
            sample_table(),
            None,
            &[('π', 0xF4)],
            &[("CLS", 0x0C), ("CLR", 0x0C)],
        );
        assert_eq!(dialect.special_byte('π'), Some(0xF4));
        assert_eq!(dialect.special_char(0xF4), Some('π'));
        assert_eq!(dialect.escape_byte("CLR"), Some(0x0C));
        assert_eq!(dialect.escape_name(0x0C), Some("CLS"));
        assert!(dialect.has_escapes());
    }

    #[test]
    fn test_match_prefixed() {
        let table = KeywordTable::new(vec![
            Keyword::with_flags("REM", 0x8E, TokenFlags::TRANSPARENT),
            Keyword::with_flags("ELSE", 0x90, TokenFlags::PREFIX_COLON),
            Keyword::with_flags(
                "'",
                0xE1,
                TokenFlags::PREFIX_COLON | TokenFlags::REM_BEFORE | TokenFlags::TRANSPARENT,
            ),
        ]);
        let dialect = Dialect::new("test", table, Some(0x8E), &[], &[]);

        let (kw, len) = dialect.match_prefixed(&[b':', 0x90, b'2']).unwrap();
        assert_eq!(kw.text, "ELSE");
        assert_eq!(len, 2);

        let (kw, len) = dialect.match_prefixed(&[b':', 0x8E, 0xE1]).unwrap();
        assert_eq!(kw.text, "'");
        assert_eq!(len, 3);

        assert!(dialect.match_prefixed(&[b':', 0x8E, b'A']).is_none());
    }
}
