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

//! Line tokenizer and detokenizer.
//!
//! The tokenizer turns the text of one BASIC line into the bytes the
//! machine stores. It handles:
//! - Keywords, matched case-insensitively in table order
//! - String literals, copied verbatim
//! - Special characters of the dialect's graphic set
//! - Backslash escapes for control codes (`\CLS`, `\BEL`, ...)
//! - Transparent keywords (`REM`, `DATA`) after which nothing is tokenized
//!
//! Tokenizing never fails. Characters with no single-byte form become `?`.

mod detokenize;
pub mod zx81;

pub use detokenize::{detokenize, Detokenized};

use crate::tokens::{phc, Dialect, TokenFlags};

/// Byte that ends a stored PHC line.
pub const LINE_TERMINATOR: u8 = 0x00;

/// Byte stored for characters without a single-byte form.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// The lexer state for tokenizing one line.
pub struct Lexer<'source> {
    /// The line text being tokenized.
    source: &'source str,
    /// Current byte position in the source.
    position: usize,
    /// Keyword and character tables.
    dialect: &'source Dialect,
    /// Inside a string literal.
    in_string: bool,
    /// A transparent keyword was seen; the rest is copied.
    transparent: bool,
    /// Bytes produced so far.
    output: Vec<u8>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for one line of text.
    pub fn new(source: &'source str, dialect: &'source Dialect) -> Self {
        Self {
            source,
            position: 0,
            dialect,
            in_string: false,
            transparent: false,
            output: Vec::with_capacity(source.len() + 1),
        }
    }

    /// Get the current position in the source.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Check if we've reached the end of the source.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Peek at the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Advance to the next character and return it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// The not yet consumed part of the source.
    fn rest(&self) -> &'source str {
        &self.source[self.position..]
    }

    /// Tokenize the whole line.
    pub fn tokenize(mut self) -> Vec<u8> {
        while !self.is_at_end() {
            self.scan_next();
        }
        self.output
    }

    /// Consume at least one character and emit its bytes.
    fn scan_next(&mut self) {
        let Some(c) = self.peek() else {
            return;
        };

        if c == '"' {
            self.in_string = !self.in_string;
            self.output.push(b'"');
            self.advance();
            return;
        }

        if let Some(byte) = self.dialect.special_byte(c) {
            self.output.push(byte);
            self.advance();
            return;
        }

        if c == '\\' && self.dialect.has_escapes() && self.peek_next().is_some() {
            self.scan_escape();
            return;
        }

        if !self.in_string && !self.transparent && self.scan_keyword() {
            return;
        }

        self.output.push(char_byte(c));
        self.advance();
    }

    /// Scan `\NAME` and emit the control code it names.
    ///
    /// Unknown names are copied literally, backslash included.
    fn scan_escape(&mut self) {
        self.advance();
        let start = self.position;
        while self.peek().is_some_and(is_escape_char) {
            self.advance();
        }
        let name = &self.source[start..self.position];

        match self.dialect.escape_byte(name) {
            Some(byte) => self.output.push(byte),
            None => {
                self.output.push(b'\\');
                self.output.extend_from_slice(name.as_bytes());
            }
        }
    }

    /// Try to match a keyword at the current position.
    fn scan_keyword(&mut self) -> bool {
        let Some(keyword) = self.dialect.keywords.match_at(self.rest()) else {
            return false;
        };
        let keyword = *keyword;

        if keyword.flags.contains(TokenFlags::PREFIX_COLON) {
            self.output.push(b':');
        }
        if keyword.flags.contains(TokenFlags::REM_BEFORE) {
            if let Some(rem) = self.dialect.rem_code {
                self.output.push(rem);
            }
        }
        self.output.push(keyword.code);
        if keyword.flags.contains(TokenFlags::TRANSPARENT) {
            self.transparent = true;
        }

        // Keywords are ASCII, so the matched prefix ends on a char boundary
        self.position += keyword.text.len();
        true
    }
}

/// Characters allowed in an escape name.
fn is_escape_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | ',' | '~')
}

/// Get the single byte stored for a character.
pub fn char_byte(c: char) -> u8 {
    u8::try_from(c).unwrap_or(REPLACEMENT_BYTE)
}

/// Tokenize one line of text without a terminator.
pub fn tokenize_line(text: &str, dialect: &Dialect) -> Vec<u8> {
    Lexer::new(text, dialect).tokenize()
}

/// Tokenize one PHC-25 line, terminator included.
pub fn tokenize_phc(text: &str) -> Vec<u8> {
    let mut bytes = tokenize_line(text, phc::dialect());
    bytes.push(LINE_TERMINATOR);
    bytes
}
