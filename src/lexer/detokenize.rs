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

//! Expansion of stored line bytes back into text.

use crate::tokens::{Dialect, TokenFlags};

use super::LINE_TERMINATOR;

/// Text of one stored line and where reading stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detokenized {
    /// The expanded line text.
    pub text: String,
    /// Offset after the terminator, or `end` if none was found.
    pub next_offset: usize,
    /// Whether a terminator byte ended the line.
    pub terminated: bool,
}

/// Expand the bytes in `start..end` up to the first terminator.
///
/// Keyword bytes outside string literals become keyword text. Bytes that
/// the encoder prefixed to a flagged keyword (`:` before `ELSE`) are folded
/// back into it. Unknown bytes >= 0x80 render as `{TOK:xx}` when the
/// dialect asks for it; everything else is taken as Latin-1.
pub fn detokenize(bytes: &[u8], start: usize, end: usize, dialect: &Dialect) -> Detokenized {
    let end = end.min(bytes.len());
    let mut text = String::new();
    let mut in_string = false;
    let mut transparent = false;
    let mut pos = start;

    while pos < end {
        let byte = bytes[pos];
        if byte == LINE_TERMINATOR {
            return Detokenized {
                text,
                next_offset: pos + 1,
                terminated: true,
            };
        }

        if byte == b'"' {
            in_string = !in_string;
            text.push('"');
            pos += 1;
            continue;
        }

        if !in_string && !transparent {
            if let Some((keyword, len)) = dialect.match_prefixed(&bytes[pos..end]) {
                text.push_str(keyword.text);
                transparent |= keyword.flags.contains(TokenFlags::TRANSPARENT);
                pos += len;
                continue;
            }

            if let Some(keyword) = dialect.keyword_for(byte) {
                if keyword.flags.contains(TokenFlags::PREFIX_COLON) {
                    text.push(':');
                }
                if keyword.flags.contains(TokenFlags::REM_BEFORE) {
                    text.push_str("REM ");
                }
                text.push_str(keyword.text);
                transparent |= keyword.flags.contains(TokenFlags::TRANSPARENT);
                pos += 1;
                continue;
            }

            if byte >= 0x80 && dialect.mark_unknown_tokens {
                text.push_str(&format!("{{TOK:{:02x}}}", byte));
                pos += 1;
                continue;
            }
        }

        if let Some(ch) = dialect.special_char(byte) {
            text.push(ch);
        } else if let Some(name) = dialect.escape_name(byte) {
            text.push('\\');
            text.push_str(name);
        } else {
            text.push(char::from(byte));
        }
        pos += 1;
    }

    Detokenized {
        text,
        next_offset: end.max(start),
        terminated: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize_line, tokenize_phc};
    use crate::tokens::{phc, x07};

    fn phc_text(bytes: &[u8]) -> String {
        detokenize(bytes, 0, bytes.len(), phc::dialect()).text
    }

    fn x07_text(bytes: &[u8]) -> String {
        detokenize(bytes, 0, bytes.len(), x07::dialect()).text
    }

    #[test]
    fn test_stops_at_terminator() {
        let bytes = [0x95, b' ', b'1', 0x00, 0x80, 0x00];
        let line = detokenize(&bytes, 0, bytes.len(), phc::dialect());
        assert_eq!(line.text, "PRINT 1");
        assert_eq!(line.next_offset, 4);
        assert!(line.terminated);
    }

    #[test]
    fn test_unterminated_line() {
        let bytes = [0x80, b'X'];
        let line = detokenize(&bytes, 0, 2, phc::dialect());
        assert_eq!(line.text, "ENDX");
        assert_eq!(line.next_offset, 2);
        assert!(!line.terminated);
    }

    #[test]
    fn test_phc_unknown_token_placeholder() {
        assert_eq!(phc_text(&[0xB3, b'A']), "{TOK:b3}A");
        assert_eq!(phc_text(&[0xFF]), "{TOK:ff}");
    }

    #[test]
    fn test_strings_are_not_expanded() {
        assert_eq!(phc_text(&[0x95, b'"', 0x80, b'"', 0x80]), "PRINT\"\u{80}\"END");
        assert_eq!(x07_text(&[b'"', 0x9F, b'"']), "\"\u{9F}\"");
    }

    #[test]
    fn test_phc_round_trip() {
        let bytes = tokenize_phc("FOR I=1 TO 10:PRINT \"HI\";I:NEXT");
        assert_eq!(phc_text(&bytes), "FOR I=1 TO 10:PRINT \"HI\";I:NEXT");
    }

    #[test]
    fn test_x07_flagged_keywords_fold_back() {
        let bytes = tokenize_line("IF A THEN 10 ELSE 20", x07::dialect());
        assert_eq!(x07_text(&bytes), "IF A THEN 10 ELSE 20");

        let bytes = tokenize_line("CLS 'TO DO", x07::dialect());
        assert_eq!(x07_text(&bytes), "CLS 'TO DO");
    }

    #[test]
    fn test_x07_bare_flagged_token() {
        assert_eq!(x07_text(&[0x90]), ":ELSE");
        assert_eq!(x07_text(&[0xE1, b'X']), ":REM 'X");
    }

    #[test]
    fn test_x07_transparent_rest() {
        assert_eq!(x07_text(&[0x8E, b' ', 0x80]), "REM \u{80}");
    }

    #[test]
    fn test_x07_specials_and_escapes() {
        assert_eq!(x07_text(&[b'"', 0xF4, 0x0C, b'"']), "\"π\\CLS\"");
        assert_eq!(x07_text(&[0x07]), "\\BEL");
    }
}
