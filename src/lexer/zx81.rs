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

//! ZX81 line translation.
//!
//! A ZX81 line body ends with a NEWLINE byte, which is not rendered.
//! Numeric literals are followed by a marker byte and a 5-byte binary
//! copy of the value; both are skipped outside REM lines.

use crate::tokens::zx81::{glyph, NUMBER_MARKER, NUMBER_MARKER_LEN, REM};

/// Options for rendering ZX81 programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZxOptions {
    /// Approximate unprintable codes with quadrant blocks.
    pub graphics: bool,
    /// Render the body of the first REM line as hex bytes.
    pub rem_as_hex: bool,
}

/// Per-program translation state.
#[derive(Debug, Clone)]
pub struct ZxLineDecoder {
    options: ZxOptions,
    first_rem_seen: bool,
}

impl ZxLineDecoder {
    /// Create a decoder for one program.
    pub fn new(options: ZxOptions) -> Self {
        Self {
            options,
            first_rem_seen: false,
        }
    }

    /// Translate one line body, NEWLINE byte included.
    pub fn decode_line(&mut self, body: &[u8]) -> String {
        let Some((&first, _)) = body.split_first() else {
            return String::new();
        };
        let is_rem = first == REM;

        if is_rem && self.options.rem_as_hex && !self.first_rem_seen {
            self.first_rem_seen = true;
            let payload = rem_payload(body);
            let hex: Vec<String> = payload.iter().map(|b| format!("{:02X}", b)).collect();
            return format!("{}{}", glyph(REM, false), hex.join(" "));
        }

        let visible = &body[..body.len() - 1];
        let mut text = String::new();
        let mut pos = 0;
        while pos < visible.len() {
            let byte = visible[pos];
            if !is_rem && byte == NUMBER_MARKER {
                pos += NUMBER_MARKER_LEN;
                continue;
            }
            text.push_str(glyph(byte, self.options.graphics));
            pos += 1;
        }
        text
    }
}

/// The bytes between the REM token and the NEWLINE byte.
pub fn rem_payload(body: &[u8]) -> &[u8] {
    if body.len() < 2 {
        return &[];
    }
    &body[1..body.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::zx81::NEWLINE;

    #[test]
    fn test_plain_line() {
        // PRINT "A"
        let mut decoder = ZxLineDecoder::new(ZxOptions::default());
        assert_eq!(decoder.decode_line(&[245, 11, 38, 11, NEWLINE]), " PRINT \"A\"");
    }

    #[test]
    fn test_number_literal_is_skipped() {
        // GOTO 10 with its hidden binary copy
        let body = [236, 29, 28, NUMBER_MARKER, 0x84, 0x20, 0, 0, 0, NEWLINE];
        let mut decoder = ZxLineDecoder::new(ZxOptions::default());
        assert_eq!(decoder.decode_line(&body), " GOTO 10");
    }

    #[test]
    fn test_rem_keeps_marker_bytes() {
        let body = [REM, NUMBER_MARKER, 38, NEWLINE];
        let mut decoder = ZxLineDecoder::new(ZxOptions::default());
        assert_eq!(decoder.decode_line(&body), " REM #A");
    }

    #[test]
    fn test_first_rem_as_hex_only_once() {
        let body = [REM, 0x3E, 0x01, 0xC9, NEWLINE];
        let mut decoder = ZxLineDecoder::new(ZxOptions {
            rem_as_hex: true,
            ..ZxOptions::default()
        });
        assert_eq!(decoder.decode_line(&body), " REM 3E 01 C9");
        assert_eq!(decoder.decode_line(&[REM, 38, NEWLINE]), " REM A");
    }

    #[test]
    fn test_graphics_blocks() {
        let mut decoder = ZxLineDecoder::new(ZxOptions {
            graphics: true,
            ..ZxOptions::default()
        });
        assert_eq!(decoder.decode_line(&[1, 2, 3, NEWLINE]), "▘▝▀");
    }

    #[test]
    fn test_empty_body() {
        let mut decoder = ZxLineDecoder::new(ZxOptions::default());
        assert_eq!(decoder.decode_line(&[]), "");
        assert_eq!(decoder.decode_line(&[NEWLINE]), "");
    }

    #[test]
    fn test_rem_payload() {
        assert_eq!(rem_payload(&[REM, 1, 2, NEWLINE]), &[1, 2]);
        assert!(rem_payload(&[REM]).is_empty());
    }
}
