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

//! ZX81 display character set.
//!
//! The ZX81 does not use ASCII. Every byte of a program line, including
//! keyword tokens, maps to one entry of [`CHARSET`]; keywords carry the
//! spacing the ZX81 prints around them.

/// Rendering of codes with no printable equivalent.
pub const UNPRINTABLE: &str = "#";

/// Token byte of `REM`.
pub const REM: u8 = 234;

/// Marker preceding the 5-byte binary copy of a numeric literal.
pub const NUMBER_MARKER: u8 = 126;

/// Bytes taken by a numeric literal marker and its value.
pub const NUMBER_MARKER_LEN: usize = 6;

/// End-of-line byte.
pub const NEWLINE: u8 = 118;

/// Display strings for all 256 codes.
pub const CHARSET: [&str; 256] = [
    // 0
    " ", "#", "#", "#", "#", "#", "#", "#",
    // 8
    "#", "#", "#", "\"", "Ý", "$", ":", "?",
    // 16
    "(", ")", ">", "<", "=", "+", "-", "*",
    // 24
    "/", ";", ",", ".", "0", "1", "2", "3",
    // 32
    "4", "5", "6", "7", "8", "9", "A", "B",
    // 40
    "C", "D", "E", "F", "G", "H", "I", "J",
    // 48
    "K", "L", "M", "N", "O", "P", "Q", "R",
    // 56
    "S", "T", "U", "V", "W", "X", "Y", "Z",
    // 64
    "RND", "INKEY$ ", "PI", "#", "#", "#", "#", "#",
    // 72
    "#", "#", "#", "#", "#", "#", "#", "#",
    // 80
    "#", "#", "#", "#", "#", "#", "#", "#",
    // 88
    "#", "#", "#", "#", "#", "#", "#", "#",
    // 96
    "#", "#", "#", "#", "#", "#", "#", "#",
    // 104
    "#", "#", "#", "#", "#", "#", "#", "#",
    // 112
    "#", "#", "#", "#", "#", "#", "#", "#",
    // 120
    "#", "#", "#", "#", "#", "#", "#", "#",
    // 128
    "#", "#", "#", "#", "#", "#", "#", "#",
    // 136
    "#", "#", "#", "\"", "Ý", "$", ":", "?",
    // 144
    "(", ")", ">", "<", "=", "+", "-", "*",
    // 152
    "/", ";", ",", ".", "0", "1", "2", "3",
    // 160
    "4", "5", "6", "7", "8", "9", "a", "b",
    // 168
    "c", "d", "e", "f", "g", "h", "i", "j",
    // 176
    "k", "l", "m", "n", "o", "p", "q", "r",
    // 184
    "s", "t", "u", "v", "w", "x", "y", "z",
    // 192
    "\"\"", "AT ", "TAB ", "#", "CODE ", "VAL ", "LEN ", "SIN ",
    // 200
    "COS ", "TAN ", "ASN ", "ACS ", "ATN ", "LN ", "EXP ", "INT ",
    // 208
    "SQR ", "SGN ", "ABS ", "PEEK ", "USR ", "STR$ ", "CHR$ ", "NOT ",
    // 216
    "**", " OR ", " AND ", "<=", ">=", "<>", " THEN", " TO ",
    // 224
    " STEP ", " LPRINT ", " LLIST ", " STOP", " SLOW", " FAST", " NEW", " SCROLL",
    // 232
    " CONT ", " DIM ", " REM ", " FOR ", " GOTO ", " GOSUB ", " INPUT ", " LOAD ",
    // 240
    " LIST ", " LET ", " PAUSE ", " NEXT ", " POKE ", " PRINT ", " PLOT ", " RUN ",
    // 248
    " SAVE ", " RAND ", " IF ", " CLS", " UNPLOT ", " CLEAR", " RETURN", " COPY",
];

/// Unicode quadrant blocks indexed by a 4-bit mosaic pattern
/// (bit 0 upper left, bit 1 upper right, bit 2 lower left, bit 3 lower right).
pub const QUADRANT_BLOCKS: [&str; 16] = [
    " ", "▘", "▝", "▀", "▖", "▌", "▞", "▛", "▗", "▚", "▐", "▜", "▄", "▙", "▟", "█",
];

/// Render one code.
///
/// With `graphics` set, unprintable codes are approximated by a quadrant
/// block chosen from their low four bits.
pub fn glyph(code: u8, graphics: bool) -> &'static str {
    let text = CHARSET[code as usize];
    if graphics && text == UNPRINTABLE {
        QUADRANT_BLOCKS[(code & 0x0F) as usize]
    } else {
        text
    }
}
