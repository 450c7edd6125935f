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

//! Canon X-07 BASIC keywords, special characters and control escapes.
//!
//! The X-07 stores `ELSE` as `:ELSE` and the `'` comment as `:REM'`, so
//! those entries carry flags that tell the encoder to emit the extra bytes.

use std::sync::OnceLock;

use super::{Dialect, Keyword, KeywordTable, TokenFlags};

/// Token byte of `REM`.
pub const REM: u8 = 0x8E;

const T: TokenFlags = TokenFlags::TRANSPARENT;

/// Keywords in match priority order.
const KEYWORDS: &[Keyword] = &[
    Keyword::new("END", 0x80),
    Keyword::new("FOR", 0x81),
    Keyword::new("NEXT", 0x82),
    Keyword::with_flags("DATA", 0x83, T),
    Keyword::new("INPUT", 0x84),
    Keyword::new("DIM", 0x85),
    Keyword::new("READ", 0x86),
    Keyword::new("LET", 0x87),
    Keyword::new("GOTO", 0x88),
    Keyword::new("RUN", 0x89),
    Keyword::new("IF", 0x8A),
    Keyword::new("RESTORE", 0x8B),
    Keyword::new("GOSUB", 0x8C),
    Keyword::new("RETURN", 0x8D),
    Keyword::with_flags("REM", REM, T),
    Keyword::new("STOP", 0x8F),
    Keyword::with_flags("ELSE", 0x90, TokenFlags::PREFIX_COLON),
    Keyword::new("TRON", 0x91),
    Keyword::new("TROFF", 0x92),
    Keyword::new("DEFSTR", 0x93),
    Keyword::new("DEFINT", 0x94),
    Keyword::new("DEFSNG", 0x95),
    Keyword::new("DEFDBL", 0x96),
    Keyword::new("LINE", 0x97),
    Keyword::new("ERROR", 0x98),
    Keyword::new("RESUME", 0x99),
    Keyword::new("OUT", 0x9A),
    Keyword::new("ON", 0x9B),
    Keyword::new("LPRINT", 0x9C),
    Keyword::new("DEF", 0x9D),
    Keyword::new("POKE", 0x9E),
    Keyword::new("PRINT", 0x9F),
    Keyword::new("CONT", 0xA0),
    Keyword::new("LIST", 0xA1),
    Keyword::new("LLIST", 0xA2),
    Keyword::new("CLEAR", 0xA3),
    Keyword::new("CONSOLE", 0xA4),
    Keyword::new("CLOAD", 0xA5),
    Keyword::new("CSAVE", 0xA6),
    Keyword::new("PSET", 0xA7),
    Keyword::new("PRESET", 0xA8),
    Keyword::new("SOUND", 0xA9),
    Keyword::new("CLS", 0xAA),
    Keyword::new("LOCATE", 0xAB),
    Keyword::new("BEEP", 0xAC),
    Keyword::new("CIRCLE", 0xAD),
    Keyword::new("DRAW", 0xAE),
    Keyword::new("NEW", 0xAF),
    Keyword::new("TAB(", 0xB0),
    Keyword::new("TO", 0xB1),
    Keyword::new("FN", 0xB2),
    Keyword::new("SPC(", 0xB3),
    Keyword::new("INKEY$", 0xB4),
    Keyword::new("THEN", 0xB5),
    Keyword::new("NOT", 0xB6),
    Keyword::new("STEP", 0xB7),
    Keyword::new("+", 0xB8),
    Keyword::new("-", 0xB9),
    Keyword::new("*", 0xBA),
    Keyword::new("/", 0xBB),
    Keyword::new("^", 0xBC),
    Keyword::new("AND", 0xBD),
    Keyword::new("OR", 0xBE),
    Keyword::new("XOR", 0xBF),
    Keyword::new("MOD", 0xC0),
    Keyword::new(">", 0xC1),
    Keyword::new("=", 0xC2),
    Keyword::new("<", 0xC3),
    Keyword::new("SGN", 0xC4),
    Keyword::new("INT", 0xC5),
    Keyword::new("ABS", 0xC6),
    Keyword::new("USR", 0xC7),
    Keyword::new("FRE", 0xC8),
    Keyword::new("INP", 0xC9),
    Keyword::new("LPOS", 0xCA),
    Keyword::new("POS", 0xCB),
    Keyword::new("SQR", 0xCC),
    Keyword::new("RND", 0xCD),
    Keyword::new("LOG", 0xCE),
    Keyword::new("EXP", 0xCF),
    Keyword::new("COS", 0xD0),
    Keyword::new("SIN", 0xD1),
    Keyword::new("TAN", 0xD2),
    Keyword::new("ATN", 0xD3),
    Keyword::new("PEEK", 0xD4),
    Keyword::new("LEN", 0xD5),
    Keyword::new("STR$", 0xD6),
    Keyword::new("VAL", 0xD7),
    Keyword::new("ASC", 0xD8),
    Keyword::new("CHR$", 0xD9),
    Keyword::new("LEFT$", 0xDA),
    Keyword::new("RIGHT$", 0xDB),
    Keyword::new("MID$", 0xDC),
    Keyword::new("POINT", 0xDD),
    Keyword::new("CSRLIN", 0xDE),
    Keyword::new("STICK", 0xDF),
    Keyword::new("STRIG", 0xE0),
    Keyword::with_flags(
        "'",
        0xE1,
        TokenFlags::PREFIX_COLON.union(TokenFlags::REM_BEFORE).union(T),
    ),
];

/// Characters of the X-07 graphic set, typed as Unicode in listings.
pub const SPECIAL_CHARS: &[(char, u8)] = &[
    ('♠', 0xE8),
    ('♥', 0xE9),
    ('♦', 0xEA),
    ('♣', 0xEB),
    ('○', 0xEC),
    ('●', 0xED),
    ('↑', 0xF0),
    ('↓', 0xF1),
    ('←', 0xF2),
    ('→', 0xF3),
    ('π', 0xF4),
    ('¥', 0xF5),
    ('█', 0xF6),
    ('▀', 0xF7),
    ('▄', 0xF8),
    ('▌', 0xF9),
    ('▐', 0xFA),
    ('×', 0xFB),
    ('÷', 0xFC),
];

/// Control codes written as `\NAME` in listings.
///
/// Two names map to 0x0C; listings are decoded with the first one.
pub const ESCAPES: &[(&str, u8)] = &[
    ("BEL", 0x07),
    ("BS", 0x08),
    ("HT", 0x09),
    ("LF", 0x0A),
    ("HOME", 0x0B),
    ("CLS", 0x0C),
    ("CLR", 0x0C),
    ("CR", 0x0D),
    ("INS", 0x12),
    ("RIGHT", 0x1C),
    ("LEFT", 0x1D),
    ("UP", 0x1E),
    ("DOWN", 0x1F),
    ("DEL", 0x7F),
];

/// Build the keyword table.
pub fn keyword_table() -> KeywordTable {
    KeywordTable::new(KEYWORDS.to_vec())
}

/// Get the shared X-07 dialect.
pub fn dialect() -> &'static Dialect {
    static DIALECT: OnceLock<Dialect> = OnceLock::new();
    DIALECT.get_or_init(|| Dialect::new("X-07", keyword_table(), Some(REM), SPECIAL_CHARS, ESCAPES))
}
