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

//! Sanyo PHC-25 BASIC keywords.
//!
//! Slot `i` of the table is token byte `0x80 + i`. Slots `0xB0..=0xC1` are
//! undocumented: nothing encodes to them and they decode as `{TOK:xx}`.

use std::sync::OnceLock;

use super::{Dialect, Keyword, KeywordTable};

/// First token byte.
pub const TOKEN_BASE: u8 = 0x80;

/// Token byte of `EXEC`.
pub const EXEC: u8 = 0xA5;

/// Token byte of `REM`.
pub const REM: u8 = 0x8E;

/// Keyword slots in token order; `None` marks an undocumented slot.
const SLOTS: [Option<&str>; 114] = [
    // 0x80
    Some("END"),
    Some("FOR"),
    Some("NEXT"),
    Some("DATA"),
    Some("INPUT"),
    Some("DIM"),
    Some("READ"),
    Some("LET"),
    Some("GOTO"),
    Some("RUN"),
    Some("IF"),
    Some("RESTORE"),
    Some("GOSUB"),
    Some("RETURN"),
    Some("REM"),
    Some("STOP"),
    // 0x90
    Some("OUT"),
    Some("ON"),
    Some("LPRINT"),
    Some("DEF"),
    Some("POKE"),
    Some("PRINT"),
    Some("CONT"),
    Some("LIST"),
    Some("LLIST"),
    Some("CLEAR"),
    Some("COLOR"),
    Some("PSET"),
    Some("PRESET"),
    Some("LINE"),
    Some("PAINT"),
    Some("SCREEN"),
    // 0xA0
    Some("CLS"),
    Some("LOCATE"),
    Some("CONSOLE"),
    Some("CLOAD"),
    Some("CSAVE"),
    Some("EXEC"),
    Some("SOUND"),
    Some("PLAY"),
    Some("KEY"),
    Some("LCOPY"),
    Some("NEW"),
    Some("CTON"),
    Some("CTOFF"),
    Some("SLOAD"),
    Some("SSAVE"),
    Some("ELSE"),
    // 0xB0
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    // 0xC0
    None,
    None,
    Some("TAB("),
    Some("TO"),
    Some("FN"),
    Some("SPC("),
    Some("INKEY$"),
    Some("THEN"),
    Some("NOT"),
    Some("STEP"),
    Some("+"),
    Some("-"),
    Some("*"),
    Some("/"),
    Some("^"),
    Some("AND"),
    // 0xD0
    Some("OR"),
    Some(">"),
    Some("="),
    Some("<"),
    Some("SGN"),
    Some("INT"),
    Some("ABS"),
    Some("USR"),
    Some("FRE"),
    Some("INP"),
    Some("LPOS"),
    Some("POS"),
    Some("SQR"),
    Some("RND"),
    Some("LOG"),
    Some("EXP"),
    // 0xE0
    Some("COS"),
    Some("SIN"),
    Some("TAN"),
    Some("PEEK"),
    Some("LEN"),
    Some("SCRIN"),
    Some("STR$"),
    Some("VAL"),
    Some("ASC"),
    Some("CHR$"),
    Some("LEFT$"),
    Some("RIGHT$"),
    Some("MID$"),
    Some("POINT"),
    Some("CSRLIN"),
    Some("STICK"),
    // 0xF0
    Some("STRIG"),
    Some("TIME"),
];

/// Build the keyword table from the slot list.
pub fn keyword_table() -> KeywordTable {
    let entries = SLOTS
        .iter()
        .zip(TOKEN_BASE..=u8::MAX)
        .filter_map(|(slot, code)| slot.map(|text| Keyword::new(text, code)))
        .collect();
    KeywordTable::new(entries)
}

/// Get the shared PHC-25 dialect.
pub fn dialect() -> &'static Dialect {
    static DIALECT: OnceLock<Dialect> = OnceLock::new();
    DIALECT.get_or_init(|| {
        Dialect::new("PHC-25", keyword_table(), Some(REM), &[], &[]).marking_unknown_tokens()
    })
}
