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

//! Sanyo PHC-25 tape images.
//!
//! Layout of a BASIC image:
//!
//! ```text
//! A5 x10 | name[6] | line bytes... | 00 00 | index[4 x N] | 00 FF FF FF FF | 00 x18
//! ```
//!
//! Each line is its tokenized text followed by `00`; lines carry no number.
//! The numbers live in the index, which lists `(address, number)` pairs for
//! the lines back to front. Addresses count from 0xC001 in program order.

use tracing::{debug, warn};

use super::ImageWriter;
use crate::error::{CodecError, ErrorCode, Result};
use crate::lexer::{char_byte, detokenize, tokenize_phc};
use crate::listing::SourceLine;
use crate::tokens::phc::{self, EXEC};

/// Byte repeated in the sync header.
pub const SYNC_BYTE: u8 = 0xA5;

/// Length of the sync header.
pub const SYNC_LEN: usize = 10;

/// Width of the name field.
pub const NAME_LEN: usize = 6;

/// Offset of the first program byte.
pub const PROGRAM_START: usize = SYNC_LEN + NAME_LEN;

/// Address of the first line in memory.
pub const LOAD_ADDRESS: u16 = 0xC001;

/// Name used when the name field is blank.
pub const DEFAULT_NAME: &str = "PROGRAM";

/// Bytes that close the index.
const TRAILER: [u8; 5] = [0x00, 0xFF, 0xFF, 0xFF, 0xFF];

/// Zero bytes after the trailer.
const TAIL_ZEROES: usize = 18;

/// Footer of a machine-code loader image: one index entry for line 10 at
/// the load address, the trailer and nine zero bytes.
const LOADER_FOOTER: [u8; 20] = [
    0x00, 0x00, 0x01, 0xC0, 0x0A, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00,
];

/// A decoded PHC-25 program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhcProgram {
    /// Program name from the header.
    pub name: String,
    /// Program lines in order.
    pub lines: Vec<SourceLine>,
}

/// Build a BASIC image.
pub fn build(lines: &[SourceLine], name: &str) -> Vec<u8> {
    let mut writer = ImageWriter::new();
    writer.emit_fill(SYNC_BYTE, SYNC_LEN);
    writer.emit_field(&name_bytes(name), NAME_LEN, 0x00);

    // Addresses follow program order; the index is written back to front.
    let mut index = Vec::with_capacity(lines.len());
    let mut address = LOAD_ADDRESS;
    for line in lines {
        // Empty lines have no stored form
        if line.text.is_empty() {
            warn!(line = line.number, "skipping empty line");
            continue;
        }
        let bytes = tokenize_phc(&line.text);
        index.push((address, line.number));
        address = address.wrapping_add(bytes.len() as u16);
        writer.emit_bytes(&bytes);
    }

    writer.emit_fill(0x00, 2);
    for &(address, number) in index.iter().rev() {
        writer.emit_word(address);
        writer.emit_word(number);
    }

    writer.emit_bytes(&TRAILER);
    writer.emit_fill(0x00, TAIL_ZEROES);

    debug!(
        lines = lines.len(),
        bytes = writer.len(),
        "built PHC image"
    );
    writer.into_bytes()
}

/// Parse a BASIC image.
pub fn parse(bytes: &[u8]) -> Result<PhcProgram> {
    let name = parse_name(bytes);
    let start = PROGRAM_START.min(bytes.len());

    let separator = find(bytes, start, &[0x00, 0x00, 0x00]).ok_or_else(|| {
        CodecError::new(ErrorCode::MissingSeparator, "missing separator")
            .at(bytes.len())
            .with_hint("the program must end with 00 00 00")
    })?;

    let mut texts = Vec::new();
    let mut pos = start;
    while pos < separator {
        let line = detokenize(bytes, pos, separator, phc::dialect());
        if !line.text.is_empty() {
            texts.push(line.text);
        }
        pos = line.next_offset;
    }

    let index_start = separator + 3;
    let trailer = find(bytes, index_start, &[0xFF; 4]).ok_or_else(|| {
        CodecError::new(ErrorCode::MissingTrailer, "missing trailer")
            .at(bytes.len())
            .with_hint("the line index must end with FF FF FF FF")
    })?;

    // Entries are stored back to front
    let mut numbers: Vec<u16> = bytes[index_start..trailer]
        .chunks_exact(4)
        .map(|entry| u16::from_le_bytes([entry[2], entry[3]]))
        .collect();
    numbers.reverse();

    if numbers.len() < texts.len() {
        warn!(
            entries = numbers.len(),
            lines = texts.len(),
            "line index is shorter than the program, numbering the rest"
        );
    }
    let numbers = &numbers[numbers.len().saturating_sub(texts.len())..];

    let lines: Vec<SourceLine> = texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let number = numbers
                .get(i)
                .copied()
                .unwrap_or_else(|| ((i + 1) * 10) as u16);
            SourceLine::new(number, text)
        })
        .collect();

    debug!(name = %name, lines = lines.len(), "parsed PHC image");
    Ok(PhcProgram { name, lines })
}

/// Build a loader image that runs a machine-code payload.
///
/// The image holds a single BASIC line, `EXEC&H<start>`, followed directly
/// by the payload.
pub fn build_machine_code(payload: &[u8], name: &str, start: u16) -> Vec<u8> {
    let mut boot = vec![EXEC];
    boot.extend_from_slice(format!("&H{:04X}", start).as_bytes());
    boot.push(0x00);

    let mut writer = ImageWriter::new();
    writer.emit_fill(SYNC_BYTE, SYNC_LEN);
    writer.emit_field(&name_bytes(name), NAME_LEN, b' ');
    writer.emit_bytes(&boot);
    writer.emit_bytes(payload);
    if (boot.len() + payload.len() + LOADER_FOOTER.len()) % 2 != 0 {
        writer.emit_byte(0xFF);
    }
    writer.emit_bytes(&LOADER_FOOTER);

    debug!(
        payload = payload.len(),
        start = %format!("{:04X}", start),
        "built PHC loader image"
    );
    writer.into_bytes()
}

/// Read the name field; blank names become [`DEFAULT_NAME`].
fn parse_name(bytes: &[u8]) -> String {
    let field = bytes.get(SYNC_LEN..).unwrap_or_default();
    let name: String = field
        .iter()
        .take(NAME_LEN)
        .filter(|&&b| b != 0x00)
        .map(|&b| char::from(b))
        .collect();
    if name.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        name
    }
}

fn name_bytes(name: &str) -> Vec<u8> {
    name.chars().take(NAME_LEN).map(char_byte).collect()
}

/// Find the first occurrence of `pattern` at or after `from`.
fn find(bytes: &[u8], from: usize, pattern: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|pos| from + pos)
}
