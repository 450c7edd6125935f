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

//! ZX81 `.P` snapshots (read only).
//!
//! A `.P` file is a dump of memory from the system variables at 0x4009 up
//! to the end of the variables area. The program starts after 116 bytes of
//! system variables; `D_FILE`, stored at offset 3, points just past it.
//!
//! Program lines are stored as a big-endian line number, a little-endian
//! body length and the body, which ends with a NEWLINE byte.

use tracing::debug;

use crate::error::{CodecError, Result};
pub use crate::lexer::zx81::ZxOptions;
use crate::lexer::zx81::{rem_payload, ZxLineDecoder};
use crate::listing::SourceLine;
use crate::tokens::zx81::REM;

/// Offset of the `D_FILE` system variable.
const D_FILE_OFFSET: usize = 3;

/// Offset of the first program line.
pub const PROGRAM_OFFSET: usize = D_FILE_OFFSET + 2 + 111;

/// Address the first program line is loaded to.
pub const PROGRAM_ADDRESS: u16 = 16509;

/// Address of the first byte after the REM token of the first line, where
/// machine code hidden in a `1 REM` line is run from.
pub const REM_PAYLOAD_ADDRESS: u16 = PROGRAM_ADDRESS + 5;

/// Machine code hidden in the first line of a program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemPayload {
    /// Number of the first line.
    pub line_number: u16,
    /// Whether the first line is a REM line.
    pub is_rem: bool,
    /// Bytes between the REM token and the NEWLINE; empty if not a REM line.
    pub bytes: Vec<u8>,
}

/// A raw program line.
struct RawLine<'a> {
    number: u16,
    body: &'a [u8],
}

/// Reads raw lines until the program area is used up.
struct LineReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    remaining: i64,
}

impl<'a> LineReader<'a> {
    fn new(bytes: &'a [u8]) -> Result<Self> {
        let d_file = match bytes.get(D_FILE_OFFSET..D_FILE_OFFSET + 2) {
            Some(&[lo, hi]) => u16::from_le_bytes([lo, hi]),
            _ => return Err(CodecError::unexpected_end(bytes.len())),
        };
        if bytes.len() < PROGRAM_OFFSET {
            return Err(CodecError::unexpected_end(bytes.len())
                .with_hint("the file is shorter than the system variables"));
        }

        Ok(Self {
            bytes,
            pos: PROGRAM_OFFSET,
            remaining: i64::from(d_file) - i64::from(PROGRAM_ADDRESS),
        })
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let slice = self
            .bytes
            .get(self.pos..self.pos + count)
            .ok_or_else(|| CodecError::unexpected_end(self.bytes.len()))?;
        self.pos += count;
        self.remaining -= count as i64;
        Ok(slice)
    }

    fn next_line(&mut self) -> Result<Option<RawLine<'a>>> {
        if self.remaining <= 0 {
            return Ok(None);
        }
        let number = self.take(2)?;
        let number = u16::from_be_bytes([number[0], number[1]]);
        let length = self.take(2)?;
        let length = u16::from_le_bytes([length[0], length[1]]);
        let body = self.take(length as usize)?;
        Ok(Some(RawLine { number, body }))
    }
}

/// Decode all program lines.
pub fn parse(bytes: &[u8], options: &ZxOptions) -> Result<Vec<SourceLine>> {
    let mut reader = LineReader::new(bytes)?;
    let mut decoder = ZxLineDecoder::new(*options);
    let mut lines = Vec::new();

    while let Some(raw) = reader.next_line()? {
        lines.push(SourceLine::new(raw.number, decoder.decode_line(raw.body)));
    }

    debug!(lines = lines.len(), "parsed ZX81 program");
    Ok(lines)
}

/// Render a program the way the ZX81 lists it: the line number right
/// aligned in four columns, directly followed by the text.
pub fn listing(bytes: &[u8], options: &ZxOptions) -> Result<String> {
    let lines = parse(bytes, options)?;
    Ok(lines
        .iter()
        .map(|line| format!("{:>4}{}\n", line.number, line.text))
        .collect())
}

/// Extract the machine code stored in the first line's REM statement.
pub fn extract_rem_payload(bytes: &[u8]) -> Result<RemPayload> {
    let mut reader = LineReader::new(bytes)?;
    // The first line is read even when D_FILE claims an empty program
    reader.remaining = reader.remaining.max(1);
    let Some(raw) = reader.next_line()? else {
        return Err(CodecError::unexpected_end(bytes.len()));
    };

    let is_rem = raw.body.first() == Some(&REM);
    let payload = if is_rem {
        rem_payload(raw.body).to_vec()
    } else {
        Vec::new()
    };

    debug!(
        line = raw.number,
        is_rem,
        bytes = payload.len(),
        "extracted REM payload"
    );
    Ok(RemPayload {
        line_number: raw.number,
        is_rem,
        bytes: payload,
    })
}
