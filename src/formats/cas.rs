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

//! Canon X-07 tape images.
//!
//! ```text
//! D3 x10 | name[6] | { next[2] number[2] body... 00 }... | 00 x11
//! ```
//!
//! `next` is the memory address of the following line. BASIC text is
//! loaded at 0x553, so the first line's pointer is 0x553 plus its own
//! record length. A zero pointer ends the program.

use tracing::{debug, warn};

use super::ImageWriter;
use crate::error::{CodecError, ErrorCode, Result};
use crate::lexer::{char_byte, detokenize, tokenize_line};
use crate::listing::SourceLine;
use crate::tokens::x07;

/// Leader byte.
pub const LEADER_BYTE: u8 = 0xD3;

/// Length of the leader.
pub const LEADER_LEN: usize = 10;

/// Width of the name field.
pub const NAME_LEN: usize = 6;

/// Address of the first line in memory.
pub const BASIC_START: u16 = 0x553;

/// Zero bytes that end the image.
const END_ZEROES: usize = 11;

/// What to do with a line whose number does not increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineOrder {
    /// Drop the line and keep going.
    #[default]
    Skip,
    /// Stop encoding at that line. Numbers must start above zero.
    Truncate,
}

/// Options for building CAS images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CasOptions {
    /// Handling of out-of-order line numbers.
    pub order: LineOrder,
}

/// A decoded X-07 program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasProgram {
    /// Program name from the header.
    pub name: String,
    /// Program lines in order.
    pub lines: Vec<SourceLine>,
}

/// Build a BASIC image.
pub fn build(lines: &[SourceLine], name: &str, options: &CasOptions) -> Vec<u8> {
    let mut writer = ImageWriter::new();
    writer.emit_fill(LEADER_BYTE, LEADER_LEN);
    let name: Vec<u8> = name.chars().take(NAME_LEN).map(char_byte).collect();
    writer.emit_field(&name, NAME_LEN, 0x00);

    let mut address = BASIC_START;
    let mut last: Option<u16> = match options.order {
        LineOrder::Skip => None,
        LineOrder::Truncate => Some(0),
    };
    let mut written = 0;

    for line in lines {
        if last.is_some_and(|last| line.number <= last) {
            match options.order {
                LineOrder::Skip => {
                    warn!(line = line.number, "skipping line that does not increase");
                    continue;
                }
                LineOrder::Truncate => {
                    warn!(line = line.number, "line does not increase, stopping");
                    break;
                }
            }
        }

        let record_start = writer.len();
        let next = writer.reserve_word();
        writer.emit_word(line.number);
        writer.emit_bytes(&tokenize_line(&line.text, x07::dialect()));
        writer.emit_byte(0x00);

        let record_len = (writer.len() - record_start) as u16;
        address = address.wrapping_add(record_len);
        writer.patch_word(next, address);

        last = Some(line.number);
        written += 1;
    }

    writer.emit_fill(0x00, END_ZEROES);

    debug!(lines = written, bytes = writer.len(), "built CAS image");
    writer.into_bytes()
}

/// Parse a BASIC image.
pub fn parse(bytes: &[u8]) -> Result<CasProgram> {
    let mut pos = bytes.iter().take_while(|&&b| b == LEADER_BYTE).count();

    let name_end = (pos + NAME_LEN).min(bytes.len());
    let name: String = bytes[pos..name_end]
        .iter()
        .filter(|&&b| b != 0x00)
        .map(|&b| char::from(b))
        .collect();
    pos = name_end;

    let mut lines = Vec::new();
    let mut address = BASIC_START;

    // A file may end without the zero pointer; that ends the program too.
    while pos < bytes.len() {
        let next = read_word(bytes, pos)?;
        if next == 0 {
            break;
        }
        let number = read_word(bytes, pos + 2)?;

        let line = detokenize(bytes, pos + 4, bytes.len(), x07::dialect());
        if !line.terminated {
            return Err(CodecError::new(
                ErrorCode::MissingLineTerminator,
                format!("line {} has no terminator", number),
            )
            .at(bytes.len()));
        }

        address = address.wrapping_add((line.next_offset - pos) as u16);
        if next != address {
            warn!(
                line = number,
                expected = %format!("{:04X}", address),
                found = %format!("{:04X}", next),
                "next-line pointer does not match the record length"
            );
            address = next;
        }

        lines.push(SourceLine::new(number, line.text));
        pos = line.next_offset;
    }

    debug!(name = %name, lines = lines.len(), "parsed CAS image");
    Ok(CasProgram { name, lines })
}

fn read_word(bytes: &[u8], pos: usize) -> Result<u16> {
    match bytes.get(pos..pos + 2) {
        Some(&[lo, hi]) => Ok(u16::from_le_bytes([lo, hi])),
        _ => Err(CodecError::unexpected_end(bytes.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(items: &[(u16, &str)]) -> Vec<SourceLine> {
        items
            .iter()
            .map(|&(number, text)| SourceLine::new(number, text))
            .collect()
    }

    #[test]
    fn test_build_layout() {
        let image = build(&lines(&[(10, "END")]), "PROG.BAS", &CasOptions::default());

        let mut expected = vec![0xD3; 10];
        expected.extend_from_slice(b"PROG.B");
        // record: next = 0x553 + 6
        expected.extend_from_slice(&[0x59, 0x05, 0x0A, 0x00, 0x80, 0x00]);
        expected.extend_from_slice(&[0x00; 11]);
        assert_eq!(image, expected);
    }

    #[test]
    fn test_pointers_chain() {
        let image = build(&lines(&[(10, "CLS"), (20, "BEEP")]), "A", &CasOptions::default());
        // first record 6 bytes, second 6 bytes
        assert_eq!(&image[16..18], &[0x59, 0x05]);
        assert_eq!(&image[22..24], &[0x5F, 0x05]);
    }

    #[test]
    fn test_round_trip() {
        let source = lines(&[
            (10, "CLS:PRINT \"π=\";3.14"),
            (20, "IF A THEN 10 ELSE 30 'LOOP"),
            (30, "REM GOTO \\BEL"),
        ]);
        let program = parse(&build(&source, "TEST", &CasOptions::default())).unwrap();
        assert_eq!(program.name, "TEST");
        assert_eq!(program.lines, source);
    }

    #[test]
    fn test_out_of_order_skip() {
        let source = lines(&[(10, "CLS"), (5, "BEEP"), (20, "END")]);
        let program = parse(&build(&source, "A", &CasOptions::default())).unwrap();
        assert_eq!(program.lines, lines(&[(10, "CLS"), (20, "END")]));
    }

    #[test]
    fn test_out_of_order_truncate() {
        let source = lines(&[(10, "CLS"), (10, "BEEP"), (20, "END")]);
        let options = CasOptions {
            order: LineOrder::Truncate,
        };
        let program = parse(&build(&source, "A", &options)).unwrap();
        assert_eq!(program.lines, lines(&[(10, "CLS")]));
    }

    #[test]
    fn test_truncate_stops_at_line_zero() {
        let source = lines(&[(0, "CLS"), (10, "END")]);
        let options = CasOptions {
            order: LineOrder::Truncate,
        };
        let program = parse(&build(&source, "A", &options)).unwrap();
        assert!(program.lines.is_empty());
    }

    #[test]
    fn test_line_zero_is_kept() {
        let source = lines(&[(0, "END")]);
        let program = parse(&build(&source, "A", &CasOptions::default())).unwrap();
        assert_eq!(program.lines, source);
    }

    #[test]
    fn test_missing_terminator() {
        let mut image = vec![0xD3; 10];
        image.extend_from_slice(b"A\0\0\0\0\0");
        image.extend_from_slice(&[0x59, 0x05, 0x0A, 0x00, 0x80]);
        let error = parse(&image).unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingLineTerminator);
    }

    #[test]
    fn test_truncated_pointer() {
        let mut image = vec![0xD3; 10];
        image.extend_from_slice(b"A\0\0\0\0\0");
        image.push(0x59);
        let error = parse(&image).unwrap_err();
        assert_eq!(error.code, ErrorCode::UnexpectedEndOfInput);
    }

    #[test]
    fn test_missing_end_marker() {
        let mut image = build(&lines(&[(10, "END")]), "A", &CasOptions::default());
        image.truncate(image.len() - 11);
        let program = parse(&image).unwrap();
        assert_eq!(program.lines, lines(&[(10, "END")]));
    }
}
