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

//! Integration tests for ZX81 snapshots.

use pretty_assertions::assert_eq;
use retrotape::formats::zx81::{self, PROGRAM_ADDRESS, PROGRAM_OFFSET, REM_PAYLOAD_ADDRESS};
use retrotape::tokens::zx81::{NEWLINE, NUMBER_MARKER, REM};
use retrotape::{p_to_text, ZxOptions};

const RAND: u8 = 249;
const USR: u8 = 212;

/// Build a snapshot from `(number, body)` lines.
fn snapshot(lines: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut program = Vec::new();
    for (number, body) in lines {
        program.extend_from_slice(&number.to_be_bytes());
        program.extend_from_slice(&(body.len() as u16).to_le_bytes());
        program.extend_from_slice(body);
    }
    let d_file = PROGRAM_ADDRESS + program.len() as u16;

    let mut bytes = vec![0u8; PROGRAM_OFFSET];
    bytes[3..5].copy_from_slice(&d_file.to_le_bytes());
    bytes.extend_from_slice(&program);
    // display file and variables follow the program
    bytes.extend_from_slice(&[NEWLINE; 25]);
    bytes.push(0x80);
    bytes
}

/// `1 REM <code>` followed by `10 RAND USR 16514`.
fn loader(code: &[u8]) -> Vec<u8> {
    let mut rem = vec![REM];
    rem.extend_from_slice(code);
    rem.push(NEWLINE);

    let mut rand = vec![RAND, USR, 29, 34, 33, 29, 32, NUMBER_MARKER];
    rand.extend_from_slice(&[0x8F, 0x01, 0x04, 0x00, 0x00]);
    rand.push(NEWLINE);

    snapshot(&[(1, rem), (10, rand)])
}

#[test]
fn test_listing_of_loader() {
    let bytes = loader(&[0x3E, 0x01, 0xC9]);
    let text = p_to_text(&bytes, &ZxOptions::default()).unwrap();
    assert_eq!(text, "   1 REM Y#TAN \n  10 RAND USR 16514\n");
}

#[test]
fn test_listing_with_rem_as_hex() {
    let bytes = loader(&[0x3E, 0x01, 0xC9]);
    let options = ZxOptions {
        rem_as_hex: true,
        ..ZxOptions::default()
    };
    let text = p_to_text(&bytes, &options).unwrap();
    assert_eq!(text, "   1 REM 3E 01 C9\n  10 RAND USR 16514\n");
}

#[test]
fn test_listing_with_graphics() {
    let bytes = loader(&[0x3E, 0x01, 0xC9]);
    let options = ZxOptions {
        graphics: true,
        ..ZxOptions::default()
    };
    let text = p_to_text(&bytes, &options).unwrap();
    assert_eq!(text, "   1 REM Y▘TAN \n  10 RAND USR 16514\n");
}

#[test]
fn test_display_file_is_not_listed() {
    let bytes = loader(&[]);
    let lines = zx81::parse(&bytes, &ZxOptions::default()).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, " REM ");
}

#[test]
fn test_extract_payload() {
    let code = [0x21, 0x00, 0x40, 0x7E, 0xC9];
    let payload = zx81::extract_rem_payload(&loader(&code)).unwrap();
    assert_eq!(payload.line_number, 1);
    assert!(payload.is_rem);
    assert_eq!(payload.bytes, code.to_vec());
}

#[test]
fn test_payload_runs_from_16514() {
    assert_eq!(REM_PAYLOAD_ADDRESS, 16514);
}

#[test]
fn test_extract_payload_without_rem() {
    let bytes = snapshot(&[(5, vec![227, NEWLINE])]);
    let payload = zx81::extract_rem_payload(&bytes).unwrap();
    assert_eq!(payload.line_number, 5);
    assert!(!payload.is_rem);
    assert!(payload.bytes.is_empty());
}
