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

//! Negative tests for the Retrotape codecs.
//!
//! These tests verify that malformed images are rejected with the right
//! error code, and that lenient paths recover instead of failing.

use retrotape::formats::{cas, phc, zx81};
use retrotape::hex::parse_address;
use retrotape::{format_error, ErrorCode, LineSyntax, ZxOptions};
use test_case::test_case;

fn sync() -> Vec<u8> {
    let mut bytes = vec![0xA5; 10];
    bytes.extend_from_slice(b"NAME\0\0");
    bytes
}

fn leader() -> Vec<u8> {
    let mut bytes = vec![0xD3; 10];
    bytes.extend_from_slice(b"NAME\0\0");
    bytes
}

// ============================================================================
// PHC Errors
// ============================================================================

/// Test that PHC images without the program end marker are rejected.
#[test_case(&[]; "empty")]
#[test_case(&[0xA5; 10]; "sync_only")]
#[test_case(&[0xA5, 0xA5, 0x00, 0x00]; "truncated_header")]
fn test_phc_missing_separator(bytes: &[u8]) {
    let err = phc::parse(bytes).unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingSeparator);
}

/// Test that PHC images without the index trailer are rejected.
#[test_case(&[0x95, 0x00, 0x00, 0x00]; "no_index")]
#[test_case(&[0x95, 0x00, 0x00, 0x00, 0x01, 0xC0, 0x0A, 0x00, 0x00, 0xFF, 0xFF, 0xFF]; "short_trailer")]
fn test_phc_missing_trailer(program: &[u8]) {
    let mut bytes = sync();
    bytes.extend_from_slice(program);
    let err = phc::parse(&bytes).unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingTrailer);
}

#[test]
fn test_phc_unknown_token_placeholder() {
    let mut bytes = sync();
    bytes.extend_from_slice(&[0xB3, 0x00, 0x00, 0x00]);
    bytes.extend_from_slice(&[0x01, 0xC0, 0x0A, 0x00]);
    bytes.extend_from_slice(&[0x00, 0xFF, 0xFF, 0xFF, 0xFF]);
    let program = phc::parse(&bytes).unwrap();
    assert_eq!(program.lines[0].text, "{TOK:b3}");
}

// ============================================================================
// CAS Errors
// ============================================================================

/// Test that truncated CAS records are rejected.
#[test_case(&[0x59], ErrorCode::UnexpectedEndOfInput; "half_pointer")]
#[test_case(&[0x59, 0x05, 0x0A], ErrorCode::UnexpectedEndOfInput; "half_line_number")]
#[test_case(&[0x59, 0x05, 0x0A, 0x00, 0x9F, 0x41], ErrorCode::MissingLineTerminator; "no_terminator")]
fn test_cas_truncated(records: &[u8], expected_code: ErrorCode) {
    let mut bytes = leader();
    bytes.extend_from_slice(records);
    let err = cas::parse(&bytes).unwrap_err();
    assert_eq!(err.code, expected_code);
}

#[test]
fn test_cas_bad_pointer_is_tolerated() {
    let mut bytes = leader();
    // Pointer says 0x0600 although the record is 6 bytes long
    bytes.extend_from_slice(&[0x00, 0x06, 0x0A, 0x00, 0x80, 0x00]);
    bytes.extend_from_slice(&[0x00; 11]);
    let program = cas::parse(&bytes).unwrap();
    assert_eq!(program.lines.len(), 1);
    assert_eq!(program.lines[0].text, "END");
}

// ============================================================================
// ZX81 Errors
// ============================================================================

/// Test that short or truncated snapshots are rejected.
#[test_case(0; "empty")]
#[test_case(4; "half_d_file")]
#[test_case(100; "inside_system_variables")]
fn test_zx81_too_short(len: usize) {
    let mut bytes = vec![0u8; len];
    if len >= 5 {
        bytes[3..5].copy_from_slice(&0x4090u16.to_le_bytes());
    }
    let err = zx81::parse(&bytes, &ZxOptions::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnexpectedEndOfInput);
}

#[test]
fn test_zx81_d_file_past_end() {
    let mut bytes = vec![0u8; 116];
    bytes[3..5].copy_from_slice(&0x5000u16.to_le_bytes());
    bytes.extend_from_slice(&[0x00, 0x0A, 0x02, 0x00, 0xE3, 0x76]);
    let err = zx81::parse(&bytes, &ZxOptions::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnexpectedEndOfInput);
}

// ============================================================================
// Text Input Errors
// ============================================================================

/// Test that bad start addresses are rejected.
#[test_case("C00Z", ErrorCode::InvalidHexDigit; "bad_digit")]
#[test_case("&HXYZ", ErrorCode::InvalidHexDigit; "bad_digits_after_prefix")]
#[test_case("", ErrorCode::InvalidStartAddress; "empty")]
#[test_case("12345", ErrorCode::InvalidStartAddress; "too_wide")]
fn test_bad_address(text: &str, expected_code: ErrorCode) {
    let err = parse_address(text).unwrap_err();
    assert_eq!(err.code, expected_code);
}

/// Test that lines without a usable number are skipped, not fatal.
#[test_case("PRINT 1\n10 END", LineSyntax::Phc; "phc_missing_number")]
#[test_case("10END\n20 END", LineSyntax::Phc; "phc_missing_space")]
#[test_case("99999 END\n10 END", LineSyntax::X07; "x07_number_too_large")]
fn test_listing_skips_bad_lines(text: &str, syntax: LineSyntax) {
    let lines = retrotape::listing::parse_listing(text, syntax);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "END");
}

// ============================================================================
// Error Reports
// ============================================================================

#[test]
fn test_report_points_at_end_of_input() {
    let bytes = sync();
    let err = phc::parse(&bytes).unwrap_err();
    let report = format_error(&err, &bytes, Some("broken.phc"));
    assert!(report.starts_with("error[E001]: missing separator\n"));
    assert!(report.contains("broken.phc:0x0010"));
    assert!(report.contains("= hint: the program must end with 00 00 00"));
}
