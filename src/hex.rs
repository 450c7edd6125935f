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

//! Hex text helpers.

use crate::error::{CodecError, ErrorCode, Result};

/// Bytes per line in [`to_hex_string`] and [`hex_dump`].
pub const BYTES_PER_LINE: usize = 16;

/// Lowercase hex, space separated, 16 bytes per line.
pub fn to_hex_string(bytes: &[u8]) -> String {
    bytes
        .chunks(BYTES_PER_LINE)
        .map(|chunk| {
            chunk
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Classic dump: offset, lowercase hex and the printable ASCII characters.
///
/// ```text
/// 000000  48 69 00                                          Hi.
/// ```
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if is_printable(b) { char::from(b) } else { '.' })
            .collect();
        out.push_str(&format!(
            "{:06x}  {:<width$}  {}\n",
            i * BYTES_PER_LINE,
            hex.join(" "),
            ascii,
            width = BYTES_PER_LINE * 3
        ));
    }
    out
}

/// Uppercase dump with memory addresses starting at `base`. The ASCII
/// column ignores bit 7, which some machines use to mark inverse video.
///
/// ```text
/// 0043A0  C1 42                                            |AB|
/// ```
pub fn hex_preview(bytes: &[u8], width: usize, base: u32) -> String {
    let width = width.max(1);
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(width).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| b & 0x7F)
            .map(|c| if is_printable(c) { char::from(c) } else { '.' })
            .collect();
        let address = u64::from(base) + (i * width) as u64;
        out.push_str(&format!(
            "{:06X}  {:<pad$}  |{}|\n",
            address,
            hex.join(" "),
            ascii,
            pad = width * 3
        ));
    }
    out
}

fn is_printable(byte: u8) -> bool {
    (32..=126).contains(&byte)
}

/// Collect every two-digit hex token of a dump. Offsets, ASCII columns
/// and anything else that is not exactly two hex digits are ignored.
pub fn parse_hex_dump(text: &str) -> Vec<u8> {
    text.split_whitespace()
        .filter(|token| token.len() == 2 && token.bytes().all(|b| b.is_ascii_hexdigit()))
        .filter_map(|token| u8::from_str_radix(token, 16).ok())
        .collect()
}

/// Parse a 16-bit address written as `C000`, `&HC000`, `0xC000` or `$C000`.
pub fn parse_address(text: &str) -> Result<u16> {
    let trimmed = text.trim();
    let digits = ["&H", "&h", "0x", "0X", "$"]
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(CodecError::new(
            ErrorCode::InvalidStartAddress,
            format!("'{}' is not an address", text),
        ));
    }

    if let Some(index) = digits.find(|c: char| !c.is_ascii_hexdigit()) {
        return Err(CodecError::new(
            ErrorCode::InvalidHexDigit,
            format!("invalid hex digit in '{}'", text),
        )
        .at(trimmed.len() - digits.len() + index));
    }

    u16::from_str_radix(digits, 16).map_err(|_| {
        CodecError::new(
            ErrorCode::InvalidStartAddress,
            format!("address '{}' does not fit in 16 bits", text),
        )
        .with_hint("addresses range from 0000 to FFFF")
    })
}
