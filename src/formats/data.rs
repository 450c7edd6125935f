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

//! BASIC `DATA` statements holding binary data as hex.

/// How the hex bytes of a line are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataStyle {
    /// `0A1BFF`, read back with `MID$`.
    #[default]
    Concat,
    /// `0A,1B,FF`, one item per byte.
    Comma,
}

/// Options for [`data_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataOptions {
    /// Joining style.
    pub style: DataStyle,
    /// First line number.
    pub start: u32,
    /// Line number step.
    pub increment: u32,
    /// Bytes per line.
    pub bytes_per_line: usize,
}

impl Default for DataOptions {
    fn default() -> Self {
        Self {
            style: DataStyle::Concat,
            start: 10,
            increment: 10,
            bytes_per_line: 16,
        }
    }
}

/// Render bytes as numbered `DATA` lines.
pub fn data_lines(bytes: &[u8], options: &DataOptions) -> Vec<String> {
    let separator = match options.style {
        DataStyle::Concat => "",
        DataStyle::Comma => ",",
    };

    let mut number = options.start;
    bytes
        .chunks(options.bytes_per_line.max(1))
        .map(|chunk| {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
            let line = format!("{} DATA {}", number, hex.join(separator));
            number = number.saturating_add(options.increment);
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat() {
        let lines = data_lines(&[0x0A, 0x1B, 0xFF], &DataOptions::default());
        assert_eq!(lines, vec!["10 DATA 0A1BFF"]);
    }

    #[test]
    fn test_comma_and_numbering() {
        let bytes: Vec<u8> = (0..18).collect();
        let options = DataOptions {
            style: DataStyle::Comma,
            start: 100,
            increment: 5,
            ..DataOptions::default()
        };
        let lines = data_lines(&bytes, &options);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "100 DATA 00,01,02,03,04,05,06,07,08,09,0A,0B,0C,0D,0E,0F"
        );
        assert_eq!(lines[1], "105 DATA 10,11");
    }

    #[test]
    fn test_empty_input() {
        assert!(data_lines(&[], &DataOptions::default()).is_empty());
    }
}
