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

//! Plain-text BASIC listings.
//!
//! A listing is a sequence of lines, each starting with a decimal line
//! number. Lines without a usable number are skipped: the tools work on
//! hand-edited text and a stray comment line must not abort a conversion.

use tracing::warn;

/// One numbered line of BASIC source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The BASIC line number.
    pub number: u16,
    /// Everything after the line number and the whitespace following it.
    pub text: String,
}

impl SourceLine {
    /// Create a new source line.
    pub fn new(number: u16, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.number, self.text)
    }
}

/// How a line number is separated from the statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSyntax {
    /// At least one whitespace character after the number; the text is
    /// kept verbatim including trailing blanks.
    Phc,
    /// Whitespace after the number is optional; line ends are trimmed.
    X07,
}

/// Parse a listing into numbered lines, in input order.
pub fn parse_listing(text: &str, syntax: LineSyntax) -> Vec<SourceLine> {
    let mut lines = Vec::new();

    for (index, raw) in text.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let raw = match syntax {
            LineSyntax::Phc => raw,
            LineSyntax::X07 => raw.trim_end(),
        };
        if raw.trim().is_empty() {
            continue;
        }

        match parse_line(raw, syntax) {
            Some(line) => lines.push(line),
            None => warn!(line = index + 1, "skipping line without a valid line number"),
        }
    }

    lines
}

/// Parse a single numbered line.
pub fn parse_line(raw: &str, syntax: LineSyntax) -> Option<SourceLine> {
    let rest = raw.trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    let number: u16 = rest[..digits_end].parse().ok()?;
    let after = &rest[digits_end..];
    let text = after.trim_start();

    if syntax == LineSyntax::Phc && text.len() == after.len() {
        // No separating whitespace
        return None;
    }

    Some(SourceLine::new(number, text))
}

/// Render lines back into listing text, one `"<number> <text>"` per line.
pub fn format_listing(lines: &[SourceLine]) -> String {
    lines
        .iter()
        .map(|line| line.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Derive a tape program name from a file name.
///
/// Strips the last extension and keeps at most `width` characters.
pub fn program_name(filename: &str, width: usize) -> String {
    let base = match filename.rfind('.') {
        Some(dot) if dot > 0 && !filename[dot + 1..].contains('/') => &filename[..dot],
        _ => filename,
    };
    base.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_phc_line() {
        let line = parse_line("10 PRINT \"HI\"", LineSyntax::Phc).unwrap();
        assert_eq!(line.number, 10);
        assert_eq!(line.text, "PRINT \"HI\"");
    }

    #[test]
    fn test_phc_requires_whitespace() {
        assert!(parse_line("10PRINT", LineSyntax::Phc).is_none());
        assert_eq!(
            parse_line("10PRINT", LineSyntax::X07).unwrap().text,
            "PRINT"
        );
    }

    #[test]
    fn test_phc_keeps_trailing_blanks() {
        let lines = parse_listing("10 A=1  \n", LineSyntax::Phc);
        assert_eq!(lines[0].text, "A=1  ");

        let lines = parse_listing("10 A=1  \n", LineSyntax::X07);
        assert_eq!(lines[0].text, "A=1");
    }

    #[test]
    fn test_parse_listing_skips_malformed() {
        let text = "10 CLS\r\n\nhello\n  20   GOTO 10\n99999 END\n";
        let lines = parse_listing(text, LineSyntax::Phc);
        assert_eq!(
            lines,
            vec![SourceLine::new(10, "CLS"), SourceLine::new(20, "GOTO 10")]
        );
    }

    #[test]
    fn test_format_listing() {
        let lines = vec![SourceLine::new(10, "CLS"), SourceLine::new(20, "END")];
        assert_eq!(format_listing(&lines), "10 CLS\n20 END");
    }

    #[test]
    fn test_program_name() {
        assert_eq!(program_name("program.bas", 6), "progra");
        assert_eq!(program_name("GAME.BAS", 6), "GAME");
        assert_eq!(program_name("noext", 6), "noext");
        assert_eq!(program_name(".hidden", 6), ".hidde");
        assert_eq!(program_name("a.b.c", 6), "a.b");
    }
}
