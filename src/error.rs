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

//! Error types for the Retrotape codecs.
//!
//! Encoding is lenient and never fails: malformed source lines are skipped.
//! Decoding fails with a [`CodecError`] when a structural marker of the
//! container format is missing or the buffer ends in the middle of a record.

use thiserror::Error;

/// Error codes for the codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Container structure errors (E001-E009)
    MissingSeparator,
    MissingTrailer,
    UnexpectedEndOfInput,
    MissingLineTerminator,

    // Text input errors (E010-E019)
    InvalidHexDigit,
    InvalidStartAddress,

    // Tooling errors (E020-E029)
    UnknownFormat,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl ErrorCode {
    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MissingSeparator => "E001",
            ErrorCode::MissingTrailer => "E002",
            ErrorCode::UnexpectedEndOfInput => "E003",
            ErrorCode::MissingLineTerminator => "E004",

            ErrorCode::InvalidHexDigit => "E010",
            ErrorCode::InvalidStartAddress => "E011",

            ErrorCode::UnknownFormat => "E020",
        }
    }
}

/// A codec error, optionally pointing at a byte offset in the input.
#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct CodecError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Byte offset in the input where the problem was detected.
    pub offset: Option<usize>,
    /// Optional hint for fixing the error.
    pub hint: Option<String>,
}

impl CodecError {
    /// Create a new codec error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            offset: None,
            hint: None,
        }
    }

    /// Shorthand for a buffer that ended in the middle of a record.
    pub fn unexpected_end(offset: usize) -> Self {
        Self::new(ErrorCode::UnexpectedEndOfInput, "unexpected end of input").at(offset)
    }

    /// Attach the byte offset where the error was detected.
    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add a hint to this error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Get the error code string.
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Number of bytes shown on each side of the offending byte.
const CONTEXT_BYTES: usize = 4;

/// Format an error with a hex window of the input around its offset.
pub fn format_error(error: &CodecError, input: &[u8], filename: Option<&str>) -> String {
    let filename = filename.unwrap_or("<input>");

    let mut output = String::new();

    output.push_str(&format!("error[{}]: {}\n", error.code_str(), error.message));

    match error.offset {
        Some(offset) => {
            output.push_str(&format!("  --> {}:0x{:04X}\n", filename, offset));

            let start = offset.saturating_sub(CONTEXT_BYTES);
            let end = (offset + CONTEXT_BYTES + 1).min(input.len());
            if start < end {
                let window: Vec<String> = input[start..end]
                    .iter()
                    .map(|b| format!("{:02X}", b))
                    .collect();
                output.push_str("   |\n");
                output.push_str(&format!("   | {}\n", window.join(" ")));

                // Each byte takes three columns; a caret past the end marks EOF.
                let caret_column = (offset - start) * 3;
                output.push_str(&format!("   | {:>width$}^^\n", "", width = caret_column));
            } else {
                output.push_str("   |\n");
                output.push_str("   | <end of input>\n");
            }
        }
        None => output.push_str(&format!("  --> {}\n", filename)),
    }

    if let Some(hint) = &error.hint {
        output.push_str(&format!("   = hint: {}\n", hint));
    }

    output
}
