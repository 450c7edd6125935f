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

//! Retrotape Library
//!
//! Converts BASIC listings to and from the tape images of three 1980s home
//! computers, and turns bytes into cassette audio.
//!
//! # Modules
//!
//! - [`error`] - Error types and error reporting
//! - [`listing`] - Numbered source lines
//! - [`tokens`] - Keyword tables per machine
//! - [`lexer`] - Line tokenizer and detokenizer
//! - [`formats`] - PHC-25 `.PHC`, Canon X-07 `.CAS` and ZX81 `.P` images
//! - [`audio`] - WAV output: PHC-25 cassette signal and generic modulators
//! - [`hex`] - Hex dumps
//! - [`glyph`] - Character grid to hex bytes
//!
//! # Example
//!
//! ```
//! let image = retrotape::bas_to_phc("10 PRINT \"HELLO\"\n20 GOTO 10\n", "HELLO");
//! let listing = retrotape::phc_to_bas(&image).unwrap();
//! assert_eq!(listing, "10 PRINT \"HELLO\"\n20 GOTO 10");
//!
//! let wav = retrotape::audio::phc_to_wav(&image);
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```

pub mod audio;
pub mod error;
pub mod formats;
pub mod glyph;
pub mod hex;
pub mod lexer;
pub mod listing;
pub mod tokens;

// Re-export commonly used types
pub use error::{format_error, CodecError, ErrorCode, Result};
pub use formats::cas::CasOptions;
pub use formats::zx81::ZxOptions;
pub use formats::{format_from_extension, Format};
pub use listing::{LineSyntax, SourceLine};

/// The version of Retrotape.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the tool.
pub const NAME: &str = "Retrotape";

/// Tokenize a PHC-25 listing into a `.PHC` image.
pub fn bas_to_phc(source: &str, name: &str) -> Vec<u8> {
    let lines = listing::parse_listing(source, LineSyntax::Phc);
    formats::phc::build(&lines, name)
}

/// Detokenize a `.PHC` image into a listing.
pub fn phc_to_bas(bytes: &[u8]) -> Result<String> {
    let program = formats::phc::parse(bytes)?;
    Ok(listing::format_listing(&program.lines))
}

/// Tokenize a Canon X-07 listing into a `.CAS` image.
pub fn bas_to_cas(source: &str, name: &str, options: &CasOptions) -> Vec<u8> {
    let lines = listing::parse_listing(source, LineSyntax::X07);
    formats::cas::build(&lines, name, options)
}

/// Detokenize a `.CAS` image into a listing.
pub fn cas_to_bas(bytes: &[u8]) -> Result<String> {
    let program = formats::cas::parse(bytes)?;
    Ok(listing::format_listing(&program.lines))
}

/// List a ZX81 `.P` snapshot.
pub fn p_to_text(bytes: &[u8], options: &ZxOptions) -> Result<String> {
    formats::zx81::listing(bytes, options)
}
