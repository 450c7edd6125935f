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

//! Tape image formats.
//!
//! This module builds and parses the program files of the supported
//! machines:
//! - PHC files (Sanyo PHC-25 BASIC and machine-code loaders)
//! - CAS files (Canon X-07 BASIC)
//! - P files (ZX81 snapshots, read only)
//! - BASIC `DATA` listings generated from binary blobs

pub mod cas;
pub mod data;
mod emit;
pub mod phc;
pub mod zx81;

pub use emit::{ImageWriter, WordSlot};

use std::path::Path;

/// A file format known to the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Sanyo PHC-25 tape image.
    Phc,
    /// Canon X-07 tape image.
    Cas,
    /// ZX81 snapshot.
    P,
    /// RIFF/WAVE audio.
    Wav,
    /// Plain-text BASIC listing.
    Bas,
}

impl Format {
    /// The usual file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Phc => "phc",
            Format::Cas => "cas",
            Format::P => "p",
            Format::Wav => "wav",
            Format::Bas => "bas",
        }
    }
}

/// Determine the format from a file extension.
pub fn format_from_extension(path: &Path) -> Option<Format> {
    match path.extension()?.to_str()?.to_lowercase().as_str() {
        "phc" => Some(Format::Phc),
        "cas" => Some(Format::Cas),
        "p" => Some(Format::P),
        "wav" => Some(Format::Wav),
        "bas" | "txt" => Some(Format::Bas),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            format_from_extension(Path::new("game.phc")),
            Some(Format::Phc)
        );
        assert_eq!(
            format_from_extension(Path::new("GAME.CAS")),
            Some(Format::Cas)
        );
        assert_eq!(format_from_extension(Path::new("demo.P")), Some(Format::P));
        assert_eq!(
            format_from_extension(Path::new("listing.txt")),
            Some(Format::Bas)
        );
        assert_eq!(format_from_extension(Path::new("image.d64")), None);
        assert_eq!(format_from_extension(Path::new("noext")), None);
    }

    #[test]
    fn test_extension() {
        assert_eq!(Format::Phc.extension(), "phc");
        assert_eq!(Format::Wav.extension(), "wav");
    }
}
