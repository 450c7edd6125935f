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

//! Audio output.
//!
//! - [`cassette`]: the PHC-25 tape signal
//! - [`modem`]: generic raw, FSK, Manchester and PWM modulators
//! - [`wav`]: the RIFF/WAVE container both write

pub mod cassette;
pub mod modem;
pub mod wav;

pub use cassette::{describe_frames, phc_to_wav};
pub use modem::{bytes_to_wav, ModemConfig, Modulation};
pub use wav::WavFormat;
