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

//! Fuzz target for the PHC-25 image decoder and tokenizer.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_phc
//!
//! Run for a specific duration:
//!   cargo +nightly fuzz run fuzz_phc -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding should never panic, only return Ok or Err
    let _ = retrotape::phc_to_bas(data);

    // Tokenizing never fails; the image it builds must decode without panicking
    let source = String::from_utf8_lossy(data);
    let image = retrotape::bas_to_phc(&source, "FUZZ");
    let _ = retrotape::phc_to_bas(&image);
});
