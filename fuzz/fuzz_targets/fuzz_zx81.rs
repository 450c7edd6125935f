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

//! Fuzz target for the ZX81 snapshot reader.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_zx81

#![no_main]

use libfuzzer_sys::fuzz_target;
use retrotape::formats::zx81;
use retrotape::ZxOptions;

fuzz_target!(|data: &[u8]| {
    let options = ZxOptions {
        graphics: true,
        rem_as_hex: true,
    };
    let _ = zx81::listing(data, &options);
    let _ = zx81::extract_rem_payload(data);
});
