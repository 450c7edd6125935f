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

//! Byte emission for tape images.
//!
//! Images are written front to back. Values that are only known later,
//! like the address of the next BASIC line, are reserved as a
//! [`WordSlot`] and patched once the value is known.

/// A reserved little-endian word in an [`ImageWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSlot(usize);

impl WordSlot {
    /// Offset of the slot's low byte.
    pub fn offset(&self) -> usize {
        self.0
    }
}

/// A growable image buffer.
#[derive(Debug, Clone, Default)]
pub struct ImageWriter {
    bytes: Vec<u8>,
}

impl ImageWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Emit a single byte.
    pub fn emit_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Emit a 16-bit word in little-endian format.
    pub fn emit_word(&mut self, word: u16) {
        self.bytes.extend_from_slice(&word.to_le_bytes());
    }

    /// Emit a run of bytes.
    pub fn emit_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Emit `count` copies of `byte`.
    pub fn emit_fill(&mut self, byte: u8, count: usize) {
        self.bytes.resize(self.bytes.len() + count, byte);
    }

    /// Emit a fixed-width field, truncated or padded with `pad`.
    pub fn emit_field(&mut self, bytes: &[u8], width: usize, pad: u8) {
        let used = bytes.len().min(width);
        self.emit_bytes(&bytes[..used]);
        self.emit_fill(pad, width - used);
    }

    /// Emit a zero placeholder word to be patched later.
    pub fn reserve_word(&mut self) -> WordSlot {
        let slot = WordSlot(self.bytes.len());
        self.emit_word(0x0000);
        slot
    }

    /// Overwrite a reserved word.
    pub fn patch_word(&mut self, slot: WordSlot, word: u16) {
        if let Some(target) = self.bytes.get_mut(slot.0..slot.0 + 2) {
            target.copy_from_slice(&word.to_le_bytes());
        }
    }

    /// Get the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Finish and return the image.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
