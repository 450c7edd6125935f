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

//! PHC-25 cassette signal.
//!
//! The recorder stores 1200 bits per second. At 9600 Hz every bit takes
//! eight unsigned 8-bit samples: a `1` is two short cycles, a `0` one long
//! cycle. Each byte is framed as a `0` start bit, eight data bits with the
//! least significant first, and three `1` stop bits.
//!
//! ```text
//! silence 2.0s | 4200 x 1 | 16 header bytes | 600 x 1 | program bytes | 60 x 1 | silence 0.6s
//! ```

use std::fmt::Write as _;

use tracing::debug;

use super::wav::{write_wav_to_vec, WavFormat};

/// Sample rate of the generated audio.
pub const SAMPLE_RATE: u32 = 9600;

/// Bits per second on tape.
pub const BAUD: u32 = 1200;

/// Samples per bit.
pub const SAMPLES_PER_BIT: usize = (SAMPLE_RATE / BAUD) as usize;

/// Unsigned 8-bit silence level.
pub const SILENCE: u8 = 0x80;

const TRUE_BIT: [u8; SAMPLES_PER_BIT] = [0x80, 0x00, 0x80, 0xFF, 0x80, 0x00, 0x80, 0xFF];
const FALSE_BIT: [u8; SAMPLES_PER_BIT] = [0x80, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];

/// Silence before the leader (2 s).
pub const LEAD_SILENCE: usize = SAMPLE_RATE as usize * 2;

/// `1` bits in the leader (3.5 s).
pub const LEAD_SYNC_BITS: usize = BAUD as usize * 7 / 2;

/// Bytes sent before the inter-block gap.
pub const HEADER_BYTES: usize = 16;

/// `1` bits between header and program.
pub const GAP_SYNC_BITS: usize = 600;

/// `1` bits after the program.
pub const TAIL_SYNC_BITS: usize = 60;

/// Silence after the tail (0.6 s).
pub const TAIL_SILENCE: usize = SAMPLE_RATE as usize * 6 / 10;

/// Stop bits per framed byte.
pub const STOP_BITS: usize = 3;

/// Builder for the cassette sample stream.
#[derive(Debug, Clone, Default)]
pub struct CassetteSignal {
    samples: Vec<u8>,
}

impl CassetteSignal {
    /// Create an empty signal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` silent samples.
    pub fn add_silence(&mut self, count: usize) {
        self.samples.resize(self.samples.len() + count, SILENCE);
    }

    /// Append one bit.
    pub fn add_bit(&mut self, bit: bool) {
        let pattern = if bit { &TRUE_BIT } else { &FALSE_BIT };
        self.samples.extend_from_slice(pattern);
    }

    /// Append `count` copies of `bit`.
    pub fn add_bit_run(&mut self, bit: bool, count: usize) {
        self.samples.reserve(count * SAMPLES_PER_BIT);
        for _ in 0..count {
            self.add_bit(bit);
        }
    }

    /// Append one byte with start and stop bits.
    pub fn add_framed_byte(&mut self, byte: u8) {
        self.add_bit(false);
        for i in 0..8 {
            self.add_bit((byte >> i) & 1 == 1);
        }
        self.add_bit_run(true, STOP_BITS);
    }

    /// Append framed bytes.
    pub fn add_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.add_framed_byte(byte);
        }
    }

    /// Number of samples so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples were added.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples so far.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Consume the builder.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

/// Encode a `.PHC` image as cassette samples, without the WAV header.
pub fn encode_phc_payload(bytes: &[u8]) -> Vec<u8> {
    let split = HEADER_BYTES.min(bytes.len());
    let (header, program) = bytes.split_at(split);

    let mut signal = CassetteSignal::new();
    signal.add_silence(LEAD_SILENCE);
    signal.add_bit_run(true, LEAD_SYNC_BITS);
    signal.add_bytes(header);
    signal.add_bit_run(true, GAP_SYNC_BITS);
    signal.add_bytes(program);
    signal.add_bit_run(true, TAIL_SYNC_BITS);
    signal.add_silence(TAIL_SILENCE);

    debug!(
        input = bytes.len(),
        samples = signal.len(),
        "encoded cassette signal"
    );
    signal.into_samples()
}

/// Encode a `.PHC` image as a mono 8-bit 9600 Hz WAV file.
pub fn phc_to_wav(bytes: &[u8]) -> Vec<u8> {
    let payload = encode_phc_payload(bytes);
    write_wav_to_vec(&WavFormat::mono(SAMPLE_RATE, 8), &payload)
}

/// Describe the bits of one framed byte, e.g. `0 1 0 0 0 0 0 0 0 111`
/// for `0x01`.
pub fn frame_bits(byte: u8) -> String {
    let mut text = String::from("0");
    for i in 0..8 {
        text.push(' ');
        text.push(if (byte >> i) & 1 == 1 { '1' } else { '0' });
    }
    text.push_str(" 111");
    text
}

/// Describe how an image is framed on tape.
pub fn describe_frames(bytes: &[u8]) -> String {
    let mut text = String::from("=== HEADER FRAMES ===\n");
    for (i, &byte) in bytes.iter().enumerate() {
        if i == HEADER_BYTES {
            text.push_str("\n=== PROGRAM FRAMES ===\n");
        }
        let _ = writeln!(text, "Byte {}: {}", i, frame_bits(byte));
    }
    if bytes.len() <= HEADER_BYTES {
        text.push_str("\n=== PROGRAM FRAMES ===\n");
    }
    text.push_str("\n=== TAIL / SYNC ===\n");
    let _ = writeln!(text, "{} × '1' bits (sync)", TAIL_SYNC_BITS);
    text.push_str("0.6s silence");
    text
}

/// Rough playing time of an image, in seconds.
pub fn estimate_duration_seconds(len: usize) -> f64 {
    6.81 + 0.01 * len.saturating_sub(HEADER_BYTES) as f64
}

/// Exact playing time of an image, in seconds.
pub fn duration_seconds(len: usize) -> f64 {
    let bits = LEAD_SYNC_BITS + GAP_SYNC_BITS + TAIL_SYNC_BITS + len * (1 + 8 + STOP_BITS);
    let samples = LEAD_SILENCE + TAIL_SILENCE + bits * SAMPLES_PER_BIT;
    samples as f64 / f64::from(SAMPLE_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::wav::{extract_pcm_data, HEADER_LEN};

    const FRAME_SAMPLES: usize = 12 * SAMPLES_PER_BIT;

    fn fixed_samples() -> usize {
        LEAD_SILENCE + (LEAD_SYNC_BITS + GAP_SYNC_BITS + TAIL_SYNC_BITS) * SAMPLES_PER_BIT
            + TAIL_SILENCE
    }

    #[test]
    fn test_constants() {
        assert_eq!(SAMPLES_PER_BIT, 8);
        assert_eq!(LEAD_SILENCE, 19_200);
        assert_eq!(LEAD_SYNC_BITS, 4_200);
        assert_eq!(TAIL_SILENCE, 5_760);
    }

    #[test]
    fn test_framed_byte() {
        let mut signal = CassetteSignal::new();
        signal.add_framed_byte(0x01);
        let samples = signal.into_samples();
        assert_eq!(samples.len(), FRAME_SAMPLES);
        assert_eq!(&samples[0..8], &FALSE_BIT);
        assert_eq!(&samples[8..16], &TRUE_BIT);
        assert_eq!(&samples[16..24], &FALSE_BIT);
        assert_eq!(&samples[72..80], &TRUE_BIT);
        assert_eq!(&samples[88..96], &TRUE_BIT);
    }

    #[test]
    fn test_payload_length() {
        for len in [0usize, 1, 16, 17, 100] {
            let image = vec![0xA5; len];
            assert_eq!(
                encode_phc_payload(&image).len(),
                fixed_samples() + len * FRAME_SAMPLES
            );
        }
    }

    #[test]
    fn test_payload_layout() {
        let image: Vec<u8> = (0..20).collect();
        let payload = encode_phc_payload(&image);

        assert!(payload[..LEAD_SILENCE].iter().all(|&s| s == SILENCE));
        let sync = &payload[LEAD_SILENCE..LEAD_SILENCE + SAMPLES_PER_BIT];
        assert_eq!(sync, &TRUE_BIT);

        // the gap follows the 16 header frames
        let gap = LEAD_SILENCE + LEAD_SYNC_BITS * SAMPLES_PER_BIT + 16 * FRAME_SAMPLES;
        let gap_end = gap + GAP_SYNC_BITS * SAMPLES_PER_BIT;
        assert!(payload[gap..gap_end].chunks(8).all(|bit| bit == TRUE_BIT));
        // start bit of byte 16
        assert_eq!(&payload[gap_end..gap_end + 8], &FALSE_BIT);

        assert!(payload[payload.len() - TAIL_SILENCE..]
            .iter()
            .all(|&s| s == SILENCE));
    }

    #[test]
    fn test_wav_container() {
        let wav = phc_to_wav(&[0x00, 0xFF]);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 9600);
        assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 8);
        let pcm = extract_pcm_data(&wav).unwrap();
        assert_eq!(pcm.len(), wav.len() - HEADER_LEN);
        assert_eq!(pcm, encode_phc_payload(&[0x00, 0xFF]).as_slice());
    }

    #[test]
    fn test_frame_bits() {
        assert_eq!(frame_bits(0x01), "0 1 0 0 0 0 0 0 0 111");
        assert_eq!(frame_bits(0xA5), "0 1 0 1 0 0 1 0 1 111");
    }

    #[test]
    fn test_describe_frames() {
        let image: Vec<u8> = (0..17).collect();
        let text = describe_frames(&image);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=== HEADER FRAMES ===");
        assert_eq!(lines[1], "Byte 0: 0 0 0 0 0 0 0 0 0 111");
        assert_eq!(lines[17], "");
        assert_eq!(lines[18], "=== PROGRAM FRAMES ===");
        assert_eq!(lines[19], "Byte 16: 0 0 0 0 0 1 0 0 0 111");
        assert_eq!(lines[21], "=== TAIL / SYNC ===");
        assert_eq!(lines[22], "60 × '1' bits (sync)");
        assert_eq!(lines[23], "0.6s silence");
    }

    #[test]
    fn test_durations() {
        assert!((estimate_duration_seconds(10) - 6.81).abs() < 1e-9);
        assert!((estimate_duration_seconds(116) - 7.81).abs() < 1e-9);
        assert!((duration_seconds(0) - fixed_samples() as f64 / 9600.0).abs() < 1e-9);
    }
}
