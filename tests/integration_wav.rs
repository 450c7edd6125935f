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

//! Integration tests for WAV output.

use pretty_assertions::assert_eq;
use retrotape::audio::cassette::{
    encode_phc_payload, CassetteSignal, HEADER_BYTES, SAMPLES_PER_BIT, SILENCE,
};
use retrotape::audio::modem::{
    BitDepth, FskConfig, ManchesterConfig, ModemConfig, Modulation, PwmConfig,
};
use retrotape::audio::wav::{extract_pcm_data, HEADER_LEN};
use retrotape::audio::{bytes_to_wav, phc_to_wav};
use retrotape::bas_to_phc;

fn u16_at(bytes: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([bytes[pos], bytes[pos + 1]])
}

fn u32_at(bytes: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]])
}

// ============================================================================
// PHC-25 Cassette
// ============================================================================

#[test]
fn test_empty_image_header() {
    let wav = phc_to_wav(&[]);
    let data_len = 19_200 + (4_200 + 600 + 60) * 8 + 5_760;

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32_at(&wav, 4), 36 + data_len as u32);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(u32_at(&wav, 16), 16);
    assert_eq!(u16_at(&wav, 20), 1);
    assert_eq!(u16_at(&wav, 22), 1);
    assert_eq!(u32_at(&wav, 24), 9_600);
    assert_eq!(u32_at(&wav, 28), 9_600);
    assert_eq!(u16_at(&wav, 32), 1);
    assert_eq!(u16_at(&wav, 34), 8);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32_at(&wav, 40), data_len as u32);
    assert_eq!(wav.len(), HEADER_LEN + data_len);
}

#[test]
fn test_program_wav_wraps_payload() {
    let image = bas_to_phc("10 PRINT \"HELLO\"\n20 GOTO 10\n", "HELLO");
    assert!(image.len() > HEADER_BYTES);

    let wav = phc_to_wav(&image);
    let payload = encode_phc_payload(&image);
    assert_eq!(extract_pcm_data(&wav).unwrap(), payload.as_slice());
    assert_eq!(payload.first(), Some(&SILENCE));
    assert_eq!(payload.last(), Some(&SILENCE));
}

#[test]
fn test_zero_byte_framing() {
    let mut signal = CassetteSignal::new();
    signal.add_framed_byte(0x00);
    let bits: Vec<&[u8]> = signal.samples().chunks(SAMPLES_PER_BIT).collect();

    assert_eq!(bits.len(), 12);
    // start bit and eight data bits share the 0 pattern
    assert!(bits[..9].iter().all(|bit| *bit == bits[0]));
    // three stop bits share the 1 pattern
    assert!(bits[9..].iter().all(|bit| *bit == bits[9]));
    assert_ne!(bits[0], bits[9]);
}

// ============================================================================
// Modulators
// ============================================================================

#[test]
fn test_raw_eight_bit_is_identity() {
    let config = ModemConfig {
        sample_rate: 8_000,
        modulation: Modulation::Raw,
        ..ModemConfig::default()
    };
    let bytes = [0x00, 0x80, 0xFF, 0x40];
    let wav = bytes_to_wav(&bytes, &config);
    assert_eq!(extract_pcm_data(&wav).unwrap(), &bytes);
    assert_eq!(u32_at(&wav, 24), 8_000);
}

#[test]
fn test_fsk_length_and_format() {
    let config = ModemConfig {
        sample_rate: 9_600,
        channels: 2,
        bit_depth: BitDepth::Sixteen,
        modulation: Modulation::Fsk(FskConfig::default()),
    };
    let wav = bytes_to_wav(&[0x55], &config);

    // preamble 1.0 s, eight bits of eight samples, trailer 0.3 s
    let frames = 9_600 + 64 + 2_880;
    assert_eq!(u16_at(&wav, 22), 2);
    assert_eq!(u16_at(&wav, 32), 4);
    assert_eq!(u16_at(&wav, 34), 16);
    assert_eq!(u32_at(&wav, 28), 9_600 * 4);
    assert_eq!(extract_pcm_data(&wav).unwrap().len(), frames * 4);
}

#[test]
fn test_stereo_repeats_each_frame() {
    let config = ModemConfig {
        sample_rate: 9_600,
        channels: 2,
        bit_depth: BitDepth::Sixteen,
        modulation: Modulation::Fsk(FskConfig::default()),
    };
    let wav = bytes_to_wav(&[0xA5], &config);
    let pcm = extract_pcm_data(&wav).unwrap();
    for frame in pcm.chunks(4) {
        assert_eq!(&frame[0..2], &frame[2..4]);
    }
}

#[test]
fn test_manchester_levels() {
    let config = ModemConfig {
        sample_rate: 9_600,
        modulation: Modulation::Manchester(ManchesterConfig::default()),
        ..ModemConfig::default()
    };
    let wav = bytes_to_wav(&[0x01], &config);
    let pcm = extract_pcm_data(&wav).unwrap();

    assert_eq!(pcm.len(), 8 * 8);
    // first bit is a 1: low half, then high half
    assert_eq!(&pcm[0..4], &[14; 4]);
    assert_eq!(&pcm[4..8], &[242; 4]);
    // second bit is a 0: high half, then low half
    assert_eq!(&pcm[8..12], &[242; 4]);
    assert_eq!(&pcm[12..16], &[14; 4]);
}

#[test]
fn test_pwm_pulse_lengths() {
    let config = ModemConfig {
        sample_rate: 10_000,
        modulation: Modulation::Pwm(PwmConfig::default()),
        ..ModemConfig::default()
    };
    let wav = bytes_to_wav(&[0x80], &config);
    let pcm = extract_pcm_data(&wav).unwrap();

    // seven 0 bits of 3 + 3 samples, then a 1 bit of 6 + 3 samples
    assert_eq!(pcm.len(), 7 * 6 + 9);
    assert_eq!(&pcm[0..3], &[242; 3]);
    assert_eq!(&pcm[3..6], &[14; 3]);
    assert_eq!(&pcm[42..48], &[242; 6]);
    assert_eq!(&pcm[48..51], &[14; 3]);
}
