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

//! Generic byte to audio modulators.
//!
//! Samples are synthesized as `f64` in `[-1, 1]` and quantized at the end,
//! so every modulation works with both 8-bit and 16-bit output.

use std::f64::consts::PI;

use tracing::debug;

use super::wav::{write_wav_to_vec, WavFormat};

/// Order in which the data bits of a byte are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// Least significant bit first.
    #[default]
    Lsb,
    /// Most significant bit first.
    Msb,
}

/// Parity bit appended after the data bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    /// The parity bit makes the number of ones even.
    Even,
    /// The parity bit makes the number of ones odd.
    Odd,
}

/// Serial framing of each byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    /// Send a `0` start bit and `stop_bits` `1` bits around each byte.
    pub start_stop: bool,
    /// Number of stop bits.
    pub stop_bits: u8,
    /// Optional parity bit.
    pub parity: Option<Parity>,
}

impl Default for Framing {
    fn default() -> Self {
        Self {
            start_stop: false,
            stop_bits: 1,
            parity: None,
        }
    }
}

/// Carrier shape for FSK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
}

/// Frequency shift keying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FskConfig {
    pub baud: u32,
    /// Frequency of a `0` bit in Hz.
    pub f0: f64,
    /// Frequency of a `1` bit in Hz.
    pub f1: f64,
    pub amplitude: f64,
    pub waveform: Waveform,
    /// Length of the `f1` tone before the data, in seconds.
    pub preamble_seconds: f64,
    /// Length of the silence after the data, in seconds.
    pub trailer_seconds: f64,
    pub bit_order: BitOrder,
    pub framing: Framing,
}

impl Default for FskConfig {
    fn default() -> Self {
        Self {
            baud: 1200,
            f0: 1200.0,
            f1: 2400.0,
            amplitude: 0.9,
            waveform: Waveform::Sine,
            preamble_seconds: 1.0,
            trailer_seconds: 0.3,
            bit_order: BitOrder::Lsb,
            framing: Framing::default(),
        }
    }
}

/// Manchester (biphase) coding.
///
/// A `1` is low then high, a `0` high then low.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManchesterConfig {
    pub baud: u32,
    pub amplitude: f64,
    /// Optional sine carrier in Hz, keyed by the half-bit level.
    pub carrier_hz: Option<f64>,
    pub bit_order: BitOrder,
    pub framing: Framing,
}

impl Default for ManchesterConfig {
    fn default() -> Self {
        Self {
            baud: 1200,
            amplitude: 0.9,
            carrier_hz: None,
            bit_order: BitOrder::Lsb,
            framing: Framing::default(),
        }
    }
}

/// Pulse width modulation: a high pulse whose length encodes the bit,
/// followed by a low gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PwmConfig {
    /// High time of a `1` bit in seconds.
    pub pulse_one: f64,
    /// High time of a `0` bit in seconds.
    pub pulse_zero: f64,
    /// Low time after each pulse in seconds.
    pub gap: f64,
    pub amplitude: f64,
    pub bit_order: BitOrder,
    pub framing: Framing,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            pulse_one: 0.0006,
            pulse_zero: 0.0003,
            gap: 0.0003,
            amplitude: 0.9,
            bit_order: BitOrder::Lsb,
            framing: Framing::default(),
        }
    }
}

/// How bytes become samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Modulation {
    /// Each byte is one unsigned sample.
    Raw,
    Fsk(FskConfig),
    Manchester(ManchesterConfig),
    Pwm(PwmConfig),
}

impl Default for Modulation {
    fn default() -> Self {
        Modulation::Fsk(FskConfig::default())
    }
}

/// Output sample width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    /// Unsigned 8-bit.
    #[default]
    Eight,
    /// Signed 16-bit little endian.
    Sixteen,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(self) -> u16 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Sixteen => 16,
        }
    }
}

/// Output settings plus modulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModemConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: BitDepth,
    pub modulation: Modulation,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            sample_rate: 11025,
            channels: 1,
            bit_depth: BitDepth::Eight,
            modulation: Modulation::default(),
        }
    }
}

/// Expand bytes into the bit stream sent on the line.
pub fn bytes_to_bits(bytes: &[u8], order: BitOrder, framing: &Framing) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 12);

    for &byte in bytes {
        if framing.start_stop {
            bits.push(false);
        }

        for i in 0..8 {
            let shift = match order {
                BitOrder::Lsb => i,
                BitOrder::Msb => 7 - i,
            };
            bits.push((byte >> shift) & 1 == 1);
        }

        if let Some(parity) = framing.parity {
            let odd_ones = byte.count_ones() % 2 == 1;
            bits.push(match parity {
                Parity::Even => odd_ones,
                Parity::Odd => !odd_ones,
            });
        }

        if framing.start_stop {
            for _ in 0..framing.stop_bits {
                bits.push(true);
            }
        }
    }

    bits
}

/// Number of samples for `seconds` at `sample_rate`.
fn samples_for(sample_rate: u32, seconds: f64) -> usize {
    (f64::from(sample_rate) * seconds).round().max(0.0) as usize
}

fn oscillator(waveform: Waveform, freq: f64, t: usize, sample_rate: f64) -> f64 {
    let cycles = freq * t as f64 / sample_rate;
    match waveform {
        Waveform::Sine => (2.0 * PI * cycles).sin(),
        Waveform::Square => {
            if cycles.rem_euclid(1.0) < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
    }
}

/// One sample per byte, `0x80` being the centre line.
pub fn raw_samples(bytes: &[u8]) -> Vec<f64> {
    bytes
        .iter()
        .map(|&b| (f64::from(b) - 128.0) / 127.0)
        .collect()
}

/// FSK synthesis with a phase that runs on across bit boundaries.
pub fn fsk_samples(bytes: &[u8], sample_rate: u32, config: &FskConfig) -> Vec<f64> {
    let rate = f64::from(sample_rate);
    let bit_samples = samples_for(sample_rate, 1.0 / f64::from(config.baud.max(1))).max(1);
    let bits = bytes_to_bits(bytes, config.bit_order, &config.framing);

    let mut samples = Vec::new();
    let mut t = 0;

    for _ in 0..samples_for(sample_rate, config.preamble_seconds) {
        samples.push(oscillator(config.waveform, config.f1, t, rate) * config.amplitude);
        t += 1;
    }

    for bit in bits {
        let freq = if bit { config.f1 } else { config.f0 };
        for _ in 0..bit_samples {
            samples.push(oscillator(config.waveform, freq, t, rate) * config.amplitude);
            t += 1;
        }
    }

    samples.resize(
        samples.len() + samples_for(sample_rate, config.trailer_seconds),
        0.0,
    );
    samples
}

/// Manchester synthesis.
pub fn manchester_samples(bytes: &[u8], sample_rate: u32, config: &ManchesterConfig) -> Vec<f64> {
    let rate = f64::from(sample_rate);
    let half_bit = samples_for(sample_rate, 1.0 / (2.0 * f64::from(config.baud.max(1)))).max(1);
    let bits = bytes_to_bits(bytes, config.bit_order, &config.framing);

    let mut samples = Vec::with_capacity(bits.len() * half_bit * 2);
    let mut t = 0;

    for bit in bits {
        let halves = if bit { [-1.0, 1.0] } else { [1.0, -1.0] };
        for level in halves {
            for _ in 0..half_bit {
                let sample = match config.carrier_hz {
                    Some(freq) => level * oscillator(Waveform::Sine, freq, t, rate),
                    None => level,
                };
                samples.push(sample * config.amplitude);
                t += 1;
            }
        }
    }

    samples
}

/// PWM synthesis.
pub fn pwm_samples(bytes: &[u8], sample_rate: u32, config: &PwmConfig) -> Vec<f64> {
    let one = samples_for(sample_rate, config.pulse_one);
    let zero = samples_for(sample_rate, config.pulse_zero);
    let gap = samples_for(sample_rate, config.gap);
    let bits = bytes_to_bits(bytes, config.bit_order, &config.framing);

    let mut samples = Vec::new();
    for bit in bits {
        let high = if bit { one } else { zero };
        samples.resize(samples.len() + high, config.amplitude);
        samples.resize(samples.len() + gap, -config.amplitude);
    }
    samples
}

/// Synthesize the float signal for `bytes`.
pub fn synthesize(bytes: &[u8], config: &ModemConfig) -> Vec<f64> {
    match &config.modulation {
        Modulation::Raw => raw_samples(bytes),
        Modulation::Fsk(fsk) => fsk_samples(bytes, config.sample_rate, fsk),
        Modulation::Manchester(manchester) => {
            manchester_samples(bytes, config.sample_rate, manchester)
        }
        Modulation::Pwm(pwm) => pwm_samples(bytes, config.sample_rate, pwm),
    }
}

/// Convert float samples to PCM bytes. Values outside `[-1, 1]` are clipped.
pub fn quantize(samples: &[f64], depth: BitDepth) -> Vec<u8> {
    match depth {
        BitDepth::Eight => samples
            .iter()
            .map(|&s| (s * 127.0 + 128.0).clamp(0.0, 255.0).round() as u8)
            .collect(),
        BitDepth::Sixteen => {
            let mut pcm = Vec::with_capacity(samples.len() * 2);
            for &sample in samples {
                let value = (sample * 32767.0).clamp(-32768.0, 32767.0).round() as i16;
                pcm.extend_from_slice(&value.to_le_bytes());
            }
            pcm
        }
    }
}

/// Modulate `bytes` and wrap the result in a WAV file.
pub fn bytes_to_wav(bytes: &[u8], config: &ModemConfig) -> Vec<u8> {
    let samples = synthesize(bytes, config);
    let mono = quantize(&samples, config.bit_depth);

    let channels = config.channels.max(1);
    let width = usize::from(config.bit_depth.bits() / 8);
    let pcm: Vec<u8> = if channels == 1 {
        mono
    } else {
        mono.chunks(width)
            .flat_map(|frame| frame.repeat(usize::from(channels)))
            .collect()
    };

    debug!(
        input = bytes.len(),
        samples = samples.len(),
        channels,
        bits = config.bit_depth.bits(),
        "modulated bytes"
    );

    let format = WavFormat::new(channels, config.sample_rate, config.bit_depth.bits());
    write_wav_to_vec(&format, &pcm)
}
