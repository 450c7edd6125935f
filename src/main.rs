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

//! Retrotape CLI
//!
//! Converts BASIC listings, tape images and binaries for the Sanyo PHC-25,
//! the Canon X-07 and the ZX81.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::util::SubscriberInitExt;

use retrotape::audio::modem::{
    BitDepth, BitOrder, FskConfig, Framing, ManchesterConfig, ModemConfig, Modulation, Parity,
    PwmConfig, Waveform,
};
use retrotape::audio::{bytes_to_wav, cassette};
use retrotape::error::{format_error, CodecError, ErrorCode};
use retrotape::formats::cas::{CasOptions, LineOrder};
use retrotape::formats::data::{data_lines, DataOptions, DataStyle};
use retrotape::formats::zx81::{self, ZxOptions};
use retrotape::formats::{format_from_extension, phc, Format};
use retrotape::glyph::GlyphGrid;
use retrotape::hex::{hex_preview, parse_address, parse_hex_dump};
use retrotape::listing::program_name;

/// Retrotape - BASIC tape images and cassette audio for 1980s home computers
#[derive(Parser, Debug)]
#[command(name = "retrotape")]
#[command(author = "Marcel Joachim Kloubert <marcel@kloubert.dev>")]
#[command(version)]
#[command(about = "BASIC tokenizers, tape images and cassette audio for 1980s home computers")]
#[command(long_about = r#"
Retrotape converts between BASIC listings and the tape images of the
Sanyo PHC-25 (.phc), the Canon X-07 (.cas) and the ZX81 (.p), and turns
images or arbitrary binaries into cassette audio (.wav).

Example usage:
  retrotape bas2phc hello.bas
  retrotape phc2wav hello.phc --frames
  retrotape cas2bas game.cas -o game.bas
  retrotape p2txt loader.p --rem-hex
  retrotape bin2wav data.bin --modulation manchester --bits 16
  retrotape convert hello.bas -o hello.cas
"#)]
struct Cli {
    /// Log every conversion stage
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tokenize a PHC-25 listing into a .phc image
    Bas2phc(InOut),

    /// List a .phc image
    Phc2bas(InOut),

    /// Tokenize a Canon X-07 listing into a .cas image
    Bas2cas {
        #[command(flatten)]
        io: InOut,

        /// Stop at the first line number that does not increase instead of
        /// skipping it
        #[arg(long)]
        truncate: bool,
    },

    /// List a Canon X-07 .cas image
    Cas2bas(InOut),

    /// List a ZX81 .p snapshot
    P2txt {
        #[command(flatten)]
        io: InOut,

        /// Draw unprintable codes as quadrant blocks
        #[arg(long)]
        graphics: bool,

        /// Show the first REM line as hex bytes
        #[arg(long)]
        rem_hex: bool,
    },

    /// Extract the machine code stored in the first REM line of a .p snapshot
    P2bin(InOut),

    /// Encode a .phc image as PHC-25 cassette audio
    Phc2wav {
        #[command(flatten)]
        io: InOut,

        /// Print how every byte is framed
        #[arg(long)]
        frames: bool,
    },

    /// Modulate any file into audio
    Bin2wav {
        #[command(flatten)]
        io: InOut,

        #[command(flatten)]
        modem: ModemArgs,
    },

    /// Wrap machine code in a .phc image that runs it with EXEC
    Bin2phc {
        #[command(flatten)]
        io: InOut,

        /// Load and start address, e.g. C000 or &HC000
        #[arg(long, default_value = "C000")]
        start: String,

        /// Program name (defaults to the input file name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Turn a binary into BASIC DATA lines
    Bin2data {
        #[command(flatten)]
        io: InOut,

        #[arg(long, value_enum, default_value_t = StyleArg::Concat)]
        style: StyleArg,

        /// First line number
        #[arg(long, default_value_t = 10)]
        first_line: u32,

        /// Line number step
        #[arg(long, default_value_t = 10)]
        increment: u32,
    },

    /// Convert ASCII art (#, X, * or 1 = pixel on) into glyph bytes
    Glyph {
        /// Text file with one line per pixel row
        input: PathBuf,

        /// Invert all pixels
        #[arg(long)]
        invert: bool,
    },

    /// Pick the conversion from the file extensions
    Convert {
        /// Input file (.bas, .txt, .phc, .cas or .p)
        input: PathBuf,

        /// Output file (.bas, .phc, .cas or .wav)
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct InOut {
    /// Input file
    input: PathBuf,

    /// Output file (defaults to the input name with a new extension)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl InOut {
    fn output_or(&self, extension: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension(extension))
    }
}

#[derive(Args, Debug)]
struct ModemArgs {
    #[arg(long, value_enum, default_value_t = ModulationArg::Fsk)]
    modulation: ModulationArg,

    /// Read the input as a hex dump instead of raw bytes
    #[arg(long)]
    hex: bool,

    #[arg(long, default_value_t = 11025)]
    sample_rate: u32,

    #[arg(long, default_value_t = 1)]
    channels: u16,

    #[arg(long, value_enum, default_value_t = BitsArg::Eight)]
    bits: BitsArg,

    #[arg(long, default_value_t = 1200)]
    baud: u32,

    #[arg(long, default_value_t = 0.9)]
    amplitude: f64,

    /// FSK frequency of a 0 bit
    #[arg(long, default_value_t = 1200.0)]
    f0: f64,

    /// FSK frequency of a 1 bit
    #[arg(long, default_value_t = 2400.0)]
    f1: f64,

    #[arg(long, value_enum, default_value_t = WaveformArg::Sine)]
    waveform: WaveformArg,

    /// Manchester carrier frequency
    #[arg(long)]
    carrier: Option<f64>,

    /// Send the most significant bit first
    #[arg(long)]
    msb_first: bool,

    /// Add start and stop bits
    #[arg(long)]
    start_stop: bool,

    #[arg(long, default_value_t = 1)]
    stop_bits: u8,

    #[arg(long, value_enum)]
    parity: Option<ParityArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModulationArg {
    Raw,
    Fsk,
    Manchester,
    Pwm,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BitsArg {
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum WaveformArg {
    Sine,
    Square,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ParityArg {
    Even,
    Odd,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Concat,
    Comma,
}

impl ModemArgs {
    fn config(&self) -> ModemConfig {
        let bit_order = if self.msb_first {
            BitOrder::Msb
        } else {
            BitOrder::Lsb
        };
        let framing = Framing {
            start_stop: self.start_stop,
            stop_bits: self.stop_bits,
            parity: self.parity.map(|parity| match parity {
                ParityArg::Even => Parity::Even,
                ParityArg::Odd => Parity::Odd,
            }),
        };

        let modulation = match self.modulation {
            ModulationArg::Raw => Modulation::Raw,
            ModulationArg::Fsk => Modulation::Fsk(FskConfig {
                baud: self.baud,
                f0: self.f0,
                f1: self.f1,
                amplitude: self.amplitude,
                waveform: match self.waveform {
                    WaveformArg::Sine => Waveform::Sine,
                    WaveformArg::Square => Waveform::Square,
                },
                bit_order,
                framing,
                ..FskConfig::default()
            }),
            ModulationArg::Manchester => Modulation::Manchester(ManchesterConfig {
                baud: self.baud,
                amplitude: self.amplitude,
                carrier_hz: self.carrier,
                bit_order,
                framing,
            }),
            ModulationArg::Pwm => Modulation::Pwm(PwmConfig {
                amplitude: self.amplitude,
                bit_order,
                framing,
                ..PwmConfig::default()
            }),
        };

        ModemConfig {
            sample_rate: self.sample_rate,
            channels: self.channels,
            bit_depth: match self.bits {
                BitsArg::Eight => BitDepth::Eight,
                BitsArg::Sixteen => BitDepth::Sixteen,
            },
            modulation,
        }
    }
}

/// Why a command failed.
enum Failure {
    /// The input could not be converted.
    Codec {
        error: CodecError,
        input: Vec<u8>,
        filename: String,
    },
    /// A conversion precondition was not met.
    Message(String),
    /// The input could not be read.
    Read(PathBuf, std::io::Error),
    /// The output could not be written.
    Write(PathBuf, std::io::Error),
}

impl Failure {
    fn codec(error: CodecError, input: &[u8], path: &Path) -> Self {
        Failure::Codec {
            error,
            input: input.to_vec(),
            filename: file_name(path),
        }
    }

    fn report(&self) -> ExitCode {
        match self {
            Failure::Codec {
                error,
                input,
                filename,
            } => {
                eprint!("{}", format_error(error, input, Some(filename)));
                ExitCode::from(1)
            }
            Failure::Message(message) => {
                eprintln!("Error: {}", message);
                ExitCode::from(1)
            }
            Failure::Read(path, e) => {
                eprintln!("Error: Cannot read {}: {}", path.display(), e);
                ExitCode::from(3)
            }
            Failure::Write(path, e) => {
                eprintln!("Error: Cannot write {}: {}", path.display(), e);
                ExitCode::from(4)
            }
        }
    }
}

type CliResult = std::result::Result<(), Failure>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .compact()
        .finish()
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => failure.report(),
    }
}

fn run(command: Command) -> CliResult {
    match command {
        Command::Bas2phc(io) => {
            let output = io.output_or("phc");
            let source = read_text(&io.input)?;
            let name = program_name(&file_name(&io.input), phc::NAME_LEN);
            let image = retrotape::bas_to_phc(&source, &name);
            write_bytes(&output, &image)?;
            println!(
                "Tokenized {} -> {} ({} bytes)",
                file_name(&io.input),
                output.display(),
                image.len()
            );
        }

        Command::Phc2bas(io) => {
            let output = io.output_or("bas");
            let bytes = read_bytes(&io.input)?;
            let text = retrotape::phc_to_bas(&bytes)
                .map_err(|e| Failure::codec(e, &bytes, &io.input))?;
            write_text(&output, &text)?;
            println!("Listed {} -> {}", file_name(&io.input), output.display());
        }

        Command::Bas2cas { io, truncate } => {
            let output = io.output_or("cas");
            let source = read_text(&io.input)?;
            let options = CasOptions {
                order: if truncate {
                    LineOrder::Truncate
                } else {
                    LineOrder::Skip
                },
            };
            let name = program_name(&file_name(&io.input), retrotape::formats::cas::NAME_LEN);
            let image = retrotape::bas_to_cas(&source, &name, &options);
            write_bytes(&output, &image)?;
            println!(
                "Tokenized {} -> {} ({} bytes)",
                file_name(&io.input),
                output.display(),
                image.len()
            );
        }

        Command::Cas2bas(io) => {
            let output = io.output_or("bas");
            let bytes = read_bytes(&io.input)?;
            let text = retrotape::cas_to_bas(&bytes)
                .map_err(|e| Failure::codec(e, &bytes, &io.input))?;
            write_text(&output, &text)?;
            println!("Listed {} -> {}", file_name(&io.input), output.display());
        }

        Command::P2txt {
            io,
            graphics,
            rem_hex,
        } => {
            let output = io.output_or("txt");
            let bytes = read_bytes(&io.input)?;
            let options = ZxOptions {
                graphics,
                rem_as_hex: rem_hex,
            };
            let text = retrotape::p_to_text(&bytes, &options)
                .map_err(|e| Failure::codec(e, &bytes, &io.input))?;
            write_text(&output, &text)?;
            println!("Listed {} -> {}", file_name(&io.input), output.display());
        }

        Command::P2bin(io) => {
            let output = io.output_or("bin");
            let bytes = read_bytes(&io.input)?;
            let payload = zx81::extract_rem_payload(&bytes)
                .map_err(|e| Failure::codec(e, &bytes, &io.input))?;
            if !payload.is_rem {
                return Err(Failure::Message(format!(
                    "line {} of {} is not a REM line",
                    payload.line_number,
                    file_name(&io.input)
                )));
            }
            write_bytes(&output, &payload.bytes)?;
            print!(
                "{}",
                hex_preview(&payload.bytes, 16, u32::from(zx81::REM_PAYLOAD_ADDRESS))
            );
            println!(
                "Extracted {} bytes -> {} (RAND USR {})",
                payload.bytes.len(),
                output.display(),
                zx81::REM_PAYLOAD_ADDRESS
            );
        }

        Command::Phc2wav { io, frames } => {
            let output = io.output_or("wav");
            let bytes = read_bytes(&io.input)?;
            if frames {
                println!("{}", cassette::describe_frames(&bytes));
            }
            let wav = cassette::phc_to_wav(&bytes);
            write_bytes(&output, &wav)?;
            println!(
                "Encoded {} -> {} ({:.1} s)",
                file_name(&io.input),
                output.display(),
                cassette::duration_seconds(bytes.len())
            );
        }

        Command::Bin2wav { io, modem } => {
            let output = io.output_or("wav");
            let bytes = if modem.hex {
                parse_hex_dump(&read_text(&io.input)?)
            } else {
                read_bytes(&io.input)?
            };
            let wav = bytes_to_wav(&bytes, &modem.config());
            write_bytes(&output, &wav)?;
            println!("Modulated {} bytes -> {}", bytes.len(), output.display());
        }

        Command::Bin2phc { io, start, name } => {
            let output = io.output_or("phc");
            let address = parse_address(&start)
                .map_err(|e| Failure::codec(e, start.as_bytes(), Path::new("--start")))?;
            let payload = read_bytes(&io.input)?;
            let name = name.unwrap_or_else(|| program_name(&file_name(&io.input), phc::NAME_LEN));
            let image = phc::build_machine_code(&payload, &name, address);
            write_bytes(&output, &image)?;
            println!(
                "Wrapped {} -> {} (EXEC&H{:04X})",
                file_name(&io.input),
                output.display(),
                address
            );
        }

        Command::Bin2data {
            io,
            style,
            first_line,
            increment,
        } => {
            let output = io.output_or("bas");
            let bytes = read_bytes(&io.input)?;
            let options = DataOptions {
                style: match style {
                    StyleArg::Concat => DataStyle::Concat,
                    StyleArg::Comma => DataStyle::Comma,
                },
                start: first_line,
                increment,
                ..DataOptions::default()
            };
            let lines = data_lines(&bytes, &options);
            write_text(&output, &lines.join("\n"))?;
            println!("Wrote {} DATA lines -> {}", lines.len(), output.display());
        }

        Command::Glyph { input, invert } => {
            let art = read_text(&input)?;
            let mut grid = GlyphGrid::from_art(&art);
            if invert {
                grid.invert();
            }
            println!("Hexadecimal code ({}x{}):", grid.columns(), grid.rows());
            println!("{}", grid.hex_rows());
        }

        Command::Convert { input, output } => convert(&input, &output)?,
    }

    Ok(())
}

/// Dispatch on the input and output extensions.
fn convert(input: &Path, output: &Path) -> CliResult {
    let unknown = |path: &Path| {
        Failure::codec(
            CodecError::new(
                ErrorCode::UnknownFormat,
                format!("cannot convert {} -> {}", file_name(input), file_name(output)),
            )
            .with_hint(format!(
                "{} has no supported extension for this conversion",
                file_name(path)
            )),
            &[],
            path,
        )
    };

    let from = format_from_extension(input).ok_or_else(|| unknown(input))?;
    let to = format_from_extension(output).ok_or_else(|| unknown(output))?;

    let io = InOut {
        input: input.to_path_buf(),
        output: Some(output.to_path_buf()),
    };
    let command = match (from, to) {
        (Format::Bas, Format::Phc) => Command::Bas2phc(io),
        (Format::Phc, Format::Bas) => Command::Phc2bas(io),
        (Format::Bas, Format::Cas) => Command::Bas2cas {
            io,
            truncate: false,
        },
        (Format::Cas, Format::Bas) => Command::Cas2bas(io),
        (Format::P, Format::Bas) => Command::P2txt {
            io,
            graphics: false,
            rem_hex: false,
        },
        (Format::Phc, Format::Wav) => Command::Phc2wav { io, frames: false },
        (_, Format::Wav) => {
            return Err(unknown(input));
        }
        _ => return Err(unknown(output)),
    };
    run(command)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_bytes(path: &Path) -> std::result::Result<Vec<u8>, Failure> {
    std::fs::read(path).map_err(|e| Failure::Read(path.to_path_buf(), e))
}

/// Read a listing; bytes that are not UTF-8 are replaced.
fn read_text(path: &Path) -> std::result::Result<String, Failure> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> CliResult {
    std::fs::write(path, bytes).map_err(|e| Failure::Write(path.to_path_buf(), e))
}

fn write_text(path: &Path, text: &str) -> CliResult {
    let mut text = text.to_string();
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    write_bytes(path, text.as_bytes())
}
