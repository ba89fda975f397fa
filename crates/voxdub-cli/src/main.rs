//! voxdub CLI - transcribe, translate and voice short English recordings
//!
//! This binary drives the studio workflow from the command line and exposes
//! the WAV and upload utilities it is built on.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use voxdub_cli::commands;
use voxdub_cli::input::Source;

/// voxdub - Multilingual voiceovers from a short recording
#[derive(Parser)]
#[command(name = "voxdub")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Show debug logging (RUST_LOG still takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the English text comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Audio recording to transcribe first
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Text file holding an existing English transcript
    #[arg(short, long)]
    transcript: Option<PathBuf>,
}

impl SourceArgs {
    fn into_source(self) -> anyhow::Result<Source> {
        match (self.input, self.transcript) {
            (Some(path), None) => Ok(Source::Audio(path)),
            (None, Some(path)) => Ok(Source::Transcript(path)),
            _ => anyhow::bail!("exactly one of --input or --transcript is required"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe an audio recording into English text
    Transcribe {
        /// Audio recording to transcribe
        #[arg(short, long)]
        input: PathBuf,

        /// Also write the transcript to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Translate a transcript into one or more languages
    Translate {
        #[command(flatten)]
        source: SourceArgs,

        /// Target language, by name or code (repeatable)
        #[arg(short, long = "language", required = true)]
        languages: Vec<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Transcribe, translate and voice each translation as a WAV file
    Voiceover {
        #[command(flatten)]
        source: SourceArgs,

        /// Target language, by name or code (repeatable)
        #[arg(short, long = "language", required = true)]
        languages: Vec<String>,

        /// Directory for the generated WAV files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Prebuilt voice to synthesize with (overrides VOXDUB_VOICE)
        #[arg(long)]
        voice: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Wrap raw PCM samples in a WAV container
    Encode {
        /// Raw little-endian PCM file (or base64 text with --base64)
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,

        /// Treat the input as base64 text
        #[arg(long)]
        base64: bool,

        /// Sample rate in Hz
        #[arg(long, default_value_t = 24_000, value_parser = clap::value_parser!(u32).range(1..))]
        sample_rate: u32,

        /// Number of interleaved channels
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        channels: u16,

        /// Bits per sample
        #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(8..=32))]
        bits: u16,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report the header fields of a WAV file
    Inspect {
        /// WAV file to inspect
        #[arg(short, long)]
        input: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show the MIME type and base64 payload an upload would be sent as
    Digest {
        /// File to digest
        #[arg(short, long)]
        input: PathBuf,

        /// Print the whole base64 payload instead of a preview
        #[arg(long)]
        full: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the supported translation languages
    Languages {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check configuration and the output directory
    Doctor {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default);
    // A second init (tests, embedding) is harmless.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Transcribe {
            input,
            output,
            json,
        } => commands::transcribe::run(&input, output.as_deref(), json),
        Commands::Translate {
            source,
            languages,
            json,
        } => source
            .into_source()
            .and_then(|source| commands::translate::run(&source, &languages, json)),
        Commands::Voiceover {
            source,
            languages,
            out_dir,
            voice,
            json,
        } => source.into_source().and_then(|source| {
            commands::voiceover::run(&source, &languages, &out_dir, voice.as_deref(), json)
        }),
        Commands::Encode {
            input,
            output,
            base64,
            sample_rate,
            channels,
            bits,
            json,
        } => {
            let options = commands::encode::EncodeOptions {
                base64,
                sample_rate,
                channels,
                bits_per_sample: bits,
            };
            commands::encode::run(&input, &output, &options, json)
        }
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Digest { input, full, json } => commands::digest::run(&input, full, json),
        Commands::Languages { json } => commands::languages::run(json),
        Commands::Doctor { json } => commands::doctor::run(json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
