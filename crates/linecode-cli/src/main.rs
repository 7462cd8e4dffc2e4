//! linecode: line-coding waveform and spectrum workbench.
//!
//! Encodes a repeated bit pattern with one of nine line codes and reports
//! the resulting waveform, substitution annotations and power spectra.

mod config;
mod orchestrator;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{CompareConfig, SessionConfig};
use lib_dsp::window::WindowType;
use lib_types::{Channel, Scheme};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "linecode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a bit pattern and show the waveform
    Encode {
        /// Bit pattern of 0s and 1s, repeated to fill the display
        #[arg(short, long)]
        pattern: String,

        /// Channel: `input`, a scheme name, or an id (0-9)
        #[arg(short, long, default_value = "unipolar-nrz", value_parser = parse_channel)]
        scheme: Channel,

        /// Number of bits shown (4-32)
        #[arg(short, long, default_value = "8")]
        bits: usize,

        /// Peak amplitude in volts (1-10)
        #[arg(short, long, default_value = "5.0")]
        amplitude: f64,
    },

    /// Compute empirical and theoretical power spectra
    Spectrum {
        /// Bit pattern of 0s and 1s
        #[arg(short, long)]
        pattern: String,

        /// Scheme name or id (1-9)
        #[arg(short, long, value_parser = parse_scheme)]
        scheme: Scheme,

        /// Number of bits shown (4-32)
        #[arg(short, long, default_value = "8")]
        bits: usize,

        /// Peak amplitude in volts (1-10)
        #[arg(short, long, default_value = "5.0")]
        amplitude: f64,

        /// Zero-padded transform length
        #[arg(long, default_value = "4096")]
        pad: usize,

        /// Window: rectangular, hann, hamming, blackman, kaiser[:beta]
        #[arg(long, default_value = "hann", value_parser = parse_window)]
        window: WindowType,

        /// Include the closed-form spectrum
        #[arg(long)]
        theory: bool,
    },

    /// Encode one pattern with two schemes side by side
    Compare {
        /// Bit pattern of 0s and 1s
        #[arg(short, long)]
        pattern: String,

        /// First scheme
        #[arg(value_parser = parse_scheme)]
        first: Scheme,

        /// Second scheme
        #[arg(value_parser = parse_scheme)]
        second: Scheme,

        /// Number of bits shown (4-32)
        #[arg(short, long, default_value = "8")]
        bits: usize,

        /// Peak amplitude in volts (1-10)
        #[arg(short, long, default_value = "5.0")]
        amplitude: f64,
    },

    /// Run a session from a configuration file
    Run {
        /// Path to the session configuration file (TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for results
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },

    /// List the available schemes
    Schemes,
}

fn parse_channel(text: &str) -> Result<Channel, lib_linecode::LineCodeError> {
    lib_linecode::parse_channel(text)
}

fn parse_scheme(text: &str) -> Result<Scheme, lib_linecode::LineCodeError> {
    lib_linecode::parse_scheme(text)
}

fn parse_window(text: &str) -> Result<WindowType, String> {
    WindowType::from_name(text).ok_or_else(|| format!("unknown window '{text}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Encode { pattern, scheme, bits, amplitude } => {
            let mut config = SessionConfig::for_pattern(pattern);
            config.channel = scheme;
            config.bits_shown = bits;
            config.amplitude = amplitude;
            config.spectrum.enabled = false;
            run_interactive(config, cli.format)?;
        }
        Commands::Spectrum { pattern, scheme, bits, amplitude, pad, window, theory } => {
            let mut config = SessionConfig::for_pattern(pattern);
            config.channel = Channel::Encoded(scheme);
            config.bits_shown = bits;
            config.amplitude = amplitude;
            config.spectrum.pad_length = pad;
            config.spectrum.window = window;
            run_spectrum(config, theory, cli.format)?;
        }
        Commands::Compare { pattern, first, second, bits, amplitude } => {
            let mut config = SessionConfig::for_pattern(pattern);
            config.compare = Some(CompareConfig { first, second });
            config.bits_shown = bits;
            config.amplitude = amplitude;
            config.spectrum.enabled = false;
            run_interactive(config, cli.format)?;
        }
        Commands::Run { config, output } => {
            run_session(&config, &output, cli.format)?;
        }
        Commands::Schemes => {
            output::print_schemes(cli.format)?;
        }
    }

    Ok(())
}

fn run_interactive(config: SessionConfig, format: OutputFormat) -> Result<()> {
    let config = config::validate_config(config)?;
    let results = orchestrator::Orchestrator::new(config)?.run()?;
    output::print_results(&results, format)
}

fn run_spectrum(config: SessionConfig, theory: bool, format: OutputFormat) -> Result<()> {
    let config = config::validate_config(config)?;
    let results = orchestrator::Orchestrator::new(config)?.run()?;

    match &results.spectrum {
        Some(view) => output::print_spectrum(view, theory, format),
        None => anyhow::bail!("No spectrum was computed"),
    }
}

fn run_session(config_path: &Path, output_dir: &Path, format: OutputFormat) -> Result<()> {
    tracing::info!("Loading configuration from {:?}", config_path);

    let config = config::load_config(config_path)?;
    let orchestrator = orchestrator::Orchestrator::new(config)?;

    tracing::info!("Starting session...");
    let results = orchestrator.run()?;

    output::write_results(&results, output_dir, format, &orchestrator.config().output)?;

    tracing::info!("Session complete. Results written to {:?}", output_dir);
    Ok(())
}
