//! signal-lab command-line interface
//!
//! Runs the demonstrations, prints their numbers and writes their figures:
//! - `spectrum`: FFT of a sum of sinusoids
//! - `fourier`: square wave rebuilt from a truncated Fourier series
//! - `analytic`: Hilbert transform, analytic signal and envelope
//! - `entropy`: Shannon entropy of text, dice and a rare event
//! - `phasor`: static phasor diagram

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use signal_lab::audio::wav;
use signal_lab::canvas::render_figure;
use signal_lab::config::OutputConfig;
use signal_lab::demos::{analytic, entropy, fourier, phasor, spectrum};
use signal_lab::{DemoRun, LabConfig};
use std::fmt::Display;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "signal-lab")]
#[command(author, version, about = "Classic signal-processing demonstrations", long_about = None)]
struct Cli {
    /// Enable verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output directory for figures and WAV files
    #[arg(short, long, global = true)]
    out: Option<PathBuf>,

    /// Skip rendering figures
    #[arg(long, global = true)]
    no_plots: bool,

    /// Print one JSON report per demo instead of text tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy, Debug, PartialEq, Eq)]
enum Commands {
    /// Magnitude spectrum of a sum of sinusoids
    Spectrum,
    /// Square-wave reconstruction and the Gibbs phenomenon
    Fourier,
    /// Analytic signal and envelope via the Hilbert transform
    Analytic,
    /// Shannon entropy of text and simple distributions
    Entropy,
    /// Phasor diagram
    Phasor,
    /// Every demo in turn
    All,
}

const ALL_DEMOS: [Commands; 5] = [
    Commands::Spectrum,
    Commands::Fourier,
    Commands::Analytic,
    Commands::Entropy,
    Commands::Phasor,
];

#[derive(Serialize)]
struct JsonReport<'a, R> {
    demo: &'a str,
    report: &'a R,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = LabConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(out) = cli.out {
        config.output.dir = out;
    }
    if cli.no_plots {
        config.output.render = false;
    }
    log::debug!("output: {:?}", config.output);

    run_demo(cli.command, &config, cli.json)
}

fn run_demo(command: Commands, config: &LabConfig, json: bool) -> Result<()> {
    let output = &config.output;
    match command {
        Commands::Spectrum => {
            let run = spectrum::run(&config.spectrum).context("spectrum demo failed")?;
            emit("spectrum", run, output, json)
        }
        Commands::Fourier => {
            let run = fourier::run(&config.fourier).context("fourier demo failed")?;
            emit("fourier", run, output, json)
        }
        Commands::Analytic => {
            let run = analytic::run(&config.analytic).context("analytic demo failed")?;
            emit("analytic", run, output, json)
        }
        Commands::Entropy => {
            let run = entropy::run(&config.entropy).context("entropy demo failed")?;
            emit("entropy", run, output, json)
        }
        Commands::Phasor => {
            let run = phasor::run(&config.phasor).context("phasor demo failed")?;
            emit("phasor", run, output, json)
        }
        Commands::All => {
            for demo in ALL_DEMOS {
                run_demo(demo, config, json)?;
            }
            Ok(())
        }
    }
}

/// Print the report, then write figures and signals as configured.
fn emit<R: Serialize + Display>(name: &str, run: DemoRun<R>, output: &OutputConfig, json: bool) -> Result<()> {
    if json {
        let doc = JsonReport {
            demo: name,
            report: &run.report,
        };
        println!("{}", serde_json::to_string(&doc)?);
    } else {
        println!("=== {name} ===");
        println!("{}", run.report);
        println!();
    }

    if output.render {
        for figure in &run.figures {
            render_figure(figure, &output.dir, (output.width, output.height))
                .with_context(|| format!("Failed to render {}", figure.file_name))?;
        }
    }

    if output.write_wav && !run.signals.is_empty() {
        let paths = wav::write_all(&output.dir, &run.signals).context("Failed to write WAV files")?;
        log::info!("{name}: {} WAV files in {}", paths.len(), output.dir.display());
    }

    Ok(())
}
