//! `autoframe` - resolve layout snapshots from the command line.

mod config;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use autoframe::{LayoutInput, LayoutOptions};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "autoframe", version, about = "Auto-layout resolution engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a snapshot at one viewport width and print the geometry as JSON
    Resolve {
        /// Snapshot file (.json or .toml)
        snapshot: PathBuf,
        /// Viewport width
        #[arg(short, long)]
        width: f64,
        /// Viewport height offered to a root that fills vertically
        #[arg(long)]
        height: Option<f64>,
        /// Layout options file (.json or .toml)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Report overflow diagnostics
        #[arg(long)]
        diagnostics: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Show which breakpoint is active across a range of widths
    Breakpoints {
        snapshot: PathBuf,
        #[arg(long)]
        from: f64,
        #[arg(long)]
        to: f64,
        #[arg(long, default_value_t = 1.0)]
        step: f64,
    },
    /// Load and validate a snapshot without laying it out
    Check { snapshot: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Resolve {
            snapshot,
            width,
            height,
            config: config_path,
            diagnostics,
            pretty,
        } => {
            let mut options = match &config_path {
                Some(path) => config::load_config(path)?.apply(LayoutOptions::default()),
                None => LayoutOptions::default(),
            };
            if let Some(height) = height {
                options = options.with_viewport_height(height);
            }
            if diagnostics {
                options = options.with_diagnostics(true);
            }
            resolve(load_input(&snapshot)?, width, &options, pretty)
        }
        Command::Breakpoints {
            snapshot,
            from,
            to,
            step,
        } => breakpoints(&load_input(&snapshot)?, from, to, step),
        Command::Check { snapshot } => {
            let input = load_input(&snapshot)?;
            println!(
                "{}: ok ({} nodes, {} breakpoints, {} overrides)",
                snapshot.display(),
                input.root.len(),
                input.breakpoints.len(),
                input.overrides.len()
            );
            Ok(())
        }
    }
}

fn load_input(path: &Path) -> Result<LayoutInput> {
    config::load_snapshot(path)?
        .into_input()
        .with_context(|| format!("{} is not a valid layout", path.display()))
}

fn resolve(input: LayoutInput, width: f64, options: &LayoutOptions, pretty: bool) -> Result<()> {
    let resolution = input
        .resolve_with(width, &autoframe::AuthoredSizes, options)
        .with_context(|| format!("resolving at width {width}"))?;
    for diagnostic in &resolution.diagnostics {
        log::warn!("`{}`: {diagnostic:?}", diagnostic.node());
    }

    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, &resolution)?;
    } else {
        serde_json::to_writer(&mut stdout, &resolution)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn breakpoints(input: &LayoutInput, from: f64, to: f64, step: f64) -> Result<()> {
    if !(step.is_finite() && step > 0.0) {
        bail!("--step must be a positive number, got {step}");
    }
    if from > to {
        bail!("--from ({from}) must not exceed --to ({to})");
    }

    for span in sweep(input, from, to, step)? {
        println!("{:>8} .. {:<8} {}", span.from, span.to, span.breakpoint);
    }
    Ok(())
}

/// A run of sampled widths sharing the same active breakpoint.
#[derive(Debug, PartialEq)]
struct Span {
    from: f64,
    to: f64,
    breakpoint: String,
}

/// Upper bound on the widths a single sweep samples
const MAX_SAMPLES: f64 = 1_000_000.0;

fn sweep(input: &LayoutInput, from: f64, to: f64, step: f64) -> Result<Vec<Span>> {
    let samples = ((to - from) / step).floor();
    if !(samples <= MAX_SAMPLES) {
        bail!("{from}..{to} in steps of {step} needs more than {MAX_SAMPLES} samples");
    }
    let samples = samples as u64;

    let mut spans: Vec<Span> = Vec::new();
    for i in 0..=samples {
        let width = from + step * i as f64;
        let name = input
            .active_breakpoint(width)?
            .map(|breakpoint| breakpoint.id.to_string())
            .unwrap_or_else(|| "(none)".to_string());

        match spans.last_mut() {
            Some(span) if span.breakpoint == name => span.to = width,
            _ => spans.push(Span {
                from: width,
                to: width,
                breakpoint: name,
            }),
        }
    }
    Ok(spans)
}
