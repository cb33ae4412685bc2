use std::path::PathBuf;

use anyhow::{Context, Result};
use arcspace::{arc_length, resample_with};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod catalog;
mod config;
mod output;
mod provenance;

use catalog::Curve;
use config::Knobs;
use provenance::{current_git_rev, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Resample function graphs into points equally spaced by arc length")]
struct Cmd {
    /// Log at DEBUG instead of INFO
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Resample a catalogue curve and write the points (.csv, .parquet or .json)
    Resample {
        #[arg(long, value_enum)]
        curve: Curve,
        #[arg(long, allow_negative_numbers = true)]
        a: f64,
        #[arg(long, allow_negative_numbers = true)]
        b: f64,
        #[arg(long)]
        n: usize,
        #[arg(long)]
        out: PathBuf,
        #[command(flatten)]
        knobs: Knobs,
    },
    /// Print the arc length of a catalogue curve over [a, b]
    Measure {
        #[arg(long, value_enum)]
        curve: Curve,
        #[arg(long, allow_negative_numbers = true)]
        a: f64,
        #[arg(long, allow_negative_numbers = true)]
        b: f64,
        #[command(flatten)]
        knobs: Knobs,
    },
    /// Print chord-length statistics of a written point table
    Inspect {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print version and code revision
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Resample {
            curve,
            a,
            b,
            n,
            out,
            knobs,
        } => resample_cmd(curve, a, b, n, out, knobs),
        Action::Measure { curve, a, b, knobs } => measure(curve, a, b, knobs),
        Action::Inspect { input } => inspect(input),
        Action::Report => report(),
    }
}

fn resample_cmd(curve: Curve, a: f64, b: f64, n: usize, out: PathBuf, knobs: Knobs) -> Result<()> {
    let settings = knobs.resolve()?;
    let cfg = settings.precision();
    let scfg = settings.solve();
    tracing::info!(?curve, a, b, n, out = %out.display(), "resample");

    let seq = resample_with(|x| curve.eval(x), a, b, n, &cfg, &scfg)
        .with_context(|| format!("resampling {} on [{a}, {b}]", curve.formula()))?;
    let format = output::write_points(&out, &seq)?;
    if let Some(stats) = output::chord_stats(&seq.clone().into_pairs()) {
        tracing::info!(
            points = stats.points,
            ?format,
            mean = stats.mean,
            rel_spread = stats.rel_spread,
            "points_written"
        );
    }

    let mut payload = Payload::new(json!({
        "curve": curve,
        "formula": curve.formula(),
        "a": a,
        "b": b,
        "n": n,
        "settings": settings,
    }));
    if let Some(path) = &knobs.config {
        payload = payload.with_input(path);
    }
    let sidecar = write_sidecar(&out, payload)?;
    tracing::debug!(sidecar = %sidecar.display(), "provenance");
    Ok(())
}

fn measure(curve: Curve, a: f64, b: f64, knobs: Knobs) -> Result<()> {
    let settings = knobs.resolve()?;
    let cfg = settings.precision();
    cfg.validate().map_err(anyhow::Error::msg)?;
    let length = arc_length(|x| curve.eval(x), a, b, &cfg);
    tracing::info!(?curve, a, b, length, "measure");
    let obj = json!({
        "curve": curve,
        "formula": curve.formula(),
        "a": a,
        "b": b,
        "arc_length": length,
        "settings": settings,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn inspect(input: PathBuf) -> Result<()> {
    let points = output::read_points(&input)?;
    tracing::info!(input = %input.display(), rows = points.len(), "inspect");
    let obj = json!({
        "input": input.to_string_lossy(),
        "points": points.len(),
        "chords": output::chord_stats(&points),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": current_git_rev(),
        "version": arcspace::VERSION,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
