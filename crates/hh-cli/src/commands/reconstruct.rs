use std::error::Error;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;
use hh_core::{sha256_hex, to_canonical_json_bytes, to_pretty_json};
use hh_reco::dataset::load_bytes;
use hh_reco::{build_report, reconstruct_dataset, write_masses_csv, write_pairings_csv};

use super::load_config;

#[derive(Args, Debug)]
pub struct ReconstructArgs {
    /// Jet dataset (JSON keyed by branch, or CSV with one row per jet).
    #[arg(long)]
    pub input: PathBuf,
    /// YAML reconstruction config; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory for artefacts.
    #[arg(long)]
    pub out: PathBuf,
    /// Process at most this many events (overrides the config).
    #[arg(long)]
    pub max_events: Option<usize>,
}

/// Runs the reconstruction and writes masses, pairings, histogram and report.
pub fn run(args: &ReconstructArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_deref())?;
    if args.max_events.is_some() {
        config.max_events = args.max_events;
    }
    config.validate()?;

    tracing::info!(path = %args.input.display(), "reading jet dataset");
    let bytes = fs::read(&args.input)?;
    let input_hash = sha256_hex(&bytes);
    let columns = load_bytes(&bytes, &args.input, &config.branches)?;
    tracing::info!(events = columns.n_events(), "dataset loaded");

    let (output, histogram) = reconstruct_dataset(&columns, &config)?;
    let report = build_report(input_hash, &config, &output, &histogram)?;

    fs::create_dir_all(&args.out)?;
    write_masses_csv(
        BufWriter::new(File::create(args.out.join("masses.csv"))?),
        &output,
    )?;
    write_pairings_csv(
        BufWriter::new(File::create(args.out.join("pairings.csv"))?),
        &output,
    )?;
    fs::write(
        args.out.join("histogram.json"),
        to_canonical_json_bytes(&histogram)?,
    )?;
    fs::write(args.out.join("report.json"), to_pretty_json(&report)?)?;

    let summary = &report.summary;
    tracing::info!(
        processed = summary.events_reconstructed,
        mean_mass_h1 = ?summary.mean_mass_h1,
        mean_mass_h2 = ?summary.mean_mass_h2,
        out = %args.out.display(),
        "artefacts written"
    );
    Ok(())
}
