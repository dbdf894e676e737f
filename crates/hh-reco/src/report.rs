use std::io::Write;

use hh_core::errors::{ErrorInfo, HhError};
use hh_core::provenance::{commit_string, RunProvenance, SchemaVersion};
use hh_core::stable_hash_string;
use serde::{Deserialize, Serialize};

use crate::config::RecoConfig;
use crate::dataset::JetColumns;
use crate::histogram::MassHistogram2D;
use crate::reconstruct::{reconstruct_events, ReconstructionOutput};

/// Schema of [`ReconstructionReport`].
pub const REPORT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

fn csv_error(code: &str, err: impl ToString) -> HhError {
    HhError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Event counts and mean candidate masses of a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Events visited.
    pub events_total: usize,
    /// Events with reconstructed candidates.
    pub events_reconstructed: usize,
    /// Events skipped for having fewer than four jets.
    pub skipped_too_few_jets: usize,
    /// Events rejected by the b-tag preselection.
    pub skipped_preselection: usize,
    /// Mean H1 mass, absent when nothing was reconstructed.
    pub mean_mass_h1: Option<f64>,
    /// Mean H2 mass, absent when nothing was reconstructed.
    pub mean_mass_h2: Option<f64>,
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

impl RunSummary {
    /// Summarises a reconstruction pass.
    pub fn from_output(output: &ReconstructionOutput) -> Self {
        Self {
            events_total: output.events_seen,
            events_reconstructed: output.records.len(),
            skipped_too_few_jets: output.skipped_too_few_jets,
            skipped_preselection: output.skipped_preselection,
            mean_mass_h1: mean(&output.masses.mass_h1),
            mean_mass_h2: mean(&output.masses.mass_h2),
        }
    }
}

/// Top-level artefact describing a reconstruction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionReport {
    /// Schema of this payload.
    pub schema_version: SchemaVersion,
    /// Input, config and tool fingerprints.
    pub provenance: RunProvenance,
    /// Configuration used for the run.
    pub config: RecoConfig,
    /// Event counts and mean masses.
    pub summary: RunSummary,
    /// Hash of the canonical histogram payload.
    pub histogram_hash: String,
    /// Hash over every other field of the report.
    pub report_hash: String,
}

#[derive(Serialize)]
struct HashedFields<'a> {
    schema_version: &'a SchemaVersion,
    provenance: &'a RunProvenance,
    config: &'a RecoConfig,
    summary: &'a RunSummary,
    histogram_hash: &'a str,
}

/// Assembles the run report; `input_hash` fingerprints the raw dataset.
pub fn build_report(
    input_hash: impl Into<String>,
    config: &RecoConfig,
    output: &ReconstructionOutput,
    histogram: &MassHistogram2D,
) -> Result<ReconstructionReport, HhError> {
    let provenance = RunProvenance {
        input_hash: input_hash.into(),
        config_hash: stable_hash_string(config)?,
        commit: commit_string(),
        ..RunProvenance::default()
    }
    .with_tool("hh-reco", env!("CARGO_PKG_VERSION"));
    let summary = RunSummary::from_output(output);
    let histogram_hash = stable_hash_string(histogram)?;
    let report_hash = stable_hash_string(&HashedFields {
        schema_version: &REPORT_SCHEMA,
        provenance: &provenance,
        config,
        summary: &summary,
        histogram_hash: &histogram_hash,
    })?;
    Ok(ReconstructionReport {
        schema_version: REPORT_SCHEMA,
        provenance,
        config: config.clone(),
        summary,
        histogram_hash,
        report_hash,
    })
}

/// Runs the configured reconstruction over a dataset and fills the mass
/// histogram. `config.max_events` limits the events visited.
pub fn reconstruct_dataset(
    columns: &JetColumns,
    config: &RecoConfig,
) -> Result<(ReconstructionOutput, MassHistogram2D), HhError> {
    config.validate()?;
    let selection = config.event_selection()?;
    let limit = config.max_events.unwrap_or(usize::MAX);
    let output = reconstruct_events(columns.events().take(limit), &selection)?;
    let histogram = MassHistogram2D::from_masses(&config.histogram, &output.masses)?;
    Ok((output, histogram))
}

/// Writes `event,mass_h1,mass_h2` rows.
pub fn write_masses_csv<W: Write>(
    writer: W,
    output: &ReconstructionOutput,
) -> Result<(), HhError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["event", "mass_h1", "mass_h2"])
        .map_err(|err| csv_error("masses-csv", err))?;
    for record in &output.records {
        wtr.write_record([
            record.event.to_string(),
            record.best.h1.mass.to_string(),
            record.best.h2.mass.to_string(),
        ])
        .map_err(|err| csv_error("masses-csv", err))?;
    }
    wtr.flush().map_err(|err| csv_error("masses-csv", err))
}

/// Writes one row per reconstructed event describing the winning pairing.
///
/// Jet indices refer to positions in the source event.
pub fn write_pairings_csv<W: Write>(
    writer: W,
    output: &ReconstructionOutput,
) -> Result<(), HhError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "event", "pairing", "h1_jets", "h2_jets", "pt_h1", "pt_h2", "d_hh", "r_hh",
    ])
    .map_err(|err| csv_error("pairings-csv", err))?;
    for record in &output.records {
        let (a, b) = record.h1_source_jets();
        let (c, d) = record.h2_source_jets();
        wtr.write_record([
            record.event.to_string(),
            record.best.pairing.label().to_string(),
            format!("{a}-{b}"),
            format!("{c}-{d}"),
            record.best.h1.pt.to_string(),
            record.best.h2.pt.to_string(),
            record.best.d_hh.to_string(),
            record.best.r_hh.to_string(),
        ])
        .map_err(|err| csv_error("pairings-csv", err))?;
    }
    wtr.flush().map_err(|err| csv_error("pairings-csv", err))
}
