//! Columnar jet datasets exported from the Delphes `GenJet` branches.
//!
//! Two layouts are accepted. JSON holds one object keyed by branch name where
//! every branch is an array of per-event arrays. CSV holds one row per jet with
//! the columns `event,pt,eta,phi,btag`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use hh_core::errors::{ErrorInfo, HhError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::jet::{Event, Jet};

/// Empty events a CSV dataset may imply beyond the jet rows it contains.
pub const MAX_CSV_EVENT_GAP: usize = 1_000_000;

fn dataset_error(code: &str, message: impl Into<String>) -> HhError {
    HhError::Dataset(ErrorInfo::new(code, message.into()))
}

fn default_pt_branch() -> String {
    "GenJet/GenJet.PT".into()
}

fn default_eta_branch() -> String {
    "GenJet/GenJet.Eta".into()
}

fn default_phi_branch() -> String {
    "GenJet/GenJet.Phi".into()
}

fn default_btag_branch() -> String {
    "GenJet/GenJet.BTag".into()
}

/// Names of the jet branches inside a JSON dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchNames {
    /// Transverse momentum branch.
    #[serde(default = "default_pt_branch")]
    pub pt: String,
    /// Pseudorapidity branch.
    #[serde(default = "default_eta_branch")]
    pub eta: String,
    /// Azimuth branch.
    #[serde(default = "default_phi_branch")]
    pub phi: String,
    /// b-tag score branch.
    #[serde(default = "default_btag_branch")]
    pub btag: String,
}

impl Default for BranchNames {
    fn default() -> Self {
        Self {
            pt: default_pt_branch(),
            eta: default_eta_branch(),
            phi: default_phi_branch(),
            btag: default_btag_branch(),
        }
    }
}

impl BranchNames {
    /// Branch names in `pt, eta, phi, btag` order.
    pub fn as_array(&self) -> [&str; 4] {
        [&self.pt, &self.eta, &self.phi, &self.btag]
    }
}

#[derive(Debug, Deserialize)]
struct JetRow {
    event: usize,
    pt: f64,
    eta: f64,
    phi: f64,
    btag: f64,
}

/// Per-event jet columns; the outer index is the event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JetColumns {
    /// Jet transverse momenta.
    pub pt: Vec<Vec<f64>>,
    /// Jet pseudorapidities.
    pub eta: Vec<Vec<f64>>,
    /// Jet azimuths.
    pub phi: Vec<Vec<f64>>,
    /// Jet b-tag scores.
    pub btag: Vec<Vec<f64>>,
}

impl JetColumns {
    /// Builds columns from explicit sequences, checking their shapes.
    pub fn new(
        pt: Vec<Vec<f64>>,
        eta: Vec<Vec<f64>>,
        phi: Vec<Vec<f64>>,
        btag: Vec<Vec<f64>>,
    ) -> Result<Self, HhError> {
        let columns = Self { pt, eta, phi, btag };
        columns.validate()?;
        Ok(columns)
    }

    /// Number of events in the dataset.
    pub fn n_events(&self) -> usize {
        self.pt.len()
    }

    /// Checks that all branches agree on the event count and, per event, on
    /// the jet count.
    pub fn validate(&self) -> Result<(), HhError> {
        let n = self.pt.len();
        for (name, len) in [
            ("eta", self.eta.len()),
            ("phi", self.phi.len()),
            ("btag", self.btag.len()),
        ] {
            if len != n {
                return Err(HhError::Dataset(
                    ErrorInfo::new("column-length-mismatch", "branches disagree on event count")
                        .with_context("branch", name)
                        .with_context("expected", n.to_string())
                        .with_context("found", len.to_string()),
                ));
            }
        }
        for idx in 0..n {
            let jets = self.pt[idx].len();
            if self.eta[idx].len() != jets
                || self.phi[idx].len() != jets
                || self.btag[idx].len() != jets
            {
                return Err(HhError::Dataset(
                    ErrorInfo::new("jet-length-mismatch", "branches disagree on jet count")
                        .with_context("event", idx.to_string())
                        .with_context("pt_jets", jets.to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Materialises a single event.
    pub fn event(&self, index: usize) -> Option<Event> {
        let pt = self.pt.get(index)?;
        let (eta, phi, btag) = (
            self.eta.get(index)?,
            self.phi.get(index)?,
            self.btag.get(index)?,
        );
        let jets = pt
            .iter()
            .zip(eta)
            .zip(phi)
            .zip(btag)
            .map(|(((&pt, &eta), &phi), &btag)| Jet::new(pt, eta, phi, btag))
            .collect();
        Some(Event::new(index, jets))
    }

    /// Iterates over events in dataset order.
    pub fn events(&self) -> impl Iterator<Item = Event> + '_ {
        (0..self.n_events()).filter_map(move |idx| self.event(idx))
    }

    /// Keeps only the first `max` events.
    pub fn truncate(&mut self, max: usize) {
        self.pt.truncate(max);
        self.eta.truncate(max);
        self.phi.truncate(max);
        self.btag.truncate(max);
    }

    /// Parses a JSON dataset keyed by branch name.
    pub fn from_json_slice(data: &[u8], branches: &BranchNames) -> Result<Self, HhError> {
        let mut object: HashMap<String, Value> = hh_core::from_json_slice(data)
            .map_err(|err| dataset_error("json-parse", err.info().message.clone()))?;
        let mut take = |branch: &str| -> Result<Vec<Vec<f64>>, HhError> {
            let value = object.remove(branch).ok_or_else(|| {
                HhError::Dataset(
                    ErrorInfo::new("missing-branch", "branch not present in dataset")
                        .with_context("branch", branch)
                        .with_hint("set `branches` in the reconstruction config"),
                )
            })?;
            serde_json::from_value(value).map_err(|err| {
                HhError::Dataset(
                    ErrorInfo::new("branch-decode", err.to_string()).with_context("branch", branch),
                )
            })
        };
        let [pt_name, eta_name, phi_name, btag_name] = branches.as_array();
        let pt = take(pt_name)?;
        let eta = take(eta_name)?;
        let phi = take(phi_name)?;
        let btag = take(btag_name)?;
        Self::new(pt, eta, phi, btag)
    }

    /// Parses a CSV dataset with one row per jet.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, HhError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut grouped: BTreeMap<usize, Vec<JetRow>> = BTreeMap::new();
        let mut rows_seen = 0usize;
        for (line, row) in rdr.deserialize::<JetRow>().enumerate() {
            let row = row.map_err(|err| {
                HhError::Dataset(
                    ErrorInfo::new("csv-row", err.to_string())
                        .with_context("row", (line + 1).to_string()),
                )
            })?;
            grouped.entry(row.event).or_default().push(row);
            rows_seen += 1;
        }
        let n_events = match grouped.keys().next_back() {
            None => 0,
            Some(&last) => csv_event_count(last, rows_seen)?,
        };
        let mut columns = JetColumns {
            pt: vec![Vec::new(); n_events],
            eta: vec![Vec::new(); n_events],
            phi: vec![Vec::new(); n_events],
            btag: vec![Vec::new(); n_events],
        };
        for (event, rows) in grouped {
            for row in rows {
                columns.pt[event].push(row.pt);
                columns.eta[event].push(row.eta);
                columns.phi[event].push(row.phi);
                columns.btag[event].push(row.btag);
            }
        }
        Ok(columns)
    }
}

/// Event count implied by the largest CSV event index.
///
/// Indices may skip at most [`MAX_CSV_EVENT_GAP`] events beyond the rows read.
fn csv_event_count(last: usize, rows_seen: usize) -> Result<usize, HhError> {
    let n_events = last.checked_add(1).ok_or_else(|| {
        HhError::Dataset(
            ErrorInfo::new("event-index-overflow", "event index does not fit the event count")
                .with_context("event", last.to_string()),
        )
    })?;
    if n_events > rows_seen.saturating_add(MAX_CSV_EVENT_GAP) {
        return Err(HhError::Dataset(
            ErrorInfo::new("sparse-event-index", "event index far beyond the rows present")
                .with_context("event", last.to_string())
                .with_context("rows", rows_seen.to_string())
                .with_hint("renumber events densely from zero"),
        ));
    }
    Ok(n_events)
}

/// Loads a dataset, choosing the layout from the file extension.
pub fn load(path: &Path, branches: &BranchNames) -> Result<JetColumns, HhError> {
    let bytes = fs::read(path).map_err(|err| {
        HhError::Dataset(
            ErrorInfo::new("dataset-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    load_bytes(&bytes, path, branches)
}

/// Parses already-read dataset bytes, choosing the layout from `path`.
pub fn load_bytes(
    bytes: &[u8],
    path: &Path,
    branches: &BranchNames,
) -> Result<JetColumns, HhError> {
    let columns = match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => JetColumns::from_csv_reader(bytes),
        _ => JetColumns::from_json_slice(bytes, branches),
    };
    columns.map_err(|err| match err {
        HhError::Dataset(info) => {
            HhError::Dataset(info.with_context("path", path.display().to_string()))
        }
        other => other,
    })
}
