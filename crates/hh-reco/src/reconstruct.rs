use hh_core::errors::HhError;
use serde::{Deserialize, Serialize};

use crate::jet::Event;
use crate::pairing::{select_best_pairing, MassHypothesis, PairingScore};
use crate::selection::{passes_preselection, select_pairing_jets, JETS_PER_EVENT};

/// Settings consumed by the per-event procedure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EventSelection {
    /// Mass hypothesis used to rank pairings.
    pub hypothesis: MassHypothesis,
    /// Threshold of the b-tag preselection, `None` when the cut is disabled.
    pub preselection_threshold: Option<f64>,
}

/// Why an event produced no candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer than four jets.
    TooFewJets,
    /// Leading-pt b-tag mean below the working point.
    Preselection,
}

/// Reconstructed candidates of one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Index of the event in the source dataset.
    pub event: usize,
    /// Original jet indices of the four selected jets, highest b-tag first.
    pub selected_jets: [usize; 4],
    /// Winning pairing; its jet indices refer to `selected_jets` positions.
    pub best: PairingScore,
}

impl EventRecord {
    /// Original jet indices forming H1.
    pub fn h1_source_jets(&self) -> (usize, usize) {
        let (a, b) = self.best.h1_jets;
        (self.selected_jets[a], self.selected_jets[b])
    }

    /// Original jet indices forming H2.
    pub fn h2_source_jets(&self) -> (usize, usize) {
        let (a, b) = self.best.h2_jets;
        (self.selected_jets[a], self.selected_jets[b])
    }
}

/// Result of running the procedure on one event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Candidates were reconstructed.
    Reconstructed(EventRecord),
    /// The event was skipped.
    Skipped(SkipReason),
}

/// Candidate mass pairs in processing order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateMasses {
    /// H1 masses.
    pub mass_h1: Vec<f64>,
    /// H2 masses, same length as `mass_h1`.
    pub mass_h2: Vec<f64>,
}

impl CandidateMasses {
    /// Number of recorded mass pairs.
    pub fn len(&self) -> usize {
        self.mass_h1.len()
    }

    /// Returns `true` when no pair has been recorded.
    pub fn is_empty(&self) -> bool {
        self.mass_h1.is_empty()
    }

    /// Iterates over `(mass_h1, mass_h2)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mass_h1.iter().copied().zip(self.mass_h2.iter().copied())
    }

    fn push(&mut self, m1: f64, m2: f64) {
        self.mass_h1.push(m1);
        self.mass_h2.push(m2);
    }
}

/// Output of a full pass over the events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconstructionOutput {
    /// Mass pairs of reconstructed events.
    pub masses: CandidateMasses,
    /// Per-event records aligned with `masses`.
    pub records: Vec<EventRecord>,
    /// Number of events visited.
    pub events_seen: usize,
    /// Events skipped for having fewer than four jets.
    pub skipped_too_few_jets: usize,
    /// Events rejected by the b-tag preselection.
    pub skipped_preselection: usize,
}

/// Runs the per-event procedure: optional preselection, four-jet requirement,
/// top-4 b-tag selection and best pairing.
pub fn reconstruct_event(
    event: &Event,
    selection: &EventSelection,
) -> Result<EventOutcome, HhError> {
    if let Some(threshold) = selection.preselection_threshold {
        if !passes_preselection(&event.jets, threshold) {
            return Ok(EventOutcome::Skipped(SkipReason::Preselection));
        }
    }
    if event.len() < JETS_PER_EVENT {
        return Ok(EventOutcome::Skipped(SkipReason::TooFewJets));
    }
    let (jets, selected_jets) = select_pairing_jets(&event.jets)?;
    let best = select_best_pairing(&jets, &selection.hypothesis);
    Ok(EventOutcome::Reconstructed(EventRecord {
        event: event.index,
        selected_jets,
        best,
    }))
}

/// Processes events strictly in order, collecting one mass pair per
/// reconstructed event.
pub fn reconstruct_events<I>(
    events: I,
    selection: &EventSelection,
) -> Result<ReconstructionOutput, HhError>
where
    I: IntoIterator<Item = Event>,
{
    let mut output = ReconstructionOutput::default();
    for event in events {
        output.events_seen += 1;
        match reconstruct_event(&event, selection)? {
            EventOutcome::Reconstructed(record) => {
                output.masses.push(record.best.h1.mass, record.best.h2.mass);
                output.records.push(record);
            }
            EventOutcome::Skipped(reason) => {
                tracing::debug!(
                    event = event.index,
                    jets = event.len(),
                    ?reason,
                    "event skipped"
                );
                match reason {
                    SkipReason::TooFewJets => output.skipped_too_few_jets += 1,
                    SkipReason::Preselection => output.skipped_preselection += 1,
                }
            }
        }
    }
    tracing::info!(
        events = output.events_seen,
        reconstructed = output.records.len(),
        skipped_too_few_jets = output.skipped_too_few_jets,
        skipped_preselection = output.skipped_preselection,
        "reconstruction pass complete"
    );
    Ok(output)
}
