#![deny(missing_docs)]
#![doc = "Four-jet Higgs candidate reconstruction: dijet kinematics, b-tag jet selection, pairing choice and the per-event procedure producing candidate-mass pairs."]

/// YAML run configuration.
pub mod config;
/// Columnar jet dataset loading.
pub mod dataset;
/// Candidate-mass histogram.
pub mod histogram;
/// Jet and event types.
pub mod jet;
/// Four-vector and dijet candidate kinematics.
pub mod kinematics;
/// Dijet pairing enumeration and scoring.
pub mod pairing;
/// Per-event procedure and batch pass.
pub mod reconstruct;
/// Run report assembly and tabular artefacts.
pub mod report;
/// b-tag jet selection and preselection.
pub mod selection;

pub use config::RecoConfig;
pub use dataset::{load as load_dataset, BranchNames, JetColumns};
pub use histogram::{HistogramBinning, MassHistogram2D};
pub use jet::{Event, Jet};
pub use kinematics::{compute_candidate_kinematics, Candidate, FourVector};
pub use pairing::{score_pairings, select_best_pairing, MassHypothesis, Pairing, PairingScore};
pub use reconstruct::{
    reconstruct_event, reconstruct_events, CandidateMasses, EventOutcome, EventRecord,
    EventSelection, ReconstructionOutput, SkipReason,
};
pub use report::{
    build_report, reconstruct_dataset, write_masses_csv, write_pairings_csv,
    ReconstructionReport, RunSummary,
};
pub use selection::{
    select_pairing_jets, select_top_b_tagged, top_b_tagged_indices, BtagPreselection,
    BtagWorkingPoints, JETS_PER_EVENT,
};
