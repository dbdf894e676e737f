//! YAML configuration for a reconstruction run.

use std::fs;
use std::path::Path;

use hh_core::errors::{ErrorInfo, HhError};
use serde::{Deserialize, Serialize};

use crate::dataset::BranchNames;
use crate::histogram::HistogramBinning;
use crate::pairing::MassHypothesis;
use crate::reconstruct::EventSelection;
use crate::selection::{BtagPreselection, BtagWorkingPoints};

fn config_error(code: &str, message: impl Into<String>) -> HhError {
    HhError::Config(ErrorInfo::new(code, message.into()))
}

/// Parameters of a reconstruction run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoConfig {
    /// Mass hypothesis used to rank pairings.
    pub hypothesis: MassHypothesis,
    /// b-tag working-point table.
    pub btag_working_points: BtagWorkingPoints,
    /// Optional preselection; absent means disabled.
    pub preselection: Option<BtagPreselection>,
    /// Binning of the candidate-mass histogram.
    pub histogram: HistogramBinning,
    /// Branch names of a JSON dataset.
    pub branches: BranchNames,
    /// Limit on the number of events processed.
    pub max_events: Option<usize>,
}

impl RecoConfig {
    /// Parses a YAML document; an empty document yields the defaults.
    pub fn from_yaml_slice(data: &[u8]) -> Result<Self, HhError> {
        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_slice(data)
            .map_err(|err| config_error("yaml-parse", err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, HhError> {
        let bytes = fs::read(path).map_err(|err| {
            HhError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_slice(&bytes).map_err(|err| match err {
            HhError::Config(info) => {
                HhError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Checks mass targets, histogram binning and the working-point index.
    pub fn validate(&self) -> Result<(), HhError> {
        for (name, value) in [
            ("m_target1", self.hypothesis.m_target1),
            ("m_target2", self.hypothesis.m_target2),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(HhError::Config(
                    ErrorInfo::new("bad-mass-target", "mass targets must be finite and positive")
                        .with_context(name, value.to_string()),
                ));
            }
        }
        self.histogram.validate()?;
        self.btag_working_points.threshold()?;
        if self.max_events == Some(0) {
            return Err(HhError::Config(
                ErrorInfo::new("zero-max-events", "max_events must be positive")
                    .with_hint("omit max_events to process every event"),
            ));
        }
        Ok(())
    }

    /// Settings handed to the per-event procedure.
    pub fn event_selection(&self) -> Result<EventSelection, HhError> {
        let preselection_threshold = match self.preselection {
            Some(BtagPreselection { enabled: true }) => {
                Some(self.btag_working_points.threshold()?)
            }
            _ => None,
        };
        Ok(EventSelection {
            hypothesis: self.hypothesis,
            preselection_threshold,
        })
    }
}
