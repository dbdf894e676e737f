use hh_core::errors::{ErrorInfo, HhError};
use serde::{Deserialize, Serialize};

use crate::jet::Jet;

/// Number of jets entering the dijet pairing.
pub const JETS_PER_EVENT: usize = 4;

fn selection_error(code: &str, message: impl Into<String>) -> HhError {
    HhError::Selection(ErrorInfo::new(code, message.into()))
}

fn default_thresholds() -> Vec<f64> {
    vec![0.38, 0.375, 0.31, 0.275]
}

fn default_selected() -> usize {
    1
}

/// Trigger-level b-tag working points and the one in use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BtagWorkingPoints {
    /// Available thresholds, tightest first.
    #[serde(default = "default_thresholds")]
    pub thresholds: Vec<f64>,
    /// Index into `thresholds`.
    #[serde(default = "default_selected")]
    pub selected: usize,
}

impl Default for BtagWorkingPoints {
    fn default() -> Self {
        Self {
            thresholds: default_thresholds(),
            selected: default_selected(),
        }
    }
}

impl BtagWorkingPoints {
    /// Returns the selected threshold.
    pub fn threshold(&self) -> Result<f64, HhError> {
        self.thresholds.get(self.selected).copied().ok_or_else(|| {
            HhError::Config(
                ErrorInfo::new("working-point-index", "selected working point out of range")
                    .with_context("selected", self.selected.to_string())
                    .with_context("available", self.thresholds.len().to_string()),
            )
        })
    }
}

/// Opt-in event preselection on the b-tag scores of the two leading-pt jets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BtagPreselection {
    /// Whether the cut is applied.
    #[serde(default)]
    pub enabled: bool,
}

/// Mean b-tag score of the two highest-pt jets, if the event has two jets.
pub fn leading_pt_btag_mean(jets: &[Jet]) -> Option<f64> {
    if jets.len() < 2 {
        return None;
    }
    let mut order: Vec<usize> = (0..jets.len()).collect();
    order.sort_by(|&a, &b| jets[b].pt.total_cmp(&jets[a].pt));
    Some((jets[order[0]].btag_score + jets[order[1]].btag_score) / 2.0)
}

/// Applies the preselection; events with fewer than two jets always pass.
pub fn passes_preselection(jets: &[Jet], threshold: f64) -> bool {
    match leading_pt_btag_mean(jets) {
        Some(mean) => mean >= threshold,
        None => true,
    }
}

/// Original indices of the `k` highest b-tag jets, descending, ties by index.
pub fn top_b_tagged_indices(jets: &[Jet], k: usize) -> Result<Vec<usize>, HhError> {
    if jets.len() < k {
        return Err(HhError::Selection(
            ErrorInfo::new("too-few-jets", "not enough jets for b-tag selection")
                .with_context("available", jets.len().to_string())
                .with_context("required", k.to_string()),
        ));
    }
    let mut order: Vec<usize> = (0..jets.len()).collect();
    order.sort_by(|&a, &b| jets[b].btag_score.total_cmp(&jets[a].btag_score));
    order.truncate(k);
    Ok(order)
}

/// Selects the `k` highest b-tag jets in descending score order.
pub fn select_top_b_tagged(jets: &[Jet], k: usize) -> Result<Vec<Jet>, HhError> {
    Ok(top_b_tagged_indices(jets, k)?
        .into_iter()
        .map(|idx| jets[idx])
        .collect())
}

/// Selects the four pairing jets together with their original indices.
pub fn select_pairing_jets(jets: &[Jet]) -> Result<([Jet; 4], [usize; 4]), HhError> {
    let indices = top_b_tagged_indices(jets, JETS_PER_EVENT)?;
    let picked: [usize; 4] = indices
        .as_slice()
        .try_into()
        .map_err(|_| selection_error("selection-size", "expected exactly four indices"))?;
    Ok((picked.map(|idx| jets[idx]), picked))
}
