use hh_core::errors::{ErrorInfo, HhError};
use serde::{Deserialize, Serialize};

use crate::reconstruct::CandidateMasses;

/// Largest bin count per axis; the count grid holds `bins * bins` cells.
pub const MAX_BINS: usize = 1_000;

fn default_bins() -> usize {
    50
}

fn default_low() -> f64 {
    0.0
}

fn default_high() -> f64 {
    240.0
}

/// Binning shared by both mass axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBinning {
    /// Number of bins per axis.
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// Lower edge of the first bin.
    #[serde(default = "default_low")]
    pub low: f64,
    /// Upper edge of the last bin.
    #[serde(default = "default_high")]
    pub high: f64,
}

impl Default for HistogramBinning {
    fn default() -> Self {
        Self {
            bins: default_bins(),
            low: default_low(),
            high: default_high(),
        }
    }
}

impl HistogramBinning {
    /// Rejects empty or inverted binnings.
    pub fn validate(&self) -> Result<(), HhError> {
        if self.bins == 0 {
            return Err(HhError::Config(ErrorInfo::new(
                "zero-bins",
                "histogram bin count must be positive",
            )));
        }
        if self.bins > MAX_BINS {
            return Err(HhError::Config(
                ErrorInfo::new("too-many-bins", "histogram bin count exceeds the limit")
                    .with_context("bins", self.bins.to_string())
                    .with_context("max", MAX_BINS.to_string()),
            ));
        }
        if !(self.low.is_finite() && self.high.is_finite()) || self.low >= self.high {
            return Err(HhError::Config(
                ErrorInfo::new("bad-range", "histogram range must be finite with low < high")
                    .with_context("low", self.low.to_string())
                    .with_context("high", self.high.to_string()),
            ));
        }
        Ok(())
    }

    /// Bin edges, `bins + 1` entries.
    pub fn edges(&self) -> Vec<f64> {
        let step = self.step();
        (0..=self.bins)
            .map(|idx| self.low + idx as f64 * step)
            .collect()
    }

    fn step(&self) -> f64 {
        (self.high - self.low) / self.bins as f64
    }

    /// Bin index of `value`; the upper edge belongs to the last bin.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || value < self.low || value > self.high {
            return None;
        }
        let bin = ((value - self.low) / self.step()).floor() as usize;
        Some(bin.min(self.bins - 1))
    }
}

/// 2D histogram of (H1 mass, H2 mass).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassHistogram2D {
    /// Binning used on both axes.
    pub binning: HistogramBinning,
    /// Bin edges, shared by both axes.
    pub edges: Vec<f64>,
    /// Counts indexed `[h1_bin][h2_bin]`.
    pub counts: Vec<Vec<u64>>,
    /// Entries outside the range on either axis, or non-finite.
    pub outside: u64,
    /// Total entries filled.
    pub entries: u64,
}

impl MassHistogram2D {
    /// Creates an empty histogram.
    pub fn new(binning: &HistogramBinning) -> Result<Self, HhError> {
        binning.validate()?;
        Ok(Self {
            binning: *binning,
            edges: binning.edges(),
            counts: vec![vec![0; binning.bins]; binning.bins],
            outside: 0,
            entries: 0,
        })
    }

    /// Fills every mass pair.
    pub fn from_masses(
        binning: &HistogramBinning,
        masses: &CandidateMasses,
    ) -> Result<Self, HhError> {
        let mut hist = Self::new(binning)?;
        for (m1, m2) in masses.pairs() {
            hist.fill(m1, m2);
        }
        Ok(hist)
    }

    /// Adds one entry.
    pub fn fill(&mut self, m1: f64, m2: f64) {
        self.entries += 1;
        match (self.binning.bin_of(m1), self.binning.bin_of(m2)) {
            (Some(x), Some(y)) => self.counts[x][y] += 1,
            _ => self.outside += 1,
        }
    }

    /// Sum of all in-range counts.
    pub fn in_range(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Projection onto the H1 axis.
    pub fn projection_h1(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Projection onto the H2 axis.
    pub fn projection_h2(&self) -> Vec<u64> {
        let bins = self.counts.len();
        (0..bins)
            .map(|y| self.counts.iter().map(|row| row[y]).sum())
            .collect()
    }
}
