use serde::{Deserialize, Serialize};

use crate::jet::Jet;
use crate::kinematics::{compute_candidate_kinematics, Candidate};

fn default_m_target1() -> f64 {
    125.0
}

fn default_m_target2() -> f64 {
    120.0
}

/// Target masses of the leading and subleading Higgs candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassHypothesis {
    /// Target mass of H1, the higher-pt candidate.
    #[serde(default = "default_m_target1")]
    pub m_target1: f64,
    /// Target mass of H2, the lower-pt candidate.
    #[serde(default = "default_m_target2")]
    pub m_target2: f64,
}

impl Default for MassHypothesis {
    fn default() -> Self {
        Self {
            m_target1: default_m_target1(),
            m_target2: default_m_target2(),
        }
    }
}

impl MassHypothesis {
    /// Slope `k` of the `m_H1 = k * m_H2` line.
    pub fn ratio(&self) -> f64 {
        self.m_target1 / self.m_target2
    }

    /// Distance of `(m1, m2)` from the `m_H1 = k * m_H2` line.
    pub fn d_hh(&self, m1: f64, m2: f64) -> f64 {
        let k = self.ratio();
        (m1 - k * m2).abs() / (1.0 + k * k).sqrt()
    }

    /// Euclidean distance of `(m1, m2)` from the target point.
    pub fn r_hh(&self, m1: f64, m2: f64) -> f64 {
        ((m1 - self.m_target1).powi(2) + (m2 - self.m_target2).powi(2)).sqrt()
    }
}

/// Partition of four jets into two dijets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pairing {
    /// `{(0,1), (2,3)}`.
    Adjacent,
    /// `{(0,2), (1,3)}`.
    Interleaved,
    /// `{(0,3), (1,2)}`.
    Nested,
}

impl Pairing {
    /// All pairings in enumeration order.
    pub const ALL: [Pairing; 3] = [Pairing::Adjacent, Pairing::Interleaved, Pairing::Nested];

    /// Jet index pairs forming the two dijets.
    pub const fn groups(self) -> [(usize, usize); 2] {
        match self {
            Pairing::Adjacent => [(0, 1), (2, 3)],
            Pairing::Interleaved => [(0, 2), (1, 3)],
            Pairing::Nested => [(0, 3), (1, 2)],
        }
    }

    /// Short label used in tabular artefacts.
    pub const fn label(self) -> &'static str {
        match self {
            Pairing::Adjacent => "01_23",
            Pairing::Interleaved => "02_13",
            Pairing::Nested => "03_12",
        }
    }
}

/// Score of a single pairing with its pt-ordered candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairingScore {
    /// Pairing that produced the candidates.
    pub pairing: Pairing,
    /// Higher-pt candidate.
    pub h1: Candidate,
    /// Lower-pt candidate.
    pub h2: Candidate,
    /// Indices (into the four selected jets) forming H1.
    pub h1_jets: (usize, usize),
    /// Indices (into the four selected jets) forming H2.
    pub h2_jets: (usize, usize),
    /// Ranking discriminant.
    pub d_hh: f64,
    /// Distance to the target mass point; reported only.
    pub r_hh: f64,
}

fn score_pairing(jets: &[Jet; 4], pairing: Pairing, hypothesis: &MassHypothesis) -> PairingScore {
    let [first, second] = pairing.groups();
    let cand_first = compute_candidate_kinematics(&jets[first.0], &jets[first.1]);
    let cand_second = compute_candidate_kinematics(&jets[second.0], &jets[second.1]);

    let (h1, h2, h1_jets, h2_jets) = if cand_second.pt > cand_first.pt {
        (cand_second, cand_first, second, first)
    } else {
        (cand_first, cand_second, first, second)
    };

    PairingScore {
        pairing,
        h1,
        h2,
        h1_jets,
        h2_jets,
        d_hh: hypothesis.d_hh(h1.mass, h2.mass),
        r_hh: hypothesis.r_hh(h1.mass, h2.mass),
    }
}

/// Scores every pairing of the four jets in enumeration order.
pub fn score_pairings(jets: &[Jet; 4], hypothesis: &MassHypothesis) -> [PairingScore; 3] {
    Pairing::ALL.map(|pairing| score_pairing(jets, pairing, hypothesis))
}

/// Returns the pairing with the smallest `d_hh`; ties keep the first enumerated.
pub fn select_best_pairing(jets: &[Jet; 4], hypothesis: &MassHypothesis) -> PairingScore {
    let scores = score_pairings(jets, hypothesis);
    let mut best = scores[0];
    for score in &scores[1..] {
        if score.d_hh.total_cmp(&best.d_hh).is_lt() {
            best = *score;
        }
    }
    best
}
