use serde::{Deserialize, Serialize};

/// Reconstructed jet kinematics as read from the columnar dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Jet {
    /// Transverse momentum.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuthal angle in radians.
    pub phi: f64,
    /// b-tag discriminant; only its ordering is meaningful.
    pub btag_score: f64,
}

impl Jet {
    /// Creates a jet from its kinematic coordinates and b-tag score.
    pub const fn new(pt: f64, eta: f64, phi: f64, btag_score: f64) -> Self {
        Self {
            pt,
            eta,
            phi,
            btag_score,
        }
    }
}

/// Ordered jet collection of a single event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Position of the event in the source dataset.
    pub index: usize,
    /// Jets in dataset order.
    pub jets: Vec<Jet>,
}

impl Event {
    /// Creates an event from its dataset index and jets.
    pub fn new(index: usize, jets: Vec<Jet>) -> Self {
        Self { index, jets }
    }

    /// Number of jets stored in the event.
    pub fn len(&self) -> usize {
        self.jets.len()
    }

    /// Returns `true` when the event carries no jets.
    pub fn is_empty(&self) -> bool {
        self.jets.is_empty()
    }
}
