use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::jet::Jet;

/// Regulator keeping the pseudorapidity logarithm finite along the beam axis.
pub const ETA_EPSILON: f64 = 1e-12;

/// Energy-momentum four-vector `(E, px, py, pz)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourVector {
    /// Energy.
    pub e: f64,
    /// Momentum along x.
    pub px: f64,
    /// Momentum along y.
    pub py: f64,
    /// Momentum along z (beam axis).
    pub pz: f64,
}

impl FourVector {
    /// Massless four-vector of a jet: `E = pt cosh(eta)`, `pz = pt sinh(eta)`.
    pub fn from_jet(jet: &Jet) -> Self {
        Self {
            e: jet.pt * jet.eta.cosh(),
            px: jet.pt * jet.phi.cos(),
            py: jet.pt * jet.phi.sin(),
            pz: jet.pt * jet.eta.sinh(),
        }
    }

    /// Squared magnitude of the three-momentum.
    pub fn p2(&self) -> f64 {
        self.px.powi(2) + self.py.powi(2) + self.pz.powi(2)
    }

    /// Invariant mass, clamped at zero when rounding pushes the radicand negative.
    pub fn mass(&self) -> f64 {
        (self.e.powi(2) - self.p2()).max(0.0).sqrt()
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        (self.px.powi(2) + self.py.powi(2)).sqrt()
    }

    /// Magnitude of the three-momentum.
    pub fn p(&self) -> f64 {
        self.p2().sqrt()
    }

    /// Azimuthal angle.
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Pseudorapidity with the [`ETA_EPSILON`] regulator.
    pub fn eta(&self) -> f64 {
        let p = self.p();
        0.5 * ((p + self.pz + ETA_EPSILON) / (p - self.pz + ETA_EPSILON)).ln()
    }

    /// Rapidity, or `0.0` when `E == pz`.
    pub fn rapidity(&self) -> f64 {
        if self.e == self.pz {
            return 0.0;
        }
        0.5 * ((self.e + self.pz) / (self.e - self.pz)).ln()
    }
}

impl Add for FourVector {
    type Output = FourVector;

    fn add(self, rhs: FourVector) -> FourVector {
        FourVector {
            e: self.e + rhs.e,
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
        }
    }
}

/// Dijet Higgs candidate with its derived kinematic scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Summed four-vector of the two jets.
    pub four_vector: FourVector,
    /// Invariant mass.
    pub mass: f64,
    /// Transverse momentum.
    pub pt: f64,
    /// Pseudorapidity.
    pub eta: f64,
    /// Azimuthal angle.
    pub phi: f64,
    /// Rapidity.
    pub rapidity: f64,
    /// Magnitude of the three-momentum.
    pub p: f64,
}

impl Candidate {
    /// Derives all candidate scalars from a combined four-vector.
    pub fn from_four_vector(four_vector: FourVector) -> Self {
        Self {
            four_vector,
            mass: four_vector.mass(),
            pt: four_vector.pt(),
            eta: four_vector.eta(),
            phi: four_vector.phi(),
            rapidity: four_vector.rapidity(),
            p: four_vector.p(),
        }
    }
}

/// Combines two jets into a dijet candidate.
///
/// Inputs are not validated: non-finite kinematics propagate into the result.
pub fn compute_candidate_kinematics(a: &Jet, b: &Jet) -> Candidate {
    Candidate::from_four_vector(FourVector::from_jet(a) + FourVector::from_jet(b))
}
