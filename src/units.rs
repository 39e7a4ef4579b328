use std::hash::{Hash, Hasher};

use backtrace::Backtrace as trc;
use derive_more::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::global_errors::get_backtrace;

/// Size of a lymph node in centimeters.
///
/// Equality compares bits, so `NaN == NaN` holds while `partial_cmp` still returns `None`.
#[derive(
    PartialOrd, Clone, Copy, Default, Debug, Display, Into, AsRef, Serialize, Deserialize,
)]
pub struct NodeSize(f64);

impl Hash for NodeSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialEq for NodeSize {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl From<f64> for NodeSize {
    fn from(centimeters: f64) -> Self {
        Self(centimeters)
    }
}

impl NodeSize {
    pub fn new() -> Self {
        Self(0.)
    }

    pub fn to_f64(self) -> f64 {
        self.0
    }

    /// A size is valid when it is finite and not negative.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.
    }
}

/// Equality compares bits, like [`NodeSize`].
#[derive(
    PartialOrd, Clone, Copy, Default, Debug, Display, Into, AsRef, Serialize, Deserialize,
)]
pub struct Probability(f64);

impl Hash for Probability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialEq for Probability {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl From<f64> for Probability {
    fn from(probability: f64) -> Self {
        Self(probability)
    }
}

impl Probability {
    pub fn new() -> Self {
        Self(0.)
    }

    pub fn to_f64(self) -> f64 {
        self.0
    }

    pub fn is_in_bound(&self) -> bool {
        (0. ..=1.).contains(&self.0)
    }

    pub fn check_in_bound(&self) -> Result<(), UnitsError> {
        if self.is_in_bound() {
            Ok(())
        } else {
            Err(UnitsError::ProbabilityOutOfRange {
                probability: *self,
                context: get_backtrace(),
            })
        }
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Error)]
pub enum UnitsError {
    #[error("Probability is out of range: {probability:#?}")]
    ProbabilityOutOfRange {
        probability: Probability,
        context: trc,
    },
}
