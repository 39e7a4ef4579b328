use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::entities::*;
use crate::units::*;

pub const BASE_PROBABILITY: f64 = 0.2;
pub const PROBABILITY_PER_CENTIMETER: f64 = 0.1;
pub const MAX_PROBABILITY: f64 = 0.9;
pub const CONSTANT_PROBABILITY: f64 = 0.5;

/// Anything able to tell how likely a cell gets trapped in a node.
///
/// Implementations must be pure: the same node and cell always give the same
/// probability.
pub trait EntrapmentModel {
    fn entrapment_probability(&self, node: &LymphNode, cell: &CancerCell) -> Probability;
}

/// The entrapment policies shipped with the crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrapmentPolicy {
    /// Larger nodes have a more complex sinus structure and trap more cells:
    /// `min(0.2 + size * 0.1, 0.9)`. Saturates from 7 cm on.
    #[default]
    LinearBySize,
    /// Every node traps with probability 0.5.
    Constant,
}

impl Display for EntrapmentPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinearBySize => write!(f, "linear by size"),
            Self::Constant => write!(f, "constant"),
        }
    }
}

impl EntrapmentModel for EntrapmentPolicy {
    fn entrapment_probability(&self, node: &LymphNode, _cell: &CancerCell) -> Probability {
        match self {
            Self::LinearBySize => Probability::from(
                (BASE_PROBABILITY + node.size().to_f64() * PROBABILITY_PER_CENTIMETER)
                    .min(MAX_PROBABILITY),
            ),
            Self::Constant => Probability::from(CONSTANT_PROBABILITY),
        }
    }
}

/// Computes the probability that `cell` gets trapped in `node` under `model`.
///
/// This never fails and does not validate its inputs, see
/// [`SizeValidation`](crate::simulation::SizeValidation) for that.
pub fn entrapment_probability(
    model: &impl EntrapmentModel,
    node: &LymphNode,
    cell: &CancerCell,
) -> Probability {
    model.entrapment_probability(node, cell)
}
