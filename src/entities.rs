use std::fmt::Display;

use backtrace::Backtrace as trc;
use derive_more::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::global_errors::get_backtrace;
use crate::units::*;

/// A lymph node, described only by its size.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct LymphNode {
    size: NodeSize,
}

impl Display for LymphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LymphNode: {} cm", self.size)
    }
}

impl LymphNode {
    pub fn new(size: NodeSize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> NodeSize {
        self.size
    }

    pub(crate) fn validate(&self) -> Result<(), NodeError> {
        if self.size.is_valid() {
            Ok(())
        } else {
            Err(NodeError::InvalidSize {
                size: self.size,
                context: get_backtrace(),
            })
        }
    }
}

#[derive(
    Clone, PartialEq, Eq, Hash, Debug, Display, Default, From, Into, AsRef, Deref, Serialize,
    Deserialize,
)]
pub struct Phenotype(String);

impl Phenotype {
    pub fn new(phenotype: &str) -> Self {
        Self(phenotype.to_string())
    }
}

/// A cancer cell travelling through the lymphatic system.
///
/// None of the shipped entrapment policies look at the phenotype yet. It is kept
/// so that phenotype dependent models can be added without changing the interface.
/// Any label is accepted, including an empty one.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct CancerCell {
    phenotype: Phenotype,
}

impl Display for CancerCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CancerCell: {}", self.phenotype)
    }
}

impl CancerCell {
    pub fn new(phenotype: Phenotype) -> Self {
        Self { phenotype }
    }

    pub fn phenotype(&self) -> &Phenotype {
        &self.phenotype
    }
}

#[non_exhaustive]
#[derive(Debug, Clone, Error)]
pub enum NodeError {
    #[error("Invalid lymph node size: {size:#?}")]
    InvalidSize { size: NodeSize, context: trc },
}
