use std::fmt::Display;

use backtrace::Backtrace as trc;
use itertools::Itertools;
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::global_errors::get_backtrace;
use crate::prelude::*;

/// How node sizes are checked before a probability is computed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeValidation {
    /// Sizes must be finite and non-negative. Every computed probability is
    /// checked to lie in `[0, 1]`. Phenotypes are never checked.
    #[default]
    Strict,
    /// Nothing is checked. The raw value of the model is recorded, even if it
    /// lies outside `[0, 1]` (e.g. a negative size under
    /// [`EntrapmentPolicy::LinearBySize`]).
    Permissive,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub policy: EntrapmentPolicy,
    pub size_validation: SizeValidation,
}

impl SimulationConfig {
    pub fn new(policy: EntrapmentPolicy, size_validation: SizeValidation) -> Self {
        Self {
            policy,
            size_validation,
        }
    }
}

/// The size of a visited node together with the probability of the cell being trapped there.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct EntrapmentRecord {
    node_size: NodeSize,
    probability: Probability,
}

impl Display for EntrapmentRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:?}, {:?})",
            self.node_size.to_f64(),
            self.probability.to_f64()
        )
    }
}

impl From<EntrapmentRecord> for (f64, f64) {
    fn from(record: EntrapmentRecord) -> Self {
        (record.node_size.to_f64(), record.probability.to_f64())
    }
}

impl EntrapmentRecord {
    pub fn new(node_size: NodeSize, probability: Probability) -> Self {
        Self {
            node_size,
            probability,
        }
    }

    pub fn node_size(&self) -> NodeSize {
        self.node_size
    }

    pub fn probability(&self) -> Probability {
        self.probability
    }
}

/// Records of one enumeration, in cell-major, node-minor order.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct MetastasisResults {
    records: Vec<EntrapmentRecord>,
    node_count: usize,
    cell_count: usize,
}

impl Display for MetastasisResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.records.iter().join(", "))
    }
}

impl MetastasisResults {
    pub fn records(&self) -> &Vec<EntrapmentRecord> {
        &self.records
    }

    pub fn into_records(self) -> Vec<EntrapmentRecord> {
        self.records
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records of the `cell`-th input cell, one per node in input order.
    ///
    /// Returns `None` when the counts do not fit the records, which can only
    /// happen for deserialized results.
    pub fn for_cell(&self, cell: usize) -> Option<&[EntrapmentRecord]> {
        if cell >= self.cell_count {
            return None;
        }
        let start = cell.checked_mul(self.node_count)?;
        let end = start.checked_add(self.node_count)?;
        self.records.get(start..end)
    }

    /// The probabilities as a `cells x nodes` matrix.
    pub fn probability_matrix(&self) -> Result<Array2<f64>, SimulationError> {
        let probabilities = self
            .records
            .iter()
            .map(|record| record.probability.to_f64())
            .collect_vec();
        let actual = probabilities.len();
        Array2::from_shape_vec((self.cell_count, self.node_count), probabilities).map_err(|_| {
            SimulationError::ShapeMismatch {
                cells: self.cell_count,
                nodes: self.node_count,
                records: actual,
                context: get_backtrace(),
            }
        })
    }
}

/// Runs the entrapment enumeration with a fixed configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Display for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Simulation:")?;
        writeln!(f, "  Policy: {}", self.config.policy)?;
        writeln!(f, "  Size validation: {:?}", self.config.size_validation)?;
        Ok(())
    }
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn from_policy(policy: EntrapmentPolicy) -> Self {
        Self::new(SimulationConfig {
            policy,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// For every cell, visits every node in order and records the node size and
    /// the entrapment probability.
    ///
    /// The first invalid pair aborts the run when validation is strict.
    pub fn run(
        &self,
        nodes: &[LymphNode],
        cells: &[CancerCell],
    ) -> Result<MetastasisResults, ErrorKind> {
        tracing::debug!(
            nodes = nodes.len(),
            cells = cells.len(),
            policy = %self.config.policy,
            validation = ?self.config.size_validation,
            "running metastasis enumeration"
        );
        let records = enumerate(&self.config.policy, self.config.size_validation, nodes, cells)?;
        Ok(MetastasisResults {
            records,
            node_count: nodes.len(),
            cell_count: cells.len(),
        })
    }

    /// Same as [`Simulation::run`], with cells spread over the rayon thread pool.
    ///
    /// The order of the records is identical to the sequential run. If several
    /// pairs are invalid it is unspecified which of the errors is returned.
    pub fn run_parallel(
        &self,
        nodes: &[LymphNode],
        cells: &[CancerCell],
    ) -> Result<MetastasisResults, ErrorKind> {
        tracing::debug!(
            nodes = nodes.len(),
            cells = cells.len(),
            policy = %self.config.policy,
            validation = ?self.config.size_validation,
            "running parallel metastasis enumeration"
        );
        let policy = self.config.policy;
        let validation = self.config.size_validation;
        let records = cells
            .par_iter()
            .flat_map_iter(|cell| {
                nodes
                    .iter()
                    .map(move |node| evaluate(&policy, validation, node, cell))
            })
            .collect::<Result<Vec<_>, ErrorKind>>()?;
        Ok(MetastasisResults {
            records,
            node_count: nodes.len(),
            cell_count: cells.len(),
        })
    }

    /// Runs the enumeration and returns the probabilities as a `cells x nodes` matrix.
    pub fn matrix(
        &self,
        nodes: &[LymphNode],
        cells: &[CancerCell],
    ) -> Result<Array2<f64>, ErrorKind> {
        Ok(self.run(nodes, cells)?.probability_matrix()?)
    }
}

/// Enumerates `(node size, probability)` for every cell and node under `model`,
/// cell-major and node-minor. Inputs are validated strictly.
pub fn simulate_metastasis(
    nodes: &[LymphNode],
    cells: &[CancerCell],
    model: &impl EntrapmentModel,
) -> Result<Vec<EntrapmentRecord>, ErrorKind> {
    tracing::debug!(
        nodes = nodes.len(),
        cells = cells.len(),
        "running metastasis enumeration"
    );
    enumerate(model, SizeValidation::Strict, nodes, cells)
}

fn enumerate(
    model: &impl EntrapmentModel,
    validation: SizeValidation,
    nodes: &[LymphNode],
    cells: &[CancerCell],
) -> Result<Vec<EntrapmentRecord>, ErrorKind> {
    cells
        .iter()
        .cartesian_product(nodes.iter())
        .map(|(cell, node)| evaluate(model, validation, node, cell))
        .collect()
}

fn evaluate(
    model: &impl EntrapmentModel,
    validation: SizeValidation,
    node: &LymphNode,
    cell: &CancerCell,
) -> Result<EntrapmentRecord, ErrorKind> {
    if validation == SizeValidation::Strict {
        node.validate()?;
    }
    let probability = model.entrapment_probability(node, cell);
    match validation {
        SizeValidation::Strict => probability.check_in_bound()?,
        SizeValidation::Permissive => {
            if !probability.is_in_bound() {
                tracing::warn!(
                    size = node.size().to_f64(),
                    probability = probability.to_f64(),
                    "entrapment probability outside [0, 1]"
                );
            }
        }
    }
    tracing::trace!(
        size = node.size().to_f64(),
        phenotype = %cell.phenotype(),
        probability = probability.to_f64(),
        "computed entrapment probability"
    );
    Ok(EntrapmentRecord::new(node.size(), probability))
}

#[non_exhaustive]
#[derive(Debug, Clone, Error)]
pub enum SimulationError {
    #[error("Cannot shape {records} records into {cells} cells x {nodes} nodes")]
    ShapeMismatch {
        cells: usize,
        nodes: usize,
        records: usize,
        context: trc,
    },
}
