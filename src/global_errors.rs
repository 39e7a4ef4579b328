use backtrace::Backtrace as trc;
use thiserror::Error;

use crate::prelude::*;

#[non_exhaustive]
#[derive(Debug, Clone, Error)]
pub enum ErrorKind {
    #[error("NodeError: {0:#?}")]
    NodeError(#[from] NodeError),

    #[error("UnitsError: {0:#?}")]
    UnitsError(#[from] UnitsError),

    #[error("SimulationError: {0:#?}")]
    SimulationError(#[from] SimulationError),
}

impl ErrorKind {
    /// Whether the error was caused by an invalid node handed in by the caller.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::NodeError(_))
    }
}

#[cfg(debug_assertions)]
pub(crate) fn get_backtrace() -> trc {
    trc::new()
}

#[cfg(not(debug_assertions))]
pub(crate) fn get_backtrace() -> trc {
    trc::new_unresolved()
}
