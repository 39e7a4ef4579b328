pub mod entities;
pub mod global_errors;
pub mod policy;
pub mod prelude;
pub mod simulation;
pub mod units;
