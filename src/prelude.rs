pub use crate::entities::*;
pub use crate::global_errors::ErrorKind;
pub use crate::policy::*;
pub use crate::simulation::*;
pub use crate::units::*;
