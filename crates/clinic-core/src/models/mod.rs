//! Domain models for the clinic registry.

mod patient;
mod professional;
mod specialty;
mod status;

pub use patient::*;
pub use professional::*;
pub use specialty::*;
pub use status::*;
