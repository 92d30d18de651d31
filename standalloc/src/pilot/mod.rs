//! Flight records and the directory the engine reads them from.

mod directory;
mod file;
mod model;

pub use directory::{InMemoryPilotDirectory, PilotDirectory};
pub use file::{load_pilots, PilotFileError};
pub use model::{AircraftType, Pilot};
