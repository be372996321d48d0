pub mod error;
pub mod layout;
pub mod run;

pub use error::LayoutError;
pub use layout::{backup_path, DoorEntry, LayoutDocument};
pub use run::{randomize, RandomizeArgs, RunOutcome};
