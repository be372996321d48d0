#[macro_use]
extern crate derivative;

pub mod door_id;
pub mod error;
pub mod geometry;
pub mod placer;
pub mod policy;
pub mod seed;

pub use door_id::DoorId;
pub use error::PlacementError;
pub use geometry::{Canvas, Integer, Rect, Size};
pub use placer::{place, PlacementResult, Placer, DEFAULT_MAX_ATTEMPTS_PER_ITEM};
pub use policy::{SizeOverride, SizingPolicy};
