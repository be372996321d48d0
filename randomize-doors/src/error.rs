use std::path::PathBuf;

use door_placement::{DoorId, PlacementError};

#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("failed to read layout '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("layout '{}' is not valid JSON", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("layout '{}' must be a JSON object at the top level", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("no `door` section in layout '{}'", .path.display())]
    MissingDoorSection { path: PathBuf },

    #[error("`door` section in layout '{}' must be an object keyed by door id", .path.display())]
    InvalidDoorSection { path: PathBuf },

    #[error("no rectangle was placed for door {id}")]
    IncompletePlacement { id: DoorId },

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error("failed to serialize layout")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write backup '{}', layout left untouched", .path.display())]
    BackupWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write layout '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
