use crate::door_id::DoorId;

#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum PlacementError {
    /// The attempt budget for `id` ran out before a free spot was found.
    #[error("could not place door {id} within {attempts} attempts")]
    Unplaceable { id: DoorId, attempts: u64 },

    /// The policy or canvas cannot be sampled at all.
    #[error("invalid sizing policy: {0}")]
    InvalidPolicy(String),
}

impl PlacementError {
    pub fn invalid_policy(msg: impl Into<String>) -> Self {
        Self::InvalidPolicy(msg.into())
    }

    /// The identifier that could not be placed, if that is what went wrong.
    pub fn unplaced_id(&self) -> Option<&DoorId> {
        match self {
            PlacementError::Unplaceable { id, .. } => Some(id),
            PlacementError::InvalidPolicy(_) => None,
        }
    }
}
