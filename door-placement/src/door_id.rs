use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Name of a door, e.g. the day number of an advent calendar.
///
/// Ordering is "natural": identifiers that parse as unsigned integers sort numerically and come before
/// everything else, the rest sort lexicographically. Equal numbers with different spellings ("6" and "06")
/// fall back to the string so the ordering stays consistent with `Eq`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DoorId(String);

impl DoorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.parse::<u64>().ok()
    }
}

impl Ord for DoorId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for DoorId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for DoorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DoorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DoorId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for DoorId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod door_id_tests {
    use super::*;

    fn sorted(ids: &[&str]) -> Vec<String> {
        let mut result: Vec<DoorId> = ids.iter().map(|id| DoorId::from(*id)).collect();
        result.sort();
        result.into_iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_numeric_ids_sort_numerically() {
        assert_eq!(vec!["2", "10", "24"], sorted(&["24", "10", "2"]));
    }

    #[test]
    fn test_non_numeric_ids_sort_after_numeric() {
        assert_eq!(vec!["3", "12", "bonus", "extra"], sorted(&["extra", "12", "bonus", "3"]));
    }

    #[test]
    fn test_same_number_different_spelling_is_not_equal() {
        let a = DoorId::from("6");
        let b = DoorId::from("06");
        assert_ne!(a, b);
        assert_ne!(Ordering::Equal, a.cmp(&b));
    }
}
