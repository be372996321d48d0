/// placer holds the rejection-sampling packer. Doors are placed one after another; each gets a bounded number
/// of random trials and the first trial that keeps its distance to every already accepted door wins. There is
/// no backtracking, so a run either places every door or fails on the first one it cannot fit.
use std::collections::BTreeSet;

use itertools::Itertools;
use rand::Rng;

use crate::door_id::DoorId;
use crate::error::PlacementError;
use crate::geometry::{Canvas, Integer, Rect, Size};
use crate::policy::SizingPolicy;

pub const DEFAULT_MAX_ATTEMPTS_PER_ITEM: u64 = 10_000;

/// Every requested door with its rectangle, in the order the doors were placed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PlacementResult {
    placed: Vec<(DoorId, Rect)>,
}

impl PlacementResult {
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn get(&self, id: &DoorId) -> Option<&Rect> {
        self.placed
            .iter()
            .find(|(placed_id, _)| placed_id == id)
            .map(|(_, rect)| rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DoorId, &Rect)> {
        self.placed.iter().map(|(id, rect)| (id, rect))
    }

    pub fn ids(&self) -> impl Iterator<Item = &DoorId> {
        self.placed.iter().map(|(id, _)| id)
    }

    /// Pairs of doors closer than `padding` to each other. Empty for anything `Placer` returns.
    pub fn conflicts(&self, padding: Integer) -> Vec<(&DoorId, &DoorId)> {
        self.placed
            .iter()
            .tuple_combinations()
            .filter(|((_, a), (_, b))| a.overlaps_padded(b, padding))
            .map(|((a_id, _), (b_id, _))| (a_id, b_id))
            .collect()
    }

    fn push(&mut self, id: DoorId, rect: Rect) {
        self.placed.push((id, rect));
    }
}

impl IntoIterator for PlacementResult {
    type Item = (DoorId, Rect);
    type IntoIter = std::vec::IntoIter<(DoorId, Rect)>;

    fn into_iter(self) -> Self::IntoIter {
        self.placed.into_iter()
    }
}

#[derive(Clone, Debug)]
pub struct Placer {
    policy: SizingPolicy,
    canvas: Canvas,
    max_attempts_per_item: u64,
}

impl Placer {
    pub fn new(policy: SizingPolicy, canvas: Canvas, max_attempts_per_item: u64) -> Self {
        Self {
            policy,
            canvas,
            max_attempts_per_item,
        }
    }

    pub fn policy(&self) -> &SizingPolicy {
        &self.policy
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Doors with a size override come first, in override table order, then everything else in natural
    /// order. Duplicates are collapsed and the input order never matters.
    pub fn placement_order<I>(&self, ids: I) -> Vec<DoorId>
    where
        I: IntoIterator<Item = DoorId>,
    {
        let mut remaining: BTreeSet<DoorId> = ids.into_iter().collect();
        let mut order = Vec::with_capacity(remaining.len());
        for (id, _) in &self.policy.overrides {
            if remaining.remove(id) {
                order.push(id.clone());
            }
        }
        order.extend(remaining);
        order
    }

    /// Place every door in `ids`. Either all of them get a rectangle or the whole run fails; nothing placed
    /// before the failing door is returned.
    pub fn place<I, R>(&self, ids: I, rng: &mut R) -> Result<PlacementResult, PlacementError>
    where
        I: IntoIterator<Item = DoorId>,
        R: Rng + ?Sized,
    {
        if self.max_attempts_per_item == 0 {
            return Err(PlacementError::invalid_policy("attempt budget per door must be at least 1"));
        }
        let order = self.placement_order(ids);
        let with_generic_doors = order.iter().any(|id| self.policy.override_for(id).is_none());
        self.policy.validate(&self.canvas, with_generic_doors)?;

        let mut accepted: Vec<Rect> = Vec::with_capacity(order.len());
        let mut result = PlacementResult::default();
        for id in order {
            match self.place_one(&id, &accepted, rng) {
                Some((rect, attempts)) => {
                    tracing::debug!(
                        door = %id,
                        attempts,
                        left = rect.left,
                        top = rect.top,
                        width = rect.width,
                        height = rect.height,
                        "placed door"
                    );
                    accepted.push(rect);
                    result.push(id, rect);
                }
                None => {
                    tracing::warn!(door = %id, attempts = self.max_attempts_per_item, "door does not fit");
                    return Err(PlacementError::Unplaceable {
                        id,
                        attempts: self.max_attempts_per_item,
                    });
                }
            }
        }
        Ok(result)
    }

    fn candidate_size<R: Rng + ?Sized>(&self, id: &DoorId, rng: &mut R) -> Size {
        match self.policy.override_for(id) {
            Some(rule) => self.policy.resolve_override(rule),
            None => Size::new(
                rng.gen_range(self.policy.generic_width_range(&self.canvas)),
                rng.gen_range(self.policy.generic_height_range(&self.canvas)),
            ),
        }
    }

    /// Returns the accepted rectangle and the 1-based trial it was found on.
    fn place_one<R: Rng + ?Sized>(
        &self,
        id: &DoorId,
        accepted: &[Rect],
        rng: &mut R,
    ) -> Option<(Rect, u64)> {
        let edge = self.policy.edge_padding;
        for attempt in 1..=self.max_attempts_per_item {
            let size = self.candidate_size(id, rng);
            let left_max = self.canvas.width - size.width - edge;
            let top_max = self.canvas.height - size.height - edge;
            if left_max < edge || top_max < edge {
                tracing::trace!(door = %id, attempt, width = size.width, height = size.height, "too large for canvas");
                continue;
            }
            let candidate = Rect::new(
                rng.gen_range(edge..=left_max),
                rng.gen_range(edge..=top_max),
                size.width,
                size.height,
            );
            if accepted
                .iter()
                .all(|placed| !candidate.overlaps_padded(placed, self.policy.padding))
            {
                return Some((candidate, attempt));
            }
            tracing::trace!(door = %id, attempt, "overlaps a placed door");
        }
        None
    }
}

/// Place `ids` with `primary` as the largest door and `secondary` as the second largest.
pub fn place<I, R>(
    ids: I,
    policy: SizingPolicy,
    canvas: Canvas,
    primary: impl Into<DoorId>,
    secondary: impl Into<DoorId>,
    max_attempts_per_item: u64,
    rng: &mut R,
) -> Result<PlacementResult, PlacementError>
where
    I: IntoIterator<Item = DoorId>,
    R: Rng + ?Sized,
{
    let policy = policy.with_primary_secondary(primary, secondary);
    Placer::new(policy, canvas, max_attempts_per_item).place(ids, rng)
}

#[cfg(test)]
mod placement_order_tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<DoorId> {
        raw.iter().map(|id| DoorId::from(*id)).collect()
    }

    fn placer() -> Placer {
        Placer::new(
            SizingPolicy::default().with_primary_secondary("24", "6"),
            Canvas::default(),
            DEFAULT_MAX_ATTEMPTS_PER_ITEM,
        )
    }

    #[test]
    fn test_primary_then_secondary_then_ascending() {
        let order = placer().placement_order(ids(&["12", "6", "3", "24", "1"]));
        assert_eq!(ids(&["24", "6", "1", "3", "12"]), order);
    }

    #[test]
    fn test_missing_primary_is_skipped() {
        let order = placer().placement_order(ids(&["10", "6", "2"]));
        assert_eq!(ids(&["6", "2", "10"]), order);
    }

    #[test]
    fn test_duplicates_are_collapsed() {
        let order = placer().placement_order(ids(&["5", "5", "24"]));
        assert_eq!(ids(&["24", "5"]), order);
    }
}
