use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::door_id::DoorId;
use crate::error::PlacementError;
use crate::geometry::{Canvas, Integer, Size};

/// Upper bound for every size, padding and canvas dimension. Keeps all coordinate sums far inside `i64`.
pub const MAX_DIMENSION: Integer = 1 << 31;

/// A size rule for a specific door that replaces the random draw.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SizeOverride {
    /// `max - n` on each axis, never smaller than the policy minimum. `BelowMaximum(0)` is the largest door.
    BelowMaximum(Integer),

    Fixed { width: Integer, height: Integer },
}

/// Size ranges and clearances shared by every door in a run.
///
/// `overrides` doubles as the placement priority: doors listed there are placed first, in table order,
/// before any door that draws a random size.
#[derive(Derivative, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
pub struct SizingPolicy {
    #[derivative(Default(value = "6"))]
    pub min_width: Integer,

    #[derivative(Default(value = "18"))]
    pub max_width: Integer,

    #[derivative(Default(value = "8"))]
    pub min_height: Integer,

    #[derivative(Default(value = "18"))]
    pub max_height: Integer,

    /// Minimal gap between two doors.
    #[derivative(Default(value = "2"))]
    pub padding: Integer,

    /// Minimal gap between a door and the canvas border.
    #[derivative(Default(value = "2"))]
    pub edge_padding: Integer,

    /// How much smaller than the maximum a door without an override may get, so overridden doors stay
    /// visibly the largest.
    #[derivative(Default(value = "2"))]
    pub generic_shrink: Integer,

    pub overrides: Vec<(DoorId, SizeOverride)>,
}

impl SizingPolicy {
    /// Add or replace the rule for `id`. A new id goes to the end of the priority order, an existing one
    /// keeps its position.
    pub fn with_override(mut self, id: impl Into<DoorId>, rule: SizeOverride) -> Self {
        let id = id.into();
        match self.overrides.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, existing_rule)) => *existing_rule = rule,
            None => self.overrides.push((id, rule)),
        }
        self
    }

    /// The largest door goes to `primary`, the second largest to `secondary`. Both move to the front of the
    /// priority order, ahead of any override already in the table. When both name the same door it keeps the
    /// largest size.
    pub fn with_primary_secondary(mut self, primary: impl Into<DoorId>, secondary: impl Into<DoorId>) -> Self {
        let primary = primary.into();
        let secondary = secondary.into();
        self.overrides
            .retain(|(existing, _)| *existing != primary && *existing != secondary);
        if secondary != primary {
            self.overrides.insert(0, (secondary, SizeOverride::BelowMaximum(1)));
        }
        self.overrides.insert(0, (primary, SizeOverride::BelowMaximum(0)));
        self
    }

    pub fn override_for(&self, id: &DoorId) -> Option<SizeOverride> {
        self.overrides
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, rule)| *rule)
    }

    pub fn resolve_override(&self, rule: SizeOverride) -> Size {
        match rule {
            SizeOverride::BelowMaximum(n) => Size::new(
                self.min_width.max(self.max_width - n),
                self.min_height.max(self.max_height - n),
            ),
            SizeOverride::Fixed { width, height } => Size::new(width, height),
        }
    }

    /// Widths a door without an override may draw from. Can be empty, see `validate`.
    pub fn generic_width_range(&self, canvas: &Canvas) -> RangeInclusive<Integer> {
        let shrunk_max = self.min_width.max(self.max_width - self.generic_shrink);
        self.min_width..=shrunk_max.min(canvas.width - 2 * self.edge_padding)
    }

    pub fn generic_height_range(&self, canvas: &Canvas) -> RangeInclusive<Integer> {
        let shrunk_max = self.min_height.max(self.max_height - self.generic_shrink);
        self.min_height..=shrunk_max.min(canvas.height - 2 * self.edge_padding)
    }

    /// Reject configurations that cannot be sampled. `with_generic_doors` says whether any door will draw a
    /// random size; only then does an empty generic range matter.
    pub fn validate(&self, canvas: &Canvas, with_generic_doors: bool) -> Result<(), PlacementError> {
        let dimensions = [
            ("canvas width", canvas.width),
            ("canvas height", canvas.height),
            ("min_width", self.min_width),
            ("max_width", self.max_width),
            ("min_height", self.min_height),
            ("max_height", self.max_height),
            ("padding", self.padding),
            ("edge padding", self.edge_padding),
            ("generic shrink", self.generic_shrink),
        ];
        for (name, value) in dimensions {
            check_dimension(name, value)?;
        }
        for (id, rule) in &self.overrides {
            match *rule {
                SizeOverride::BelowMaximum(n) => check_dimension(&format!("override for door {}", id), n)?,
                SizeOverride::Fixed { width, height } => {
                    check_dimension(&format!("override width for door {}", id), width)?;
                    check_dimension(&format!("override height for door {}", id), height)?;
                }
            }
        }
        if self.min_width > self.max_width {
            return Err(PlacementError::invalid_policy(format!(
                "min_width {} > max_width {}",
                self.min_width, self.max_width
            )));
        }
        if self.min_height > self.max_height {
            return Err(PlacementError::invalid_policy(format!(
                "min_height {} > max_height {}",
                self.min_height, self.max_height
            )));
        }
        if with_generic_doors {
            let largest_below_maximum = self
                .overrides
                .iter()
                .filter_map(|(_, rule)| match rule {
                    SizeOverride::BelowMaximum(n) => Some(*n),
                    SizeOverride::Fixed { .. } => None,
                })
                .max();
            if let Some(n) = largest_below_maximum {
                if self.generic_shrink <= n {
                    return Err(PlacementError::invalid_policy(format!(
                        "generic shrink {} must exceed {} so other doors stay smaller than every overridden door",
                        self.generic_shrink, n
                    )));
                }
            }
            let widths = self.generic_width_range(canvas);
            if widths.is_empty() {
                return Err(PlacementError::invalid_policy(format!(
                    "no door width fits: range {}..={} is empty on a canvas {} wide with edge padding {}",
                    widths.start(),
                    widths.end(),
                    canvas.width,
                    self.edge_padding
                )));
            }
            let heights = self.generic_height_range(canvas);
            if heights.is_empty() {
                return Err(PlacementError::invalid_policy(format!(
                    "no door height fits: range {}..={} is empty on a canvas {} high with edge padding {}",
                    heights.start(),
                    heights.end(),
                    canvas.height,
                    self.edge_padding
                )));
            }
        }
        Ok(())
    }
}

fn check_dimension(name: &str, value: Integer) -> Result<(), PlacementError> {
    if (0..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(PlacementError::invalid_policy(format!(
            "{} {} is outside 0..={}",
            name, value, MAX_DIMENSION
        )))
    }
}
