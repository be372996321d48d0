use serde::{Deserialize, Serialize};

pub type Integer = i64;

/// The fixed region every door has to fit into. Units are whatever the layout uses; the calendar front end
/// reads them as percentages of the stage.
#[derive(Derivative, Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[derivative(Default)]
pub struct Canvas {
    #[derivative(Default(value = "100"))]
    pub width: Integer,

    #[derivative(Default(value = "100"))]
    pub height: Integer,
}

impl Canvas {
    pub fn new(width: Integer, height: Integer) -> Self {
        Self { width, height }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: Integer,
    pub height: Integer,
}

impl Size {
    pub fn new(width: Integer, height: Integer) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner. `right` and `bottom` are exclusive.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: Integer,
    pub top: Integer,
    pub width: Integer,
    pub height: Integer,
}

impl Rect {
    pub fn new(left: Integer, top: Integer, width: Integer, height: Integer) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> Integer {
        self.left + self.width
    }

    pub fn bottom(&self) -> Integer {
        self.top + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Two rectangles overlap unless they are at least `padding` apart on one of the two axes.
    pub fn overlaps_padded(&self, other: &Rect, padding: Integer) -> bool {
        !(self.right() + padding <= other.left
            || other.right() + padding <= self.left
            || self.bottom() + padding <= other.top
            || other.bottom() + padding <= self.top)
    }

    /// Does this rectangle keep at least `edge_padding` away from every border of `canvas`.
    pub fn fits_within(&self, canvas: &Canvas, edge_padding: Integer) -> bool {
        self.left >= edge_padding
            && self.top >= edge_padding
            && self.right() <= canvas.width - edge_padding
            && self.bottom() <= canvas.height - edge_padding
    }
}

#[cfg(test)]
mod overlaps_padded_tests {
    use super::*;

    #[test]
    fn test_exactly_padding_apart_horizontally_does_not_overlap() {
        let a = Rect::new(2, 2, 10, 10);
        let b = Rect::new(14, 2, 10, 10);
        assert!(!a.overlaps_padded(&b, 2));
        assert!(!b.overlaps_padded(&a, 2));
    }

    #[test]
    fn test_one_unit_short_of_padding_overlaps() {
        let a = Rect::new(2, 2, 10, 10);
        let b = Rect::new(13, 2, 10, 10);
        assert!(a.overlaps_padded(&b, 2));
        assert!(b.overlaps_padded(&a, 2));
    }

    #[test]
    fn test_separation_on_one_axis_is_enough() {
        // Same columns, but far apart vertically.
        let a = Rect::new(10, 2, 10, 10);
        let b = Rect::new(12, 40, 10, 10);
        assert!(!a.overlaps_padded(&b, 2));
    }

    #[test]
    fn test_zero_padding_allows_touching() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(5, 0, 5, 5);
        assert!(!a.overlaps_padded(&b, 0));
        assert!(a.overlaps_padded(&b, 1));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(10, 10, 30, 30);
        let inner = Rect::new(15, 15, 5, 5);
        assert!(outer.overlaps_padded(&inner, 0));
        assert!(inner.overlaps_padded(&outer, 0));
    }
}

#[cfg(test)]
mod fits_within_tests {
    use super::*;

    #[test]
    fn test_rect_touching_margin_fits() {
        let canvas = Canvas::default();
        assert!(Rect::new(2, 2, 96, 96).fits_within(&canvas, 2));
    }

    #[test]
    fn test_rect_inside_margin_does_not_fit() {
        let canvas = Canvas::default();
        assert!(!Rect::new(1, 2, 10, 10).fits_within(&canvas, 2));
        assert!(!Rect::new(2, 2, 97, 10).fits_within(&canvas, 2));
        assert!(!Rect::new(2, 90, 10, 9).fits_within(&canvas, 2));
    }
}
