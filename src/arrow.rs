use crate::view::View;
use nalgebra::{Point2, Point3, Vector2, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of an arrowhead in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrowHead {
    /// Full width across the base of the head.
    pub width: f64,

    /// Distance from the base of the head to the tip.
    pub length: f64,

    /// Fraction of `length` by which the back of the head is swept forward.
    ///
    /// Zero gives a triangle.
    pub overhang: f64,
}

impl ArrowHead {
    pub fn new(width: f64, length: f64) -> Self {
        Self {
            width,
            length,
            overhang: 0.0,
        }
    }

    pub fn with_overhang(mut self, overhang: f64) -> Self {
        self.overhang = overhang;
        self
    }
}

/// A straight 2D segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment2 {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

/// A 2D arrow from `origin` to `origin + direction`.
///
/// The head is included in the length, so the tip lands exactly on
/// `origin + direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow2 {
    origin: Point2<f64>,
    direction: Vector2<f64>,
}

impl Arrow2 {
    pub fn new(origin: Point2<f64>, direction: Vector2<f64>) -> Self {
        Self { origin, direction }
    }

    pub fn between(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self::new(start, end - start)
    }

    pub fn origin(&self) -> Point2<f64> {
        self.origin
    }

    pub fn direction(&self) -> Vector2<f64> {
        self.direction
    }

    pub fn tip(&self) -> Point2<f64> {
        self.origin + self.direction
    }

    pub fn translate(&self, offset: Vector2<f64>) -> Self {
        Self::new(self.origin + offset, self.direction)
    }

    /// The line drawn behind the head.
    ///
    /// A head longer than the arrow swallows the shaft entirely.
    pub fn shaft(&self, head: &ArrowHead) -> Segment2 {
        let length = self.direction.norm();
        if length <= head.length || length == 0.0 {
            return Segment2 {
                start: self.origin,
                end: self.origin,
            };
        }

        let unit = self.direction / length;
        let back = self.tip() - unit * head.length * (1.0 - head.overhang);
        Segment2 {
            start: self.origin,
            end: back,
        }
    }

    /// Outline of the head, starting at the tip.
    ///
    /// Returns `None` for a zero-length arrow since it has no direction.
    pub fn head_polygon(&self, head: &ArrowHead) -> Option<Vec<Point2<f64>>> {
        let length = self.direction.norm();
        if length == 0.0 {
            return None;
        }

        let unit = self.direction / length;
        let normal = Vector2::new(-unit.y, unit.x);
        let tip = self.tip();
        let base = tip - unit * head.length;
        let left = base + normal * head.width / 2.0;
        let right = base - normal * head.width / 2.0;

        if head.overhang == 0.0 {
            return Some(vec![tip, left, right]);
        }

        let back = base + unit * head.length * head.overhang;
        Some(vec![tip, left, back, right])
    }
}

/// A 3D arrow from `origin` along `direction`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow3D {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Arrow3D {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    pub fn from_origin(direction: Vector3<f64>) -> Self {
        Self::new(Point3::origin(), direction)
    }

    /// Projects the arrow onto the screen of `view`.
    pub fn project(&self, view: &View) -> Segment2 {
        Segment2 {
            start: view.project(&self.origin),
            end: view.project(&(self.origin + self.direction)),
        }
    }
}

impl From<Segment2> for Arrow2 {
    fn from(segment: Segment2) -> Self {
        Arrow2::between(segment.start, segment.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn head_includes_tip() {
        let arrow = Arrow2::new(Point2::new(-1.0, 0.0), Vector2::new(2.0, 0.0));
        let polygon = arrow
            .head_polygon(&ArrowHead::new(0.06, 0.10))
            .expect("arrow has a direction");
        assert_eq!(polygon[0], Point2::new(1.0, 0.0));
        assert_relative_eq!(polygon[1].x, 0.9, epsilon = 1e-12);
        assert_relative_eq!(polygon[1].y, 0.03, epsilon = 1e-12);
        assert_relative_eq!(polygon[2].y, -0.03, epsilon = 1e-12);
    }

    #[test]
    fn overhang_sweeps_back() {
        let arrow = Arrow2::new(Point2::origin(), Vector2::new(0.0, 1.0));
        let head = ArrowHead::new(0.1, 0.15).with_overhang(0.25);
        let polygon = arrow.head_polygon(&head).expect("arrow has a direction");
        assert_eq!(polygon.len(), 4);
        assert_relative_eq!(polygon[2].y, 1.0 - 0.15 + 0.15 * 0.25, epsilon = 1e-12);
        assert_relative_eq!(arrow.shaft(&head).end.y, polygon[2].y, epsilon = 1e-12);
    }

    #[rstest]
    #[case(Vector2::new(0.0, 0.0))]
    #[case(Vector2::new(0.05, 0.0))]
    fn short_arrow_has_no_shaft(#[case] direction: Vector2<f64>) {
        let arrow = Arrow2::new(Point2::new(0.3, 0.3), direction);
        let shaft = arrow.shaft(&ArrowHead::new(0.1, 0.15));
        assert_eq!(shaft.start, shaft.end);
    }

    #[test]
    fn zero_arrow_has_no_head() {
        let arrow = Arrow2::new(Point2::origin(), Vector2::zeros());
        assert_eq!(arrow.head_polygon(&ArrowHead::new(0.1, 0.1)), None);
    }
}
