use crate::{error::Error, utils::linspace};
use nalgebra::{Point2, Vector2};

/// A filled "pie slice" used to annotate an angle.
///
/// The polygon is the apex followed by `samples` points on the arc, so it has
/// `samples + 1` vertices. A zero sweep collapses every arc point onto the
/// same location and the polygon has no area.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcSector {
    apex: Point2<f64>,
    polygon: Vec<Point2<f64>>,
    label_offset: Vector2<f64>,
}

impl ArcSector {
    /// Sweeps from `start` to `end` (radians) at `radius` around `apex`.
    pub fn new(
        apex: Point2<f64>,
        start: f64,
        end: f64,
        samples: usize,
        radius: f64,
    ) -> Result<Self, Error> {
        if samples < 2 {
            return Err(Error::InvalidInput(format!(
                "arc needs at least 2 samples but got {samples}"
            )));
        }

        let polygon = std::iter::once(apex)
            .chain(
                linspace(start, end, samples)
                    .into_iter()
                    .map(|theta| apex + Vector2::new(theta.cos(), theta.sin()) * radius),
            )
            .collect();

        Ok(Self {
            apex,
            polygon,
            label_offset: Vector2::zeros(),
        })
    }

    /// Shifts the label anchor by `offset` from the middle of the arc.
    pub fn with_label_offset(mut self, offset: Vector2<f64>) -> Self {
        self.label_offset = offset;
        self
    }

    pub fn apex(&self) -> Point2<f64> {
        self.apex
    }

    /// The apex followed by the arc samples.
    pub fn polygon(&self) -> &[Point2<f64>] {
        &self.polygon
    }

    /// The arc samples without the apex.
    pub fn outline(&self) -> &[Point2<f64>] {
        &self.polygon[1..]
    }

    /// Where to place the text naming the angle.
    ///
    /// This is the vertex half way along the polygon, counting the apex.
    pub fn label_anchor(&self) -> Point2<f64> {
        self.polygon[(self.polygon.len() - 1) / 2] + self.label_offset
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.polygon).abs()
    }
}

/// Shoelace area of a closed polygon, positive when counter-clockwise.
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();

    twice / 2.0
}
