//! Sampling of the polarization ellipse.
//!
//! In the frame of the ellipse's own axes the field vector traces
//!
//! ```text
//! x' = r cos(chi) sin(phi)
//! y' = r sin(chi) cos(phi)
//! ```
//!
//! and the figure frame is reached by rotating through the position angle
//! `psi`. The major axis therefore lies at `phi = pi/2, 3pi/2` and the minor
//! axis at `phi = 0, pi`.

use crate::{arrow::Arrow2, error::Error, state::PolarizationState, utils::linspace};
use nalgebra::{Point2, Vector2};
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use uom::si::angle::radian;

/// `N` samples of a polarization ellipse over one full period.
#[derive(Clone, Debug, PartialEq)]
pub struct EllipseCurve {
    state: PolarizationState,
    radius: f64,
    points: Vec<Point2<f64>>,
}

impl EllipseCurve {
    /// Samples the ellipse of `state` at `samples` evenly spaced parameter
    /// values over [0, 2 pi].
    ///
    /// Returns an error if `samples` is less than two or `radius` is not
    /// positive.
    pub fn new(state: PolarizationState, radius: f64, samples: usize) -> Result<Self, Error> {
        if samples < 2 {
            return Err(Error::InvalidInput(format!(
                "ellipse needs at least 2 samples but got {samples}"
            )));
        }

        if radius.is_nan() || radius <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "ellipse radius must be positive but got {radius}"
            )));
        }

        let mut curve = Self {
            state,
            radius,
            points: Vec::with_capacity(samples),
        };
        curve.points = linspace(0.0, TAU, samples)
            .into_iter()
            .map(|phi| curve.point_at(phi))
            .collect();

        Ok(curve)
    }

    pub fn state(&self) -> &PolarizationState {
        &self.state
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Evaluates the curve at parameter `phi`.
    pub fn point_at(&self, phi: f64) -> Point2<f64> {
        let (x, y) = self.unrotated(phi);
        let (sin_psi, cos_psi) = self.state.psi().get::<radian>().sin_cos();
        Point2::new(x * cos_psi - y * sin_psi, x * sin_psi + y * cos_psi)
    }

    /// Derivative of the curve with respect to `phi`.
    pub fn tangent_at(&self, phi: f64) -> Vector2<f64> {
        let (sin_chi, cos_chi) = self.state.chi().get::<radian>().sin_cos();
        let (sin_psi, cos_psi) = self.state.psi().get::<radian>().sin_cos();
        let dx = self.radius * cos_chi * phi.cos();
        let dy = -self.radius * sin_chi * phi.sin();
        Vector2::new(dx * cos_psi - dy * sin_psi, dx * sin_psi + dy * cos_psi)
    }

    /// Endpoints of the major axis at `phi = pi/2` and `phi = 3pi/2`.
    pub fn major_axis(&self) -> [Point2<f64>; 2] {
        [self.point_at(FRAC_PI_2), self.point_at(3.0 * FRAC_PI_2)]
    }

    /// Endpoints of the minor axis at `phi = 0` and `phi = pi`.
    pub fn minor_axis(&self) -> [Point2<f64>; 2] {
        [self.point_at(0.0), self.point_at(PI)]
    }

    /// Chord from the major axis endpoint at `phi = 3pi/2` to the minor axis
    /// endpoint at `phi = pi`.
    pub fn corner_chord(&self) -> [Point2<f64>; 2] {
        [self.point_at(3.0 * FRAC_PI_2), self.point_at(PI)]
    }

    /// Arrow along the chord from sample `N / 8` to the next sample.
    ///
    /// It points along increasing `phi` and sits on the drawn curve roughly
    /// one eighth of the way around.
    pub fn handedness_arrow(&self) -> Arrow2 {
        let q = self.points.len() / 8;
        Arrow2::between(self.points[q], self.points[q + 1])
    }

    /// Signed area enclosed by the samples.
    ///
    /// Negative when the curve is traced clockwise.
    pub fn signed_area(&self) -> f64 {
        crate::arc::signed_area(&self.points)
    }

    fn unrotated(&self, phi: f64) -> (f64, f64) {
        let (sin_chi, cos_chi) = self.state.chi().get::<radian>().sin_cos();
        (
            self.radius * cos_chi * phi.sin(),
            self.radius * sin_chi * phi.cos(),
        )
    }
}
