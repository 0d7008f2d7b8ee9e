use nalgebra::{Matrix3, Point2, Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orthographic camera looking at the origin.
///
/// The camera sits at azimuth `azim` from +X in the XY plane and elevation
/// `elev` above it, then rolls by `roll` about its line of sight. All angles
/// are in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct View {
    pub elev: f64,
    pub azim: f64,
    pub roll: f64,
}

impl View {
    pub fn new(elev: f64, azim: f64, roll: f64) -> Self {
        Self { elev, azim, roll }
    }

    /// Rows are the screen right, screen up and eye directions.
    pub fn matrix(&self) -> Matrix3<f64> {
        let (sin_e, cos_e) = self.elev.to_radians().sin_cos();
        let (sin_a, cos_a) = self.azim.to_radians().sin_cos();
        let (sin_r, cos_r) = self.roll.to_radians().sin_cos();

        let eye = Vector3::new(cos_e * cos_a, cos_e * sin_a, sin_e);
        let right = Vector3::new(-sin_a, cos_a, 0.0);
        let up = Vector3::new(-sin_e * cos_a, -sin_e * sin_a, cos_e);

        // Rolling the camera turns the scene the other way on screen.
        let rolled_right = right * cos_r + up * sin_r;
        let rolled_up = up * cos_r - right * sin_r;

        Matrix3::from_rows(&[
            rolled_right.transpose(),
            rolled_up.transpose(),
            eye.transpose(),
        ])
    }

    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        let screen = self.matrix() * point.coords;
        Point2::new(screen.x, screen.y)
    }

    /// Signed distance of `point` towards the camera.
    pub fn depth(&self, point: &Point3<f64>) -> f64 {
        (self.matrix() * point.coords).z
    }

    pub fn project_all(&self, points: &[Point3<f64>]) -> Vec<Point2<f64>> {
        let matrix = self.matrix();
        points
            .iter()
            .map(|point| {
                let screen = matrix * point.coords;
                Point2::new(screen.x, screen.y)
            })
            .collect()
    }
}
