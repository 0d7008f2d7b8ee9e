use crate::state::{CircularAngles, SphereAngles};
use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::angle::radian;

/// The polarized part `(S1, S2, S3)` of a Stokes vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StokesVec {
    inner: Vector3<f64>,
}

impl StokesVec {
    pub fn new(s1: f64, s2: f64, s3: f64) -> Self {
        Self {
            inner: Vector3::new(s1, s2, s3),
        }
    }

    /// Point on the sphere of radius `r` at `angles`.
    pub fn from_sphere_angles(angles: SphereAngles, r: f64) -> Self {
        let lon = angles.longitude().get::<radian>();
        let lat = angles.latitude().get::<radian>();
        Self::new(
            r * lon.cos() * lat.cos(),
            r * lon.sin() * lat.cos(),
            r * lat.sin(),
        )
    }

    /// Point on the sphere of radius `r` at the circular-basis `angles`.
    ///
    /// The components follow the same formula as [`StokesVec::from_sphere_angles`]
    /// with `(xi, zeta)` in place of `(longitude, latitude)`, so they are
    /// only meaningful once arranged with [`AxisOrder::Circular`].
    pub fn from_circular_angles(angles: CircularAngles, r: f64) -> Self {
        let xi = angles.xi().get::<radian>();
        let zeta = angles.zeta().get::<radian>();
        Self::new(
            r * xi.cos() * zeta.cos(),
            r * xi.sin() * zeta.cos(),
            r * zeta.sin(),
        )
    }

    pub fn s1(&self) -> f64 {
        self.inner.x
    }

    pub fn s2(&self) -> f64 {
        self.inner.y
    }

    pub fn s3(&self) -> f64 {
        self.inner.z
    }

    pub fn magnitude(&self) -> f64 {
        self.inner.norm()
    }
}

/// Assignment of the Stokes components to the displayed X, Y, Z axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AxisOrder {
    /// X, Y, Z show S1, S2, S3.
    Linear,
    /// X, Y, Z show S2, S3, S1.
    Circular,
}

impl AxisOrder {
    /// Labels of the displayed X, Y, Z axes.
    pub fn labels(&self) -> [&'static str; 3] {
        match self {
            AxisOrder::Linear => ["S₁", "S₂", "S₃"],
            AxisOrder::Circular => ["S₂", "S₃", "S₁"],
        }
    }

    /// Places `stokes` in display coordinates.
    pub fn arrange(&self, stokes: &StokesVec) -> Point3<f64> {
        match self {
            AxisOrder::Linear => Point3::new(stokes.s1(), stokes.s2(), stokes.s3()),
            AxisOrder::Circular => Point3::new(stokes.s2(), stokes.s3(), stokes.s1()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PolarizationState;
    use approx::assert_relative_eq;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    fn degrees(seed: i16, span: f64) -> f64 {
        seed as f64 * span / i16::MAX as f64
    }

    #[quickcheck]
    fn stokes_on_sphere(psi_seed: i16, chi_seed: i16) -> bool {
        let state = PolarizationState::from_degrees(degrees(psi_seed, 90.0), degrees(chi_seed, 45.0));
        (state.stokes(1.8).magnitude() - 1.8).abs() < 1e-12
    }

    #[quickcheck]
    fn circular_display_matches_linear(psi_seed: i16, chi_seed: i16) -> bool {
        let state = PolarizationState::from_degrees(degrees(psi_seed, 90.0), degrees(chi_seed, 45.0));
        let angles = state.sphere_angles();
        let linear = AxisOrder::Linear.arrange(&StokesVec::from_sphere_angles(angles, 1.0));
        let circular = AxisOrder::Circular
            .arrange(&StokesVec::from_circular_angles(angles.circular(), 1.0));
        (linear - circular).norm() < 1e-9
    }

    #[rstest]
    #[case(0.0, 0.0, [1.0, 0.0, 0.0])]
    #[case(45.0, 0.0, [0.0, 1.0, 0.0])]
    #[case(90.0, 0.0, [-1.0, 0.0, 0.0])]
    #[case(45.0, 45.0, [0.0, 0.0, 1.0])]
    #[case(-45.0, -45.0, [0.0, 0.0, -1.0])]
    fn canonical_stokes(#[case] psi: f64, #[case] chi: f64, #[case] expected: [f64; 3]) {
        let stokes = PolarizationState::from_degrees(psi, chi).stokes(1.0);
        assert_relative_eq!(stokes.s1(), expected[0], epsilon = 1e-12);
        assert_relative_eq!(stokes.s2(), expected[1], epsilon = 1e-12);
        assert_relative_eq!(stokes.s3(), expected[2], epsilon = 1e-12);
    }

    #[test]
    fn circular_axis_labels() {
        insta::assert_debug_snapshot!(AxisOrder::Circular.labels(), @r###"
        [
            "S₂",
            "S₃",
            "S₁",
        ]
        "###);
    }
}
