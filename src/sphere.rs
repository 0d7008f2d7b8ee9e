//! Geometry of the Poincaré sphere figures.
//!
//! Everything here is expressed in display coordinates, the X, Y, Z axes of
//! the drawing. On the linear-basis sphere those are S1, S2, S3; on the
//! circular-basis sphere they are S2, S3, S1 (see [`AxisOrder`]).

use crate::{
    error::Error,
    state::SphereAngles,
    stokes::{AxisOrder, StokesVec},
    utils::linspace,
};
use nalgebra::{Point3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use tracing::debug;
use uom::si::angle::radian;

/// Three orthonormal directions spanning a great circle and its normal.
///
/// Angles in the plane are measured from `first` towards `second`, and
/// elevations out of the plane towards `normal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereBasis {
    pub first: Vector3<f64>,
    pub second: Vector3<f64>,
    pub normal: Vector3<f64>,
}

impl SphereBasis {
    /// The display XY plane, angles measured from +X.
    pub fn equatorial() -> Self {
        Self {
            first: Vector3::x(),
            second: Vector3::y(),
            normal: Vector3::z(),
        }
    }

    /// The display ZX plane, angles measured from +Z, rising towards +Y.
    pub fn polar() -> Self {
        Self {
            first: Vector3::z(),
            second: Vector3::x(),
            normal: Vector3::y(),
        }
    }

    /// Point at in-plane angle `theta` and elevation `elevation`.
    pub fn point(&self, theta: f64, elevation: f64, radius: f64) -> Point3<f64> {
        Point3::from(
            (self.first * theta.cos() * elevation.cos()
                + self.second * theta.sin() * elevation.cos()
                + self.normal * elevation.sin())
                * radius,
        )
    }

    /// `samples` points along the great circle from `start` to `end`.
    pub fn arc(&self, start: f64, end: f64, samples: usize, radius: f64) -> Vec<Point3<f64>> {
        linspace(start, end, samples)
            .into_iter()
            .map(|theta| self.point(theta, 0.0, radius))
            .collect()
    }

    /// `samples` points along the meridian at `theta` for elevations from
    /// `start` to `end`.
    pub fn meridian(
        &self,
        theta: f64,
        start: f64,
        end: f64,
        samples: usize,
        radius: f64,
    ) -> Vec<Point3<f64>> {
        linspace(start, end, samples)
            .into_iter()
            .map(|elevation| self.point(theta, elevation, radius))
            .collect()
    }
}

/// A flat angular sector with its apex at the sphere's centre.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereSector {
    polygon: Vec<Point3<f64>>,
}

impl SphereSector {
    fn from_arc(arc: Vec<Point3<f64>>) -> Self {
        Self {
            polygon: std::iter::once(Point3::origin()).chain(arc).collect(),
        }
    }

    /// The apex followed by the arc samples.
    pub fn polygon(&self) -> &[Point3<f64>] {
        &self.polygon
    }

    /// The arc samples without the apex.
    pub fn outline(&self) -> &[Point3<f64>] {
        &self.polygon[1..]
    }

    /// Polygon vertex `index`, counting the apex, pushed out by `stretch`.
    ///
    /// An `index` past the last vertex is clamped to the last vertex.
    pub fn label_anchor(&self, index: usize, stretch: f64) -> Point3<f64> {
        let last = self.polygon.len() - 1;
        if index > last {
            debug!(index, last, "sector label index clamped to last vertex");
        }

        self.polygon[index.min(last)] * stretch
    }
}

/// Two short legs marking the right angle between an arc and the meridian
/// rising from its end.
#[derive(Clone, Debug, PartialEq)]
pub struct RightAngleMark {
    legs: [Vec<Point3<f64>>; 2],
}

impl RightAngleMark {
    /// Builds the mark at in-plane angle `theta` of `basis` with legs of
    /// angular length `offset`.
    ///
    /// The first leg runs parallel to the arc at elevation `offset`, the
    /// second parallel to the meridian at in-plane angle `theta - offset`.
    pub fn new(basis: &SphereBasis, theta: f64, offset: f64, samples: usize) -> Self {
        let along_arc = linspace(theta - offset, theta, samples)
            .into_iter()
            .map(|a| {
                Point3::from(
                    basis.first * a.cos()
                        + basis.second * offset.cos() * a.sin()
                        + basis.normal * offset.sin(),
                )
            })
            .collect();
        let along_meridian = linspace(0.0, offset, samples)
            .into_iter()
            .map(|a| {
                Point3::from(
                    basis.first * (theta - offset).cos() * a.cos()
                        + basis.second * (theta - offset).sin() * a.cos()
                        + basis.normal * a.sin(),
                )
            })
            .collect();

        Self {
            legs: [along_arc, along_meridian],
        }
    }

    pub fn legs(&self) -> &[Vec<Point3<f64>>; 2] {
        &self.legs
    }
}

/// Sampling constants shared by the sphere figures.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphereSampling {
    /// Samples along each annotated sector.
    pub sector_samples: usize,

    /// Radius of the annotated sectors.
    pub sector_radius: f64,

    /// Samples along the dotted equator and meridian.
    pub guide_samples: usize,

    /// Length of the drawn Stokes vector.
    pub stokes_length: f64,

    /// Angular size of the right-angle mark, in radians.
    pub mark_offset: f64,

    /// Samples along each leg of the right-angle mark.
    pub mark_samples: usize,
}

impl Default for SphereSampling {
    fn default() -> Self {
        Self {
            sector_samples: 10,
            sector_radius: 1.0,
            guide_samples: 100,
            stokes_length: 1.8,
            mark_offset: 0.07,
            mark_samples: 10,
        }
    }
}

impl SphereSampling {
    fn validate(&self) -> Result<(), Error> {
        if self.sector_samples < 2 || self.guide_samples < 2 || self.mark_samples < 2 {
            return Err(Error::InvalidInput(
                "sphere curves need at least 2 samples".into(),
            ));
        }

        if self.sector_radius.is_nan() || self.sector_radius <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "sector radius must be positive but got {}",
                self.sector_radius
            )));
        }

        Ok(())
    }
}

/// The linear-basis sphere: the Stokes vector with its longitude and
/// latitude sectors.
#[derive(Clone, Debug, PartialEq)]
pub struct SphereDiagram {
    angles: SphereAngles,
    stokes_tip: Point3<f64>,
    equator: Vec<Point3<f64>>,
    meridian: Vec<Point3<f64>>,
    longitude_sector: SphereSector,
    latitude_sector: SphereSector,
    right_angle: RightAngleMark,
}

impl SphereDiagram {
    pub fn new(angles: SphereAngles, sampling: &SphereSampling) -> Result<Self, Error> {
        sampling.validate()?;

        let lon = angles.longitude().get::<radian>();
        let lat = angles.latitude().get::<radian>();
        let basis = SphereBasis::equatorial();
        let radius = sampling.sector_radius;

        Ok(Self {
            angles,
            stokes_tip: AxisOrder::Linear.arrange(&StokesVec::from_sphere_angles(
                angles,
                sampling.stokes_length,
            )),
            equator: basis.arc(0.0, TAU, sampling.guide_samples, 1.0),
            meridian: basis.meridian(lon, -FRAC_PI_2, FRAC_PI_2, sampling.guide_samples, 1.0),
            longitude_sector: SphereSector::from_arc(basis.arc(
                0.0,
                lon,
                sampling.sector_samples,
                radius,
            )),
            latitude_sector: SphereSector::from_arc(basis.meridian(
                lon,
                0.0,
                lat,
                sampling.sector_samples,
                radius,
            )),
            right_angle: RightAngleMark::new(
                &basis,
                lon,
                sampling.mark_offset,
                sampling.mark_samples,
            ),
        })
    }

    pub fn angles(&self) -> &SphereAngles {
        &self.angles
    }

    /// End of the Stokes vector in display coordinates.
    pub fn stokes_tip(&self) -> Point3<f64> {
        self.stokes_tip
    }

    pub fn equator(&self) -> &[Point3<f64>] {
        &self.equator
    }

    /// Full meridian through the Stokes vector, pole to pole.
    pub fn meridian(&self) -> &[Point3<f64>] {
        &self.meridian
    }

    /// Sector in the equatorial plane from +S1 to the longitude `2 psi`.
    pub fn longitude_sector(&self) -> &SphereSector {
        &self.longitude_sector
    }

    /// Sector along the meridian from the equator to the latitude `2 chi`.
    pub fn latitude_sector(&self) -> &SphereSector {
        &self.latitude_sector
    }

    pub fn right_angle(&self) -> &RightAngleMark {
        &self.right_angle
    }
}

/// The circular-basis sphere, drawn with the axes ordered S2, S3, S1.
#[derive(Clone, Debug, PartialEq)]
pub struct CircularSphereDiagram {
    angles: SphereAngles,
    stokes_tip: Point3<f64>,
    equator: Vec<Point3<f64>>,
    longitude_arc: Vec<Point3<f64>>,
    meridian: Vec<Point3<f64>>,
    colatitude_arc: Vec<Point3<f64>>,
    xi_sector: SphereSector,
    zeta_sector: SphereSector,
    right_angle: RightAngleMark,
}

impl CircularSphereDiagram {
    /// Samples on the solid longitude and colatitude arcs.
    pub const ARC_SAMPLES: usize = 20;

    pub fn new(angles: SphereAngles, sampling: &SphereSampling) -> Result<Self, Error> {
        sampling.validate()?;

        let lon = angles.longitude().get::<radian>();
        let lat = angles.latitude().get::<radian>();
        let circular = angles.circular();
        let xi = circular.xi().get::<radian>();
        let zeta = circular.zeta().get::<radian>();
        let equatorial = SphereBasis::equatorial();
        let polar = SphereBasis::polar();
        let radius = sampling.sector_radius;

        Ok(Self {
            angles,
            stokes_tip: AxisOrder::Circular.arrange(&StokesVec::from_circular_angles(
                circular,
                sampling.stokes_length,
            )),
            equator: equatorial.arc(0.0, TAU, sampling.guide_samples, 1.0),
            longitude_arc: equatorial.arc(0.0, lon, Self::ARC_SAMPLES, 1.0),
            meridian: equatorial.meridian(
                lon,
                -FRAC_PI_2,
                FRAC_PI_2,
                sampling.guide_samples,
                1.0,
            ),
            colatitude_arc: equatorial.meridian(lon, lat, FRAC_PI_2, Self::ARC_SAMPLES, 1.0),
            xi_sector: SphereSector::from_arc(polar.arc(
                0.0,
                xi,
                sampling.sector_samples,
                radius,
            )),
            zeta_sector: SphereSector::from_arc(polar.meridian(
                xi,
                0.0,
                zeta,
                sampling.sector_samples,
                radius,
            )),
            right_angle: RightAngleMark::new(
                &polar,
                xi,
                sampling.mark_offset,
                sampling.mark_samples,
            ),
        })
    }

    pub fn angles(&self) -> &SphereAngles {
        &self.angles
    }

    /// End of the Stokes vector in display coordinates.
    pub fn stokes_tip(&self) -> Point3<f64> {
        self.stokes_tip
    }

    pub fn equator(&self) -> &[Point3<f64>] {
        &self.equator
    }

    /// Solid arc along the equator from +S2 to the longitude `2 psi`.
    pub fn longitude_arc(&self) -> &[Point3<f64>] {
        &self.longitude_arc
    }

    pub fn meridian(&self) -> &[Point3<f64>] {
        &self.meridian
    }

    /// Solid arc along the meridian from the Stokes vector to the pole.
    pub fn colatitude_arc(&self) -> &[Point3<f64>] {
        &self.colatitude_arc
    }

    /// Sector from +S1 towards +S2 through `2 xi`.
    pub fn xi_sector(&self) -> &SphereSector {
        &self.xi_sector
    }

    /// Sector from the end of the `xi` arc up to the Stokes vector.
    pub fn zeta_sector(&self) -> &SphereSector {
        &self.zeta_sector
    }

    pub fn right_angle(&self) -> &RightAngleMark {
        &self.right_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PolarizationState;
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;

    fn linear(psi: f64, chi: f64) -> SphereDiagram {
        SphereDiagram::new(
            PolarizationState::from_degrees(psi, chi).sphere_angles(),
            &SphereSampling::default(),
        )
        .expect("valid sampling")
    }

    fn circular(psi: f64, chi: f64) -> CircularSphereDiagram {
        CircularSphereDiagram::new(
            PolarizationState::from_degrees(psi, chi).sphere_angles(),
            &SphereSampling::default(),
        )
        .expect("valid sampling")
    }

    #[test]
    fn linear_sectors_end_under_stokes_vector() {
        let diagram = linear(35.0, 25.0);
        let tip = diagram.stokes_tip();
        let lat_end = *diagram.latitude_sector().outline().last().expect("non-empty");
        let lon_end = *diagram.longitude_sector().outline().last().expect("non-empty");

        // The latitude sector ends on the unit sphere under the Stokes vector.
        assert_relative_eq!((tip.coords / 1.8 - lat_end.coords).norm(), 0.0, epsilon = 1e-12);
        // The longitude sector ends where the latitude sector starts.
        assert_relative_eq!(
            (lon_end - diagram.latitude_sector().outline()[0]).norm(),
            0.0,
            epsilon = 1e-12
        );
        assert_eq!(diagram.longitude_sector().polygon().len(), 11);
        assert_eq!(diagram.equator().len(), 100);
    }

    #[test]
    fn circular_tip_matches_linear_tip() {
        let a = linear(30.0, 12.5).stokes_tip();
        let b = circular(30.0, 12.5).stokes_tip();
        assert_relative_eq!((a - b).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn circular_zeta_sector_ends_under_stokes_vector() {
        let diagram = circular(30.0, 12.5);
        let end = *diagram.zeta_sector().outline().last().expect("non-empty");
        assert_relative_eq!(
            (diagram.stokes_tip().coords / 1.8 - end.coords).norm(),
            0.0,
            epsilon = 1e-12
        );
        // The colatitude arc runs from the Stokes vector to the pole.
        let arc = diagram.colatitude_arc();
        assert_eq!(arc.len(), CircularSphereDiagram::ARC_SAMPLES);
        assert_relative_eq!((arc[0] - end).norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(arc[arc.len() - 1].z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn circular_mark_matches_reference_formula() {
        let diagram = circular(30.0, 12.5);
        let xi = diagram.angles().circular().xi().get::<radian>();
        let d: f64 = 0.07;
        let [along_arc, along_meridian] = diagram.right_angle().legs();

        let first = along_arc[0];
        assert_relative_eq!(first.x, d.cos() * (xi - d).sin(), epsilon = 1e-12);
        assert_relative_eq!(first.y, d.sin(), epsilon = 1e-12);
        assert_relative_eq!(first.z, (xi - d).cos(), epsilon = 1e-12);

        let last = along_meridian[9];
        assert_relative_eq!(last.x, (xi - d).sin() * d.cos(), epsilon = 1e-12);
        assert_relative_eq!(last.y, d.sin(), epsilon = 1e-12);
        assert_relative_eq!(last.z, (xi - d).cos() * d.cos(), epsilon = 1e-12);
    }

    #[test]
    fn label_index_past_end_uses_last_vertex() {
        let sampling = SphereSampling {
            sector_samples: 4,
            ..SphereSampling::default()
        };
        let diagram = SphereDiagram::new(
            PolarizationState::from_degrees(35.0, 25.0).sphere_angles(),
            &sampling,
        )
        .expect("valid sampling");

        let sector = diagram.longitude_sector();
        let last = *sector.polygon().last().expect("sector has vertices");
        assert_eq!(sector.label_anchor(5, 1.37), last * 1.37);
        assert_eq!(sector.label_anchor(4, 1.0), last);
    }

    #[test]
    fn invalid_sampling() {
        let sampling = SphereSampling {
            sector_samples: 1,
            ..SphereSampling::default()
        };
        assert!(
            SphereDiagram::new(
                PolarizationState::from_degrees(35.0, 25.0).sphere_angles(),
                &sampling
            )
            .is_err()
        );
    }

    quickcheck! {
        fn sector_points_on_sphere(psi_seed: i16, chi_seed: i16) -> bool {
            let psi = psi_seed as f64 * 90.0 / i16::MAX as f64;
            let chi = chi_seed as f64 * 45.0 / i16::MAX as f64;
            let diagram = linear(psi, chi);
            diagram
                .longitude_sector()
                .outline()
                .iter()
                .chain(diagram.latitude_sector().outline())
                .chain(diagram.meridian())
                .all(|p| (p.coords.norm() - 1.0).abs() < 1e-12)
        }
    }
}
