use crate::stokes::StokesVec;
use uom::si::{
    angle::{degree, radian},
    f64::Angle,
};

/// Rotation sense of the electric field vector as drawn in the figures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sense {
    Clockwise,
    CounterClockwise,
}

/// Describes the polarization ellipse by its position angle `psi` and its
/// ellipticity angle `chi`.
///
/// Both angles are conventionally on the range -90 to 90 degrees but this is
/// not enforced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarizationState {
    /// Orientation of the major axis with respect to +X.
    psi: Angle,

    /// Arctangent of the minor to major axis ratio.
    chi: Angle,
}

impl PolarizationState {
    pub fn new(psi: Angle, chi: Angle) -> Self {
        Self { psi, chi }
    }

    pub fn from_degrees(psi: f64, chi: f64) -> Self {
        Self::new(Angle::new::<degree>(psi), Angle::new::<degree>(chi))
    }

    pub fn psi(&self) -> Angle {
        self.psi
    }

    pub fn chi(&self) -> Angle {
        self.chi
    }

    /// Returns `true` if the state has no ellipticity.
    pub fn is_linear(&self) -> bool {
        self.chi.get::<radian>() == 0.0
    }

    /// Returns the rotation sense of the field vector, or `None` for linear
    /// polarization.
    ///
    /// Positive `chi` traces the ellipse clockwise in the figures.
    pub fn sense(&self) -> Option<Sense> {
        let chi = self.chi.get::<radian>();
        if chi > 0.0 {
            Some(Sense::Clockwise)
        } else if chi < 0.0 {
            Some(Sense::CounterClockwise)
        } else {
            None
        }
    }

    /// Location of the state on the Poincaré sphere, `(2 psi, 2 chi)`.
    pub fn sphere_angles(&self) -> SphereAngles {
        SphereAngles::new(self.psi * 2.0, self.chi * 2.0)
    }

    /// The Stokes vector of the state scaled to length `r`.
    pub fn stokes(&self, r: f64) -> StokesVec {
        StokesVec::from_sphere_angles(self.sphere_angles(), r)
    }
}

/// Longitude and latitude of a point on the Poincaré sphere.
///
/// Longitude is measured in the S1-S2 plane from +S1 and latitude from that
/// plane towards +S3.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereAngles {
    longitude: Angle,
    latitude: Angle,
}

impl SphereAngles {
    pub fn new(longitude: Angle, latitude: Angle) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    pub fn longitude(&self) -> Angle {
        self.longitude
    }

    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    /// Re-expresses the point with the circular-basis angles.
    ///
    /// `xi` is the polar angle measured from +S3 towards +S1 and `zeta` the
    /// elevation out of the S3-S1 plane towards +S2.
    pub fn circular(&self) -> CircularAngles {
        let lon = self.longitude.get::<radian>();
        let lat = self.latitude.get::<radian>();
        CircularAngles {
            xi: Angle::new::<radian>((lon.cos() * lat.cos()).atan2(lat.sin())),
            zeta: Angle::new::<radian>((lon.sin() * lat.cos()).asin()),
        }
    }
}

/// The `(xi, zeta)` pair locating a state relative to the circular basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircularAngles {
    xi: Angle,
    zeta: Angle,
}

impl CircularAngles {
    pub fn xi(&self) -> Angle {
        self.xi
    }

    pub fn zeta(&self) -> Angle {
        self.zeta
    }
}
