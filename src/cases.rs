use crate::{
    arrow::{Arrow2, ArrowHead},
    state::PolarizationState,
    utils::sign,
};
use nalgebra::{Point2, Vector2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uom::si::angle::radian;

/// The six states spanning the linear and circular bases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CanonicalState {
    PlusQ,
    MinusQ,
    PlusU,
    MinusU,
    PlusV,
    MinusV,
}

impl CanonicalState {
    /// All states in panel order, row by row.
    pub const ALL: [CanonicalState; 6] = [
        CanonicalState::PlusQ,
        CanonicalState::MinusQ,
        CanonicalState::PlusU,
        CanonicalState::MinusU,
        CanonicalState::PlusV,
        CanonicalState::MinusV,
    ];

    /// Position and ellipticity angles in degrees.
    pub fn degrees(&self) -> (f64, f64) {
        match self {
            CanonicalState::PlusQ => (0.0, 0.0),
            CanonicalState::MinusQ => (90.0, 0.0),
            CanonicalState::PlusU => (45.0, 0.0),
            CanonicalState::MinusU => (-45.0, 0.0),
            CanonicalState::PlusV => (45.0, 45.0),
            CanonicalState::MinusV => (-45.0, -45.0),
        }
    }

    pub fn state(&self) -> PolarizationState {
        let (psi, chi) = self.degrees();
        PolarizationState::from_degrees(psi, chi)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CanonicalState::PlusQ => "+Q",
            CanonicalState::MinusQ => "−Q",
            CanonicalState::PlusU => "+U",
            CanonicalState::MinusU => "−U",
            CanonicalState::PlusV => "+V",
            CanonicalState::MinusV => "−V",
        }
    }
}

/// How a state is drawn in the basis cartoon.
#[derive(Clone, Debug, PartialEq)]
pub enum StateGlyph {
    /// A double-headed arrow along the oscillation axis.
    Linear { arrows: [Arrow2; 2] },

    /// A circle with one tangential arrowhead giving the rotation sense.
    Circular {
        center: Point2<f64>,
        radius: f64,
        arrow: Arrow2,
    },
}

impl StateGlyph {
    /// Builds the glyph of `state` with radius `radius`.
    ///
    /// For elliptical states the arrow starts on the circle at the position
    /// angle and is offset by `0.5 * head.length * (sin psi, -cos psi) * sign(chi)`.
    pub fn new(state: &PolarizationState, radius: f64, head: &ArrowHead) -> Self {
        let (sin_psi, cos_psi) = state.psi().get::<radian>().sin_cos();
        let tip = Vector2::new(radius * cos_psi, radius * sin_psi);

        if state.is_linear() {
            return StateGlyph::Linear {
                arrows: [
                    Arrow2::new(Point2::origin(), tip),
                    Arrow2::new(Point2::origin(), -tip),
                ],
            };
        }

        let chi_sign = sign(state.chi().get::<radian>());
        StateGlyph::Circular {
            center: Point2::origin(),
            radius,
            arrow: Arrow2::new(
                Point2::from(tip),
                Vector2::new(sin_psi, -cos_psi) * 0.5 * head.length * chi_sign,
            ),
        }
    }
}
