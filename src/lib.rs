// #![warn(missing_docs)]

//! Polarization State Diagrams
//!
//! Geometry and rendering for the polarization ellipse, the Poincaré sphere
//! in its linear and circular bases, and the six-state basis cartoon.

#[allow(missing_docs)]
pub mod error;

pub mod arc;
pub mod arrow;
pub mod cases;
pub mod ellipse;
pub mod figure;
pub mod palette;
pub mod render;
pub mod scene;
pub mod sphere;
pub mod state;
pub mod stokes;
pub mod view;

mod utils;

pub mod prelude {
    pub use crate::{
        error::Error,
        figure::{Figure, FigureKind},
        render::{RenderOptions, render_to_path, render_to_raster, render_to_svg_string},
        state::PolarizationState,
    };
}
