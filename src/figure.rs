//! The five reference figures.
//!
//! Each figure owns a parameter block whose defaults are the constants the
//! published figures were drawn with. The constants differ slightly between
//! figures (radius, sample count, opacity) and are kept as they are.

use crate::{
    arc::ArcSector,
    arrow::{Arrow2, Arrow3D, ArrowHead},
    cases::{CanonicalState, StateGlyph},
    ellipse::EllipseCurve,
    error::Error,
    palette,
    render::{RenderOptions, render_to_path, render_to_svg_string},
    scene::{Color, HAlign, Scene, Stroke, Text, VAlign},
    sphere::{CircularSphereDiagram, SphereDiagram, SphereSampling, SphereSector},
    state::PolarizationState,
    stokes::AxisOrder,
    view::View,
};
use nalgebra::{Point2, Point3, Vector2, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{io::Write, path::Path};
use tracing::debug;
use uom::si::angle::radian;

/// Opacity of the filled sectors on the sphere figures.
const SECTOR_ALPHA: f64 = 0.6;

/// Heads of the 2D axis arrows.
const AXIS_HEAD: ArrowHead = ArrowHead {
    width: 0.06,
    length: 0.10,
    overhang: 0.0,
};

/// Heads of the 3D axis and Stokes arrows, in world units.
const SPHERE_HEAD: ArrowHead = ArrowHead {
    width: 0.05,
    length: 0.08,
    overhang: 0.0,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FigureKind {
    Ellipse,
    Cases,
    Sphere,
    SphereCircular,
    Spherical,
}

impl FigureKind {
    pub const ALL: [FigureKind; 5] = [
        FigureKind::Ellipse,
        FigureKind::Cases,
        FigureKind::Sphere,
        FigureKind::SphereCircular,
        FigureKind::Spherical,
    ];

    /// File stem used when rendering a gallery.
    pub fn name(&self) -> &'static str {
        match self {
            FigureKind::Ellipse => "polarization_ellipse",
            FigureKind::Cases => "polarization_cases",
            FigureKind::Sphere => "polarization_sphere",
            FigureKind::SphereCircular => "polarization_sphere_circular",
            FigureKind::Spherical => "polarization_spherical",
        }
    }

    /// The figure with its reference parameters.
    pub fn default_figure(&self) -> Figure {
        match self {
            FigureKind::Ellipse => Figure::Ellipse(EllipseParams::default()),
            FigureKind::Cases => Figure::Cases(CasesParams::default()),
            FigureKind::Sphere => Figure::Sphere(SphereParams::linear()),
            FigureKind::SphereCircular => Figure::SphereCircular(SphereParams::circular()),
            FigureKind::Spherical => Figure::Spherical(SphericalParams::default()),
        }
    }

    /// Reads the parameter block of this kind of figure from JSON.
    ///
    /// Missing fields keep their reference values at every level, so
    /// `{"view": {"elev": 10.0}}` only changes the elevation.
    #[cfg(feature = "serde")]
    pub fn figure_from_json(&self, json: &str) -> Result<Figure, Error> {
        let overrides: serde_json::Value = serde_json::from_str(json)?;
        Ok(match self.default_figure() {
            Figure::Ellipse(params) => Figure::Ellipse(overlay(&params, overrides)?),
            Figure::Cases(params) => Figure::Cases(overlay(&params, overrides)?),
            Figure::Sphere(params) => Figure::Sphere(overlay(&params, overrides)?),
            Figure::SphereCircular(params) => {
                Figure::SphereCircular(overlay(&params, overrides)?)
            }
            Figure::Spherical(params) => Figure::Spherical(overlay(&params, overrides)?),
        })
    }

    /// The figure with parameters from the JSON file at `params`, or the
    /// reference figure when no file is given.
    #[cfg(feature = "serde")]
    pub fn load(&self, params: Option<&Path>) -> Result<Figure, Error> {
        let Some(path) = params else {
            return Ok(self.default_figure());
        };

        tracing::info!(path = %path.display(), "reading figure parameters");
        let json = std::fs::read_to_string(path)?;
        self.figure_from_json(&json)
    }
}

impl std::fmt::Display for FigureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FigureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FigureKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.name().trim_start_matches("polarization_") == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown figure: {s}")))
    }
}

/// Writes every field of `overrides` into `base`, descending into objects
/// present in both.
#[cfg(feature = "serde")]
fn merge_values(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_values(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, value) => *base = value,
    }
}

/// `defaults` with the fields present in `overrides` replaced.
#[cfg(feature = "serde")]
fn overlay<T>(defaults: &T, overrides: serde_json::Value) -> Result<T, Error>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut merged = serde_json::to_value(defaults)?;
    merge_values(&mut merged, overrides);
    Ok(serde_json::from_value(merged)?)
}

/// A figure together with its parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "figure", rename_all = "snake_case"))]
pub enum Figure {
    Ellipse(EllipseParams),
    Cases(CasesParams),
    Sphere(SphereParams),
    SphereCircular(SphereParams),
    Spherical(SphericalParams),
}

impl Figure {
    pub fn kind(&self) -> FigureKind {
        match self {
            Figure::Ellipse(_) => FigureKind::Ellipse,
            Figure::Cases(_) => FigureKind::Cases,
            Figure::Sphere(_) => FigureKind::Sphere,
            Figure::SphereCircular(_) => FigureKind::SphereCircular,
            Figure::Spherical(_) => FigureKind::Spherical,
        }
    }

    /// Lays the figure out in world units.
    pub fn scene(&self) -> Result<Scene, Error> {
        let scene = match self {
            Figure::Ellipse(params) => ellipse_scene(params)?,
            Figure::Cases(params) => cases_scene(params),
            Figure::Sphere(params) => sphere_scene(params)?,
            Figure::SphereCircular(params) => circular_sphere_scene(params)?,
            Figure::Spherical(params) => spherical_scene(params),
        };

        debug!(
            figure = self.kind().name(),
            primitives = scene.primitives().len(),
            "built scene"
        );
        Ok(scene)
    }

    /// Writes the figure to `output`, or as SVG to STDOUT when no path is
    /// given.
    pub fn render(&self, output: Option<&Path>) -> Result<(), Error> {
        let scene = self.scene()?;
        let options = self.render_options();

        match output {
            Some(path) => render_to_path(&scene, &options, path),
            None => {
                let svg = render_to_svg_string(&scene, &options)?;
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(svg.as_bytes())?;
                stdout.flush()?;
                Ok(())
            }
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        match self {
            Figure::Ellipse(params) => params.output,
            Figure::Cases(params) => params.output,
            Figure::Sphere(params) | Figure::SphereCircular(params) => params.output,
            Figure::Spherical(params) => params.output,
        }
    }
}

/// Parameters of the polarization ellipse figure.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EllipseParams {
    pub psi_deg: f64,
    pub chi_deg: f64,
    pub radius: f64,

    /// Samples around the ellipse; 61 gives 60 steps since 0 and 2 pi overlap.
    pub samples: usize,

    pub psi_arc_radius: f64,
    pub chi_arc_radius: f64,
    pub arc_samples: usize,

    /// Font size of the labels in pixels.
    pub font_size: u32,

    pub output: RenderOptions,
}

impl Default for EllipseParams {
    fn default() -> Self {
        Self {
            psi_deg: 40.0,
            chi_deg: 30.0,
            radius: 1.0,
            samples: 61,
            psi_arc_radius: 0.4,
            chi_arc_radius: 0.3,
            arc_samples: 10,
            font_size: 44,
            output: RenderOptions::new(310.0, 10),
        }
    }
}

/// Parameters of the six-panel basis cartoon.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CasesParams {
    pub glyph_radius: f64,
    pub glyph_head: ArrowHead,

    /// Distance between panel centres.
    pub panel_spacing: f64,

    /// Offset of the axis labels from the axis ends.
    pub label_offset: f64,

    pub font_size: u32,
    pub output: RenderOptions,
}

impl Default for CasesParams {
    fn default() -> Self {
        Self {
            glyph_radius: 0.8,
            glyph_head: ArrowHead::new(0.1, 0.15).with_overhang(0.25),
            panel_spacing: 2.6,
            label_offset: 0.05,
            font_size: 39,
            output: RenderOptions::new(130.0, 10),
        }
    }
}

/// Parameters shared by the linear and circular sphere figures.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SphereParams {
    /// Position angle of the drawn state; the sphere longitude is twice this.
    pub psi_deg: f64,

    /// Ellipticity angle of the drawn state; the sphere latitude is twice this.
    pub chi_deg: f64,

    pub view: View,
    pub axis_length: f64,
    pub sampling: SphereSampling,

    /// Draw the right-angle mark where the two sectors meet.
    pub right_angle: bool,

    pub font_size: u32,
    pub output: RenderOptions,
}

impl SphereParams {
    pub fn linear() -> Self {
        Self {
            psi_deg: 35.0,
            chi_deg: 25.0,
            view: View::new(25.0, 35.0, 0.0),
            axis_length: 1.5,
            sampling: SphereSampling::default(),
            right_angle: false,
            font_size: 29,
            output: RenderOptions::new(300.0, 0),
        }
    }

    pub fn circular() -> Self {
        Self {
            psi_deg: 30.0,
            chi_deg: 12.5,
            view: View::new(17.0, 25.0, 0.0),
            right_angle: true,
            ..Self::linear()
        }
    }

    pub fn state(&self) -> PolarizationState {
        PolarizationState::from_degrees(self.psi_deg, self.chi_deg)
    }
}

/// Parameters of the bare spherical frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SphericalParams {
    pub view: View,
    pub font_size: u32,
    pub output: RenderOptions,
}

impl Default for SphericalParams {
    fn default() -> Self {
        Self {
            view: View::new(30.0, 25.0, 0.0),
            font_size: 44,
            output: RenderOptions::new(300.0, 10),
        }
    }
}

/// Arrows along +X and +Y from -1 to 1 with their labels.
fn planar_axes(scene: &mut Scene, label_offset: (f64, f64), font_size: u32) {
    let stroke = Stroke::solid(palette::BLACK, 1);
    scene.arrow(
        Arrow2::new(Point2::new(-1.0, 0.0), Vector2::new(2.0, 0.0)),
        AXIS_HEAD,
        stroke,
    );
    scene.arrow(
        Arrow2::new(Point2::new(0.0, -1.0), Vector2::new(0.0, 2.0)),
        AXIS_HEAD,
        stroke,
    );
    scene.text(Text::new(Point2::new(1.0, label_offset.0), "x", font_size));
    scene.text(Text::new(Point2::new(label_offset.1, 1.0), "y", font_size));
}

fn sector(scene: &mut Scene, sector: &ArcSector, fill: Color, label: &str, font_size: u32) {
    scene.polygon(sector.polygon().to_vec(), fill);
    scene.polyline(sector.outline().to_vec(), Stroke::solid(palette::BLACK, 1));
    scene.text(Text::new(sector.label_anchor(), label, font_size));
}

fn ellipse_scene(params: &EllipseParams) -> Result<Scene, Error> {
    let state = PolarizationState::from_degrees(params.psi_deg, params.chi_deg);
    let psi = state.psi().get::<radian>();
    let chi = state.chi().get::<radian>();
    let curve = EllipseCurve::new(state, params.radius, params.samples)?;
    let line = |color| Stroke::solid(color, 3);

    let mut scene = Scene::new();
    planar_axes(&mut scene, (0.05, 0.03), params.font_size);

    scene.polyline(curve.points().to_vec(), line(palette::BLACK));
    scene.arrow(curve.handedness_arrow(), AXIS_HEAD, line(palette::BLACK));
    scene.polyline(curve.major_axis().to_vec(), line(palette::MAJOR));
    scene.polyline(curve.minor_axis().to_vec(), line(palette::MINOR));
    scene.polyline(curve.corner_chord().to_vec(), line(palette::BLACK));

    let psi_sector = ArcSector::new(
        Point2::origin(),
        0.0,
        psi,
        params.arc_samples,
        params.psi_arc_radius,
    )?;
    sector(&mut scene, &psi_sector, palette::PSI, "ψ", params.font_size);

    // The chi sector hangs off the major axis endpoint in the third quadrant.
    let [corner, _] = curve.corner_chord();
    let chi_sector = ArcSector::new(
        corner,
        psi - chi,
        psi,
        params.arc_samples,
        params.chi_arc_radius,
    )?
    .with_label_offset(Vector2::new(0.02, 0.02));
    sector(&mut scene, &chi_sector, palette::CHI, "χ", params.font_size);

    Ok(scene)
}

fn cases_panel(state: CanonicalState, params: &CasesParams) -> Scene {
    let mut panel = Scene::new();
    planar_axes(
        &mut panel,
        (params.label_offset, params.label_offset),
        params.font_size,
    );
    panel.text(Text::new(
        Point2::new(1.0, 1.0),
        state.label(),
        params.font_size,
    ));

    let stroke = Stroke::solid(palette::CHI, 4);
    match StateGlyph::new(&state.state(), params.glyph_radius, &params.glyph_head) {
        StateGlyph::Linear { arrows } => {
            for arrow in arrows {
                panel.arrow(arrow, params.glyph_head, stroke);
            }
        }
        StateGlyph::Circular {
            center,
            radius,
            arrow,
        } => {
            panel.circle(center, radius, stroke);
            panel.arrow(arrow, params.glyph_head, stroke);
        }
    }

    panel
}

fn cases_scene(params: &CasesParams) -> Scene {
    let mut scene = Scene::new();
    for (i, state) in CanonicalState::ALL.into_iter().enumerate() {
        let (row, col) = (i / 2, i % 2);
        let offset = Vector2::new(
            col as f64 * params.panel_spacing,
            -(row as f64) * params.panel_spacing,
        );
        scene.append_translated(cases_panel(state, params), offset);
    }

    scene
}

fn project(view: &View, points: &[Point3<f64>]) -> Vec<Point2<f64>> {
    view.project_all(points)
}

/// Arrows along the display axes from the origin, the south pole tick and
/// the axis labels.
fn sphere_axes(scene: &mut Scene, params: &SphereParams, order: AxisOrder) {
    let view = &params.view;
    let stroke = Stroke::solid(palette::BLACK, 1);
    let length = params.axis_length;
    let stretch = 1.03;

    for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
        let arrow: Arrow2 = Arrow3D::from_origin(axis * length).project(view).into();
        scene.arrow(arrow, SPHERE_HEAD, stroke);
    }

    scene.polyline(
        project(
            view,
            &[Point3::new(0.0, 0.0, -1.1), Point3::new(0.0, 0.0, -0.9)],
        ),
        stroke,
    );

    let [x, y, z] = order.labels();
    scene.text(
        Text::new(
            view.project(&Point3::new(length * stretch, 0.0, 0.0)),
            x,
            params.font_size,
        )
        .align(HAlign::Right, VAlign::Bottom),
    );
    scene.text(Text::new(
        view.project(&Point3::new(0.0, length * stretch, 0.0)),
        y,
        params.font_size,
    ));
    scene.text(Text::new(
        view.project(&Point3::new(0.0, 0.0, length * stretch)),
        z,
        params.font_size,
    ));
}

fn sphere_sector(scene: &mut Scene, view: &View, sector: &SphereSector, fill: Color, edge: Color) {
    scene.polygon(
        project(view, sector.polygon()),
        fill.with_alpha(SECTOR_ALPHA),
    );
    scene.polyline(project(view, sector.outline()), Stroke::solid(edge, 1));
}

fn stokes_arrow(scene: &mut Scene, view: &View, tip: Point3<f64>, font_size: u32) {
    let arrow: Arrow2 = Arrow3D::from_origin(tip.coords).project(view).into();
    scene.arrow(arrow, SPHERE_HEAD, Stroke::solid(palette::BLACK, 3));
    scene.text(Text::new(view.project(&tip), "S", font_size).bold());
}

fn sphere_scene(params: &SphereParams) -> Result<Scene, Error> {
    let view = &params.view;
    let diagram = SphereDiagram::new(params.state().sphere_angles(), &params.sampling)?;
    let dotted = Stroke::dotted(palette::BLACK, 1);
    let label_index = params.sampling.sector_samples / 2;

    let mut scene = Scene::new();
    sphere_axes(&mut scene, params, AxisOrder::Linear);

    scene.polyline(project(view, diagram.equator()), dotted);
    sphere_sector(
        &mut scene,
        view,
        diagram.longitude_sector(),
        palette::PSI,
        palette::MAJOR,
    );
    scene.text(Text::new(
        view.project(&diagram.longitude_sector().label_anchor(label_index, 1.37)),
        "2ψ",
        params.font_size,
    ));

    scene.polyline(project(view, diagram.meridian()), dotted);
    sphere_sector(
        &mut scene,
        view,
        diagram.latitude_sector(),
        palette::CHI,
        palette::MINOR,
    );
    scene.text(
        Text::new(
            view.project(&diagram.latitude_sector().label_anchor(label_index, 1.24)),
            "2χ",
            params.font_size,
        )
        .align(HAlign::Center, VAlign::Bottom),
    );

    if params.right_angle {
        for leg in diagram.right_angle().legs() {
            scene.polyline(project(view, leg), Stroke::solid(palette::BLACK, 1));
        }
    }

    stokes_arrow(&mut scene, view, diagram.stokes_tip(), params.font_size);
    Ok(scene)
}

fn circular_sphere_scene(params: &SphereParams) -> Result<Scene, Error> {
    let view = &params.view;
    let diagram = CircularSphereDiagram::new(params.state().sphere_angles(), &params.sampling)?;
    let solid = Stroke::solid(palette::BLACK, 1);
    let dotted = Stroke::dotted(palette::BLACK, 1);

    let mut scene = Scene::new();
    sphere_axes(&mut scene, params, AxisOrder::Circular);

    scene.polyline(project(view, diagram.equator()), dotted);
    scene.polyline(project(view, diagram.longitude_arc()), solid);
    let at = diagram.longitude_arc()[8];
    scene.text(
        Text::new(
            view.project(&Point3::new(1.05 * at.x, 1.05 * at.y, -0.05)),
            "2ψ",
            params.font_size,
        )
        .align(HAlign::Left, VAlign::Top),
    );

    sphere_sector(
        &mut scene,
        view,
        diagram.xi_sector(),
        palette::PSI,
        palette::MAJOR,
    );
    scene.text(
        Text::new(
            view.project(&diagram.xi_sector().label_anchor(7, 1.05)),
            "2ξ",
            params.font_size,
        )
        .align(HAlign::Right, VAlign::Bottom),
    );

    scene.polyline(project(view, diagram.meridian()), dotted);
    scene.polyline(project(view, diagram.colatitude_arc()), solid);
    scene.text(Text::new(
        view.project(&(diagram.colatitude_arc()[8] * 1.1)),
        "θ",
        params.font_size,
    ));

    sphere_sector(
        &mut scene,
        view,
        diagram.zeta_sector(),
        palette::CHI,
        palette::MINOR,
    );

    if params.right_angle {
        for leg in diagram.right_angle().legs() {
            scene.polyline(project(view, leg), solid);
        }
    }

    scene.text(Text::new(
        view.project(&diagram.zeta_sector().label_anchor(5, 1.1)),
        "2ζ",
        params.font_size,
    ));

    stokes_arrow(&mut scene, view, diagram.stokes_tip(), params.font_size);
    Ok(scene)
}

fn spherical_scene(params: &SphericalParams) -> Scene {
    let view = &params.view;
    let stroke = Stroke::solid(palette::BLACK, 1);

    let mut scene = Scene::new();
    for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
        let arrow: Arrow2 = Arrow3D::new(Point3::from(-axis), axis * 2.0)
            .project(view)
            .into();
        scene.arrow(arrow, SPHERE_HEAD, stroke);
    }

    let labels = [
        (Point3::new(1.01, -0.3, -0.1), "S₁"),
        (Point3::new(0.03, 1.01, 0.0), "S₂"),
        (Point3::new(0.03, 0.0, 1.01), "S₃"),
    ];
    for (at, label) in labels {
        scene.text(Text::new(view.project(&at), label, params.font_size));
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Primitive;
    use rstest::rstest;

    fn fills(scene: &Scene) -> Vec<Color> {
        scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Polygon { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect()
    }

    fn texts(scene: &Scene) -> Vec<String> {
        scene
            .primitives()
            .iter()
            .filter_map(|p| match p {
                Primitive::Text(text) => Some(text.content.clone()),
                _ => None,
            })
            .collect()
    }

    #[rstest]
    #[case(FigureKind::Ellipse)]
    #[case(FigureKind::Cases)]
    #[case(FigureKind::Sphere)]
    #[case(FigureKind::SphereCircular)]
    #[case(FigureKind::Spherical)]
    fn default_figures_have_finite_bounds(#[case] kind: FigureKind) {
        let scene = kind.default_figure().scene().expect("reference figure builds");
        let bounds = scene.bounds(0.003).expect("scene is not empty");
        assert!(bounds.width().is_finite() && bounds.width() > 0.0);
        assert!(bounds.height().is_finite() && bounds.height() > 0.0);
    }

    #[test]
    fn ellipse_uses_sector_palette() {
        let scene = FigureKind::Ellipse.default_figure().scene().expect("figure builds");
        assert_eq!(fills(&scene), vec![palette::PSI, palette::CHI]);
        assert_eq!(texts(&scene), vec!["x", "y", "ψ", "χ"]);
    }

    #[test]
    fn sphere_sectors_are_translucent() {
        let scene = FigureKind::Sphere.default_figure().scene().expect("figure builds");
        let fills = fills(&scene);
        assert_eq!(fills.len(), 2);
        assert!(fills.iter().all(|fill| fill.alpha == SECTOR_ALPHA));
    }

    #[test]
    fn circular_sphere_labels() {
        let scene = FigureKind::SphereCircular
            .default_figure()
            .scene()
            .expect("figure builds");
        insta::assert_debug_snapshot!(texts(&scene), @r###"
        [
            "S₂",
            "S₃",
            "S₁",
            "2ψ",
            "2ξ",
            "θ",
            "2ζ",
            "S",
        ]
        "###);
    }

    #[test]
    fn cases_has_six_panels() {
        let scene = FigureKind::Cases.default_figure().scene().expect("figure builds");
        let labels: Vec<String> = texts(&scene)
            .into_iter()
            .filter(|t| t != "x" && t != "y")
            .collect();
        assert_eq!(labels, vec!["+Q", "−Q", "+U", "−U", "+V", "−V"]);
        let circles = scene
            .primitives()
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
            .count();
        assert_eq!(circles, 2);
    }

    #[test]
    fn zero_ellipticity_sector_is_tolerated() {
        let figure = Figure::Ellipse(EllipseParams {
            chi_deg: 0.0,
            ..EllipseParams::default()
        });
        assert!(figure.scene().is_ok());
    }

    #[test]
    fn invalid_sample_count_is_reported() {
        let figure = Figure::Ellipse(EllipseParams {
            samples: 1,
            ..EllipseParams::default()
        });
        assert!(matches!(figure.scene(), Err(Error::InvalidInput(_))));
    }

    #[rstest]
    #[case("polarization_sphere_circular", FigureKind::SphereCircular)]
    #[case("cases", FigureKind::Cases)]
    fn parse_kind(#[case] name: &str, #[case] kind: FigureKind) {
        assert_eq!(name.parse::<FigureKind>().expect("known figure"), kind);
    }

    #[test]
    fn parse_unknown_kind() {
        assert!("hyperbola".parse::<FigureKind>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_reference_values() {
        let figure = FigureKind::SphereCircular
            .figure_from_json(r#"{ "psi_deg": 20.0 }"#)
            .expect("valid json");
        let Figure::SphereCircular(params) = figure else {
            panic!("wrong figure kind");
        };
        assert_eq!(params.psi_deg, 20.0);
        assert_eq!(params.chi_deg, 12.5);
        assert!(params.right_angle);

        let figure = FigureKind::Ellipse
            .figure_from_json(r#"{ "samples": 121 }"#)
            .expect("valid json");
        assert_eq!(
            figure,
            Figure::Ellipse(EllipseParams {
                samples: 121,
                ..EllipseParams::default()
            })
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn nested_json_keeps_sibling_fields() {
        let Figure::Ellipse(ellipse) = FigureKind::Ellipse
            .figure_from_json(r#"{ "output": { "padding": 0 } }"#)
            .expect("valid json")
        else {
            panic!("wrong figure kind");
        };
        assert_eq!(ellipse.output, RenderOptions::new(310.0, 0));

        let Figure::Sphere(sphere) = FigureKind::Sphere
            .figure_from_json(r#"{ "view": { "elev": 10.0 }, "sampling": { "sector_samples": 20 } }"#)
            .expect("valid json")
        else {
            panic!("wrong figure kind");
        };
        assert_eq!(sphere.view, View::new(10.0, 35.0, 0.0));
        assert_eq!(
            sphere.sampling,
            SphereSampling {
                sector_samples: 20,
                ..SphereSampling::default()
            }
        );

        let Figure::Cases(cases) = FigureKind::Cases
            .figure_from_json(r#"{ "glyph_head": { "overhang": 0.0 } }"#)
            .expect("valid json")
        else {
            panic!("wrong figure kind");
        };
        assert_eq!(cases.glyph_head, ArrowHead::new(0.1, 0.15));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn mistyped_field_is_a_config_error() {
        assert!(matches!(
            FigureKind::Spherical.figure_from_json(r#"{ "view": { "azim": "east" } }"#),
            Err(Error::Config(_))
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            FigureKind::Cases.figure_from_json("{ not json"),
            Err(Error::Config(_))
        ));
    }
}
