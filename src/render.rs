//! Rasterizes and vectorizes scenes with plotters.
//!
//! World coordinates grow up and to the right. The canvas is the tight box
//! around the scene scaled by [`RenderOptions::pixels_per_unit`] plus a
//! fixed margin of [`RenderOptions::padding`] pixels.

use crate::{
    error::Error,
    scene::{Bounds, Color, HAlign, Primitive, Scene, Stroke, Text, VAlign},
};
use nalgebra::Point2;
use plotters::{
    coord::Shift,
    prelude::*,
    style::{
        register_font,
        text_anchor::{HPos, Pos, VPos},
    },
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{path::Path, sync::OnceLock};
use tracing::{debug, info, warn};

/// Family the labels are drawn in.
const FONT_FAMILY: &str = "sans-serif";

static SANS: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static SANS_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Largest canvas side in pixels.
pub const MAX_CANVAS_PX: u32 = 1 << 15;

/// Length of one dash of a dotted line in pixels.
const DASH_PX: f64 = 2.0;

/// Gap between dashes of a dotted line in pixels.
const GAP_PX: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderOptions {
    pub pixels_per_unit: f64,

    /// Margin around the scene in pixels.
    pub padding: u32,
}

impl RenderOptions {
    pub fn new(pixels_per_unit: f64, padding: u32) -> Self {
        Self {
            pixels_per_unit,
            padding,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new(300.0, 10)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Raster,
}

impl OutputFormat {
    /// Picks the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" | "bmp" | "jpg" | "jpeg" => Ok(OutputFormat::Raster),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// An RGB8 image held in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,

    /// Row-major RGB triples.
    pub pixels: Vec<u8>,
}

/// Registers the embedded label fonts with plotters once per process.
fn register_fonts() -> Result<(), Error> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();

    let registered = *REGISTERED.get_or_init(|| {
        register_font(FONT_FAMILY, FontStyle::Normal, SANS).is_ok()
            && register_font(FONT_FAMILY, FontStyle::Bold, SANS_BOLD).is_ok()
    });

    match registered {
        true => Ok(()),
        false => Err(Error::Render("embedded label font is not a valid font".into())),
    }
}

/// Maps world coordinates onto the canvas.
#[derive(Clone, Copy, Debug)]
struct Canvas {
    bounds: Bounds,
    pixels_per_unit: f64,
    padding: u32,
}

impl Canvas {
    fn fit(scene: &Scene, options: &RenderOptions) -> Result<Self, Error> {
        if !(options.pixels_per_unit.is_finite() && options.pixels_per_unit > 0.0) {
            return Err(Error::InvalidInput(format!(
                "pixels per unit must be positive but got {}",
                options.pixels_per_unit
            )));
        }

        let bounds = scene
            .bounds(1.0 / options.pixels_per_unit)
            .ok_or_else(|| Error::InvalidInput("scene has nothing to draw".into()))?;

        if !(bounds.width().is_finite() && bounds.height().is_finite()) {
            return Err(Error::InvalidInput("scene bounds are not finite".into()));
        }

        Ok(Self {
            bounds,
            pixels_per_unit: options.pixels_per_unit,
            padding: options.padding,
        })
    }

    /// Canvas width and height in pixels.
    ///
    /// Fails when either side would exceed [`MAX_CANVAS_PX`].
    fn size(&self) -> Result<(u32, u32), Error> {
        let too_large = || {
            Error::InvalidInput(format!(
                "canvas exceeds {MAX_CANVAS_PX} px per side at {} px per unit with {} px padding",
                self.pixels_per_unit, self.padding
            ))
        };

        let side = |units: f64| {
            let extent = (units * self.pixels_per_unit).ceil().max(1.0);
            if extent > MAX_CANVAS_PX as f64 {
                return Err(too_large());
            }

            self.padding
                .checked_mul(2)
                .and_then(|margin| (extent as u32).checked_add(margin))
                .filter(|side| *side <= MAX_CANVAS_PX)
                .ok_or_else(&too_large)
        };

        Ok((side(self.bounds.width())?, side(self.bounds.height())?))
    }

    fn pixel(&self, point: &Point2<f64>) -> (i32, i32) {
        let padding = self.padding as f64;
        let x = (point.x - self.bounds.min.x) * self.pixels_per_unit + padding;
        let y = (self.bounds.max.y - point.y) * self.pixels_per_unit + padding;
        (x.round() as i32, y.round() as i32)
    }

    fn pixels(&self, points: &[Point2<f64>]) -> Vec<(i32, i32)> {
        points.iter().map(|p| self.pixel(p)).collect()
    }
}

/// Splits a polyline into dashes of length `on` separated by gaps of
/// length `off`, measured along the line.
pub fn dashes(points: &[Point2<f64>], on: f64, off: f64) -> Vec<Vec<Point2<f64>>> {
    let mut dashes = Vec::new();
    if points.len() < 2 || on <= 0.0 || off < 0.0 {
        return dashes;
    }

    let mut current = vec![points[0]];
    let mut drawing = true;
    let mut left = on;

    for window in points.windows(2) {
        let (mut from, to) = (window[0], window[1]);
        let mut remaining = (to - from).norm();

        while remaining > left {
            let step = from + (to - from).normalize() * left;
            if drawing {
                current.push(step);
                dashes.push(std::mem::take(&mut current));
            } else {
                current = vec![step];
            }

            remaining -= left;
            from = step;
            drawing = !drawing;
            left = if drawing { on } else { off };
        }

        left -= remaining;
        if drawing {
            current.push(to);
        }
    }

    if drawing && current.len() > 1 {
        dashes.push(current);
    }

    dashes
}

fn rgba(color: &Color) -> RGBAColor {
    RGBAColor(color.r, color.g, color.b, color.alpha)
}

fn line_style(stroke: &Stroke) -> ShapeStyle {
    ShapeStyle {
        color: rgba(&stroke.color),
        filled: false,
        stroke_width: stroke.width,
    }
}

fn fill_style(color: &Color) -> ShapeStyle {
    ShapeStyle {
        color: rgba(color),
        filled: true,
        stroke_width: 0,
    }
}

fn text_pos(text: &Text) -> Pos {
    let h = match text.halign {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match text.valign {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    Pos::new(h, v)
}

fn render_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

fn draw_polyline<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    points: &[Point2<f64>],
    stroke: &Stroke,
) -> Result<(), Error> {
    let style = line_style(stroke);
    if !stroke.dotted {
        return area
            .draw(&PathElement::new(canvas.pixels(points), style))
            .map_err(render_error);
    }

    let units_per_pixel = 1.0 / canvas.pixels_per_unit;
    for dash in dashes(points, DASH_PX * units_per_pixel, GAP_PX * units_per_pixel) {
        area.draw(&PathElement::new(canvas.pixels(&dash), style))
            .map_err(render_error)?;
    }

    Ok(())
}

fn draw_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    text: &Text,
) {
    let font = match text.bold {
        true => ("sans-serif", text.size as f64, FontStyle::Bold).into_font(),
        false => ("sans-serif", text.size as f64).into_font(),
    };
    let style = font
        .into_text_style(area)
        .color(&BLACK)
        .pos(text_pos(text));

    if let Err(e) = area.draw_text(&text.content, &style, canvas.pixel(&text.anchor)) {
        warn!(text = %text.content, "could not draw label: {e}");
    }
}

fn draw_scene<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    scene: &Scene,
) -> Result<(), Error> {
    for primitive in scene.primitives() {
        match primitive {
            Primitive::Polyline { points, stroke } => {
                draw_polyline(area, canvas, points, stroke)?;
            }
            Primitive::Polygon { points, fill } => {
                area.draw(&Polygon::new(canvas.pixels(points), fill_style(fill)))
                    .map_err(render_error)?;
            }
            Primitive::Arrow {
                arrow,
                head,
                stroke,
            } => {
                let shaft = arrow.shaft(head);
                draw_polyline(area, canvas, &[shaft.start, shaft.end], stroke)?;
                if let Some(polygon) = arrow.head_polygon(head) {
                    area.draw(&Polygon::new(
                        canvas.pixels(&polygon),
                        fill_style(&stroke.color),
                    ))
                    .map_err(render_error)?;
                }
            }
            Primitive::Circle {
                center,
                radius,
                stroke,
            } => {
                let radius = (radius * canvas.pixels_per_unit).round() as i32;
                area.draw(&Circle::new(
                    canvas.pixel(center),
                    radius,
                    line_style(stroke),
                ))
                .map_err(render_error)?;
            }
            Primitive::Text(text) => draw_text(area, canvas, text),
        }
    }

    area.present().map_err(render_error)
}

/// Renders `scene` as an SVG document.
pub fn render_to_svg_string(scene: &Scene, options: &RenderOptions) -> Result<String, Error> {
    register_fonts()?;
    let canvas = Canvas::fit(scene, options)?;
    let size = canvas.size()?;
    debug!(width = size.0, height = size.1, "rendering svg");

    let mut svg = String::new();
    {
        let area = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_scene(&area, &canvas, scene)?;
    }

    Ok(svg)
}

/// Renders `scene` onto a white RGB canvas.
pub fn render_to_raster(scene: &Scene, options: &RenderOptions) -> Result<Raster, Error> {
    register_fonts()?;
    let canvas = Canvas::fit(scene, options)?;
    let (width, height) = canvas.size()?;
    debug!(width, height, "rendering raster");

    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let area = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        area.fill(&WHITE).map_err(render_error)?;
        draw_scene(&area, &canvas, scene)?;
    }

    Ok(Raster {
        width,
        height,
        pixels,
    })
}

/// Writes `scene` to `path`, choosing vector or raster output from the
/// file extension.
pub fn render_to_path(scene: &Scene, options: &RenderOptions, path: &Path) -> Result<(), Error> {
    let format = OutputFormat::from_path(path)?;
    register_fonts()?;
    let canvas = Canvas::fit(scene, options)?;
    let size = canvas.size()?;

    match format {
        OutputFormat::Svg => {
            let area = SVGBackend::new(path, size).into_drawing_area();
            draw_scene(&area, &canvas, scene)?;
        }
        OutputFormat::Raster => {
            let area = BitMapBackend::new(path, size).into_drawing_area();
            area.fill(&WHITE).map_err(render_error)?;
            draw_scene(&area, &canvas, scene)?;
        }
    }

    info!(
        path = %path.display(),
        width = size.0,
        height = size.1,
        "wrote figure"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{palette, scene::Stroke};
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::path::PathBuf;

    fn square() -> Scene {
        let mut scene = Scene::new();
        scene.polygon(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            palette::MAJOR,
        );
        scene
    }

    #[rstest]
    #[case("figure.svg", Some(OutputFormat::Svg))]
    #[case("figure.PNG", Some(OutputFormat::Raster))]
    #[case("figure.jpeg", Some(OutputFormat::Raster))]
    #[case("figure.pdf", None)]
    #[case("figure", None)]
    fn format_from_extension(#[case] path: &str, #[case] expected: Option<OutputFormat>) {
        assert_eq!(OutputFormat::from_path(&PathBuf::from(path)).ok(), expected);
    }

    #[test]
    fn canvas_is_tight_with_padding() {
        let canvas = Canvas::fit(&square(), &RenderOptions::new(100.0, 5)).expect("fits");
        assert_eq!(canvas.size().expect("small canvas"), (110, 110));
        assert_eq!(canvas.pixel(&Point2::new(0.0, 1.0)), (5, 5));
        assert_eq!(canvas.pixel(&Point2::new(1.0, 0.0)), (105, 105));
    }

    #[rstest]
    #[case(1e10, 10)]
    #[case(1e5, 0)]
    #[case(100.0, u32::MAX)]
    #[case(100.0, MAX_CANVAS_PX / 2)]
    fn oversized_canvas_is_rejected(#[case] pixels_per_unit: f64, #[case] padding: u32) {
        let options = RenderOptions::new(pixels_per_unit, padding);
        assert!(matches!(
            render_to_svg_string(&square(), &options),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            render_to_raster(&square(), &options),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn largest_canvas_fits() {
        let options = RenderOptions::new((MAX_CANVAS_PX - 2) as f64, 1);
        let canvas = Canvas::fit(&square(), &options).expect("fits");
        assert_eq!(canvas.size().expect("at the limit"), (MAX_CANVAS_PX, MAX_CANVAS_PX));
    }

    #[test]
    fn raster_draws_label_glyphs() {
        let mut scene = Scene::new();
        scene.text(Text::new(Point2::origin(), "ψχ", 40));
        scene.text(Text::new(Point2::new(0.0, -0.5), "S", 40).bold());

        let raster = render_to_raster(&scene, &RenderOptions::new(100.0, 10)).expect("renders");
        let dark = raster
            .pixels
            .chunks_exact(3)
            .filter(|rgb| rgb.iter().all(|c| *c < 96))
            .count();
        assert!(dark > 20, "only {dark} dark pixels");
    }

    #[test]
    fn empty_scene_is_rejected() {
        assert!(matches!(
            render_to_svg_string(&Scene::new(), &RenderOptions::default()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn dashes_alternate() {
        let line = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let dashes = dashes(&line, 2.0, 3.0);
        assert_eq!(dashes.len(), 2);
        assert_relative_eq!(dashes[0][0].x, 0.0);
        assert_relative_eq!(dashes[0].last().expect("dash").x, 2.0);
        assert_relative_eq!(dashes[1][0].x, 5.0);
        assert_relative_eq!(dashes[1].last().expect("dash").x, 7.0);
    }

    #[test]
    fn dashes_follow_corners() {
        let line = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        let dashes = dashes(&line, 1.5, 10.0);
        assert_eq!(dashes.len(), 1);
        assert_eq!(dashes[0].len(), 3);
        assert_relative_eq!(dashes[0][2].y, 0.5);
    }

    #[test]
    fn raster_fills_polygon() {
        let raster = render_to_raster(&square(), &RenderOptions::new(20.0, 2)).expect("renders");
        assert_eq!((raster.width, raster.height), (24, 24));

        let at = |x: u32, y: u32| {
            let i = ((y * raster.width + x) * 3) as usize;
            [raster.pixels[i], raster.pixels[i + 1], raster.pixels[i + 2]]
        };
        assert_eq!(at(0, 0), [255, 255, 255]);
        assert_eq!(at(12, 12), [0xf0, 0x50, 0x39]);
    }

    #[test]
    fn svg_carries_stroke_colour() {
        let mut scene = square();
        scene.polyline(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)],
            Stroke::solid(palette::MINOR, 2),
        );
        let svg = render_to_svg_string(&scene, &RenderOptions::default()).expect("renders");
        assert!(svg.contains("<svg"));
        assert!(svg.to_uppercase().contains("#1F449C"));
    }
}
