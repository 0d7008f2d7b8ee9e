//! Styled 2D primitives in world units.
//!
//! Figures build a [`Scene`] from geometry, then [`crate::render`] maps world
//! units onto pixels. Primitives are drawn in insertion order.

use crate::arrow::{Arrow2, ArrowHead};
use nalgebra::{Point2, Vector2};

/// An sRGB colour with opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Parses `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,

    /// Line width in pixels.
    pub width: u32,

    pub dotted: bool,
}

impl Stroke {
    pub fn solid(color: Color, width: u32) -> Self {
        Self {
            color,
            width,
            dotted: false,
        }
    }

    pub fn dotted(color: Color, width: u32) -> Self {
        Self {
            color,
            width,
            dotted: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub anchor: Point2<f64>,
    pub content: String,

    /// Font size in pixels.
    pub size: u32,

    pub halign: HAlign,
    pub valign: VAlign,
    pub bold: bool,
}

impl Text {
    /// Left and bottom aligned text at `anchor`.
    pub fn new(anchor: Point2<f64>, content: impl Into<String>, size: u32) -> Self {
        Self {
            anchor,
            content: content.into(),
            size,
            halign: HAlign::Left,
            valign: VAlign::Bottom,
            bold: false,
        }
    }

    pub fn align(mut self, halign: HAlign, valign: VAlign) -> Self {
        self.halign = halign;
        self.valign = valign;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Approximate box covered by the text when one pixel spans
    /// `units_per_pixel` world units.
    pub fn extent(&self, units_per_pixel: f64) -> (Point2<f64>, Point2<f64>) {
        let height = self.size as f64 * units_per_pixel;
        let width = self.content.chars().count() as f64 * 0.6 * height;
        let left = match self.halign {
            HAlign::Left => self.anchor.x,
            HAlign::Center => self.anchor.x - width / 2.0,
            HAlign::Right => self.anchor.x - width,
        };
        let bottom = match self.valign {
            VAlign::Bottom => self.anchor.y,
            VAlign::Center => self.anchor.y - height / 2.0,
            VAlign::Top => self.anchor.y - height,
        };

        (
            Point2::new(left, bottom),
            Point2::new(left + width, bottom + height),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Polyline {
        points: Vec<Point2<f64>>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point2<f64>>,
        fill: Color,
    },
    Arrow {
        arrow: Arrow2,
        head: ArrowHead,
        stroke: Stroke,
    },
    Circle {
        center: Point2<f64>,
        radius: f64,
        stroke: Stroke,
    },
    Text(Text),
}

impl Primitive {
    fn translate(&mut self, offset: Vector2<f64>) {
        match self {
            Primitive::Polyline { points, .. } | Primitive::Polygon { points, .. } => {
                points.iter_mut().for_each(|p| *p += offset)
            }
            Primitive::Arrow { arrow, .. } => *arrow = arrow.translate(offset),
            Primitive::Circle { center, .. } => *center += offset,
            Primitive::Text(text) => text.anchor += offset,
        }
    }
}

/// Axis aligned box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds {
    fn around(point: Point2<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    fn include(&mut self, point: Point2<f64>) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Grows the box by `margin` on every side.
    pub fn padded(&self, margin: f64) -> Self {
        let pad = Vector2::new(margin, margin);
        Self {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

/// An ordered list of primitives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn polyline(&mut self, points: Vec<Point2<f64>>, stroke: Stroke) {
        self.push(Primitive::Polyline { points, stroke });
    }

    pub fn polygon(&mut self, points: Vec<Point2<f64>>, fill: Color) {
        self.push(Primitive::Polygon { points, fill });
    }

    pub fn arrow(&mut self, arrow: Arrow2, head: ArrowHead, stroke: Stroke) {
        self.push(Primitive::Arrow {
            arrow,
            head,
            stroke,
        });
    }

    pub fn circle(&mut self, center: Point2<f64>, radius: f64, stroke: Stroke) {
        self.push(Primitive::Circle {
            center,
            radius,
            stroke,
        });
    }

    pub fn text(&mut self, text: Text) {
        self.push(Primitive::Text(text));
    }

    /// Appends every primitive of `other`, shifted by `offset`.
    pub fn append_translated(&mut self, other: Scene, offset: Vector2<f64>) {
        self.primitives
            .extend(other.primitives.into_iter().map(|mut primitive| {
                primitive.translate(offset);
                primitive
            }));
    }

    /// Smallest box around every primitive, or `None` for an empty scene.
    ///
    /// Text is measured with [`Text::extent`] at `units_per_pixel`.
    pub fn bounds(&self, units_per_pixel: f64) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        let mut include = |point: Point2<f64>| {
            if let Some(bounds) = bounds.as_mut() {
                bounds.include(point);
                return;
            }
            bounds = Some(Bounds::around(point));
        };

        for primitive in &self.primitives {
            match primitive {
                Primitive::Polyline { points, .. } | Primitive::Polygon { points, .. } => {
                    points.iter().copied().for_each(&mut include)
                }
                Primitive::Arrow { arrow, head, .. } => {
                    include(arrow.origin());
                    include(arrow.tip());
                    arrow
                        .head_polygon(head)
                        .into_iter()
                        .flatten()
                        .for_each(&mut include);
                }
                Primitive::Circle { center, radius, .. } => {
                    include(center - Vector2::new(*radius, *radius));
                    include(center + Vector2::new(*radius, *radius));
                }
                Primitive::Text(text) => {
                    let (min, max) = text.extent(units_per_pixel);
                    include(min);
                    include(max);
                }
            }
        }

        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case("e57a77")]
    #[case("#e57a7")]
    #[case("#e57a7g")]
    #[case("#ééé")]
    fn invalid_hex(#[case] hex: &str) {
        assert_eq!(Color::from_hex(hex), None);
    }

    #[test]
    fn bounds_cover_primitives() {
        let mut scene = Scene::new();
        scene.polyline(
            vec![Point2::new(-1.0, 0.0), Point2::new(1.0, 0.5)],
            Stroke::solid(Color::rgb(0, 0, 0), 1),
        );
        scene.circle(Point2::new(0.0, 1.0), 0.5, Stroke::solid(Color::rgb(0, 0, 0), 1));

        let bounds = scene.bounds(0.01).expect("scene is not empty");
        assert_eq!(bounds.min, Point2::new(-1.0, 0.0));
        assert_eq!(bounds.max, Point2::new(1.0, 1.5));
    }

    #[test]
    fn text_extends_bounds() {
        let mut scene = Scene::new();
        scene.text(Text::new(Point2::new(1.0, 1.0), "ab", 10));
        let bounds = scene.bounds(0.01).expect("scene is not empty");
        assert_relative_eq!(bounds.max.x, 1.0 + 2.0 * 0.6 * 0.1, epsilon = 1e-12);
        assert_relative_eq!(bounds.max.y, 1.1, epsilon = 1e-12);
    }

    #[test]
    fn translate_moves_everything() {
        let mut panel = Scene::new();
        panel.text(Text::new(Point2::origin(), "+Q", 10));
        panel.arrow(
            Arrow2::new(Point2::origin(), Vector2::new(1.0, 0.0)),
            ArrowHead::new(0.1, 0.1),
            Stroke::solid(Color::rgb(0, 0, 0), 1),
        );

        let mut scene = Scene::new();
        scene.append_translated(panel, Vector2::new(2.0, -3.0));
        match &scene.primitives()[0] {
            Primitive::Text(text) => assert_eq!(text.anchor, Point2::new(2.0, -3.0)),
            other => panic!("unexpected primitive {other:?}"),
        }
        match &scene.primitives()[1] {
            Primitive::Arrow { arrow, .. } => assert_eq!(arrow.tip(), Point2::new(3.0, -3.0)),
            other => panic!("unexpected primitive {other:?}"),
        }
    }

    #[test]
    fn empty_scene_has_no_bounds() {
        assert_eq!(Scene::new().bounds(1.0), None);
    }
}
