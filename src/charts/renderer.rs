//! Static Chart Renderer
//! Paints a [`Scene`] with plotters: SVG markup in memory, or a PNG file.
//!
//! Cubic path segments are flattened to polylines. Text turned by a quarter
//! turn uses the backend font transform; any other angle is painted level at
//! its rotated anchor.

use crate::charts::curve::flatten_cubic;
use crate::charts::{
    Anchor, Baseline, Color as SceneColor, PathCommand, Point, Primitive, Scene, Stroke,
    TextLabel,
};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;

/// Samples per cubic segment when flattening curves.
const CURVE_STEPS: usize = 24;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Backend(String),
}

fn backend_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Backend(err.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// SVG document for `scene`.
    pub fn render_svg(scene: &Scene) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (scene.width, scene.height))
                .into_drawing_area();
            Self::paint(&root, scene)?;
            root.present().map_err(backend_error)?;
        }
        Ok(svg)
    }

    /// PNG file for `scene` on a white background.
    pub fn render_png(scene: &Scene, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (scene.width, scene.height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_error)?;
        Self::paint(&root, scene)?;
        root.present().map_err(backend_error)?;
        Ok(())
    }

    fn paint<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        scene: &Scene,
    ) -> Result<(), RenderError> {
        for primitive in &scene.primitives {
            match primitive {
                Primitive::Line { from, to, stroke } => {
                    area.draw(&PathElement::new(vec![pixel(from), pixel(to)], outline(stroke)))
                }
                Primitive::Rect {
                    origin,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    let corners = [
                        pixel(origin),
                        pixel(&Point::new(origin.x + width, origin.y + height)),
                    ];
                    if let Some(fill) = fill {
                        area.draw(&Rectangle::new(corners, rgb(fill).filled()))
                            .map_err(backend_error)?;
                    }
                    match stroke {
                        Some(stroke) => area.draw(&Rectangle::new(corners, outline(stroke))),
                        None => Ok(()),
                    }
                }
                Primitive::Circle {
                    center,
                    radius,
                    fill,
                } => area.draw(&Circle::new(pixel(center), *radius, rgb(fill).filled())),
                Primitive::Path { commands, stroke } => {
                    area.draw(&PathElement::new(flatten(commands), outline(stroke)))
                }
                Primitive::Text(label) => area.draw(&Text::new(
                    label.content.clone(),
                    pixel(&label.position),
                    text_style(label),
                )),
            }
            .map_err(backend_error)?;
        }
        Ok(())
    }
}

fn pixel(point: &Point) -> (i32, i32) {
    (point.x.round() as i32, point.y.round() as i32)
}

fn rgb(color: &SceneColor) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn outline(stroke: &Stroke) -> ShapeStyle {
    rgb(&stroke.color).stroke_width(stroke.width.round().max(1.0) as u32)
}

fn flatten(commands: &[PathCommand]) -> Vec<(i32, i32)> {
    let mut points = Vec::new();
    let mut cursor = Point::new(0.0, 0.0);
    for command in commands {
        match command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                points.push(*p);
                cursor = *p;
            }
            PathCommand::CubicTo(c1, c2, end) => {
                points.extend(flatten_cubic(cursor, *c1, *c2, *end, CURVE_STEPS));
                cursor = *end;
            }
        }
    }
    points.iter().map(pixel).collect()
}

fn text_style(label: &TextLabel) -> TextStyle<'static> {
    let h_pos = match label.anchor {
        Anchor::Start => HPos::Left,
        Anchor::Middle => HPos::Center,
        Anchor::End => HPos::Right,
    };
    let v_pos = match label.baseline {
        Baseline::Top => VPos::Top,
        Baseline::Middle => VPos::Center,
        Baseline::Alphabetic => VPos::Bottom,
    };
    let transform = match label.rotation.rem_euclid(360.0).round() as i32 {
        90 => FontTransform::Rotate90,
        180 => FontTransform::Rotate180,
        270 => FontTransform::Rotate270,
        _ => FontTransform::None,
    };

    let font = FontDesc::new(FontFamily::SansSerif, label.font_size, FontStyle::Normal)
        .transform(transform);
    TextStyle::from(font)
        .color(&BLACK)
        .pos(Pos::new(h_pos, v_pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_turns_map_to_font_transforms() {
        let label = TextLabel::new("Likes", Point::new(15.0, 210.0)).rotation(-90.0);
        let style = text_style(&label);
        assert!(matches!(style.font.get_transform(), FontTransform::Rotate270));
    }

    #[test]
    fn flatten_keeps_straight_segments() {
        let commands = [
            PathCommand::MoveTo(Point::new(0.0, 0.0)),
            PathCommand::LineTo(Point::new(10.0, 0.0)),
        ];
        assert_eq!(flatten(&commands), vec![(0, 0), (10, 0)]);
    }

    #[test]
    fn svg_has_requested_size() {
        let mut scene = Scene::new("t", 320, 200);
        scene.line(Point::new(0.0, 0.0), Point::new(10.0, 10.0), Stroke::black());
        let svg = StaticChartRenderer::render_svg(&scene).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("320"));
        assert!(svg.contains("200"));
    }
}
