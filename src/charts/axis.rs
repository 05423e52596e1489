//! Axis Module
//! Domain line, tick marks and tick labels, emitted as scene primitives.

use crate::charts::{
    Anchor, BandScale, Baseline, LinearScale, PathCommand, Point, Primitive, Scene, Stroke,
    TextLabel, TimeScale,
};
use crate::config::ChartConfig;
use chrono::NaiveDate;

/// Length of tick marks and of the domain line's end caps.
pub const TICK_SIZE: f64 = 6.0;
/// Gap between a tick mark and its label.
pub const TICK_PADDING: f64 = 3.0;
/// Half-pixel shift for crisp 1px lines.
pub const CRISP_OFFSET: f64 = 0.5;
/// Tick label font size.
pub const TICK_FONT_SIZE: f64 = 10.0;
/// Axis caption font size.
pub const CAPTION_FONT_SIZE: f64 = 16.0;
/// Target tick count for linear axes.
pub const LINEAR_TICK_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

/// A tick at an absolute pixel position along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub position: f64,
    pub label: String,
}

pub struct Axis;

impl Axis {
    /// One tick per category, at the exact band centre. The half-pixel crisp
    /// offset cancels against the half pixel taken off the band centre.
    pub fn band_ticks(scale: &BandScale) -> Vec<AxisTick> {
        scale
            .domain()
            .iter()
            .filter_map(|key| {
                scale.center(key).map(|position| AxisTick {
                    position,
                    label: key.clone(),
                })
            })
            .collect()
    }

    pub fn linear_ticks(scale: &LinearScale) -> Vec<AxisTick> {
        let format = scale.tick_format(LINEAR_TICK_COUNT);
        scale
            .ticks(LINEAR_TICK_COUNT)
            .into_iter()
            .map(|value| AxisTick {
                position: scale.apply(value) + CRISP_OFFSET,
                label: format(value),
            })
            .collect()
    }

    /// One tick per day, labelled with `format` (chrono syntax).
    pub fn daily_ticks(scale: &TimeScale, format: &str) -> Vec<AxisTick> {
        scale
            .daily_ticks()
            .into_iter()
            .map(|day: NaiveDate| AxisTick {
                position: scale.apply(day) + CRISP_OFFSET,
                label: day.format(format).to_string(),
            })
            .collect()
    }

    /// Draw an axis line at `at` (y for bottom, x for left) spanning `range`.
    ///
    /// `label_rotation` turns bottom labels about their tick; rotated labels
    /// are end-anchored.
    pub fn draw(
        scene: &mut Scene,
        orient: Orient,
        at: f64,
        range: (f64, f64),
        ticks: &[AxisTick],
        label_rotation: f64,
    ) {
        let (r0, r1) = (range.0 + CRISP_OFFSET, range.1 + CRISP_OFFSET);
        let stroke = Stroke::black();

        let domain = match orient {
            Orient::Bottom => vec![
                PathCommand::MoveTo(Point::new(r0, at + TICK_SIZE)),
                PathCommand::LineTo(Point::new(r0, at + CRISP_OFFSET)),
                PathCommand::LineTo(Point::new(r1, at + CRISP_OFFSET)),
                PathCommand::LineTo(Point::new(r1, at + TICK_SIZE)),
            ],
            Orient::Left => vec![
                PathCommand::MoveTo(Point::new(at - TICK_SIZE, r0)),
                PathCommand::LineTo(Point::new(at + CRISP_OFFSET, r0)),
                PathCommand::LineTo(Point::new(at + CRISP_OFFSET, r1)),
                PathCommand::LineTo(Point::new(at - TICK_SIZE, r1)),
            ],
        };
        scene.push(Primitive::Path {
            commands: domain,
            stroke,
        });

        let gap = TICK_SIZE + TICK_PADDING;
        for tick in ticks {
            let p = tick.position;
            match orient {
                Orient::Bottom => {
                    scene.line(Point::new(p, at), Point::new(p, at + TICK_SIZE), stroke);
                    let label = if label_rotation == 0.0 {
                        TextLabel::new(&tick.label, Point::new(p, at + gap))
                            .anchor(Anchor::Middle)
                            .baseline(Baseline::Top)
                    } else {
                        let (sin, cos) = label_rotation.to_radians().sin_cos();
                        TextLabel::new(&tick.label, Point::new(p - gap * sin, at + gap * cos))
                            .anchor(Anchor::End)
                            .baseline(Baseline::Top)
                            .rotation(label_rotation)
                    };
                    scene.text(label.font_size(TICK_FONT_SIZE));
                }
                Orient::Left => {
                    scene.line(Point::new(at, p), Point::new(at - TICK_SIZE, p), stroke);
                    scene.text(
                        TextLabel::new(&tick.label, Point::new(at - gap, p))
                            .anchor(Anchor::End)
                            .baseline(Baseline::Middle)
                            .font_size(TICK_FONT_SIZE),
                    );
                }
            }
        }
    }

    /// Centred caption under the x axis and a vertical caption left of the y axis.
    pub fn captions(scene: &mut Scene, config: &ChartConfig, x_caption: &str, y_caption: &str) {
        let (width, height) = (config.width as f64, config.height as f64);
        scene.text(
            TextLabel::new(x_caption, Point::new(width / 2.0, height - 15.0))
                .anchor(Anchor::Middle)
                .font_size(CAPTION_FONT_SIZE),
        );
        scene.text(
            TextLabel::new(y_caption, Point::new(15.0, height / 2.0))
                .anchor(Anchor::Middle)
                .rotation(-90.0)
                .font_size(CAPTION_FONT_SIZE),
        );
    }
}
