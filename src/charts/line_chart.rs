//! Line chart of average likes by date: natural spline plus point markers.

use crate::charts::curve::natural_spline;
use crate::charts::{
    Axis, Color, LinearScale, Orient, Point, Primitive, Scene, Stroke, TimeScale,
};
use crate::config::ChartConfig;
use crate::data::{DailyLikes, DataProcessor};
use chrono::{Datelike, NaiveDate};

pub const LINE_CHART_ID: &str = "lineplot";
pub const TICK_LABEL_FORMAT: &str = "%-m/%-d";
const TICK_LABEL_ROTATION: f64 = -35.0;
const LINE_COLOR: Color = Color::rgb(0x1f, 0x77, 0xb4);
const POINT_RADIUS: f64 = 3.5;

pub struct LineChart;

impl LineChart {
    /// Sorts `rows` by date in place (stable), then draws them.
    pub fn build(rows: &mut [DailyLikes], config: &ChartConfig) -> Scene {
        let mut scene = Scene::new(LINE_CHART_ID, config.width, config.height);
        DataProcessor::sort_by_date(rows);

        let extent = rows.first().zip(rows.last()).map(|(a, b)| (a.date, b.date));
        let y_max =
            DataProcessor::max_finite(rows.iter().map(|r| r.avg_likes)).unwrap_or(f64::NAN);
        let y = LinearScale::new((0.0, y_max), config.y_range()).nice();

        let x = extent.map(|extent| TimeScale::new(extent, config.x_range()));
        let (bottom, _) = config.y_range();
        let x_ticks = x
            .as_ref()
            .map(|x| Axis::daily_ticks(x, TICK_LABEL_FORMAT))
            .unwrap_or_default();
        Axis::draw(
            &mut scene,
            Orient::Bottom,
            bottom,
            config.x_range(),
            &x_ticks,
            TICK_LABEL_ROTATION,
        );
        Axis::draw(
            &mut scene,
            Orient::Left,
            config.margin.left,
            config.y_range(),
            &Axis::linear_ticks(&y),
            0.0,
        );

        let caption = match extent {
            Some((start, end)) => format!("Date ({})", Self::date_caption(start, end)),
            None => "Date".to_string(),
        };
        Axis::captions(&mut scene, config, &caption, "Average Likes");

        let Some(x) = x else {
            return scene;
        };

        let points: Vec<Point> = rows
            .iter()
            .map(|r| Point::new(x.apply(r.date), y.apply(r.avg_likes)))
            .collect();
        let drawable: Vec<Point> = points
            .iter()
            .copied()
            .filter(|p| p.x.is_finite() && p.y.is_finite())
            .collect();

        scene.push(Primitive::Path {
            commands: natural_spline(&drawable),
            stroke: Stroke::new(LINE_COLOR, 2.0),
        });
        for center in points {
            scene.push(Primitive::Circle {
                center,
                radius: POINT_RADIUS,
                fill: LINE_COLOR,
            });
        }

        scene
    }

    /// Human-readable span, e.g. `March 1–7, 2024`.
    pub fn date_caption(start: NaiveDate, end: NaiveDate) -> String {
        if start == end {
            start.format("%B %-d, %Y").to_string()
        } else if start.year() == end.year() && start.month() == end.month() {
            format!("{}\u{2013}{}", start.format("%B %-d"), end.format("%-d, %Y"))
        } else if start.year() == end.year() {
            format!("{} \u{2013} {}", start.format("%B %-d"), end.format("%B %-d, %Y"))
        } else {
            format!(
                "{} \u{2013} {}",
                start.format("%B %-d, %Y"),
                end.format("%B %-d, %Y")
            )
        }
    }
}
