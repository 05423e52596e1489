//! Box plot of Likes per age group.

use crate::charts::{
    Axis, BandScale, Color, LinearScale, Orient, Point, Primitive, Scene, Stroke,
};
use crate::config::ChartConfig;
use crate::data::{AgeLikes, DataProcessor};
use crate::stats::{GroupSummary, StatsCalculator};

pub const BOX_PLOT_ID: &str = "boxplot";
const BAND_PADDING: f64 = 0.35;
const CAP_START: f64 = 0.2;
const CAP_END: f64 = 0.8;

pub struct BoxPlot;

impl BoxPlot {
    /// Scene and the per-group summaries it draws, in first-occurrence order.
    pub fn build(rows: &[AgeLikes], config: &ChartConfig) -> (Scene, Vec<GroupSummary>) {
        let mut scene = Scene::new(BOX_PLOT_ID, config.width, config.height);

        let age_groups = DataProcessor::distinct(rows, |r| r.age_group.clone());
        let x = BandScale::new(age_groups, config.x_range(), BAND_PADDING);

        let y_max = DataProcessor::max_finite(rows.iter().map(|r| r.likes)).unwrap_or(f64::NAN);
        let y = LinearScale::new((0.0, y_max), config.y_range()).nice();

        let (bottom, _) = config.y_range();
        Axis::draw(
            &mut scene,
            Orient::Bottom,
            bottom,
            config.x_range(),
            &Axis::band_ticks(&x),
            0.0,
        );
        Axis::draw(
            &mut scene,
            Orient::Left,
            config.margin.left,
            config.y_range(),
            &Axis::linear_ticks(&y),
            0.0,
        );
        Axis::captions(&mut scene, config, "Age Group", "Likes");

        let groups = DataProcessor::group_values(rows, |r| r.age_group.as_str(), |r| r.likes);
        let summaries = StatsCalculator::summarize_groups(&groups);

        for summary in &summaries {
            if let Some(left) = x.position(&summary.group) {
                Self::draw_box(&mut scene, summary, left, x.bandwidth(), &y);
            }
        }

        (scene, summaries)
    }

    fn draw_box(scene: &mut Scene, q: &GroupSummary, left: f64, width: f64, y: &LinearScale) {
        let center = left + width / 2.0;
        let stroke = Stroke::black();

        // Whiskers
        scene.line(
            Point::new(center, y.apply(q.min)),
            Point::new(center, y.apply(q.q1)),
            stroke,
        );
        scene.line(
            Point::new(center, y.apply(q.q3)),
            Point::new(center, y.apply(q.max)),
            stroke,
        );

        // Caps
        for value in [q.min, q.max] {
            scene.line(
                Point::new(left + width * CAP_START, y.apply(value)),
                Point::new(left + width * CAP_END, y.apply(value)),
                stroke,
            );
        }

        scene.push(Primitive::Rect {
            origin: Point::new(left, y.apply(q.q3)),
            width,
            height: (y.apply(q.q1) - y.apply(q.q3)).max(1.0),
            fill: Some(Color::LIGHT_GRAY),
            stroke: Some(stroke),
        });

        scene.line(
            Point::new(left, y.apply(q.median)),
            Point::new(left + width, y.apply(q.median)),
            Stroke::new(Color::BLACK, 2.0),
        );
    }
}
