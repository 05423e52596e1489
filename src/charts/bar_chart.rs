//! Grouped bar chart of average likes by platform and post type, with legend.

use crate::charts::{
    Axis, BandScale, Baseline, Color, LinearScale, OrdinalScale, Orient, Point, Primitive, Scene,
    TextLabel, CAPTION_FONT_SIZE,
};
use crate::config::ChartConfig;
use crate::data::{DataProcessor, PlatformLikes};

pub const BAR_CHART_ID: &str = "barplot";
const OUTER_PADDING: f64 = 0.2;
const INNER_PADDING: f64 = 0.15;
const SWATCH_SIZE: f64 = 14.0;
const LEGEND_ROW: f64 = 22.0;
const LEGEND_OFFSET: f64 = 20.0;

pub struct BarChart;

impl BarChart {
    pub fn build(rows: &[PlatformLikes], config: &ChartConfig, palette: &[Color]) -> Scene {
        let mut scene = Scene::new(BAR_CHART_ID, config.width, config.height);

        let platforms = DataProcessor::distinct(rows, |r| r.platform.clone());
        let post_types = DataProcessor::distinct(rows, |r| r.post_type.clone());

        let x0 = BandScale::new(platforms, config.x_range(), OUTER_PADDING);
        let x1 = BandScale::new(post_types.clone(), (0.0, x0.bandwidth()), INNER_PADDING);

        let y_max =
            DataProcessor::max_finite(rows.iter().map(|r| r.avg_likes)).unwrap_or(f64::NAN);
        let y = LinearScale::new((0.0, y_max), config.y_range()).nice();
        let color = OrdinalScale::new(post_types.clone(), palette.to_vec());

        let (bottom, _) = config.y_range();
        Axis::draw(
            &mut scene,
            Orient::Bottom,
            bottom,
            config.x_range(),
            &Axis::band_ticks(&x0),
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
        Axis::captions(&mut scene, config, "Platform", "Average Likes");

        let grouped = DataProcessor::group_by(rows, |r| r.platform.clone());
        for platform in x0.domain() {
            let Some(offset) = x0.position(platform) else {
                continue;
            };
            let Some(bars) = grouped.get(platform) else {
                continue;
            };

            for row in bars {
                let Some(inner) = x1.position(&row.post_type) else {
                    continue;
                };
                scene.push(Primitive::Rect {
                    origin: Point::new(offset + inner, y.apply(row.avg_likes)),
                    width: x1.bandwidth(),
                    height: (y.apply(0.0) - y.apply(row.avg_likes)).max(0.0),
                    fill: Some(color.color(&row.post_type).unwrap_or(Color::BLACK)),
                    stroke: None,
                });
            }
        }

        Self::draw_legend(&mut scene, config, &post_types, &color);
        scene
    }

    fn draw_legend(
        scene: &mut Scene,
        config: &ChartConfig,
        post_types: &[String],
        color: &OrdinalScale,
    ) {
        let left = config.width as f64 - config.margin.right + LEGEND_OFFSET;
        let top = config.margin.top;

        for (i, post_type) in post_types.iter().enumerate() {
            let row_y = top + i as f64 * LEGEND_ROW;
            scene.push(Primitive::Rect {
                origin: Point::new(left, row_y),
                width: SWATCH_SIZE,
                height: SWATCH_SIZE,
                fill: Some(color.color(post_type).unwrap_or(Color::BLACK)),
                stroke: None,
            });
            scene.text(
                TextLabel::new(post_type, Point::new(left + 20.0, row_y + 11.0))
                    .baseline(Baseline::Middle)
                    .font_size(CAPTION_FONT_SIZE),
            );
        }
    }
}
