//! Charts module - scales, scene building and rendering

mod axis;
mod bar_chart;
mod box_plot;
pub mod curve;
mod line_chart;
mod renderer;
mod scale;
mod scene;

pub use axis::{Axis, AxisTick, Orient, CAPTION_FONT_SIZE, TICK_FONT_SIZE};
pub use bar_chart::{BarChart, BAR_CHART_ID};
pub use box_plot::{BoxPlot, BOX_PLOT_ID};
pub use line_chart::{LineChart, LINE_CHART_ID, TICK_LABEL_FORMAT};
pub use renderer::{RenderError, StaticChartRenderer};
pub use scale::{BandScale, LinearScale, OrdinalScale, TimeScale};
pub use scene::{Anchor, Baseline, Color, PathCommand, Point, Primitive, Scene, Stroke, TextLabel};
