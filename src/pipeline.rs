//! Chart pipelines: load one CSV, build its scene, paint it to SVG.
//!
//! The three pipelines share nothing but the configuration and run in
//! parallel; one failing does not stop the others.

use crate::charts::{
    BarChart, BoxPlot, Color, LineChart, RenderError, Scene, StaticChartRenderer,
    BAR_CHART_ID, BOX_PLOT_ID, LINE_CHART_ID,
};
use crate::config::{AppConfig, ConfigError};
use crate::data::{DataLoader, LoaderError};
use crate::stats::GroupSummary;
use rayon::prelude::*;
use std::fmt;
use thiserror::Error;
use tracing::{error, info, info_span, warn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ChartKind {
    #[value(name = "box")]
    BoxPlot,
    #[value(name = "bar")]
    BarChart,
    #[value(name = "line")]
    LineChart,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::BoxPlot, ChartKind::BarChart, ChartKind::LineChart];

    /// The charts named in `only`, in canonical order; all of them when `only`
    /// is empty.
    pub fn select(only: &[ChartKind]) -> Vec<ChartKind> {
        Self::ALL
            .into_iter()
            .filter(|k| only.is_empty() || only.contains(k))
            .collect()
    }

    /// Id of the host container, also the output file stem.
    pub fn id(&self) -> &'static str {
        match self {
            ChartKind::BoxPlot => BOX_PLOT_ID,
            ChartKind::BarChart => BAR_CHART_ID,
            ChartKind::LineChart => LINE_CHART_ID,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A rendered chart.
#[derive(Debug, Clone)]
pub struct ChartOutput {
    pub kind: ChartKind,
    pub scene: Scene,
    pub svg: String,
    /// Box plot only.
    pub summaries: Option<Vec<GroupSummary>>,
}

pub struct Pipeline<'a> {
    config: &'a AppConfig,
    loader: DataLoader,
    palette: Vec<Color>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a AppConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            config,
            loader: DataLoader::new(config.validation),
            palette: config.palette_colors()?,
        })
    }

    /// Build and paint one chart.
    pub fn run(&self, kind: ChartKind) -> Result<ChartOutput, PipelineError> {
        let _span = info_span!("chart", id = kind.id()).entered();
        let files = &self.config.files;

        let (scene, summaries) = match kind {
            ChartKind::BoxPlot => {
                let rows = self
                    .loader
                    .load_age_likes(&self.config.input_path(&files.likes_by_age))?;
                let (scene, summaries) = BoxPlot::build(&rows, &self.config.box_plot);
                (scene, Some(summaries))
            }
            ChartKind::BarChart => {
                let rows = self
                    .loader
                    .load_platform_likes(&self.config.input_path(&files.likes_by_platform))?;
                (BarChart::build(&rows, &self.config.bar_chart, &self.palette), None)
            }
            ChartKind::LineChart => {
                let mut rows = self
                    .loader
                    .load_daily_likes(&self.config.input_path(&files.likes_by_date))?;
                (LineChart::build(&mut rows, &self.config.line_chart), None)
            }
        };

        if scene.skipped > 0 {
            warn!(skipped = scene.skipped, "left out shapes with non-numeric coordinates");
        }
        let svg = StaticChartRenderer::render_svg(&scene)?;
        info!(primitives = scene.primitives.len(), "chart rendered");

        Ok(ChartOutput {
            kind,
            scene,
            svg,
            summaries,
        })
    }

    /// Run `kinds` in parallel; results come back in the same order.
    pub fn run_all(
        &self,
        kinds: &[ChartKind],
    ) -> Vec<(ChartKind, Result<ChartOutput, PipelineError>)> {
        kinds
            .par_iter()
            .map(|&kind| {
                let result = self.run(kind);
                if let Err(e) = &result {
                    error!(chart = kind.id(), error = %e, "chart pipeline failed");
                }
                (kind, result)
            })
            .collect()
    }
}
