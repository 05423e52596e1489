//! Social Charts - static SVG charts for social media engagement data
//!
//! Loads three CSV tables and renders a box plot of likes per age group, a
//! grouped bar chart of average likes per platform and post type, and a line
//! chart of average likes per day.

pub mod charts;
pub mod config;
pub mod data;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod stats;

pub use config::AppConfig;
pub use pipeline::{ChartKind, ChartOutput, Pipeline, PipelineError};
