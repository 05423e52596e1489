//! Typed rows for the three input tables.

use chrono::NaiveDate;

/// One row of `socialMedia.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeLikes {
    pub age_group: String,
    pub likes: f64,
}

/// One row of `socialMediaAvg.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformLikes {
    pub platform: String,
    pub post_type: String,
    pub avg_likes: f64,
}

/// One row of `socialMediaTime.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLikes {
    pub date: NaiveDate,
    pub avg_likes: f64,
}
