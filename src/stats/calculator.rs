//! Statistics Calculator Module
//! Five-number summaries for the box plot, computed per group.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Five-number summary (plus count and mean) for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// Handles quantile computations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summarize a sequence of values.
    ///
    /// NaN values are skipped. Returns `None` when nothing finite is left.
    pub fn summarize(group: &str, values: &[f64]) -> Option<GroupSummary> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(GroupSummary {
            group: group.to_string(),
            count: sorted.len(),
            min: Statistics::min(&sorted),
            q1: Self::quantile(&sorted, 0.25),
            median: Self::quantile(&sorted, 0.5),
            q3: Self::quantile(&sorted, 0.75),
            max: Statistics::max(&sorted),
            mean: Statistics::mean(&sorted),
        })
    }

    /// Quantile of ascending values using linear interpolation.
    ///
    /// `p` is a fraction in `[0, 1]`; the rank is `p * (n - 1)`.
    pub fn quantile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * frac
        }
    }

    /// Summaries for every group, in group order.
    ///
    /// Groups without a finite value are left out.
    pub fn summarize_groups(groups: &IndexMap<String, Vec<f64>>) -> Vec<GroupSummary> {
        let entries: Vec<(&String, &Vec<f64>)> = groups.iter().collect();

        // Use rayon for parallel computation; collect keeps input order
        entries
            .par_iter()
            .filter_map(|(name, values)| Self::summarize(name, values))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates_between_neighbours() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(StatsCalculator::quantile(&sorted, 0.5), 2.5);
        assert_eq!(StatsCalculator::quantile(&sorted, 0.0), 1.0);
        assert_eq!(StatsCalculator::quantile(&sorted, 1.0), 4.0);
    }

    #[test]
    fn quantile_of_empty_is_nan() {
        assert!(StatsCalculator::quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn summarize_skips_nan() {
        let s = StatsCalculator::summarize("a", &[f64::NAN, 4.0, 2.0]).unwrap();
        assert_eq!(s.count, 2);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 4.0);
        assert_eq!(s.median, 3.0);
    }

    #[test]
    fn summarize_all_nan_is_none() {
        assert!(StatsCalculator::summarize("a", &[f64::NAN]).is_none());
    }

    #[test]
    fn groups_keep_insertion_order() {
        let mut groups = IndexMap::new();
        groups.insert("65+".to_string(), vec![3.0]);
        groups.insert("18-24".to_string(), vec![1.0, 2.0]);
        groups.insert("25-34".to_string(), vec![5.0]);

        let names: Vec<String> = StatsCalculator::summarize_groups(&groups)
            .into_iter()
            .map(|s| s.group)
            .collect();
        assert_eq!(names, ["65+", "18-24", "25-34"]);
    }
}
