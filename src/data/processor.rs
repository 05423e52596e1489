//! Data Processor Module
//! Grouping, distinct categories and ordering of loaded rows.

use crate::data::DailyLikes;
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;

/// Row grouping helpers shared by the chart builders.
pub struct DataProcessor;

impl DataProcessor {
    /// Distinct keys in order of first occurrence.
    pub fn distinct<T, K, F>(rows: &[T], key: F) -> Vec<K>
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let mut seen: IndexSet<K> = IndexSet::new();
        for row in rows {
            seen.insert(key(row));
        }
        seen.into_iter().collect()
    }

    /// Partition rows by key. Groups keep the order in which their key first
    /// appears; rows keep file order within a group.
    pub fn group_by<'a, T, K, F>(rows: &'a [T], key: F) -> IndexMap<K, Vec<&'a T>>
    where
        K: Eq + Hash,
        F: Fn(&T) -> K,
    {
        let mut groups: IndexMap<K, Vec<&'a T>> = IndexMap::new();
        for row in rows {
            groups.entry(key(row)).or_default().push(row);
        }
        groups
    }

    /// Same partition as [`group_by`](Self::group_by), projected to values.
    pub fn group_values<T, F, V>(rows: &[T], key: F, value: V) -> IndexMap<String, Vec<f64>>
    where
        F: Fn(&T) -> &str,
        V: Fn(&T) -> f64,
    {
        let mut groups: IndexMap<String, Vec<f64>> = IndexMap::new();
        for row in rows {
            let k = key(row);
            match groups.get_mut(k) {
                Some(values) => values.push(value(row)),
                None => {
                    groups.insert(k.to_string(), vec![value(row)]);
                }
            }
        }
        groups
    }

    /// Stable sort by date, ascending.
    pub fn sort_by_date(rows: &mut [DailyLikes]) {
        rows.sort_by_key(|r| r.date);
    }

    /// Largest finite value, if any.
    pub fn max_finite(values: impl IntoIterator<Item = f64>) -> Option<f64> {
        values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}
