//! Scales map data values (categories, numbers, dates) to pixel coordinates.

use crate::charts::Color;
use chrono::{Datelike, NaiveDate};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Evenly spaced bands over an ordered set of categories.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// Inner and outer padding are both `padding`; bands are centred in the range.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let n = domain.len() as f64;
        let (mut start, stop) = if range.1 < range.0 {
            (range.1, range.0)
        } else {
            range
        };

        let step = (stop - start) / (n - padding + padding * 2.0).max(1.0);
        start += (stop - start - step * (n - padding)) * 0.5;

        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of the band for `key`.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|d| d == key)
            .map(|i| self.start + self.step * i as f64)
    }

    /// Centre of the band for `key`.
    pub fn center(&self, key: &str) -> Option<f64> {
        self.position(key).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

/// Continuous linear scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span.is_nan() {
            f64::NAN
        } else if span == 0.0 {
            0.5
        } else {
            (value - d0) / span
        };
        r0 + (r1 - r0) * t
    }

    /// Extend the domain outwards to round tick increments.
    pub fn nice(mut self) -> Self {
        let (mut start, mut stop) = self.domain;
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        if !(stop > start) || !start.is_finite() || !stop.is_finite() {
            return self;
        }

        let mut previous: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, 10.0);
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            previous = Some(step);
        }

        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Round values inside the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        let count = count as f64;
        if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
            return Vec::new();
        }
        if start == stop {
            return vec![start];
        }
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }

        let (i1, i2, inc) = tick_spec(start, stop, count);
        if !(i2 >= i1) {
            return Vec::new();
        }
        let mut ticks: Vec<f64> = (0..=(i2 - i1) as i64)
            .map(|i| {
                let k = i1 + i as f64;
                if inc < 0.0 {
                    k / -inc
                } else {
                    k * inc
                }
            })
            .collect();
        if reversed {
            ticks.reverse();
        }
        ticks
    }

    /// Formats tick labels with the precision the tick step needs and
    /// thousands separators.
    pub fn tick_format(&self, count: usize) -> impl Fn(f64) -> String {
        let (start, stop) = self.domain;
        let step = tick_step(start, stop, count as f64);
        let precision = if step.is_finite() && step != 0.0 {
            (-step.abs().log10().floor()).max(0.0) as usize
        } else {
            0
        };
        move |value| format_grouped(value, precision)
    }
}

/// Linear scale over calendar days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    extent: (NaiveDate, NaiveDate),
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(extent: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        let domain = (day_number(extent.0), day_number(extent.1));
        Self {
            extent,
            linear: LinearScale::new(domain, range),
        }
    }

    pub fn apply(&self, date: NaiveDate) -> f64 {
        self.linear.apply(day_number(date))
    }

    /// Every calendar day from the first to the last date of the extent.
    pub fn daily_ticks(&self) -> Vec<NaiveDate> {
        let (start, end) = self.extent;
        start.iter_days().take_while(|d| *d <= end).collect()
    }
}

/// Categories mapped onto a cycling colour palette.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinalScale {
    domain: Vec<String>,
    palette: Vec<Color>,
}

impl OrdinalScale {
    pub fn new(domain: Vec<String>, palette: Vec<Color>) -> Self {
        Self { domain, palette }
    }

    pub fn color(&self, key: &str) -> Option<Color> {
        if self.palette.is_empty() {
            return None;
        }
        let index = self.domain.iter().position(|d| d == key)?;
        Some(self.palette[index % self.palette.len()])
    }
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// `(i1, i2, inc)`: ticks are `i * inc` for `i1..=i2`, or `i / -inc` when
/// `inc` is negative (steps below one).
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10f64.powf(-power) / factor;
        i1 = (start * scale).round();
        i2 = (stop * scale).round();
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let scale = 10f64.powf(power) * factor;
        i1 = (start / scale).round();
        i2 = (stop / scale).round();
        if i1 * scale < start {
            i1 += 1.0;
        }
        if i2 * scale > stop {
            i2 -= 1.0;
        }
        inc = scale;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    tick_spec(start, stop, count).2
}

fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reversed = stop < start;
    let inc = if reversed {
        tick_increment(stop, start, count)
    } else {
        tick_increment(start, stop, count)
    };
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reversed {
        -step
    } else {
        step
    }
}

/// Fixed-point with comma thousands separators; negatives use U+2212.
fn format_grouped(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("\u{2212}{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn band_geometry() {
        let domain = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let band = BandScale::new(domain, (0.0, 100.0), 0.2);
        // step = 100 / (3 - 0.2 + 0.4)
        let step = 100.0 / 3.2;
        assert_relative_eq!(band.step(), step);
        assert_relative_eq!(band.bandwidth(), step * 0.8);
        assert_relative_eq!(band.position("a").unwrap(), step * 0.2);
        assert_relative_eq!(band.position("c").unwrap(), step * 2.2);
        assert!(band.position("z").is_none());
    }

    #[test]
    fn nice_rounds_outwards() {
        let y = LinearScale::new((0.0, 97.0), (360.0, 30.0)).nice();
        assert_eq!(y.domain(), (0.0, 100.0));
        let y = LinearScale::new((0.0, 1234.0), (360.0, 30.0)).nice();
        assert_eq!(y.domain(), (0.0, 1300.0));
    }

    #[test]
    fn ticks_and_labels() {
        let y = LinearScale::new((0.0, 100.0), (360.0, 30.0));
        let ticks = y.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 30.0);
        let fmt = y.tick_format(10);
        assert_eq!(fmt(30.0), "30");

        let small = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(small.ticks(10)[1], 0.1);
        assert_eq!(small.tick_format(10)(0.1), "0.1");
    }

    #[test]
    fn grouped_format() {
        assert_eq!(format_grouped(1234567.0, 0), "1,234,567");
        assert_eq!(format_grouped(-1500.0, 0), "\u{2212}1,500");
        assert_eq!(format_grouped(-0.0, 1), "0.0");
        assert_eq!(format_grouped(999.0, 0), "999");
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let s = LinearScale::new((5.0, 5.0), (0.0, 100.0));
        assert_eq!(s.apply(5.0), 50.0);
        assert_eq!(s.apply(9.0), 50.0);
    }

    #[test]
    fn time_scale_spans_days() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let x = TimeScale::new((start, end), (60.0, 700.0));
        assert_eq!(x.apply(start), 60.0);
        assert_eq!(x.apply(end), 700.0);
        assert_relative_eq!(x.apply(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()), 380.0);
        assert_eq!(x.daily_ticks().len(), 7);
    }

    #[test]
    fn ordinal_cycles_palette() {
        let keys: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let scale = OrdinalScale::new(keys, vec![Color::BLACK, Color::WHITE]);
        assert_eq!(scale.color("c"), Some(Color::BLACK));
        assert_eq!(scale.color("b"), Some(Color::WHITE));
        assert_eq!(scale.color("x"), None);
    }
}
