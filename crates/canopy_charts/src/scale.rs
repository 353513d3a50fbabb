//! Positional scales: continuous (linear, time) and banded (categorical).

use chrono::{Duration, NaiveDate};
use rustc_hash::FxHashMap;

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Step between round-number ticks covering `[start, stop]` with about
/// `count` intervals. Negative results mean a step of `1 / -inc`.
fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start) / count.max(1.0);
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
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
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    pub fn new(domain_min: f32, domain_max: f32, range_min: f32, range_max: f32) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    pub fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }

    pub fn map(&self, value: f32) -> f32 {
        let d = self.domain_max - self.domain_min;
        if d.abs() < 1e-12 {
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + t * (self.range_max - self.range_min)
    }

    pub fn invert(&self, px: f32) -> f32 {
        let r = self.range_max - self.range_min;
        if r.abs() < 1e-12 {
            return self.domain_min;
        }
        let t = (px - self.range_min) / r;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Extend the domain outward to round tick boundaries.
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = (self.domain_min as f64, self.domain_max as f64);
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut previous = 0.0;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count as f64);
            if step == previous {
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
            previous = step;
        }
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        self.domain_min = start as f32;
        self.domain_max = stop as f32;
        self
    }

    /// Round-number ticks inside the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let (mut a, mut b) = (self.domain_min as f64, self.domain_max as f64);
        if !a.is_finite() || !b.is_finite() || count == 0 {
            return Vec::new();
        }
        if a == b {
            return vec![a as f32];
        }
        if b < a {
            std::mem::swap(&mut a, &mut b);
        }
        let inc = tick_increment(a, b, count as f64);
        if inc == 0.0 {
            return Vec::new();
        }
        if inc > 0.0 {
            let (i0, i1) = ((a / inc).ceil() as i64, (b / inc).floor() as i64);
            (i0..=i1).map(|i| (i as f64 * inc) as f32).collect()
        } else {
            let inv = -inc;
            let (i0, i1) = ((a * inv).ceil() as i64, (b * inv).floor() as i64);
            (i0..=i1).map(|i| (i as f64 / inv) as f32).collect()
        }
    }
}

/// Categorical scale: equal bands with inner and outer padding expressed as
/// fractions of the step.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
    keys: Vec<String>,
    index: FxHashMap<String, usize>,
    start: f32,
    step: f32,
    band_width: f32,
    padding_inner: f32,
    padding_outer: f32,
    range: (f32, f32),
}

impl BandScale {
    pub fn new(
        keys: Vec<String>,
        range_min: f32,
        range_max: f32,
        padding_inner: f32,
        padding_outer: f32,
    ) -> Self {
        let padding_inner = padding_inner.clamp(0.0, 0.99);
        let padding_outer = padding_outer.max(0.0);
        let index = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();
        let count = keys.len();
        if count == 0 {
            return Self {
                keys,
                index,
                start: range_min,
                step: 0.0,
                band_width: 0.0,
                padding_inner,
                padding_outer,
                range: (range_min, range_max),
            };
        }
        let count_f = count as f32;
        let span = (range_max - range_min).max(0.0);
        let denom = (count_f - padding_inner + 2.0 * padding_outer).max(1e-6);
        let step = span / denom;
        let band_width = step * (1.0 - padding_inner).max(0.0);
        let start = range_min + step * padding_outer;
        Self {
            keys,
            index,
            start,
            step,
            band_width,
            padding_inner,
            padding_outer,
            range: (range_min, range_max),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn band_width(&self) -> f32 {
        self.band_width
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Gap between adjacent bands.
    pub fn gap(&self) -> f32 {
        self.step * self.padding_inner
    }

    /// Space before the first and after the last band.
    pub fn outer(&self) -> f32 {
        self.step * self.padding_outer
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn band_start(&self, idx: usize) -> Option<f32> {
        if idx >= self.keys.len() {
            return None;
        }
        Some(self.start + self.step * idx as f32)
    }

    pub fn center(&self, idx: usize) -> Option<f32> {
        self.band_start(idx).map(|x| x + self.band_width * 0.5)
    }

    pub fn map(&self, key: &str) -> Option<f32> {
        self.index_of(key).and_then(|i| self.band_start(i))
    }
}

/// Continuous scale over calendar days.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    origin: NaiveDate,
    days: LinearScale,
}

impl TimeScale {
    pub fn new(min: NaiveDate, max: NaiveDate, range_min: f32, range_max: f32) -> Self {
        let span = (max - min).num_days() as f32;
        Self {
            origin: min,
            days: LinearScale::new(0.0, span, range_min, range_max),
        }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        let (_, span) = self.days.domain();
        (self.origin, self.origin + Duration::days(span as i64))
    }

    pub fn map(&self, date: NaiveDate) -> f32 {
        self.days.map((date - self.origin).num_days() as f32)
    }

    pub fn invert(&self, px: f32) -> NaiveDate {
        self.origin + Duration::days(self.days.invert(px).round() as i64)
    }

    /// Whole-day ticks at round day intervals.
    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        self.days
            .ticks(count)
            .into_iter()
            .filter(|d| d.fract() == 0.0)
            .map(|d| self.origin + Duration::days(d as i64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_invert_handles_descending_range() {
        let s = LinearScale::new(0.0, 100.0, 200.0, 100.0);
        assert!((s.invert(150.0) - 50.0).abs() < 1e-5);
    }

    #[test]
    fn nice_rounds_outward() {
        let s = LinearScale::new(0.0, 85.0, 300.0, 0.0).nice(10);
        assert_eq!(s.domain(), (0.0, 90.0));
        let s = LinearScale::new(0.0, 0.73, 1.0, 0.0).nice(5);
        assert!((s.domain().1 - 0.8).abs() < 1e-6);
    }

    #[test]
    fn nice_keeps_empty_domain() {
        let s = LinearScale::new(0.0, 0.0, 100.0, 0.0).nice(10);
        assert_eq!(s.domain(), (0.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
    }

    #[test]
    fn ticks_land_on_round_numbers() {
        let s = LinearScale::new(0.0, 90.0, 0.0, 1.0);
        assert_eq!(s.ticks(5), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
        let s = LinearScale::new(0.0, 1.0, 0.0, 1.0);
        let t = s.ticks(5);
        assert_eq!(t.len(), 6);
        assert!((t[1] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn band_scale_bounds_indices() {
        let b = BandScale::new(vec!["a".into(), "b".into(), "c".into()], 0.0, 300.0, 0.1, 0.05);
        assert!(b.band_start(2).is_some());
        assert!(b.band_start(3).is_none());
        assert_eq!(b.index_of("b"), Some(1));
        assert_eq!(b.map("zzz"), None);
    }

    #[test]
    fn band_scale_with_zero_count_has_no_band_width() {
        let b = BandScale::new(Vec::new(), 0.0, 100.0, 0.1, 0.05);
        assert_eq!(b.band_width(), 0.0);
        assert!(b.band_start(0).is_none());
    }

    #[test]
    fn time_scale_maps_days_linearly() {
        let d0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 11).unwrap();
        let s = TimeScale::new(d0, d1, 0.0, 100.0);
        let mid = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        assert!((s.map(mid) - 50.0).abs() < 1e-4);
        assert_eq!(s.invert(50.0), mid);
        assert_eq!(s.domain(), (d0, d1));
        assert!(s.ticks(5).contains(&mid));
    }
}
