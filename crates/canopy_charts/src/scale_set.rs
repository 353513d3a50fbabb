//! Scale construction and memoisation.
//!
//! Scales live in bounded-area coordinates: x in `[0, bounded_width]`, y in
//! `[bounded_height, 0]`. Strategies add the bounded origin when placing
//! shapes.

use std::sync::Arc;

use crate::data::{ChartData, Dataset};
use crate::dimensions::Dimensions;
use crate::layout::{extent, stack, StackOffset};
use crate::scale::{BandScale, LinearScale, TimeScale};

/// Tick count the value axis is niced against.
pub const NICE_TICKS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum XSpec {
    Band { inner: f32, outer: f32 },
    /// Time scale for dated data, zero-padding bands otherwise.
    Time,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum YSpec {
    /// `[0, max value]`, niced.
    Max,
    /// `[0, max per-point total]`, niced.
    StackedTotal,
    /// Extent of the wiggle-offset stack.
    Stream,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSpec {
    pub x: XSpec,
    pub y: YSpec,
}

#[derive(Clone, Debug, PartialEq)]
pub enum XScale {
    Band(BandScale),
    Time(TimeScale),
}

impl XScale {
    /// Center of the point at `index`.
    pub fn position(&self, index: usize, data: &Dataset) -> Option<f32> {
        match self {
            XScale::Band(b) => b.center(index),
            XScale::Time(t) => data
                .points()
                .get(index)
                .and_then(|p| p.key().date())
                .map(|d| t.map(d)),
        }
    }

    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            XScale::Band(b) => Some(b),
            XScale::Time(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScaleSet {
    pub x: XScale,
    pub y: LinearScale,
}

impl ScaleSet {
    pub fn build(data: &Dataset, dims: &Dimensions, spec: ScaleSpec, series: &[String]) -> Self {
        let (bw, bh) = (dims.bounded_width, dims.bounded_height);

        let x = match spec.x {
            XSpec::Band { inner, outer } => XScale::Band(BandScale::new(data.ids(), 0.0, bw, inner, outer)),
            XSpec::Time => {
                let dates = data.points().iter().filter_map(|p| p.key().date());
                match (dates.clone().min(), dates.max()) {
                    (Some(lo), Some(hi)) if data.is_temporal() => XScale::Time(TimeScale::new(lo, hi, 0.0, bw)),
                    _ => XScale::Band(BandScale::new(data.ids(), 0.0, bw, 0.0, 0.0)),
                }
            }
        };

        let y = match spec.y {
            YSpec::Max => LinearScale::new(0.0, data.max_value(series), bh, 0.0).nice(NICE_TICKS),
            YSpec::StackedTotal => LinearScale::new(0.0, data.max_total(series), bh, 0.0).nice(NICE_TICKS),
            YSpec::Stream => {
                let (lo, hi) = extent(&stack(data, series, StackOffset::Wiggle));
                LinearScale::new(lo, hi, bh, 0.0)
            }
        };

        Self { x, y }
    }
}

struct CacheKey {
    // Holding the data keeps its allocation alive, so identity stays unique.
    data: ChartData,
    dims: Dimensions,
    spec: ScaleSpec,
    series: Vec<String>,
}

/// Rebuilds scales only when the data identity, dimensions, spec or series
/// change.
#[derive(Default)]
pub struct ScaleCache {
    key: Option<CacheKey>,
    scales: Option<Arc<ScaleSet>>,
    builds: u64,
}

impl ScaleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        data: &ChartData,
        table: &Dataset,
        dims: &Dimensions,
        spec: ScaleSpec,
        series: &[String],
    ) -> Arc<ScaleSet> {
        let hit = self.key.as_ref().is_some_and(|k| {
            k.data.identity() == data.identity() && k.dims == *dims && k.spec == spec && k.series == series
        });
        if let (true, Some(scales)) = (hit, self.scales.as_ref()) {
            tracing::trace!("scale cache hit");
            return Arc::clone(scales);
        }

        let scales = Arc::new(ScaleSet::build(table, dims, spec, series));
        self.builds += 1;
        tracing::debug!(builds = self.builds, y_domain = ?scales.y.domain(), "scales rebuilt");
        self.key = Some(CacheKey {
            data: data.clone(),
            dims: *dims,
            spec,
            series: series.to_vec(),
        });
        self.scales = Some(Arc::clone(&scales));
        scales
    }

    /// Number of rebuilds so far.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.scales = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataPoint;
    use crate::dimensions::Margins;

    fn values(vs: &[f32]) -> Dataset {
        Dataset::new(
            vs.iter()
                .enumerate()
                .map(|(i, v)| DataPoint::labeled(format!("c{i}")).with("value", *v))
                .collect(),
        )
        .unwrap()
    }

    const BAR: ScaleSpec = ScaleSpec {
        x: XSpec::Band { inner: 0.2, outer: 0.1 },
        y: YSpec::Max,
    };

    #[test]
    fn value_domain_is_niced_from_zero() {
        let d = values(&[10.0, 45.0, 30.0, 65.0, 50.0, 85.0]);
        let dims = Dimensions::new(400.0, 300.0, Margins::ZERO);
        let s = ScaleSet::build(&d, &dims, BAR, &["value".into()]);
        let (lo, hi) = s.y.domain();
        assert_eq!(lo, 0.0);
        assert!(hi > 85.0);
        assert_eq!(hi % 10.0, 0.0);
        assert_eq!(s.y.map(0.0), 300.0);
    }

    #[test]
    fn bands_cover_the_bounded_width() {
        let d = values(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let dims = Dimensions::new(500.0, 200.0, Margins::ZERO);
        let s = ScaleSet::build(&d, &dims, BAR, &["value".into()]);
        let band = s.x.as_band().unwrap();
        let n = band.len() as f32;
        let covered = band.band_width() * n + band.gap() * (n - 1.0) + band.outer() * 2.0;
        assert!((covered - 500.0).abs() < 1e-3);
        for i in 0..band.len() {
            let x = band.band_start(i).unwrap();
            assert!(x >= 0.0 && x + band.band_width() <= 500.0 + 1e-3);
        }
    }

    #[test]
    fn time_spec_falls_back_to_bands_for_labels() {
        let d = values(&[1.0, 2.0]);
        let dims = Dimensions::new(100.0, 100.0, Margins::ZERO);
        let spec = ScaleSpec { x: XSpec::Time, y: YSpec::Stream };
        let s = ScaleSet::build(&d, &dims, spec, &["value".into()]);
        assert!(matches!(s.x, XScale::Band(_)));
    }

    #[test]
    fn cache_rebuilds_only_on_change() {
        let data = ChartData::from(values(&[1.0, 2.0]));
        let table = data.table().unwrap().clone();
        let dims = Dimensions::new(100.0, 100.0, Margins::ZERO);
        let series = vec!["value".to_string()];
        let mut cache = ScaleCache::new();
        let a = cache.get(&data, &table, &dims, BAR, &series);
        let b = cache.get(&data, &table, &dims, BAR, &series);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.builds(), 1);
        let wider = Dimensions::new(200.0, 100.0, Margins::ZERO);
        cache.get(&data, &table, &wider, BAR, &series);
        assert_eq!(cache.builds(), 2);
        let other = ChartData::from(values(&[1.0, 2.0]));
        cache.get(&other, &table, &wider, BAR, &series);
        assert_eq!(cache.builds(), 3);
    }
}
