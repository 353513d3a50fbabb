use crate::data::Dataset;

/// Baseline placement for stacked layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackOffset {
    /// First layer sits on zero.
    Zero,
    /// Baseline shifted per sample to minimise the weighted slope of all
    /// layers (streamgraph).
    Wiggle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackBand {
    pub lower: f32,
    pub upper: f32,
    pub value: f32,
}

/// One series' bands, one per data point.
#[derive(Clone, Debug, PartialEq)]
pub struct StackLayer {
    pub series: String,
    pub bands: Vec<StackBand>,
}

impl StackLayer {
    pub fn total(&self) -> f32 {
        self.bands.iter().map(|b| b.value).sum()
    }
}

/// Stack `series` in the given order. Absent values count as zero and
/// negative values are clamped to zero.
pub fn stack(data: &Dataset, series: &[String], offset: StackOffset) -> Vec<StackLayer> {
    let values: Vec<Vec<f32>> = series
        .iter()
        .map(|s| {
            data.points()
                .iter()
                .map(|p| p.value_or_zero(s).max(0.0))
                .collect()
        })
        .collect();

    let m = data.len();
    let mut baseline = match offset {
        StackOffset::Zero => vec![0.0; m],
        StackOffset::Wiggle => wiggle_baseline(&values, m),
    };

    series
        .iter()
        .zip(values)
        .map(|(name, vals)| {
            let bands = vals
                .iter()
                .zip(baseline.iter_mut())
                .map(|(v, base)| {
                    let band = StackBand {
                        lower: *base,
                        upper: *base + v,
                        value: *v,
                    };
                    *base = band.upper;
                    band
                })
                .collect();
            StackLayer {
                series: name.clone(),
                bands,
            }
        })
        .collect()
}

fn wiggle_baseline(values: &[Vec<f32>], m: usize) -> Vec<f32> {
    let mut baseline = vec![0.0; m];
    if values.is_empty() || m == 0 {
        return baseline;
    }
    let mut y = 0.0f32;
    for j in 1..m {
        let mut total = 0.0;
        let mut weighted = 0.0;
        let mut below = 0.0;
        for layer in values {
            let delta = layer[j] - layer[j - 1];
            let slope = delta / 2.0 + below;
            below += delta;
            total += layer[j];
            weighted += slope * layer[j];
        }
        baseline[j - 1] = y;
        if total != 0.0 {
            y -= weighted / total;
        }
    }
    baseline[m - 1] = y;
    baseline
}

/// Lowest and highest edge over all layers; `(0, 0)` when empty.
pub fn extent(layers: &[StackLayer]) -> (f32, f32) {
    let mut bands = layers.iter().flat_map(|l| l.bands.iter());
    let Some(first) = bands.next() else {
        return (0.0, 0.0);
    };
    bands.fold((first.lower, first.upper), |(lo, hi), b| {
        (lo.min(b.lower), hi.max(b.upper))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataPoint;

    fn series(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn zero_offset_accumulates_in_series_order() {
        let d = Dataset::new(vec![DataPoint::labeled("A")
            .with("v1", 30.0)
            .with("v2", 20.0)
            .with("v3", 10.0)])
        .unwrap();
        let layers = stack(&d, &series(&["v1", "v2", "v3"]), StackOffset::Zero);
        let ends: Vec<f32> = layers.iter().map(|l| l.bands[0].upper).collect();
        assert_eq!(ends, vec![30.0, 50.0, 60.0]);
        assert_eq!(layers[1].bands[0].lower, 30.0);
    }

    #[test]
    fn absent_series_stack_as_zero() {
        let d = Dataset::new(vec![
            DataPoint::labeled("A").with("a", 1.0).with("b", 2.0),
            DataPoint::labeled("B").with("b", 5.0),
        ])
        .unwrap();
        let layers = stack(&d, &series(&["a", "b"]), StackOffset::Zero);
        assert_eq!(layers[0].bands[1].upper, 0.0);
        assert_eq!(layers[1].bands[1].upper, 5.0);
    }

    #[test]
    fn wiggle_keeps_layer_thickness() {
        let d = Dataset::new(vec![
            DataPoint::labeled("1").with("a", 1.0).with("b", 4.0),
            DataPoint::labeled("2").with("a", 3.0).with("b", 2.0),
            DataPoint::labeled("3").with("a", 6.0).with("b", 1.0),
        ])
        .unwrap();
        let layers = stack(&d, &series(&["a", "b"]), StackOffset::Wiggle);
        for layer in &layers {
            for b in &layer.bands {
                assert!((b.upper - b.lower - b.value).abs() < 1e-5);
            }
        }
        assert_eq!(layers[0].bands[0].lower, 0.0);
        // Growth in the bottom layer pushes the baseline down.
        assert!(layers[0].bands[2].lower < 0.0);
        let (lo, hi) = extent(&layers);
        assert!(lo < 0.0 && hi > 0.0);
    }
}
