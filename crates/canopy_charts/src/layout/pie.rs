use std::f32::consts::TAU;

/// Angular extent of one value; angles run clockwise from 12 o'clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub value: f32,
    pub start: f32,
    pub end: f32,
}

impl PieSlice {
    pub fn span(&self) -> f32 {
        self.end - self.start
    }

    pub fn mid(&self) -> f32 {
        (self.start + self.end) * 0.5
    }
}

/// Assign angles proportional to `values` in input order. Negative values
/// count as zero; an all-zero input gives empty slices.
pub fn pie(values: &[f32]) -> Vec<PieSlice> {
    let sum: f32 = values.iter().map(|v| v.max(0.0)).sum();
    let k = if sum > 0.0 { TAU / sum } else { 0.0 };
    let mut angle = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(index, v)| {
            let value = v.max(0.0);
            let start = angle;
            angle += value * k;
            PieSlice {
                index,
                value,
                start,
                end: angle,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_cover_the_circle_proportionally() {
        let values = [30.0, 20.0, 25.0, 15.0, 10.0];
        let slices = pie(&values);
        let total: f32 = slices.iter().map(PieSlice::span).sum();
        assert!((total - TAU).abs() < 1e-4);
        for (s, v) in slices.iter().zip(values) {
            assert!((s.span() / TAU - v / 100.0).abs() < 1e-5);
        }
        assert_eq!(slices[0].start, 0.0);
        assert_eq!(slices[1].start, slices[0].end);
    }

    #[test]
    fn zero_sum_gives_empty_slices() {
        let slices = pie(&[0.0, -3.0]);
        assert!(slices.iter().all(|s| s.span() == 0.0));
    }
}
