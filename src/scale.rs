//! Derives a readable y axis from raw temperatures: tick spacing from a
//! fixed candidate walk, bounds rounded outward to spacing multiples.

use crate::error::InsufficientDataError;

/// Cap on horizontal gridlines; spacing escalates until the data range fits.
const MAX_GRIDLINES: f64 = 8.0;

/// Fraction of one spacing added to the rendered upper limit so the top
/// gridline and any point sitting on it are not clipped.
const TOP_EPSILON: f64 = 0.001;

/// Candidate spacings are 1, 2, 5 scaled by successive decades:
/// 1, 2, 5, 10, 20, 50, 100, ...
fn candidate(idx: usize) -> f64 {
    const BASE: [f64; 3] = [1.0, 2.0, 5.0];
    BASE[idx % 3] * 10f64.powi((idx / 3) as i32)
}

fn tick_spacing(range: f64) -> f64 {
    let mut idx = 0;
    while range / candidate(idx) > MAX_GRIDLINES {
        idx += 1;
    }
    candidate(idx)
}

/// Tick spacing plus outward-rounded bounds for one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesScale {
    pub spacing: f64,
    pub low: f64,
    pub high: f64,
}

/// Scale a single series. Errors on anything an axis cannot be derived
/// from: fewer than two points, a flat series, or non-finite values.
pub fn scale_series(values: &[f32]) -> Result<SeriesScale, InsufficientDataError> {
    if values.len() < 2 {
        return Err(InsufficientDataError("series has fewer than two points"));
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(f64::from(v)), hi.max(f64::from(v)))
        });
    if !min.is_finite() || !max.is_finite() {
        return Err(InsufficientDataError("series contains non-finite values"));
    }
    if max <= min {
        return Err(InsufficientDataError("temperature range is zero"));
    }

    let spacing = tick_spacing(max - min);
    Ok(SeriesScale {
        spacing,
        low: spacing * (min / spacing).floor(),
        high: spacing * (max / spacing).floor() + spacing,
    })
}

impl SeriesScale {
    /// Combine with another series' scale: coarsest spacing, widest bounds.
    /// Scales are computed per series first and merged second; merging raw
    /// values first would round against the wrong spacing.
    pub fn merge(self, other: SeriesScale) -> SeriesScale {
        SeriesScale {
            spacing: self.spacing.max(other.spacing),
            low: self.low.min(other.low),
            high: self.high.max(other.high),
        }
    }

    /// Tick positions from `low` to `high` in spacing steps.
    pub fn ticks(&self) -> Vec<f64> {
        let n = ((self.high - self.low) / self.spacing + 1e-9).floor() as usize;
        (0..=n).map(|i| self.low + i as f64 * self.spacing).collect()
    }

    /// Upper axis limit with the anti-clipping nudge applied.
    pub fn padded_high(&self) -> f64 {
        self.high + TOP_EPSILON * self.spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_extend_by_decades() {
        let want = [1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0];
        for (idx, &w) in want.iter().enumerate() {
            assert_eq!(candidate(idx), w);
        }
    }

    #[test]
    fn spacing_is_minimal_in_the_candidate_set() {
        for range in [0.5, 3.0, 8.0, 8.1, 16.0, 17.0, 40.0, 41.0, 79.9, 1000.0] {
            let spacing = tick_spacing(range);
            assert!(range / spacing <= MAX_GRIDLINES);
            // No smaller candidate also fits.
            let mut idx = 0;
            while candidate(idx) < spacing {
                assert!(range / candidate(idx) > MAX_GRIDLINES);
                idx += 1;
            }
        }
    }

    #[test]
    fn bounds_contain_the_data_with_one_spacing_of_slack() {
        let cases: &[&[f32]] = &[
            &[7.0, 14.0, 10.0],
            &[-3.2, 4.7, 0.0],
            &[15.0, 99.0],
            &[-40.0, 45.0],
        ];
        for values in cases {
            let s = scale_series(values).unwrap();
            let min = values.iter().cloned().fold(f32::INFINITY, f32::min) as f64;
            let max = values.iter().cloned().fold(f32::NEG_INFINITY, f32::max) as f64;
            assert!(s.low <= min);
            assert!(s.high - s.spacing < max && max <= s.high);
        }
    }

    #[test]
    fn seven_degree_range_keeps_unit_spacing() {
        // 25 hourly values, min 7, max 14.
        let mut values = vec![10.0, 12.0, 14.0, 13.0, 9.0, 8.0, 7.0];
        values.extend(std::iter::repeat(11.0).take(18));
        let s = scale_series(&values).unwrap();
        assert_eq!(s.spacing, 1.0);
        assert_eq!(s.low, 7.0);
        assert_eq!(s.high, 15.0);
        assert_eq!(s.ticks(), (7..=15).map(f64::from).collect::<Vec<_>>());
    }

    #[test]
    fn merge_takes_coarsest_spacing_and_widest_bounds() {
        let a = SeriesScale { spacing: 2.0, low: 4.0, high: 16.0 };
        let b = SeriesScale { spacing: 5.0, low: 0.0, high: 20.0 };
        let merged = a.merge(b);
        assert_eq!(merged, SeriesScale { spacing: 5.0, low: 0.0, high: 20.0 });
    }

    #[test]
    fn merge_is_commutative() {
        let a = scale_series(&[5.0, 15.0]).unwrap();
        let b = scale_series(&[0.0, 19.0]).unwrap();
        assert_eq!(a.merge(b), b.merge(a));
        assert_eq!(a.merge(b), SeriesScale { spacing: 5.0, low: 0.0, high: 20.0 });
    }

    #[test]
    fn huge_ranges_escalate_into_later_decades() {
        assert_eq!(tick_spacing(1000.0), 200.0);
        assert_eq!(tick_spacing(100_000.0), 20_000.0);
    }

    #[test]
    fn degenerate_series_are_rejected() {
        assert!(scale_series(&[]).is_err());
        assert!(scale_series(&[12.5]).is_err());
        assert!(scale_series(&[8.0, 8.0, 8.0]).is_err());
        assert!(scale_series(&[1.0, f32::NAN]).is_err());
    }

    #[test]
    fn padded_high_barely_exceeds_high() {
        let s = SeriesScale { spacing: 2.0, low: 4.0, high: 16.0 };
        assert!(s.padded_high() > s.high);
        assert!(s.padded_high() - s.high < s.spacing * 0.01);
    }
}
