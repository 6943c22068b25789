//! Chart composition. A `ChartBuilder` accumulates series and their merged
//! y scale, then finalizes into a `ChartSpec`: a complete, render-ready
//! description with no drawing state of its own.

use crate::error::InsufficientDataError;
use crate::scale::{scale_series, SeriesScale};
use crate::window::{Window, WindowPolicy};

/// Visual margin on each side of the x axis, in hours. Small enough that no
/// partial extra hour shows.
const X_MARGIN: f64 = 0.25;

/// One line on the chart: windowed hourly points plus display metadata.
#[derive(Debug, Clone)]
pub struct SeriesDescriptor {
    pub label: String,
    pub color: (u8, u8, u8),
    /// (hour index, temperature) pairs, x already offset into series hours.
    pub points: Vec<(f64, f64)>,
}

/// Finished chart: everything the rendering surface needs, nothing it has
/// to compute.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub title: String,
    pub series: Vec<SeriesDescriptor>,
    pub x_bounds: [f64; 2],
    /// A tick at every hour position; labelled per `x_labels`.
    pub x_ticks: Vec<f64>,
    pub x_labels: Vec<String>,
    pub y_bounds: [f64; 2],
    /// Tick positions doubling as horizontal gridlines.
    pub y_ticks: Vec<f64>,
    pub y_unit: String,
    /// X position of the vertical "now" marker.
    pub now_x: f64,
}

/// X position for the "now" marker. With a prepended history day the window
/// offset pushes "now" into the second calendar day of the series, so the
/// marker shifts by +24 to stay inside the visible window.
pub fn now_marker_x(policy: WindowPolicy, now_dec: f64) -> f64 {
    match policy {
        WindowPolicy::Multi if now_dec < 24.0 => now_dec + 24.0,
        _ => now_dec,
    }
}

pub struct ChartBuilder {
    window: Window,
    now_x: f64,
    x_labels: Vec<String>,
    series: Vec<SeriesDescriptor>,
    scale: Option<SeriesScale>,
}

impl ChartBuilder {
    pub fn new(window: Window, now_x: f64, x_labels: Vec<String>) -> Self {
        Self {
            window,
            now_x,
            x_labels,
            series: Vec::new(),
            scale: None,
        }
    }

    /// Add one windowed series. Its scale is derived here and merged into
    /// the running union so later series cannot change earlier rounding.
    pub fn add_series(
        &mut self,
        label: &str,
        color: (u8, u8, u8),
        temps: &[f32],
    ) -> Result<(), InsufficientDataError> {
        let scale = scale_series(temps)?;
        self.scale = Some(match self.scale {
            Some(merged) => merged.merge(scale),
            None => scale,
        });
        let points = temps
            .iter()
            .enumerate()
            .map(|(i, &t)| ((self.window.offset + i) as f64, f64::from(t)))
            .collect();
        self.series.push(SeriesDescriptor {
            label: label.to_string(),
            color,
            points,
        });
        Ok(())
    }

    pub fn finish(self, y_unit: String) -> Result<ChartSpec, InsufficientDataError> {
        let scale = self
            .scale
            .ok_or(InsufficientDataError("no series were added"))?;
        let first = self.window.offset;
        let last = self.window.offset + self.window.span;
        Ok(ChartSpec {
            title: format!("{}h temperature", self.window.span),
            series: self.series,
            x_bounds: [first as f64 - X_MARGIN, last as f64 + X_MARGIN],
            x_ticks: (first..=last).map(|h| h as f64).collect(),
            x_labels: self.x_labels,
            y_bounds: [scale.low, scale.padded_high()],
            y_ticks: scale.ticks(),
            y_unit,
            now_x: self.now_x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(offset: usize, span: usize) -> ChartBuilder {
        let window = Window { offset, span };
        let labels = vec![String::new(); span + 1];
        ChartBuilder::new(window, 12.5, labels)
    }

    #[test]
    fn single_series_spec() {
        let mut temps = vec![10.0, 12.0, 14.0, 13.0, 9.0, 8.0, 7.0];
        temps.extend(std::iter::repeat(11.0).take(18));

        let mut b = builder(0, 24);
        b.add_series("Temperature", (0x2c, 0xaf, 0xfe), &temps).unwrap();
        let spec = b.finish("°C".to_string()).unwrap();

        assert_eq!(spec.title, "24h temperature");
        assert_eq!(spec.x_bounds, [-0.25, 24.25]);
        assert_eq!(spec.x_ticks.len(), 25);
        assert_eq!(spec.y_bounds[0], 7.0);
        assert!(spec.y_bounds[1] > 15.0 && spec.y_bounds[1] < 15.01);
        assert_eq!(spec.y_ticks.first(), Some(&7.0));
        assert_eq!(spec.y_ticks.last(), Some(&15.0));
        assert_eq!(spec.series[0].points[0], (0.0, 10.0));
        assert_eq!(spec.series[0].points[24], (24.0, 11.0));
    }

    #[test]
    fn offset_window_shifts_x_positions_and_bounds() {
        let temps = vec![3.0, 6.0, 4.0];
        let mut b = builder(16, 2);
        b.add_series("A", (0, 0, 0), &temps).unwrap();
        let spec = b.finish("°C".to_string()).unwrap();
        assert_eq!(spec.x_bounds, [15.75, 18.25]);
        assert_eq!(spec.series[0].points[0].0, 16.0);
    }

    #[test]
    fn two_series_merge_to_the_union_scale() {
        let mut b = builder(24, 34);
        // (spacing 2, low 4, high 16) and (spacing 5, low 0, high 20).
        b.add_series("A", (1, 2, 3), &[5.0, 15.0]).unwrap();
        b.add_series("B", (4, 5, 6), &[0.0, 19.0]).unwrap();
        let spec = b.finish("°C".to_string()).unwrap();
        assert_eq!(spec.y_bounds[0], 0.0);
        assert_eq!(spec.y_ticks, vec![0.0, 5.0, 10.0, 15.0, 20.0]);
        assert!(spec.y_bounds[1] > 20.0);
    }

    #[test]
    fn empty_builder_cannot_finish() {
        let b = builder(0, 24);
        assert!(b.finish("°C".to_string()).is_err());
    }

    #[test]
    fn degenerate_series_is_refused() {
        let mut b = builder(0, 24);
        assert!(b.add_series("flat", (0, 0, 0), &[9.0; 25]).is_err());
    }

    #[test]
    fn now_marker_shifts_only_in_multi_mode() {
        assert_eq!(now_marker_x(WindowPolicy::Single, 10.5), 10.5);
        assert_eq!(now_marker_x(WindowPolicy::Single, 22.0), 22.0);
        assert_eq!(now_marker_x(WindowPolicy::Multi, 10.5), 34.5);
        assert_eq!(now_marker_x(WindowPolicy::Multi, 0.0), 24.0);
    }
}
