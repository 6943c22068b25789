//! Picks which slice of the fetched hourly series to display so that "now"
//! sits sensibly inside the visible window.

use crate::error::ConfigError;

/// Window policy, chosen from the number of charted locations. The cut
/// points are tied to the fetch range each policy assumes; `Config::validate`
/// checks that fit before anything is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPolicy {
    /// One location, no history day fetched.
    Single,
    /// Several locations, fetched with one day of history prepended.
    Multi,
}

impl WindowPolicy {
    pub fn for_locations(count: usize) -> Self {
        if count > 1 {
            WindowPolicy::Multi
        } else {
            WindowPolicy::Single
        }
    }

    /// Hours spanned by the visible window (one more point than this).
    pub fn span_hours(self) -> usize {
        match self {
            WindowPolicy::Single => 24,
            WindowPolicy::Multi => 34,
        }
    }

    /// Offset into the fetched series for the current decimal hour-of-day.
    /// Pure function of `now_dec`; the thresholds are inclusive on the high
    /// side, so 16:00 exactly already switches to the later window.
    pub fn offset_at(self, now_dec: f64) -> usize {
        match self {
            WindowPolicy::Single => {
                if now_dec >= 16.0 {
                    16
                } else {
                    0
                }
            }
            WindowPolicy::Multi => {
                if now_dec < 4.0 {
                    10
                } else if now_dec < 16.0 {
                    24
                } else {
                    34
                }
            }
        }
    }

    /// Largest offset this policy can produce, for startup validation.
    pub fn max_offset(self) -> usize {
        match self {
            WindowPolicy::Single => 16,
            WindowPolicy::Multi => 34,
        }
    }

    /// History days the fetched series is assumed to start with. Hour 0 of
    /// the series is midnight this many days before today.
    pub fn history_days(self) -> u64 {
        match self {
            WindowPolicy::Single => 0,
            WindowPolicy::Multi => 1,
        }
    }
}

/// A contiguous sub-range of the fetched series: `span + 1` hourly points
/// starting at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: usize,
    pub span: usize,
}

impl Window {
    pub fn at(policy: WindowPolicy, now_dec: f64) -> Self {
        Self {
            offset: policy.offset_at(now_dec),
            span: policy.span_hours(),
        }
    }

    pub fn points(&self) -> usize {
        self.span + 1
    }

    /// Slice the window out of a fetched series. A series too short for the
    /// window means the fetch did not deliver what the configuration
    /// promised; that is a configuration error, never silent truncation.
    pub fn slice<'a>(&self, series: &'a [f32]) -> Result<&'a [f32], ConfigError> {
        series
            .get(self.offset..self.offset + self.points())
            .ok_or_else(|| {
                ConfigError(format!(
                    "window [{}, {}] runs past the fetched series ({} hours)",
                    self.offset,
                    self.offset + self.span,
                    series.len()
                ))
            })
    }
}
