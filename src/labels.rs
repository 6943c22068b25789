//! X tick labels: a date at each midnight crossing, a time every two hours,
//! nothing at odd hours. Empty labels keep their tick for grid alignment.

use chrono::{Days, NaiveDate};

/// One label per hour `offset ..= offset + span` (`span + 1` in total).
/// `reference` is the calendar date hour 0 of the series falls on: today in
/// single-location mode, yesterday when a history day was prepended.
pub fn hour_labels(offset: usize, span: usize, reference: NaiveDate) -> Vec<String> {
    (offset..=offset + span)
        .map(|hr| {
            if hr % 24 == 0 {
                let date = reference + Days::new((hr / 24) as u64);
                date.format("%d %b").to_string()
            } else if hr % 2 == 0 {
                format!("{}:00", hr % 24)
            } else {
                String::new()
            }
        })
        .collect()
}
