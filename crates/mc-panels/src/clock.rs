//! Deterministic mission clock.
//!
//! Fabricated records are stamped with `epoch + ticks * interval` rather than
//! wall time, so an update rule's output depends only on its inputs.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};

/// 2024-02-26 18:55:00, the moment the seed data describes.
pub fn mission_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, 26)
        .and_then(|d| d.and_hms_opt(18, 55, 0))
        .unwrap_or_default()
}

/// Mission time after `ticks` periods of `interval`.
pub fn at(ticks: u64, interval: Duration) -> NaiveDateTime {
    let elapsed_ms = (interval.as_millis() as i64).saturating_mul(ticks as i64);
    let epoch = mission_epoch();
    epoch
        .checked_add_signed(chrono::Duration::milliseconds(elapsed_ms))
        .unwrap_or(epoch)
}

/// `HH:MM:SS`
pub fn clock_time(ts: NaiveDateTime) -> String {
    ts.format("%H:%M:%S").to_string()
}

/// `HH:MM`
pub fn short_time(ts: NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn stamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_advance_mission_time() {
        let t = at(3, Duration::from_secs(20));
        assert_eq!(clock_time(t), "18:56:00");
        assert_eq!(stamp(t), "2024-02-26 18:56:00");
        assert_eq!(short_time(at(0, Duration::from_secs(1))), "18:55");
    }
}
