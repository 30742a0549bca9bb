use crate::Result;
use chrono::{DateTime, Local, Utc};
use ohno::app_err;

/// Seconds between the Unix epoch and the reference date Reflect timestamps
/// are offset from (2001-01-01 00:00:00 UTC).
pub const EPOCH_OFFSET_SECONDS: f64 = 978_307_200.0;

/// Convert a domain timestamp (fractional seconds since the reference date)
/// into the two fixed row fields: the numeric timestamp, carried through
/// unchanged, and the local-time display string.
///
/// # Errors
///
/// Returns an error if the input is not a finite number or falls outside the
/// representable date range.
pub fn normalize_timestamp(domain: f64) -> Result<(f64, String)> {
    if !domain.is_finite() {
        return Err(app_err!("reflection date {domain} is not a finite number"));
    }

    let unix = domain + EPOCH_OFFSET_SECONDS;

    #[expect(clippy::cast_possible_truncation, reason = "whole seconds of any representable date fit in i64")]
    let seconds = unix.floor() as i64;

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the fractional part scaled to nanoseconds is always in 0..1e9"
    )]
    let nanos = ((unix - unix.floor()) * 1_000_000_000.0) as u32;

    let instant =
        DateTime::<Utc>::from_timestamp(seconds, nanos).ok_or_else(|| app_err!("reflection date {domain} is out of range"))?;
    let date = instant.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string();

    Ok((domain, date))
}
