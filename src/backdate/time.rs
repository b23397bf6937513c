use chrono::{DateTime, Months, NaiveDateTime, Offset, SecondsFormat, TimeDelta, TimeZone};

use super::error::BackdateError;

/// Days a fractional month stands for once the whole months are gone.
pub(crate) const DAYS_PER_FRACTIONAL_MONTH: f64 = 30.0;

const SECS_PER_DAY: f64 = 86_400.0;

/// Step `now` back by `months`.
///
/// Whole months are calendar months on the local wall clock, clamping to the end of shorter
/// months. The remainder is taken as a share of [`DAYS_PER_FRACTIONAL_MONTH`], to the second.
/// A repeated local hour resolves to the earlier instant; a skipped one moves forward past the
/// gap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn months_before<Tz: TimeZone>(
    now: &DateTime<Tz>,
    months: f64,
) -> Result<DateTime<Tz>, BackdateError> {
    let out_of_range = || BackdateError::TimestampOutOfRange {
        now: now.naive_local().to_string(),
        months,
    };
    if !months.is_finite() || months <= 0.0 || months > f64::from(u32::MAX) {
        return Err(out_of_range());
    }
    let whole = months.trunc() as u32;
    let remainder_secs = (months.fract() * DAYS_PER_FRACTIONAL_MONTH * SECS_PER_DAY).round() as i64;
    let remainder = TimeDelta::try_seconds(remainder_secs).ok_or_else(out_of_range)?;

    let naive = now
        .naive_local()
        .checked_sub_months(Months::new(whole))
        .and_then(|dt| dt.checked_sub_signed(remainder))
        .ok_or_else(out_of_range)?;
    let tz = now.timezone();
    match tz.from_local_datetime(&naive).earliest() {
        Some(dt) => Ok(dt),
        None => skip_gap(&tz, naive).ok_or_else(out_of_range),
    }
}

/// Map a wall-clock time that falls in a DST gap using the offset in effect a day earlier,
/// which lands it after the gap by the same distance it sat inside it.
fn skip_gap<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    let before = naive.checked_sub_signed(TimeDelta::try_days(1)?)?;
    let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
    let utc = naive
        .checked_sub_signed(TimeDelta::try_seconds(i64::from(offset.local_minus_utc()))?)?;
    Some(tz.from_utc_datetime(&utc))
}

/// ISO-8601 with whole seconds and a numeric offset, e.g. `2023-11-15T10:00:00+00:00`.
pub(crate) fn format_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}
