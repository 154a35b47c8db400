//! Civil calendar conversion for nanosecond timestamps.
//!
//! A timestamp is a `u64` count of nanoseconds since 1970-01-01T00:00:00Z.
//! That covers roughly 584 years; nothing here range-checks, arithmetic past
//! the end of `u64` wraps.
//!
//! Day counts are converted with the closed-form civil_from_days /
//! days_from_civil pair (proleptic Gregorian, March-based internal year).
//! No leap seconds, no time zones beyond a whole-hour shift in [`now`].

use chrono::Utc;

pub const NANOS_PER_SEC: u64 = 1_000_000_000;
pub const SECS_PER_MIN:  u64 = 60;
pub const SECS_PER_HOUR: u64 = 60 * SECS_PER_MIN;
pub const SECS_PER_DAY:  u64 = 24 * SECS_PER_HOUR;

/// Days from 0000-03-01 to 1970-01-01.
const EPOCH_ADJUSTMENT_DAYS: u64 = 719_468;
const DAYS_PER_ERA:          u64 = 146_097;
const DAYS_PER_4_YEARS:      u64 = 3 * 365 + 366;
const DAYS_PER_CENTURY:      u64 = 36_524;
const YEARS_PER_ERA:         u64 = 400;

// ── Clock ────────────────────────────────────────────────────────────────────

/// Current wall-clock time in nanoseconds, shifted by `offset_hours`.
///
/// The shift is linear: no DST, no zone tables, whole hours only.
pub fn now(offset_hours: i32) -> u64 {
    let now = Utc::now();
    let ts = (now.timestamp() as u64)
        .wrapping_mul(NANOS_PER_SEC)
        .wrapping_add(u64::from(now.timestamp_subsec_nanos()));
    shift_hours(ts, offset_hours)
}

/// Add (or subtract, for negative `offset_hours`) whole hours.
pub fn shift_hours(ts: u64, offset_hours: i32) -> u64 {
    let delta = u64::from(offset_hours.unsigned_abs())
        .wrapping_mul(SECS_PER_HOUR * NANOS_PER_SEC);
    if offset_hours < 0 {
        ts.wrapping_sub(delta)
    } else {
        ts.wrapping_add(delta)
    }
}

// ── Seconds interop ──────────────────────────────────────────────────────────

/// Whole seconds since the epoch, sub-second part discarded.
#[inline]
pub fn to_seconds(ts: u64) -> i64 {
    (ts / NANOS_PER_SEC) as i64
}

/// Nanosecond timestamp for whole seconds since the epoch.
#[inline]
pub fn from_seconds(secs: i64) -> u64 {
    (secs as u64).wrapping_mul(NANOS_PER_SEC)
}

// ── CivilDateTime ────────────────────────────────────────────────────────────

/// A timestamp broken into calendar fields. `month` and `day` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CivilDateTime {
    pub year:         u32,
    pub month:        u8,
    pub day:          u8,
    pub hour:         u8,
    pub minute:       u8,
    pub second:       u8,
    pub subsec_nanos: u32,
}

impl CivilDateTime {
    /// Break a nanosecond timestamp into calendar fields.
    pub fn decompose(ts: u64) -> Self {
        let mut secs = ts / NANOS_PER_SEC;
        let subsec_nanos = (ts % NANOS_PER_SEC) as u32;

        let days = secs / SECS_PER_DAY;
        secs %= SECS_PER_DAY;
        let hour = (secs / SECS_PER_HOUR) as u8;
        secs %= SECS_PER_HOUR;
        let minute = (secs / SECS_PER_MIN) as u8;
        let second = (secs % SECS_PER_MIN) as u8;

        let (year, month, day) = civil_from_days(days);

        Self { year, month, day, hour, minute, second, subsec_nanos }
    }

    /// Inverse of [`CivilDateTime::decompose`].
    ///
    /// Fields are trusted: a day past the end of its month simply rolls
    /// into the next one. Dates before 1970 wrap.
    pub fn to_timestamp(&self) -> u64 {
        let days = days_from_civil(self.year, self.month, self.day);
        let secs = days
            .wrapping_mul(SECS_PER_DAY)
            .wrapping_add(u64::from(self.hour) * SECS_PER_HOUR)
            .wrapping_add(u64::from(self.minute) * SECS_PER_MIN)
            .wrapping_add(u64::from(self.second));
        secs.wrapping_mul(NANOS_PER_SEC)
            .wrapping_add(u64::from(self.subsec_nanos))
    }
}

// ── Day-count algorithms ─────────────────────────────────────────────────────

/// Days since 1970-01-01 to `(year, month 1..=12, day 1..=31)`.
///
/// `days` is unsigned, so the shifted count is never negative and the era
/// needs no floor correction.
pub fn civil_from_days(days: u64) -> (u32, u8, u8) {
    let z = days + EPOCH_ADJUSTMENT_DAYS;
    let era = z / DAYS_PER_ERA;
    let doe = z - era * DAYS_PER_ERA;                        // [0, 146096]
    let yoe = (doe - doe / (DAYS_PER_4_YEARS - 1) + doe / DAYS_PER_CENTURY
        - doe / (DAYS_PER_ERA - 1)) / 365;                   // [0, 399]
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);       // [0, 365]
    let mp = (5 * doy + 2) / 153;                            // March = 0
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = yoe + era * YEARS_PER_ERA + u64::from(month <= 2);
    (year as u32, month, day)
}

/// `(year, month 1..=12, day 1..=31)` to days since 1970-01-01.
pub fn days_from_civil(year: u32, month: u8, day: u8) -> u64 {
    let m = u64::from(month);
    let y = u64::from(year).wrapping_sub(u64::from(m <= 2));
    let era = y / YEARS_PER_ERA;
    let yoe = y - era * YEARS_PER_ERA;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + u64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era * DAYS_PER_ERA + doe).wrapping_sub(EPOCH_ADJUSTMENT_DAYS)
}
