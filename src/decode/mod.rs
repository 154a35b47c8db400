//! Layout sniffing: recover the [`Format`] that produced a date-time string.
//!
//! # How it works
//!
//! Every field has a fixed width, so each axis leaves its mark at a known
//! byte offset.  The decoder inspects those offsets in a fixed order; later
//! steps rely on what earlier ones found.
//!
//! | Step | Offset | Decides |
//! |------|--------|---------|
//! | 1 | length | 15..=29 or reject |
//! | 2 | 8, then 10 | where the date ends, date-time separator |
//! | 3 | 2, then 4 | date order and separator (separated dates only) |
//! | 4 | dt + 3 | time separator |
//! | 5 | end of seconds | precision from the `.` suffix length |
//!
//! A date without separators is eight bare digits in either order; the
//! date-time separator settles it (`T` = yyyy_mm_dd, `t` = dd_mm_yyyy) and
//! any other separator there is rejected.
//!
//! Decoding is all-or-nothing: either every axis is recovered and every
//! digit position holds a digit, or the input is rejected.  Only the shape
//! is checked; `99-99-9999` passes.

use thiserror::Error;

use crate::encode::{BUFSIZE_MAX, BUFSIZE_MIN};
use crate::flags::{DateOrder, DateSep, DateTimeSep, Format, Precision, TimeSep, INVALID};

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("length {0} outside {}..={}", BUFSIZE_MIN, BUFSIZE_MAX)]
    Length(usize),
    #[error("no date-time separator at offset 8 or 10")]
    NoDateTimeSeparator,
    #[error("date without separators cannot be followed by {:?}", as_char(.0))]
    SeparatorPairing(u8),
    #[error("malformed date")]
    DateLayout,
    #[error("malformed time")]
    TimeLayout,
    #[error("fractional suffix of {0} digits, expected 3, 6 or 9")]
    Fraction(usize),
    #[error("{0} unexpected bytes after the seconds field")]
    TrailingBytes(usize),
}

// ── Decoding ─────────────────────────────────────────────────────────────────

/// Recover the layout of `buf`.
pub fn decode(buf: &[u8]) -> Result<Format, DecodeError> {
    let len = buf.len();
    if !(BUFSIZE_MIN..=BUFSIZE_MAX).contains(&len) {
        return Err(DecodeError::Length(len));
    }

    // len >= 15, offsets up to 14 are in bounds.
    let (dt_pos, dt_sep) = match (DateTimeSep::from_byte(buf[8]), DateTimeSep::from_byte(buf[10])) {
        (Some(sep), _)    => (8, sep),
        (None, Some(sep)) => (10, sep),
        (None, None)      => return Err(DecodeError::NoDateTimeSeparator),
    };

    let (date_order, date_sep) = if dt_pos == 8 {
        bare_date(&buf[..8], dt_sep)?
    } else {
        separated_date(&buf[..10])?
    };

    let time = &buf[dt_pos + 1..];
    let (time_sep, time_len) = time_of_day(time)?;
    let precision = fraction(&time[time_len..])?;

    // bare_date only admits the paired separator.
    Ok(Format::from_paired_axes(date_order, date_sep, dt_sep, time_sep, precision))
}

#[inline]
pub fn decode_str(s: &str) -> Result<Format, DecodeError> {
    decode(s.as_bytes())
}

/// Raw-mask form of [`decode`]: the flag bits, or [`INVALID`] on rejection.
#[inline]
pub fn get_flags(buf: &[u8]) -> u32 {
    decode(buf).map_or(INVALID, Format::bits)
}

// ── Steps ────────────────────────────────────────────────────────────────────

/// `yyyymmdd` or `ddmmyyyy`, told apart by the separator that follows.
fn bare_date(date: &[u8], dt_sep: DateTimeSep) -> Result<(DateOrder, DateSep), DecodeError> {
    let order = match dt_sep {
        DateTimeSep::UpperT => DateOrder::YyyyMmDd,
        DateTimeSep::LowerT => DateOrder::DdMmYyyy,
        other => return Err(DecodeError::SeparatorPairing(other.byte())),
    };
    if !all_digits(date) {
        return Err(DecodeError::DateLayout);
    }
    Ok((order, DateSep::Empty))
}

/// `dd?mm?yyyy` (separator at 2) or `yyyy?mm?dd` (separator at 4).
fn separated_date(date: &[u8]) -> Result<(DateOrder, DateSep), DecodeError> {
    let (order, sep, first, second) = if let Some(sep) = DateSep::from_byte(date[2]) {
        (DateOrder::DdMmYyyy, sep, 2, 5)
    } else if let Some(sep) = DateSep::from_byte(date[4]) {
        (DateOrder::YyyyMmDd, sep, 4, 7)
    } else {
        return Err(DecodeError::DateLayout);
    };

    if date[second] != date[first] {
        return Err(DecodeError::DateLayout);
    }
    let digits_ok = date
        .iter()
        .enumerate()
        .all(|(i, b)| i == first || i == second || b.is_ascii_digit());
    if !digits_ok {
        return Err(DecodeError::DateLayout);
    }
    Ok((order, sep))
}

/// `hh?mm?ss` or `hhmmss`. Returns the separator and the bytes consumed.
fn time_of_day(time: &[u8]) -> Result<(TimeSep, usize), DecodeError> {
    match time.get(2).copied().and_then(TimeSep::from_byte) {
        Some(sep) => {
            let t = time.get(..8).ok_or(DecodeError::TimeLayout)?;
            let ok = t[5] == t[2]
                && t.iter()
                    .enumerate()
                    .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
            if !ok {
                return Err(DecodeError::TimeLayout);
            }
            Ok((sep, 8))
        }
        None => {
            let t = time.get(..6).ok_or(DecodeError::TimeLayout)?;
            if !all_digits(t) {
                return Err(DecodeError::TimeLayout);
            }
            Ok((TimeSep::Empty, 6))
        }
    }
}

/// Nothing (seconds) or `.` followed by exactly 3, 6 or 9 digits.
fn fraction(rest: &[u8]) -> Result<Precision, DecodeError> {
    match rest.split_first() {
        None => Ok(Precision::Secs),
        Some((b'.', digits)) => {
            let n = digits.len();
            if n % 3 != 0 || !all_digits(digits) {
                return Err(DecodeError::Fraction(n));
            }
            Precision::from_digits(n).ok_or(DecodeError::Fraction(n))
        }
        Some(_) => Err(DecodeError::TrailingBytes(rest.len())),
    }
}

fn as_char(b: &u8) -> char {
    char::from(*b)
}

#[inline]
fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::to_dt_str;
    use crate::flags::*;

    const TS: u64 = 1_546_966_223_006_057_057;

    #[test]
    fn known_vector() {
        let f = decode_str("2019-01-08T16:50:23.006057057").unwrap();
        assert_eq!(f.bits(), YYYY_MM_DD | DATE_SEP_DASH | DT_SEP_UPPER_T | TIME_SEP_COLON | NSECS);
        assert_eq!(
            get_flags(b"08-01-2019 16:50:23.006"),
            DD_MM_YYYY | DATE_SEP_DASH | DT_SEP_SPACE | TIME_SEP_COLON | MSECS
        );
        assert_eq!(
            get_flags(b"20190108T165023"),
            YYYY_MM_DD | DATE_SEP_EMPTY | DT_SEP_UPPER_T | TIME_SEP_EMPTY | SECS
        );
        assert_eq!(
            get_flags(b"08.01.2019_16.50.23.006057"),
            DD_MM_YYYY | DATE_SEP_POINT | DT_SEP_UNDERSCORE | TIME_SEP_POINT | USECS
        );
    }

    #[test]
    fn roundtrip_every_format() {
        for ts in [0, TS, u64::MAX] {
            for f in Format::all() {
                let s = to_dt_str(ts, f);
                assert_eq!(decode_str(&s), Ok(f), "{s}");
            }
        }
    }

    #[test]
    fn rejects_length() {
        assert_eq!(decode(b"20190108T16502"), Err(DecodeError::Length(14)));
        assert_eq!(decode(b"2019-01-08T16:50:23.0060570570"), Err(DecodeError::Length(30)));
        assert_eq!(decode(b""), Err(DecodeError::Length(0)));
        assert_eq!(get_flags(b"2019-01-08T16:50:23.0060570570"), INVALID);
    }

    #[test]
    fn rejects_missing_dt_separator() {
        assert_eq!(decode(b"2019-01-08X16:50:23"), Err(DecodeError::NoDateTimeSeparator));
        assert_eq!(decode(b"20190108X165023"), Err(DecodeError::NoDateTimeSeparator));
    }

    #[test]
    fn bare_date_needs_matching_t() {
        assert_eq!(decode(b"20190108 165023"), Err(DecodeError::SeparatorPairing(b' ')));
        assert_eq!(decode(b"20190108/16:50:23"), Err(DecodeError::SeparatorPairing(b'/')));
        assert_eq!(decode(b"20190108_165023.006"), Err(DecodeError::SeparatorPairing(b'_')));
        // Same digits, the separator alone picks the order.
        assert_eq!(get_flags(b"20190108T165023") & DATE_ORDER_MASK, YYYY_MM_DD);
        assert_eq!(get_flags(b"20190108t165023") & DATE_ORDER_MASK, DD_MM_YYYY);
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(decode(b"2019-0a-08T16:50:23"), Err(DecodeError::DateLayout));
        assert_eq!(decode(b"2o190108T165023"), Err(DecodeError::DateLayout));
        assert_eq!(decode(b"08-01-2O19 16:50:23"), Err(DecodeError::DateLayout));
        assert_eq!(decode(b"2019-01-08T16:5x:23"), Err(DecodeError::TimeLayout));
        assert_eq!(decode(b"20190108T1650z3"), Err(DecodeError::TimeLayout));
        assert_eq!(decode(b"2019-01-08T16:50:23.00x"), Err(DecodeError::Fraction(3)));
    }

    #[test]
    fn rejects_mixed_separators() {
        assert_eq!(decode(b"2019-01.08T16:50:23"), Err(DecodeError::DateLayout));
        assert_eq!(decode(b"08.01-2019T16:50:23"), Err(DecodeError::DateLayout));
        assert_eq!(decode(b"2019-01-08T16:50.23"), Err(DecodeError::TimeLayout));
        assert_eq!(decode(b"2019:01:08T16:50:23"), Err(DecodeError::DateLayout));
    }

    #[test]
    fn fraction_lengths() {
        let base = "2019-01-08T16:50:23.";
        for n in 0..=9 {
            let s = format!("{base}{}", "1".repeat(n));
            let got = decode_str(&s).map(Format::precision);
            match n {
                3 => assert_eq!(got, Ok(Precision::Msecs)),
                6 => assert_eq!(got, Ok(Precision::Usecs)),
                9 => assert_eq!(got, Ok(Precision::Nsecs)),
                _ => assert_eq!(got, Err(DecodeError::Fraction(n)), "{s}"),
            }
        }
        // Shortest strings: bare date and time, fraction only.
        assert_eq!(decode(b"20190108T165023.0060"), Err(DecodeError::Fraction(4)));
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(decode(b"2019-01-08T16:50:23Z"), Err(DecodeError::TrailingBytes(1)));
        assert_eq!(decode(b"20190108T165023+0100"), Err(DecodeError::TrailingBytes(5)));
    }

    #[test]
    fn short_time_is_rejected_not_read_past() {
        // Separated date leaves only four bytes for the time.
        assert_eq!(decode(b"2019-01-08T1650"), Err(DecodeError::TimeLayout));
        assert_eq!(decode(b"2019-01-08T16:50"), Err(DecodeError::TimeLayout));
    }
}
