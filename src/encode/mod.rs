//! Timestamp to text, into caller-owned fixed-size buffers.
//!
//! Two output shapes:
//!
//! - numeric: the timestamp as bare decimal digits, first divided down to
//!   the requested [`Precision`];
//! - date-time: `<date><dt-sep><time>[.<frac>]` laid out by a [`Format`].
//!
//! Every field has a fixed width, so the longest possible output is known
//! up front ([`BUFSIZE_MAX`]) and the buffers are plain `[u8; BUFSIZE]`.
//! Digits are emitted from the least significant end with a precomputed
//! count; nothing here goes through `core::fmt`.

use crate::civil::{self, CivilDateTime};
use crate::flags::{DateOrder, Format, Precision};

/// Buffer size every encoder requires.
pub const BUFSIZE:     usize = 32;
/// `yyyymmdd` + dt-sep + `hhmmss`.
pub const BUFSIZE_MIN: usize = 15;
/// `yyyy-mm-dd` + dt-sep + `hh:mm:ss` + `.` + nine fractional digits.
pub const BUFSIZE_MAX: usize = 29;

// ── Digit emission ───────────────────────────────────────────────────────────

/// Number of decimal digits in `v` (at least 1).
pub fn num_chars(mut v: u64) -> usize {
    let mut n = 1;
    if v >= 100_000_000_000_000_000 { n += 17; v /= 100_000_000_000_000_000; }
    if v >= 10_000_000_000_000_000  { n += 16; v /= 10_000_000_000_000_000; }
    if v >= 100_000_000             { n += 8;  v /= 100_000_000; }
    if v >= 10_000                  { n += 4;  v /= 10_000; }
    if v >= 100                     { n += 2;  v /= 100; }
    if v >= 10                      { n += 1; }
    n
}

/// Fill all of `out` with the low `out.len()` decimal digits of `v`,
/// most significant first. Short values are zero-padded on the left.
#[inline]
pub fn write_digits(out: &mut [u8], mut v: u64) {
    for slot in out.iter_mut().rev() {
        *slot = b'0' + (v % 10) as u8;
        v /= 10;
    }
}

/// Sequential writer over a byte buffer.
struct Cursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn digits(&mut self, width: usize, v: u64) {
        write_digits(&mut self.buf[self.pos..self.pos + width], v);
        self.pos += width;
    }

    #[inline]
    fn byte(&mut self, b: u8) {
        self.buf[self.pos] = b;
        self.pos += 1;
    }

    #[inline]
    fn opt_byte(&mut self, b: Option<u8>) {
        if let Some(b) = b {
            self.byte(b);
        }
    }
}

// ── Numeric ──────────────────────────────────────────────────────────────────

/// Write `ts` truncated to `precision` as bare decimal digits.
/// Returns the number of bytes written (1..=20).
pub fn to_chars(buf: &mut [u8; BUFSIZE], ts: u64, precision: Precision) -> usize {
    let v = ts / precision.divisor();
    let n = num_chars(v);
    write_digits(&mut buf[..n], v);
    n
}

pub fn to_str(ts: u64, precision: Precision) -> String {
    let mut buf = [0u8; BUFSIZE];
    let n = to_chars(&mut buf, ts, precision);
    ascii_string(&buf[..n])
}

/// Current time (shifted by `offset_hours`) in numeric form.
pub fn now_str(precision: Precision, offset_hours: i32) -> String {
    to_str(civil::now(offset_hours), precision)
}

// ── Date-time ────────────────────────────────────────────────────────────────

/// Write `ts` laid out by `format`. Returns the number of bytes written,
/// always `format.encoded_len()`.
pub fn to_dt_chars(buf: &mut [u8; BUFSIZE], ts: u64, format: Format) -> usize {
    let dt = CivilDateTime::decompose(ts);
    let date_sep = format.date_sep().byte();
    let time_sep = format.time_sep().byte();

    let mut w = Cursor::new(buf);
    match format.date_order() {
        DateOrder::YyyyMmDd => {
            w.digits(4, u64::from(dt.year));
            w.opt_byte(date_sep);
            w.digits(2, u64::from(dt.month));
            w.opt_byte(date_sep);
            w.digits(2, u64::from(dt.day));
        }
        DateOrder::DdMmYyyy => {
            w.digits(2, u64::from(dt.day));
            w.opt_byte(date_sep);
            w.digits(2, u64::from(dt.month));
            w.opt_byte(date_sep);
            w.digits(4, u64::from(dt.year));
        }
    }

    w.byte(format.dt_sep().byte());

    w.digits(2, u64::from(dt.hour));
    w.opt_byte(time_sep);
    w.digits(2, u64::from(dt.minute));
    w.opt_byte(time_sep);
    w.digits(2, u64::from(dt.second));

    let precision = format.precision();
    if precision != Precision::Secs {
        w.byte(b'.');
        // Truncate, never round.
        w.digits(precision.digits(), u64::from(dt.subsec_nanos) / precision.divisor());
    }

    w.pos
}

pub fn to_dt_str(ts: u64, format: Format) -> String {
    let mut buf = [0u8; BUFSIZE];
    let n = to_dt_chars(&mut buf, ts, format);
    ascii_string(&buf[..n])
}

/// Current time (shifted by `offset_hours`) laid out by `format`.
pub fn dt_str(format: Format, offset_hours: i32) -> String {
    to_dt_str(civil::now(offset_hours), format)
}

// Encoders only ever write ASCII digits and separators.
fn ascii_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}
