//! Format flags: one choice per axis, combined into a validated [`Format`].
//!
//! # Axes
//! A layout is fully determined by five independent choices:
//!
//! | Axis | Values |
//! |------|--------|
//! | date order | `yyyy_mm_dd`, `dd_mm_yyyy` |
//! | date separator | `-`, `.`, none |
//! | date-time separator | `T`, `t`, ` `, `_`, `/` |
//! | time separator | `:`, `.`, none |
//! | precision | seconds, `.mmm`, `.uuuuuu`, `.nnnnnnnnn` |
//!
//! # Raw bits
//! Every axis value also owns one bit of a `u32` mask.  The bit values are
//! frozen: masks produced by other implementations of this layout family
//! must keep meaning the same thing here.  `0` is reserved as the
//! "no flags" value returned by [`crate::decode::get_flags`] on rejection.
//!
//! # Pairing rule
//! A date without separators is eight bare digits in either order, so the
//! date-time separator carries the order instead: `T` for `yyyy_mm_dd`,
//! `t` for `dd_mm_yyyy`.  [`Format::new`] refuses anything else.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// ── Raw flag bits ────────────────────────────────────────────────────────────

pub const YYYY_MM_DD:        u32 = 1 << 0;
pub const DD_MM_YYYY:        u32 = 1 << 1;
pub const DATE_SEP_DASH:     u32 = 1 << 2;
pub const DATE_SEP_POINT:    u32 = 1 << 3;
pub const DATE_SEP_EMPTY:    u32 = 1 << 4;
pub const DT_SEP_UPPER_T:    u32 = 1 << 5;
pub const DT_SEP_LOWER_T:    u32 = 1 << 6;
pub const DT_SEP_SPACE:      u32 = 1 << 7;
pub const DT_SEP_UNDERSCORE: u32 = 1 << 8;
pub const DT_SEP_SLASH:      u32 = 1 << 9;
pub const TIME_SEP_COLON:    u32 = 1 << 10;
pub const TIME_SEP_POINT:    u32 = 1 << 11;
pub const TIME_SEP_EMPTY:    u32 = 1 << 12;
pub const SECS:              u32 = 1 << 13;
pub const MSECS:             u32 = 1 << 14;
pub const USECS:             u32 = 1 << 15;
pub const NSECS:             u32 = 1 << 16;

/// The "no flags" sentinel.
pub const INVALID: u32 = 0;

pub const DATE_ORDER_MASK: u32 = YYYY_MM_DD | DD_MM_YYYY;
pub const DATE_SEP_MASK:   u32 = DATE_SEP_DASH | DATE_SEP_POINT | DATE_SEP_EMPTY;
pub const DT_SEP_MASK:     u32 =
    DT_SEP_UPPER_T | DT_SEP_LOWER_T | DT_SEP_SPACE | DT_SEP_UNDERSCORE | DT_SEP_SLASH;
pub const TIME_SEP_MASK:   u32 = TIME_SEP_COLON | TIME_SEP_POINT | TIME_SEP_EMPTY;
pub const PRECISION_MASK:  u32 = SECS | MSECS | USECS | NSECS;
pub const ALL_MASK:        u32 =
    DATE_ORDER_MASK | DATE_SEP_MASK | DT_SEP_MASK | TIME_SEP_MASK | PRECISION_MASK;

/// Symbolic names indexed by bit position.
const NAMES: [&str; 17] = [
    "yyyy_mm_dd",
    "dd_mm_yyyy",
    "date_sep_dash",
    "date_sep_point",
    "date_sep_empty",
    "dt_sep_T",
    "dt_sep_t",
    "dt_sep_space",
    "dt_sep_underscore",
    "dt_sep_slash",
    "time_sep_colon",
    "time_sep_point",
    "time_sep_empty",
    "secs",
    "msecs",
    "usecs",
    "nsecs",
];

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagsError {
    #[error("no {0} flag specified")]
    MissingAxis(&'static str),
    #[error("more than one {0} flag specified")]
    ConflictingAxis(&'static str),
    #[error("unknown flag bits: {0:#x}")]
    UnknownBits(u32),
    /// A date without separators needs `T` (yyyy_mm_dd) or `t` (dd_mm_yyyy).
    #[error("date_sep_empty with {date_order} requires {required}, got {dt_sep}")]
    SeparatorPairing {
        date_order: &'static str,
        dt_sep:     &'static str,
        required:   &'static str,
    },
    #[error("unknown {axis} name '{name}'")]
    UnknownName { axis: &'static str, name: String },
}

// ── Axis enums ───────────────────────────────────────────────────────────────

/// Order of the date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    YyyyMmDd,
    DdMmYyyy,
}

impl DateOrder {
    pub const ALL: [DateOrder; 2] = [DateOrder::YyyyMmDd, DateOrder::DdMmYyyy];

    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            DateOrder::YyyyMmDd => YYYY_MM_DD,
            DateOrder::DdMmYyyy => DD_MM_YYYY,
        }
    }

    pub fn name(self) -> &'static str {
        name_of(self.bit())
    }

    /// Parse from a CLI string. Accepts the flag name or a short alias.
    pub fn from_name(s: &str) -> Result<Self, FlagsError> {
        match s.to_lowercase().as_str() {
            "yyyy_mm_dd" | "ymd" => Ok(DateOrder::YyyyMmDd),
            "dd_mm_yyyy" | "dmy" => Ok(DateOrder::DdMmYyyy),
            _ => Err(unknown("date order", s)),
        }
    }

    /// The date-time separator a separator-less date must be paired with.
    #[inline]
    pub fn bare_date_dt_sep(self) -> DateTimeSep {
        match self {
            DateOrder::YyyyMmDd => DateTimeSep::UpperT,
            DateOrder::DdMmYyyy => DateTimeSep::LowerT,
        }
    }
}

/// Separator between the date fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSep {
    Dash,
    Point,
    Empty,
}

impl DateSep {
    pub const ALL: [DateSep; 3] = [DateSep::Dash, DateSep::Point, DateSep::Empty];

    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            DateSep::Dash  => DATE_SEP_DASH,
            DateSep::Point => DATE_SEP_POINT,
            DateSep::Empty => DATE_SEP_EMPTY,
        }
    }

    /// The emitted byte, or `None` for [`DateSep::Empty`].
    #[inline]
    pub fn byte(self) -> Option<u8> {
        match self {
            DateSep::Dash  => Some(b'-'),
            DateSep::Point => Some(b'.'),
            DateSep::Empty => None,
        }
    }

    #[inline]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'-' => Some(DateSep::Dash),
            b'.' => Some(DateSep::Point),
            _    => None,
        }
    }

    pub fn name(self) -> &'static str {
        name_of(self.bit())
    }

    pub fn from_name(s: &str) -> Result<Self, FlagsError> {
        match s.to_lowercase().as_str() {
            "dash" | "date_sep_dash" | "-"   => Ok(DateSep::Dash),
            "point" | "date_sep_point" | "." => Ok(DateSep::Point),
            "empty" | "date_sep_empty" | ""  => Ok(DateSep::Empty),
            _ => Err(unknown("date separator", s)),
        }
    }
}

/// Separator between the date and the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeSep {
    UpperT,
    LowerT,
    Space,
    Underscore,
    Slash,
}

impl DateTimeSep {
    pub const ALL: [DateTimeSep; 5] = [
        DateTimeSep::UpperT,
        DateTimeSep::LowerT,
        DateTimeSep::Space,
        DateTimeSep::Underscore,
        DateTimeSep::Slash,
    ];

    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            DateTimeSep::UpperT     => DT_SEP_UPPER_T,
            DateTimeSep::LowerT     => DT_SEP_LOWER_T,
            DateTimeSep::Space      => DT_SEP_SPACE,
            DateTimeSep::Underscore => DT_SEP_UNDERSCORE,
            DateTimeSep::Slash      => DT_SEP_SLASH,
        }
    }

    #[inline]
    pub fn byte(self) -> u8 {
        match self {
            DateTimeSep::UpperT     => b'T',
            DateTimeSep::LowerT     => b't',
            DateTimeSep::Space      => b' ',
            DateTimeSep::Underscore => b'_',
            DateTimeSep::Slash      => b'/',
        }
    }

    #[inline]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'T' => Some(DateTimeSep::UpperT),
            b't' => Some(DateTimeSep::LowerT),
            b' ' => Some(DateTimeSep::Space),
            b'_' => Some(DateTimeSep::Underscore),
            b'/' => Some(DateTimeSep::Slash),
            _    => None,
        }
    }

    pub fn name(self) -> &'static str {
        name_of(self.bit())
    }

    // Case matters for T/t, so no lowercasing here.
    pub fn from_name(s: &str) -> Result<Self, FlagsError> {
        match s {
            "T" | "dt_sep_T"                              => Ok(DateTimeSep::UpperT),
            "t" | "dt_sep_t"                              => Ok(DateTimeSep::LowerT),
            " " | "space" | "dt_sep_space"                => Ok(DateTimeSep::Space),
            "_" | "underscore" | "dt_sep_underscore"      => Ok(DateTimeSep::Underscore),
            "/" | "slash" | "dt_sep_slash"                => Ok(DateTimeSep::Slash),
            _ => Err(unknown("date-time separator", s)),
        }
    }
}

/// Separator between the time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSep {
    Colon,
    Point,
    Empty,
}

impl TimeSep {
    pub const ALL: [TimeSep; 3] = [TimeSep::Colon, TimeSep::Point, TimeSep::Empty];

    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            TimeSep::Colon => TIME_SEP_COLON,
            TimeSep::Point => TIME_SEP_POINT,
            TimeSep::Empty => TIME_SEP_EMPTY,
        }
    }

    #[inline]
    pub fn byte(self) -> Option<u8> {
        match self {
            TimeSep::Colon => Some(b':'),
            TimeSep::Point => Some(b'.'),
            TimeSep::Empty => None,
        }
    }

    #[inline]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b':' => Some(TimeSep::Colon),
            b'.' => Some(TimeSep::Point),
            _    => None,
        }
    }

    pub fn name(self) -> &'static str {
        name_of(self.bit())
    }

    pub fn from_name(s: &str) -> Result<Self, FlagsError> {
        match s.to_lowercase().as_str() {
            "colon" | "time_sep_colon" | ":" => Ok(TimeSep::Colon),
            "point" | "time_sep_point" | "." => Ok(TimeSep::Point),
            "empty" | "time_sep_empty" | ""  => Ok(TimeSep::Empty),
            _ => Err(unknown("time separator", s)),
        }
    }
}

/// Sub-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Secs,
    Msecs,
    Usecs,
    Nsecs,
}

impl Precision {
    pub const ALL: [Precision; 4] =
        [Precision::Secs, Precision::Msecs, Precision::Usecs, Precision::Nsecs];

    #[inline]
    pub fn bit(self) -> u32 {
        match self {
            Precision::Secs  => SECS,
            Precision::Msecs => MSECS,
            Precision::Usecs => USECS,
            Precision::Nsecs => NSECS,
        }
    }

    /// Number of fractional digits emitted after the `.`.
    #[inline]
    pub fn digits(self) -> usize {
        match self {
            Precision::Secs  => 0,
            Precision::Msecs => 3,
            Precision::Usecs => 6,
            Precision::Nsecs => 9,
        }
    }

    /// Divisor turning a nanosecond count into this resolution.
    #[inline]
    pub fn divisor(self) -> u64 {
        match self {
            Precision::Secs  => 1_000_000_000,
            Precision::Msecs => 1_000_000,
            Precision::Usecs => 1_000,
            Precision::Nsecs => 1,
        }
    }

    #[inline]
    pub fn from_digits(n: usize) -> Option<Self> {
        match n {
            3 => Some(Precision::Msecs),
            6 => Some(Precision::Usecs),
            9 => Some(Precision::Nsecs),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        name_of(self.bit())
    }

    pub fn from_name(s: &str) -> Result<Self, FlagsError> {
        match s.to_lowercase().as_str() {
            "secs" | "s"   => Ok(Precision::Secs),
            "msecs" | "ms" => Ok(Precision::Msecs),
            "usecs" | "us" => Ok(Precision::Usecs),
            "nsecs" | "ns" => Ok(Precision::Nsecs),
            _ => Err(unknown("precision", s)),
        }
    }
}

// ── Format ───────────────────────────────────────────────────────────────────

/// A validated layout: exactly one value per axis, pairing rule enforced.
///
/// The only ways to obtain one are [`Format::new`], [`Format::from_bits`],
/// [`Format::all`], deserialization and decoding, all of which validate.
/// Encoding therefore never has to re-check its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Format {
    date_order: DateOrder,
    date_sep:   DateSep,
    dt_sep:     DateTimeSep,
    time_sep:   TimeSep,
    precision:  Precision,
}

impl Format {
    /// `yyyy-mm-dd/hh:mm:ss.mmm`
    pub const DEFAULT: Format = Format {
        date_order: DateOrder::YyyyMmDd,
        date_sep:   DateSep::Dash,
        dt_sep:     DateTimeSep::Slash,
        time_sep:   TimeSep::Colon,
        precision:  Precision::Msecs,
    };

    pub fn new(
        date_order: DateOrder,
        date_sep:   DateSep,
        dt_sep:     DateTimeSep,
        time_sep:   TimeSep,
        precision:  Precision,
    ) -> Result<Self, FlagsError> {
        if date_sep == DateSep::Empty {
            let required = date_order.bare_date_dt_sep();
            if dt_sep != required {
                return Err(FlagsError::SeparatorPairing {
                    date_order: date_order.name(),
                    dt_sep:     dt_sep.name(),
                    required:   required.name(),
                });
            }
        }
        Ok(Self { date_order, date_sep, dt_sep, time_sep, precision })
    }

    /// Assemble axes whose pairing the caller has already established.
    pub(crate) fn from_paired_axes(
        date_order: DateOrder,
        date_sep:   DateSep,
        dt_sep:     DateTimeSep,
        time_sep:   TimeSep,
        precision:  Precision,
    ) -> Self {
        debug_assert!(date_sep != DateSep::Empty || dt_sep == date_order.bare_date_dt_sep());
        Self { date_order, date_sep, dt_sep, time_sep, precision }
    }

    /// Build from a raw mask. Exactly one bit per axis, no foreign bits.
    pub fn from_bits(bits: u32) -> Result<Self, FlagsError> {
        let unknown_bits = bits & !ALL_MASK;
        if unknown_bits != 0 {
            return Err(FlagsError::UnknownBits(unknown_bits));
        }
        Self::new(
            pick(bits, "date order", &DateOrder::ALL, DateOrder::bit)?,
            pick(bits, "date separator", &DateSep::ALL, DateSep::bit)?,
            pick(bits, "date-time separator", &DateTimeSep::ALL, DateTimeSep::bit)?,
            pick(bits, "time separator", &TimeSep::ALL, TimeSep::bit)?,
            pick(bits, "precision", &Precision::ALL, Precision::bit)?,
        )
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.date_order.bit()
            | self.date_sep.bit()
            | self.dt_sep.bit()
            | self.time_sep.bit()
            | self.precision.bit()
    }

    /// Every valid combination, in axis declaration order.
    pub fn all() -> impl Iterator<Item = Format> {
        DateOrder::ALL.into_iter().flat_map(|o| {
            DateSep::ALL.into_iter().flat_map(move |ds| {
                DateTimeSep::ALL.into_iter().flat_map(move |dts| {
                    TimeSep::ALL.into_iter().flat_map(move |ts| {
                        Precision::ALL
                            .into_iter()
                            .filter_map(move |p| Format::new(o, ds, dts, ts, p).ok())
                    })
                })
            })
        })
    }

    /// Exact length of [`crate::encode::to_dt_chars`] output for this layout.
    pub fn encoded_len(self) -> usize {
        let mut n = 19;
        if self.date_sep == DateSep::Empty {
            n -= 2;
        }
        if self.time_sep == TimeSep::Empty {
            n -= 2;
        }
        match self.precision.digits() {
            0 => n,
            d => n + 1 + d,
        }
    }

    #[inline] pub fn date_order(self) -> DateOrder   { self.date_order }
    #[inline] pub fn date_sep(self)   -> DateSep     { self.date_sep }
    #[inline] pub fn dt_sep(self)     -> DateTimeSep { self.dt_sep }
    #[inline] pub fn time_sep(self)   -> TimeSep     { self.time_sep }
    #[inline] pub fn precision(self)  -> Precision   { self.precision }

    /// Same layout at a different resolution. The pairing rule does not
    /// involve precision, so this cannot fail.
    pub fn with_precision(self, precision: Precision) -> Self {
        Self { precision, ..self }
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::DEFAULT
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flags(f, self.bits(), false)
    }
}

// Deserialization goes through the smart constructor so a stored layout
// cannot smuggle in a broken pairing.
#[derive(Deserialize)]
struct FormatRaw {
    date_order: DateOrder,
    date_sep:   DateSep,
    dt_sep:     DateTimeSep,
    time_sep:   TimeSep,
    precision:  Precision,
}

impl<'de> Deserialize<'de> for Format {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = FormatRaw::deserialize(deserializer)?;
        Format::new(raw.date_order, raw.date_sep, raw.dt_sep, raw.time_sep, raw.precision)
            .map_err(serde::de::Error::custom)
    }
}

// ── Dump ─────────────────────────────────────────────────────────────────────

/// Write the symbolic names of every set bit, comma separated, in bit order.
///
/// Unknown bits are skipped. With `with_prefix` each name is written as
/// `dtf::<name>`.
pub fn write_flags<W: fmt::Write>(out: &mut W, bits: u32, with_prefix: bool) -> fmt::Result {
    let mut first = true;
    for (idx, name) in NAMES.iter().enumerate() {
        if bits & (1 << idx) == 0 {
            continue;
        }
        if !first {
            out.write_str(", ")?;
        }
        if with_prefix {
            out.write_str("dtf::")?;
        }
        out.write_str(name)?;
        first = false;
    }
    Ok(())
}

/// [`write_flags`] into a fresh `String` (diagnostics only, never parsed).
pub fn dump_flags(bits: u32, with_prefix: bool) -> String {
    let mut s = String::new();
    // Writing to a String cannot fail.
    let _ = write_flags(&mut s, bits, with_prefix);
    s
}

/// Inverse of [`dump_flags`]: OR together comma separated flag names.
///
/// The `dtf::` prefix is optional and surrounding whitespace is ignored.
/// The result is a raw mask; pass it to [`Format::from_bits`] to validate.
pub fn parse_flags(s: &str) -> Result<u32, FlagsError> {
    let mut bits = INVALID;
    for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let name = token.strip_prefix("dtf::").unwrap_or(token);
        let idx = NAMES
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| unknown("flag", token))?;
        bits |= 1 << idx;
    }
    Ok(bits)
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn name_of(bit: u32) -> &'static str {
    NAMES[bit.trailing_zeros() as usize]
}

fn unknown(axis: &'static str, name: &str) -> FlagsError {
    FlagsError::UnknownName { axis, name: name.to_string() }
}

fn pick<T: Copy>(
    bits:   u32,
    axis:   &'static str,
    values: &[T],
    bit:    impl Fn(T) -> u32,
) -> Result<T, FlagsError> {
    let mut found = None;
    for &v in values {
        if bits & bit(v) != 0 {
            if found.is_some() {
                return Err(FlagsError::ConflictingAxis(axis));
            }
            found = Some(v);
        }
    }
    found.ok_or(FlagsError::MissingAxis(axis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bundle_bits() {
        assert_eq!(
            Format::DEFAULT.bits(),
            YYYY_MM_DD | DATE_SEP_DASH | DT_SEP_SLASH | TIME_SEP_COLON | MSECS
        );
        assert_eq!(Format::default(), Format::DEFAULT);
    }

    #[test]
    fn all_combinations_count() {
        // 2*3*5*3*4 = 360, minus 2*4*3*4 = 96 bad pairings.
        assert_eq!(Format::all().count(), 264);
        let mut seen = std::collections::HashSet::new();
        for f in Format::all() {
            assert!(seen.insert(f.bits()));
            assert_eq!(Format::from_bits(f.bits()), Ok(f));
        }
    }

    #[test]
    fn pairing_rule() {
        assert!(Format::new(
            DateOrder::YyyyMmDd, DateSep::Empty, DateTimeSep::UpperT, TimeSep::Empty, Precision::Secs
        ).is_ok());
        assert!(Format::new(
            DateOrder::DdMmYyyy, DateSep::Empty, DateTimeSep::LowerT, TimeSep::Colon, Precision::Secs
        ).is_ok());

        let err = Format::new(
            DateOrder::YyyyMmDd, DateSep::Empty, DateTimeSep::LowerT, TimeSep::Colon, Precision::Secs,
        ).unwrap_err();
        assert_eq!(err, FlagsError::SeparatorPairing {
            date_order: "yyyy_mm_dd",
            dt_sep:     "dt_sep_t",
            required:   "dt_sep_T",
        });

        assert!(Format::new(
            DateOrder::DdMmYyyy, DateSep::Empty, DateTimeSep::Space, TimeSep::Colon, Precision::Secs
        ).is_err());
    }

    #[test]
    fn from_bits_rejects_bad_masks() {
        assert_eq!(Format::from_bits(INVALID), Err(FlagsError::MissingAxis("date order")));
        assert_eq!(
            Format::from_bits(YYYY_MM_DD | DD_MM_YYYY | DATE_SEP_DASH | DT_SEP_UPPER_T | TIME_SEP_COLON | SECS),
            Err(FlagsError::ConflictingAxis("date order"))
        );
        assert_eq!(
            Format::from_bits(YYYY_MM_DD | DATE_SEP_DASH | DT_SEP_SLASH | TIME_SEP_COLON),
            Err(FlagsError::MissingAxis("precision"))
        );
        assert_eq!(
            Format::from_bits(Format::DEFAULT.bits() | 1 << 20),
            Err(FlagsError::UnknownBits(1 << 20))
        );
        assert_eq!(
            Format::from_bits(Format::DEFAULT.bits() | NSECS),
            Err(FlagsError::ConflictingAxis("precision"))
        );
    }

    #[test]
    fn encoded_len_bounds() {
        for f in Format::all() {
            let n = f.encoded_len();
            assert!((15..=29).contains(&n), "{f}: {n}");
        }
        assert_eq!(Format::DEFAULT.with_precision(Precision::Secs).encoded_len(), 19);
        assert_eq!(Format::DEFAULT.with_precision(Precision::Nsecs).encoded_len(), 29);
    }

    #[test]
    fn dump() {
        let bits = YYYY_MM_DD | DATE_SEP_DASH | DT_SEP_UPPER_T | TIME_SEP_COLON | NSECS;
        assert_eq!(
            dump_flags(bits, false),
            "yyyy_mm_dd, date_sep_dash, dt_sep_T, time_sep_colon, nsecs"
        );
        assert_eq!(dump_flags(DD_MM_YYYY | SECS, true), "dtf::dd_mm_yyyy, dtf::secs");
        assert_eq!(dump_flags(INVALID, true), "");
        assert_eq!(dump_flags(1 << 31, false), "");
        assert_eq!(Format::DEFAULT.to_string(), dump_flags(Format::DEFAULT.bits(), false));
    }

    #[test]
    fn parse_is_dump_inverse() {
        for f in Format::all() {
            assert_eq!(parse_flags(&dump_flags(f.bits(), false)), Ok(f.bits()));
            assert_eq!(parse_flags(&dump_flags(f.bits(), true)), Ok(f.bits()));
        }
        assert_eq!(parse_flags(""), Ok(INVALID));
        assert_eq!(parse_flags(" secs ,dtf::nsecs"), Ok(SECS | NSECS));
        assert!(matches!(
            parse_flags("yyyy_mm_dd, dt_sep_X"),
            Err(FlagsError::UnknownName { axis: "flag", .. })
        ));
    }

    #[test]
    fn names_parse() {
        assert_eq!(DateOrder::from_name("DMY"), Ok(DateOrder::DdMmYyyy));
        assert_eq!(DateTimeSep::from_name("t"), Ok(DateTimeSep::LowerT));
        assert_eq!(DateTimeSep::from_name("T"), Ok(DateTimeSep::UpperT));
        assert_eq!(Precision::from_name("us"), Ok(Precision::Usecs));
        assert!(TimeSep::from_name("semicolon").is_err());
    }

    #[test]
    fn serde_goes_through_validation() {
        let json = serde_json::to_string(&Format::DEFAULT).unwrap();
        let back: Format = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Format::DEFAULT);

        let bad = r#"{"date_order":"yyyy_mm_dd","date_sep":"empty","dt_sep":"space",
                      "time_sep":"colon","precision":"secs"}"#;
        assert!(serde_json::from_str::<Format>(bad).is_err());
    }
}
