pub mod civil;
pub mod flags;
pub mod encode;
pub mod decode;

pub use civil::{CivilDateTime, now, to_seconds, from_seconds};
pub use flags::{DateOrder, DateSep, DateTimeSep, TimeSep, Precision, Format, FlagsError, dump_flags};
pub use encode::{BUFSIZE, BUFSIZE_MIN, BUFSIZE_MAX, to_chars, to_str, to_dt_chars, to_dt_str, dt_str};
pub use decode::{DecodeError, decode, get_flags};
