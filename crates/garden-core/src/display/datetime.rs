//! DateTime display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` in the system time zone as `YYYY-MM-DD HH:MM TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl LocalDateTime<'_> {
    fn fmt_in(&self, tz: TimeZone, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_zoned(tz).strftime("%Y-%m-%d %H:%M %Z"))
    }
}

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_in(TimeZone::system(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Utc<'a>(LocalDateTime<'a>);

    impl fmt::Display for Utc<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.fmt_in(TimeZone::UTC, f)
        }
    }

    #[test]
    fn test_format() {
        let ts = Timestamp::from_second(1_640_995_200).unwrap();
        assert_eq!(Utc(LocalDateTime(&ts)).to_string(), "2022-01-01 00:00 UTC");
    }
}
