//! Millisecond-precision clock helpers for record timestamps.

use jiff::Timestamp;

/// Current time truncated to whole milliseconds.
pub fn now() -> Timestamp {
    let now = Timestamp::now();
    Timestamp::from_millisecond(now.as_millisecond()).unwrap_or(now)
}

/// Returns a timestamp strictly later than `previous`: the current time, or
/// `previous + 1ms` when the clock has not moved past it yet.
pub fn advance(previous: Timestamp) -> Timestamp {
    let now = now();
    if now > previous {
        return now;
    }
    Timestamp::from_millisecond(previous.as_millisecond() + 1).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_has_no_sub_millisecond_part() {
        let ts = now();
        assert_eq!(ts.subsec_nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn test_advance_is_strictly_increasing() {
        let mut ts = now();
        for _ in 0..100 {
            let next = advance(ts);
            assert!(next > ts);
            ts = next;
        }
    }

    #[test]
    fn test_advance_past_future_timestamp() {
        let future = Timestamp::from_millisecond(now().as_millisecond() + 60_000).unwrap();
        let next = advance(future);
        assert_eq!(next.as_millisecond(), future.as_millisecond() + 1);
    }
}
