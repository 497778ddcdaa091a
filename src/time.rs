//! Time Constants
//!
//! Millisecond unit conversions for building TTLs, e.g. `5 * time::MINUTE`.

pub const SECOND: i64 = 1000;
pub const MINUTE: i64 = 60 * SECOND;
pub const HOUR: i64 = 60 * MINUTE;
pub const DAY: i64 = 24 * HOUR;
pub const WEEK: i64 = 7 * DAY;
/// Thirty days.
pub const MONTH: i64 = 30 * DAY;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_in_milliseconds() {
        assert_eq!(SECOND, 1000);
        assert_eq!(MINUTE, 60 * 1000);
        assert_eq!(HOUR, 60 * 60 * 1000);
        assert_eq!(DAY, 24 * 60 * 60 * 1000);
        assert_eq!(WEEK, 7 * 24 * 60 * 60 * 1000);
        assert_eq!(MONTH, 30 * 24 * 60 * 60 * 1000);
    }
}
