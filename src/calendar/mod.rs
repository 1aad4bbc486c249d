//! Calendar rules: which day identifiers exist and which are unlocked today

mod clock;
mod day;

pub use clock::{Clock, FixedClock, SystemClock};
pub use day::{Day, DayError, DayParam, FIRST_DAY, LAST_DAY};

/// Whether `day` may be shown when today is `current_day`.
///
/// True iff `day` lies in the calendar range and is not in the future,
/// unless `bypass` lifts the future-day lock.
pub fn validate(day: i64, current_day: u32, bypass: bool) -> bool {
    let in_range = (i64::from(FIRST_DAY)..=i64::from(LAST_DAY)).contains(&day);
    in_range && (bypass || day <= i64::from(current_day))
}

/// Same as [`validate`], for a raw routed path segment.
pub fn validate_segment(segment: &str, current_day: u32, bypass: bool) -> bool {
    validate_param(&DayParam::parse(segment), current_day, bypass)
}

/// Same as [`validate`], for an already parsed path segment.
pub fn validate_param(param: &DayParam, current_day: u32, bypass: bool) -> bool {
    match param {
        DayParam::Number(n) => validate(*n, current_day, bypass),
        DayParam::Malformed(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_without_bypass() {
        for d in -5..=30 {
            assert_eq!(validate(d, 15, false), (1..=15).contains(&d), "day {}", d);
        }
    }

    #[test]
    fn test_validate_with_bypass_unlocks_future_days() {
        for d in 16..=24 {
            assert!(validate(d, 15, true), "day {}", d);
        }
    }

    #[test]
    fn test_validate_out_of_range_is_always_false() {
        for today in 0..=31 {
            for bypass in [false, true] {
                assert!(!validate(0, today, bypass));
                assert!(!validate(25, today, bypass));
                assert!(!validate(-1, today, bypass));
            }
        }
    }

    #[test]
    fn test_validate_after_the_calendar_ends() {
        // Day-of-month past the last door keeps every door open
        assert!(validate(24, 31, false));
        assert!(validate(1, 25, false));
    }

    #[test]
    fn test_validate_segment() {
        assert!(validate_segment("5", 5, false));
        assert!(validate_segment("05", 5, false));
        assert!(!validate_segment("6", 5, false));
        assert!(validate_segment("6", 5, true));
        assert!(!validate_segment("abc", 24, true));
        assert!(!validate_segment("", 24, true));
        assert!(!validate_segment("2.5", 24, true));
    }
}
