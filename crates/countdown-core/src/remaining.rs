//! Signed decomposition of the time left until the target.

use chrono::{DateTime, TimeZone};

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Time left until the target, split into calendar-style components.
///
/// The duration is truncated toward zero to whole seconds, then split with
/// truncating division, so every component carries the sign of the whole:
/// five seconds past the target is `0d 0h 0m -5s`, not `-1d 23h 59m 55s`.
/// Nothing is clamped once the target has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingTime {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl RemainingTime {
    /// Computes `target - now`.
    pub fn between<Tz1: TimeZone, Tz2: TimeZone>(
        target: &DateTime<Tz1>,
        now: &DateTime<Tz2>,
    ) -> Self {
        let delta = target.naive_utc() - now.naive_utc();
        Self::from_seconds(delta.num_seconds())
    }

    pub fn from_seconds(total: i64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: total / SECS_PER_HOUR % 24,
            minutes: total / SECS_PER_MINUTE % 60,
            seconds: total % SECS_PER_MINUTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, Utc};

    fn remaining(days: i64, hours: i64, minutes: i64, seconds: i64) -> RemainingTime {
        RemainingTime {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    #[test]
    fn one_of_each_unit() {
        assert_eq!(RemainingTime::from_seconds(90_061), remaining(1, 1, 1, 1));
    }

    #[test]
    fn components_stay_within_their_range() {
        let total = 3 * SECS_PER_DAY + 23 * SECS_PER_HOUR + 59 * SECS_PER_MINUTE + 59;
        assert_eq!(RemainingTime::from_seconds(total), remaining(3, 23, 59, 59));
    }

    #[test]
    fn zero_is_all_zero() {
        assert_eq!(RemainingTime::from_seconds(0), remaining(0, 0, 0, 0));
    }

    #[test]
    fn negative_components_follow_overall_sign() {
        assert_eq!(RemainingTime::from_seconds(-5), remaining(0, 0, 0, -5));
        assert_eq!(RemainingTime::from_seconds(-90_061), remaining(-1, -1, -1, -1));
    }

    #[test]
    fn sub_second_remainder_is_truncated_toward_zero() {
        let now = Utc::now();
        let ahead = now + Duration::milliseconds(1_999);
        let behind = now - Duration::milliseconds(1_999);
        assert_eq!(RemainingTime::between(&ahead, &now).seconds, 1);
        assert_eq!(RemainingTime::between(&behind, &now).seconds, -1);
    }

    #[test]
    fn timezones_do_not_shift_the_result() {
        let now = Utc::now();
        let target = (now + Duration::hours(5)).with_timezone(&Local);
        assert_eq!(RemainingTime::between(&target, &now), remaining(0, 5, 0, 0));
    }
}
