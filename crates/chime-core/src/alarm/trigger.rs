//! Due-time evaluation.
//!
//! Pure functions over an alarm definition and wall-clock instants; no side
//! effects. The engine decides what to do with a due alarm.

use chrono::{Datelike, NaiveDateTime};

use super::Alarm;

/// Exact-second match: due iff the alarm is armed, `now`'s time-of-day
/// equals the alarm time, and the repeat policy covers `now`'s weekday.
///
/// This is only safe when the caller observes every second; the engine
/// uses it for its very first tick and [`fires_between`] afterwards.
pub fn is_due(alarm: &Alarm, now: NaiveDateTime) -> bool {
    alarm.armed && now.time() == alarm.time && alarm.repeat.matches_day(now.weekday())
}

/// Window match: true when some instant `t` with `since < t <= now` lands
/// on the alarm's time-of-day on a policy-eligible day. Robust to ticks
/// arriving late and to windows spanning midnight.
pub fn fires_between(alarm: &Alarm, since: NaiveDateTime, now: NaiveDateTime) -> bool {
    if !alarm.armed || now <= since {
        return false;
    }
    let mut date = since.date();
    loop {
        let candidate = date.and_time(alarm.time);
        if candidate > since && candidate <= now && alarm.repeat.matches_day(date.weekday()) {
            return true;
        }
        if date >= now.date() {
            return false;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{RepeatPolicy, SoundKind};
    use chrono::{Duration, NaiveDate, NaiveTime};
    use proptest::prelude::*;

    fn alarm(h: u32, m: u32, s: u32, repeat: RepeatPolicy) -> Alarm {
        let time = NaiveTime::from_hms_opt(h, m, s).unwrap();
        Alarm::new(time, "test", repeat, SoundKind::Default)
    }

    // 2024-05-06 is a Monday.
    fn monday(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn saturday(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 11)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn due_when_all_conditions_hold() {
        assert!(is_due(&alarm(10, 0, 0, RepeatPolicy::Daily), monday(10, 0, 0)));
        assert!(is_due(&alarm(10, 0, 0, RepeatPolicy::Weekdays), monday(10, 0, 0)));
        assert!(is_due(&alarm(10, 0, 0, RepeatPolicy::Weekends), saturday(10, 0, 0)));
    }

    #[test]
    fn not_due_when_time_differs() {
        assert!(!is_due(&alarm(10, 0, 0, RepeatPolicy::Daily), monday(10, 0, 1)));
    }

    #[test]
    fn not_due_when_disarmed() {
        let mut a = alarm(10, 0, 0, RepeatPolicy::Daily);
        a.armed = false;
        assert!(!is_due(&a, monday(10, 0, 0)));
    }

    #[test]
    fn not_due_on_policy_mismatch() {
        assert!(!is_due(&alarm(10, 0, 0, RepeatPolicy::Weekdays), saturday(10, 0, 0)));
        assert!(!is_due(&alarm(10, 0, 0, RepeatPolicy::Weekends), monday(10, 0, 0)));
    }

    #[test]
    fn window_catches_a_skipped_second() {
        let a = alarm(10, 0, 0, RepeatPolicy::Daily);
        assert!(fires_between(&a, monday(9, 59, 58), monday(10, 0, 3)));
    }

    #[test]
    fn window_excludes_start_and_includes_end() {
        let a = alarm(10, 0, 0, RepeatPolicy::Daily);
        assert!(!fires_between(&a, monday(10, 0, 0), monday(10, 0, 5)));
        assert!(fires_between(&a, monday(9, 59, 59), monday(10, 0, 0)));
    }

    #[test]
    fn window_spans_midnight() {
        let a = alarm(0, 0, 5, RepeatPolicy::Weekdays);
        // Monday 23:59:50 .. Tuesday 00:00:10 covers Tuesday 00:00:05.
        let since = monday(23, 59, 50);
        let now = since + Duration::seconds(20);
        assert!(fires_between(&a, since, now));

        let weekend = alarm(0, 0, 5, RepeatPolicy::Weekends);
        assert!(!fires_between(&weekend, since, now));
    }

    #[test]
    fn empty_or_inverted_window_never_fires() {
        let a = alarm(10, 0, 0, RepeatPolicy::Daily);
        assert!(!fires_between(&a, monday(10, 0, 0), monday(10, 0, 0)));
        assert!(!fires_between(&a, monday(10, 0, 5), monday(10, 0, 0)));
    }

    #[test]
    fn disarmed_window_never_fires() {
        let mut a = alarm(10, 0, 0, RepeatPolicy::Daily);
        a.armed = false;
        assert!(!fires_between(&a, monday(9, 0, 0), monday(11, 0, 0)));
    }

    proptest! {
        /// fires_between agrees with a brute-force per-second scan.
        #[test]
        fn window_matches_per_second_scan(
            start in 0i64..86_400,
            len in 1i64..3_600,
            h in 0u32..24,
            m in 0u32..60,
            s in 0u32..60,
        ) {
            let a = alarm(h, m, s, RepeatPolicy::Daily);
            let since = monday(0, 0, 0) + Duration::seconds(start);
            let now = since + Duration::seconds(len);
            let brute = (1..=len)
                .any(|off| (since + Duration::seconds(off)).time() == a.time);
            prop_assert_eq!(fires_between(&a, since, now), brute);
        }
    }
}
