//! Property-based tests using proptest.
//!
//! Checks the decision rules over generated single-interval configurations,
//! times and principals.

use block_access::{Effect, LocalTime, TimeOfDay, WeekDay, decide, evaluate, parse_configuration};
use proptest::prelude::*;
use proptest::sample::subsequence;

fn any_weekday() -> impl Strategy<Value = WeekDay> {
    (0usize..7).prop_map(|i| WeekDay::ALL[i])
}

fn any_local_time() -> impl Strategy<Value = LocalTime> {
    (any_weekday(), 0u8..24, 0u8..60).prop_map(|(day, h, m)| LocalTime::new(day, h, m))
}

fn any_time_of_day() -> impl Strategy<Value = TimeOfDay> {
    (0u8..24, 0u8..60).prop_map(|(h, m)| TimeOfDay::new(h, m).unwrap())
}

fn any_principal() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// A non-empty subset of week days, in calendar order.
fn any_days() -> impl Strategy<Value = Vec<WeekDay>> {
    subsequence(WeekDay::ALL.to_vec(), 1..=7)
}

fn render_interval(days: &[WeekDay], start: TimeOfDay, end: TimeOfDay) -> String {
    let days: Vec<&str> = days.iter().map(|d| d.abbrev()).collect();
    format!("{} - {start}-{end}", days.join(","))
}

fn at_minute(weekday: WeekDay, minutes: u16) -> LocalTime {
    LocalTime::new(weekday, (minutes / 60) as u8, (minutes % 60) as u8)
}

/// Days plus an instant on one of them.
fn listed_day() -> impl Strategy<Value = (Vec<WeekDay>, LocalTime)> {
    any_days().prop_flat_map(|days| {
        let len = days.len();
        (Just(days), 0..len, 0u16..1440)
            .prop_map(|(days, i, m)| {
                let now = at_minute(days[i], m);
                (days, now)
            })
    })
}

/// Days (never all seven) plus an instant on a day not among them.
fn unlisted_day() -> impl Strategy<Value = (Vec<WeekDay>, LocalTime)> {
    subsequence(WeekDay::ALL.to_vec(), 1..=6).prop_flat_map(|days| {
        let others: Vec<WeekDay> = WeekDay::ALL
            .into_iter()
            .filter(|d| !days.contains(d))
            .collect();
        let len = others.len();
        (Just(days), Just(others), 0..len, 0u16..1440)
            .prop_map(|(days, others, i, m)| (days, at_minute(others[i], m)))
    })
}

/// Days, an ordered window, and an instant inside it on a listed day.
fn listed_day_inside_window()
-> impl Strategy<Value = (Vec<WeekDay>, TimeOfDay, TimeOfDay, LocalTime)> {
    (any_days(), any_time_of_day(), any_time_of_day()).prop_flat_map(|(days, a, b)| {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let len = days.len();
        (Just(days), 0..len, start.minutes()..=end.minutes()).prop_map(move |(days, i, m)| {
            let now = at_minute(days[i], m);
            (days, start, end, now)
        })
    })
}

proptest! {
    // ========================================================================
    // Disabled Configuration
    // ========================================================================

    /// Without intervals, everyone is admitted at every time
    #[test]
    fn empty_intervals_allow_everything(
        now in any_local_time(),
        principal in any_principal(),
        blank in "[ \t\n]{0,4}",
    ) {
        let decision = evaluate(Some(blank.as_str()), Some("whatever"), now, &principal).unwrap();
        prop_assert_eq!(decision.effect, Effect::Allow);

        let decision = evaluate(None, None, now, &principal).unwrap();
        prop_assert_eq!(decision.effect, Effect::Allow);
    }

    // ========================================================================
    // Single Interval
    // ========================================================================

    /// Inside the window on a listed day, everyone is admitted
    #[test]
    fn inside_window_allows_any_principal(
        (days, start, end, now) in listed_day_inside_window(),
        principal in any_principal(),
    ) {
        let intervals = render_interval(&days, start, end);
        let rules = parse_configuration(Some(intervals.as_str()), Some("")).unwrap();
        prop_assert_eq!(decide(&rules, now, &principal).effect, Effect::Allow);
    }

    /// Outside the window on a listed day, only excluded principals are admitted
    #[test]
    fn outside_window_allows_only_excluded(
        (days, now) in listed_day(),
        start in any_time_of_day(),
        end in any_time_of_day(),
        excluded in prop::collection::vec(any_principal(), 0..4),
        principal in any_principal(),
    ) {
        let minutes = now.minutes();
        prop_assume!(minutes < start.minutes() || minutes > end.minutes());

        let intervals = render_interval(&days, start, end);
        let roles = excluded.join(", ");
        let rules = parse_configuration(Some(intervals.as_str()), Some(roles.as_str())).unwrap();

        let expected = if excluded.contains(&principal) { Effect::Allow } else { Effect::Deny };
        prop_assert_eq!(decide(&rules, now, &principal).effect, expected);
    }

    /// A day no interval lists is closed to everyone, excluded or not
    #[test]
    fn unlisted_day_denies_everyone(
        (days, now) in unlisted_day(),
        start in any_time_of_day(),
        end in any_time_of_day(),
        principal in any_principal(),
    ) {
        let rules = parse_configuration(
            Some(render_interval(&days, start, end).as_str()),
            Some(principal.as_str()),
        ).unwrap();

        let decision = decide(&rules, now, &principal);
        prop_assert_eq!(decision.effect, Effect::Deny);
        prop_assert!(decision.matched_rule.is_none());
    }

    // ========================================================================
    // Parser
    // ========================================================================

    /// Rendering a rule and parsing it back yields the same days and times
    #[test]
    fn rendered_rule_reparses(
        days in any_days(),
        start in any_time_of_day(),
        end in any_time_of_day(),
    ) {
        let text = render_interval(&days, start, end);
        let rules = parse_configuration(Some(text.as_str()), None).unwrap();
        let rule = rules.get(0).unwrap();

        prop_assert_eq!(&rule.days, &days);
        prop_assert_eq!(rule.start, start);
        prop_assert_eq!(rule.end, end);
        prop_assert_eq!(rule.to_string(), text);
    }

    /// Differing group counts are always rejected
    #[test]
    fn mismatched_group_counts_rejected(intervals in 1usize..6, groups in 1usize..6) {
        prop_assume!(intervals != groups);
        let interval_text = vec!["mon - 08:00-18:00"; intervals].join(";");
        let group_text = vec!["postgres"; groups].join(";");

        let result = parse_configuration(Some(interval_text.as_str()), Some(group_text.as_str()));
        prop_assert!(result.is_err());
    }

    /// Arbitrary input never panics the parser
    #[test]
    fn parser_never_panics(intervals in ".{0,64}", roles in ".{0,32}") {
        let _ = parse_configuration(Some(intervals.as_str()), Some(roles.as_str()));
    }
}
