#![no_main]

use arbitrary::Arbitrary;
use block_access::{Effect, LocalTime, WeekDay, decide, parse_configuration};
use libfuzzer_sys::fuzz_target;

// ============================================================================
// Arbitrary Inputs
// ============================================================================

#[derive(Debug, Arbitrary)]
struct FuzzRule {
    /// Bit `i` lists `WeekDay::ALL[i]`; zero is bumped to Sunday.
    days: u8,
    start: (u8, u8),
    end: (u8, u8),
    excluded: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    rules: Vec<FuzzRule>,
    weekday: u8,
    hour: u8,
    minute: u8,
    /// Index into the principal pool.
    principal: u8,
}

const PRINCIPALS: [&str; 5] = ["postgres", "euler", "bob", "alice", "mallory"];

fn principal(i: u8) -> &'static str {
    PRINCIPALS[usize::from(i) % PRINCIPALS.len()]
}

impl FuzzRule {
    fn days(&self) -> Vec<WeekDay> {
        let mask = if self.days & 0x7f == 0 { 1 } else { self.days & 0x7f };
        WeekDay::ALL
            .into_iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, d)| d)
            .collect()
    }

    fn render_interval(&self) -> String {
        let days: Vec<&str> = self.days().iter().map(|d| d.abbrev()).collect();
        format!(
            "{} - {:02}:{:02}-{:02}:{:02}",
            days.join(","),
            self.start.0 % 24,
            self.start.1 % 60,
            self.end.0 % 24,
            self.end.1 % 60
        )
    }

    fn render_roles(&self) -> String {
        let names: Vec<&str> = self.excluded.iter().map(|&i| principal(i)).collect();
        names.join(", ")
    }
}

fuzz_target!(|input: FuzzInput| {
    let intervals: Vec<String> = input.rules.iter().map(FuzzRule::render_interval).collect();
    let roles: Vec<String> = input.rules.iter().map(FuzzRule::render_roles).collect();

    let (intervals, roles) = (intervals.join(" ; "), roles.join(" ; "));
    let rules = parse_configuration(Some(intervals.as_str()), Some(roles.as_str()))
        .expect("rendered rules always parse");
    assert_eq!(rules.len(), input.rules.len());

    let now = LocalTime::new(
        WeekDay::ALL[usize::from(input.weekday) % 7],
        input.hour % 24,
        input.minute % 60,
    );
    let who = principal(input.principal);
    let decision = decide(&rules, now, who);

    // Evaluation is a pure function of its inputs.
    assert_eq!(decision, decide(&rules, now, who));
    assert!(!decision.reason.is_empty());

    let Some((index, rule)) = rules.first_covering(now.weekday) else {
        assert_eq!(
            decision.effect,
            if rules.is_empty() { Effect::Allow } else { Effect::Deny },
            "unlisted days deny, empty rule sets allow"
        );
        assert!(decision.matched_rule.is_none());
        return;
    };

    assert_eq!(decision.matched_rule, Some(index), "first covering rule decides");
    let expected = if rule.window_contains(now.minutes()) || rule.excludes(who) {
        Effect::Allow
    } else {
        Effect::Deny
    };
    assert_eq!(decision.effect, expected);
});
