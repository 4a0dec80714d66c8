//! Access window decision engine.
//!
//! The first rule listing the current week day is the only rule consulted.
//! Inside its window everyone is admitted; outside it only the rule's excluded
//! principals are. A day no rule lists is closed to everyone, while an empty
//! rule set admits everyone.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::parser::parse_configuration;
use crate::rule::{RuleSet, WeekDay};

// ============================================================================
// LocalTime
// ============================================================================

/// The instant being evaluated, reduced to week day, hour and minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalTime {
    pub weekday: WeekDay,
    /// `0..=23`
    pub hour: u8,
    /// `0..=59`
    pub minute: u8,
}

impl LocalTime {
    /// Panics if `hour` or `minute` is out of range.
    pub fn new(weekday: WeekDay, hour: u8, minute: u8) -> Self {
        assert!(hour <= 23, "hour must be 0..=23, got {hour}");
        assert!(minute <= 59, "minute must be 0..=59, got {minute}");
        Self {
            weekday,
            hour,
            minute,
        }
    }

    /// Reads week day, hour and minute in the timestamp's own time zone.
    ///
    /// Pass a `DateTime<Local>` to evaluate against server wall-clock time.
    pub fn from_datetime<Tz: TimeZone>(ts: &DateTime<Tz>) -> Self {
        Self {
            weekday: ts.weekday().into(),
            hour: ts.hour() as u8,
            minute: ts.minute() as u8,
        }
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

impl Effect {
    pub fn is_allow(self) -> bool {
        self == Self::Allow
    }
}

/// The result of evaluating a principal against a rule set.
///
/// `reason` is meant for server logs and dry runs. It must not be sent to the
/// rejected client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub effect: Effect,
    /// Index of the rule that decided, or `None` if no rule applied.
    pub matched_rule: Option<usize>,
    pub reason: String,
}

impl Decision {
    fn new(effect: Effect, matched_rule: Option<usize>, reason: String) -> Self {
        Self {
            effect,
            matched_rule,
            reason,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Decides whether `principal` may connect at `now`.
///
/// # Postcondition
///
/// Always returns a `Decision`; evaluation performs no I/O and cannot fail.
pub fn decide(rules: &RuleSet, now: LocalTime, principal: &str) -> Decision {
    if rules.is_empty() {
        return Decision::new(
            Effect::Allow,
            None,
            "no intervals configured".to_string(),
        );
    }

    let now_minutes = now.minutes();

    let Some((index, rule)) = rules.first_covering(now.weekday) else {
        debug!(weekday = %now.weekday, "no interval for week day");
        return Decision::new(
            Effect::Deny,
            None,
            format!("no interval configured for {}", now.weekday),
        );
    };

    trace!(
        rule = index,
        interval = %rule,
        now = now_minutes,
        "found week day"
    );

    if rule.window_contains(now_minutes) {
        return Decision::new(
            Effect::Allow,
            Some(index),
            format!("{:02}:{:02} is inside interval #{index} ({rule})", now.hour, now.minute),
        );
    }

    debug!(rule = index, "outside interval time");

    if rule.excludes(principal) {
        debug!(principal, rule = index, "role in exclude_roles");
        Decision::new(
            Effect::Allow,
            Some(index),
            format!("\"{principal}\" is excluded from interval #{index} ({rule})"),
        )
    } else {
        Decision::new(
            Effect::Deny,
            Some(index),
            format!(
                "{:02}:{:02} is outside interval #{index} ({rule})",
                now.hour, now.minute
            ),
        )
    }
}

/// Parses both settings and decides in one step.
///
/// Nothing is cached: a corrected configuration takes effect on the next call.
pub fn evaluate(
    intervals: Option<&str>,
    exclude_roles: Option<&str>,
    now: LocalTime,
    principal: &str,
) -> Result<Decision> {
    let rules = parse_configuration(intervals, exclude_roles)?;
    Ok(decide(&rules, now, principal))
}
