//! Parser for the `block_access.intervals` and `block_access.exclude_roles` settings.
//!
//! ```text
//! intervals     := entry (';' entry)*
//! entry         := day (',' day)* '-' time '-' time
//! day           := sun | mon | tue | wed | thu | fri | sat
//! time          := HH ':' MM
//!
//! exclude_roles := group (';' group)*
//! group         := '' | name (',' name)*
//! ```
//!
//! Whitespace around any token is ignored. The n-th role group belongs to the
//! n-th interval entry, so both settings must contain the same number of
//! `;`-separated fields. Any error rejects the whole configuration.

use tracing::{debug, trace, warn};

use crate::error::{ConfigError, Result};
use crate::rule::{Rule, RuleSet, TimeOfDay, WeekDay};
use crate::text::{SplitKeepEmpty, count_fields, trim, trim_opt};

const ENTRY_SEPARATOR: char = ';';
const FIELD_SEPARATOR: char = '-';
const LIST_SEPARATOR: char = ',';
const TIME_SEPARATOR: char = ':';

/// Parses both settings into an ordered [`RuleSet`].
///
/// Absent or blank `intervals` yields an empty set, which disables
/// enforcement. Absent `exclude_roles` counts as a single empty group.
///
/// The group counts are compared before any entry is parsed.
pub fn parse_configuration(
    intervals: Option<&str>,
    exclude_roles: Option<&str>,
) -> Result<RuleSet> {
    let Some(intervals) = trim_opt(intervals) else {
        debug!("no intervals configured, access windows disabled");
        return Ok(RuleSet::default());
    };
    let exclude_roles = trim_opt(exclude_roles).unwrap_or("");

    let interval_count = count_fields(intervals, ENTRY_SEPARATOR);
    let group_count = count_fields(exclude_roles, ENTRY_SEPARATOR);
    trace!(intervals = interval_count, role_groups = group_count, "counted groups");

    if interval_count != group_count {
        return Err(ConfigError::GroupCountMismatch {
            intervals: interval_count,
            role_groups: group_count,
        });
    }

    let entries = SplitKeepEmpty::new(intervals, ENTRY_SEPARATOR);
    let groups = SplitKeepEmpty::new(exclude_roles, ENTRY_SEPARATOR);

    let mut rules = Vec::with_capacity(interval_count);
    for (entry, group) in entries.zip(groups) {
        let mut rule = parse_interval(entry)?;
        rule.excluded_principals = parse_roles(group);

        if rule.is_inverted() {
            warn!(
                interval = %rule,
                "interval ends before it starts and will never match"
            );
        }
        rules.push(rule);
    }

    Ok(RuleSet::new(rules))
}

/// Parses one `days - HH:MM - HH:MM` entry. The exclusion list is left empty.
pub fn parse_interval(raw: &str) -> Result<Rule> {
    let entry = trim(raw).ok_or_else(|| malformed(raw, "empty interval"))?;

    let parts: Vec<&str> = entry.split(FIELD_SEPARATOR).collect();
    let [days, start, end] = parts.as_slice() else {
        let reason = if parts.len() < 3 {
            "expected week days, start time and end time separated by '-'"
        } else {
            "too many '-' separators"
        };
        return Err(malformed(entry, reason));
    };

    let days = trim(days).ok_or_else(|| malformed(entry, "missing week days"))?;
    let start = trim(start).ok_or_else(|| malformed(entry, "missing start time"))?;
    let end = trim(end).ok_or_else(|| malformed(entry, "missing end time"))?;

    debug!(days, start, end, "parsing interval");

    let rule = Rule {
        days: parse_days(days)?,
        start: parse_time(start)?,
        end: parse_time(end)?,
        excluded_principals: Vec::new(),
    };
    trace!(interval = %rule, "parsed interval");
    Ok(rule)
}

/// Parses a comma-separated list of day abbreviations.
///
/// Duplicates are kept. An empty token is an unknown day.
fn parse_days(days: &str) -> Result<Vec<WeekDay>> {
    SplitKeepEmpty::new(days, LIST_SEPARATOR)
        .map(|token| {
            let token = trim(token).unwrap_or("");
            let day = WeekDay::from_abbrev(token).ok_or_else(|| ConfigError::UnknownWeekday {
                token: token.to_string(),
                days: days.to_string(),
            })?;
            trace!(%day, "week day");
            Ok(day)
        })
        .collect()
}

/// Parses `HH:MM`.
pub fn parse_time(time: &str) -> Result<TimeOfDay> {
    let invalid = |reason| ConfigError::InvalidTime {
        time: time.to_string(),
        reason,
    };

    let (hour, minute) = time
        .split_once(TIME_SEPARATOR)
        .ok_or_else(|| invalid("expected HH:MM"))?;
    let hour = parse_component(hour).ok_or_else(|| invalid("hour is not a number"))?;
    let minute = parse_component(minute).ok_or_else(|| invalid("minute is not a number"))?;

    if hour > 23 {
        return Err(invalid("hour out of range (0..23)"));
    }
    if minute > 59 {
        return Err(invalid("minute out of range (0..59)"));
    }

    // Both checked above.
    TimeOfDay::new(hour as u8, minute as u8).ok_or_else(|| invalid("out of range"))
}

fn parse_component(raw: &str) -> Option<u32> {
    let digits = trim(raw)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Overlong digit strings saturate and then fail the range check.
    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

/// Parses one role group. Blank names are skipped.
fn parse_roles(group: &str) -> Vec<String> {
    let Some(group) = trim(group) else {
        debug!("role group is empty");
        return Vec::new();
    };

    debug!(group, "parsing role group");
    group
        .split(LIST_SEPARATOR)
        .filter_map(trim)
        .inspect(|role| trace!(role, "excluded role"))
        .map(str::to_string)
        .collect()
}

fn malformed(entry: &str, reason: &'static str) -> ConfigError {
    ConfigError::MalformedInterval {
        entry: entry.to_string(),
        reason,
    }
}
