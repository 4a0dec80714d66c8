//! Check command: dry-run the decision for one principal at one instant.

use anyhow::{Context, Result};
use block_access::{Clock, Decision, Effect, LocalTime, SystemClock, decide};
use chrono::NaiveDateTime;
use serde::Serialize;

use super::{Format, SourceArgs};
use crate::style::colors::SemanticStyle;
use crate::style::{print_error, print_labeled};

/// Accepted layout of `--at`.
pub const AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Serialize)]
struct Report<'a> {
    user: &'a str,
    at: LocalTime,
    decision: &'a Decision,
}

/// Parses `--at`, read as server wall-clock time.
pub fn parse_at(at: &str) -> Result<LocalTime> {
    let naive = NaiveDateTime::parse_from_str(at.trim(), AT_FORMAT)
        .with_context(|| format!("Invalid --at value {at:?}, expected YYYY-MM-DD HH:MM"))?;
    Ok(LocalTime::from_datetime(&naive.and_utc()))
}

pub fn run(source: &SourceArgs, user: &str, at: Option<&str>, format: Format) -> Result<Effect> {
    let now = match at {
        Some(at) => parse_at(at)?,
        None => SystemClock.now(),
    };

    let config = source.load().context("Failed to load configuration")?;
    let rules = match config.validate() {
        Ok(rules) => rules,
        Err(e) => {
            // A broken configuration rejects every login.
            print_error(&format!("Configuration is invalid, every login is denied: {e}"));
            return Err(e.into());
        }
    };

    let decision = decide(&rules, now, user);
    let report = Report {
        user,
        at: now,
        decision: &decision,
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Toml => println!("{}", toml::to_string_pretty(&report)?),
        Format::Text => {
            let verdict = match decision.effect {
                Effect::Allow => "ALLOW".success(),
                Effect::Deny => "DENY".error(),
            };
            println!("{verdict} {}", user.header());
            print_labeled(
                "at",
                &format!("{} {:02}:{:02}", now.weekday, now.hour, now.minute),
            );
            print_labeled("reason", &decision.reason);
            if let Some((index, rule)) = decision
                .matched_rule
                .and_then(|index| rules.get(index).map(|rule| (index, rule)))
            {
                print_labeled("rule", &format!("#{index} {}", rule.to_string().code()));
            }
        }
    }

    Ok(decision.effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_access::WeekDay;

    #[test]
    fn test_parse_at() {
        // 2024-06-04 was a Tuesday.
        let at = parse_at("2024-06-04 20:05").unwrap();
        assert_eq!(at, LocalTime::new(WeekDay::Tue, 20, 5));
    }

    #[test]
    fn test_parse_at_rejects_other_layouts() {
        assert!(parse_at("2024-06-04T20:05").is_err());
        assert!(parse_at("tue 20:05").is_err());
        assert!(parse_at("2024-06-04 24:00").is_err());
    }
}
