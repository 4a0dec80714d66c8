//! Access window rule model.
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s, each granting access on a set
//! of week days between a start and an end time. Principals named in a rule's
//! exclusion list are exempt from denial outside that window.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// WeekDay
// ============================================================================

/// Day of the week, numbered from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Sun = 0,
    Mon = 1,
    Tue = 2,
    Wed = 3,
    Thu = 4,
    Fri = 5,
    Sat = 6,
}

impl WeekDay {
    /// All days in numbering order.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sun,
        WeekDay::Mon,
        WeekDay::Tue,
        WeekDay::Wed,
        WeekDay::Thu,
        WeekDay::Fri,
        WeekDay::Sat,
    ];

    /// Parses a three-letter lowercase abbreviation (`sun` .. `sat`).
    ///
    /// Matching is case-sensitive: `Mon` is not recognised.
    pub fn from_abbrev(token: &str) -> Option<Self> {
        match token {
            "sun" => Some(Self::Sun),
            "mon" => Some(Self::Mon),
            "tue" => Some(Self::Tue),
            "wed" => Some(Self::Wed),
            "thu" => Some(Self::Thu),
            "fri" => Some(Self::Fri),
            "sat" => Some(Self::Sat),
            _ => None,
        }
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
        }
    }

    /// Numeric index, Sunday = 0.
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sun,
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
        }
    }
}

// ============================================================================
// TimeOfDay
// ============================================================================

/// Wall-clock time with minute resolution.
///
/// Both fields are always in range: `hour` in `0..=23`, `minute` in `0..=59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Returns `None` if either field is out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour <= 23 && minute <= 59).then_some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight (`0..=1439`).
    pub fn minutes(self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ============================================================================
// Rule
// ============================================================================

/// One configured access window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Days this window applies to, in configured order. Never empty.
    pub days: Vec<WeekDay>,
    /// First minute of the window (inclusive).
    pub start: TimeOfDay,
    /// Last minute of the window (inclusive).
    pub end: TimeOfDay,
    /// Principals admitted outside the window on this rule's days.
    pub excluded_principals: Vec<String>,
}

impl Rule {
    /// Returns `true` if `day` is one of this rule's days.
    pub fn covers(&self, day: WeekDay) -> bool {
        self.days.contains(&day)
    }

    /// Returns `true` if `now_minutes` lies within `[start, end]`.
    ///
    /// A window whose end precedes its start contains no minute at all.
    pub fn window_contains(&self, now_minutes: u16) -> bool {
        self.start.minutes() <= now_minutes && now_minutes <= self.end.minutes()
    }

    /// Exact, case-sensitive match against the exclusion list.
    pub fn excludes(&self, principal: &str) -> bool {
        self.excluded_principals.iter().any(|p| p == principal)
    }

    /// Returns `true` if no minute can ever fall inside the window.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for Rule {
    /// Renders the rule in configuration syntax, e.g. `mon,wed - 08:00-18:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, day) in self.days.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{day}")?;
        }
        write!(f, " - {}-{}", self.start, self.end)
    }
}

// ============================================================================
// RuleSet
// ============================================================================

/// Ordered collection of rules derived from one configuration snapshot.
///
/// Rule order is significant: the first rule covering a day wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// An empty set disables enforcement entirely.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// First rule, in configured order, that lists `day`, with its index.
    pub fn first_covering(&self, day: WeekDay) -> Option<(usize, &Rule)> {
        self.rules.iter().enumerate().find(|(_, r)| r.covers(day))
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
