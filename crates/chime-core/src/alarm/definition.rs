use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label given to alarms created without a name.
pub const DEFAULT_NAME: &str = "Alarm";

/// Rule governing which days an alarm may recur on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatPolicy {
    Once,
    Daily,
    Weekdays,
    Weekends,
}

impl RepeatPolicy {
    /// Whether this policy allows firing on the given day of week.
    pub fn matches_day(self, day: Weekday) -> bool {
        match self {
            Self::Once | Self::Daily => true,
            Self::Weekdays => !matches!(day, Weekday::Sat | Weekday::Sun),
            Self::Weekends => matches!(day, Weekday::Sat | Weekday::Sun),
        }
    }
}

impl fmt::Display for RepeatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekdays => "weekdays",
            Self::Weekends => "weekends",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RepeatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "once" => Ok(Self::Once),
            "daily" => Ok(Self::Daily),
            "weekdays" => Ok(Self::Weekdays),
            "weekends" => Ok(Self::Weekends),
            other => Err(format!(
                "unknown repeat policy '{other}' (expected once, daily, weekdays or weekends)"
            )),
        }
    }
}

/// Which of the fixed alert sounds the front-end should play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundKind {
    #[default]
    Default,
    Bell,
    Beep,
    Melody,
}

impl fmt::Display for SoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Default => "default",
            Self::Bell => "bell",
            Self::Beep => "beep",
            Self::Melody => "melody",
        };
        write!(f, "{s}")
    }
}

impl FromStr for SoundKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "bell" => Ok(Self::Bell),
            "beep" => Ok(Self::Beep),
            "melody" => Ok(Self::Melody),
            other => Err(format!(
                "unknown sound '{other}' (expected default, bell, beep or melody)"
            )),
        }
    }
}

/// A scheduled alarm.
///
/// `armed` is the double-fire guard: true means eligible to fire on the
/// next matching occurrence, false means it already fired this occurrence
/// and is waiting to be rearmed or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: Uuid,
    /// Time-of-day at second resolution; serializes as "HH:MM:SS".
    pub time: NaiveTime,
    pub name: String,
    pub repeat: RepeatPolicy,
    pub sound: SoundKind,
    pub armed: bool,
}

impl Alarm {
    /// Create a new armed alarm with a fresh id. Blank names fall back to
    /// [`DEFAULT_NAME`].
    pub fn new(time: NaiveTime, name: &str, repeat: RepeatPolicy, sound: SoundKind) -> Self {
        let name = name.trim();
        Self {
            id: Uuid::new_v4(),
            time,
            name: if name.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                name.to_string()
            },
            repeat,
            sound,
            armed: true,
        }
    }
}
