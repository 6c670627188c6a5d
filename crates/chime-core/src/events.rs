use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alarm::Alarm;

/// Every lifecycle transition in the engine produces an Event.
/// The front-end renders them; the engine never waits on a consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// An alarm entered the single ringing slot.
    Rang { alarm: Alarm, at: DateTime<Utc> },
    /// A ringing alarm was acknowledged, manually or by timeout.
    Stopped { id: Uuid, at: DateTime<Utc> },
    /// A ringing alarm was deferred; a one-shot replacement was scheduled.
    Snoozed {
        id: Uuid,
        minutes: i64,
        at: DateTime<Utc>,
    },
    Deleted { id: Uuid, at: DateTime<Utc> },
    ClearedAll { at: DateTime<Utc> },
    /// An operation was refused with no state change.
    Rejected { reason: String, at: DateTime<Utc> },
}

impl Event {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_by_type() {
        let json = serde_json::to_string(&Event::rejected("Invalid time 24:00:00")).unwrap();
        assert!(json.contains(r#""type":"Rejected""#));
        assert!(json.contains("Invalid time 24:00:00"));
    }
}
