//! Alarm engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads or timers - the caller is responsible for calling `tick(now)`
//! periodically, at roughly one-second intervals.
//!
//! ## State Transitions
//!
//! ```text
//! Armed -> Ringing -> { Acknowledged -> (Armed | Removed),
//!                       Snoozed -> Removed + new one-shot }
//! ```
//!
//! At most one alarm occupies the ringing slot. The auto-stop deadline
//! rides on [`ActiveRing`] and is enforced by the next tick, so cancelling
//! it falls out of clearing the slot; `stop` additionally checks that the
//! slot still references the alarm being stopped.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{trigger, Alarm, RepeatPolicy, SoundKind};
use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::storage::AlarmStore;

/// How long a ringing alarm stays active before it is stopped on the
/// user's behalf.
pub const DEFAULT_RING_TIMEOUT_SECS: i64 = 600;

/// The single ringing slot. At most one exists at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRing {
    pub id: Uuid,
    /// Instant after which the ring is stopped automatically.
    pub deadline: NaiveDateTime,
}

/// Ephemeral engine state, serializable so a host can carry it across
/// invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineState {
    #[serde(default)]
    pub active: Option<ActiveRing>,
    #[serde(default)]
    pub last_tick: Option<NaiveDateTime>,
}

/// Core alarm engine.
///
/// Owns the durable store, the optional ringing slot and the instant up to
/// which due alarms have been consumed.
pub struct AlarmEngine {
    store: AlarmStore,
    active: Option<ActiveRing>,
    /// Upper bound of the last consumed due-window. Not advanced while an
    /// alarm rings, so alarms coming due during a ring queue implicitly
    /// and are picked up on the first tick after dismissal.
    last_tick: Option<NaiveDateTime>,
    ring_timeout: Duration,
}

impl AlarmEngine {
    pub fn new(store: AlarmStore) -> Self {
        Self {
            store,
            active: None,
            last_tick: None,
            ring_timeout: Duration::seconds(DEFAULT_RING_TIMEOUT_SECS),
        }
    }

    /// Restore an engine from a previously captured [`EngineState`].
    /// A stale ring reference whose definition no longer exists is dropped.
    pub fn with_state(store: AlarmStore, state: EngineState) -> Self {
        let active = state.active.filter(|ring| store.get(ring.id).is_some());
        Self {
            store,
            active,
            last_tick: state.last_tick,
            ring_timeout: Duration::seconds(DEFAULT_RING_TIMEOUT_SECS),
        }
    }

    pub fn set_ring_timeout(&mut self, timeout: Duration) {
        self.ring_timeout = timeout;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn alarms(&self) -> &[Alarm] {
        self.store.alarms()
    }

    pub fn store(&self) -> &AlarmStore {
        &self.store
    }

    pub fn active(&self) -> Option<&ActiveRing> {
        self.active.as_ref()
    }

    pub fn ring_timeout(&self) -> Duration {
        self.ring_timeout
    }

    /// Capture the ephemeral state for persistence by the host.
    pub fn state(&self) -> EngineState {
        EngineState {
            active: self.active,
            last_tick: self.last_tick,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// One evaluation pass. Enforces the auto-stop deadline, then - when
    /// the ringing slot is free - fires whatever came due since the last
    /// consumed instant, in list order. Every due alarm is disarmed, but
    /// only the first occupies the slot and produces [`Event::Rang`];
    /// firing is idempotent per occurrence because a disarmed alarm is
    /// never due again until rearmed.
    pub fn tick(&mut self, now: NaiveDateTime) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        if let Some(ring) = self.active {
            if now >= ring.deadline {
                info!("ring timeout reached for alarm {}", ring.id);
                if let Some(event) = self.stop(ring.id)? {
                    events.push(event);
                }
            }
        }

        if self.active.is_some() {
            // Blocked: due alarms stay armed and queue for the next tick
            // after dismissal.
            return Ok(events);
        }

        let since = self.last_tick;
        let due: Vec<Uuid> = self
            .store
            .alarms()
            .iter()
            .filter(|alarm| match since {
                Some(since) => trigger::fires_between(alarm, since, now),
                None => trigger::is_due(alarm, now),
            })
            .map(|alarm| alarm.id)
            .collect();

        for (i, id) in due.iter().enumerate() {
            self.store.update(*id, |alarm| alarm.armed = false)?;
            if i == 0 {
                if let Some(alarm) = self.store.get(*id).cloned() {
                    self.active = Some(ActiveRing {
                        id: *id,
                        deadline: now + self.ring_timeout,
                    });
                    info!("alarm {} ({}) is ringing", alarm.id, alarm.name);
                    events.push(Event::Rang {
                        alarm,
                        at: Utc::now(),
                    });
                }
            } else {
                debug!("alarm {id} also due this pass; fired without the slot");
            }
        }

        self.last_tick = Some(now);
        Ok(events)
    }

    /// Schedule a new alarm. Rejects out-of-range time components and
    /// `(time, name)` duplicates without mutating state.
    pub fn set_alarm(
        &mut self,
        hour: u32,
        minute: u32,
        second: u32,
        name: &str,
        repeat: RepeatPolicy,
        sound: SoundKind,
    ) -> Result<Alarm> {
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or(
            ValidationError::InvalidTime {
                hour,
                minute,
                second,
            },
        )?;
        let alarm = Alarm::new(time, name, repeat, sound);
        self.store.add(alarm.clone())?;
        Ok(alarm)
    }

    /// Schedule a one-shot alarm `minutes` from `now`, seconds zeroed.
    pub fn set_quick_alarm(&mut self, minutes: i64, now: NaiveDateTime) -> Result<Alarm> {
        let due = now + Duration::minutes(minutes);
        let time = due
            .time()
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or_else(|| due.time());
        let name = format!("Alarm in {minutes} min");
        let alarm = Alarm::new(time, &name, RepeatPolicy::Once, SoundKind::default());
        self.store.add(alarm.clone())?;
        Ok(alarm)
    }

    /// Acknowledge an alarm: free the ringing slot when it references this
    /// id, delete one-shot definitions, rearm repeating ones. Unknown ids
    /// are a no-op.
    pub fn stop(&mut self, id: Uuid) -> Result<Option<Event>> {
        if matches!(self.active, Some(ring) if ring.id == id) {
            self.active = None;
        }
        let Some(alarm) = self.store.get(id).cloned() else {
            return Ok(None);
        };
        if alarm.repeat == RepeatPolicy::Once {
            self.store.remove(id)?;
            debug!("one-shot alarm {id} removed on stop");
        } else {
            self.store.update(id, |alarm| alarm.armed = true)?;
            debug!("alarm {id} rearmed on stop");
        }
        Ok(Some(Event::Stopped { id, at: Utc::now() }))
    }

    /// Stop semantics plus a persisted one-shot replacement at
    /// `now + minutes`, named after the original and inheriting its sound.
    pub fn snooze(&mut self, id: Uuid, minutes: i64, now: NaiveDateTime) -> Result<Option<Event>> {
        let Some(original) = self.store.get(id).cloned() else {
            return Ok(None);
        };
        self.stop(id)?;
        let due = now + Duration::minutes(minutes);
        let time = due
            .time()
            .with_nanosecond(0)
            .unwrap_or_else(|| due.time());
        let name = format!("Snoozed: {}", original.name);
        let snoozed = Alarm::new(time, &name, RepeatPolicy::Once, original.sound);
        info!("alarm {id} snoozed for {minutes} min as {}", snoozed.id);
        self.store.add(snoozed)?;
        Ok(Some(Event::Snoozed {
            id,
            minutes,
            at: Utc::now(),
        }))
    }

    /// Remove an alarm, stopping it first when it is the one ringing.
    /// Unknown ids are a no-op.
    pub fn delete(&mut self, id: Uuid) -> Result<Option<Event>> {
        if self.store.get(id).is_none() {
            return Ok(None);
        }
        if matches!(self.active, Some(ring) if ring.id == id) {
            // One-shot definitions are already removed by this.
            self.stop(id)?;
        }
        self.store.remove(id)?;
        Ok(Some(Event::Deleted { id, at: Utc::now() }))
    }

    /// Stop any ringer and empty the store.
    pub fn clear_all(&mut self) -> Result<Event> {
        if let Some(ring) = self.active {
            self.stop(ring.id)?;
        }
        self.store.clear()?;
        Ok(Event::ClearedAll { at: Utc::now() })
    }
}
