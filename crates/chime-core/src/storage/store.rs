//! Durable alarm list storage.
//!
//! The whole list is a single JSON document, rewritten synchronously on
//! every mutation so a crash or reload never observes a half-applied
//! state transition. Reads never touch the file after the initial load.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::data_dir;
use crate::alarm::Alarm;
use crate::error::{Result, StoreError, ValidationError};

const STORE_FILE: &str = "alarms.json";

/// Wrapper for the on-disk document.
#[derive(Serialize, Deserialize, Default)]
struct AlarmsFile {
    alarms: Vec<Alarm>,
}

/// Owns the durable list of alarm definitions. Pure data access, no
/// timing logic.
#[derive(Debug)]
pub struct AlarmStore {
    path: PathBuf,
    alarms: Vec<Alarm>,
}

impl AlarmStore {
    /// Open the store in the data directory, loading the list once.
    pub fn open() -> Result<Self> {
        Self::load(data_dir()?.join(STORE_FILE))
    }

    /// Open a store at a custom path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::load(path.into())
    }

    fn load(path: PathBuf) -> Result<Self> {
        let alarms = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let file: AlarmsFile = serde_json::from_str(&content).map_err(|source| {
                    StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    }
                })?;
                file.alarms
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::ReadFailed { path, source }.into()),
        };
        Ok(Self { path, alarms })
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn get(&self, id: Uuid) -> Option<&Alarm> {
        self.alarms.iter().find(|alarm| alarm.id == id)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a definition. Rejects a `(time, name)` pair that is already
    /// scheduled, leaving the list untouched.
    pub fn add(&mut self, alarm: Alarm) -> Result<()> {
        if self
            .alarms
            .iter()
            .any(|existing| existing.time == alarm.time && existing.name == alarm.name)
        {
            return Err(ValidationError::DuplicateAlarm {
                time: alarm.time,
                name: alarm.name,
            }
            .into());
        }
        self.alarms.push(alarm);
        self.persist()
    }

    /// Remove by id. Unknown ids return `Ok(None)`.
    pub fn remove(&mut self, id: Uuid) -> Result<Option<Alarm>> {
        let Some(pos) = self.alarms.iter().position(|alarm| alarm.id == id) else {
            return Ok(None);
        };
        let alarm = self.alarms.remove(pos);
        self.persist()?;
        Ok(Some(alarm))
    }

    /// Patch a definition in place. Returns false for unknown ids.
    pub fn update(&mut self, id: Uuid, patch: impl FnOnce(&mut Alarm)) -> Result<bool> {
        let Some(alarm) = self.alarms.iter_mut().find(|alarm| alarm.id == id) else {
            return Ok(false);
        };
        patch(alarm);
        self.persist()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.alarms.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let file = AlarmsFile {
            alarms: self.alarms.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(StoreError::Encode)?;
        std::fs::write(&self.path, content).map_err(|source| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            "persisted {} alarm(s) to {}",
            self.alarms.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{RepeatPolicy, SoundKind};
    use crate::error::CoreError;
    use chrono::NaiveTime;

    fn alarm(h: u32, m: u32, name: &str) -> Alarm {
        let time = NaiveTime::from_hms_opt(h, m, 0).unwrap();
        Alarm::new(time, name, RepeatPolicy::Daily, SoundKind::Default)
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AlarmStore::with_path(dir.path().join("alarms.json")).unwrap();
        assert!(store.alarms().is_empty());
    }

    #[test]
    fn mutations_persist_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarms.json");

        let mut store = AlarmStore::with_path(&path).unwrap();
        let a = alarm(7, 30, "Wake");
        let id = a.id;
        store.add(a).unwrap();
        store.update(id, |alarm| alarm.armed = false).unwrap();

        let reloaded = AlarmStore::with_path(&path).unwrap();
        assert_eq!(reloaded.alarms().len(), 1);
        assert!(!reloaded.get(id).unwrap().armed);
    }

    #[test]
    fn duplicate_time_and_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AlarmStore::with_path(dir.path().join("alarms.json")).unwrap();
        store.add(alarm(7, 30, "Wake")).unwrap();

        let err = store.add(alarm(7, 30, "Wake")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::DuplicateAlarm { .. })
        ));
        assert_eq!(store.alarms().len(), 1);

        // Same time under a different name is fine.
        store.add(alarm(7, 30, "Other")).unwrap();
        assert_eq!(store.alarms().len(), 2);
    }

    #[test]
    fn remove_unknown_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AlarmStore::with_path(dir.path().join("alarms.json")).unwrap();
        assert!(store.remove(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn update_unknown_is_false() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AlarmStore::with_path(dir.path().join("alarms.json")).unwrap();
        assert!(!store.update(Uuid::new_v4(), |a| a.armed = false).unwrap());
    }

    #[test]
    fn clear_empties_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarms.json");

        let mut store = AlarmStore::with_path(&path).unwrap();
        store.add(alarm(7, 30, "Wake")).unwrap();
        store.add(alarm(8, 0, "Gym")).unwrap();
        store.clear().unwrap();

        let reloaded = AlarmStore::with_path(&path).unwrap();
        assert!(reloaded.alarms().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarms.json");
        std::fs::write(&path, "not json").unwrap();

        let err = AlarmStore::with_path(&path).unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::Corrupt { .. })));
    }
}
