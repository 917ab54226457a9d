//! Report duplication tracking
//!
//! Intensity reports for one event are reissued as the picture develops.
//! The tracker keeps a small persistent list of recently seen event ids and
//! hands out a 1-based sequence number per sighting. Entries idle for longer
//! than the retention window are dropped at the start of every call.
//!
//! The read-modify-write cycle is serialized inside one process by a mutex.
//! Separate processes sharing a store file are not coordinated; the last
//! writer wins.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::config::TrackerConfig;
use crate::time::{self, format_stamp, parse_stamp};
use crate::{Error, Result};

/// One remembered event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerEntry {
    #[serde(rename = "date", with = "stamp")]
    pub last_seen: NaiveDateTime,
    #[serde(rename = "id")]
    pub event_id: String,
    #[serde(rename = "report")]
    pub report_count: u32,
}

/// Structured persistence for tracker entries
pub trait TrackerStore {
    /// Load all entries; a store that does not exist yet reads as empty
    fn read(&self, path: &Path) -> Result<Vec<TrackerEntry>>;

    /// Replace the stored entries
    fn write(&self, path: &Path, entries: &[TrackerEntry]) -> Result<()>;
}

/// Tracker store kept as a JSON array on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileStore;

impl TrackerStore for JsonFileStore {
    fn read(&self, path: &Path) -> Result<Vec<TrackerEntry>> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write(&self, path: &Path, entries: &[TrackerEntry]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Write to a sibling temp file, then rename over the target
        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, path)?;
        Ok(())
    }
}

/// Apply one sighting of `event_id` at `now` to `entries`
///
/// Prunes entries idle for longer than `retention`, then bumps or inserts the
/// event. Returns the event's sequence number.
pub fn record_sighting(
    entries: &mut Vec<TrackerEntry>,
    event_id: &str,
    now: NaiveDateTime,
    retention: Duration,
) -> u32 {
    entries.retain(|entry| now - entry.last_seen <= retention);

    if let Some(entry) = entries.iter_mut().find(|entry| entry.event_id == event_id) {
        entry.report_count += 1;
        entry.last_seen = now;
        return entry.report_count;
    }

    entries.push(TrackerEntry {
        last_seen: now,
        event_id: event_id.to_string(),
        report_count: 1,
    });
    1
}

/// Persistent sequence-number source for report bulletins
pub struct DuplicationTracker<S: TrackerStore = JsonFileStore> {
    store: S,
    path: PathBuf,
    retention: Duration,
    lock: Mutex<()>,
}

impl DuplicationTracker<JsonFileStore> {
    /// JSON-file tracker at the location described by `config`
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(JsonFileStore, config.store_path(), config.retention())
    }
}

impl<S: TrackerStore> DuplicationTracker<S> {
    pub fn new(store: S, path: impl Into<PathBuf>, retention: Duration) -> Self {
        Self {
            store,
            path: path.into(),
            retention,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Sequence number for this sighting of `event_id`, using the wall clock
    pub fn next_sequence(&self, event_id: &str) -> Result<u32> {
        self.next_sequence_at(event_id, time::now())
    }

    /// Sequence number for a sighting of `event_id` at `now`
    ///
    /// The store is always rewritten, even when only a timestamp changed.
    pub fn next_sequence_at(&self, event_id: &str, now: NaiveDateTime) -> Result<u32> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::InvalidInput("tracker lock poisoned".to_string()))?;

        let mut entries = match self.store.read(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Report cache {} unreadable ({}), starting empty",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        };

        let before = entries.len();
        let sequence = record_sighting(&mut entries, event_id, now, self.retention);
        debug!(
            "Event {} is report #{} ({} cached before, {} after)",
            event_id,
            sequence,
            before,
            entries.len()
        );

        self.store.write(&self.path, &entries)?;
        Ok(sequence)
    }
}

/// Serde adapter for `YYYYMMDDHHMMSS` stamps; integers are accepted on read
mod stamp {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawStamp {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(
        time: &NaiveDateTime,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_stamp(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<NaiveDateTime, D::Error> {
        let raw = match RawStamp::deserialize(deserializer)? {
            RawStamp::Text(text) => text,
            RawStamp::Number(number) => number.to_string(),
        };
        parse_stamp(&raw).map_err(serde::de::Error::custom)
    }
}
