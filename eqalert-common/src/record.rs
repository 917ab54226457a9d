//! Flat, display-ready bulletin record

use std::collections::BTreeSet;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Placeholder for text fields a bulletin does not carry
pub const NONE_TEXT: &str = "None";

/// Normalized form of one bulletin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub title: String,
    pub max_seismic_intensity: String,
    pub magnitude: String,
    pub explanation: Vec<String>,
    pub epicenter: Epicenter,
    pub areas: AreaMap,
}

/// Epicenter name and position; the default is the zeroed placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epicenter {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Default for Epicenter {
    fn default() -> Self {
        Self {
            name: NONE_TEXT.to_string(),
            lat: 0.0,
            lon: 0.0,
        }
    }
}

/// Intensity label to affected area identifiers
///
/// Keys keep insertion order, which callers arrange to be descending
/// severity. Only non-empty buckets are ever stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaMap {
    buckets: Vec<(String, BTreeSet<String>)>,
}

impl AreaMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `ids` into the bucket for `label`, appending a new bucket if needed
    ///
    /// An empty `ids` leaves the map untouched.
    pub fn extend<I>(&mut self, label: &str, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut ids = ids.into_iter().peekable();
        if ids.peek().is_none() {
            return;
        }
        match self.buckets.iter_mut().find(|(key, _)| key == label) {
            Some((_, bucket)) => bucket.extend(ids),
            None => self.buckets.push((label.to_string(), ids.collect())),
        }
    }

    pub fn get(&self, label: &str) -> Option<&BTreeSet<String>> {
        self.buckets
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, bucket)| bucket)
    }

    /// Labels in serialization order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.buckets.iter().map(|(key, bucket)| (key.as_str(), bucket))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Serialize for AreaMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (label, ids) in &self.buckets {
            map.serialize_entry(label, ids)?;
        }
        map.end()
    }
}

/// Append `" 第N報"` when `sequence` is anything other than the first issue
pub fn with_sequence_suffix(title: &str, sequence: &str) -> String {
    if sequence == "1" {
        title.to_string()
    } else {
        format!("{} 第{}報", title, sequence)
    }
}
