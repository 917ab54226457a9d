//! Station intensity aggregation
//!
//! Observation blocks nest four levels deep: prefecture (`Pref`) → area
//! (`Area`) → city (`City`) → station (`IntensityStation`). Each level may
//! hold a single node or a sequence. Station codes are collected into one set
//! per intensity level.

use std::collections::BTreeSet;

use crate::document::{Node, Value};
use crate::intensity::IntensityLevel;
use crate::record::AreaMap;
use crate::{Error, Result};

const REGION_KEY: &str = "Area";
const LOCALITY_KEY: &str = "City";
const STATION_KEY: &str = "IntensityStation";
const STATION_INTENSITY_KEY: &str = "Int";
const STATION_CODE_KEY: &str = "Code";

/// Accumulator of station codes per intensity level
#[derive(Debug, Clone, Default)]
pub struct StationBuckets {
    buckets: [BTreeSet<String>; 9],
}

impl StationBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a station reading; unknown intensity codes are ignored
    pub fn add(&mut self, intensity: &str, station_code: &str) {
        if let Some(level) = IntensityLevel::from_code(intensity) {
            self.buckets[level.rank()].insert(station_code.to_string());
        }
    }

    /// Non-empty buckets keyed by canonical code, strongest first
    pub fn into_area_map(self) -> AreaMap {
        let mut areas = AreaMap::new();
        for (level, bucket) in IntensityLevel::DESCENDING.iter().zip(self.buckets) {
            areas.extend(level.code(), bucket);
        }
        areas
    }
}

/// Walk every prefecture under `prefectures` and bucket its stations
///
/// Fails with `MissingField` if any level of the hierarchy is incomplete.
pub fn aggregate_stations(prefectures: &Value) -> Result<AreaMap> {
    let mut buckets = StationBuckets::new();
    for prefecture in prefectures.as_sequence() {
        collect_prefecture(prefecture, &mut buckets)?;
    }
    Ok(buckets.into_area_map())
}

fn collect_prefecture(prefecture: &Value, buckets: &mut StationBuckets) -> Result<()> {
    for region in child(prefecture, REGION_KEY)?.as_sequence() {
        for city in child(region, LOCALITY_KEY)?.as_sequence() {
            for station in child(city, STATION_KEY)?.as_sequence() {
                let station = as_node(station, STATION_KEY)?;
                let intensity = station.require_text(&[STATION_INTENSITY_KEY])?;
                let code = station.require_text(&[STATION_CODE_KEY])?;
                buckets.add(intensity, code);
            }
        }
    }
    Ok(())
}

fn child<'a>(value: &'a Value, key: &str) -> Result<&'a Value> {
    as_node(value, key)?.require(&[key])
}

fn as_node<'a>(value: &'a Value, key: &str) -> Result<&'a Node> {
    value
        .as_node()
        .ok_or_else(|| Error::MissingField(format!("{} (expected element)", key)))
}
