//! Normalization of hypocenter and intensity information bulletins

use tracing::debug;

use crate::areas::aggregate_stations;
use crate::coordinate::parse_optional_coordinate;
use crate::document::Node;
use crate::intensity::ABSENT_CODE;
use crate::record::{with_sequence_suffix, AreaMap, Epicenter, NormalizedRecord, NONE_TEXT};
use crate::Result;

/// Status marker of a bulletin in published state
pub const PUBLISHED_STATUS: &str = "発表";

const TITLE: &[&str] = &["Report", "Head", "Title"];
const INFO_TYPE: &[&str] = &["Report", "Head", "InfoType"];
const SERIAL: &[&str] = &["Report", "Head", "Serial"];
const HEADLINE: &[&str] = &["Report", "Head", "Headline", "Text"];
const FORECAST_COMMENT: &[&str] = &["Report", "Body", "Comments", "ForecastComment", "Text"];
const HYPOCENTER_NAME: &[&str] = &["Report", "Body", "Earthquake", "Hypocenter", "Area", "Name"];
const HYPOCENTER_COORDINATE: &[&str] = &[
    "Report",
    "Body",
    "Earthquake",
    "Hypocenter",
    "Area",
    "jmx_eb:Coordinate",
    "#text",
];
const MAGNITUDE: &[&str] = &["Report", "Body", "Earthquake", "jmx_eb:Magnitude", "#text"];
const OBSERVATION_PREFS: &[&str] = &["Report", "Body", "Intensity", "Observation", "Pref"];
const OBSERVATION_MAX_INT: &[&str] = &["Report", "Body", "Intensity", "Observation", "MaxInt"];

/// Normalize an information bulletin
///
/// Bulletins whose status is anything other than [`PUBLISHED_STATUS`] carry
/// little more than a headline and get a minimal record. Published bulletins
/// must carry title, headline, forecast comment, hypocenter name and
/// magnitude; every other field falls back to a default.
pub fn normalize_information(doc: &Node) -> Result<NormalizedRecord> {
    let title = doc.require_text(TITLE)?;
    let status = doc.require_text(INFO_TYPE)?;
    let headline = doc.require_text(HEADLINE)?;

    if status != PUBLISHED_STATUS {
        debug!(
            "Information bulletin '{}' has status '{}', emitting minimal record",
            title, status
        );
        return Ok(NormalizedRecord {
            title: format!("{} {}", title, status),
            max_seismic_intensity: NONE_TEXT.to_string(),
            magnitude: NONE_TEXT.to_string(),
            explanation: vec![headline.to_string()],
            epicenter: Epicenter::default(),
            areas: AreaMap::new(),
        });
    }

    let mut explanation = vec![headline.to_string()];
    explanation.extend(
        doc.require_text(FORECAST_COMMENT)?
            .split("\n\n")
            .map(str::to_string),
    );

    let (lat, lon) = parse_optional_coordinate(doc.text_at(HYPOCENTER_COORDINATE));
    let epicenter = Epicenter {
        name: doc.require_text(HYPOCENTER_NAME)?.to_string(),
        lat,
        lon,
    };

    let title = match doc.text_at(SERIAL) {
        Some(serial) => with_sequence_suffix(title, serial),
        None => title.to_string(),
    };

    let areas = match doc.lookup(OBSERVATION_PREFS) {
        Some(prefs) => aggregate_stations(prefs).unwrap_or_else(|e| {
            debug!("Observation block unusable ({}), areas left empty", e);
            AreaMap::new()
        }),
        None => AreaMap::new(),
    };

    let max_seismic_intensity = doc
        .text_at(OBSERVATION_MAX_INT)
        .unwrap_or(ABSENT_CODE)
        .to_string();

    let magnitude = doc.require_text(MAGNITUDE)?.to_string();

    Ok(NormalizedRecord {
        title,
        max_seismic_intensity,
        magnitude,
        explanation,
        epicenter,
        areas,
    })
}
