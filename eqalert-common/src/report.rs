//! Normalization of seismic intensity reports
//!
//! Reports list affected areas by name, grouped under localized intensity
//! labels. The same event is reported repeatedly as observations arrive, so
//! each report is numbered through a [`DuplicationTracker`].

use tracing::debug;

use crate::document::{Node, Value};
use crate::intensity::{label_to_code, UNKNOWN_CODE};
use crate::record::{with_sequence_suffix, AreaMap, Epicenter, NormalizedRecord, NONE_TEXT};
use crate::tracker::{DuplicationTracker, TrackerStore};
use crate::{Error, Result};

const TITLE: &[&str] = &["Report", "Head", "Title"];
const EVENT_ID: &[&str] = &["Report", "Head", "EventID"];
const HEADLINE: &[&str] = &["Report", "Head", "Headline", "Text"];
const HEADLINE_INFORMATION: &[&str] = &["Report", "Head", "Headline", "Information"];
const FORECAST_COMMENT: &[&str] = &["Report", "Body", "Comments", "ForecastComment", "Text"];

/// Report content before it is numbered
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContent {
    pub title: String,
    pub event_id: String,
    pub max_seismic_intensity: String,
    pub explanation: Vec<String>,
    pub areas: AreaMap,
}

impl ReportContent {
    /// Finish the record using the sequence number of this issue
    pub fn into_record(self, sequence: u32) -> NormalizedRecord {
        NormalizedRecord {
            title: with_sequence_suffix(&self.title, &sequence.to_string()),
            max_seismic_intensity: self.max_seismic_intensity,
            magnitude: NONE_TEXT.to_string(),
            explanation: self.explanation,
            epicenter: Epicenter::default(),
            areas: self.areas,
        }
    }
}

/// Normalize a report, numbering it against `tracker`
///
/// The tracker is only consulted once the document has been fully
/// extracted, so a malformed report does not consume a sequence number.
pub fn normalize_report<S: TrackerStore>(
    doc: &Node,
    tracker: &DuplicationTracker<S>,
) -> Result<NormalizedRecord> {
    let content = extract_report(doc)?;
    let sequence = tracker.next_sequence(&content.event_id)?;
    debug!("Report for event {} numbered {}", content.event_id, sequence);
    Ok(content.into_record(sequence))
}

/// Extract everything a report carries except its sequence number
///
/// The maximum intensity is the first item's label: items arrive ordered
/// strongest first and are not re-sorted here.
pub fn extract_report(doc: &Node) -> Result<ReportContent> {
    let title = doc.require_text(TITLE)?.to_string();
    let event_id = doc.require_text(EVENT_ID)?.to_string();

    let mut explanation = vec![doc.require_text(HEADLINE)?.to_string()];
    if let Some(comment) = doc.text_at(FORECAST_COMMENT) {
        explanation.push(comment.to_string());
    }

    // Only the first information block carries intensity items
    let information = doc
        .require(HEADLINE_INFORMATION)?
        .as_sequence()
        .first()
        .and_then(Value::as_node)
        .ok_or_else(|| Error::missing(HEADLINE_INFORMATION))?;
    let items = information.require(&["Item"])?.as_sequence();

    let mut areas = AreaMap::new();
    let mut max_label = None;
    for item in items {
        let item = item
            .as_node()
            .ok_or_else(|| Error::MissingField("Item (expected element)".to_string()))?;
        let label = item.require_text(&["Kind", "Name"])?;
        max_label.get_or_insert(label);

        let names = item
            .require(&["Areas", "Area"])?
            .as_sequence()
            .iter()
            .map(|area| {
                area.as_node()
                    .and_then(|area| area.text_at(&["Name"]))
                    .map(str::to_string)
                    .ok_or_else(|| Error::missing(&["Areas", "Area", "Name"]))
            })
            .collect::<Result<Vec<_>>>()?;
        areas.extend(label, names);
    }

    let max_seismic_intensity = max_label.map(label_to_code).unwrap_or(UNKNOWN_CODE);

    Ok(ReportContent {
        title,
        event_id,
        max_seismic_intensity: max_seismic_intensity.to_string(),
        explanation,
        areas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentParser, JsonDocumentParser};
    use serde_json::json;

    fn parse(json: serde_json::Value) -> Node {
        JsonDocumentParser.parse(&json.to_string()).unwrap()
    }

    fn report(information: serde_json::Value) -> serde_json::Value {
        json!({
            "Report": {
                "Head": {
                    "Title": "震度速報",
                    "EventID": "20200304100000",
                    "Headline": {
                        "Text": "震度３以上が観測されました。",
                        "Information": information
                    }
                },
                "Body": {
                    "Comments": {"ForecastComment": {"Text": "今後の情報に注意してください。\n\n以上です。"}}
                }
            }
        })
    }

    #[test]
    fn test_items_grouped_by_label_in_item_order() {
        let doc = parse(report(json!({
            "@type": "震度速報",
            "Item": [
                {"Kind": {"Name": "震度５強"}, "Areas": {"Area": [
                    {"Name": "宮城県北部"},
                    {"Name": "岩手県沿岸南部"}
                ]}},
                {"Kind": {"Name": "震度4"}, "Areas": {"Area": {"Name": "福島県中通り"}}}
            ]
        })));
        let content = extract_report(&doc).unwrap();
        assert_eq!(content.max_seismic_intensity, "5+");
        let labels: Vec<&str> = content.areas.labels().collect();
        assert_eq!(labels, vec!["震度５強", "震度4"]);
        assert_eq!(content.areas.get("震度５強").unwrap().len(), 2);
        assert!(content.areas.get("震度4").unwrap().contains("福島県中通り"));
    }

    #[test]
    fn test_comment_appended_as_one_block() {
        let doc = parse(report(json!({
            "Item": {"Kind": {"Name": "震度3"}, "Areas": {"Area": {"Name": "茨城県南部"}}}
        })));
        let content = extract_report(&doc).unwrap();
        assert_eq!(content.explanation.len(), 2);
        assert_eq!(content.explanation[1], "今後の情報に注意してください。\n\n以上です。");
    }

    #[test]
    fn test_missing_comment_is_tolerated() {
        let mut json = report(json!({
            "Item": {"Kind": {"Name": "震度3"}, "Areas": {"Area": {"Name": "茨城県南部"}}}
        }));
        json["Report"].as_object_mut().unwrap().remove("Body");
        let content = extract_report(&parse(json)).unwrap();
        assert_eq!(content.explanation, vec!["震度３以上が観測されました。"]);
    }

    #[test]
    fn test_only_first_information_block_is_used() {
        let doc = parse(report(json!([
            {"Item": {"Kind": {"Name": "震度6弱"}, "Areas": {"Area": {"Name": "石川県能登"}}}},
            {"Item": {"Kind": {"Name": "震度7"}, "Areas": {"Area": {"Name": "どこか"}}}}
        ])));
        let content = extract_report(&doc).unwrap();
        assert_eq!(content.max_seismic_intensity, "6-");
        assert_eq!(content.areas.len(), 1);
    }

    #[test]
    fn test_first_item_wins_even_if_weaker() {
        let doc = parse(report(json!({
            "Item": [
                {"Kind": {"Name": "震度3"}, "Areas": {"Area": {"Name": "A"}}},
                {"Kind": {"Name": "震度5弱"}, "Areas": {"Area": {"Name": "B"}}}
            ]
        })));
        assert_eq!(extract_report(&doc).unwrap().max_seismic_intensity, "3");
    }

    #[test]
    fn test_unknown_label_maps_to_zero() {
        let doc = parse(report(json!({
            "Item": {"Kind": {"Name": "震度５弱以上未入電"}, "Areas": {"Area": {"Name": "A"}}}
        })));
        let content = extract_report(&doc).unwrap();
        assert_eq!(content.max_seismic_intensity, "0");
        assert!(content.areas.get("震度５弱以上未入電").is_some());
    }

    #[test]
    fn test_into_record_fills_placeholders() {
        let doc = parse(report(json!({
            "Item": {"Kind": {"Name": "震度3"}, "Areas": {"Area": {"Name": "A"}}}
        })));
        let record = extract_report(&doc).unwrap().into_record(2);
        assert_eq!(record.title, "震度速報 第2報");
        assert_eq!(record.magnitude, "None");
        assert_eq!(record.epicenter, Epicenter::default());

        let first = extract_report(&doc).unwrap().into_record(1);
        assert_eq!(first.title, "震度速報");
    }

    #[test]
    fn test_missing_event_id_fails() {
        let mut json = report(json!({"Item": []}));
        json["Report"]["Head"].as_object_mut().unwrap().remove("EventID");
        assert!(matches!(extract_report(&parse(json)), Err(Error::MissingField(_))));
    }
}
