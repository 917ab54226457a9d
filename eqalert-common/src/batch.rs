//! Batch conversion of fetched bulletins
//!
//! Each document is handled on its own: a failed fetch, an unparsable body or
//! a malformed bulletin is logged and skipped without affecting the others.

use tracing::{info, warn};

use crate::document::{DocumentParser, Node};
use crate::information::normalize_information;
use crate::record::NormalizedRecord;
use crate::report::normalize_report;
use crate::tracker::{DuplicationTracker, TrackerStore};
use crate::Result;

/// One bulletin as delivered by the fetcher
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedDocument {
    /// Where the bulletin came from, used for logging only
    pub url: String,
    /// Raw text, or `None` if the fetch failed
    pub body: Option<String>,
}

impl FetchedDocument {
    pub fn fetched(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: Some(body.into()),
        }
    }

    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: None,
        }
    }
}

/// Normalize a batch of information bulletins, in input order
pub fn convert_information<P: DocumentParser>(
    documents: &[FetchedDocument],
    parser: &P,
) -> Vec<NormalizedRecord> {
    convert_each("information", documents, parser, normalize_information)
}

/// Normalize a batch of intensity reports, in input order
pub fn convert_reports<P: DocumentParser, S: TrackerStore>(
    documents: &[FetchedDocument],
    parser: &P,
    tracker: &DuplicationTracker<S>,
) -> Vec<NormalizedRecord> {
    convert_each("report", documents, parser, |doc| normalize_report(doc, tracker))
}

fn convert_each<P, F>(
    kind: &str,
    documents: &[FetchedDocument],
    parser: &P,
    mut normalize: F,
) -> Vec<NormalizedRecord>
where
    P: DocumentParser,
    F: FnMut(&Node) -> Result<NormalizedRecord>,
{
    let mut records = Vec::with_capacity(documents.len());

    for document in documents {
        let Some(body) = &document.body else {
            warn!("Skipping {} bulletin {}: fetch failed", kind, document.url);
            continue;
        };

        let tree = match parser.parse(body) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("Skipping {} bulletin {}: {}", kind, document.url, e);
                continue;
            }
        };

        match normalize(&tree) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping {} bulletin {}: {}", kind, document.url, e),
        }
    }

    info!(
        "Converted {} of {} {} bulletins",
        records.len(),
        documents.len(),
        kind
    );
    records
}
