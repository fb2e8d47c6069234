//! Snapshot loading
//!
//! One load cycle fetches the three documents concurrently. A failure on
//! any of them degrades that collection to empty and never affects the
//! other two.

use crate::events::now_timestamp;
use crate::feed::error::FeedError;
use crate::feed::{FeedSource, Resource};
use crate::model::Snapshot;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// What happened to one document during a cycle.
#[derive(Debug)]
pub enum Outcome {
    /// Decoded `records` entries, skipping `skipped` that could not be represented.
    Loaded { records: usize, skipped: usize },
    /// Degraded to an empty collection.
    Degraded(FeedError),
}

/// Per-document outcomes of one cycle, in fetch order.
#[derive(Debug)]
pub struct LoadReport {
    pub outcomes: Vec<(Resource, Outcome)>,
}

impl LoadReport {
    pub fn degraded(&self) -> impl Iterator<Item = (Resource, &FeedError)> {
        self.outcomes.iter().filter_map(|(resource, outcome)| match outcome {
            Outcome::Degraded(e) => Some((*resource, e)),
            Outcome::Loaded { .. } => None,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode a document body into a list of records.
///
/// The body must be well-formed JSON and an array. Elements are taken
/// verbatim with per-field fallbacks; an element that is not a record at
/// all, such as a bare number, is skipped.
/// Returns the records and the number of skipped elements.
pub fn decode_collection<T: DeserializeOwned>(body: &[u8]) -> Result<(Vec<T>, usize), FeedError> {
    let value: Value = serde_json::from_slice(body)?;
    let Value::Array(items) = value else {
        return Err(FeedError::NotAList {
            found: json_kind(&value),
        });
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    let skipped = total - records.len();
    Ok((records, skipped))
}

async fn load_one<T: DeserializeOwned>(
    source: &dyn FeedSource,
    resource: Resource,
) -> (Vec<T>, Outcome) {
    let decoded = match source.fetch(resource).await {
        Ok(body) => decode_collection::<T>(&body),
        Err(e) => Err(e),
    };
    match decoded {
        Ok((records, skipped)) => {
            if skipped > 0 {
                log::debug!(
                    "skipped {} undecodable entries in {}",
                    skipped,
                    resource.file_name()
                );
            }
            let outcome = Outcome::Loaded {
                records: records.len(),
                skipped,
            };
            (records, outcome)
        }
        Err(e) => {
            log::warn!("failed to load {}: {}", resource.file_name(), e);
            (Vec::new(), Outcome::Degraded(e))
        }
    }
}

/// Run one load cycle against `source`.
///
/// All three fetches are issued together and awaited together. The refresh
/// timestamp is stamped once, after every fetch has resolved.
pub async fn load_snapshot(source: &dyn FeedSource) -> (Snapshot, LoadReport) {
    let ((events, events_outcome), (wallets, wallets_outcome), (alerts, alerts_outcome)) =
        futures::join!(
            load_one(source, Resource::Events),
            load_one(source, Resource::Wallets),
            load_one(source, Resource::Alerts),
        );

    let snapshot = Snapshot {
        events,
        wallets,
        alerts,
        refreshed_at: now_timestamp(),
    };
    let report = LoadReport {
        outcomes: vec![
            (Resource::Events, events_outcome),
            (Resource::Wallets, wallets_outcome),
            (Resource::Alerts, alerts_outcome),
        ],
    };
    (snapshot, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::MockFeedSource;
    use crate::model::{AirdropEvent, Alert, WalletReport};

    const EVENTS: &str = r#"[
        {"project":"X","status":"active","source":"cmc_airdrops","requirements":[]},
        {"project":"Y","status":"ended","source":"airdrops_io"}
    ]"#;
    const WALLETS: &str = r#"[{"name":"main","chain":"ethereum","address":"0x1","tx_count":42,"has_defi_activity":true}]"#;
    const ALERTS: &str = r#"[{"id":"1","type":"new","priority":"medium","project":"X","message":"m","links":{}}]"#;

    fn body(s: &str) -> Result<Vec<u8>, FeedError> {
        Ok(s.as_bytes().to_vec())
    }

    fn mock_with(
        events: fn() -> Result<Vec<u8>, FeedError>,
        wallets: fn() -> Result<Vec<u8>, FeedError>,
        alerts: fn() -> Result<Vec<u8>, FeedError>,
    ) -> MockFeedSource {
        let mut mock = MockFeedSource::new();
        mock.expect_fetch().times(3).returning(move |resource| match resource {
            Resource::Events => events(),
            Resource::Wallets => wallets(),
            Resource::Alerts => alerts(),
        });
        mock
    }

    #[test]
    fn test_decode_rejects_non_list() {
        let result = decode_collection::<AirdropEvent>(br#"{"project":"X"}"#);
        assert!(matches!(result, Err(FeedError::NotAList { found: "object" })));
        let result = decode_collection::<AirdropEvent>(b"null");
        assert!(matches!(result, Err(FeedError::NotAList { found: "null" })));
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let result = decode_collection::<Alert>(b"[{\"id\":");
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_decode_skips_unrepresentable_entries() {
        let (records, skipped) =
            decode_collection::<WalletReport>(br#"[{"name":"a"}, 7, {"tx_count":"many"}]"#)
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].tx_count, 0);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn test_records_with_null_fields_are_kept_and_counted() {
        let (events, skipped) = decode_collection::<AirdropEvent>(
            br#"[
                {"project":"X","status":"active","requirements":null},
                {"project":"Y","status":"active","reward_type":null}
            ]"#,
        )
        .unwrap();
        assert_eq!((events.len(), skipped), (2, 0));

        let (alerts, skipped) = decode_collection::<Alert>(
            br#"[{"project":"X","priority":"high","links":{"details":null}}]"#,
        )
        .unwrap();
        assert_eq!((alerts.len(), skipped), (1, 0));

        let stats = crate::stats::Statistics::compute(&events, &[], &alerts);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.high_alerts, 1);
        assert_eq!(
            crate::listing::priority_badge("X", &alerts),
            Some("high")
        );
    }

    #[tokio::test]
    async fn test_all_documents_load() {
        let mock = mock_with(|| body(EVENTS), || body(WALLETS), || body(ALERTS));
        let (snapshot, report) = load_snapshot(&mock).await;

        assert_eq!(snapshot.events.len(), 2);
        assert_eq!(snapshot.wallets.len(), 1);
        assert_eq!(snapshot.alerts.len(), 1);
        assert!(!snapshot.refreshed_at.is_empty());
        assert_eq!(report.degraded().count(), 0);
    }

    #[tokio::test]
    async fn test_http_failure_degrades_only_that_document() {
        let mock = mock_with(
            || body(EVENTS),
            || {
                Err(FeedError::Http {
                    status: 500,
                    message: "down".to_string(),
                })
            },
            || body(ALERTS),
        );
        let (snapshot, report) = load_snapshot(&mock).await;

        assert_eq!(snapshot.events.len(), 2);
        assert!(snapshot.wallets.is_empty());
        assert_eq!(snapshot.alerts.len(), 1);
        let degraded: Vec<Resource> = report.degraded().map(|(r, _)| r).collect();
        assert_eq!(degraded, vec![Resource::Wallets]);
    }

    #[tokio::test]
    async fn test_unreachable_source_degrades_each_document() {
        let mut mock = MockFeedSource::new();
        mock.expect_fetch().times(3).returning(|_| {
            Err(FeedError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "refused",
            )))
        });
        let (snapshot, report) = load_snapshot(&mock).await;

        assert!(snapshot.events.is_empty());
        assert!(snapshot.wallets.is_empty());
        assert!(snapshot.alerts.is_empty());
        assert_eq!(report.degraded().count(), 3);
        assert!(!snapshot.refreshed_at.is_empty());
    }

    #[tokio::test]
    async fn test_non_list_body_degrades_to_empty() {
        let mock = mock_with(
            || body(r#"{"events":[]}"#),
            || body(WALLETS),
            || body("not json"),
        );
        let (snapshot, report) = load_snapshot(&mock).await;

        assert!(snapshot.events.is_empty());
        assert_eq!(snapshot.wallets.len(), 1);
        assert!(snapshot.alerts.is_empty());
        assert_eq!(report.degraded().count(), 2);
    }
}
