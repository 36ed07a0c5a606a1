// Fetch controller - turns a submitted filter form into a dataset refresh
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::query::QueryParams;

use super::aggregate_source::{AggregateSource, FetchError};
use super::dataset_store::DatasetStore;

/// What happened to one submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The dataset was replaced and the refresh published.
    Installed { rows: usize },
    /// A newer submission overtook this one; its response was discarded.
    Superseded,
}

/// Owns the request/response cycle end-to-end: build the query, fetch, and on
/// success install the rows and publish the refresh.
///
/// Every submission gets a monotonically increasing generation id. A response
/// belonging to a generation that is no longer the newest is dropped instead
/// of overwriting fresher data, so overlapping submissions cannot interleave.
pub struct FetchController {
    source: Arc<dyn AggregateSource>,
    store: Arc<DatasetStore>,
    issued: AtomicU64,
    installed: AtomicU64,
}

impl FetchController {
    pub fn new(source: Arc<dyn AggregateSource>, store: Arc<DatasetStore>) -> Self {
        Self {
            source,
            store,
            issued: AtomicU64::new(0),
            installed: AtomicU64::new(0),
        }
    }

    /// Submit raw form fields (values may be empty; empty values are not
    /// sent). On any `FetchError` the store is left untouched and no refresh
    /// fires; the error is returned for the caller to surface.
    pub async fn submit(&self, fields: &[(String, String)]) -> Result<SubmitOutcome, FetchError> {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let params =
            QueryParams::from_fields(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        tracing::debug!(
            "submission #{}: {} filter(s), query '{}'",
            generation,
            params.len(),
            params.to_query_string()
        );

        let rows = self.source.fetch_aggregates(&params).await?;

        if self.issued.load(Ordering::SeqCst) != generation {
            tracing::debug!("submission #{} superseded before its response landed", generation);
            return Ok(SubmitOutcome::Superseded);
        }
        // A stale response must also never roll back a newer installation.
        if self.installed.fetch_max(generation, Ordering::SeqCst) >= generation {
            return Ok(SubmitOutcome::Superseded);
        }

        let count = rows.len();
        self.store.replace(rows);
        self.store.publish();
        tracing::info!("submission #{}: installed {} row(s)", generation, count);
        Ok(SubmitOutcome::Installed { rows: count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregate::{AggregateRow, Dataset};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct Scripted {
        delay: Option<Duration>,
        result: Result<Dataset, FetchError>,
    }

    /// Replays canned responses in order and records every query it saw.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Scripted>>,
        seen: Mutex<Vec<QueryParams>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Scripted>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AggregateSource for ScriptedSource {
        async fn fetch_aggregates(&self, params: &QueryParams) -> Result<Dataset, FetchError> {
            self.seen.lock().unwrap().push(params.clone());
            let scripted = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unscripted fetch");
            if let Some(delay) = scripted.delay {
                tokio::time::sleep(delay).await;
            }
            scripted.result
        }
    }

    fn rows(categories: &[&str]) -> Dataset {
        categories
            .iter()
            .map(|c| AggregateRow::new(c.to_string(), vec![1.0]))
            .collect()
    }

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_successful_submit_installs_and_publishes_once() {
        let source = Arc::new(ScriptedSource::new(vec![Scripted {
            delay: None,
            result: Ok(rows(&["Mon", "Tue"])),
        }]));
        let store = Arc::new(DatasetStore::new());
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = notified.clone();
        store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let controller = FetchController::new(source, store.clone());
        let outcome = controller.submit(&fields(&[("area", "a1")])).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::Installed { rows: 2 });
        assert_eq!(*store.current(), rows(&["Mon", "Tue"]));
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_fields_are_not_sent() {
        let source = Arc::new(ScriptedSource::new(vec![Scripted {
            delay: None,
            result: Ok(Vec::new()),
        }]));
        let store = Arc::new(DatasetStore::new());
        let controller = FetchController::new(source.clone(), store);

        controller
            .submit(&fields(&[("category", "A"), ("region", "")]))
            .await
            .unwrap();

        let seen = source.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].to_query_string(), "category=A");
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_store_unchanged_and_silent() {
        let source = Arc::new(ScriptedSource::new(vec![Scripted {
            delay: None,
            result: Err(FetchError::Server { status: 503 }),
        }]));
        let store = Arc::new(DatasetStore::new());
        store.replace(rows(&["Mon"]));
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = notified.clone();
        store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let controller = FetchController::new(source, store.clone());
        let err = controller.submit(&[]).await.unwrap_err();

        assert!(matches!(err, FetchError::Server { status: 503 }));
        assert_eq!(*store.current(), rows(&["Mon"]));
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_slow_response_is_superseded_by_newer_submission() {
        let source = Arc::new(ScriptedSource::new(vec![
            Scripted {
                delay: Some(Duration::from_millis(50)),
                result: Ok(rows(&["stale"])),
            },
            Scripted {
                delay: None,
                result: Ok(rows(&["fresh"])),
            },
        ]));
        let store = Arc::new(DatasetStore::new());
        let controller = FetchController::new(source, store.clone());

        let first_fields = fields(&[("month", "1")]);
        let second_fields = fields(&[("month", "2")]);
        let (first, second) = tokio::join!(
            controller.submit(&first_fields),
            controller.submit(&second_fields),
        );

        assert_eq!(first.unwrap(), SubmitOutcome::Superseded);
        assert_eq!(second.unwrap(), SubmitOutcome::Installed { rows: 1 });
        assert_eq!(*store.current(), rows(&["fresh"]));
    }
}
