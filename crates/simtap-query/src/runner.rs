use crate::templates::crossmatch_query;
use metrics::counter;
use simtap_core::service::QueryService;
use simtap_core::transform::concat;
use simtap_core::types::{Identifier, TabularResult};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Progress notification, one per identifier processed.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Matched {
        position: usize,
        total: usize,
        identifier: Identifier,
        rows: usize,
    },
    Failed {
        position: usize,
        total: usize,
        identifier: Identifier,
        message: String,
    },
}

impl BatchEvent {
    pub fn identifier(&self) -> &Identifier {
        match self {
            BatchEvent::Matched { identifier, .. } | BatchEvent::Failed { identifier, .. } => identifier,
        }
    }
}

pub trait BatchObserver: Send + Sync {
    fn notify(&self, event: &BatchEvent);
}

/// Writes batch progress to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BatchObserver for TracingObserver {
    fn notify(&self, event: &BatchEvent) {
        match event {
            BatchEvent::Matched {
                position,
                total,
                identifier,
                rows,
            } => info!("[{position}/{total}] {identifier}: {rows} row(s)"),
            BatchEvent::Failed {
                position,
                total,
                identifier,
                message,
            } => warn!("[{position}/{total}] query failed for source_id {identifier}: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryFailure {
    pub identifier: Identifier,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub result: TabularResult,
    pub matched: usize,
    pub failures: Vec<QueryFailure>,
}

/// Issues one cross-match query per identifier, strictly in order.
#[derive(Debug)]
pub struct CrossMatchRunner<'a, S: ?Sized, O: ?Sized> {
    service: &'a S,
    observer: &'a O,
}

impl<'a, S, O> CrossMatchRunner<'a, S, O>
where
    S: QueryService + ?Sized,
    O: BatchObserver + ?Sized,
{
    pub fn new(service: &'a S, observer: &'a O) -> Self {
        Self { service, observer }
    }

    pub async fn run_batch(&self, identifiers: &[Identifier], id_prefix: &str) -> TabularResult {
        self.run_batch_report(identifiers, id_prefix).await.result
    }

    /// Failed identifiers are reported and skipped; the batch never aborts.
    /// With no successes the result is empty.
    pub async fn run_batch_report(&self, identifiers: &[Identifier], id_prefix: &str) -> BatchReport {
        let run_id = Uuid::new_v4();
        let span = info_span!("crossmatch", %run_id, identifiers = identifiers.len());
        self.collect(run_id, identifiers, id_prefix).instrument(span).await
    }

    async fn collect(&self, run_id: Uuid, identifiers: &[Identifier], id_prefix: &str) -> BatchReport {
        let total = identifiers.len();
        let mut results = Vec::new();
        let mut failures = Vec::new();

        for (idx, identifier) in identifiers.iter().enumerate() {
            let query = crossmatch_query(identifier, id_prefix);
            debug!(%identifier, query = %query, "submitting cross-match query");
            let event = match self.service.execute_query(&query).await {
                Ok(result) => {
                    counter!("crossmatch_query_success_total").increment(1);
                    let rows = result.len();
                    results.push(result);
                    BatchEvent::Matched {
                        position: idx + 1,
                        total,
                        identifier: identifier.clone(),
                        rows,
                    }
                }
                Err(err) => {
                    counter!("crossmatch_query_error_total").increment(1);
                    let message = err.to_string();
                    failures.push(QueryFailure {
                        identifier: identifier.clone(),
                        message: message.clone(),
                    });
                    BatchEvent::Failed {
                        position: idx + 1,
                        total,
                        identifier: identifier.clone(),
                        message,
                    }
                }
            };
            self.observer.notify(&event);
        }

        let matched = results.len();
        let result = concat(results);
        info!(
            matched,
            failed = failures.len(),
            rows = result.len(),
            "cross-match batch finished"
        );
        BatchReport {
            run_id,
            result,
            matched,
            failures,
        }
    }
}

/// Runs a batch reporting progress through `tracing`.
pub async fn run_batch<S>(service: &S, identifiers: &[Identifier], id_prefix: &str) -> TabularResult
where
    S: QueryService + ?Sized,
{
    CrossMatchRunner::new(service, &TracingObserver)
        .run_batch(identifiers, id_prefix)
        .await
}
