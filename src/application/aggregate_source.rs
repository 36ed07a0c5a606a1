// Source trait for filtered aggregate data
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregate::Dataset;
use crate::domain::query::QueryParams;

/// Why a submission cycle failed. Any of these leaves the dataset store
/// untouched and unpublished.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not complete (connection refused, DNS, broken pipe).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The configured deadline elapsed before a response arrived.
    #[error("aggregate request timed out")]
    Timeout,

    /// The endpoint answered with something other than 200.
    #[error("aggregate endpoint returned status {status}")]
    Server { status: u16 },

    /// The body was not JSON, or the `data` rows did not have the expected
    /// category-then-metrics shape.
    #[error("malformed aggregate payload: {reason}")]
    MalformedData { reason: String },
}

#[async_trait]
pub trait AggregateSource: Send + Sync {
    /// Fetch the aggregate rows matching `params` from the backing endpoint.
    /// Either every row parses or the whole fetch fails; callers never see a
    /// partially-valid dataset.
    async fn fetch_aggregates(&self, params: &QueryParams) -> Result<Dataset, FetchError>;
}
