// HTTP implementation of the aggregate source
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::application::aggregate_source::{AggregateSource, FetchError};
use crate::domain::aggregate::{AggregateRow, Dataset};
use crate::domain::query::QueryParams;

/// Fetches aggregates as `GET <base_url>?<filters>` and decodes the
/// `{"data": [[category, metric...], ...]}` envelope.
#[derive(Debug, Clone)]
pub struct HttpAggregateSource {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct AggregateEnvelope {
    data: Vec<Vec<serde_json::Value>>,
}

impl HttpAggregateSource {
    /// `timeout` bounds the whole request; a hung endpoint surfaces as
    /// `FetchError::Timeout` instead of freezing the refresh cycle forever.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_query_url(&self, params: &QueryParams) -> String {
        if params.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}?{}", self.base_url, params.to_query_string())
        }
    }
}

fn request_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Transport(err.to_string())
    }
}

fn body_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else if err.is_decode() {
        FetchError::MalformedData {
            reason: err.to_string(),
        }
    } else {
        FetchError::Transport(err.to_string())
    }
}

fn malformed(index: usize, reason: &str) -> FetchError {
    FetchError::MalformedData {
        reason: format!("row {}: {}", index, reason),
    }
}

/// A row is a string category followed by at least one numeric metric.
fn parse_row(index: usize, cells: &[serde_json::Value]) -> Result<AggregateRow, FetchError> {
    let (first, rest) = cells
        .split_first()
        .ok_or_else(|| malformed(index, "empty row"))?;
    let category = first
        .as_str()
        .ok_or_else(|| malformed(index, "category is not a string"))?;
    if rest.is_empty() {
        return Err(malformed(index, "no metric columns"));
    }
    let metrics = rest
        .iter()
        .map(|cell| {
            cell.as_f64()
                .ok_or_else(|| malformed(index, "metric is not a number"))
        })
        .collect::<Result<Vec<f64>, FetchError>>()?;
    Ok(AggregateRow::new(category.to_string(), metrics))
}

fn parse_dataset(envelope: AggregateEnvelope) -> Result<Dataset, FetchError> {
    envelope
        .data
        .iter()
        .enumerate()
        .map(|(index, cells)| parse_row(index, cells))
        .collect()
}

#[async_trait]
impl AggregateSource for HttpAggregateSource {
    async fn fetch_aggregates(&self, params: &QueryParams) -> Result<Dataset, FetchError> {
        let url = self.build_query_url(params);
        tracing::debug!("fetching aggregates: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(request_error)?;

        // The endpoint contract promises 200 on success; anything else,
        // redirects and other 2xx included, is a failed cycle.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Server {
                status: status.as_u16(),
            });
        }

        let envelope = response
            .json::<AggregateEnvelope>()
            .await
            .map_err(body_error)?;
        parse_dataset(envelope)
    }
}
