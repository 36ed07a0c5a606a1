// Projections select one numeric value per row for a chart's vertical axis
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::aggregate::AggregateRow;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("row '{category}' has {available} metric column(s), projection needs column {index}")]
    MissingMetric {
        category: String,
        index: usize,
        available: usize,
    },
}

/// A pure function from one aggregate row to one vertical-axis value.
///
/// Projections carry no state and must tolerate every row of the dataset they
/// are applied to; a row they cannot handle is reported as a typed error so
/// the failing binding can be isolated.
#[derive(Clone)]
pub struct Projection {
    inner: Arc<dyn Fn(&AggregateRow) -> Result<f64, ProjectionError> + Send + Sync>,
}

impl Projection {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&AggregateRow) -> Result<f64, ProjectionError> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Select the metric in column `index` (zero-based, category excluded).
    pub fn metric(index: usize) -> Self {
        Self::new(move |row| {
            row.metric(index).ok_or_else(|| ProjectionError::MissingMetric {
                category: row.category.clone(),
                index,
                available: row.metrics.len(),
            })
        })
    }

    pub fn apply(&self, row: &AggregateRow) -> Result<f64, ProjectionError> {
        (*self.inner)(row)
    }
}

impl fmt::Debug for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Projection")
    }
}
