// Chart series model: paired category labels and projected values
use serde::Serialize;

use super::aggregate::AggregateRow;
use super::projection::{Projection, ProjectionError};

/// One render-ready series: `x` holds the category labels, `y` the projected
/// values, in dataset order. Both sequences always have equal length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

impl Series {
    /// Project every row of `rows` in order. Pure: the same rows and
    /// projection always yield the same series. Fails on the first row the
    /// projection cannot handle, producing no partial series.
    pub fn project(rows: &[AggregateRow], projection: &Projection) -> Result<Self, ProjectionError> {
        let mut x = Vec::with_capacity(rows.len());
        let mut y = Vec::with_capacity(rows.len());
        for row in rows {
            let value = projection.apply(row)?;
            x.push(row.category.clone());
            y.push(value);
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
