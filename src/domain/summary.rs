// Dataset-level summary figures shown next to the charts
use super::aggregate::AggregateRow;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Row count plus min/max/mean per metric column, recomputed after every
/// refresh. Ragged datasets are summarized column-wise: a column's figures
/// cover only the rows wide enough to carry it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub metrics: Vec<MetricSummary>,
}

impl DatasetSummary {
    pub fn from_rows(rows: &[AggregateRow]) -> Self {
        let width = rows.iter().map(|row| row.metrics.len()).max().unwrap_or(0);

        let mut metrics = Vec::with_capacity(width);
        for column in 0..width {
            let values: Vec<f64> = rows.iter().filter_map(|row| row.metric(column)).collect();
            if values.is_empty() {
                continue;
            }
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            metrics.push(MetricSummary { min, max, mean });
        }

        Self {
            rows: rows.len(),
            metrics,
        }
    }
}
