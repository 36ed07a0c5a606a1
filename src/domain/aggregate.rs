// Aggregate data domain models

/// One data point of the summary charts: a category label followed by one or
/// more metric columns in a stable order (e.g. total consumption, average
/// consumption).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub category: String,
    pub metrics: Vec<f64>,
}

impl AggregateRow {
    pub fn new(category: String, metrics: Vec<f64>) -> Self {
        Self { category, metrics }
    }

    /// The metric in column `index`, if the row is wide enough.
    pub fn metric(&self, index: usize) -> Option<f64> {
        self.metrics.get(index).copied()
    }
}

/// The full ordered sequence of rows currently being visualized. Always
/// replaced wholesale, never mutated in place.
pub type Dataset = Vec<AggregateRow>;
