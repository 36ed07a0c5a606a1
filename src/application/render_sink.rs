// Rendering sink trait - the charting backend boundary
use crate::domain::series::Series;

/// Where finished series go. The charting backend behind this trait performs
/// an idempotent full redraw of `target`; no incremental-update contract is
/// assumed, so handing over the same series twice renders the same chart.
pub trait RenderSink: Send + Sync {
    fn render(&self, target: &str, series: &Series) -> anyhow::Result<()>;
}
