// Plot binder - keeps chart targets redrawing from the shared dataset
use std::sync::{Arc, Weak};

use crate::application::dataset_store::DatasetStore;
use crate::application::render_sink::RenderSink;
use crate::domain::projection::Projection;
use crate::domain::series::Series;

/// Creates bindings between chart targets and projections. Each binding
/// renders once immediately, so charts are populated before the first fetch,
/// and again on every refresh. Bindings live until the process exits.
pub struct PlotBinder {
    store: Arc<DatasetStore>,
    sink: Arc<dyn RenderSink>,
}

impl PlotBinder {
    pub fn new(store: Arc<DatasetStore>, sink: Arc<dyn RenderSink>) -> Self {
        Self { store, sink }
    }

    pub fn bind(&self, target: &str, projection: Projection) {
        if let Err(err) = redraw(&self.store, self.sink.as_ref(), target, &projection) {
            tracing::warn!("initial render of '{}' failed: {:#}", target, err);
        }

        // Weak, so the store does not hold itself alive through its handlers.
        let store = Arc::downgrade(&self.store);
        let sink = self.sink.clone();
        let target = target.to_string();
        let closure_target = target.clone();
        self.store.subscribe(move || {
            let Some(store) = Weak::upgrade(&store) else {
                return Ok(());
            };
            redraw(&store, sink.as_ref(), &closure_target, &projection)
        });
        tracing::debug!("bound chart target '{}'", target);
    }
}

/// One redraw cycle: snapshot, project every row in order, hand the series to
/// the sink. A failure here is confined to this target and cycle.
fn redraw(
    store: &DatasetStore,
    sink: &dyn RenderSink,
    target: &str,
    projection: &Projection,
) -> anyhow::Result<()> {
    let snapshot = store.current();
    let series = Series::project(&snapshot, projection)?;
    tracing::debug!("redrawing '{}' with {} point(s)", target, series.len());
    sink.render(target, &series)
}
