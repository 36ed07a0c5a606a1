// JSON-lines rendering sink - one redraw event per line for the page script
use std::io::Write;
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;

use crate::application::render_sink::RenderSink;
use crate::domain::series::Series;

/// Emits every redraw as a single JSON line `{target, rendered_at, series}`.
/// The page-side chart script treats each line as a full replacement of that
/// target, which keeps the handoff idempotent.
pub struct JsonLinesSink<W: Write + Send> {
    out: Mutex<W>,
}

#[derive(Serialize)]
struct RenderEvent<'a> {
    target: &'a str,
    rendered_at: String,
    series: &'a Series,
}

impl JsonLinesSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }
}

impl<W: Write + Send> RenderSink for JsonLinesSink<W> {
    fn render(&self, target: &str, series: &Series) -> anyhow::Result<()> {
        let event = RenderEvent {
            target,
            rendered_at: Utc::now().to_rfc3339(),
            series,
        };
        let line = serde_json::to_string(&event)?;

        let mut out = self.out.lock().unwrap();
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}
