// Publish/subscribe channel for dataset refresh notifications
use std::sync::{Arc, Mutex};

type RefreshHandler = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Decouples "the dataset changed" from "who needs to know".
///
/// Handlers are invoked in registration order, once per publish; registering
/// the same handler twice means it runs twice. A failing handler is logged
/// and must not stop the handlers after it.
#[derive(Default)]
pub struct RefreshSignal {
    handlers: Mutex<Vec<RefreshHandler>>,
}

impl RefreshSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handlers.lock().unwrap().push(Arc::new(handler));
    }

    /// Notify every subscriber. The handler list is snapshotted first so a
    /// handler may itself subscribe or publish without deadlocking.
    pub fn publish(&self) {
        let handlers: Vec<RefreshHandler> = self.handlers.lock().unwrap().clone();
        tracing::debug!("publishing refresh to {} subscriber(s)", handlers.len());
        for (index, handler) in handlers.into_iter().enumerate() {
            if let Err(err) = (*handler)() {
                tracing::warn!("refresh handler {} failed: {:#}", index, err);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_handlers_run_in_registration_order() {
        let signal = RefreshSignal::new();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for id in 0..3 {
            let calls = calls.clone();
            signal.subscribe(move || {
                calls.lock().unwrap().push(id);
                Ok(())
            });
        }

        signal.publish();
        assert_eq!(*calls.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_each_publish_invokes_each_handler_once() {
        let signal = RefreshSignal::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = count.clone();
        signal.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        signal.publish();
        signal.publish();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let signal = RefreshSignal::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let counter = count.clone();
            signal.subscribe(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        signal.publish();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_failing_handler_does_not_stop_later_handlers() {
        let signal = RefreshSignal::new();
        let reached = Arc::new(AtomicUsize::new(0));

        signal.subscribe(|| anyhow::bail!("boom"));
        let counter = reached.clone();
        signal.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        signal.publish();
        assert_eq!(reached.load(Ordering::SeqCst), 1);
    }
}
