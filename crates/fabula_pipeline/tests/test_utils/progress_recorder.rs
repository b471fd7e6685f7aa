//! Captures every progress checkpoint the pipeline reports.
//!
//! The watch channel only keeps the latest snapshot, so back-to-back
//! checkpoints are read from the pipeline's `Progress` debug events instead.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Layer recording the `percent` field of each `Progress` event.
#[derive(Clone, Default)]
pub struct ProgressRecorder {
    percents: Arc<Mutex<Vec<u8>>>,
}

impl ProgressRecorder {
    /// Record events on this thread until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    /// Percentages in report order.
    pub fn percents(&self) -> Vec<u8> {
        self.percents.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for ProgressRecorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = ProgressVisitor::default();
        event.record(&mut visitor);
        if let (true, Some(percent)) = (visitor.is_progress, visitor.percent) {
            self.percents.lock().unwrap().push(percent);
        }
    }
}

#[derive(Default)]
struct ProgressVisitor {
    percent: Option<u8>,
    is_progress: bool,
}

impl Visit for ProgressVisitor {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "percent" {
            self.percent = u8::try_from(value).ok();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.is_progress = format!("{:?}", value) == "Progress";
        }
    }
}
