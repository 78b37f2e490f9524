use crate::classifier::Classifier;
use crate::event::AppEvent;
use crate::session::PendingTurn;
use std::sync::{mpsc, Arc};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Runs classifications on the tokio runtime and reports back to the UI thread.
pub struct ClassifierWorker {
    classifier: Arc<dyn Classifier>,
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
    shutdown: CancellationToken,
}

impl ClassifierWorker {
    pub fn new(
        runtime_handle: Handle,
        tx: mpsc::Sender<AppEvent>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            classifier,
            tx,
            runtime_handle,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn dispatch(&self, turn: PendingTurn) {
        let classifier = Arc::clone(&self.classifier);
        let tx = self.tx.clone();
        let shutdown = self.shutdown.child_token();

        self.runtime_handle.spawn(async move {
            debug!(turn = turn.id.0, classifier = classifier.name(), "classifying turn");
            let outcome = tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!(turn = turn.id.0, "classification cancelled");
                    return;
                }
                outcome = classifier.classify(&turn.text, turn.health) => outcome,
            };
            let _ = tx.send(AppEvent::ClassificationFinished {
                turn: turn.id,
                outcome,
            });
        });
    }

    /// Abandons every in-flight classification; none of them will report.
    pub fn shutdown(&self) {
        if !self.shutdown.is_cancelled() {
            info!("classifier worker shutting down");
            self.shutdown.cancel();
        }
    }
}

impl Drop for ClassifierWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
