//! Background syntax checking for a session.

use ropey::Rope;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::kernel::editor::syntax::{HighlightRules, SyntaxDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub row: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub version: u64,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
enum WorkerRequest {
    Update { version: u64, text: String },
    Terminate,
}

/// Handle to a syntax-checking task. Dropping the handle stops the task.
pub struct SyntaxWorker {
    tx: mpsc::UnboundedSender<WorkerRequest>,
    reports: watch::Receiver<Option<WorkerReport>>,
    task: JoinHandle<()>,
}

impl SyntaxWorker {
    pub(crate) fn spawn(
        handle: &Handle,
        rules: &'static HighlightRules,
        version: u64,
        text: String,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (report_tx, reports) = watch::channel(None);
        let task = handle.spawn(run(rules, rx, report_tx));

        let worker = Self { tx, reports, task };
        worker.update(version, text);
        worker
    }

    /// Queue a new document snapshot. Snapshots that pile up are coalesced to the newest.
    pub fn update(&self, version: u64, text: String) {
        if self.tx.send(WorkerRequest::Update { version, text }).is_err() {
            tracing::warn!(version, "syntax worker already stopped");
        }
    }

    pub fn latest(&self) -> Option<WorkerReport> {
        self.reports.borrow().clone()
    }

    /// Wait until a report for `version` (or newer) is published.
    ///
    /// Returns `None` if the worker stopped first.
    pub async fn wait_for_version(&mut self, version: u64) -> Option<WorkerReport> {
        let report = self
            .reports
            .wait_for(|report| report.as_ref().is_some_and(|r| r.version >= version))
            .await
            .ok()?;
        (*report).clone()
    }

    pub fn terminate(&self) {
        let _ = self.tx.send(WorkerRequest::Terminate);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl std::fmt::Debug for SyntaxWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxWorker")
            .field("latest", &*self.reports.borrow())
            .field("finished", &self.task.is_finished())
            .finish()
    }
}

impl Drop for SyntaxWorker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    rules: &'static HighlightRules,
    mut rx: mpsc::UnboundedReceiver<WorkerRequest>,
    reports: watch::Sender<Option<WorkerReport>>,
) {
    tracing::debug!(rules = rules.name, "syntax worker started");

    while let Some(request) = rx.recv().await {
        let WorkerRequest::Update {
            mut version,
            mut text,
        } = request
        else {
            break;
        };

        let mut terminate = false;
        while let Ok(next) = rx.try_recv() {
            match next {
                WorkerRequest::Update {
                    version: newer,
                    text: newer_text,
                } => {
                    version = newer;
                    text = newer_text;
                }
                WorkerRequest::Terminate => {
                    terminate = true;
                    break;
                }
            }
        }
        if terminate {
            break;
        }

        // Parsing a large document blocks, so it runs on the blocking pool.
        let diagnostics = match tokio::task::spawn_blocking(move || check(rules, &text)).await {
            Ok(diagnostics) => diagnostics,
            Err(err) => {
                tracing::warn!(version, error = %err, "syntax check failed");
                continue;
            }
        };
        tracing::debug!(version, count = diagnostics.len(), "syntax check finished");
        if reports
            .send(Some(WorkerReport {
                version,
                diagnostics,
            }))
            .is_err()
        {
            break;
        }
    }

    tracing::debug!(rules = rules.name, "syntax worker stopped");
}

fn check(rules: &'static HighlightRules, text: &str) -> Vec<Diagnostic> {
    let rope = Rope::from_str(text);
    let Some(doc) = SyntaxDocument::new(rules, &rope) else {
        return Vec::new();
    };

    doc.error_nodes()
        .into_iter()
        .map(|node| Diagnostic {
            row: node.row,
            column: node.column,
            message: match node.missing {
                Some(kind) => format!("missing `{kind}`"),
                None => "syntax error".to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/mode/worker.rs"]
mod tests;
