//! Task Runner
//!
//! Executes [`Task`]s off the update loop. Each task runs on tokio's
//! blocking pool (storage calls and image decoding are synchronous) and
//! sends exactly one [`Msg`] back when done. At most `max_concurrent`
//! tasks touch the store at once; the rest wait for a permit.
//!
//! The runner counts tasks in flight so shutdown can wait for pending
//! writes before the store is closed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify, Semaphore};

use crate::logic;
use crate::messages::{CommandOrigin, Msg, Task};
use crate::model::Entry;
use crate::services::{command, file_ops, preview};
use crate::services::preview::PreviewOptions;
use crate::vfs::Storage;

/// Default number of tasks allowed to run at the same time
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Runs tasks in the background and reports back on the message channel
#[derive(Clone)]
pub struct TaskRunner {
    storage: Arc<dyn Storage>,
    tx: mpsc::UnboundedSender<Msg>,
    options: PreviewOptions,
    permits: Arc<Semaphore>,
    in_flight: Arc<InFlight>,
}

/// Number of dispatched tasks that have not finished yet
#[derive(Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

impl InFlight {
    fn start(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// Marks a task finished when dropped, including when it panics
struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.finish();
    }
}

impl TaskRunner {
    pub fn new(
        storage: Arc<dyn Storage>,
        tx: mpsc::UnboundedSender<Msg>,
        options: PreviewOptions,
    ) -> Self {
        Self {
            storage,
            tx,
            options,
            permits: Arc::new(Semaphore::new(DEFAULT_MAX_CONCURRENT)),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Tasks dispatched but not yet finished
    pub fn pending(&self) -> usize {
        self.in_flight.count.load(Ordering::SeqCst)
    }

    /// Wait until every dispatched task has finished, at most `timeout`
    ///
    /// Returns `false` if tasks were still running when the time ran out.
    pub async fn wait_idle(&self, timeout: Duration) -> bool {
        let idle = async {
            loop {
                // Register before checking so a finish in between is not missed
                let notified = self.in_flight.idle.notified();
                if self.pending() == 0 {
                    return;
                }
                notified.await;
            }
        };

        match tokio::time::timeout(timeout, idle).await {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(pending = self.pending(), "tasks still running at shutdown");
                false
            }
        }
    }

    /// Start `task` in the background; must be called inside a tokio runtime
    pub fn dispatch(&self, task: Task) {
        let storage = Arc::clone(&self.storage);
        let tx = self.tx.clone();
        let options = self.options;
        let permits = Arc::clone(&self.permits);

        self.in_flight.start();
        let guard = InFlightGuard(Arc::clone(&self.in_flight));

        tokio::spawn(async move {
            let _guard = guard;
            let name = task.name();
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return,
            };

            let msg = match tokio::task::spawn_blocking(move || run_task(storage.as_ref(), task, options))
                .await
            {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!(task = name, error = %e, "task panicked");
                    Msg::OperationFailed(format!("Internal error in {}: {}", name, e))
                }
            };

            // The receiver is gone only while shutting down
            let _ = tx.send(msg);
        });
    }

    pub fn dispatch_all(&self, tasks: Vec<Task>) {
        for task in tasks {
            self.dispatch(task);
        }
    }
}

/// Run one task to completion and build its completion message
///
/// Blocking; this is what [`TaskRunner::dispatch`] runs on a worker thread.
pub fn run_task(storage: &dyn Storage, task: Task, options: PreviewOptions) -> Msg {
    tracing::debug!(task = task.name(), "running task");

    match task {
        Task::LoadDirectory { path } => match storage.list_directory(&path) {
            Ok(listing) => {
                let entries = listing
                    .into_iter()
                    .map(|meta| Entry::from_metadata(&path, meta))
                    .collect();
                Msg::DirectoryLoaded { path, entries }
            }
            Err(e) => Msg::DirectoryFailed {
                path,
                error: e.to_string(),
            },
        },

        Task::GeneratePreview {
            generation,
            path,
            width,
            height,
        } => {
            let result = preview::generate_preview(storage, &path, width, height, options)
                .map_err(|e| e.to_string());
            Msg::PreviewLoaded { generation, result }
        }

        Task::CreateFile { path } => match file_ops::create_file(storage, &path) {
            Ok(()) => Msg::MutationApplied {
                status: format!("Created file: {}", logic::path::base_name(&path)),
            },
            Err(e) => Msg::OperationFailed(format!("Failed to create file: {}", e)),
        },

        Task::CreateDirectory { path } => match file_ops::create_directory(storage, &path) {
            Ok(()) => Msg::MutationApplied {
                status: format!("Created directory: {}", logic::path::base_name(&path)),
            },
            Err(e) => Msg::OperationFailed(format!("Failed to create directory: {}", e)),
        },

        Task::Rename {
            source,
            destination,
            is_dir,
        } => {
            if is_dir {
                return Msg::OperationFailed("Directory rename not yet supported".to_string());
            }
            if let Err(e) = file_ops::copy_file(storage, &source, &destination) {
                return Msg::OperationFailed(format!("Failed to rename: {}", e));
            }
            if let Err(e) = file_ops::remove_source(storage, &source) {
                return Msg::OperationFailed(format!("Failed to remove old file: {}", e));
            }
            Msg::MutationApplied {
                status: format!("Renamed to: {}", logic::path::base_name(&destination)),
            }
        }

        Task::Delete { path, is_dir } => match file_ops::delete(storage, &path, is_dir) {
            Ok(()) => Msg::MutationApplied {
                status: format!("Deleted: {}", logic::path::base_name(&path)),
            },
            Err(e) => Msg::OperationFailed(format!("Failed to delete: {}", e)),
        },

        Task::Execute { line, origin } => {
            let outcome = command::execute(storage, &line);
            if let CommandOrigin::Terminal { sequence } = origin {
                tracing::debug!(sequence, exit_code = outcome.exit_code, "terminal command finished");
            }
            Msg::CommandExecuted { origin, outcome }
        }
    }
}
