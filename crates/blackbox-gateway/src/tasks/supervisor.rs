//! Task supervisor
//!
//! Tracks every spawned unit of work until it finishes or is cancelled by
//! [`drain`](TaskSupervisor::drain).

use futures::FutureExt;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifier of a supervised task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw value
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// A supervised task that returned an error or panicked
#[derive(Debug)]
pub struct TaskFault {
    pub id: TaskId,
    pub name: String,
    pub error: anyhow::Error,
    pub panicked: bool,
}

impl fmt::Display for TaskFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) ", self.name, self.id)?;
        if self.panicked {
            f.write_str("panicked: ")?;
        } else {
            f.write_str("failed: ")?;
        }
        write!(f, "{:#}", self.error)
    }
}

struct LiveTask {
    name: String,
    handle: JoinHandle<()>,
}

struct SupervisorInner {
    live: Mutex<HashMap<TaskId, LiveTask>>,
    next_id: AtomicU64,
    faults: AtomicUsize,
    /// Faults are only queued once someone holds the receiver
    subscribed: AtomicBool,
    fault_tx: mpsc::UnboundedSender<TaskFault>,
    fault_rx: Mutex<Option<mpsc::UnboundedReceiver<TaskFault>>>,
}

/// Owner of all concurrently running handler work
///
/// Clones share the same live set and fault channel.
#[derive(Clone)]
pub struct TaskSupervisor {
    inner: Arc<SupervisorInner>,
}

impl TaskSupervisor {
    /// Create a supervisor with an empty live set
    pub fn new() -> Self {
        let (fault_tx, fault_rx) = mpsc::unbounded_channel();
        Self {
            inner: Arc::new(SupervisorInner {
                live: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                faults: AtomicUsize::new(0),
                subscribed: AtomicBool::new(false),
                fault_tx,
                fault_rx: Mutex::new(Some(fault_rx)),
            }),
        }
    }

    /// Start a unit of work tagged `name`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&self, name: impl Into<String>, work: F) -> TaskId
    where
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let name = name.into();
        let id = TaskId(self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1);

        // The lock is held until the handle is stored so a task that finishes
        // immediately cannot try to remove itself before it was inserted.
        let mut live = self.inner.live.lock();

        let inner = Arc::clone(&self.inner);
        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let outcome = AssertUnwindSafe(work).catch_unwind().await;

            let fault = match outcome {
                Ok(Ok(())) => None,
                Ok(Err(error)) => Some((error, false)),
                Err(panic) => Some((anyhow::anyhow!(panic_message(panic.as_ref())), true)),
            };

            if let Some((error, panicked)) = fault {
                tracing::error!(
                    task_id = %id,
                    task = %task_name,
                    panicked,
                    error = %format!("{error:#}"),
                    "Supervised task failed"
                );
                inner.faults.fetch_add(1, Ordering::SeqCst);
                if inner.subscribed.load(Ordering::SeqCst) {
                    let _ = inner.fault_tx.send(TaskFault {
                        id,
                        name: task_name,
                        error,
                        panicked,
                    });
                }
            }

            inner.live.lock().remove(&id);
        });

        live.insert(id, LiveTask { name: name.clone(), handle });
        drop(live);

        tracing::trace!(task_id = %id, task = %name, "Spawned supervised task");
        id
    }

    /// Cancel every live task and wait until all of them have stopped
    ///
    /// Tasks spawned while draining are cancelled as well.
    pub async fn drain(&self) {
        loop {
            let tasks: Vec<(TaskId, LiveTask)> = self.inner.live.lock().drain().collect();
            if tasks.is_empty() {
                break;
            }

            tracing::debug!(count = tasks.len(), "Draining supervised tasks");
            for (_, task) in &tasks {
                task.handle.abort();
            }
            for (id, task) in tasks {
                match task.handle.await {
                    Ok(()) => {}
                    Err(e) if e.is_cancelled() => {
                        tracing::trace!(task_id = %id, task = %task.name, "Cancelled supervised task");
                    }
                    Err(e) => {
                        tracing::warn!(
                            task_id = %id,
                            task = %task.name,
                            error = %e,
                            "Supervised task aborted abnormally"
                        );
                    }
                }
            }
        }
    }

    /// Take the receiving end of the fault channel
    ///
    /// Faults raised before this call are logged and counted but not queued.
    /// Dropping the receiver stops queueing again. Returns `None` after the
    /// first call.
    pub fn take_faults(&self) -> Option<mpsc::UnboundedReceiver<TaskFault>> {
        let rx = self.inner.fault_rx.lock().take()?;
        self.inner.subscribed.store(true, Ordering::SeqCst);
        Some(rx)
    }

    /// Number of tasks that have not finished yet
    pub fn live_count(&self) -> usize {
        self.inner.live.lock().len()
    }

    /// Number of tasks spawned so far
    pub fn spawned_count(&self) -> u64 {
        self.inner.next_id.load(Ordering::SeqCst)
    }

    /// Number of tasks that failed so far
    pub fn fault_count(&self) -> usize {
        self.inner.faults.load(Ordering::SeqCst)
    }

    /// Check if a task is still live
    pub fn is_live(&self, id: TaskId) -> bool {
        self.inner.live.lock().contains_key(&id)
    }
}

impl Default for TaskSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskSupervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskSupervisor")
            .field("live", &self.live_count())
            .field("spawned", &self.spawned_count())
            .field("faults", &self.fault_count())
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
