//! Owned handle for the background token refresh task.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::debug;

/// A slot holding at most one running task.
///
/// [`replace`](Self::replace) aborts the previous task and installs the new
/// one under a single lock, so two tasks are never live at once. Dropping the
/// slot aborts whatever it holds.
#[derive(Debug, Default)]
pub struct RefreshTask {
    slot: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` on the current tokio runtime, aborting any previous one.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn replace<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slot = self.lock();
        if let Some(previous) = slot.take() {
            debug!("Replacing running refresh task");
            previous.abort();
        }
        *slot = Some(tokio::spawn(task));
    }

    /// Abort the running task. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        match self.lock().take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                was_running
            }
            None => false,
        }
    }

    /// True while a task is installed and has not finished.
    pub fn is_active(&self) -> bool {
        self.lock().as_ref().is_some_and(|handle| !handle.is_finished())
    }

    fn lock(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        let slot = self.slot.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = slot.take() {
            handle.abort();
        }
    }
}
