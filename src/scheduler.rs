use crate::error::LessonError;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

/// A one-shot callback that runs after a delay on the tokio timer.
///
/// Cancelling aborts the task and drops the callback unrun. Dropping the
/// handle without cancelling leaves the callback scheduled.
#[derive(Debug)]
pub struct DeferredTask {
    handle: Option<JoinHandle<()>>,
}

impl DeferredTask {
    /// Schedules `task` on the current runtime.
    pub fn schedule<F>(delay: Duration, task: F) -> Result<Self, LessonError>
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = current_runtime()?;
        Ok(Self::schedule_on(&runtime, delay, task))
    }

    pub fn schedule_on<F>(runtime: &Handle, delay: Duration, task: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        debug!(delay_ms = delay.as_millis() as u64, "scheduled deferred task");
        Self {
            handle: Some(handle),
        }
    }

    /// Returns true if a pending task was aborted.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!("cancelled deferred task");
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

pub fn current_runtime() -> Result<Handle, LessonError> {
    Handle::try_current().map_err(|_| LessonError::NoRuntime)
}
