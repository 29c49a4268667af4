/// Background task queue
///
/// Resolution side effects (pointer pre-warming, validity re-stamping) run as
/// fire-and-forget tasks. Task errors are captured and logged, never
/// propagated to callers.
use crate::error::ProfileResult;
use std::future::Future;
use std::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Queue of best-effort background tasks
#[derive(Default)]
pub struct TaskQueue {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a background task. The caller never observes its outcome.
    pub fn spawn<F>(&self, name: &'static str, task: F)
    where
        F: Future<Output = ProfileResult<()>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            if let Err(e) = task.await {
                debug!("Background task {} failed: {}", name, e);
            }
        });

        let mut handles = self.handles.lock().unwrap();
        handles.retain(|handle| !handle.is_finished());
        handles.push(handle);
    }

    /// Wait for every spawned task to finish.
    ///
    /// Completion hook for tests; production callers never block on the
    /// queue.
    pub async fn wait_idle(&self) {
        loop {
            let drained: Vec<JoinHandle<()>> = {
                let mut handles = self.handles.lock().unwrap();
                handles.drain(..).collect()
            };
            if drained.is_empty() {
                break;
            }
            for handle in drained {
                let _ = handle.await;
            }
        }
    }
}
