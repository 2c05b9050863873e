//! The background worker: a fixed sleep loop standing in for real work
//! (logging in, downloading something for the user to view, ...).

use crate::task::{CancelToken, Result, TaskError};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;

/// Shape of a single task run.
#[derive(Clone, Copy, Debug)]
pub struct TaskConfig {
    /// Number of work iterations.
    pub steps: u32,

    /// Pause per iteration.
    pub step_delay: Duration,
}

impl Default for TaskConfig {
    fn default() -> Self {
        // The canonical demo run: 10 iterations of 2 seconds each.
        Self {
            steps: 10,
            step_delay: Duration::from_secs(2),
        }
    }
}

impl TaskConfig {
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(TaskError::InvalidConfig(
                "steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Events reported by the worker thread, drained on the UI thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskEvent {
    /// Progress in percent, in [0, 100].
    Progress(u8),

    /// The run completed naturally. Never sent by a cancelled worker.
    Finished,
}

/// Handle to a running worker: the cancellation token plus the receiving end
/// of its event channel. Dropping the handle detaches the thread; a cancelled
/// worker exits on its own at the next iteration.
pub struct WorkerHandle {
    cancel: CancelToken,
    events: mpsc::UnboundedReceiver<TaskEvent>,
    #[allow(dead_code)] // kept so tests can wait for worker exit
    pub(crate) thread: thread::JoinHandle<()>,
}

impl WorkerHandle {
    /// Request cooperative cancellation. Observed by the worker within one
    /// iteration; after that it reports nothing further.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Non-blocking receive, for polling from the UI thread.
    pub fn try_recv(&mut self) -> Option<TaskEvent> {
        self.events.try_recv().ok()
    }
}

/// Spawn the work loop on a dedicated background thread.
pub fn spawn_worker(config: TaskConfig) -> Result<WorkerHandle> {
    config.validate()?;

    let cancel = CancelToken::new();
    let (sender, events) = mpsc::unbounded_channel();

    let token = cancel.clone();
    let thread = thread::spawn(move || run_loop(config, token, sender));

    Ok(WorkerHandle {
        cancel,
        events,
        thread,
    })
}

fn run_loop(config: TaskConfig, cancel: CancelToken, events: mpsc::UnboundedSender<TaskEvent>) {
    for i in 0..config.steps {
        // Check before each iteration, e.g. after the dialog was dismissed.
        if cancel.is_cancelled() {
            tracing::debug!("worker cancelled before step {}", i);
            return;
        }

        thread::sleep(config.step_delay);

        // A dropped receiver means the holder is already gone; reporting
        // becomes a no-op, not an error.
        let percent = (i as u64 * 100 / config.steps as u64) as u8;
        let _ = events.send(TaskEvent::Progress(percent));
    }

    let _ = events.send(TaskEvent::Finished);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn fast_config(steps: u32, delay_ms: u64) -> TaskConfig {
        TaskConfig {
            steps,
            step_delay: Duration::from_millis(delay_ms),
        }
    }

    /// Drain events until `Finished` arrives or the deadline passes.
    fn collect_events(handle: &mut WorkerHandle, deadline: Duration) -> Vec<TaskEvent> {
        let start = Instant::now();
        let mut out = Vec::new();
        while start.elapsed() < deadline {
            match handle.try_recv() {
                Some(event) => {
                    let finished = event == TaskEvent::Finished;
                    out.push(event);
                    if finished {
                        break;
                    }
                }
                None => thread::sleep(Duration::from_millis(1)),
            }
        }
        out
    }

    #[test]
    fn test_progress_sequence_then_finished() {
        let mut handle = spawn_worker(fast_config(10, 1)).unwrap();
        let events = collect_events(&mut handle, Duration::from_secs(5));

        let mut expected: Vec<TaskEvent> =
            (0..10).map(|i| TaskEvent::Progress(i * 10)).collect();
        expected.push(TaskEvent::Finished);
        assert_eq!(events, expected);
    }

    #[test]
    fn test_finished_sent_exactly_once() {
        let mut handle = spawn_worker(fast_config(3, 1)).unwrap();

        let start = Instant::now();
        while !handle.thread.is_finished() {
            assert!(start.elapsed() < Duration::from_secs(5), "worker did not exit");
            thread::sleep(Duration::from_millis(1));
        }

        let mut finished = 0;
        while let Some(event) = handle.try_recv() {
            if event == TaskEvent::Finished {
                finished += 1;
            }
        }
        assert_eq!(finished, 1);
    }

    #[test]
    fn test_cancelled_worker_exits_silently() {
        let mut handle = spawn_worker(fast_config(10, 20)).unwrap();
        handle.cancel();
        assert!(handle.is_cancelled());

        // The worker observes the flag within one iteration and exits.
        let start = Instant::now();
        while !handle.thread.is_finished() {
            assert!(start.elapsed() < Duration::from_secs(5), "worker did not exit");
            thread::sleep(Duration::from_millis(1));
        }

        // No completion signal from a cancelled run.
        while let Some(event) = handle.try_recv() {
            assert_ne!(event, TaskEvent::Finished);
        }
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(matches!(
            spawn_worker(fast_config(0, 1)),
            Err(TaskError::InvalidConfig(_))
        ));
    }
}
