//! The retained holder behind the progress dialog.
//!
//! A [`TaskSupervisor`] is owned by the application, outside the transient
//! view layer, so recreating the screen (the analogue of a mobile
//! configuration change) leaves the in-flight worker and its progress
//! untouched. Controllers come and go; the supervisor stays.

use crate::task::worker::{TaskConfig, TaskEvent, WorkerHandle, spawn_worker};
use crate::task::{Result, TaskError};

/// Lifecycle of a single task run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskPhase {
    /// No worker started yet.
    Created,

    /// Worker thread is running.
    Running,

    /// Worker completed naturally.
    Finished,

    /// User dismissed the dialog; the worker was cancelled cooperatively.
    Cancelled,
}

/// Final result of a task run, as seen by the controller.
///
/// `None` in the supervisor's outcome slot is the third state: no result yet,
/// or the result was already taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    Ok,
    Cancelled,
}

/// Retained owner of the background worker and the progress display state.
pub struct TaskSupervisor {
    config: TaskConfig,

    /// The active worker, if any. Cleared exactly once: on natural
    /// completion or on user dismissal.
    worker: Option<WorkerHandle>,

    phase: TaskPhase,

    /// Last displayed progress, monotonically non-decreasing in [0, 100].
    progress: u8,

    /// Whether the dialog is currently shown. Completion while hidden defers
    /// the close until the dialog is shown again.
    visible: bool,

    /// Result waiting to be collected by a controller.
    outcome: Option<TaskOutcome>,
}

impl TaskSupervisor {
    pub fn new(config: TaskConfig) -> Self {
        Self {
            config,
            worker: None,
            phase: TaskPhase::Created,
            progress: 0,
            visible: true,
            outcome: None,
        }
    }

    /// Start the background worker. At most one worker may be active per
    /// supervisor; a run is also not restartable once it settled.
    pub fn start(&mut self) -> Result<()> {
        if self.phase != TaskPhase::Created {
            return Err(TaskError::AlreadyRunning);
        }

        self.worker = Some(spawn_worker(self.config)?);
        self.phase = TaskPhase::Running;
        tracing::debug!(steps = self.config.steps, "task started");
        Ok(())
    }

    /// Drain pending worker events. Called from the UI thread each frame;
    /// this is where progress and completion are marshaled onto the UI side.
    pub fn pump(&mut self) {
        let Some(worker) = self.worker.as_mut() else {
            return;
        };

        let mut finished = false;
        while let Some(event) = worker.try_recv() {
            match event {
                TaskEvent::Progress(percent) => {
                    self.progress = self.progress.max(percent.min(100));
                }
                TaskEvent::Finished => {
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            self.worker = None;
            self.phase = TaskPhase::Finished;
            self.outcome = Some(TaskOutcome::Ok);
            tracing::debug!("task finished");
        }
    }

    /// User-driven dismissal (back action, close button). Cancels the worker
    /// cooperatively; the thread exits at its next poll, up to one iteration
    /// later.
    pub fn dismiss(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel();
            self.phase = TaskPhase::Cancelled;
            self.outcome = Some(TaskOutcome::Cancelled);
            tracing::debug!("task cancelled by dismissal");
        }
        self.visible = false;
    }

    /// Update whether the dialog is currently displayed.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the dialog should close itself now. True once the run
    /// finished naturally and the dialog is (again) visible; while hidden,
    /// the cleared worker handle keeps the close pending.
    pub fn should_close(&self) -> bool {
        self.visible && self.phase == TaskPhase::Finished && self.worker.is_none()
    }

    /// Peek at the pending result without consuming it.
    pub fn outcome(&self) -> Option<TaskOutcome> {
        self.outcome
    }

    /// Take the pending result, leaving the slot empty. Delivery is
    /// exactly-once: a second call returns `None`.
    pub fn take_outcome(&mut self) -> Option<TaskOutcome> {
        self.outcome.take()
    }

    pub fn phase(&self) -> TaskPhase {
        self.phase
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.phase == TaskPhase::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::{Duration, Instant};

    fn fast_supervisor(steps: u32, delay_ms: u64) -> TaskSupervisor {
        TaskSupervisor::new(TaskConfig {
            steps,
            step_delay: Duration::from_millis(delay_ms),
        })
    }

    /// Pump until the supervisor leaves `Running` or the deadline passes.
    fn pump_until_settled(supervisor: &mut TaskSupervisor, deadline: Duration) {
        let start = Instant::now();
        while supervisor.phase() == TaskPhase::Running && start.elapsed() < deadline {
            supervisor.pump();
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_phase_transitions_on_natural_completion() {
        let mut supervisor = fast_supervisor(5, 1);
        assert_eq!(supervisor.phase(), TaskPhase::Created);

        supervisor.start().unwrap();
        assert_eq!(supervisor.phase(), TaskPhase::Running);

        pump_until_settled(&mut supervisor, Duration::from_secs(5));
        assert_eq!(supervisor.phase(), TaskPhase::Finished);
        assert_eq!(supervisor.outcome(), Some(TaskOutcome::Ok));
    }

    #[test]
    fn test_start_twice_fails() {
        let mut supervisor = fast_supervisor(10, 10);
        supervisor.start().unwrap();
        assert!(matches!(supervisor.start(), Err(TaskError::AlreadyRunning)));
    }

    #[test]
    fn test_progress_monotonic_and_bounded() {
        let mut supervisor = fast_supervisor(10, 1);
        supervisor.start().unwrap();

        let mut last = supervisor.progress();
        let start = Instant::now();
        while supervisor.phase() == TaskPhase::Running && start.elapsed() < Duration::from_secs(5)
        {
            supervisor.pump();
            let current = supervisor.progress();
            assert!(current >= last, "progress went backwards");
            assert!(current <= 100);
            last = current;
            thread::sleep(Duration::from_millis(1));
        }

        assert_eq!(supervisor.phase(), TaskPhase::Finished);
        assert_eq!(supervisor.progress(), 90); // 10 steps report 0..=90
    }

    #[test]
    fn test_dismiss_cancels_and_never_finishes() {
        let mut supervisor = fast_supervisor(10, 5);
        supervisor.start().unwrap();

        supervisor.dismiss();
        assert_eq!(supervisor.phase(), TaskPhase::Cancelled);
        assert_eq!(supervisor.outcome(), Some(TaskOutcome::Cancelled));

        // Give the cancelled worker ample time; the phase must not flip to
        // Finished and the outcome must not be overwritten.
        thread::sleep(Duration::from_millis(200));
        supervisor.pump();
        assert_eq!(supervisor.phase(), TaskPhase::Cancelled);
        assert_eq!(supervisor.outcome(), Some(TaskOutcome::Cancelled));
    }

    #[test]
    fn test_completion_while_hidden_defers_close() {
        let mut supervisor = fast_supervisor(3, 1);
        supervisor.start().unwrap();
        supervisor.set_visible(false);

        pump_until_settled(&mut supervisor, Duration::from_secs(5));
        assert_eq!(supervisor.phase(), TaskPhase::Finished);
        assert!(!supervisor.should_close(), "close must be deferred while hidden");

        let progress_before = supervisor.progress();
        supervisor.set_visible(true);
        assert!(supervisor.should_close());

        // Showing again must not re-run anything.
        supervisor.pump();
        assert_eq!(supervisor.phase(), TaskPhase::Finished);
        assert_eq!(supervisor.progress(), progress_before);
    }

    #[test]
    fn test_completion_while_visible_closes_immediately() {
        let mut supervisor = fast_supervisor(3, 1);
        supervisor.start().unwrap();

        pump_until_settled(&mut supervisor, Duration::from_secs(5));
        assert!(supervisor.should_close());
    }

    #[test]
    fn test_retained_state_survives_controller_recreation() {
        // The supervisor lives outside the view layer: recreating the screen
        // controller is invisible to it. Start a run, note its state, and
        // verify nothing about the supervisor changed across the "rotation".
        let mut supervisor = fast_supervisor(10, 20);
        supervisor.start().unwrap();
        supervisor.pump();

        let phase = supervisor.phase();
        let progress = supervisor.progress();

        {
            let _old_controller = crate::task::DialogController::new();
            // dropped here, simulating destruction of the screen
        }
        let _new_controller = crate::task::DialogController::new();

        assert_eq!(supervisor.phase(), phase);
        assert_eq!(supervisor.progress(), progress);
        supervisor.dismiss();
    }

    #[test]
    fn test_outcome_taken_exactly_once() {
        let mut supervisor = fast_supervisor(2, 1);
        supervisor.start().unwrap();
        pump_until_settled(&mut supervisor, Duration::from_secs(5));

        assert_eq!(supervisor.take_outcome(), Some(TaskOutcome::Ok));
        assert_eq!(supervisor.take_outcome(), None);
    }
}
