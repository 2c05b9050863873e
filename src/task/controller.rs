//! The transient screen controller.
//!
//! One controller exists per screen instance and dies with it. Its only
//! state is the injected [`CompletionSink`]: set when the screen attaches to
//! a live host, cleared on detach so a destroyed host is never referenced.
//! The supervisor it polls outlives it.

use crate::task::supervisor::{TaskOutcome, TaskSupervisor};
use crate::task::worker::TaskConfig;
use crate::task::Result;

/// Capability for notifying the host screen of a successful run.
///
/// Injected explicitly at attach time; there is no downcast of the host and
/// therefore no way to wire up a host that lacks the callback.
pub trait CompletionSink {
    fn task_finished(&mut self);
}

/// Mediates between user input, the task supervisor, and the host screen.
#[derive(Default)]
pub struct DialogController {
    /// `None` while detached; completion reports wait in the supervisor
    /// until a controller with a live sink picks them up.
    sink: Option<Box<dyn CompletionSink>>,
}

impl DialogController {
    /// A detached controller. Starting tasks works; completions stay pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the host callback. Replaces any previous sink.
    pub fn attach(&mut self, sink: Box<dyn CompletionSink>) {
        self.sink = Some(sink);
    }

    /// Drop the host callback, e.g. because the host is being destroyed.
    pub fn detach(&mut self) {
        self.sink = None;
    }

    pub fn is_attached(&self) -> bool {
        self.sink.is_some()
    }

    /// User action: create a supervisor and start its background task. The
    /// caller owns the returned supervisor (and shows the dialog for it).
    pub fn start(&mut self, config: TaskConfig) -> Result<TaskSupervisor> {
        let mut supervisor = TaskSupervisor::new(config);
        supervisor.start()?;
        Ok(supervisor)
    }

    /// Poll the supervisor and deliver any settled result.
    ///
    /// A successful outcome is consumed only while a sink is attached, so it
    /// is delivered exactly once even across detach/reattach cycles. A
    /// cancelled outcome is consumed unconditionally and never surfaced to
    /// the host.
    pub fn process(&mut self, supervisor: &mut TaskSupervisor) {
        supervisor.pump();

        match supervisor.outcome() {
            Some(TaskOutcome::Ok) => {
                if let Some(sink) = self.sink.as_mut() {
                    supervisor.take_outcome();
                    sink.task_finished();
                }
            }
            Some(TaskOutcome::Cancelled) => {
                supervisor.take_outcome();
                tracing::debug!("cancelled run; result dropped without notifying the host");
            }
            None => {}
        }
    }
}
