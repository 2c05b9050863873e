//! Background Task Coordination Module
//!
//! This module implements the coordination protocol between a long-lived
//! [`TaskSupervisor`], a transient [`DialogController`], and a host
//! completion sink, such that a modal progress dialog and its in-flight
//! background task survive recreation of the view layer without the task
//! being leaked or duplicated.
//!
//! # Roles
//!
//! - **[`spawn_worker`]**: runs the work loop on a dedicated background
//!   thread, reporting [`TaskEvent`]s over a channel.
//! - **[`TaskSupervisor`]**: owns the worker handle and the displayed
//!   progress; retained by the application, independent of any screen.
//! - **[`DialogController`]**: per-screen mediator holding an injected
//!   [`CompletionSink`]; forwards exactly one successful completion to the
//!   host and drops cancellations.
//!
//! # Threading
//!
//! Single producer (the worker thread) and single consumer (the supervisor,
//! pumped from the UI thread each frame) over an unbounded channel, so no
//! locks are involved. All UI mutations happen on the UI thread.
//!
//! # Cancellation
//!
//! Cancellation is cooperative: [`CancelToken`] is a flag the worker polls
//! once per iteration, so up to one full iteration may elapse before a
//! cancellation is observed. A cancelled worker exits silently, without a
//! `Finished` event.

mod cancel;
mod controller;
mod supervisor;
mod worker;

// Public API exports
pub use cancel::CancelToken;
pub use controller::{CompletionSink, DialogController};
pub use supervisor::{TaskOutcome, TaskPhase, TaskSupervisor};
pub use worker::{TaskConfig, TaskEvent, WorkerHandle, spawn_worker};

/// Error types for the task module
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("a task is already running on this supervisor")]
    AlreadyRunning,

    #[error("invalid task configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TaskError>;
