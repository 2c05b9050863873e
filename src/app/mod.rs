//! Application module
//!
//! The host screen of the demo. It plays the long-lived owner role: the
//! [`TaskSupervisor`] for an active run is held here, outside the transient
//! controller, so recreating the screen never touches the in-flight task.
//! Worker events are marshaled onto the UI thread by pumping the supervisor
//! once per frame, the way the dialog-holder drains its channel.

pub(crate) mod settings;
mod ui_panels;

use crate::app::settings::Settings;
use crate::task::{CompletionSink, DialogController, TaskConfig, TaskPhase, TaskSupervisor};
use eframe::egui;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Sink handed to the controller; flags completion for the host screen to
/// pick up on its next frame.
struct HostNotifier {
    finished: Arc<AtomicBool>,
}

impl CompletionSink for HostNotifier {
    fn task_finished(&mut self) {
        self.finished.store(true, Ordering::Relaxed);
    }
}

/// Main application structure
pub struct ProgressDialogApp {
    /// Shape of each task run, from the CLI settings.
    task_config: TaskConfig,

    /// Per-screen controller with the injected completion sink.
    controller: DialogController,

    /// Supervisor of the active run, if any. Dropped once the run settled
    /// and its dialog closed.
    supervisor: Option<TaskSupervisor>,

    /// Set by [`HostNotifier`] when a run completes.
    finished_flag: Arc<AtomicBool>,

    /// When the "Task finished!" toast appeared.
    toast_shown_at: Option<instant::Instant>,
}

impl ProgressDialogApp {
    pub fn new(settings: &Settings, _cc: &eframe::CreationContext<'_>) -> Self {
        // Customize egui here with cc.egui_ctx.set_fonts and cc.egui_ctx.set_visuals.
        let finished_flag = Arc::new(AtomicBool::new(false));

        let mut controller = DialogController::new();
        controller.attach(Box::new(HostNotifier {
            finished: finished_flag.clone(),
        }));

        Self {
            task_config: settings.task_config(),
            controller,
            supervisor: None,
            finished_flag,
            toast_shown_at: None,
        }
    }

    fn start_task(&mut self) {
        match self.controller.start(self.task_config) {
            Ok(supervisor) => self.supervisor = Some(supervisor),
            Err(err) => tracing::error!("failed to start task: {err}"),
        }
    }
}

impl eframe::App for ProgressDialogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The eframe viewport has no pause/resume lifecycle; a minimized
        // viewport stands in for "dialog not currently shown".
        let minimized = ctx.input(|i| i.viewport().minimized.unwrap_or(false));

        if let Some(supervisor) = self.supervisor.as_mut() {
            supervisor.set_visible(!minimized);
            self.controller.process(supervisor);
        }

        // Host notification: show the transient acknowledgment.
        if self.finished_flag.swap(false, Ordering::Relaxed) {
            self.toast_shown_at = Some(instant::Instant::now());
        }

        // Release the holder once the run settled and its result was
        // consumed. A completion while minimized stays pending here until
        // the dialog is visible again (deferred dismissal).
        if let Some(supervisor) = self.supervisor.as_ref()
            && supervisor.outcome().is_none()
            && (supervisor.should_close() || supervisor.phase() == TaskPhase::Cancelled)
        {
            self.supervisor = None;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let task_running = self.supervisor.is_some();
            if ui_panels::start_panel(ui, task_running) {
                self.start_task();
            }
        });

        if let Some(supervisor) = self.supervisor.as_mut() {
            ui_panels::progress_dialog(ctx, supervisor);
        }

        if let Some(shown_at) = self.toast_shown_at
            && !ui_panels::completion_toast(ctx, shown_at)
        {
            self.toast_shown_at = None;
        }

        // Worker events arrive without user input, so keep repainting while
        // a run is active or the toast is animating.
        if self.supervisor.is_some() || self.toast_shown_at.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
