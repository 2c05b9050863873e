//! UI panels for the application
//!
//! The host screen with its "Start Task" button, the modal progress dialog,
//! and the transient completion toast.

use crate::task::TaskSupervisor;
use egui::{Color32, RichText, Ui};

/// Render the host screen. Returns true when the user asked to start a task.
pub fn start_panel(ui: &mut Ui, task_running: bool) -> bool {
    ui.heading("Progress Dialog Demo");
    ui.separator();
    ui.add_space(8.0);

    ui.label(
        "Runs a fixed background task behind a modal progress dialog. \
         The dialog outlives screen recreation and the task can be cancelled \
         at any time by dismissing the dialog.",
    );
    ui.add_space(12.0);

    let clicked = ui
        .add_enabled(
            !task_running,
            egui::Button::new("Start Task").min_size(egui::vec2(120.0, 30.0)),
        )
        .clicked();

    if task_running {
        ui.add_space(8.0);
        ui.label(
            RichText::new("A task is already running")
                .small()
                .color(Color32::GRAY),
        );
    }

    clicked
}

/// Render the modal progress dialog for an active supervisor. Closing the
/// window or pressing Cancel dismisses it, cancelling the task cooperatively.
pub fn progress_dialog(ctx: &egui::Context, supervisor: &mut TaskSupervisor) {
    let mut open = true;

    egui::Window::new("Progress Dialog")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .open(&mut open)
        .show(ctx, |ui| {
            let percent = supervisor.progress();
            ui.add(
                egui::ProgressBar::new(percent as f32 / 100.0).text(format!("{}%", percent)),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    supervisor.dismiss();
                }
                ui.label(RichText::new("Cancellation is cooperative").small().weak());
            });
        });

    if !open {
        supervisor.dismiss();
    }
}

/// Paint the "Task finished!" toast. Returns false once it fully faded out.
pub fn completion_toast(ctx: &egui::Context, shown_at: instant::Instant) -> bool {
    let alpha = toast_alpha(shown_at.elapsed().as_secs_f32());
    if alpha <= 0.0 {
        return false;
    }

    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("completion_toast"),
    ));

    let pos = ctx.screen_rect().center_bottom() + egui::vec2(0.0, -48.0);
    let galley = painter.layout_no_wrap(
        "Task finished!".to_string(),
        egui::FontId::proportional(16.0),
        Color32::WHITE.gamma_multiply(alpha),
    );

    let rect = egui::Align2::CENTER_CENTER
        .anchor_size(pos, galley.size())
        .expand(10.0);
    painter.rect_filled(
        rect,
        egui::CornerRadius::same(8),
        Color32::from_black_alpha((200.0 * alpha) as u8),
    );
    painter.galley(
        rect.center() - galley.size() * 0.5,
        galley,
        Color32::WHITE,
    );

    true
}

/// Toast opacity over its lifetime: fade in over 0.15s, stay visible,
/// fade out over 0.5s, gone after 2.5s.
fn toast_alpha(elapsed: f32) -> f32 {
    const FADE_IN: f32 = 0.15;
    const HOLD_UNTIL: f32 = 2.0;
    const GONE: f32 = 2.5;

    if elapsed < FADE_IN {
        elapsed / FADE_IN
    } else if elapsed < HOLD_UNTIL {
        1.0
    } else if elapsed < GONE {
        1.0 - (elapsed - HOLD_UNTIL) / (GONE - HOLD_UNTIL)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_alpha_envelope() {
        assert_eq!(toast_alpha(0.0), 0.0);
        assert_eq!(toast_alpha(0.15), 1.0);
        assert_eq!(toast_alpha(1.0), 1.0);
        assert!(toast_alpha(2.25) > 0.0 && toast_alpha(2.25) < 1.0);
        assert_eq!(toast_alpha(2.5), 0.0);
        assert_eq!(toast_alpha(60.0), 0.0);
    }

    #[test]
    fn test_toast_alpha_bounded() {
        let mut t = 0.0;
        while t < 3.0 {
            let a = toast_alpha(t);
            assert!((0.0..=1.0).contains(&a));
            t += 0.01;
        }
    }
}
