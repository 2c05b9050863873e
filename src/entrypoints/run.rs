use super::metadata::log_version_info;
use crate::app::settings::Settings;
use clap::Parser;

/// Setup and create the app
#[allow(dead_code)]
pub async fn setup_app()
-> Option<Box<dyn FnOnce(&eframe::CreationContext<'_>) -> Box<dyn eframe::App>>> {
    log_version_info();
    let settings = match Settings::try_parse() {
        Ok(settings) => settings,
        Err(e) => e.exit(),
    };
    Some(Box::new(move |cc| {
        Box::new(crate::app::ProgressDialogApp::new(&settings, cc))
    }))
}

/// Native entry point
#[allow(dead_code)]
pub async fn native_main() {
    // Setup logging
    tracing_subscriber::fmt::init();

    if let Some(app_creator) = setup_app().await {
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 320.0])
                .with_title("Progress Dialog"),
            ..Default::default()
        };

        let _ = eframe::run_native(
            "Progress Dialog",
            native_options,
            Box::new(move |cc| Ok(app_creator(cc))),
        );
    }
}
