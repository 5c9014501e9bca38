use eframe::egui;
use anyhow::Result;

mod app;
mod core;
mod messaging;
mod settings;
mod ui;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Starting Keyboard Piano");

    let settings = settings::AppSettings::load();
    log::debug!("Settings: {:?}", settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 360.0])
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Keyboard Piano",
        options,
        Box::new(move |_cc| Ok(Box::new(app::PianoApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))
}
