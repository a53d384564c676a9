//! Floorcheck: desktop client for the floor-plan area calculation service.
mod app;
mod config;
mod effects;
mod logging;
mod ui;

fn main() -> eframe::Result<()> {
    logging::initialize(logging::LogDestination::Terminal);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Floorcheck",
        options,
        Box::new(|cc| Ok(Box::new(app::FloorcheckApp::new(cc)))),
    )
}
