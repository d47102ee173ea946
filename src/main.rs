//! Check10 GUI
//!
//! Play Check10 against the engine or against another player.

use check10::ui::Check10App;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([720.0, 560.0])
            .with_title("Check10"),
        ..Default::default()
    };

    eframe::run_native(
        "Check10",
        options,
        Box::new(|cc| Ok(Box::new(Check10App::new(cc)))),
    )
}
