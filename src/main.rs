mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::WardStockApp;
use eframe::egui;
use ward_stock::config::DashboardConfig;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional first argument: path to a JSON config file.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let (config, startup_error) = match DashboardConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => {
            log::error!("Failed to load config: {e:#}");
            (DashboardConfig::default(), Some(format!("Config error: {e:#}")))
        }
    };

    let title = config.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(WardStockApp::new(config, startup_error)))),
    )
}
