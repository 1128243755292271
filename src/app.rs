use eframe::egui;
use ward_stock::config::DashboardConfig;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WardStockApp {
    pub state: AppState,
}

impl WardStockApp {
    pub fn new(config: DashboardConfig, startup_error: Option<String>) -> Self {
        let today = chrono::Local::now().date_naive();
        let mut state = AppState::new(config, today);
        if startup_error.is_some() {
            state.status_message = startup_error;
        }
        Self { state }
    }
}

impl eframe::App for WardStockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: flagged stock table ----
        egui::TopBottomPanel::bottom("flagged_table")
            .resizable(true)
            .default_height(260.0)
            .show(ctx, |ui| {
                table::flagged_table(ui, &self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::charts(ui, &self.state);
        });
    }
}
