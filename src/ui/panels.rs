use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;
use ward_stock::data::aggregate::Bucket;
use ward_stock::data::export::write_csv;

use crate::state::AppState;

const DESCRIPTION: &str = "Sample stock levels and department demand for a \
hospital supply room. All figures are randomly generated; nothing here is a \
forecast.";

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.label(RichText::new(DESCRIPTION).small().weak());
    ui.separator();

    ui.strong("Your name");
    ui.text_edit_singleline(&mut state.user_name);
    ui.add_space(6.0);

    // ---- Threshold ----
    ui.strong("Risk threshold");
    let slider = egui::Slider::new(&mut state.threshold_fraction, 0.0..=1.0)
        .fixed_decimals(2)
        .text("of stock range");
    if ui.add(slider).changed() {
        state.refilter();
    }
    if let Some(th) = &state.threshold {
        ui.label(format!("Flag items with ≥ {:.1} units", th.value()));
    }
    ui.separator();

    // ---- Demand window ----
    ui.strong("Demand window");
    let mut dates_changed = false;
    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("From");
        dates_changed |= ui
            .add(DatePickerButton::new(&mut state.start).id_salt("start_date"))
            .changed();
        ui.end_row();
        ui.label("To");
        dates_changed |= ui
            .add(DatePickerButton::new(&mut state.end).id_salt("end_date"))
            .changed();
        ui.end_row();
    });

    let mut bucket = state.bucket;
    egui::ComboBox::from_label("Aggregate")
        .selected_text(bucket.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for b in Bucket::ALL {
                ui.selectable_value(&mut bucket, b, b.to_string());
            }
        });
    if bucket != state.bucket {
        state.bucket = bucket;
        dates_changed = true;
    }
    if dates_changed {
        state.recompute_demand();
    }
    if !state.date_range().is_valid() {
        ui.label(RichText::new("End date is before start date.").color(Color32::YELLOW));
    }
    egui::Grid::new("demand_totals").num_columns(2).show(ui, |ui: &mut Ui| {
        for r in &state.demand_totals {
            ui.label(RichText::new(&r.category).color(state.colors.color_for(&r.category)));
            ui.label(r.measure.to_string());
            ui.end_row();
        }
    });
    ui.separator();

    // ---- Sampling ----
    ui.strong("Sample data");
    let mut fixed = state.seed.is_some();
    ui.horizontal(|ui: &mut Ui| {
        ui.checkbox(&mut fixed, "Fixed seed");
        if fixed {
            let seed = state.seed.get_or_insert(0);
            ui.add(egui::DragValue::new(seed));
        }
    });
    if !fixed {
        state.seed = None;
    }
    if ui.button("Regenerate").clicked() {
        state.regenerate();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let can_export = state.flagged.rows().is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export flagged items…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong(&state.config.title);

        if let Some(greeting) = state.greeting() {
            ui.separator();
            ui.label(greeting);
        }

        ui.separator();
        ui.label(format!(
            "{} of {} items flagged, {} demand rows",
            state.flagged.len(),
            state.stock.len(),
            state.demand.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Save dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let Some(rows) = state.flagged.rows() else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export flagged items")
        .add_filter("CSV", &["csv"])
        .set_file_name("flagged_items.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = write_csv(rows, &path) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
