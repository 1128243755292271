use chrono::NaiveDate;
use eframe::egui::{self, Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, HLine, Legend, Line, Plot, PlotPoints, Points};
use std::ops::RangeInclusive;

use crate::color::HIGH_RISK;
use crate::state::AppState;
use ward_stock::data::filter::{risk_level, RiskLevel};

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Render the demand and stock charts stacked in the central panel.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let half = (ui.available_height() - ui.spacing().item_spacing.y) / 2.0;
    demand_chart(ui, state, half);
    stock_chart(ui, state, half);
}

fn format_day(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_default()
}

/// Demand per department over the selected window.
fn demand_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong(format!("{} demand by department", state.bucket));
    if state.demand_series.is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), height - 20.0), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No demand data for this date range.");
            });
        });
        return;
    }

    Plot::new("demand_plot")
        .height(height - 20.0)
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Units used")
        .x_axis_formatter(format_day)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &state.demand_series {
                let color = state.colors.color_for(&series.name);
                let pts = series.plot_points();
                plot_ui.line(
                    Line::new(PlotPoints::from(pts.clone()))
                        .name(&series.name)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(pts))
                        .name(&series.name)
                        .color(color)
                        .radius(2.5),
                );
            }
        });
}

/// Stock per item with the threshold line; bars at or above it are highlighted.
fn stock_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.strong("Stock on hand");
    let Some(threshold) = &state.threshold else {
        ui.label("No stock data.");
        return;
    };

    let items = state.stock.categories();
    let bars: Vec<Bar> = state
        .stock
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let fill = match risk_level(r, threshold) {
                RiskLevel::High => HIGH_RISK,
                RiskLevel::Low => Color32::from_rgb(90, 140, 200),
            };
            Bar::new(i as f64, r.measure as f64)
                .name(&r.category)
                .fill(fill)
                .width(0.7)
        })
        .collect();

    Plot::new("stock_plot")
        .height(height - 20.0)
        .y_axis_label("Units")
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            items.get(idx as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Stock"));
            plot_ui.hline(
                HLine::new(threshold.value())
                    .name("Threshold")
                    .color(HIGH_RISK),
            );
        });
}
