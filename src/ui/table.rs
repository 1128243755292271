use eframe::egui::{RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::color::HIGH_RISK;
use crate::state::AppState;
use ward_stock::data::filter::Filtered;

// ---------------------------------------------------------------------------
// Flagged stock table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the rows at or above the threshold.
pub fn flagged_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Items at or above threshold");

    let rows = match &state.flagged {
        Filtered::NoData => {
            ui.label("No stock data available.");
            return;
        }
        Filtered::Rows(rows) if rows.is_empty() => {
            ui.label("No items reach the current threshold.");
            return;
        }
        Filtered::Rows(rows) => rows,
    };

    let schema = rows.schema();
    let mut builder = TableBuilder::new(ui).striped(true);
    for _ in 1..schema.len() {
        builder = builder.column(TableColumn::auto().at_least(80.0));
    }
    builder
        .column(TableColumn::remainder())
        .header(20.0, |mut header| {
            for col in schema {
                header.col(|ui: &mut Ui| {
                    ui.strong(col.name());
                });
            }
        })
        .body(|mut body| {
            for record in rows {
                body.row(18.0, |mut row| {
                    for &col in schema {
                        let text = record.value(col).map(|v| v.to_string()).unwrap_or_default();
                        row.col(|ui: &mut Ui| {
                            ui.label(RichText::new(text).color(HIGH_RISK));
                        });
                    }
                });
            }
        });
}
