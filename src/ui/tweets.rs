use eframe::egui::{Label, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Tweet display (bottom panel)
// ---------------------------------------------------------------------------

/// Render the raw text of the selected points, in selection order.
pub fn tweet_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Tweet Display");

    let texts = state.selected_text();
    if texts.is_empty() {
        ui.label("Click a point, or drag a box on the plot, to read tweets.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(32.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            header.col(|ui| {
                ui.strong("Tweet");
            });
        })
        .body(|body| {
            body.rows(18.0, texts.len(), |mut row| {
                let i = row.index();
                row.col(|ui| {
                    ui.label((i + 1).to_string());
                });
                row.col(|ui| {
                    ui.add(Label::new(&texts[i]).truncate())
                        .on_hover_text(&texts[i]);
                });
            });
        });
}
