use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::model::ScoreRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone what we need so we can mutate state inside the widgets.
    let (Some(dataset), Some(query)) = (state.dataset.clone(), state.query.clone()) else {
        ui.label("No dataset loaded.");
        return;
    };

    // ---- Month selector ----
    ui.strong("Month");
    egui::ComboBox::from_id_salt("month")
        .selected_text(&query.month)
        .show_ui(ui, |ui: &mut Ui| {
            for month in dataset.months() {
                if ui.selectable_label(*month == query.month, month).clicked() {
                    state.set_month(month.clone());
                }
            }
        });
    ui.separator();

    // ---- Score ranges ----
    let step = state.config.slider_step;
    if let Some(range) = range_sliders(
        ui,
        "Sentiment Range",
        query.sentiment,
        dataset.sentiment_bounds(),
        step,
    ) {
        state.set_sentiment(range);
    }
    ui.add_space(6.0);
    if let Some(range) = range_sliders(
        ui,
        "Subjectivity Range",
        query.subjectivity,
        dataset.subjectivity_bounds(),
        step,
    ) {
        state.set_subjectivity(range);
    }
    ui.separator();

    if let Some(view) = &state.view {
        ui.label(format!("{} of {} tweets match", view.len(), dataset.len()));
    }
    let selected = state.selected_count();
    if selected > 0 {
        ui.label(format!("{selected} selected"));
        if ui.small_button("Clear selection").clicked() {
            state.clear_selection();
        }
    }
}

/// A min and a max slider over `bounds`. Returns the new range, snapped to
/// the step, if either moved.
fn range_sliders(
    ui: &mut Ui,
    label: &str,
    current: ScoreRange,
    bounds: ScoreRange,
    step: f64,
) -> Option<ScoreRange> {
    ui.strong(label);
    let mut range = current;
    let low = ui
        .add(Slider::new(&mut range.low, bounds.low..=bounds.high).step_by(step).text("min"))
        .changed();
    let high = ui
        .add(Slider::new(&mut range.high, bounds.low..=bounds.high).step_by(step).text("max"))
        .changed();
    if low {
        range.low = bounds.snap(range.low, step);
    }
    if high {
        range.high = bounds.snap(range.high, step);
    }
    if range.is_inverted() {
        ui.label(RichText::new("min is above max: nothing can match").color(Color32::YELLOW));
    }
    (low || high).then_some(range)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} tweets loaded, {} visible",
                ds.len(),
                view.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tweet data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
