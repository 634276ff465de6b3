use eframe::egui::{Color32, PointerButton, Pos2, Ui};
use egui_plot::{MarkerShape, Plot, PlotPoints, PlotTransform, Points, Polygon};

use crate::color::BUCKETS;
use crate::data::selection::Selection;
use crate::state::AppState;

/// Click-select radius as a fraction of the visible plot width.
const PICK_FRACTION: f64 = 0.01;

// ---------------------------------------------------------------------------
// Embedding scatter plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot. Click picks the nearest point, primary-drag picks
/// every point in the dragged box.
pub fn scatter_plot(ui: &mut Ui, state: &mut AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to view tweets  (File → Open…)");
        });
        return;
    };

    // One series per colour step keeps the number of draw calls bounded.
    let mut buckets: Vec<Vec<[f64; 2]>> = vec![Vec::new(); BUCKETS + 1];
    for tweet in view.tweets() {
        let bucket = state
            .colors
            .as_ref()
            .and_then(|c| c.bucket_for(tweet.sentiment))
            .unwrap_or(BUCKETS);
        buckets[bucket].push([tweet.dim1, tweet.dim2]);
    }

    let points = view.points();
    let highlighted: Vec<[f64; 2]> = state
        .selection
        .as_ref()
        .filter(|s| s.generation == view.generation())
        .map(|s| s.indices.iter().filter_map(|&i| points.get(i).copied()).collect())
        .unwrap_or_default();

    let anchor = state.drag_anchor;
    let radius = state.config.point_radius;

    let plot = Plot::new("embedding_plot")
        .x_axis_label("Dimension 1")
        .y_axis_label("Dimension 2")
        .allow_drag(false)
        .allow_boxed_zoom(false)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (bucket, series) in buckets.into_iter().enumerate() {
                if series.is_empty() {
                    continue;
                }
                let color = state
                    .colors
                    .as_ref()
                    .map_or(Color32::LIGHT_BLUE, |c| c.bucket_color((bucket < BUCKETS).then_some(bucket)));
                plot_ui.points(
                    Points::new(PlotPoints::from(series))
                        .radius(radius)
                        .color(color),
                );
            }

            if !highlighted.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(highlighted))
                        .shape(MarkerShape::Circle)
                        .filled(false)
                        .radius(radius * 2.0)
                        .color(Color32::WHITE)
                        .name("selected"),
                );
            }

            let pointer = plot_ui.pointer_coordinate().map(|p| [p.x, p.y]);
            if let (Some(a), Some(b)) = (anchor, pointer) {
                let corners = vec![[a[0], a[1]], [b[0], a[1]], [b[0], b[1]], [a[0], b[1]]];
                plot_ui.polygon(Polygon::new(PlotPoints::from(corners)).stroke((1.0, Color32::YELLOW)));
            }

            (pointer, plot_ui.plot_bounds().width() * PICK_FRACTION)
        });

    let (pointer, pick_radius) = plot.inner;
    let response = &plot.response;

    if response.drag_started_by(PointerButton::Primary) {
        // A drag is only recognised after the pointer has moved a little.
        let origin = response.ctx.input(|i| i.pointer.press_origin());
        state.drag_anchor = press_anchor(&plot.transform, origin).or(pointer);
    } else if response.drag_stopped() {
        if let (Some(a), Some(b), Some(view)) = (state.drag_anchor.take(), pointer, &state.view) {
            let selection = Selection::in_rect(view, a, b);
            log::debug!("Box selected {} points", selection.indices.len());
            state.select(selection);
        }
    } else if response.clicked() {
        if let (Some(at), Some(view)) = (pointer, &state.view) {
            let selection = Selection::nearest(view, at, pick_radius);
            state.select(selection);
        }
    }
}

/// Plot coordinate under the screen position where the button went down.
fn press_anchor(transform: &PlotTransform, press_origin: Option<Pos2>) -> Option<[f64; 2]> {
    press_origin.map(|pos| {
        let p = transform.value_from_position(pos);
        [p.x, p.y]
    })
}
