use thiserror::Error;

use super::filter::{FilteredView, Generation};

// ---------------------------------------------------------------------------
// Selection: points picked on the plot of one filtered view
// ---------------------------------------------------------------------------

/// View positions chosen interactively, tagged with the generation of the
/// view they were picked from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub generation: Generation,
    pub indices: Vec<usize>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection from view {selection} does not match current view {view}")]
    Stale {
        selection: Generation,
        view: Generation,
    },
    #[error("point index {index} out of range for view of {len} tweets")]
    OutOfRange { index: usize, len: usize },
}

impl Selection {
    pub fn new(generation: Generation, indices: Vec<usize>) -> Self {
        Self {
            generation,
            indices,
        }
    }

    /// Every point of `view` inside the rectangle spanned by two corners.
    pub fn in_rect(view: &FilteredView, a: [f64; 2], b: [f64; 2]) -> Self {
        let (x_lo, x_hi) = (a[0].min(b[0]), a[0].max(b[0]));
        let (y_lo, y_hi) = (a[1].min(b[1]), a[1].max(b[1]));
        let indices = view
            .points()
            .iter()
            .enumerate()
            .filter(|(_, [x, y])| (x_lo..=x_hi).contains(x) && (y_lo..=y_hi).contains(y))
            .map(|(i, _)| i)
            .collect();
        Self::new(view.generation(), indices)
    }

    /// The point of `view` closest to `at`, if any lies within `max_distance`.
    pub fn nearest(view: &FilteredView, at: [f64; 2], max_distance: f64) -> Self {
        let closest = view
            .points()
            .iter()
            .enumerate()
            .map(|(i, [x, y])| (i, (x - at[0]).hypot(y - at[1])))
            .filter(|(_, d)| *d <= max_distance)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i);
        Self::new(view.generation(), closest.into_iter().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Look up the raw text of each selected point, in selection order.
///
/// Fails if the selection was made against another view, or if any index is
/// past the end of `view`. Nothing is clamped or skipped.
pub fn select_text<'v>(
    view: &'v FilteredView,
    selection: &Selection,
) -> Result<Vec<&'v str>, SelectionError> {
    if selection.generation != view.generation() {
        return Err(SelectionError::Stale {
            selection: selection.generation,
            view: view.generation(),
        });
    }
    selection
        .indices
        .iter()
        .map(|&index| {
            view.get(index)
                .map(|t| t.raw_text.as_str())
                .ok_or(SelectionError::OutOfRange {
                    index,
                    len: view.len(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::filter::{GenerationCounter, Query, filter_view};
    use crate::data::model::ScoreRange;
    use crate::data::model::tests::sample_dataset;

    fn jan_view(counter: &mut GenerationCounter, sentiment: (f64, f64)) -> FilteredView {
        let ds = Arc::new(sample_dataset());
        let query = Query {
            month: "Jan".to_string(),
            sentiment: ScoreRange::new(sentiment.0, sentiment.1),
            subjectivity: ScoreRange::new(0.0, 1.0),
        };
        filter_view(&ds, &query, counter.next())
    }

    #[test]
    fn first_point_of_positive_jan_is_a() {
        let mut counter = GenerationCounter::default();
        let view = jan_view(&mut counter, (0.0, 1.0));
        let sel = Selection::new(view.generation(), vec![0]);
        assert_eq!(select_text(&view, &sel).unwrap(), ["a"]);
    }

    #[test]
    fn empty_selection_gives_empty_text() {
        let mut counter = GenerationCounter::default();
        let view = jan_view(&mut counter, (-1.0, 1.0));
        let sel = Selection::new(view.generation(), Vec::new());
        assert!(select_text(&view, &sel).unwrap().is_empty());
    }

    #[test]
    fn supplied_order_and_duplicates_are_kept() {
        let mut counter = GenerationCounter::default();
        let view = jan_view(&mut counter, (-1.0, 1.0));
        let sel = Selection::new(view.generation(), vec![1, 0, 1]);
        assert_eq!(select_text(&view, &sel).unwrap(), ["b", "a", "b"]);
    }

    #[test]
    fn index_past_end_is_out_of_range() {
        let mut counter = GenerationCounter::default();
        let view = jan_view(&mut counter, (0.0, 1.0));
        let sel = Selection::new(view.generation(), vec![0, 1]);
        assert_eq!(
            select_text(&view, &sel),
            Err(SelectionError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn selection_from_older_view_is_stale() {
        let mut counter = GenerationCounter::default();
        let old = jan_view(&mut counter, (-1.0, 1.0));
        let sel = Selection::new(old.generation(), vec![1]);
        let new = jan_view(&mut counter, (0.0, 1.0));
        assert_eq!(
            select_text(&new, &sel),
            Err(SelectionError::Stale {
                selection: old.generation(),
                view: new.generation(),
            })
        );
    }

    #[test]
    fn rect_selects_points_inside_any_corner_order() {
        let mut counter = GenerationCounter::default();
        // points: a = (5, 2), b = (-5, 8)
        let view = jan_view(&mut counter, (-1.0, 1.0));
        let sel = Selection::in_rect(&view, [6.0, 0.0], [4.0, 3.0]);
        assert_eq!(sel.indices, [0]);
        let all = Selection::in_rect(&view, [-5.0, 8.0], [5.0, 2.0]);
        assert_eq!(all.indices, [0, 1]);
        assert_eq!(all.generation, view.generation());
    }

    #[test]
    fn nearest_respects_max_distance() {
        let mut counter = GenerationCounter::default();
        let view = jan_view(&mut counter, (-1.0, 1.0));
        assert_eq!(Selection::nearest(&view, [-4.5, 7.5], 1.0).indices, [1]);
        assert!(Selection::nearest(&view, [0.0, 0.0], 1.0).is_empty());
    }
}
