use std::path::Path;
use std::sync::Arc;

use crate::color::SentimentColors;
use crate::config::AppConfig;
use crate::data::filter::{FilteredView, GenerationCounter, Query, filter_view};
use crate::data::loader::load_file;
use crate::data::model::{ScoreRange, TweetDataset};
use crate::data::selection::{Selection, select_text};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded dataset (None until a file has been loaded).
    pub dataset: Option<Arc<TweetDataset>>,

    /// Month and score ranges currently chosen in the side panel.
    pub query: Option<Query>,

    /// Result of the last filter pass over `dataset` with `query`.
    pub view: Option<FilteredView>,

    generations: GenerationCounter,

    /// Points picked on the plot, tagged with the view they came from.
    pub selection: Option<Selection>,

    /// Marker colours by sentiment.
    pub colors: Option<SentimentColors>,

    /// Plot coordinate where an in-progress box selection started.
    pub drag_anchor: Option<[f64; 2]>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            dataset: None,
            query: None,
            view: None,
            generations: GenerationCounter::default(),
            selection: None,
            colors: None,
            drag_anchor: None,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset, reset the query and colours.
    pub fn set_dataset(&mut self, dataset: TweetDataset) {
        self.query = Query::initial(&dataset);
        self.colors = Some(SentimentColors::new(dataset.sentiment_bounds()));
        self.dataset = Some(Arc::new(dataset));
        self.selection = None;
        self.drag_anchor = None;
        self.refilter();

        self.status_message = None;
    }

    /// Load `path` with the configured column names and make it current.
    pub fn load_path(&mut self, path: &Path) -> anyhow::Result<()> {
        let dataset = load_file(path, &self.config.columns)?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Recompute `view` after a query change. Every pass gets a new
    /// generation, so any existing selection is stale from here on.
    pub fn refilter(&mut self) {
        self.view = match (&self.dataset, &self.query) {
            (Some(ds), Some(query)) => Some(filter_view(ds, query, self.generations.next())),
            _ => None,
        };
    }

    fn update_query(&mut self, update: impl FnOnce(&mut Query)) {
        if let Some(query) = &mut self.query {
            update(query);
            self.refilter();
        }
    }

    pub fn set_month(&mut self, month: String) {
        self.update_query(|q| q.month = month);
    }

    pub fn set_sentiment(&mut self, range: ScoreRange) {
        self.update_query(|q| q.sentiment = range);
    }

    pub fn set_subjectivity(&mut self, range: ScoreRange) {
        self.update_query(|q| q.subjectivity = range);
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Raw text of the selected points. A selection the current view
    /// rejects is logged and dropped.
    pub fn selected_text(&mut self) -> Vec<String> {
        let (Some(view), Some(selection)) = (&self.view, &self.selection) else {
            return Vec::new();
        };
        match select_text(view, selection) {
            Ok(texts) => texts.into_iter().map(str::to_owned).collect(),
            Err(e) => {
                log::warn!("Dropping selection: {e}");
                self.selection = None;
                Vec::new()
            }
        }
    }

    /// Number of points currently selected, 0 without a selection.
    pub fn selected_count(&self) -> usize {
        self.selection.as_ref().map_or(0, |s| s.indices.len())
    }
}
