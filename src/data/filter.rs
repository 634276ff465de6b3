use std::sync::Arc;

use super::model::{ScoreRange, Tweet, TweetDataset};

// ---------------------------------------------------------------------------
// Query: the month and score ranges currently selected in the UI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub month: String,
    pub sentiment: ScoreRange,
    pub subjectivity: ScoreRange,
}

impl Query {
    /// The query the viewer opens with: first month, full score ranges.
    pub fn initial(dataset: &TweetDataset) -> Option<Self> {
        Some(Query {
            month: dataset.months().first()?.clone(),
            sentiment: dataset.sentiment_bounds(),
            subjectivity: dataset.subjectivity_bounds(),
        })
    }

    pub fn matches(&self, tweet: &Tweet) -> bool {
        tweet.month == self.month
            && self.sentiment.contains(tweet.sentiment)
            && self.subjectivity.contains(tweet.subjectivity)
    }
}

/// Return the dataset positions of tweets matching `query`, in dataset order.
///
/// An unknown month or an inverted range simply yields no rows.
pub fn filter(dataset: &TweetDataset, query: &Query) -> Vec<usize> {
    dataset
        .tweets()
        .iter()
        .enumerate()
        .filter(|(_, tweet)| query.matches(tweet))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Generations: identify successive filtered views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out strictly increasing [`Generation`]s.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    next: u64,
}

impl GenerationCounter {
    pub fn next(&mut self) -> Generation {
        let generation = Generation(self.next);
        self.next += 1;
        generation
    }
}

// ---------------------------------------------------------------------------
// FilteredView: one filter pass over a shared dataset
// ---------------------------------------------------------------------------

/// The result of one filter pass. Positions `0..len()` are what the plot and
/// any selection refer to.
#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Arc<TweetDataset>,
    query: Query,
    generation: Generation,
    rows: Vec<usize>,
}

/// Run [`filter`] and tag the result with `generation`.
pub fn filter_view(dataset: &Arc<TweetDataset>, query: &Query, generation: Generation) -> FilteredView {
    let rows = filter(dataset, query);
    log::debug!(
        "filter pass {generation}: month={} sentiment={} subjectivity={} -> {} of {} rows",
        query.month,
        query.sentiment,
        query.subjectivity,
        rows.len(),
        dataset.len()
    );
    FilteredView {
        dataset: Arc::clone(dataset),
        query: query.clone(),
        generation,
        rows,
    }
}

impl FilteredView {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tweet at view position `pos`.
    pub fn get(&self, pos: usize) -> Option<&Tweet> {
        self.rows.get(pos).and_then(|&row| self.dataset.get(row))
    }

    pub fn tweets(&self) -> impl Iterator<Item = &Tweet> + '_ {
        self.rows.iter().filter_map(|&row| self.dataset.get(row))
    }

    /// `(dim1, dim2)` per tweet, index-aligned with the view.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.tweets().map(|t| [t.dim1, t.dim2]).collect()
    }
}
