use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// ScoreRange – inclusive (low, high) bound on a score column
// ---------------------------------------------------------------------------

/// Inclusive range over a floating-point score.
///
/// An inverted range (`low > high`) contains nothing, and NaN is never
/// contained, so neither needs special handling by callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub low: f64,
    pub high: f64,
}

impl ScoreRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `low <= value <= high`.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }

    /// Snap a slider value to `step`'s decimal precision within these bounds.
    /// A value within half a step of either bound becomes that bound, so the
    /// observed min and max stay reachable when the span isn't a step multiple.
    pub fn snap(&self, value: f64, step: f64) -> f64 {
        if step.is_nan() || step <= 0.0 || value.is_nan() {
            return value;
        }
        let half = step / 2.0;
        if (value - self.low).abs() < half {
            return self.low;
        }
        if (self.high - value).abs() < half {
            return self.high;
        }
        let scale = 10f64.powi(step_decimals(step));
        ((value * scale).round() / scale).clamp(self.low.min(self.high), self.high.max(self.low))
    }

    /// Smallest range covering every non-NaN value, or `None` if there are none.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<ScoreRange>, v| match acc {
                None => Some(ScoreRange::new(v, v)),
                Some(r) => Some(ScoreRange::new(r.low.min(v), r.high.max(v))),
            })
    }
}

/// Decimal places needed to write `step` exactly (`0.1` -> 1, `0.05` -> 2).
fn step_decimals(step: f64) -> i32 {
    (0..15)
        .find(|&d| {
            let scaled = step * 10f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-9
        })
        .unwrap_or(15)
}

impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.2}, {:.2}]", self.low, self.high)
    }
}

// ---------------------------------------------------------------------------
// Tweet – one row of the table
// ---------------------------------------------------------------------------

/// A single tweet with its scores and embedding coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweet {
    pub month: String,
    pub sentiment: f64,
    pub subjectivity: f64,
    /// First embedding coordinate (plot x).
    pub dim1: f64,
    /// Second embedding coordinate (plot y).
    pub dim2: f64,
    pub raw_text: String,
}

// ---------------------------------------------------------------------------
// TweetDataset – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset contains no rows")]
    Empty,
    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

/// The full parsed table with pre-computed month list and score bounds.
///
/// Built once and never mutated; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TweetDataset {
    tweets: Vec<Tweet>,
    /// Distinct months, in order of first appearance.
    months: Vec<String>,
    sentiment_bounds: ScoreRange,
    subjectivity_bounds: ScoreRange,
}

impl TweetDataset {
    /// Build the month index and score bounds from the loaded rows.
    pub fn from_tweets(tweets: Vec<Tweet>) -> Result<Self, DatasetError> {
        if tweets.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = HashSet::new();
        let months = tweets
            .iter()
            .filter(|t| seen.insert(t.month.as_str()))
            .map(|t| t.month.clone())
            .collect();

        // An all-NaN column still needs a usable slider domain.
        let sentiment_bounds = ScoreRange::spanning(tweets.iter().map(|t| t.sentiment))
            .unwrap_or(ScoreRange::new(0.0, 0.0));
        let subjectivity_bounds = ScoreRange::spanning(tweets.iter().map(|t| t.subjectivity))
            .unwrap_or(ScoreRange::new(0.0, 0.0));

        Ok(TweetDataset {
            tweets,
            months,
            sentiment_bounds,
            subjectivity_bounds,
        })
    }

    pub fn tweets(&self) -> &[Tweet] {
        &self.tweets
    }

    pub fn get(&self, index: usize) -> Option<&Tweet> {
        self.tweets.get(index)
    }

    pub fn months(&self) -> &[String] {
        &self.months
    }

    pub fn sentiment_bounds(&self) -> ScoreRange {
        self.sentiment_bounds
    }

    pub fn subjectivity_bounds(&self) -> ScoreRange {
        self.subjectivity_bounds
    }

    /// Number of tweets.
    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn tweet(month: &str, sentiment: f64, subjectivity: f64, text: &str) -> Tweet {
        Tweet {
            month: month.to_string(),
            sentiment,
            subjectivity,
            dim1: sentiment * 10.0,
            dim2: subjectivity * 10.0,
            raw_text: text.to_string(),
        }
    }

    /// The three-row Jan/Feb table used across the data tests.
    pub(crate) fn sample_dataset() -> TweetDataset {
        TweetDataset::from_tweets(vec![
            tweet("Jan", 0.5, 0.2, "a"),
            tweet("Jan", -0.5, 0.8, "b"),
            tweet("Feb", 0.1, 0.1, "c"),
        ])
        .unwrap()
    }

    #[test]
    fn months_keep_first_appearance_order() {
        let ds = TweetDataset::from_tweets(vec![
            tweet("May", 0.0, 0.0, "x"),
            tweet("April", 0.0, 0.0, "y"),
            tweet("May", 0.0, 0.0, "z"),
        ])
        .unwrap();
        assert_eq!(ds.months(), ["May", "April"]);
    }

    #[test]
    fn bounds_span_observed_scores() {
        let ds = sample_dataset();
        assert_eq!(ds.sentiment_bounds(), ScoreRange::new(-0.5, 0.5));
        assert_eq!(ds.subjectivity_bounds(), ScoreRange::new(0.1, 0.8));
    }

    #[test]
    fn bounds_skip_nan() {
        let ds = TweetDataset::from_tweets(vec![
            tweet("Jan", f64::NAN, 0.3, "x"),
            tweet("Jan", 0.4, 0.6, "y"),
        ])
        .unwrap();
        assert_eq!(ds.sentiment_bounds(), ScoreRange::new(0.4, 0.4));
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(
            TweetDataset::from_tweets(Vec::new()).unwrap_err(),
            DatasetError::Empty
        );
    }

    #[test]
    fn range_is_inclusive_and_rejects_nan() {
        let r = ScoreRange::new(0.0, 1.0);
        assert!(r.contains(0.0));
        assert!(r.contains(1.0));
        assert!(!r.contains(1.0001));
        assert!(!r.contains(f64::NAN));
    }

    #[test]
    fn snap_removes_step_drift() {
        let bounds = ScoreRange::new(0.0, 1.0);
        // 0.0 + 3 * 0.1 as a slider computes it
        let drifted = 0.0 + (0.3f64 / 0.1).round() * 0.1;
        assert_ne!(drifted, 0.3);
        let snapped = bounds.snap(drifted, 0.1);
        assert_eq!(snapped, 0.3);
        assert!(ScoreRange::new(snapped, 1.0).contains(0.3));
    }

    #[test]
    fn snap_reaches_bounds_off_the_step_grid() {
        let bounds = ScoreRange::new(-0.983, 0.94);
        assert_eq!(bounds.snap(0.9, 0.1), 0.94);
        assert_eq!(bounds.snap(-1.0, 0.1), -0.983);
        assert_eq!(bounds.snap(0.5, 0.1), 0.5);
    }

    #[test]
    fn snap_uses_step_precision() {
        let bounds = ScoreRange::new(0.0, 1.0);
        assert_eq!(bounds.snap(0.15000000000000002, 0.05), 0.15);
        assert_eq!(bounds.snap(0.123, 0.0), 0.123);
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let r = ScoreRange::new(0.8, 0.2);
        assert!(r.is_inverted());
        assert!(!r.contains(0.5));
        assert!(!r.contains(0.8));
    }
}
