use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "TWEET_LENS_CONFIG";

// ---------------------------------------------------------------------------
// Column names in the input table
// ---------------------------------------------------------------------------

/// Header names of the six columns the viewer reads. Defaults match the
/// processed tweet export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnMapping {
    pub month: String,
    pub sentiment: String,
    pub subjectivity: String,
    pub dim1: String,
    pub dim2: String,
    pub raw_text: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            month: "Month".into(),
            sentiment: "Sentiment".into(),
            subjectivity: "Subjectivity".into(),
            dim1: "Dimension 1".into(),
            dim2: "Dimension 2".into(),
            raw_text: "RawTweet".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Table loaded before the window opens.
    pub dataset: PathBuf,
    pub columns: ColumnMapping,
    pub slider_step: f64,
    pub point_radius: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("ProcessedTweets.csv"),
            columns: ColumnMapping::default(),
            slider_step: 0.1,
            point_radius: 2.5,
        }
    }
}

impl AppConfig {
    /// Parse a JSON config file; omitted keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Resolve the config from `$TWEET_LENS_CONFIG` and the command line.
    /// The first positional argument, if any, replaces `dataset`.
    pub fn resolve(config_path: Option<PathBuf>, mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        if let Some(dataset) = args.next() {
            config.dataset = PathBuf::from(dataset);
        }
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve(config_path, std::env::args().skip(1))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_processed_export() {
        let config = AppConfig::default();
        assert_eq!(config.dataset, PathBuf::from("ProcessedTweets.csv"));
        assert_eq!(config.columns.dim1, "Dimension 1");
        assert_eq!(config.columns.raw_text, "RawTweet");
        assert_eq!(config.slider_step, 0.1);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "slider_step": 0.05, "columns": {{ "raw_text": "text" }} }}"#
        )
        .unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.slider_step, 0.05);
        assert_eq!(config.columns.raw_text, "text");
        assert_eq!(config.columns.month, "Month");
        assert_eq!(config.point_radius, 2.5);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "colour": "red" }}"#).unwrap();
        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn positional_argument_overrides_dataset() {
        let args = vec!["tweets.parquet".to_string()];
        let config = AppConfig::resolve(None, args.into_iter()).unwrap();
        assert_eq!(config.dataset, PathBuf::from("tweets.parquet"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = AppConfig::resolve(Some(PathBuf::from("/nonexistent/lens.json")), std::iter::empty())
            .unwrap_err();
        assert!(format!("{err:#}").contains("reading config"));
    }
}
