/// Data layer: core types, loading, filtering and selection lookup.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TweetDataset (immutable, Arc-shared)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month + score ranges → FilteredView (tagged with a Generation)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ selection │  plot picks on that view → raw tweet text
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
pub mod selection;
