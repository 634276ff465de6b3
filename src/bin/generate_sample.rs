//! Writes a synthetic `ProcessedTweets.csv` (and a Parquet copy) with the
//! column layout the viewer expects by default.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Sentiment")]
    sentiment: f64,
    #[serde(rename = "Subjectivity")]
    subjectivity: f64,
    #[serde(rename = "Dimension 1")]
    dim1: f64,
    #[serde(rename = "Dimension 2")]
    dim2: f64,
    #[serde(rename = "RawTweet")]
    raw_text: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Topic clusters: (embedding centre, mean sentiment, mean subjectivity, phrases).
const TOPICS: [([f64; 2], f64, f64, &[&str]); 4] = [
    ([-4.0, 3.0], 0.6, 0.7, &["loving the new release", "best launch day ever", "great support team"]),
    ([4.0, 2.5], -0.6, 0.8, &["app keeps crashing", "worst update so far", "support never answered"]),
    ([0.0, -4.0], 0.0, 0.15, &["release notes are out", "server maintenance tonight", "version 2.1 shipped"]),
    ([-3.5, -2.0], 0.3, 0.4, &["trying the beta", "switched to dark mode", "sync works on mobile now"]),
];

const MONTHS: [&str; 3] = ["April", "May", "June"];
const TWEETS_PER_MONTH: usize = 400;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut rows = Vec::with_capacity(MONTHS.len() * TWEETS_PER_MONTH);

    for month in MONTHS {
        for _ in 0..TWEETS_PER_MONTH {
            let (centre, mood, subjectivity, phrases) = *rng.pick(&TOPICS);
            let phrase = rng.pick(phrases);
            let tag = rng.next_u64() % 1000;
            rows.push(Row {
                month: month.to_string(),
                sentiment: rng.gauss(mood, 0.2).clamp(-1.0, 1.0),
                subjectivity: rng.gauss(subjectivity, 0.15).clamp(0.0, 1.0),
                dim1: rng.gauss(centre[0], 1.0),
                dim2: rng.gauss(centre[1], 1.0),
                raw_text: format!("{phrase} #{month} {tag}"),
            });
        }
    }

    // Write CSV
    let csv_path = "ProcessedTweets.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV")?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    // Write Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("Month", DataType::Utf8, false),
        Field::new("Sentiment", DataType::Float64, false),
        Field::new("Subjectivity", DataType::Float64, false),
        Field::new("Dimension 1", DataType::Float64, false),
        Field::new("Dimension 2", DataType::Float64, false),
        Field::new("RawTweet", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.month.as_str()))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.sentiment))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.subjectivity))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.dim1))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.dim2))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.raw_text.as_str()))),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "ProcessedTweets.parquet";
    let file = std::fs::File::create(parquet_path).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing Parquet writer")?;

    println!(
        "Wrote {} tweets over {} months to {csv_path} and {parquet_path}",
        rows.len(),
        MONTHS.len()
    );
    Ok(())
}
