use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::model::{DatasetError, Tweet, TweetDataset};
use crate::config::ColumnMapping;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tweet table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the mapped columns (the usual export)
/// * `.json`    – `[{ "Month": "...", "Sentiment": 0.2, ... }, ...]`
/// * `.parquet` – flat columns with the mapped names
pub fn load_file(path: &Path, columns: &ColumnMapping) -> Result<TweetDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let tweets = match ext.as_str() {
        "csv" => load_csv(path, columns),
        "json" => load_json(path, columns),
        "parquet" | "pq" => load_parquet(path, columns),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    let dataset = TweetDataset::from_tweets(tweets)
        .with_context(|| format!("loading {}", path.display()))?;
    log::info!(
        "Loaded {} tweets across {} months from {}",
        dataset.len(),
        dataset.months().len(),
        path.display()
    );
    Ok(dataset)
}

/// Empty cells are missing values and load as NaN, which no range matches.
fn parse_score(s: &str, row: usize, col: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column positions of the mapped fields within a header row.
struct CsvColumns {
    month: usize,
    sentiment: usize,
    subjectivity: usize,
    dim1: usize,
    dim2: usize,
    raw_text: usize,
}

impl CsvColumns {
    fn locate(headers: &csv::StringRecord, columns: &ColumnMapping) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };
        Ok(CsvColumns {
            month: find(&columns.month)?,
            sentiment: find(&columns.sentiment)?,
            subjectivity: find(&columns.subjectivity)?,
            dim1: find(&columns.dim1)?,
            dim2: find(&columns.dim2)?,
            raw_text: find(&columns.raw_text)?,
        })
    }
}

/// CSV layout: header row, one tweet per line. Columns not in the mapping
/// (an unnamed pandas index, for instance) are ignored.
fn load_csv(path: &Path, columns: &ColumnMapping) -> Result<Vec<Tweet>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let idx = CsvColumns::locate(reader.headers().context("reading CSV headers")?, columns)?;

    let mut tweets = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        tweets.push(Tweet {
            month: field(idx.month).to_string(),
            sentiment: parse_score(field(idx.sentiment), row_no, &columns.sentiment)?,
            subjectivity: parse_score(field(idx.subjectivity), row_no, &columns.subjectivity)?,
            dim1: parse_score(field(idx.dim1), row_no, &columns.dim1)?,
            dim2: parse_score(field(idx.dim2), row_no, &columns.dim2)?,
            raw_text: field(idx.raw_text).to_string(),
        });
    }
    Ok(tweets)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Month": "April", "Sentiment": 0.2, "Subjectivity": 0.5,
///     "Dimension 1": 1.3, "Dimension 2": -0.7, "RawTweet": "..." },
///   ...
/// ]
/// ```
fn load_json(path: &Path, columns: &ColumnMapping) -> Result<Vec<Tweet>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<Tweet> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(Tweet {
                month: json_text(obj, &columns.month, i)?,
                sentiment: json_score(obj, &columns.sentiment, i)?,
                subjectivity: json_score(obj, &columns.subjectivity, i)?,
                dim1: json_score(obj, &columns.dim1, i)?,
                dim2: json_score(obj, &columns.dim2, i)?,
                raw_text: json_text(obj, &columns.raw_text, i)?,
            })
        })
        .collect()
}

fn json_field<'a>(obj: &'a Map<String, JsonValue>, col: &str, row: usize) -> Result<&'a JsonValue> {
    obj.get(col)
        .with_context(|| format!("Row {row}: {}", DatasetError::MissingColumn(col.to_string())))
}

/// Text cells: strings as-is, null as empty, numbers (e.g. a numeric month) stringified.
fn json_text(obj: &Map<String, JsonValue>, col: &str, row: usize) -> Result<String> {
    Ok(match json_field(obj, col, row)? {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Number(n) => n.to_string(),
        other => bail!("Row {row}, {col}: expected text, got {other}"),
    })
}

fn json_score(obj: &Map<String, JsonValue>, col: &str, row: usize) -> Result<f64> {
    match json_field(obj, col, row)? {
        JsonValue::Number(n) => n
            .as_f64()
            .with_context(|| format!("Row {row}, {col}: {n} is not representable as f64")),
        JsonValue::String(s) => parse_score(s, row, col),
        JsonValue::Null => Ok(f64::NAN),
        other => bail!("Row {row}, {col}: expected a number, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per mapped field.
///
/// Text columns may be Utf8 or LargeUtf8; score columns Float64, Float32,
/// Int64 or Int32. Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, columns: &ColumnMapping) -> Result<Vec<Tweet>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut tweets = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let month = batch_column(&batch, &columns.month)?;
        let sentiment = batch_column(&batch, &columns.sentiment)?;
        let subjectivity = batch_column(&batch, &columns.subjectivity)?;
        let dim1 = batch_column(&batch, &columns.dim1)?;
        let dim2 = batch_column(&batch, &columns.dim2)?;
        let raw_text = batch_column(&batch, &columns.raw_text)?;

        // Row numbers in messages are file-global, not per batch.
        let offset = tweets.len();
        for row in 0..batch.num_rows() {
            let at = offset + row;
            tweets.push(Tweet {
                month: text_value(month, row).with_context(|| format!("Row {at}, {}", columns.month))?,
                sentiment: score_value(sentiment, row)
                    .with_context(|| format!("Row {at}, {}", columns.sentiment))?,
                subjectivity: score_value(subjectivity, row)
                    .with_context(|| format!("Row {at}, {}", columns.subjectivity))?,
                dim1: score_value(dim1, row).with_context(|| format!("Row {at}, {}", columns.dim1))?,
                dim2: score_value(dim2, row).with_context(|| format!("Row {at}, {}", columns.dim2))?,
                raw_text: text_value(raw_text, row)
                    .with_context(|| format!("Row {at}, {}", columns.raw_text))?,
            });
        }
    }

    Ok(tweets)
}

// -- Parquet / Arrow helpers --

fn batch_column<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b ArrayRef, DatasetError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
    Ok(batch.column(idx))
}

/// Extract a string cell; nulls become empty text.
fn text_value(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    Ok(match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        other => bail!("expected a text column, got {other:?}"),
    })
}

/// Extract a numeric cell as `f64`; nulls become NaN.
fn score_value(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(f64::NAN);
    }
    Ok(match col.data_type() {
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        other => bail!("expected a numeric column, got {other:?}"),
    })
}
