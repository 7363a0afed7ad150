//! Loading of the three note sources.
//!
//! Predictions are JSON arrays of notes. The ground truth is one column of a dataset split
//! exported either as JSON Lines (`<split>.jsonl`) or as a JSON array of row objects
//! (`<split>.json`). Raw notes are kept as [`serde_json::Value`] so that anything that is not a
//! string reaches the parser untouched and degrades to an empty note there.
//!
//! [`NoteStore`] is built once at startup and is read-only afterwards.

use crate::comparison::NoteComparison;
use crate::config::CoreConfig;
use crate::constants::{JSONL_EXTENSION, JSON_EXTENSION};
use crate::error::{NoteError, NoteResult};
use crate::soap::{parse_value, ParsedNote};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

static MISSING_NOTE: Value = Value::Null;

/// Where a note came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSource {
    Led,
    #[serde(rename = "openai")]
    OpenAi,
    GroundTruth,
}

impl NoteSource {
    /// Sources in display order.
    pub const ALL: [NoteSource; 3] = [NoteSource::Led, NoteSource::OpenAi, NoteSource::GroundTruth];

    pub fn label(self) -> &'static str {
        match self {
            NoteSource::Led => "LED Prediction",
            NoteSource::OpenAi => "OpenAI Prediction",
            NoteSource::GroundTruth => "Ground Truth",
        }
    }
}

/// The three raw note collections, indexable by a shared note index.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    led: Vec<Value>,
    openai: Vec<Value>,
    ground_truth: Vec<Value>,
}

impl NoteStore {
    /// Reads every source named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if any file is missing, unreadable, or not shaped as expected.
    pub fn load(config: &CoreConfig) -> NoteResult<Self> {
        let led = read_predictions(config.led_predictions())?;
        tracing::info!(
            path = %config.led_predictions().display(),
            count = led.len(),
            "loaded LED predictions"
        );

        let openai = read_predictions(config.openai_predictions())?;
        tracing::info!(
            path = %config.openai_predictions().display(),
            count = openai.len(),
            "loaded OpenAI predictions"
        );

        let ground_truth = read_dataset_column(
            config.dataset_dir(),
            config.dataset_split(),
            config.note_column(),
        )?;
        tracing::info!(
            dir = %config.dataset_dir().display(),
            split = config.dataset_split(),
            count = ground_truth.len(),
            "loaded ground truth notes"
        );

        Ok(Self::from_parts(led, openai, ground_truth))
    }

    pub fn from_parts(led: Vec<Value>, openai: Vec<Value>, ground_truth: Vec<Value>) -> Self {
        Self {
            led,
            openai,
            ground_truth,
        }
    }

    /// Number of selectable notes: the length of the shortest source.
    pub fn len(&self) -> usize {
        self.led
            .len()
            .min(self.openai.len())
            .min(self.ground_truth.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw note for `source` at `index`, or `null` when there is none.
    pub fn raw(&self, source: NoteSource, index: usize) -> &Value {
        let notes = match source {
            NoteSource::Led => &self.led,
            NoteSource::OpenAi => &self.openai,
            NoteSource::GroundTruth => &self.ground_truth,
        };
        notes.get(index).unwrap_or(&MISSING_NOTE)
    }

    pub fn parsed(&self, source: NoteSource, index: usize) -> ParsedNote {
        parse_value(self.raw(source, index))
    }

    /// Parses all three notes at `index`.
    pub fn compare(&self, index: usize) -> NoteComparison {
        tracing::debug!(index, "parsing notes for comparison");
        NoteComparison {
            index,
            led: self.parsed(NoteSource::Led, index),
            openai: self.parsed(NoteSource::OpenAi, index),
            ground_truth: self.parsed(NoteSource::GroundTruth, index),
        }
    }

    /// Comparisons for every selectable index, in order.
    pub fn comparisons(&self) -> impl Iterator<Item = NoteComparison> + '_ {
        (0..self.len()).map(|index| self.compare(index))
    }
}

/// Reads a predictions file holding a JSON array of notes.
pub fn read_predictions(path: &Path) -> NoteResult<Vec<Value>> {
    match read_json(path)? {
        Value::Array(notes) => Ok(notes),
        other => Err(NoteError::InvalidDataset {
            path: path.to_path_buf(),
            reason: format!("expected a JSON array of notes, found {}", json_kind(&other)),
        }),
    }
}

/// Reads `column` from every row of a dataset split.
///
/// `<dir>/<split>.jsonl` is preferred over `<dir>/<split>.json`. Rows that are not objects, or
/// that lack the column, contribute `null`.
pub fn read_dataset_column(dir: &Path, split: &str, column: &str) -> NoteResult<Vec<Value>> {
    let rows = read_dataset_rows(dir, split)?;
    Ok(rows
        .into_iter()
        .map(|mut row| match row.get_mut(column) {
            Some(value) => value.take(),
            None => Value::Null,
        })
        .collect())
}

fn read_dataset_rows(dir: &Path, split: &str) -> NoteResult<Vec<Value>> {
    let jsonl_path = split_path(dir, split, JSONL_EXTENSION);
    if jsonl_path.is_file() {
        return read_json_lines(&jsonl_path);
    }

    let json_path = split_path(dir, split, JSON_EXTENSION);
    if json_path.is_file() {
        return match read_json(&json_path)? {
            Value::Array(rows) => Ok(rows),
            other => Err(NoteError::InvalidDataset {
                path: json_path,
                reason: format!("expected a JSON array of rows, found {}", json_kind(&other)),
            }),
        };
    }

    Err(NoteError::DatasetSplitMissing {
        dir: dir.to_path_buf(),
        split: split.to_string(),
    })
}

fn split_path(dir: &Path, split: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}.{}", split, extension))
}

fn read_json(path: &Path) -> NoteResult<Value> {
    let contents = fs::read_to_string(path).map_err(|source| NoteError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| NoteError::Deserialization {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json_lines(path: &Path) -> NoteResult<Vec<Value>> {
    let contents = fs::read_to_string(path).map_err(|source| NoteError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (line_no, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            tracing::warn!(
                path = %path.display(),
                line = line_no + 1,
                "skipping blank dataset line"
            );
            continue;
        }
        let row = serde_json::from_str(line).map_err(|source| NoteError::Deserialization {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    fn config_for(dir: &TempDir) -> CoreConfig {
        CoreConfig::new(
            dir.path().join("led.json"),
            dir.path().join("openai.json"),
            dir.path().join("dataset"),
            "test".into(),
            "soap_note".into(),
        )
        .unwrap()
    }

    #[test]
    fn test_len_is_shortest_source() {
        let store = NoteStore::from_parts(
            vec![json!("S: a"), json!("S: b"), json!("S: c")],
            vec![json!("S: a"), json!("S: b")],
            vec![json!("S: a"), json!("S: b"), json!("S: c"), json!("S: d")],
        );
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
        assert_eq!(store.comparisons().count(), 2);
    }

    #[test]
    fn test_out_of_range_note_is_null_and_parses_empty() {
        let store = NoteStore::from_parts(vec![json!("S: a")], vec![], vec![]);
        assert!(store.is_empty());
        assert_eq!(store.raw(NoteSource::OpenAi, 0), &Value::Null);
        assert_eq!(store.raw(NoteSource::Led, 7), &Value::Null);

        let comparison = store.compare(5);
        assert_eq!(comparison.index, 5);
        assert!(comparison.led.is_empty());
        assert!(comparison.openai.is_empty());
        assert!(comparison.ground_truth.is_empty());
    }

    #[test]
    fn test_compare_parses_each_source() {
        let store = NoteStore::from_parts(
            vec![json!("S: led subjective P: led plan")],
            vec![json!(null)],
            vec![json!("S: truth O: exam")],
        );
        let comparison = store.compare(0);
        assert_eq!(comparison.led.subjective, "led subjective");
        assert_eq!(comparison.led.plan, "led plan");
        assert!(comparison.openai.is_empty());
        assert_eq!(comparison.ground_truth.objective, "exam");
    }

    #[test]
    fn test_load_with_jsonl_split() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "led.json", r#"["S: one", "S: two"]"#);
        write(dir.path(), "openai.json", r#"["O: one", null]"#);
        fs::create_dir(dir.path().join("dataset")).unwrap();
        write(
            &dir.path().join("dataset"),
            "test.jsonl",
            "{\"soap_note\": \"A: one\", \"dialogue\": \"...\"}\n\n{\"dialogue\": \"no note\"}\n",
        );

        let store = NoteStore::load(&config_for(&dir)).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.parsed(NoteSource::GroundTruth, 0).assessment, "one");
        assert_eq!(store.raw(NoteSource::GroundTruth, 1), &Value::Null);
        assert!(store.parsed(NoteSource::OpenAi, 1).is_empty());
    }

    #[test]
    fn test_jsonl_preferred_over_json() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "test.jsonl", "{\"soap_note\": \"from jsonl\"}\n");
        write(dir.path(), "test.json", r#"[{"soap_note": "from json"}]"#);

        let notes = read_dataset_column(dir.path(), "test", "soap_note").unwrap();
        assert_eq!(notes, vec![json!("from jsonl")]);
    }

    #[test]
    fn test_json_array_split() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "test.json",
            r#"[{"soap_note": "S: x"}, {"soap_note": 3}, "not a row"]"#,
        );

        let notes = read_dataset_column(dir.path(), "test", "soap_note").unwrap();
        assert_eq!(notes, vec![json!("S: x"), json!(3), Value::Null]);
    }

    #[test]
    fn test_missing_split_is_reported() {
        let dir = TempDir::new().unwrap();
        let err = read_dataset_column(dir.path(), "test", "soap_note").unwrap_err();
        assert!(matches!(err, NoteError::DatasetSplitMissing { ref split, .. } if split == "test"));
    }

    #[test]
    fn test_missing_predictions_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = read_predictions(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, NoteError::FileRead { .. }));
    }

    #[test]
    fn test_predictions_must_be_array() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "led.json", r#"{"0": "S: a"}"#);
        let err = read_predictions(&path).unwrap_err();
        match err {
            NoteError::InvalidDataset { reason, .. } => assert!(reason.contains("an object")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_predictions_is_deserialization_error() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "led.json", "[\"S: a\",");
        let err = read_predictions(&path).unwrap_err();
        assert!(matches!(err, NoteError::Deserialization { .. }));
    }

    #[test]
    fn test_malformed_jsonl_line_is_deserialization_error() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "test.jsonl", "{\"soap_note\": \"ok\"}\n{broken\n");
        let err = read_dataset_column(dir.path(), "test", "soap_note").unwrap_err();
        assert!(matches!(err, NoteError::Deserialization { .. }));
    }

    #[test]
    fn test_source_labels() {
        let labels: Vec<_> = NoteSource::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["LED Prediction", "OpenAI Prediction", "Ground Truth"]
        );
    }
}
