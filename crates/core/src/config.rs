//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the note store.
//! Nothing below reads the process environment itself; binaries read variables and hand the
//! raw values to the helpers here, which keeps tests free of global state.

use crate::constants::{
    DEFAULT_DATASET_DIR, DEFAULT_DATASET_SPLIT, DEFAULT_LED_PREDICTIONS, DEFAULT_NOTE_COLUMN,
    DEFAULT_OPENAI_PREDICTIONS, ENV_DATASET_DIR, ENV_DATASET_SPLIT, ENV_LED_PREDICTIONS,
    ENV_NOTE_COLUMN, ENV_OPENAI_PREDICTIONS,
};
use crate::{NoteError, NoteResult};
use std::path::{Path, PathBuf};

/// Locations of the three note sources, resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    led_predictions: PathBuf,
    openai_predictions: PathBuf,
    dataset_dir: PathBuf,
    dataset_split: String,
    note_column: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        led_predictions: PathBuf,
        openai_predictions: PathBuf,
        dataset_dir: PathBuf,
        dataset_split: String,
        note_column: String,
    ) -> NoteResult<Self> {
        if dataset_split.trim().is_empty() {
            return Err(NoteError::InvalidInput(
                "dataset_split cannot be empty".into(),
            ));
        }
        if note_column.trim().is_empty() {
            return Err(NoteError::InvalidInput("note_column cannot be empty".into()));
        }

        Ok(Self {
            led_predictions,
            openai_predictions,
            dataset_dir,
            dataset_split: dataset_split.trim().to_string(),
            note_column: note_column.trim().to_string(),
        })
    }

    /// Build a config from environment-style values supplied by `lookup`.
    ///
    /// `lookup` is called with each `SOAP_*` variable name; missing or blank values fall back
    /// to the defaults in [`crate::constants`].
    pub fn from_env_lookup(lookup: impl Fn(&str) -> Option<String>) -> NoteResult<Self> {
        Self::new(
            path_from_env_value(lookup(ENV_LED_PREDICTIONS), DEFAULT_LED_PREDICTIONS),
            path_from_env_value(lookup(ENV_OPENAI_PREDICTIONS), DEFAULT_OPENAI_PREDICTIONS),
            path_from_env_value(lookup(ENV_DATASET_DIR), DEFAULT_DATASET_DIR),
            name_from_env_value(lookup(ENV_DATASET_SPLIT), DEFAULT_DATASET_SPLIT),
            name_from_env_value(lookup(ENV_NOTE_COLUMN), DEFAULT_NOTE_COLUMN),
        )
    }

    pub fn led_predictions(&self) -> &Path {
        &self.led_predictions
    }

    pub fn openai_predictions(&self) -> &Path {
        &self.openai_predictions
    }

    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    pub fn dataset_split(&self) -> &str {
        &self.dataset_split
    }

    pub fn note_column(&self) -> &str {
        &self.note_column
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            led_predictions: PathBuf::from(DEFAULT_LED_PREDICTIONS),
            openai_predictions: PathBuf::from(DEFAULT_OPENAI_PREDICTIONS),
            dataset_dir: PathBuf::from(DEFAULT_DATASET_DIR),
            dataset_split: DEFAULT_DATASET_SPLIT.to_string(),
            note_column: DEFAULT_NOTE_COLUMN.to_string(),
        }
    }
}

/// Resolve a path from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn path_from_env_value(value: Option<String>, default: &str) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Resolve a name (split, column) from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn name_from_env_value(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_split() {
        let result = CoreConfig::new(
            PathBuf::from("led.json"),
            PathBuf::from("openai.json"),
            PathBuf::from("data"),
            "  ".into(),
            "soap_note".into(),
        );
        assert!(matches!(result, Err(NoteError::InvalidInput(_))));
    }

    #[test]
    fn test_new_rejects_empty_column() {
        let result = CoreConfig::new(
            PathBuf::from("led.json"),
            PathBuf::from("openai.json"),
            PathBuf::from("data"),
            "test".into(),
            String::new(),
        );
        assert!(matches!(result, Err(NoteError::InvalidInput(_))));
    }

    #[test]
    fn test_new_trims_names() {
        let cfg = CoreConfig::new(
            PathBuf::from("led.json"),
            PathBuf::from("openai.json"),
            PathBuf::from("data"),
            " validation ".into(),
            " note\n".into(),
        )
        .unwrap();
        assert_eq!(cfg.dataset_split(), "validation");
        assert_eq!(cfg.note_column(), "note");
        assert_eq!(cfg.dataset_dir(), Path::new("data"));
    }

    #[test]
    fn test_default_matches_constants() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.led_predictions(), Path::new(DEFAULT_LED_PREDICTIONS));
        assert_eq!(cfg.openai_predictions(), Path::new(DEFAULT_OPENAI_PREDICTIONS));
        assert_eq!(cfg.dataset_split(), DEFAULT_DATASET_SPLIT);
        assert_eq!(cfg.note_column(), DEFAULT_NOTE_COLUMN);
    }

    #[test]
    fn test_from_env_lookup_uses_values_and_defaults() {
        let cfg = CoreConfig::from_env_lookup(|key| match key {
            ENV_LED_PREDICTIONS => Some("/runs/led.json".into()),
            ENV_DATASET_SPLIT => Some("validation".into()),
            ENV_NOTE_COLUMN => Some("   ".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.led_predictions(), Path::new("/runs/led.json"));
        assert_eq!(cfg.openai_predictions(), Path::new(DEFAULT_OPENAI_PREDICTIONS));
        assert_eq!(cfg.dataset_dir(), Path::new(DEFAULT_DATASET_DIR));
        assert_eq!(cfg.dataset_split(), "validation");
        assert_eq!(cfg.note_column(), DEFAULT_NOTE_COLUMN);
    }

    #[test]
    fn test_env_value_helpers_fall_back_on_blank() {
        assert_eq!(
            path_from_env_value(None, "a.json"),
            PathBuf::from("a.json")
        );
        assert_eq!(
            path_from_env_value(Some("   ".into()), "a.json"),
            PathBuf::from("a.json")
        );
        assert_eq!(
            path_from_env_value(Some(" /data/b.json ".into()), "a.json"),
            PathBuf::from("/data/b.json")
        );
        assert_eq!(name_from_env_value(Some(String::new()), "test"), "test");
        assert_eq!(name_from_env_value(Some("train".into()), "test"), "train");
    }
}
