//! Constants used throughout the SOAP core crate.
//!
//! Default data locations match the artefacts produced by the summarisation runs, so the
//! comparator works out of the box when launched from the directory holding them.

/// Default LED predictions file (JSON array of notes). Spelling matches the exported artefact.
pub const DEFAULT_LED_PREDICTIONS: &str = "led_predicitons_test_epoch_2.json";

/// Default OpenAI predictions file (JSON array of notes).
pub const DEFAULT_OPENAI_PREDICTIONS: &str = "openai_predictions.json";

/// Default directory holding the exported ground-truth dataset.
pub const DEFAULT_DATASET_DIR: &str = "combined_normalized_data";

/// Dataset split compared against the predictions.
pub const DEFAULT_DATASET_SPLIT: &str = "test";

/// Dataset column holding the reference SOAP note.
pub const DEFAULT_NOTE_COLUMN: &str = "soap_note";

/// File extension for JSON Lines split exports.
pub const JSONL_EXTENSION: &str = "jsonl";

/// File extension for JSON array split exports.
pub const JSON_EXTENSION: &str = "json";

pub const ENV_LED_PREDICTIONS: &str = "SOAP_LED_PREDICTIONS";
pub const ENV_OPENAI_PREDICTIONS: &str = "SOAP_OPENAI_PREDICTIONS";
pub const ENV_DATASET_DIR: &str = "SOAP_DATASET_DIR";
pub const ENV_DATASET_SPLIT: &str = "SOAP_DATASET_SPLIT";
pub const ENV_NOTE_COLUMN: &str = "SOAP_NOTE_COLUMN";
