use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read note file (path: {path}): {source}", path = path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize notes (path: {path}): {source}", path = path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid dataset (path: {path}): {reason}", path = path.display())]
    InvalidDataset { path: PathBuf, reason: String },
    #[error("dataset split '{split}' not found under {dir}", dir = dir.display())]
    DatasetSplitMissing { dir: PathBuf, split: String },
}

pub type NoteResult<T> = std::result::Result<T, NoteError>;
