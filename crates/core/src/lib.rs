//! # SOAP Core
//!
//! Core logic for the SOAP note comparator.
//!
//! This crate contains pure data operations:
//! - Splitting free-text notes into Subjective, Objective, Assessment and Plan sections
//! - Loading LED predictions, OpenAI predictions and ground-truth notes from flat files
//! - Building and rendering three-way comparisons for one note index
//!
//! **No process concerns**: reading environment variables, logging setup and argument
//! parsing belong in the binaries.

pub mod comparison;
pub mod config;
pub mod constants;
pub mod error;
pub mod notes;
pub mod soap;

pub use comparison::{note_label, section_label, NoteComparison, COMPARATOR_TITLE};
pub use config::CoreConfig;
pub use error::{NoteError, NoteResult};
pub use notes::{NoteSource, NoteStore};
pub use soap::{parse_note, parse_value, ParsedNote, Section};
