//! SOAP section extraction.
//!
//! Splits a free-text clinical note into its Subjective, Objective, Assessment and Plan
//! sections. Sections are introduced by the literal markers `S:`, `O:`, `A:` and `P:`
//! (case-sensitive, colon required) wherever they appear in the text.
//!
//! Parsing never fails: anything that is not text degrades to an all-empty [`ParsedNote`].
//!
//! # Known limitation
//!
//! There is no escaping. A marker that occurs inside prose (for example `"... S: ..."` within a
//! plan) always starts a new section. Reference data was produced with the same splitting rule,
//! so the behaviour is kept for comparability.

use crate::error::{NoteError, NoteResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// Matches any of the four section markers.
static SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[SOAP]:").expect("section marker pattern is valid"));

/// One of the four SOAP documentation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "S")]
    Subjective,
    #[serde(rename = "O")]
    Objective,
    #[serde(rename = "A")]
    Assessment,
    #[serde(rename = "P")]
    Plan,
}

impl Section {
    /// All sections in documentation order.
    pub const ALL: [Section; 4] = [
        Section::Subjective,
        Section::Objective,
        Section::Assessment,
        Section::Plan,
    ];

    /// Single-letter code used to address the section.
    pub fn code(self) -> char {
        match self {
            Section::Subjective => 'S',
            Section::Objective => 'O',
            Section::Assessment => 'A',
            Section::Plan => 'P',
        }
    }

    /// Literal marker that opens the section in raw text.
    pub fn marker(self) -> &'static str {
        match self {
            Section::Subjective => "S:",
            Section::Objective => "O:",
            Section::Assessment => "A:",
            Section::Plan => "P:",
        }
    }

    /// Looks up a section by its single-letter code (case-sensitive).
    pub fn from_code(code: char) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.code() == code)
    }
}

impl FromStr for Section {
    type Err = NoteError;

    /// Accepts a code (`S`), a marker (`S:`) or a full name (`subjective`), ignoring case.
    fn from_str(s: &str) -> NoteResult<Self> {
        let value = s.trim();
        let value = value.strip_suffix(':').unwrap_or(value);

        match value.to_ascii_lowercase().as_str() {
            "s" | "subjective" => Ok(Section::Subjective),
            "o" | "objective" => Ok(Section::Objective),
            "a" | "assessment" => Ok(Section::Assessment),
            "p" | "plan" => Ok(Section::Plan),
            _ => Err(NoteError::InvalidInput(format!(
                "unknown SOAP section '{}'",
                s
            ))),
        }
    }
}

/// A note split into its four sections.
///
/// Every section is always present. Sections missing from the source text are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedNote {
    #[serde(rename = "S")]
    pub subjective: String,
    #[serde(rename = "O")]
    pub objective: String,
    #[serde(rename = "A")]
    pub assessment: String,
    #[serde(rename = "P")]
    pub plan: String,
}

impl ParsedNote {
    /// Splits `note` into sections.
    ///
    /// Text before the first marker is discarded. Each marker takes the text up to the next
    /// marker (or the end of input), trimmed of surrounding whitespace. When a marker repeats,
    /// the last occurrence wins.
    pub fn parse(note: &str) -> Self {
        let mut parsed = ParsedNote::default();
        let mut markers = SECTION_MARKER.find_iter(note).peekable();

        while let Some(marker) = markers.next() {
            let end = markers.peek().map_or(note.len(), |next| next.start());
            let content = trim_note_whitespace(&note[marker.end()..end]);

            let Some(section) = marker.as_str().chars().next().and_then(Section::from_code)
            else {
                continue;
            };
            *parsed.get_mut(section) = content.to_owned();
        }

        parsed
    }

    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Subjective => &self.subjective,
            Section::Objective => &self.objective,
            Section::Assessment => &self.assessment,
            Section::Plan => &self.plan,
        }
    }

    fn get_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Subjective => &mut self.subjective,
            Section::Objective => &mut self.objective,
            Section::Assessment => &mut self.assessment,
            Section::Plan => &mut self.plan,
        }
    }

    /// Iterates sections in `S`, `O`, `A`, `P` order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &str)> + '_ {
        Section::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// True when no section has any content.
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, text)| text.is_empty())
    }
}

/// Trims surrounding whitespace, counting the ASCII information separators (U+001C to U+001F)
/// as whitespace so exported reference notes split the same way they were produced.
fn trim_note_whitespace(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

/// Parses an optional note. `None` yields the all-empty note.
pub fn parse_note(note: Option<&str>) -> ParsedNote {
    note.map(ParsedNote::parse).unwrap_or_default()
}

/// Parses a raw JSON value. Only strings are treated as notes; `null`, numbers, arrays and
/// objects all yield the all-empty note.
pub fn parse_value(value: &serde_json::Value) -> ParsedNote {
    parse_note(value.as_str())
}
