//! Side-by-side comparison of the three parsed notes for one index.
//!
//! Rendering shows section text verbatim; the only additions are headings and source labels.

use crate::notes::NoteSource;
use crate::soap::{ParsedNote, Section};
use serde::Serialize;
use std::fmt::Write;

/// Page title for the comparator.
pub const COMPARATOR_TITLE: &str = "SOAP Note Comparator (3-Way: LED vs OpenAI vs Ground Truth)";

/// Human-readable section names.
const SECTION_LABELS: [(Section, &str); 4] = [
    (Section::Subjective, "Subjective"),
    (Section::Objective, "Objective"),
    (Section::Assessment, "Assessment"),
    (Section::Plan, "Plan"),
];

pub fn section_label(section: Section) -> &'static str {
    SECTION_LABELS
        .iter()
        .find(|(s, _)| *s == section)
        .map(|(_, label)| *label)
        .unwrap_or_default()
}

/// Label used when listing selectable notes.
pub fn note_label(index: usize) -> String {
    format!("Note {}", index)
}

/// The LED, OpenAI and ground-truth notes at one index, parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteComparison {
    pub index: usize,
    pub led: ParsedNote,
    pub openai: ParsedNote,
    pub ground_truth: ParsedNote,
}

impl NoteComparison {
    pub fn note(&self, source: NoteSource) -> &ParsedNote {
        match source {
            NoteSource::Led => &self.led,
            NoteSource::OpenAi => &self.openai,
            NoteSource::GroundTruth => &self.ground_truth,
        }
    }

    /// Text of `section` from each source, in display order.
    pub fn section(&self, section: Section) -> [(NoteSource, &str); 3] {
        NoteSource::ALL.map(|source| (source, self.note(source).get(section)))
    }

    /// Renders the comparison as plain text.
    ///
    /// An empty `sections` filter renders all four sections.
    pub fn render_text(&self, sections: &[Section]) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        self.write_text(&mut out, sections).ok();
        out
    }

    fn write_text(&self, out: &mut String, sections: &[Section]) -> std::fmt::Result {
        writeln!(out, "Comparison for Note {}", self.index)?;

        for section in Section::ALL {
            if !sections.is_empty() && !sections.contains(&section) {
                continue;
            }

            writeln!(out)?;
            writeln!(out, "## {}: {}", section.code(), section_label(section))?;
            for (source, text) in self.section(section) {
                writeln!(out)?;
                writeln!(out, "**{}**", source.label())?;
                writeln!(out, "{}", text)?;
            }
        }

        Ok(())
    }
}
