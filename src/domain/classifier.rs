//! Outline line classification.
//!
//! Rules, first match wins:
//! 1. blank after trimming: skipped
//! 2. `<digits><ws><label>`: level 0, digits become the code
//! 3. dot run (`.`, `..`, `. . .`) then whitespace then label: level = dots + 1
//! 4. leading spaces without marker: level 1
//! 5. anything else: level 1
//!
//! Only space characters count as indentation. Tabs are trimmed from the text
//! but do not make a line `Indented`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::domain::entities::Entry;

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(.*)").expect("numbered marker pattern"));
static DOTTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^((\.\s*)+)\s+(.*)").expect("dotted marker pattern"));

/// Turns raw outline lines into [`Entry`] values.
///
/// Stateless; the marker patterns are compiled once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineClassifier;

impl LineClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one raw line. Returns `None` for blank lines.
    pub fn classify(&self, raw_line: &str) -> Option<Entry> {
        let unindented = raw_line.trim_start_matches(' ');
        // ' ' is one byte, so the byte difference is the space count
        let indent_width = raw_line.len() - unindented.len();
        let trimmed = unindented.trim();
        if trimmed.is_empty() {
            return None;
        }

        let entry = if let Some(caps) = NUMBERED_RE.captures(trimmed) {
            Entry::numbered(&caps[1], caps[2].trim())
        } else if let Some(caps) = DOTTED_RE.captures(trimmed) {
            let dots = caps[1].matches('.').count();
            Entry::dotted(dots, caps[3].trim())
        } else if indent_width > 0 {
            Entry::indented(indent_width, trimmed)
        } else {
            Entry::plain(trimmed)
        };

        trace!(level = entry.level, kind = ?entry.kind, label = %entry.label, "classified");
        Some(entry)
    }
}
