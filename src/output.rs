//! Reports returned by each procedure.
//!
//! Reports are plain serialisable data so the CLI can print them either as
//! human-readable summaries or, with `--json`, as a machine-readable record
//! of what a one-shot run actually did.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Byte and line counts of a text file before and after a procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    pub bytes_before: usize,
    pub bytes_after: usize,
    pub lines_before: usize,
    pub lines_after: usize,
}

impl TextStats {
    pub fn between(before: &str, after: &str) -> Self {
        Self {
            bytes_before: before.len(),
            bytes_after: after.len(),
            lines_before: before.lines().count(),
            lines_after: after.lines().count(),
        }
    }
}

/// Result of [`crate::text::locale::repair_locale`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleRepairReport {
    pub source: PathBuf,
    pub target: PathBuf,
    /// Byte span of the original text that was cut out.
    pub removed_range: (usize, usize),
    /// Number of top-level keys in the repaired document.
    pub top_level_keys: usize,
    pub stats: TextStats,
    pub written: bool,
}

/// Per-edit outcome within a [`MarkupReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutcome {
    pub label: String,
    pub matches: usize,
    /// Signed byte delta the edit introduced.
    pub byte_delta: isize,
}

/// Result of [`crate::text::markup::apply_plan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupReport {
    pub target: PathBuf,
    pub edits: Vec<EditOutcome>,
    pub stats: TextStats,
    pub written: bool,
}

impl MarkupReport {
    /// Labels of edits that matched nothing.
    pub fn unmatched(&self) -> Vec<&str> {
        self.edits
            .iter()
            .filter(|e| e.matches == 0)
            .map(|e| e.label.as_str())
            .collect()
    }
}

/// Result of [`crate::text::reorder::reorder_lines`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderReport {
    pub target: PathBuf,
    /// Original numbering of the moved block, e.g. `"433-730"`.
    pub block: String,
    pub before_line: usize,
    /// First line of the block in the rewritten file.
    pub new_start: usize,
    pub stats: TextStats,
    pub written: bool,
}

/// Result of [`crate::og::render_preset`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OgReport {
    pub preset: String,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Logo file composited, or None for a text-only render.
    pub logo: Option<PathBuf>,
    /// Size the logo was drawn at.
    pub logo_size: Option<(u32, u32)>,
    /// Font used for text, `"builtin"` for the bitmap fallback.
    pub typeface: String,
    pub bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_stats_counts_lines() {
        let s = TextStats::between("a\nb\nc\n", "a\n");
        assert_eq!(s.lines_before, 3);
        assert_eq!(s.lines_after, 1);
        assert_eq!(s.bytes_before, 6);
    }

    #[test]
    fn unmatched_lists_zero_match_edits() {
        let r = MarkupReport {
            target: PathBuf::from("p.tsx"),
            edits: vec![
                EditOutcome {
                    label: "a".into(),
                    matches: 1,
                    byte_delta: -10,
                },
                EditOutcome {
                    label: "b".into(),
                    matches: 0,
                    byte_delta: 0,
                },
            ],
            stats: TextStats::default(),
            written: false,
        };
        assert_eq!(r.unmatched(), vec!["b"]);
    }
}
