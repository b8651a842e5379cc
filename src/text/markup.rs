//! Markup surgery: ordered regex edits applied to one page file.
//!
//! Each [`MarkupEdit`] replaces every match of its pattern with a literal
//! string. Patterns run with `.` matching newlines. The `regex` crate has no
//! lookahead, so trailing context that must survive the edit is captured in
//! a group named `keep` and appended after the replacement, e.g.
//!
//! ```text
//! \s*\{/\* Why Stella \*/\}.*?</div>\s*</div>\s*(?P<keep>\s*</div>\s*</section>)
//! ```
//!
//! removes the "Why Stella" block but leaves the closing `</div></section>`
//! in place.

use crate::config::{resolve_path, MarkupConfig};
use crate::error::SiteFixError;
use crate::files::{read_text, write_atomic};
use crate::output::{EditOutcome, MarkupReport, TextStats};
use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the capture group re-emitted after the replacement.
pub const KEEP_GROUP: &str = "keep";

/// Compact single-column phase layout that replaces "Pending Services".
pub const PHASE_ROLLOUT_BLOCK: &str = include_str!("phase_rollout.tsx");

/// One regex edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupEdit {
    /// Human-readable name used in logs and reports.
    pub label: String,
    /// Pattern in `regex` syntax; `.` matches newlines.
    pub pattern: String,
    /// Literal text substituted for each match (no `$` expansion).
    #[serde(default)]
    pub replacement: String,
}

impl MarkupEdit {
    pub fn new(
        label: impl Into<String>,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    fn compile(&self) -> Result<Regex, SiteFixError> {
        RegexBuilder::new(&self.pattern)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| SiteFixError::InvalidRegex {
                label: self.label.clone(),
                detail: e.to_string(),
            })
    }
}

static PLATFORM_PAGE_EDITS: Lazy<Vec<MarkupEdit>> = Lazy::new(|| {
    vec![
        MarkupEdit::new(
            "Remove Core Features (AI & Social Proof boxes)",
            r"\s*\{/\* Core Features \*/\}.*?</div>\s*</div>\s*(?P<keep>\s*\{/\* 8 User Types Grid \*/\})",
            "\n",
        ),
        MarkupEdit::new(
            "Remove 8 User Types Grid",
            r"\s*\{/\* 8 User Types Grid \*/\}.*?</div>\s*</div>\s*(?P<keep>\s*\{/\* Pending Services \*/\})",
            "\n",
        ),
        MarkupEdit::new(
            "Remove Why Stella section",
            r"\s*\{/\* Why Stella \*/\}.*?</div>\s*</div>\s*(?P<keep>\s*</div>\s*</section>)",
            "\n",
        ),
        MarkupEdit::new(
            "Remove Seguro Fiança section",
            r"\s*\{/\* Seguro Fiança Section \*/\}.*?</section>\s*(?P<keep>\s*\{/\* Ecosystem CTA \*/\})",
            "\n",
        ),
        MarkupEdit::new(
            "Replace Pending Services with compact phase rollout",
            r"\{/\* Pending Services \*/\}.*?(?P<keep>\s*\{/\* Why Stella \*/\}|\s*</div>\s*</div>\s*</section>)",
            PHASE_ROLLOUT_BLOCK,
        ),
    ]
});

/// The platform-page plan: drop four sections, then swap the
/// "Pending Services" grid for the phase rollout list.
pub fn platform_page_edits() -> Vec<MarkupEdit> {
    PLATFORM_PAGE_EDITS.clone()
}

/// Apply `edits` to `content` in order.
///
/// Returns the rewritten text plus one [`EditOutcome`] per edit. Zero-match
/// edits are reported, not rejected; callers decide whether that is fatal.
pub fn apply_edits(
    content: &str,
    edits: &[MarkupEdit],
) -> Result<(String, Vec<EditOutcome>), SiteFixError> {
    let mut text = content.to_string();
    let mut outcomes = Vec::with_capacity(edits.len());

    for edit in edits {
        let re = edit.compile()?;
        let mut matches = 0usize;
        let before = text.len();

        let replaced = re.replace_all(&text, |caps: &Captures<'_>| {
            matches += 1;
            let mut out = edit.replacement.clone();
            if let Some(keep) = caps.name(KEEP_GROUP) {
                out.push_str(keep.as_str());
            }
            out
        });
        let replaced = replaced.into_owned();

        let byte_delta = replaced.len() as isize - before as isize;
        debug!(
            "Edit '{}': {} match(es), {:+} bytes",
            edit.label, matches, byte_delta
        );

        text = replaced;
        outcomes.push(EditOutcome {
            label: edit.label.clone(),
            matches,
            byte_delta,
        });
    }

    Ok((text, outcomes))
}

/// On-disk form of a plan for `--plan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    /// Overrides the config target when present.
    #[serde(default)]
    pub target: Option<PathBuf>,
    pub edits: Vec<MarkupEdit>,
}

/// Load a JSON plan file.
pub fn load_plan(path: &Path) -> Result<PlanFile, SiteFixError> {
    let raw = read_text(path)?;
    let plan: PlanFile = serde_json::from_str(&raw).map_err(|e| SiteFixError::InvalidPlan {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    if plan.edits.is_empty() {
        return Err(SiteFixError::InvalidPlan {
            path: path.to_path_buf(),
            detail: "plan has no edits".into(),
        });
    }
    // Surface bad patterns before any file is touched.
    for edit in &plan.edits {
        edit.compile()?;
    }
    Ok(plan)
}

/// Run the edit plan in `config` against its target under `root`.
///
/// # Errors
/// - `FileNotFound` if the target is missing
/// - `InvalidRegex` if a pattern does not compile
/// - `EditDidNotMatch` in strict mode when an edit matches nothing; the file
///   is not written
pub fn apply_plan(root: &Path, config: &MarkupConfig) -> Result<MarkupReport, SiteFixError> {
    let target = resolve_path(root, &config.target);
    let original = read_text(&target)?;
    info!(
        "Starting markup surgery on {}: {} characters, {} lines",
        target.display(),
        original.chars().count(),
        original.lines().count()
    );

    let (rewritten, outcomes) = apply_edits(&original, &config.edits)?;

    for (i, outcome) in outcomes.iter().enumerate() {
        if outcome.matches == 0 {
            if config.strict {
                return Err(SiteFixError::EditDidNotMatch {
                    label: outcome.label.clone(),
                    path: target,
                });
            }
            warn!("{}. {}: no match, left unchanged", i + 1, outcome.label);
        } else {
            info!("{}. {}", i + 1, outcome.label);
        }
    }

    info!(
        "Final length: {} characters, {} lines",
        rewritten.chars().count(),
        rewritten.lines().count()
    );

    let written = if config.dry_run {
        info!("Dry run: {} not written", target.display());
        false
    } else {
        write_atomic(&target, rewritten.as_bytes())?;
        true
    };

    Ok(MarkupReport {
        stats: TextStats::between(&original, &rewritten),
        target,
        edits: outcomes,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<section>
        <div>
          {/* Core Features */}
          <div className="grid">
            <div>AI</div>
          </div>
          </div>

          {/* 8 User Types Grid */}
          <div className="types">
            <span>Realtor</span>
          </div>
          </div>

          {/* Pending Services */}
          <div className="pending">
            <p>old grid</p>
          </div>

          {/* Why Stella */}
          <div className="why">
            <p>because</p>
          </div>
          </div>
        </div>
      </section>

      {/* Seguro Fiança Section */}
      <section className="seguro">
        <p>insurance</p>
      </section>

      {/* Ecosystem CTA */}
      <section>cta</section>
"#;

    #[test]
    fn all_default_patterns_compile() {
        for edit in platform_page_edits() {
            edit.compile().unwrap();
        }
    }

    #[test]
    fn platform_plan_rewrites_page() {
        let (out, outcomes) = apply_edits(PAGE, &platform_page_edits()).unwrap();

        assert!(outcomes.iter().all(|o| o.matches == 1), "{outcomes:?}");
        assert!(!out.contains("Core Features"));
        assert!(!out.contains("8 User Types Grid"));
        assert!(!out.contains("Why Stella"));
        assert!(!out.contains("Seguro"));
        assert!(!out.contains("Pending Services"));
        assert!(!out.contains("old grid"));
        assert!(out.contains("{/* Phase Rollout */}"));
        assert!(out.contains("{/* Ecosystem CTA */}"));
        assert!(out.trim_end().ends_with("<section>cta</section>"));
    }

    #[test]
    fn keep_group_is_preserved() {
        let edits = vec![MarkupEdit::new(
            "drop a",
            r"A+(?P<keep>B)",
            "-",
        )];
        let (out, outcomes) = apply_edits("xAAABy AB", &edits).unwrap();
        assert_eq!(out, "x-By -B");
        assert_eq!(outcomes[0].matches, 2);
        assert_eq!(outcomes[0].byte_delta, -2);
    }

    #[test]
    fn replacement_is_literal() {
        let edits = vec![MarkupEdit::new("dollar", r"color", "${color}")];
        let (out, _) = apply_edits("text-color", &edits).unwrap();
        assert_eq!(out, "text-${color}");
    }

    #[test]
    fn unmatched_edit_reports_zero() {
        let edits = vec![MarkupEdit::new("absent", r"\{/\* Nope \*/\}", "")];
        let (out, outcomes) = apply_edits(PAGE, &edits).unwrap();
        assert_eq!(out, PAGE);
        assert_eq!(outcomes[0].matches, 0);
    }

    #[test]
    fn invalid_pattern_is_named() {
        let edits = vec![MarkupEdit::new("broken", r"(unclosed", "")];
        let err = apply_edits("x", &edits).unwrap_err();
        match err {
            SiteFixError::InvalidRegex { label, .. } => assert_eq!(label, "broken"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn phase_block_is_self_contained() {
        assert!(PHASE_ROLLOUT_BLOCK.starts_with("          {/* Phase Rollout */}"));
        assert!(PHASE_ROLLOUT_BLOCK.ends_with("</div>\n"));
        assert_eq!(
            PHASE_ROLLOUT_BLOCK.matches("<div").count(),
            PHASE_ROLLOUT_BLOCK.matches("</div>").count()
        );
    }
}
