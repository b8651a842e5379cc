//! Locale repair: splice a duplicated block out of a localization file.
//!
//! A bad merge left `common.json` with a second copy of part of the
//! `stellaPlatform` section wedged between the real end of that section and
//! the top-level `auth` section. The backup copy is the input; the repair
//! keeps everything up to the close of `stellaPlatform` and resumes at the
//! top-level `auth` key:
//!
//! ```text
//!   …"footer": "Constellation Platform · …"     ← footer marker
//!     }                                          ← "\n    }"
//!   },                                           ← "\n  },"   keep up to here
//!     …duplicated block…                         ← removed
//!   "auth": {                                    ← "\n  \"auth\": {"  resume here
//! ```
//!
//! The spliced text must parse as JSON and contain the anchor exactly once,
//! otherwise nothing is written.

use crate::config::{resolve_path, LocaleRepairConfig};
use crate::error::SiteFixError;
use crate::files::{read_text, write_atomic};
use crate::output::{LocaleRepairReport, TextStats};
use std::path::Path;
use tracing::{debug, info};

/// Closing brace of the object holding the footer (4-space indent).
const INNER_CLOSE: &str = "\n    }";

/// Closing brace of the top-level section (2-space indent, trailing comma).
const SECTION_CLOSE: &str = "\n  },";

/// Indent of top-level keys.
const TOP_LEVEL_INDENT: &str = "\n  ";

/// Outcome of [`splice_duplicate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    pub content: String,
    /// Byte span of the input that was dropped.
    pub removed: (usize, usize),
}

fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack.get(from..)?.find(needle).map(|i| i + from)
}

/// Cut the duplicated block out of `content`.
///
/// Marker errors name `config.source` so the message points at the file the
/// caller was repairing.
pub fn splice_duplicate(
    content: &str,
    config: &LocaleRepairConfig,
) -> Result<Splice, SiteFixError> {
    let missing = |what: &'static str, marker: &str| SiteFixError::MarkerNotFound {
        path: config.source.clone(),
        what,
        marker: marker.to_string(),
    };

    if !content.contains(config.anchor.as_str()) {
        return Err(missing("auth section", &config.anchor));
    }

    let footer_pos = content
        .find(config.footer_marker.as_str())
        .ok_or_else(|| missing("target footer text", &config.footer_marker))?;

    let inner_close = find_from(content, INNER_CLOSE, footer_pos)
        .ok_or_else(|| missing("closing brace after the footer", INNER_CLOSE))?;

    let section_end = find_from(content, SECTION_CLOSE, inner_close)
        .ok_or_else(|| missing("end of the section holding the footer", SECTION_CLOSE))?;
    let keep_end = section_end + SECTION_CLOSE.len();

    let resume_marker = format!("{TOP_LEVEL_INDENT}{}", config.anchor);
    let resume = find_from(content, &resume_marker, keep_end)
        .ok_or_else(|| missing("top-level auth section after the duplicate", &config.anchor))?;

    debug!(
        "Splicing: keep ..{}, drop {}..{}, resume at {}",
        keep_end, keep_end, resume, resume
    );

    let mut fixed = String::with_capacity(content.len() - (resume - keep_end));
    fixed.push_str(&content[..keep_end]);
    fixed.push_str(&content[resume..]);

    Ok(Splice {
        content: fixed,
        removed: (keep_end, resume),
    })
}

/// Parse `content` and check the anchor occurs exactly once.
///
/// Returns the number of top-level keys.
pub fn validate(content: &str, anchor: &str) -> Result<usize, SiteFixError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| SiteFixError::InvalidJson {
            line: e.line(),
            column: e.column(),
            detail: e.to_string(),
        })?;

    let found = content.matches(anchor).count();
    if found != 1 {
        return Err(SiteFixError::DuplicateSection {
            anchor: anchor.to_string(),
            found,
        });
    }

    Ok(value.as_object().map_or(0, |o| o.len()))
}

/// Repair the locale file described by `config`, relative to `root`.
///
/// # Errors
/// - `FileNotFound` when the backup is missing
/// - `MarkerNotFound` when any splice marker is absent
/// - `InvalidJson` / `DuplicateSection` when the result fails validation;
///   the target is left untouched in that case
pub fn repair_locale(
    root: &Path,
    config: &LocaleRepairConfig,
) -> Result<LocaleRepairReport, SiteFixError> {
    let source = resolve_path(root, &config.source);
    let target = resolve_path(root, &config.target);
    info!("Repairing locale file from {}", source.display());

    let original = read_text(&source)?;
    let splice = splice_duplicate(&original, config)?;
    let top_level_keys = validate(&splice.content, &config.anchor)?;

    info!(
        "Removed {} bytes of duplicated content; {} top-level keys remain",
        splice.removed.1 - splice.removed.0,
        top_level_keys
    );

    let written = if config.dry_run {
        info!("Dry run: {} not written", target.display());
        false
    } else {
        write_atomic(&target, splice.content.as_bytes())?;
        info!("Wrote {}", target.display());
        true
    };

    Ok(LocaleRepairReport {
        stats: TextStats::between(&original, &splice.content),
        source,
        target,
        removed_range: splice.removed,
        top_level_keys,
        written,
    })
}
