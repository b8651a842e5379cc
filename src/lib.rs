//! # sitefix
//!
//! One-shot maintenance procedures for the marketing site's content and
//! assets, packaged as a library and the `sitefix` binary.
//!
//! ## Procedures
//!
//! ```text
//! site root
//!  │
//!  ├─ repair-locale   splice the duplicated block out of common.json.backup
//!  ├─ edit-markup     regex section removals + phase rollout block
//!  ├─ reorder-lines   move the Pricing section ahead of Founding 100
//!  └─ og-image        brand / gradient / wordmark 1200×630 PNGs
//! ```
//!
//! Each procedure reads hard-wired paths relative to the site root (all of
//! them overridable), works wholly in memory, validates, and only then
//! writes. Every default reproduces the run the procedure was written for.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sitefix::{repair_locale, render_preset, LocaleRepairConfig, OgConfig, OgPreset};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let root = Path::new(".");
//!
//!     let report = repair_locale(root, &LocaleRepairConfig::default())?;
//!     eprintln!("{} top-level keys", report.top_level_keys);
//!
//!     let og = OgConfig::builder(OgPreset::Gradient).build()?;
//!     let image = render_preset(root, &og)?;
//!     eprintln!("{} ({}x{})", image.output.display(), image.width, image.height);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `sitefix` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
mod files;
pub mod og;
pub mod output;
pub mod text;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    LineRange, LocaleRepairConfig, MarkupConfig, OgConfig, OgPreset, ReorderConfig,
};
pub use error::SiteFixError;
pub use og::render_preset;
pub use output::{
    EditOutcome, LocaleRepairReport, MarkupReport, OgReport, ReorderReport, TextStats,
};
pub use text::locale::repair_locale;
pub use text::markup::{apply_plan, load_plan, MarkupEdit};
pub use text::reorder::reorder_lines;
