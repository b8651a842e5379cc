//! Configuration types for the maintenance procedures.
//!
//! Each procedure has one config struct whose [`Default`] reproduces the
//! historical one-shot run (exact marker strings, line numbers, asset paths),
//! plus a consuming builder with a validating `build()`. Relative paths are
//! resolved against the site root handed to the procedure, never against the
//! process working directory.

use crate::error::SiteFixError;
use crate::text::markup::{platform_page_edits, MarkupEdit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Join `path` onto `root` unless it is already absolute.
pub(crate) fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

// ── Locale repair ────────────────────────────────────────────────────────

/// Anchor key that must appear exactly once in the repaired locale file.
pub const DEFAULT_ANCHOR: &str = "\"auth\": {";

/// Last line of the section that precedes the duplicated block.
pub const DEFAULT_FOOTER_MARKER: &str =
    "\"footer\": \"Constellation Platform · Built for realtors with unreasonable ambition\"";

/// Configuration for [`crate::text::locale::repair_locale`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleRepairConfig {
    /// Backup file to read. Default: `src/locales/en/common.json.backup`.
    pub source: PathBuf,

    /// File to write. Default: `src/locales/en/common.json`.
    pub target: PathBuf,

    /// Key that opens the section kept after the splice. Default: `"auth": {`.
    pub anchor: String,

    /// Literal line that closes the last good section before the duplicate.
    pub footer_marker: String,

    /// Validate and report, but do not write. Default: false.
    pub dry_run: bool,
}

impl Default for LocaleRepairConfig {
    fn default() -> Self {
        Self {
            source: locale_path("en", true),
            target: locale_path("en", false),
            anchor: DEFAULT_ANCHOR.to_string(),
            footer_marker: DEFAULT_FOOTER_MARKER.to_string(),
            dry_run: false,
        }
    }
}

fn locale_path(locale: &str, backup: bool) -> PathBuf {
    let file = if backup {
        "common.json.backup"
    } else {
        "common.json"
    };
    PathBuf::from("src/locales").join(locale).join(file)
}

impl LocaleRepairConfig {
    /// Create a new builder for `LocaleRepairConfig`.
    pub fn builder() -> LocaleRepairConfigBuilder {
        LocaleRepairConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`LocaleRepairConfig`].
#[derive(Debug)]
pub struct LocaleRepairConfigBuilder {
    config: LocaleRepairConfig,
}

impl LocaleRepairConfigBuilder {
    /// Point both source and target at `src/locales/<locale>/`.
    pub fn locale(mut self, locale: &str) -> Self {
        self.config.source = locale_path(locale, true);
        self.config.target = locale_path(locale, false);
        self
    }

    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source = path.into();
        self
    }

    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.target = path.into();
        self
    }

    pub fn anchor(mut self, anchor: impl Into<String>) -> Self {
        self.config.anchor = anchor.into();
        self
    }

    pub fn footer_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.footer_marker = marker.into();
        self
    }

    pub fn dry_run(mut self, v: bool) -> Self {
        self.config.dry_run = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<LocaleRepairConfig, SiteFixError> {
        let c = &self.config;
        if c.anchor.trim().is_empty() {
            return Err(SiteFixError::InvalidConfig("anchor must not be empty".into()));
        }
        if c.footer_marker.trim().is_empty() {
            return Err(SiteFixError::InvalidConfig(
                "footer marker must not be empty".into(),
            ));
        }
        if c.source == c.target {
            return Err(SiteFixError::InvalidConfig(
                "source and target must differ; the backup is the only copy of the original"
                    .into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Markup surgery ───────────────────────────────────────────────────────

/// Page rewritten by the built-in markup plan.
pub const DEFAULT_MARKUP_TARGET: &str = "src/pages/StellaPlatform.tsx";

/// Configuration for [`crate::text::markup::apply_plan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupConfig {
    /// File rewritten in place. Default: `src/pages/StellaPlatform.tsx`.
    pub target: PathBuf,

    /// Edits applied in order. Default: the platform-page plan.
    pub edits: Vec<MarkupEdit>,

    /// Fail when any edit matches nothing. Default: false.
    ///
    /// Off by default because the historical run assumed every pattern
    /// matched; a miss is logged as a warning instead.
    pub strict: bool,

    /// Report match counts without writing. Default: false.
    pub dry_run: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from(DEFAULT_MARKUP_TARGET),
            edits: platform_page_edits(),
            strict: false,
            dry_run: false,
        }
    }
}

impl MarkupConfig {
    /// Create a new builder for `MarkupConfig`.
    pub fn builder() -> MarkupConfigBuilder {
        MarkupConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`MarkupConfig`].
#[derive(Debug)]
pub struct MarkupConfigBuilder {
    config: MarkupConfig,
}

impl MarkupConfigBuilder {
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.target = path.into();
        self
    }

    pub fn edits(mut self, edits: Vec<MarkupEdit>) -> Self {
        self.config.edits = edits;
        self
    }

    pub fn strict(mut self, v: bool) -> Self {
        self.config.strict = v;
        self
    }

    pub fn dry_run(mut self, v: bool) -> Self {
        self.config.dry_run = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<MarkupConfig, SiteFixError> {
        if self.config.edits.is_empty() {
            return Err(SiteFixError::InvalidConfig(
                "an edit plan needs at least one edit".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Line reordering ──────────────────────────────────────────────────────

/// Page whose sections the built-in reorder plan moves.
pub const DEFAULT_REORDER_TARGET: &str = "src/pages/Constellation.tsx";

/// A contiguous block of lines (1-indexed, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLineRange")]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Deserialize)]
struct RawLineRange {
    start: usize,
    end: usize,
}

impl TryFrom<RawLineRange> for LineRange {
    type Error = SiteFixError;

    fn try_from(raw: RawLineRange) -> Result<Self, Self::Error> {
        LineRange::new(raw.start, raw.end)
    }
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self, SiteFixError> {
        if start < 1 {
            return Err(SiteFixError::InvalidRange(format!(
                "lines are 1-indexed, minimum is 1 (got {start})"
            )));
        }
        if start > end {
            return Err(SiteFixError::InvalidRange(format!(
                "'{start}-{end}': start must be <= end"
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for LineRange {
    type Err = SiteFixError;

    /// Parse `"433-730"` or a single line `"12"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |p: &str| {
            p.trim()
                .parse::<usize>()
                .map_err(|_| SiteFixError::InvalidRange(format!("'{}' is not a line number", p.trim())))
        };
        match s.split_once('-') {
            Some((start, end)) => LineRange::new(parse(start)?, parse(end)?),
            None => {
                let line = parse(s)?;
                LineRange::new(line, line)
            }
        }
    }
}

/// Configuration for [`crate::text::reorder::reorder_lines`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderConfig {
    /// File rewritten in place. Default: `src/pages/Constellation.tsx`.
    pub target: PathBuf,

    /// Block to move. Default: lines 433–730 (the Pricing section).
    pub block: LineRange,

    /// The block ends up starting at this line of the original numbering.
    /// Default: 199 (the Founding 100 section).
    pub before_line: usize,

    /// Validate and report without writing. Default: false.
    pub dry_run: bool,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from(DEFAULT_REORDER_TARGET),
            block: LineRange {
                start: 433,
                end: 730,
            },
            before_line: 199,
            dry_run: false,
        }
    }
}

impl ReorderConfig {
    /// Create a new builder for `ReorderConfig`.
    pub fn builder() -> ReorderConfigBuilder {
        ReorderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ReorderConfig`].
#[derive(Debug)]
pub struct ReorderConfigBuilder {
    config: ReorderConfig,
}

impl ReorderConfigBuilder {
    pub fn target(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.target = path.into();
        self
    }

    pub fn block(mut self, block: LineRange) -> Self {
        self.config.block = block;
        self
    }

    pub fn before_line(mut self, line: usize) -> Self {
        self.config.before_line = line;
        self
    }

    pub fn dry_run(mut self, v: bool) -> Self {
        self.config.dry_run = v;
        self
    }

    /// Build the configuration, validating constraints that do not need the file.
    pub fn build(self) -> Result<ReorderConfig, SiteFixError> {
        let c = &self.config;
        if c.before_line < 1 {
            return Err(SiteFixError::InvalidRange(
                "destination line is 1-indexed, minimum is 1".into(),
            ));
        }
        if c.block.contains(c.before_line) && c.before_line != c.block.start {
            return Err(SiteFixError::InvalidRange(format!(
                "destination line {} falls inside the block {}",
                c.before_line, c.block
            )));
        }
        Ok(self.config)
    }
}

// ── OG images ────────────────────────────────────────────────────────────

/// Which of the three preview images to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OgPreset {
    /// Solid slate background with the centred brand logo. Requires the logo.
    #[default]
    Brand,
    /// Slate-to-indigo gradient, logo and subtitle; text-only without a logo.
    Gradient,
    /// Solid background, small logo, letter-spaced wordmark and tagline.
    Wordmark,
}

impl OgPreset {
    /// Logo asset each preset reads when none is given.
    pub fn default_logo(self) -> PathBuf {
        PathBuf::from(match self {
            OgPreset::Brand => "public/stella-logo-variation.png",
            OgPreset::Gradient => "public/contellation-logo.png",
            OgPreset::Wordmark => "public/tech-icons/contellation-logo.png",
        })
    }

    /// Output file each preset writes when none is given.
    pub fn default_output(self) -> PathBuf {
        PathBuf::from(match self {
            OgPreset::Brand => "public/stella-og-image.png",
            OgPreset::Gradient | OgPreset::Wordmark => "public/constellation-og-image.png",
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            OgPreset::Brand => "brand",
            OgPreset::Gradient => "gradient",
            OgPreset::Wordmark => "wordmark",
        }
    }
}

impl FromStr for OgPreset {
    type Err = SiteFixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brand" => Ok(OgPreset::Brand),
            "gradient" => Ok(OgPreset::Gradient),
            "wordmark" => Ok(OgPreset::Wordmark),
            other => Err(SiteFixError::InvalidConfig(format!(
                "unknown OG preset '{other}' (expected brand, gradient or wordmark)"
            ))),
        }
    }
}

/// Configuration for [`crate::og::render_preset`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OgConfig {
    pub preset: OgPreset,

    /// Logo override. If None, uses [`OgPreset::default_logo`].
    pub logo: Option<PathBuf>,

    /// Output override. If None, uses [`OgPreset::default_output`].
    pub output: Option<PathBuf>,

    /// Outline font file. If None, well-known system fonts are probed and the
    /// built-in bitmap font is the last resort.
    pub font: Option<PathBuf>,

    /// Headline override (text-only gradient title, wordmark text).
    pub title: Option<String>,

    /// Subtitle / tagline override.
    pub subtitle: Option<String>,
}

impl OgConfig {
    /// Create a new builder for `OgConfig`.
    pub fn builder(preset: OgPreset) -> OgConfigBuilder {
        OgConfigBuilder {
            config: Self {
                preset,
                ..Self::default()
            },
        }
    }

    pub fn logo_path(&self) -> PathBuf {
        self.logo
            .clone()
            .unwrap_or_else(|| self.preset.default_logo())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.preset.default_output())
    }
}

/// Builder for [`OgConfig`].
#[derive(Debug)]
pub struct OgConfigBuilder {
    config: OgConfig,
}

impl OgConfigBuilder {
    pub fn logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.logo = Some(path.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = Some(path.into());
        self
    }

    pub fn font(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font = Some(path.into());
        self
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.config.title = Some(text.into());
        self
    }

    pub fn subtitle(mut self, text: impl Into<String>) -> Self {
        self.config.subtitle = Some(text.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<OgConfig, SiteFixError> {
        if let Some(ref out) = self.config.output {
            let is_png = out
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            if !is_png {
                return Err(SiteFixError::InvalidConfig(format!(
                    "output must be a .png file, got {}",
                    out.display()
                )));
            }
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_builder_derives_paths() {
        let c = LocaleRepairConfig::builder().locale("pt").build().unwrap();
        assert_eq!(c.source, PathBuf::from("src/locales/pt/common.json.backup"));
        assert_eq!(c.target, PathBuf::from("src/locales/pt/common.json"));
    }

    #[test]
    fn locale_builder_rejects_same_source_and_target() {
        let r = LocaleRepairConfig::builder()
            .source("a.json")
            .target("a.json")
            .build();
        assert!(matches!(r, Err(SiteFixError::InvalidConfig(_))));
    }

    #[test]
    fn line_range_parses() {
        assert_eq!("433-730".parse::<LineRange>().unwrap(), LineRange { start: 433, end: 730 });
        assert_eq!(" 5 ".parse::<LineRange>().unwrap(), LineRange { start: 5, end: 5 });
        assert!("0-3".parse::<LineRange>().is_err());
        assert!("9-3".parse::<LineRange>().is_err());
        assert!("a-b".parse::<LineRange>().is_err());
    }

    #[test]
    fn line_range_deserialization_validates() {
        let ok: LineRange = serde_json::from_str(r#"{"start":433,"end":730}"#).unwrap();
        assert_eq!(ok, LineRange { start: 433, end: 730 });
        assert!(serde_json::from_str::<LineRange>(r#"{"start":0,"end":3}"#).is_err());

        let inverted = r#"{"target":"a.tsx","block":{"start":4,"end":2},"before_line":1,"dry_run":true}"#;
        assert!(serde_json::from_str::<ReorderConfig>(inverted).is_err());
    }

    #[test]
    fn reorder_rejects_destination_inside_block() {
        let r = ReorderConfig::builder()
            .block(LineRange::new(10, 20).unwrap())
            .before_line(15)
            .build();
        assert!(matches!(r, Err(SiteFixError::InvalidRange(_))));
    }

    #[test]
    fn reorder_defaults_match_pricing_move() {
        let c = ReorderConfig::default();
        assert_eq!(c.block.to_string(), "433-730");
        assert_eq!(c.block.len(), 298);
        assert_eq!(c.before_line, 199);
    }

    #[test]
    fn og_builder_rejects_non_png() {
        let r = OgConfig::builder(OgPreset::Brand).output("x.jpg").build();
        assert!(r.is_err());
    }

    #[test]
    fn og_preset_defaults() {
        assert_eq!(
            OgPreset::Brand.default_output(),
            PathBuf::from("public/stella-og-image.png")
        );
        assert_eq!("Wordmark".parse::<OgPreset>().unwrap(), OgPreset::Wordmark);
        assert!("poster".parse::<OgPreset>().is_err());
    }

    #[test]
    fn markup_builder_needs_edits() {
        assert!(MarkupConfig::builder().edits(vec![]).build().is_err());
        assert_eq!(MarkupConfig::default().edits.len(), 5);
    }
}
