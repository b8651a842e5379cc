//! CLI binary for sitefix.
//!
//! A thin shim over the library crate that maps subcommands and flags onto
//! the config builders and prints the returned reports.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use sitefix::{
    apply_plan, load_plan, render_preset, reorder_lines, repair_locale, LineRange,
    LocaleRepairConfig, MarkupConfig, OgConfig, OgPreset, ReorderConfig,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Rebuild src/locales/en/common.json from its backup
  sitefix repair-locale

  # Same for another locale, checking only
  sitefix repair-locale --locale pt --dry-run

  # Strip the retired sections from the platform page
  sitefix edit-markup --strict

  # Apply a custom edit plan
  sitefix edit-markup --plan edits.json --target src/pages/Home.tsx

  # Move Pricing (lines 433-730) ahead of Founding 100 (line 199)
  sitefix reorder-lines

  # Render all preview images
  sitefix og-image brand
  sitefix og-image gradient
  sitefix og-image wordmark --font /usr/share/fonts/TTF/Inter-Regular.ttf

PLAN FILE FORMAT (--plan):
  {
    "target": "src/pages/StellaPlatform.tsx",
    "edits": [
      { "label": "Drop banner",
        "pattern": "\\s*\\{/\\* Banner \\*/\\}.*?</div>(?P<keep>\\s*</section>)",
        "replacement": "\n" }
    ]
  }
  Patterns use Rust regex syntax with `.` matching newlines. Text captured
  in the group named `keep` is re-emitted after the replacement.

ENVIRONMENT VARIABLES:
  SITEFIX_ROOT     Site root (default: current directory)
  SITEFIX_FONT     Outline font for og-image text
  RUST_LOG         Override log filter (e.g. sitefix=debug)
"#;

/// One-shot maintenance procedures for the marketing site.
#[derive(Parser, Debug)]
#[command(
    name = "sitefix",
    version,
    about = "One-shot maintenance procedures for the marketing site",
    long_about = "Repairs the duplicated locale section, performs the platform-page markup \
surgery, reorders page sections by line range, and renders the 1200x630 Open-Graph preview \
images. Every default reproduces the original one-time fix; flags override paths and markers.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Site root that relative paths resolve against.
    #[arg(long, global = true, env = "SITEFIX_ROOT", default_value = ".")]
    root: PathBuf,

    /// Print the report as JSON on stdout.
    #[arg(long, global = true, env = "SITEFIX_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "SITEFIX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "SITEFIX_QUIET")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Splice the duplicated section out of a locale JSON backup.
    RepairLocale {
        /// Locale directory under src/locales/.
        #[arg(long, default_value = "en")]
        locale: String,

        /// Backup file to read (overrides --locale).
        #[arg(long)]
        source: Option<PathBuf>,

        /// File to write (overrides --locale).
        #[arg(long)]
        target: Option<PathBuf>,

        /// Key that must remain exactly once.
        #[arg(long)]
        anchor: Option<String>,

        /// Literal line closing the last good section.
        #[arg(long)]
        footer_marker: Option<String>,

        /// Validate without writing.
        #[arg(long)]
        dry_run: bool,
    },

    /// Apply the regex edit plan to a page file.
    EditMarkup {
        /// Page file to rewrite.
        #[arg(long)]
        target: Option<PathBuf>,

        /// JSON plan file replacing the built-in platform-page plan.
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Fail if any edit matches nothing.
        #[arg(long)]
        strict: bool,

        /// Report matches without writing.
        #[arg(long)]
        dry_run: bool,
    },

    /// Move a block of lines to a new position.
    ReorderLines {
        /// File to rewrite.
        #[arg(long)]
        target: Option<PathBuf>,

        /// Block to move: 433-730.
        #[arg(long, value_parser = parse_range)]
        block: Option<LineRange>,

        /// Line (original numbering) the block should start at.
        #[arg(long)]
        before: Option<usize>,

        /// Validate without writing.
        #[arg(long)]
        dry_run: bool,
    },

    /// Render a 1200x630 Open-Graph preview PNG.
    OgImage {
        /// Layout: brand, gradient or wordmark.
        #[arg(value_enum)]
        preset: PresetArg,

        /// Logo image to composite.
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Output PNG path.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Outline font (TTF/OTF/TTC) for text.
        #[arg(long, env = "SITEFIX_FONT")]
        font: Option<PathBuf>,

        /// Headline text.
        #[arg(long)]
        title: Option<String>,

        /// Subtitle / tagline text.
        #[arg(long)]
        subtitle: Option<String>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    Brand,
    Gradient,
    Wordmark,
}

impl From<PresetArg> for OgPreset {
    fn from(v: PresetArg) -> Self {
        match v {
            PresetArg::Brand => OgPreset::Brand,
            PresetArg::Gradient => OgPreset::Gradient,
            PresetArg::Wordmark => OgPreset::Wordmark,
        }
    }
}

fn parse_range(s: &str) -> Result<LineRange, String> {
    s.parse::<LineRange>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let root = cli.root.as_path();

    match cli.command {
        Command::RepairLocale {
            ref locale,
            ref source,
            ref target,
            ref anchor,
            ref footer_marker,
            dry_run,
        } => {
            let mut builder = LocaleRepairConfig::builder().locale(locale).dry_run(dry_run);
            if let Some(p) = source {
                builder = builder.source(p);
            }
            if let Some(p) = target {
                builder = builder.target(p);
            }
            if let Some(a) = anchor {
                builder = builder.anchor(a);
            }
            if let Some(m) = footer_marker {
                builder = builder.footer_marker(m);
            }
            let config = builder.build().context("Invalid configuration")?;

            let report = repair_locale(root, &config).context("Locale repair failed")?;
            emit(&cli, &report, || {
                eprintln!(
                    "{} {} locale file {}",
                    green("✔"),
                    if report.written { "Fixed" } else { "Validated" },
                    bold(&report.target.display().to_string())
                );
                eprintln!(
                    "   removed bytes {}..{}  {}",
                    report.removed_range.0,
                    report.removed_range.1,
                    dim(&format!(
                        "{} → {} lines, {} top-level keys",
                        report.stats.lines_before,
                        report.stats.lines_after,
                        report.top_level_keys
                    ))
                );
            })
        }

        Command::EditMarkup {
            ref target,
            ref plan,
            strict,
            dry_run,
        } => {
            let mut builder = MarkupConfig::builder().strict(strict).dry_run(dry_run);
            if let Some(p) = plan {
                let plan_path = resolve(root, p);
                let plan = load_plan(&plan_path)
                    .with_context(|| format!("Failed to load plan {}", plan_path.display()))?;
                if let Some(t) = plan.target {
                    builder = builder.target(t);
                }
                builder = builder.edits(plan.edits);
            }
            if let Some(t) = target {
                builder = builder.target(t);
            }
            let config = builder.build().context("Invalid configuration")?;

            let report = apply_plan(root, &config).context("Markup surgery failed")?;
            emit(&cli, &report, || {
                for (i, edit) in report.edits.iter().enumerate() {
                    let mark = if edit.matches == 0 {
                        yellow("⚠")
                    } else {
                        green("✓")
                    };
                    eprintln!(
                        "  {} {}. {}  {}",
                        mark,
                        i + 1,
                        edit.label,
                        dim(&format!("{} match(es), {:+} bytes", edit.matches, edit.byte_delta))
                    );
                }
                eprintln!(
                    "{} {} {}  {}",
                    green("✔"),
                    if report.written { "Rewrote" } else { "Checked" },
                    bold(&report.target.display().to_string()),
                    dim(&format!(
                        "{} → {} lines",
                        report.stats.lines_before, report.stats.lines_after
                    ))
                );
            })
        }

        Command::ReorderLines {
            ref target,
            block,
            before,
            dry_run,
        } => {
            let mut builder = ReorderConfig::builder().dry_run(dry_run);
            if let Some(t) = target {
                builder = builder.target(t);
            }
            if let Some(b) = block {
                builder = builder.block(b);
            }
            if let Some(line) = before {
                builder = builder.before_line(line);
            }
            let config = builder.build().context("Invalid configuration")?;

            let report = reorder_lines(root, &config).context("Line reordering failed")?;
            emit(&cli, &report, || {
                eprintln!(
                    "{} {} lines {} → now start at line {} in {}",
                    green("✔"),
                    if report.written { "Moved" } else { "Would move" },
                    report.block,
                    report.new_start,
                    bold(&report.target.display().to_string())
                );
            })
        }

        Command::OgImage {
            preset,
            ref logo,
            ref output,
            ref font,
            ref title,
            ref subtitle,
        } => {
            let mut builder = OgConfig::builder(preset.into());
            if let Some(p) = logo {
                builder = builder.logo(p);
            }
            if let Some(p) = output {
                builder = builder.output(p);
            }
            if let Some(p) = font {
                builder = builder.font(p);
            }
            if let Some(t) = title {
                builder = builder.title(t);
            }
            if let Some(s) = subtitle {
                builder = builder.subtitle(s);
            }
            let config = builder.build().context("Invalid configuration")?;

            let report = render_preset(root, &config).context("OG image rendering failed")?;
            emit(&cli, &report, || {
                eprintln!(
                    "{} Created {}",
                    green("✔"),
                    bold(&report.output.display().to_string())
                );
                eprintln!("   Size: {}x{}", report.width, report.height);
                match report.logo_size {
                    Some((w, h)) => eprintln!("   Logo: {}x{}", w, h),
                    None => eprintln!("   Logo: {}", yellow("none (text only)")),
                }
                eprintln!("   Font: {}", dim(&report.typeface));
            })
        }
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Print `report` as JSON, or run `human` unless quiet.
fn emit<T: Serialize>(cli: &Cli, report: &T, human: impl FnOnce()) -> Result<()> {
    if cli.json {
        let json = serde_json::to_string_pretty(report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !cli.quiet {
        human();
    }
    Ok(())
}
