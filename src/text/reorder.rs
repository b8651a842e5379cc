//! Line reordering: move a block of lines to a new position in a file.
//!
//! The built-in plan moves the Pricing section of `Constellation.tsx`
//! (lines 433–730) up so that it starts where the Founding 100 section
//! started (line 199):
//!
//! ```text
//! before:  [1..198] [199..432] [433..730] [731..]
//! after:   [1..198] [433..730] [199..432] [731..]
//! ```
//!
//! Line numbers refer to the file as it is read. Terminators are kept
//! byte-for-byte, and the line count never changes.

use crate::config::{resolve_path, LineRange, ReorderConfig};
use crate::error::SiteFixError;
use crate::files::{read_text, write_atomic};
use crate::output::{ReorderReport, TextStats};
use std::path::Path;
use tracing::{debug, info};

/// Result of [`reorder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reordered {
    pub content: String,
    /// 1-indexed line where the block now starts.
    pub new_start: usize,
}

/// Move `block` so it starts at `before_line` (original numbering).
///
/// `before_line` may be anywhere from 1 to one past the last line, except
/// strictly inside the block. Moving onto the block's own start (or just
/// past its end) is a no-op.
pub fn reorder(
    content: &str,
    block: LineRange,
    before_line: usize,
) -> Result<Reordered, SiteFixError> {
    // Struct literals bypass `LineRange::new`.
    let block = LineRange::new(block.start, block.end)?;
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let total = lines.len();

    if block.end > total {
        return Err(SiteFixError::LineOutOfRange {
            line: block.end,
            total,
        });
    }
    if before_line < 1 || before_line > total + 1 {
        return Err(SiteFixError::LineOutOfRange {
            line: before_line,
            total,
        });
    }
    if before_line > block.start && before_line <= block.end {
        return Err(SiteFixError::InvalidRange(format!(
            "destination line {before_line} falls inside the block {block}"
        )));
    }

    let (s, e, b) = (block.start - 1, block.end, before_line - 1);
    let (order, new_start): (Vec<&[&str]>, usize) = if b <= s {
        (
            vec![&lines[..b], &lines[s..e], &lines[b..s], &lines[e..]],
            before_line,
        )
    } else {
        (
            vec![&lines[..s], &lines[e..b], &lines[s..e], &lines[b..]],
            before_line - block.len(),
        )
    };

    let terminator = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let ordered: Vec<&str> = order.into_iter().flatten().copied().collect();

    let mut out = String::with_capacity(content.len() + terminator.len());
    for (i, line) in ordered.iter().enumerate() {
        out.push_str(line);
        // Only the original last line can lack a terminator; if it moved,
        // give it one so it does not merge with its new successor.
        if i + 1 < ordered.len() && !line.ends_with('\n') {
            out.push_str(terminator);
        }
    }

    debug!(
        "Moved lines {} ({} lines) to start at line {}",
        block,
        block.len(),
        new_start
    );

    Ok(Reordered {
        content: out,
        new_start,
    })
}

/// Apply the reorder plan in `config` to its target under `root`.
pub fn reorder_lines(root: &Path, config: &ReorderConfig) -> Result<ReorderReport, SiteFixError> {
    let target = resolve_path(root, &config.target);
    let original = read_text(&target)?;
    info!(
        "Reordering {}: moving lines {} before line {}",
        target.display(),
        config.block,
        config.before_line
    );

    let reordered = reorder(&original, config.block, config.before_line)?;
    let stats = TextStats::between(&original, &reordered.content);
    debug_assert_eq!(stats.lines_before, stats.lines_after);

    let written = if config.dry_run {
        info!("Dry run: {} not written", target.display());
        false
    } else {
        write_atomic(&target, reordered.content.as_bytes())?;
        info!(
            "Moved block from line {} to line {}",
            config.block.start, reordered.new_start
        );
        true
    };

    Ok(ReorderReport {
        target,
        block: config.block.to_string(),
        before_line: config.before_line,
        new_start: reordered.new_start,
        stats,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (1..=n).map(|i| format!("{i}\n")).collect()
    }

    fn range(s: usize, e: usize) -> LineRange {
        LineRange::new(s, e).unwrap()
    }

    #[test]
    fn moves_block_backward() {
        let out = reorder(&numbered(6), range(4, 5), 2).unwrap();
        assert_eq!(out.content, "1\n4\n5\n2\n3\n6\n");
        assert_eq!(out.new_start, 2);
    }

    #[test]
    fn moves_block_forward() {
        let out = reorder(&numbered(6), range(2, 3), 6).unwrap();
        assert_eq!(out.content, "1\n4\n5\n2\n3\n6\n");
        assert_eq!(out.new_start, 4);
    }

    #[test]
    fn move_to_end() {
        let out = reorder(&numbered(4), range(1, 2), 5).unwrap();
        assert_eq!(out.content, "3\n4\n1\n2\n");
        assert_eq!(out.new_start, 3);
    }

    #[test]
    fn noop_moves() {
        let input = numbered(5);
        assert_eq!(reorder(&input, range(2, 3), 2).unwrap().content, input);
        assert_eq!(reorder(&input, range(2, 3), 4).unwrap().content, input);
    }

    #[test]
    fn pricing_plan_on_synthetic_file() {
        let input = numbered(800);
        let out = reorder(&input, range(433, 730), 199).unwrap();
        let lines: Vec<&str> = out.content.lines().collect();
        assert_eq!(lines.len(), 800);
        assert_eq!(lines[197], "198");
        assert_eq!(lines[198], "433");
        assert_eq!(lines[198 + 297], "730");
        assert_eq!(lines[198 + 298], "199");
        assert_eq!(lines[729], "432");
        assert_eq!(lines[730], "731");
    }

    #[test]
    fn unterminated_last_line_keeps_line_count() {
        let input = "a\nb\nc";
        let out = reorder(input, range(3, 3), 1).unwrap();
        assert_eq!(out.content, "c\na\nb\n");
        assert_eq!(out.content.lines().count(), input.lines().count());
    }

    #[test]
    fn crlf_terminators_are_preserved() {
        let input = "a\r\nb\r\nc";
        let out = reorder(input, range(3, 3), 1).unwrap();
        assert_eq!(out.content, "c\r\na\r\nb\r\n");
    }

    #[test]
    fn block_past_end_is_rejected() {
        let err = reorder(&numbered(10), range(5, 11), 1).unwrap_err();
        assert!(matches!(err, SiteFixError::LineOutOfRange { line: 11, total: 10 }));
    }

    #[test]
    fn destination_past_end_is_rejected() {
        let err = reorder(&numbered(10), range(1, 2), 12).unwrap_err();
        assert!(matches!(err, SiteFixError::LineOutOfRange { line: 12, .. }));
    }

    #[test]
    fn zero_start_is_rejected() {
        let block = LineRange { start: 0, end: 0 };
        let err = reorder("a\nb\n", block, 1).unwrap_err();
        assert!(matches!(err, SiteFixError::InvalidRange(_)));
    }

    #[test]
    fn inverted_block_is_rejected() {
        let block = LineRange { start: 4, end: 2 };
        let err = reorder(&numbered(6), block, 1).unwrap_err();
        assert!(matches!(err, SiteFixError::InvalidRange(_)));
    }

    #[test]
    fn destination_zero_is_rejected() {
        let err = reorder(&numbered(4), range(2, 3), 0).unwrap_err();
        assert!(matches!(err, SiteFixError::LineOutOfRange { line: 0, .. }));
    }

    #[test]
    fn destination_inside_block_is_rejected() {
        let err = reorder(&numbered(10), range(3, 6), 5).unwrap_err();
        assert!(matches!(err, SiteFixError::InvalidRange(_)));
    }
}
