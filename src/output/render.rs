//! Rendering of diffs, file lists, and comment threads for the show command.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use colored::Colorize;

use crate::client::models::{CommentInfo, FileDiff, FileInfo};
use crate::diff::{RenderedLine, normalize, segments_from_content};

/// File list with status letters and per-file line counts.
pub fn file_table(files: &BTreeMap<String, FileInfo>) -> String {
    let mut out = format!("Files ({})\n", files.len());

    for (path, info) in files {
        let status = info.status.as_deref().unwrap_or("M");
        let inserted = info.lines_inserted.unwrap_or(0);
        let deleted = info.lines_deleted.unwrap_or(0);
        writeln!(out, "  {status} {path}  +{inserted}/-{deleted}").ok();
    }

    out
}

/// Diff view for every fetched file, one header per file.
pub fn render_diffs(diffs: &BTreeMap<String, FileDiff>, context: usize) -> String {
    let mut out = String::from("Diff\n");

    for (path, diff) in diffs {
        writeln!(out, "{}", format!("--- {path} ---").cyan().bold()).ok();

        if diff.binary == Some(true) {
            writeln!(out, "  (binary file)").ok();
            continue;
        }

        let segments = segments_from_content(&diff.content);
        out.push_str(&render_lines(&normalize(&segments, context)));
    }

    out
}

/// Turn normalized lines into prefixed, colored text. Added lines get `+`,
/// removed lines `-`, context a two-space indent, collapsed runs a marker
/// carrying the hidden count.
pub fn render_lines(lines: &[RenderedLine]) -> String {
    let mut out = String::new();

    for line in lines {
        match line {
            RenderedLine::Context(text) => writeln!(out, "  {text}").ok(),
            RenderedLine::Added(text) => writeln!(out, "{}", format!("+ {text}").green()).ok(),
            RenderedLine::Removed(text) => writeln!(out, "{}", format!("- {text}").red()).ok(),
            RenderedLine::Collapsed(count) => {
                writeln!(out, "{}", format!("  ... {count} unchanged lines ...").dimmed()).ok()
            }
        };
    }

    out
}

/// Published inline comments grouped by file, in file order.
pub fn comment_threads(comments: &BTreeMap<String, Vec<CommentInfo>>) -> String {
    let mut out = String::from("Comments\n");

    if comments.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    for (path, entries) in comments {
        writeln!(out, "  {path}").ok();
        for comment in entries {
            let author = comment
                .author
                .as_ref()
                .map(|a| a.display_name())
                .unwrap_or("Unknown");
            writeln!(
                out,
                "    {} [{}] {}",
                anchor_label(comment),
                author,
                comment.message.trim()
            )
            .ok();
        }
    }

    out
}

fn anchor_label(comment: &CommentInfo) -> String {
    match (&comment.range, comment.line) {
        (Some(range), _) if range.start_line != range.end_line => {
            format!("L{}-{}", range.start_line, range.end_line)
        }
        (_, Some(line)) => format!("L{line}"),
        _ => "file".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{CommentRange, ContentSegment};

    #[test]
    fn rendered_lines_carry_prefixes() {
        let lines = vec![
            RenderedLine::Context("ctx".to_string()),
            RenderedLine::Added("new".to_string()),
            RenderedLine::Removed("old".to_string()),
            RenderedLine::Collapsed(7),
        ];
        let out = render_lines(&lines);

        assert!(out.contains("  ctx"));
        assert!(out.contains("+ new"));
        assert!(out.contains("- old"));
        assert!(out.contains("... 7 unchanged lines ..."));
    }

    #[test]
    fn diff_view_collapses_context_per_file() {
        let diff = FileDiff {
            content: vec![
                ContentSegment {
                    a: Some(vec!["old".to_string()]),
                    b: Some(vec!["new".to_string()]),
                    ..Default::default()
                },
                ContentSegment {
                    ab: Some((0..9).map(|i| format!("ctx {i}")).collect()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let mut diffs = BTreeMap::new();
        diffs.insert("src/lib.rs".to_string(), diff);

        let out = render_diffs(&diffs, 2);
        assert!(out.contains("src/lib.rs"));
        assert!(out.contains("ctx 0"));
        assert!(out.contains("ctx 1"));
        assert!(out.contains("... 7 unchanged lines ..."));
        assert!(!out.contains("ctx 5"));
    }

    #[test]
    fn binary_files_render_a_placeholder() {
        let mut diffs = BTreeMap::new();
        diffs.insert(
            "logo.png".to_string(),
            FileDiff {
                binary: Some(true),
                ..Default::default()
            },
        );
        let out = render_diffs(&diffs, 5);
        assert!(out.contains("(binary file)"));
    }

    #[test]
    fn comment_anchor_prefers_multi_line_range() {
        let comment: CommentInfo = serde_json::from_str(
            r#"{"message": "m", "line": 20,
                "range": {"start_line": 10, "start_character": 0,
                          "end_line": 20, "end_character": 10000}}"#,
        )
        .unwrap();
        assert_eq!(anchor_label(&comment), "L10-20");
    }

    #[test]
    fn comment_anchor_single_line_range_uses_line() {
        let comment = CommentInfo {
            id: None,
            patch_set: None,
            path: None,
            side: None,
            line: Some(12),
            range: Some(CommentRange {
                start_line: 12,
                start_character: 13,
                end_line: 12,
                end_character: 19,
            }),
            message: "m".to_string(),
            updated: None,
            author: None,
            unresolved: None,
            in_reply_to: None,
        };
        assert_eq!(anchor_label(&comment), "L12");
    }

    #[test]
    fn file_level_comment_has_file_anchor() {
        let comment: CommentInfo = serde_json::from_str(r#"{"message": "m"}"#).unwrap();
        assert_eq!(anchor_label(&comment), "file");
    }

    #[test]
    fn file_table_lists_counts() {
        let mut files = BTreeMap::new();
        files.insert(
            "src/api.rs".to_string(),
            FileInfo {
                status: Some("A".to_string()),
                lines_inserted: Some(40),
                lines_deleted: Some(0),
                ..Default::default()
            },
        );
        let out = file_table(&files);
        assert!(out.contains("Files (1)"));
        assert!(out.contains("A src/api.rs  +40/-0"));
    }
}
