//! Human-readable table and panel output.

use std::fmt::Write as _;

use chrono::{NaiveDateTime, Utc};
use unicode_width::UnicodeWidthStr;

use crate::client::models::{Change, ChangeDetail};
use crate::error::Result;
use crate::output::{ChangeView, Formatter, render};

/// How many messages from the history the detail view shows.
const MESSAGE_HISTORY_LIMIT: usize = 5;

const SUBJECT_LIMIT: usize = 80;

pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_changes(&self, changes: &[Change]) -> Result<String> {
        if changes.is_empty() {
            return Ok("No changes found".to_string());
        }

        let header = ["ID", "Subject", "Owner", "Project", "Status", "+/-", "Updated"];
        let rows: Vec<[String; 7]> = changes
            .iter()
            .map(|change| {
                let owner = change
                    .owner
                    .as_ref()
                    .map(|o| o.display_name().to_string())
                    .unwrap_or_default();
                [
                    change.display_id(),
                    truncate(&change.subject, SUBJECT_LIMIT),
                    owner,
                    change.project.clone(),
                    change.status.clone(),
                    format!("+{}/-{}", change.insertions, change.deletions),
                    format_relative_time(&change.updated),
                ]
            })
            .collect();

        let mut out = format!("Changes ({} items)\n", changes.len());
        out.push_str(&layout_table(&header, &rows));
        Ok(out)
    }

    fn format_change_view(&self, view: &ChangeView) -> Result<String> {
        let mut out = String::new();
        let detail = view.detail;

        writeln!(
            out,
            "Change {}: {}",
            detail.change.display_id(),
            detail.change.subject
        )
        .ok();

        if view.parts.metadata {
            out.push('\n');
            out.push_str(&metadata_panel(detail));
        }

        if view.parts.files
            && let Some(files) = view.files
        {
            out.push('\n');
            out.push_str(&render::file_table(files));
        }

        if view.parts.diff
            && let Some(diffs) = view.diffs
        {
            out.push('\n');
            out.push_str(&render::render_diffs(diffs, view.context));
        }

        if view.parts.messages {
            out.push('\n');
            out.push_str(&message_history(detail));
        }

        if view.parts.comments
            && let Some(comments) = view.comments
        {
            out.push('\n');
            out.push_str(&render::comment_threads(comments));
        }

        Ok(out)
    }
}

fn metadata_panel(detail: &ChangeDetail) -> String {
    let change = &detail.change;
    let mut out = String::from("Basic Info\n");

    writeln!(out, "  Project: {}", change.project).ok();
    writeln!(out, "  Branch:  {}", change.branch).ok();
    writeln!(out, "  Status:  {}", change.status).ok();
    writeln!(
        out,
        "  Owner:   {}",
        change
            .owner
            .as_ref()
            .map(|o| o.display_name())
            .unwrap_or("Unknown")
    )
    .ok();
    writeln!(out, "  Created: {}", format_relative_time(&change.created)).ok();
    writeln!(out, "  Updated: {}", format_relative_time(&change.updated)).ok();
    writeln!(
        out,
        "  Changes: +{}/-{}",
        change.insertions, change.deletions
    )
    .ok();

    if let Some(labels) = &detail.labels
        && !labels.is_empty()
    {
        let summary: Vec<String> = labels
            .iter()
            .map(|(name, info)| format!("{name}: {:+}", info.value.unwrap_or(0)))
            .collect();
        writeln!(out, "  Labels:  {}", summary.join(", ")).ok();
    }

    out
}

fn message_history(detail: &ChangeDetail) -> String {
    let mut out = String::from("Recent Messages\n");

    let Some(messages) = detail.messages.as_ref().filter(|m| !m.is_empty()) else {
        out.push_str("  (none)\n");
        return out;
    };

    let start = messages.len().saturating_sub(MESSAGE_HISTORY_LIMIT);
    for msg in &messages[start..] {
        let author = msg
            .author
            .as_ref()
            .map(|a| a.display_name())
            .unwrap_or("Unknown");
        writeln!(
            out,
            "  [{}] {}:\n    {}",
            format_relative_time(&msg.date),
            author,
            truncate(msg.message.trim(), 200)
        )
        .ok();
    }

    out
}

/// Lay out rows as space-separated columns sized to their widest cell.
/// Width is display width, not byte length.
fn layout_table<const N: usize>(header: &[&str; N], rows: &[[String; N]]) -> String {
    let mut widths: [usize; N] = [0; N];
    for (i, cell) in header.iter().enumerate() {
        widths[i] = cell.width();
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(|c| c.to_string()), &widths);
    push_row(
        &mut out,
        &std::array::from_fn(|i| "-".repeat(widths[i])),
        &widths,
    );
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<const N: usize>(out: &mut String, cells: &[String; N], widths: &[usize; N]) {
    for (i, cell) in cells.iter().enumerate() {
        out.push_str(cell);
        // No trailing padding on the last column.
        if i + 1 < N {
            let pad = widths[i].saturating_sub(cell.width());
            out.push_str(&" ".repeat(pad + 2));
        }
    }
    out.push('\n');
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}

/// Render a Gerrit timestamp (`2025-01-01 00:00:00.000000000`) as a relative
/// age. Unparseable input is returned verbatim.
pub fn format_relative_time(timestamp: &str) -> String {
    let trimmed = timestamp.split('.').next().unwrap_or(timestamp);
    let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") else {
        return timestamp.to_string();
    };

    let elapsed = Utc::now().naive_utc() - parsed;
    let days = elapsed.num_days();
    let seconds = elapsed.num_seconds();

    if days > 365 {
        format!("{} years ago", days / 365)
    } else if days > 30 {
        format!("{} months ago", days / 30)
    } else if days > 0 {
        format!("{days} days ago")
    } else if seconds > 3600 {
        format!("{} hours ago", seconds / 3600)
    } else if seconds > 60 {
        format!("{} minutes ago", seconds / 60)
    } else {
        "Just now".to_string()
    }
}
