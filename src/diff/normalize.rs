//! Context windowing over diff segments.

use super::{DiffSegment, RenderedLine};

/// Convert an ordered segment sequence into displayable lines, keeping at most
/// `context` unchanged lines on each side of a change.
///
/// Change segments always render in full; a `Replace` renders its removed
/// lines followed by its added lines. Context runs are windowed based purely
/// on whether the neighbouring segment in the sequence is a change. A run
/// adjacent to no change at all is fully collapsed once it exceeds twice the
/// window, with no edge lines kept.
pub fn normalize(segments: &[DiffSegment], context: usize) -> Vec<RenderedLine> {
    let mut out = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            DiffSegment::Context(lines) => {
                let after_change = i > 0 && segments[i - 1].is_change();
                let before_change = segments.get(i + 1).is_some_and(|s| s.is_change());
                window_context(lines, context, after_change, before_change, &mut out);
            }
            DiffSegment::Removed(lines) => {
                out.extend(lines.iter().cloned().map(RenderedLine::Removed));
            }
            DiffSegment::Added(lines) => {
                out.extend(lines.iter().cloned().map(RenderedLine::Added));
            }
            DiffSegment::Replace(removed, added) => {
                out.extend(removed.iter().cloned().map(RenderedLine::Removed));
                out.extend(added.iter().cloned().map(RenderedLine::Added));
            }
            DiffSegment::Skip(count) => out.push(RenderedLine::Collapsed(*count)),
        }
    }

    out
}

fn window_context(
    lines: &[String],
    context: usize,
    after_change: bool,
    before_change: bool,
    out: &mut Vec<RenderedLine>,
) {
    if lines.is_empty() {
        return;
    }

    let len = lines.len();
    match (after_change, before_change) {
        // Sandwiched between two changes: keep both edges.
        (true, true) => {
            if len > 2 * context {
                push_context(out, &lines[..context]);
                out.push(RenderedLine::Collapsed((len - 2 * context) as u32));
                push_context(out, &lines[len - context..]);
            } else {
                push_context(out, lines);
            }
        }
        // Trailing context after a change: keep the head.
        (true, false) => {
            if len > context {
                push_context(out, &lines[..context]);
                out.push(RenderedLine::Collapsed((len - context) as u32));
            } else {
                push_context(out, lines);
            }
        }
        // Leading context before a change: keep the tail.
        (false, true) => {
            if len > context {
                out.push(RenderedLine::Collapsed((len - context) as u32));
                push_context(out, &lines[len - context..]);
            } else {
                push_context(out, lines);
            }
        }
        // Isolated run: no adjacent change to anchor a window, so collapse
        // the whole run rather than showing two edges.
        (false, false) => {
            if len > 2 * context {
                out.push(RenderedLine::Collapsed(len as u32));
            } else {
                push_context(out, lines);
            }
        }
    }
}

fn push_context(out: &mut Vec<RenderedLine>, lines: &[String]) {
    out.extend(lines.iter().cloned().map(RenderedLine::Context));
}
