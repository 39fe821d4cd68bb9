//! Core diff representation shared by the client and the renderer.
//!
//! Gerrit returns file diffs as a sequence of content segments: runs that are
//! common to both sides, runs only in the old file, runs only in the new file,
//! a combination of both (a replacement), or a pre-collapsed `skip` marker.
//! [`normalize`] turns that sequence into displayable lines with a context
//! window applied around each change.

mod normalize;

pub use normalize::normalize;

use crate::client::models::ContentSegment;

/// One contiguous run of a file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSegment {
    /// Lines present in both the old and new file.
    Context(Vec<String>),
    /// Lines only in the old file.
    Removed(Vec<String>),
    /// Lines only in the new file.
    Added(Vec<String>),
    /// Removed lines replaced by added lines.
    Replace(Vec<String>, Vec<String>),
    /// A run of common lines the server already collapsed.
    Skip(u32),
}

impl DiffSegment {
    /// Whether this segment modifies the file (anything except plain context).
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            DiffSegment::Removed(_) | DiffSegment::Added(_) | DiffSegment::Replace(_, _)
        )
    }
}

/// One line of rendered diff output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedLine {
    Context(String),
    Added(String),
    Removed(String),
    /// A run of hidden unchanged lines, carrying the hidden count.
    Collapsed(u32),
}

/// Project the wire-level content segments into [`DiffSegment`]s.
///
/// Segments arrive in top-to-bottom file order and are never re-ordered. The
/// server guarantees well-formed segments, so no re-validation happens here;
/// a segment carrying none of the known keys is dropped.
pub fn segments_from_content(content: &[ContentSegment]) -> Vec<DiffSegment> {
    content
        .iter()
        .filter_map(|seg| {
            if let Some(count) = seg.skip {
                Some(DiffSegment::Skip(count))
            } else if let Some(ab) = &seg.ab {
                Some(DiffSegment::Context(ab.clone()))
            } else {
                match (&seg.a, &seg.b) {
                    (Some(a), Some(b)) => Some(DiffSegment::Replace(a.clone(), b.clone())),
                    (Some(a), None) => Some(DiffSegment::Removed(a.clone())),
                    (None, Some(b)) => Some(DiffSegment::Added(b.clone())),
                    (None, None) => None,
                }
            }
        })
        .collect()
}
