//! Parsing of the `--parts` selector for the show command.

use crate::error::{GerritError, Result};

/// Available parts with their abbreviations, in display order.
const AVAILABLE_PARTS: [(&str, &str); 5] = [
    ("metadata", "m"),
    ("files", "f"),
    ("diff", "d"),
    ("messages", "msg"),
    ("comments", "c"),
];

/// Which sections of a change the show command renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowParts {
    pub metadata: bool,
    pub files: bool,
    pub diff: bool,
    pub messages: bool,
    pub comments: bool,
}

impl ShowParts {
    /// Default view: everything except the diff, which is slow to fetch.
    pub fn default_view() -> Self {
        Self {
            metadata: true,
            files: true,
            diff: false,
            messages: true,
            comments: true,
        }
    }

    pub fn all() -> Self {
        Self {
            metadata: true,
            files: true,
            diff: true,
            messages: true,
            comments: true,
        }
    }

    /// Parse a `--parts` value: comma-separated full names or abbreviations,
    /// mixed freely, or the special value `all`. `None` selects the default
    /// view. Empty items between commas are ignored.
    pub fn parse(option: Option<&str>) -> Result<Self> {
        let Some(value) = option else {
            return Ok(Self::default_view());
        };

        if value == "all" {
            return Ok(Self::all());
        }

        let mut parts = Self::default();
        for item in value.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }

            match resolve_part(item) {
                Some("metadata") => parts.metadata = true,
                Some("files") => parts.files = true,
                Some("diff") => parts.diff = true,
                Some("messages") => parts.messages = true,
                Some("comments") => parts.comments = true,
                _ => {
                    return Err(GerritError::InvalidParts {
                        part: item.to_string(),
                        available: available_parts_help(),
                    });
                }
            }
        }

        Ok(parts)
    }
}

fn resolve_part(item: &str) -> Option<&'static str> {
    AVAILABLE_PARTS
        .iter()
        .find(|(full, abbr)| item == *full || item == *abbr)
        .map(|(full, _)| *full)
}

fn available_parts_help() -> String {
    AVAILABLE_PARTS
        .iter()
        .map(|(full, abbr)| format!("{full}({abbr})"))
        .collect::<Vec<_>>()
        .join(", ")
}
