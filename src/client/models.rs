//! Serde models for the Gerrit REST API.
//!
//! Field names follow the wire format; Gerrit-internal fields prefixed with
//! an underscore (`_number`, `_account_id`) are aliased.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_account_id")]
    pub account_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Account {
    /// Best human-readable name for display.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    pub id: String,
    pub project: String,
    pub branch: String,
    pub change_id: String,
    pub subject: String,
    pub status: String,
    pub created: String,
    pub updated: String,
    #[serde(default)]
    pub insertions: i64,
    #[serde(default)]
    pub deletions: i64,
    #[serde(rename = "_number")]
    pub number: i64,
    #[serde(default)]
    pub owner: Option<Account>,
    #[serde(default)]
    pub current_revision: Option<String>,
    #[serde(default, rename = "_more_changes")]
    pub more_changes: Option<bool>,
}

impl Change {
    /// The numeric id users type on the command line.
    pub fn display_id(&self) -> String {
        self.number.to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelInfo {
    #[serde(default)]
    pub approved: Option<Account>,
    #[serde(default)]
    pub rejected: Option<Account>,
    #[serde(default)]
    pub recommended: Option<Account>,
    #[serde(default)]
    pub disliked: Option<Account>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub default_value: Option<i64>,
    #[serde(default)]
    pub values: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageInfo {
    pub id: String,
    #[serde(default)]
    pub author: Option<Account>,
    pub date: String,
    pub message: String,
    #[serde(default)]
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub binary: Option<bool>,
    #[serde(default)]
    pub old_path: Option<String>,
    #[serde(default)]
    pub lines_inserted: Option<i64>,
    #[serde(default)]
    pub lines_deleted: Option<i64>,
    #[serde(default)]
    pub size_delta: Option<i64>,
    #[serde(default)]
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeDetail {
    #[serde(flatten)]
    pub change: Change,
    #[serde(default)]
    pub messages: Option<Vec<MessageInfo>>,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, LabelInfo>>,
    #[serde(default)]
    pub permitted_labels: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    pub reviewers: Option<BTreeMap<String, Vec<Account>>>,
    #[serde(default)]
    pub revisions: Option<BTreeMap<String, serde_json::Value>>,
}

/// An existing inline comment fetched from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub patch_set: Option<i64>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub range: Option<CommentRange>,
    pub message: String,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub author: Option<Account>,
    #[serde(default)]
    pub unresolved: Option<bool>,
    #[serde(default)]
    pub in_reply_to: Option<String>,
}

/// Character-granular comment anchor. Character offsets are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    pub start_line: u32,
    pub start_character: u32,
    pub end_line: u32,
    pub end_character: u32,
}

/// An inline comment being sent to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<CommentRange>,
    pub message: String,
    #[serde(default = "default_side")]
    pub side: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unresolved: Option<bool>,
}

fn default_side() -> String {
    "REVISION".to_string()
}

impl CommentInput {
    pub fn new(line: u32, range: Option<CommentRange>, message: String) -> Self {
        Self {
            path: None,
            line: Some(line),
            range,
            message,
            side: default_side(),
            in_reply_to: None,
            unresolved: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<BTreeMap<String, Vec<CommentInput>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_in_progress: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewResult {
    #[serde(default)]
    pub labels: Option<BTreeMap<String, i32>>,
    #[serde(default)]
    pub reviewers: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    pub ready: Option<bool>,
}

/// One content segment of a file diff as returned by the server.
///
/// Exactly one of the shapes is populated per segment: `ab` for common lines,
/// `a`/`b` for removed/added (both together meaning a replacement), or `skip`
/// for a run the server already collapsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ab: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub lines: Option<u32>,
}

/// Diff payload for a single file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDiff {
    #[serde(default)]
    pub content: Vec<ContentSegment>,
    #[serde(default)]
    pub change_type: Option<String>,
    #[serde(default)]
    pub binary: Option<bool>,
    #[serde(default)]
    pub meta_a: Option<FileMeta>,
    #[serde(default)]
    pub meta_b: Option<FileMeta>,
}
