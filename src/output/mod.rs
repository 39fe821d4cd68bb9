//! Output formatting: change tables, detail views, and the diff renderer.

pub mod json;
pub mod parts;
pub mod render;
pub mod table;

use std::collections::BTreeMap;

use crate::client::models::{Change, ChangeDetail, CommentInfo, FileDiff, FileInfo};
use crate::error::Result;

pub use json::JsonFormatter;
pub use parts::ShowParts;
pub use table::TableFormatter;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Everything the show command fetched for one change. Sections not selected
/// by `--parts` are `None` and never rendered.
pub struct ChangeView<'a> {
    pub detail: &'a ChangeDetail,
    pub files: Option<&'a BTreeMap<String, FileInfo>>,
    pub diffs: Option<&'a BTreeMap<String, FileDiff>>,
    pub comments: Option<&'a BTreeMap<String, Vec<CommentInfo>>>,
    pub parts: ShowParts,
    /// Context window for diff rendering.
    pub context: usize,
}

pub trait Formatter {
    fn format_changes(&self, changes: &[Change]) -> Result<String>;
    fn format_change_view(&self, view: &ChangeView) -> Result<String>;
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
