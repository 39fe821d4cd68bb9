use serde_json::json;

use crate::client::models::Change;
use crate::error::Result;
use crate::output::{ChangeView, Formatter};

/// Pretty-printed JSON over the raw wire models, for scripting.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_changes(&self, changes: &[Change]) -> Result<String> {
        Ok(serde_json::to_string_pretty(changes)?)
    }

    fn format_change_view(&self, view: &ChangeView) -> Result<String> {
        let mut output = json!({ "change": view.detail });

        if let Some(files) = view.files {
            output["files"] = serde_json::to_value(files)?;
        }
        if let Some(diffs) = view.diffs {
            output["diffs"] = serde_json::to_value(diffs)?;
        }
        if let Some(comments) = view.comments {
            output["comments"] = serde_json::to_value(comments)?;
        }

        Ok(serde_json::to_string_pretty(&output)?)
    }
}
