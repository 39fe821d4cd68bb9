//! Synchronous Gerrit REST client.
//!
//! Authenticated endpoints live under the `/a/` prefix and answer with a
//! `)]}'` XSSI guard before the JSON body; both are handled here so callers
//! only ever see parsed models.

use std::collections::BTreeMap;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::Serialize;
use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::client::models::{
    Change, ChangeDetail, CommentInfo, FileDiff, FileInfo, ReviewInput, ReviewResult,
};
use crate::error::{GerritError, Result};

/// Files Gerrit reports alongside real changes that carry no useful diff.
const SPECIAL_FILES: [&str; 2] = ["/COMMIT_MSG", "/MERGE_LIST"];

const XSSI_PREFIX: &str = ")]}'";

pub struct GerritClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl GerritClient {
    pub fn new(base_url: &str, username: &str, password: &str) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build();

        let credentials = BASE64.encode(format!("{username}:{password}"));

        Self {
            agent: config.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {credentials}"),
        }
    }

    /// List changes matching a Gerrit query string.
    pub fn list_changes(
        &self,
        query: &str,
        options: &[&str],
        limit: u32,
    ) -> Result<Vec<Change>> {
        let mut params = vec![
            ("q".to_string(), query.to_string()),
            ("n".to_string(), limit.to_string()),
        ];
        for opt in options {
            params.push(("o".to_string(), opt.to_string()));
        }
        self.get("changes/", &params)
    }

    /// Fetch a single change. `change_id` may be a numeric id, a Change-Id,
    /// or the full `project~branch~Change-Id` triplet.
    pub fn get_change(&self, change_id: &str, options: &[&str]) -> Result<ChangeDetail> {
        let params: Vec<(String, String)> = options
            .iter()
            .map(|opt| ("o".to_string(), opt.to_string()))
            .collect();
        self.get(&format!("changes/{change_id}"), &params)
    }

    /// Change detail including messages and labels.
    pub fn get_change_detail(&self, change_id: &str) -> Result<ChangeDetail> {
        self.get_change(
            change_id,
            &[
                "CURRENT_REVISION",
                "MESSAGES",
                "DETAILED_LABELS",
                "DETAILED_ACCOUNTS",
            ],
        )
    }

    /// All published inline comments, keyed by file path.
    pub fn get_change_comments(
        &self,
        change_id: &str,
    ) -> Result<BTreeMap<String, Vec<CommentInfo>>> {
        self.get(&format!("changes/{change_id}/comments"), &[])
    }

    /// Files touched by a revision, keyed by path.
    pub fn get_change_files(
        &self,
        change_id: &str,
        revision_id: &str,
    ) -> Result<BTreeMap<String, FileInfo>> {
        self.get(
            &format!("changes/{change_id}/revisions/{revision_id}/files/"),
            &[],
        )
    }

    /// Context-compressed diff for one file of a revision.
    pub fn get_file_diff(
        &self,
        change_id: &str,
        file_path: &str,
        revision_id: &str,
        context: u32,
    ) -> Result<FileDiff> {
        let encoded = urlencoding::encode(file_path);
        self.get(
            &format!("changes/{change_id}/revisions/{revision_id}/files/{encoded}/diff"),
            &[("context".to_string(), context.to_string())],
        )
    }

    /// Diffs for every regular file in a revision. Special files, files the
    /// server has no diff for (binaries), and files whose fetch fails are
    /// silently skipped so one bad file never loses the rest.
    pub fn get_all_diffs(
        &self,
        change_id: &str,
        revision_id: &str,
        context: u32,
    ) -> Result<BTreeMap<String, FileDiff>> {
        let files = self.get_change_files(change_id, revision_id)?;
        let mut diffs = BTreeMap::new();

        for path in files.keys() {
            if SPECIAL_FILES.contains(&path.as_str()) {
                continue;
            }
            match self.get_file_diff(change_id, path, revision_id, context) {
                Ok(diff) => {
                    diffs.insert(path.clone(), diff);
                }
                Err(e) if is_per_file_skip(&e) => {
                    log::debug!("no diff available for {path}, skipping: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(diffs)
    }

    /// Post a review (message, labels, inline comments) on a revision.
    pub fn set_review(
        &self,
        change_id: &str,
        revision_id: &str,
        review: &ReviewInput,
    ) -> Result<ReviewResult> {
        self.post(
            &format!("changes/{change_id}/revisions/{revision_id}/review"),
            review,
        )
    }

    /// Post a change-level message with no scores or inline comments.
    pub fn add_comment(&self, change_id: &str, message: &str) -> Result<ReviewResult> {
        let review = ReviewInput {
            message: Some(message.to_string()),
            ..Default::default()
        };
        self.set_review(change_id, "current", &review)
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, params: &[(String, String)]) -> Result<T> {
        let url = self.endpoint_url(endpoint);
        log::debug!("GET {url}");

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json; charset=UTF-8");
        for (key, value) in params {
            request = request.query(key, value);
        }

        let response = request
            .call()
            .map_err(|e| GerritError::Network(e.to_string()))?;
        Self::handle_response(endpoint, response)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, endpoint: &str, body: &B) -> Result<T> {
        let url = self.endpoint_url(endpoint);
        log::debug!("POST {url}");

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json; charset=UTF-8")
            .send_json(body)
            .map_err(|e| GerritError::Network(e.to_string()))?;
        Self::handle_response(endpoint, response)
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        // The /a/ prefix opts in to HTTP authentication.
        format!("{}/a/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn handle_response<T: DeserializeOwned>(
        endpoint: &str,
        response: ureq::http::Response<ureq::Body>,
    ) -> Result<T> {
        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| GerritError::Network(e.to_string()))?;

        match status {
            401 => Err(GerritError::Authentication),
            404 => Err(GerritError::NotFound(endpoint.to_string())),
            s if s >= 400 => Err(GerritError::Api {
                status: s,
                message: body,
            }),
            _ => parse_payload(&body),
        }
    }
}

/// Per-file diff failures that do not abort the whole listing: a missing diff
/// (binaries, deleted files), a server-side error for that one file, or a
/// transient transport failure.
fn is_per_file_skip(err: &GerritError) -> bool {
    matches!(
        err,
        GerritError::NotFound(_) | GerritError::Api { .. } | GerritError::Network(_)
    )
}

/// Strip the XSSI guard and parse the remaining JSON. An empty body parses as
/// an empty object, which Gerrit uses for acknowledgement-only responses.
fn parse_payload<T: DeserializeOwned>(body: &str) -> Result<T> {
    let text = body
        .strip_prefix(XSSI_PREFIX)
        .map(|rest| rest.trim_start_matches('\n'))
        .unwrap_or(body);

    let text = if text.trim().is_empty() { "{}" } else { text };
    Ok(serde_json::from_str(text)?)
}
