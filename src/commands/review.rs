//! Implementation of the review command.

use std::collections::BTreeMap;

use anyhow::{Context, bail};

use crate::cli::ReviewArgs;
use crate::client::GerritClient;
use crate::client::models::ReviewInput;
use crate::config::GerritConfig;
use crate::review::build_comments;

pub fn run_review(config: &GerritConfig, args: &ReviewArgs) -> anyhow::Result<()> {
    let message = match (&args.message, &args.file) {
        (Some(message), _) => Some(message.clone()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let mut labels: BTreeMap<String, i32> = BTreeMap::new();
    if let Some(score) = &args.code_review {
        labels.insert("Code-Review".to_string(), score.parse()?);
    }
    if let Some(score) = &args.verified {
        labels.insert("Verified".to_string(), score.parse()?);
    }

    let tokens = pair_inline_comments(&args.inline_comment);
    let comments = build_comments(&tokens)?;

    if message.is_none() && labels.is_empty() && comments.is_empty() {
        bail!(
            "Must provide a message (-m or -f), scores (--code-review or --verified), \
             or inline comments (--inline-comment)"
        );
    }

    let review = ReviewInput {
        message: message.clone(),
        labels: (!labels.is_empty()).then_some(labels),
        comments: (!comments.is_empty()).then_some(comments),
        ..Default::default()
    };

    let client = GerritClient::new(&config.url, &config.username, &config.password);
    let result = client.set_review(&args.change_id, "current", &review)?;

    println!("✓ Review sent to Change {}", args.change_id);
    if let Some(labels) = result.labels {
        let summary: Vec<String> = labels
            .iter()
            .map(|(name, value)| format!("{name}: {value:+}"))
            .collect();
        println!("  Labels: {}", summary.join(", "));
    }
    if let Some(message) = message {
        let preview: String = message.chars().take(100).collect();
        let ellipsis = if message.chars().count() > 100 { "..." } else { "" };
        println!("  Message: {preview}{ellipsis}");
    }

    if args.submit {
        eprintln!("  Note: --submit feature not implemented yet");
    }

    Ok(())
}

/// Clap hands the repeated two-value flag over as a flat list; stitch it back
/// into (location, message) pairs.
fn pair_inline_comments(flat: &[String]) -> Vec<(String, String)> {
    flat.chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_values_pair_up_in_order() {
        let flat = vec![
            "a.py#1".to_string(),
            "m1".to_string(),
            "b.py#2".to_string(),
            "m2".to_string(),
        ];
        let pairs = pair_inline_comments(&flat);
        assert_eq!(
            pairs,
            vec![
                ("a.py#1".to_string(), "m1".to_string()),
                ("b.py#2".to_string(), "m2".to_string()),
            ]
        );
    }

    #[test]
    fn review_without_any_content_is_rejected() {
        let config = GerritConfig {
            url: "https://gerrit.example.com".to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
        };
        let args = ReviewArgs {
            change_id: "12345".to_string(),
            message: None,
            file: None,
            code_review: None,
            verified: None,
            inline_comment: Vec::new(),
            submit: false,
        };
        let err = run_review(&config, &args).unwrap_err();
        assert!(err.to_string().contains("Must provide"));
    }

    #[test]
    fn invalid_inline_location_fails_before_any_request() {
        let config = GerritConfig {
            url: "https://gerrit.example.com".to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
        };
        let args = ReviewArgs {
            change_id: "12345".to_string(),
            message: None,
            file: None,
            code_review: None,
            verified: None,
            inline_comment: vec!["src/main.rs#abc".to_string(), "msg".to_string()],
            submit: false,
        };
        let err = run_review(&config, &args).unwrap_err();
        assert!(err.to_string().contains("Invalid comment location"));
    }
}
