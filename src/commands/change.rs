//! Implementations of the list, show, comment, and checkout commands.

use anyhow::{Context, bail};

use crate::cli::{CheckoutArgs, CommentArgs, ListArgs, ShowArgs};
use crate::client::GerritClient;
use crate::config::GerritConfig;
use crate::output::{ChangeView, ShowParts, get_formatter};
use crate::vcs::{GitWorkspace, change_refspec};

/// Context lines kept around each change in diff views.
const DIFF_CONTEXT: u32 = 5;

/// Diffs above this many changed lines are skipped in the show command.
const MAX_DIFF_LINES: i64 = 1000;

pub fn run_list(config: &GerritConfig, args: &ListArgs) -> anyhow::Result<()> {
    let mut query_parts = vec![args.query.clone()];
    if let Some(owner) = &args.owner {
        let owner = if owner == "me" {
            config.username.as_str()
        } else {
            owner.as_str()
        };
        query_parts.push(format!("owner:{owner}"));
    }
    if let Some(project) = &args.project {
        query_parts.push(format!("project:{project}"));
    }
    let query = query_parts.join(" ");

    let client = GerritClient::new(&config.url, &config.username, &config.password);
    let changes = client.list_changes(
        &query,
        &["CURRENT_REVISION", "LABELS", "DETAILED_ACCOUNTS"],
        args.limit,
    )?;

    let formatter = get_formatter(args.format);
    println!("{}", formatter.format_changes(&changes)?);
    Ok(())
}

pub fn run_show(config: &GerritConfig, args: &ShowArgs) -> anyhow::Result<()> {
    let mut parts = ShowParts::parse(args.parts.as_deref())?;
    let client = GerritClient::new(&config.url, &config.username, &config.password);

    let detail = client.get_change_detail(&args.change_id)?;

    let files = if parts.files || parts.diff {
        Some(client.get_change_files(&args.change_id, "current")?)
    } else {
        None
    };

    let diffs = if parts.diff {
        let total_lines = detail.change.insertions + detail.change.deletions;
        if total_lines > MAX_DIFF_LINES {
            eprintln!("Warning: diff too large ({total_lines} lines), skipping.");
            eprintln!("Hint: use 'gerrit checkout {}' to inspect locally.", args.change_id);
            parts.diff = false;
            None
        } else {
            Some(client.get_all_diffs(&args.change_id, "current", DIFF_CONTEXT)?)
        }
    } else {
        None
    };

    let comments = if parts.comments {
        Some(client.get_change_comments(&args.change_id)?)
    } else {
        None
    };

    let view = ChangeView {
        detail: &detail,
        files: files.as_ref(),
        diffs: diffs.as_ref(),
        comments: comments.as_ref(),
        parts,
        context: DIFF_CONTEXT as usize,
    };

    let formatter = get_formatter(args.format);
    println!("{}", formatter.format_change_view(&view)?);
    Ok(())
}

pub fn run_comment(config: &GerritConfig, args: &CommentArgs) -> anyhow::Result<()> {
    let message = match (&args.message, &args.file) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("Must provide -m or -f option"),
    };

    if args.draft {
        bail!("Draft feature not implemented yet");
    }

    let client = GerritClient::new(&config.url, &config.username, &config.password);
    client.add_comment(&args.change_id, &message)?;
    println!("✓ Comment added to Change {}", args.change_id);
    Ok(())
}

pub fn run_checkout(config: &GerritConfig, args: &CheckoutArgs) -> anyhow::Result<()> {
    let mut workspace = GitWorkspace::discover().context(
        "Current directory is not a Git repository.\n\
         Please cd into the Gerrit project's repository before running checkout.",
    )?;

    println!("Fetching info for Change {}...", args.change_id);
    let client = GerritClient::new(&config.url, &config.username, &config.password);
    let detail = client.get_change(
        &args.change_id,
        &["CURRENT_REVISION", "DOWNLOAD_COMMANDS", "DETAILED_ACCOUNTS"],
    )?;
    let change = &detail.change;

    if let Some(root) = workspace.root_path() {
        println!("Current repo: {}", root.display());
    }

    if !workspace.has_remote("origin") {
        eprintln!("Warning: 'origin' remote not found; fetch may fail.");
    } else if let Some(url) = workspace.remote_url("origin") {
        println!("Remote URL: {url}");
        // Heuristic only; remote naming schemes vary.
        if !url.contains(&change.project) {
            eprintln!(
                "Warning: remote URL does not seem to match change project '{}'.",
                change.project
            );
        }
    }

    if change.current_revision.is_none() {
        bail!("Cannot get current revision for change {}", args.change_id);
    }

    let patch_set = current_patch_set(&detail).unwrap_or(1);
    let refspec = change_refspec(change.number, patch_set);
    println!();
    println!("Change:  {}", change.subject);
    println!("Project: {}", change.project);
    println!("Branch:  {}", change.branch);
    println!(
        "Owner:   {}",
        change
            .owner
            .as_ref()
            .map(|o| o.display_name())
            .unwrap_or("Unknown")
    );
    println!("Ref:     {refspec}");
    println!();

    let branch_name = args
        .branch
        .clone()
        .unwrap_or_else(|| format!("review/change-{}", change.number));

    if workspace.branch_exists(&branch_name) {
        if args.force {
            if workspace.current_branch().as_deref() == Some(branch_name.as_str()) {
                bail!("Cannot delete the current branch; switch to another branch first");
            }
            println!("Branch '{branch_name}' exists, deleting...");
            workspace.delete_branch(&branch_name)?;
        } else {
            bail!(
                "Branch '{branch_name}' already exists.\n\
                 Use --force to recreate it, or -b to pick another name."
            );
        }
    }

    if !args.no_checkout
        && let Some(state) = workspace.dirty_state()?
    {
        if args.stash {
            println!("Stashing current changes ({state})...");
            workspace.stash_changes("gerrit: auto stash before fetch")?;
            println!("✓ Stashed; use 'git stash pop' to restore");
        } else {
            bail!(
                "Uncommitted changes in working directory: {state}\n\
                 Commit them, or re-run with --stash."
            );
        }
    }

    println!("Fetching change {} from Gerrit...", change.number);
    workspace.fetch_ref("origin", &refspec)?;
    println!("✓ Fetched change {}", change.number);

    if args.no_checkout {
        println!();
        println!("Success! Fetched Change {}", change.number);
        println!("Use 'git checkout FETCH_HEAD' to check it out");
        return Ok(());
    }

    println!("Creating and switching to branch '{branch_name}'...");
    workspace.checkout_fetch_head(&branch_name)?;
    println!("✓ Switched to branch {branch_name}");
    println!();
    println!(
        "Success! Fetched Change {} to branch '{branch_name}'",
        change.number
    );
    println!();
    println!("Next steps:");
    println!("  - View code: git log -1 --stat");
    println!("  - View diff: git diff {}", change.branch);
    println!(
        "  - Clean up:  git checkout {} && git branch -D {branch_name}",
        change.branch
    );
    Ok(())
}

/// Patch set number of the current revision, when the revision map carries it.
fn current_patch_set(detail: &crate::client::models::ChangeDetail) -> Option<u32> {
    let revision = detail.change.current_revision.as_ref()?;
    let info = detail.revisions.as_ref()?.get(revision)?;
    u32::try_from(info.get("_number")?.as_u64()?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_patch_set_reads_revision_number() {
        let detail: crate::client::models::ChangeDetail = serde_json::from_value(serde_json::json!({
            "id": "p~main~I1",
            "project": "p",
            "branch": "main",
            "change_id": "I1",
            "subject": "s",
            "status": "NEW",
            "created": "2025-08-01 10:15:00.000000000",
            "updated": "2025-08-01 10:15:00.000000000",
            "_number": 7,
            "current_revision": "abc123",
            "revisions": {"abc123": {"_number": 4}}
        }))
        .unwrap();
        assert_eq!(current_patch_set(&detail), Some(4));
    }

    #[test]
    fn comment_requires_message_or_file() {
        let config = GerritConfig {
            url: "https://gerrit.example.com".to_string(),
            username: "user".to_string(),
            password: "secret".to_string(),
        };
        let args = CommentArgs {
            change_id: "12345".to_string(),
            message: None,
            file: None,
            draft: false,
        };
        let err = run_comment(&config, &args).unwrap_err();
        assert!(err.to_string().contains("-m or -f"));
    }
}
