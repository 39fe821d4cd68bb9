//! Command-line argument definitions.

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "gerrit")]
#[command(about = "Command-line client for Gerrit code review")]
#[command(version)]
#[command(after_help = "\
Configure the server connection through environment variables (or a .env file):
  GERRIT_URL       Gerrit server URL
  GERRIT_USERNAME  Username
  GERRIT_PASSWORD  Password, or GERRIT_TOKEN for an HTTP token")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List changes
    #[command(visible_alias = "l")]
    List(ListArgs),

    /// Show details of a change
    #[command(visible_alias = "view")]
    Show(ShowArgs),

    /// Add a comment to a change
    Comment(CommentArgs),

    /// Send a review (scores and inline comments)
    Review(ReviewArgs),

    /// Fetch a change into a local branch
    Checkout(CheckoutArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Query conditions
    #[arg(short, long, default_value = "status:open")]
    pub query: String,

    /// Limit number of results
    #[arg(short = 'n', long, default_value_t = 25)]
    pub limit: u32,

    /// Filter by owner (use 'me' for the configured user)
    #[arg(short, long)]
    pub owner: Option<String>,

    /// Filter by project
    #[arg(short, long)]
    pub project: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Numeric id, Change-Id, or project~branch~Change-Id
    pub change_id: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Parts to display, comma separated: metadata(m), files(f), diff(d),
    /// messages(msg), comments(c), or all. Default: m,f,msg,c
    #[arg(long)]
    pub parts: Option<String>,
}

#[derive(Args)]
pub struct CommentArgs {
    /// Numeric id, Change-Id, or project~branch~Change-Id
    pub change_id: String,

    /// Comment message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Read the comment from a file
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<std::path::PathBuf>,

    /// Save as draft
    #[arg(long)]
    pub draft: bool,
}

#[derive(Args)]
pub struct ReviewArgs {
    /// Numeric id, Change-Id, or project~branch~Change-Id
    pub change_id: String,

    /// Review message
    #[arg(short, long)]
    pub message: Option<String>,

    /// Read the review message from a file
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<std::path::PathBuf>,

    /// Code-Review score
    #[arg(long, value_parser = ["+2", "+1", "0", "-1", "-2"], allow_hyphen_values = true)]
    pub code_review: Option<String>,

    /// Verified score
    #[arg(long, value_parser = ["+1", "0", "-1"], allow_hyphen_values = true)]
    pub verified: Option<String>,

    /// Inline comment as a 'file#location message' pair; repeatable.
    /// Locations: line (10), line range (10-20), char range (L12C13-L12C19)
    #[arg(
        long = "inline-comment",
        num_args = 2,
        value_names = ["FILE#LOCATION", "MESSAGE"],
        action = ArgAction::Append
    )]
    pub inline_comment: Vec<String>,

    /// Submit the change after reviewing
    #[arg(long)]
    pub submit: bool,
}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Numeric id, Change-Id, or project~branch~Change-Id
    pub change_id: String,

    /// Local branch name
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Delete and recreate the branch if it already exists
    #[arg(long)]
    pub force: bool,

    /// Only fetch, do not check out
    #[arg(long)]
    pub no_checkout: bool,

    /// Stash uncommitted changes instead of refusing to switch
    #[arg(long)]
    pub stash: bool,
}
