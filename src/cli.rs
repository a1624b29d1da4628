//! # Command Line Interface
//!
//! Each subcommand maps onto one fetch operation of the client library and
//! prints the validated result as pretty JSON on stdout.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use gh_util_client::{
  ContributorDataParams, FetchType, GitHubClient, IssueListParams, OpenPullRequestParams, StateFilter, parse_repo_slug,
};
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing::info;

/// Top-level CLI command for gh-util
#[derive(Parser)]
#[command(name = "gh-util")]
#[command(about = "Fetch validated GitHub issues, pull requests, labels, releases and users")]
#[command(
  long_about = "gh-util talks to the GitHub REST API and prints typed, validated resources as JSON.\n\n\
        Authentication uses GH_UTIL_TOKEN, falling back to GITHUB_TOKEN. Requests are\n\
        sent anonymously when neither is set."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    global = true,
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Show a single issue or pull request
  Issue(IssueArgs),

  /// List one page of issues and pull requests
  #[command(alias = "ls")]
  Issues(IssuesArgs),

  /// Pull request operations
  #[command(arg_required_else_help = true)]
  Pr(PrArgs),

  /// Label operations
  #[command(arg_required_else_help = true)]
  Labels(LabelsArgs),

  /// Show the latest published release
  Release(RepoArg),

  /// Show a user, or the authenticated user when no login is given
  User(UserArgs),

  /// Summarize recent contributor activity from the repository event stream
  Activity(ActivityArgs),
}

/// Repository given as `owner/repo` or a GitHub URL
#[derive(Args)]
pub struct RepoArg {
  /// Repository (e.g. 'prefecthq/marvin' or 'https://github.com/prefecthq/marvin')
  pub repo: String,
}

#[derive(Args)]
pub struct IssueArgs {
  #[command(flatten)]
  pub repo: RepoArg,

  /// Issue or pull request number
  pub number: u64,

  /// Also fetch the comments
  #[arg(long, short = 'c')]
  pub comments: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StateArg {
  Open,
  Closed,
  All,
}

impl From<StateArg> for StateFilter {
  fn from(value: StateArg) -> Self {
    match value {
      StateArg::Open => Self::Open,
      StateArg::Closed => Self::Closed,
      StateArg::All => Self::All,
    }
  }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
  Issues,
  Pulls,
  All,
}

impl From<KindArg> for FetchType {
  fn from(value: KindArg) -> Self {
    match value {
      KindArg::Issues => Self::Issues,
      KindArg::Pulls => Self::Pulls,
      KindArg::All => Self::All,
    }
  }
}

#[derive(Args)]
pub struct IssuesArgs {
  #[command(flatten)]
  pub repo: RepoArg,

  #[arg(long, value_enum, default_value_t = StateArg::Open)]
  pub state: StateArg,

  /// Keep only issues, only pull requests, or both
  #[arg(long, value_enum, default_value_t = KindArg::All)]
  pub kind: KindArg,

  /// Results per page (1-100)
  #[arg(long, default_value_t = 30)]
  pub per_page: u8,

  #[arg(long, default_value_t = 1)]
  pub page: u32,

  /// Also fetch the comments of every listed issue
  #[arg(long, short = 'c')]
  pub comments: bool,
}

#[derive(Args)]
pub struct PrArgs {
  #[command(subcommand)]
  pub command: PrCommands,
}

#[derive(Subcommand)]
pub enum PrCommands {
  /// Show a pull request
  Show(IssueArgs),

  /// Open a pull request, or return the open one for the same branches
  Open(PrOpenArgs),
}

#[derive(Args)]
pub struct PrOpenArgs {
  #[command(flatten)]
  pub repo: RepoArg,

  /// Branch to merge from
  #[arg(long)]
  pub head: String,

  /// Branch to merge into (defaults to the configured default base)
  #[arg(long)]
  pub base: Option<String>,

  #[arg(long)]
  pub title: String,

  #[arg(long)]
  pub body: Option<String>,

  #[arg(long)]
  pub draft: bool,

  /// Always create a new pull request without looking for an open one
  #[arg(long)]
  pub no_reuse: bool,
}

#[derive(Args)]
pub struct LabelsArgs {
  #[command(subcommand)]
  pub command: LabelsCommands,
}

#[derive(Subcommand)]
pub enum LabelsCommands {
  /// List the labels defined on a repository
  #[command(alias = "ls")]
  List(RepoArg),

  /// Show the labels on an issue
  Show(IssueLabelsArgs),

  /// Add labels to an issue, keeping the existing ones
  Add(IssueLabelsEditArgs),

  /// Replace the labels on an issue
  Set(IssueLabelsEditArgs),
}

#[derive(Args)]
pub struct IssueLabelsArgs {
  #[command(flatten)]
  pub repo: RepoArg,

  pub number: u64,
}

#[derive(Args)]
pub struct IssueLabelsEditArgs {
  #[command(flatten)]
  pub repo: RepoArg,

  pub number: u64,

  /// Label names
  #[arg(num_args = 0..)]
  pub labels: Vec<String>,
}

#[derive(Args)]
pub struct ActivityArgs {
  #[command(flatten)]
  pub repo: RepoArg,

  /// Ignore events before this time (RFC 3339); defaults to the last 24 hours
  #[arg(long)]
  pub since: Option<DateTime<Utc>>,

  /// Number of events to read (1-100)
  #[arg(long, default_value_t = 100)]
  pub max_events: u8,

  /// Logins to leave out (can be used multiple times)
  #[arg(long = "exclude", value_name = "LOGIN")]
  pub excluded_users: Vec<String>,
}

#[derive(Args)]
pub struct UserArgs {
  pub login: Option<String>,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  let client = GitHubClient::from_env().context("Failed to configure the GitHub client")?;
  let rt = Runtime::new().context("Failed to start the async runtime")?;

  rt.block_on(run(&client, cli.command))
}

async fn run(client: &GitHubClient, command: Commands) -> Result<()> {
  match command {
    Commands::Issue(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo.repo)?;
      let issue = client
        .fetch_repo_issue(&owner, &repo, args.number, args.comments)
        .await
        .with_context(|| format!("Failed to fetch issue #{} from {owner}/{repo}", args.number))?;
      print_json(&issue)
    }
    Commands::Issues(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo.repo)?;
      let params = IssueListParams {
        state: args.state.into(),
        per_page: args.per_page,
        page: args.page,
        fetch_type: args.kind.into(),
        include_comments: args.comments,
      };
      let issues = client
        .fetch_repo_issues(&owner, &repo, &params)
        .await
        .with_context(|| format!("Failed to list issues for {owner}/{repo}"))?;
      info!("Fetched {} issues", issues.len());
      print_json(&issues)
    }
    Commands::Pr(args) => run_pr(client, args.command).await,
    Commands::Labels(args) => run_labels(client, args.command).await,
    Commands::Release(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo)?;
      let release = client
        .fetch_latest_release(&owner, &repo)
        .await
        .with_context(|| format!("Failed to fetch the latest release of {owner}/{repo}"))?;
      print_json(&release)
    }
    Commands::User(args) => {
      let user = match args.login {
        Some(login) => client
          .fetch_user(&login)
          .await
          .with_context(|| format!("Failed to fetch user '{login}'"))?,
        None => client
          .fetch_authenticated_user()
          .await
          .context("Failed to fetch the authenticated user")?,
      };
      print_json(&user)
    }
    Commands::Activity(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo.repo)?;
      let params = ContributorDataParams {
        since: args.since,
        max_events: args.max_events,
        excluded_users: args.excluded_users.into_iter().collect(),
      };
      let activity = client
        .fetch_contributor_data(&owner, &repo, &params)
        .await
        .with_context(|| format!("Failed to fetch contributor activity for {owner}/{repo}"))?;
      print_json(&activity)
    }
  }
}

async fn run_pr(client: &GitHubClient, command: PrCommands) -> Result<()> {
  match command {
    PrCommands::Show(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo.repo)?;
      let pr = client
        .fetch_repo_pull_request(&owner, &repo, args.number, args.comments)
        .await
        .with_context(|| format!("Failed to fetch pull request #{} from {owner}/{repo}", args.number))?;
      print_json(&pr)
    }
    PrCommands::Open(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo.repo)?;
      let params = OpenPullRequestParams {
        base: args.base,
        body: args.body,
        draft: args.draft,
        check_for_existing: !args.no_reuse,
        ..OpenPullRequestParams::new(args.head, args.title)
      };
      let pr = client
        .open_pull_request(&owner, &repo, &params)
        .await
        .with_context(|| format!("Failed to open a pull request on {owner}/{repo}"))?;
      print_json(&pr)
    }
  }
}

async fn run_labels(client: &GitHubClient, command: LabelsCommands) -> Result<()> {
  match command {
    LabelsCommands::List(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo)?;
      let labels = client
        .fetch_repo_labels(&owner, &repo)
        .await
        .with_context(|| format!("Failed to fetch labels of {owner}/{repo}"))?;
      print_json(&labels)
    }
    LabelsCommands::Show(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo.repo)?;
      let labels = client
        .fetch_issue_labels(&owner, &repo, args.number)
        .await
        .with_context(|| format!("Failed to fetch labels of {owner}/{repo}#{}", args.number))?;
      print_json(&labels)
    }
    LabelsCommands::Add(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo.repo)?;
      let changed = client
        .add_labels_to_issue(&owner, &repo, args.number, args.labels)
        .await
        .with_context(|| format!("Failed to add labels to {owner}/{repo}#{}", args.number))?;
      print_json(&serde_json::json!({ "changed": changed }))
    }
    LabelsCommands::Set(args) => {
      let (owner, repo) = parse_repo_slug(&args.repo.repo)?;
      let labels: BTreeSet<String> = args.labels.into_iter().collect();
      let changed = client
        .update_labels_on_issue(&owner, &repo, args.number, &labels)
        .await
        .with_context(|| format!("Failed to update labels on {owner}/{repo}#{}", args.number))?;
      print_json(&serde_json::json!({ "changed": changed }))
    }
  }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
  println!("{rendered}");
  Ok(())
}
