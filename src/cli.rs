//! Command-line interface and workflow orchestration

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::actions::{
    build_trash_filter, collect_marked_message_ids, delete_messages, identify_unfiltered,
    join_criteria, AccumulationPolicy, UnfilteredAccumulator,
};
use crate::auth::{self, ScopeSet};
use crate::client::{GmailClient, ProductionGmailClient};
use crate::config::{Config, DeleteConfig, FilterConfig};
use crate::error::{Result, TriageError};
use crate::listing::{list_messages, MessagePager};
use crate::marker::{mark_senders, DecisionSource};
use crate::models::SenderSet;
use crate::senders::{collect_unique_senders, extract_addresses};

#[derive(Parser, Debug)]
#[command(name = "gmail-triage")]
#[command(version = "0.1.0")]
#[command(about = "Interactive Gmail sender triage: delete or filter mail by sender", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "gmail-triage.toml")]
    pub config: PathBuf,

    /// Path to OAuth2 credentials file (overrides auth.credentials_path)
    #[arg(long)]
    pub credentials: Option<PathBuf>,

    /// Path to token cache file (overrides auth.token_cache_path)
    #[arg(long)]
    pub token_cache: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn credentials_path(&self, config: &Config) -> PathBuf {
        self.credentials
            .clone()
            .unwrap_or_else(|| config.auth.credentials_path.clone())
    }

    pub fn token_cache_path(&self, config: &Config) -> PathBuf {
        self.token_cache
            .clone()
            .unwrap_or_else(|| config.auth.token_cache_path.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with Gmail API for both workflows
    Auth {
        /// Force re-authentication even if token exists
        #[arg(long)]
        force: bool,
    },

    /// Mark senders, then permanently delete their listed messages
    Delete {
        /// Collect matching messages but don't delete them
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation before deleting
        #[arg(short, long)]
        yes: bool,

        /// Keep the token file after a successful run
        #[arg(long)]
        keep_token: bool,
    },

    /// Mark senders, then create a filter that trashes their future mail
    Filter {
        /// Report the filter criterion but don't create it
        #[arg(long)]
        dry_run: bool,

        /// Keep unfiltered addresses from every page, not just the last one
        #[arg(long)]
        merge_pages: bool,
    },

    /// Generate example configuration file
    InitConfig {
        /// Path to create config file
        #[arg(short, long, default_value = "gmail-triage.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Apply the subcommand's flags on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        match self {
            Commands::Delete {
                dry_run,
                keep_token,
                ..
            } => {
                if *dry_run {
                    config.delete.dry_run = true;
                }
                if *keep_token {
                    config.delete.remove_token_on_success = false;
                }
            }
            Commands::Filter {
                dry_run,
                merge_pages,
            } => {
                if *dry_run {
                    config.filter.dry_run = true;
                }
                if *merge_pages {
                    config.filter.accumulation = AccumulationPolicy::Merge;
                }
            }
            Commands::Auth { .. } | Commands::InitConfig { .. } => {}
        }
    }
}

/// Progress reporter using indicatif
pub struct ProgressReporter {
    multi: MultiProgress,
    spinner_style: ProgressStyle,
    bar_style: ProgressStyle,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::with_multi_progress(MultiProgress::new())
    }

    /// Share a MultiProgress with the log writer so logs print above bars
    pub fn with_multi_progress(multi: MultiProgress) -> Self {
        // Use {elapsed} for human-readable format (e.g., "1s", "234ms")
        let spinner_style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed:>6}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");

        let bar_style = ProgressStyle::default_bar()
            .template("[{elapsed:>6}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");

        Self {
            multi,
            spinner_style,
            bar_style,
        }
    }

    /// Reporter that draws nothing
    pub fn hidden() -> Self {
        Self::with_multi_progress(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()))
    }

    pub fn multi_progress(&self) -> &MultiProgress {
        &self.multi
    }

    pub fn add_spinner(&self, msg: &str) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(self.spinner_style.clone());
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn add_progress_bar(&self, len: u64, msg: &str) -> ProgressBar {
        let pb = self.multi.add(ProgressBar::new(len));
        pb.set_style(self.bar_style.clone());
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Finish a spinner and clear it from the multi-progress display
    pub fn finish_spinner(&self, pb: &ProgressBar, msg: &str) {
        pb.finish_and_clear();
        let _ = self.multi.println(format!("  ✓ {}", msg));
    }

    /// Run a prompt with every bar hidden
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.multi.suspend(f)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of one delete run
#[derive(Debug, Clone)]
pub struct DeleteReport {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub messages_scanned: usize,
    pub unique_senders: usize,
    pub marked_senders: Vec<String>,
    /// Ids of listed messages sent by a marked sender
    pub message_ids: Vec<String>,
    pub messages_deleted: usize,
    pub dry_run: bool,
    /// The operator declined the confirmation
    pub cancelled: bool,
}

impl DeleteReport {
    fn new(started_at: DateTime<Utc>, dry_run: bool) -> Self {
        Self {
            started_at,
            completed_at: started_at,
            messages_scanned: 0,
            unique_senders: 0,
            marked_senders: Vec::new(),
            message_ids: Vec::new(),
            messages_deleted: 0,
            dry_run,
            cancelled: false,
        }
    }

    fn finish(mut self) -> Self {
        self.completed_at = Utc::now();
        self
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.completed_at - self.started_at).num_seconds()
    }

    /// True when the run completed without being declined
    pub fn succeeded(&self) -> bool {
        !self.cancelled
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Messages scanned: {}", self.messages_scanned),
            format!("Unique senders: {}", self.unique_senders),
            format!("Marked senders: {}", self.marked_senders.len()),
        ];

        if self.messages_scanned == 0 {
            lines.push("No messages found, nothing to do.".to_string());
        } else if self.marked_senders.is_empty() {
            lines.push("No senders marked, nothing to delete.".to_string());
        } else if self.message_ids.is_empty() {
            lines.push("No messages from marked senders.".to_string());
        } else if self.cancelled {
            lines.push(format!(
                "Deletion of {} messages cancelled.",
                self.message_ids.len()
            ));
        } else if self.dry_run {
            lines.push(format!(
                "Dry run: {} messages would be deleted.",
                self.message_ids.len()
            ));
        } else {
            lines.push(format!("Deleted {} messages.", self.messages_deleted));
        }

        lines.push(format!("Duration: {}s", self.duration_seconds()));
        lines
    }
}

/// Summary of one filter run
#[derive(Debug, Clone)]
pub struct FilterReport {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub pages_processed: usize,
    pub messages_scanned: usize,
    pub unique_senders: usize,
    pub marked_senders: usize,
    pub policy: AccumulationPolicy,
    /// Addresses the new filter matches, after accumulation
    pub unfiltered_addresses: Vec<String>,
    pub criteria: String,
    pub filter_id: Option<String>,
    pub dry_run: bool,
}

impl FilterReport {
    fn new(started_at: DateTime<Utc>, policy: AccumulationPolicy, dry_run: bool) -> Self {
        Self {
            started_at,
            completed_at: started_at,
            pages_processed: 0,
            messages_scanned: 0,
            unique_senders: 0,
            marked_senders: 0,
            policy,
            unfiltered_addresses: Vec::new(),
            criteria: String::new(),
            filter_id: None,
            dry_run,
        }
    }

    fn finish(mut self) -> Self {
        self.completed_at = Utc::now();
        self
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.completed_at - self.started_at).num_seconds()
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Pages processed: {}", self.pages_processed),
            format!("Messages scanned: {}", self.messages_scanned),
            format!("Unique senders: {}", self.unique_senders),
            format!("Marked senders: {}", self.marked_senders),
        ];

        match (&self.filter_id, self.criteria.is_empty()) {
            (Some(id), _) => lines.push(format!("Created filter with id: {}", id)),
            (None, true) => lines.push("No unfiltered addresses, no filter created.".to_string()),
            (None, false) => lines.push(format!(
                "Dry run: would create filter from: {}",
                self.criteria
            )),
        }

        lines.push(format!("Duration: {}s", self.duration_seconds()));
        lines
    }
}

/// Senders in a stable prompt order
fn ordered_senders(senders: &SenderSet) -> Vec<&str> {
    let mut ordered: Vec<&str> = senders.iter().map(String::as_str).collect();
    ordered.sort_unstable();
    ordered
}

/// Delete workflow: list, collect senders, mark, collect ids, delete
///
/// `confirm` is asked once with the number of messages about to be deleted.
/// It is not asked on a dry run.
pub async fn run_delete_workflow(
    client: &dyn GmailClient,
    config: &DeleteConfig,
    decisions: &mut dyn DecisionSource,
    confirm: &mut dyn FnMut(usize) -> Result<bool>,
    reporter: &ProgressReporter,
) -> Result<DeleteReport> {
    let mut report = DeleteReport::new(Utc::now(), config.dry_run);

    let list_spinner = reporter.add_spinner("Listing messages...");
    let messages = list_messages(client, config.listing_mode()).await?;
    report.messages_scanned = messages.len();
    reporter.finish_spinner(&list_spinner, &format!("Found {} messages", messages.len()));

    if messages.is_empty() {
        return Ok(report.finish());
    }

    let fetch_bar = reporter.add_progress_bar(messages.len() as u64, "Fetching senders...");
    let bar = fetch_bar.clone();
    let senders = collect_unique_senders(client, &messages, &move || bar.inc(1)).await?;
    fetch_bar.finish_and_clear();
    report.unique_senders = senders.len();
    info!("Found {} unique senders", senders.len());

    report.marked_senders =
        reporter.suspend(|| mark_senders(ordered_senders(&senders), decisions))?;
    if report.marked_senders.is_empty() {
        return Ok(report.finish());
    }

    let match_bar = reporter.add_progress_bar(messages.len() as u64, "Matching marked senders...");
    let bar = match_bar.clone();
    report.message_ids =
        collect_marked_message_ids(client, &messages, &report.marked_senders, &move || bar.inc(1))
            .await?;
    match_bar.finish_and_clear();

    if report.message_ids.is_empty() || config.dry_run {
        return Ok(report.finish());
    }

    let count = report.message_ids.len();
    if !reporter.suspend(|| confirm(count))? {
        info!("Deletion of {} messages declined", count);
        report.cancelled = true;
        return Ok(report.finish());
    }

    let delete_spinner = reporter.add_spinner(&format!("Deleting {} messages...", count));
    report.messages_deleted = delete_messages(client, &report.message_ids, false).await?;
    reporter.finish_spinner(
        &delete_spinner,
        &format!("Deleted {} messages", report.messages_deleted),
    );

    Ok(report.finish())
}

/// Filter workflow: per page collect, mark and check coverage, then create one filter
pub async fn run_filter_workflow(
    client: &dyn GmailClient,
    config: &FilterConfig,
    decisions: &mut dyn DecisionSource,
    reporter: &ProgressReporter,
) -> Result<FilterReport> {
    let mut accumulator = UnfilteredAccumulator::new(config.accumulation);
    let mut report = FilterReport::new(Utc::now(), accumulator.policy(), config.dry_run);
    let mut pager = MessagePager::new(client, config.listing_mode());
    let mut all_senders = SenderSet::new();

    loop {
        let page_spinner =
            reporter.add_spinner(&format!("Listing page {}...", pager.pages_fetched() + 1));
        let Some(page) = pager.next_page().await? else {
            page_spinner.finish_and_clear();
            break;
        };
        let page_number = pager.pages_fetched();
        report.messages_scanned += page.messages.len();
        reporter.finish_spinner(
            &page_spinner,
            &format!("Page {}: {} messages", page_number, page.messages.len()),
        );

        let fetch_bar = reporter.add_progress_bar(
            page.messages.len() as u64,
            &format!("Fetching senders (page {})...", page_number),
        );
        let bar = fetch_bar.clone();
        let senders = collect_unique_senders(client, &page.messages, &move || bar.inc(1)).await?;
        fetch_bar.finish_and_clear();

        let marked = reporter.suspend(|| mark_senders(ordered_senders(&senders), decisions))?;
        report.marked_senders += marked.len();
        all_senders.extend(senders);

        let addresses = extract_addresses(&marked);
        let unfiltered = if addresses.is_empty() {
            Vec::new()
        } else {
            let existing = client.list_filters().await?;
            identify_unfiltered(&existing, &addresses)
        };
        info!(
            "Page {}: {} marked, {} unfiltered",
            page_number,
            marked.len(),
            unfiltered.len()
        );
        accumulator.push_page(unfiltered);
    }

    report.pages_processed = pager.pages_fetched();
    report.unique_senders = all_senders.len();
    report.unfiltered_addresses = accumulator.into_addresses();
    report.criteria = join_criteria(&report.unfiltered_addresses);

    let Some(rule) = build_trash_filter(
        &report.criteria,
        &config.add_label_ids,
        &config.remove_label_ids,
    ) else {
        info!("No unfiltered addresses, skipping filter creation");
        return Ok(report.finish());
    };

    if config.dry_run {
        info!("Dry run: would create filter from: {}", rule.from_criteria);
        return Ok(report.finish());
    }

    let create_spinner = reporter.add_spinner("Creating filter...");
    let filter_id = client.create_filter(&rule).await?;
    reporter.finish_spinner(&create_spinner, &format!("Created filter {}", filter_id));
    report.filter_id = Some(filter_id);

    Ok(report.finish())
}

/// Whether a delete run drops the cached token afterwards
///
/// Dry runs, declined confirmations and `remove_token_on_success = false` keep it.
pub fn should_remove_token(report: &DeleteReport, config: &DeleteConfig) -> bool {
    report.succeeded() && !report.dry_run && config.remove_token_on_success
}

/// Remove the token cache after a delete run; returns whether it was removed
pub async fn remove_token_after(
    report: &DeleteReport,
    config: &DeleteConfig,
    token_cache: &Path,
) -> Result<bool> {
    if !should_remove_token(report, config) {
        return Ok(false);
    }

    auth::remove_token_cache(token_cache).await?;
    info!("Removed token cache {:?}", token_cache);
    Ok(true)
}

/// Ask once before permanently deleting
pub fn confirm_deletion(count: usize) -> Result<bool> {
    inquire::Confirm::new(&format!("Permanently delete {} messages?", count))
        .with_default(false)
        .with_help_message("Deleted messages skip the trash and cannot be recovered")
        .prompt()
        .map_err(|e| match e {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => {
                TriageError::OperationCancelled("deletion prompt aborted".to_string())
            }
            other => TriageError::PromptError(other.to_string()),
        })
}

async fn connect(
    cli: &Cli,
    config: &Config,
    scopes: ScopeSet,
    reporter: &ProgressReporter,
) -> Result<ProductionGmailClient> {
    info!("Authenticating with Gmail API...");
    let hub = auth::initialize_gmail_hub(
        &cli.credentials_path(config),
        &cli.token_cache_path(config),
        &scopes,
    )
    .await?;
    let _ = reporter
        .multi_progress()
        .println("  ✓ Gmail API authenticated successfully");
    Ok(ProductionGmailClient::new(hub, scopes))
}

/// `auth`: consent for the union of both scope sets, then show the account
pub async fn auth_command(
    cli: &Cli,
    config: &Config,
    force: bool,
    reporter: &ProgressReporter,
) -> Result<String> {
    let token_cache = cli.token_cache_path(config);
    if force {
        auth::remove_token_cache(&token_cache).await?;
        info!("Removed existing token cache");
    }

    let scopes = config
        .auth
        .delete_scope_set()
        .union(&config.auth.filter_scope_set());
    let client = connect(cli, config, scopes.clone(), reporter).await?;

    // Requesting the same scope set avoids a second consent flow
    let (_, profile) = client
        .hub()
        .users()
        .get_profile("me")
        .add_scopes(scopes.iter())
        .doit()
        .await?;

    Ok(profile.email_address.unwrap_or_default())
}

/// `delete`: the delete workflow against the live account
pub async fn delete_command(
    cli: &Cli,
    config: &Config,
    decisions: &mut dyn DecisionSource,
    assume_yes: bool,
    reporter: &ProgressReporter,
) -> Result<DeleteReport> {
    if config.delete.dry_run {
        println!("Running in DRY RUN mode - no messages will be deleted");
    }

    let client = connect(cli, config, config.auth.delete_scope_set(), reporter).await?;

    let mut confirm = |count: usize| -> Result<bool> {
        if assume_yes {
            Ok(true)
        } else {
            confirm_deletion(count)
        }
    };
    let report = run_delete_workflow(&client, &config.delete, decisions, &mut confirm, reporter).await?;

    remove_token_after(&report, &config.delete, &cli.token_cache_path(config)).await?;

    Ok(report)
}

/// `filter`: the filter workflow against the live account
pub async fn filter_command(
    cli: &Cli,
    config: &Config,
    decisions: &mut dyn DecisionSource,
    reporter: &ProgressReporter,
) -> Result<FilterReport> {
    if config.filter.dry_run {
        println!("Running in DRY RUN mode - no filter will be created");
    }
    if config.filter.accumulation == AccumulationPolicy::LastPage {
        warn!("Only the last page's unfiltered addresses are kept; pass --merge-pages to keep all pages");
    }

    let client = connect(cli, config, config.auth.filter_scope_set(), reporter).await?;
    run_filter_workflow(&client, &config.filter, decisions, reporter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_delete() {
        let cli = Cli::parse_from(["gmail-triage", "--token-cache", "t.json", "delete", "--dry-run", "-y"]);
        assert_eq!(cli.token_cache, Some(PathBuf::from("t.json")));
        assert!(cli.credentials.is_none());
        match cli.command {
            Commands::Delete {
                dry_run,
                yes,
                keep_token,
            } => {
                assert!(dry_run);
                assert!(yes);
                assert!(!keep_token);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_paths_fall_back_to_config() {
        let cli = Cli::parse_from(["gmail-triage", "--credentials", "c.json", "filter"]);
        let config = Config::default();
        assert_eq!(cli.credentials_path(&config), PathBuf::from("c.json"));
        assert_eq!(cli.token_cache_path(&config), PathBuf::from("token.json"));
        assert_eq!(cli.config, PathBuf::from("gmail-triage.toml"));
    }

    #[test]
    fn test_ordered_senders() {
        let senders: SenderSet = ["b <b@y.com>", "a <a@x.com>"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(ordered_senders(&senders), vec!["a <a@x.com>", "b <b@y.com>"]);
    }

    #[test]
    fn test_delete_report_summary() {
        let mut report = DeleteReport::new(Utc::now(), false);
        report.messages_scanned = 10;
        report.marked_senders = vec!["a".to_string()];
        report.message_ids = vec!["m1".to_string(), "m2".to_string()];
        report.messages_deleted = 2;

        let lines = report.summary_lines();
        assert!(lines.contains(&"Deleted 2 messages.".to_string()));

        report.dry_run = true;
        assert!(report
            .summary_lines()
            .contains(&"Dry run: 2 messages would be deleted.".to_string()));
    }

    #[test]
    fn test_delete_flags_override_config() {
        let cli = Cli::parse_from(["gmail-triage", "delete", "--dry-run", "--keep-token"]);
        let mut config = Config::default();
        cli.command.apply_overrides(&mut config);

        assert!(config.delete.dry_run);
        assert!(!config.delete.remove_token_on_success);
        assert!(!config.filter.dry_run);
    }

    #[test]
    fn test_filter_flags_override_config() {
        let cli = Cli::parse_from(["gmail-triage", "filter", "--dry-run", "--merge-pages"]);
        let mut config = Config::default();
        cli.command.apply_overrides(&mut config);

        assert!(config.filter.dry_run);
        assert_eq!(config.filter.accumulation, AccumulationPolicy::Merge);
        assert!(!config.delete.dry_run);
        assert!(config.delete.remove_token_on_success);
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = Cli::parse_from(["gmail-triage", "filter"]);
        let mut config = Config::default();
        config.filter.accumulation = AccumulationPolicy::Merge;
        config.filter.dry_run = true;
        cli.command.apply_overrides(&mut config);

        assert!(config.filter.dry_run);
        assert_eq!(config.filter.accumulation, AccumulationPolicy::Merge);
    }

    fn token_file() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "[]").unwrap();
        (dir, path)
    }

    #[tokio::test]
    async fn test_successful_delete_removes_token() {
        let (_dir, path) = token_file();
        let report = DeleteReport::new(Utc::now(), false);
        let config = DeleteConfig::default();

        assert!(should_remove_token(&report, &config));
        assert!(remove_token_after(&report, &config, &path).await.unwrap());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_dry_run_keeps_token() {
        let (_dir, path) = token_file();
        let report = DeleteReport::new(Utc::now(), true);

        assert!(!remove_token_after(&report, &DeleteConfig::default(), &path)
            .await
            .unwrap());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_declined_delete_keeps_token() {
        let (_dir, path) = token_file();
        let mut report = DeleteReport::new(Utc::now(), false);
        report.cancelled = true;

        assert!(!remove_token_after(&report, &DeleteConfig::default(), &path)
            .await
            .unwrap());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_keep_token_setting_keeps_token() {
        let (_dir, path) = token_file();
        let report = DeleteReport::new(Utc::now(), false);
        let config = DeleteConfig {
            remove_token_on_success: false,
            ..Default::default()
        };

        assert!(!remove_token_after(&report, &config, &path).await.unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_filter_report_summary() {
        let mut report = FilterReport::new(Utc::now(), AccumulationPolicy::LastPage, false);
        assert!(report
            .summary_lines()
            .contains(&"No unfiltered addresses, no filter created.".to_string()));

        report.criteria = "a@x.com".to_string();
        report.filter_id = Some("f9".to_string());
        assert!(report
            .summary_lines()
            .contains(&"Created filter with id: f9".to_string()));
    }
}
