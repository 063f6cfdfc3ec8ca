//! Gmail sender triage
//!
//! Two interactive workflows over a Gmail inbox:
//! - **Delete**: mark senders one by one, then permanently delete every listed
//!   message they sent.
//! - **Filter**: mark senders one by one, then create a single filter that
//!   moves their future mail to trash, skipping addresses an existing filter
//!   already covers.
//!
//! # Example Usage
//!
//! ```no_run
//! use gmail_triage::{auth, cli, client::ProductionGmailClient, config::Config};
//! use gmail_triage::marker::TerminalPrompt;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("gmail-triage.toml".as_ref()).await?;
//!     let scopes = config.auth.filter_scope_set();
//!
//!     let hub = auth::initialize_gmail_hub(
//!         &config.auth.credentials_path,
//!         &config.auth.token_cache_path,
//!         &scopes,
//!     )
//!     .await?;
//!     let client = ProductionGmailClient::new(hub, scopes);
//!
//!     let mut prompt = TerminalPrompt::stdio();
//!     let reporter = cli::ProgressReporter::new();
//!     let report = cli::run_filter_workflow(&client, &config.filter, &mut prompt, &reporter).await?;
//!     println!("{:?}", report.filter_id);
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - OAuth2 authentication, scope sets and the token cache
//! - [`client`] - Gmail API client trait and its production implementation
//! - [`listing`] - Message listing, single page or paginated
//! - [`senders`] - Unique sender collection and address extraction
//! - [`marker`] - Per-sender yes/no decisions
//! - [`actions`] - Deletion and filter creation
//! - [`cli`] - Command-line interface and workflow orchestration
//! - [`config`] - Configuration management
//! - [`error`] - Error types and result aliases
//! - [`models`] - Core data structures

pub mod actions;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod marker;
pub mod models;
pub mod senders;

// Re-export commonly used types for convenience
pub use error::{Result, TriageError};

// Core data models
pub use models::{ExistingFilterInfo, FilterRule, MessageDetail, MessagePage, MessageRef, SenderSet};

// Client traits
pub use client::{GmailClient, ProductionGmailClient};

// Config types
pub use config::{AuthConfig, Config, DeleteConfig, FilterConfig};

// Decision sources
pub use marker::{DecisionSource, ScriptedDecisions, TerminalPrompt};

// Action types
pub use actions::{AccumulationPolicy, UnfilteredAccumulator};

// CLI types (for binary usage)
pub use cli::{Cli, Commands, DeleteReport, FilterReport, ProgressReporter};
