//! OAuth2 credential management for the Gmail API
//!
//! The token cache is owned by `yup-oauth2`: it loads the cached token, refreshes
//! it when a refresh token is present, and otherwise runs the installed-app
//! consent flow on a local redirect server. This module adds the pieces around
//! it: named scope sets, cache inspection, and cache cleanup.

use google_gmail1::{hyper_rustls, hyper_util, yup_oauth2, Gmail};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};
use yup_oauth2::ApplicationSecret;

use crate::error::{Result, TriageError};

/// Scopes for the delete workflow
///
/// - mail.google.com: required by messages.batchDelete
/// - gmail.readonly: message listing and fetching
pub const DELETE_SCOPES: &[&str] = &[
    "https://mail.google.com/",
    "https://www.googleapis.com/auth/gmail.readonly",
];

/// Scopes for the filter workflow
///
/// - gmail.settings.basic: filter listing and creation
/// - gmail.readonly: message listing and fetching
pub const FILTER_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/gmail.settings.basic",
    "https://www.googleapis.com/auth/gmail.readonly",
];

/// Type alias for Gmail Hub to simplify type signatures
pub type GmailHub = Gmail<hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>>;

/// An ordered, duplicate-free list of OAuth scope URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeSet(Vec<String>);

impl ScopeSet {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for scope in scopes {
            let scope = scope.into();
            if !out.contains(&scope) {
                out.push(scope);
            }
        }
        Self(out)
    }

    pub fn delete_default() -> Self {
        Self::new(DELETE_SCOPES.iter().copied())
    }

    pub fn filter_default() -> Self {
        Self::new(FILTER_SCOPES.iter().copied())
    }

    /// Union of two sets, keeping `self` first
    pub fn union(&self, other: &ScopeSet) -> Self {
        Self::new(self.0.iter().chain(other.0.iter()).cloned())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every scope in `self` appears in `granted`
    pub fn is_covered_by(&self, granted: &[String]) -> bool {
        self.0.iter().all(|s| granted.contains(s))
    }
}

/// What the token cache looked like before authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    /// No token file; consent will be requested
    Missing,
    /// Token file exists but cannot be parsed
    Corrupt(String),
    /// Token file holds at least one token
    Cached {
        /// A cached token was granted every requested scope
        scopes_covered: bool,
        /// The covering token (or, failing that, any token) can be refreshed
        has_refresh_token: bool,
    },
}

/// One entry of the yup-oauth2 disk cache; unknown fields are ignored
#[derive(Debug, Deserialize)]
struct CachedTokenEntry {
    #[serde(default)]
    scopes: Vec<String>,
    #[serde(default)]
    token: CachedToken,
}

#[derive(Debug, Default, Deserialize)]
struct CachedToken {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl CachedToken {
    fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Inspect the token cache without modifying it
pub async fn inspect_token_cache(path: &Path, scopes: &ScopeSet) -> Result<CredentialStatus> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CredentialStatus::Missing),
        Err(e) => return Err(e.into()),
    };

    let entries: Vec<CachedTokenEntry> = match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => return Ok(CredentialStatus::Corrupt(e.to_string())),
    };

    if entries.is_empty() {
        return Ok(CredentialStatus::Missing);
    }

    let covering = entries.iter().find(|e| scopes.is_covered_by(&e.scopes));
    let status = match covering {
        Some(entry) => CredentialStatus::Cached {
            scopes_covered: true,
            has_refresh_token: entry.token.can_refresh(),
        },
        None => CredentialStatus::Cached {
            scopes_covered: false,
            has_refresh_token: entries.iter().any(|e| e.token.can_refresh()),
        },
    };

    for entry in &entries {
        debug!(
            "Cached token for {} scope(s), access token present: {}",
            entry.scopes.len(),
            entry.token.access_token.is_some()
        );
    }

    Ok(status)
}

/// Inspect the token cache and remove it if it cannot be parsed
///
/// yup-oauth2 refuses to start on a corrupt cache; removing it lets the
/// consent flow run again.
pub async fn prepare_token_cache(path: &Path, scopes: &ScopeSet) -> Result<CredentialStatus> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let status = inspect_token_cache(path, scopes).await?;
    match &status {
        CredentialStatus::Missing => {
            info!("No cached token at {:?}, browser consent will be requested", path);
        }
        CredentialStatus::Corrupt(reason) => {
            warn!("Token cache {:?} is unreadable ({}), removing it", path, reason);
            remove_token_cache(path).await?;
        }
        CredentialStatus::Cached {
            scopes_covered: false,
            ..
        } => {
            info!("Cached token does not cover the requested scopes, consent will be requested");
        }
        CredentialStatus::Cached {
            has_refresh_token, ..
        } => {
            debug!("Using cached token (refreshable: {})", has_refresh_token);
        }
    }

    Ok(status)
}

/// Read the OAuth client secret (`credentials.json`)
pub async fn read_client_secret(credentials_path: &Path) -> Result<ApplicationSecret> {
    yup_oauth2::read_application_secret(credentials_path)
        .await
        .map_err(|e| {
            TriageError::AuthError(format!(
                "Failed to read credentials from {:?}: {}",
                credentials_path, e
            ))
        })
}

/// Initialize Gmail API hub with OAuth2 authentication
///
/// Blocks on browser consent when no usable token is cached, and writes the
/// token file after every change.
pub async fn initialize_gmail_hub(
    credentials_path: &Path,
    token_cache_path: &Path,
    scopes: &ScopeSet,
) -> Result<GmailHub> {
    if scopes.is_empty() {
        return Err(TriageError::ConfigError("Scope set cannot be empty".to_string()));
    }

    prepare_token_cache(token_cache_path, scopes).await?;

    let secret = read_client_secret(credentials_path).await?;

    // HTTPRedirect binds a local port and opens a browser for user authorization
    let auth = yup_oauth2::InstalledFlowAuthenticator::builder(
        secret,
        yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
    )
    .persist_tokens_to_disk(token_cache_path)
    .build()
    .await
    .map_err(|e| TriageError::AuthError(format!("Failed to build authenticator: {}", e)))?;

    // Pre-authenticate so the cache holds a token for exactly this scope set
    let _token = auth
        .token(scopes.as_slice())
        .await
        .map_err(|e| TriageError::AuthError(format!("Failed to obtain token: {}", e)))?;

    if token_cache_path.exists() {
        secure_token_file(token_cache_path).await?;
    }

    // Use HTTP/1 for compatibility (HTTP/2 is default but HTTP/1 works better with google-gmail1)
    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .map_err(|e| TriageError::AuthError(format!("Failed to load TLS roots: {}", e)))?
                .https_or_http()
                .enable_http1()
                .build(),
        );

    Ok(Gmail::new(client, auth))
}

/// Delete the token cache; a missing file is not an error
pub async fn remove_token_cache(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!("Removed token cache {:?}", path);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Sets file permissions to 0600 (read/write for owner only)
#[cfg(unix)]
pub async fn secure_token_file(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = tokio::fs::metadata(path).await?.permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms).await?;
    Ok(())
}

/// Windows uses ACLs, file permissions are left as created
#[cfg(windows)]
pub async fn secure_token_file(_path: &Path) -> Result<()> {
    Ok(())
}
