use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::actions::filter::AccumulationPolicy;
use crate::auth::{ScopeSet, DELETE_SCOPES, FILTER_SCOPES};
use crate::error::{Result, TriageError};
use crate::listing::{ListingMode, MAX_PAGE_SIZE};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub delete: DeleteConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    #[serde(default = "default_token_cache_path")]
    pub token_cache_path: PathBuf,
    #[serde(default = "default_delete_scopes")]
    pub delete_scopes: Vec<String>,
    #[serde(default = "default_filter_scopes")]
    pub filter_scopes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            token_cache_path: default_token_cache_path(),
            delete_scopes: default_delete_scopes(),
            filter_scopes: default_filter_scopes(),
        }
    }
}

impl AuthConfig {
    pub fn delete_scope_set(&self) -> ScopeSet {
        ScopeSet::new(&self.delete_scopes)
    }

    pub fn filter_scope_set(&self) -> ScopeSet {
        ScopeSet::new(&self.filter_scopes)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfig {
    /// 0 lets Gmail pick the page size
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_remove_token_on_success")]
    pub remove_token_on_success: bool,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self {
            page_size: 0,
            dry_run: false,
            remove_token_on_success: default_remove_token_on_success(),
        }
    }
}

impl DeleteConfig {
    /// The delete workflow looks at a single page only
    pub fn listing_mode(&self) -> ListingMode {
        ListingMode::SinglePage {
            page_size: (self.page_size > 0).then_some(self.page_size),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_filter_page_size")]
    pub page_size: u32,
    /// 0 means follow continuation tokens until the listing ends
    #[serde(default)]
    pub max_pages: usize,
    #[serde(default)]
    pub accumulation: AccumulationPolicy,
    #[serde(default = "default_add_label_ids")]
    pub add_label_ids: Vec<String>,
    #[serde(default = "default_remove_label_ids")]
    pub remove_label_ids: Vec<String>,
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            page_size: default_filter_page_size(),
            max_pages: 0,
            accumulation: AccumulationPolicy::default(),
            add_label_ids: default_add_label_ids(),
            remove_label_ids: default_remove_label_ids(),
            dry_run: false,
        }
    }
}

impl FilterConfig {
    pub fn listing_mode(&self) -> ListingMode {
        ListingMode::Paginated {
            page_size: (self.page_size > 0).then_some(self.page_size),
            max_pages: (self.max_pages > 0).then_some(self.max_pages),
        }
    }
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token_cache_path() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_delete_scopes() -> Vec<String> {
    DELETE_SCOPES.iter().map(|s| s.to_string()).collect()
}

fn default_filter_scopes() -> Vec<String> {
    FILTER_SCOPES.iter().map(|s| s.to_string()).collect()
}

fn default_remove_token_on_success() -> bool {
    true
}

fn default_filter_page_size() -> u32 {
    250
}

fn default_add_label_ids() -> Vec<String> {
    vec!["TRASH".to_string()]
}

fn default_remove_label_ids() -> Vec<String> {
    vec!["INBOX".to_string()]
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        // If file doesn't exist, return default config with warning
        if !path.exists() {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TriageError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| TriageError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                TriageError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TriageError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| TriageError::ConfigError(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.auth.delete_scopes.is_empty() {
            return Err(TriageError::ConfigError(
                "auth.delete_scopes cannot be empty".to_string(),
            ));
        }
        if self.auth.filter_scopes.is_empty() {
            return Err(TriageError::ConfigError(
                "auth.filter_scopes cannot be empty".to_string(),
            ));
        }
        for scope in self.auth.delete_scopes.iter().chain(&self.auth.filter_scopes) {
            if scope.trim().is_empty() {
                return Err(TriageError::ConfigError(
                    "auth scopes cannot contain empty strings".to_string(),
                ));
            }
        }

        if self.delete.page_size > MAX_PAGE_SIZE {
            return Err(TriageError::ConfigError(format!(
                "delete.page_size cannot exceed {}",
                MAX_PAGE_SIZE
            )));
        }
        if self.filter.page_size > MAX_PAGE_SIZE {
            return Err(TriageError::ConfigError(format!(
                "filter.page_size cannot exceed {}",
                MAX_PAGE_SIZE
            )));
        }

        // A filter that adds no label would leave matching mail untouched
        if self.filter.add_label_ids.is_empty() {
            return Err(TriageError::ConfigError(
                "filter.add_label_ids must contain at least one label".to_string(),
            ));
        }
        for label in self.filter.add_label_ids.iter().chain(&self.filter.remove_label_ids) {
            if label.trim().is_empty() {
                return Err(TriageError::ConfigError(
                    "filter label ids cannot be empty strings".to_string(),
                ));
            }
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Create an example configuration file
    pub async fn create_example(path: &Path) -> Result<()> {
        let config = Self::default();
        config.save(path).await
    }
}
