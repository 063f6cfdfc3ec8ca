//! Gmail API client seam
//!
//! Every workflow talks to Gmail through [`GmailClient`], so tests can swap in a
//! mock. Calls are plain request/response: no retries, no concurrency.

use async_trait::async_trait;
use google_gmail1::api::{BatchDeleteMessagesRequest, Filter, FilterAction, FilterCriteria, Message};
use std::sync::Arc;
use tracing::debug;

use crate::auth::{GmailHub, ScopeSet};
use crate::error::{TriageError, Result};
use crate::models::{ExistingFilterInfo, FilterRule, Header, MessageDetail, MessagePage, MessageRef};

/// Gmail accepts at most this many ids per batchDelete call
pub const BATCH_DELETE_LIMIT: usize = 1000;

const USER_ID: &str = "me";

/// Trait defining the Gmail operations the triage workflows need
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GmailClient: Send + Sync {
    /// Fetch one page of message references
    ///
    /// `page_size` of `None` lets the provider pick its default.
    async fn list_messages_page(
        &self,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<MessagePage>;

    /// Fetch a single message in `full` format
    async fn get_message(&self, id: &str) -> Result<MessageDetail>;

    /// List all existing filters
    async fn list_filters(&self) -> Result<Vec<ExistingFilterInfo>>;

    /// Create a filter, returning its id
    async fn create_filter(&self, filter: &FilterRule) -> Result<String>;

    /// Permanently delete up to [`BATCH_DELETE_LIMIT`] messages
    async fn batch_delete_messages(&self, message_ids: &[String]) -> Result<()>;
}

/// Production client backed by the `google-gmail1` hub
pub struct ProductionGmailClient {
    hub: GmailHub,
    scopes: ScopeSet,
}

impl ProductionGmailClient {
    /// Create a client that requests `scopes` on every call
    ///
    /// Use the same scope set the hub was authenticated with, otherwise the
    /// authenticator starts a fresh consent flow for the new set.
    pub fn new(hub: GmailHub, scopes: ScopeSet) -> Self {
        Self { hub, scopes }
    }

    pub fn hub(&self) -> &GmailHub {
        &self.hub
    }
}

/// Convert a Gmail API message into our MessageDetail
fn parse_message_detail(requested_id: &str, msg: Message) -> MessageDetail {
    let id = msg.id.unwrap_or_else(|| requested_id.to_string());

    let headers = msg
        .payload
        .and_then(|p| p.headers)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|h| match (h.name, h.value) {
            (Some(name), Some(value)) => Some(Header { name, value }),
            _ => None,
        })
        .collect();

    MessageDetail { id, headers }
}

fn parse_existing_filter(f: Filter) -> Option<ExistingFilterInfo> {
    let id = f.id?;
    let criteria = f.criteria.unwrap_or_default();
    let action = f.action.unwrap_or_default();

    Some(ExistingFilterInfo {
        id,
        from: criteria.from,
        query: criteria.query,
        add_label_ids: action.add_label_ids.unwrap_or_default(),
        remove_label_ids: action.remove_label_ids.unwrap_or_default(),
    })
}

fn build_gmail_filter(rule: &FilterRule) -> Filter {
    let criteria = FilterCriteria {
        from: Some(rule.from_criteria.clone()),
        ..Default::default()
    };

    let action = FilterAction {
        add_label_ids: (!rule.add_label_ids.is_empty()).then(|| rule.add_label_ids.clone()),
        remove_label_ids: (!rule.remove_label_ids.is_empty())
            .then(|| rule.remove_label_ids.clone()),
        ..Default::default()
    };

    Filter {
        criteria: Some(criteria),
        action: Some(action),
        ..Default::default()
    }
}

#[async_trait]
impl GmailClient for ProductionGmailClient {
    async fn list_messages_page(
        &self,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<MessagePage> {
        let mut call = self.hub.users().messages_list(USER_ID);

        if let Some(size) = page_size {
            call = call.max_results(size);
        }
        if let Some(token) = page_token.as_deref() {
            call = call.page_token(token);
        }

        let (_, response) = call.add_scopes(self.scopes.iter()).doit().await?;

        let messages: Vec<MessageRef> = response
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|m| m.id.map(MessageRef::new))
            .collect();

        debug!(
            "Listed {} messages (more pages: {})",
            messages.len(),
            response.next_page_token.is_some()
        );

        Ok(MessagePage {
            messages,
            next_page_token: response.next_page_token,
        })
    }

    async fn get_message(&self, id: &str) -> Result<MessageDetail> {
        let (_, msg) = self
            .hub
            .users()
            .messages_get(USER_ID, id)
            .format("full")
            .add_scopes(self.scopes.iter())
            .doit()
            .await?;

        Ok(parse_message_detail(id, msg))
    }

    async fn list_filters(&self) -> Result<Vec<ExistingFilterInfo>> {
        debug!("Calling Gmail API to list filters...");
        let (_, response) = self
            .hub
            .users()
            .settings_filters_list(USER_ID)
            .add_scopes(self.scopes.iter())
            .doit()
            .await?;

        let filters: Vec<ExistingFilterInfo> = response
            .filter
            .unwrap_or_default()
            .into_iter()
            .filter_map(parse_existing_filter)
            .collect();

        debug!("Successfully parsed {} filters", filters.len());
        Ok(filters)
    }

    async fn create_filter(&self, filter: &FilterRule) -> Result<String> {
        let (_, created_filter) = self
            .hub
            .users()
            .settings_filters_create(build_gmail_filter(filter), USER_ID)
            .add_scopes(self.scopes.iter())
            .doit()
            .await?;

        created_filter
            .id
            .ok_or_else(|| TriageError::FilterError("Created filter has no ID".to_string()))
    }

    async fn batch_delete_messages(&self, message_ids: &[String]) -> Result<()> {
        if message_ids.len() > BATCH_DELETE_LIMIT {
            return Err(TriageError::BadRequest(format!(
                "batchDelete accepts at most {} ids, got {}",
                BATCH_DELETE_LIMIT,
                message_ids.len()
            )));
        }

        let request = BatchDeleteMessagesRequest {
            ids: Some(message_ids.to_vec()),
        };

        self.hub
            .users()
            .messages_batch_delete(request, USER_ID)
            .add_scopes(self.scopes.iter())
            .doit()
            .await?;

        Ok(())
    }
}

// Implement GmailClient for Arc<ProductionGmailClient> to allow shared ownership
#[async_trait]
impl GmailClient for Arc<ProductionGmailClient> {
    async fn list_messages_page(
        &self,
        page_size: Option<u32>,
        page_token: Option<String>,
    ) -> Result<MessagePage> {
        self.as_ref().list_messages_page(page_size, page_token).await
    }

    async fn get_message(&self, id: &str) -> Result<MessageDetail> {
        self.as_ref().get_message(id).await
    }

    async fn list_filters(&self) -> Result<Vec<ExistingFilterInfo>> {
        self.as_ref().list_filters().await
    }

    async fn create_filter(&self, filter: &FilterRule) -> Result<String> {
        self.as_ref().create_filter(filter).await
    }

    async fn batch_delete_messages(&self, message_ids: &[String]) -> Result<()> {
        self.as_ref().batch_delete_messages(message_ids).await
    }
}
