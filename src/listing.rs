//! Message listing, single-page or following continuation tokens

use tracing::{debug, info};

use crate::client::GmailClient;
use crate::error::Result;
use crate::models::{MessagePage, MessageRef};

/// Maximum page size Gmail accepts for messages.list
pub const MAX_PAGE_SIZE: u32 = 500;

/// How many list calls to make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingMode {
    /// One list call, no continuation
    SinglePage { page_size: Option<u32> },
    /// Follow `nextPageToken` until it is absent, or `max_pages` is reached
    Paginated {
        page_size: Option<u32>,
        max_pages: Option<usize>,
    },
}

impl ListingMode {
    pub fn page_size(&self) -> Option<u32> {
        match self {
            ListingMode::SinglePage { page_size } | ListingMode::Paginated { page_size, .. } => {
                *page_size
            }
        }
    }
}

/// Walks the message list one page at a time
///
/// The continuation token always comes from the page response, never from an
/// item inside it.
pub struct MessagePager<'a> {
    client: &'a dyn GmailClient,
    mode: ListingMode,
    next_token: Option<String>,
    pages_fetched: usize,
    exhausted: bool,
}

impl<'a> MessagePager<'a> {
    pub fn new(client: &'a dyn GmailClient, mode: ListingMode) -> Self {
        Self {
            client,
            mode,
            next_token: None,
            pages_fetched: 0,
            exhausted: false,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page, or `None` once the listing is done
    pub async fn next_page(&mut self) -> Result<Option<MessagePage>> {
        if self.exhausted {
            return Ok(None);
        }

        let page = self
            .client
            .list_messages_page(self.mode.page_size(), self.next_token.clone())
            .await?;
        self.pages_fetched += 1;

        debug!(
            "Page {}: {} messages, continuation: {}",
            self.pages_fetched,
            page.messages.len(),
            page.next_page_token.is_some()
        );

        self.next_token = page.next_page_token.clone();
        self.exhausted = match self.mode {
            ListingMode::SinglePage { .. } => true,
            ListingMode::Paginated { max_pages, .. } => {
                // An empty token is treated the same as an absent one
                let no_more = self.next_token.as_deref().map_or(true, str::is_empty);
                let limit_hit = max_pages.is_some_and(|max| self.pages_fetched >= max);
                if limit_hit && !no_more {
                    info!("Stopping after {} pages (max_pages reached)", self.pages_fetched);
                }
                no_more || limit_hit
            }
        };

        Ok(Some(page))
    }
}

/// Collect every message reference the mode allows
pub async fn list_messages(client: &dyn GmailClient, mode: ListingMode) -> Result<Vec<MessageRef>> {
    let mut pager = MessagePager::new(client, mode);
    let mut all = Vec::new();

    while let Some(page) = pager.next_page().await? {
        all.extend(page.messages);
    }

    info!(
        "Listed {} messages across {} page(s)",
        all.len(),
        pager.pages_fetched()
    );
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockGmailClient;

    fn page(ids: &[&str], next: Option<&str>) -> MessagePage {
        MessagePage {
            messages: ids.iter().map(|id| MessageRef::new(*id)).collect(),
            next_page_token: next.map(|t| t.to_string()),
        }
    }

    #[tokio::test]
    async fn test_paginated_follows_response_token() {
        let mut client = MockGmailClient::new();
        client
            .expect_list_messages_page()
            .times(3)
            .returning(|size, token| {
                assert_eq!(size, Some(250));
                Ok(match token.as_deref() {
                    None => page(&["m1", "m2"], Some("t2")),
                    Some("t2") => page(&["m3"], Some("t3")),
                    Some("t3") => page(&["m4"], None),
                    Some(other) => panic!("unexpected token {}", other),
                })
            });

        let ids = list_messages(
            &client,
            ListingMode::Paginated {
                page_size: Some(250),
                max_pages: None,
            },
        )
        .await
        .unwrap();

        let ids: Vec<&str> = ids.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn test_single_page_ignores_continuation() {
        let mut client = MockGmailClient::new();
        client
            .expect_list_messages_page()
            .times(1)
            .withf(|size, token| size.is_none() && token.is_none())
            .returning(|_, _| Ok(page(&["m1"], Some("more"))));

        let ids = list_messages(&client, ListingMode::SinglePage { page_size: None })
            .await
            .unwrap();
        assert_eq!(ids, vec![MessageRef::new("m1")]);
    }

    #[tokio::test]
    async fn test_empty_mailbox() {
        let mut client = MockGmailClient::new();
        client
            .expect_list_messages_page()
            .times(1)
            .returning(|_, _| Ok(MessagePage::default()));

        let ids = list_messages(
            &client,
            ListingMode::Paginated {
                page_size: Some(250),
                max_pages: None,
            },
        )
        .await
        .unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_max_pages_stops_early() {
        let mut client = MockGmailClient::new();
        client
            .expect_list_messages_page()
            .times(2)
            .returning(|_, token| {
                Ok(match token.as_deref() {
                    None => page(&["m1"], Some("t2")),
                    _ => page(&["m2"], Some("t3")),
                })
            });

        let mut pager = MessagePager::new(
            &client,
            ListingMode::Paginated {
                page_size: None,
                max_pages: Some(2),
            },
        );
        assert!(pager.next_page().await.unwrap().is_some());
        assert!(pager.next_page().await.unwrap().is_some());
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(pager.pages_fetched(), 2);
    }

    #[tokio::test]
    async fn test_empty_token_ends_listing() {
        let mut client = MockGmailClient::new();
        client
            .expect_list_messages_page()
            .times(1)
            .returning(|_, _| Ok(page(&["m1"], Some(""))));

        let ids = list_messages(
            &client,
            ListingMode::Paginated {
                page_size: None,
                max_pages: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(ids.len(), 1);
    }
}
