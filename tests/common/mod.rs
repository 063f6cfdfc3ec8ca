//! Common test utilities and fixtures
#![allow(dead_code)]

use gmail_triage::client::GmailClient;
use gmail_triage::error::{Result, TriageError};
use gmail_triage::models::{
    ExistingFilterInfo, FilterRule, Header, MessageDetail, MessagePage, MessageRef,
};
use mockall::mock;
use std::collections::HashMap;

/// A fetched message with a single `From` header plus a subject
pub fn message_from(id: &str, from: &str) -> MessageDetail {
    MessageDetail {
        id: id.to_string(),
        headers: vec![
            Header {
                name: "From".to_string(),
                value: from.to_string(),
            },
            Header {
                name: "Subject".to_string(),
                value: format!("Subject of {}", id),
            },
        ],
    }
}

/// A fetched message with no `From` header
pub fn message_without_sender(id: &str) -> MessageDetail {
    MessageDetail {
        id: id.to_string(),
        headers: vec![Header {
            name: "Subject".to_string(),
            value: "orphan".to_string(),
        }],
    }
}

/// One listing page
pub fn page(ids: &[&str], next_page_token: Option<&str>) -> MessagePage {
    MessagePage {
        messages: ids.iter().map(|id| MessageRef::new(*id)).collect(),
        next_page_token: next_page_token.map(|t| t.to_string()),
    }
}

/// An existing filter with a `from` criterion
pub fn existing_filter(id: &str, from: &str) -> ExistingFilterInfo {
    ExistingFilterInfo {
        id: id.to_string(),
        from: Some(from.to_string()),
        add_label_ids: vec!["TRASH".to_string()],
        ..Default::default()
    }
}

/// A mailbox keyed by message id
pub fn mailbox(messages: Vec<MessageDetail>) -> HashMap<String, MessageDetail> {
    messages.into_iter().map(|m| (m.id.clone(), m)).collect()
}

/// Serve `get_message` from `mailbox`; unknown ids are NotFound
pub fn serve_messages(client: &mut MockGmailClient, mailbox: HashMap<String, MessageDetail>) {
    client.expect_get_message().returning(move |id| {
        mailbox
            .get(id)
            .cloned()
            .ok_or_else(|| TriageError::NotFound(format!("message {}", id)))
    });
}

// Mock implementation of GmailClient for testing
mock! {
    pub GmailClient {}

    #[async_trait::async_trait]
    impl GmailClient for GmailClient {
        async fn list_messages_page(
            &self,
            page_size: Option<u32>,
            page_token: Option<String>,
        ) -> Result<MessagePage>;
        async fn get_message(&self, id: &str) -> Result<MessageDetail>;
        async fn list_filters(&self) -> Result<Vec<ExistingFilterInfo>>;
        async fn create_filter(&self, filter: &FilterRule) -> Result<String>;
        async fn batch_delete_messages(&self, message_ids: &[String]) -> Result<()>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from() {
        let msg = message_from("m1", "Alice <a@x.com>");
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.headers[0].name, "From");
        assert_eq!(msg.headers[0].value, "Alice <a@x.com>");
    }

    #[test]
    fn test_page() {
        let p = page(&["m1", "m2"], Some("t2"));
        assert_eq!(p.messages.len(), 2);
        assert_eq!(p.next_page_token.as_deref(), Some("t2"));
    }

    #[test]
    fn test_mailbox_keys() {
        let mb = mailbox(vec![message_from("m1", "a"), message_without_sender("m2")]);
        assert!(mb.contains_key("m1"));
        assert!(mb.contains_key("m2"));
    }

    #[tokio::test]
    async fn test_serve_messages_unknown_id() {
        let mut client = MockGmailClient::new();
        serve_messages(&mut client, mailbox(vec![message_from("m1", "a")]));

        assert!(client.get_message("m1").await.is_ok());
        assert!(matches!(
            client.get_message("nope").await,
            Err(TriageError::NotFound(_))
        ));
    }
}
