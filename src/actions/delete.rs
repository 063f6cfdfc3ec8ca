use std::collections::HashSet;
use tracing::{debug, info};

use crate::client::{GmailClient, BATCH_DELETE_LIMIT};
use crate::error::Result;
use crate::models::MessageRef;
use crate::senders::from_headers;

/// Second fetch pass: ids of listed messages sent by a marked sender
///
/// A message matches when one of its `From` values equals a marked sender
/// exactly. Ids keep listing order.
pub async fn collect_marked_message_ids(
    client: &dyn GmailClient,
    messages: &[MessageRef],
    marked: &[String],
    on_progress: &(dyn Fn() + Send + Sync),
) -> Result<Vec<String>> {
    if marked.is_empty() {
        debug!("No senders marked, skipping second fetch pass");
        return Ok(Vec::new());
    }

    let marked: HashSet<&str> = marked.iter().map(String::as_str).collect();
    let mut ids = Vec::new();

    for message in messages {
        let detail = client.get_message(&message.id).await?;
        if from_headers(&detail).any(|from| marked.contains(from)) {
            ids.push(detail.id);
        }
        on_progress();
    }

    info!(
        "{} of {} listed messages are from marked senders",
        ids.len(),
        messages.len()
    );
    Ok(ids)
}

/// Permanently delete `ids` in batches of at most [`BATCH_DELETE_LIMIT`]
///
/// Returns the number of ids deleted, or that would be deleted on a dry run.
/// An empty list issues no call.
pub async fn delete_messages(client: &dyn GmailClient, ids: &[String], dry_run: bool) -> Result<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    if dry_run {
        info!("Dry run: would delete {} messages", ids.len());
        return Ok(ids.len());
    }

    let mut deleted = 0;
    for (batch, chunk) in ids.chunks(BATCH_DELETE_LIMIT).enumerate() {
        debug!("Deleting batch {} ({} ids)", batch + 1, chunk.len());
        client.batch_delete_messages(chunk).await?;
        deleted += chunk.len();
    }

    info!("Deleted {} messages", deleted);
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockGmailClient;
    use crate::error::TriageError;
    use crate::models::{Header, MessageDetail};

    fn from(id: &str, sender: &str) -> MessageDetail {
        MessageDetail {
            id: id.to_string(),
            headers: vec![Header {
                name: "From".to_string(),
                value: sender.to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_collect_marked_exact_match() {
        let mut client = MockGmailClient::new();
        client.expect_get_message().times(3).returning(|id| {
            Ok(match id {
                "m1" => from(id, "Alice <a@x.com>"),
                "m2" => from(id, "Bob <b@y.com>"),
                _ => from(id, "alice <a@x.com>"),
            })
        });

        let refs = vec![MessageRef::new("m1"), MessageRef::new("m2"), MessageRef::new("m3")];
        let marked = vec!["Alice <a@x.com>".to_string()];
        let ids = collect_marked_message_ids(&client, &refs, &marked, &|| {})
            .await
            .unwrap();

        assert_eq!(ids, vec!["m1".to_string()]);
    }

    #[tokio::test]
    async fn test_collect_with_nothing_marked_fetches_nothing() {
        let client = MockGmailClient::new();
        let refs = vec![MessageRef::new("m1")];
        let ids = collect_marked_message_ids(&client, &refs, &[], &|| {})
            .await
            .unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_delete_chunks_at_limit() {
        let ids: Vec<String> = (0..2500).map(|i| format!("m{}", i)).collect();

        let mut client = MockGmailClient::new();
        let mut seq = mockall::Sequence::new();
        for expected in [1000usize, 1000, 500] {
            client
                .expect_batch_delete_messages()
                .withf(move |chunk| chunk.len() == expected)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(()));
        }

        let deleted = delete_messages(&client, &ids, false).await.unwrap();
        assert_eq!(deleted, 2500);
    }

    #[tokio::test]
    async fn test_delete_dry_run_issues_no_call() {
        let client = MockGmailClient::new();
        let ids = vec!["m1".to_string(), "m2".to_string()];
        assert_eq!(delete_messages(&client, &ids, true).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_empty_list_issues_no_call() {
        let client = MockGmailClient::new();
        assert_eq!(delete_messages(&client, &[], false).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_error_aborts() {
        let mut client = MockGmailClient::new();
        client
            .expect_batch_delete_messages()
            .withf(|chunk| chunk.len() == 1 && chunk[0] == "m1")
            .times(1)
            .returning(|_| Err(TriageError::Forbidden("insufficient scope".to_string())));

        let result = delete_messages(&client, &["m1".to_string()], false).await;
        assert!(matches!(result, Err(TriageError::Forbidden(_))));
    }
}
