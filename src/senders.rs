//! Sender collection and address extraction

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::client::GmailClient;
use crate::error::Result;
use crate::models::{MessageDetail, MessageRef, SenderSet};

/// Header name whose values are collected, matched exactly
pub const FROM_HEADER: &str = "From";

/// Text strictly between the first `<` and the first following `>`
static BRACKETED_ADDRESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(.*?)>").expect("valid regex"));

/// Values of every `From` header on a message
pub fn from_headers(detail: &MessageDetail) -> impl Iterator<Item = &str> {
    detail
        .headers
        .iter()
        .filter(|h| h.name == FROM_HEADER)
        .map(|h| h.value.as_str())
}

/// Fetch each message and collect the distinct `From` values
///
/// One `get` call per reference, issued one after another. `on_progress` runs
/// after each fetch.
pub async fn collect_unique_senders(
    client: &dyn GmailClient,
    messages: &[MessageRef],
    on_progress: &(dyn Fn() + Send + Sync),
) -> Result<SenderSet> {
    let mut senders = SenderSet::new();

    for message in messages {
        let detail = client.get_message(&message.id).await?;
        let before = senders.len();
        senders.extend(from_headers(&detail).map(str::to_string));
        if senders.len() == before {
            debug!("Message {} added no new sender", detail.id);
        }
        on_progress();
    }

    debug!(
        "Collected {} unique senders from {} messages",
        senders.len(),
        messages.len()
    );
    Ok(senders)
}

/// The bracketed address of a sender, e.g. `Name <a@x.com>` → `a@x.com`
///
/// Bare addresses without brackets yield `None`.
pub fn extract_address(sender: &str) -> Option<&str> {
    BRACKETED_ADDRESS
        .captures(sender)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Bracketed addresses of all senders; senders without one are dropped
pub fn extract_addresses<I, S>(senders: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    senders
        .into_iter()
        .filter_map(|s| {
            let address = extract_address(s.as_ref()).map(str::to_string);
            if address.is_none() {
                debug!("No bracketed address in sender {:?}", s.as_ref());
            }
            address
        })
        .collect()
}
