use std::collections::HashSet;

/// Opaque identifier of one message, as returned by a list call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub id: String,
}

impl MessageRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// One page of a message list call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessagePage {
    pub messages: Vec<MessageRef>,
    /// Continuation token from the list response itself
    pub next_page_token: Option<String>,
}

/// A single header name/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Full representation of one fetched message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDetail {
    pub id: String,
    pub headers: Vec<Header>,
}

/// Raw `From` header values, deduplicated by exact string equality
pub type SenderSet = HashSet<String>;

/// A filter already configured on the account
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingFilterInfo {
    pub id: String,
    pub from: Option<String>,
    pub query: Option<String>,
    pub add_label_ids: Vec<String>,
    pub remove_label_ids: Vec<String>,
}

/// A filter to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    /// Value of the `from` criterion, e.g. `a@x.com OR b@y.com`
    pub from_criteria: String,
    pub add_label_ids: Vec<String>,
    pub remove_label_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_set_dedup() {
        let mut set = SenderSet::new();
        set.insert("Alice <a@x.com>".to_string());
        set.insert("Alice <a@x.com>".to_string());
        set.insert("alice <a@x.com>".to_string());
        assert_eq!(set.len(), 2);
    }
}
