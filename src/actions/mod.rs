//! Action executors run on the marked senders
//!
//! - [`delete`] collects and deletes every listed message from a marked sender.
//! - [`filter`] builds one trash filter for marked addresses not yet covered.

pub mod delete;
pub mod filter;

pub use delete::{collect_marked_message_ids, delete_messages};
pub use filter::{
    build_trash_filter, identify_unfiltered, join_criteria, AccumulationPolicy,
    UnfilteredAccumulator,
};
