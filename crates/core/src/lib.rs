//! PrepVault domain rules.
//!
//! Pure logic with no I/O: the error taxonomy, Problem and Topic
//! vocabularies, Topic revision snapshots, and the dashboard counter rules.

pub mod dashboard;
pub mod error;
pub mod problem;
pub mod search;
pub mod topic;
pub mod types;
