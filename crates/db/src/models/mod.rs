//! Row models and DTOs, one module per table.

pub mod dashboard;
pub mod problem;
pub mod topic;
pub mod user;
