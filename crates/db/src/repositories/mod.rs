//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dashboard_repo;
pub mod problem_repo;
pub mod topic_repo;
pub mod user_repo;

pub use dashboard_repo::DashboardRepo;
pub use problem_repo::ProblemRepo;
pub use topic_repo::TopicRepo;
pub use user_repo::UserRepo;
