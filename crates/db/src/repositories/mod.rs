//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod help_request_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use help_request_repo::HelpRequestRepo;
pub use user_repo::UserRepo;
