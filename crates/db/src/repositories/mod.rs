//! Repository layer: one zero-sized struct per table with async CRUD methods.
//!
//! Every project and task query takes the caller's user id and never touches
//! rows owned by someone else.

pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
