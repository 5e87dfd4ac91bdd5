//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod change_request_repo;
pub mod staff_repo;
pub mod user_repo;
pub mod ward_repo;

pub use assignment_repo::AssignmentRepo;
pub use change_request_repo::ChangeRequestRepo;
pub use staff_repo::StaffRepo;
pub use user_repo::UserRepo;
pub use ward_repo::WardRepo;
