//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query on a
//! user-owned table also takes the caller's `owner_id`, so a row belonging
//! to another user behaves exactly like a missing row.

pub mod activity_repo;
pub mod contact_repo;
pub mod lead_form_repo;
pub mod lead_repo;
pub mod session_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use contact_repo::ContactRepo;
pub use lead_form_repo::LeadFormRepo;
pub use lead_repo::LeadRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
