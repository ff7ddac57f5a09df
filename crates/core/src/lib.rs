//! Domain vocabulary and pure business logic for SalesDesk.
//!
//! Nothing in this crate touches the database; callers pass plain data in.

pub mod activity;
pub mod dashboard;
pub mod error;
pub mod lead;
pub mod lead_form;
pub mod listing;
pub mod pipeline;
pub mod types;
pub mod validation;
