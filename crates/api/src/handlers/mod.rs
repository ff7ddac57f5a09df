pub mod activity;
pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod lead;
pub mod lead_form;
pub mod pipeline;
