//! Row change notifications.
//!
//! - [`bus`] -- in-process broadcast bus carrying [`ChangeEvent`]s.

pub mod bus;

pub use bus::{ChangeEvent, ChangeOp, ChangeTable, EventBus};
