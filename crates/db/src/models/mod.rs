//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Nullable columns use `Option<Option<T>>` in update DTOs: an absent key
//! leaves the column alone, an explicit `null` clears it.

use serde::{Deserialize, Deserializer};

pub mod activity;
pub mod contact;
pub mod lead;
pub mod lead_form;
pub mod session;
pub mod user;

/// Deserialize a present key (including `null`) as `Some(_)`.
///
/// Pair with `#[serde(default)]` so a missing key stays `None`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Whether a nullable patch field was sent, and the value to write.
pub fn patch_value<T: Clone>(field: &Option<Option<T>>) -> (bool, Option<T>) {
    (field.is_some(), field.clone().flatten())
}
