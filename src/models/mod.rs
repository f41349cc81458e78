//! Data models module
//!
//! Defines the canonical gateway schema and the CrofAI native wire shapes

pub mod canonical;
pub mod crofai;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that is present (possibly `null`) into `Some`.
/// Paired with `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
