//! Serde helpers for patch payloads.

use serde::{Deserialize, Deserializer};

/// Deserializes a nullable field so that an absent key stays `None` while an
/// explicit `null` becomes `Some(None)`.
///
/// Used with `#[serde(default, deserialize_with = "double_option")]` on
/// `Option<Option<T>>` patch fields.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
