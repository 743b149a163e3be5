//! Serde helpers for the API's loosely-typed fields.

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a string or a number and keeps it as text.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(
        Option::<Lenient>::deserialize(deserializer)?.map(|value| match value {
            Lenient::Text(s) => s,
            Lenient::Int(n) => n.to_string(),
            Lenient::Float(n) => n.to_string(),
        }),
    )
}
