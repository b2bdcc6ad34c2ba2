// Job board API response types.
// Defines structs for deserializing countries and internship postings.

use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Items parsed from a response, plus the JSON text they were parsed from.
///
/// The cache stores `raw` so a later read sees exactly what the API sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub raw: String,
}

impl<T> Fetched<T> {
    /// Parse `raw` as a JSON array of `T`.
    pub fn parse(raw: &str) -> serde_json::Result<Self>
    where
        T: for<'de> Deserialize<'de>,
    {
        Ok(Self {
            items: serde_json::from_str(raw)?,
            raw: raw.to_string(),
        })
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A country offered in the search dropdown.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Country {
    #[cfg(test)]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An internship posting.
///
/// Every field tolerates being absent or `null`; a card renders blanks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Internship {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule_type: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_links: Vec<RelatedLink>,
}

impl Internship {
    /// The link a card opens when activated.
    pub fn primary_link(&self) -> Option<&str> {
        self.related_links
            .first()
            .map(|l| l.link.as_str())
            .filter(|link| !link.is_empty())
    }
}

/// A link attached to a posting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelatedLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
}

/// Response wrapper for the internships search. Borrows the array text.
#[derive(Debug, Deserialize)]
pub(crate) struct InternshipsResponse<'a> {
    #[serde(borrow)]
    pub internships: &'a RawValue,
}
