//! Genre tag sets for venues and artists.
//!
//! Stored as a JSON array. Tags are trimmed, blanks are dropped and
//! duplicates are removed case-insensitively (the first spelling wins).
//! Equality ignores order.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Genres(Vec<String>);

impl Genres {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() || out.iter().any(|t| same_tag(t, tag)) {
                continue;
            }
            out.push(tag.to_string());
        }
        Self(out)
    }

    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.0.iter().any(|t| same_tag(t, tag))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.iter().map(|t| tag_key(t)).collect();
        keys.sort();
        keys
    }
}

/// Case-folded form used for every tag comparison.
fn tag_key(tag: &str) -> String {
    tag.to_lowercase()
}

fn same_tag(a: &str, b: &str) -> bool {
    tag_key(a) == tag_key(b)
}

impl PartialEq for Genres {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.sorted_keys() == other.sorted_keys()
    }
}

impl Eq for Genres {}

impl From<Vec<String>> for Genres {
    fn from(tags: Vec<String>) -> Self {
        Self::new(tags)
    }
}

impl From<Genres> for Vec<String> {
    fn from(genres: Genres) -> Self {
        genres.0
    }
}
