use crate::{rank::Rank, MATCH_ALL, SERVICE_TAG};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, sync::Arc};

pub type Map = BTreeMap<String, String>;

/// A set of tags with unique keys, e.g. `kuma.io/service=web`.
#[derive(Clone, Debug, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Map", into = "Map")]
pub struct Tags(Arc<Map>);

/// A tag pattern. A value of `*` matches any value of that key, and a selector without tags
/// matches every tag set.
#[derive(Clone, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct Selector {
    #[serde(rename = "match", default)]
    match_tags: Map,
}

// === Selector ===

impl Selector {
    pub fn from_map(map: Map) -> Self {
        Self { match_tags: map }
    }

    pub fn match_service(service: impl ToString) -> Self {
        Some((SERVICE_TAG.to_string(), service.to_string()))
            .into_iter()
            .collect()
    }

    pub fn match_any_service() -> Self {
        Self::match_service(MATCH_ALL)
    }

    pub fn matches(&self, tags: &Tags) -> bool {
        self.match_tags.iter().all(|(k, v)| match tags.0.get(k) {
            Some(value) => v == MATCH_ALL || v == value,
            None => false,
        })
    }

    pub fn rank(&self) -> Rank {
        self.match_tags
            .values()
            .fold(Rank::default(), |rank, v| match v.as_str() {
                MATCH_ALL => Rank::new(rank.exact, rank.wildcard + 1),
                _ => Rank::new(rank.exact + 1, rank.wildcard),
            })
    }

    /// Indicates whether the selector matches everything.
    pub fn is_empty(&self) -> bool {
        self.match_tags.is_empty()
    }

    pub fn service(&self) -> Option<&str> {
        self.match_tags.get(SERVICE_TAG).map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.match_tags.get(key).map(String::as_str)
    }
}

impl AsRef<Map> for Selector {
    #[inline]
    fn as_ref(&self) -> &Map {
        &self.match_tags
    }
}

impl std::iter::FromIterator<(String, String)> for Selector {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl std::iter::FromIterator<(&'static str, &'static str)> for Selector {
    fn from_iter<T: IntoIterator<Item = (&'static str, &'static str)>>(iter: T) -> Self {
        Self::from_map(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pairs(&self.match_tags, f)
    }
}

// === Tags ===

impl Tags {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn service(&self) -> Option<&str> {
        self.get(SERVICE_TAG)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A tag set identifying a single service, as used to evaluate destination selectors.
    pub fn for_service(service: impl ToString) -> Self {
        Some((SERVICE_TAG.to_string(), service.to_string()))
            .into_iter()
            .collect()
    }
}

impl From<Map> for Tags {
    #[inline]
    fn from(tags: Map) -> Self {
        Self(Arc::new(tags))
    }
}

impl From<Tags> for Map {
    fn from(tags: Tags) -> Self {
        Arc::try_unwrap(tags.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl AsRef<Map> for Tags {
    #[inline]
    fn as_ref(&self) -> &Map {
        self.0.as_ref()
    }
}

impl<T: AsRef<Map>> std::cmp::PartialEq<T> for Tags {
    #[inline]
    fn eq(&self, t: &T) -> bool {
        self.0.as_ref().eq(t.as_ref())
    }
}

impl std::hash::Hash for Tags {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl std::iter::FromIterator<(String, String)> for Tags {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

impl std::iter::FromIterator<(&'static str, &'static str)> for Tags {
    fn from_iter<T: IntoIterator<Item = (&'static str, &'static str)>>(iter: T) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pairs(&self.0, f)
    }
}

fn fmt_pairs(map: &Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}={}", k, v)?;
    }
    Ok(())
}
