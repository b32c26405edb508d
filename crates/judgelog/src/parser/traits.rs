use std::collections::HashMap;
use serde::{Serialize, Deserialize};

/// Maps a raw judge verdict token to a display label.
///
/// Unknown tokens must come back unchanged.
pub trait VerdictMapper: Send + Sync {
    fn map<'a>(&'a self, raw: &'a str) -> &'a str;
}

/// Verdict lookup table loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerdictTable {
    entries: HashMap<String, String>,
}

impl VerdictTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }
}

impl VerdictMapper for VerdictTable {
    fn map<'a>(&'a self, raw: &'a str) -> &'a str {
        self.get(raw).unwrap_or(raw)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VerdictTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
