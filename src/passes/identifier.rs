//! Pass identifiers and ordered pass lists

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Name of a single compiler transformation, e.g. `mem2reg`.
///
/// Comparison is case-insensitive; the original spelling is kept for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassIdentifier(String);

impl PassIdentifier {
    /// Create an identifier from a pass name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Name as originally spelled
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded key used for membership tests
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for PassIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.folded() == other.folded()
    }
}

impl Eq for PassIdentifier {}

impl Hash for PassIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded().hash(state);
    }
}

impl fmt::Display for PassIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PassIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Ordered sequence of passes, in application order.
///
/// Duplicates are kept: the same pass may legitimately run more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PassList(Vec<PassIdentifier>);

impl PassList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from pass names, skipping empty names
    ///
    /// ```
    /// use iris_cli::passes::PassList;
    ///
    /// let passes = PassList::from_names(["mem2reg", "", "gvn"]);
    /// assert_eq!(passes.names(), vec!["mem2reg", "gvn"]);
    /// ```
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                (!name.trim().is_empty()).then(|| PassIdentifier::new(name))
            })
            .collect()
    }

    /// Build a list from untyped JSON.
    ///
    /// Malformed entries (null, numbers, objects, empty strings) are dropped
    /// silently: pass lists only feed display, and one bad entry from the
    /// backend should not hide the rest of the prediction. A value that is
    /// not an array at all yields an empty list.
    ///
    /// ```
    /// use iris_cli::passes::PassList;
    /// use serde_json::json;
    ///
    /// let passes = PassList::from_json(&json!(["sroa", null, 7, "licm"]));
    /// assert_eq!(passes.names(), vec!["sroa", "licm"]);
    /// ```
    pub fn from_json(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            if !value.is_null() {
                log::debug!("Ignoring non-array pass list: {}", value);
            }
            return Self::new();
        };

        let list: PassList = items
            .iter()
            .filter_map(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(PassIdentifier::new)
            .collect();

        let dropped = items.len() - list.len();
        if dropped > 0 {
            log::debug!("Dropped {} malformed pass entries", dropped);
        }
        list
    }

    /// Number of passes, counting duplicates
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the list holds no passes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the passes in order
    pub fn iter(&self) -> std::slice::Iter<'_, PassIdentifier> {
        self.0.iter()
    }

    /// Pass names as originally spelled
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(PassIdentifier::as_str).collect()
    }

    /// Whether the list contains `pass`, ignoring case
    pub fn contains(&self, pass: &PassIdentifier) -> bool {
        self.0.contains(pass)
    }

    /// Append a pass
    pub fn push(&mut self, pass: PassIdentifier) {
        self.0.push(pass);
    }

    /// Join pass names with `separator`
    pub fn join(&self, separator: &str) -> String {
        self.names().join(separator)
    }
}

impl FromIterator<PassIdentifier> for PassList {
    fn from_iter<I: IntoIterator<Item = PassIdentifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<PassIdentifier> for PassList {
    fn extend<I: IntoIterator<Item = PassIdentifier>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a PassList {
    type Item = &'a PassIdentifier;
    type IntoIter = std::slice::Iter<'a, PassIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for PassList {
    type Item = PassIdentifier;
    type IntoIter = std::vec::IntoIter<PassIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
