use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Series identifiers selected for value-driven colouring.
/// Empty means "no filtering": every series is coloured.
///
/// Identifiers are stored as strings; cluster ids arrive as numbers from the
/// page and are coerced with `to_string` so they compare against series names.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighlightSet(BTreeSet<String>);

impl HighlightSet {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, series_name: &str) -> bool {
        self.0.contains(series_name)
    }

    /// True when a series with this name should get value-based colours.
    pub fn selects(&self, series_name: &str) -> bool {
        self.is_empty() || self.contains(series_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<T: ToString> FromIterator<T> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(|id| id.to_string()).collect())
    }
}

impl fmt::Display for HighlightSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "(all)")
        } else {
            write!(f, "{}", self.0.iter().join(", "))
        }
    }
}
