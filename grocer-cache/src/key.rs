//! Cache key derivation.

use std::collections::BTreeMap;
use std::fmt;

/// Identifies one logical query: a request path plus its parameters.
///
/// Parameters live in a sorted map, so the insertion order never changes
/// the key. Rendered as `path` or `path?a=1&b=2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    path: String,
    params: BTreeMap<String, String>,
}

impl CacheKey {
    /// Key for a path without parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            params: BTreeMap::new(),
        }
    }

    /// Key for a path with a parameter set.
    pub fn with_params<I, K, V>(path: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        params
            .into_iter()
            .fold(Self::new(path), |key, (k, v)| key.param(k, v))
    }

    /// Adds a parameter. A repeated name replaces the earlier value.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameters in sorted order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, k, v)?;
        }
        Ok(())
    }
}
