use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::error::{DomainError, DomainResult};

/// Well-known option keys.
pub mod keys {
    pub const PROJECT: &str = "project";
    pub const PACKAGE: &str = "package";
    pub const AUTHOR: &str = "author";
    pub const EMAIL: &str = "email";
    pub const DESCRIPTION: &str = "description";
    pub const LICENSE: &str = "license";
    pub const URL: &str = "url";
    pub const VERSION: &str = "version";
    pub const YEAR: &str = "year";
    pub const PYTHON_VERSION: &str = "python_version";
}

/// Scalar configuration values for a generation run.
///
/// Supplied by the host and threaded through the pipeline next to the
/// [`ProjectTree`](super::ProjectTree). Templates read their placeholders from
/// here. Keys are kept sorted so that debug output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Options(BTreeMap<String, String>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert `key` only if it has no value yet.
    pub fn set_default(&mut self, key: &str, value: impl FnOnce(&Self) -> String) {
        if !self.0.contains_key(key) {
            let value = value(self);
            self.0.insert(key.to_owned(), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up a value that must be present.
    pub fn require(&self, key: &str) -> DomainResult<&str> {
        self.get(key).ok_or_else(|| DomainError::MissingOption {
            key: key.to_owned(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
