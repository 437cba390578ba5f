use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::error::{DomainError, DomainResult};

/// In-memory representation of the project before materialization.
///
/// A nested mapping from path segments to either file content or further
/// directories. Extensions never touch the disk; they propose insertions and
/// removals through [`ProjectTree::ensure`] and [`ProjectTree::reject`].
///
/// Entries are kept in a `BTreeMap` so that iteration (and therefore the order
/// in which files are written) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectTree {
    entries: BTreeMap<String, TreeNode>,
}

/// A single node of the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File(String),
    Dir(ProjectTree),
}

/// How [`ProjectTree::ensure`] treats a file that is already present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Replace existing content.
    Overwrite,
    /// Keep existing content untouched.
    #[default]
    NoOverwrite,
}

impl ProjectTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a file exists at `path` with `content`.
    ///
    /// Missing intermediate directories are created. With
    /// [`MergeMode::NoOverwrite`] an existing file keeps its content.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EmptyPath`] for a path without segments
    /// - [`DomainError::InvalidPathSegment`] for segments like `..` or `a/b`
    /// - [`DomainError::PathConflict`] when a file sits where a directory is
    ///   needed, or the other way round
    pub fn ensure<S: AsRef<str>>(
        &mut self,
        path: &[S],
        content: impl Into<String>,
        mode: MergeMode,
    ) -> DomainResult<()> {
        validate_path(path)?;
        let (leaf, parents) = path.split_last().ok_or(DomainError::EmptyPath)?;

        let mut dir = self;
        for (depth, segment) in parents.iter().enumerate() {
            dir = match dir
                .entries
                .entry(segment.as_ref().to_owned())
                .or_insert_with(|| TreeNode::Dir(ProjectTree::new()))
            {
                TreeNode::Dir(sub) => sub,
                TreeNode::File(_) => {
                    return Err(DomainError::PathConflict {
                        path: display_path(&path[..=depth]),
                        reason: "a file exists where a directory is required".into(),
                    });
                }
            };
        }

        match dir.entries.get_mut(leaf.as_ref()) {
            Some(TreeNode::Dir(_)) => Err(DomainError::PathConflict {
                path: display_path(path),
                reason: "a directory exists where a file is required".into(),
            }),
            Some(TreeNode::File(existing)) => {
                if mode == MergeMode::Overwrite {
                    *existing = content.into();
                }
                Ok(())
            }
            None => {
                dir.entries
                    .insert(leaf.as_ref().to_owned(), TreeNode::File(content.into()));
                Ok(())
            }
        }
    }

    /// Remove whatever lives at `path` and return it.
    ///
    /// Removing a path that does not exist is a no-op.
    pub fn reject<S: AsRef<str>>(&mut self, path: &[S]) -> Option<TreeNode> {
        let (leaf, parents) = path.split_last()?;

        let mut dir = self;
        for segment in parents {
            dir = match dir.entries.get_mut(segment.as_ref()) {
                Some(TreeNode::Dir(sub)) => sub,
                _ => return None,
            };
        }

        dir.entries.remove(leaf.as_ref())
    }

    /// Rewrite the content of an existing file.
    ///
    /// Returns `false` (and does nothing) when `path` is not a file.
    pub fn modify<S, F>(&mut self, path: &[S], f: F) -> bool
    where
        S: AsRef<str>,
        F: FnOnce(&str) -> String,
    {
        match self.node_mut(path) {
            Some(TreeNode::File(content)) => {
                *content = f(content);
                true
            }
            _ => false,
        }
    }

    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<&TreeNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.entries.get(first.as_ref())?;
        for segment in rest {
            node = match node {
                TreeNode::Dir(sub) => sub.entries.get(segment.as_ref())?,
                TreeNode::File(_) => return None,
            };
        }
        Some(node)
    }

    /// Content of the file at `path`, if `path` is a file.
    pub fn file<S: AsRef<str>>(&self, path: &[S]) -> Option<&str> {
        match self.get(path) {
            Some(TreeNode::File(content)) => Some(content),
            _ => None,
        }
    }

    pub fn contains<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.get(path).is_some()
    }

    /// All files as `(relative path, content)` pairs in lexical order.
    pub fn files(&self) -> Vec<(PathBuf, &str)> {
        let mut out = Vec::new();
        self.collect_files(PathBuf::new(), &mut out);
        out
    }

    /// Directories that contain no entries at all.
    ///
    /// These still need to be created when the tree is written out.
    pub fn empty_directories(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        self.collect_empty_dirs(PathBuf::new(), &mut out);
        out
    }

    pub fn file_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                TreeNode::File(_) => 1,
                TreeNode::Dir(sub) => sub.file_count(),
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn node_mut<S: AsRef<str>>(&mut self, path: &[S]) -> Option<&mut TreeNode> {
        let (leaf, parents) = path.split_last()?;
        let mut dir = self;
        for segment in parents {
            dir = match dir.entries.get_mut(segment.as_ref()) {
                Some(TreeNode::Dir(sub)) => sub,
                _ => return None,
            };
        }
        dir.entries.get_mut(leaf.as_ref())
    }

    fn collect_files<'a>(&'a self, prefix: PathBuf, out: &mut Vec<(PathBuf, &'a str)>) {
        for (name, node) in &self.entries {
            let path = prefix.join(name);
            match node {
                TreeNode::File(content) => out.push((path, content.as_str())),
                TreeNode::Dir(sub) => sub.collect_files(path, out),
            }
        }
    }

    fn collect_empty_dirs(&self, prefix: PathBuf, out: &mut Vec<PathBuf>) {
        for (name, node) in &self.entries {
            if let TreeNode::Dir(sub) = node {
                let path = prefix.join(name);
                if sub.is_empty() {
                    out.push(path);
                } else {
                    sub.collect_empty_dirs(path, out);
                }
            }
        }
    }
}

/// Segments are single, non-traversing path components.
fn validate_path<S: AsRef<str>>(path: &[S]) -> DomainResult<()> {
    if path.is_empty() {
        return Err(DomainError::EmptyPath);
    }
    for segment in path {
        let segment = segment.as_ref();
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains('/')
            || segment.contains('\\')
        {
            return Err(DomainError::InvalidPathSegment {
                path: display_path(path),
                segment: segment.to_owned(),
            });
        }
    }
    Ok(())
}

pub(crate) fn display_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}
