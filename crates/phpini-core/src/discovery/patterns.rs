//! Glob pattern compilation using the ignore crate's gitignore matcher

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::Result;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// A glob pattern split into a literal root directory and a wildcard tail
#[derive(Debug, Clone)]
pub struct GlobPattern {
    original: String,
    root: PathBuf,
    depth: Depth,
    matcher: Option<Gitignore>,
}

/// How deep below the root a match may sit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Exactly this many components below the root
    Exact(usize),
    /// Any depth (the pattern contains `**`)
    Any,
}

impl GlobPattern {
    /// Compile a glob pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the wildcard part is not a valid glob.
    pub fn new(pattern: &str) -> Result<Self> {
        let mut root = PathBuf::new();
        let mut tail: Vec<String> = Vec::new();

        for component in Path::new(pattern).components() {
            let text = component.as_os_str().to_string_lossy();
            let is_literal = tail.is_empty() && !text.contains(GLOB_META);
            match component {
                Component::Normal(_) if !is_literal => tail.push(text.into_owned()),
                _ if tail.is_empty() => root.push(component.as_os_str()),
                _ => tail.push(text.into_owned()),
            }
        }

        if root.as_os_str().is_empty() {
            root.push(".");
        }

        if tail.is_empty() {
            return Ok(Self {
                original: pattern.to_string(),
                root,
                depth: Depth::Exact(0),
                matcher: None,
            });
        }

        let depth = if tail.iter().any(|c| c == "**") {
            Depth::Any
        } else {
            Depth::Exact(tail.len())
        };

        let mut builder = GitignoreBuilder::new(&root);
        builder
            .case_insensitive(cfg!(windows))
            .with_context(|| format!("Invalid path pattern: '{pattern}'"))?;
        builder
            .add_line(None, &format!("/{}", tail.join("/")))
            .with_context(|| format!("Invalid path pattern: '{pattern}'"))?;
        let matcher = builder
            .build()
            .with_context(|| format!("Invalid path pattern: '{pattern}'"))?;

        Ok(Self {
            original: pattern.to_string(),
            root,
            depth,
            matcher: Some(matcher),
        })
    }

    /// The pattern as written in the configuration
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Literal directory the wildcard part is evaluated against
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Depth constraint for candidate directories below the root
    #[must_use]
    pub const fn depth(&self) -> Depth {
        self.depth
    }

    /// Check whether a directory below the root matches the wildcard part
    ///
    /// A pattern without wildcards matches only its own root.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        match &self.matcher {
            Some(gitignore) => gitignore.matched(path, true).is_ignore(),
            None => path == self.root,
        }
    }
}
