//! Discovery of PHP installation directories from glob patterns
//!
//! Patterns are compiled up front so that a malformed glob is reported as a
//! configuration error. Expansion itself is lazy: [`Installations`] walks the
//! filesystem for one pattern at a time as the caller pulls paths from it.

mod patterns;

use std::collections::HashSet;
use std::path::PathBuf;

use walkdir::WalkDir;

pub use patterns::{Depth, GlobPattern};

use crate::error::Result;

/// Compiled set of installation glob patterns
#[derive(Debug, Clone)]
pub struct InstallationDiscovery {
    patterns: Vec<GlobPattern>,
}

impl InstallationDiscovery {
    /// Compile the given glob patterns, preserving their order
    ///
    /// # Errors
    ///
    /// Returns an error if any pattern is not a valid glob.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| GlobPattern::new(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Lazily expand every pattern into existing installation directories
    ///
    /// Each call starts a fresh expansion.
    #[must_use]
    pub fn installations(&self) -> Installations<'_> {
        Installations {
            patterns: self.patterns.iter(),
            current: None,
            seen: HashSet::new(),
        }
    }
}

/// Walk state for the pattern currently being expanded
struct PatternWalk<'a> {
    pattern: &'a GlobPattern,
    entries: walkdir::IntoIter,
}

impl<'a> PatternWalk<'a> {
    fn new(pattern: &'a GlobPattern) -> Self {
        let walker = WalkDir::new(pattern.root())
            .follow_links(true)
            .sort_by_file_name();
        let walker = match pattern.depth() {
            Depth::Exact(depth) => walker.min_depth(depth).max_depth(depth),
            Depth::Any => walker.min_depth(1),
        };

        Self {
            pattern,
            entries: walker.into_iter(),
        }
    }

    fn next_match(&mut self) -> Option<PathBuf> {
        for entry in self.entries.by_ref() {
            let Ok(entry) = entry else {
                continue;
            };
            if entry.file_type().is_dir() && self.pattern.matches(entry.path()) {
                return Some(entry.into_path());
            }
        }
        None
    }
}

/// Pull-based iterator over discovered installation directories
///
/// Yields canonical paths that exist and are directories; entries that fail
/// to resolve are skipped. A directory matched by several patterns is
/// yielded once.
pub struct Installations<'a> {
    patterns: std::slice::Iter<'a, GlobPattern>,
    current: Option<PatternWalk<'a>>,
    seen: HashSet<PathBuf>,
}

impl Iterator for Installations<'_> {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if self.current.is_none() {
                let pattern = self.patterns.next()?;
                tracing::debug!(pattern = pattern.as_str(), "Expanding path pattern");
                self.current = Some(PatternWalk::new(pattern));
            }

            let walk = self.current.as_mut()?;
            let Some(candidate) = walk.next_match() else {
                self.current = None;
                continue;
            };

            let resolved = match dunce::canonicalize(&candidate) {
                Ok(path) if path.is_dir() => path,
                Ok(_) | Err(_) => {
                    tracing::debug!(path = %candidate.display(), "Skipping unresolvable match");
                    continue;
                }
            };

            if self.seen.insert(resolved.clone()) {
                return Some(resolved);
            }
        }
    }
}
