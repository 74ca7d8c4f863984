//! Common types and utilities for command execution

/// Execution options shared by commands
pub struct RunOptions {
    /// Preview changes without applying (dry-run)
    pub dry_run: bool,
}

impl RunOptions {
    /// Create new run options
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }
}
