//! Seeding a missing `php.ini` from a base template

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::{PhpIniError, Result};

/// Name of the ini file maintained in every installation
pub const INI_FILE_NAME: &str = "php.ini";

/// Where an installation's ini file comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IniFile {
    /// `php.ini` already exists
    Existing(PathBuf),
    /// `php.ini` is missing and will be copied from a base template
    Seeded {
        /// Destination `php.ini`
        ini: PathBuf,
        /// Template the ini is copied from
        template: PathBuf,
    },
}

impl IniFile {
    /// Path of the `php.ini` file
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Existing(ini) | Self::Seeded { ini, .. } => ini,
        }
    }

    /// Whether the ini has to be created from a template
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded { .. })
    }
}

/// Locates or creates the `php.ini` of an installation
pub struct IniBootstrapper;

impl IniBootstrapper {
    /// Resolve the ini file for `dir` without touching the filesystem
    ///
    /// Candidates in `base_files` are tried in order; the first one that
    /// exists as a file in `dir` is used as the template.
    ///
    /// # Errors
    ///
    /// Returns [`PhpIniError::NoBaseFile`] if there is no `php.ini` and no
    /// candidate exists.
    pub fn locate(dir: &Path, base_files: &[String]) -> Result<IniFile> {
        let ini = dir.join(INI_FILE_NAME);
        if ini.is_file() {
            return Ok(IniFile::Existing(ini));
        }

        base_files
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
            .map(|template| IniFile::Seeded { ini, template })
            .ok_or_else(|| {
                PhpIniError::NoBaseFile {
                    dir: dir.to_path_buf(),
                    candidates: base_files.join(", "),
                }
                .into()
            })
    }

    /// Copy the template into place for a seeded ini file
    ///
    /// Existing ini files are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy fails.
    pub fn materialize(file: &IniFile) -> Result<()> {
        if let IniFile::Seeded { ini, template } = file {
            fs::copy(template, ini).with_context(|| {
                format!("Failed to copy {} to {}", template.display(), ini.display())
            })?;
            tracing::info!(
                from = %template.display(),
                to = %ini.display(),
                "Created php.ini from base file"
            );
        }
        Ok(())
    }
}
