//! Run settings, validated once before any file is touched.

use anyhow::{bail, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static RE_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Header the generated file includes when no other name is given.
pub const DEFAULT_SUPPORT_HEADER: &str = "cmdscan.hpp";

#[derive(Debug, Clone)]
pub struct Settings {
    /// File, directory or glob pattern to scan.
    pub source: String,
    pub destination: PathBuf,
    pub search_term: String,
    pub init_function_name: String,
    pub wrapper_prefix: String,
    pub format: String,
    pub support_header: Option<PathBuf>,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        ensure_identifier("search term", &self.search_term)?;
        ensure_identifier("init function name", &self.init_function_name)?;
        ensure_identifier("wrapper prefix", &self.wrapper_prefix)?;
        if self.destination.extension().is_none() {
            bail!(
                "destination must be a file path with an extension: {}",
                self.destination.display()
            );
        }
        Ok(())
    }

    /// Name the generated file uses in its `#include` of the support header.
    pub fn support_include(&self) -> String {
        self.support_header
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_SUPPORT_HEADER.to_string())
    }
}

fn ensure_identifier(what: &str, value: &str) -> Result<()> {
    if !RE_IDENTIFIER.is_match(value) {
        bail!("{what} must be a C identifier, got '{value}'");
    }
    Ok(())
}
