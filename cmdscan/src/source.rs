//! Resolving the source argument to files and scanning them.

use anyhow::{bail, Context, Result};
use cmdscan_syntax::{scan_source, FunctionDecl, ScanReport};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions visited when the source is a directory.
pub const SCANNED_EXTENSIONS: &[&str] = &["cpp", "hpp", "h", "c", "cxx"];

/// Expand the source argument into a sorted list of files.
///
/// A file is taken as-is whatever its extension. A directory is walked
/// recursively for [`SCANNED_EXTENSIONS`]. Anything else is a glob pattern
/// that must match at least one file.
pub fn collect_sources(source: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(source);
    let mut files = Vec::new();

    if path.is_file() {
        files.push(path.to_path_buf());
    } else if path.is_dir() {
        let root = source.trim_end_matches(['/', '\\']);
        let pattern = format!("{}/**/*", glob::Pattern::escape(root));
        for entry in glob::glob(&pattern)
            .with_context(|| format!("invalid directory pattern: {pattern}"))?
        {
            let file = entry
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            if file.is_file() && has_scanned_extension(&file) {
                files.push(file);
            }
        }
    } else {
        let matches: Vec<_> = glob::glob(source)
            .with_context(|| format!("invalid glob pattern: {source}"))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            bail!("source not found: {source}");
        }
        files.extend(matches);
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn has_scanned_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCANNED_EXTENSIONS.contains(&ext))
}

/// Path as recorded in generated code: forward slashes on every platform.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Scan every file in order. A file that cannot be read aborts the run.
pub fn scan_files(files: &[PathBuf], tag: &str) -> Result<ScanReport> {
    let mut report = ScanReport::default();
    for path in files {
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        let found = scan_source(&text, &display_path(path), tag);
        tracing::debug!(
            file = %path.display(),
            commands = found.functions.len(),
            failures = found.failures.len(),
            "scanned"
        );
        report.merge(found);
    }
    Ok(report)
}

/// Drop commands whose name was already seen; the first definition wins.
pub fn remove_duplicates(functions: Vec<FunctionDecl>) -> Vec<FunctionDecl> {
    let mut seen: HashMap<String, (String, usize)> = HashMap::new();
    functions
        .into_iter()
        .filter(|decl| match seen.get(decl.name()) {
            Some((file, line)) => {
                tracing::warn!(
                    "{}:{}: command '{}' is already defined at {}:{}, skipping",
                    decl.file(),
                    decl.line(),
                    decl.name(),
                    file,
                    line
                );
                false
            }
            None => {
                seen.insert(
                    decl.name().to_string(),
                    (decl.file().to_string(), decl.line()),
                );
                true
            }
        })
        .collect()
}
