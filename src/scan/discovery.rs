// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Candidate-file discovery

use super::ScanConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collect candidate mesh files under `root`, sorted for stable reports
pub fn discover(root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        anyhow::bail!("scan root does not exist: {}", root.display());
    }

    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(root).max_depth(max_depth) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if config.matches_extension(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.2dm"), "MESH2D\n").unwrap();
        fs::write(dir.path().join("a.tin"), "TIN\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "irrelevant").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.2dm"), "MESH2D\n").unwrap();

        let config = ScanConfig::default();
        let files = discover(dir.path(), &config).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.tin", "b.2dm", "c.2dm"]);
    }

    #[test]
    fn test_discover_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("top.2dm"), "MESH2D\n").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.2dm"), "MESH2D\n").unwrap();

        let config = ScanConfig {
            recursive: false,
            ..ScanConfig::default()
        };
        let files = discover(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_discover_missing_root() {
        let config = ScanConfig::default();
        assert!(discover(Path::new("non/existent/dir"), &config).is_err());
    }
}
