// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scan configuration system

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Batch-scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions considered candidates (lowercase, no dot)
    pub extensions: Vec<String>,
    /// Force a named driver instead of probing
    pub driver: Option<String>,
    /// Maximum parallel workers
    pub parallelism: Option<usize>,
    /// Output directory for reports
    pub output_dir: PathBuf,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Verbose output
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["2dm".to_string(), "tin".to_string()],
            driver: None,
            parallelism: None, // Auto-detect
            output_dir: PathBuf::from("scan-reports"),
            recursive: true,
            verbose: false,
        }
    }
}

impl ScanConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: ScanConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from("hydromesh-scan.toml").exists() {
            Self::from_file("hydromesh-scan.toml")?
        } else {
            Self::default()
        };

        if let Ok(driver) = std::env::var("HYDROMESH_SCAN_DRIVER") {
            config.driver = Some(driver);
        }

        if let Ok(parallelism) = std::env::var("HYDROMESH_SCAN_PARALLELISM") {
            config.parallelism = parallelism.parse().ok();
        }

        if let Ok(verbose) = std::env::var("HYDROMESH_SCAN_VERBOSE") {
            config.verbose = verbose.parse().unwrap_or(false);
        }

        if let Ok(output_dir) = std::env::var("HYDROMESH_SCAN_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(output_dir);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Check if a file path carries a candidate extension
    pub fn matches_extension(&self, path: &Path) -> bool {
        let extension = match path.extension().and_then(|e| e.to_str()) {
            Some(extension) => extension.to_ascii_lowercase(),
            None => return false,
        };
        self.extensions.iter().any(|e| *e == extension)
    }
}
