// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scan report output: colored console summary and JSON artifact

use super::ScanReport;
use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};

pub struct ScanReporter;

impl ScanReporter {
    /// Print a colored summary of the scan
    pub fn print_summary(report: &ScanReport, verbose: bool) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {} ({})",
            "Scanned:".bold(),
            report.root.display().to_string().cyan(),
            report.generated_at.bright_black()
        );
        println!("{}", "━".repeat(80).bright_black());

        println!(
            "  {} {}  {} {}  {} {}",
            "Files:".bright_black(),
            report.total,
            "Loaded:".bright_black(),
            report.loaded.to_string().green(),
            "Failed:".bright_black(),
            if report.failed > 0 {
                report.failed.to_string().red()
            } else {
                report.failed.to_string().green()
            }
        );

        if !report.per_driver.is_empty() {
            println!("\n{}", "Per driver:".bold());
            for tally in &report.per_driver {
                println!("  {:<10} {}", tally.driver.cyan(), tally.count);
            }
        }

        for outcome in &report.outcomes {
            if outcome.loaded() {
                if verbose {
                    let summary = outcome.summary.as_ref();
                    println!(
                        "  {} {} ({} vertices, {} faces, {:.1}ms)",
                        "✅".green(),
                        outcome.path.display(),
                        summary.map(|s| s.vertex_count).unwrap_or(0),
                        summary.map(|s| s.face_count).unwrap_or(0),
                        outcome.duration_ms
                    );
                }
            } else {
                println!(
                    "  {} {} [{}] {}",
                    "❌".red(),
                    outcome.path.display(),
                    outcome.status.name().yellow(),
                    outcome.message.as_deref().unwrap_or("").bright_black()
                );
            }
        }

        println!("{}", "━".repeat(80).bright_black());
    }

    /// Write the JSON report, returning its path
    pub fn write_json(report: &ScanReport, output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
        let path = output_dir.join("scan_report.json");
        let content =
            serde_json::to_string_pretty(report).context("Failed to serialize scan report")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}
