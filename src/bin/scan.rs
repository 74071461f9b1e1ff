// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch scan CLI for directories of mesh files

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use hydromesh::scan::{self, ScanConfig, ScanReporter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hydromesh-scan")]
#[command(about = "Probe and load every mesh file under a directory", long_about = None)]
struct Cli {
    /// Directory to scan
    #[arg(value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Configuration file (TOML); defaults to hydromesh-scan.toml if present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Force a named driver instead of probing
    #[arg(short, long)]
    driver: Option<String>,

    /// Output directory for the JSON report
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not descend into subdirectories
    #[arg(long)]
    flat: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ScanConfig::from_file(path)?,
        None => ScanConfig::load()?,
    };
    if cli.driver.is_some() {
        config.driver = cli.driver.clone();
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    if cli.flat {
        config.recursive = false;
    }
    if cli.verbose {
        config.verbose = true;
    }

    let report = scan::run(&cli.root, &config)?;
    ScanReporter::print_summary(&report, config.verbose);

    let report_path = ScanReporter::write_json(&report, &config.output_dir)?;
    println!("Report written to {}", report_path.display().to_string().cyan());

    if report.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
