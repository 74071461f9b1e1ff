// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hydromesh CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use hydromesh::cli::{MeshSummary, Reporter};
use hydromesh::driver::DriverRegistry;
use std::path::Path;

#[derive(Parser)]
#[command(name = "hydromesh")]
#[command(about = "Hydromesh - unified loader for hydraulic mesh file formats", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input mesh file
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Force a driver instead of probing
    #[arg(short, long)]
    driver: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a mesh file and print its summary
    Info {
        /// Input mesh file
        input: String,

        /// Force a driver instead of probing
        #[arg(short, long)]
        driver: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a mesh and save it through a write-capable driver
    Convert {
        /// Input mesh file
        input: String,

        /// Output file
        #[arg(short, long)]
        output: String,

        /// Driver used for saving
        #[arg(short, long, default_value = "2DM")]
        driver: String,
    },

    /// List registered drivers and their capabilities
    Drivers,

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Info {
            input,
            driver,
            json,
        }) => {
            info_command(input, driver.as_deref(), *json)?;
        }
        Some(Commands::Convert {
            input,
            output,
            driver,
        }) => {
            convert_command(input, output, driver, cli.verbose)?;
        }
        Some(Commands::Drivers) => {
            Reporter::report_drivers(&DriverRegistry::default());
        }
        Some(Commands::Version) => {
            println!("Hydromesh v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            // Default behavior: info on the positional input
            if let Some(input) = &cli.input {
                info_command(input, cli.driver.as_deref(), cli.json)?;
            } else {
                eprintln!("Error: Input file required");
                eprintln!("Usage: hydromesh <FILE> [--driver <NAME>] [--json]");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn info_command(input: &str, driver: Option<&str>, json: bool) -> Result<()> {
    if !Path::new(input).exists() {
        eprintln!("Error: Input file not found: {}", input);
        std::process::exit(1);
    }

    let registry = DriverRegistry::default();
    let start = std::time::Instant::now();
    let mesh = registry.load(Path::new(input), driver)?;
    let load_time = start.elapsed();

    let summary = MeshSummary::from_mesh(&mesh);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        Reporter::report_mesh(input, &summary, load_time);
    }

    Ok(())
}

fn convert_command(input: &str, output: &str, driver: &str, verbose: bool) -> Result<()> {
    if !Path::new(input).exists() {
        eprintln!("Error: Input file not found: {}", input);
        std::process::exit(1);
    }

    let registry = DriverRegistry::default();
    let start = std::time::Instant::now();
    let mesh = registry.load(Path::new(input), None)?;

    if verbose {
        println!(
            "Loaded: {} vertices, {} faces",
            mesh.vertex_count(),
            mesh.face_count()
        );
    }

    registry.save(&mesh, Path::new(output), driver)?;
    Reporter::report_convert(input, output, driver, start.elapsed());

    Ok(())
}
