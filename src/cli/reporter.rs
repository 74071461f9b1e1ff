// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::MeshSummary;
use crate::driver::DriverRegistry;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a loaded mesh with colors
    pub fn report_mesh(file: &str, summary: &MeshSummary, load_time: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        println!("  {} {}", "Driver:".bright_black(), summary.driver.bold());
        println!(
            "  {} {}  {} {}  {} {}",
            "Vertices:".bright_black(),
            summary.vertex_count,
            "Faces:".bright_black(),
            summary.face_count,
            "Edges:".bright_black(),
            summary.edge_count
        );
        println!(
            "  {} {}",
            "Max vertices per face:".bright_black(),
            summary.face_vertices_maximum_count
        );
        if summary.extent.is_empty() {
            println!("  {} {}", "Extent:".bright_black(), "empty".yellow());
        } else {
            println!(
                "  {} x [{} .. {}]  y [{} .. {}]",
                "Extent:".bright_black(),
                summary.extent.min_x,
                summary.extent.max_x,
                summary.extent.min_y,
                summary.extent.max_y
            );
        }

        if summary.groups.is_empty() {
            println!("\n{}", "No dataset groups".yellow());
        } else {
            println!("\n{}", "Dataset groups:".bold());
            for group in &summary.groups {
                let arity = if group.scalar { "scalar" } else { "vector" };
                let range = match group.statistics {
                    Some(stats) => format!("[{} .. {}]", stats.minimum, stats.maximum),
                    None => "empty range".to_string(),
                };
                println!(
                    "  {} {} on {} | {} step(s) | {}",
                    group.name.cyan(),
                    arity.bright_black(),
                    group.location,
                    group.dataset_count,
                    range.bright_black()
                );
            }
        }

        println!(
            "\n  {} {}",
            "Loaded in:".bright_black(),
            Self::format_duration(load_time).cyan()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report the registered drivers and their capabilities
    pub fn report_drivers(registry: &DriverRegistry) {
        println!("{}", "Registered drivers:".bold());
        for index in 0..registry.driver_count() {
            if let Some(driver) = registry.driver(index) {
                let capability = if driver.can_write() {
                    "load + save".green()
                } else {
                    "load only".yellow()
                };
                println!(
                    "  {:<10} {} ({}) [{}]",
                    driver.name().cyan(),
                    driver.long_name(),
                    driver.filters().bright_black(),
                    capability
                );
            }
        }
    }

    /// Report a successful conversion
    pub fn report_convert(input: &str, output: &str, driver: &str, total_time: Duration) {
        println!(
            "{} {} {} {} ({}, {})",
            "✅".green(),
            input.cyan(),
            "→".bright_black(),
            output.cyan(),
            driver.bold(),
            Self::format_duration(total_time)
        );
    }

    fn format_duration(duration: Duration) -> String {
        let millis = duration.as_secs_f64() * 1000.0;
        if millis < 1.0 {
            format!("{:.0}µs", millis * 1000.0)
        } else if millis < 1000.0 {
            format!("{:.1}ms", millis)
        } else {
            format!("{:.2}s", millis / 1000.0)
        }
    }
}
