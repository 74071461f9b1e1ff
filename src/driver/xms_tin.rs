// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! XMS TIN driver (read-only)
//!
//! Triangulated irregular networks in the Aquaveo TIN ASCII layout: a `TIN`
//! header, one `BEGT`/`ENDT` block with a `VERT` section of coordinates
//! (implicit sequential identifiers) and a `TRI` section of 1-based vertex
//! index triples.

use super::{first_line, open_for_read, Driver};
use crate::dataset::{DataLocation, Dataset, DatasetGroup};
use crate::error::{Error, Result};
use crate::mesh::{Face, Mesh, Vertex};
use crate::utils::parse::{next_token, parse_f64, parse_usize};
use nalgebra::Point3;
use std::io::{BufRead, BufReader};
use std::path::Path;

const DRIVER_NAME: &str = "XMS_TIN";
const HEADER: &str = "TIN";
const VERTEX_GROUP: &str = "Bed Elevation";

pub struct XmsTinDriver;

impl Driver for XmsTinDriver {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn long_name(&self) -> &str {
        "XMS TIN"
    }

    fn filters(&self) -> &str {
        "*.tin"
    }

    fn probe(&self, path: &Path) -> bool {
        first_line(path)
            .map(|line| line.trim() == HEADER)
            .unwrap_or(false)
    }

    fn load(&self, path: &Path) -> Result<Mesh> {
        parse(path)
    }
}

fn parse(path: &Path) -> Result<Mesh> {
    let reader = BufReader::new(open_for_read(path)?);
    let lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;
    let mut cursor = Cursor::new(&lines);

    match cursor.next_content_line() {
        Some(line) if line.trim() == HEADER => {}
        _ => return Err(Error::UnknownFormat(DRIVER_NAME.to_string())),
    }

    let mut vertices: Vec<Vertex> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();

    while let Some(line) = cursor.next_content_line() {
        let mut tokens = line.split_whitespace();
        let card = match tokens.next() {
            Some(card) => card,
            None => continue,
        };
        match card {
            "BEGT" | "ID" | "TNAM" | "TCOL" => {}
            "VERT" => {
                let count = parse_usize(next_token(&mut tokens, card)?, card)?;
                for _ in 0..count {
                    let line = cursor.next_content_line().ok_or_else(|| {
                        Error::invalid_data("truncated VERT section".to_string())
                    })?;
                    let mut tokens = line.split_whitespace();
                    let x = parse_f64(next_token(&mut tokens, "VERT")?, "VERT")?;
                    let y = parse_f64(next_token(&mut tokens, "VERT")?, "VERT")?;
                    let z = parse_f64(next_token(&mut tokens, "VERT")?, "VERT")?;
                    vertices.push(Point3::new(x, y, z));
                }
            }
            "TRI" => {
                let count = parse_usize(next_token(&mut tokens, card)?, card)?;
                for _ in 0..count {
                    let line = cursor.next_content_line().ok_or_else(|| {
                        Error::invalid_data("truncated TRI section".to_string())
                    })?;
                    let mut tokens = line.split_whitespace();
                    let mut indices = Vec::with_capacity(3);
                    for _ in 0..3 {
                        let id = parse_usize(next_token(&mut tokens, "TRI")?, "TRI")?;
                        if id == 0 || id > vertices.len() {
                            return Err(Error::invalid_data(format!(
                                "triangle references vertex {} of {}",
                                id,
                                vertices.len()
                            )));
                        }
                        indices.push(id - 1);
                    }
                    faces.push(Face::new(indices));
                }
            }
            "ENDT" => break,
            _ => {}
        }
    }

    let mut mesh = Mesh::new(DRIVER_NAME, vertices, faces, Vec::new())?;

    if mesh.vertex_count() > 0 {
        let values: Vec<f64> = mesh.vertices().iter().map(|v| v.z).collect();
        let mut group = DatasetGroup::new(VERTEX_GROUP, DataLocation::Vertices, true);
        group.add_dataset(Dataset::new_scalar(0.0, values))?;
        mesh.add_dataset_group(group)?;
    }

    Ok(mesh)
}

struct Cursor<'a> {
    lines: &'a [String],
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(lines: &'a [String]) -> Self {
        Self { lines, position: 0 }
    }

    fn next_content_line(&mut self) -> Option<&'a str> {
        while self.position < self.lines.len() {
            let line = self.lines[self.position].as_str();
            self.position += 1;
            if !line.trim().is_empty() {
                return Some(line);
            }
        }
        None
    }
}
