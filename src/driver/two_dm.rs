// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SMS 2DM driver (read + write)
//!
//! Line-oriented cards: `ND` vertices, `E3T`/`E4Q` faces, `E2L` edges.
//! Elements may precede vertices in the file, so vertex references are
//! collected as raw source identifiers and resolved after the whole file
//! has been read. Vertex Z becomes the on-vertices "Bed Elevation" group;
//! when `NUM_MATERIALS_PER_ELEM` declares materials, the first material
//! column becomes the on-faces "Bed Elevation (Face)" group.

use super::{first_line, open_for_read, Driver};
use crate::dataset::{DataLocation, Dataset, DatasetGroup};
use crate::error::{Error, Result};
use crate::mesh::{Edge, Face, Mesh, SourceIdIndex, Vertex};
use crate::utils::parse::{next_token, parse_f64, parse_u64, parse_usize};
use nalgebra::Point3;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const DRIVER_NAME: &str = "2DM";
const HEADER: &str = "MESH2D";
const VERTEX_GROUP: &str = "Bed Elevation";
const FACE_GROUP: &str = "Bed Elevation (Face)";

pub struct TwoDmDriver;

impl Driver for TwoDmDriver {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn long_name(&self) -> &str {
        "2DM Mesh File"
    }

    fn filters(&self) -> &str {
        "*.2dm"
    }

    fn can_write(&self) -> bool {
        true
    }

    fn probe(&self, path: &Path) -> bool {
        first_line(path)
            .map(|line| line.trim_start().starts_with(HEADER))
            .unwrap_or(false)
    }

    fn load(&self, path: &Path) -> Result<Mesh> {
        parse(path)
    }

    fn save(&self, mesh: &Mesh, path: &Path) -> Result<()> {
        write_mesh(mesh, path)
    }
}

struct RawFace {
    vertex_ids: Vec<u64>,
    material: Option<f64>,
}

fn parse(path: &Path) -> Result<Mesh> {
    let reader = BufReader::new(open_for_read(path)?);
    let mut lines = reader.lines();

    let header = lines.next().transpose()?.unwrap_or_default();
    if !header.trim_start().starts_with(HEADER) {
        return Err(Error::UnknownFormat(DRIVER_NAME.to_string()));
    }

    let mut vertex_ids = SourceIdIndex::new();
    let mut element_ids = SourceIdIndex::new();
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut raw_faces: Vec<RawFace> = Vec::new();
    let mut raw_edges: Vec<(u64, u64)> = Vec::new();
    let mut materials_per_element = 0usize;

    for line in lines {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let card = match tokens.next() {
            Some(card) => card,
            None => continue,
        };
        match card {
            "ND" => {
                let id = parse_u64(next_token(&mut tokens, card)?, card)?;
                vertex_ids.declare(id)?;
                let x = parse_f64(next_token(&mut tokens, card)?, card)?;
                let y = parse_f64(next_token(&mut tokens, card)?, card)?;
                let z = parse_f64(next_token(&mut tokens, card)?, card)?;
                vertices.push(Point3::new(x, y, z));
            }
            "E3T" => raw_faces.push(parse_face(&mut tokens, card, 3, &mut element_ids)?),
            "E4Q" => raw_faces.push(parse_face(&mut tokens, card, 4, &mut element_ids)?),
            "E2L" => {
                let id = parse_u64(next_token(&mut tokens, card)?, card)?;
                element_ids.declare(id)?;
                let start = parse_u64(next_token(&mut tokens, card)?, card)?;
                let end = parse_u64(next_token(&mut tokens, card)?, card)?;
                raw_edges.push((start, end));
            }
            "NUM_MATERIALS_PER_ELEM" => {
                materials_per_element = parse_usize(next_token(&mut tokens, card)?, card)?;
            }
            // MESHNAME and vendor-specific cards carry nothing structural
            _ => {}
        }
    }

    let mut faces = Vec::with_capacity(raw_faces.len());
    let mut materials = Vec::with_capacity(raw_faces.len());
    for raw in &raw_faces {
        let indices = raw
            .vertex_ids
            .iter()
            .map(|&id| vertex_ids.resolve(id))
            .collect::<Result<Vec<usize>>>()?;
        faces.push(Face::new(indices));
        materials.push(raw.material);
    }

    let edges = raw_edges
        .iter()
        .map(|&(start, end)| {
            Ok(Edge::new(vertex_ids.resolve(start)?, vertex_ids.resolve(end)?))
        })
        .collect::<Result<Vec<Edge>>>()?;

    let mut mesh = Mesh::new(DRIVER_NAME, vertices, faces, edges)?;

    if materials_per_element >= 1 && mesh.face_count() > 0 {
        if let Some(values) = materials.into_iter().collect::<Option<Vec<f64>>>() {
            let mut group = DatasetGroup::new(FACE_GROUP, DataLocation::Faces, true);
            group.add_dataset(Dataset::new_scalar(0.0, values))?;
            mesh.add_dataset_group(group)?;
        }
    }

    if mesh.vertex_count() > 0 {
        let values: Vec<f64> = mesh.vertices().iter().map(|v| v.z).collect();
        let mut group = DatasetGroup::new(VERTEX_GROUP, DataLocation::Vertices, true);
        group.add_dataset(Dataset::new_scalar(0.0, values))?;
        mesh.add_dataset_group(group)?;
    }

    Ok(mesh)
}

fn parse_face<'a, I>(
    tokens: &mut I,
    card: &str,
    vertex_count: usize,
    element_ids: &mut SourceIdIndex,
) -> Result<RawFace>
where
    I: Iterator<Item = &'a str>,
{
    let id = parse_u64(next_token(tokens, card)?, card)?;
    element_ids.declare(id)?;
    let mut vertex_ids = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        vertex_ids.push(parse_u64(next_token(tokens, card)?, card)?);
    }
    // The first trailing column is a material id; Basement stores per-cell
    // elevation there as a float. Non-numeric trailing columns are skipped.
    let material = tokens.next().and_then(|t| t.parse::<f64>().ok());
    Ok(RawFace {
        vertex_ids,
        material,
    })
}

fn write_mesh(mesh: &Mesh, path: &Path) -> Result<()> {
    for face in mesh.faces() {
        if face.vertex_count() > 4 {
            return Err(Error::FailToWriteToDisk(format!(
                "2DM cannot encode a face with {} vertices",
                face.vertex_count()
            )));
        }
    }
    let file = std::fs::File::create(path)
        .map_err(|e| Error::FailToWriteToDisk(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    write_cards(mesh, &mut writer)
        .map_err(|e| Error::FailToWriteToDisk(format!("{}: {}", path.display(), e)))
}

fn write_cards<W: Write>(mesh: &Mesh, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{}", HEADER)?;
    for (index, vertex) in mesh.vertices().iter().enumerate() {
        writeln!(
            writer,
            "ND {} {} {} {}",
            index + 1,
            vertex.x,
            vertex.y,
            vertex.z
        )?;
    }
    let mut element_id = 0usize;
    for face in mesh.faces() {
        element_id += 1;
        let card = if face.vertex_count() == 3 { "E3T" } else { "E4Q" };
        write!(writer, "{} {}", card, element_id)?;
        for &index in face.indices() {
            write!(writer, " {}", index + 1)?;
        }
        writeln!(writer, " 1")?;
    }
    for edge in mesh.edges() {
        element_id += 1;
        writeln!(
            writer,
            "E2L {} {} {} 1",
            element_id,
            edge.start + 1,
            edge.end + 1
        )?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".2dm").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_probe() {
        let mesh_file = write_temp("MESH2D\nND 1 0.0 0.0 0.0\n");
        let other_file = write_temp("TIN\nBEGT\n");
        let driver = TwoDmDriver;
        assert!(driver.probe(mesh_file.path()));
        assert!(!driver.probe(other_file.path()));
        assert!(!driver.probe(Path::new("non/existent/path.2dm")));
    }

    #[test]
    fn test_elements_before_vertices() {
        let file = write_temp(
            "MESH2D\n\
             E3T 1 1 2 3 1\n\
             ND 1 0.0 0.0 5.0\n\
             ND 2 1.0 0.0 6.0\n\
             ND 3 1.0 1.0 7.0\n",
        );
        let mesh = parse(file.path()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.face(0).unwrap().indices(), &[0, 1, 2]);
        // vertex Z surfaces as the bed elevation group
        assert_eq!(mesh.dataset_group_count(), 1);
        let group = mesh.dataset_group(0).unwrap();
        assert_eq!(group.name(), "Bed Elevation");
        assert_eq!(group.dataset(0).unwrap().scalar_value(2).unwrap(), 7.0);
    }

    #[test]
    fn test_dangling_reference_fails_load() {
        let file = write_temp(
            "MESH2D\n\
             ND 1 0.0 0.0 0.0\n\
             ND 2 1.0 0.0 0.0\n\
             ND 3 1.0 1.0 0.0\n\
             E3T 1 1 2 9 1\n",
        );
        assert!(matches!(parse(file.path()), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_unordered_element_ids_fail_load() {
        let file = write_temp(
            "MESH2D\n\
             ND 1 0.0 0.0 0.0\n\
             ND 2 1.0 0.0 0.0\n\
             ND 3 1.0 1.0 0.0\n\
             ND 4 0.0 1.0 0.0\n\
             E3T 2 1 2 3 1\n\
             E3T 1 1 3 4 1\n",
        );
        assert!(parse(file.path()).is_err());
    }

    #[test]
    fn test_truncated_vertex_card() {
        let file = write_temp("MESH2D\nND 1 0.0 0.0\n");
        assert!(matches!(parse(file.path()), Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_not_mesh2d_header() {
        let file = write_temp("GRID3D\nND 1 0.0 0.0 0.0\n");
        assert!(matches!(parse(file.path()), Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_edges_loaded_from_e2l() {
        let file = write_temp(
            "MESH2D\n\
             ND 1 0.0 0.0 1.0\n\
             ND 2 1.0 0.0 2.0\n\
             ND 3 1.0 1.0 3.0\n\
             E3T 1 1 2 3 1\n\
             E2L 2 1 2 1\n\
             E2L 3 2 3 1\n",
        );
        let mesh = parse(file.path()).unwrap();
        assert_eq!(mesh.edge_count(), 2);
        assert_eq!(mesh.edge(0).unwrap(), Edge::new(0, 1));
        assert_eq!(mesh.edge(1).unwrap(), Edge::new(1, 2));
    }

    #[test]
    fn test_materials_become_face_group() {
        let file = write_temp(
            "MESH2D\n\
             NUM_MATERIALS_PER_ELEM 1\n\
             ND 1 0.0 0.0 0.0\n\
             ND 2 10.0 0.0 0.0\n\
             ND 3 10.0 5.0 0.0\n\
             ND 4 0.0 5.0 0.0\n\
             E3T 1 1 2 3 0.195\n\
             E3T 2 1 3 4 0.2\n",
        );
        let mesh = parse(file.path()).unwrap();
        assert_eq!(mesh.dataset_group_count(), 2);
        let face_group = mesh.dataset_group(0).unwrap();
        assert_eq!(face_group.name(), "Bed Elevation (Face)");
        assert!(face_group.is_on_faces());
        let dataset = face_group.dataset(0).unwrap();
        assert_eq!(dataset.value_count(), 2);
        assert_eq!(dataset.scalar_value(0).unwrap(), 0.195);
        assert_eq!(mesh.dataset_group(1).unwrap().name(), "Bed Elevation");
    }

    #[test]
    fn test_write_rejects_wide_faces() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.5, 1.5, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![Face::new(vec![0, 1, 2, 3, 4])];
        let mesh = Mesh::new(DRIVER_NAME, vertices, faces, Vec::new()).unwrap();
        let target = tempfile::Builder::new().suffix(".2dm").tempfile().unwrap();
        assert!(matches!(
            write_mesh(&mesh, target.path()),
            Err(Error::FailToWriteToDisk(_))
        ));
    }
}
