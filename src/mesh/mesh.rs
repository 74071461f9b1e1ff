// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and structural invariants

use super::Extent;
use crate::dataset::{DataLocation, DatasetGroup};
use crate::error::{Error, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Sentinel marking an unused slot in a padded face-vertex view
pub const NO_VERTEX: usize = usize::MAX;

/// Vertex position; indices into the mesh vertex sequence are dense and
/// zero-based regardless of the identifiers used by the source file
pub type Vertex = Point3<f64>;

/// Polygonal face defined by an ordered vertex-index sequence
///
/// Winding is preserved exactly as read from the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Vertex index at `slot` in a view padded out to `width` slots
    ///
    /// Slots past the face's own vertex count but below `width` hold
    /// [`NO_VERTEX`], never a valid index.
    pub fn padded_index(&self, slot: usize, width: usize) -> Result<usize> {
        if slot >= width {
            return Err(Error::OutOfRange {
                index: slot,
                count: width,
            });
        }
        Ok(self.indices.get(slot).copied().unwrap_or(NO_VERTEX))
    }
}

/// Line element between two vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Unified in-memory mesh
///
/// Owns the vertex, face and edge sequences, the name of the driver that
/// produced it, and the dataset groups attached during load. A mesh is
/// constructed atomically by a driver and is immutable afterwards; the
/// extent is computed once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    driver_name: String,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
    face_vertices_maximum: usize,
    extent: Extent,
    groups: Vec<DatasetGroup>,
}

impl Mesh {
    /// Construct a mesh, validating every face and edge reference
    ///
    /// Any index >= the vertex count, or a face with fewer than three
    /// vertices, fails the whole construction.
    pub fn new(
        driver_name: impl Into<String>,
        vertices: Vec<Vertex>,
        faces: Vec<Face>,
        edges: Vec<Edge>,
    ) -> Result<Self> {
        let vertex_count = vertices.len();
        let mut face_vertices_maximum = 0;

        for face in &faces {
            if face.vertex_count() < 3 {
                return Err(Error::invalid_data(format!(
                    "face with {} vertices; at least 3 required",
                    face.vertex_count()
                )));
            }
            for &index in face.indices() {
                if index >= vertex_count {
                    return Err(Error::invalid_data(format!(
                        "face references vertex {} but only {} vertices exist",
                        index, vertex_count
                    )));
                }
            }
            face_vertices_maximum = face_vertices_maximum.max(face.vertex_count());
        }

        for edge in &edges {
            if edge.start >= vertex_count || edge.end >= vertex_count {
                return Err(Error::invalid_data(format!(
                    "edge ({}, {}) references a vertex past count {}",
                    edge.start, edge.end, vertex_count
                )));
            }
        }

        let extent = Extent::from_vertices(&vertices);

        Ok(Self {
            driver_name: driver_name.into(),
            vertices,
            faces,
            edges,
            face_vertices_maximum,
            extent,
            groups: Vec::new(),
        })
    }

    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Largest vertex count over all faces
    pub fn face_vertices_maximum_count(&self) -> usize {
        self.face_vertices_maximum
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn vertex(&self, index: usize) -> Result<Vertex> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(Error::OutOfRange {
                index,
                count: self.vertices.len(),
            })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn face(&self, index: usize) -> Result<&Face> {
        self.faces.get(index).ok_or(Error::OutOfRange {
            index,
            count: self.faces.len(),
        })
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn edge(&self, index: usize) -> Result<Edge> {
        self.edges.get(index).copied().ok_or(Error::OutOfRange {
            index,
            count: self.edges.len(),
        })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Element count for a dataset placement on this mesh
    pub fn element_count(&self, location: DataLocation) -> usize {
        match location {
            DataLocation::Vertices => self.vertices.len(),
            DataLocation::Faces => self.faces.len(),
            DataLocation::Edges => self.edges.len(),
        }
    }

    pub fn dataset_group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn dataset_group(&self, index: usize) -> Result<&DatasetGroup> {
        self.groups.get(index).ok_or(Error::OutOfRange {
            index,
            count: self.groups.len(),
        })
    }

    pub fn dataset_groups(&self) -> &[DatasetGroup] {
        &self.groups
    }

    /// Attach a fully constructed dataset group (append-only, index-ordered)
    ///
    /// Every dataset in the group must match the element count of the
    /// group's placement on this mesh.
    pub fn add_dataset_group(&mut self, group: DatasetGroup) -> Result<()> {
        let expected = self.element_count(group.location());
        for dataset in group.datasets() {
            if dataset.value_count() != expected {
                return Err(Error::invalid_data(format!(
                    "dataset in group '{}' holds {} values but its placement has {} elements",
                    group.name(),
                    dataset.value_count(),
                    expected
                )));
            }
        }
        self.groups.push(group);
        Ok(())
    }
}
