// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Serializable mesh summaries for reports and `--json` output

use crate::dataset::{DataLocation, DatasetGroup, Statistics};
use crate::mesh::{Extent, Mesh};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshSummary {
    pub driver: String,
    pub vertex_count: usize,
    pub face_count: usize,
    pub edge_count: usize,
    pub face_vertices_maximum_count: usize,
    pub extent: Extent,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub name: String,
    pub location: String,
    pub scalar: bool,
    pub dataset_count: usize,
    pub statistics: Option<Statistics>,
}

impl MeshSummary {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            driver: mesh.driver_name().to_string(),
            vertex_count: mesh.vertex_count(),
            face_count: mesh.face_count(),
            edge_count: mesh.edge_count(),
            face_vertices_maximum_count: mesh.face_vertices_maximum_count(),
            extent: mesh.extent(),
            groups: mesh
                .dataset_groups()
                .iter()
                .map(GroupSummary::from_group)
                .collect(),
        }
    }
}

impl GroupSummary {
    pub fn from_group(group: &DatasetGroup) -> Self {
        let location = match group.location() {
            DataLocation::Vertices => "vertices",
            DataLocation::Faces => "faces",
            DataLocation::Edges => "edges",
        };
        Self {
            name: group.name().to_string(),
            location: location.to_string(),
            scalar: group.has_scalar_data(),
            dataset_count: group.dataset_count(),
            statistics: group.statistics(),
        }
    }
}
