// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Handle-based API surface
//!
//! Meshes live in a generation-checked arena owned by a [`Context`];
//! handles are opaque (index, generation) pairs. Closing a mesh bumps its
//! slot generation, which invalidates the mesh handle and every group or
//! dataset handle derived from it in one step. Every operation records a
//! [`Status`] on the context's last-status channel; the value reflects the
//! most recent call only, so callers read it before issuing the next call.
//!
//! A context assumes one logical caller; it is deliberately not `Sync`.

mod arena;

use crate::dataset::{DataLocation, Dataset, DatasetGroup};
use crate::driver::DriverRegistry;
use crate::error::{Error, Result, Status};
use crate::mesh::{Extent, Mesh, Vertex};
use arena::Arena;
use std::cell::Cell;
use std::path::Path;

/// Opaque reference to a loaded mesh
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHandle {
    index: u32,
    generation: u32,
}

impl MeshHandle {
    pub const NULL: MeshHandle = MeshHandle {
        index: u32::MAX,
        generation: u32::MAX,
    };

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// Opaque reference to a dataset group of a loaded mesh
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetGroupHandle {
    mesh: MeshHandle,
    group: u32,
}

impl DatasetGroupHandle {
    pub const NULL: DatasetGroupHandle = DatasetGroupHandle {
        mesh: MeshHandle::NULL,
        group: u32::MAX,
    };

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// Opaque reference to one time step of a dataset group
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetHandle {
    mesh: MeshHandle,
    group: u32,
    dataset: u32,
}

impl DatasetHandle {
    pub const NULL: DatasetHandle = DatasetHandle {
        mesh: MeshHandle::NULL,
        group: u32::MAX,
        dataset: u32::MAX,
    };

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// Owner of loaded meshes, the driver registry, and the status channel
pub struct Context {
    registry: DriverRegistry,
    meshes: Arena<Mesh>,
    last_status: Cell<Status>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_registry(DriverRegistry::default())
    }

    pub fn with_registry(registry: DriverRegistry) -> Self {
        Self {
            registry,
            meshes: Arena::new(),
            last_status: Cell::new(Status::None),
        }
    }

    /// Status recorded by the most recent operation on this context
    pub fn last_status(&self) -> Status {
        self.last_status.get()
    }

    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Number of meshes currently open
    pub fn open_mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub(crate) fn record_failure(&self, error: Error) {
        self.last_status.set(error.status());
    }

    fn record<T>(&self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_status.set(Status::None);
                Some(value)
            }
            Err(error) => {
                self.last_status.set(error.status());
                None
            }
        }
    }

    fn mesh(&self, handle: MeshHandle) -> Result<&Mesh> {
        self.meshes
            .get(handle.index, handle.generation)
            .ok_or(Error::InvalidHandle)
    }

    fn group(&self, handle: DatasetGroupHandle) -> Result<&DatasetGroup> {
        let mesh = self.mesh(handle.mesh)?;
        // a handle that no longer resolves is stale, not out of range
        mesh.dataset_group(handle.group as usize)
            .map_err(|_| Error::InvalidHandle)
    }

    fn dataset(&self, handle: DatasetHandle) -> Result<&Dataset> {
        let mesh = self.mesh(handle.mesh)?;
        let group = mesh
            .dataset_group(handle.group as usize)
            .map_err(|_| Error::InvalidHandle)?;
        group
            .dataset(handle.dataset as usize)
            .map_err(|_| Error::InvalidHandle)
    }

    // ---- load / close / save ----

    /// Load a mesh; `None` on failure, with the status channel explaining why
    pub fn load_mesh(
        &mut self,
        path: impl AsRef<Path>,
        driver_name: Option<&str>,
    ) -> Option<MeshHandle> {
        let result = match self.registry.load(path.as_ref(), driver_name) {
            Ok(mesh) => {
                let (index, generation) = self.meshes.insert(mesh);
                Ok(MeshHandle { index, generation })
            }
            Err(error) => Err(error),
        };
        self.record(result)
    }

    /// Release the mesh and everything it owns; derived handles go stale
    pub fn close_mesh(&mut self, handle: MeshHandle) -> bool {
        let result = self
            .meshes
            .remove(handle.index, handle.generation)
            .map(|_| ())
            .ok_or(Error::InvalidHandle);
        self.record(result).is_some()
    }

    /// Save a mesh through a named, write-capable driver
    pub fn save_mesh(
        &self,
        handle: MeshHandle,
        path: impl AsRef<Path>,
        driver_name: &str,
    ) -> bool {
        let result = (|| {
            let mesh = self.mesh(handle)?;
            self.registry.save(mesh, path.as_ref(), driver_name)
        })();
        self.record(result).is_some()
    }

    // ---- mesh queries ----

    pub fn vertex_count(&self, handle: MeshHandle) -> Option<usize> {
        self.record(self.mesh(handle).map(|m| m.vertex_count()))
    }

    pub fn face_count(&self, handle: MeshHandle) -> Option<usize> {
        self.record(self.mesh(handle).map(|m| m.face_count()))
    }

    pub fn edge_count(&self, handle: MeshHandle) -> Option<usize> {
        self.record(self.mesh(handle).map(|m| m.edge_count()))
    }

    pub fn face_vertices_maximum_count(&self, handle: MeshHandle) -> Option<usize> {
        self.record(self.mesh(handle).map(|m| m.face_vertices_maximum_count()))
    }

    pub fn driver_name(&self, handle: MeshHandle) -> Option<&str> {
        self.record(self.mesh(handle).map(|m| m.driver_name()))
    }

    pub fn extent(&self, handle: MeshHandle) -> Option<Extent> {
        self.record(self.mesh(handle).map(|m| m.extent()))
    }

    pub fn vertex(&self, handle: MeshHandle, index: usize) -> Option<Vertex> {
        self.record(self.mesh(handle).and_then(|m| m.vertex(index)))
    }

    pub fn face_vertex_count(&self, handle: MeshHandle, face: usize) -> Option<usize> {
        self.record(
            self.mesh(handle)
                .and_then(|m| m.face(face))
                .map(|f| f.vertex_count()),
        )
    }

    pub fn face_vertices(&self, handle: MeshHandle, face: usize) -> Option<&[usize]> {
        self.record(
            self.mesh(handle)
                .and_then(|m| m.face(face))
                .map(|f| f.indices()),
        )
    }

    /// Vertex index at `slot` of the face's padded view; slots past the
    /// face's own count hold [`crate::mesh::NO_VERTEX`]
    pub fn face_vertex(&self, handle: MeshHandle, face: usize, slot: usize) -> Option<usize> {
        self.record((|| {
            let mesh = self.mesh(handle)?;
            let width = mesh.face_vertices_maximum_count();
            mesh.face(face)?.padded_index(slot, width)
        })())
    }

    // ---- dataset group queries ----

    pub fn dataset_group_count(&self, handle: MeshHandle) -> Option<usize> {
        self.record(self.mesh(handle).map(|m| m.dataset_group_count()))
    }

    pub fn dataset_group(&self, handle: MeshHandle, index: usize) -> Option<DatasetGroupHandle> {
        self.record((|| {
            self.mesh(handle)?.dataset_group(index)?;
            Ok(DatasetGroupHandle {
                mesh: handle,
                group: index as u32,
            })
        })())
    }

    pub fn group_name(&self, handle: DatasetGroupHandle) -> Option<&str> {
        self.record(self.group(handle).map(|g| g.name()))
    }

    pub fn group_metadata_count(&self, handle: DatasetGroupHandle) -> Option<usize> {
        self.record(self.group(handle).map(|g| g.metadata().len()))
    }

    pub fn group_metadata_key(&self, handle: DatasetGroupHandle, index: usize) -> Option<&str> {
        self.record(self.group(handle).and_then(|g| g.metadata().key(index)))
    }

    pub fn group_metadata_value(&self, handle: DatasetGroupHandle, index: usize) -> Option<&str> {
        self.record(self.group(handle).and_then(|g| g.metadata().value(index)))
    }

    pub fn group_location(&self, handle: DatasetGroupHandle) -> Option<DataLocation> {
        self.record(self.group(handle).map(|g| g.location()))
    }

    pub fn group_is_on_vertices(&self, handle: DatasetGroupHandle) -> Option<bool> {
        self.record(self.group(handle).map(|g| g.is_on_vertices()))
    }

    pub fn group_is_on_faces(&self, handle: DatasetGroupHandle) -> Option<bool> {
        self.record(self.group(handle).map(|g| g.is_on_faces()))
    }

    pub fn group_has_scalar_data(&self, handle: DatasetGroupHandle) -> Option<bool> {
        self.record(self.group(handle).map(|g| g.has_scalar_data()))
    }

    pub fn group_dataset_count(&self, handle: DatasetGroupHandle) -> Option<usize> {
        self.record(self.group(handle).map(|g| g.dataset_count()))
    }

    pub fn group_dataset(
        &self,
        handle: DatasetGroupHandle,
        index: usize,
    ) -> Option<DatasetHandle> {
        self.record((|| {
            self.group(handle)?.dataset(index)?;
            Ok(DatasetHandle {
                mesh: handle.mesh,
                group: handle.group,
                dataset: index as u32,
            })
        })())
    }

    // ---- dataset queries ----

    pub fn dataset_value_count(&self, handle: DatasetHandle) -> Option<usize> {
        self.record(self.dataset(handle).map(|d| d.value_count()))
    }

    pub fn dataset_scalar_value(&self, handle: DatasetHandle, index: usize) -> Option<f64> {
        self.record(self.dataset(handle).and_then(|d| d.scalar_value(index)))
    }

    pub fn dataset_vector_value(&self, handle: DatasetHandle, index: usize) -> Option<[f64; 2]> {
        self.record(self.dataset(handle).and_then(|d| d.vector_value(index)))
    }

    pub fn dataset_active(&self, handle: DatasetHandle, index: usize) -> Option<bool> {
        self.record(self.dataset(handle).and_then(|d| d.active(index)))
    }

    pub fn dataset_is_valid(&self, handle: DatasetHandle) -> Option<bool> {
        self.record(self.dataset(handle).map(|d| d.is_valid()))
    }

    pub fn dataset_time(&self, handle: DatasetHandle) -> Option<f64> {
        self.record(self.dataset(handle).map(|d| d.time()))
    }

    // ---- driver registry queries ----

    pub fn driver_count(&self) -> usize {
        self.last_status.set(Status::None);
        self.registry.driver_count()
    }

    pub fn driver_name_at(&self, index: usize) -> Option<&str> {
        self.record(
            self.registry
                .driver(index)
                .map(|d| d.name())
                .ok_or(Error::OutOfRange {
                    index,
                    count: self.registry.driver_count(),
                }),
        )
    }

    pub fn driver_save_mesh_capability(&self, name: &str) -> Option<bool> {
        self.record(self.registry.save_mesh_capability(name))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const QUAD_AND_TRIANGLE: &str = "MESH2D\n\
        E4Q 1 1 2 4 5 1\n\
        E3T 2 2 3 4 1\n\
        ND 1 1000.0 2000.0 20.0\n\
        ND 2 2000.0 2000.0 30.0\n\
        ND 3 3000.0 2000.0 40.0\n\
        ND 4 2000.0 3000.0 50.0\n\
        ND 5 1000.0 3000.0 60.0\n";

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".2dm").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_query_close() {
        let file = write_temp(QUAD_AND_TRIANGLE);
        let mut context = Context::new();
        let handle = context.load_mesh(file.path(), None).unwrap();
        assert_eq!(context.last_status(), Status::None);
        assert_eq!(context.vertex_count(handle), Some(5));
        assert_eq!(context.face_count(handle), Some(2));
        assert_eq!(context.driver_name(handle), Some("2DM"));
        assert_eq!(context.open_mesh_count(), 1);

        assert!(context.close_mesh(handle));
        assert_eq!(context.open_mesh_count(), 0);
        assert_eq!(context.vertex_count(handle), None);
        assert_eq!(context.last_status(), Status::InvalidHandle);
    }

    #[test]
    fn test_derived_handles_die_with_mesh() {
        let file = write_temp(QUAD_AND_TRIANGLE);
        let mut context = Context::new();
        let mesh = context.load_mesh(file.path(), None).unwrap();
        let group = context.dataset_group(mesh, 0).unwrap();
        let dataset = context.group_dataset(group, 0).unwrap();
        assert_eq!(context.group_name(group), Some("Bed Elevation"));
        assert_eq!(context.dataset_value_count(dataset), Some(5));

        context.close_mesh(mesh);
        assert_eq!(context.group_name(group), None);
        assert_eq!(context.last_status(), Status::InvalidHandle);
        assert_eq!(context.dataset_scalar_value(dataset, 0), None);
        assert_eq!(context.last_status(), Status::InvalidHandle);
    }

    #[test]
    fn test_status_overwritten_by_next_call() {
        let file = write_temp(QUAD_AND_TRIANGLE);
        let mut context = Context::new();
        let mesh = context.load_mesh(file.path(), None).unwrap();
        assert_eq!(context.vertex(mesh, 99), None);
        assert_eq!(context.last_status(), Status::OutOfRange);
        assert!(context.vertex(mesh, 0).is_some());
        assert_eq!(context.last_status(), Status::None);
    }

    #[test]
    fn test_padded_face_slots() {
        let file = write_temp(QUAD_AND_TRIANGLE);
        let mut context = Context::new();
        let mesh = context.load_mesh(file.path(), None).unwrap();
        // triangle face in a width-4 view
        assert_eq!(context.face_vertex(mesh, 1, 0), Some(1));
        assert_eq!(context.face_vertex(mesh, 1, 3), Some(crate::mesh::NO_VERTEX));
        assert_eq!(context.face_vertex(mesh, 1, 4), None);
        assert_eq!(context.last_status(), Status::OutOfRange);
    }

    #[test]
    fn test_driver_queries() {
        let context = Context::new();
        assert_eq!(context.driver_count(), 2);
        assert_eq!(context.driver_name_at(0), Some("2DM"));
        assert_eq!(context.driver_name_at(9), None);
        assert_eq!(context.last_status(), Status::OutOfRange);
        assert_eq!(context.driver_save_mesh_capability("2DM"), Some(true));
        assert_eq!(context.driver_save_mesh_capability("XMS_TIN"), Some(false));
        assert_eq!(context.driver_save_mesh_capability("SWW"), None);
        assert_eq!(context.last_status(), Status::UnknownDriver);
    }
}
