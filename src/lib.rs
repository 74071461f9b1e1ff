// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hydromesh
//!
//! A mesh data abstraction layer for hydraulic and hydrodynamic models.
//! Heterogeneous mesh file formats load into one mesh + time-varying
//! dataset model through pluggable format drivers with auto-detection, and
//! the whole model is reachable through an opaque-handle API consumable
//! from other languages.

pub mod api;
pub mod cli;
pub mod dataset;
pub mod driver;
pub mod error;
pub mod ffi;
pub mod mesh;
pub mod scan;
pub mod utils;

pub use api::{Context, DatasetGroupHandle, DatasetHandle, MeshHandle};
pub use dataset::{DataLocation, Dataset, DatasetGroup, Metadata, Statistics};
pub use driver::{Driver, DriverRegistry};
pub use error::{Error, Result, Status};
pub use mesh::{Edge, Extent, Face, Mesh, SourceIdIndex, Vertex, NO_VERTEX};

use std::path::Path;

/// Load a mesh with driver auto-detection
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    DriverRegistry::default().load(path.as_ref(), None)
}

/// Load a mesh through a named driver
pub fn load_mesh_with_driver(path: impl AsRef<Path>, driver_name: &str) -> Result<Mesh> {
    DriverRegistry::default().load(path.as_ref(), Some(driver_name))
}

/// Save a mesh through a named, write-capable driver
pub fn save_mesh(mesh: &Mesh, path: impl AsRef<Path>, driver_name: &str) -> Result<()> {
    DriverRegistry::default().save(mesh, path.as_ref(), driver_name)
}
