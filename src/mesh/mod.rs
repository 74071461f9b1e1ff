// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Unified in-memory mesh model

mod extent;
mod indexer;
#[allow(clippy::module_inception)]
mod mesh;

pub use extent::Extent;
pub use indexer::SourceIdIndex;
pub use mesh::{Edge, Face, Mesh, Vertex, NO_VERTEX};
