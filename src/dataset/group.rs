// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Dataset groups and their metadata

use super::{Dataset, Statistics};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Structural placement of a dataset group's values on the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataLocation {
    Vertices,
    Faces,
    Edges,
}

/// Ordered metadata key/value pairs
///
/// Lookup by key ignores order; the declaration order is preserved so a
/// save can reproduce the source file's metadata verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn key(&self, index: usize) -> Result<&str> {
        self.entries
            .get(index)
            .map(|(k, _)| k.as_str())
            .ok_or(Error::OutOfRange {
                index,
                count: self.entries.len(),
            })
    }

    pub fn value(&self, index: usize) -> Result<&str> {
        self.entries
            .get(index)
            .map(|(_, v)| v.as_str())
            .ok_or(Error::OutOfRange {
                index,
                count: self.entries.len(),
            })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or overwrite; an existing key keeps its position
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Named family of time-ordered datasets sharing placement and arity
///
/// The group's name lives in its metadata under the `"name"` key, so the
/// name round-trips with the rest of the metadata. Placement and arity are
/// fixed at creation; every appended dataset must match them and must carry
/// a time strictly greater than the previous step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetGroup {
    location: DataLocation,
    scalar: bool,
    metadata: Metadata,
    datasets: Vec<Dataset>,
}

impl DatasetGroup {
    pub fn new(name: &str, location: DataLocation, scalar: bool) -> Self {
        let mut metadata = Metadata::default();
        metadata.set("name", name);
        Self {
            location,
            scalar,
            metadata,
            datasets: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.metadata.get("name").unwrap_or("")
    }

    pub fn location(&self) -> DataLocation {
        self.location
    }

    pub fn is_on_vertices(&self) -> bool {
        self.location == DataLocation::Vertices
    }

    pub fn is_on_faces(&self) -> bool {
        self.location == DataLocation::Faces
    }

    pub fn is_on_edges(&self) -> bool {
        self.location == DataLocation::Edges
    }

    pub fn has_scalar_data(&self) -> bool {
        self.scalar
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.set(key, value);
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    pub fn dataset(&self, index: usize) -> Result<&Dataset> {
        self.datasets.get(index).ok_or(Error::OutOfRange {
            index,
            count: self.datasets.len(),
        })
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// Append the next time step
    ///
    /// The dataset's arity must match the group's, its value count must
    /// match the steps already present, and its time must be strictly
    /// greater than the last step's.
    pub fn add_dataset(&mut self, dataset: Dataset) -> Result<()> {
        if dataset.is_scalar() != self.scalar {
            return Err(Error::invalid_data(format!(
                "dataset arity does not match group '{}'",
                self.name()
            )));
        }
        if let Some(last) = self.datasets.last() {
            if dataset.value_count() != last.value_count() {
                return Err(Error::invalid_data(format!(
                    "dataset holds {} values but group '{}' holds {} per step",
                    dataset.value_count(),
                    self.name(),
                    last.value_count()
                )));
            }
            if dataset.time() <= last.time() {
                return Err(Error::invalid_data(format!(
                    "time step {} not after {} in group '{}'",
                    dataset.time(),
                    last.time(),
                    self.name()
                )));
            }
        }
        self.datasets.push(dataset);
        Ok(())
    }

    /// Range over all time steps, active elements only
    pub fn statistics(&self) -> Option<Statistics> {
        self.datasets
            .iter()
            .fold(None, |acc, dataset| Statistics::merge(acc, dataset.statistics()))
    }
}
