// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Driver registry: probing, selection, and delegation

use super::{Driver, TwoDmDriver, XmsTinDriver};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use ahash::AHashMap;
use std::path::Path;

/// Ordered set of registered drivers
///
/// Auto-detection probes drivers in registration order and commits to the
/// first positive probe; formats are expected to be unambiguous, so a load
/// failure after a positive probe fails the whole request rather than
/// falling back to later drivers.
pub struct DriverRegistry {
    drivers: Vec<Box<dyn Driver>>,
    by_name: AHashMap<String, usize>,
}

impl DriverRegistry {
    /// Registry with no drivers; `Default` registers the built-in set
    pub fn empty() -> Self {
        Self {
            drivers: Vec::new(),
            by_name: AHashMap::new(),
        }
    }

    /// Register a driver; a duplicate name is a configuration error
    pub fn register(&mut self, driver: Box<dyn Driver>) -> Result<()> {
        let name = driver.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(Error::invalid_data(format!(
                "driver '{}' registered twice",
                name
            )));
        }
        self.by_name.insert(name, self.drivers.len());
        self.drivers.push(driver);
        Ok(())
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    pub fn driver(&self, index: usize) -> Option<&dyn Driver> {
        self.drivers.get(index).map(|d| d.as_ref())
    }

    pub fn driver_by_name(&self, name: &str) -> Option<&dyn Driver> {
        self.by_name.get(name).map(|&i| self.drivers[i].as_ref())
    }

    pub fn driver_names(&self) -> impl Iterator<Item = &str> {
        self.drivers.iter().map(|d| d.name())
    }

    /// Write-capability predicate for a named driver
    pub fn save_mesh_capability(&self, name: &str) -> Result<bool> {
        self.driver_by_name(name)
            .map(|d| d.can_write())
            .ok_or_else(|| Error::UnknownDriver(name.to_string()))
    }

    /// Load a mesh, auto-detecting the driver unless one is named
    pub fn load(&self, path: &Path, driver_name: Option<&str>) -> Result<Mesh> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        match driver_name {
            Some(name) => {
                let driver = self
                    .driver_by_name(name)
                    .ok_or_else(|| Error::UnknownDriver(name.to_string()))?;
                driver.load(path)
            }
            None => {
                for driver in &self.drivers {
                    if driver.probe(path) {
                        return driver.load(path);
                    }
                }
                Err(Error::NoMatchingDriver(path.display().to_string()))
            }
        }
    }

    /// Save a mesh through a named, write-capable driver
    pub fn save(&self, mesh: &Mesh, path: &Path, driver_name: &str) -> Result<()> {
        let driver = self
            .driver_by_name(driver_name)
            .ok_or_else(|| Error::UnknownDriver(driver_name.to_string()))?;
        if !driver.can_write() {
            return Err(Error::MissingSaveCapability(driver_name.to_string()));
        }
        driver.save(mesh, path)
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(Box::new(TwoDmDriver))
            .expect("built-in driver names are unique");
        registry
            .register(Box::new(XmsTinDriver))
            .expect("built-in driver names are unique");
        registry
    }
}
