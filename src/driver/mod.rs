// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Format drivers and the registry dispatching between them

mod registry;
mod two_dm;
mod xms_tin;

pub use registry::DriverRegistry;
pub use two_dm::TwoDmDriver;
pub use xms_tin::XmsTinDriver;

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use std::path::Path;

/// A format plugin: probe, load, and optionally save
///
/// A driver constructs a [`Mesh`] (with its dataset groups) from a file, or
/// writes one back. Loads are all-or-nothing: any structural violation
/// fails the whole call, never yielding a partially valid mesh. Drivers
/// know nothing about the handle layer.
pub trait Driver: Send + Sync {
    /// Short unique name, e.g. `"2DM"`
    fn name(&self) -> &str;

    fn long_name(&self) -> &str;

    /// Glob-style file filter, e.g. `"*.2dm"`
    fn filters(&self) -> &str;

    fn can_write(&self) -> bool {
        false
    }

    /// Cheap, side-effect-free check of whether this driver can plausibly
    /// parse the resource. Must not fail on arbitrary bytes, only report a
    /// non-match.
    fn probe(&self, path: &Path) -> bool;

    fn load(&self, path: &Path) -> Result<Mesh>;

    fn save(&self, _mesh: &Mesh, _path: &Path) -> Result<()> {
        Err(Error::MissingSaveCapability(self.name().to_string()))
    }
}

/// Open a file for reading, mapping a missing path to `FileNotFound`
pub(crate) fn open_for_read(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })
}

/// Read the first line of a file, for header sniffing in `probe`
pub(crate) fn first_line(path: &Path) -> Option<String> {
    use std::io::{BufRead, BufReader};
    let file = std::fs::File::open(path).ok()?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;
    Some(line)
}
