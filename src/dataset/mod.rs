// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Time-varying dataset model

#[allow(clippy::module_inception)]
mod dataset;
mod group;
mod statistics;

pub use dataset::{Dataset, DatasetValues};
pub use group::{DataLocation, DatasetGroup, Metadata};
pub use statistics::Statistics;
