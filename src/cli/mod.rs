// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Shared pieces of the command-line tools

mod reporter;
mod summary;

pub use reporter::Reporter;
pub use summary::{GroupSummary, MeshSummary};
