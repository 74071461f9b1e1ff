// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Value-range statistics over active elements

use serde::{Deserialize, Serialize};

/// Minimum/maximum over the active elements of one or more datasets
///
/// Derived on demand, never stored. Vector values contribute their
/// magnitude. A dataset with no active finite value has no statistics at
/// all (an empty range), which is why producers return
/// `Option<Statistics>` rather than sentinel numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub minimum: f64,
    pub maximum: f64,
}

impl Statistics {
    pub fn single(value: f64) -> Self {
        Self {
            minimum: value,
            maximum: value,
        }
    }

    pub fn include(&mut self, value: f64) {
        self.minimum = self.minimum.min(value);
        self.maximum = self.maximum.max(value);
    }

    /// Fold two optional ranges into one
    pub fn merge(a: Option<Statistics>, b: Option<Statistics>) -> Option<Statistics> {
        match (a, b) {
            (Some(mut a), Some(b)) => {
                a.include(b.minimum);
                a.include(b.maximum);
                Some(a)
            }
            (Some(a), None) => Some(a),
            (None, b) => b,
        }
    }
}
