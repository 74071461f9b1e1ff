// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 2D extent of a mesh in the X-Y plane

use super::Vertex;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box over vertex X/Y coordinates
///
/// Z plays no role: consumers range-map meshes in plan view. The extent of a
/// mesh with no vertices is empty (inverted infinities).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut extent = Self::empty();
        for vertex in vertices {
            extent.expand_to_include(vertex);
        }
        extent
    }

    pub fn expand_to_include(&mut self, vertex: &Vertex) {
        self.min_x = self.min_x.min(vertex.x);
        self.max_x = self.max_x.max(vertex.x);
        self.min_y = self.min_y.min(vertex.y);
        self.max_y = self.max_y.max(vertex.y);
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if two extents are approximately equal within tolerance
    pub fn approx_eq(&self, other: &Extent, tolerance: f64) -> bool {
        (self.min_x - other.min_x).abs() < tolerance
            && (self.max_x - other.max_x).abs() < tolerance
            && (self.min_y - other.min_y).abs() < tolerance
            && (self.max_y - other.max_y).abs() < tolerance
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_empty_extent() {
        let extent = Extent::empty();
        assert!(extent.is_empty());
        assert!(Extent::from_vertices(&[]).is_empty());
    }

    #[test]
    fn test_extent_from_vertices() {
        let vertices = vec![
            Point3::new(1000.0, 2000.0, 20.0),
            Point3::new(3000.0, 2000.0, 30.0),
            Point3::new(3000.0, 3000.0, 40.0),
            Point3::new(1000.0, 3000.0, 50.0),
            Point3::new(2000.0, 2500.0, 60.0),
        ];
        let extent = Extent::from_vertices(&vertices);
        assert_eq!(extent.min_x, 1000.0);
        assert_eq!(extent.max_x, 3000.0);
        assert_eq!(extent.min_y, 2000.0);
        assert_eq!(extent.max_y, 3000.0);
        assert!(!extent.is_empty());
        assert_eq!(extent.width(), 2000.0);
        assert_eq!(extent.height(), 1000.0);
    }

    #[test]
    fn test_approx_eq() {
        let a = Extent {
            min_x: 0.0,
            max_x: 10.0,
            min_y: 0.0,
            max_y: 5.0,
        };
        let mut b = a;
        b.max_x += 1e-9;
        assert!(a.approx_eq(&b, 1e-6));
        b.max_x += 1.0;
        assert!(!a.approx_eq(&b, 1e-6));
    }
}
