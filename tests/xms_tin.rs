// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! XMS TIN driver scenarios

use hydromesh::{load_mesh, load_mesh_with_driver, Context, Error, Status};
use std::path::PathBuf;

fn test_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn auto_detects_tin_files() {
    let mesh = load_mesh(test_file("tin/simple.tin")).unwrap();
    assert_eq!(mesh.driver_name(), "XMS_TIN");
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.face_count(), 2);
    assert_eq!(mesh.face_vertices_maximum_count(), 3);
    assert_eq!(mesh.face(0).unwrap().indices(), &[0, 1, 2]);

    let group = mesh.dataset_group(0).unwrap();
    assert_eq!(group.name(), "Bed Elevation");
    assert!(group.is_on_vertices());
    assert!(group.has_scalar_data());
    let dataset = group.dataset(0).unwrap();
    assert_eq!(dataset.value_count(), 4);
    assert_eq!(dataset.scalar_value(2).unwrap(), 3.0);
}

#[test]
fn named_driver_rejects_foreign_format() {
    let result = load_mesh_with_driver(test_file("2dm/quad_and_triangle.2dm"), "XMS_TIN");
    assert!(matches!(result, Err(Error::UnknownFormat(_))));
}

#[test]
fn tin_files_through_handle_api() {
    let mut context = Context::new();
    let handle = context.load_mesh(test_file("tin/simple.tin"), None).unwrap();
    assert_eq!(context.last_status(), Status::None);
    assert_eq!(context.driver_name(handle), Some("XMS_TIN"));
    assert_eq!(context.edge_count(handle), Some(0));

    let extent = context.extent(handle).unwrap();
    assert_eq!(extent.min_x, 0.0);
    assert_eq!(extent.max_x, 10.0);
    assert_eq!(extent.min_y, 0.0);
    assert_eq!(extent.max_y, 5.0);
    context.close_mesh(handle);
}
