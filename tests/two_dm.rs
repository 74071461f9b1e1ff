// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 2DM driver scenarios exercised through the handle API

use hydromesh::{Context, MeshHandle, Status, NO_VERTEX};
use std::path::PathBuf;

fn test_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn missing_file() {
    let mut context = Context::new();
    let handle = context.load_mesh("non/existent/path.2dm", None);
    assert!(handle.is_none());
    assert_eq!(context.last_status(), Status::FileNotFound);
}

#[test]
fn wrong_file() {
    let mut context = Context::new();
    let handle = context.load_mesh(test_file("2dm/not_a_mesh_file.2dm"), None);
    assert!(handle.is_none());
    assert_eq!(context.last_status(), Status::UnknownFormat);
}

#[test]
fn mesh_with_numbering_gaps() {
    // gapped identifiers load; they renumber onto dense indices
    let mut context = Context::new();
    let handle = context
        .load_mesh(test_file("2dm/mesh_with_numbering_gaps.2dm"), None)
        .expect("gapped ids must load");
    assert_eq!(context.last_status(), Status::None);
    assert_eq!(context.vertex_count(handle), Some(5));
    assert_eq!(context.face_count(handle), Some(2));

    // E4Q 1 2 5 7 resolves through the renumbering
    assert_eq!(
        context.face_vertices(handle, 0),
        Some(&[0usize, 1, 3, 4][..])
    );
    // E3T 2 4 5
    assert_eq!(context.face_vertices(handle, 1), Some(&[1usize, 2, 3][..]));

    let vertex_count = context.vertex_count(handle).unwrap();
    for face in 0..context.face_count(handle).unwrap() {
        for &index in context.face_vertices(handle, face).unwrap() {
            assert!(index < vertex_count);
        }
    }
    context.close_mesh(handle);
}

#[test]
fn mesh_with_unordered_ids() {
    let mut context = Context::new();
    let handle = context.load_mesh(test_file("2dm/unordered_ids.2dm"), None);
    assert!(handle.is_none());
    assert_eq!(context.last_status(), Status::InvalidData);
}

fn check_quad_and_triangle(context: &mut Context, handle: MeshHandle) {
    assert_eq!(context.last_status(), Status::None);
    assert_eq!(context.face_vertices_maximum_count(handle), Some(4));
    assert_eq!(context.driver_name(handle), Some("2DM"));
    assert_eq!(context.vertex_count(handle), Some(5));

    let vertex = context.vertex(handle, 0).unwrap();
    assert_eq!(vertex.x, 1000.0);
    assert_eq!(vertex.y, 2000.0);
    assert_eq!(vertex.z, 20.0);

    assert_eq!(context.face_count(handle), Some(2));
    assert_eq!(context.face_vertex_count(handle, 0), Some(4)); // quad
    assert_eq!(context.face_vertex(handle, 0, 0), Some(0));

    let extent = context.extent(handle).unwrap();
    assert_eq!(extent.min_x, 1000.0);
    assert_eq!(extent.max_x, 3000.0);
    assert_eq!(extent.min_y, 2000.0);
    assert_eq!(extent.max_y, 3000.0);

    assert_eq!(context.face_vertex_count(handle, 1), Some(3)); // triangle
    assert_eq!(context.face_vertex(handle, 1, 0), Some(1));

    // Bed elevation dataset
    assert_eq!(context.dataset_group_count(handle), Some(1));
    let group = context.dataset_group(handle, 0).unwrap();
    assert_eq!(context.group_metadata_count(group), Some(1));
    assert_eq!(context.group_name(group), Some("Bed Elevation"));
    assert_eq!(context.group_has_scalar_data(group), Some(true));
    assert_eq!(context.group_is_on_vertices(group), Some(true));

    assert_eq!(context.group_dataset_count(group), Some(1));
    let dataset = context.group_dataset(group, 0).unwrap();
    assert_eq!(context.dataset_is_valid(dataset), Some(true));
    assert_eq!(context.dataset_active(dataset, 0), Some(true));
    assert_eq!(context.dataset_value_count(dataset), Some(5));
    assert_eq!(context.dataset_scalar_value(dataset, 1), Some(30.0));
}

#[test]
fn quad_and_triangle_file() {
    let mut context = Context::new();
    let handle = context
        .load_mesh(test_file("2dm/quad_and_triangle.2dm"), None)
        .unwrap();
    check_quad_and_triangle(&mut context, handle);
    context.close_mesh(handle);
}

#[test]
fn padded_face_view_uses_no_vertex() {
    let mut context = Context::new();
    let handle = context
        .load_mesh(test_file("2dm/quad_and_triangle.2dm"), None)
        .unwrap();
    // triangle slots 3 of a width-4 view pad out with the sentinel
    assert_eq!(context.face_vertex(handle, 1, 3), Some(NO_VERTEX));
    assert_eq!(context.face_vertex(handle, 1, 4), None);
    assert_eq!(context.last_status(), Status::OutOfRange);
    context.close_mesh(handle);
}

#[test]
fn cell_elevation_materials() {
    // Basement-style per-element materials become a face dataset group,
    // ordered before the vertex bed elevation group
    let mut context = Context::new();
    let handle = context
        .load_mesh(test_file("2dm/triangle_materials.2dm"), None)
        .unwrap();
    assert_eq!(context.dataset_group_count(handle), Some(2));

    let face_group = context.dataset_group(handle, 0).unwrap();
    assert_eq!(context.group_metadata_count(face_group), Some(1));
    assert_eq!(context.group_name(face_group), Some("Bed Elevation (Face)"));
    assert_eq!(context.group_has_scalar_data(face_group), Some(true));
    assert_eq!(context.group_is_on_vertices(face_group), Some(false));
    assert_eq!(context.group_is_on_faces(face_group), Some(true));

    let dataset = context.group_dataset(face_group, 0).unwrap();
    assert_eq!(context.dataset_is_valid(dataset), Some(true));
    assert_eq!(context.dataset_value_count(dataset), Some(2));
    assert_eq!(context.dataset_scalar_value(dataset, 0), Some(0.195));
    assert_eq!(context.dataset_scalar_value(dataset, 1), Some(0.2));

    let vertex_group = context.dataset_group(handle, 1).unwrap();
    assert_eq!(context.group_name(vertex_group), Some("Bed Elevation"));
    assert_eq!(context.group_is_on_vertices(vertex_group), Some(true));
    let dataset = context.group_dataset(vertex_group, 0).unwrap();
    assert_eq!(context.dataset_value_count(dataset), Some(4));
    assert_eq!(context.dataset_scalar_value(dataset, 1), Some(0.0));

    context.close_mesh(handle);
}

#[test]
fn line_elements_become_edges() {
    let mut context = Context::new();
    let handle = context
        .load_mesh(test_file("2dm/channel_with_lines.2dm"), None)
        .unwrap();
    assert_eq!(context.vertex_count(handle), Some(4));
    assert_eq!(context.face_count(handle), Some(1));
    assert_eq!(context.edge_count(handle), Some(2));
    context.close_mesh(handle);
}

#[test]
fn explicit_driver_name() {
    let mut context = Context::new();
    let handle = context
        .load_mesh(test_file("2dm/quad_and_triangle.2dm"), Some("2DM"))
        .unwrap();
    assert_eq!(context.driver_name(handle), Some("2DM"));
    context.close_mesh(handle);

    let handle = context.load_mesh(test_file("2dm/quad_and_triangle.2dm"), Some("NOPE"));
    assert!(handle.is_none());
    assert_eq!(context.last_status(), Status::UnknownDriver);
}
