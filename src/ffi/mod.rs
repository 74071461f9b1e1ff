// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! C boundary over the handle API
//!
//! One [`Context`] per thread; the last-status channel therefore stays
//! coherent for interleaved calls on a single thread, and threads never
//! observe each other's status. Failures surface as sentinel returns (null
//! handles, zero counts, NaN values) with the status code explaining why.
//! Returned strings point into a per-thread buffer that stays valid until
//! the next string-returning call on the same thread.

use crate::api::{Context, DatasetGroupHandle, DatasetHandle, MeshHandle};
use crate::error::{Error, Status};
use crate::mesh::NO_VERTEX;
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;

thread_local! {
    static CONTEXT: RefCell<Context> = RefCell::new(Context::new());
    static STRING_BUFFER: RefCell<CString> = RefCell::new(CString::default());
}

fn with_context<R>(f: impl FnOnce(&mut Context) -> R) -> R {
    CONTEXT.with(|context| f(&mut context.borrow_mut()))
}

/// Copy a string into the thread's return buffer
fn buffer_string(value: &str) -> *const c_char {
    STRING_BUFFER.with(|buffer| {
        let owned = CString::new(value).unwrap_or_default();
        *buffer.borrow_mut() = owned;
        buffer.borrow().as_ptr()
    })
}

/// Borrow a required C string argument
///
/// # Safety
/// `ptr` must be null or point at a NUL-terminated string.
unsafe fn required_str<'a>(ptr: *const c_char) -> Result<&'a str, Error> {
    if ptr.is_null() {
        return Err(Error::invalid_data("null string argument"));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| Error::invalid_data("string argument is not valid UTF-8"))
}

fn clamp_index(index: i32) -> usize {
    if index < 0 {
        usize::MAX
    } else {
        index as usize
    }
}

/// Status recorded by the most recent call on this thread
#[no_mangle]
pub extern "C" fn hydromesh_last_status() -> Status {
    with_context(|context| context.last_status())
}

/// Load a mesh; a null driver name means auto-detection
///
/// # Safety
/// `path` must point at a NUL-terminated string; `driver_name` may be null.
#[no_mangle]
pub unsafe extern "C" fn hydromesh_load_mesh(
    path: *const c_char,
    driver_name: *const c_char,
) -> MeshHandle {
    let path = required_str(path);
    let driver = if driver_name.is_null() {
        Ok(None)
    } else {
        required_str(driver_name).map(Some)
    };
    with_context(|context| {
        let (path, driver) = match (path, driver) {
            (Ok(path), Ok(driver)) => (path, driver),
            (Err(error), _) | (_, Err(error)) => {
                context.record_failure(error);
                return MeshHandle::NULL;
            }
        };
        context.load_mesh(path, driver).unwrap_or(MeshHandle::NULL)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_close_mesh(handle: MeshHandle) {
    with_context(|context| {
        context.close_mesh(handle);
    })
}

/// Save a mesh through a named driver; check the status afterwards
///
/// # Safety
/// `path` and `driver_name` must point at NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn hydromesh_save_mesh(
    handle: MeshHandle,
    path: *const c_char,
    driver_name: *const c_char,
) {
    let path = required_str(path);
    let driver = required_str(driver_name);
    with_context(|context| {
        let (path, driver) = match (path, driver) {
            (Ok(path), Ok(driver)) => (path, driver),
            (Err(error), _) | (_, Err(error)) => {
                context.record_failure(error);
                return;
            }
        };
        context.save_mesh(handle, path, driver);
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_vertex_count(handle: MeshHandle) -> i32 {
    with_context(|context| context.vertex_count(handle).unwrap_or(0) as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_face_count(handle: MeshHandle) -> i32 {
    with_context(|context| context.face_count(handle).unwrap_or(0) as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_edge_count(handle: MeshHandle) -> i32 {
    with_context(|context| context.edge_count(handle).unwrap_or(0) as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_face_vertices_maximum_count(handle: MeshHandle) -> i32 {
    with_context(|context| context.face_vertices_maximum_count(handle).unwrap_or(0) as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_driver_name(handle: MeshHandle) -> *const c_char {
    with_context(|context| match context.driver_name(handle) {
        Some(name) => {
            let owned = name.to_owned();
            buffer_string(&owned)
        }
        None => std::ptr::null(),
    })
}

/// Write the mesh extent into the four out-parameters (NaN on failure)
///
/// # Safety
/// All four pointers must be valid for writes or null.
#[no_mangle]
pub unsafe extern "C" fn hydromesh_mesh_extent(
    handle: MeshHandle,
    min_x: *mut f64,
    max_x: *mut f64,
    min_y: *mut f64,
    max_y: *mut f64,
) {
    let extent = with_context(|context| context.extent(handle));
    let (a, b, c, d) = match extent {
        Some(extent) => (extent.min_x, extent.max_x, extent.min_y, extent.max_y),
        None => (f64::NAN, f64::NAN, f64::NAN, f64::NAN),
    };
    if !min_x.is_null() {
        *min_x = a;
    }
    if !max_x.is_null() {
        *max_x = b;
    }
    if !min_y.is_null() {
        *min_y = c;
    }
    if !max_y.is_null() {
        *max_y = d;
    }
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_vertex_x(handle: MeshHandle, index: i32) -> f64 {
    with_context(|context| {
        context
            .vertex(handle, clamp_index(index))
            .map(|v| v.x)
            .unwrap_or(f64::NAN)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_vertex_y(handle: MeshHandle, index: i32) -> f64 {
    with_context(|context| {
        context
            .vertex(handle, clamp_index(index))
            .map(|v| v.y)
            .unwrap_or(f64::NAN)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_vertex_z(handle: MeshHandle, index: i32) -> f64 {
    with_context(|context| {
        context
            .vertex(handle, clamp_index(index))
            .map(|v| v.z)
            .unwrap_or(f64::NAN)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_face_vertex_count(handle: MeshHandle, face: i32) -> i32 {
    with_context(|context| {
        context
            .face_vertex_count(handle, clamp_index(face))
            .unwrap_or(0) as i32
    })
}

/// Vertex index at a slot of the face's padded view; -1 marks a padded slot
#[no_mangle]
pub extern "C" fn hydromesh_mesh_face_vertex(handle: MeshHandle, face: i32, slot: i32) -> i64 {
    with_context(|context| {
        match context.face_vertex(handle, clamp_index(face), clamp_index(slot)) {
            Some(NO_VERTEX) => -1,
            Some(index) => index as i64,
            None => -1,
        }
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_dataset_group_count(handle: MeshHandle) -> i32 {
    with_context(|context| context.dataset_group_count(handle).unwrap_or(0) as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_mesh_dataset_group(
    handle: MeshHandle,
    index: i32,
) -> DatasetGroupHandle {
    with_context(|context| {
        context
            .dataset_group(handle, clamp_index(index))
            .unwrap_or(DatasetGroupHandle::NULL)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_group_name(handle: DatasetGroupHandle) -> *const c_char {
    with_context(|context| match context.group_name(handle) {
        Some(name) => {
            let owned = name.to_owned();
            buffer_string(&owned)
        }
        None => std::ptr::null(),
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_group_metadata_count(handle: DatasetGroupHandle) -> i32 {
    with_context(|context| context.group_metadata_count(handle).unwrap_or(0) as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_group_metadata_key(
    handle: DatasetGroupHandle,
    index: i32,
) -> *const c_char {
    with_context(
        |context| match context.group_metadata_key(handle, clamp_index(index)) {
            Some(key) => {
                let owned = key.to_owned();
                buffer_string(&owned)
            }
            None => std::ptr::null(),
        },
    )
}

#[no_mangle]
pub extern "C" fn hydromesh_group_metadata_value(
    handle: DatasetGroupHandle,
    index: i32,
) -> *const c_char {
    with_context(
        |context| match context.group_metadata_value(handle, clamp_index(index)) {
            Some(value) => {
                let owned = value.to_owned();
                buffer_string(&owned)
            }
            None => std::ptr::null(),
        },
    )
}

#[no_mangle]
pub extern "C" fn hydromesh_group_is_on_vertices(handle: DatasetGroupHandle) -> bool {
    with_context(|context| context.group_is_on_vertices(handle).unwrap_or(false))
}

#[no_mangle]
pub extern "C" fn hydromesh_group_is_on_faces(handle: DatasetGroupHandle) -> bool {
    with_context(|context| context.group_is_on_faces(handle).unwrap_or(false))
}

#[no_mangle]
pub extern "C" fn hydromesh_group_has_scalar_data(handle: DatasetGroupHandle) -> bool {
    with_context(|context| context.group_has_scalar_data(handle).unwrap_or(false))
}

#[no_mangle]
pub extern "C" fn hydromesh_group_dataset_count(handle: DatasetGroupHandle) -> i32 {
    with_context(|context| context.group_dataset_count(handle).unwrap_or(0) as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_group_dataset(
    handle: DatasetGroupHandle,
    index: i32,
) -> DatasetHandle {
    with_context(|context| {
        context
            .group_dataset(handle, clamp_index(index))
            .unwrap_or(DatasetHandle::NULL)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_dataset_value_count(handle: DatasetHandle) -> i32 {
    with_context(|context| context.dataset_value_count(handle).unwrap_or(0) as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_dataset_scalar_value(handle: DatasetHandle, index: i32) -> f64 {
    with_context(|context| {
        context
            .dataset_scalar_value(handle, clamp_index(index))
            .unwrap_or(f64::NAN)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_dataset_vector_value_x(handle: DatasetHandle, index: i32) -> f64 {
    with_context(|context| {
        context
            .dataset_vector_value(handle, clamp_index(index))
            .map(|[x, _]| x)
            .unwrap_or(f64::NAN)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_dataset_vector_value_y(handle: DatasetHandle, index: i32) -> f64 {
    with_context(|context| {
        context
            .dataset_vector_value(handle, clamp_index(index))
            .map(|[_, y]| y)
            .unwrap_or(f64::NAN)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_dataset_active(handle: DatasetHandle, index: i32) -> bool {
    with_context(|context| {
        context
            .dataset_active(handle, clamp_index(index))
            .unwrap_or(false)
    })
}

#[no_mangle]
pub extern "C" fn hydromesh_dataset_is_valid(handle: DatasetHandle) -> bool {
    with_context(|context| context.dataset_is_valid(handle).unwrap_or(false))
}

#[no_mangle]
pub extern "C" fn hydromesh_dataset_time(handle: DatasetHandle) -> f64 {
    with_context(|context| context.dataset_time(handle).unwrap_or(f64::NAN))
}

#[no_mangle]
pub extern "C" fn hydromesh_driver_count() -> i32 {
    with_context(|context| context.driver_count() as i32)
}

#[no_mangle]
pub extern "C" fn hydromesh_driver_name(index: i32) -> *const c_char {
    with_context(|context| match context.driver_name_at(clamp_index(index)) {
        Some(name) => {
            let owned = name.to_owned();
            buffer_string(&owned)
        }
        None => std::ptr::null(),
    })
}

/// Write-capability predicate for a named driver
///
/// # Safety
/// `name` must point at a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn hydromesh_driver_save_mesh_capability(name: *const c_char) -> bool {
    let name = required_str(name);
    with_context(|context| match name {
        Ok(name) => context.driver_save_mesh_capability(name).unwrap_or(false),
        Err(error) => {
            context.record_failure(error);
            false
        }
    })
}
