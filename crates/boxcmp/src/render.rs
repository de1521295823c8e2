//! Collaborators the store drives: a renderer and state listeners.
//!
//! The store only ever writes to these; it never reads scene state back.

use boxcmp_kernel::CameraPose;
use boxcmp_math::{Point3, Vec3};

use crate::object::BoxObject;

/// Renderer-side identifier of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Scene sink that owns meshes and the camera.
pub trait Renderer {
    /// Create a box mesh of `size` with `color`, centered at `position`.
    fn add_mesh(&mut self, size: Vec3, color: &str, position: Point3) -> MeshHandle;

    /// Move an existing mesh.
    fn move_mesh(&mut self, handle: MeshHandle, position: Point3);

    /// Drop a mesh. The handle is not used again.
    fn remove_mesh(&mut self, handle: MeshHandle);

    /// Place the camera.
    fn set_camera(&mut self, pose: &CameraPose);
}

/// Receives the store's state after every completed operation.
pub trait Listener {
    /// The ordered collection changed (contents, order or positions).
    fn objects_changed(&mut self, _objects: &[BoxObject]) {}

    /// The camera pose was recomputed.
    fn camera_changed(&mut self, _pose: &CameraPose) {}

    /// The shareable fragment was rewritten (no leading `#`).
    fn fragment_changed(&mut self, _fragment: &str) {}
}

/// Renderer that draws nothing and hands out sequential handles.
#[derive(Debug, Default)]
pub struct NullRenderer {
    next: u64,
}

impl Renderer for NullRenderer {
    fn add_mesh(&mut self, _size: Vec3, _color: &str, _position: Point3) -> MeshHandle {
        self.next += 1;
        MeshHandle(self.next)
    }

    fn move_mesh(&mut self, _handle: MeshHandle, _position: Point3) {}

    fn remove_mesh(&mut self, _handle: MeshHandle) {}

    fn set_camera(&mut self, _pose: &CameraPose) {}
}
