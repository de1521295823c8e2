//! The object store: owner of the ordered boxes and driver of every
//! recompute.
//!
//! Each public mutation runs the full pipeline before returning:
//! layout → mesh sync → bounding box → camera fit → fragment rewrite,
//! and only then are collaborators notified. There is no intermediate
//! state for a renderer or listener to observe.

use std::collections::HashMap;
use std::fmt;

use boxcmp_ir::{read_config, write_config, BoxSpec};
use boxcmp_kernel::{
    bounding_box, fit_view, layout, Alignment, BoundingBox, CameraPose, Lens, Placed, Viewpoint,
    MAX_DIMENSION,
};

use crate::error::{SettingsError, StoreError};
use crate::object::{BoxId, BoxObject, Collection};
use crate::render::{Listener, MeshHandle, NullRenderer, Renderer};
use crate::settings::ViewerSettings;

/// Ordered set of boxes with its derived layout, camera and fragment.
pub struct ObjectStore {
    objects: Collection,
    meshes: HashMap<BoxId, MeshHandle>,
    alignment: Alignment,
    viewpoint: Viewpoint,
    lens: Lens,
    camera: CameraPose,
    fragment: String,
    renderer: Box<dyn Renderer>,
    listeners: Vec<Box<dyn Listener>>,
}

impl fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStore")
            .field("objects", &self.objects)
            .field("alignment", &self.alignment)
            .field("viewpoint", &self.viewpoint)
            .field("lens", &self.lens)
            .field("camera", &self.camera)
            .field("fragment", &self.fragment)
            .finish_non_exhaustive()
    }
}

impl ObjectStore {
    /// Create an empty store looking through `lens`.
    pub fn new(lens: Lens) -> Self {
        let viewpoint = Viewpoint::default();
        Self {
            objects: Collection::new(),
            meshes: HashMap::new(),
            alignment: Alignment::default(),
            viewpoint,
            lens,
            camera: fit_view(&BoundingBox::zero(), &lens, viewpoint),
            fragment: String::new(),
            renderer: Box::new(NullRenderer::default()),
            listeners: Vec::new(),
        }
    }

    /// Create an empty store from viewer settings.
    pub fn from_settings(settings: &ViewerSettings) -> Result<Self, SettingsError> {
        let mut store = Self::new(settings.lens()?);
        store.alignment = settings.alignment;
        store.viewpoint = settings.viewpoint;
        store.camera = fit_view(&BoundingBox::zero(), &store.lens, store.viewpoint);
        Ok(store)
    }

    /// Draw through `renderer` instead of the default [`NullRenderer`].
    ///
    /// Call before adding boxes; meshes created by a previous renderer are
    /// not transferred.
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self.meshes.clear();
        self
    }

    /// Register a listener for state changes.
    pub fn add_listener(&mut self, listener: impl Listener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a box and return its id.
    ///
    /// The id comes from `spec` when given, otherwise a fresh UUID.
    pub fn add(&mut self, spec: BoxSpec) -> Result<BoxId, StoreError> {
        let id = self.insert(spec)?;
        tracing::debug!(%id, count = self.objects.len(), "added object");
        self.recompute();
        Ok(id)
    }

    /// Remove the box with `id`. Returns `false` (and changes nothing) if
    /// there is none.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(object) = self.objects.remove(id) else {
            return false;
        };
        self.drop_mesh(&object.id);
        tracing::debug!(%id, count = self.objects.len(), "removed object");
        self.recompute();
        true
    }

    /// Remove every box. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.objects.clear();
        for object in &removed {
            self.drop_mesh(&object.id);
        }
        tracing::debug!(count = removed.len(), "cleared objects");
        self.recompute();
        removed.len()
    }

    /// Replace the order with `ids`.
    ///
    /// Unknown or repeated ids are ignored. Boxes missing from `ids` are
    /// removed rather than appended.
    pub fn reorder<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let dropped = self.objects.reorder(ids);
        for object in &dropped {
            self.drop_mesh(&object.id);
        }
        if !dropped.is_empty() {
            tracing::debug!(
                dropped = dropped.len(),
                "reorder omitted existing objects; removed them"
            );
        }
        self.recompute();
    }

    /// Change the packing axis and relayout everything.
    pub fn set_alignment_axis(&mut self, alignment: Alignment) {
        tracing::debug!(%alignment, "alignment changed");
        self.alignment = alignment;
        self.recompute();
    }

    /// Line boxes up side by side and look from the front.
    pub fn align_front(&mut self) {
        self.viewpoint = Viewpoint::Front;
        self.set_alignment_axis(Alignment::Front);
    }

    /// Line boxes up front to back and look from the side.
    pub fn align_side(&mut self) {
        self.viewpoint = Viewpoint::Side;
        self.set_alignment_axis(Alignment::Side);
    }

    /// Switch viewpoint and refit the camera. Layout is untouched.
    pub fn set_viewpoint(&mut self, viewpoint: Viewpoint) -> CameraPose {
        tracing::debug!(%viewpoint, "viewpoint changed");
        self.viewpoint = viewpoint;
        self.refit();
        self.notify_camera();
        self.camera
    }

    /// Viewport resized: refit the camera for the new aspect ratio.
    pub fn set_aspect(&mut self, aspect: f64) -> Result<CameraPose, StoreError> {
        self.lens = self.lens.with_aspect(aspect)?;
        self.refit();
        self.notify_camera();
        Ok(self.camera)
    }

    /// Restore boxes from a URL fragment.
    ///
    /// The whole fragment is remembered so unrelated slots survive later
    /// rewrites. When it carries a config, the current boxes are replaced
    /// by its entries in order; entries [`add`](Self::add) would reject are
    /// skipped. Without a usable config the collection is left as it was
    /// and written back into the remembered fragment. Either way
    /// collaborators are notified once. Returns the number of boxes
    /// restored.
    pub fn load_fragment(&mut self, hash: &str) -> usize {
        self.fragment = hash.strip_prefix('#').unwrap_or(hash).to_string();
        let Some(specs) = read_config(&self.fragment) else {
            if !self.objects.is_empty() {
                self.persist();
                for listener in &mut self.listeners {
                    listener.fragment_changed(&self.fragment);
                }
            }
            return 0;
        };

        for object in self.objects.clear() {
            self.drop_mesh(&object.id);
        }
        let mut restored = 0;
        for spec in specs {
            match self.insert(spec) {
                Ok(_) => restored += 1,
                Err(err) => tracing::warn!(%err, "skipping object from URL fragment"),
            }
        }
        tracing::debug!(restored, "loaded objects from URL fragment");
        self.recompute();
        restored
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Boxes in layout order.
    pub fn objects(&self) -> &[BoxObject] {
        self.objects.as_slice()
    }

    /// The underlying collection.
    pub fn collection(&self) -> &Collection {
        &self.objects
    }

    /// Look up a box by id.
    pub fn get(&self, id: &str) -> Option<&BoxObject> {
        self.objects.get(id)
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Current packing axis.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Current viewpoint.
    pub fn viewpoint(&self) -> Viewpoint {
        self.viewpoint
    }

    /// Current lens.
    pub fn lens(&self) -> Lens {
        self.lens
    }

    /// Camera pose for the current viewpoint.
    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    /// Bounding box of the current arrangement, computed fresh.
    pub fn bounding_box(&self) -> BoundingBox {
        bounding_box(self.objects.as_slice())
    }

    /// The shareable fragment, without a leading `#`.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Validate `spec` and append it without recomputing.
    fn insert(&mut self, spec: BoxSpec) -> Result<BoxId, StoreError> {
        let dims = [spec.width, spec.height, spec.length];
        if !dims.iter().all(|d| (0.0..=MAX_DIMENSION).contains(d)) {
            return Err(StoreError::InvalidDimensions {
                width: spec.width,
                height: spec.height,
                length: spec.length,
            });
        }

        let id = spec
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        match self.objects.push(BoxObject::from_spec(id.clone(), spec)) {
            Ok(()) => Ok(id),
            Err(object) => Err(StoreError::DuplicateId(object.id)),
        }
    }

    fn recompute(&mut self) {
        layout(self.objects.as_mut_slice(), self.alignment);
        self.sync_meshes();
        self.refit();
        self.persist();

        for listener in &mut self.listeners {
            listener.objects_changed(self.objects.as_slice());
        }
        self.notify_camera();
        for listener in &mut self.listeners {
            listener.fragment_changed(&self.fragment);
        }
    }

    fn sync_meshes(&mut self) {
        for object in self.objects.iter() {
            match self.meshes.get(&object.id) {
                Some(&handle) => self.renderer.move_mesh(handle, object.position()),
                None => {
                    let handle =
                        self.renderer
                            .add_mesh(object.size(), &object.color, object.position());
                    self.meshes.insert(object.id.clone(), handle);
                }
            }
        }
    }

    fn drop_mesh(&mut self, id: &str) {
        if let Some(handle) = self.meshes.remove(id) {
            self.renderer.remove_mesh(handle);
        }
    }

    fn refit(&mut self) {
        self.camera = fit_view(&self.bounding_box(), &self.lens, self.viewpoint);
    }

    fn notify_camera(&mut self) {
        self.renderer.set_camera(&self.camera);
        for listener in &mut self.listeners {
            listener.camera_changed(&self.camera);
        }
    }

    fn persist(&mut self) {
        let specs: Vec<BoxSpec> = self.objects.iter().map(BoxObject::to_spec).collect();
        match write_config(&self.fragment, &specs) {
            Ok(fragment) => self.fragment = fragment,
            Err(err) => tracing::warn!(%err, "could not write config to URL fragment"),
        }
    }
}
