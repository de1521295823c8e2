#![warn(missing_docs)]

//! boxcmp: compare the sizes of labeled boxes side by side.
//!
//! An [`ObjectStore`] owns an ordered list of boxes. Every mutation lays the
//! boxes out along one axis, reframes the camera around them and rewrites a
//! shareable URL fragment, then tells the renderer and any listeners.
//!
//! # Example
//!
//! ```
//! use boxcmp::{BoxSpec, ObjectStore, ViewerSettings, Viewpoint};
//!
//! let mut store = ObjectStore::from_settings(&ViewerSettings::default()).unwrap();
//! store.add(BoxSpec::new("Fridge", 0.7, 1.8, 0.65, "#cccccc")).unwrap();
//! store.add(BoxSpec::new("Shelf", 0.4, 2.1, 0.3, "#8b4513")).unwrap();
//!
//! let bbox = store.bounding_box();
//! assert!((bbox.size.x - 2.1).abs() < 1e-9);
//!
//! let pose = store.set_viewpoint(Viewpoint::Isometric);
//! assert_eq!(pose.target, bbox.center);
//!
//! let mut copy = ObjectStore::from_settings(&ViewerSettings::default()).unwrap();
//! assert_eq!(copy.load_fragment(store.fragment()), 2);
//! ```

pub use boxcmp_ir;
pub use boxcmp_kernel;
pub use boxcmp_math;

pub mod error;
pub mod object;
pub mod render;
pub mod settings;
pub mod store;

pub use boxcmp_ir::{BoxSpec, Config, Fragment, CONFIG_KEY};
pub use boxcmp_kernel::{Alignment, BoundingBox, CameraPose, Lens, Placed, Viewpoint};
pub use error::{SettingsError, StoreError};
pub use object::{BoxId, BoxObject, Collection};
pub use render::{Listener, MeshHandle, NullRenderer, Renderer};
pub use settings::{aspect_for_viewport_width, ViewerSettings, MOBILE_BREAKPOINT};
pub use store::ObjectStore;
