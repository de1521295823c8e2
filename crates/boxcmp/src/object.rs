//! Boxes and the ordered collection that owns them.

use std::collections::HashMap;

use boxcmp_ir::BoxSpec;
use boxcmp_kernel::Placed;
use boxcmp_math::{Point3, Vec3};

/// Identifier of a box, unique within a [`Collection`].
pub type BoxId = String;

/// A labeled box with a layout-assigned position.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxObject {
    /// Stable identifier.
    pub id: BoxId,
    /// Display name.
    pub name: String,
    /// Extent along x.
    pub width: f64,
    /// Extent along y (up).
    pub height: f64,
    /// Extent along z.
    pub length: f64,
    /// Opaque color token.
    pub color: String,
    position: Point3,
}

impl BoxObject {
    /// Build an object from its persisted attributes. The position starts
    /// at the origin until the next layout pass.
    pub fn from_spec(id: BoxId, spec: BoxSpec) -> Self {
        Self {
            id,
            name: spec.name,
            width: spec.width,
            height: spec.height,
            length: spec.length,
            color: spec.color,
            position: Point3::origin(),
        }
    }

    /// The persisted attributes of this object.
    pub fn to_spec(&self) -> BoxSpec {
        BoxSpec {
            id: Some(self.id.clone()),
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            length: self.length,
            color: self.color.clone(),
        }
    }

    /// Center of the box as placed by the last layout.
    pub fn position(&self) -> Point3 {
        self.position
    }
}

impl Placed for BoxObject {
    fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.length)
    }

    fn position(&self) -> Point3 {
        self.position
    }

    fn set_position(&mut self, position: Point3) {
        self.position = position;
    }
}

/// Ordered boxes with an id → index map kept alongside.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    items: Vec<BoxObject>,
    index: HashMap<BoxId, usize>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of boxes.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a box with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Position of `id` in the current order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Look up a box by id.
    pub fn get(&self, id: &str) -> Option<&BoxObject> {
        self.index_of(id).map(|i| &self.items[i])
    }

    /// Boxes in order.
    pub fn as_slice(&self) -> &[BoxObject] {
        &self.items
    }

    /// Ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|o| o.id.as_str())
    }

    /// Iterate over boxes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, BoxObject> {
        self.items.iter()
    }

    /// Mutable access for layout. Ids must not be changed through it.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [BoxObject] {
        &mut self.items
    }

    /// Append a box. Returns it back if its id is already taken.
    pub(crate) fn push(&mut self, object: BoxObject) -> Result<(), BoxObject> {
        if self.contains(&object.id) {
            return Err(object);
        }
        self.index.insert(object.id.clone(), self.items.len());
        self.items.push(object);
        Ok(())
    }

    /// Remove the box with `id`, keeping the order of the rest.
    ///
    /// The box is found through the index map in O(1). Closing the gap
    /// shifts and reindexes the boxes after it, which is O(n) in the
    /// worst case; every mutation is followed by an O(n) layout pass, so
    /// this never dominates.
    pub(crate) fn remove(&mut self, id: &str) -> Option<BoxObject> {
        let at = self.index.remove(id)?;
        let removed = self.items.remove(at);
        for (i, object) in self.items.iter().enumerate().skip(at) {
            self.index.insert(object.id.clone(), i);
        }
        Some(removed)
    }

    /// Remove every box, returning them in their former order.
    pub(crate) fn clear(&mut self) -> Vec<BoxObject> {
        self.index.clear();
        std::mem::take(&mut self.items)
    }

    /// Replace the order with `ids`.
    ///
    /// Unknown and repeated ids are skipped. Boxes whose id does not appear
    /// are removed and returned.
    pub(crate) fn reorder<I, S>(&mut self, ids: I) -> Vec<BoxObject>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots: Vec<Option<BoxObject>> =
            std::mem::take(&mut self.items).into_iter().map(Some).collect();
        let mut ordered = Vec::with_capacity(slots.len());
        for id in ids {
            if let Some(object) = self.index.get(id.as_ref()).and_then(|&i| slots[i].take()) {
                ordered.push(object);
            }
        }

        self.items = ordered;
        self.reindex();
        slots.into_iter().flatten().collect()
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, o)| (o.id.clone(), i))
            .collect();
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a BoxObject;
    type IntoIter = std::slice::Iter<'a, BoxObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
