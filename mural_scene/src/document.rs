// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Size};
use peniko::Color;

use crate::bitmap::Bitmap;
use crate::factory;
use crate::object::{Background, SceneObject};

/// Stable handle to a scene object.
///
/// Ids are unique per document and never reused, so a handle held across
/// removals can only ever refer to the object it was issued for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

/// The authoritative wallpaper scene.
///
/// A document is created once from user-supplied dimensions, mutated by
/// background and overlay operations during the session, and dropped when
/// the session ends; there is no persistence.
///
/// Invariants:
/// - The object list is a total order; iteration order equals z-order,
///   back to front.
/// - The background is always present and always at index 0.
/// - Exactly one background representation (fill or image) is active at a
///   time; setting one replaces the other.
#[derive(Clone, Debug)]
pub struct Document {
    width: u32,
    height: u32,
    objects: Vec<(ObjectId, SceneObject)>,
    next_id: u64,
}

impl Document {
    /// Creates a document of the given pixel dimensions with a black fill
    /// background.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "document dimensions must be positive");
        let mut doc = Self {
            width,
            height,
            objects: Vec::new(),
            next_id: 0,
        };
        let size = doc.size();
        let bg = factory::background_from_fill(Color::BLACK, size);
        let id = doc.issue_id();
        doc.objects.push((id, SceneObject::Background(bg)));
        doc
    }

    /// Document width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Document height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Document size in document units (one unit per pixel).
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Number of objects, background included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always `false`: the background is ever-present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Objects in z-order, back to front. Index 0 is the background.
    #[must_use]
    pub fn objects(&self) -> &[(ObjectId, SceneObject)] {
        &self.objects
    }

    /// The background object's id.
    #[must_use]
    pub fn background_id(&self) -> ObjectId {
        self.objects[0].0
    }

    /// The background object.
    #[must_use]
    pub fn background(&self) -> &Background {
        match &self.objects[0].1 {
            SceneObject::Background(bg) => bg,
            // Index 0 is a background by construction.
            SceneObject::Overlay(_) => unreachable!("index 0 must be the background"),
        }
    }

    /// Mutable access to the background object.
    pub fn background_mut(&mut self) -> &mut Background {
        match &mut self.objects[0].1 {
            SceneObject::Background(bg) => bg,
            SceneObject::Overlay(_) => unreachable!("index 0 must be the background"),
        }
    }

    /// Looks up an object by id.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|(oid, _)| *oid == id).map(|(_, obj)| obj)
    }

    /// Looks up an object by id, mutably.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, obj)| obj)
    }

    /// Replaces the background with a solid fill.
    ///
    /// The new background is re-anchored at the document origin and stays at
    /// the back of the z-order.
    pub fn set_background_fill(&mut self, color: Color) {
        let bg = factory::background_from_fill(color, self.size());
        self.objects[0].1 = SceneObject::Background(bg);
    }

    /// Replaces the background with a photo stretched to cover the document.
    ///
    /// The stretch is independent per axis, so the photo's aspect ratio is
    /// not preserved — unlike overlays, which scale uniformly. The previous
    /// fill or image is discarded atomically.
    pub fn set_background_image(&mut self, bitmap: Bitmap) {
        let bg = factory::background_from_image(bitmap, self.size());
        self.objects[0].1 = SceneObject::Background(bg);
    }

    /// Adds a polaroid overlay at the top of the stack and returns its
    /// handle.
    ///
    /// New overlays are centered on the document center (an explicit default
    /// rather than the origin) and fitted into the standard polaroid
    /// envelope; see [`factory::overlay_from_image`].
    pub fn add_overlay(&mut self, bitmap: Bitmap) -> ObjectId {
        let overlay = factory::overlay_from_image(bitmap, self.size());
        let id = self.issue_id();
        self.objects.push((id, SceneObject::Overlay(overlay)));
        id
    }

    /// Removes an overlay. Returns `false` (and does nothing) for unknown
    /// ids or the background.
    pub fn remove_overlay(&mut self, id: ObjectId) -> bool {
        let Some(idx) = self.objects.iter().position(|(oid, _)| *oid == id) else {
            return false;
        };
        if idx == 0 {
            return false;
        }
        self.objects.remove(idx);
        true
    }

    /// Moves the given objects to the top of the stack, preserving their
    /// relative order among themselves.
    ///
    /// Invoked whenever a selection is created or updated, so the most
    /// recently interacted-with overlays render above the rest; this is the
    /// system's only z-order policy. Unknown ids and the background are
    /// skipped.
    pub fn bring_to_front(&mut self, ids: &[ObjectId]) {
        if ids.is_empty() {
            return;
        }
        let mut lifted: Vec<(ObjectId, SceneObject)> = Vec::new();
        let mut idx = 1; // never move the background
        while idx < self.objects.len() {
            if ids.contains(&self.objects[idx].0) {
                lifted.push(self.objects.remove(idx));
            } else {
                idx += 1;
            }
        }
        self.objects.append(&mut lifted);
    }

    /// The topmost overlay whose bounds contain `scene_pt`, if any.
    ///
    /// The background is not hit-testable; it is never selectable.
    #[must_use]
    pub fn overlay_at(&self, scene_pt: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|(_, obj)| obj.selectable() && obj.bounds().contains(scene_pt))
            .map(|(id, _)| *id)
    }

    /// Ids of all overlays whose bounds intersect `rect`, in z-order.
    #[must_use]
    pub fn overlays_intersecting(&self, rect: kurbo::Rect) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, obj)| obj.selectable() && obj.bounds().intersect(rect).area() > 0.0)
            .map(|(id, _)| *id)
            .collect()
    }

    fn issue_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }
}
