// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use mural_scene::{Handle, ObjectId};

/// The gesture currently in progress, if any.
///
/// States are mutually exclusive and each carries its own anchor/delta
/// payload, so no gesture bookkeeping leaks across states.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum InteractionState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Alt-drag canvas pan.
    Panning {
        /// Pointer position at the previous event, in screen space. Each
        /// move pans by the delta since this point, so the pan tracks
        /// pointer velocity exactly.
        last: Point,
    },
    /// Moving a selected overlay by its body.
    DraggingOverlay {
        /// The overlay being moved.
        id: ObjectId,
        /// Pointer position at the previous event, in scene space.
        last_scene: Point,
    },
    /// Uniformly resizing a selected overlay by a corner handle.
    ResizingOverlay {
        /// The overlay being resized.
        id: ObjectId,
        /// The dragged corner.
        corner: Handle,
        /// The opposite corner, fixed in scene space for the gesture.
        fixed_scene: Point,
        /// Pointer distance to the fixed corner at gesture start.
        start_distance: f64,
        /// Overlay scale at gesture start; moves apply a single factor to
        /// both axes of this snapshot.
        start_scale: Vec2,
    },
    /// Rectangular multi-select on empty canvas.
    LassoSelect {
        /// Scene-space point where the lasso started.
        origin_scene: Point,
        /// Scene-space point under the pointer now.
        current_scene: Point,
    },
}

impl InteractionState {
    /// Returns `true` while a canvas pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
