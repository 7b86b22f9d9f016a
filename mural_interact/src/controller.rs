// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use mural_scene::{Document, Handle, ObjectId, Selection};
use mural_view2d::Viewport;

use crate::event::{Key, KeyEvent, PointerEvent, WheelEvent};
use crate::state::InteractionState;

/// Pick radius around a corner handle, in screen pixels.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;

/// What an event handler did, for the host to act on.
///
/// `render` asks the host to schedule a repaint (the rasterizer coalesces
/// repeated requests within a tick); `selection_changed` lets session-level
/// observers react without diffing the selection themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// A repaint should be scheduled.
    pub render: bool,
    /// The selected set changed.
    pub selection_changed: bool,
}

impl Outcome {
    const NONE: Self = Self {
        render: false,
        selection_changed: false,
    };

    const RENDER: Self = Self {
        render: true,
        selection_changed: false,
    };
}

/// The interaction controller: events in, scene/selection/viewport
/// mutations out.
///
/// The controller owns the current [`InteractionState`] and a screen-space
/// hit cache. Background objects never receive drag or resize gestures;
/// they are not selectable and the hit paths skip them entirely.
#[derive(Debug, Default)]
pub struct Controller {
    state: InteractionState,
    /// Screen-space overlay bounds in z-order, rebuilt lazily. Stale during
    /// a pan by design; see [`Controller::on_pointer_up`].
    hit_cache: Option<Vec<(ObjectId, Rect)>>,
}

impl Controller {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The gesture currently in progress.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Whether the screen-space hit cache is currently valid.
    ///
    /// Exposed for diagnostics and tests; hosts do not need it.
    #[must_use]
    pub fn hit_cache_valid(&self) -> bool {
        self.hit_cache.is_some()
    }

    /// Handles a pointer-down event.
    pub fn on_pointer_down(
        &mut self,
        doc: &mut Document,
        sel: &mut Selection,
        vp: &mut Viewport,
        ev: &PointerEvent,
    ) -> Outcome {
        if ev.modifiers.alt {
            // Pan gesture; rectangular selection stays disabled until the
            // pointer comes back up.
            self.state = InteractionState::Panning { last: ev.pos };
            return Outcome::NONE;
        }

        let scene_pt = vp.screen_to_scene_point(ev.pos);

        if let Some((id, corner)) = self.hit_handle(doc, sel, vp, ev.pos) {
            let overlay = match doc.get(id).and_then(|obj| obj.as_overlay()) {
                Some(ov) => ov,
                None => return Outcome::NONE,
            };
            let fixed_scene = corner.opposite().position_on(overlay.bounds());
            let start_distance = scene_pt.distance(fixed_scene);
            if start_distance <= 0.0 {
                return Outcome::NONE;
            }
            self.state = InteractionState::ResizingOverlay {
                id,
                corner,
                fixed_scene,
                start_distance,
                start_scale: overlay.scale,
            };
            return Outcome::NONE;
        }

        if let Some(id) = self.overlay_at_screen(doc, vp, ev.pos) {
            let before = sel.revision();
            if ev.modifiers.shift {
                sel.toggle(id);
            } else if !sel.contains(id) {
                sel.select_only(id);
            }
            let selection_changed = sel.revision() != before;
            if selection_changed && sel.contains(id) {
                doc.bring_to_front(&[id]);
                self.invalidate_hit_cache();
            }
            if sel.contains(id) {
                self.state = InteractionState::DraggingOverlay {
                    id,
                    last_scene: scene_pt,
                };
            }
            return Outcome {
                render: selection_changed,
                selection_changed,
            };
        }

        // Empty canvas: start a lasso, dropping any existing selection.
        let before = sel.revision();
        sel.clear();
        self.state = InteractionState::LassoSelect {
            origin_scene: scene_pt,
            current_scene: scene_pt,
        };
        let selection_changed = sel.revision() != before;
        Outcome {
            render: selection_changed,
            selection_changed,
        }
    }

    /// Handles a pointer-move event.
    pub fn on_pointer_move(
        &mut self,
        doc: &mut Document,
        _sel: &mut Selection,
        vp: &mut Viewport,
        ev: &PointerEvent,
    ) -> Outcome {
        match &mut self.state {
            InteractionState::Idle => Outcome::NONE,
            InteractionState::Panning { last } => {
                // Cumulative screen-space delta; the hit cache stays stale
                // until pointer-up.
                let delta = ev.pos - *last;
                *last = ev.pos;
                vp.pan_by(delta);
                Outcome::RENDER
            }
            InteractionState::DraggingOverlay { id, last_scene } => {
                let scene_pt = vp.screen_to_scene_point(ev.pos);
                let delta = scene_pt - *last_scene;
                *last_scene = scene_pt;
                let id = *id;
                if let Some(overlay) = doc.get_mut(id).and_then(|obj| obj.as_overlay_mut()) {
                    overlay.translate(delta);
                }
                self.invalidate_hit_cache();
                Outcome::RENDER
            }
            InteractionState::ResizingOverlay {
                id,
                corner,
                fixed_scene,
                start_distance,
                start_scale,
            } => {
                let scene_pt = vp.screen_to_scene_point(ev.pos);
                let factor = (scene_pt.distance(*fixed_scene) / *start_distance).max(1e-3);
                let (id, corner, fixed_scene, start_scale) =
                    (*id, *corner, *fixed_scene, *start_scale);
                if let Some(overlay) = doc.get_mut(id).and_then(|obj| obj.as_overlay_mut()) {
                    overlay.scale = Vec2::new(start_scale.x * factor, start_scale.y * factor);
                    overlay.position =
                        anchor_position(corner.opposite(), fixed_scene, overlay.scaled_size());
                }
                self.invalidate_hit_cache();
                Outcome::RENDER
            }
            InteractionState::LassoSelect { current_scene, .. } => {
                *current_scene = vp.screen_to_scene_point(ev.pos);
                Outcome::RENDER
            }
        }
    }

    /// Handles a pointer-up event, ending the current gesture.
    pub fn on_pointer_up(
        &mut self,
        doc: &mut Document,
        sel: &mut Selection,
        _vp: &mut Viewport,
        _ev: &PointerEvent,
    ) -> Outcome {
        match core::mem::take(&mut self.state) {
            InteractionState::Idle => Outcome::NONE,
            InteractionState::Panning { .. } => {
                // The one place the viewport-dependent hit cache is
                // invalidated for a pan: exactly once, at gesture end, not
                // on every intermediate move.
                self.invalidate_hit_cache();
                Outcome::RENDER
            }
            InteractionState::LassoSelect {
                origin_scene,
                current_scene,
            } => {
                let rect = Rect::from_points(origin_scene, current_scene);
                let before = sel.revision();
                let hits = doc.overlays_intersecting(rect);
                sel.replace_with(hits.iter().copied());
                let selection_changed = sel.revision() != before;
                if selection_changed {
                    doc.bring_to_front(&hits);
                    self.invalidate_hit_cache();
                }
                Outcome {
                    render: true,
                    selection_changed,
                }
            }
            InteractionState::DraggingOverlay { .. }
            | InteractionState::ResizingOverlay { .. } => Outcome::RENDER,
        }
    }

    /// Handles a wheel event as an anchored zoom.
    #[cfg(any(feature = "std", feature = "libm"))]
    pub fn on_wheel(
        &mut self,
        _doc: &mut Document,
        _sel: &mut Selection,
        vp: &mut Viewport,
        ev: &WheelEvent,
    ) -> Outcome {
        vp.wheel_zoom(ev.pos, ev.delta_y);
        self.invalidate_hit_cache();
        Outcome::RENDER
    }

    /// Handles a keyboard event.
    ///
    /// Delete removes every selected overlay, unless an IME composition is
    /// active (`is_composing`) or nothing is selected. The background can
    /// never be selected, so it always survives.
    pub fn on_key(
        &mut self,
        doc: &mut Document,
        sel: &mut Selection,
        _vp: &mut Viewport,
        ev: &KeyEvent,
    ) -> Outcome {
        match ev.key {
            Key::Delete => {
                if ev.is_composing || sel.is_empty() {
                    return Outcome::NONE;
                }
                let doomed: Vec<ObjectId> = sel.items().to_vec();
                for id in doomed {
                    doc.remove_overlay(id);
                }
                sel.clear();
                self.invalidate_hit_cache();
                Outcome {
                    render: true,
                    selection_changed: true,
                }
            }
        }
    }

    /// Handles a host-surface resize.
    ///
    /// Zoom and pan are left unchanged (no re-fit); pan/zoom let the user
    /// recover framing.
    pub fn on_host_resize(&mut self, vp: &mut Viewport, size: Size) -> Outcome {
        vp.set_screen_size(size);
        Outcome::RENDER
    }

    /// Drops the cached screen-space bounds; the next hit test rebuilds.
    pub fn invalidate_hit_cache(&mut self) {
        self.hit_cache = None;
    }

    /// Topmost overlay under a screen point, via the hit cache.
    fn overlay_at_screen(
        &mut self,
        doc: &Document,
        vp: &Viewport,
        screen_pt: Point,
    ) -> Option<ObjectId> {
        self.ensure_hit_cache(doc, vp);
        self.hit_cache
            .as_ref()?
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(screen_pt))
            .map(|(id, _)| *id)
    }

    /// Corner handle of a *selected* overlay under a screen point.
    fn hit_handle(
        &mut self,
        doc: &Document,
        sel: &Selection,
        vp: &Viewport,
        screen_pt: Point,
    ) -> Option<(ObjectId, Handle)> {
        self.ensure_hit_cache(doc, vp);
        let cache = self.hit_cache.as_ref()?;
        for (id, rect) in cache.iter().rev() {
            if !sel.contains(*id) {
                continue;
            }
            for handle in Handle::ALL {
                if handle.position_on(*rect).distance(screen_pt) <= HANDLE_HIT_RADIUS {
                    return Some((*id, handle));
                }
            }
        }
        None
    }

    fn ensure_hit_cache(&mut self, doc: &Document, vp: &Viewport) {
        if self.hit_cache.is_some() {
            return;
        }
        let cache = doc
            .objects()
            .iter()
            .filter(|(_, obj)| obj.selectable())
            .map(|(id, obj)| (*id, vp.scene_to_screen_rect(obj.bounds())))
            .collect();
        self.hit_cache = Some(cache);
    }
}

/// Position for an overlay of `size` whose `fixed` corner sits at `at`.
fn anchor_position(fixed: Handle, at: Point, size: Size) -> Point {
    match fixed {
        Handle::TopLeft => at,
        Handle::TopRight => Point::new(at.x - size.width, at.y),
        Handle::BottomLeft => Point::new(at.x, at.y - size.height),
        Handle::BottomRight => Point::new(at.x - size.width, at.y - size.height),
    }
}
