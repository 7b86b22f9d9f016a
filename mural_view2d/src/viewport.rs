// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Smallest permitted zoom factor.
pub const MIN_ZOOM: f64 = 0.01;

/// Largest permitted zoom factor.
pub const MAX_ZOOM: f64 = 20.0;

/// Base of the wheel-delta → zoom-factor mapping.
///
/// A wheel event with vertical delta `d` multiplies the zoom by
/// `WHEEL_ZOOM_BASE.powf(d)`, so scrolling down (positive delta) zooms out
/// and scrolling up zooms in, monotonically and without overshoot even for
/// large trackpad inertia deltas.
pub const WHEEL_ZOOM_BASE: f64 = 0.999;

#[cfg(feature = "std")]
fn powf(base: f64, exp: f64) -> f64 {
    base.powf(exp)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn powf(base: f64, exp: f64) -> f64 {
    libm::pow(base, exp)
}

/// Pan+zoom camera over the document plane.
///
/// `Viewport` tracks the host surface size in pixels and a uniform pan+zoom
/// transform mapping scene (document) coordinates into screen coordinates.
/// It can be used to:
/// - Convert points between scene and screen space.
/// - Pan by accumulated screen-space deltas.
/// - Zoom around a chosen anchor point, keeping the anchor visually fixed.
#[derive(Clone, Debug)]
pub struct Viewport {
    screen_size: Size,
    zoom: f64,
    pan: Vec2,
    scene_to_screen: Affine,
    screen_to_scene: Affine,
}

impl Viewport {
    /// Creates a viewport over a host surface of the given pixel size.
    ///
    /// - Initial zoom is `1.0`.
    /// - Initial pan is zero (the scene origin maps to the screen origin).
    #[must_use]
    pub fn new(screen_size: Size) -> Self {
        let mut vp = Self {
            screen_size,
            zoom: 1.0,
            pan: Vec2::ZERO,
            scene_to_screen: Affine::IDENTITY,
            screen_to_scene: Affine::IDENTITY,
        };
        vp.rebuild_transforms();
        vp
    }

    /// Returns the current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Returns the current pan offset in screen coordinates.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Returns the tracked host surface size in pixels.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        self.screen_size
    }

    /// Updates the tracked host surface size.
    ///
    /// Zoom and pan are deliberately left unchanged (no re-fit); content may
    /// end up off-screen, and pan/zoom let the user recover framing.
    pub fn set_screen_size(&mut self, size: Size) {
        self.screen_size = size;
    }

    /// Sets the zoom factor, clamping it into `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// The clamp is total and idempotent: out-of-range requests land on the
    /// nearest bound, and repeated application at a bound changes nothing.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
    }

    /// Pans the view by a delta in screen space.
    ///
    /// Pan gestures call this once per move event with the delta since the
    /// previous event, so the accumulated offset tracks the pointer exactly.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.pan += delta;
        self.rebuild_transforms();
    }

    /// Zooms around a given anchor point in screen coordinates.
    ///
    /// The new zoom is `clamp(zoom * factor)` and the pan is adjusted so the
    /// scene point under `anchor_screen` keeps its screen position. Two
    /// sequential calls at the same anchor compose: zooming by `f1` then
    /// `f2` is equivalent to a single zoom by `f1 * f2`.
    pub fn zoom_about(&mut self, anchor_screen: Point, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (new_zoom - old_zoom).abs() < f64::EPSILON {
            return;
        }

        let anchor_scene = self.screen_to_scene_point(anchor_screen);
        self.zoom = new_zoom;
        self.rebuild_transforms();
        let moved = self.scene_to_screen_point(anchor_scene);
        self.pan_by(anchor_screen - moved);
    }

    /// Applies a wheel event's vertical delta as an anchored zoom.
    ///
    /// The zoom factor is `WHEEL_ZOOM_BASE.powf(delta_y)`; see the constant
    /// for the rationale behind the mapping.
    #[cfg(any(feature = "std", feature = "libm"))]
    pub fn wheel_zoom(&mut self, anchor_screen: Point, delta_y: f64) {
        self.zoom_about(anchor_screen, powf(WHEEL_ZOOM_BASE, delta_y));
    }

    /// Returns the scene→screen transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.scene_to_screen
    }

    /// Converts a scene-space point into screen coordinates.
    #[must_use]
    pub fn scene_to_screen_point(&self, pt: Point) -> Point {
        self.scene_to_screen * pt
    }

    /// Converts a screen-space point (for example, a pointer position) into
    /// scene coordinates.
    #[must_use]
    pub fn screen_to_scene_point(&self, pt: Point) -> Point {
        self.screen_to_scene * pt
    }

    /// Converts a scene-space rectangle into screen coordinates.
    ///
    /// The transform is axis-aligned, so mapping the min/max corners is
    /// exact.
    #[must_use]
    pub fn scene_to_screen_rect(&self, rect: Rect) -> Rect {
        let p0 = self.scene_to_screen * Point::new(rect.x0, rect.y0);
        let p1 = self.scene_to_screen * Point::new(rect.x1, rect.y1);
        Rect::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// Returns the scene-space rectangle currently visible on screen.
    #[must_use]
    pub fn visible_scene_rect(&self) -> Rect {
        let p0 = self.screen_to_scene * Point::ORIGIN;
        let p1 = self.screen_to_scene
            * Point::new(self.screen_size.width, self.screen_size.height);
        Rect::new(p0.x, p0.y, p1.x, p1.y)
    }

    fn rebuild_transforms(&mut self) {
        // Scene → screen: scale by zoom, then translate by the pan offset.
        self.scene_to_screen = Affine::translate(self.pan) * Affine::scale(self.zoom);
        self.screen_to_scene = self.scene_to_screen.inverse();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{MAX_ZOOM, MIN_ZOOM, Viewport, WHEEL_ZOOM_BASE};

    #[test]
    fn screen_scene_roundtrip() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        vp.pan_by(Vec2::new(37.5, -12.25));
        vp.set_zoom(2.5);

        let screen_pt = Point::new(123.0, 456.0);
        let scene_pt = vp.screen_to_scene_point(screen_pt);
        let back = vp.scene_to_screen_point(scene_pt);
        assert!((back.x - screen_pt.x).abs() < 1e-9);
        assert!((back.y - screen_pt.y).abs() < 1e-9);
    }

    #[test]
    fn zoom_about_keeps_anchor_fixed() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        let anchor = Point::new(200.0, 150.0);
        let scene_before = vp.screen_to_scene_point(anchor);

        vp.zoom_about(anchor, 2.0);
        let scene_after = vp.screen_to_scene_point(anchor);

        assert!((scene_after.x - scene_before.x).abs() < 1e-9);
        assert!((scene_after.y - scene_before.y).abs() < 1e-9);
    }

    #[test]
    fn sequential_zooms_compose() {
        let anchor = Point::new(320.0, 240.0);

        let mut a = Viewport::new(Size::new(640.0, 480.0));
        a.zoom_about(anchor, 1.5);
        a.zoom_about(anchor, 0.8);

        let mut b = Viewport::new(Size::new(640.0, 480.0));
        b.zoom_about(anchor, 1.5 * 0.8);

        assert!((a.zoom() - b.zoom()).abs() < 1e-9);
        assert!((a.pan().x - b.pan().x).abs() < 1e-6);
        assert!((a.pan().y - b.pan().y).abs() < 1e-6);
    }

    #[test]
    fn zoom_is_always_clamped() {
        let mut vp = Viewport::new(Size::new(100.0, 100.0));

        vp.set_zoom(1e6);
        assert_eq!(vp.zoom(), MAX_ZOOM);
        // Idempotent at the bound.
        vp.set_zoom(1e6);
        assert_eq!(vp.zoom(), MAX_ZOOM);

        vp.set_zoom(0.0);
        assert_eq!(vp.zoom(), MIN_ZOOM);

        let anchor = Point::new(50.0, 50.0);
        vp.zoom_about(anchor, 1e-9);
        assert_eq!(vp.zoom(), MIN_ZOOM);
    }

    #[test]
    fn wheel_delta_maps_to_expected_zoom() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        vp.wheel_zoom(Point::new(400.0, 300.0), -100.0);

        let expected = WHEEL_ZOOM_BASE.powf(-100.0);
        assert!((vp.zoom() - expected).abs() < 1e-12);
        // ~1.105, comfortably within bounds.
        assert!(vp.zoom() > 1.1 && vp.zoom() < 1.11);
    }

    #[test]
    fn pan_accumulates_screen_deltas() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        vp.pan_by(Vec2::new(50.0, 30.0));
        vp.pan_by(Vec2::new(-20.0, 5.0));

        assert_eq!(vp.pan(), Vec2::new(30.0, 35.0));
        assert_eq!(vp.zoom(), 1.0);
    }

    #[test]
    fn resize_leaves_zoom_and_pan_alone() {
        let mut vp = Viewport::new(Size::new(800.0, 600.0));
        vp.pan_by(Vec2::new(10.0, 20.0));
        vp.set_zoom(3.0);

        vp.set_screen_size(Size::new(1024.0, 768.0));

        assert_eq!(vp.screen_size(), Size::new(1024.0, 768.0));
        assert_eq!(vp.pan(), Vec2::new(10.0, 20.0));
        assert_eq!(vp.zoom(), 3.0);
    }

    #[test]
    fn invalid_zoom_factor_is_ignored() {
        let mut vp = Viewport::new(Size::new(100.0, 100.0));
        vp.zoom_about(Point::new(10.0, 10.0), 0.0);
        vp.zoom_about(Point::new(10.0, 10.0), -2.0);
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.pan(), Vec2::ZERO);
    }
}
