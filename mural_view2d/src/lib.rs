// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mural View 2D: viewport primitives for the wallpaper editor.
//!
//! This crate provides a small, headless model of the editor camera: a
//! uniform pan+zoom transform mapping the fixed document ("scene") plane
//! into the host surface's pixel ("screen") space. It focuses on:
//! - Camera state (pan offset + clamped zoom).
//! - Coordinate conversion between scene and screen space.
//! - Zoom anchored at an arbitrary screen point (for example, the wheel
//!   cursor position).
//! - Mapping raw wheel deltas onto zoom factors.
//!
//! It does **not** own any scene graph or rendering backend. Callers are
//! expected to:
//! - Maintain their own document/object list.
//! - Use [`Viewport`] to derive transforms for rendering and hit testing.
//! - Wire pointer/wheel events into pan/zoom operations at a higher layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use mural_view2d::Viewport;
//!
//! // Host surface: an 800x600 window.
//! let mut view = Viewport::new(Size::new(800.0, 600.0));
//!
//! // Zoom in around the cursor; the point under the cursor stays put.
//! let cursor = Point::new(400.0, 300.0);
//! view.wheel_zoom(cursor, -100.0);
//!
//! // Convert a pointer position into scene space for hit testing.
//! let scene_pt = view.screen_to_scene_point(cursor);
//! let back = view.scene_to_screen_point(scene_pt);
//! assert!((back.x - cursor.x).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - The camera is axis-aligned with a **uniform** zoom factor; rotation is
//!   intentionally left out.
//! - Panning operates in screen space and accumulates move-event deltas, so
//!   pan gestures track pointer velocity exactly.
//! - Zoom is clamped to a fixed range and the clamp is total and
//!   idempotent: repeated zoom requests at a bound are no-ops.
//! - A host resize changes only the tracked screen size; zoom and pan are
//!   left alone, so content may run off-screen until the user re-frames.
//!
//! This crate is `no_std`.

#![no_std]

mod viewport;

pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport, WHEEL_ZOOM_BASE};
