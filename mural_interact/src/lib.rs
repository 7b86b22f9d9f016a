// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mural Interact: the editor's pointer/keyboard state machine.
//!
//! This crate consumes host-surface events and produces scene, selection,
//! and viewport mutations. It replaces the ad hoc mutable flags of a
//! canvas-library editor (an `isDragging` boolean here, a `lastPos` field
//! there) with one explicit [`InteractionState`] tagged variant carrying
//! its own anchor/delta payload per state.
//!
//! ## States
//!
//! - [`InteractionState::Idle`]: no gesture in progress.
//! - [`InteractionState::Panning`]: the pan modifier (Alt) was held on
//!   pointer-down; every move event translates the viewport by the
//!   screen-space delta since the previous event. Rectangular selection is
//!   disabled for the duration.
//! - [`InteractionState::DraggingOverlay`] /
//!   [`InteractionState::ResizingOverlay`]: direct manipulation of a
//!   selected overlay via its body or one of its four corner handles.
//!   Resizing is uniform by contract — corner handles are all an overlay
//!   has.
//! - [`InteractionState::LassoSelect`]: rectangular multi-select from a
//!   pointer-down on empty canvas.
//!
//! Every selection creation or update brings the newly selected overlays to
//! the front (preserving their relative order); this is the system's only
//! z-order policy.
//!
//! ## Hit cache
//!
//! Screen-space object bounds are cached per viewport state. During a pan
//! the cache is deliberately left stale — intermediate moves only translate
//! the viewport and request re-renders — and is invalidated exactly once on
//! pointer-up, when the gesture ends.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use mural_interact::{Controller, Modifiers, PointerEvent};
//! use mural_scene::{Document, Selection};
//! use mural_view2d::Viewport;
//!
//! let mut doc = Document::new(1920, 1080);
//! let mut sel = Selection::new();
//! let mut vp = Viewport::new(Size::new(800.0, 600.0));
//! let mut ctl = Controller::new();
//!
//! // Alt-drag pans the canvas.
//! let alt = Modifiers { alt: true, ..Modifiers::default() };
//! ctl.on_pointer_down(&mut doc, &mut sel, &mut vp, &PointerEvent::new(Point::new(100.0, 100.0), alt));
//! ctl.on_pointer_move(&mut doc, &mut sel, &mut vp, &PointerEvent::new(Point::new(150.0, 130.0), alt));
//! assert_eq!(vp.pan(), kurbo::Vec2::new(50.0, 30.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod controller;
mod event;
mod state;

pub use controller::{Controller, HANDLE_HIT_RADIUS, Outcome};
pub use event::{Key, KeyEvent, Modifiers, PointerEvent, WheelEvent};
pub use state::InteractionState;
