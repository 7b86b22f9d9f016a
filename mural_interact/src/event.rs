// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Modifier keys reported with pointer events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// The pan modifier: Alt-drag pans the canvas instead of selecting.
    pub alt: bool,
    /// Extends/toggles the selection on overlay clicks.
    pub shift: bool,
    /// Reserved for host shortcuts; the controller ignores it.
    pub ctrl: bool,
}

/// A pointer-down/move/up event in screen coordinates.
#[derive(Copy, Clone, Debug)]
pub struct PointerEvent {
    /// Pointer position on the host surface, in pixels.
    pub pos: Point,
    /// Modifier keys held at the time of the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Convenience constructor.
    #[must_use]
    pub fn new(pos: Point, modifiers: Modifiers) -> Self {
        Self { pos, modifiers }
    }
}

/// A wheel event in screen coordinates.
#[derive(Copy, Clone, Debug)]
pub struct WheelEvent {
    /// Pointer position at the time of the event; zoom anchors here.
    pub pos: Point,
    /// Vertical wheel delta; positive scrolls down (zooms out).
    pub delta_y: f64,
}

/// Keys the controller reacts to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Key {
    /// Deletes the selected overlays.
    Delete,
}

/// A keyboard event.
#[derive(Copy, Clone, Debug)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
    /// `true` while an IME composition is active; the controller must not
    /// eat such keystrokes.
    pub is_composing: bool,
}
