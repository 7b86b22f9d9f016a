// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mural Scene: the wallpaper document and its drawable objects.
//!
//! This crate owns the authoritative scene of the editor: a fixed-size
//! [`Document`] holding one background object plus an ordered stack of
//! polaroid [`Overlay`]s, with stable [`ObjectId`] handles and a
//! bring-to-front z-order policy. It also provides the [`Selection`]
//! container used by the interaction layer.
//!
//! The object model is a closed tagged variant: the background and overlays
//! only carry the fields each legitimately owns. Backgrounds are never
//! selectable and have no resize handles; overlays carry an immutable
//! decoded [`Bitmap`], a fixed visual treatment ([`OverlayStyle`]) and a
//! corner-only handle set, and may only be scaled **uniformly** after
//! creation.
//!
//! ## Minimal example
//!
//! ```rust
//! use mural_scene::{Bitmap, Document};
//! use peniko::Color;
//!
//! let mut doc = Document::new(1920, 1080);
//! assert_eq!(doc.len(), 1); // black fill background
//!
//! let photo = Bitmap::from_rgba8(2, 2, vec![255; 16]);
//! let id = doc.add_overlay(photo);
//! assert_eq!(doc.len(), 2);
//! assert!(doc.remove_overlay(id));
//!
//! doc.set_background_fill(Color::from_rgba8(20, 20, 40, 255));
//! ```
//!
//! ## Coordinate convention
//!
//! Document space has its origin at the background's top-left corner; the
//! exportable region is `(0, 0)..(width, height)`. Overlay positions are
//! top-left corners in document space.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bitmap;
mod document;
mod factory;
mod object;
mod selection;

pub use bitmap::Bitmap;
pub use document::{Document, ObjectId};
pub use factory::{POLAROID_ENVELOPE, background_from_fill, background_from_image, overlay_from_image};
pub use object::{Background, BackgroundContent, Handle, Overlay, OverlayStyle, SceneObject, Shadow};
pub use selection::Selection;
