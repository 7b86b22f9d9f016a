// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mural Raster: CPU compositor and PNG export for wallpaper scenes.
//!
//! This crate turns a [`mural_scene::Document`] into pixels. It renders
//! back-to-front under an arbitrary affine transform — the live view passes
//! the viewport's pan/zoom transform, the export path passes a
//! document-space transform — and encodes lossless PNG via the `image`
//! crate.
//!
//! Painting is deliberately simple and deterministic: a single thread,
//! row-major source-over blending, bilinear sampling for scaled photos, and
//! a separable linear-falloff approximation for drop shadows. Two renders
//! of the same document produce byte-identical pixels.
//!
//! ## Live view vs. export
//!
//! [`Compositor::render`] paints whatever region of the scene the given
//! transform maps onto the target, optionally with selection chrome
//! (highlight borders and corner handles). [`Compositor::export_png`]
//! ignores the viewport entirely: it rasterizes the document rectangle at
//! its declared pixel size, forces the background's soft-preview opacity
//! back to fully opaque, never draws chrome, and returns encoded PNG
//! bytes. The output therefore depends only on the scene, not on how the
//! user last panned or zoomed.
//!
//! ## Minimal example
//!
//! ```rust
//! use mural_raster::{Compositor, Pixmap};
//! use mural_scene::Document;
//!
//! let doc = Document::new(64, 32);
//! let compositor = Compositor::new();
//! let png = compositor.export_png(&doc).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```

mod compositor;
mod pixmap;

pub use compositor::{Compositor, EXPORT_FILE_NAME, EncodeError};
pub use pixmap::Pixmap;
