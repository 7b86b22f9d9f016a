// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction of scene objects from decoded bitmaps.
//!
//! The factory is the only place that decides initial placement, scale, and
//! styling; [`crate::Document`] registers the results. Decoding raw bytes
//! into a [`Bitmap`] happens upstream (the session layer), so a factory call
//! can never leave a partially-constructed object in the graph.

use kurbo::{Point, Size, Vec2};
use peniko::Color;

use crate::bitmap::Bitmap;
use crate::object::{Background, BackgroundContent, Overlay, OverlayStyle};

/// Target envelope every new overlay is fitted into, in document units.
///
/// The portrait proportions match the polaroid frame the overlay sub-editor
/// composes photos into.
pub const POLAROID_ENVELOPE: Size = Size::new(440.0, 537.0);

/// Builds a solid-fill background covering `doc_size` at the origin.
#[must_use]
pub fn background_from_fill(color: Color, doc_size: Size) -> Background {
    Background {
        position: Point::ORIGIN,
        scale: Vec2::new(doc_size.width, doc_size.height),
        opacity: 1.0,
        content: BackgroundContent::Fill(color),
    }
}

/// Builds a photo background stretched to cover `doc_size` at the origin.
///
/// The scale is independent per axis (`doc / natural`), so the photo fills
/// the document exactly and its aspect ratio is **not** preserved.
#[must_use]
pub fn background_from_image(bitmap: Bitmap, doc_size: Size) -> Background {
    let scale = Vec2::new(
        doc_size.width / f64::from(bitmap.width().max(1)),
        doc_size.height / f64::from(bitmap.height().max(1)),
    );
    Background {
        position: Point::ORIGIN,
        scale,
        opacity: 1.0,
        content: BackgroundContent::Image(bitmap),
    }
}

/// Builds a polaroid overlay from a decoded photo, centered on the document.
///
/// The photo is stretched into [`POLAROID_ENVELOPE`] independently per axis
/// so every polaroid lands at the same visual size; subsequent resizes go
/// through [`Overlay::scale_uniform`] only. The standard highlight and drop
/// shadow from [`OverlayStyle::default`] are applied here and never change.
#[must_use]
pub fn overlay_from_image(bitmap: Bitmap, doc_size: Size) -> Overlay {
    let scale = Vec2::new(
        POLAROID_ENVELOPE.width / f64::from(bitmap.width().max(1)),
        POLAROID_ENVELOPE.height / f64::from(bitmap.height().max(1)),
    );
    // Default placement: centered on the document center.
    let position = Point::new(
        (doc_size.width - POLAROID_ENVELOPE.width) / 2.0,
        (doc_size.height - POLAROID_ENVELOPE.height) / 2.0,
    );
    Overlay {
        position,
        scale,
        bitmap,
        style: OverlayStyle::default(),
    }
}
