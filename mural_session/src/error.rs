// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Failures surfaced by [`EditorSession`](crate::EditorSession) entry points.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EditorError {
    /// The supplied bytes could not be decoded as an image.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// PNG encoding failed during export.
    #[error(transparent)]
    Encode(#[from] mural_raster::EncodeError),

    /// Export was requested before a compositor was attached.
    #[error("no compositor attached; the render surface is not ready")]
    NotReady,

    /// Export was requested while a previous export is still in flight.
    #[error("an export is already in flight")]
    ExportBusy,
}
