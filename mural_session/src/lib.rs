// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mural Session: the editor glue that hosts embed.
//!
//! [`EditorSession`] owns one wallpaper document together with its viewport,
//! selection, and interaction controller, and exposes the complete editor
//! surface as plain method calls: toolbar actions (background fill or image,
//! add overlay photo, export), host events (pointer, wheel, keyboard,
//! resize), and the live-view render loop.
//!
//! The session also handles the two places where the editor meets the
//! outside world asynchronously:
//!
//! - **Image loads** are single-flight per slot. `begin_*` returns a
//!   [`DecodeTicket`]; by the time the host's fetch completes and it calls
//!   `complete_*`, a newer `begin_*` may have superseded the ticket, in
//!   which case the stale result is dropped instead of clobbering the scene.
//! - **Export** is guarded by a busy latch: [`EditorSession::export_png`]
//!   latches it, [`EditorSession::export_finished`] releases it once the
//!   host has delivered the file, and overlapping exports fail with
//!   [`EditorError::ExportBusy`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use mural_raster::Compositor;
//! use mural_session::{Dimensions, EditorSession};
//!
//! let mut session = EditorSession::new(
//!     Dimensions { width: 1920, height: 1080 },
//!     Size::new(1280.0, 720.0),
//! );
//! session.attach_compositor(Compositor::new());
//!
//! let png = session.export_png().unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! session.export_finished();
//! ```

mod error;
mod session;
mod single_flight;

pub use error::EditorError;
pub use session::{Dimensions, EditorSession};
pub use single_flight::DecodeTicket;

pub use mural_raster::EXPORT_FILE_NAME;
