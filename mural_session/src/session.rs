// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use peniko::Color;
use tracing::{debug, warn};

use mural_interact::{Controller, KeyEvent, Outcome, PointerEvent, WheelEvent};
use mural_raster::{Compositor, Pixmap};
use mural_scene::{Bitmap, Document, ObjectId, Selection};
use mural_view2d::Viewport;

use crate::error::EditorError;
use crate::single_flight::{DecodeTicket, SingleFlight};

/// Pixel dimensions of the wallpaper being composed.
///
/// Supplied by the host (typically the target display's resolution).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Wallpaper width in pixels.
    pub width: u32,
    /// Wallpaper height in pixels.
    pub height: u32,
}

/// One open wallpaper document and everything editing it needs.
///
/// The session owns the [`Document`], [`Viewport`], [`Selection`], and
/// interaction [`Controller`], and routes host events through them. It also
/// carries the asynchronous edges of the editor: single-flight image
/// decodes, the export busy latch, and the coalesced render-request flag.
///
/// Rendering requires a compositor; until [`attach_compositor`] is called,
/// [`render_into`] and [`export_png`] fail with [`EditorError::NotReady`].
///
/// [`attach_compositor`]: Self::attach_compositor
/// [`render_into`]: Self::render_into
/// [`export_png`]: Self::export_png
#[derive(Debug)]
pub struct EditorSession {
    document: Document,
    viewport: Viewport,
    selection: Selection,
    controller: Controller,
    compositor: Option<Compositor>,
    background_decodes: SingleFlight,
    overlay_decodes: SingleFlight,
    needs_render: bool,
    export_busy: bool,
}

impl EditorSession {
    /// Opens a session on a fresh document with a black fill background.
    #[must_use]
    pub fn new(dimensions: Dimensions, screen_size: Size) -> Self {
        debug!(
            width = dimensions.width,
            height = dimensions.height,
            "opening session"
        );
        Self {
            document: Document::new(dimensions.width, dimensions.height),
            viewport: Viewport::new(screen_size),
            selection: Selection::new(),
            controller: Controller::new(),
            compositor: None,
            background_decodes: SingleFlight::default(),
            overlay_decodes: SingleFlight::default(),
            needs_render: true,
            export_busy: false,
        }
    }

    /// The scene being edited.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The pan/zoom state of the live view.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Attaches the compositor once the host's render surface exists.
    pub fn attach_compositor(&mut self, compositor: Compositor) {
        self.compositor = Some(compositor);
        self.request_render();
    }

    /// Whether rendering and export are available.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.compositor.is_some()
    }

    // Toolbar entry points.

    /// Replaces the background with a solid fill.
    pub fn set_background_fill(&mut self, color: Color) {
        self.document.set_background_fill(color);
        self.controller.invalidate_hit_cache();
        self.request_render();
    }

    /// Starts a background image load, superseding any in-flight one.
    pub fn begin_background_image(&mut self) -> DecodeTicket {
        self.background_decodes.begin()
    }

    /// Finishes a background image load with the fetched bytes.
    ///
    /// Returns `Ok(true)` if the background was replaced, `Ok(false)` if the
    /// ticket had been superseded and the result was dropped. A decode
    /// failure leaves the document and selection untouched.
    pub fn complete_background_image(
        &mut self,
        ticket: DecodeTicket,
        bytes: &[u8],
    ) -> Result<bool, EditorError> {
        if !self.background_decodes.is_current(ticket) {
            warn!("dropping superseded background decode");
            return Ok(false);
        }
        let bitmap = decode_bitmap(bytes)?;
        self.document.set_background_image(bitmap);
        self.controller.invalidate_hit_cache();
        self.request_render();
        Ok(true)
    }

    /// Starts an overlay photo load, superseding any in-flight one.
    pub fn begin_add_overlay(&mut self) -> DecodeTicket {
        self.overlay_decodes.begin()
    }

    /// Finishes an overlay photo load with the fetched bytes.
    ///
    /// Returns the id of the new overlay, or `Ok(None)` if the ticket had
    /// been superseded. A decode failure leaves the document and selection
    /// untouched.
    pub fn complete_add_overlay(
        &mut self,
        ticket: DecodeTicket,
        bytes: &[u8],
    ) -> Result<Option<ObjectId>, EditorError> {
        if !self.overlay_decodes.is_current(ticket) {
            warn!("dropping superseded overlay decode");
            return Ok(None);
        }
        let bitmap = decode_bitmap(bytes)?;
        let id = self.document.add_overlay(bitmap);
        self.controller.invalidate_hit_cache();
        self.request_render();
        Ok(Some(id))
    }

    /// Exports the document as PNG bytes and latches the busy flag.
    ///
    /// The render is anchored in document space, so intermediate pan/zoom
    /// never leaks into the output and the viewport is identical before and
    /// after the call. The busy latch stays set until the host reports
    /// delivery via [`export_finished`](Self::export_finished); a second
    /// export in the meantime fails with [`EditorError::ExportBusy`] and
    /// mutates nothing.
    pub fn export_png(&mut self) -> Result<Vec<u8>, EditorError> {
        let Some(compositor) = &self.compositor else {
            return Err(EditorError::NotReady);
        };
        if self.export_busy {
            return Err(EditorError::ExportBusy);
        }
        self.export_busy = true;
        debug!(
            width = self.document.width(),
            height = self.document.height(),
            "exporting wallpaper"
        );
        match compositor.export_png(&self.document) {
            Ok(bytes) => Ok(bytes),
            Err(err) => {
                // A failed export releases the latch immediately.
                self.export_busy = false;
                Err(err.into())
            }
        }
    }

    /// Reports that the exported bytes were delivered, releasing the latch.
    pub fn export_finished(&mut self) {
        self.export_busy = false;
    }

    /// Whether an export is currently in flight.
    #[must_use]
    pub fn export_in_flight(&self) -> bool {
        self.export_busy
    }

    // Host event entry points.

    /// Routes a pointer-down event.
    pub fn pointer_down(&mut self, ev: &PointerEvent) -> Outcome {
        let out = self.controller.on_pointer_down(
            &mut self.document,
            &mut self.selection,
            &mut self.viewport,
            ev,
        );
        self.absorb(out)
    }

    /// Routes a pointer-move event.
    pub fn pointer_move(&mut self, ev: &PointerEvent) -> Outcome {
        let out = self.controller.on_pointer_move(
            &mut self.document,
            &mut self.selection,
            &mut self.viewport,
            ev,
        );
        self.absorb(out)
    }

    /// Routes a pointer-up event.
    pub fn pointer_up(&mut self, ev: &PointerEvent) -> Outcome {
        let out = self.controller.on_pointer_up(
            &mut self.document,
            &mut self.selection,
            &mut self.viewport,
            ev,
        );
        self.absorb(out)
    }

    /// Routes a wheel event (anchored zoom).
    pub fn wheel(&mut self, ev: &WheelEvent) -> Outcome {
        let out = self.controller.on_wheel(
            &mut self.document,
            &mut self.selection,
            &mut self.viewport,
            ev,
        );
        self.absorb(out)
    }

    /// Routes a keyboard event.
    pub fn key(&mut self, ev: &KeyEvent) -> Outcome {
        let out = self.controller.on_key(
            &mut self.document,
            &mut self.selection,
            &mut self.viewport,
            ev,
        );
        self.absorb(out)
    }

    /// Routes a host-surface resize.
    pub fn host_resized(&mut self, size: Size) -> Outcome {
        let out = self.controller.on_host_resize(&mut self.viewport, size);
        self.absorb(out)
    }

    // Rendering.

    /// Marks the live view dirty.
    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    /// Clears and returns the render-request flag.
    ///
    /// Any number of mutations between two calls collapse into a single
    /// `true`; the host repaints at most once per tick.
    pub fn take_render_request(&mut self) -> bool {
        core::mem::take(&mut self.needs_render)
    }

    /// Paints the live view under the current viewport, chrome included.
    pub fn render_into(&mut self, target: &mut Pixmap) -> Result<(), EditorError> {
        let Some(compositor) = &self.compositor else {
            return Err(EditorError::NotReady);
        };
        compositor.render(
            &self.document,
            self.viewport.transform(),
            Some(&self.selection),
            target,
        );
        self.needs_render = false;
        Ok(())
    }

    fn absorb(&mut self, out: Outcome) -> Outcome {
        if out.render {
            self.needs_render = true;
        }
        if out.selection_changed {
            debug!(selected = self.selection.len(), "selection changed");
        }
        out
    }
}

/// Decodes arbitrary image bytes into an RGBA8 [`Bitmap`].
fn decode_bitmap(bytes: &[u8]) -> Result<Bitmap, EditorError> {
    let decoded = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(Bitmap::from_rgba8(width, height, decoded.into_raw()))
}
