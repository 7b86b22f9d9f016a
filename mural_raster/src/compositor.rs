// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;
use thiserror::Error;

use mural_scene::{
    Background, BackgroundContent, Bitmap, Document, Handle, Overlay, SceneObject, Selection,
};

use crate::pixmap::Pixmap;

/// Deterministic file name the exported wallpaper is delivered under.
pub const EXPORT_FILE_NAME: &str = "polaroid-wallpaper.png";

/// Width of the selection highlight border, in screen pixels.
const CHROME_BORDER_WIDTH: f64 = 2.0;

/// Side length of a drawn corner handle, in screen pixels.
const CHROME_HANDLE_SIZE: f64 = 8.0;

/// PNG encoding failure.
#[derive(Debug, Error)]
#[error("png encoding failed: {0}")]
pub struct EncodeError(#[from] image::ImageError);

/// The CPU rasterizer behind both the live view and export.
///
/// Stateless: every call paints from scratch into the supplied [`Pixmap`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Compositor;

impl Compositor {
    /// Creates a compositor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Renders the scene under `transform` (scene→target pixels).
    ///
    /// Objects paint back-to-front in document z-order. When `selection` is
    /// supplied, highlight borders and corner handles are drawn on top of
    /// the selected overlays; export never passes one.
    pub fn render(
        &self,
        doc: &Document,
        transform: Affine,
        selection: Option<&Selection>,
        target: &mut Pixmap,
    ) {
        self.render_inner(doc, transform, selection, false, target);
    }

    /// Rasterizes the document at its declared resolution and encodes PNG.
    ///
    /// The render is anchored at the background object's document position
    /// and spans exactly `width x height` pixels, independent of any
    /// viewport. The background's soft-preview opacity is neutralized (the
    /// scene itself is left untouched), and no selection chrome is drawn,
    /// so the bytes depend only on the scene.
    pub fn export_png(&self, doc: &Document) -> Result<Vec<u8>, EncodeError> {
        let mut target = Pixmap::new(doc.width(), doc.height());
        let anchor = doc.background().position;
        let transform = Affine::translate(-anchor.to_vec2());
        self.render_inner(doc, transform, None, true, &mut target);

        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(
            target.data(),
            target.width(),
            target.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(out)
    }

    fn render_inner(
        &self,
        doc: &Document,
        transform: Affine,
        selection: Option<&Selection>,
        force_opaque_background: bool,
        target: &mut Pixmap,
    ) {
        for (_, obj) in doc.objects() {
            match obj {
                SceneObject::Background(bg) => {
                    draw_background(bg, transform, force_opaque_background, target);
                }
                SceneObject::Overlay(ov) => draw_overlay(ov, transform, target),
            }
        }

        if let Some(sel) = selection {
            for id in sel.items() {
                if let Some(SceneObject::Overlay(ov)) = doc.get(*id) {
                    draw_chrome(ov, transform, target);
                }
            }
        }
    }
}

fn draw_background(bg: &Background, transform: Affine, force_opaque: bool, target: &mut Pixmap) {
    let opacity = if force_opaque { 1.0 } else { bg.opacity };
    let rect = map_rect(transform, bg.bounds());
    match &bg.content {
        BackgroundContent::Fill(color) => fill_rect(target, rect, *color, opacity),
        BackgroundContent::Image(bitmap) => blit_bitmap(target, bitmap, rect, opacity),
    }
}

fn draw_overlay(ov: &Overlay, transform: Affine, target: &mut Pixmap) {
    let rect = map_rect(transform, ov.bounds());

    // Shadow first, beneath the photo. Blur and offset are document-space
    // values, so they scale with the transform.
    let zoom = transform.as_coeffs()[0];
    let shadow = ov.style.shadow;
    let shadow_rect = rect
        + Vec2::new(shadow.offset.x * zoom, shadow.offset.y * zoom);
    fill_soft_rect(target, shadow_rect, shadow.blur * zoom, shadow.color);

    blit_bitmap(target, &ov.bitmap, rect, 1.0);
}

fn draw_chrome(ov: &Overlay, transform: Affine, target: &mut Pixmap) {
    let rect = map_rect(transform, ov.bounds());
    let b = CHROME_BORDER_WIDTH;

    // Four border strips.
    fill_rect(target, Rect::new(rect.x0 - b, rect.y0 - b, rect.x1 + b, rect.y0), ov.style.border, 1.0);
    fill_rect(target, Rect::new(rect.x0 - b, rect.y1, rect.x1 + b, rect.y1 + b), ov.style.border, 1.0);
    fill_rect(target, Rect::new(rect.x0 - b, rect.y0, rect.x0, rect.y1), ov.style.border, 1.0);
    fill_rect(target, Rect::new(rect.x1, rect.y0, rect.x1 + b, rect.y1), ov.style.border, 1.0);

    // Corner handles.
    let half = CHROME_HANDLE_SIZE / 2.0;
    for handle in Handle::ALL {
        let c = handle.position_on(rect);
        fill_rect(
            target,
            Rect::new(c.x - half, c.y - half, c.x + half, c.y + half),
            ov.style.corner,
            1.0,
        );
    }
}

/// Maps an axis-aligned rect through a scale+translate affine.
fn map_rect(transform: Affine, rect: Rect) -> Rect {
    let p0 = transform * Point::new(rect.x0, rect.y0);
    let p1 = transform * Point::new(rect.x1, rect.y1);
    Rect::new(p0.x, p0.y, p1.x, p1.y)
}

fn color_components(color: Color) -> [f64; 4] {
    let rgba = color.to_rgba8();
    [
        f64::from(rgba.r) / 255.0,
        f64::from(rgba.g) / 255.0,
        f64::from(rgba.b) / 255.0,
        f64::from(rgba.a) / 255.0,
    ]
}

fn pixel_span(lo: f64, hi: f64, max: u32) -> (i64, i64) {
    let start = lo.floor().max(0.0) as i64;
    let end = (hi.ceil() as i64).min(i64::from(max));
    (start, end)
}

fn fill_rect(target: &mut Pixmap, rect: Rect, color: Color, opacity: f64) {
    let mut rgba = color_components(color);
    rgba[3] *= opacity.clamp(0.0, 1.0);
    if rgba[3] <= 0.0 {
        return;
    }
    let (x0, x1) = pixel_span(rect.x0, rect.x1, target.width());
    let (y0, y1) = pixel_span(rect.y0, rect.y1, target.height());
    for y in y0..y1 {
        for x in x0..x1 {
            // Analytic coverage of the pixel square for crisp edges.
            let cx = partial_coverage(x as f64, rect.x0, rect.x1);
            let cy = partial_coverage(y as f64, rect.y0, rect.y1);
            let mut px = rgba;
            px[3] *= cx * cy;
            target.blend_pixel(x, y, px);
        }
    }
}

/// Fraction of the pixel `[p, p + 1]` covered by the span `[lo, hi]`.
fn partial_coverage(p: f64, lo: f64, hi: f64) -> f64 {
    (hi.min(p + 1.0) - lo.max(p)).clamp(0.0, 1.0)
}

/// Fills a rectangle with soft, linearly-feathered edges; the falloff spans
/// `blur` pixels on each side of every edge. Approximates the source
/// design's Gaussian drop shadow closely enough for wallpaper composition.
fn fill_soft_rect(target: &mut Pixmap, rect: Rect, blur: f64, color: Color) {
    if blur <= 0.0 {
        fill_rect(target, rect, color, 1.0);
        return;
    }
    let rgba = color_components(color);
    if rgba[3] <= 0.0 {
        return;
    }
    let expanded = rect.inflate(blur, blur);
    let (x0, x1) = pixel_span(expanded.x0, expanded.x1, target.width());
    let (y0, y1) = pixel_span(expanded.y0, expanded.y1, target.height());
    for y in y0..y1 {
        let fy = y as f64 + 0.5;
        let cy = soft_coverage(fy, rect.y0, rect.y1, blur);
        if cy <= 0.0 {
            continue;
        }
        for x in x0..x1 {
            let fx = x as f64 + 0.5;
            let cx = soft_coverage(fx, rect.x0, rect.x1, blur);
            if cx <= 0.0 {
                continue;
            }
            let mut px = rgba;
            px[3] *= cx * cy;
            target.blend_pixel(x, y, px);
        }
    }
}

/// Linear ramp from 0 at `edge - blur` to 1 at `edge + blur`, per edge.
fn soft_coverage(t: f64, lo: f64, hi: f64, blur: f64) -> f64 {
    let rise = ((t - (lo - blur)) / (2.0 * blur)).clamp(0.0, 1.0);
    let fall = (((hi + blur) - t) / (2.0 * blur)).clamp(0.0, 1.0);
    rise * fall
}

/// Bilinearly samples `bitmap` stretched over `rect` and blends it onto the
/// target, modulated by `opacity`.
fn blit_bitmap(target: &mut Pixmap, bitmap: &Bitmap, rect: Rect, opacity: f64) {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return;
    }
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }
    let (x0, x1) = pixel_span(rect.x0, rect.x1, target.width());
    let (y0, y1) = pixel_span(rect.y0, rect.y1, target.height());
    let sx = f64::from(bitmap.width()) / rect.width();
    let sy = f64::from(bitmap.height()) / rect.height();
    for y in y0..y1 {
        let v = (y as f64 + 0.5 - rect.y0) * sy - 0.5;
        for x in x0..x1 {
            let u = (x as f64 + 0.5 - rect.x0) * sx - 0.5;
            let mut px = sample_bilinear(bitmap, u, v);
            // Edge pixels keep analytic rect coverage so scaled photos
            // don't bleed past their bounds.
            let cx = partial_coverage(x as f64, rect.x0, rect.x1);
            let cy = partial_coverage(y as f64, rect.y0, rect.y1);
            px[3] *= opacity * cx * cy;
            target.blend_pixel(x, y, px);
        }
    }
}

fn sample_bilinear(bitmap: &Bitmap, u: f64, v: f64) -> [f64; 4] {
    let max_x = f64::from(bitmap.width() - 1);
    let max_y = f64::from(bitmap.height() - 1);
    let u = u.clamp(0.0, max_x);
    let v = v.clamp(0.0, max_y);
    let x0 = u.floor();
    let y0 = v.floor();
    let fx = u - x0;
    let fy = v - y0;
    let x1 = (x0 + 1.0).min(max_x);
    let y1 = (y0 + 1.0).min(max_y);

    let p00 = texel(bitmap, x0, y0);
    let p10 = texel(bitmap, x1, y0);
    let p01 = texel(bitmap, x0, y1);
    let p11 = texel(bitmap, x1, y1);

    let mut out = [0.0; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = top * (1.0 - fy) + bottom * fy;
    }
    out
}

fn texel(bitmap: &Bitmap, x: f64, y: f64) -> [f64; 4] {
    // Callers clamp to valid coordinates.
    let px = bitmap
        .pixel(x as u32, y as u32)
        .unwrap_or([0, 0, 0, 0]);
    [
        f64::from(px[0]) / 255.0,
        f64::from(px[1]) / 255.0,
        f64::from(px[2]) / 255.0,
        f64::from(px[3]) / 255.0,
    ]
}
