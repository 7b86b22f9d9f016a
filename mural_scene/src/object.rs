// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;

use crate::bitmap::Bitmap;

/// Content of the background object: a solid fill or a decoded photo.
///
/// Exactly one representation is active at a time; [`crate::Document`]
/// replaces the whole background object when switching, so a fill never
/// coexists with an image.
#[derive(Clone, Debug)]
pub enum BackgroundContent {
    /// Solid color covering the document rectangle.
    Fill(Color),
    /// A photo stretched to cover the document rectangle.
    Image(Bitmap),
}

/// The bottommost scene object, covering the exportable document area.
///
/// Backgrounds are never selectable, have no resize handles, and always
/// occupy index 0 of the object order. Their scale is independent per axis:
/// image backgrounds stretch to fill the document without preserving the
/// photo's aspect ratio.
#[derive(Clone, Debug)]
pub struct Background {
    /// Top-left corner in document space. The document convention anchors
    /// this at the origin; export rasterizes the rectangle starting here.
    pub position: Point,
    /// Per-axis scale applied to the natural content size.
    pub scale: Vec2,
    /// Soft-preview opacity used as an editing aid; export forces `1.0`.
    pub opacity: f64,
    /// Fill or photo content.
    pub content: BackgroundContent,
}

impl Background {
    /// Natural (unscaled) content size.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        match &self.content {
            BackgroundContent::Fill(_) => Size::new(1.0, 1.0),
            BackgroundContent::Image(bmp) => {
                Size::new(f64::from(bmp.width()), f64::from(bmp.height()))
            }
        }
    }

    /// Scaled size in document space.
    #[must_use]
    pub fn scaled_size(&self) -> Size {
        let natural = self.natural_size();
        Size::new(natural.width * self.scale.x, natural.height * self.scale.y)
    }

    /// Bounding rectangle in document space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.scaled_size())
    }
}

/// Corner resize handles available on an overlay.
///
/// Edge/midpoint handles deliberately do not exist: overlays support
/// uniform scaling only, and the corner set is the whole contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Handle {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom-right corner.
    BottomRight,
}

impl Handle {
    /// All four corner handles, the complete handle set of an overlay.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// The diagonally opposite corner, which stays fixed during a resize.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::TopRight => Self::BottomLeft,
            Self::BottomLeft => Self::TopRight,
            Self::BottomRight => Self::TopLeft,
        }
    }

    /// The handle's position on the given rectangle.
    #[must_use]
    pub fn position_on(self, rect: Rect) -> Point {
        match self {
            Self::TopLeft => Point::new(rect.x0, rect.y0),
            Self::TopRight => Point::new(rect.x1, rect.y0),
            Self::BottomLeft => Point::new(rect.x0, rect.y1),
            Self::BottomRight => Point::new(rect.x1, rect.y1),
        }
    }
}

/// Drop shadow parameters, fixed at overlay creation.
#[derive(Copy, Clone, Debug)]
pub struct Shadow {
    /// Shadow color (typically translucent black).
    pub color: Color,
    /// Blur radius in document units.
    pub blur: f64,
    /// Offset in document units.
    pub offset: Vec2,
}

/// Fixed visual treatment applied to every overlay at creation, so all
/// polaroids look consistent regardless of the source photo.
#[derive(Copy, Clone, Debug)]
pub struct OverlayStyle {
    /// Highlight border color shown while the overlay is selected.
    pub border: Color,
    /// Corner-handle color shown while the overlay is selected.
    pub corner: Color,
    /// Drop shadow drawn beneath the overlay.
    pub shadow: Shadow,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            border: Color::from_rgba8(255, 0, 0, 255),
            corner: Color::from_rgba8(255, 0, 0, 255),
            shadow: Shadow {
                color: Color::from_rgba8(0, 0, 0, 153),
                blur: 20.0,
                offset: Vec2::new(20.0, 20.0),
            },
        }
    }
}

/// A user-placed polaroid photo above the background.
///
/// The bitmap is immutable once placed; only position, scale, and z-order
/// change afterward, and post-creation scaling is uniform-only via
/// [`Overlay::scale_uniform`].
#[derive(Clone, Debug)]
pub struct Overlay {
    /// Top-left corner in document space.
    pub position: Point,
    /// Per-axis scale. Independent at creation (envelope fit); afterwards
    /// both axes only ever change by a common factor.
    pub scale: Vec2,
    /// The decoded photo.
    pub bitmap: Bitmap,
    /// Visual treatment fixed at creation.
    pub style: OverlayStyle,
}

impl Overlay {
    /// Scaled size in document space.
    #[must_use]
    pub fn scaled_size(&self) -> Size {
        Size::new(
            f64::from(self.bitmap.width()) * self.scale.x,
            f64::from(self.bitmap.height()) * self.scale.y,
        )
    }

    /// Bounding rectangle in document space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.scaled_size())
    }

    /// Translates the overlay by a document-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Scales both axes by a single factor.
    ///
    /// This is the only post-creation scaling operation; non-positive and
    /// non-finite factors are ignored.
    pub fn scale_uniform(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.scale = Vec2::new(self.scale.x * factor, self.scale.y * factor);
        }
    }
}

/// A drawable object in the scene, closed over the two capabilities the
/// editor supports.
///
/// Overlay-only concerns (handles, shadow, selectability) are simply absent
/// from the background variant, so they cannot be set there by mistake.
#[derive(Clone, Debug)]
pub enum SceneObject {
    /// The document background (always index 0, never selectable).
    Background(Background),
    /// A polaroid photo overlay.
    Overlay(Overlay),
}

impl SceneObject {
    /// Whether pointer gestures may select or manipulate this object.
    #[must_use]
    pub fn selectable(&self) -> bool {
        match self {
            Self::Background(_) => false,
            Self::Overlay(_) => true,
        }
    }

    /// Bounding rectangle in document space.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Background(bg) => bg.bounds(),
            Self::Overlay(ov) => ov.bounds(),
        }
    }

    /// The overlay payload, if this object is an overlay.
    #[must_use]
    pub fn as_overlay(&self) -> Option<&Overlay> {
        match self {
            Self::Overlay(ov) => Some(ov),
            Self::Background(_) => None,
        }
    }

    /// Mutable overlay payload, if this object is an overlay.
    pub fn as_overlay_mut(&mut self) -> Option<&mut Overlay> {
        match self {
            Self::Overlay(ov) => Some(ov),
            Self::Background(_) => None,
        }
    }
}
