// Copyright 2025 the Mural Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// An owned RGBA8 pixel buffer with straight (non-premultiplied) alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// Creates a fully transparent pixmap.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The RGBA bytes of the pixel at `(x, y)`, or `None` out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Blends an RGBA color (straight alpha, components in `0.0..=1.0`)
    /// over the pixel at `(x, y)`.
    ///
    /// Out-of-bounds writes are silently clipped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, rgba: [f64; 4]) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let sa = rgba[3].clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;

        let da = f64::from(self.data[idx + 3]) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let sc = rgba[c].clamp(0.0, 1.0);
            let dc = f64::from(self.data[idx + c]) / 255.0;
            // Source-over in straight alpha.
            let out = (sc * sa + dc * da * (1.0 - sa)) / out_a;
            self.data[idx + c] = (out * 255.0 + 0.5) as u8;
        }
        self.data[idx + 3] = (out_a * 255.0 + 0.5) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::Pixmap;

    #[test]
    fn starts_transparent() {
        let pm = Pixmap::new(2, 2);
        assert_eq!(pm.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(pm.pixel(2, 0), None);
    }

    #[test]
    fn opaque_blend_replaces() {
        let mut pm = Pixmap::new(1, 1);
        pm.blend_pixel(0, 0, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(pm.pixel(0, 0), Some([255, 128, 0, 255]));
    }

    #[test]
    fn translucent_blend_composites() {
        let mut pm = Pixmap::new(1, 1);
        pm.blend_pixel(0, 0, [1.0, 1.0, 1.0, 1.0]);
        pm.blend_pixel(0, 0, [0.0, 0.0, 0.0, 0.5]);
        let px = pm.pixel(0, 0).unwrap();
        assert_eq!(px[3], 255);
        // Roughly half-darkened white.
        assert!(px[0] >= 127 && px[0] <= 129);
    }

    #[test]
    fn out_of_bounds_writes_are_clipped() {
        let mut pm = Pixmap::new(1, 1);
        pm.blend_pixel(-1, 0, [1.0, 1.0, 1.0, 1.0]);
        pm.blend_pixel(0, 5, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(pm.pixel(0, 0), Some([0, 0, 0, 0]));
    }
}
