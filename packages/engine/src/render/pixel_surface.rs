//! Software surface: an RGBA pixel buffer that mirrors a canvas backing store.
//!
//! Pixels accumulate premultiplied so that lighter compositing is a plain
//! saturating add, the same rule the canvas uses. `export_rgba` converts to
//! straight alpha for `ImageData`.

use crate::core::RendererResult;
use crate::domain::Viewport;

use super::surface::{GlowSpec, Surface};

/// Premultiplied RGBA texels, `side × side`, row-major.
#[derive(Clone, Debug)]
pub struct PixelSprite {
    side: u32,
    texels: Vec<[f32; 4]>,
}

impl PixelSprite {
    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        self.texels[(y * self.side + x) as usize]
    }
}

#[derive(Default)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    /// Logical → device scale (the pixel density)
    scale: f64,
    accum: Vec<[f32; 4]>,
    rgba: Vec<u8>,
}

impl PixelSurface {
    pub fn new() -> Self {
        Self {
            scale: 1.0,
            ..Default::default()
        }
    }

    /// Width in device pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in device pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied color at a device pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.accum[(y as usize) * (self.width as usize) + x as usize])
    }

    /// Sum of alpha over every pixel (brightness probe for tests and stats)
    pub fn total_alpha(&self) -> f32 {
        self.accum.iter().map(|p| p[3]).sum()
    }

    pub fn is_blank(&self) -> bool {
        self.accum.iter().all(|p| p[3] == 0.0)
    }

    /// Straight-alpha RGBA8, ready for `ImageData`.
    pub fn export_rgba(&mut self) -> &[u8] {
        for (out, p) in self.rgba.chunks_exact_mut(4).zip(self.accum.iter()) {
            let a = p[3];
            if a <= 0.0 {
                out.fill(0);
                continue;
            }
            for c in 0..3 {
                out[c] = ((p[c] / a).min(1.0) * 255.0).round() as u8;
            }
            out[3] = (a.min(1.0) * 255.0).round() as u8;
        }
        &self.rgba
    }

    /// Pointer to the export buffer (for JS). Call `export_rgba` first.
    pub fn rgba_ptr(&self) -> *const u8 {
        self.rgba.as_ptr()
    }

    pub fn rgba_len(&self) -> usize {
        self.rgba.len()
    }

    /// Device pixel span `[start, end)` covered by a logical interval.
    #[inline]
    fn span(&self, start: f64, len: f64, limit: u32) -> (u32, u32) {
        let from = (start * self.scale).floor().max(0.0) as u32;
        let to = (((start + len) * self.scale).ceil().max(0.0) as u32).min(limit);
        (from.min(limit), to)
    }
}

impl Surface for PixelSurface {
    type Sprite = PixelSprite;

    fn configure(&mut self, viewport: &Viewport) -> RendererResult<()> {
        self.width = viewport.device_width();
        self.height = viewport.device_height();
        self.scale = viewport.pixel_density;
        let len = (self.width as usize) * (self.height as usize);
        self.accum = vec![[0.0; 4]; len];
        self.rgba = vec![0; len * 4];
        Ok(())
    }

    fn clear(&mut self, width: f64, height: f64) {
        let (_, x_end) = self.span(0.0, width, self.width);
        let (_, y_end) = self.span(0.0, height, self.height);
        let stride = self.width as usize;
        for y in 0..y_end as usize {
            self.accum[y * stride..y * stride + x_end as usize].fill([0.0; 4]);
        }
    }

    fn create_glow_sprite(&mut self, spec: &GlowSpec) -> RendererResult<PixelSprite> {
        let side = spec.device_side();
        let density = spec.pixel_density as f32;
        let center = spec.radius();
        let [r, g, b] = spec.color.to_unit();

        let mut texels = Vec::with_capacity((side * side) as usize);
        for ty in 0..side {
            let ly = (ty as f32 + 0.5) / density - center;
            for tx in 0..side {
                let lx = (tx as f32 + 0.5) / density - center;
                let a = spec.alpha_at((lx * lx + ly * ly).sqrt());
                texels.push([r * a, g * a, b * a, a]);
            }
        }
        Ok(PixelSprite { side, texels })
    }

    fn draw_glow(
        &mut self,
        sprite: &PixelSprite,
        x: f64,
        y: f64,
        size: f64,
        alpha: f64,
    ) -> RendererResult<()> {
        if !(size > 0.0 && alpha > 0.0) || !x.is_finite() || !y.is_finite() {
            return Ok(());
        }
        let alpha = alpha.min(1.0) as f32;
        let (x_start, x_end) = self.span(x, size, self.width);
        let (y_start, y_end) = self.span(y, size, self.height);
        let (x0, y0, dsize) = (x * self.scale, y * self.scale, size * self.scale);
        let side = sprite.side as f64;
        let stride = self.width as usize;

        // Nearest-texel stretch, lighter compositing
        for py in y_start..y_end {
            let v = ((py as f64 + 0.5) - y0) / dsize;
            if !(0.0..1.0).contains(&v) {
                continue;
            }
            let ty = ((v * side) as u32).min(sprite.side - 1);
            let row = py as usize * stride;
            for px in x_start..x_end {
                let u = ((px as f64 + 0.5) - x0) / dsize;
                if !(0.0..1.0).contains(&u) {
                    continue;
                }
                let tx = ((u * side) as u32).min(sprite.side - 1);
                let src = sprite.texel(tx, ty);
                let dst = &mut self.accum[row + px as usize];
                for c in 0..4 {
                    dst[c] = (dst[c] + src[c] * alpha).min(1.0);
                }
            }
        }
        Ok(())
    }
}
