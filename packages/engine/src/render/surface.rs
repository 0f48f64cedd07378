use crate::core::RendererResult;
use crate::domain::{Rgb, Viewport};

/// Inner gradient radius as a fraction of the outer radius.
pub const GLOW_INNER_RADIUS: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowStop {
    pub offset: f32,
    pub alpha: f32,
}

/// Bright core fading to a transparent rim.
pub const GLOW_STOPS: [GlowStop; 3] = [
    GlowStop { offset: 0.0, alpha: 0.6 },
    GlowStop { offset: 0.4, alpha: 0.28 },
    GlowStop { offset: 1.0, alpha: 0.0 },
];

/// Everything a surface needs to pre-render one glow sprite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowSpec {
    pub color: Rgb,
    /// Sprite side in logical units
    pub side: f32,
    pub pixel_density: f64,
}

impl GlowSpec {
    pub fn new(color: Rgb, side: f32, pixel_density: f64) -> Self {
        Self {
            color,
            side,
            pixel_density,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.side / 2.0
    }

    /// Sprite side in device pixels (at least one).
    pub fn device_side(&self) -> u32 {
        ((self.side as f64 * self.pixel_density) as u32).max(1)
    }

    /// Gradient opacity at distance `d` (logical units) from the centre.
    ///
    /// Concentric radial gradient: everything inside the inner radius takes
    /// the first stop, everything past the outer radius the last.
    pub fn alpha_at(&self, d: f32) -> f32 {
        let outer = self.radius();
        let inner = outer * GLOW_INNER_RADIUS;
        let span = outer - inner;
        let t = if span > 0.0 {
            ((d - inner) / span).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let last = GLOW_STOPS[GLOW_STOPS.len() - 1];
        if t >= last.offset {
            return last.alpha;
        }
        for pair in GLOW_STOPS.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let local = (t - a.offset) / (b.offset - a.offset);
                return a.alpha + (b.alpha - a.alpha) * local;
            }
        }
        last.alpha
    }
}

/// A 2D drawing target sized to the viewport.
///
/// Coordinates passed to `clear` and `draw_glow` are logical; `configure`
/// sets up whatever transform maps them onto device pixels.
pub trait Surface {
    type Sprite;

    /// Resize the backing store to the viewport and reset the transform.
    fn configure(&mut self, viewport: &Viewport) -> RendererResult<()>;

    /// Clear the logical rectangle `(0, 0, width, height)`.
    fn clear(&mut self, width: f64, height: f64);

    fn create_glow_sprite(&mut self, spec: &GlowSpec) -> RendererResult<Self::Sprite>;

    /// Draw `sprite` stretched over the square at `(x, y)` with side `size`,
    /// using `alpha` as global opacity and lighter (additive) compositing.
    fn draw_glow(
        &mut self,
        sprite: &Self::Sprite,
        x: f64,
        y: f64,
        size: f64,
        alpha: f64,
    ) -> RendererResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> GlowSpec {
        GlowSpec::new(Rgb::new(255, 255, 255), 51.2, 2.0)
    }

    #[test]
    fn gradient_stops() {
        let s = spec();
        let r = s.radius();
        assert_eq!(s.alpha_at(0.0), 0.6);
        assert_eq!(s.alpha_at(r * GLOW_INNER_RADIUS), 0.6);
        let at_stop = r * GLOW_INNER_RADIUS + 0.4 * r * (1.0 - GLOW_INNER_RADIUS);
        assert!((s.alpha_at(at_stop) - 0.28).abs() < 1e-4);
        assert_eq!(s.alpha_at(r), 0.0);
        assert_eq!(s.alpha_at(r * 2.0), 0.0);
    }

    #[test]
    fn device_side_scales_with_density() {
        assert_eq!(spec().device_side(), 102);
        assert_eq!(GlowSpec::new(Rgb::new(0, 0, 0), 0.1, 1.0).device_side(), 1);
    }
}
