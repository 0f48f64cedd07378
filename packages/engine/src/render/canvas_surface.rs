//! HTML canvas surface backed by `CanvasRenderingContext2d`.
//!
//! Glow sprites are small offscreen canvases painted once with a radial
//! gradient and then stretched onto the main canvas with `drawImage`.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::core::{RendererError, RendererResult};
use crate::domain::Viewport;

use super::surface::{GlowSpec, Surface, GLOW_INNER_RADIUS, GLOW_STOPS};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    document: Document,
}

fn context_2d(canvas: &HtmlCanvasElement) -> RendererResult<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|err| RendererError::from_js("getContext", err))?
        .ok_or(RendererError::SurfaceUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| RendererError::SurfaceUnavailable)
}

impl CanvasSurface {
    /// Fails with `SurfaceUnavailable` when the canvas has no 2D context.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> RendererResult<Self> {
        let ctx = context_2d(&canvas)?;
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(RendererError::SurfaceUnavailable)?;
        Ok(Self {
            canvas,
            ctx,
            document,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Sprite = HtmlCanvasElement;

    fn configure(&mut self, viewport: &Viewport) -> RendererResult<()> {
        self.canvas.set_width(viewport.device_width());
        self.canvas.set_height(viewport.device_height());

        // Reset then scale so drawing units stay in CSS pixels
        let dpr = viewport.pixel_density;
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(|err| RendererError::from_js("setTransform", err))
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn create_glow_sprite(&mut self, spec: &GlowSpec) -> RendererResult<HtmlCanvasElement> {
        let sprite = self
            .document
            .create_element("canvas")
            .map_err(|err| RendererError::from_js("createElement", err))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| RendererError::Surface("created element is not a canvas".into()))?;
        let side = spec.device_side();
        sprite.set_width(side);
        sprite.set_height(side);

        let ctx = context_2d(&sprite)?;
        ctx.scale(spec.pixel_density, spec.pixel_density)
            .map_err(|err| RendererError::from_js("scale", err))?;

        let side = spec.side as f64;
        let radius = spec.radius() as f64;
        let gradient = ctx
            .create_radial_gradient(
                radius,
                radius,
                radius * GLOW_INNER_RADIUS as f64,
                radius,
                radius,
                radius,
            )
            .map_err(|err| RendererError::from_js("createRadialGradient", err))?;
        for stop in GLOW_STOPS {
            gradient
                .add_color_stop(stop.offset, &spec.color.to_css_rgba(stop.alpha))
                .map_err(|err| RendererError::from_js("addColorStop", err))?;
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, side, side);
        Ok(sprite)
    }

    fn draw_glow(
        &mut self,
        sprite: &HtmlCanvasElement,
        x: f64,
        y: f64,
        size: f64,
        alpha: f64,
    ) -> RendererResult<()> {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        let drawn = self
            .ctx
            .set_global_composite_operation("lighter")
            .and_then(|_| {
                self.ctx
                    .draw_image_with_html_canvas_element_and_dw_and_dh(sprite, x, y, size, size)
            });
        self.ctx.restore();
        drawn.map_err(|err| RendererError::from_js("drawImage", err))
    }
}
