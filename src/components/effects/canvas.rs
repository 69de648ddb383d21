//! [`Surface`] backed by an HTML canvas 2D context.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Point, Surface, Viewport};
use super::theme::Color;
use crate::error::FxError;

/// Draws onto a canvas element.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	/// Backing-store pixels per CSS pixel.
	scale: f64,
}

/// Highest device pixel ratio the backing store follows.
const MAX_PIXEL_RATIO: f64 = 2.0;

/// Device pixel ratio capped at [`MAX_PIXEL_RATIO`]; 1 for unusable values.
pub fn backing_scale(device_pixel_ratio: f64) -> f64 {
	if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
		device_pixel_ratio.min(MAX_PIXEL_RATIO)
	} else {
		1.0
	}
}

impl CanvasSurface {
	/// Fails with [`FxError::NoContext`] if the canvas has no 2d context.
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, FxError> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")?
			.ok_or(FxError::NoContext)?
			.dyn_into()
			.map_err(|_| FxError::NoContext)?;
		Ok(Self {
			canvas,
			ctx,
			scale: 1.0,
		})
	}

	/// Resizes the backing store to `viewport` CSS pixels at the capped
	/// device pixel ratio; the canvas is cleared as a side effect.
	pub fn set_size(&mut self, viewport: Viewport) {
		let ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
		self.scale = backing_scale(ratio);
		self.canvas.set_width((viewport.width * self.scale) as u32);
		self.canvas.set_height((viewport.height * self.scale) as u32);
		// resizing resets the transform
		let _ = self.ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0);
	}

	fn arc(&self, center: Point, radius: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, PI * 2.0);
	}
}

impl Surface for CanvasSurface {
	fn viewport(&self) -> Viewport {
		Viewport::new(
			self.canvas.width() as f64 / self.scale,
			self.canvas.height() as f64 / self.scale,
		)
	}

	fn clear(&mut self) {
		let vp = self.viewport();
		self.ctx.clear_rect(0.0, 0.0, vp.width, vp.height);
	}

	fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
		self.arc(center, radius);
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill();
	}

	fn radial_glow(&mut self, center: Point, radius: f64, color: Color) {
		let Ok(gradient) = self
			.ctx
			.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius.max(0.0))
		else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, &Color::TRANSPARENT.to_css());

		self.arc(center, radius);
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill();
	}

	fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
		self.ctx.begin_path();
		self.ctx.move_to(from.x, from.y);
		self.ctx.line_to(to.x, to.y);
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.stroke();
	}

	fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
		let Some((first, rest)) = points.split_first() else {
			return;
		};
		self.ctx.begin_path();
		self.ctx.move_to(first.x, first.y);
		for p in rest {
			self.ctx.line_to(p.x, p.y);
		}
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.stroke();
	}

	fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color) {
		self.arc(center, radius);
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.stroke();
	}

	fn fill_text(&mut self, text: &str, at: Point, font: &str, color: Color) {
		self.ctx.set_font(font);
		self.ctx.set_fill_style_str(&color.to_css());
		let _ = self.ctx.fill_text(text, at.x, at.y);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pixel_ratio_is_capped() {
		assert_eq!(backing_scale(1.0), 1.0);
		assert_eq!(backing_scale(1.5), 1.5);
		assert_eq!(backing_scale(3.0), 2.0);
		assert_eq!(backing_scale(0.0), 1.0);
		assert_eq!(backing_scale(f64::NAN), 1.0);
	}
}
