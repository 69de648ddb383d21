//! Drawing surface abstraction.
//!
//! Animators render through [`Surface`] instead of a canvas context so the
//! same render code drives the browser canvas and the in-memory [`Recorder`]
//! used by tests.

use super::theme::Color;

/// A 2D point in surface pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
}

impl Point {
	/// Point at (`x`, `y`).
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}

	/// Point at parameter `t` along the segment `self -> other`.
	pub fn lerp(self, other: Point, t: f64) -> Point {
		Point::new(
			self.x + (other.x - self.x) * t,
			self.y + (other.y - self.y) * t,
		)
	}
}

/// Size of the area an animator draws into.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Viewport {
	/// Viewport of the given size.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Whether `p` lies inside, edges included.
	pub fn contains(&self, p: Point) -> bool {
		(0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
	}
}

/// Immediate-mode drawing target.
pub trait Surface {
	/// Size in CSS pixels.
	fn viewport(&self) -> Viewport;

	/// Clears the whole surface to transparent.
	fn clear(&mut self);

	/// Fills a circle.
	fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

	/// Radial gradient from `color` at the center to transparent at `radius`.
	fn radial_glow(&mut self, center: Point, radius: f64, color: Color);

	/// Strokes a straight segment.
	fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color);

	/// Strokes connected segments through `points`.
	fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color);

	/// Strokes a circle outline.
	fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color);

	/// Draws `text` with its baseline start at `at`.
	fn fill_text(&mut self, text: &str, at: Point, font: &str, color: Color);
}

/// One recorded drawing operation. Fields are the arguments of the
/// matching [`Surface`] call.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// Surface cleared.
	Clear,
	/// Filled circle.
	Circle {
		center: Point,
		radius: f64,
		color: Color,
	},
	/// Radial glow.
	Glow {
		center: Point,
		radius: f64,
		color: Color,
	},
	/// Straight segment.
	Line {
		from: Point,
		to: Point,
		width: f64,
		color: Color,
	},
	/// Connected segments.
	Polyline {
		points: Vec<Point>,
		width: f64,
		color: Color,
	},
	/// Circle outline.
	Ring {
		center: Point,
		radius: f64,
		width: f64,
		color: Color,
	},
	/// Text.
	Text {
		text: String,
		at: Point,
		color: Color,
	},
}

/// [`Surface`] that keeps every command issued since the last clear.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
	viewport: Viewport,
	commands: Vec<DrawCommand>,
}

impl Recorder {
	/// Empty recorder reporting `viewport`.
	pub fn new(viewport: Viewport) -> Self {
		Self {
			viewport,
			commands: Vec::new(),
		}
	}

	/// Commands since the last clear.
	pub fn commands(&self) -> &[DrawCommand] {
		&self.commands
	}

	/// Changes the size reported from now on.
	pub fn set_viewport(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	/// Recorded segments.
	pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
		self.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Line { .. }))
	}

	/// Recorded text.
	pub fn texts(&self) -> impl Iterator<Item = &DrawCommand> {
		self.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Text { .. }))
	}

	/// True if nothing but clears were recorded.
	pub fn is_blank(&self) -> bool {
		self.commands.iter().all(|c| *c == DrawCommand::Clear)
	}
}

impl Surface for Recorder {
	fn viewport(&self) -> Viewport {
		self.viewport
	}

	fn clear(&mut self) {
		self.commands.clear();
		self.commands.push(DrawCommand::Clear);
	}

	fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
		self.commands.push(DrawCommand::Circle {
			center,
			radius,
			color,
		});
	}

	fn radial_glow(&mut self, center: Point, radius: f64, color: Color) {
		self.commands.push(DrawCommand::Glow {
			center,
			radius,
			color,
		});
	}

	fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
		self.commands.push(DrawCommand::Line {
			from,
			to,
			width,
			color,
		});
	}

	fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Color) {
		self.commands.push(DrawCommand::Polyline {
			points: points.to_vec(),
			width,
			color,
		});
	}

	fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Color) {
		self.commands.push(DrawCommand::Ring {
			center,
			radius,
			width,
			color,
		});
	}

	fn fill_text(&mut self, text: &str, at: Point, _font: &str, color: Color) {
		self.commands.push(DrawCommand::Text {
			text: text.to_string(),
			at,
			color,
		});
	}
}
