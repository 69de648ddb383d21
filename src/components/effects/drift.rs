//! Floating equations drifting across the background.

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use super::config::DriftConfig;
use super::runner::Animator;
use super::surface::{Point, Surface, Viewport};

/// A single floating label.
#[derive(Clone, Debug)]
pub struct DriftLabel {
	/// Baseline position of the text.
	pub pos: Point,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Index into the configured label texts.
	pub text: usize,
	/// Label opacity.
	pub opacity: f64,
}

/// Wraps `v` to the opposite side once it leaves `[-margin, extent + margin]`.
pub fn wrap(v: f64, extent: f64, margin: f64) -> f64 {
	if v < -margin {
		extent + margin
	} else if v > extent + margin {
		-margin
	} else {
		v
	}
}

/// Manages the floating labels.
#[derive(Clone, Debug)]
pub struct EquationDrift {
	config: DriftConfig,
	labels: Vec<DriftLabel>,
	viewport: Viewport,
}

impl EquationDrift {
	/// Creates an empty scene; labels spawn on mount.
	pub fn new(config: DriftConfig) -> Self {
		Self {
			config,
			labels: Vec::new(),
			viewport: Viewport::default(),
		}
	}

	/// Current labels.
	pub fn labels(&self) -> &[DriftLabel] {
		&self.labels
	}

	/// Equation text for `label`.
	pub fn text(&self, label: &DriftLabel) -> &str {
		self.config
			.labels
			.get(label.text)
			.map(String::as_str)
			.unwrap_or_default()
	}
}

impl Animator for EquationDrift {
	fn name(&self) -> &'static str {
		"equation-drift"
	}

	fn reset(&mut self, viewport: Viewport, rng: &mut SmallRng) {
		let c = &self.config;
		let indices: Vec<usize> = (0..c.labels.len()).collect();
		self.viewport = viewport;

		if indices.is_empty() {
			self.labels.clear();
			return;
		}

		self.labels = (0..c.label_count)
			.map(|_| DriftLabel {
				pos: Point::new(
					rng.random::<f64>() * viewport.width,
					rng.random::<f64>() * viewport.height,
				),
				vx: (rng.random::<f64>() - 0.5) * 2.0 * c.max_speed,
				vy: (rng.random::<f64>() - 0.5) * 2.0 * c.max_speed,
				text: indices.choose(rng).copied().unwrap_or(0),
				opacity: c.opacity_min + rng.random::<f64>() * c.opacity_range,
			})
			.collect();
	}

	fn update(&mut self, _rng: &mut SmallRng) {
		let (w, h) = (self.viewport.width, self.viewport.height);
		for l in &mut self.labels {
			l.pos.x = wrap(l.pos.x + l.vx, w, self.config.margin_x);
			l.pos.y = wrap(l.pos.y + l.vy, h, self.config.margin_y);
		}
	}

	fn render(&self, surface: &mut dyn Surface) {
		for l in &self.labels {
			surface.fill_text(
				self.text(l),
				l.pos,
				&self.config.font,
				self.config.color.with_alpha(l.opacity),
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;
	use crate::components::effects::surface::Recorder;

	#[test]
	fn wrap_is_toroidal_with_margin() {
		assert_eq!(wrap(-100.5, 800.0, 100.0), 900.0);
		assert_eq!(wrap(900.5, 800.0, 100.0), -100.0);
		assert_eq!(wrap(-100.0, 800.0, 100.0), -100.0);
		assert_eq!(wrap(400.0, 800.0, 100.0), 400.0);
	}

	#[test]
	fn reset_spawns_configured_count() {
		let mut d = EquationDrift::new(DriftConfig::default());
		let mut rng = SmallRng::seed_from_u64(5);
		d.reset(Viewport::new(800.0, 600.0), &mut rng);
		assert_eq!(d.labels().len(), 25);
		for l in d.labels() {
			assert!(l.vx.abs() <= 0.1 && l.vy.abs() <= 0.1);
			assert!(!d.text(l).is_empty());
		}
	}

	#[test]
	fn labels_stay_inside_margins() {
		let mut d = EquationDrift::new(DriftConfig {
			max_speed: 7.0,
			..DriftConfig::default()
		});
		let mut rng = SmallRng::seed_from_u64(6);
		d.reset(Viewport::new(300.0, 200.0), &mut rng);
		for _ in 0..1000 {
			d.update(&mut rng);
			for l in d.labels() {
				assert!(l.pos.x >= -100.0 && l.pos.x <= 400.0);
				assert!(l.pos.y >= -50.0 && l.pos.y <= 250.0);
			}
		}
	}

	#[test]
	fn no_labels_without_texts() {
		let mut d = EquationDrift::new(DriftConfig {
			labels: Vec::new(),
			..DriftConfig::default()
		});
		let mut rng = SmallRng::seed_from_u64(6);
		d.reset(Viewport::new(300.0, 200.0), &mut rng);
		let mut surface = Recorder::new(Viewport::new(300.0, 200.0));
		d.render(&mut surface);
		assert!(surface.commands().is_empty());
	}
}
