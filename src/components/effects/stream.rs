//! Data-stream background: falling columns of digits and ML notation.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use super::config::StreamConfig;
use super::runner::Animator;
use super::surface::{Point, Surface, Viewport};

/// One vertical stream.
#[derive(Clone, Debug)]
pub struct StreamColumn {
	/// Left edge of the column.
	pub x: f64,
	/// y of the newest glyph.
	pub y: f64,
	/// Fall speed, pixels per frame.
	pub speed: f64,
	/// Emitted glyphs, oldest first.
	pub trail: VecDeque<char>,
	/// Opacity of the newest glyph.
	pub opacity: f64,
}

impl StreamColumn {
	/// Appends a glyph, evicting the oldest once `cap` is exceeded.
	pub fn push(&mut self, glyph: char, cap: usize) {
		self.trail.push_back(glyph);
		while self.trail.len() > cap {
			self.trail.pop_front();
		}
	}
}

/// The stream animator.
#[derive(Clone, Debug)]
pub struct DataStream {
	config: StreamConfig,
	/// Symbol sets pre-split into glyphs.
	sets: Vec<Vec<char>>,
	columns: Vec<StreamColumn>,
	viewport: Viewport,
}

impl DataStream {
	/// Creates an empty stream; columns spawn on mount.
	pub fn new(config: StreamConfig) -> Self {
		let sets = config
			.symbol_sets
			.iter()
			.map(|s| s.chars().collect::<Vec<_>>())
			.filter(|s| !s.is_empty())
			.collect();
		Self {
			config,
			sets,
			columns: Vec::new(),
			viewport: Viewport::default(),
		}
	}

	/// Current columns.
	pub fn columns(&self) -> &[StreamColumn] {
		&self.columns
	}

	fn random_speed(&self, rng: &mut SmallRng) -> f64 {
		self.config.speed_min + rng.random::<f64>() * self.config.speed_range
	}

	/// Picks a set, then a glyph within it.
	fn random_glyph(&self, rng: &mut SmallRng) -> Option<char> {
		self.sets.choose(rng)?.choose(rng).copied()
	}
}

impl Animator for DataStream {
	fn name(&self) -> &'static str {
		"data-stream"
	}

	fn reset(&mut self, viewport: Viewport, rng: &mut SmallRng) {
		self.viewport = viewport;
		let count = if self.config.column_width > 0.0 {
			(viewport.width / self.config.column_width).floor().max(0.0) as usize
		} else {
			0
		};
		self.columns = (0..count)
			.map(|i| StreamColumn {
				x: i as f64 * self.config.column_width + rng.random::<f64>() * self.config.column_jitter,
				y: rng.random::<f64>() * viewport.height,
				speed: self.random_speed(rng),
				trail: VecDeque::with_capacity(self.config.trail_cap + 1),
				opacity: self.config.opacity_min + rng.random::<f64>() * self.config.opacity_range,
			})
			.collect();
	}

	fn update(&mut self, rng: &mut SmallRng) {
		let mut columns = std::mem::take(&mut self.columns);
		for col in &mut columns {
			col.y += col.speed;
			if col.y > self.viewport.height {
				col.y = self.config.reset_y;
				col.speed = self.random_speed(rng);
			}

			if col.trail.is_empty() || rng.random::<f64>() < self.config.append_chance {
				if let Some(glyph) = self.random_glyph(rng) {
					col.push(glyph, self.config.trail_cap);
				}
			}
		}
		self.columns = columns;
	}

	fn render(&self, surface: &mut dyn Surface) {
		let mut buf = [0u8; 4];
		for col in &self.columns {
			let len = col.trail.len() as f64;
			for (i, glyph) in col.trail.iter().enumerate() {
				let alpha = col.opacity * (i as f64 / len);
				surface.fill_text(
					glyph.encode_utf8(&mut buf),
					Point::new(col.x, col.y - i as f64 * self.config.glyph_spacing),
					&self.config.font,
					self.config.color.with_alpha(alpha),
				);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;
	use crate::components::effects::surface::{DrawCommand, Recorder};

	fn stream(seed: u64) -> (DataStream, SmallRng) {
		let mut rng = SmallRng::seed_from_u64(seed);
		let mut s = DataStream::new(StreamConfig::default());
		s.reset(Viewport::new(400.0, 300.0), &mut rng);
		(s, rng)
	}

	#[test]
	fn one_column_per_forty_pixels() {
		let (s, _) = stream(1);
		assert_eq!(s.columns().len(), 10);
		for (i, col) in s.columns().iter().enumerate() {
			let left = i as f64 * 40.0;
			assert!(col.x >= left && col.x < left + 20.0);
			assert!(col.speed >= 1.0 && col.speed < 3.0);
			assert!(col.trail.is_empty());
		}
	}

	#[test]
	fn first_frame_seeds_every_trail() {
		let (mut s, mut rng) = stream(2);
		s.update(&mut rng);
		assert!(s.columns().iter().all(|c| c.trail.len() == 1));
	}

	#[test]
	fn push_evicts_oldest() {
		let mut col = StreamColumn {
			x: 0.0,
			y: 0.0,
			speed: 1.0,
			trail: VecDeque::new(),
			opacity: 0.1,
		};
		for c in "abcdef".chars() {
			col.push(c, 3);
		}
		assert_eq!(col.trail.iter().collect::<String>(), "def");
	}

	#[test]
	fn wraps_to_sentinel_above_screen() {
		let (mut s, mut rng) = stream(3);
		s.columns[0].y = 299.5;
		s.columns[0].speed = 1.0;
		s.update(&mut rng);
		assert_eq!(s.columns()[0].y, -100.0);
		assert!(s.columns()[0].speed >= 1.0 && s.columns()[0].speed < 3.0);
	}

	#[test]
	fn glyphs_come_from_symbol_sets() {
		let (mut s, mut rng) = stream(4);
		let all: String = StreamConfig::default().symbol_sets.concat();
		for _ in 0..500 {
			s.update(&mut rng);
		}
		for col in s.columns() {
			assert!(col.trail.len() <= 15);
			assert!(col.trail.iter().all(|g| all.contains(*g)));
		}
	}

	#[test]
	fn older_glyphs_are_dimmer() {
		let mut s = DataStream::new(StreamConfig::default());
		s.columns = vec![StreamColumn {
			x: 10.0,
			y: 200.0,
			speed: 1.0,
			trail: "0123".chars().collect(),
			opacity: 0.2,
		}];
		let mut surface = Recorder::new(Viewport::new(400.0, 300.0));
		s.render(&mut surface);

		let alphas: Vec<f64> = surface
			.texts()
			.map(|c| match c {
				DrawCommand::Text { color, .. } => color.a,
				_ => unreachable!(),
			})
			.collect();
		assert_eq!(alphas.len(), 4);
		assert_eq!(alphas[0], 0.0);
		assert!(alphas.windows(2).all(|w| w[0] < w[1]));
		assert!((alphas[3] - 0.2 * 0.75).abs() < 1e-12);
	}
}
