//! Rolling "model training" log shown beside the hero section.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::SmallRng;

use super::config::TrainingConfig;

/// A single emitted log line.
#[derive(Clone, Debug, PartialEq)]
pub struct LogLine {
	/// Monotonic id, stable across re-renders.
	pub id: u64,
	/// Rendered line.
	pub text: String,
}

/// Simulated training run: loss falls, accuracy climbs, one line per tick.
#[derive(Clone, Debug)]
pub struct TrainingLog {
	config: TrainingConfig,
	epoch: u64,
	loss: f64,
	accuracy: f64,
	lines: VecDeque<LogLine>,
}

impl TrainingLog {
	/// Fresh run at epoch 1.
	pub fn new(config: TrainingConfig) -> Self {
		Self {
			epoch: 1,
			loss: config.initial_loss,
			accuracy: config.initial_accuracy,
			lines: VecDeque::with_capacity(config.max_lines + 1),
			config,
		}
	}

	/// Epoch of the next line.
	pub fn epoch(&self) -> u64 {
		self.epoch
	}

	/// Current loss.
	pub fn loss(&self) -> f64 {
		self.loss
	}

	/// Current accuracy.
	pub fn accuracy(&self) -> f64 {
		self.accuracy
	}

	/// Progress bar fill in [0, 1].
	pub fn progress(&self) -> f64 {
		self.accuracy.clamp(0.0, 1.0)
	}

	/// Visible lines, oldest first.
	pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
		self.lines.iter()
	}

	/// Logs the current epoch, then advances to the next one.
	pub fn tick(&mut self, rng: &mut SmallRng) {
		let c = &self.config;
		self.lines.push_back(LogLine {
			id: self.epoch,
			text: format!(
				"Epoch {}: loss={:.4}, accuracy={:.4}",
				self.epoch, self.loss, self.accuracy
			),
		});
		while self.lines.len() > c.max_lines {
			self.lines.pop_front();
		}

		self.epoch += 1;
		self.loss = (self.loss - rng.random::<f64>() * c.max_loss_step).max(c.loss_floor);
		self.accuracy = (self.accuracy + rng.random::<f64>() * c.max_accuracy_step).min(c.accuracy_ceiling);
	}
}
