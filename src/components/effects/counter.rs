//! Count-up numbers for the stats strip.

/// Cubic ease-out on [0, 1].
pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Formats `n` with comma thousands separators.
pub fn group_thousands(n: u64) -> String {
	let digits = n.to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

/// A number that eases from 0 to its target over a fixed duration.
#[derive(Clone, Debug)]
pub struct CountUp {
	target: u64,
	suffix: String,
	duration_ms: f64,
	started_at: Option<f64>,
}

impl CountUp {
	/// Creates an idle counter; it shows 0 until started.
	pub fn new(target: u64, suffix: impl Into<String>, duration_ms: f64) -> Self {
		Self {
			target,
			suffix: suffix.into(),
			duration_ms,
			started_at: None,
		}
	}

	/// Starts counting at timestamp `now_ms`. Later calls are ignored.
	pub fn start(&mut self, now_ms: f64) {
		self.started_at.get_or_insert(now_ms);
	}

	/// Elapsed fraction of the duration, in [0, 1].
	pub fn progress(&self, now_ms: f64) -> f64 {
		match self.started_at {
			None => 0.0,
			Some(_) if self.duration_ms <= 0.0 => 1.0,
			Some(start) => ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0),
		}
	}

	/// Eased value at `now_ms`.
	pub fn value(&self, now_ms: f64) -> u64 {
		(ease_out_cubic(self.progress(now_ms)) * self.target as f64).round() as u64
	}

	/// Whether the final value has been reached.
	pub fn is_finished(&self, now_ms: f64) -> bool {
		self.progress(now_ms) >= 1.0
	}

	/// Text shown at `now_ms`, e.g. `1,000+`.
	pub fn display(&self, now_ms: f64) -> String {
		let value = self.value(now_ms);
		let number = if self.target >= 1000 {
			group_thousands(value)
		} else {
			value.to_string()
		};
		format!("{number}{}", self.suffix)
	}
}
