//! Tunable constants for every effect.
//!
//! All values are hand-tuned; none follow from a formula. Every struct
//! deserializes with per-field defaults so a config document only needs to
//! name what it overrides.

use serde::Deserialize;

use super::theme::{self, Color};

/// Neural field tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of nodes spawned on reset.
	pub node_count: usize,
	/// Pairs farther apart than this are not connected.
	pub connection_distance: f64,
	/// Pointer influence radius for activation and attraction.
	pub interaction_radius: f64,
	/// Exponential moving average factor for activation, in [0, 1].
	pub smoothing: f64,
	/// Pull strength toward the pointer at zero distance.
	pub attraction: f64,
	/// No pull inside this distance, so nodes settle instead of orbiting.
	pub min_attraction_distance: f64,
	/// Velocity magnitude cap.
	pub max_speed: f64,
	/// Initial velocity components are uniform in ±`initial_speed / 2`.
	pub initial_speed: f64,
	/// Smallest base radius.
	pub radius_min: f64,
	/// Base radii are uniform in [`radius_min`, `radius_max`).
	pub radius_max: f64,
	/// Extra radius at full activation.
	pub radius_bonus: f64,
	/// Connection opacity at zero activation, before distance fade.
	pub line_base_alpha: f64,
	/// Opacity added at full activation.
	pub line_active_alpha: f64,
	/// Width added at full activation.
	pub line_active_width: f64,
	/// Connections fainter than this are skipped.
	pub visibility_floor: f64,
	/// Average activation above which a pulse travels along a connection.
	pub pulse_floor: f64,
	/// Activation above which a node gets a glow.
	pub glow_floor: f64,
	/// Activation above which a node gets a white core.
	pub core_floor: f64,
	/// Pulse clock advance per frame.
	pub time_step: f64,
	/// Pulse laps per unit of pulse time.
	pub pulse_rate: f64,
	/// Pulse offset per first-node index.
	pub pulse_phase: f64,
	/// Node colors, picked at random per node.
	pub palette: Vec<Color>,
	/// Connection color.
	pub line_color: Color,
	/// Color of pulses travelling along connections.
	pub pulse_color: Color,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			node_count: 100,
			connection_distance: 180.0,
			interaction_radius: 300.0,
			smoothing: 0.1,
			attraction: 0.025,
			min_attraction_distance: 5.0,
			max_speed: 1.8,
			initial_speed: 0.6,
			radius_min: 1.0,
			radius_max: 4.0,
			radius_bonus: 6.0,
			line_base_alpha: 0.25,
			line_active_alpha: 0.65,
			line_active_width: 3.5,
			visibility_floor: 0.01,
			pulse_floor: 0.05,
			glow_floor: 0.05,
			core_floor: 0.2,
			time_step: 0.015,
			pulse_rate: 3.0,
			pulse_phase: 0.1,
			palette: theme::neon_palette(),
			line_color: theme::PURPLE,
			pulse_color: theme::AQUA,
		}
	}
}

/// Data stream tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
	/// Horizontal spacing between columns.
	pub column_width: f64,
	/// Random horizontal offset within a column.
	pub column_jitter: f64,
	/// Slowest fall speed, pixels per frame.
	pub speed_min: f64,
	/// Speeds are uniform in [`speed_min`, `speed_min + speed_range`).
	pub speed_range: f64,
	/// Faintest column opacity.
	pub opacity_min: f64,
	/// Opacity is uniform in [`opacity_min`, `opacity_min + opacity_range`).
	pub opacity_range: f64,
	/// Chance per frame of appending a glyph to a non-empty trail.
	pub append_chance: f64,
	/// Maximum glyphs per trail; the oldest is evicted first.
	pub trail_cap: usize,
	/// y a stream restarts from after leaving the bottom edge.
	pub reset_y: f64,
	/// Vertical distance between glyphs in a trail.
	pub glyph_spacing: f64,
	/// Glyph sets; each append picks a set, then a glyph from it.
	pub symbol_sets: Vec<String>,
	/// Glyph color before opacity.
	pub color: Color,
	/// CSS font for glyphs.
	pub font: String,
}

impl Default for StreamConfig {
	fn default() -> Self {
		Self {
			column_width: 40.0,
			column_jitter: 20.0,
			speed_min: 1.0,
			speed_range: 2.0,
			opacity_min: 0.05,
			opacity_range: 0.15,
			append_chance: 0.05,
			trail_cap: 15,
			reset_y: -100.0,
			glyph_spacing: 18.0,
			symbol_sets: ["01", "0123456789", "[]{},.+-*/=", "W=θλβε", "λ=0.88", "[0.1, 0.9]"]
				.into_iter()
				.map(String::from)
				.collect(),
			color: theme::VIOLET,
			font: "12px monospace".into(),
		}
	}
}

/// Floating equations tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
	/// Number of labels spawned on reset.
	pub label_count: usize,
	/// Velocity components are uniform in ±`max_speed`.
	pub max_speed: f64,
	/// Faintest label opacity.
	pub opacity_min: f64,
	/// Opacity is uniform in [`opacity_min`, `opacity_min + opacity_range`).
	pub opacity_range: f64,
	/// How far past the left/right edge a label travels before wrapping.
	pub margin_x: f64,
	/// How far past the top/bottom edge a label travels before wrapping.
	pub margin_y: f64,
	/// Equation texts, picked at random per label.
	pub labels: Vec<String>,
	/// Label color before opacity.
	pub color: Color,
	/// CSS font for labels.
	pub font: String,
}

impl Default for DriftConfig {
	fn default() -> Self {
		Self {
			label_count: 25,
			max_speed: 0.1,
			opacity_min: 0.05,
			opacity_range: 0.12,
			margin_x: 100.0,
			margin_y: 50.0,
			labels: [
				"∂L/∂W",
				"f(x) = σ(Wx + b)",
				"H(p, q) = -∑ p(x) log q(x)",
				"E = mc²",
				"∇f(x)",
				"softmax(zᵢ) = eᶻⁱ / ∑eᶻʲ",
				"ReLU(x) = max(0, x)",
				"MSE = 1/n ∑(y - ŷ)²",
				"z = ∑ wᵢxᵢ + b",
				"p(y|x) = exp(w·x) / Z",
				"Attention(Q, K, V)",
				"d = √∑(xᵢ - yᵢ)²",
			]
			.into_iter()
			.map(String::from)
			.collect(),
			color: theme::PURPLE,
			font: "italic 16px serif".into(),
		}
	}
}

/// Pointer trail and cursor tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
	/// Opacity multiplier applied to every trail point each frame.
	pub decay: f64,
	/// Points fainter than this are dropped.
	pub floor: f64,
	/// Optional hard cap on trail length, oldest evicted first.
	pub max_points: Option<usize>,
	/// Draw a marker on every n-th point.
	pub marker_every: usize,
	/// Trail polyline width.
	pub line_width: f64,
	/// Trail polyline opacity.
	pub line_alpha: f64,
	/// Fraction of the remaining distance the ring covers each frame.
	pub ring_follow: f64,
	/// Ring radius at rest.
	pub ring_radius: f64,
	/// Ring radius while hovering an interactive target.
	pub ring_hover_radius: f64,
	/// Ring scale while hovering.
	pub hover_scale: f64,
	/// Ring scale while the button is held.
	pub click_scale: f64,
	/// Inner dot radius.
	pub dot_radius: f64,
	/// Cursor color.
	pub color: Color,
}

impl Default for TrailConfig {
	fn default() -> Self {
		Self {
			decay: 0.85,
			floor: 0.1,
			max_points: None,
			marker_every: 4,
			line_width: 1.5,
			line_alpha: 0.3,
			ring_follow: 0.15,
			ring_radius: 20.0,
			ring_hover_radius: 25.0,
			hover_scale: 1.5,
			click_scale: 0.8,
			dot_radius: 4.0,
			color: theme::VIOLET,
		}
	}
}

/// Training log tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
	/// Delay between ticks.
	pub interval_ms: u32,
	/// Lines kept on screen.
	pub max_lines: usize,
	/// Loss shown on the first line.
	pub initial_loss: f64,
	/// Accuracy shown on the first line.
	pub initial_accuracy: f64,
	/// Loss never drops below this.
	pub loss_floor: f64,
	/// Accuracy never rises above this.
	pub accuracy_ceiling: f64,
	/// Loss falls by up to this much per tick.
	pub max_loss_step: f64,
	/// Accuracy rises by up to this much per tick.
	pub max_accuracy_step: f64,
}

impl Default for TrainingConfig {
	fn default() -> Self {
		Self {
			interval_ms: 1500,
			max_lines: 5,
			initial_loss: 0.854,
			initial_accuracy: 0.12,
			loss_floor: 0.012,
			accuracy_ceiling: 0.998,
			max_loss_step: 0.05,
			max_accuracy_step: 0.04,
		}
	}
}

/// One count-up statistic.
#[derive(Clone, Debug, Deserialize)]
pub struct StatConfig {
	/// Final value.
	pub value: u64,
	#[serde(default)]
	pub suffix: String,
	/// Caption under the number.
	pub label: String,
}

/// Count-up statistics tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
	/// Time to reach the final values.
	pub duration_ms: f64,
	/// Statistics, in display order.
	pub stats: Vec<StatConfig>,
}

impl Default for CounterConfig {
	fn default() -> Self {
		let stat = |value, suffix: &str, label: &str| StatConfig {
			value,
			suffix: suffix.into(),
			label: label.into(),
		};
		Self {
			duration_ms: 2000.0,
			stats: vec![
				stat(15, "+", "Projects Built"),
				stat(4, "+", "Hackathons Won"),
				stat(3, "", "Research Papers"),
				stat(1000, "+", "Lines of Python"),
			],
		}
	}
}

/// Typewriter tuning.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
	/// Chunks longer than this are followed by `long_delay_ms`.
	pub long_chunk: usize,
	/// Pause after a long chunk.
	pub long_delay_ms: f64,
	/// Shortest pause after a short chunk.
	pub short_delay_min_ms: f64,
	/// Random extra pause after a short chunk.
	pub short_delay_jitter_ms: f64,
	/// Window title above the code.
	pub title: String,
}

impl Default for TypewriterConfig {
	fn default() -> Self {
		Self {
			long_chunk: 10,
			long_delay_ms: 55.0,
			short_delay_min_ms: 30.0,
			short_delay_jitter_ms: 45.0,
			title: "model.py".into(),
		}
	}
}

/// Configuration for every effect on the page.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FxConfig {
	/// Fixed seed for reproducible scenes. Random per page load if unset.
	pub seed: Option<u64>,
	/// Neural field background.
	pub field: FieldConfig,
	/// Data stream background.
	pub stream: StreamConfig,
	/// Floating equations background.
	pub drift: DriftConfig,
	/// Custom cursor.
	pub trail: TrailConfig,
	/// Training log panel.
	pub training: TrainingConfig,
	/// Count-up statistics.
	pub counter: CounterConfig,
	/// Typewriter demo.
	pub typewriter: TypewriterConfig,
}

impl FxConfig {
	/// Parses a config document; missing fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, crate::error::FxError> {
		Ok(serde_json::from_str(json)?)
	}
}
