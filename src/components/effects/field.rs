//! Neural-network background: drifting nodes that light up near the pointer.
//!
//! Nodes bounce off the viewport edges. Within the interaction radius each
//! node's activation rises and the node is pulled toward the pointer. Pairs
//! closer than the connection distance are joined by a line whose opacity
//! falls off with distance, and active pairs carry a travelling pulse.

use rand::Rng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use super::config::FieldConfig;
use super::host::{Listen, PointerEvent};
use super::runner::Animator;
use super::surface::{Point, Surface, Viewport};
use super::theme::Color;

/// A single node in the field.
#[derive(Clone, Debug)]
pub struct FieldNode {
	/// Position in CSS pixels.
	pub pos: Point,
	/// Horizontal velocity per frame.
	pub vx: f64,
	/// Vertical velocity per frame.
	pub vy: f64,
	/// Radius before activation.
	pub base_radius: f64,
	/// Radius drawn this frame.
	pub radius: f64,
	/// Body color.
	pub color: Color,
	/// Pointer proximity, smoothed over frames. Always within [0, 1].
	pub activation: f64,
}

impl FieldNode {
	/// Velocity magnitude.
	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}
}

/// A line between two nodes, derived each frame and never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	/// First endpoint.
	pub from: Point,
	/// Second endpoint.
	pub to: Point,
	/// Distance falloff alone, `1 - dist / threshold`.
	pub fade: f64,
	/// Mean activation of the two endpoints.
	pub activation: f64,
	/// Final line opacity.
	pub alpha: f64,
}

/// Activation a node should move toward for a pointer at `dist`.
///
/// 1 at the pointer, falling linearly to 0 at `radius` and beyond.
pub fn target_activation(dist: f64, radius: f64) -> f64 {
	if dist < radius {
		1.0 - dist / radius
	} else {
		0.0
	}
}

/// Opacity falloff of a connection of length `dist`.
pub fn connection_fade(dist: f64, threshold: f64) -> f64 {
	1.0 - dist / threshold
}

/// Builds the connection between `a` and `b`, or `None` if they are too far
/// apart or the line would be invisible.
pub fn connect(a: &FieldNode, b: &FieldNode, config: &FieldConfig) -> Option<Connection> {
	let dist = a.pos.distance(b.pos);
	if dist > config.connection_distance {
		return None;
	}
	let activation = (a.activation + b.activation) / 2.0;
	let fade = connection_fade(dist, config.connection_distance);
	let alpha = fade * (config.line_base_alpha + activation * config.line_active_alpha);
	if alpha < config.visibility_floor {
		return None;
	}
	Some(Connection {
		from: a.pos,
		to: b.pos,
		fade,
		activation,
		alpha,
	})
}

/// The particle field animator.
#[derive(Clone, Debug)]
pub struct NeuralField {
	config: FieldConfig,
	nodes: Vec<FieldNode>,
	viewport: Viewport,
	pointer: Option<Point>,
	/// Drives the pulse position along active connections.
	time: f64,
}

impl NeuralField {
	/// Creates an empty field; nodes spawn on mount.
	pub fn new(config: FieldConfig) -> Self {
		Self {
			config,
			nodes: Vec::new(),
			viewport: Viewport::default(),
			pointer: None,
			time: 0.0,
		}
	}

	/// Current nodes.
	pub fn nodes(&self) -> &[FieldNode] {
		&self.nodes
	}

	/// Replaces the node set, for tests and scripted scenes.
	pub fn set_nodes(&mut self, nodes: Vec<FieldNode>) {
		self.nodes = nodes;
	}

	/// Last pointer position, or `None` once it has left the page.
	pub fn pointer_pos(&self) -> Option<Point> {
		self.pointer
	}

	/// All visible connections for the current node positions.
	///
	/// Each item carries the index of the first node, which phases its pulse.
	pub fn connections(&self) -> impl Iterator<Item = (usize, Connection)> + '_ {
		let nodes = &self.nodes;
		(0..nodes.len()).flat_map(move |i| {
			(i + 1..nodes.len())
				.filter_map(move |j| connect(&nodes[i], &nodes[j], &self.config).map(|c| (i, c)))
		})
	}

	/// Pulse parameter along a connection, in [0, 1).
	fn pulse_t(&self, first: usize) -> f64 {
		(self.time * self.config.pulse_rate + first as f64 * self.config.pulse_phase).rem_euclid(1.0)
	}

	fn step_node(node: &mut FieldNode, viewport: Viewport, pointer: Option<Point>, c: &FieldConfig) {
		node.pos.x += node.vx;
		node.pos.y += node.vy;
		if node.pos.x < 0.0 || node.pos.x > viewport.width {
			node.vx = -node.vx;
		}
		if node.pos.y < 0.0 || node.pos.y > viewport.height {
			node.vy = -node.vy;
		}
		node.pos.x = node.pos.x.clamp(0.0, viewport.width);
		node.pos.y = node.pos.y.clamp(0.0, viewport.height);

		let (dx, dy, dist) = match pointer {
			Some(p) => {
				let (dx, dy) = (node.pos.x - p.x, node.pos.y - p.y);
				(dx, dy, (dx * dx + dy * dy).sqrt())
			}
			None => (0.0, 0.0, f64::INFINITY),
		};

		let target = target_activation(dist, c.interaction_radius);
		let smoothing = c.smoothing.clamp(0.0, 1.0);
		node.activation = (node.activation + (target - node.activation) * smoothing).clamp(0.0, 1.0);

		if dist < c.interaction_radius && dist > c.min_attraction_distance {
			let force = (1.0 - dist / c.interaction_radius) * c.attraction;
			node.vx -= dx / dist * force;
			node.vy -= dy / dist * force;
		}

		let speed = node.speed();
		if speed > c.max_speed {
			node.vx *= c.max_speed / speed;
			node.vy *= c.max_speed / speed;
		}

		node.radius = node.base_radius + node.activation * c.radius_bonus;
	}
}

impl Animator for NeuralField {
	fn name(&self) -> &'static str {
		"neural-field"
	}

	fn listens(&self) -> &'static [Listen] {
		&[Listen::Resize, Listen::PointerMove, Listen::PointerLeave]
	}

	fn reset(&mut self, viewport: Viewport, rng: &mut SmallRng) {
		let c = &self.config;
		self.viewport = viewport;
		self.time = 0.0;
		self.nodes = (0..c.node_count)
			.map(|_| {
				let base_radius = c.radius_min + rng.random::<f64>() * (c.radius_max - c.radius_min);
				FieldNode {
					pos: Point::new(
						rng.random::<f64>() * viewport.width,
						rng.random::<f64>() * viewport.height,
					),
					vx: (rng.random::<f64>() - 0.5) * c.initial_speed,
					vy: (rng.random::<f64>() - 0.5) * c.initial_speed,
					base_radius,
					radius: base_radius,
					color: c.palette.choose(rng).copied().unwrap_or(Color::WHITE),
					activation: 0.0,
				}
			})
			.collect();
	}

	fn update(&mut self, _rng: &mut SmallRng) {
		self.time += self.config.time_step;
		for node in &mut self.nodes {
			Self::step_node(node, self.viewport, self.pointer, &self.config);
		}
	}

	fn render(&self, surface: &mut dyn Surface) {
		let c = &self.config;

		for (first, conn) in self.connections() {
			surface.stroke_line(
				conn.from,
				conn.to,
				1.0 + conn.activation * c.line_active_width,
				c.line_color.with_alpha(conn.alpha),
			);

			if conn.activation > c.pulse_floor {
				let at = conn.from.lerp(conn.to, self.pulse_t(first));
				surface.fill_circle(
					at,
					2.5 + conn.activation * 4.0,
					c.pulse_color.with_alpha(conn.activation * 0.9),
				);
			}
		}

		for node in &self.nodes {
			if node.activation > c.glow_floor {
				surface.radial_glow(
					node.pos,
					20.0 + node.activation * 30.0,
					node.color.with_alpha(node.activation * 0.5),
				);
			}

			surface.fill_circle(
				node.pos,
				node.radius,
				node.color.fade(0.5 + node.activation * 0.5),
			);

			if node.activation > c.core_floor {
				surface.fill_circle(
					node.pos,
					2.0 + node.activation * 2.5,
					Color::WHITE.with_alpha(node.activation * 0.95),
				);
			}
		}
	}

	fn pointer(&mut self, event: PointerEvent) {
		match event {
			PointerEvent::Move(p) => self.pointer = Some(p),
			PointerEvent::Leave => self.pointer = None,
			_ => {}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;
	use crate::components::effects::surface::{DrawCommand, Recorder};

	fn node(x: f64, y: f64) -> FieldNode {
		FieldNode {
			pos: Point::new(x, y),
			vx: 0.0,
			vy: 0.0,
			base_radius: 2.0,
			radius: 2.0,
			color: Color::rgb(0, 229, 255),
			activation: 0.0,
		}
	}

	fn field(nodes: Vec<FieldNode>) -> NeuralField {
		let mut f = NeuralField::new(FieldConfig::default());
		f.viewport = Viewport::new(800.0, 600.0);
		f.set_nodes(nodes);
		f
	}

	#[test]
	fn target_activation_edges() {
		assert_eq!(target_activation(0.0, 300.0), 1.0);
		assert_eq!(target_activation(300.0, 300.0), 0.0);
		assert_eq!(target_activation(1000.0, 300.0), 0.0);
		assert!((target_activation(150.0, 300.0) - 0.5).abs() < 1e-12);
	}

	#[test]
	fn connection_fade_at_100_of_180() {
		let f = field(vec![node(0.0, 0.0), node(100.0, 0.0)]);
		let conns: Vec<_> = f.connections().collect();
		assert_eq!(conns.len(), 1);
		let (_, conn) = &conns[0];
		assert!((conn.fade - (1.0 - 100.0 / 180.0)).abs() < 1e-12);
		assert!((conn.fade - 0.444).abs() < 1e-3);
		// idle pair: only the base alpha applies
		assert!((conn.alpha - conn.fade * 0.25).abs() < 1e-12);
	}

	#[test]
	fn no_connection_beyond_threshold() {
		let f = field(vec![node(0.0, 0.0), node(181.0, 0.0)]);
		assert_eq!(f.connections().count(), 0);
	}

	#[test]
	fn pointer_leave_drives_activation_to_zero() {
		let mut f = field(vec![node(400.0, 300.0)]);
		let mut rng = SmallRng::seed_from_u64(3);
		f.pointer(PointerEvent::Move(Point::new(400.0, 300.0)));
		for _ in 0..50 {
			f.update(&mut rng);
		}
		assert!(f.nodes()[0].activation > 0.5);

		f.pointer(PointerEvent::Leave);
		assert_eq!(f.pointer_pos(), None);
		for _ in 0..300 {
			f.update(&mut rng);
		}
		assert!(f.nodes()[0].activation < 1e-6);
	}

	#[test]
	fn activation_follows_moving_average() {
		let mut f = field(vec![node(400.0, 300.0)]);
		let mut rng = SmallRng::seed_from_u64(3);
		f.pointer(PointerEvent::Move(Point::new(400.0, 300.0)));
		f.update(&mut rng);
		// one step of 0.1 toward a target of 1
		assert!((f.nodes()[0].activation - 0.1).abs() < 1e-12);
		assert!((f.nodes()[0].radius - (2.0 + 0.1 * 6.0)).abs() < 1e-12);
	}

	#[test]
	fn attraction_pulls_toward_pointer() {
		let mut f = field(vec![node(400.0, 300.0)]);
		let mut rng = SmallRng::seed_from_u64(3);
		f.pointer(PointerEvent::Move(Point::new(500.0, 300.0)));
		f.update(&mut rng);
		assert!(f.nodes()[0].vx > 0.0);
		assert_eq!(f.nodes()[0].vy, 0.0);
	}

	#[test]
	fn walls_reflect_and_clamp() {
		let mut n = node(799.5, 300.0);
		n.vx = 1.0;
		let mut f = field(vec![n]);
		let mut rng = SmallRng::seed_from_u64(3);
		f.update(&mut rng);
		assert_eq!(f.nodes()[0].pos.x, 800.0);
		assert_eq!(f.nodes()[0].vx, -1.0);
	}

	#[test]
	fn speed_is_clamped() {
		let mut n = node(400.0, 300.0);
		n.vx = 10.0;
		n.vy = 10.0;
		let mut f = field(vec![n]);
		let mut rng = SmallRng::seed_from_u64(3);
		f.update(&mut rng);
		assert!(f.nodes()[0].speed() <= 1.8 + 1e-9);
	}

	#[test]
	fn reset_fills_viewport() {
		let mut f = NeuralField::new(FieldConfig::default());
		let mut rng = SmallRng::seed_from_u64(9);
		let vp = Viewport::new(640.0, 480.0);
		f.reset(vp, &mut rng);
		assert_eq!(f.nodes().len(), 100);
		assert!(f.nodes().iter().all(|n| vp.contains(n.pos)));
		assert!(f.nodes().iter().all(|n| n.activation == 0.0));
	}

	#[test]
	fn active_pair_draws_pulse_and_glow() {
		let mut a = node(100.0, 100.0);
		let mut b = node(150.0, 100.0);
		a.activation = 0.8;
		b.activation = 0.6;
		let f = field(vec![a, b]);
		let mut surface = Recorder::new(Viewport::new(800.0, 600.0));
		f.render(&mut surface);

		let glows = surface
			.commands()
			.iter()
			.filter(|c| matches!(c, DrawCommand::Glow { .. }))
			.count();
		assert_eq!(glows, 2);
		assert_eq!(surface.lines().count(), 1);
		// pulse + 2 bodies + 2 cores
		let circles = surface
			.commands()
			.iter()
			.filter(|c| matches!(c, DrawCommand::Circle { .. }))
			.count();
		assert_eq!(circles, 5);
	}
}
