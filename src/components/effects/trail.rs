//! Custom cursor: a fading pointer trail plus a dot and an easing ring.
//!
//! The trail is bounded by decay: every point loses a fixed fraction of its
//! opacity each frame and is dropped once it falls below the floor. The
//! inner dot sits exactly on the pointer while the outer ring closes a fixed
//! fraction of the remaining distance per frame.

use std::collections::VecDeque;

use rand::rngs::SmallRng;

use super::config::TrailConfig;
use super::host::{Host, Listen, PointerEvent};
use super::runner::Animator;
use super::surface::{Point, Surface, Viewport};

/// Where the cursor starts before the first pointer event.
const OFFSCREEN: Point = Point::new(-100.0, -100.0);

/// One recorded pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
	/// Recorded position.
	pub pos: Point,
	/// Current opacity.
	pub alpha: f64,
}

/// Pointer trail and cursor state.
#[derive(Clone, Debug)]
pub struct PointerTrail {
	config: TrailConfig,
	trail: VecDeque<TrailPoint>,
	pointer: Point,
	ring: Point,
	visible: bool,
	hovering: bool,
	clicking: bool,
}

impl PointerTrail {
	/// Hidden cursor with an empty trail.
	pub fn new(config: TrailConfig) -> Self {
		Self {
			config,
			trail: VecDeque::new(),
			pointer: OFFSCREEN,
			ring: OFFSCREEN,
			visible: false,
			hovering: false,
			clicking: false,
		}
	}

	/// Trail points, oldest first.
	pub fn trail(&self) -> &VecDeque<TrailPoint> {
		&self.trail
	}

	/// Current ring center.
	pub fn ring(&self) -> Point {
		self.ring
	}

	/// Whether the cursor is drawn.
	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Whether the pointer is over an interactive target.
	pub fn is_hovering(&self) -> bool {
		self.hovering
	}

	/// Whether the button is held.
	pub fn is_clicking(&self) -> bool {
		self.clicking
	}

	/// Ring scale factor. Hover takes precedence over click.
	pub fn ring_scale(&self) -> f64 {
		if self.hovering {
			self.config.hover_scale
		} else if self.clicking {
			self.config.click_scale
		} else {
			1.0
		}
	}

	fn push(&mut self, pos: Point) {
		self.trail.push_back(TrailPoint { pos, alpha: 1.0 });
		if let Some(max) = self.config.max_points {
			while self.trail.len() > max {
				self.trail.pop_front();
			}
		}
	}

	/// Applies one frame of decay and drops points below the floor.
	pub fn decay(&mut self) {
		let (decay, floor) = (self.config.decay, self.config.floor);
		for p in &mut self.trail {
			p.alpha *= decay;
		}
		self.trail.retain(|p| p.alpha >= floor);
	}

	fn render_trail(&self, surface: &mut dyn Surface) {
		let c = &self.config;
		if self.trail.len() < 2 {
			return;
		}
		let points: Vec<Point> = self.trail.iter().map(|p| p.pos).collect();
		surface.stroke_polyline(&points, c.line_width, c.color.with_alpha(c.line_alpha));

		let every = c.marker_every.max(1);
		for p in self.trail.iter().step_by(every) {
			surface.fill_circle(p.pos, p.alpha * 2.5, c.color.with_alpha(p.alpha * 0.6));
		}
	}

	fn render_cursor(&self, surface: &mut dyn Surface) {
		let c = &self.config;
		let base = if self.hovering {
			c.ring_hover_radius
		} else {
			c.ring_radius
		};
		let radius = base * self.ring_scale();

		if self.hovering {
			surface.radial_glow(self.ring, radius * 1.6, c.color.with_alpha(0.4));
			surface.fill_circle(self.ring, radius, c.color.with_alpha(0.12));
			surface.stroke_circle(self.ring, radius, 2.0, c.color.with_alpha(0.8));
		} else {
			surface.radial_glow(self.ring, radius * 1.3, c.color.with_alpha(0.25));
			surface.stroke_circle(self.ring, radius, 2.0, c.color.with_alpha(0.5));
		}

		surface.radial_glow(self.pointer, c.dot_radius * 5.0, c.color.with_alpha(0.5));
		surface.fill_circle(self.pointer, c.dot_radius, c.color);
	}
}

impl Animator for PointerTrail {
	fn name(&self) -> &'static str {
		"pointer-trail"
	}

	fn listens(&self) -> &'static [Listen] {
		&[
			Listen::Resize,
			Listen::PointerMove,
			Listen::PointerEnter,
			Listen::PointerLeave,
			Listen::PointerDown,
			Listen::PointerUp,
			Listen::PointerOver,
		]
	}

	/// Touch screens keep the native cursor.
	fn supports(&self, host: &dyn Host) -> bool {
		!host.is_touch_capable()
	}

	fn reset(&mut self, _viewport: Viewport, _rng: &mut SmallRng) {
		self.trail.clear();
	}

	fn update(&mut self, _rng: &mut SmallRng) {
		let follow = self.config.ring_follow.clamp(0.0, 1.0);
		self.ring.x += (self.pointer.x - self.ring.x) * follow;
		self.ring.y += (self.pointer.y - self.ring.y) * follow;
		self.decay();
	}

	fn render(&self, surface: &mut dyn Surface) {
		if !self.visible {
			return;
		}
		self.render_trail(surface);
		self.render_cursor(surface);
	}

	fn pointer(&mut self, event: PointerEvent) {
		match event {
			PointerEvent::Move(p) => {
				self.pointer = p;
				self.visible = true;
				self.push(p);
			}
			PointerEvent::Enter => self.visible = true,
			PointerEvent::Leave => self.visible = false,
			PointerEvent::Down => self.clicking = true,
			PointerEvent::Up => self.clicking = false,
			PointerEvent::Hover { interactive } => self.hovering = interactive,
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;
	use crate::components::effects::host::ManualHost;
	use crate::components::effects::runner::Runner;
	use crate::components::effects::surface::{DrawCommand, Recorder};

	fn rng() -> SmallRng {
		SmallRng::seed_from_u64(0)
	}

	#[test]
	fn point_survives_ten_frames_and_is_gone_after_fifteen() {
		let mut t = PointerTrail::new(TrailConfig::default());
		let mut rng = rng();
		t.pointer(PointerEvent::Move(Point::new(10.0, 10.0)));

		for _ in 0..10 {
			t.update(&mut rng);
		}
		let alpha = t.trail()[0].alpha;
		assert!((alpha - 0.85f64.powi(10)).abs() < 1e-12);
		assert!((alpha - 0.197).abs() < 1e-3);

		for _ in 0..5 {
			t.update(&mut rng);
		}
		assert!(t.trail().is_empty());
	}

	#[test]
	fn ring_eases_toward_pointer() {
		let mut t = PointerTrail::new(TrailConfig::default());
		let mut rng = rng();
		t.pointer(PointerEvent::Move(Point::new(100.0, 100.0)));
		t.update(&mut rng);
		// -100 + 200 * 0.15
		assert!((t.ring().x - -70.0).abs() < 1e-12);
		for _ in 0..200 {
			t.update(&mut rng);
		}
		assert!(t.ring().distance(Point::new(100.0, 100.0)) < 1e-6);
	}

	#[test]
	fn hover_wins_over_click() {
		let mut t = PointerTrail::new(TrailConfig::default());
		t.pointer(PointerEvent::Down);
		assert_eq!(t.ring_scale(), 0.8);
		t.pointer(PointerEvent::Hover { interactive: true });
		assert_eq!(t.ring_scale(), 1.5);
		t.pointer(PointerEvent::Up);
		t.pointer(PointerEvent::Hover { interactive: false });
		assert_eq!(t.ring_scale(), 1.0);
	}

	#[test]
	fn hidden_until_pointer_arrives() {
		let mut t = PointerTrail::new(TrailConfig::default());
		let mut surface = Recorder::new(Viewport::new(200.0, 200.0));
		t.render(&mut surface);
		assert!(surface.commands().is_empty());

		t.pointer(PointerEvent::Move(Point::new(50.0, 50.0)));
		t.render(&mut surface);
		assert!(!surface.commands().is_empty());

		t.pointer(PointerEvent::Leave);
		let mut surface = Recorder::new(Viewport::new(200.0, 200.0));
		t.render(&mut surface);
		assert!(surface.commands().is_empty());
	}

	#[test]
	fn hidden_frames_draw_nothing_but_keep_decaying() {
		let vp = Viewport::new(200.0, 200.0);
		let mut host = ManualHost::new(vp);
		let mut surface = Recorder::new(vp);
		let mut runner = Runner::new(PointerTrail::new(TrailConfig::default()), 1);
		assert!(runner.mount(&mut host));

		runner.pointer(PointerEvent::Move(Point::new(20.0, 20.0)));
		runner.pointer(PointerEvent::Move(Point::new(30.0, 20.0)));
		host.fire_frame();
		runner.frame(&mut host, &mut surface);
		assert!(!surface.is_blank());

		runner.pointer(PointerEvent::Leave);
		host.fire_frame();
		runner.frame(&mut host, &mut surface);
		assert!(surface.is_blank());
		assert!(runner.animator().trail().iter().all(|p| p.alpha < 0.85));
	}

	#[test]
	fn markers_on_every_fourth_point() {
		let mut t = PointerTrail::new(TrailConfig::default());
		for i in 0..9 {
			t.pointer(PointerEvent::Move(Point::new(i as f64, 0.0)));
		}
		let mut surface = Recorder::new(Viewport::new(200.0, 200.0));
		t.render_trail(&mut surface);

		let markers: Vec<Point> = surface
			.commands()
			.iter()
			.filter_map(|c| match c {
				DrawCommand::Circle { center, .. } => Some(*center),
				_ => None,
			})
			.collect();
		assert_eq!(
			markers,
			vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(8.0, 0.0)]
		);
		assert!(matches!(
			surface.commands()[0],
			DrawCommand::Polyline { ref points, .. } if points.len() == 9
		));
	}

	#[test]
	fn optional_cap_evicts_oldest() {
		let mut t = PointerTrail::new(TrailConfig {
			max_points: Some(3),
			..TrailConfig::default()
		});
		for i in 0..5 {
			t.pointer(PointerEvent::Move(Point::new(i as f64, 0.0)));
		}
		let xs: Vec<f64> = t.trail().iter().map(|p| p.pos.x).collect();
		assert_eq!(xs, vec![2.0, 3.0, 4.0]);
	}

	#[test]
	fn touch_device_mounts_nothing() {
		let mut host = ManualHost::new(Viewport::new(400.0, 400.0)).with_touch(true);
		let mut runner = Runner::new(PointerTrail::new(TrailConfig::default()), 1);
		assert!(!runner.mount(&mut host));
		assert_eq!(host.listener_count(), 0);
		assert_eq!(host.pending_frames(), 0);

		let mut surface = Recorder::new(host.viewport());
		runner.frame(&mut host, &mut surface);
		assert!(surface.commands().is_empty());
	}

	#[test]
	fn pointer_mounts_all_listeners() {
		let mut host = ManualHost::new(Viewport::new(400.0, 400.0));
		let mut runner = Runner::new(PointerTrail::new(TrailConfig::default()), 1);
		assert!(runner.mount(&mut host));
		assert!(host.is_listening(Listen::PointerOver));
		assert_eq!(host.listener_count(), 7);
		runner.unmount(&mut host);
		assert_eq!(host.listener_count(), 0);
	}
}
