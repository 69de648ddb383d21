//! Property tests for the effect simulations, driven headlessly through
//! `ManualHost` and `Recorder`.

use portfolio_fx::components::effects::config::{FieldConfig, StreamConfig, TrailConfig};
use portfolio_fx::components::effects::field::NeuralField;
use portfolio_fx::components::effects::host::PointerEvent;
use portfolio_fx::components::effects::stream::DataStream;
use portfolio_fx::components::effects::surface::{DrawCommand, Point, Viewport};
use portfolio_fx::components::effects::trail::PointerTrail;
use portfolio_fx::{Animator, ManualHost, Recorder, Runner};
use proptest::prelude::*;

/// Mounts `animator` and runs `frames` frames, applying `moves` to the
/// pointer along the way.
fn drive<A: Animator>(animator: A, seed: u64, viewport: Viewport, frames: usize, moves: &[Point]) -> Runner<A> {
	let mut host = ManualHost::new(viewport);
	let mut surface = Recorder::new(viewport);
	let mut runner = Runner::new(animator, seed);
	assert!(runner.mount(&mut host));
	for i in 0..frames {
		if let Some(&p) = moves.get(i) {
			runner.pointer(PointerEvent::Move(p));
		}
		assert!(host.fire_frame());
		runner.frame(&mut host, &mut surface);
	}
	runner
}

fn viewport() -> impl Strategy<Value = Viewport> {
	(50.0..1600.0f64, 50.0..1000.0f64).prop_map(|(w, h)| Viewport::new(w, h))
}

fn points() -> impl Strategy<Value = Vec<Point>> {
	prop::collection::vec((-200.0..1800.0f64, -200.0..1200.0f64).prop_map(|(x, y)| Point::new(x, y)), 0..60)
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn field_nodes_stay_bounded(seed in any::<u64>(), vp in viewport(), moves in points(), frames in 1usize..80) {
		let config = FieldConfig { node_count: 30, ..FieldConfig::default() };
		let max_speed = config.max_speed;
		let runner = drive(NeuralField::new(config), seed, vp, frames, &moves);

		for node in runner.animator().nodes() {
			prop_assert!((0.0..=1.0).contains(&node.activation));
			prop_assert!(node.speed() <= max_speed + 1e-9);
			prop_assert!(vp.contains(node.pos));
		}
	}

	#[test]
	fn connection_alpha_is_bounded(seed in any::<u64>(), vp in viewport(), moves in points()) {
		let config = FieldConfig { node_count: 40, ..FieldConfig::default() };
		let runner = drive(NeuralField::new(config), seed, vp, moves.len().max(1), &moves);

		for (_, conn) in runner.animator().connections() {
			prop_assert!(conn.fade > 0.0 && conn.fade <= 1.0);
			prop_assert!((0.0..=1.0).contains(&conn.activation));
			prop_assert!(conn.alpha >= 0.0 && conn.alpha <= 1.0);
		}
	}

	#[test]
	fn stream_trails_never_exceed_cap(seed in any::<u64>(), vp in viewport(), cap in 1usize..30, frames in 1usize..300) {
		let config = StreamConfig { trail_cap: cap, append_chance: 0.5, ..StreamConfig::default() };
		let runner = drive(DataStream::new(config), seed, vp, frames, &[]);

		prop_assert!(!runner.animator().columns().is_empty());
		for column in runner.animator().columns() {
			prop_assert!(column.trail.len() <= cap);
			prop_assert!(!column.trail.is_empty());
		}
	}

	#[test]
	fn trail_fades_oldest_first(seed in any::<u64>(), moves in points(), idle in 0usize..30) {
		let vp = Viewport::new(1920.0, 1080.0);
		let config = TrailConfig::default();
		let floor = config.floor;
		let runner = drive(PointerTrail::new(config), seed, vp, moves.len() + idle, &moves);

		let trail = runner.animator().trail();
		for p in trail {
			prop_assert!(p.alpha >= floor && p.alpha <= 1.0);
		}
		for pair in trail.iter().collect::<Vec<_>>().windows(2) {
			prop_assert!(pair[0].alpha <= pair[1].alpha);
		}
	}

	#[test]
	fn tracked_point_only_fades_then_stops_drawing(
		seed in any::<u64>(),
		origin in (0.0..1000.0f64, 0.0..800.0f64),
		count in 2usize..12,
		decay in 0.5..0.95f64,
	) {
		let vp = Viewport::new(1920.0, 1080.0);
		let config = TrailConfig { decay, marker_every: 1, ..TrailConfig::default() };
		let floor = config.floor;
		let mut host = ManualHost::new(vp);
		let mut surface = Recorder::new(vp);
		let mut runner = Runner::new(PointerTrail::new(config), seed);
		prop_assert!(runner.mount(&mut host));

		let tracked = Point::new(origin.0, origin.1);
		for i in 0..count {
			runner.pointer(PointerEvent::Move(Point::new(origin.0 + i as f64 * 7.0, origin.1)));
		}

		let mut last_alpha = 1.0;
		let mut gone = false;
		for _ in 0..60 {
			host.fire_frame();
			runner.frame(&mut host, &mut surface);

			let current = runner.animator().trail().iter().find(|p| p.pos == tracked).map(|p| p.alpha);
			match current {
				Some(alpha) => {
					prop_assert!(!gone, "point reappeared after removal");
					prop_assert!(alpha <= last_alpha);
					prop_assert!(alpha >= floor);
					last_alpha = alpha;
				}
				None => {
					gone = true;
					let drawn = surface
						.commands()
						.iter()
						.any(|c| matches!(c, DrawCommand::Circle { center, .. } if *center == tracked));
					prop_assert!(!drawn);
				}
			}
		}
		prop_assert!(gone);
	}

	#[test]
	fn unmount_releases_everything(seed in any::<u64>(), frames in 0usize..20) {
		let vp = Viewport::new(800.0, 600.0);
		let mut host = ManualHost::new(vp);
		let mut surface = Recorder::new(vp);
		let mut runner = Runner::new(PointerTrail::new(TrailConfig::default()), seed);

		prop_assert!(runner.mount(&mut host));
		for _ in 0..frames {
			host.fire_frame();
			runner.frame(&mut host, &mut surface);
		}
		runner.unmount(&mut host);

		prop_assert_eq!(host.pending_frames(), 0);
		prop_assert_eq!(host.listener_count(), 0);
		prop_assert!(!runner.is_mounted());
	}
}
