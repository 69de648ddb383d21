//! The per-frame animation loop shared by every canvas effect.
//!
//! A [`Runner`] owns one [`Animator`] and drives it through
//! mount → frame → frame → … → unmount against a [`Host`]. Each frame runs
//! update then render, then asks the host for the next frame. Unmounting
//! cancels the pending frame and removes every listener the runner added.

use log::debug;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::host::{FrameHandle, Host, Listen, ListenerId, PointerEvent};
use super::surface::{Surface, Viewport};

/// A self-contained effect: entity state, an update rule and a render step.
pub trait Animator {
	/// Short name used in log lines.
	fn name(&self) -> &'static str;

	/// Events to subscribe to while mounted.
	fn listens(&self) -> &'static [Listen] {
		&[Listen::Resize]
	}

	/// Whether the effect should run on this host at all.
	fn supports(&self, _host: &dyn Host) -> bool {
		true
	}

	/// Throws away all entities and regenerates them for `viewport`.
	fn reset(&mut self, viewport: Viewport, rng: &mut SmallRng);

	/// Advances the state by one frame.
	fn update(&mut self, rng: &mut SmallRng);

	/// Draws the current state. Called after the surface is cleared.
	fn render(&self, surface: &mut dyn Surface);

	/// Reacts to pointer input. Ignored by default.
	fn pointer(&mut self, _event: PointerEvent) {}
}

/// Handles held between mount and unmount.
#[derive(Debug)]
struct Mounted {
	frame: Option<FrameHandle>,
	listeners: Vec<ListenerId>,
	frames_run: u64,
}

/// Drives an [`Animator`] frame by frame.
pub struct Runner<A> {
	animator: A,
	rng: SmallRng,
	mounted: Option<Mounted>,
}

impl<A: Animator> Runner<A> {
	/// Wraps `animator` with a random source seeded from `seed`.
	pub fn new(animator: A, seed: u64) -> Self {
		Self {
			animator,
			rng: SmallRng::seed_from_u64(seed),
			mounted: None,
		}
	}

	/// The wrapped animator.
	pub fn animator(&self) -> &A {
		&self.animator
	}

	/// Whether the runner is between mount and unmount.
	pub fn is_mounted(&self) -> bool {
		self.mounted.is_some()
	}

	/// Number of frames run since the last mount.
	pub fn frames_run(&self) -> u64 {
		self.mounted.as_ref().map_or(0, |m| m.frames_run)
	}

	/// Generates the entities, subscribes to events and schedules the first
	/// frame. Returns false, registering nothing, if the animator declines
	/// this host.
	pub fn mount(&mut self, host: &mut dyn Host) -> bool {
		if self.mounted.is_some() {
			return true;
		}
		if !self.animator.supports(host) {
			debug!("{}: not supported on this host, skipping", self.animator.name());
			return false;
		}

		let viewport = host.viewport();
		self.animator.reset(viewport, &mut self.rng);

		let listeners = self
			.animator
			.listens()
			.iter()
			.map(|&event| host.listen(event))
			.collect();
		let frame = Some(host.request_frame());

		debug!(
			"{}: mounted at {}x{}",
			self.animator.name(),
			viewport.width,
			viewport.height
		);
		self.mounted = Some(Mounted {
			frame,
			listeners,
			frames_run: 0,
		});
		true
	}

	/// Body of the frame callback: update, clear, render, reschedule.
	pub fn frame(&mut self, host: &mut dyn Host, surface: &mut dyn Surface) {
		let Some(mounted) = self.mounted.as_mut() else {
			return;
		};
		mounted.frame = None;

		self.animator.update(&mut self.rng);
		surface.clear();
		self.animator.render(surface);

		mounted.frames_run += 1;
		mounted.frame = Some(host.request_frame());
	}

	/// Regenerates the entities for a new viewport.
	pub fn resize(&mut self, viewport: Viewport) {
		if self.mounted.is_none() {
			return;
		}
		debug!(
			"{}: resized to {}x{}",
			self.animator.name(),
			viewport.width,
			viewport.height
		);
		self.animator.reset(viewport, &mut self.rng);
	}

	/// Forwards pointer input while mounted; ignored otherwise.
	pub fn pointer(&mut self, event: PointerEvent) {
		if self.mounted.is_some() {
			self.animator.pointer(event);
		}
	}

	/// Cancels the pending frame and removes every listener.
	pub fn unmount(&mut self, host: &mut dyn Host) {
		let Some(mounted) = self.mounted.take() else {
			return;
		};
		if let Some(frame) = mounted.frame {
			host.cancel_frame(frame);
		}
		for id in mounted.listeners {
			host.unlisten(id);
		}
		debug!(
			"{}: unmounted after {} frames",
			self.animator.name(),
			mounted.frames_run
		);
	}
}
