//! Frame scheduling and event-listener registration.
//!
//! [`Host`] is everything an animator needs from its environment: the
//! viewport size, a way to ask for the next frame, and a way to subscribe
//! to resize and pointer events. The browser implementation lives in
//! `browser.rs`; [`ManualHost`] steps frames by hand.

use std::collections::BTreeSet;

use super::surface::{Point, Viewport};

/// Token for a requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u32);

/// Token for a registered event listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(pub u32);

/// Event sources an animator can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Listen {
	/// Window size changed.
	Resize,
	/// Pointer moved.
	PointerMove,
	/// Pointer entered the page.
	PointerEnter,
	/// Pointer left the page.
	PointerLeave,
	/// Button pressed.
	PointerDown,
	/// Button released.
	PointerUp,
	/// Pointer moved onto a new target; carries its interactive flag.
	PointerOver,
}

/// Pointer input delivered to an animator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
	/// Pointer position in CSS pixels.
	Move(Point),
	/// Pointer entered the page.
	Enter,
	/// Pointer left the page.
	Leave,
	/// Button pressed.
	Down,
	/// Button released.
	Up,
	/// The element under the pointer changed. `interactive` is set by the
	/// component that rendered the target, not inferred from the DOM.
	Hover {
		/// Whether the target opts in to the hover ring.
		interactive: bool,
	},
}

/// Scheduler and event registry an animator runs against.
pub trait Host {
	/// Current size in CSS pixels.
	fn viewport(&self) -> Viewport;

	/// Whether the device has a touch screen. Probed once at mount.
	fn is_touch_capable(&self) -> bool;

	/// Schedules one frame callback.
	fn request_frame(&mut self) -> FrameHandle;

	/// Cancels a scheduled frame; unknown handles are ignored.
	fn cancel_frame(&mut self, handle: FrameHandle);

	/// Subscribes to `event`.
	fn listen(&mut self, event: Listen) -> ListenerId;

	/// Removes a subscription; unknown ids are ignored.
	fn unlisten(&mut self, id: ListenerId);
}

/// Deterministic host: frames only fire when the caller says so.
#[derive(Debug, Default)]
pub struct ManualHost {
	viewport: Viewport,
	touch: bool,
	next_id: u32,
	pending: BTreeSet<FrameHandle>,
	listeners: Vec<(ListenerId, Listen)>,
}

impl ManualHost {
	/// Non-touch host of the given size.
	pub fn new(viewport: Viewport) -> Self {
		Self {
			viewport,
			..Self::default()
		}
	}

	/// Sets whether the host reports touch support.
	pub fn with_touch(mut self, touch: bool) -> Self {
		self.touch = touch;
		self
	}

	/// Changes the size reported from now on.
	pub fn set_viewport(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	/// Consumes the oldest pending frame. Returns false if none was pending,
	/// in which case the caller must not run a frame.
	pub fn fire_frame(&mut self) -> bool {
		self.pending.pop_first().is_some()
	}

	/// Frames requested but not yet fired or cancelled.
	pub fn pending_frames(&self) -> usize {
		self.pending.len()
	}

	/// Live subscriptions.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	/// Whether anything is subscribed to `event`.
	pub fn is_listening(&self, event: Listen) -> bool {
		self.listeners.iter().any(|&(_, e)| e == event)
	}

	fn next(&mut self) -> u32 {
		self.next_id += 1;
		self.next_id
	}
}

impl Host for ManualHost {
	fn viewport(&self) -> Viewport {
		self.viewport
	}

	fn is_touch_capable(&self) -> bool {
		self.touch
	}

	fn request_frame(&mut self) -> FrameHandle {
		let handle = FrameHandle(self.next());
		self.pending.insert(handle);
		handle
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		self.pending.remove(&handle);
	}

	fn listen(&mut self, event: Listen) -> ListenerId {
		let id = ListenerId(self.next());
		self.listeners.push((id, event));
		id
	}

	fn unlisten(&mut self, id: ListenerId) {
		self.listeners.retain(|&(l, _)| l != id);
	}
}
