//! Browser [`Host`]: `requestAnimationFrame` and DOM event listeners.
//!
//! [`mount`] wires an [`Animator`] to a canvas. The frame callback and every
//! event callback hold only a weak reference to the mounted state, so
//! dropping the [`MountHandle`] after [`MountHandle::unmount`] frees
//! everything.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use super::canvas::CanvasSurface;
use super::host::{FrameHandle, Host, Listen, ListenerId, PointerEvent};
use super::runner::{Animator, Runner};
use super::surface::{Point, Viewport};
use crate::error::FxError;

type Handler = Rc<dyn Fn(Listen, Event)>;

/// A DOM listener kept alive until it is removed.
struct Registered {
	target: EventTarget,
	name: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

/// DOM event name for a subscription, and whether it is on `window`
/// rather than `document`.
fn dom_event(listen: Listen) -> (&'static str, bool) {
	match listen {
		Listen::Resize => ("resize", true),
		Listen::PointerMove => ("mousemove", true),
		Listen::PointerEnter => ("mouseenter", false),
		Listen::PointerLeave => ("mouseleave", false),
		Listen::PointerDown => ("mousedown", false),
		Listen::PointerUp => ("mouseup", false),
		Listen::PointerOver => ("mouseover", false),
	}
}

/// Whether the device reports touch support.
fn probe_touch(window: &Window) -> bool {
	js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
		|| window.navigator().max_touch_points() > 0
}

/// Host backed by the real window.
pub struct BrowserHost {
	window: Window,
	document: Document,
	touch: bool,
	frame_cb: Option<Closure<dyn FnMut()>>,
	handler: Option<Handler>,
	listeners: HashMap<ListenerId, Registered>,
	next_id: u32,
}

impl BrowserHost {
	/// Probes touch support once, up front.
	pub fn new(window: Window, document: Document) -> Self {
		let touch = probe_touch(&window);
		Self {
			window,
			document,
			touch,
			frame_cb: None,
			handler: None,
			listeners: HashMap::new(),
			next_id: 0,
		}
	}
}

impl Host for BrowserHost {
	fn viewport(&self) -> Viewport {
		let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
		Viewport::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
	}

	fn is_touch_capable(&self) -> bool {
		self.touch
	}

	fn request_frame(&mut self) -> FrameHandle {
		let Some(cb) = self.frame_cb.as_ref() else {
			return FrameHandle(0);
		};
		match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(id) => FrameHandle(id as u32),
			Err(e) => {
				warn!("requestAnimationFrame failed: {:?}", e);
				FrameHandle(0)
			}
		}
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		if handle.0 != 0 {
			let _ = self.window.cancel_animation_frame(handle.0 as i32);
		}
	}

	fn listen(&mut self, event: Listen) -> ListenerId {
		self.next_id += 1;
		let id = ListenerId(self.next_id);
		let Some(handler) = self.handler.clone() else {
			return id;
		};

		let (name, on_window) = dom_event(event);
		let target: EventTarget = if on_window {
			self.window.clone().into()
		} else {
			self.document.clone().into()
		};
		let callback = Closure::<dyn FnMut(Event)>::new(move |ev: Event| handler(event, ev));
		if let Err(e) = target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref()) {
			warn!("failed to listen for {}: {:?}", name, e);
			return id;
		}
		self.listeners.insert(
			id,
			Registered {
				target,
				name,
				callback,
			},
		);
		id
	}

	fn unlisten(&mut self, id: ListenerId) {
		if let Some(r) = self.listeners.remove(&id) {
			let _ = r
				.target
				.remove_event_listener_with_callback(r.name, r.callback.as_ref().unchecked_ref());
		}
	}
}

/// Everything owned by one mounted canvas effect.
struct Mounted<A> {
	runner: Runner<A>,
	host: BrowserHost,
	surface: CanvasSurface,
}

impl<A: Animator> Mounted<A> {
	fn frame(&mut self) {
		let Mounted {
			runner,
			host,
			surface,
		} = self;
		runner.frame(host, surface);
	}

	fn dispatch(&mut self, listen: Listen, event: &Event) {
		let pointer = match listen {
			Listen::Resize => {
				let vp = self.host.viewport();
				self.surface.set_size(vp);
				self.runner.resize(vp);
				return;
			}
			Listen::PointerMove => {
				let Some(m) = event.dyn_ref::<MouseEvent>() else {
					return;
				};
				PointerEvent::Move(Point::new(m.client_x() as f64, m.client_y() as f64))
			}
			Listen::PointerEnter => PointerEvent::Enter,
			Listen::PointerLeave => PointerEvent::Leave,
			Listen::PointerDown => PointerEvent::Down,
			Listen::PointerUp => PointerEvent::Up,
			Listen::PointerOver => PointerEvent::Hover {
				interactive: is_interactive(event),
			},
		};
		self.runner.pointer(pointer);
	}

	fn teardown(&mut self) {
		let Mounted { runner, host, .. } = self;
		runner.unmount(host);
		host.frame_cb = None;
		host.handler = None;
	}
}

/// Targets opt in to the hover ring with a `data-interactive` attribute on
/// themselves or an ancestor.
fn is_interactive(event: &Event) -> bool {
	event
		.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.and_then(|el| el.closest("[data-interactive]").ok().flatten())
		.is_some()
}

/// Keeps a mounted effect alive; call [`MountHandle::unmount`] to stop it.
pub struct MountHandle {
	teardown: Box<dyn FnOnce()>,
}

impl MountHandle {
	/// Stops the effect and removes its listeners.
	pub fn unmount(self) {
		(self.teardown)();
	}
}

/// Starts `animator` on `canvas`, sized to the window.
///
/// Returns `Ok(None)` when the animator declines this device; nothing is
/// registered in that case.
pub fn mount<A: Animator + 'static>(
	canvas: HtmlCanvasElement,
	animator: A,
	seed: u64,
) -> Result<Option<MountHandle>, FxError> {
	let window = web_sys::window().ok_or(FxError::NoWindow)?;
	let document = window.document().ok_or(FxError::NoDocument)?;
	let mut surface = CanvasSurface::new(canvas)?;
	let host = BrowserHost::new(window, document);
	surface.set_size(host.viewport());

	let mounted = Rc::new(RefCell::new(Mounted {
		runner: Runner::new(animator, seed),
		host,
		surface,
	}));

	let weak = Rc::downgrade(&mounted);
	let frame_cb = Closure::<dyn FnMut()>::new(move || {
		if let Some(m) = weak.upgrade() {
			m.borrow_mut().frame();
		}
	});
	let weak = Rc::downgrade(&mounted);
	let handler: Handler = Rc::new(move |listen, event| {
		if let Some(m) = weak.upgrade() {
			m.borrow_mut().dispatch(listen, &event);
		}
	});

	{
		let mut m = mounted.borrow_mut();
		m.host.frame_cb = Some(frame_cb);
		m.host.handler = Some(handler);
		let Mounted { runner, host, .. } = &mut *m;
		if !runner.mount(host) {
			m.teardown();
			return Ok(None);
		}
	}

	Ok(Some(MountHandle {
		teardown: Box::new(move || mounted.borrow_mut().teardown()),
	}))
}

/// Key for a mount stored in the per-thread registry.
///
/// Plain `Copy` data, so it can cross into `Send` cleanup callbacks that
/// cannot hold the `Rc`-based handle itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MountKey(u32);

thread_local! {
	static MOUNTS: RefCell<HashMap<MountKey, MountHandle>> = RefCell::new(HashMap::new());
	static NEXT_KEY: Cell<u32> = const { Cell::new(0) };
}

impl MountKey {
	/// Allocates a fresh key.
	pub fn reserve() -> Self {
		NEXT_KEY.with(|n| {
			n.set(n.get() + 1);
			MountKey(n.get())
		})
	}

	/// Whether a mount is stored under this key.
	pub fn is_mounted(self) -> bool {
		MOUNTS.with(|m| m.borrow().contains_key(&self))
	}

	/// Stores `handle`, keeping the mount alive until [`MountKey::release`].
	pub fn store(self, handle: MountHandle) {
		MOUNTS.with(|m| m.borrow_mut().insert(self, handle));
	}

	/// Unmounts and drops the handle stored under this key, if any.
	pub fn release(self) {
		let handle = MOUNTS.with(|m| m.borrow_mut().remove(&self));
		if let Some(handle) = handle {
			debug!("releasing effect mount {:?}", self);
			handle.unmount();
		}
	}
}
