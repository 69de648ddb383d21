//! Leptos components wrapping the effects.
//!
//! Canvas effects mount through [`browser::mount`] once their canvas exists
//! and unmount on cleanup. The text widgets (training log, stats, typewriter)
//! drive signals from Leptos timers instead.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::*;
use log::warn;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_sys::HtmlCanvasElement;

use super::browser::{self, MountKey};
use super::config::{
	CounterConfig, DriftConfig, FieldConfig, StreamConfig, TrailConfig, TrainingConfig,
	TypewriterConfig,
};
use super::counter::CountUp;
use super::drift::EquationDrift;
use super::field::NeuralField;
use super::runner::Animator;
use super::stream::DataStream;
use super::trail::PointerTrail;
use super::training::{LogLine, TrainingLog};
use super::typewriter::{Chunk, Typewriter, demo_snippet};

/// A fresh seed when none is configured.
pub fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Mounts the animator built by `make` on the canvas behind `canvas_ref`
/// and unmounts it when the owning component is cleaned up.
fn use_canvas_animator<A, F>(canvas_ref: NodeRef<leptos::html::Canvas>, make: F, seed: Option<u64>)
where
	A: Animator + 'static,
	F: Fn() -> A + 'static,
{
	let key = MountKey::reserve();
	let seed = seed.unwrap_or_else(random_seed);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if key.is_mounted() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match browser::mount(canvas, make(), seed) {
			Ok(Some(handle)) => key.store(handle),
			Ok(None) => {}
			Err(e) => warn!("effect not rendered: {}", e),
		}
	});

	on_cleanup(move || key.release());
}

/// Full-page neural network behind all content.
#[component]
pub fn NeuralNetworkBg(
	/// Tuning; defaults match the live page.
	#[prop(default = FieldConfig::default())] config: FieldConfig,
	/// Fixed random seed; a fresh one per mount if unset.
	#[prop(default = None)] seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	use_canvas_animator(canvas_ref, move || NeuralField::new(config.clone()), seed);

	view! {
		<canvas
			node_ref=canvas_ref
			class="fx-neural"
			aria-hidden="true"
			style="position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: -1; pointer-events: none; opacity: 0.8;"
		/>
	}
}

/// Falling data columns for a section background.
#[component]
pub fn DataStreamBg(
	/// Tuning; defaults match the live page.
	#[prop(default = StreamConfig::default())] config: StreamConfig,
	/// Fixed random seed; a fresh one per mount if unset.
	#[prop(default = None)] seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	use_canvas_animator(canvas_ref, move || DataStream::new(config.clone()), seed);

	view! {
		<canvas
			node_ref=canvas_ref
			class="fx-stream"
			aria-hidden="true"
			style="position: absolute; inset: 0; width: 100%; height: 100%; z-index: -1; pointer-events: none; opacity: 0.4;"
		/>
	}
}

/// Floating equations for a section background.
#[component]
pub fn MathEquationsBg(
	/// Tuning; defaults match the live page.
	#[prop(default = DriftConfig::default())] config: DriftConfig,
	/// Fixed random seed; a fresh one per mount if unset.
	#[prop(default = None)] seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	use_canvas_animator(canvas_ref, move || EquationDrift::new(config.clone()), seed);

	view! {
		<canvas
			node_ref=canvas_ref
			class="fx-equations"
			aria-hidden="true"
			style="position: absolute; inset: 0; width: 100%; height: 100%; z-index: -1; pointer-events: none;"
		/>
	}
}

/// Cursor replacement with a fading trail. Inert on touch devices.
#[component]
pub fn CustomCursor(
	/// Tuning; defaults match the live page.
	#[prop(default = TrailConfig::default())] config: TrailConfig,
	/// Fixed random seed; a fresh one per mount if unset.
	#[prop(default = None)] seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	use_canvas_animator(canvas_ref, move || PointerTrail::new(config.clone()), seed);

	view! {
		<canvas
			node_ref=canvas_ref
			class="fx-cursor"
			aria-hidden="true"
			style="position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: 99999; pointer-events: none;"
		/>
	}
}

/// Rolling training log with an accuracy bar.
#[component]
pub fn TrainingLogPanel(
	/// Tuning; defaults match the live page.
	#[prop(default = TrainingConfig::default())] config: TrainingConfig,
	/// Fixed random seed; a fresh one per mount if unset.
	#[prop(default = None)] seed: Option<u64>,
) -> impl IntoView {
	let interval = Duration::from_millis(config.interval_ms as u64);
	let state = Rc::new(RefCell::new((
		TrainingLog::new(config),
		SmallRng::seed_from_u64(seed.unwrap_or_else(random_seed)),
	)));
	let lines = RwSignal::new(Vec::<LogLine>::new());
	let progress = RwSignal::new(state.borrow().0.progress());

	let tick = move || {
		let mut guard = state.borrow_mut();
		let (log, rng) = &mut *guard;
		log.tick(rng);
		lines.set(log.lines().cloned().collect());
		progress.set(log.progress());
	};
	match set_interval_with_handle(tick, interval) {
		Ok(handle) => on_cleanup(move || handle.clear()),
		Err(e) => warn!("training log not started: {:?}", e),
	}

	view! {
		<div class="training-log" aria-hidden="true">
			<div class="training-log__title">"Running Simulation..."</div>
			<div class="training-log__lines">
				<For
					each=move || lines.get()
					key=|line: &LogLine| line.id
					children=move |line: LogLine| view! { <div class="training-log__line">{line.text}</div> }
				/>
			</div>
			<div class="training-log__bar">
				<div
					class="training-log__fill"
					style:width=move || format!("{:.1}%", progress.get() * 100.0)
				/>
			</div>
		</div>
	}
}

/// Steps `now` once per animation frame until `end` or until the signal is
/// disposed.
fn run_clock(now: RwSignal<f64>, end: f64) {
	let t = js_sys::Date::now();
	if now.try_set(t).is_some() || t >= end {
		return;
	}
	request_animation_frame(move || run_clock(now, end));
}

/// Strip of statistics counting up from zero.
#[component]
pub fn StatsCounter(
	/// Statistics and count-up duration.
	#[prop(default = CounterConfig::default())] config: CounterConfig,
) -> impl IntoView {
	let start = js_sys::Date::now();
	let now = RwSignal::new(start);
	let stats: Vec<(CountUp, String)> = config
		.stats
		.iter()
		.map(|s| {
			let mut counter = CountUp::new(s.value, s.suffix.clone(), config.duration_ms);
			counter.start(start);
			(counter, s.label.clone())
		})
		.collect();
	run_clock(now, start + config.duration_ms);

	view! {
		<div class="stats">
			{stats
				.into_iter()
				.map(|(counter, label)| {
					view! {
						<div class="stats__item">
							<div class="stats__value">{move || counter.display(now.get())}</div>
							<div class="stats__label">{label}</div>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}

/// Reveals the next chunk and schedules the one after it.
fn type_next(state: Rc<RefCell<(Typewriter, SmallRng)>>, revealed: RwSignal<usize>) {
	let (delay, count) = {
		let mut guard = state.borrow_mut();
		let (tw, rng) = &mut *guard;
		let delay = tw.advance(rng);
		(delay, tw.typed().len())
	};
	if revealed.try_set(count).is_some() {
		return;
	}
	if let Some(ms) = delay {
		set_timeout(
			move || type_next(state, revealed),
			Duration::from_secs_f64(ms / 1000.0),
		);
	}
}

/// Fake editor window typing out a highlighted snippet.
#[component]
pub fn TypewriterTerminal(
	/// Tuning; defaults match the live page.
	#[prop(default = TypewriterConfig::default())] config: TypewriterConfig,
	/// Fixed random seed; a fresh one per mount if unset.
	#[prop(default = None)] seed: Option<u64>,
) -> impl IntoView {
	let chunks: Vec<Chunk> = demo_snippet();
	let total = chunks.len();
	let typewriter = Typewriter::new(config, chunks.clone());
	let title = typewriter.title().to_string();
	let revealed = RwSignal::new(0usize);

	let state = Rc::new(RefCell::new((
		typewriter,
		SmallRng::seed_from_u64(seed.unwrap_or_else(random_seed)),
	)));
	type_next(state, revealed);
	let done = move || revealed.get() >= total;

	view! {
		<div class="terminal">
			<div class="terminal__chrome">
				<span class="terminal__dot" style="background: #FF5F57;" />
				<span class="terminal__dot" style="background: #FEBC2E;" />
				<span class="terminal__dot" style="background: #28C840;" />
				<span class="terminal__title">{title}</span>
			</div>
			<pre class="terminal__body">
				{move || {
					chunks[..revealed.get().min(total)]
						.iter()
						.map(|c| {
							let style = format!("color: {};", c.token.color().to_css());
							view! { <span style=style>{c.text}</span> }
						})
						.collect_view()
				}}
				<Show when=done>
					<span class="terminal__cursor" />
				</Show>
			</pre>
		</div>
	}
}
