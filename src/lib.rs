//! portfolio-fx: animated canvas backgrounds and a pointer trail for a
//! scroll-driven portfolio page.
//!
//! Effects are plain state machines stepped once per animation frame and
//! drawn through a small [`Surface`] abstraction, so they run the same on a
//! browser canvas and on an in-memory [`Recorder`] under test.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

/// UI components.
pub mod components;
/// Error type.
pub mod error;

pub use components::effects::{
	Animator, CanvasSurface, Color, CustomCursor, DataStreamBg, FxConfig, Host, ManualHost,
	MathEquationsBg, NeuralNetworkBg, Recorder, Runner, StatsCounter, Surface, TrainingLogPanel,
	TypewriterTerminal,
};
pub use error::FxError;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("portfolio-fx: logging initialized");
}

/// Load effect configuration from a script element with id="fx-config".
/// Missing element means defaults; a malformed document is logged and
/// also falls back to defaults.
pub fn load_fx_config() -> FxConfig {
	let Some(json_text) = config_script_text() else {
		return FxConfig::default();
	};

	match FxConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"portfolio-fx: loaded config ({} nodes, trail decay {})",
				config.field.node_count, config.trail.decay
			);
			config
		}
		Err(e) => {
			warn!("portfolio-fx: failed to parse fx config: {}", e);
			FxConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("fx-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Distinct per-effect seed derived from the page seed.
fn salted(seed: Option<u64>, salt: u64) -> Option<u64> {
	seed.map(|s| s ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Main application component.
/// Loads effect config from the DOM and lays out the page sections.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_fx_config();
	let seed = config.seed;

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<NeuralNetworkBg config=config.field seed=salted(seed, 1) />
		<CustomCursor config=config.trail seed=salted(seed, 2) />

		<main class="portfolio">
			<section class="hero">
				<h1>"Machine Learning Engineer"</h1>
				<a href="#projects" class="button" data-interactive="true">"View work"</a>
				<TrainingLogPanel config=config.training seed=salted(seed, 3) />
			</section>

			<section id="projects" class="projects" style="position: relative;">
				<DataStreamBg config=config.stream seed=salted(seed, 4) />
				<h2>"Projects"</h2>
				<TypewriterTerminal config=config.typewriter seed=salted(seed, 5) />
			</section>

			<section class="stats-section" style="position: relative;">
				<MathEquationsBg config=config.drift seed=salted(seed, 6) />
				<StatsCounter config=config.counter />
			</section>

			<section id="contact" class="contact">
				<a href="mailto:hello@example.com" data-interactive="true">"Get in touch"</a>
			</section>
		</main>
	}
}
