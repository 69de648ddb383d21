//! Canvas background effects and the pointer trail, plus the small text
//! widgets that sit alongside them.
//!
//! Each effect is an [`Animator`]: pure state stepped once per frame and
//! drawn onto a [`Surface`]. A [`Runner`] owns the mount/frame/unmount
//! lifecycle against a [`Host`], which is the browser in production and a
//! [`ManualHost`] in tests.
//!
//! # Example
//!
//! ```ignore
//! use portfolio_fx::{CustomCursor, NeuralNetworkBg};
//!
//! view! {
//!     <NeuralNetworkBg />
//!     <CustomCursor />
//! }
//! ```

/// Browser host and mounting.
pub mod browser;
mod canvas;
mod component;
/// Effect configuration.
pub mod config;
/// Count-up statistics.
pub mod counter;
/// Floating equations.
pub mod drift;
/// Neural network particle field.
pub mod field;
/// Frame scheduling and events.
pub mod host;
/// Animation lifecycle.
pub mod runner;
/// Falling data streams.
pub mod stream;
/// Drawing targets.
pub mod surface;
/// Colors and palettes.
pub mod theme;
/// Custom cursor.
pub mod trail;
/// Training log ticker.
pub mod training;
/// Typewriter code demo.
pub mod typewriter;

pub use canvas::CanvasSurface;
pub use component::{
	CustomCursor, DataStreamBg, MathEquationsBg, NeuralNetworkBg, StatsCounter, TrainingLogPanel,
	TypewriterTerminal, random_seed,
};
pub use config::FxConfig;
pub use host::{Host, ManualHost};
pub use runner::{Animator, Runner};
pub use surface::{Recorder, Surface};
pub use theme::Color;
