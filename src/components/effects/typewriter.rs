//! Typewriter code demo: reveals a highlighted snippet chunk by chunk.

use rand::Rng;
use rand::rngs::SmallRng;

use super::config::TypewriterConfig;
use super::theme::Color;

/// Syntax class of a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
	/// Identifiers and punctuation.
	Plain,
	/// Language keyword.
	Keyword,
	/// String or numeric literal.
	Str,
	/// Called name.
	Function,
	/// Line comment.
	Comment,
}

impl Token {
	/// Highlight color.
	pub fn color(self) -> Color {
		match self {
			Token::Plain => Color::rgb(171, 178, 191),
			Token::Keyword => Color::rgb(198, 120, 221),
			Token::Str => Color::rgb(152, 195, 121),
			Token::Function => Color::rgb(97, 175, 239),
			Token::Comment => Color::rgba(255, 255, 255, 0.3),
		}
	}
}

/// A run of text sharing one syntax class.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
	/// Chunk text, newlines included.
	pub text: &'static str,
	/// Syntax class.
	pub token: Token,
}

const fn chunk(text: &'static str, token: Token) -> Chunk {
	Chunk { text, token }
}

/// The snippet typed out on the page.
pub fn demo_snippet() -> Vec<Chunk> {
	use Token::*;
	vec![
		chunk("# model.py\n", Comment),
		chunk("import ", Keyword),
		chunk("tensorflow ", Plain),
		chunk("as ", Keyword),
		chunk("tf\n\n", Plain),
		chunk("model = tf.keras.", Plain),
		chunk("Sequential", Function),
		chunk("([\n", Plain),
		chunk("    tf.keras.layers.", Plain),
		chunk("Dense", Function),
		chunk("(128, ", Plain),
		chunk("\"relu\"", Str),
		chunk("),\n", Plain),
		chunk("    tf.keras.layers.", Plain),
		chunk("Dropout", Function),
		chunk("(0.3),\n", Plain),
		chunk("    tf.keras.layers.", Plain),
		chunk("Dense", Function),
		chunk("(10, ", Plain),
		chunk("\"softmax\"", Str),
		chunk(")\n])\n\n", Plain),
		chunk("model.", Plain),
		chunk("fit", Function),
		chunk("(X, y, epochs=", Plain),
		chunk("100", Str),
		chunk(")\n\n", Plain),
		chunk("# Accuracy: 97.3%", Comment),
	]
}

/// Reveal state for a snippet.
#[derive(Clone, Debug)]
pub struct Typewriter {
	config: TypewriterConfig,
	chunks: Vec<Chunk>,
	revealed: usize,
}

impl Typewriter {
	/// Typewriter with nothing revealed yet.
	pub fn new(config: TypewriterConfig, chunks: Vec<Chunk>) -> Self {
		Self {
			config,
			chunks,
			revealed: 0,
		}
	}

	/// Window title.
	pub fn title(&self) -> &str {
		&self.config.title
	}

	/// Chunks revealed so far.
	pub fn typed(&self) -> &[Chunk] {
		&self.chunks[..self.revealed]
	}

	/// True once every chunk is shown; the blinking cursor appears then.
	pub fn is_done(&self) -> bool {
		self.revealed >= self.chunks.len()
	}

	/// Pause after typing `chunk`, in milliseconds.
	pub fn delay_after(&self, chunk: &Chunk, rng: &mut SmallRng) -> f64 {
		let c = &self.config;
		if chunk.text.chars().count() > c.long_chunk {
			c.long_delay_ms
		} else {
			c.short_delay_min_ms + rng.random::<f64>() * c.short_delay_jitter_ms
		}
	}

	/// Reveals the next chunk and returns the pause before the following
	/// one, or `None` once the snippet is complete.
	pub fn advance(&mut self, rng: &mut SmallRng) -> Option<f64> {
		let chunk = self.chunks.get(self.revealed)?.clone();
		self.revealed += 1;
		Some(self.delay_after(&chunk, rng))
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;

	#[test]
	fn reveals_in_order_then_stops() {
		let mut tw = Typewriter::new(
			TypewriterConfig::default(),
			vec![chunk("a", Token::Plain), chunk("b", Token::Keyword)],
		);
		let mut rng = SmallRng::seed_from_u64(1);
		assert!(tw.typed().is_empty());
		assert!(tw.advance(&mut rng).is_some());
		assert_eq!(tw.typed()[0].text, "a");
		assert!(tw.advance(&mut rng).is_some());
		assert!(tw.is_done());
		assert_eq!(tw.advance(&mut rng), None);
		assert_eq!(tw.typed().len(), 2);
	}

	#[test]
	fn delays() {
		let tw = Typewriter::new(TypewriterConfig::default(), Vec::new());
		let mut rng = SmallRng::seed_from_u64(1);
		assert_eq!(tw.delay_after(&chunk("model = tf.keras.", Token::Plain), &mut rng), 55.0);
		for _ in 0..100 {
			let d = tw.delay_after(&chunk("fit", Token::Function), &mut rng);
			assert!((30.0..75.0).contains(&d));
		}
	}

	#[test]
	fn snippet_is_typed_fully() {
		let mut tw = Typewriter::new(TypewriterConfig::default(), demo_snippet());
		let mut rng = SmallRng::seed_from_u64(1);
		let mut steps = 0;
		while tw.advance(&mut rng).is_some() {
			steps += 1;
		}
		assert_eq!(steps, demo_snippet().len());
	}
}
