//! Per-title playback configuration.
//!
//! AKOS data was shipped on several platforms, and the byte order of the bytecode words and of the
//! wide cel control words follows the platform the title was built for. Everything that varies
//! between titles is gathered in [`TitleConfig`], which derives `serde` traits so tools can load it
//! from TOML or the environment.
//!
//! # Examples
//!
//! ```
//! use akos_types::config::{ByteOrder, InterpreterConfig, TitleConfig};
//!
//! let config = TitleConfig {
//!     byte_order: ByteOrder::Little,
//!     interpreter: InterpreterConfig::strict(),
//!     ..TitleConfig::default()
//! };
//! assert_eq!(config.interpreter.max_steps_per_tick, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::codec::Rect;

/// Byte order of 16-bit words inside bytecode and wide cel streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
	/// Most significant byte first (PC releases)
	#[default]
	Big,
	/// Least significant byte first
	Little,
}

impl ByteOrder {
	/// Reads an unsigned word at `at`, or `None` if fewer than two bytes remain.
	#[inline]
	pub fn read_u16(self, data: &[u8], at: usize) -> Option<u16> {
		let bytes = data.get(at..at.checked_add(2)?)?;
		let pair = [bytes[0], bytes[1]];
		Some(match self {
			Self::Big => u16::from_be_bytes(pair),
			Self::Little => u16::from_le_bytes(pair),
		})
	}

	/// Reads a signed word at `at`, or `None` if fewer than two bytes remain.
	#[inline]
	pub fn read_i16(self, data: &[u8], at: usize) -> Option<i16> {
		self.read_u16(data, at).map(|word| word as i16)
	}

	/// Serializes a word in this byte order.
	#[inline]
	pub fn u16_bytes(self, value: u16) -> [u8; 2] {
		match self {
			Self::Big => value.to_be_bytes(),
			Self::Little => value.to_le_bytes(),
		}
	}
}

impl std::fmt::Display for ByteOrder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Big => write!(f, "big-endian"),
			Self::Little => write!(f, "little-endian"),
		}
	}
}

/// Limits and seeding for the bytecode interpreter.
///
/// # Presets
///
/// - `default()`: 1000 steps per tick
/// - `lenient()`: 10000 steps per tick, for costumes with long command chains
/// - `strict()`: 100 steps per tick, to catch jump cycles early
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
	/// Maximum instructions one limb may dispatch in a single tick before it is frozen.
	/// Zero is treated as one.
	pub max_steps_per_tick: usize,
	/// Seed for the `Random` opcode; `None` seeds from the operating system
	pub rng_seed: Option<u64>,
}

impl Default for InterpreterConfig {
	fn default() -> Self {
		Self {
			max_steps_per_tick: 1000,
			rng_seed: None,
		}
	}
}

impl InterpreterConfig {
	/// Create a configuration with a custom step limit.
	pub fn new(max_steps_per_tick: usize) -> Self {
		Self {
			max_steps_per_tick,
			rng_seed: None,
		}
	}

	/// Create a lenient configuration with a higher step limit.
	pub fn lenient() -> Self {
		Self {
			max_steps_per_tick: 10000,
			rng_seed: None,
		}
	}

	/// Create a strict configuration with a low step limit.
	pub fn strict() -> Self {
		Self {
			max_steps_per_tick: 100,
			rng_seed: None,
		}
	}

	/// Step budget the interpreter enforces, never below one.
	pub fn step_limit(&self) -> usize {
		self.max_steps_per_tick.max(1)
	}

	/// Returns a copy that seeds the `Random` opcode deterministically.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.rng_seed = Some(seed);
		self
	}
}

/// Everything that differs between titles sharing the AKOS format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
	/// Byte order of bytecode words and wide cel control words
	pub byte_order: ByteOrder,
	/// Interpreter limits
	pub interpreter: InterpreterConfig,
	/// Clip rectangle applied to every blit; `None` clips to the surface
	pub clip: Option<Rect>,
}
