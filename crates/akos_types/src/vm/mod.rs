//! The limb bytecode interpreter.
//!
//! Every limb of a costume runs a short program from the `AKSQ` block. Each tick the interpreter
//! moves the limb past the cel it is showing, then executes instructions until the next cel or a
//! `Return`. There is no call stack; control flow is jumps and conditional skips only.
//!
//! Side effects that belong to the surrounding engine (sounds, queued engine commands) go to a
//! [`SideEffectSink`] injected at construction. Animation starts and cross-actor variable writes are
//! deferred to a [`CommandQueue`] that the stage applies after the animate pass.
//!
//! # Examples
//!
//! ```
//! use akos_types::codec::Codec;
//! use akos_types::config::{ByteOrder, InterpreterConfig};
//! use akos_types::file::{CostumeBuilder, LimbCommand, LimbMode};
//! use akos_types::vm::{ActorId, CostumeState, Interpreter, NullSink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // SetVar var[0] = 5; JumpE 0x000D if var[0] == 5; Cel 99; Cel 7
//! let code = [
//!     0xC0, 0x10, 0x00, 0x05, 0x00,
//!     0xC0, 0x70, 0x00, 0x0D, 0x00, 0x00, 0x05,
//!     0x63,
//!     0x07,
//! ];
//! let mut builder = CostumeBuilder::new(Codec::RunTag8);
//! let start = builder.append_sequence(&code)?;
//! builder.set_animation(0, vec![(0, LimbCommand::Start {
//!     mode: LimbMode::Run,
//!     start,
//!     len: code.len() as u16,
//! })]);
//! let costume = builder.build_costume()?;
//!
//! let mut interpreter = Interpreter::new(InterpreterConfig::default(), ByteOrder::Big, NullSink);
//! let mut state = CostumeState::new();
//! interpreter.start_animation(&costume, &mut state, 0)?;
//! let frame = interpreter.tick(ActorId(1), &costume, &mut state, 0);
//! assert_eq!(frame.cel, Some(7));
//! # Ok(())
//! # }
//! ```

mod interpreter;
mod limb;
pub mod opcode;
mod queue;
mod sink;

#[cfg(test)]
mod tests;

use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub use interpreter::Interpreter;
pub use limb::{CostumeState, LimbFrame, LimbState};
pub use opcode::{Comparison, Instruction, JumpTargets, Opcode, assemble, disassemble};
pub use queue::{AnimCommand, CommandQueue};
pub use sink::{NullSink, QueuedCommand, RecordingSink, SideEffectSink, SoundRequest};

/// Number of limbs per costume
pub const NUM_LIMBS: usize = 16;

/// Number of variables per limb
pub const NUM_VARS: usize = 16;

/// Identifies an actor on stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u16);

impl Display for ActorId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

impl From<u16> for ActorId {
	fn from(id: u16) -> Self {
		Self(id)
	}
}

impl TryFrom<i32> for ActorId {
	type Error = std::num::TryFromIntError;

	fn try_from(value: i32) -> Result<Self, Self::Error> {
		u16::try_from(value).map(Self)
	}
}
