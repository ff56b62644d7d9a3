//! The capability interface through which the interpreter reaches the surrounding engine.

use serde::{Deserialize, Serialize};

use super::ActorId;

/// A `SoundStuff` request, forwarded with its raw operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundRequest {
	/// Actor whose limb issued the request
	pub actor: ActorId,
	/// Sound slot
	pub slot: u8,
	/// Request code
	pub code: u8,
	/// Argument
	pub arg: u8,
}

/// A deferred engine command (`CmdQue3`, `CmdQue3Quick`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueuedCommand {
	/// Actor whose limb issued the command
	pub actor: ActorId,
	/// Command number
	pub command: u8,
	/// First parameter
	pub param1: i32,
	/// Second parameter
	pub param2: i32,
}

/// Receives the side effects the interpreter cannot perform itself.
///
/// Implementations are injected into [`Interpreter`](super::Interpreter) at construction and called
/// synchronously while a limb is being stepped.
pub trait SideEffectSink {
	/// Handles a `SoundStuff` instruction.
	fn dispatch_sound(&mut self, request: SoundRequest);

	/// Handles a queued engine command.
	fn dispatch_queued_command(&mut self, command: QueuedCommand);
}

/// Discards every side effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SideEffectSink for NullSink {
	fn dispatch_sound(&mut self, request: SoundRequest) {
		log::trace!("Dropping sound request {request:?}");
	}

	fn dispatch_queued_command(&mut self, command: QueuedCommand) {
		log::trace!("Dropping queued command {command:?}");
	}
}

/// Keeps every side effect in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
	/// Sound requests received so far
	pub sounds: Vec<SoundRequest>,
	/// Queued commands received so far
	pub commands: Vec<QueuedCommand>,
}

impl RecordingSink {
	/// Creates an empty recorder.
	pub fn new() -> Self {
		Self::default()
	}
}

impl SideEffectSink for RecordingSink {
	fn dispatch_sound(&mut self, request: SoundRequest) {
		self.sounds.push(request);
	}

	fn dispatch_queued_command(&mut self, command: QueuedCommand) {
		self.commands.push(command);
	}
}

impl<T: SideEffectSink + ?Sized> SideEffectSink for &mut T {
	fn dispatch_sound(&mut self, request: SoundRequest) {
		(**self).dispatch_sound(request);
	}

	fn dispatch_queued_command(&mut self, command: QueuedCommand) {
		(**self).dispatch_queued_command(command);
	}
}
