//! Animation commands deferred until the end of the animate pass.
//!
//! Starting an animation and writing into another actor both touch state the interpreter does not
//! own while it steps a limb. Those instructions push an [`AnimCommand`] instead, and the stage
//! applies the queue once every actor has been stepped. Each entry is applied whole or dropped.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::ActorId;

/// One deferred command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimCommand {
	/// Start animation `anim` on `actor`
	Start {
		/// Target actor
		actor: ActorId,
		/// Animation index
		anim: u16,
	},
	/// Write `value` into variable `var` of limb `limb` of `actor`
	SetVar {
		/// Target actor
		actor: ActorId,
		/// Target limb (the index of the limb that issued the write)
		limb: usize,
		/// Variable index
		var: u8,
		/// Value
		value: i32,
	},
}

impl AnimCommand {
	/// The actor the command applies to.
	pub fn actor(&self) -> ActorId {
		match self {
			Self::Start {
				actor,
				..
			}
			| Self::SetVar {
				actor,
				..
			} => *actor,
		}
	}
}

/// FIFO of deferred commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandQueue {
	entries: VecDeque<AnimCommand>,
}

impl CommandQueue {
	/// Creates an empty queue.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a command.
	pub fn push(&mut self, command: AnimCommand) {
		log::trace!("Queued {command:?}");
		self.entries.push_back(command);
	}

	/// Number of pending commands.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if nothing is pending.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over the pending commands without removing them.
	pub fn iter(&self) -> impl Iterator<Item = &AnimCommand> {
		self.entries.iter()
	}

	/// Removes and returns every pending command in push order.
	pub fn drain(&mut self) -> impl Iterator<Item = AnimCommand> + '_ {
		self.entries.drain(..)
	}

	/// Drops every pending command.
	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
