//! The limb interpreter.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
	AkosError, VmError,
	config::{ByteOrder, InterpreterConfig},
	file::{Costume, LimbMode},
};

use super::{
	ActorId, NUM_LIMBS,
	limb::{CostumeState, LimbFrame, LimbState},
	opcode::Instruction,
	queue::{AnimCommand, CommandQueue},
	sink::{QueuedCommand, SideEffectSink, SoundRequest},
};

/// Engine command number forwarded by `CmdQue3` and `CmdQue3Quick`
const CMD_QUE3: u8 = 3;

/// Sound slot implied by `CmdQue3Quick`
const QUICK_SOUND_SLOT: i32 = 2;

/// How the dispatch loop continues after one instruction
enum Flow {
	/// Fall through to the next instruction
	Next,
	/// Continue at an absolute offset
	Goto(usize),
	/// A cel is on display; end the tick
	Display(u16),
	/// End the tick without a new cel; the next tick resumes after the instruction
	Stop,
}

/// Steps limb bytecode.
///
/// The interpreter owns the side-effect sink, the random number generator and the queue of
/// deferred animation commands; limb state lives in each actor's [`CostumeState`].
#[derive(Debug)]
pub struct Interpreter<S: SideEffectSink> {
	config: InterpreterConfig,
	byte_order: ByteOrder,
	sink: S,
	rng: SmallRng,
	queue: CommandQueue,
}

impl<S: SideEffectSink> Interpreter<S> {
	/// Creates an interpreter for titles with the given byte order.
	pub fn new(config: InterpreterConfig, byte_order: ByteOrder, sink: S) -> Self {
		let rng = match config.rng_seed {
			Some(seed) => SmallRng::seed_from_u64(seed),
			None => SmallRng::from_os_rng(),
		};

		Self {
			config,
			byte_order,
			sink,
			rng,
			queue: CommandQueue::new(),
		}
	}

	/// The interpreter limits.
	pub fn config(&self) -> &InterpreterConfig {
		&self.config
	}

	/// Byte order used for operand words.
	pub fn byte_order(&self) -> ByteOrder {
		self.byte_order
	}

	/// The injected sink.
	pub fn sink(&self) -> &S {
		&self.sink
	}

	/// The injected sink, mutably.
	pub fn sink_mut(&mut self) -> &mut S {
		&mut self.sink
	}

	/// Consumes the interpreter and returns the sink.
	pub fn into_sink(self) -> S {
		self.sink
	}

	/// Pending deferred commands.
	pub fn queue(&self) -> &CommandQueue {
		&self.queue
	}

	/// Pending deferred commands, mutably.
	pub fn queue_mut(&mut self) -> &mut CommandQueue {
		&mut self.queue
	}

	/// Applies animation `anim` to a costume state immediately.
	///
	/// # Errors
	///
	/// Returns an error if the animation index or its table entry is invalid.
	pub fn start_animation(&self, costume: &Costume, state: &mut CostumeState, anim: u16) -> Result<bool, AkosError> {
		state.start_animation(costume, anim, self.byte_order)
	}

	/// Steps every running limb of one actor once.
	pub fn animate(&mut self, actor: ActorId, costume: &Costume, state: &mut CostumeState) {
		for limb in 0..NUM_LIMBS {
			self.tick(actor, costume, state, limb);
		}
	}

	/// Steps limb `limb` once and reports what it shows.
	///
	/// A limb resting on a displayed cel first moves past it according to its mode, then executes
	/// instructions until the next cel or `Return`. Faults never escape: a truncated instruction
	/// keeps the last cel, and a limb that exceeds the step budget is frozen.
	pub fn tick(&mut self, actor: ActorId, costume: &Costume, state: &mut CostumeState, limb: usize) -> LimbFrame {
		let sequence = costume.sequence();
		if let Some(mut limb_state) = state.limb(limb).cloned() {
			self.step_limb(actor, limb, sequence, state, &mut limb_state);
			if let Some(slot) = state.limb_mut(limb) {
				*slot = limb_state;
			}
		}
		state.frame(limb)
	}

	fn step_limb(
		&mut self,
		actor: ActorId,
		limb: usize,
		sequence: &[u8],
		state: &mut CostumeState,
		ls: &mut LimbState,
	) {
		let Some(mode) = ls.mode else {
			return;
		};
		if ls.is_frozen() || (ls.paused && mode != LimbMode::AlwaysRun) {
			return;
		}
		// Limb code never reaches past its own sequence.
		let code = &sequence[..ls.end.min(sequence.len())];

		if ls.primed {
			if mode == LimbMode::UserConstant {
				return;
			}
			let width = match Instruction::decode(code, ls.pc, self.byte_order) {
				Ok((_, width)) => width,
				Err(err) => {
					log::warn!("Actor {actor} limb {limb}: {err}");
					ls.fault = Some(err);
					return;
				}
			};
			if mode == LimbMode::Run && ls.pc + width >= ls.end {
				return;
			}
			ls.pc += width;
			ls.primed = false;
		}

		let limit = self.config.step_limit();
		for _ in 0..limit {
			if ls.start >= ls.end {
				return;
			}
			if !(ls.start..ls.end).contains(&ls.pc) {
				if mode != LimbMode::Loop {
					return;
				}
				ls.pc = ls.start;
			}

			let (instruction, width) = match Instruction::decode(code, ls.pc, self.byte_order) {
				Ok(decoded) => decoded,
				Err(err) => {
					log::warn!("Actor {actor} limb {limb}: {err}, keeping last cel");
					ls.fault = Some(err);
					return;
				}
			};
			log::trace!("Actor {actor} limb {limb} @0x{:04X}: {instruction}", ls.pc);

			if ls.skip && instruction != Instruction::ClearFlag {
				ls.skip = false;
				ls.pc += width;
				continue;
			}

			match self.execute(actor, limb, state, ls, instruction) {
				Flow::Next => ls.pc += width,
				Flow::Goto(target) => ls.pc = target,
				Flow::Display(cel) => {
					ls.cel = Some(cel);
					ls.primed = true;
					return;
				}
				Flow::Stop => {
					ls.pc += width;
					return;
				}
			}
		}

		let err = VmError::RunawayLoop {
			limit,
			pc: ls.pc,
		};
		log::warn!("Actor {actor} limb {limb}: {err}");
		ls.fault = Some(err);
	}

	fn execute(
		&mut self,
		actor: ActorId,
		limb: usize,
		state: &mut CostumeState,
		ls: &mut LimbState,
		instruction: Instruction<'_>,
	) -> Flow {
		match instruction {
			Instruction::Cel(cel) => return Flow::Display(cel),
			Instruction::Return => return Flow::Stop,
			Instruction::SetVar {
				var,
				value,
			} => {
				ls.set_var(var, i32::from(value));
			}
			Instruction::AddVar {
				var,
				value,
			} => {
				ls.set_var(var, ls.var(var).wrapping_add(i32::from(value)));
			}
			Instruction::IncVar => {
				ls.set_var(0, ls.var(0).wrapping_add(1));
			}
			Instruction::Jump {
				target,
			} => return Flow::Goto(usize::from(target)),
			Instruction::JumpIfSet {
				target,
				var,
			} => {
				if ls.var(var) != 0 {
					ls.set_var(var, 0);
					return Flow::Goto(usize::from(target));
				}
			}
			Instruction::JumpIf {
				cmp,
				target,
				var,
				value,
			} => {
				if cmp.eval(ls.var(var), i32::from(value)) {
					return Flow::Goto(usize::from(target));
				}
			}
			Instruction::SkipIf {
				cmp,
				var,
				value,
			} => {
				if !cmp.eval(ls.var(var), i32::from(value)) {
					ls.skip = true;
				}
			}
			Instruction::ClearFlag => ls.skip = false,
			Instruction::JumpTable {
				var,
				targets,
			} => {
				let index = ls.var(var);
				let target = usize::try_from(index)
					.ok()
					.and_then(|index| index.checked_sub(1))
					.and_then(|index| targets.get(index));
				if let Some(target) = target {
					return Flow::Goto(usize::from(target));
				}
			}
			Instruction::CmdQue3 {
				slot,
			} => self.sink.dispatch_queued_command(QueuedCommand {
				actor,
				command: CMD_QUE3,
				param1: i32::from(slot),
				param2: 0,
			}),
			Instruction::CmdQue3Quick => self.sink.dispatch_queued_command(QueuedCommand {
				actor,
				command: CMD_QUE3,
				param1: QUICK_SOUND_SLOT,
				param2: 0,
			}),
			Instruction::SoundStuff {
				slot,
				code,
				arg,
			} => self.sink.dispatch_sound(SoundRequest {
				actor,
				slot,
				code,
				arg,
			}),
			Instruction::StartAnim {
				anim,
			} => self.queue.push(AnimCommand::Start {
				actor,
				anim: u16::from(anim),
			}),
			Instruction::StartVarAnim {
				var,
			} => match u16::try_from(ls.var(var)) {
				Ok(anim) => self.queue.push(AnimCommand::Start {
					actor,
					anim,
				}),
				Err(_) => log::warn!("Actor {actor} limb {limb}: animation {} out of range", ls.var(var)),
			},
			Instruction::StartAnimInActor {
				actor_var,
				anim_var,
			} => {
				let target = ActorId::try_from(ls.var(actor_var));
				let anim = u16::try_from(ls.var(anim_var));
				match (target, anim) {
					(Ok(target), Ok(anim)) => self.queue.push(AnimCommand::Start {
						actor: target,
						anim,
					}),
					_ => log::warn!(
						"Actor {actor} limb {limb}: StartAnimInActor({}, {}) dropped",
						ls.var(actor_var),
						ls.var(anim_var)
					),
				}
			}
			Instruction::SetVarInActor {
				actor_var,
				var,
				value,
			} => match ActorId::try_from(ls.var(actor_var)) {
				Ok(target) => self.queue.push(AnimCommand::SetVar {
					actor: target,
					limb,
					var,
					value: i32::from(value),
				}),
				Err(_) => log::warn!(
					"Actor {actor} limb {limb}: SetVarInActor target {} dropped",
					ls.var(actor_var)
				),
			},
			Instruction::Random {
				min,
				max,
				var,
			} => {
				let (low, high) = if min <= max {
					(min, max)
				} else {
					(max, min)
				};
				let value = self.rng.random_range(low..=high);
				ls.set_var(var, i32::from(value));
			}
			Instruction::SetActorClip {
				mode,
			} => state.clip_mode = mode,
			Instruction::HideActor => state.hidden = true,
			Instruction::SetDrawOffs {
				x,
				y,
			} => state.draw_offset = (i32::from(x), i32::from(y)),
			Instruction::Flip {
				value,
			} => {
				if value != 0 {
					state.flipped = !state.flipped;
				}
			}
			Instruction::Ignore {
				..
			} => {}
			Instruction::Unknown(word) => {
				log::warn!("Actor {actor} limb {limb}: unknown opcode 0x{word:04X} treated as no-op");
			}
		}
		Flow::Next
	}
}
