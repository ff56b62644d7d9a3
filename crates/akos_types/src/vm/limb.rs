//! Per-limb and per-costume interpreter state.

use crate::{
	AkosError, VmError,
	config::ByteOrder,
	file::{Costume, LimbCommand, LimbMode},
};

use super::{NUM_LIMBS, NUM_VARS, opcode::Instruction};

/// Execution state of one limb
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LimbState {
	pub(super) mode: Option<LimbMode>,
	pub(super) start: usize,
	pub(super) end: usize,
	pub(super) pc: usize,
	pub(super) vars: [i32; NUM_VARS],
	pub(super) cel: Option<u16>,
	pub(super) primed: bool,
	pub(super) skip: bool,
	pub(super) paused: bool,
	pub(super) fault: Option<VmError>,
}

impl LimbState {
	/// Stepping mode, or `None` for a limb that is not running.
	pub fn mode(&self) -> Option<LimbMode> {
		self.mode
	}

	/// Offset of the next instruction inside `AKSQ`.
	pub fn pc(&self) -> usize {
		self.pc
	}

	/// The sequence bounds as a half-open byte range of `AKSQ`.
	pub fn range(&self) -> std::ops::Range<usize> {
		self.start..self.end
	}

	/// The cel on display, if any.
	pub fn cel(&self) -> Option<u16> {
		self.cel
	}

	/// Returns true while the program counter rests on the displayed cel.
	pub fn is_primed(&self) -> bool {
		self.primed
	}

	/// Returns true while a skip instruction has armed the skip flag.
	pub fn skip_armed(&self) -> bool {
		self.skip
	}

	/// Returns true if an animation paused the limb.
	pub fn is_paused(&self) -> bool {
		self.paused
	}

	/// Returns true once the limb exhausted its step budget; it keeps its last cel from then on.
	pub fn is_frozen(&self) -> bool {
		matches!(self.fault, Some(VmError::RunawayLoop { .. }))
	}

	/// The last interpreter fault, if any.
	pub fn fault(&self) -> Option<&VmError> {
		self.fault.as_ref()
	}

	/// Reads a variable; out-of-range indices read 0.
	pub fn var(&self, index: u8) -> i32 {
		self.vars.get(usize::from(index)).copied().unwrap_or(0)
	}

	/// Writes a variable; out-of-range writes are dropped. Returns true if the write landed.
	pub fn set_var(&mut self, index: u8, value: i32) -> bool {
		match self.vars.get_mut(usize::from(index)) {
			Some(slot) => {
				*slot = value;
				true
			}
			None => {
				log::warn!("Write to variable {index} dropped (limbs have {NUM_VARS})");
				false
			}
		}
	}

	/// All variables.
	pub fn vars(&self) -> &[i32; NUM_VARS] {
		&self.vars
	}

	/// Points the limb at a new sequence and shows its first cel, if it opens with one.
	///
	/// Variables are kept. A frozen limb ignores the request.
	pub(super) fn start(&mut self, mode: LimbMode, start: u16, len: u16, sequence: &[u8], byte_order: ByteOrder) {
		if self.is_frozen() {
			log::debug!("Frozen limb ignores start at 0x{start:04X}");
			return;
		}

		self.mode = Some(mode);
		self.start = usize::from(start);
		self.end = usize::from(start) + usize::from(len);
		self.pc = self.start;
		self.skip = false;
		self.paused = false;
		self.fault = None;

		let opening = Instruction::decode(&sequence[..self.end.min(sequence.len())], self.pc, byte_order);
		match opening {
			Ok((Instruction::Cel(cel), _)) => {
				self.cel = Some(cel);
				self.primed = true;
			}
			_ => {
				self.cel = None;
				self.primed = false;
			}
		}
	}

	pub(super) fn kill(&mut self) {
		self.mode = None;
		self.cel = None;
		self.primed = false;
		self.skip = false;
	}
}

/// What the renderer needs from one limb after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimbFrame {
	/// Cel to draw, if any
	pub cel: Option<u16>,
	/// Mirror flag toggled by `Flip`
	pub mirror: bool,
	/// Draw offset set by `SetDrawOffs`
	pub draw_offset: (i32, i32),
	/// The actor was hidden by `HideActor`
	pub hidden: bool,
}

/// Interpreter state of one costume instance: every limb plus the actor-wide flags the bytecode can
/// change.
///
/// A fresh state is created whenever an actor changes costume.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CostumeState {
	limbs: [LimbState; NUM_LIMBS],
	pub(super) hidden: bool,
	pub(super) flipped: bool,
	pub(super) draw_offset: (i32, i32),
	pub(super) clip_mode: u8,
	pub(super) animation: Option<u16>,
}

impl CostumeState {
	/// Creates an idle state: no limb running, nothing hidden.
	pub fn new() -> Self {
		Self::default()
	}

	/// One limb's state.
	pub fn limb(&self, limb: usize) -> Option<&LimbState> {
		self.limbs.get(limb)
	}

	/// One limb's state, mutably.
	pub fn limb_mut(&mut self, limb: usize) -> Option<&mut LimbState> {
		self.limbs.get_mut(limb)
	}

	/// All limbs in index order.
	pub fn limbs(&self) -> &[LimbState; NUM_LIMBS] {
		&self.limbs
	}

	/// Returns true once `HideActor` ran.
	pub fn is_hidden(&self) -> bool {
		self.hidden
	}

	/// Shows or hides the actor.
	pub fn set_hidden(&mut self, hidden: bool) {
		self.hidden = hidden;
	}

	/// Mirror flag toggled by `Flip`.
	pub fn is_flipped(&self) -> bool {
		self.flipped
	}

	/// Draw offset set by `SetDrawOffs`.
	pub fn draw_offset(&self) -> (i32, i32) {
		self.draw_offset
	}

	/// Z-plane selector set by `SetActorClip` (0 = none).
	pub fn clip_mode(&self) -> u8 {
		self.clip_mode
	}

	/// The most recently started animation.
	pub fn animation(&self) -> Option<u16> {
		self.animation
	}

	/// What limb `limb` currently shows.
	pub fn frame(&self, limb: usize) -> LimbFrame {
		LimbFrame {
			cel: self.limbs.get(limb).and_then(|state| state.cel),
			mirror: self.flipped,
			draw_offset: self.draw_offset,
			hidden: self.hidden,
		}
	}

	/// Applies animation `anim` of `costume` to the limbs it names.
	///
	/// Returns `Ok(false)` if the costume declares the animation but leaves it empty.
	///
	/// # Errors
	///
	/// Returns an error if the animation index or its table entry is invalid.
	pub fn start_animation(&mut self, costume: &Costume, anim: u16, byte_order: ByteOrder) -> Result<bool, AkosError> {
		let Some(animation) = costume.animation(anim)? else {
			log::debug!("Animation {anim} is empty");
			return Ok(false);
		};

		let sequence = costume.sequence();
		for (limb, command) in animation.limbs {
			let Some(state) = self.limbs.get_mut(limb) else {
				continue;
			};
			match command {
				LimbCommand::Kill => state.kill(),
				LimbCommand::Pause => state.paused = true,
				LimbCommand::Resume => state.paused = false,
				LimbCommand::Start {
					mode,
					start,
					len,
				} => state.start(mode, start, len, sequence, byte_order),
			}
		}
		self.animation = Some(anim);
		log::trace!("Started animation {anim}");
		Ok(true)
	}
}
