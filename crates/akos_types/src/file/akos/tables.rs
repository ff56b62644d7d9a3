//! Records of the offset, cel-info and animation tables.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::AkosError;

use super::constants;

/// One `AKOF` entry: where a cel's pixels and metadata live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
	/// Offset of the compressed pixels inside `AKCD`
	pub cel_data: u32,
	/// Offset of the [`CelInfo`] record inside `AKCI`
	pub cel_info: u16,
}

impl Offset {
	pub(super) fn from_bytes(bytes: &[u8; constants::OFFSET_ENTRY_SIZE]) -> Self {
		Self {
			cel_data: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
			cel_info: u16::from_le_bytes([bytes[4], bytes[5]]),
		}
	}

	pub(super) fn to_bytes(self) -> [u8; constants::OFFSET_ENTRY_SIZE] {
		let mut bytes = [0u8; constants::OFFSET_ENTRY_SIZE];
		bytes[0..4].copy_from_slice(&self.cel_data.to_le_bytes());
		bytes[4..6].copy_from_slice(&self.cel_info.to_le_bytes());
		bytes
	}
}

impl Display for Offset {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "data=0x{:08X} info=0x{:04X}", self.cel_data, self.cel_info)
	}
}

/// Geometry of one cel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CelInfo {
	/// Width in pixels
	pub width: u16,
	/// Height in pixels
	pub height: u16,
	/// Horizontal offset of the top-left corner from the anchor
	pub rel_x: i16,
	/// Vertical offset of the top-left corner from the anchor
	pub rel_y: i16,
	/// Horizontal anchor shift applied to the limbs drawn after this one
	pub move_x: i16,
	/// Vertical anchor shift applied to the limbs drawn after this one
	pub move_y: i16,
}

impl CelInfo {
	/// Creates an unplaced cel of the given size.
	pub fn new(width: u16, height: u16) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}

	/// Parses a 12-byte `AKCI` record.
	pub fn from_bytes(bytes: &[u8; constants::CEL_INFO_SIZE]) -> Self {
		let word = |at: usize| [bytes[at], bytes[at + 1]];
		Self {
			width: u16::from_le_bytes(word(0)),
			height: u16::from_le_bytes(word(2)),
			rel_x: i16::from_le_bytes(word(4)),
			rel_y: i16::from_le_bytes(word(6)),
			move_x: i16::from_le_bytes(word(8)),
			move_y: i16::from_le_bytes(word(10)),
		}
	}

	/// Serializes the record.
	pub fn to_bytes(&self) -> [u8; constants::CEL_INFO_SIZE] {
		let mut bytes = [0u8; constants::CEL_INFO_SIZE];
		bytes[0..2].copy_from_slice(&self.width.to_le_bytes());
		bytes[2..4].copy_from_slice(&self.height.to_le_bytes());
		bytes[4..6].copy_from_slice(&self.rel_x.to_le_bytes());
		bytes[6..8].copy_from_slice(&self.rel_y.to_le_bytes());
		bytes[8..10].copy_from_slice(&self.move_x.to_le_bytes());
		bytes[10..12].copy_from_slice(&self.move_y.to_le_bytes());
		bytes
	}

	/// Number of pixels at 1:1.
	pub fn pixel_count(&self) -> usize {
		usize::from(self.width) * usize::from(self.height)
	}
}

impl Display for CelInfo {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}x{} rel=({},{}) move=({},{})",
			self.width, self.height, self.rel_x, self.rel_y, self.move_x, self.move_y
		)
	}
}

/// How a started limb walks its sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimbMode {
	/// Wraps back to the start after the last instruction (code 2)
	Loop,
	/// Plays once and holds the last instruction (code 3)
	Run,
	/// Script that runs every tick, even while paused (code 6)
	AlwaysRun,
	/// Holds the first cel (code 7)
	UserConstant,
	/// Script that steps freely (code 8)
	Delta,
}

impl LimbMode {
	fn from_code(code: u8) -> Option<Self> {
		match code {
			2 => Some(Self::Loop),
			3 => Some(Self::Run),
			6 => Some(Self::AlwaysRun),
			7 => Some(Self::UserConstant),
			8 => Some(Self::Delta),
			_ => None,
		}
	}

	fn code(self) -> u8 {
		match self {
			Self::Loop => 2,
			Self::Run => 3,
			Self::AlwaysRun => 6,
			Self::UserConstant => 7,
			Self::Delta => 8,
		}
	}

	/// Returns true for modes that run as scripts rather than cel sequences.
	pub fn is_script(self) -> bool {
		matches!(self, Self::AlwaysRun | Self::Delta)
	}
}

/// What an animation does to one limb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimbCommand {
	/// Stop the limb and stop drawing it
	Kill,
	/// Freeze the limb on its current cel
	Pause,
	/// Unfreeze a paused limb
	Resume,
	/// Run `len` bytes of `AKSQ` starting at `start`
	Start {
		/// Stepping mode
		mode: LimbMode,
		/// First byte of the sequence inside `AKSQ`
		start: u16,
		/// Length of the sequence in bytes
		len: u16,
	},
}

impl LimbCommand {
	/// Raw `AKCH` code.
	pub fn code(&self) -> u8 {
		match self {
			Self::Kill => 1,
			Self::Pause => 4,
			Self::Resume => 5,
			Self::Start {
				mode,
				..
			} => mode.code(),
		}
	}
}

impl Display for LimbCommand {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Kill => write!(f, "kill"),
			Self::Pause => write!(f, "pause"),
			Self::Resume => write!(f, "resume"),
			Self::Start {
				mode,
				start,
				len,
			} => write!(f, "{mode:?} 0x{start:04X}+{len}"),
		}
	}
}

/// A decoded `AKCH` entry: the commands an animation issues to its limbs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Animation {
	/// `(limb, command)` pairs in ascending limb order
	pub limbs: Vec<(usize, LimbCommand)>,
}

impl Animation {
	/// Parses the entry of animation `anim` found at the start of `data`.
	///
	/// Sequence ranges are checked against `sequence_len`.
	pub(super) fn parse(anim: u16, data: &[u8], sequence_len: usize) -> Result<Self, AkosError> {
		let truncated = || AkosError::TruncatedAnimation {
			anim,
		};
		let word = |at: usize| data.get(at..at + 2).map(|w| u16::from_le_bytes([w[0], w[1]]));

		let mask = word(0).ok_or_else(truncated)?;
		let mut pos = 2;
		let mut limbs = Vec::with_capacity(mask.count_ones() as usize);

		for limb in 0..constants::MAX_LIMBS {
			if mask & (0x8000 >> limb) == 0 {
				continue;
			}
			let code = *data.get(pos).ok_or_else(truncated)?;
			pos += 1;

			let command = match code {
				1 => LimbCommand::Kill,
				4 => LimbCommand::Pause,
				5 => LimbCommand::Resume,
				_ => {
					let mode = LimbMode::from_code(code).ok_or(AkosError::InvalidLimbCommand {
						anim,
						limb,
						code,
					})?;
					let start = word(pos).ok_or_else(truncated)?;
					let len = word(pos + 2).ok_or_else(truncated)?;
					pos += 4;
					if usize::from(start) + usize::from(len) > sequence_len {
						return Err(AkosError::SequenceOutOfRange {
							start,
							len,
							size: sequence_len,
						});
					}
					LimbCommand::Start {
						mode,
						start,
						len,
					}
				}
			};
			limbs.push((limb, command));
		}

		Ok(Self {
			limbs,
		})
	}

	/// Serializes the entry.
	pub(super) fn to_bytes(&self) -> Vec<u8> {
		let mut sorted: Vec<_> =
			self.limbs.iter().copied().filter(|(limb, _)| *limb < constants::MAX_LIMBS).collect();
		sorted.sort_by_key(|(limb, _)| *limb);
		sorted.dedup_by_key(|(limb, _)| *limb);

		let mask = sorted.iter().fold(0u16, |mask, (limb, _)| mask | (0x8000 >> limb));
		let mut bytes = mask.to_le_bytes().to_vec();
		for (_, command) in sorted {
			bytes.push(command.code());
			if let LimbCommand::Start {
				start,
				len,
				..
			} = command
			{
				bytes.extend_from_slice(&start.to_le_bytes());
				bytes.extend_from_slice(&len.to_le_bytes());
			}
		}
		bytes
	}
}
