//! The limb instruction set: opcode table, instruction decoder and disassembler.
//!
//! # Wire format
//!
//! A byte below `0x80` is a one-byte cel index. A byte of `0x80` or above starts a two-byte
//! instruction word whose high byte comes first. Words with a high byte of `0xC0` are opcodes; any
//! other word is a cel index in its low twelve bits. Operand words follow the title byte order.
//!
//! | Code | Name             | Operands (byte offset from the opcode)               | Width       |
//! |------|------------------|------------------------------------------------------|-------------|
//! | C001 | Return           |                                                      | 2           |
//! | C010 | SetVar           | value W2, var B4                                     | 5           |
//! | C015 | CmdQue3          | slot B2                                              | 3           |
//! | C030 | Jump             | target U2                                            | 4           |
//! | C031 | JumpIfSet        | target U2, var B4                                    | 5           |
//! | C040 | AddVar           | value W2, var B4                                     | 5           |
//! | C050 | Ignore           | B2                                                   | 3           |
//! | C060 | IncVar           |                                                      | 2           |
//! | C061 | CmdQue3Quick     |                                                      | 2           |
//! | C070 | JumpE .. JumpGE  | target U2, var B4, value W5                          | 7           |
//! | C080 | StartAnim        | anim B2                                              | 3           |
//! | C081 | StartVarAnim     | var B2                                               | 3           |
//! | C082 | Random           | min W2, max W4, var B6                               | 7           |
//! | C083 | SetActorClip     | mode B2                                              | 3           |
//! | C084 | StartAnimInActor | actor var B2, anim var B3                            | 4           |
//! | C085 | SetVarInActor    | actor var B2, var B3, value W4                       | 6           |
//! | C086 | HideActor        |                                                      | 2           |
//! | C087 | SetDrawOffs      | x W2, y W4                                           | 6           |
//! | C088 | JumpTable        | var B2, count B3, `count` targets U4..               | 4 + 2 count |
//! | C089 | SoundStuff       | slot B2, code B4, arg B6                             | 8           |
//! | C08A | Flip             | W2                                                   | 4           |
//! | C08C | Ignore3          | B2                                                   | 3           |
//! | C08D | Ignore2          | W2                                                   | 4           |
//! | C090 | SkipE .. SkipGE  | value W2, var B4                                     | 5           |
//! | C09F | ClearFlag        |                                                      | 2           |

use std::fmt::Display;

use crate::{VmError, config::ByteOrder};

/// High byte shared by every opcode word
pub const OPCODE_MARKER: u8 = 0xC0;

/// Bits of a two-byte cel word that hold the cel index
pub const CEL_WORD_MASK: u16 = 0x0FFF;

/// Opcode words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[allow(missing_docs)]
pub enum Opcode {
	Return = 0xC001,
	SetVar = 0xC010,
	CmdQue3 = 0xC015,
	Jump = 0xC030,
	JumpIfSet = 0xC031,
	AddVar = 0xC040,
	Ignore = 0xC050,
	IncVar = 0xC060,
	CmdQue3Quick = 0xC061,
	JumpE = 0xC070,
	JumpNE = 0xC071,
	JumpL = 0xC072,
	JumpLE = 0xC073,
	JumpG = 0xC074,
	JumpGE = 0xC075,
	StartAnim = 0xC080,
	StartVarAnim = 0xC081,
	Random = 0xC082,
	SetActorClip = 0xC083,
	StartAnimInActor = 0xC084,
	SetVarInActor = 0xC085,
	HideActor = 0xC086,
	SetDrawOffs = 0xC087,
	JumpTable = 0xC088,
	SoundStuff = 0xC089,
	Flip = 0xC08A,
	Ignore3 = 0xC08C,
	Ignore2 = 0xC08D,
	SkipE = 0xC090,
	SkipNE = 0xC091,
	SkipL = 0xC092,
	SkipLE = 0xC093,
	SkipG = 0xC094,
	SkipGE = 0xC095,
	ClearFlag = 0xC09F,
}

impl Opcode {
	/// Every opcode, in table order.
	pub const ALL: [Opcode; 35] = [
		Self::Return,
		Self::SetVar,
		Self::CmdQue3,
		Self::Jump,
		Self::JumpIfSet,
		Self::AddVar,
		Self::Ignore,
		Self::IncVar,
		Self::CmdQue3Quick,
		Self::JumpE,
		Self::JumpNE,
		Self::JumpL,
		Self::JumpLE,
		Self::JumpG,
		Self::JumpGE,
		Self::StartAnim,
		Self::StartVarAnim,
		Self::Random,
		Self::SetActorClip,
		Self::StartAnimInActor,
		Self::SetVarInActor,
		Self::HideActor,
		Self::SetDrawOffs,
		Self::JumpTable,
		Self::SoundStuff,
		Self::Flip,
		Self::Ignore3,
		Self::Ignore2,
		Self::SkipE,
		Self::SkipNE,
		Self::SkipL,
		Self::SkipLE,
		Self::SkipG,
		Self::SkipGE,
		Self::ClearFlag,
	];

	/// Looks up an opcode word.
	pub fn from_u16(word: u16) -> Option<Self> {
		Self::ALL.iter().copied().find(|op| *op as u16 == word)
	}

	/// The opcode word.
	pub fn to_u16(self) -> u16 {
		self as u16
	}

	/// Encoded width in bytes. For [`Opcode::JumpTable`] this is the width of the fixed part.
	pub fn width(self) -> usize {
		match self {
			Self::Return
			| Self::IncVar
			| Self::CmdQue3Quick
			| Self::HideActor
			| Self::ClearFlag => 2,
			Self::CmdQue3
			| Self::Ignore
			| Self::Ignore3
			| Self::StartAnim
			| Self::StartVarAnim
			| Self::SetActorClip => 3,
			Self::Jump | Self::StartAnimInActor | Self::Flip | Self::Ignore2 | Self::JumpTable => 4,
			Self::SetVar
			| Self::JumpIfSet
			| Self::AddVar
			| Self::SkipE
			| Self::SkipNE
			| Self::SkipL
			| Self::SkipLE
			| Self::SkipG
			| Self::SkipGE => 5,
			Self::SetVarInActor | Self::SetDrawOffs => 6,
			Self::JumpE
			| Self::JumpNE
			| Self::JumpL
			| Self::JumpLE
			| Self::JumpG
			| Self::JumpGE
			| Self::Random => 7,
			Self::SoundStuff => 8,
		}
	}

	/// Relational operator of the jump and skip families.
	fn comparison(self) -> Option<Comparison> {
		Some(match self {
			Self::JumpE | Self::SkipE => Comparison::Equal,
			Self::JumpNE | Self::SkipNE => Comparison::NotEqual,
			Self::JumpL | Self::SkipL => Comparison::Less,
			Self::JumpLE | Self::SkipLE => Comparison::LessEqual,
			Self::JumpG | Self::SkipG => Comparison::Greater,
			Self::JumpGE | Self::SkipGE => Comparison::GreaterEqual,
			_ => return None,
		})
	}
}

/// Relational operator of a conditional jump or skip: `var <op> value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
	/// `==`
	Equal,
	/// `!=`
	NotEqual,
	/// `<`
	Less,
	/// `<=`
	LessEqual,
	/// `>`
	Greater,
	/// `>=`
	GreaterEqual,
}

impl Comparison {
	/// Evaluates `lhs <op> rhs`.
	pub fn eval(self, lhs: i32, rhs: i32) -> bool {
		match self {
			Self::Equal => lhs == rhs,
			Self::NotEqual => lhs != rhs,
			Self::Less => lhs < rhs,
			Self::LessEqual => lhs <= rhs,
			Self::Greater => lhs > rhs,
			Self::GreaterEqual => lhs >= rhs,
		}
	}

	fn jump_opcode(self) -> Opcode {
		match self {
			Self::Equal => Opcode::JumpE,
			Self::NotEqual => Opcode::JumpNE,
			Self::Less => Opcode::JumpL,
			Self::LessEqual => Opcode::JumpLE,
			Self::Greater => Opcode::JumpG,
			Self::GreaterEqual => Opcode::JumpGE,
		}
	}

	fn skip_opcode(self) -> Opcode {
		match self {
			Self::Equal => Opcode::SkipE,
			Self::NotEqual => Opcode::SkipNE,
			Self::Less => Opcode::SkipL,
			Self::LessEqual => Opcode::SkipLE,
			Self::Greater => Opcode::SkipG,
			Self::GreaterEqual => Opcode::SkipGE,
		}
	}

	fn suffix(self) -> &'static str {
		match self {
			Self::Equal => "E",
			Self::NotEqual => "NE",
			Self::Less => "L",
			Self::LessEqual => "LE",
			Self::Greater => "G",
			Self::GreaterEqual => "GE",
		}
	}

	fn symbol(self) -> &'static str {
		match self {
			Self::Equal => "==",
			Self::NotEqual => "!=",
			Self::Less => "<",
			Self::LessEqual => "<=",
			Self::Greater => ">",
			Self::GreaterEqual => ">=",
		}
	}
}

/// Inline target list of a jump table, borrowed from the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpTargets<'s> {
	raw: &'s [u8],
	byte_order: ByteOrder,
}

impl<'s> JumpTargets<'s> {
	/// Wraps raw target words laid out in `byte_order`.
	pub fn new(raw: &'s [u8], byte_order: ByteOrder) -> Self {
		Self {
			raw,
			byte_order,
		}
	}

	/// Number of targets.
	pub fn len(&self) -> usize {
		self.raw.len() / 2
	}

	/// Returns true for an empty table.
	pub fn is_empty(&self) -> bool {
		self.raw.is_empty()
	}

	/// Target `index` (zero-based).
	pub fn get(&self, index: usize) -> Option<u16> {
		self.byte_order.read_u16(self.raw, index.checked_mul(2)?)
	}

	/// Iterates over the targets.
	pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
		(0..self.len()).filter_map(|index| self.get(index))
	}
}

/// One decoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'s> {
	/// Display a cel and end the tick
	Cel(u16),
	/// End the tick
	Return,
	/// `var = value`
	SetVar {
		/// Variable index
		var: u8,
		/// Value
		value: i16,
	},
	/// Forward command 3 to the engine
	CmdQue3 {
		/// Sound slot
		slot: u8,
	},
	/// Unconditional jump
	Jump {
		/// Absolute offset inside `AKSQ`
		target: u16,
	},
	/// Jump if `var` is non-zero, clearing it
	JumpIfSet {
		/// Absolute offset inside `AKSQ`
		target: u16,
		/// Variable index
		var: u8,
	},
	/// `var += value`
	AddVar {
		/// Variable index
		var: u8,
		/// Addend
		value: i16,
	},
	/// `var[0] += 1`
	IncVar,
	/// Forward command 3 for the default sound slot
	CmdQue3Quick,
	/// Jump if `var <cmp> value`
	JumpIf {
		/// Operator
		cmp: Comparison,
		/// Absolute offset inside `AKSQ`
		target: u16,
		/// Variable index
		var: u8,
		/// Right-hand side
		value: i16,
	},
	/// Queue a start of animation `anim` on this actor
	StartAnim {
		/// Animation index
		anim: u8,
	},
	/// Queue a start of the animation held in `var`
	StartVarAnim {
		/// Variable index
		var: u8,
	},
	/// `var = random(min..=max)`
	Random {
		/// Lower bound
		min: i16,
		/// Upper bound
		max: i16,
		/// Variable index
		var: u8,
	},
	/// Select the z-plane mask of the actor
	SetActorClip {
		/// 0 for none, n for z-plane n - 1
		mode: u8,
	},
	/// Queue an animation start on another actor
	StartAnimInActor {
		/// Variable holding the target actor id
		actor_var: u8,
		/// Variable holding the animation index
		anim_var: u8,
	},
	/// Queue a variable write into another actor
	SetVarInActor {
		/// Variable holding the target actor id
		actor_var: u8,
		/// Variable index in the target limb
		var: u8,
		/// Value
		value: i16,
	},
	/// Hide the actor
	HideActor,
	/// Set the draw offset of the actor
	SetDrawOffs {
		/// Horizontal offset
		x: i16,
		/// Vertical offset
		y: i16,
	},
	/// Multi-way jump on the 1-based index in `var`
	JumpTable {
		/// Variable index
		var: u8,
		/// Inline targets
		targets: JumpTargets<'s>,
	},
	/// Forward a sound request to the engine
	SoundStuff {
		/// Sound slot
		slot: u8,
		/// Request code
		code: u8,
		/// Argument
		arg: u8,
	},
	/// Toggle the mirror flag when `value` is non-zero
	Flip {
		/// Toggle flag
		value: i16,
	},
	/// Skip the next instruction unless `var <cmp> value`
	SkipIf {
		/// Operator
		cmp: Comparison,
		/// Variable index
		var: u8,
		/// Right-hand side
		value: i16,
	},
	/// Disarm a pending skip
	ClearFlag,
	/// `Ignore`, `Ignore2` or `Ignore3`: operands consumed, no effect
	Ignore {
		/// Which of the three
		opcode: Opcode,
		/// Raw operand
		operand: i16,
	},
	/// An opcode word missing from the table
	Unknown(u16),
}

impl<'s> Instruction<'s> {
	/// Decodes the instruction at `pc` and returns it with its encoded width.
	///
	/// # Errors
	///
	/// Returns [`VmError::Truncated`] if `pc` lies outside the stream or the instruction's operands
	/// run past its end.
	pub fn decode(stream: &'s [u8], pc: usize, byte_order: ByteOrder) -> Result<(Self, usize), VmError> {
		let truncated = VmError::Truncated {
			pc,
		};
		let lead = *stream.get(pc).ok_or(truncated.clone())?;
		if lead < 0x80 {
			return Ok((Self::Cel(u16::from(lead)), 1));
		}

		let low = *stream.get(pc + 1).ok_or(truncated.clone())?;
		let word = u16::from_be_bytes([lead, low]);
		if lead != OPCODE_MARKER {
			return Ok((Self::Cel(word & CEL_WORD_MASK), 2));
		}
		let Some(opcode) = Opcode::from_u16(word) else {
			return Ok((Self::Unknown(word), 2));
		};

		let mut width = opcode.width();
		if stream.len() < pc + width {
			return Err(truncated);
		}
		let b = |at: usize| stream[pc + at];
		let w = |at: usize| byte_order.read_i16(stream, pc + at).unwrap_or_default();
		let u = |at: usize| byte_order.read_u16(stream, pc + at).unwrap_or_default();

		let instruction = match opcode {
			Opcode::Return => Self::Return,
			Opcode::SetVar => Self::SetVar {
				value: w(2),
				var: b(4),
			},
			Opcode::CmdQue3 => Self::CmdQue3 {
				slot: b(2),
			},
			Opcode::Jump => Self::Jump {
				target: u(2),
			},
			Opcode::JumpIfSet => Self::JumpIfSet {
				target: u(2),
				var: b(4),
			},
			Opcode::AddVar => Self::AddVar {
				value: w(2),
				var: b(4),
			},
			Opcode::IncVar => Self::IncVar,
			Opcode::CmdQue3Quick => Self::CmdQue3Quick,
			Opcode::JumpE
			| Opcode::JumpNE
			| Opcode::JumpL
			| Opcode::JumpLE
			| Opcode::JumpG
			| Opcode::JumpGE => Self::JumpIf {
				cmp: opcode.comparison().ok_or(truncated)?,
				target: u(2),
				var: b(4),
				value: w(5),
			},
			Opcode::StartAnim => Self::StartAnim {
				anim: b(2),
			},
			Opcode::StartVarAnim => Self::StartVarAnim {
				var: b(2),
			},
			Opcode::Random => Self::Random {
				min: w(2),
				max: w(4),
				var: b(6),
			},
			Opcode::SetActorClip => Self::SetActorClip {
				mode: b(2),
			},
			Opcode::StartAnimInActor => Self::StartAnimInActor {
				actor_var: b(2),
				anim_var: b(3),
			},
			Opcode::SetVarInActor => Self::SetVarInActor {
				actor_var: b(2),
				var: b(3),
				value: w(4),
			},
			Opcode::HideActor => Self::HideActor,
			Opcode::SetDrawOffs => Self::SetDrawOffs {
				x: w(2),
				y: w(4),
			},
			Opcode::JumpTable => {
				let count = usize::from(b(3));
				width += count * 2;
				let raw = stream.get(pc + 4..pc + width).ok_or(truncated)?;
				Self::JumpTable {
					var: b(2),
					targets: JumpTargets {
						raw,
						byte_order,
					},
				}
			}
			Opcode::SoundStuff => Self::SoundStuff {
				slot: b(2),
				code: b(4),
				arg: b(6),
			},
			Opcode::Flip => Self::Flip {
				value: w(2),
			},
			Opcode::SkipE
			| Opcode::SkipNE
			| Opcode::SkipL
			| Opcode::SkipLE
			| Opcode::SkipG
			| Opcode::SkipGE => Self::SkipIf {
				cmp: opcode.comparison().ok_or(truncated)?,
				value: w(2),
				var: b(4),
			},
			Opcode::ClearFlag => Self::ClearFlag,
			Opcode::Ignore | Opcode::Ignore3 => Self::Ignore {
				opcode,
				operand: i16::from(b(2)),
			},
			Opcode::Ignore2 => Self::Ignore {
				opcode,
				operand: w(2),
			},
		};

		Ok((instruction, width))
	}

	/// Returns true for instructions that end a tick with a cel on display.
	pub fn is_cel(&self) -> bool {
		matches!(self, Self::Cel(_))
	}

	/// Appends the encoded instruction to `out`.
	///
	/// Cels below `0x80` take one byte; larger cels are written as `0x8000 | cel`.
	///
	/// # Errors
	///
	/// Returns [`VmError::OperandOutOfRange`] for cels past `0x0FFF` and jump tables with more
	/// than 255 targets. Nothing is written in that case.
	pub fn encode(&self, byte_order: ByteOrder, out: &mut Vec<u8>) -> Result<(), VmError> {
		let op = |out: &mut Vec<u8>, opcode: Opcode| out.extend_from_slice(&opcode.to_u16().to_be_bytes());
		let word = |out: &mut Vec<u8>, value: u16| out.extend_from_slice(&byte_order.u16_bytes(value));

		match *self {
			Self::Cel(cel) if cel > CEL_WORD_MASK => {
				return Err(VmError::OperandOutOfRange {
					what: "cel",
					value: usize::from(cel),
					max: usize::from(CEL_WORD_MASK),
				});
			}
			Self::Cel(cel) if cel < 0x80 => out.push(cel as u8),
			Self::Cel(cel) => out.extend_from_slice(&(0x8000 | cel).to_be_bytes()),
			Self::Return => op(out, Opcode::Return),
			Self::SetVar {
				var,
				value,
			} => {
				op(out, Opcode::SetVar);
				word(out, value as u16);
				out.push(var);
			}
			Self::CmdQue3 {
				slot,
			} => {
				op(out, Opcode::CmdQue3);
				out.push(slot);
			}
			Self::Jump {
				target,
			} => {
				op(out, Opcode::Jump);
				word(out, target);
			}
			Self::JumpIfSet {
				target,
				var,
			} => {
				op(out, Opcode::JumpIfSet);
				word(out, target);
				out.push(var);
			}
			Self::AddVar {
				var,
				value,
			} => {
				op(out, Opcode::AddVar);
				word(out, value as u16);
				out.push(var);
			}
			Self::IncVar => op(out, Opcode::IncVar),
			Self::CmdQue3Quick => op(out, Opcode::CmdQue3Quick),
			Self::JumpIf {
				cmp,
				target,
				var,
				value,
			} => {
				op(out, cmp.jump_opcode());
				word(out, target);
				out.push(var);
				word(out, value as u16);
			}
			Self::StartAnim {
				anim,
			} => {
				op(out, Opcode::StartAnim);
				out.push(anim);
			}
			Self::StartVarAnim {
				var,
			} => {
				op(out, Opcode::StartVarAnim);
				out.push(var);
			}
			Self::Random {
				min,
				max,
				var,
			} => {
				op(out, Opcode::Random);
				word(out, min as u16);
				word(out, max as u16);
				out.push(var);
			}
			Self::SetActorClip {
				mode,
			} => {
				op(out, Opcode::SetActorClip);
				out.push(mode);
			}
			Self::StartAnimInActor {
				actor_var,
				anim_var,
			} => {
				op(out, Opcode::StartAnimInActor);
				out.extend_from_slice(&[actor_var, anim_var]);
			}
			Self::SetVarInActor {
				actor_var,
				var,
				value,
			} => {
				op(out, Opcode::SetVarInActor);
				out.extend_from_slice(&[actor_var, var]);
				word(out, value as u16);
			}
			Self::HideActor => op(out, Opcode::HideActor),
			Self::SetDrawOffs {
				x,
				y,
			} => {
				op(out, Opcode::SetDrawOffs);
				word(out, x as u16);
				word(out, y as u16);
			}
			Self::JumpTable {
				var,
				targets,
			} => {
				let count = u8::try_from(targets.len()).map_err(|_| VmError::OperandOutOfRange {
					what: "jump table size",
					value: targets.len(),
					max: usize::from(u8::MAX),
				})?;
				op(out, Opcode::JumpTable);
				out.extend_from_slice(&[var, count]);
				for target in targets.iter() {
					word(out, target);
				}
			}
			Self::SoundStuff {
				slot,
				code,
				arg,
			} => {
				op(out, Opcode::SoundStuff);
				out.extend_from_slice(&[slot, 0, code, 0, arg, 0]);
			}
			Self::Flip {
				value,
			} => {
				op(out, Opcode::Flip);
				word(out, value as u16);
			}
			Self::SkipIf {
				cmp,
				var,
				value,
			} => {
				op(out, cmp.skip_opcode());
				word(out, value as u16);
				out.push(var);
			}
			Self::ClearFlag => op(out, Opcode::ClearFlag),
			Self::Ignore {
				opcode: Opcode::Ignore2,
				operand,
			} => {
				op(out, Opcode::Ignore2);
				word(out, operand as u16);
			}
			Self::Ignore {
				opcode,
				operand,
			} => {
				op(out, opcode);
				out.push(operand as u8);
			}
			Self::Unknown(raw) => out.extend_from_slice(&raw.to_be_bytes()),
		}
		Ok(())
	}
}

/// Assembles a list of instructions into bytecode.
///
/// # Errors
///
/// Returns the first [`Instruction::encode`] error.
pub fn assemble(instructions: &[Instruction<'_>], byte_order: ByteOrder) -> Result<Vec<u8>, VmError> {
	let mut out = Vec::new();
	for instruction in instructions {
		instruction.encode(byte_order, &mut out)?;
	}
	Ok(out)
}

impl Display for Instruction<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Cel(cel) => write!(f, "Cel {cel}"),
			Self::Return => write!(f, "Return"),
			Self::SetVar {
				var,
				value,
			} => write!(f, "SetVar var[{var}] = {value}"),
			Self::CmdQue3 {
				slot,
			} => write!(f, "CmdQue3 {slot}"),
			Self::Jump {
				target,
			} => write!(f, "Jump 0x{target:04X}"),
			Self::JumpIfSet {
				target,
				var,
			} => write!(f, "JumpIfSet 0x{target:04X} if var[{var}]"),
			Self::AddVar {
				var,
				value,
			} => write!(f, "AddVar var[{var}] += {value}"),
			Self::IncVar => write!(f, "IncVar var[0]"),
			Self::CmdQue3Quick => write!(f, "CmdQue3Quick"),
			Self::JumpIf {
				cmp,
				target,
				var,
				value,
			} => write!(f, "Jump{} 0x{target:04X} if var[{var}] {} {value}", cmp.suffix(), cmp.symbol()),
			Self::StartAnim {
				anim,
			} => write!(f, "StartAnim {anim}"),
			Self::StartVarAnim {
				var,
			} => write!(f, "StartVarAnim var[{var}]"),
			Self::Random {
				min,
				max,
				var,
			} => write!(f, "Random var[{var}] = {min}..={max}"),
			Self::SetActorClip {
				mode,
			} => write!(f, "SetActorClip {mode}"),
			Self::StartAnimInActor {
				actor_var,
				anim_var,
			} => write!(f, "StartAnimInActor actor var[{actor_var}] anim var[{anim_var}]"),
			Self::SetVarInActor {
				actor_var,
				var,
				value,
			} => write!(f, "SetVarInActor actor var[{actor_var}] var[{var}] = {value}"),
			Self::HideActor => write!(f, "HideActor"),
			Self::SetDrawOffs {
				x,
				y,
			} => write!(f, "SetDrawOffs ({x}, {y})"),
			Self::JumpTable {
				var,
				targets,
			} => {
				write!(f, "JumpTable var[{var}] [")?;
				for (index, target) in targets.iter().enumerate() {
					if index > 0 {
						write!(f, ", ")?;
					}
					write!(f, "0x{target:04X}")?;
				}
				write!(f, "]")
			}
			Self::SoundStuff {
				slot,
				code,
				arg,
			} => write!(f, "SoundStuff slot {slot} code {code} arg {arg}"),
			Self::Flip {
				value,
			} => write!(f, "Flip {value}"),
			Self::SkipIf {
				cmp,
				var,
				value,
			} => write!(f, "Skip{} unless var[{var}] {} {value}", cmp.suffix(), cmp.symbol()),
			Self::ClearFlag => write!(f, "ClearFlag"),
			Self::Ignore {
				opcode,
				operand,
			} => write!(f, "{opcode:?} {operand}"),
			Self::Unknown(word) => write!(f, "Unknown 0x{word:04X}"),
		}
	}
}

/// Linear listing of a bytecode stream.
///
/// Yields `(offset, instruction)` pairs and stops after the first truncated instruction.
#[derive(Debug, Clone)]
pub struct Disassembly<'s> {
	stream: &'s [u8],
	pc: usize,
	byte_order: ByteOrder,
	done: bool,
}

impl<'s> Iterator for Disassembly<'s> {
	type Item = (usize, Result<Instruction<'s>, VmError>);

	fn next(&mut self) -> Option<Self::Item> {
		if self.done || self.pc >= self.stream.len() {
			return None;
		}
		let pc = self.pc;
		match Instruction::decode(self.stream, pc, self.byte_order) {
			Ok((instruction, width)) => {
				self.pc += width;
				Some((pc, Ok(instruction)))
			}
			Err(err) => {
				self.done = true;
				Some((pc, Err(err)))
			}
		}
	}
}

/// Lists every instruction of `stream` in order.
pub fn disassemble(stream: &[u8], byte_order: ByteOrder) -> Disassembly<'_> {
	Disassembly {
		stream,
		pc: 0,
		byte_order,
		done: false,
	}
}
