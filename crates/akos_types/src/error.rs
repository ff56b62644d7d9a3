//! Error types for costume parsing, cel decoding, bytecode interpretation and stage management.

use thiserror::Error;

use crate::vm::ActorId;

/// Formats a block tag for error messages, falling back to hex for non-ASCII tags.
fn tag_name(tag: &[u8; 4]) -> String {
	if tag.iter().all(u8::is_ascii_graphic) {
		tag.iter().map(|&b| char::from(b)).collect()
	} else {
		format!("{tag:02X?}")
	}
}

/// Errors that can occur when parsing or querying an AKOS costume resource
#[derive(Debug, Error)]
pub enum AkosError {
	/// Not enough data to parse
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// The container does not start with an `AKOS` block
	#[error("Invalid magic: expected AKOS, got {}", tag_name(.0))]
	InvalidMagic([u8; 4]),

	/// A mandatory child block is absent
	#[error("Missing {} block", tag_name(.0))]
	MissingBlock([u8; 4]),

	/// A block header declares a size that does not fit its container
	#[error("Malformed {} block at offset {offset}: declared size {size}", tag_name(.tag))]
	MalformedBlock {
		/// Block tag
		tag: [u8; 4],
		/// Offset of the block header inside the resource
		offset: usize,
		/// Declared size (including the 8-byte block header)
		size: u32,
	},

	/// The header names a codec this crate cannot decode
	#[error("Unsupported cel codec {0}")]
	UnsupportedCodec(u16),

	/// A cel index outside the offset table
	#[error("Cel {cel} out of range (offset table holds {count} entries)")]
	CelOutOfRange {
		/// Requested cel index
		cel: u16,
		/// Number of entries in the offset table
		count: usize,
	},

	/// A cel-info offset that does not address a full record
	#[error("Cel info offset {offset} out of range")]
	CelInfoOutOfRange {
		/// Offset into the cel-info block
		offset: u16,
	},

	/// A cel-data offset past the end of the cel-data block
	#[error("Cel data offset {offset} out of range")]
	CelDataOutOfRange {
		/// Offset into the cel-data block
		offset: u32,
	},

	/// An animation index past the header's animation count
	#[error("Animation {anim} out of range (costume declares {count})")]
	AnimationOutOfRange {
		/// Requested animation
		anim: u16,
		/// Declared animation count
		count: u16,
	},

	/// An animation table entry runs past the end of its block
	#[error("Animation {anim} entry is truncated")]
	TruncatedAnimation {
		/// Animation whose entry is truncated
		anim: u16,
	},

	/// An animation table entry carries a limb command code with no meaning
	#[error("Animation {anim}, limb {limb}: invalid limb command {code}")]
	InvalidLimbCommand {
		/// Animation index
		anim: u16,
		/// Limb index
		limb: usize,
		/// Raw command code
		code: u8,
	},

	/// A limb sequence range that does not fit inside the bytecode block
	#[error("Sequence range {start}+{len} exceeds bytecode block of {size} bytes")]
	SequenceOutOfRange {
		/// Start offset
		start: u16,
		/// Length in bytes
		len: u16,
		/// Size of the bytecode block
		size: usize,
	},

	/// A table or block grew past what its offset fields can address
	#[error("{what} needs {size}, the format allows at most {max}")]
	LimitExceeded {
		/// What overflowed
		what: &'static str,
		/// Required size or count
		size: usize,
		/// Largest value the format can store
		max: usize,
	},

	/// Cel encoding error
	#[error(transparent)]
	Cel(#[from] CelError),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors reported by the cel decoder and encoders
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CelError {
	/// Zero width or height; rejected before any pixel is written
	#[error("Invalid cel dimensions {width}x{height}")]
	InvalidDimensions {
		/// Declared width
		width: u16,
		/// Declared height
		height: u16,
	},

	/// The destination buffer is too small for the declared geometry
	#[error("Invalid surface: {width}x{height} with pitch {pitch} needs more than {len} bytes")]
	InvalidSurface {
		/// Surface width
		width: usize,
		/// Surface height
		height: usize,
		/// Bytes per row
		pitch: usize,
		/// Length of the supplied buffer
		len: usize,
	},

	/// The compressed stream ended in the middle of a run
	#[error("Cel data truncated at offset {offset}")]
	Truncated {
		/// Offset at which more data was expected
		offset: usize,
	},

	/// A colour that the byte RLE codec cannot represent with the current palette size
	#[error("Colour {color} does not fit the byte RLE codec (maximum {max})")]
	ColorOutOfRange {
		/// Offending colour index
		color: u8,
		/// Largest encodable colour index
		max: u8,
	},

	/// The pixel buffer handed to an encoder does not match the cel dimensions
	#[error("Pixel count mismatch: expected {expected}, got {actual}")]
	PixelCountMismatch {
		/// Pixels implied by the dimensions
		expected: usize,
		/// Pixels supplied
		actual: usize,
	},
}

/// Faults raised while interpreting a limb's command stream
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
	/// The stream ended before all operands of an instruction could be read
	#[error("Instruction at {pc} truncated")]
	Truncated {
		/// Offset of the truncated instruction
		pc: usize,
	},

	/// The per-tick step budget was exhausted, most likely by a jump cycle
	#[error("Step limit of {limit} exceeded at {pc}; limb frozen")]
	RunawayLoop {
		/// Configured step limit
		limit: usize,
		/// Program counter when the limit was hit
		pc: usize,
	},

	/// An operand too large for the field that encodes it
	#[error("{what} {value} does not fit its encoding (max {max})")]
	OperandOutOfRange {
		/// Which operand
		what: &'static str,
		/// Requested value
		value: usize,
		/// Largest encodable value
		max: usize,
	},
}

/// Errors reported by the stage when managing actors
#[derive(Debug, Error)]
pub enum StageError {
	/// No actor with this id is on stage
	#[error("Unknown actor {0}")]
	UnknownActor(ActorId),

	/// The actor has no costume assigned
	#[error("Actor {0} has no costume")]
	NoCostume(ActorId),

	/// `SetActorClip` modes are a byte, so only this many z-planes can be selected
	#[error("Z-plane limit of {max} reached")]
	TooManyZPlanes {
		/// Number of selectable z-planes
		max: usize,
	},

	/// Costume lookup failure
	#[error(transparent)]
	Akos(#[from] AkosError),
}
