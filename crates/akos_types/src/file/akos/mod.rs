//! AKOS costume resource support.
//!
//! An AKOS costume bundles everything needed to animate and draw a character: the limb bytecode,
//! the animation table that starts the limbs, and the compressed cels with their metadata.
//!
//! # File Structure
//!
//! The resource is a block container. Every block starts with a four-byte tag and a big-endian
//! `u32` size that includes the eight-byte block header. The outer `AKOS` block holds:
//!
//! - **`AKHD`**: header (version, flags, animation count, codec)
//! - **`AKPL`**: costume palette, stored cel index to actor colour
//! - **`RGBS`** (optional): preview colours, three bytes per `AKPL` entry
//! - **`AKSQ`**: limb bytecode, addressed by absolute byte offsets
//! - **`AKCH`**: animation table, one little-endian `u16` offset per animation
//! - **`AKOF`**: cel offset table, six bytes per cel
//! - **`AKCI`**: cel info records, twelve bytes each
//! - **`AKCD`**: compressed cel data
//!
//! Blocks with other tags are skipped.
//!
//! # Examples
//!
//! ```
//! use akos_types::codec::Codec;
//! use akos_types::file::{CelInfo, Costume, CostumeBuilder, LimbCommand, LimbMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = CostumeBuilder::new(Codec::RunTag8);
//! let cel = builder.add_cel(CelInfo::new(2, 2), vec![0x84, 0x01, 0x00])?;
//! let start = builder.append_sequence(&[cel as u8])?;
//! builder.set_animation(0, vec![(0, LimbCommand::Start {
//!     mode: LimbMode::Loop,
//!     start,
//!     len: 1,
//! })]);
//!
//! let costume = Costume::from_bytes(&builder.build()?)?;
//! assert_eq!(costume.header().anim_count, 1);
//! assert_eq!(costume.cel_info(costume.offset(0)?.cel_info)?.width, 2);
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod constants;
mod header;
mod tables;


use std::{fmt::Display, io::Read, ops::Range, path::Path};

use crate::{
	AkosError,
	codec::{CelFormat, Codec},
	config::ByteOrder,
};

pub use builder::CostumeBuilder;
pub use header::Header;
pub use tables::{Animation, CelInfo, LimbCommand, LimbMode, Offset};

/// A parsed AKOS costume.
///
/// The costume keeps the raw resource and the location of every block, so lookups borrow straight
/// from the original bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Costume {
	raw: Vec<u8>,
	header: Header,
	codec: Codec,
	palette: Range<usize>,
	rgbs: Option<Range<usize>>,
	sequence: Range<usize>,
	animations: Range<usize>,
	offsets: Range<usize>,
	cel_info: Range<usize>,
	cel_data: Range<usize>,
}

/// Block locations found while walking the container
#[derive(Default)]
struct Blocks {
	header: Option<Range<usize>>,
	palette: Option<Range<usize>>,
	rgbs: Option<Range<usize>>,
	sequence: Option<Range<usize>>,
	animations: Option<Range<usize>>,
	offsets: Option<Range<usize>>,
	cel_info: Option<Range<usize>>,
	cel_data: Option<Range<usize>>,
}

impl Blocks {
	fn slot(&mut self, tag: [u8; 4]) -> Option<&mut Option<Range<usize>>> {
		Some(match tag {
			constants::TAG_AKHD => &mut self.header,
			constants::TAG_AKPL => &mut self.palette,
			constants::TAG_RGBS => &mut self.rgbs,
			constants::TAG_AKSQ => &mut self.sequence,
			constants::TAG_AKCH => &mut self.animations,
			constants::TAG_AKOF => &mut self.offsets,
			constants::TAG_AKCI => &mut self.cel_info,
			constants::TAG_AKCD => &mut self.cel_data,
			_ => return None,
		})
	}
}

fn required(block: Option<Range<usize>>, tag: [u8; 4]) -> Result<Range<usize>, AkosError> {
	block.ok_or(AkosError::MissingBlock(tag))
}

/// Reads the block header at `offset` and returns the tag and payload range.
fn block_at(data: &[u8], offset: usize, limit: usize) -> Result<([u8; 4], Range<usize>), AkosError> {
	let header_end = offset + constants::BLOCK_HEADER_SIZE;
	if header_end > limit {
		return Err(AkosError::InsufficientData {
			expected: header_end,
			actual: limit,
		});
	}
	let tag = [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]];
	let size = u32::from_be_bytes([data[offset + 4], data[offset + 5], data[offset + 6], data[offset + 7]]);

	let end = offset.checked_add(size as usize);
	match end {
		Some(end) if size as usize >= constants::BLOCK_HEADER_SIZE && end <= limit => {
			Ok((tag, header_end..end))
		}
		_ => Err(AkosError::MalformedBlock {
			tag,
			offset,
			size,
		}),
	}
}

impl Costume {
	/// Parses a costume from its raw bytes.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The data does not start with an `AKOS` block
	/// - A block header declares a size that overruns its container
	/// - A mandatory block is missing or the header is short
	/// - The header names an unsupported codec
	pub fn from_bytes(data: &[u8]) -> Result<Self, AkosError> {
		let raw = data.to_vec();
		let (tag, outer) = block_at(&raw, 0, raw.len())?;
		if tag != constants::TAG_AKOS {
			return Err(AkosError::InvalidMagic(tag));
		}

		let mut blocks = Blocks::default();
		let mut pos = outer.start;
		while pos < outer.end {
			let (tag, payload) = block_at(&raw, pos, outer.end)?;
			pos = payload.end;
			match blocks.slot(tag) {
				Some(slot) if slot.is_none() => *slot = Some(payload),
				Some(_) => log::warn!("Duplicate {} block ignored", String::from_utf8_lossy(&tag)),
				None => log::debug!("Skipping unknown block {:02X?}", tag),
			}
		}

		let header_range = required(blocks.header, constants::TAG_AKHD)?;
		let header = Header::from_bytes(&raw[header_range])?;
		let codec = header.codec()?;

		let costume = Self {
			header,
			codec,
			palette: required(blocks.palette, constants::TAG_AKPL)?,
			rgbs: blocks.rgbs,
			sequence: required(blocks.sequence, constants::TAG_AKSQ)?,
			animations: required(blocks.animations, constants::TAG_AKCH)?,
			offsets: required(blocks.offsets, constants::TAG_AKOF)?,
			cel_info: required(blocks.cel_info, constants::TAG_AKCI)?,
			cel_data: required(blocks.cel_data, constants::TAG_AKCD)?,
			raw,
		};

		log::debug!(
			"Loaded costume: {}, {} cels, {} bytes of bytecode",
			costume.header,
			costume.cel_count(),
			costume.sequence.len()
		);
		Ok(costume)
	}

	/// Opens a costume from the specified path.
	///
	/// # Arguments
	///
	/// * `path` - Path to the costume resource.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or is not a valid costume.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AkosError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Reads a costume from any reader.
	///
	/// # Errors
	///
	/// Returns an error if reading fails or the data is not a valid costume.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, AkosError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Saves the costume to the specified path.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be written.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AkosError> {
		std::fs::write(path, &self.raw)?;
		Ok(())
	}

	/// The raw resource bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.raw
	}

	/// The costume header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// The validated cel codec.
	pub fn codec(&self) -> Codec {
		self.codec
	}

	/// Stream format of the cels for a title with the given byte order.
	pub fn cel_format(&self, byte_order: ByteOrder) -> CelFormat {
		CelFormat::new(self.codec, byte_order).with_palette_len(self.palette.len())
	}

	/// Number of entries in the offset table.
	pub fn cel_count(&self) -> usize {
		self.offsets.len() / constants::OFFSET_ENTRY_SIZE
	}

	/// Looks up cel `cel` in the offset table.
	///
	/// # Errors
	///
	/// Returns [`AkosError::CelOutOfRange`] past the end of the table.
	pub fn offset(&self, cel: u16) -> Result<Offset, AkosError> {
		let count = self.cel_count();
		let at = usize::from(cel) * constants::OFFSET_ENTRY_SIZE;
		self.raw[self.offsets.clone()]
			.get(at..at + constants::OFFSET_ENTRY_SIZE)
			.and_then(|bytes| bytes.try_into().ok())
			.map(Offset::from_bytes)
			.ok_or(AkosError::CelOutOfRange {
				cel,
				count,
			})
	}

	/// Reads the cel info record at `offset` inside `AKCI`.
	///
	/// # Errors
	///
	/// Returns [`AkosError::CelInfoOutOfRange`] if the record does not fit.
	pub fn cel_info(&self, offset: u16) -> Result<CelInfo, AkosError> {
		let at = usize::from(offset);
		self.raw[self.cel_info.clone()]
			.get(at..at + constants::CEL_INFO_SIZE)
			.and_then(|bytes| bytes.try_into().ok())
			.map(CelInfo::from_bytes)
			.ok_or(AkosError::CelInfoOutOfRange {
				offset,
			})
	}

	/// Compressed cel bytes starting at `offset` inside `AKCD`.
	///
	/// The slice runs to the end of the block; the decoder stops at the end-of-image marker or
	/// after the last pixel.
	///
	/// # Errors
	///
	/// Returns [`AkosError::CelDataOutOfRange`] if the offset lies past the block.
	pub fn cel_bytes(&self, offset: u32) -> Result<&[u8], AkosError> {
		let data = &self.raw[self.cel_data.clone()];
		usize::try_from(offset)
			.ok()
			.filter(|&at| at < data.len())
			.map(|at| &data[at..])
			.ok_or(AkosError::CelDataOutOfRange {
				offset,
			})
	}

	/// Resolves cel `cel` to its info record and compressed bytes.
	pub fn cel(&self, cel: u16) -> Result<(CelInfo, &[u8]), AkosError> {
		let offset = self.offset(cel)?;
		Ok((self.cel_info(offset.cel_info)?, self.cel_bytes(offset.cel_data)?))
	}

	/// The whole `AKSQ` block; bytecode offsets are relative to its start.
	pub fn sequence(&self) -> &[u8] {
		&self.raw[self.sequence.clone()]
	}

	/// The bytecode from `start` to the end of `AKSQ`.
	///
	/// # Errors
	///
	/// Returns [`AkosError::SequenceOutOfRange`] if `start` lies past the block.
	pub fn limb_stream(&self, start: u16) -> Result<&[u8], AkosError> {
		let sequence = self.sequence();
		sequence.get(usize::from(start)..).ok_or(AkosError::SequenceOutOfRange {
			start,
			len: 0,
			size: sequence.len(),
		})
	}

	/// Decodes the `AKCH` entry of animation `anim`.
	///
	/// Returns `Ok(None)` for animations the costume declares but does not define.
	///
	/// # Errors
	///
	/// - [`AkosError::AnimationOutOfRange`] if `anim` is not below the header's count.
	/// - [`AkosError::TruncatedAnimation`] if the table or the entry runs past the block.
	/// - [`AkosError::InvalidLimbCommand`] or [`AkosError::SequenceOutOfRange`] for bad entries.
	pub fn animation(&self, anim: u16) -> Result<Option<Animation>, AkosError> {
		if anim >= self.header.anim_count {
			return Err(AkosError::AnimationOutOfRange {
				anim,
				count: self.header.anim_count,
			});
		}

		let table = &self.raw[self.animations.clone()];
		let at = usize::from(anim) * 2;
		let entry = table.get(at..at + 2).ok_or(AkosError::TruncatedAnimation {
			anim,
		})?;
		let entry = usize::from(u16::from_le_bytes([entry[0], entry[1]]));
		if entry == 0 {
			return Ok(None);
		}

		let data = table.get(entry..).ok_or(AkosError::TruncatedAnimation {
			anim,
		})?;
		Animation::parse(anim, data, self.sequence.len()).map(Some)
	}

	/// The costume palette (`AKPL`).
	pub fn palette(&self) -> &[u8] {
		&self.raw[self.palette.clone()]
	}

	/// Preview colours (`RGBS`), if present.
	pub fn rgbs(&self) -> Option<&[u8]> {
		self.rgbs.clone().map(|range| &self.raw[range])
	}
}

impl TryFrom<&[u8]> for Costume {
	type Error = AkosError;

	fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(data)
	}
}

impl TryFrom<Vec<u8>> for Costume {
	type Error = AkosError;

	fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
		Self::from_bytes(&data)
	}
}

impl Display for Costume {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "{}", self.header)?;
		let rgbs = if self.rgbs.is_some() {
			" (with RGBS)"
		} else {
			""
		};
		writeln!(f, "  palette: {} entries{rgbs}", self.palette.len())?;
		writeln!(f, "  cels: {}", self.cel_count())?;
		write!(f, "  bytecode: {} bytes", self.sequence.len())
	}
}
