//! Run readers for the three cel codecs.

use crate::{CelError, config::ByteOrder};

use super::{Codec, constants};

/// One decoded run of the compressed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Run<'d> {
	/// End of image
	End,
	/// Transparent pixels
	Skip(u32),
	/// One colour repeated
	Fill(u8, u32),
	/// Literal colours
	Copy(&'d [u8]),
}

#[derive(Debug)]
pub(super) struct RunReader<'d> {
	data: &'d [u8],
	pos: usize,
	codec: Codec,
	byte_order: ByteOrder,
	rle_shift: u8,
}

impl<'d> RunReader<'d> {
	pub(super) fn new(data: &'d [u8], codec: Codec, byte_order: ByteOrder, rle_shift: u8) -> Self {
		Self {
			data,
			pos: 0,
			codec,
			byte_order,
			rle_shift,
		}
	}

	/// Bytes consumed so far.
	pub(super) fn position(&self) -> usize {
		self.pos
	}

	pub(super) fn next_run(&mut self) -> Result<Run<'d>, CelError> {
		match self.codec {
			Codec::ByteRle => self.next_byte_rle(),
			Codec::RunTag8 => {
				let control = self.byte()?;
				let count = match u32::from(control & constants::NARROW_COUNT_MASK) {
					0 if control & constants::NARROW_TAG_MASK != 0 => u32::from(self.byte()?),
					count => count,
				};
				self.tagged(control >> 6, count)
			}
			Codec::RunTag16 => {
				let control = self
					.byte_order
					.read_u16(self.data, self.pos)
					.ok_or(CelError::Truncated {
						offset: self.pos,
					})?;
				self.pos += 2;
				self.tagged((control >> 14) as u8, u32::from(control & constants::WIDE_COUNT_MASK))
			}
		}
	}

	fn next_byte_rle(&mut self) -> Result<Run<'d>, CelError> {
		let packed = self.byte()?;
		let color = packed >> self.rle_shift;
		let run = match packed & ((1 << self.rle_shift) - 1) {
			0 => match self.byte()? {
				0 => 256,
				run => u32::from(run),
			},
			run => u32::from(run),
		};
		Ok(if color == 0 {
			Run::Skip(run)
		} else {
			Run::Fill(color, run)
		})
	}

	fn tagged(&mut self, tag: u8, count: u32) -> Result<Run<'d>, CelError> {
		match tag {
			constants::TAG_END => Ok(Run::End),
			constants::TAG_SKIP => Ok(Run::Skip(count)),
			constants::TAG_REPEAT => {
				let color = self.byte()?;
				Ok(Run::Fill(color, count))
			}
			_ => {
				let end = self.pos + count as usize;
				let literals = self.data.get(self.pos..end).ok_or(CelError::Truncated {
					offset: self.data.len(),
				})?;
				self.pos = end;
				Ok(Run::Copy(literals))
			}
		}
	}

	#[inline]
	fn byte(&mut self) -> Result<u8, CelError> {
		let byte = *self.data.get(self.pos).ok_or(CelError::Truncated {
			offset: self.pos,
		})?;
		self.pos += 1;
		Ok(byte)
	}
}
