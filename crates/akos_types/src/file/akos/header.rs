//! The `AKHD` block.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{AkosError, codec::Codec};

use super::constants;

/// Costume header
///
/// # Layout (little-endian, 10 bytes)
///
/// | Offset | Size | Field          |
/// |--------|------|----------------|
/// | 0      | 2    | version        |
/// | 2      | 1    | flags          |
/// | 3      | 1    | reserved       |
/// | 4      | 2    | animation count|
/// | 6      | 2    | reserved       |
/// | 8      | 2    | codec          |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
	/// Format version
	pub version: u16,
	/// Flag bits, see [`Header::mirror_default`]
	pub flags: u8,
	/// Number of entries in the animation table
	pub anim_count: u16,
	/// Raw codec id of every cel in the costume
	pub codec: u16,
}

impl Header {
	/// Creates a header for `anim_count` animations using `codec`.
	pub fn new(codec: Codec, anim_count: u16) -> Self {
		Self {
			version: 1,
			flags: 0,
			anim_count,
			codec: codec.to_u16(),
		}
	}

	/// Parses the header from the `AKHD` payload.
	///
	/// # Errors
	///
	/// Returns [`AkosError::InsufficientData`] if fewer than 10 bytes are supplied. The codec id is
	/// not checked here; see [`Header::codec`].
	pub fn from_bytes(data: &[u8]) -> Result<Self, AkosError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(AkosError::InsufficientData {
				expected: constants::HEADER_SIZE,
				actual: data.len(),
			});
		}

		Ok(Self {
			version: u16::from_le_bytes([data[0], data[1]]),
			flags: data[2],
			anim_count: u16::from_le_bytes([data[4], data[5]]),
			codec: u16::from_le_bytes([data[8], data[9]]),
		})
	}

	/// Serializes the header payload.
	pub fn to_bytes(&self) -> [u8; constants::HEADER_SIZE] {
		let mut bytes = [0u8; constants::HEADER_SIZE];
		bytes[0..2].copy_from_slice(&self.version.to_le_bytes());
		bytes[2] = self.flags;
		bytes[4..6].copy_from_slice(&self.anim_count.to_le_bytes());
		bytes[8..10].copy_from_slice(&self.codec.to_le_bytes());
		bytes
	}

	/// Returns true if the costume is drawn mirrored unless the actor says otherwise.
	pub fn mirror_default(&self) -> bool {
		self.flags & constants::FLAG_MIRROR_DEFAULT != 0
	}

	/// Decoded codec id.
	///
	/// # Errors
	///
	/// Returns [`AkosError::UnsupportedCodec`] for ids other than 1, 2 and 3.
	pub fn codec(&self) -> Result<Codec, AkosError> {
		Codec::from_u16(self.codec).ok_or(AkosError::UnsupportedCodec(self.codec))
	}
}

impl Display for Header {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"AKOS v{} - {} animations, codec {}, flags 0x{:02X}{}",
			self.version,
			self.anim_count,
			self.codec,
			self.flags,
			if self.mirror_default() {
				" (mirrored)"
			} else {
				""
			}
		)
	}
}
