//! Costume construction and serialization.

use crate::{
	AkosError,
	codec::{CelFormat, Codec, encode_cel},
	config::ByteOrder,
};

use super::{Animation, CelInfo, Costume, Header, LimbCommand, Offset, constants};

/// Assembles a costume resource block by block.
///
/// Cels are appended to the offset table in the order they are added; sequences are appended to
/// `AKSQ` and their start offsets returned, ready to be referenced from animations and jumps.
#[derive(Debug, Clone)]
pub struct CostumeBuilder {
	codec: Codec,
	header: Header,
	palette: Vec<u8>,
	rgbs: Option<Vec<u8>>,
	sequence: Vec<u8>,
	cels: Vec<(CelInfo, Vec<u8>)>,
	animations: Vec<Option<Animation>>,
}

impl CostumeBuilder {
	/// Creates an empty costume with a 16-entry identity palette.
	pub fn new(codec: Codec) -> Self {
		Self {
			codec,
			header: Header::new(codec, 0),
			palette: (0..16).collect(),
			rgbs: None,
			sequence: Vec::new(),
			cels: Vec::new(),
			animations: Vec::new(),
		}
	}

	/// Sets the mirror-default header flag.
	pub fn mirror_default(&mut self, mirror: bool) -> &mut Self {
		if mirror {
			self.header.flags |= constants::FLAG_MIRROR_DEFAULT;
		} else {
			self.header.flags &= !constants::FLAG_MIRROR_DEFAULT;
		}
		self
	}

	/// Replaces the costume palette.
	pub fn palette(&mut self, palette: Vec<u8>) -> &mut Self {
		self.palette = palette;
		self
	}

	/// Sets the preview colours, three bytes per palette entry.
	pub fn rgbs(&mut self, rgbs: Vec<u8>) -> &mut Self {
		self.rgbs = Some(rgbs);
		self
	}

	/// Makes the header declare at least `count` animations.
	pub fn anim_count(&mut self, count: u16) -> &mut Self {
		if usize::from(count) > self.animations.len() {
			self.animations.resize(usize::from(count), None);
		}
		self
	}

	/// Appends an already compressed cel and returns its index.
	///
	/// # Errors
	///
	/// Returns [`AkosError::LimitExceeded`] once the `AKCI` record of the new cel can no longer be
	/// addressed by the 16-bit offset table field.
	pub fn add_cel(&mut self, info: CelInfo, data: Vec<u8>) -> Result<u16, AkosError> {
		let index = self.cels.len();
		fit_u16("AKCI offset", index * constants::CEL_INFO_SIZE)?;
		self.cels.push((info, data));
		fit_u16("cel index", index)
	}

	/// Compresses a row-major array of stored indices with the costume codec and appends it.
	///
	/// # Errors
	///
	/// Returns the encoder's error if the pixels do not match the cel or do not fit the codec, and
	/// the errors of [`add_cel`](Self::add_cel).
	pub fn add_cel_pixels(
		&mut self,
		info: CelInfo,
		pixels: &[u8],
		transparent: u8,
		byte_order: ByteOrder,
	) -> Result<u16, AkosError> {
		let format = CelFormat::new(self.codec, byte_order).with_palette_len(self.palette.len());
		let data = encode_cel(pixels, info.width, info.height, format, transparent)?;
		self.add_cel(info, data)
	}

	/// Appends bytecode to `AKSQ` and returns the offset it starts at.
	///
	/// # Errors
	///
	/// Returns [`AkosError::LimitExceeded`] if `AKSQ` would outgrow 16-bit jump targets.
	pub fn append_sequence(&mut self, code: &[u8]) -> Result<u16, AkosError> {
		let start = fit_u16("AKSQ offset", self.sequence.len())?;
		fit_u16("AKSQ size", self.sequence.len() + code.len())?;
		self.sequence.extend_from_slice(code);
		Ok(start)
	}

	/// Defines animation `anim`, growing the animation count as needed.
	pub fn set_animation(&mut self, anim: u16, limbs: Vec<(usize, LimbCommand)>) -> &mut Self {
		let index = usize::from(anim);
		if index >= self.animations.len() {
			self.animations.resize(index + 1, None);
		}
		self.animations[index] = Some(Animation {
			limbs,
		});
		self
	}

	/// Serializes the costume.
	///
	/// # Errors
	///
	/// Returns [`AkosError::LimitExceeded`] if a table outgrows the offset fields that address it.
	pub fn build(&self) -> Result<Vec<u8>, AkosError> {
		let mut header = self.header;
		header.anim_count = fit_u16("animation count", self.animations.len())?;

		let mut table = Vec::with_capacity(self.animations.len() * 2);
		let mut entries = Vec::new();
		let table_len = self.animations.len() * 2;
		for animation in &self.animations {
			let offset = match animation {
				Some(animation) => {
					let offset = fit_u16("AKCH offset", table_len + entries.len())?;
					entries.extend_from_slice(&animation.to_bytes());
					offset
				}
				None => 0,
			};
			table.extend_from_slice(&offset.to_le_bytes());
		}
		table.extend_from_slice(&entries);

		let mut offsets = Vec::with_capacity(self.cels.len() * constants::OFFSET_ENTRY_SIZE);
		let mut cel_info = Vec::with_capacity(self.cels.len() * constants::CEL_INFO_SIZE);
		let mut cel_data = Vec::new();
		for (info, data) in &self.cels {
			let offset = Offset {
				cel_data: fit_u32("AKCD offset", cel_data.len())?,
				cel_info: fit_u16("AKCI offset", cel_info.len())?,
			};
			offsets.extend_from_slice(&offset.to_bytes());
			cel_info.extend_from_slice(&info.to_bytes());
			cel_data.extend_from_slice(data);
		}

		let mut body = Vec::new();
		write_block(&mut body, constants::TAG_AKHD, &header.to_bytes())?;
		write_block(&mut body, constants::TAG_AKPL, &self.palette)?;
		if let Some(rgbs) = &self.rgbs {
			write_block(&mut body, constants::TAG_RGBS, rgbs)?;
		}
		write_block(&mut body, constants::TAG_AKSQ, &self.sequence)?;
		write_block(&mut body, constants::TAG_AKCH, &table)?;
		write_block(&mut body, constants::TAG_AKOF, &offsets)?;
		write_block(&mut body, constants::TAG_AKCI, &cel_info)?;
		write_block(&mut body, constants::TAG_AKCD, &cel_data)?;

		let mut out = Vec::with_capacity(body.len() + constants::BLOCK_HEADER_SIZE);
		write_block(&mut out, constants::TAG_AKOS, &body)?;
		Ok(out)
	}

	/// Serializes and parses the costume.
	///
	/// # Errors
	///
	/// Returns an error if the assembled costume does not parse.
	pub fn build_costume(&self) -> Result<Costume, AkosError> {
		Costume::from_bytes(&self.build()?)
	}
}

fn fit_u16(what: &'static str, size: usize) -> Result<u16, AkosError> {
	u16::try_from(size).map_err(|_| AkosError::LimitExceeded {
		what,
		size,
		max: usize::from(u16::MAX),
	})
}

fn fit_u32(what: &'static str, size: usize) -> Result<u32, AkosError> {
	u32::try_from(size).map_err(|_| AkosError::LimitExceeded {
		what,
		size,
		max: u32::MAX as usize,
	})
}

fn write_block(out: &mut Vec<u8>, tag: [u8; 4], payload: &[u8]) -> Result<(), AkosError> {
	let size = fit_u32("block size", payload.len() + constants::BLOCK_HEADER_SIZE)?;
	out.extend_from_slice(&tag);
	out.extend_from_slice(&size.to_be_bytes());
	out.extend_from_slice(payload);
	Ok(())
}
