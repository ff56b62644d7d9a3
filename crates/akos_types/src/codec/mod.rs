//! Cel decoding: run-length decompression straight into an indexed surface.
//!
//! ## Codecs
//!
//! | Id | Name       | Order        | Control unit                                          |
//! |----|------------|--------------|-------------------------------------------------------|
//! | 1  | `ByteRle`  | column-major | one byte: `colour << shift \| run`, run 0 = next byte  |
//! | 2  | `RunTag8`  | row-major    | one byte: 2-bit tag, 6-bit count, count 0 = next byte  |
//! | 3  | `RunTag16` | row-major    | one word (title byte order): 2-bit tag, 14-bit count   |
//!
//! Tagged codecs use `00` end of image, `01` skip (transparent), `10` repeat (one colour byte
//! follows) and `11` copy (`count` literal bytes follow). Runs may cross row boundaries. The byte
//! RLE codec treats colour 0 as transparent and has no end marker; its colour/run split depends on
//! the size of the costume palette (16, 32 or 64 entries).
//!
//! ## Rendering
//!
//! [`draw_cel`] maps each source pixel through a nearest-neighbour scale accumulator per axis
//! (255 = 1:1), optionally mirrors the columns, clips against the clip rectangle, the surface and an
//! optional [`ZPlane`], shades through the palette or a shadow table, and writes the result. The
//! decoder keeps consuming the stream for pixels that are clipped away, so partially visible cels
//! decode exactly like fully visible ones.
//!
//! # Examples
//!
//! ```
//! use akos_types::codec::{BlitParams, CelFormat, Codec, Surface, draw_cel};
//! use akos_types::config::ByteOrder;
//! use akos_types::file::CelInfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // 4x2 cel: repeat colour 5 over all eight pixels, then end of image
//! let data = [0x88, 0x05, 0x00];
//! let info = CelInfo::new(4, 2);
//! let palette: [u8; 256] = std::array::from_fn(|i| i as u8);
//!
//! let mut pixels = vec![0u8; 8 * 4];
//! let mut surface = Surface::packed(&mut pixels, 8, 4)?;
//! let params = BlitParams::new(&palette, CelFormat::new(Codec::RunTag8, ByteOrder::Big));
//! let dirty = draw_cel(&mut surface, &info, &data, &params)?;
//! assert_eq!((dirty.width(), dirty.height()), (4, 2));
//! # Ok(())
//! # }
//! ```

mod encode;
mod raster;
mod runs;
mod surface;


use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{CelError, config::ByteOrder, file::CelInfo};

use self::raster::{Order, Placement, Raster};
use self::runs::{Run, RunReader};

pub use self::encode::encode_cel;
pub use self::surface::{MaskLayer, Rect, Surface, ZPlane};

pub(crate) mod constants {
	/// End-of-image tag
	pub const TAG_END: u8 = 0b00;
	/// Skip-transparent tag
	pub const TAG_SKIP: u8 = 0b01;
	/// Repeat-colour tag
	pub const TAG_REPEAT: u8 = 0b10;
	/// Copy-literals tag
	pub const TAG_COPY: u8 = 0b11;

	/// Tag bits of a narrow control byte
	pub const NARROW_TAG_MASK: u8 = 0xC0;
	/// Count bits of a narrow control byte
	pub const NARROW_COUNT_MASK: u8 = 0x3F;
	/// Count bits of a wide control word
	pub const WIDE_COUNT_MASK: u16 = 0x3FFF;

	/// Scale factor that maps one source pixel to one destination pixel
	pub const SCALE_IDENTITY: u8 = 255;
}

/// Compression scheme of the cel data, as named by the costume header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Codec {
	/// Classic column-major byte RLE
	ByteRle = 1,
	/// Tagged runs with 8-bit control bytes
	RunTag8 = 2,
	/// Tagged runs with 16-bit control words
	RunTag16 = 3,
}

impl Codec {
	/// Converts a header codec id to `Codec`.
	pub fn from_u16(value: u16) -> Option<Self> {
		match value {
			1 => Some(Self::ByteRle),
			2 => Some(Self::RunTag8),
			3 => Some(Self::RunTag16),
			_ => None,
		}
	}

	/// Converts `Codec` to its header id.
	pub fn to_u16(self) -> u16 {
		self as u16
	}

	fn order(self) -> Order {
		match self {
			Self::ByteRle => Order::ColumnMajor,
			Self::RunTag8 | Self::RunTag16 => Order::RowMajor,
		}
	}
}

impl Display for Codec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Codec::ByteRle => write!(f, "ByteRle"),
			Codec::RunTag8 => write!(f, "RunTag8"),
			Codec::RunTag16 => write!(f, "RunTag16"),
		}
	}
}

/// Everything needed to parse a cel stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CelFormat {
	/// Compression scheme
	pub codec: Codec,
	/// Byte order of wide control words
	pub byte_order: ByteOrder,
	/// Bits of each byte RLE unit that hold the run length
	pub rle_shift: u8,
}

impl CelFormat {
	/// Creates a format with the byte RLE split of a 16-colour palette.
	pub fn new(codec: Codec, byte_order: ByteOrder) -> Self {
		Self {
			codec,
			byte_order,
			rle_shift: 4,
		}
	}

	/// Adjusts the byte RLE colour/run split to a costume palette of `len` entries.
	pub fn with_palette_len(mut self, len: usize) -> Self {
		self.rle_shift = match len {
			32 => 3,
			64 => 2,
			_ => 4,
		};
		self
	}

	/// Largest colour index the byte RLE codec can store with this split.
	pub fn max_rle_color(&self) -> u8 {
		0xFF_u8 >> self.rle_shift
	}
}

/// How decoded indices become destination pixels
#[derive(Debug, Clone, Copy, Default)]
pub enum Shading<'a> {
	/// Through the actor palette
	#[default]
	Palette,
	/// Through the shadow table instead of the palette: a silhouette of the cel
	Silhouette(&'a [u8; 256]),
	/// The destination pixel through the shadow table: darkens whatever is behind the cel
	Behind(&'a [u8; 256]),
}

/// Fully resolved parameters of one blit
#[derive(Debug, Clone, Copy)]
pub struct BlitParams<'a> {
	/// Anchor x (the actor position plus any draw offset)
	pub x: i32,
	/// Anchor y
	pub y: i32,
	/// Horizontal scale, 255 = 1:1, 0 = nothing drawn
	pub scale_x: u8,
	/// Vertical scale, 255 = 1:1, 0 = nothing drawn
	pub scale_y: u8,
	/// Draw the cel flipped horizontally around the anchor
	pub mirror: bool,
	/// Clip rectangle; `None` clips to the surface only
	pub clip: Option<Rect>,
	/// Occlusion mask
	pub mask: Option<ZPlane<'a>>,
	/// Stored index to actor colour
	pub palette: &'a [u8; 256],
	/// Shading mode
	pub shading: Shading<'a>,
	/// Stream format
	pub format: CelFormat,
}

impl<'a> BlitParams<'a> {
	/// Unscaled, unmirrored, unclipped blit at the origin.
	pub fn new(palette: &'a [u8; 256], format: CelFormat) -> Self {
		Self {
			x: 0,
			y: 0,
			scale_x: constants::SCALE_IDENTITY,
			scale_y: constants::SCALE_IDENTITY,
			mirror: false,
			clip: None,
			mask: None,
			palette,
			shading: Shading::Palette,
			format,
		}
	}

	/// Sets the anchor.
	pub fn at(mut self, x: i32, y: i32) -> Self {
		self.x = x;
		self.y = y;
		self
	}

	/// Sets both scale factors.
	pub fn scaled(mut self, scale_x: u8, scale_y: u8) -> Self {
		self.scale_x = scale_x;
		self.scale_y = scale_y;
		self
	}

	/// Sets the mirror flag.
	pub fn mirrored(mut self, mirror: bool) -> Self {
		self.mirror = mirror;
		self
	}

	/// Sets the clip rectangle.
	pub fn clipped(mut self, clip: Rect) -> Self {
		self.clip = Some(clip);
		self
	}
}

/// Applies palette, shadow table and occlusion to one decoded index.
#[derive(Debug)]
pub(crate) struct Pen<'a> {
	palette: &'a [u8; 256],
	shading: Shading<'a>,
	mask: Option<ZPlane<'a>>,
}

impl Pen<'_> {
	#[inline]
	fn ink(&self, surface: &Surface<'_>, x: i32, y: i32, index: u8) -> Option<u8> {
		if self.mask.is_some_and(|mask| mask.is_masked(x, y)) {
			return None;
		}
		Some(match self.shading {
			Shading::Palette => self.palette[usize::from(index)],
			Shading::Silhouette(table) => table[usize::from(index)],
			Shading::Behind(table) => table[usize::from(surface.get(x, y)?)],
		})
	}
}

/// Length of `len` source pixels after scaling.
pub fn scaled_len(len: u16, scale: u8) -> i32 {
	if len == 0 || scale == 0 {
		return 0;
	}
	((i32::from(len) - 1) * i32::from(scale)) / 255 + 1
}

/// A signed offset after scaling.
pub fn scaled_offset(offset: i16, scale: u8) -> i32 {
	i32::from(offset) * i32::from(scale) / 255
}

/// Destination rectangle a cel would cover, before clipping.
pub fn cel_bounds(info: &CelInfo, params: &BlitParams<'_>) -> Rect {
	let width = scaled_len(info.width, params.scale_x);
	let height = scaled_len(info.height, params.scale_y);
	let rel_x = scaled_offset(info.rel_x, params.scale_x);
	let rel_y = scaled_offset(info.rel_y, params.scale_y);
	let left = if params.mirror {
		params.x - rel_x - width
	} else {
		params.x + rel_x
	};
	Rect::from_size(left, params.y + rel_y, width, height)
}

/// Decodes one cel into `surface`.
///
/// Returns the rectangle of pixels actually written, which is empty when the cel is scaled to
/// nothing or lies entirely outside the clip area.
///
/// # Errors
///
/// - [`CelError::InvalidDimensions`] for a zero width or height, before anything is written.
/// - [`CelError::Truncated`] when the stream ends inside a run. Pixels decoded up to that point stay
///   on the surface.
pub fn draw_cel(
	surface: &mut Surface<'_>,
	info: &CelInfo,
	data: &[u8],
	params: &BlitParams<'_>,
) -> Result<Rect, CelError> {
	if info.width == 0 || info.height == 0 {
		return Err(CelError::InvalidDimensions {
			width: info.width,
			height: info.height,
		});
	}
	if params.scale_x == 0 || params.scale_y == 0 {
		return Ok(Rect::EMPTY);
	}

	let bounds = cel_bounds(info, params);
	let clip = params.clip.map_or(surface.bounds(), |clip| clip.intersect(&surface.bounds()));
	let visible = bounds.intersect(&clip);
	if visible.is_empty() {
		return Ok(Rect::EMPTY);
	}

	let format = params.format;
	let mut raster = Raster::new(
		format.codec.order(),
		info.width,
		info.height,
		params.scale_x,
		params.scale_y,
		Placement {
			origin_x: bounds.left,
			origin_y: bounds.top,
			out_width: bounds.width(),
			mirror: params.mirror,
			visible,
		},
	);
	let mut reader = RunReader::new(data, format.codec, format.byte_order, format.rle_shift);
	let pen = Pen {
		palette: params.palette,
		shading: params.shading,
		mask: params.mask,
	};

	while !raster.finished() {
		match reader.next_run()? {
			Run::End => break,
			Run::Skip(count) => raster.skip(count),
			Run::Fill(color, count) => raster.fill(surface, &pen, color, count),
			Run::Copy(literals) => raster.copy(surface, &pen, literals),
		}
	}

	Ok(raster.touched())
}

/// Decodes a cel at 1:1 into a new `width * height` buffer.
///
/// Transparent pixels are set to `background`; the palette is the identity. Intended for tools and
/// tests; the rendering path uses [`draw_cel`], which does not allocate.
pub fn decode_cel(
	info: &CelInfo,
	data: &[u8],
	format: CelFormat,
	background: u8,
) -> Result<Vec<u8>, CelError> {
	if info.width == 0 || info.height == 0 {
		return Err(CelError::InvalidDimensions {
			width: info.width,
			height: info.height,
		});
	}
	let width = usize::from(info.width);
	let height = usize::from(info.height);
	let mut pixels = vec![background; width * height];
	let identity: [u8; 256] = std::array::from_fn(|i| i as u8);
	let unplaced = CelInfo {
		rel_x: 0,
		rel_y: 0,
		..*info
	};

	let mut surface = Surface::packed(&mut pixels, width, height)?;
	draw_cel(&mut surface, &unplaced, data, &BlitParams::new(&identity, format))?;
	Ok(pixels)
}
