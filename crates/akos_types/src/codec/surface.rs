//! Destination surfaces, clip rectangles and z-plane masks.

use serde::{Deserialize, Serialize};

use crate::CelError;

/// Half-open rectangle in surface coordinates (`right` and `bottom` are exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
	/// Leftmost column
	pub left: i32,
	/// Topmost row
	pub top: i32,
	/// One past the rightmost column
	pub right: i32,
	/// One past the bottom row
	pub bottom: i32,
}

impl Rect {
	/// The empty rectangle at the origin
	pub const EMPTY: Rect = Rect {
		left: 0,
		top: 0,
		right: 0,
		bottom: 0,
	};

	/// Creates a rectangle from its edges.
	pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
		Self {
			left,
			top,
			right,
			bottom,
		}
	}

	/// Creates a rectangle from an origin and a size.
	pub fn from_size(x: i32, y: i32, width: i32, height: i32) -> Self {
		Self {
			left: x,
			top: y,
			right: x.saturating_add(width),
			bottom: y.saturating_add(height),
		}
	}

	/// Width in pixels (zero for inverted rectangles).
	pub fn width(&self) -> i32 {
		(self.right - self.left).max(0)
	}

	/// Height in pixels (zero for inverted rectangles).
	pub fn height(&self) -> i32 {
		(self.bottom - self.top).max(0)
	}

	/// Returns true if the rectangle covers no pixel.
	pub fn is_empty(&self) -> bool {
		self.right <= self.left || self.bottom <= self.top
	}

	/// Returns true if the pixel at (`x`, `y`) lies inside.
	#[inline]
	pub fn contains(&self, x: i32, y: i32) -> bool {
		x >= self.left && x < self.right && y >= self.top && y < self.bottom
	}

	/// Overlap of two rectangles; empty if they do not meet.
	pub fn intersect(&self, other: &Rect) -> Rect {
		let rect = Rect {
			left: self.left.max(other.left),
			top: self.top.max(other.top),
			right: self.right.min(other.right),
			bottom: self.bottom.min(other.bottom),
		};
		if rect.is_empty() {
			Rect::EMPTY
		} else {
			rect
		}
	}

	/// Smallest rectangle covering both; empty operands are ignored.
	pub fn union(&self, other: &Rect) -> Rect {
		match (self.is_empty(), other.is_empty()) {
			(true, true) => Rect::EMPTY,
			(true, false) => *other,
			(false, true) => *self,
			(false, false) => Rect {
				left: self.left.min(other.left),
				top: self.top.min(other.top),
				right: self.right.max(other.right),
				bottom: self.bottom.max(other.bottom),
			},
		}
	}

	/// Grows the rectangle to include the pixel at (`x`, `y`).
	#[inline]
	pub fn include(&mut self, x: i32, y: i32) {
		if self.is_empty() {
			*self = Rect::from_size(x, y, 1, 1);
		} else {
			self.left = self.left.min(x);
			self.top = self.top.min(y);
			self.right = self.right.max(x + 1);
			self.bottom = self.bottom.max(y + 1);
		}
	}
}

impl std::fmt::Display for Rect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "({}, {})-({}, {})", self.left, self.top, self.right, self.bottom)
	}
}

/// A caller-owned 8-bit indexed framebuffer.
#[derive(Debug)]
pub struct Surface<'a> {
	pixels: &'a mut [u8],
	width: usize,
	height: usize,
	pitch: usize,
}

impl<'a> Surface<'a> {
	/// Wraps a pixel buffer of `height` rows, `pitch` bytes apart, each `width` pixels wide.
	///
	/// # Errors
	///
	/// Returns [`CelError::InvalidSurface`] if the pitch is narrower than the width or the buffer
	/// cannot hold the last row.
	pub fn new(
		pixels: &'a mut [u8],
		width: usize,
		height: usize,
		pitch: usize,
	) -> Result<Self, CelError> {
		let required = match height {
			0 => Some(0),
			rows => pitch.checked_mul(rows - 1).and_then(|n| n.checked_add(width)),
		};
		let fits = required.is_some_and(|n| n <= pixels.len());
		if pitch < width || !fits || i32::try_from(width.max(height)).is_err() {
			return Err(CelError::InvalidSurface {
				width,
				height,
				pitch,
				len: pixels.len(),
			});
		}

		Ok(Self {
			pixels,
			width,
			height,
			pitch,
		})
	}

	/// Wraps a tightly packed buffer (`pitch == width`).
	pub fn packed(pixels: &'a mut [u8], width: usize, height: usize) -> Result<Self, CelError> {
		Self::new(pixels, width, height, width)
	}

	/// Surface width in pixels.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Surface height in pixels.
	pub fn height(&self) -> usize {
		self.height
	}

	/// Distance between rows in bytes.
	pub fn pitch(&self) -> usize {
		self.pitch
	}

	/// The whole surface as a rectangle.
	pub fn bounds(&self) -> Rect {
		// Dimensions were checked against i32 in `new`.
		Rect::from_size(0, 0, self.width as i32, self.height as i32)
	}

	/// Reads the pixel at (`x`, `y`), or `None` outside the surface.
	#[inline]
	pub fn get(&self, x: i32, y: i32) -> Option<u8> {
		self.index(x, y).map(|at| self.pixels[at])
	}

	/// Writes the pixel at (`x`, `y`); writes outside the surface are dropped.
	#[inline]
	pub fn put(&mut self, x: i32, y: i32, value: u8) {
		if let Some(at) = self.index(x, y) {
			self.pixels[at] = value;
		}
	}

	/// One row of pixels, without the pitch padding.
	pub fn row(&self, y: usize) -> Option<&[u8]> {
		if y >= self.height {
			return None;
		}
		let start = y * self.pitch;
		Some(&self.pixels[start..start + self.width])
	}

	/// The underlying buffer, pitch padding included.
	pub fn pixels(&self) -> &[u8] {
		self.pixels
	}

	#[inline]
	fn index(&self, x: i32, y: i32) -> Option<usize> {
		let x = usize::try_from(x).ok()?;
		let y = usize::try_from(y).ok()?;
		(x < self.width && y < self.height).then(|| y * self.pitch + x)
	}
}

/// Borrowed view of a one-bit-per-pixel occlusion mask.
///
/// Bits are stored MSB first, `stride` bytes per row. A set bit means the background is in front
/// of the actor at that pixel, so the pixel is not drawn. Pixels outside the mask are never masked.
#[derive(Debug, Clone, Copy)]
pub struct ZPlane<'a> {
	bits: &'a [u8],
	stride: usize,
}

impl<'a> ZPlane<'a> {
	/// Wraps mask bits laid out `stride` bytes per row.
	pub fn new(bits: &'a [u8], stride: usize) -> Self {
		Self {
			bits,
			stride,
		}
	}

	/// Returns true if the pixel at (`x`, `y`) is covered.
	#[inline]
	pub fn is_masked(&self, x: i32, y: i32) -> bool {
		let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
			return false;
		};
		if x / 8 >= self.stride {
			return false;
		}
		self.bits.get(y * self.stride + x / 8).is_some_and(|byte| byte & (0x80 >> (x & 7)) != 0)
	}
}

/// Owned occlusion mask, sized to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskLayer {
	bits: Vec<u8>,
	stride: usize,
	width: usize,
	height: usize,
}

impl MaskLayer {
	/// Creates an empty mask covering `width` x `height` pixels.
	pub fn new(width: usize, height: usize) -> Self {
		let stride = width.div_ceil(8);
		Self {
			bits: vec![0; stride * height],
			stride,
			width,
			height,
		}
	}

	/// Wraps raw mask bits laid out `stride` bytes per row.
	pub fn from_bits(bits: Vec<u8>, stride: usize) -> Self {
		let height = bits.len().checked_div(stride).unwrap_or(0);
		Self {
			bits,
			stride,
			width: stride * 8,
			height,
		}
	}

	/// Marks or clears the pixel at (`x`, `y`).
	pub fn set(&mut self, x: usize, y: usize, masked: bool) {
		if x >= self.width || y >= self.height {
			return;
		}
		let bit = 0x80 >> (x & 7);
		let byte = &mut self.bits[y * self.stride + x / 8];
		if masked {
			*byte |= bit;
		} else {
			*byte &= !bit;
		}
	}

	/// Marks every pixel of `rect` that lies inside the mask.
	pub fn fill_rect(&mut self, rect: Rect) {
		for y in rect.top.max(0)..rect.bottom.max(0) {
			for x in rect.left.max(0)..rect.right.max(0) {
				self.set(x as usize, y as usize, true);
			}
		}
	}

	/// Borrows the mask for a blit.
	pub fn as_plane(&self) -> ZPlane<'_> {
		ZPlane::new(&self.bits, self.stride)
	}
}
