//! Per-decode scratch state: the source cursor, the scale accumulators and the destination mapping.
//!
//! A [`Raster`] is built fresh for every cel and dropped when the cel is done, so nothing leaks from
//! one decode into the next.

use super::{Pen, Rect, Surface};

/// Traversal order of the compressed pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Order {
	/// Left to right, then top to bottom
	RowMajor,
	/// Top to bottom, then left to right
	ColumnMajor,
}

/// Nearest-neighbour scale accumulator for one axis.
///
/// The accumulator starts one step short of the threshold, so the first source pixel always lands
/// and `len` source pixels produce `((len - 1) * scale) / 255 + 1` destination pixels.
#[derive(Debug, Clone, Copy)]
struct Axis {
	scale: u32,
	acc: u32,
	next: i32,
}

impl Axis {
	fn new(scale: u8) -> Self {
		let scale = u32::from(scale);
		Self {
			scale,
			acc: 255 - scale,
			next: 0,
		}
	}

	#[inline]
	fn step(&mut self) -> Option<i32> {
		self.acc += self.scale;
		if self.acc < 255 {
			return None;
		}
		self.acc -= 255;
		let at = self.next;
		self.next += 1;
		Some(at)
	}
}

/// Geometry of one blit, resolved before decoding starts
#[derive(Debug, Clone, Copy)]
pub(super) struct Placement {
	/// Left edge of the scaled cel
	pub origin_x: i32,
	/// Top edge of the scaled cel
	pub origin_y: i32,
	/// Scaled width
	pub out_width: i32,
	/// Columns run right to left
	pub mirror: bool,
	/// Part of the scaled cel that may be written
	pub visible: Rect,
}

#[derive(Debug)]
pub(super) struct Raster {
	order: Order,
	line_len: u32,
	line_count: u32,
	pos: u32,
	line: u32,
	minor_scale: u8,
	minor: Axis,
	major: Axis,
	line_at: Option<i32>,
	place: Placement,
	touched: Rect,
}

impl Raster {
	pub(super) fn new(
		order: Order,
		width: u16,
		height: u16,
		scale_x: u8,
		scale_y: u8,
		place: Placement,
	) -> Self {
		let (line_len, line_count, minor_scale, major_scale) = match order {
			Order::RowMajor => (width, height, scale_x, scale_y),
			Order::ColumnMajor => (height, width, scale_y, scale_x),
		};
		let mut major = Axis::new(major_scale);
		let line_at = major.step();

		Self {
			order,
			line_len: u32::from(line_len),
			line_count: u32::from(line_count),
			pos: 0,
			line: 0,
			minor_scale,
			minor: Axis::new(minor_scale),
			major,
			line_at,
			place,
			touched: Rect::EMPTY,
		}
	}

	/// True once every source pixel has been consumed.
	#[inline]
	pub(super) fn finished(&self) -> bool {
		self.line >= self.line_count
	}

	/// Rectangle of the pixels actually written so far.
	pub(super) fn touched(&self) -> Rect {
		self.touched
	}

	/// Consumes one source pixel and returns where it lands, if it lands in the visible area.
	#[inline]
	fn advance(&mut self) -> Option<(i32, i32)> {
		if self.finished() {
			return None;
		}

		let target = match (self.minor.step(), self.line_at) {
			(Some(minor), Some(line)) => Some(self.map(minor, line)),
			_ => None,
		};

		self.pos += 1;
		if self.pos == self.line_len {
			self.pos = 0;
			self.line += 1;
			self.minor = Axis::new(self.minor_scale);
			self.line_at = if self.finished() {
				None
			} else {
				self.major.step()
			};
		}

		target.filter(|&(x, y)| self.place.visible.contains(x, y))
	}

	#[inline]
	fn map(&self, minor: i32, line: i32) -> (i32, i32) {
		let (dx, dy) = match self.order {
			Order::RowMajor => (minor, line),
			Order::ColumnMajor => (line, minor),
		};
		let x = if self.place.mirror {
			self.place.origin_x + self.place.out_width - 1 - dx
		} else {
			self.place.origin_x + dx
		};
		(x, self.place.origin_y + dy)
	}

	/// Steps over `count` transparent pixels.
	pub(super) fn skip(&mut self, count: u32) {
		for _ in 0..count {
			if self.finished() {
				break;
			}
			self.advance();
		}
	}

	/// Writes `color` to the next `count` pixels.
	pub(super) fn fill(&mut self, surface: &mut Surface<'_>, pen: &Pen<'_>, color: u8, count: u32) {
		for _ in 0..count {
			if self.finished() {
				break;
			}
			if let Some((x, y)) = self.advance() {
				self.plot(surface, pen, x, y, color);
			}
		}
	}

	/// Writes literal pixels.
	pub(super) fn copy(&mut self, surface: &mut Surface<'_>, pen: &Pen<'_>, literals: &[u8]) {
		for &color in literals {
			if self.finished() {
				break;
			}
			if let Some((x, y)) = self.advance() {
				self.plot(surface, pen, x, y, color);
			}
		}
	}

	#[inline]
	fn plot(&mut self, surface: &mut Surface<'_>, pen: &Pen<'_>, x: i32, y: i32, color: u8) {
		if let Some(ink) = pen.ink(surface, x, y, color) {
			surface.put(x, y, ink);
			self.touched.include(x, y);
		}
	}
}
