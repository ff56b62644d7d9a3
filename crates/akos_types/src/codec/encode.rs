//! Cel encoders, the inverse of the run readers.
//!
//! Used by [`CostumeBuilder`](crate::file::CostumeBuilder) to assemble costumes and by tooling that
//! converts images into cels.

use crate::CelError;

use super::{CelFormat, Codec, constants};

/// Shortest run of one colour worth a repeat instead of literals.
const MIN_REPEAT: usize = 3;

/// Compresses a row-major `width` x `height` array of stored cel indices.
///
/// Pixels equal to `transparent` become skip runs (byte RLE colour 0).
///
/// # Errors
///
/// - [`CelError::InvalidDimensions`] for a zero width or height.
/// - [`CelError::PixelCountMismatch`] if `pixels` does not hold exactly `width * height` entries.
/// - [`CelError::ColorOutOfRange`] if a byte RLE colour does not fit the format's colour bits.
pub fn encode_cel(
	pixels: &[u8],
	width: u16,
	height: u16,
	format: CelFormat,
	transparent: u8,
) -> Result<Vec<u8>, CelError> {
	if width == 0 || height == 0 {
		return Err(CelError::InvalidDimensions {
			width,
			height,
		});
	}
	let expected = usize::from(width) * usize::from(height);
	if pixels.len() != expected {
		return Err(CelError::PixelCountMismatch {
			expected,
			actual: pixels.len(),
		});
	}

	match format.codec {
		Codec::ByteRle => encode_byte_rle(pixels, usize::from(width), usize::from(height), format, transparent),
		Codec::RunTag8 => Ok(encode_tagged(pixels, transparent, 0xFF, |out, tag, count| {
			let control = tag << 6;
			if count <= usize::from(constants::NARROW_COUNT_MASK) {
				out.push(control | count as u8);
			} else {
				out.extend_from_slice(&[control, count as u8]);
			}
		})),
		Codec::RunTag16 => {
			let order = format.byte_order;
			Ok(encode_tagged(
				pixels,
				transparent,
				usize::from(constants::WIDE_COUNT_MASK),
				|out, tag, count| {
					let word = (u16::from(tag) << 14) | count as u16;
					out.extend_from_slice(&order.u16_bytes(word));
				},
			))
		}
	}
}

fn encode_tagged(
	pixels: &[u8],
	transparent: u8,
	max_count: usize,
	mut control: impl FnMut(&mut Vec<u8>, u8, usize),
) -> Vec<u8> {
	let mut out = Vec::new();
	let len = pixels.len();
	let repeat_len = |at: usize| {
		let color = pixels[at];
		pixels[at..].iter().take(max_count).take_while(|&&p| p == color).count()
	};

	let mut i = 0;
	while i < len {
		if pixels[i] == transparent {
			let count = repeat_len(i);
			if i + count == len {
				break;
			}
			control(&mut out, constants::TAG_SKIP, count);
			i += count;
			continue;
		}

		let count = repeat_len(i);
		if count >= MIN_REPEAT {
			control(&mut out, constants::TAG_REPEAT, count);
			out.push(pixels[i]);
			i += count;
			continue;
		}

		let start = i;
		while i < len && i - start < max_count && pixels[i] != transparent && repeat_len(i) < MIN_REPEAT {
			i += 1;
		}
		control(&mut out, constants::TAG_COPY, i - start);
		out.extend_from_slice(&pixels[start..i]);
	}

	control(&mut out, constants::TAG_END, 0);
	out
}

fn encode_byte_rle(
	pixels: &[u8],
	width: usize,
	height: usize,
	format: CelFormat,
	transparent: u8,
) -> Result<Vec<u8>, CelError> {
	let shift = format.rle_shift;
	let max_color = format.max_rle_color();
	let max_inline = (1usize << shift) - 1;

	let column_major = (0..width).flat_map(|x| (0..height).map(move |y| pixels[y * width + x]));
	let mut colors = Vec::with_capacity(pixels.len());
	for pixel in column_major {
		let color = if pixel == transparent {
			0
		} else {
			pixel
		};
		if color > max_color {
			return Err(CelError::ColorOutOfRange {
				color,
				max: max_color,
			});
		}
		colors.push(color);
	}

	let mut out = Vec::new();
	let mut i = 0;
	while i < colors.len() {
		let color = colors[i];
		let run = colors[i..].iter().take(256).take_while(|&&c| c == color).count();
		if run <= max_inline {
			out.push(color << shift | run as u8);
		} else {
			// 256 wraps to the zero escape
			out.extend_from_slice(&[color << shift, run as u8]);
		}
		i += run;
	}
	Ok(out)
}
