//! Benchmark helper utilities for akos-rs
//!
//! This module generates synthetic costumes for the benchmark suite: cels with a mix of
//! transparent runs, solid runs and noisy stretches so every run kind of a codec is exercised, and
//! limb programs that loop through their cels with branches on the way.

use akos_types::{
	codec::Codec,
	config::ByteOrder,
	file::{CelInfo, Costume, CostumeBuilder, LimbCommand, LimbMode},
	vm::{Comparison, Instruction, assemble},
};

/// Generates a `width * height` cel of stored indices below `colors`.
///
/// Rows alternate between a transparent margin, a solid band and a dithered stretch.
pub fn generate_cel_pixels(width: u16, height: u16, colors: u8) -> Vec<u8> {
	let width = usize::from(width);
	let height = usize::from(height);
	let colors = colors.max(2);
	let mut pixels = Vec::with_capacity(width * height);

	for y in 0..height {
		let margin = (y * 7) % (width / 4 + 1);
		for x in 0..width {
			let pixel = if x < margin || x >= width - margin {
				0
			} else if (x / 8 + y / 8) % 2 == 0 {
				(y % usize::from(colors - 1)) as u8 + 1
			} else {
				((x * 31 + y * 17) % usize::from(colors - 1)) as u8 + 1
			};
			pixels.push(pixel);
		}
	}

	pixels
}

/// Generates a limb program that shows `cels` cels in turn, with a variable test and a skip
/// between every two of them.
pub fn generate_limb_program(cels: u16) -> Vec<u8> {
	let mut program = vec![Instruction::SetVar {
		var: 0,
		value: 0,
	}];
	for cel in 0..cels {
		program.push(Instruction::IncVar);
		program.push(Instruction::SkipIf {
			cmp: Comparison::Greater,
			var: 0,
			value: i16::MAX,
		});
		program.push(Instruction::Flip {
			value: 0,
		});
		program.push(Instruction::Cel(cel));
	}
	match assemble(&program, ByteOrder::Big) {
		Ok(code) => code,
		Err(err) => panic!("Failed to assemble synthetic program: {err}"),
	}
}

/// Generates a costume with `cels` cels of `width * height` pixels and one looping animation that
/// runs the same program on `limbs` limbs.
pub fn generate_costume(codec: Codec, cels: u16, width: u16, height: u16, limbs: usize) -> Costume {
	let mut builder = CostumeBuilder::new(codec);
	let pixels = generate_cel_pixels(width, height, 16);
	for cel in 0..cels {
		let info = CelInfo {
			rel_x: -(width as i16) / 2,
			rel_y: -(height as i16),
			move_x: (cel % 3) as i16,
			..CelInfo::new(width, height)
		};
		if let Err(err) = builder.add_cel_pixels(info, &pixels, 0, ByteOrder::Big) {
			panic!("Failed to encode synthetic cel: {err}");
		}
	}

	let code = generate_limb_program(cels);
	let start = match builder.append_sequence(&code) {
		Ok(start) => start,
		Err(err) => panic!("Failed to append synthetic program: {err}"),
	};
	let limbs = (0..limbs)
		.map(|limb| {
			(limb, LimbCommand::Start {
				mode: LimbMode::Loop,
				start,
				len: code.len() as u16,
			})
		})
		.collect();
	builder.set_animation(0, limbs);

	match builder.build_costume() {
		Ok(costume) => costume,
		Err(err) => panic!("Failed to parse synthetic costume: {err}"),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generated_costume_parses() {
		let costume = generate_costume(Codec::RunTag16, 4, 32, 24, 3);
		assert_eq!(costume.cel_count(), 4);
		assert!(costume.animation(0).unwrap().is_some());
	}

	#[test]
	fn test_cel_pixels_are_in_range() {
		let pixels = generate_cel_pixels(40, 10, 16);
		assert_eq!(pixels.len(), 400);
		assert!(pixels.iter().all(|&pixel| pixel < 16));
		assert!(pixels.contains(&0));
	}
}
