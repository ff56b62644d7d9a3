//! Costume fixtures shared by the playback scenarios.

use akos_rs::prelude::*;

/// Serializes a builder and parses the bytes back, as a loader would.
pub fn load(builder: &CostumeBuilder) -> Costume {
	Costume::from_bytes(&builder.build().unwrap()).unwrap()
}

/// Appends `program` and returns a looping start command for it.
pub fn looping(builder: &mut CostumeBuilder, program: &[Instruction<'_>]) -> LimbCommand {
	let code = assemble(program, ByteOrder::Big).unwrap();
	let start = builder.append_sequence(&code).unwrap();
	LimbCommand::Start {
		mode: LimbMode::Loop,
		start,
		len: code.len() as u16,
	}
}

/// Renders one frame into a fresh `width * height` surface.
pub fn frame<S: SideEffectSink>(stage: &mut Stage<S>, width: usize, height: usize) -> (Vec<u8>, FrameStats) {
	let mut pixels = vec![0; width * height];
	let stats = stage.render_frame(&mut Surface::packed(&mut pixels, width, height).unwrap());
	(pixels, stats)
}
