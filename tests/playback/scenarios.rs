//! Playback scenarios.

use std::sync::Arc;

use akos_rs::prelude::*;

use crate::support::{frame, load, looping};

const HERO: ActorId = ActorId(1);

#[test_log::test]
fn test_solid_cel_through_palette() {
	let mut builder = CostumeBuilder::new(Codec::RunTag16);
	let mut palette: Vec<u8> = (0..16).collect();
	palette[5] = 0x42;
	builder.palette(palette).anim_count(2);
	// [Repeat 256 colour 5][EOI]
	builder.add_cel(CelInfo::new(16, 16), vec![0x81, 0x00, 0x05, 0x00, 0x00]).unwrap();
	let show = looping(&mut builder, &[Instruction::Cel(0)]);
	builder.set_animation(0, vec![(0, show)]);
	let costume = load(&builder);
	assert_eq!(costume.header().anim_count, 2);
	assert_eq!(costume.offset(0).unwrap().cel_data, 0);

	let mut stage = Stage::new(TitleConfig::default(), NullSink);
	stage.add_actor(HERO);
	stage.set_costume(HERO, Arc::new(costume)).unwrap();
	stage.start_animation(HERO, 0).unwrap();

	let (pixels, stats) = frame(&mut stage, 16, 16);
	assert!(pixels.iter().all(|&pixel| pixel == 0x42));
	assert_eq!(stats.dirty, Rect::new(0, 0, 16, 16));
}

#[test_log::test]
fn test_var_anim_survives_serialization() {
	let mut builder = CostumeBuilder::new(Codec::RunTag8);
	for color in 1..=4u8 {
		builder.add_cel_pixels(CelInfo::new(1, 1), &[color], 0, ByteOrder::Big).unwrap();
	}
	let main = assemble(
		&[
			Instruction::SetVar {
				var: 0,
				value: 3,
			},
			Instruction::StartVarAnim {
				var: 0,
			},
			Instruction::Return,
		],
		ByteOrder::Big,
	).unwrap();
	let start = builder.append_sequence(&main).unwrap();
	builder.set_animation(0, vec![(0, LimbCommand::Start {
		mode: LimbMode::Run,
		start,
		len: main.len() as u16,
	})]);
	for anim in 1..=3u16 {
		let show = looping(&mut builder, &[Instruction::Cel(anim)]);
		builder.set_animation(anim, vec![(0, show)]);
	}

	let path = std::env::temp_dir().join(format!("akos-playback-{}.akos", std::process::id()));
	builder.build_costume().unwrap().save(&path).unwrap();
	let costume = Costume::open(&path).unwrap();
	std::fs::remove_file(&path).unwrap();

	let mut stage = Stage::new(TitleConfig::default(), NullSink);
	stage.add_actor(HERO);
	stage.set_costume(HERO, Arc::new(costume)).unwrap();
	stage.start_animation(HERO, 0).unwrap();

	let (pixels, _) = frame(&mut stage, 1, 1);
	assert_eq!(stage.limb_cel(HERO, 0), Some(3));
	assert_eq!(pixels, [4]);
}

#[test_log::test]
fn test_walk_cycle() {
	let mut builder = CostumeBuilder::new(Codec::ByteRle);
	let step = CelInfo {
		move_x: 2,
		..CelInfo::new(2, 2)
	};
	for color in 1..=3u8 {
		builder.add_cel_pixels(step, &[color; 4], 0, ByteOrder::Big).unwrap();
	}
	let body = looping(&mut builder, &[Instruction::Cel(0), Instruction::Cel(1), Instruction::Cel(2)]);
	let head = looping(&mut builder, &[Instruction::Cel(2)]);
	builder.set_animation(0, vec![(0, body), (1, head)]);

	let mut stage = Stage::new(TitleConfig::default(), NullSink);
	stage.add_actor(HERO).set_position(1, 0);
	stage.set_costume(HERO, Arc::new(load(&builder))).unwrap();
	stage.start_animation(HERO, 0).unwrap();

	let mut shown = Vec::new();
	for _ in 0..6 {
		let (pixels, stats) = frame(&mut stage, 6, 2);
		assert_eq!(stats.limbs_drawn, 2);
		// The head limb sits beside the body, one cel's movement along.
		assert_eq!(pixels[3..5], [3, 3]);
		shown.push(pixels[1]);
	}
	assert_eq!(shown, [2, 3, 1, 2, 3, 1]);
}

#[test_log::test]
fn test_runaway_limb_does_not_stop_the_stage() {
	let mut builder = CostumeBuilder::new(Codec::RunTag16);
	builder.add_cel_pixels(CelInfo::new(1, 1), &[7], 0, ByteOrder::Big).unwrap();
	let cycle = looping(&mut builder, &[
		Instruction::Jump {
			target: 4,
		},
		Instruction::Jump {
			target: 0,
		},
	]);
	let show = looping(&mut builder, &[Instruction::Cel(0)]);
	builder.set_animation(0, vec![(0, cycle), (1, show)]);

	let config = TitleConfig {
		interpreter: InterpreterConfig::strict(),
		..TitleConfig::default()
	};
	let mut stage = Stage::new(config, NullSink);
	stage.add_actor(HERO);
	stage.set_costume(HERO, Arc::new(load(&builder))).unwrap();
	stage.start_animation(HERO, 0).unwrap();

	for _ in 0..3 {
		let (pixels, stats) = frame(&mut stage, 1, 1);
		assert_eq!(pixels, [7]);
		assert_eq!(stats.limbs_drawn, 1);
	}
	let limb = stage.actor(HERO).unwrap().state().limb(0).unwrap();
	assert!(limb.is_frozen());
	assert!(matches!(limb.fault(), Some(VmError::RunawayLoop { limit: 100, .. })));
}

#[test_log::test]
fn test_side_effects_carry_actor_ids() {
	let mut builder = CostumeBuilder::new(Codec::RunTag8);
	let noisy = looping(&mut builder, &[
		Instruction::SoundStuff {
			slot: 1,
			code: 8,
			arg: 0,
		},
		Instruction::CmdQue3 {
			slot: 6,
		},
		Instruction::Return,
	]);
	builder.set_animation(0, vec![(0, noisy)]);
	let costume = Arc::new(load(&builder));

	let mut sink = RecordingSink::new();
	{
		let mut stage = Stage::new(TitleConfig::default(), &mut sink);
		for id in [ActorId(3), ActorId(1)] {
			stage.add_actor(id);
			stage.set_costume(id, Arc::clone(&costume)).unwrap();
			stage.start_animation(id, 0).unwrap();
		}
		stage.animate();
	}

	let actors: Vec<_> = sink.sounds.iter().map(|sound| sound.actor).collect();
	assert_eq!(actors, [ActorId(1), ActorId(3)]);
	assert_eq!(sink.commands[0], QueuedCommand {
		actor: ActorId(1),
		command: 3,
		param1: 6,
		param2: 0,
	});
}

#[test]
fn test_disassemble_costume_sequence() {
	let mut builder = CostumeBuilder::new(Codec::RunTag16);
	let show = looping(&mut builder, &[
		Instruction::SetDrawOffs {
			x: -4,
			y: 2,
		},
		Instruction::Cel(0x0123),
	]);
	builder.set_animation(0, vec![(0, show)]);
	let costume = load(&builder);

	let listing: Vec<String> = disassemble(costume.sequence(), ByteOrder::Big)
		.map(|(pc, instruction)| format!("{pc:04X} {}", instruction.unwrap()))
		.collect();
	assert_eq!(listing, ["0000 SetDrawOffs (-4, 2)", "0006 Cel 291"]);
}
