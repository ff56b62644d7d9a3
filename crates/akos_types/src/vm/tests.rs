use super::*;
use crate::{
	VmError,
	codec::Codec,
	config::{ByteOrder, InterpreterConfig},
	file::{Costume, CostumeBuilder, LimbCommand, LimbMode},
};

const ACTOR: ActorId = ActorId(1);

fn costume_with_code(mode: LimbMode, code: &[u8]) -> Costume {
	let mut builder = CostumeBuilder::new(Codec::RunTag8);
	let start = builder.append_sequence(code).unwrap();
	builder.set_animation(0, vec![(0, LimbCommand::Start {
		mode,
		start,
		len: code.len() as u16,
	})]);
	builder.build_costume().unwrap()
}

fn costume_with(mode: LimbMode, program: &[Instruction<'_>]) -> Costume {
	costume_with_code(mode, &assemble(program, ByteOrder::Big).unwrap())
}

fn interpreter(config: InterpreterConfig) -> Interpreter<RecordingSink> {
	Interpreter::new(config.with_seed(7), ByteOrder::Big, RecordingSink::new())
}

fn started(costume: &Costume) -> CostumeState {
	let mut state = CostumeState::new();
	assert!(state.start_animation(costume, 0, ByteOrder::Big).unwrap());
	state
}

/// Runs one tick of limb 0 and returns its cel.
fn tick(vm: &mut Interpreter<RecordingSink>, costume: &Costume, state: &mut CostumeState) -> Option<u16> {
	vm.tick(ACTOR, costume, state, 0).cel
}

#[test]
fn test_conditional_jump_selects_cel() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::SetVar {
			var: 0,
			value: 5,
		},
		Instruction::JumpIf {
			cmp: Comparison::Equal,
			target: 13,
			var: 0,
			value: 5,
		},
		Instruction::Cel(99),
		Instruction::Cel(7),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);
	assert_eq!(state.limb(0).unwrap().cel(), None);

	for _ in 0..4 {
		assert_eq!(tick(&mut vm, &costume, &mut state), Some(7));
	}
	let limb = state.limb(0).unwrap();
	assert_eq!(limb.var(0), 5);
	assert!(limb.is_primed());
	assert_eq!(limb.fault(), None);
}

#[test_log::test]
fn test_jump_cycle_freezes_limb() {
	let costume = costume_with(LimbMode::Loop, &[
		Instruction::Jump {
			target: 0,
		},
	]);
	let mut vm = interpreter(InterpreterConfig::strict());
	let mut state = started(&costume);

	assert_eq!(tick(&mut vm, &costume, &mut state), None);
	let limb = state.limb(0).unwrap();
	assert!(limb.is_frozen());
	assert_eq!(limb.fault(), Some(&VmError::RunawayLoop {
		limit: 100,
		pc: 0,
	}));

	// Frozen limbs ignore ticks and new starts.
	state.limb_mut(0).unwrap().set_var(3, 11);
	assert_eq!(tick(&mut vm, &costume, &mut state), None);
	state.start_animation(&costume, 0, ByteOrder::Big).unwrap();
	let limb = state.limb(0).unwrap();
	assert!(limb.is_frozen());
	assert_eq!(limb.var(3), 11);
}

#[test]
fn test_skip_consumes_next_instruction() {
	let program = |value| {
		[
			Instruction::SetVar {
				var: 0,
				value: 1,
			},
			Instruction::SkipIf {
				cmp: Comparison::Equal,
				var: 0,
				value,
			},
			Instruction::Cel(9),
			Instruction::Cel(4),
		]
	};
	let mut vm = interpreter(InterpreterConfig::default());

	// Condition fails: the skip is armed and Cel 9 passed over.
	let costume = costume_with(LimbMode::Run, &program(2));
	let mut state = started(&costume);
	assert_eq!(tick(&mut vm, &costume, &mut state), Some(4));
	assert!(!state.limb(0).unwrap().skip_armed());

	// Condition holds: execution falls through.
	let costume = costume_with(LimbMode::Run, &program(1));
	let mut state = started(&costume);
	assert_eq!(tick(&mut vm, &costume, &mut state), Some(9));
}

#[test]
fn test_skip_covers_jump_table_width() {
	let raw = [0x00, 0x20, 0x00, 0x21];
	let costume = costume_with(LimbMode::Run, &[
		Instruction::SetVar {
			var: 1,
			value: 1,
		},
		Instruction::SkipIf {
			cmp: Comparison::Equal,
			var: 1,
			value: 0,
		},
		Instruction::JumpTable {
			var: 1,
			targets: JumpTargets::new(&raw, ByteOrder::Big),
		},
		Instruction::Cel(3),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	assert_eq!(tick(&mut vm, &costume, &mut state), Some(3));
	assert_eq!(state.limb(0).unwrap().pc(), 18);
}

#[test]
fn test_clear_flag_is_never_skipped() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::SkipIf {
			cmp: Comparison::Equal,
			var: 0,
			value: 1,
		},
		Instruction::ClearFlag,
		Instruction::Cel(9),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	assert_eq!(tick(&mut vm, &costume, &mut state), Some(9));
	assert!(!state.limb(0).unwrap().skip_armed());
}

#[test]
fn test_jump_if_set_clears_var() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::SetVar {
			var: 2,
			value: 1,
		},
		Instruction::JumpIfSet {
			target: 11,
			var: 2,
		},
		Instruction::Cel(1),
		Instruction::Cel(2),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	assert_eq!(tick(&mut vm, &costume, &mut state), Some(2));
	assert_eq!(state.limb(0).unwrap().var(2), 0);
}

#[test]
fn test_arithmetic() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::IncVar,
		Instruction::IncVar,
		Instruction::AddVar {
			var: 0,
			value: -5,
		},
		Instruction::AddVar {
			var: 4,
			value: 300,
		},
		Instruction::Cel(0),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	assert_eq!(tick(&mut vm, &costume, &mut state), Some(0));
	let limb = state.limb(0).unwrap();
	assert_eq!(limb.var(0), -3);
	assert_eq!(limb.var(4), 300);
}

#[test]
fn test_jump_table_is_one_based() {
	let raw = [0x00, 0x09, 0x00, 0x0A];
	let costume = costume_with(LimbMode::Run, &[
		Instruction::JumpTable {
			var: 0,
			targets: JumpTargets::new(&raw, ByteOrder::Big),
		},
		Instruction::Cel(1),
		Instruction::Cel(2),
		Instruction::Cel(3),
	]);
	let mut vm = interpreter(InterpreterConfig::default());

	for (index, expected) in [(0, 1), (1, 2), (2, 3), (3, 1), (-1, 1)] {
		let mut state = started(&costume);
		state.limb_mut(0).unwrap().set_var(0, index);
		assert_eq!(tick(&mut vm, &costume, &mut state), Some(expected), "index {index}");
	}
}

#[test]
fn test_loop_wraps_and_run_holds() {
	let program = [Instruction::Cel(1), Instruction::Cel(2)];
	let mut vm = interpreter(InterpreterConfig::default());

	let costume = costume_with(LimbMode::Loop, &program);
	let mut state = started(&costume);
	assert_eq!(state.limb(0).unwrap().cel(), Some(1));
	let shown: Vec<_> = (0..5).map(|_| tick(&mut vm, &costume, &mut state)).collect();
	assert_eq!(shown, [Some(2), Some(1), Some(2), Some(1), Some(2)]);

	let costume = costume_with(LimbMode::Run, &program);
	let mut state = started(&costume);
	let shown: Vec<_> = (0..3).map(|_| tick(&mut vm, &costume, &mut state)).collect();
	assert_eq!(shown, [Some(2), Some(2), Some(2)]);
}

#[test]
fn test_user_constant_holds_cel() {
	let costume = costume_with(LimbMode::UserConstant, &[Instruction::Cel(1), Instruction::Cel(2)]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	for _ in 0..3 {
		assert_eq!(tick(&mut vm, &costume, &mut state), Some(1));
	}
}

#[test]
fn test_pause_and_resume() {
	let code = assemble(&[Instruction::Cel(1), Instruction::Cel(2)], ByteOrder::Big).unwrap();
	let mut builder = CostumeBuilder::new(Codec::RunTag8);
	let start = builder.append_sequence(&code).unwrap();
	let run = |mode| LimbCommand::Start {
		mode,
		start,
		len: 2,
	};
	builder
		.set_animation(0, vec![(0, run(LimbMode::Loop)), (1, run(LimbMode::AlwaysRun))])
		.set_animation(1, vec![(0, LimbCommand::Pause), (1, LimbCommand::Pause)])
		.set_animation(2, vec![(0, LimbCommand::Resume)]);
	let costume = builder.build_costume().unwrap();

	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);
	vm.start_animation(&costume, &mut state, 1).unwrap();
	vm.animate(ACTOR, &costume, &mut state);
	assert!(state.limb(0).unwrap().is_paused());
	assert_eq!(state.frame(0).cel, Some(1));
	// AlwaysRun limbs ignore pauses.
	assert_eq!(state.frame(1).cel, Some(2));

	vm.start_animation(&costume, &mut state, 2).unwrap();
	assert_eq!(state.animation(), Some(2));
	assert_eq!(tick(&mut vm, &costume, &mut state), Some(2));
}

#[test]
fn test_idle_and_empty_limbs_show_nothing() {
	let mut builder = CostumeBuilder::new(Codec::RunTag8);
	let start = builder.append_sequence(&[0x01]).unwrap();
	builder.set_animation(0, vec![(0, LimbCommand::Start {
		mode: LimbMode::Loop,
		start,
		len: 0,
	})]);
	let costume = builder.build_costume().unwrap();

	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);
	assert_eq!(tick(&mut vm, &costume, &mut state), None);
	assert_eq!(vm.tick(ACTOR, &costume, &mut state, 5).cel, None);
	assert_eq!(vm.tick(ACTOR, &costume, &mut state, NUM_LIMBS).cel, None);
	assert_eq!(state.limb(0).unwrap().fault(), None);
}

#[test]
fn test_flip_toggles_mirror() {
	let costume = costume_with(LimbMode::Loop, &[
		Instruction::Flip {
			value: 1,
		},
		Instruction::Flip {
			value: 0,
		},
		Instruction::Cel(5),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	let frame = vm.tick(ACTOR, &costume, &mut state, 0);
	assert_eq!(frame.cel, Some(5));
	assert!(frame.mirror);
	// The loop wraps and runs the toggle again.
	assert!(!vm.tick(ACTOR, &costume, &mut state, 0).mirror);
	assert!(!state.is_flipped());
}

#[test]
fn test_actor_state_instructions() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::HideActor,
		Instruction::SetDrawOffs {
			x: -3,
			y: 4,
		},
		Instruction::SetActorClip {
			mode: 2,
		},
		Instruction::Ignore {
			opcode: Opcode::Ignore2,
			operand: 7,
		},
		Instruction::Cel(0),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	let frame = vm.tick(ACTOR, &costume, &mut state, 0);
	assert_eq!(frame, LimbFrame {
		cel: Some(0),
		mirror: false,
		draw_offset: (-3, 4),
		hidden: true,
	});
	assert_eq!(state.clip_mode(), 2);

	state.set_hidden(false);
	assert!(!state.frame(0).hidden);
}

#[test]
fn test_side_effects_reach_sink() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::SoundStuff {
			slot: 1,
			code: 2,
			arg: 3,
		},
		Instruction::CmdQue3 {
			slot: 4,
		},
		Instruction::CmdQue3Quick,
		Instruction::Cel(0),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);
	tick(&mut vm, &costume, &mut state);

	let sink = vm.into_sink();
	assert_eq!(sink.sounds, [SoundRequest {
		actor: ACTOR,
		slot: 1,
		code: 2,
		arg: 3,
	}]);
	assert_eq!(sink.commands, [
		QueuedCommand {
			actor: ACTOR,
			command: 3,
			param1: 4,
			param2: 0,
		},
		QueuedCommand {
			actor: ACTOR,
			command: 3,
			param1: 2,
			param2: 0,
		},
	]);
}

#[test]
fn test_sink_by_reference() {
	let costume = costume_with(LimbMode::Run, &[Instruction::CmdQue3Quick, Instruction::Cel(0)]);
	let mut sink = RecordingSink::new();
	{
		let mut vm = Interpreter::new(InterpreterConfig::default(), ByteOrder::Big, &mut sink);
		let mut state = started(&costume);
		vm.animate(ACTOR, &costume, &mut state);
	}
	assert_eq!(sink.commands.len(), 1);
}

#[test]
fn test_animation_commands_are_queued() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::SetVar {
			var: 0,
			value: 2,
		},
		Instruction::SetVar {
			var: 1,
			value: 9,
		},
		Instruction::SetVar {
			var: 2,
			value: 3,
		},
		Instruction::StartAnim {
			anim: 1,
		},
		Instruction::StartVarAnim {
			var: 0,
		},
		Instruction::StartAnimInActor {
			actor_var: 1,
			anim_var: 2,
		},
		Instruction::SetVarInActor {
			actor_var: 1,
			var: 5,
			value: 42,
		},
		Instruction::Cel(0),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);
	tick(&mut vm, &costume, &mut state);

	let queued: Vec<_> = vm.queue_mut().drain().collect();
	assert_eq!(queued, [
		AnimCommand::Start {
			actor: ACTOR,
			anim: 1,
		},
		AnimCommand::Start {
			actor: ACTOR,
			anim: 2,
		},
		AnimCommand::Start {
			actor: ActorId(9),
			anim: 3,
		},
		AnimCommand::SetVar {
			actor: ActorId(9),
			limb: 0,
			var: 5,
			value: 42,
		},
	]);
	assert!(vm.queue().is_empty());
	// Nothing starts until the queue is applied.
	assert_eq!(state.animation(), Some(0));
}

#[test_log::test]
fn test_invalid_queue_targets_are_dropped() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::SetVar {
			var: 0,
			value: -1,
		},
		Instruction::StartVarAnim {
			var: 0,
		},
		Instruction::StartAnimInActor {
			actor_var: 0,
			anim_var: 1,
		},
		Instruction::SetVarInActor {
			actor_var: 0,
			var: 1,
			value: 1,
		},
		Instruction::Cel(0),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	assert_eq!(tick(&mut vm, &costume, &mut state), Some(0));
	assert!(vm.queue().is_empty());
}

#[test_log::test]
fn test_truncated_instruction_keeps_cel() {
	// Cel 6, then a SetVar cut off after its value
	let costume = costume_with_code(LimbMode::Run, &[0x06, 0xC0, 0x10, 0x00]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);
	assert_eq!(state.limb(0).unwrap().cel(), Some(6));

	assert_eq!(tick(&mut vm, &costume, &mut state), Some(6));
	let limb = state.limb(0).unwrap();
	assert_eq!(limb.fault(), Some(&VmError::Truncated {
		pc: 1,
	}));
	assert!(!limb.is_frozen());

	// The same instruction is retried on later ticks.
	assert_eq!(tick(&mut vm, &costume, &mut state), Some(6));
	assert!(!state.limb(0).unwrap().is_frozen());

	// Restarting clears the fault.
	assert!(state.start_animation(&costume, 0, ByteOrder::Big).unwrap());
	let limb = state.limb(0).unwrap();
	assert_eq!(limb.fault(), None);
	assert_eq!(limb.cel(), Some(6));
}

#[test_log::test]
fn test_return_resumes_loop() {
	let costume = costume_with(LimbMode::Loop, &[Instruction::Cel(1), Instruction::Cel(2), Instruction::Return]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);
	assert_eq!(state.limb(0).unwrap().cel(), Some(1));

	let cels: Vec<_> = (0..7).map(|_| tick(&mut vm, &costume, &mut state)).collect();
	assert_eq!(cels, [2, 2, 1, 2, 2, 1, 2].map(Some));
	assert_eq!(state.limb(0).unwrap().fault(), None);
}

#[test_log::test]
fn test_return_resumes_run() {
	let costume = costume_with(LimbMode::Run, &[Instruction::Cel(1), Instruction::Return, Instruction::Cel(2)]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	let cels: Vec<_> = (0..4).map(|_| tick(&mut vm, &costume, &mut state)).collect();
	assert_eq!(cels, [1, 2, 2, 2].map(Some));
	// Run mode rests on the final cel.
	assert_eq!(state.limb(0).unwrap().pc(), 3);
}

#[test_log::test]
fn test_zero_step_limit_still_displays() {
	let costume = costume_with(LimbMode::Loop, &[Instruction::Cel(3), Instruction::Cel(4)]);
	let mut vm = interpreter(InterpreterConfig::new(0));
	let mut state = started(&costume);

	let cels: Vec<_> = (0..4).map(|_| tick(&mut vm, &costume, &mut state)).collect();
	assert_eq!(cels, [4, 3, 4, 3].map(Some));
	let limb = state.limb(0).unwrap();
	assert!(!limb.is_frozen());
	assert_eq!(limb.fault(), None);
}

#[test]
fn test_encode_rejects_oversized_operands() {
	let raw = vec![0x00; 512];
	let mut out = Vec::new();
	let table = Instruction::JumpTable {
		var: 0,
		targets: JumpTargets::new(&raw, ByteOrder::Big),
	};
	assert_eq!(table.encode(ByteOrder::Big, &mut out), Err(VmError::OperandOutOfRange {
		what: "jump table size",
		value: 256,
		max: 255,
	}));
	assert!(out.is_empty());

	assert_eq!(
		assemble(&[Instruction::Cel(0), Instruction::Cel(0x1000)], ByteOrder::Big),
		Err(VmError::OperandOutOfRange {
			what: "cel",
			value: 0x1000,
			max: 0x0FFF,
		})
	);
	assert_eq!(assemble(&[Instruction::Cel(0x0FFF)], ByteOrder::Big).unwrap(), [0x8F, 0xFF]);
}

#[test_log::test]
fn test_unknown_opcode_is_skipped() {
	let costume = costume_with_code(LimbMode::Run, &[0xC0, 0xEE, 0x05]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	assert_eq!(tick(&mut vm, &costume, &mut state), Some(5));
	assert_eq!(state.limb(0).unwrap().fault(), None);
}

#[test_log::test]
fn test_out_of_range_vars() {
	let costume = costume_with(LimbMode::Run, &[
		Instruction::SetVar {
			var: 20,
			value: 1,
		},
		Instruction::JumpIf {
			cmp: Comparison::Equal,
			target: 13,
			var: 20,
			value: 0,
		},
		Instruction::Cel(1),
		Instruction::Cel(2),
	]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	assert_eq!(tick(&mut vm, &costume, &mut state), Some(2));
	assert_eq!(state.limb(0).unwrap().vars(), &[0; NUM_VARS]);
}

#[test]
fn test_wide_cel_words() {
	let costume = costume_with(LimbMode::Loop, &[Instruction::Cel(0x123), Instruction::Cel(0x7F)]);
	let mut vm = interpreter(InterpreterConfig::default());
	let mut state = started(&costume);

	assert_eq!(costume.sequence(), &[0x81, 0x23, 0x7F]);
	assert_eq!(state.limb(0).unwrap().cel(), Some(0x123));
	assert_eq!(tick(&mut vm, &costume, &mut state), Some(0x7F));
	assert_eq!(tick(&mut vm, &costume, &mut state), Some(0x123));
}

#[test]
fn test_random_is_bounded_and_seeded() {
	let costume = costume_with(LimbMode::Loop, &[
		Instruction::Random {
			min: 10,
			max: 3,
			var: 0,
		},
		Instruction::Cel(0),
	]);
	let rolls = |seed| {
		let mut vm = Interpreter::new(InterpreterConfig::default().with_seed(seed), ByteOrder::Big, NullSink);
		let mut state = started(&costume);
		(0..50)
			.map(|_| {
				vm.tick(ACTOR, &costume, &mut state, 0);
				state.limb(0).unwrap().var(0)
			})
			.collect::<Vec<_>>()
	};

	let first = rolls(42);
	assert!(first.iter().all(|value| (3..=10).contains(value)));
	assert_eq!(first, rolls(42));
}

#[test]
fn test_little_endian_operands() {
	let code = assemble(
		&[
			Instruction::SetVar {
				var: 0,
				value: 0x0102,
			},
			Instruction::Cel(0),
		],
		ByteOrder::Little,
	).unwrap();
	assert_eq!(&code[..5], &[0xC0, 0x10, 0x02, 0x01, 0x00]);

	let costume = costume_with_code(LimbMode::Run, &code);
	let mut vm = Interpreter::new(InterpreterConfig::default(), ByteOrder::Little, NullSink);
	let mut state = CostumeState::new();
	vm.start_animation(&costume, &mut state, 0).unwrap();
	vm.tick(ACTOR, &costume, &mut state, 0);
	assert_eq!(state.limb(0).unwrap().var(0), 0x0102);
}

#[test]
fn test_disassembly_listing() {
	let raw = [0x00, 0x02];
	let mut code = assemble(
		&[
			Instruction::SetVar {
				var: 0,
				value: 5,
			},
			Instruction::JumpIf {
				cmp: Comparison::Equal,
				target: 13,
				var: 0,
				value: 5,
			},
			Instruction::JumpTable {
				var: 3,
				targets: JumpTargets::new(&raw, ByteOrder::Big),
			},
			Instruction::Cel(7),
		],
		ByteOrder::Big,
	).unwrap();
	code.extend_from_slice(&[0xC0, 0x30, 0x00]);

	let listing: Vec<_> = disassemble(&code, ByteOrder::Big)
		.map(|(pc, instruction)| (pc, instruction.map(|i| i.to_string())))
		.collect();
	assert_eq!(listing, [
		(0, Ok("SetVar var[0] = 5".to_string())),
		(5, Ok("JumpE 0x000D if var[0] == 5".to_string())),
		(12, Ok("JumpTable var[3] [0x0002]".to_string())),
		(18, Ok("Cel 7".to_string())),
		(19, Err(VmError::Truncated {
			pc: 19,
		})),
	]);
}

#[test]
fn test_opcode_table() {
	for opcode in Opcode::ALL {
		let word = opcode.to_u16();
		assert_eq!(Opcode::from_u16(word), Some(opcode));
		assert_eq!((word >> 8) as u8, opcode::OPCODE_MARKER);

		// Zeroed operands decode at the table width.
		let mut stream = word.to_be_bytes().to_vec();
		stream.resize(8, 0);
		let (_, width) = Instruction::decode(&stream, 0, ByteOrder::Big).unwrap();
		assert_eq!(width, opcode.width(), "{opcode:?}");
	}
	assert_eq!(Opcode::from_u16(0xC0EE), None);
	assert_eq!(
		Instruction::decode(&[0xC0, 0xEE], 0, ByteOrder::Big).unwrap(),
		(Instruction::Unknown(0xC0EE), 2)
	);
}

#[test]
fn test_actor_id_conversions() {
	assert_eq!(ActorId::try_from(9).unwrap(), ActorId(9));
	assert!(ActorId::try_from(-1).is_err());
	assert!(ActorId::try_from(70_000).is_err());
	assert_eq!(ActorId::from(3).to_string(), "#3");
}
