//! Benchmark suite for the limb interpreter and the stage
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench interpreter

use std::{hint::black_box, sync::Arc};

use akos_benches::{generate_costume, generate_limb_program};
use akos_types::{
	codec::{Codec, Surface},
	config::{ByteOrder, InterpreterConfig, TitleConfig},
	render::Stage,
	vm::{ActorId, CostumeState, Interpreter, NullSink, disassemble},
};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

/// Benchmark stepping every limb of one costume
fn bench_animate(c: &mut Criterion) {
	let mut group = c.benchmark_group("vm_animate");
	let costume = generate_costume(Codec::RunTag16, 16, 8, 8, 16);
	let mut interpreter = Interpreter::new(InterpreterConfig::default().with_seed(1), ByteOrder::Big, NullSink);
	let mut state = CostumeState::new();
	if let Err(err) = interpreter.start_animation(&costume, &mut state, 0) {
		eprintln!("Warning: Could not start animation: {err}");
		return;
	}

	group.throughput(Throughput::Elements(16));
	group.bench_function("sixteen_limbs", |b| {
		b.iter(|| {
			interpreter.animate(ActorId(1), black_box(&costume), &mut state);
		});
	});

	group.finish();
}

/// Benchmark listing a long program
fn bench_disassemble(c: &mut Criterion) {
	let mut group = c.benchmark_group("vm_disassemble");
	let program = generate_limb_program(120);

	group.throughput(Throughput::Bytes(program.len() as u64));
	group.bench_function("listing", |b| {
		b.iter(|| disassemble(black_box(&program), ByteOrder::Big).count());
	});

	group.finish();
}

/// Full frame: animate and draw a crowd of actors
fn bench_render_frame(c: &mut Criterion) {
	let mut group = c.benchmark_group("stage_render");
	let costume = Arc::new(generate_costume(Codec::RunTag16, 8, 48, 64, 4));
	let mut stage = Stage::new(TitleConfig::default(), NullSink);
	for id in 0..12u16 {
		let actor = stage.add_actor(ActorId(id));
		actor.set_position(20 + i32::from(id) * 25, 100 + i32::from(id % 3) * 30);
		actor.mirror = id % 2 == 1;
		if stage.set_costume(ActorId(id), Arc::clone(&costume)).is_err() || stage.start_animation(ActorId(id), 0).is_err() {
			eprintln!("Warning: Could not set up actor {id}");
			return;
		}
	}
	let mut screen = vec![0u8; 320 * 200];

	group.sample_size(50);
	group.bench_function("twelve_actors", |b| {
		b.iter(|| {
			let Ok(mut surface) = Surface::packed(&mut screen, 320, 200) else {
				return;
			};
			black_box(stage.render_frame(&mut surface));
		});
	});

	group.finish();
}

criterion_group!(benches, bench_animate, bench_disassemble, bench_render_frame);

criterion_main!(benches);
