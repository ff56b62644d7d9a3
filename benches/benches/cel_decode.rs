//! Benchmark suite for cel decoding
//!
//! This benchmark measures the run-length decoders on synthetic cels, at 1:1 and scaled, plain and
//! mirrored, and the encoder that produces the streams.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench cel_decode

use akos_benches::generate_cel_pixels;
use akos_types::{
	codec::{BlitParams, CelFormat, Codec, Surface, draw_cel, encode_cel},
	config::ByteOrder,
	file::CelInfo,
};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const WIDTH: u16 = 96;
const HEIGHT: u16 = 128;

fn formats() -> [(&'static str, CelFormat); 3] {
	[
		("byte_rle", CelFormat::new(Codec::ByteRle, ByteOrder::Big)),
		("run_tag8", CelFormat::new(Codec::RunTag8, ByteOrder::Big)),
		("run_tag16", CelFormat::new(Codec::RunTag16, ByteOrder::Little)),
	]
}

/// Benchmark decoding into a surface with various placements
fn bench_draw(c: &mut Criterion) {
	let mut group = c.benchmark_group("cel_draw");
	let pixels = generate_cel_pixels(WIDTH, HEIGHT, 16);
	let info = CelInfo::new(WIDTH, HEIGHT);
	let palette: [u8; 256] = core::array::from_fn(|i| i as u8);
	let mut screen = vec![0u8; 320 * 200];

	group.throughput(Throughput::Elements(u64::from(WIDTH) * u64::from(HEIGHT)));
	for (name, format) in formats() {
		let data = match encode_cel(&pixels, WIDTH, HEIGHT, format, 0) {
			Ok(data) => data,
			Err(err) => {
				eprintln!("Warning: Could not encode {name}: {err}");
				continue;
			}
		};

		for (variant, scale, mirror) in [("identity", 255, false), ("mirrored", 255, true), ("half", 128, false)] {
			let params = BlitParams::new(&palette, format).at(160, 40).scaled(scale, scale).mirrored(mirror);
			group.bench_with_input(BenchmarkId::new(name, variant), &data, |b, data| {
				b.iter(|| {
					let Ok(mut surface) = Surface::packed(&mut screen, 320, 200) else {
						return;
					};
					black_box(draw_cel(&mut surface, &info, black_box(data), &params));
				});
			});
		}
	}

	group.finish();
}

/// Benchmark the encoders
fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("cel_encode");
	let pixels = generate_cel_pixels(WIDTH, HEIGHT, 16);

	group.throughput(Throughput::Elements(pixels.len() as u64));
	for (name, format) in formats() {
		group.bench_function(name, |b| {
			b.iter(|| black_box(encode_cel(black_box(&pixels), WIDTH, HEIGHT, format, 0)));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_draw, bench_encode);

criterion_main!(benches);
