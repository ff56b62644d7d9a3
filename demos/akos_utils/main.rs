//! AKOS costume utility.
//!
//! Provides four subcommands:
//! - `info`: print the header, cel table and animation table of a costume.
//! - `disasm`: list the `AKSQ` bytecode, optionally with the raw bytes of every instruction.
//! - `render`: play an animation and write every frame to a PNG file.
//! - `demo`: write a small synthetic costume to experiment with.
//!
//! `render` reads an optional TOML title configuration:
//!
//! ```toml
//! byte_order = "little"
//!
//! [interpreter]
//! max_steps_per_tick = 100
//! rng_seed = 7
//! ```
//!
//! Environment variables override the file: `AKOS_BYTE_ORDER=little`,
//! `AKOS_INTERPRETER__MAX_STEPS_PER_TICK=100`.

use std::{
	fs,
	path::{Path, PathBuf},
	sync::Arc,
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use akos_rs::prelude::*;

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	match cli.command {
		Command::Info(opts) => run_info(opts),
		Command::Disasm(opts) => run_disasm(opts),
		Command::Render(opts) => run_render(opts),
		Command::Demo(opts) => run_demo(opts),
	}
}

#[derive(Parser)]
#[command(name = "akos_utils")]
#[command(author = "akos-rs project")]
#[command(version)]
#[command(about = "Inspect, disassemble and render AKOS costumes", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Print the header, cels and animations of a costume
	Info(InfoArgs),
	/// Disassemble the costume bytecode
	Disasm(DisasmArgs),
	/// Play an animation and save each frame as PNG
	Render(RenderArgs),
	/// Write a synthetic costume
	Demo(DemoArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Path to an AKOS costume
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Print a JSON summary instead of text
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Args)]
struct DisasmArgs {
	/// Path to an AKOS costume
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Show the raw bytes of every instruction
	#[arg(long, default_value_t = false)]
	hex: bool,

	/// Byte order of operand words
	#[arg(long, value_enum, default_value_t = Order::Big)]
	byte_order: Order,
}

#[derive(Args)]
struct RenderArgs {
	/// Path to an AKOS costume
	#[arg(value_name = "FILE")]
	file: PathBuf,

	/// Animation to start
	#[arg(short, long, default_value_t = 0)]
	anim: u16,

	/// Number of frames to render
	#[arg(short, long, default_value_t = 8)]
	frames: usize,

	/// Output directory
	#[arg(short, long, value_name = "DIR", default_value = "bin/akos_render")]
	out: PathBuf,

	/// TOML title configuration
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Surface width
	#[arg(long, default_value_t = 320)]
	width: usize,

	/// Surface height
	#[arg(long, default_value_t = 200)]
	height: usize,

	/// Actor anchor x; defaults to the surface centre
	#[arg(long)]
	x: Option<i32>,

	/// Actor anchor y; defaults to three quarters of the surface height
	#[arg(long)]
	y: Option<i32>,

	/// Draw the actor mirrored
	#[arg(long, default_value_t = false)]
	mirror: bool,
}

#[derive(Args)]
struct DemoArgs {
	/// Where to write the costume
	#[arg(value_name = "OUT")]
	out: PathBuf,

	/// Cel codec
	#[arg(long, value_enum, default_value_t = DemoCodec::RunTag16)]
	codec: DemoCodec,
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
	Big,
	Little,
}

impl From<Order> for ByteOrder {
	fn from(order: Order) -> Self {
		match order {
			Order::Big => ByteOrder::Big,
			Order::Little => ByteOrder::Little,
		}
	}
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoCodec {
	ByteRle,
	RunTag8,
	RunTag16,
}

impl From<DemoCodec> for Codec {
	fn from(codec: DemoCodec) -> Self {
		match codec {
			DemoCodec::ByteRle => Codec::ByteRle,
			DemoCodec::RunTag8 => Codec::RunTag8,
			DemoCodec::RunTag16 => Codec::RunTag16,
		}
	}
}

#[derive(Serialize)]
struct CostumeSummary {
	header: Header,
	codec: Codec,
	palette_len: usize,
	has_rgbs: bool,
	sequence_len: usize,
	cels: Vec<CelSummary>,
	animations: Vec<AnimationSummary>,
}

#[derive(Serialize)]
struct CelSummary {
	index: u16,
	offset: Offset,
	info: CelInfo,
	data_len: usize,
}

#[derive(Serialize)]
struct AnimationSummary {
	index: u16,
	limbs: Vec<(usize, LimbCommand)>,
}

fn open_costume(path: &Path) -> Result<Costume> {
	Costume::open(path).with_context(|| format!("Failed to load costume {}", path.display()))
}

fn summarize(costume: &Costume) -> Result<CostumeSummary> {
	let mut cels = Vec::with_capacity(costume.cel_count());
	for index in 0..costume.cel_count() as u16 {
		let offset = costume.offset(index)?;
		let (info, data) = costume.cel(index)?;
		cels.push(CelSummary {
			index,
			offset,
			info,
			data_len: data.len(),
		});
	}

	let mut animations = Vec::new();
	for index in 0..costume.header().anim_count {
		match costume.animation(index) {
			Ok(Some(animation)) => animations.push(AnimationSummary {
				index,
				limbs: animation.limbs,
			}),
			Ok(None) => {}
			Err(err) => log::warn!("Animation {index}: {err}"),
		}
	}

	Ok(CostumeSummary {
		header: *costume.header(),
		codec: costume.codec(),
		palette_len: costume.palette().len(),
		has_rgbs: costume.rgbs().is_some(),
		sequence_len: costume.sequence().len(),
		cels,
		animations,
	})
}

fn run_info(args: InfoArgs) -> Result<()> {
	let costume = open_costume(&args.file)?;
	let summary = summarize(&costume)?;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&summary)?);
		return Ok(());
	}

	println!("File: {} (size: {} bytes)", args.file.display(), costume.as_bytes().len());
	println!("{costume}");
	println!("Header: {}", summary.header);
	println!(
		"Palette: {} entries{} | sequence: {} bytes",
		summary.palette_len,
		if summary.has_rgbs {
			" with RGBS"
		} else {
			""
		},
		summary.sequence_len
	);

	println!("Cels: {}", summary.cels.len());
	for cel in &summary.cels {
		println!("  [{:4}] {} | {} | {} bytes", cel.index, cel.info, cel.offset, cel.data_len);
	}

	println!("Animations: {}", summary.animations.len());
	for animation in &summary.animations {
		println!("  [{:4}]", animation.index);
		for (limb, command) in &animation.limbs {
			println!("    limb {limb:2}: {command}");
		}
	}

	Ok(())
}

fn run_disasm(args: DisasmArgs) -> Result<()> {
	let costume = open_costume(&args.file)?;
	let stream = costume.sequence();
	let listing: Vec<_> = disassemble(stream, args.byte_order.into()).collect();

	for (index, (pc, instruction)) in listing.iter().enumerate() {
		let end = listing.get(index + 1).map_or(stream.len(), |(next, _)| *next);
		let text = match instruction {
			Ok(instruction) => instruction.to_string(),
			Err(err) => format!("<{err}>"),
		};
		if args.hex {
			println!("{pc:04X}  {:<24} {text}", hex::encode(&stream[*pc..end]));
		} else {
			println!("{pc:04X}  {text}");
		}
	}

	Ok(())
}

fn load_config(path: Option<&Path>) -> Result<TitleConfig> {
	let mut builder = config::Config::builder();
	if let Some(path) = path {
		builder = builder.add_source(config::File::new(&path.to_string_lossy(), config::FileFormat::Toml));
	}
	let settings = builder
		.add_source(config::Environment::with_prefix("AKOS").prefix_separator("_").separator("__").try_parsing(true))
		.build()
		.context("Failed to load title configuration")?;
	settings.try_deserialize().context("Invalid title configuration")
}

/// Maps every final colour to RGB: `RGBS` where the costume has it, gray ramp elsewhere.
fn color_table(costume: &Costume, palette: &[u8; 256]) -> [[u8; 3]; 256] {
	let mut table: [[u8; 3]; 256] = std::array::from_fn(|index| [index as u8; 3]);
	if let Some(rgbs) = costume.rgbs() {
		for (index, rgb) in rgbs.chunks_exact(3).enumerate().take(costume.palette().len()) {
			table[usize::from(palette[index])] = [rgb[0], rgb[1], rgb[2]];
		}
	}
	table
}

fn run_render(args: RenderArgs) -> Result<()> {
	if args.frames == 0 {
		bail!("frames must be greater than zero");
	}

	let config = load_config(args.config.as_deref())?;
	let costume = Arc::new(open_costume(&args.file)?);
	fs::create_dir_all(&args.out).with_context(|| format!("Failed to create {}", args.out.display()))?;

	let actor = ActorId(1);
	let mut stage = Stage::new(config, RecordingSink::new());
	let placed = stage.add_actor(actor);
	placed.set_position(
		args.x.unwrap_or(args.width as i32 / 2),
		args.y.unwrap_or(args.height as i32 * 3 / 4),
	);
	placed.mirror = args.mirror;
	stage.set_costume(actor, costume.clone())?;
	if !stage.start_animation(actor, args.anim)? {
		log::warn!("Animation {} is empty; frames will be blank", args.anim);
	}

	let colors = match stage.actor(actor) {
		Some(placed) => color_table(&costume, &placed.resolved_palette()),
		None => bail!("Actor {actor} left the stage"),
	};

	let mut pixels = vec![0u8; args.width * args.height];
	for frame in 0..args.frames {
		pixels.fill(0);
		let stats = stage.render_frame(&mut Surface::packed(&mut pixels, args.width, args.height)?);

		let image = image::RgbImage::from_fn(args.width as u32, args.height as u32, |x, y| {
			image::Rgb(colors[usize::from(pixels[y as usize * args.width + x as usize])])
		});
		let path = args.out.join(format!("frame_{frame:03}.png"));
		image.save(&path).with_context(|| format!("Failed to write {}", path.display()))?;

		let cels: Vec<String> = (0..16)
			.filter_map(|limb| stage.limb_cel(actor, limb).map(|cel| format!("{limb}:{cel}")))
			.collect();
		println!(
			"Frame {frame:3}: {} limbs drawn, {} skipped, cels [{}] -> {}",
			stats.limbs_drawn,
			stats.limbs_skipped,
			cels.join(" "),
			path.display()
		);
	}

	let sink = stage.interpreter().sink();
	for request in &sink.sounds {
		println!("Sound: slot {} code {} arg {}", request.slot, request.code, request.arg);
	}
	for command in &sink.commands {
		println!("Command {}: {} {}", command.command, command.param1, command.param2);
	}

	Ok(())
}

fn run_demo(args: DemoArgs) -> Result<()> {
	const SIZE: u16 = 24;

	let codec: Codec = args.codec.into();
	let mut builder = CostumeBuilder::new(codec);
	builder.palette((0..16).collect());
	builder.rgbs((0..16u8).flat_map(|index| [index * 16, 255 - index * 16, 128]).collect());

	let mut cels = Vec::new();
	for step in 0..4u16 {
		let pixels: Vec<u8> = (0..SIZE * SIZE)
			.map(|at| {
				let (x, y) = (at % SIZE, at / SIZE);
				let inside = x.abs_diff(SIZE / 2) + y.abs_diff(SIZE / 2) < SIZE / 2 - step;
				if inside {
					1 + ((x + y + step) % 15) as u8
				} else {
					0
				}
			})
			.collect();
		let info = CelInfo {
			rel_x: -(SIZE as i16) / 2,
			rel_y: -(SIZE as i16),
			..CelInfo::new(SIZE, SIZE)
		};
		let cel = builder.add_cel_pixels(info, &pixels, 0, ByteOrder::Big)?;
		cels.push(cel);
	}

	let mut program: Vec<Instruction<'_>> = cels.iter().map(|&cel| Instruction::Cel(cel)).collect();
	program.insert(2, Instruction::SoundStuff {
		slot: 0,
		code: 1,
		arg: 0,
	});
	let code = assemble(&program, ByteOrder::Big)?;
	let start = builder.append_sequence(&code)?;
	builder.set_animation(0, vec![(0, LimbCommand::Start {
		mode: LimbMode::Loop,
		start,
		len: code.len() as u16,
	})]);

	let costume = builder.build_costume()?;
	costume.save(&args.out).with_context(|| format!("Failed to write {}", args.out.display()))?;
	println!("Wrote {} ({} cels, codec {codec}) to {}", costume.header(), cels.len(), args.out.display());

	Ok(())
}
