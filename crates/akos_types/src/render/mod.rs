//! Frame orchestration: per actor, step the limbs and blit the cels they show.
//!
//! [`Stage`] is the entry point. It owns the [`Interpreter`](crate::vm::Interpreter), the actors and
//! the masks, and splits a frame into an animate pass (interpreter only, then the deferred command
//! queue) and a draw pass (decoder only).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use akos_types::codec::{Codec, Surface};
//! use akos_types::config::{ByteOrder, TitleConfig};
//! use akos_types::file::{CelInfo, CostumeBuilder, LimbCommand, LimbMode};
//! use akos_types::render::Stage;
//! use akos_types::vm::{ActorId, NullSink};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = CostumeBuilder::new(Codec::RunTag16);
//! let cel = builder.add_cel_pixels(CelInfo::new(2, 2), &[1, 1, 1, 1], 0, ByteOrder::Big)?;
//! let start = builder.append_sequence(&[cel as u8])?;
//! builder.set_animation(0, vec![(0, LimbCommand::Start {
//!     mode: LimbMode::Loop,
//!     start,
//!     len: 1,
//! })]);
//!
//! let mut stage = Stage::new(TitleConfig::default(), NullSink);
//! stage.add_actor(ActorId(1)).set_position(1, 1);
//! stage.set_costume(ActorId(1), Arc::new(builder.build_costume()?))?;
//! stage.start_animation(ActorId(1), 0)?;
//!
//! let mut pixels = vec![0u8; 4 * 4];
//! let stats = stage.render_frame(&mut Surface::packed(&mut pixels, 4, 4)?);
//! assert_eq!(stats.limbs_drawn, 1);
//! assert_eq!(pixels[5], 1);
//! # Ok(())
//! # }
//! ```

mod actor;
mod stage;


pub use actor::{Actor, NO_OVERRIDE, ShadeMode};
pub use stage::{FrameStats, Stage};
