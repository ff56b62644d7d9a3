//! Prelude module for `akos_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use akos_types::prelude::*;
//!
//! let mut stage = Stage::new(TitleConfig::default(), NullSink);
//! stage.add_actor(ActorId(1)).set_position(160, 120);
//! assert_eq!(stage.actor_count(), 1);
//! ```

// Errors
#[doc(inline)]
pub use crate::{AkosError, CelError, StageError, VmError};

// Configuration
#[doc(inline)]
pub use crate::config::{ByteOrder, InterpreterConfig, TitleConfig};

// Resource view
#[doc(inline)]
pub use crate::file::{Animation, CelInfo, Costume, CostumeBuilder, Header, LimbCommand, LimbMode, Offset};

// Cel codecs
#[doc(inline)]
pub use crate::codec::{
	BlitParams, CelFormat, Codec, MaskLayer, Rect, Shading, Surface, ZPlane, decode_cel, draw_cel, encode_cel,
};

// Interpreter
#[doc(inline)]
pub use crate::vm::{
	ActorId, AnimCommand, CostumeState, Instruction, Interpreter, LimbFrame, NullSink, Opcode, QueuedCommand,
	RecordingSink, SideEffectSink, SoundRequest, assemble, disassemble,
};

// Stage
#[doc(inline)]
pub use crate::render::{Actor, FrameStats, ShadeMode, Stage};
