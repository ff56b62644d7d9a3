//! Costume resource support for the `akos-rs` project.

pub mod akos;

// Re-export main file types
pub use akos::{
	Animation, CelInfo, Costume, CostumeBuilder, Header, LimbCommand, LimbMode, Offset,
};
