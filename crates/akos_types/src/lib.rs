//! This crate provides the core of the `akos-rs` project: the AKOS costume resource view, the cel
//! codecs, the limb bytecode interpreter and the stage that drives both.
//!
//! # Modules
//!
//! - **`file`**: The AKOS block container, its tables and a builder that writes it
//! - **`codec`**: Run-length cel decoding (with scaling, mirroring, clipping and masks) and encoding
//! - **`vm`**: The limb interpreter, its opcode table and disassembler
//! - **`render`**: Actors and the per-frame animate and draw passes
//! - **`config`**: Per-title settings (byte order, interpreter limits, clip rectangle)
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use akos_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let costume = Costume::open("costume.akos")?;
//! for cel in 0..costume.cel_count() as u16 {
//!     let (info, _) = costume.cel(cel)?;
//!     println!("cel {cel}: {info}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use akos_types::file::Costume;
//! use akos_types::vm::disassemble;
//! use akos_types::config::ByteOrder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let costume = Costume::open("costume.akos")?;
//! for (pc, instruction) in disassemble(costume.sequence(), ByteOrder::Big) {
//!     println!("{pc:04X}: {instruction:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
mod error;
pub mod file;
pub mod render;
pub mod vm;

/// `use akos_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::{AkosError, CelError, StageError, VmError};
