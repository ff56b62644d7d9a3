//! This module is separated into its own crate to enable simple dynamic linking for `akos-rs`, and should not be used directly.

/// `use akos_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export akos_types for convenience
pub use akos_types;

// Re-export commonly used types at crate root
pub use akos_types::file::{CelInfo, Costume, CostumeBuilder, Header, Offset};
pub use akos_types::{AkosError, CelError, StageError, VmError};
