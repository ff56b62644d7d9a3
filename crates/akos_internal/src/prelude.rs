//! Prelude module for `akos_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use akos_internal::prelude::*;
//!
//! // A stage with no side-effect handling
//! let stage = Stage::new(TitleConfig::default(), NullSink);
//! assert_eq!(stage.actor_count(), 0);
//! ```

// Re-export everything from akos_types::prelude
#[doc(inline)]
pub use akos_types::prelude::*;

// Re-export the entire akos_types module for advanced usage
#[doc(inline)]
pub use akos_types;
