#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `akos-rs` decodes and animates AKOS costumes: the animated character format of the later
//! SCUMM engines.
//!
//! A costume is played back by two cooperating pieces: a small bytecode interpreter that walks each
//! limb's command stream to pick the cel to show, and a run-length cel decoder that rasterizes the
//! picked cel into an 8-bit indexed surface. [`prelude::Stage`] drives both for a set of actors.
//!
pub use akos_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use akos_dylib;
