//! End-to-end playback tests for `akos-rs`: costumes are assembled, serialized, parsed back and
//! played on a stage.

mod scenarios;
mod support;
