// THEORY:
// This file is the main entry point for the `line_profiler` library crate.
// It exposes the pieces a viewer needs to turn a stream of frames into
// scanline intensity plots: the `ProfilePipeline` that renders one frame, the
// `Session` loop that drives it interactively, and the `FrameSource` and
// `Surface` seams a front end implements to feed frames in and show canvases.
//
// The low-level sampling and plotting code lives in `core_modules` and has no
// knowledge of windows, decoders or key presses.

pub mod core_modules;
pub mod error;
pub mod frame_source;
pub mod pipeline;
pub mod session;

pub use error::{ProfileError, Result};
