//! Procedural Audio
//!
//! No audio assets: every effect is synthesized from oscillator
//! primitives, shaped by a low-pass filter and an envelope, and
//! optionally sent through a synthetic convolution reverb.

mod engine;
mod reverb;
mod synth;

pub use engine::SoundEngine;
