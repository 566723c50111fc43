//! Composable building blocks for tone graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what a voice needs:
//! tone onsets, activity tracking and block-based rendering. A practice tone
//! is a single chain, `OscNode → .amplify(EnvNode)`.

/// Multiply a signal by an envelope.
pub mod amplify;
/// Envelope generator node.
pub mod envelope;
/// Fluent combinators (`.amplify()`).
pub mod extensions;
/// Core traits shared by all graph nodes.
pub mod node;
/// Sine and square oscillator node.
pub mod oscillator;

pub use node::{GraphNode, RenderCtx};
