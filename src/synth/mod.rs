// Purpose: audio-thread side of playback - tone voices and the renderer that mixes them
// This layer sits above graph nodes and below the synthesis backends

pub mod message;
pub mod renderer;
pub mod voice;

pub use message::{MessageReceiver, ToneMessage};
pub use renderer::{ToneRenderer, DEFAULT_MAX_VOICES};
pub use voice::{ToneVoice, VoiceState};
