//! Audio and utterance acquisition adapters.

mod failover_source;
mod scripted_source;
mod typed_source;
mod voice_source;

pub use failover_source::FailoverUtteranceSource;
pub use scripted_source::ScriptedAudioSource;
pub use typed_source::QueuedTextSource;
pub use voice_source::VoiceUtteranceSource;
