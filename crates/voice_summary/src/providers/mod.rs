//! Fallback player implementations
//!
//! Contains concrete implementations of the `FallbackPlayer` port.

pub mod remote_audio;

pub use remote_audio::RemoteAudioPlayer;
