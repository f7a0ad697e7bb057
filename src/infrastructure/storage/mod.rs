pub mod audio_store;
pub mod local_audio_store;

pub use audio_store::AudioStore;
pub use local_audio_store::LocalAudioStore;
