pub mod audio;
pub mod content;
