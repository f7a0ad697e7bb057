pub mod audio;
pub mod content;
pub mod health;
