//! Audio file I/O around the core
//!
//! Decoding (symphonia), WAV writing (hound) and input discovery (walkdir).
//! The analysis and enhancement code never touches files.

mod decode;
mod files;
mod writer;

pub use decode::decode_file;
pub use files::{collect_audio_files, is_audio_file};
pub use writer::write_wav;
