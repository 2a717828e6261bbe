//! Input file discovery

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions the decoder is built with
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg", "oga", "m4a", "aac"];

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Expand a path into audio files: directories are walked recursively,
/// anything else is returned as-is
pub fn collect_audio_files(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {:?}: {}", path, e);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_audio_file(e.path()))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    log::debug!("Found {} audio file(s) under {:?}", files.len(), path);
    files
}
