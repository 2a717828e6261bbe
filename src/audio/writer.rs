//! WAV output for enhanced buffers

use crate::model::SampleBuffer;
use anyhow::{Context, Result};
use std::path::Path;

/// Write a buffer as 32-bit float interleaved WAV
pub fn write_wav(path: &Path, buffer: &SampleBuffer) -> Result<()> {
    buffer
        .validate()
        .with_context(|| format!("Refusing to write invalid buffer to {:?}", path))?;

    let spec = hound::WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

    for i in 0..buffer.len() {
        for channel in &buffer.channels {
            writer
                .write_sample(channel[i])
                .with_context(|| format!("Failed to write sample to {:?}", path))?;
        }
    }

    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file: {:?}", path))?;

    log::info!(
        "Wrote {:?} ({} channel(s), {:.1}s)",
        path,
        buffer.num_channels(),
        buffer.duration()
    );
    Ok(())
}
