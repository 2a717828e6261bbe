//! Decode audio files into planar f32 buffers with symphonia

use crate::model::SampleBuffer;
use anyhow::{Context, Result};
use std::path::Path;
use symphonia::core::audio::SampleBuffer as InterleavedBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an audio file, keeping every channel and the native sample rate
pub fn decode_file(path: &Path) -> Result<SampleBuffer> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open audio file: {:?}", path))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let format_opts = FormatOptions::default();
    let metadata_opts = MetadataOptions::default();

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &format_opts, &metadata_opts)
        .with_context(|| format!("Failed to probe audio format: {:?}", path))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .context("No audio track found")?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("No sample rate in audio track")?;

    let dec_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &dec_opts)
        .context("Failed to create audio decoder")?;

    let mut channels: Vec<Vec<f32>> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                log::warn!("Error reading packet: {:?}", e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Error decoding packet: {:?}", e);
                continue;
            }
        };

        let spec = *decoded.spec();
        let duration = decoded.capacity() as u64;

        let mut sample_buf = InterleavedBuffer::<f32>::new(duration, spec);
        sample_buf.copy_interleaved_ref(decoded);

        let num_channels = spec.channels.count();
        if channels.is_empty() {
            channels = vec![Vec::new(); num_channels];
        }
        deinterleave(sample_buf.samples(), &mut channels);
    }

    let buffer = SampleBuffer::new(channels, sample_rate);
    log::debug!(
        "Decoded {:?}: {} channel(s), {} samples ({:.1}s) at {}Hz",
        path,
        buffer.num_channels(),
        buffer.len(),
        buffer.duration(),
        sample_rate
    );

    Ok(buffer)
}

/// Append interleaved frames to planar channel vectors
///
/// Frames whose channel count differs from `channels` are mapped onto the
/// available channels; missing channels repeat the last one present.
fn deinterleave(samples: &[f32], channels: &mut [Vec<f32>]) {
    let count = channels.len();
    if count == 0 {
        return;
    }
    for frame in samples.chunks(count) {
        for (ch, channel) in channels.iter_mut().enumerate() {
            let value = frame.get(ch).or_else(|| frame.last()).copied().unwrap_or(0.0);
            channel.push(value);
        }
    }
}
