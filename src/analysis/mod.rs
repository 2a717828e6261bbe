//! Feature extraction
//!
//! Pure functions over a `SampleBuffer`: time-domain quality metrics,
//! spectral statistics, an autocorrelation pitch track feeding the speaker
//! profile, and the emotion heuristic. All of them read channel 0.

pub mod emotion;
pub mod pitch;
pub mod quality;
pub mod speaker;
pub mod spectral;

use crate::model::{AnalysisReport, InvalidBufferError, QualityMetrics, SampleBuffer};

pub use emotion::emotion_analysis;
pub use pitch::{detect_pitch, pitch_statistics, pitch_track};
pub use quality::quality_metrics;
pub use speaker::speaker_profile;
pub use spectral::spectral_analysis;

/// Run every extractor over a buffer
pub fn analyze(buffer: &SampleBuffer) -> Result<AnalysisReport, InvalidBufferError> {
    buffer.validate()?;

    let samples = buffer.primary();
    log::debug!(
        "Analyzing {} samples ({:.2}s) at {}Hz, {} channel(s)",
        samples.len(),
        buffer.duration(),
        buffer.sample_rate,
        buffer.num_channels()
    );

    let quality = quality_metrics(samples);
    let spectral = spectral_analysis(samples, buffer.sample_rate);
    let speaker = speaker_profile(samples, buffer.sample_rate);
    let emotion = emotion_analysis(samples);

    log::debug!(
        "Analysis complete: score={:.0}, dominant={:.1}Hz, pitch={:.1}Hz, emotion={}",
        quality.overall_score,
        spectral.dominant_frequency,
        speaker.pitch_range.average,
        emotion.dominant.name()
    );

    Ok(AnalysisReport {
        quality,
        spectral,
        speaker,
        emotion,
    })
}

/// Quality metrics only, for before/after comparisons
pub fn analyze_quality(buffer: &SampleBuffer) -> Result<QualityMetrics, InvalidBufferError> {
    buffer.validate()?;
    Ok(quality_metrics(buffer.primary()))
}
