//! Value types shared by the feature extractor and the enhancement pipeline
//!
//! Everything here is derived fresh from a `SampleBuffer` on every call;
//! nothing is cached or persisted by the core.

mod buffer;
mod report;

pub use buffer::{InvalidBufferError, SampleBuffer};
pub use report::{
    AnalysisReport, Emotion, EmotionAnalysis, EmotionScores, FrequencyRange, Gender, PitchRange,
    QualityMetrics, SpeakerProfile, SpectralAnalysis, VoiceType,
};
