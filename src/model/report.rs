use serde::{Deserialize, Serialize};

/// Complete feature-extraction result for one buffer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub quality: QualityMetrics,
    pub spectral: SpectralAnalysis,
    pub speaker: SpeakerProfile,
    pub emotion: EmotionAnalysis,
}

/// Time-domain quality metrics of channel 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// Penalised overall score (0-100)
    pub overall_score: f32,

    /// Clarity derived from SNR (0-100)
    pub clarity: f32,

    /// Peak level minus average level
    pub dynamic_range_db: f32,

    pub signal_to_noise_db: f32,

    pub peak_level_db: f32,

    /// RMS level in dBFS
    pub average_level_db: f32,

    /// True when the peak reaches 0.99
    pub clipping: bool,

    /// Fraction of samples below 0.01 in magnitude (0-1)
    pub silence_ratio: f32,

    /// Raw peak amplitude
    pub peak: f32,

    /// Raw RMS amplitude
    pub rms: f32,

    /// RMS of the quietest 10% of samples (floored at epsilon)
    pub noise_floor: f32,
}

/// Inclusive frequency span in Hz
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrequencyRange {
    pub min: f32,
    pub max: f32,
}

/// Frequency-domain summary of channel 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectralAnalysis {
    /// Span of bins above 10% of the peak magnitude
    pub frequency_range: FrequencyRange,

    pub dominant_frequency: f32,

    /// 2nd-5th multiples of the dominant frequency above 30% of the peak
    pub harmonics: Vec<f32>,

    pub spectral_centroid: f32,

    /// Geometric mean / arithmetic mean of non-zero magnitudes (0-1)
    pub spectral_flatness: f32,

    pub bandwidth_hz: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    Bass,
    Tenor,
    Alto,
    Soprano,
    Unknown,
}

impl Gender {
    pub fn name(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }
}

impl VoiceType {
    pub fn name(&self) -> &'static str {
        match self {
            VoiceType::Bass => "bass",
            VoiceType::Tenor => "tenor",
            VoiceType::Alto => "alto",
            VoiceType::Soprano => "soprano",
            VoiceType::Unknown => "unknown",
        }
    }
}

/// Pitch statistics of the voiced windows, in Hz
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchRange {
    pub min: f32,
    pub max: f32,
    pub average: f32,
}

/// Heuristic speaker description built from the pitch track and energy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerProfile {
    pub gender: Gender,

    /// Gender confidence (0-100)
    pub confidence: f32,

    pub pitch_range: PitchRange,

    /// Crude words-per-minute proxy derived from energy
    pub speaking_rate_wpm: u32,

    /// Mean absolute amplitude scaled to 0-100
    pub energy: f32,

    pub voice_type: VoiceType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Neutral,
    Excited,
}

impl Emotion {
    /// Fixed label order used for scoring and tie-breaking
    pub const ALL: [Emotion; 5] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Neutral,
        Emotion::Excited,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Neutral => "neutral",
            Emotion::Excited => "excited",
        }
    }
}

/// Per-label scores (0-100 each, not normalised to a total)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionScores {
    pub happy: f32,
    pub sad: f32,
    pub angry: f32,
    pub neutral: f32,
    pub excited: f32,
}

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> f32 {
        match emotion {
            Emotion::Happy => self.happy,
            Emotion::Sad => self.sad,
            Emotion::Angry => self.angry,
            Emotion::Neutral => self.neutral,
            Emotion::Excited => self.excited,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub dominant: Emotion,

    /// Score of the dominant label (0-100)
    pub confidence: f32,

    pub emotions: EmotionScores,
}
