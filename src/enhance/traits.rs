//! Stage trait definitions

use crate::model::SampleBuffer;
use serde::{Deserialize, Serialize};

/// Identifies an enhancement stage; the declaration order is the fixed
/// processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageId {
    NoiseReduction,
    ClickRemoval,
    BreathRemoval,
    DeEsser,
    Equalizer,
    Clarity,
    Compression,
    Normalize,
}

impl StageId {
    /// Every stage in processing order
    pub const ORDER: [StageId; 8] = [
        StageId::NoiseReduction,
        StageId::ClickRemoval,
        StageId::BreathRemoval,
        StageId::DeEsser,
        StageId::Equalizer,
        StageId::Clarity,
        StageId::Compression,
        StageId::Normalize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StageId::NoiseReduction => "noise-reduction",
            StageId::ClickRemoval => "click-removal",
            StageId::BreathRemoval => "breath-removal",
            StageId::DeEsser => "de-esser",
            StageId::Equalizer => "equalizer",
            StageId::Clarity => "clarity",
            StageId::Compression => "compression",
            StageId::Normalize => "normalize",
        }
    }
}

/// A pure `Buffer x Parameter -> Buffer` transform
///
/// Most stages work channel by channel and only implement
/// [`Stage::process_channel`]; stages needing the whole buffer (normalize)
/// override [`Stage::apply`].
pub trait Stage: Send + Sync {
    fn id(&self) -> StageId;

    /// Process one channel, returning a new sample vector of the same length
    fn process_channel(&self, samples: &[f32], sample_rate: u32) -> Vec<f32>;

    /// Process a whole buffer into a new one of identical shape
    fn apply(&self, buffer: &SampleBuffer) -> SampleBuffer {
        let sample_rate = buffer.sample_rate;
        buffer.map_channels(|channel| self.process_channel(channel, sample_rate))
    }
}
