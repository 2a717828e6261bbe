//! Enhancement pipeline
//!
//! Eight independent stages, each a pure `Buffer x Parameter -> Buffer`
//! transform, run in a fixed order driven by an `EnhancementConfig`.

mod cleanup;
mod config;
mod dynamics;
mod pipeline;
mod tone;
mod traits;

pub use cleanup::{BreathRemoval, ClickRemoval, DeEsser, NoiseReduction};
pub use config::{EnhancementConfig, AMOUNT_MAX, TONE_LIMIT};
pub use dynamics::{Compression, Normalize, COMPRESSION_THRESHOLD, NORMALIZE_TARGET};
pub use pipeline::{enhance, EnhancementPipeline};
pub use tone::{Clarity, Equalizer};
pub use traits::{Stage, StageId};
