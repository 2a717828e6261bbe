//! Voice Enhancer - speech analysis and enhancement on PCM buffers
//!
//! The core is two stateless components over an in-memory `SampleBuffer`:
//! a feature extractor (`analyze`) producing quality, spectral, speaker and
//! emotion reports, and an enhancement pipeline (`enhance`) running eight
//! fixed-order transform stages. File decoding, WAV output, presets and JSON
//! export sit around the core.

pub mod analysis;
pub mod audio;
pub mod compare;
pub mod enhance;
pub mod export;
pub mod model;
pub mod presets;

pub use analysis::analyze;
pub use compare::{enhance_and_compare, EnhancementOutcome, QualityDelta};
pub use enhance::{enhance, EnhancementConfig, EnhancementPipeline};
pub use model::{AnalysisReport, InvalidBufferError, SampleBuffer};
