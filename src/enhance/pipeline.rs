//! Enhancement pipeline orchestration

use super::cleanup::{BreathRemoval, ClickRemoval, DeEsser, NoiseReduction};
use super::config::EnhancementConfig;
use super::dynamics::{Compression, Normalize};
use super::tone::{Clarity, Equalizer};
use super::traits::{Stage, StageId};
use crate::model::{InvalidBufferError, SampleBuffer};

/// Ordered list of the stages a config enables
///
/// Stages run strictly in [`StageId::ORDER`]; each sees the previous
/// stage's output. Stages whose parameter is neutral are left out.
pub struct EnhancementPipeline {
    config: EnhancementConfig,
    stages: Vec<Box<dyn Stage>>,
}

impl EnhancementPipeline {
    /// Build the stage plan for a config, clamping out-of-range knobs
    pub fn new(config: EnhancementConfig) -> Self {
        let clamped = config.clamped();
        if clamped != config {
            log::warn!("Enhancement config out of range, clamped to {:?}", clamped);
        }

        let stages = build_stages(&clamped);
        log::debug!(
            "Enhancement plan: [{}]",
            stages
                .iter()
                .map(|s| s.id().name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self {
            config: clamped,
            stages,
        }
    }

    /// The effective (clamped) config
    pub fn config(&self) -> &EnhancementConfig {
        &self.config
    }

    /// Ids of the stages that will run, in order
    pub fn stages(&self) -> Vec<StageId> {
        self.stages.iter().map(|s| s.id()).collect()
    }

    /// Run every enabled stage over a buffer
    pub fn run(&self, buffer: &SampleBuffer) -> Result<SampleBuffer, InvalidBufferError> {
        buffer.validate()?;

        let mut current = buffer.clone();
        for stage in &self.stages {
            current = stage.apply(&current);
            log::debug!("Stage {} done, peak {:.4}", stage.id().name(), current.peak());
        }

        Ok(current)
    }
}

fn build_stages(config: &EnhancementConfig) -> Vec<Box<dyn Stage>> {
    let mut stages: Vec<Box<dyn Stage>> = Vec::new();

    if config.noise_reduction > 0.0 {
        stages.push(Box::new(NoiseReduction {
            amount: config.noise_reduction,
        }));
    }
    if config.click_removal > 0.0 {
        stages.push(Box::new(ClickRemoval {
            amount: config.click_removal,
        }));
    }
    if config.breath_removal > 0.0 {
        stages.push(Box::new(BreathRemoval {
            amount: config.breath_removal,
        }));
    }
    if config.de_esser > 0.0 {
        stages.push(Box::new(DeEsser {
            amount: config.de_esser,
        }));
    }
    if config.brightness != 0.0 || config.warmth != 0.0 {
        stages.push(Box::new(Equalizer {
            brightness: config.brightness,
            warmth: config.warmth,
        }));
    }
    if config.clarity > 0.0 {
        stages.push(Box::new(Clarity {
            amount: config.clarity,
        }));
    }
    if config.compression > 0.0 {
        stages.push(Box::new(Compression {
            amount: config.compression,
        }));
    }
    if config.normalize {
        stages.push(Box::new(Normalize));
    }

    stages
}

/// Enhance a buffer with a config in one call
pub fn enhance(
    buffer: &SampleBuffer,
    config: &EnhancementConfig,
) -> Result<SampleBuffer, InvalidBufferError> {
    EnhancementPipeline::new(*config).run(buffer)
}
