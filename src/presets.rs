//! Named enhancement presets
//!
//! Read-only data. The pipeline never looks presets up itself; callers pick
//! one and pass its config.

use crate::enhance::EnhancementConfig;

/// A named, described config
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub config: EnhancementConfig,
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "podcast",
        description: "Spoken word: moderate cleanup, gentle compression, normalized",
        config: EnhancementConfig {
            noise_reduction: 40.0,
            de_esser: 30.0,
            breath_removal: 20.0,
            click_removal: 30.0,
            compression: 40.0,
            clarity: 30.0,
            brightness: 5.0,
            warmth: 10.0,
            normalize: true,
        },
    },
    Preset {
        name: "voice-over",
        description: "Close-mic narration: strong de-essing and breath control",
        config: EnhancementConfig {
            noise_reduction: 30.0,
            de_esser: 50.0,
            breath_removal: 50.0,
            click_removal: 40.0,
            compression: 50.0,
            clarity: 40.0,
            brightness: 10.0,
            warmth: 15.0,
            normalize: true,
        },
    },
    Preset {
        name: "interview",
        description: "Room recordings: heavier noise reduction, light tone shaping",
        config: EnhancementConfig {
            noise_reduction: 60.0,
            de_esser: 20.0,
            breath_removal: 10.0,
            click_removal: 30.0,
            compression: 30.0,
            clarity: 20.0,
            brightness: 0.0,
            warmth: 5.0,
            normalize: true,
        },
    },
    Preset {
        name: "phone-cleanup",
        description: "Telephone audio: maximum noise and click removal, brightened",
        config: EnhancementConfig {
            noise_reduction: 80.0,
            de_esser: 10.0,
            breath_removal: 0.0,
            click_removal: 70.0,
            compression: 60.0,
            clarity: 60.0,
            brightness: 20.0,
            warmth: -10.0,
            normalize: true,
        },
    },
    Preset {
        name: "broadcast",
        description: "Dense, loud delivery: heavy compression and clarity",
        config: EnhancementConfig {
            noise_reduction: 50.0,
            de_esser: 40.0,
            breath_removal: 30.0,
            click_removal: 50.0,
            compression: 80.0,
            clarity: 50.0,
            brightness: 15.0,
            warmth: 20.0,
            normalize: true,
        },
    },
    Preset {
        name: "gentle",
        description: "Light touch: small cleanup, no tone change",
        config: EnhancementConfig {
            noise_reduction: 15.0,
            de_esser: 10.0,
            breath_removal: 0.0,
            click_removal: 10.0,
            compression: 10.0,
            clarity: 0.0,
            brightness: 0.0,
            warmth: 0.0,
            normalize: false,
        },
    },
];

/// All presets in catalog order
pub fn presets() -> &'static [Preset] {
    PRESETS
}

/// Look up a preset by name (case-insensitive)
pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
