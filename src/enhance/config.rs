//! Enhancement configuration

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

/// Nine independent knobs driving the enhancement stages
///
/// `Default` is the identity config: every amount 0, `normalize` off.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnhancementConfig {
    /// Quiet-sample subtraction strength (0-100)
    pub noise_reduction: f32,

    /// Sibilance attenuation (0-100)
    pub de_esser: f32,

    /// Low-energy region attenuation (0-100)
    pub breath_removal: f32,

    /// Transient median filtering (0-100)
    pub click_removal: f32,

    /// Soft-knee compression amount (0-100)
    pub compression: f32,

    /// Harmonic boost (0-100)
    pub clarity: f32,

    /// High shelf tilt (-50 to 50)
    pub brightness: f32,

    /// Low-pass blend (-50 to 50)
    pub warmth: f32,

    /// Scale the result to a 0.95 peak
    pub normalize: bool,
}

/// Upper bound of the 0-100 knobs
pub const AMOUNT_MAX: f32 = 100.0;
/// Bound of the signed tone knobs
pub const TONE_LIMIT: f32 = 50.0;

impl EnhancementConfig {
    /// Identity configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_noise_reduction(mut self, amount: f32) -> Self {
        self.noise_reduction = amount;
        self
    }

    pub fn with_de_esser(mut self, amount: f32) -> Self {
        self.de_esser = amount;
        self
    }

    pub fn with_breath_removal(mut self, amount: f32) -> Self {
        self.breath_removal = amount;
        self
    }

    pub fn with_click_removal(mut self, amount: f32) -> Self {
        self.click_removal = amount;
        self
    }

    pub fn with_compression(mut self, amount: f32) -> Self {
        self.compression = amount;
        self
    }

    pub fn with_clarity(mut self, amount: f32) -> Self {
        self.clarity = amount;
        self
    }

    pub fn with_brightness(mut self, amount: f32) -> Self {
        self.brightness = amount;
        self
    }

    pub fn with_warmth(mut self, amount: f32) -> Self {
        self.warmth = amount;
        self
    }

    pub fn with_normalize(mut self, enable: bool) -> Self {
        self.normalize = enable;
        self
    }

    /// Copy with every knob forced into its documented range
    ///
    /// NaN knobs become 0 (stage off).
    pub fn clamped(&self) -> Self {
        Self {
            noise_reduction: clamp_knob(self.noise_reduction, 0.0, AMOUNT_MAX),
            de_esser: clamp_knob(self.de_esser, 0.0, AMOUNT_MAX),
            breath_removal: clamp_knob(self.breath_removal, 0.0, AMOUNT_MAX),
            click_removal: clamp_knob(self.click_removal, 0.0, AMOUNT_MAX),
            compression: clamp_knob(self.compression, 0.0, AMOUNT_MAX),
            clarity: clamp_knob(self.clarity, 0.0, AMOUNT_MAX),
            brightness: clamp_knob(self.brightness, -TONE_LIMIT, TONE_LIMIT),
            warmth: clamp_knob(self.warmth, -TONE_LIMIT, TONE_LIMIT),
            normalize: self.normalize,
        }
    }

    /// Copy with the knobs present in a JSON object replaced
    ///
    /// Keys use the camelCase field names; keys not present keep the value
    /// from `self`.
    pub fn overlay_json(&self, text: &str) -> serde_json::Result<Self> {
        let overrides: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Object(fields) = overrides else {
            return Err(serde_json::Error::custom("config must be a JSON object"));
        };

        let mut merged = serde_json::to_value(self)?;
        if let Some(base) = merged.as_object_mut() {
            base.extend(fields);
        }
        serde_json::from_value(merged)
    }

    /// True when every knob already lies in its range
    pub fn is_in_range(&self) -> bool {
        *self == self.clamped()
    }

    /// True when no stage would run
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

fn clamp_knob(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}
