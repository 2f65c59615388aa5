//! Audio-processing chain embedded in tracks and cells
//!
//! Mirrors the Web Audio node parameters the client renders with. Every
//! sub-section is independently optional except `gain`, which always
//! defaults to unity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainProcessing {
    pub gain: f64,
}

impl Default for GainProcessing {
    fn default() -> Self {
        Self { gain: 1.0 }
    }
}

/// Biquad filter type (Web Audio `BiquadFilterType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Lowpass,
    Highpass,
    Bandpass,
    Lowshelf,
    Highshelf,
    Peaking,
    #[default]
    Notch,
    Allpass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterProcessing {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: FilterKind,
    pub frequency: f64,
    pub detune: i64,
    pub gain: f64,
    pub q: f64,
}

impl Default for FilterProcessing {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: FilterKind::Notch,
            frequency: 1000.0,
            detune: 0,
            gain: 1.0,
            q: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DelayProcessing {
    pub enabled: bool,
    pub delay_time: f64,
}

impl Default for DelayProcessing {
    fn default() -> Self {
        Self {
            enabled: false,
            delay_time: 0.0,
        }
    }
}

/// WaveShaper oversampling setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Oversample {
    #[default]
    None,
    TwoTimes,
    FourTimes,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistortionProcessing {
    pub enabled: bool,
    pub curve: Vec<f64>,
    pub oversample: Oversample,
}

/// Per-track / per-cell processing chain. Absent sub-sections stay absent;
/// `gain` is always present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioProcessing {
    pub gain: GainProcessing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterProcessing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<DelayProcessing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distortion: Option<DistortionProcessing>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chain_is_unity_gain_only() {
        let processing = AudioProcessing::default();
        assert_eq!(processing.gain.gain, 1.0);
        assert!(processing.filter.is_none());
        assert!(processing.delay.is_none());
        assert!(processing.distortion.is_none());
    }

    #[test]
    fn filter_defaults_match_schema() {
        let filter = FilterProcessing::default();
        assert!(!filter.enabled);
        assert_eq!(filter.kind, FilterKind::Notch);
        assert_eq!(filter.frequency, 1000.0);
        assert_eq!(filter.detune, 0);
        assert_eq!(filter.gain, 1.0);
        assert_eq!(filter.q, 1.0);
    }

    #[test]
    fn partial_json_backfills_defaults() {
        let processing: AudioProcessing =
            serde_json::from_str(r#"{"gain":{"gain":0.5},"filter":{"enabled":true}}"#).unwrap();
        assert_eq!(processing.gain.gain, 0.5);
        let filter = processing.filter.unwrap();
        assert!(filter.enabled);
        assert_eq!(filter.frequency, 1000.0);
        assert!(processing.delay.is_none());
    }

    #[test]
    fn oversample_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&Oversample::TwoTimes).unwrap(),
            "\"twoTimes\""
        );
        assert_eq!(serde_json::to_string(&Oversample::None).unwrap(), "\"none\"");
    }
}
