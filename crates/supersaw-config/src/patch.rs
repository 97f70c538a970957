//! Patch file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::{ValidationResult, validate_patch};
use supersaw_core::SawWave;
use supersaw_synth::{
    DetuneStrategy, ParamId, SecondaryMode, SideCorrection, SupersawVoice, VoiceConfig,
};

/// Secondary oscillator layout, as written in patch files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondaryLayout {
    /// Sub and super octave.
    FixedOctave,
    /// Chord-selectable interval.
    #[default]
    ChordInterval,
}

impl From<SecondaryLayout> for SecondaryMode {
    fn from(layout: SecondaryLayout) -> Self {
        match layout {
            SecondaryLayout::FixedOctave => SecondaryMode::FixedOctave,
            SecondaryLayout::ChordInterval => SecondaryMode::ChordInterval,
        }
    }
}

/// Detune evaluation, as written in patch files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetuneMode {
    /// Precomputed table.
    #[default]
    Table,
    /// Polynomial on change.
    Direct,
}

impl From<DetuneMode> for DetuneStrategy {
    fn from(mode: DetuneMode) -> Self {
        match mode {
            DetuneMode::Table => DetuneStrategy::Table,
            DetuneMode::Direct => DetuneStrategy::Direct,
        }
    }
}

/// `[engine]` table: which variant of the voice to build.
///
/// `side_gain` absent means normalized `1/(N-1)` side correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Secondary oscillator layout.
    pub secondary: SecondaryLayout,
    /// Pitch-tracking high-pass before the soft clipper.
    pub highpass: bool,
    /// Detune evaluation strategy.
    pub detune_mode: DetuneMode,
    /// Fixed per-side-oscillator gain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_gain: Option<f32>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            secondary: SecondaryLayout::ChordInterval,
            highpass: true,
            detune_mode: DetuneMode::Table,
            side_gain: None,
        }
    }
}

impl EngineSection {
    /// Fixed octave, no filter, direct detune, 0.2 side gain.
    pub fn classic() -> Self {
        Self {
            secondary: SecondaryLayout::FixedOctave,
            highpass: false,
            detune_mode: DetuneMode::Direct,
            side_gain: Some(supersaw_synth::CLASSIC_SIDE_GAIN),
        }
    }
}

/// `[controls]` table, in the host's raw units.
///
/// Percent controls are 0..=100, the two knobs are 0..=1023 and `chord`
/// is the selector value 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Secondary A blend, percent.
    pub mix_a: u16,
    /// Secondary B blend, percent.
    pub mix_b: u16,
    /// Ring modulation blend, percent.
    pub ring_mix: u16,
    /// Detune knob, percent.
    pub detune: u16,
    /// Chord selector.
    pub chord: u16,
    /// Morph knob.
    pub shape: u16,
    /// Drift knob.
    pub shift_shape: u16,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            mix_a: 0,
            mix_b: 0,
            ring_mix: 0,
            detune: 0,
            chord: 1,
            shape: 0,
            shift_shape: 0,
        }
    }
}

impl Controls {
    /// `(id, raw)` pairs in host order, as sent to `set_parameter`.
    pub fn raw_values(&self) -> [(ParamId, u16); 7] {
        [
            (ParamId::MixA, self.mix_a),
            (ParamId::MixB, self.mix_b),
            (ParamId::RingMix, self.ring_mix),
            (ParamId::Detune, self.detune),
            (ParamId::ChordSelect, self.chord),
            (ParamId::Shape, self.shape),
            (ParamId::ShiftShape, self.shift_shape),
        ]
    }
}

/// A saved voice setting.
///
/// # TOML Format
///
/// ```toml
/// name = "Wide"
/// description = "Full stack, heavy detune"
/// sample_rate = 48000
///
/// [engine]
/// secondary = "chord_interval"
/// highpass = true
/// detune_mode = "table"
///
/// [controls]
/// detune = 80
/// shape = 900
/// shift_shape = 300
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patch {
    /// Name of the patch.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Engine variant.
    #[serde(default)]
    pub engine: EngineSection,

    /// Control values.
    #[serde(default)]
    pub controls: Controls,
}

fn default_sample_rate() -> u32 {
    48000
}

impl Default for Patch {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl Patch {
    /// Create a patch with the default engine and all controls at rest.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            engine: EngineSection::default(),
            controls: Controls::default(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Replace the engine section.
    #[must_use]
    pub fn with_engine(mut self, engine: EngineSection) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the controls.
    #[must_use]
    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    /// Load a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a patch from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the patch to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field, collecting all problems.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_patch(self)
    }

    /// Engine configuration for this patch.
    pub fn voice_config(&self) -> VoiceConfig {
        let side_correction = match self.engine.side_gain {
            Some(gain) => SideCorrection::PerOscillator(gain),
            None => SideCorrection::Normalized,
        };
        VoiceConfig {
            secondary_mode: self.engine.secondary.into(),
            highpass: self.engine.highpass,
            detune_strategy: self.engine.detune_mode.into(),
            side_correction,
            sample_rate: self.sample_rate as f32,
        }
    }

    /// Send the controls to a voice through its host parameter entry
    /// point.
    pub fn apply<S: SawWave, const N: usize>(&self, voice: &mut SupersawVoice<S, N>) {
        for (id, raw) in self.controls.raw_values() {
            voice.set_parameter(id.index(), raw);
        }
    }

    /// Build a seven-oscillator voice with this patch applied.
    pub fn build_voice(&self) -> SupersawVoice {
        let mut voice = SupersawVoice::new(self.voice_config());
        self.apply(&mut voice);
        voice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supersaw_synth::Chord;

    #[test]
    fn minimal_toml_uses_defaults() {
        let patch = Patch::from_toml(r#"name = "Bare""#).unwrap();
        assert_eq!(patch.name, "Bare");
        assert_eq!(patch.sample_rate, 48000);
        assert_eq!(patch.engine, EngineSection::default());
        assert_eq!(patch.controls, Controls::default());
        assert_eq!(patch.voice_config(), VoiceConfig::chord());
    }

    #[test]
    fn classic_engine_maps_to_classic_config() {
        let patch = Patch::new("Classic").with_engine(EngineSection::classic());
        assert_eq!(patch.voice_config(), VoiceConfig::classic());
    }

    #[test]
    fn toml_roundtrip() {
        let patch = Patch::new("Round")
            .with_description("trip")
            .with_sample_rate(44100)
            .with_engine(EngineSection::classic())
            .with_controls(Controls {
                detune: 42,
                shape: 512,
                ..Controls::default()
            });
        let text = patch.to_toml().unwrap();
        assert!(text.contains("fixed_octave"));
        assert!(text.contains("side_gain"));
        assert_eq!(Patch::from_toml(&text).unwrap(), patch);
    }

    #[test]
    fn normalized_side_gain_is_omitted() {
        let text = Patch::new("N").to_toml().unwrap();
        assert!(!text.contains("side_gain"));
    }

    #[test]
    fn unknown_layout_is_a_parse_error() {
        let text = "name = \"X\"\n[engine]\nsecondary = \"sideways\"\n";
        assert!(matches!(Patch::from_toml(text), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn apply_drives_the_voice() {
        let patch = Patch::new("Applied").with_controls(Controls {
            mix_a: 50,
            ring_mix: 100,
            chord: 3,
            shape: 1023,
            ..Controls::default()
        });
        let voice = patch.build_voice();
        let p = voice.params();
        assert!((p.mix_a - 0.5).abs() < 1e-6);
        assert_eq!(p.ring_mix, 1.0);
        assert_eq!(p.shape, 1.0);
        assert_eq!(p.chord, Chord::MajorThird);
    }
}
