//! Patch files for the supersaw voice.
//!
//! A patch is a small TOML document naming the engine layout and the raw
//! control values a host would send. This crate loads, saves and validates
//! patches, ships a set of factory patches, and turns a patch into a
//! configured [`SupersawVoice`](supersaw_synth::SupersawVoice).
//!
//! # Features
//!
//! - **Patch format**: `[engine]` and `[controls]` tables, serde + toml
//! - **Validation**: every out-of-range value reported at once
//! - **Factory patches**: `init`, `classic`, `wide`, `fifths`, `ring`
//!
//! # Example
//!
//! ```rust,no_run
//! use supersaw_config::{Controls, EngineSection, Patch};
//!
//! let patch = Patch::new("Lead")
//!     .with_description("Bright detuned lead")
//!     .with_engine(EngineSection::default())
//!     .with_controls(Controls {
//!         detune: 60,
//!         shape: 800,
//!         ..Controls::default()
//!     });
//!
//! patch.validate().unwrap();
//! patch.save("lead.toml").unwrap();
//!
//! let mut voice = Patch::load("lead.toml").unwrap().build_voice();
//! let mut buffer = [0i32; 64];
//! voice.render(supersaw_core::Pitch::from_note(64), 0, &mut buffer);
//! ```

mod error;
mod patch;

/// Patch validation.
pub mod validation;

/// Factory patches bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use patch::{Controls, DetuneMode, EngineSection, Patch, SecondaryLayout};
pub use validation::{ValidationError, ValidationResult, validate_controls, validate_patch};

/// Load a patch by factory name, falling back to a file path.
pub fn resolve_patch(name_or_path: &str) -> Result<Patch, ConfigError> {
    if let Some(patch) = get_factory_preset(name_or_path) {
        return Ok(patch);
    }
    let path = std::path::Path::new(name_or_path);
    if path.exists() {
        return Patch::load(path);
    }
    Err(ConfigError::PatchNotFound(name_or_path.to_string()))
}
