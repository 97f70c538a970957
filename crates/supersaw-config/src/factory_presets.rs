//! Factory patches bundled with the library.
//!
//! Built-in patches that are always available without external files. They
//! cover both engine layouts and serve as starting points for new patches.

use crate::Patch;

/// Factory patch names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &["init", "classic", "wide", "fifths", "ring"];

/// TOML content for factory patches, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PATCH),
    ("classic", CLASSIC_PATCH),
    ("wide", WIDE_PATCH),
    ("fifths", FIFTHS_PATCH),
    ("ring", RING_PATCH),
];

/// Initialization patch - every control at rest.
const INIT_PATCH: &str = r#"
name = "Init"
description = "Chord engine, all controls at rest"
sample_rate = 48000

[engine]
secondary = "chord_interval"
highpass = true
detune_mode = "table"

[controls]
chord = 1
"#;

/// Classic patch - fixed sub/super octaves, no filter.
const CLASSIC_PATCH: &str = r#"
name = "Classic"
description = "Sub and super octave around a medium detuned stack"
sample_rate = 48000

[engine]
secondary = "fixed_octave"
highpass = false
detune_mode = "direct"
side_gain = 0.2

[controls]
mix_a = 30
mix_b = 15
detune = 50
shape = 700
shift_shape = 200
"#;

/// Wide patch - heavy detune, full stack.
const WIDE_PATCH: &str = r#"
name = "Wide"
description = "Full stack with heavy detune and drift"
sample_rate = 48000

[engine]
secondary = "chord_interval"
highpass = true
detune_mode = "table"

[controls]
detune = 85
chord = 1
shape = 1023
shift_shape = 600
"#;

/// Fifths patch - secondary pair a fifth apart.
const FIFTHS_PATCH: &str = r#"
name = "Fifths"
description = "Secondary pair tuned to a fifth, blended under the stack"
sample_rate = 48000

[engine]
secondary = "chord_interval"
highpass = true
detune_mode = "table"

[controls]
mix_a = 35
mix_b = 25
detune = 40
chord = 2
shape = 600
shift_shape = 150
"#;

/// Ring patch - ring modulation against a minor third pair.
const RING_PATCH: &str = r#"
name = "Ring"
description = "Ring modulated against a minor third pair"
sample_rate = 48000

[engine]
secondary = "chord_interval"
highpass = true
detune_mode = "table"

[controls]
ring_mix = 60
detune = 30
chord = 4
shape = 400
"#;

/// Get all factory patches.
///
/// # Example
///
/// ```rust
/// use supersaw_config::factory_presets;
///
/// let patches = factory_presets();
/// assert_eq!(patches.len(), 5);
/// ```
pub fn factory_presets() -> Vec<Patch> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Patch::from_toml(toml).ok())
        .collect()
}

/// Get a factory patch by name.
///
/// Matches the internal identifier or the patch's `name` field,
/// case-insensitively.
///
/// # Example
///
/// ```rust
/// use supersaw_config::get_factory_preset;
///
/// let patch = get_factory_preset("Wide").unwrap();
/// assert_eq!(patch.controls.detune, 85);
/// ```
pub fn get_factory_preset(name: &str) -> Option<Patch> {
    let wanted = name.to_lowercase();

    FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == wanted)
        .and_then(|(_, toml)| Patch::from_toml(toml).ok())
        .or_else(|| {
            factory_presets()
                .into_iter()
                .find(|patch| patch.name.to_lowercase() == wanted)
        })
}

/// Internal identifiers of all factory patches.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Whether `name` refers to a factory patch (case-insensitive).
///
/// ```rust
/// use supersaw_config::is_factory_preset;
///
/// assert!(is_factory_preset("fifths"));
/// assert!(is_factory_preset("FIFTHS"));
/// assert!(!is_factory_preset("my_patch"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
