//! Control parameters and host value ingestion.
//!
//! The host addresses controls by a small integer id and sends raw integer
//! values. Every value is scaled and clamped here, at ingestion, so the
//! kernel can read the fields without any further validation.
//!
//! | Id | Control | Raw scaling |
//! |----|---------|-------------|
//! | 0 | mix A | percent, `raw * 0.01` clamped |
//! | 1 | mix B | percent |
//! | 2 | ring mix | percent |
//! | 3 | detune | percent (knob position 0..=100) |
//! | 4 | chord select | 1..=4, other values ignored |
//! | 5 | reserved | ignored |
//! | 6 | shape | 10-bit knob |
//! | 7 | shift-shape (drift) | 10-bit knob |

use crate::config::SecondaryMode;
use crate::mapper::Chord;
use supersaw_core::{clamp01, param_val_to_f32, percent_to_unit};

/// Host control identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ParamId {
    /// Secondary oscillator A blend.
    MixA = 0,
    /// Secondary oscillator B blend.
    MixB = 1,
    /// Ring modulation blend.
    RingMix = 2,
    /// Linear detune knob.
    Detune = 3,
    /// Chord interval selector.
    ChordSelect = 4,
    /// Unassigned slot.
    Reserved = 5,
    /// Morph between single saw and full stack.
    Shape = 6,
    /// Drift depth.
    ShiftShape = 7,
}

impl ParamId {
    /// All ids in host order.
    pub const ALL: [ParamId; 8] = [
        ParamId::MixA,
        ParamId::MixB,
        ParamId::RingMix,
        ParamId::Detune,
        ParamId::ChordSelect,
        ParamId::Reserved,
        ParamId::Shape,
        ParamId::ShiftShape,
    ];

    /// Decode a host index; unknown indices are `None`.
    pub fn from_index(index: u16) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Host index of this control.
    pub fn index(self) -> u16 {
        self as u16
    }

    /// Short identifier, as used in patch files and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::MixA => "mix_a",
            Self::MixB => "mix_b",
            Self::RingMix => "ring_mix",
            Self::Detune => "detune",
            Self::ChordSelect => "chord",
            Self::Reserved => "reserved",
            Self::Shape => "shape",
            Self::ShiftShape => "shift_shape",
        }
    }
}

/// What an ingested value changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ingest {
    /// A field was stored; nothing derived needs recomputing.
    Stored,
    /// The detune knob moved; the curved amount is stale.
    DetuneChanged,
    /// The value was dropped.
    Ignored,
}

/// Normalized control values, read by the kernel every buffer.
///
/// All blend weights are in \[0, 1\]. `detune_curved` is written when a
/// pending detune change is drained, not at ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlParameters {
    /// Blend weight of secondary oscillator A (sub octave in fixed mode).
    pub mix_a: f32,
    /// Blend weight of secondary oscillator B (super octave in fixed mode).
    pub mix_b: f32,
    /// Ring modulation blend.
    pub ring_mix: f32,
    /// Base morph position.
    pub shape: f32,
    /// Drift depth.
    pub shift_shape: f32,
    /// Linear detune knob.
    pub detune_linear: f32,
    /// Detune after the curve.
    pub detune_curved: f32,
    /// Chord interval for the secondary pair.
    pub chord: Chord,
}

impl ControlParameters {
    /// Store a raw host value.
    ///
    /// Chord selection is ignored in [`SecondaryMode::FixedOctave`] and for
    /// selector values outside 1..=4.
    pub fn ingest(&mut self, id: ParamId, raw: u16, mode: SecondaryMode) -> Ingest {
        match id {
            ParamId::MixA => self.mix_a = percent_to_unit(raw),
            ParamId::MixB => self.mix_b = percent_to_unit(raw),
            ParamId::RingMix => self.ring_mix = percent_to_unit(raw),
            ParamId::Detune => {
                self.detune_linear = percent_to_unit(raw);
                return Ingest::DetuneChanged;
            }
            ParamId::ChordSelect => match (mode, Chord::from_select(raw)) {
                (SecondaryMode::ChordInterval, Some(chord)) => self.chord = chord,
                _ => return Ingest::Ignored,
            },
            ParamId::Reserved => return Ingest::Ignored,
            ParamId::Shape => self.shape = param_val_to_f32(raw),
            ParamId::ShiftShape => self.shift_shape = param_val_to_f32(raw),
        }
        Ingest::Stored
    }

    /// Store a normalized value (0..=1) for a continuous control.
    ///
    /// Values are clamped and NaN is stored as 0. Chord select and the
    /// reserved slot are not continuous and are ignored here.
    pub fn ingest_unit(&mut self, id: ParamId, value: f32) -> Ingest {
        let value = clamp01(value);
        match id {
            ParamId::MixA => self.mix_a = value,
            ParamId::MixB => self.mix_b = value,
            ParamId::RingMix => self.ring_mix = value,
            ParamId::Detune => {
                self.detune_linear = value;
                return Ingest::DetuneChanged;
            }
            ParamId::Shape => self.shape = value,
            ParamId::ShiftShape => self.shift_shape = value,
            ParamId::ChordSelect | ParamId::Reserved => return Ingest::Ignored,
        }
        Ingest::Stored
    }
}
