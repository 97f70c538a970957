//! Note pitch to phase-increment conversion.
//!
//! Hosts describe the current pitch as a 16-bit word: the high byte is the
//! MIDI note number and the low byte a fraction of a semitone in 1/256
//! steps. The oscillators advance a normalized phase in \[0, 1), so the
//! engine wants the pitch as an increment in cycles per sample.

/// Highest increment handed to the oscillators (just under Nyquist).
pub const MAX_INCREMENT: f32 = 0.49;

/// Pitch of the current note: MIDI note plus a 1/256-semitone fraction.
///
/// # Example
///
/// ```rust
/// use supersaw_core::Pitch;
///
/// let pitch = Pitch::from_raw(0x4580);
/// assert_eq!(pitch.note, 69);
/// assert_eq!(pitch.fine, 0x80);
/// assert!((pitch.semitones() - 69.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pitch {
    /// MIDI note number (69 = A4).
    pub note: u8,
    /// Fractional semitone in 1/256 steps.
    pub fine: u8,
}

impl Pitch {
    /// Pitch of an exact MIDI note.
    pub const fn from_note(note: u8) -> Self {
        Self { note, fine: 0 }
    }

    /// Unpack a host pitch word (`note << 8 | fine`).
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            note: (raw >> 8) as u8,
            fine: (raw & 0xFF) as u8,
        }
    }

    /// Pack back into a host pitch word.
    pub const fn raw(&self) -> u16 {
        ((self.note as u16) << 8) | self.fine as u16
    }

    /// Pitch as fractional MIDI note number.
    #[inline]
    pub fn semitones(&self) -> f32 {
        f32::from(self.note) + f32::from(self.fine) / 256.0
    }

    /// Frequency in Hz (A4 = 440 Hz, equal temperament).
    #[inline]
    pub fn frequency(&self) -> f32 {
        midi_to_freq(self.semitones())
    }
}

/// Convert a (fractional) MIDI note number to frequency in Hz.
#[inline]
pub fn midi_to_freq(note: f32) -> f32 {
    440.0 * libm::powf(2.0, (note - 69.0) / 12.0)
}

/// Convert frequency in Hz to a phase increment in cycles per sample.
///
/// Negative frequencies map to zero; results are capped at
/// [`MAX_INCREMENT`].
#[inline]
pub fn hz_to_increment(freq_hz: f32, sample_rate: f32) -> f32 {
    (freq_hz / sample_rate).clamp(0.0, MAX_INCREMENT)
}

/// Fundamental phase increment for a host pitch.
///
/// # Example
///
/// ```rust
/// use supersaw_core::{Pitch, pitch_to_increment};
///
/// let w0 = pitch_to_increment(Pitch::from_note(69), 48000.0);
/// assert!((w0 - 440.0 / 48000.0).abs() < 1e-7);
/// ```
#[inline]
pub fn pitch_to_increment(pitch: Pitch, sample_rate: f32) -> f32 {
    hz_to_increment(pitch.frequency(), sample_rate)
}
