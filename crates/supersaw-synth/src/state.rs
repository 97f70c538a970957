//! Per-voice running state.

use crate::mapper::OscillatorIncrements;

/// Derived state that must be recomputed before the next buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PendingUpdate {
    /// The detune knob moved; re-evaluate the detune curve.
    Detune = 1 << 0,
}

/// Set of [`PendingUpdate`]s.
///
/// Control-rate code inserts, the render path drains at buffer start, so
/// repeated changes between two buffers coalesce into one recomputation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingUpdates(u8);

impl PendingUpdates {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Mark `update` as pending.
    pub fn insert(&mut self, update: PendingUpdate) {
        self.0 |= update as u8;
    }

    /// Whether `update` is pending.
    pub fn contains(self, update: PendingUpdate) -> bool {
        self.0 & update as u8 != 0
    }

    /// Clear `update`, returning whether it was pending.
    pub fn take(&mut self, update: PendingUpdate) -> bool {
        let was = self.contains(update);
        self.0 &= !(update as u8);
        was
    }

    /// Whether nothing is pending.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// Phase accumulators, increments and LFO ramp of one voice.
///
/// Every phase is kept in \[0, 1) and carried across buffers unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceState<const N: usize> {
    /// Central (`phase[0]`) and side oscillator phases.
    pub phase: [f32; N],
    /// Secondary oscillator A phase.
    pub phase_secondary_a: f32,
    /// Secondary oscillator B phase.
    pub phase_secondary_b: f32,
    /// Increments derived from the current pitch.
    pub increments: OscillatorIncrements<N>,
    /// LFO value reached at the end of the previous buffer.
    pub lfo_begin: f32,
    /// LFO target for the current buffer.
    pub lfo_end: f32,
    /// Derived state waiting to be recomputed.
    pub pending: PendingUpdates,
}

impl<const N: usize> Default for VoiceState<N> {
    fn default() -> Self {
        Self {
            phase: [0.0; N],
            phase_secondary_a: 0.0,
            phase_secondary_b: 0.0,
            increments: OscillatorIncrements::default(),
            lfo_begin: 0.0,
            lfo_end: 0.0,
            pending: PendingUpdates::NONE,
        }
    }
}

impl<const N: usize> VoiceState<N> {
    /// Zero every accumulator and clear pending work.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Increment of stack oscillator `index`, or `None` if out of range.
    pub fn increment(&self, index: usize) -> Option<f32> {
        self.increments.stack.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_set_operations() {
        let mut pending = PendingUpdates::NONE;
        assert!(pending.is_empty());
        pending.insert(PendingUpdate::Detune);
        pending.insert(PendingUpdate::Detune);
        assert!(pending.contains(PendingUpdate::Detune));
        assert!(pending.take(PendingUpdate::Detune));
        assert!(!pending.take(PendingUpdate::Detune));
        assert!(pending.is_empty());
        pending.insert(PendingUpdate::Detune);
        pending.clear();
        assert!(pending.is_empty());
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut state = VoiceState::<7>::default();
        state.phase[3] = 0.4;
        state.phase_secondary_b = 0.9;
        state.lfo_begin = 0.2;
        state.pending.insert(PendingUpdate::Detune);
        state.reset();
        assert_eq!(state, VoiceState::default());
    }
}
