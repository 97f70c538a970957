//! Output stage: optional pitch-tracking high-pass, then soft clip.

use supersaw_core::{OnePoleHighpass, cubic_soft_clip};

/// Cubic coefficient of the output soft clipper.
pub const SOFT_CLIP_KNEE: f32 = 0.125;

/// High-pass (when enabled) followed by [`cubic_soft_clip`].
///
/// The pole is retuned once per buffer from the pitch mapper; the filter
/// memory lives for the whole life of the voice and is only cleared by
/// [`reset`](Self::reset).
#[derive(Debug, Clone, PartialEq)]
pub struct PostFilterChain {
    highpass: Option<OnePoleHighpass>,
}

impl PostFilterChain {
    /// Create the chain, with or without the high-pass.
    pub fn new(highpass: bool) -> Self {
        Self {
            highpass: highpass.then(OnePoleHighpass::new),
        }
    }

    /// Whether the high-pass stage is present.
    pub fn has_highpass(&self) -> bool {
        self.highpass.is_some()
    }

    /// The high-pass stage, if present.
    pub fn highpass(&self) -> Option<&OnePoleHighpass> {
        self.highpass.as_ref()
    }

    /// Move the high-pass pole (cycles per sample). No-op without a filter.
    pub fn retune(&mut self, pole_freq: f32) {
        if let Some(hp) = self.highpass.as_mut() {
            hp.set_pole_frequency(pole_freq);
        }
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let filtered = match self.highpass.as_mut() {
            Some(hp) => hp.process(input),
            None => input,
        };
        cubic_soft_clip(SOFT_CLIP_KNEE, filtered)
    }

    /// Clear filter memory.
    pub fn reset(&mut self) {
        if let Some(hp) = self.highpass.as_mut() {
            hp.reset();
        }
    }
}
