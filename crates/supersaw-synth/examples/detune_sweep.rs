//! Detune sweep demo.
//!
//! Renders one second of A2 at several detune settings and prints the RMS
//! level and how far the outer side pair sits from the fundamental.
//!
//! Run with: cargo run -p supersaw-synth --example detune_sweep

use supersaw_core::Pitch;
use supersaw_synth::{ParamId, SupersawVoice, VoiceConfig};

const SAMPLE_RATE: f32 = 48000.0;
const BUFFER: usize = 64;

fn main() {
    let pitch = Pitch::from_note(45);
    println!("Detune sweep at {:.1} Hz", pitch.frequency());
    println!("{:>7} {:>9} {:>12} {:>8}", "knob %", "curved", "outer (Hz)", "RMS");

    for knob in [0u16, 10, 25, 50, 75, 90, 100] {
        let mut voice = SupersawVoice::new(VoiceConfig::chord());
        voice.set_parameter(ParamId::Detune.index(), knob);
        voice.set_parameter(ParamId::Shape.index(), 1023);

        let mut buffer = [0.0f32; BUFFER];
        let mut sum_sq = 0.0f64;
        let blocks = SAMPLE_RATE as usize / BUFFER;
        for _ in 0..blocks {
            voice.render_f32(pitch, 0.0, &mut buffer);
            sum_sq += buffer.iter().map(|&s| f64::from(s * s)).sum::<f64>();
        }
        let rms = (sum_sq / (blocks * BUFFER) as f64).sqrt();

        let stack = voice.state().increments.stack;
        let outer_hz = (stack[6] - stack[0]) * SAMPLE_RATE;
        println!(
            "{knob:>7} {:>9.5} {outer_hz:>12.2} {rms:>8.4}",
            voice.params().detune_curved
        );
    }
}
