//! Offline rendering of a patch to WAV.
//!
//! The voice is driven the way a host drives it: fixed-size buffers, one
//! LFO value per buffer, parameters applied through `set_parameter`.

use anyhow::{Context, bail};
use clap::Args;
use std::path::PathBuf;
use supersaw_config::{Patch, get_factory_preset};
use supersaw_core::{Pitch, f32_to_q31};

use crate::wav::{mono_spec, write_wav};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Patch file (TOML)
    #[arg(long, conflicts_with = "preset")]
    patch: Option<PathBuf>,

    /// Factory patch name
    #[arg(long, default_value = "init")]
    preset: String,

    /// MIDI note number
    #[arg(long, default_value = "45")]
    note: u8,

    /// Fine tuning in cents
    #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
    cents: f32,

    /// Duration in seconds
    #[arg(long, default_value = "2.0")]
    duration: f32,

    /// Host buffer size in frames
    #[arg(long, default_value = "64")]
    buffer: usize,

    /// LFO rate in Hz
    #[arg(long, default_value = "0.5")]
    lfo_rate: f32,

    /// LFO depth (0-1)
    #[arg(long, default_value = "0.0")]
    lfo_depth: f32,

    /// Write 32-bit float instead of Q31 integer samples
    #[arg(long)]
    float: bool,
}

/// Host pitch word for a note plus a cents offset.
///
/// The result is clamped to the representable range `0.0..=127 + 255/256`.
fn pitch_from(note: u8, cents: f32) -> Pitch {
    let semitones = (f32::from(note) + cents / 100.0).clamp(0.0, 127.0 + 255.0 / 256.0);
    let whole = semitones.floor();
    let fine = ((semitones - whole) * 256.0).round().min(255.0);
    Pitch {
        note: whole as u8,
        fine: fine as u8,
    }
}

/// Sine LFO value at the start of a buffer.
fn lfo_at(frame: usize, sample_rate: u32, rate: f32, depth: f32) -> f32 {
    let t = frame as f32 / sample_rate as f32;
    depth * (std::f32::consts::TAU * rate * t).sin()
}

fn load_patch(args: &RenderArgs) -> anyhow::Result<Patch> {
    let patch = match &args.patch {
        Some(path) => Patch::load(path)?,
        None => match get_factory_preset(&args.preset) {
            Some(patch) => patch,
            None => bail!("unknown factory patch: {}", args.preset),
        },
    };
    patch
        .validate()
        .with_context(|| format!("patch '{}' is invalid", patch.name))?;
    Ok(patch)
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    if !(args.duration.is_finite() && args.duration > 0.0) {
        bail!("duration must be positive, got {}", args.duration);
    }
    if args.buffer == 0 {
        bail!("buffer size must be at least 1 frame");
    }
    if !(0.0..=1.0).contains(&args.lfo_depth) {
        bail!("LFO depth must be within 0-1, got {}", args.lfo_depth);
    }

    let patch = load_patch(&args)?;
    let sample_rate = patch.sample_rate;
    let pitch = pitch_from(args.note, args.cents);
    let total = (args.duration * sample_rate as f32) as usize;

    tracing::info!(
        patch = %patch.name,
        note = pitch.note,
        fine = pitch.fine,
        sample_rate,
        buffer = args.buffer,
        "rendering"
    );

    let mut voice = patch.build_voice();
    voice.note_on(pitch);

    let spec = mono_spec(sample_rate, args.float);
    let mut frame = 0;

    let peak = if args.float {
        let mut samples = vec![0.0f32; total];
        for block in samples.chunks_mut(args.buffer) {
            let lfo = lfo_at(frame, sample_rate, args.lfo_rate, args.lfo_depth);
            voice.render_f32(pitch, lfo, block);
            frame += block.len();
        }
        voice.note_off();
        write_wav(&args.output, &samples, spec)?;
        samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    } else {
        let mut samples = vec![0i32; total];
        for block in samples.chunks_mut(args.buffer) {
            let lfo = lfo_at(frame, sample_rate, args.lfo_rate, args.lfo_depth);
            voice.render(pitch, f32_to_q31(lfo), block);
            frame += block.len();
        }
        voice.note_off();
        write_wav(&args.output, &samples, spec)?;
        samples
            .iter()
            .map(|&s| supersaw_core::q31_to_f32(s).abs())
            .fold(0.0f32, f32::max)
    };

    tracing::info!(path = %args.output.display(), frames = total, "wrote output");

    println!(
        "Rendered '{}' at {:.2} Hz ({:.2}s) to {}",
        patch.name,
        pitch.frequency(),
        args.duration,
        args.output.display()
    );
    println!("  Peak: {:.1} dB", 20.0 * peak.max(1e-10).log10());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_from_whole_note() {
        assert_eq!(pitch_from(69, 0.0), Pitch::from_note(69));
    }

    #[test]
    fn pitch_from_cents() {
        assert_eq!(pitch_from(69, 50.0), Pitch { note: 69, fine: 128 });
        assert_eq!(pitch_from(69, -50.0), Pitch { note: 68, fine: 128 });
        assert_eq!(pitch_from(69, 1200.0), Pitch::from_note(81));
    }

    #[test]
    fn pitch_from_clamps() {
        assert_eq!(pitch_from(0, -100.0), Pitch::from_note(0));
        assert_eq!(pitch_from(127, 500.0), Pitch { note: 127, fine: 255 });
    }

    #[test]
    fn lfo_starts_at_zero_and_respects_depth() {
        assert_eq!(lfo_at(0, 48000, 2.0, 0.7), 0.0);
        // Quarter period of a 1 Hz sine.
        assert!((lfo_at(12000, 48000, 1.0, 0.7) - 0.7).abs() < 1e-5);
    }
}
