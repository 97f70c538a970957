//! Mono WAV output via hound.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

/// Mono 32-bit format, integer (Q31) or float.
pub fn mono_spec(sample_rate: u32, float: bool) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: if float {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    }
}

/// Write samples to a WAV file.
///
/// `S` must match the sample format: `i32` for Q31, `f32` for float.
pub fn write_wav<P: AsRef<Path>, S: hound::Sample + Copy>(
    path: P,
    samples: &[S],
    spec: WavSpec,
) -> anyhow::Result<()> {
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn q31_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q31.wav");
        let samples = [0i32, i32::MAX, i32::MIN, 1 << 30];
        write_wav(&path, &samples, mono_spec(48000, false)).unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.spec(), mono_spec(48000, false));
        let read: Vec<i32> = reader.into_samples().map(Result::unwrap).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn float_format() {
        let spec = mono_spec(44100, true);
        assert_eq!(spec.sample_format, SampleFormat::Float);
        assert_eq!(spec.bits_per_sample, 32);
        assert_eq!(spec.channels, 1);
    }
}
