//! Criterion benchmarks for supersaw-synth
//!
//! Run with: cargo bench -p supersaw-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use supersaw_core::{NaiveSaw, Pitch};
use supersaw_synth::{DetuneTable, ParamId, SupersawVoice, VoiceConfig, detune_curve};

const BLOCK_SIZES: &[usize] = &[16, 64, 256, 1024];

fn configured<S: supersaw_core::SawWave, const N: usize>(
    mut voice: SupersawVoice<S, N>,
) -> SupersawVoice<S, N> {
    for (id, raw) in [
        (ParamId::Detune, 60),
        (ParamId::Shape, 600),
        (ParamId::ShiftShape, 400),
        (ParamId::MixA, 20),
        (ParamId::MixB, 20),
        (ParamId::RingMix, 10),
    ] {
        voice.set_parameter(id.index(), raw);
    }
    voice
}

// ============================================================================
// Render benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("Render");
    let pitch = Pitch::from_note(57);

    let layouts = [
        ("Chord", VoiceConfig::chord()),
        ("Classic", VoiceConfig::classic()),
    ];

    for (name, config) in layouts {
        for &block_size in BLOCK_SIZES {
            let mut voice = configured(SupersawVoice::new(config));
            let mut buffer = vec![0i32; block_size];
            group.bench_with_input(BenchmarkId::new(name, block_size), &block_size, |b, _| {
                b.iter(|| {
                    voice.render(pitch, black_box(1 << 27), &mut buffer);
                    black_box(buffer[0])
                })
            });
        }
    }

    for &block_size in BLOCK_SIZES {
        let mut voice: SupersawVoice<NaiveSaw, 7> =
            configured(SupersawVoice::with_saw(VoiceConfig::chord(), NaiveSaw));
        let mut buffer = vec![0.0f32; block_size];
        group.bench_with_input(BenchmarkId::new("NaiveSaw", block_size), &block_size, |b, _| {
            b.iter(|| {
                voice.render_f32(pitch, black_box(0.1), &mut buffer);
                black_box(buffer[0])
            })
        });
    }

    group.finish();
}

// ============================================================================
// Detune benchmarks
// ============================================================================

fn bench_detune(c: &mut Criterion) {
    let mut group = c.benchmark_group("Detune");
    let table = DetuneTable::new();

    group.bench_function("Polynomial", |b| b.iter(|| detune_curve(black_box(0.63))));
    group.bench_function("TableLookup", |b| b.iter(|| table.lookup(black_box(0.63))));
    group.bench_function("BuildTable", |b| b.iter(|| black_box(DetuneTable::new())));

    group.finish();
}

criterion_group!(benches, bench_render, bench_detune);
criterion_main!(benches);
