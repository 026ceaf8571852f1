use criterion::{Criterion, black_box, criterion_group, criterion_main};
use srgb_lut_gen::bucket::{EncodedSamples, build_candidate};
use srgb_lut_gen::search::best_at_shift;
use srgb_lut_gen::transfer::linear_u16_to_srgb_f64;
use srgb_lut_gen::{ACCEPT_ERROR, LinearToSrgbTable};

const BATCH_SIZE: usize = 10_000;

fn create_test_u16() -> Vec<u16> {
    (0..BATCH_SIZE)
        .map(|i| (i * 65535 / (BATCH_SIZE - 1)) as u16)
        .collect()
}

fn bench_candidates(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidates");
    group.sample_size(20);

    group.bench_function("encode_all_samples", |b| {
        b.iter(|| black_box(EncodedSamples::new()))
    });

    let samples = EncodedSamples::new();

    // Loose enough to score every bucket instead of bailing out early
    group.bench_function("build_shift4", |b| {
        b.iter(|| black_box(build_candidate(&samples, 4, black_box(8), 1.0 / 16.0)))
    });

    group.bench_function("build_shift0", |b| {
        b.iter(|| black_box(build_candidate(&samples, 0, 0, ACCEPT_ERROR)))
    });

    group.bench_function("best_at_shift4", |b| {
        b.iter(|| black_box(best_at_shift(&samples, 4, ACCEPT_ERROR)))
    });

    group.finish();
}

fn bench_linear_to_srgb_10k(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_to_srgb_10k");
    let input = create_test_u16();

    let samples = EncodedSamples::new();
    let table = LinearToSrgbTable::from(
        build_candidate(&samples, 4, 8, ACCEPT_ERROR).expect("shift 4 table"),
    );

    // Compressed table lookup
    group.bench_function("table", |b| {
        let mut output = vec![0u8; BATCH_SIZE];
        b.iter(|| {
            for (o, &l) in output.iter_mut().zip(&input) {
                *o = table.lookup(l);
            }
            black_box(&output);
        })
    });

    // Direct evaluation of the curve (baseline)
    group.bench_function("direct_f64", |b| {
        let mut output = vec![0u8; BATCH_SIZE];
        b.iter(|| {
            for (o, &l) in output.iter_mut().zip(&input) {
                *o = (linear_u16_to_srgb_f64(l) * 255.0 + 0.5) as u8;
            }
            black_box(&output);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_candidates, bench_linear_to_srgb_10k,);

criterion_main!(benches);
