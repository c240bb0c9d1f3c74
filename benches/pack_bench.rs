//! Criterion benchmarks for micropack
//!
//! Run with: cargo bench --bench pack_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use micropack::{Packer, StaticBuf};

fn bench_scalars(c: &mut Criterion) {
    let mut buf = StaticBuf::<64>::new();

    c.bench_function("pack_nil_bool", |b| {
        let mut packer = Packer::new(&mut buf);
        b.iter(|| {
            packer.reset();
            packer.pack_nil().unwrap();
            packer.pack_bool(black_box(true)).unwrap();
            black_box(packer.len());
        });
    });

    c.bench_function("pack_float", |b| {
        let mut packer = Packer::new(&mut buf);
        b.iter(|| {
            packer.reset();
            packer.pack_float(black_box(23.5)).unwrap();
            black_box(packer.len());
        });
    });

    c.bench_function("pack_uint16_fixed", |b| {
        let mut packer = Packer::new(&mut buf);
        b.iter(|| {
            packer.reset();
            packer.pack_uint16(black_box(0xBEEF)).unwrap();
            black_box(packer.len());
        });
    });
}

fn bench_compact_integers(c: &mut Criterion) {
    let mut group = c.benchmark_group("compact_uint");
    let mut buf = StaticBuf::<16>::new();

    // One value per format width
    for value in [7u16, 200, 60_000] {
        group.bench_with_input(BenchmarkId::from_parameter(value), &value, |b, &value| {
            let mut packer = Packer::new(&mut buf);
            b.iter(|| {
                packer.reset();
                packer.pack_uint(black_box(value.into())).unwrap();
                black_box(packer.len());
            });
        });
    }

    group.finish();

    let mut group = c.benchmark_group("compact_int");
    for value in [-7i16, -100, -30_000] {
        group.bench_with_input(BenchmarkId::from_parameter(value), &value, |b, &value| {
            let mut packer = Packer::new(&mut buf);
            b.iter(|| {
                packer.reset();
                packer.pack_int(black_box(value.into())).unwrap();
                black_box(packer.len());
            });
        });
    }

    group.finish();
}

fn bench_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_str");
    let mut buf = vec![0u8; 4096];

    let texts: &[&[u8]] = &[
        b"id",
        b"temperature_sensor_01",
        &[b'x'; 100],
        &[b'y'; 1000],
    ];

    for text in texts {
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), text, |b, text| {
            let mut packer = Packer::new(&mut buf[..]);
            b.iter(|| {
                packer.reset();
                packer.pack_str(black_box(*text)).unwrap();
                black_box(packer.len());
            });
        });
    }

    group.finish();
}

fn bench_telemetry_record(c: &mut Criterion) {
    let mut buf = StaticBuf::<128>::new();

    c.bench_function("telemetry_record", |b| {
        let mut packer = Packer::new(&mut buf);
        b.iter(|| {
            packer.reset();
            packer.pack_map(4).unwrap();
            packer.pack_str("id").unwrap();
            packer.pack_uint(black_box(42)).unwrap();
            packer.pack_str("ok").unwrap();
            packer.pack_bool(black_box(true)).unwrap();
            packer.pack_str("temp").unwrap();
            packer.pack_float(black_box(21.75)).unwrap();
            packer.pack_str("samples").unwrap();
            packer.pack_array(3).unwrap();
            for sample in [101, -3, 7000] {
                packer.pack_int(black_box(sample)).unwrap();
            }
            black_box(packer.len());
        });
    });
}

criterion_group!(
    benches,
    bench_scalars,
    bench_compact_integers,
    bench_strings,
    bench_telemetry_record
);
criterion_main!(benches);
