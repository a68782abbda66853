use chacha_aead::stream::{Cipher, Engine, available_engines, xor_key_stream_with};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const KEY: [u8; 32] = [0x42; 32];
const NONCE: [u8; 12] = [0x24; 12];

pub fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("chacha20 keystream");

    for len in [64usize, 512, 16 * 1024] {
        let src = vec![0u8; len];
        let mut dst = vec![0u8; len];
        group.throughput(Throughput::Bytes(len as u64));

        for engine in available_engines() {
            group.bench_with_input(BenchmarkId::new(format!("{engine:?}"), len), &src, |b, src| {
                b.iter(|| {
                    xor_key_stream_with(engine, &mut dst, black_box(src), &NONCE, &KEY, 1, 20)
                })
            });
        }
    }

    group.finish();
}

pub fn bench_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("chacha rounds 16 KiB");
    let mut buf = vec![0u8; 16 * 1024];
    group.throughput(Throughput::Bytes(buf.len() as u64));

    for rounds in [8, 12, 20] {
        let mut cipher = Cipher::new(&NONCE, &KEY, rounds).unwrap();
        group.bench_function(BenchmarkId::from_parameter(rounds), |b| {
            b.iter(|| cipher.apply_keystream(black_box(&mut buf)))
        });
    }

    group.finish();
}

pub fn bench_soft_block(c: &mut Criterion) {
    let mut dst = [0u8; 64];
    c.bench_function("chacha20 soft 64 bytes", |b| {
        b.iter(|| {
            xor_key_stream_with(Engine::Soft, &mut dst, black_box(&[0u8; 64]), &NONCE, &KEY, 1, 20)
        })
    });
}

criterion_group!(benches, bench_engines, bench_rounds, bench_soft_block);
criterion_main!(benches);
