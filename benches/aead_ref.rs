use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_chacha20poly1305_crate(c: &mut Criterion) {
    let aead = ChaCha20Poly1305::new(Key::from_slice(&[0x42; 32]));
    let nonce = [0x24u8; 12];
    let ad = [0u8; 13];

    let mut group = c.benchmark_group("chacha20poly1305 crate");

    for len in [64usize, 1024, 16 * 1024] {
        let pt = vec![0u8; len];
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("seal", len), &pt, |b, pt| {
            b.iter(|| {
                aead.encrypt(
                    Nonce::from_slice(&nonce),
                    Payload {
                        msg: black_box(pt),
                        aad: &ad,
                    },
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chacha20poly1305_crate);
criterion_main!(benches);
