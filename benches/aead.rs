use chacha_aead::ChaCha20Poly1305;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_aead(c: &mut Criterion) {
    let aead = ChaCha20Poly1305::new(&[0x42; 32]);
    let nonce = [0x24u8; 12];
    let ad = [0u8; 13];

    let mut group = c.benchmark_group("chacha20poly1305");

    for len in [64usize, 1024, 16 * 1024] {
        let pt = vec![0u8; len];
        let sealed = aead.seal(&nonce, &pt, &ad).unwrap();
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("seal", len), &pt, |b, pt| {
            b.iter(|| aead.seal(&nonce, black_box(pt), &ad))
        });
        group.bench_with_input(BenchmarkId::new("open", len), &sealed, |b, sealed| {
            b.iter(|| aead.open(&nonce, black_box(sealed), &ad))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aead);
criterion_main!(benches);
