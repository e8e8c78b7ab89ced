use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use ripsalsa::crypto::{ripemd_digest, Salsa20};

const DATA_LEN: usize = 16 * 1024;

fn bench_ripemd_digest(c: &mut Criterion) {
    let data = vec![0x5au8; DATA_LEN];
    let mut group = c.benchmark_group("ripemd128");
    group.throughput(Throughput::Bytes(DATA_LEN as u64));
    group.bench_function("digest_16k", |b| {
        b.iter(|| black_box(ripemd_digest(black_box(&data))));
    });
    group.finish();
}

fn bench_salsa20_process(c: &mut Criterion) {
    let key: Vec<u8> = (0u8..32).collect();
    let mut buf = vec![0u8; DATA_LEN];
    let mut group = c.benchmark_group("salsa20");
    group.throughput(Throughput::Bytes(DATA_LEN as u64));
    for rounds in [8u32, 12, 20] {
        let mut cipher = Salsa20::with_params(&key, &[0; 8], 0, rounds).unwrap();
        group.bench_function(format!("apply_keystream_16k_r{}", rounds), |b| {
            b.iter(|| {
                cipher.apply_keystream(black_box(&mut buf));
            });
        });
    }
    group.finish();
}

fn bench_salsa20_block(c: &mut Criterion) {
    let cipher = Salsa20::new(&[7u8; 16], &[0; 8]).unwrap();
    c.bench_function("salsa20_keystream_block", |b| {
        let mut counter = 0u64;
        b.iter(|| {
            counter = counter.wrapping_add(1);
            black_box(cipher.keystream_block(black_box(counter)));
        });
    });
}

criterion_group!(
    benches,
    bench_ripemd_digest,
    bench_salsa20_process,
    bench_salsa20_block
);

criterion_main!(benches);
