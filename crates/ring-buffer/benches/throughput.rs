//! Ring buffer push/read throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use ring_buffer::RingBuffer;

fn push_then_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer");
    group.throughput(Throughput::Elements(127));

    group.bench_function("u8_fill_drain_128", |b| {
        let buffer = RingBuffer::<u8>::new(128);
        let mut out = [0u8; 128];
        b.iter(|| {
            for i in 0..127u8 {
                buffer.push(black_box(i));
            }
            black_box(buffer.read_into(&mut out));
        });
    });

    group.bench_function("u16_fill_drain_128", |b| {
        let buffer = RingBuffer::<u16>::new(128);
        let mut out = [0u16; 128];
        b.iter(|| {
            for i in 0..127u16 {
                buffer.push(black_box(i));
            }
            black_box(buffer.read_into(&mut out));
        });
    });

    group.finish();
}

criterion_group!(benches, push_then_read);
criterion_main!(benches);
