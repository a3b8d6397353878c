use criterion::{black_box, criterion_group, criterion_main, Criterion};
use probe_strip::{find_u16, find_u32, find_u8, split, strip_str, StripMode, WideStr};
use std::time::Duration;

fn padded(body: &str, pad: usize) -> String {
    let mut s = String::with_capacity(body.len() + 2 * pad);
    for i in 0..pad {
        s.push(if i % 3 == 0 { '\t' } else { ' ' });
    }
    s.push_str(body);
    for i in 0..pad {
        s.push(if i % 2 == 0 { '\n' } else { ' ' });
    }
    s
}

fn bench_strip(c: &mut Criterion) {
    let text = padded("payload with ` aliasing ` characters", 64);
    c.bench_function("strip::str_both_64", |b| {
        b.iter(|| black_box(strip_str(black_box(&text), StripMode::Both, " \t\n")))
    });

    let wide = WideStr::from(padded("Ωmega", 64).as_str());
    let seps = WideStr::from(" \t\n");
    c.bench_function("strip::wide_both_64", |b| {
        b.iter(|| black_box(wide.strip(StripMode::Both, &seps)))
    });
}

// Target sits at the end so every search scans the whole buffer.
fn bench_find(c: &mut Criterion) {
    let n = 4096;
    let mut bytes = vec![b'a'; n];
    bytes[n - 1] = b'z';
    let mut halves: Vec<u16> = vec![0x3a9; n];
    halves[n - 1] = 0x3c9;
    let mut fulls: Vec<u32> = vec![0x1f600; n];
    fulls[n - 1] = 0x1f601;

    c.bench_function("find::u8_4k", |b| b.iter(|| black_box(find_u8(&bytes, 'z' as u32))));
    c.bench_function("find::u16_4k", |b| b.iter(|| black_box(find_u16(&halves, 0x3c9))));
    c.bench_function("find::u32_4k", |b| b.iter(|| black_box(find_u32(&fulls, 0x1f601))));
}

fn bench_split(c: &mut Criterion) {
    let line = "cmd --flag 'quoted arg with spaces' plain \\'escaped\\' tail".repeat(8);
    c.bench_function("split::quoted_line", |b| {
        b.iter(|| black_box(split(black_box(&line), " ", true)))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(3))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_strip, bench_find, bench_split
}
criterion_main!(benches);
