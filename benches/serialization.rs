use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_tabkv::{from_str, to_string, Decoder, Encoder};

#[derive(Serialize, Deserialize, Clone)]
struct Player {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

#[derive(Serialize, Deserialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
}

fn save_text(maps: usize) -> String {
    let mut encoder = Encoder::new();
    for i in 0..maps {
        encoder
            .begin_map(format!("Map {}", i))
            .pair("name", "Alice")
            .pair("position", "2 3")
            .begin_tab()
            .pair("hp", i)
            .end_tab()
            .end_map(format!("Map {}", i));
    }
    encoder.content()
}

fn benchmark_encode_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_events");

    for size in [10, 50, 100, 500].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| save_text(black_box(size)))
        });
    }

    group.finish();
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [10, 50, 100, 500].iter() {
        let text = save_text(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| Decoder::parse(black_box(text)))
        });
    }

    group.finish();
}

fn benchmark_lookup(c: &mut Criterion) {
    let mut decoder = Decoder::parse(&save_text(100));
    decoder.set_depth(50);

    c.bench_function("lookup_and_convert", |b| {
        b.iter(|| decoder.get(black_box("hp")).to::<i32>())
    });
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let player = Player {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&player)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "active: true\nemail: alice@example.com\nid: 123\nname: Alice";

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<Player>(black_box(text)))
    });
}

fn benchmark_nested_roundtrip(c: &mut Criterion) {
    let data = NestedData {
        id: 1,
        metadata: Metadata {
            created: "2024-01-01".to_string(),
            updated: "2024-01-02".to_string(),
            version: 1,
        },
    };

    c.bench_function("nested_roundtrip", |b| {
        b.iter(|| {
            let text = to_string(black_box(&data)).unwrap();
            from_str::<NestedData>(&text).unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_encode_events,
    benchmark_decode,
    benchmark_lookup,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_nested_roundtrip
);
criterion_main!(benches);
