use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jog::{parse, Value};

const SAMPLE: &str = r#"{"index":0,"_id":"54c7fff8e3268528239d9cb1","guid":"b4940c5c-82ee-4f5e-bd02-f847fe2b9fc6","isActive":true,"balance":"$1,750.21","details":{"age":36,"eyeColor":"brown","longitude":102.563977},"registered":"2014-10-12T09:38:08 +07:00","latitude":-59.816976,"tags":["nisi","sint","aute","tempor","sit","esse","in"],"friends":[{"id":0,"name":"Case Gross"},{"id":1,"name":"Gilbert Rasmussen"},{"id":2,"name":"Harris Huff"}]}"#;

fn records(count: usize) -> String {
    let items: Vec<&str> = std::iter::repeat(SAMPLE).take(count).collect();
    format!("[{}]", items.join(","))
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for count in [1, 100, 1000] {
        let input = records(count);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| parse(input).expect("valid input"));
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let doc = parse(SAMPLE).expect("valid input");
    let root = doc.root();
    c.bench_function("query/get_int nested", |b| {
        b.iter(|| root.get_int(&["details", "age"]).expect("present"));
    });
    c.bench_function("query/type_of missing", |b| {
        b.iter(|| root.type_of(&["details", "height"]));
    });
}

fn bench_stringify(c: &mut Criterion) {
    let input = records(100);
    let doc = parse(&input).expect("valid input");
    c.bench_function("stringify/100 records", |b| {
        b.iter(|| doc.stringify(&[]).expect("root resolves"));
    });
}

criterion_group!(benches, bench_parse, bench_query, bench_stringify);
criterion_main!(benches);
