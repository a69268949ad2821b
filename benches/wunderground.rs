use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wunderground::{Query, UrlParams, UrlRouter, WEATHER_DATA};

fn bench_routing(c: &mut Criterion) {
    let router = UrlRouter::new("http://api.wunderground.com/api", "0123456789abcdef").unwrap();
    let params: UrlParams = [
        ("features", "conditions/tide"),
        ("settings", "lang:EN/pws:1/bestfct:1"),
        ("query", "94107"),
        ("format", "json"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let url = router.generate(WEATHER_DATA, &params, &[]).unwrap();

    c.bench_function("generate", |b| {
        b.iter(|| router.generate(WEATHER_DATA, black_box(&params), &[]))
    });
    c.bench_function("parse", |b| b.iter(|| router.parse(WEATHER_DATA, black_box(&url))));
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| {
        b.iter(|| {
            for raw in ["Croatia/Zagreb", "CA/San_Francisco", "94107", "pws:KCASANFR70"] {
                let _ = Query::classify(black_box(raw));
            }
        })
    });
}

criterion_group!(benches, bench_routing, bench_classify);
criterion_main!(benches);
