use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use route_table::{Method, Router};

fn router_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("router-resolve");

    group.bench_function("single-route", |b| {
        let mut router: Router<()> = Router::new();
        router.get("/hello/:name", "hello").unwrap();
        b.iter_with_large_drop(|| router.resolve("/hello/world", "GET"))
    });

    group.bench_function("last-of-many", |b| {
        let mut router: Router<()> = Router::new();
        for i in 0..64 {
            router.get(&format!("/r{}/:id", i), "r").unwrap();
        }
        b.iter_with_large_drop(|| router.resolve("/r63/42", "GET"))
    });

    group.bench_function("method-not-allowed", |b| {
        let mut router: Router<()> = Router::new();
        router.post("/hello/:name", "hello").unwrap();
        b.iter_with_large_drop(|| router.resolve("/hello/world", "GET"))
    });
}

fn router_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("router-insert");

    group.bench_function("single-route", |b| {
        b.iter_batched_ref(
            Router::new,
            |router: &mut Router<()>| {
                router
                    .add_route(Method::GET, "/hello/:name", "hello", &[], &[])
                    .unwrap();
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, router_resolve, router_insert);
criterion_main!(benches);
