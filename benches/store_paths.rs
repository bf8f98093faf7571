use criterion::{black_box, criterion_group, criterion_main, Criterion};
use showcase_sim::clock::HeadlessClock;
use showcase_sim::config::{ClockMode, Config, PacingConfig};
use showcase_sim::sim::{self, Runner};
use showcase_sim::sim::marketplace::{product_for, MarketplaceScenario};
use showcase_sim::store::SimulationStore;
use showcase_sim::{AppContext, DemoId};
use std::sync::Arc;
use tokio::runtime::Runtime;

fn instant_context() -> AppContext {
    let mut config = Config::default();
    config.pacing = PacingConfig::instant();
    config.simulation.clock = ClockMode::Headless;
    config.simulation.seed = Some(7);
    AppContext::new(config)
}

fn bench_append_product(c: &mut Criterion) {
    let store = SimulationStore::new(Arc::new(HeadlessClock));
    let product = product_for(0).unwrap();
    c.bench_function("append_product", |b| {
        b.iter(|| {
            store.reset(DemoId::Marketplace);
            for _ in 0..8 {
                black_box(store.append_product(product.clone()));
            }
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let ctx = instant_context();
    let runner = Runner::new(ctx.clone(), MarketplaceScenario);
    for step in 0..8 {
        runner.step_once(step);
    }
    c.bench_function("snapshot", |b| {
        b.iter(|| black_box(ctx.store().snapshot()));
    });
}

fn bench_run_all(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("run_all_instant", |b| {
        b.to_async(&rt).iter(|| async {
            let ctx = instant_context();
            black_box(sim::run_all(&ctx).await);
        });
    });
}

criterion_group!(benches, bench_append_product, bench_snapshot, bench_run_all);
criterion_main!(benches);
