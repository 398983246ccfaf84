//! Dispatch Benchmarks
//!
//! Run with: cargo bench --bench dispatch

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use replcalc::calculator::History;
use replcalc::commands::CommandRegistry;
use replcalc::console::ScriptedConsole;
use replcalc::dispatch::{DispatchLoop, MenuOptions};
use replcalc::plugins::{builtin_plugins, Discoverer};

fn discovered_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    Discoverer::default().discover(&builtin_plugins(History::shared()), &mut registry);
    registry
}

fn benchmark_registry(c: &mut Criterion) {
    let registry = discovered_registry();

    let mut group = c.benchmark_group("registry");
    group.throughput(Throughput::Elements(1));

    group.bench_function("resolve_by_name", |b| {
        b.iter(|| registry.resolve(black_box("greet")));
    });

    group.bench_function("resolve_by_position", |b| {
        b.iter(|| registry.resolve_by_position(black_box(3)));
    });

    group.finish();
}

fn benchmark_discovery(c: &mut Criterion) {
    c.bench_function("discover_builtin_plugins", |b| {
        b.iter(discovered_registry);
    });
}

fn benchmark_menu_session(c: &mut Criterion) {
    let registry = discovered_registry();

    let mut group = c.benchmark_group("menu_session");

    for selections in [10usize, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*selections as u64));
        group.bench_with_input(
            format!("{}_selections", selections),
            selections,
            |b, &n| {
                b.iter(|| {
                    let inputs = std::iter::repeat("4")
                        .take(n)
                        .chain(std::iter::once("exit"));
                    let mut console = ScriptedConsole::new(inputs);
                    DispatchLoop::new(&registry, MenuOptions::top_level()).run(&mut console)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_registry,
    benchmark_discovery,
    benchmark_menu_session
);
criterion_main!(benches);
