use brufile::engine::{AddOptions, PackageRequest, plan_add, plan_drop};
use brufile::entry::PackageKind;
use brufile::index::MembershipIndex;
use brufile::parser::{self, Brewfile};
use brufile::resolver::{Catalog, PackageReference};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// A Brewfile with `n` formulae, `n / 4` casks and a tap every 50 formulae
fn synthetic_brewfile(n: usize) -> String {
    let mut content = String::from("# generated\n");
    for i in 0..n {
        if i % 50 == 0 {
            content.push_str(&format!("tap \"user{}/tools\"\n", i / 50));
        }
        content.push_str(&format!("brew \"formula-{}\"\n", i));
        if i % 4 == 0 {
            content.push_str(&format!("cask 'app-{}'\n", i));
        }
    }
    content.push_str("mas \"Xcode\", id: 497799835\n");
    content
}

fn synthetic_catalog(n: usize) -> Catalog {
    let mut catalog = Catalog::new();
    for i in 0..n {
        catalog.register(PackageReference::core(
            PackageKind::Formula,
            &format!("formula-{}", i),
        ));
        catalog.register(PackageReference::core(PackageKind::Cask, &format!("app-{}", i)));
    }
    catalog
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [100, 1_000, 10_000] {
        let content = synthetic_brewfile(size);
        group.bench_with_input(BenchmarkId::new("entries", size), &content, |b, text| {
            b.iter(|| parser::parse(black_box(text)))
        });
        group.bench_with_input(BenchmarkId::new("lines", size), &content, |b, text| {
            b.iter(|| Brewfile::parse(black_box(text)))
        });
    }

    group.finish();
}

fn bench_index_build(c: &mut Criterion) {
    let entries = parser::parse(&synthetic_brewfile(1_000));

    c.bench_function("index build 1000", |b| {
        b.iter(|| MembershipIndex::build(black_box(&entries)))
    });
}

fn bench_plan(c: &mut Criterion) {
    let size = 1_000;
    let brewfile = Brewfile::parse(&synthetic_brewfile(size));
    let catalog = synthetic_catalog(size * 2);
    let options = AddOptions::default();

    // Half already present, half new
    let requests: Vec<_> = (size / 2..size + size / 2)
        .map(|i| PackageRequest::formula(format!("formula-{}", i)))
        .collect();

    c.bench_function("plan_add 1000", |b| {
        b.iter(|| plan_add(black_box(&brewfile), &requests, &catalog, &options))
    });

    c.bench_function("plan_drop 1000", |b| {
        b.iter(|| plan_drop(black_box(&brewfile), &requests, &catalog))
    });
}

criterion_group!(benches, bench_parse, bench_index_build, bench_plan);
criterion_main!(benches);
