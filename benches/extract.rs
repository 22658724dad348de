use criterion::criterion_main;
use image::RgbImage;
use inkroute::extract::{ExtractConfig, RouteExtractor, SkeletonStrategy};
use inkroute_fixtures::{l_route, ring_route, two_routes};

struct ExtractScenario {
    name: &'static str,
    image: fn() -> RgbImage,
    components: usize,
}

const EXTRACT_CASES: [ExtractScenario; 3] = [
    ExtractScenario {
        name: "L_ROUTE",
        image: l_route,
        components: 1,
    },
    ExtractScenario {
        name: "RING_ROUTE",
        image: ring_route,
        components: 1,
    },
    ExtractScenario {
        name: "TWO_ROUTES",
        image: two_routes,
        components: 2,
    },
];

fn extract_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("extract");
    group.significance_level(0.1).sample_size(30);

    for strategy in [SkeletonStrategy::Morphological, SkeletonStrategy::Ridge] {
        let mut config = ExtractConfig::default();
        config.skeleton.strategy = strategy;
        let extractor = RouteExtractor::new(config);

        EXTRACT_CASES.iter().for_each(|sc| {
            let image = (sc.image)();

            group.bench_function(format!("extract: {} ({strategy})", sc.name), |b| {
                b.iter(|| {
                    let result = extractor
                        .extract_rgb(&image)
                        .expect("Extraction must complete successfully");

                    assert!(result.components.len() >= sc.components);
                })
            });
        });
    }

    group.finish();
}

criterion::criterion_group!(extract_benches, extract_benchmark);
criterion_main!(extract_benches);
