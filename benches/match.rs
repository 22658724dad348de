use criterion::criterion_main;
use geo::{LineString, Point, point};
use inkroute::matching::{MapMatcher, Marker, MatchQuery, RoadSegment};
use inkroute_fixtures::roads::{diagonal, southern};

/// `count` copies of `base`, each shifted further east, numbered from `first`.
fn roads(base: &LineString, first: u64, count: u64) -> Vec<RoadSegment> {
    (first..first + count)
        .map(|id| {
            let offset = (id - first) as f64 * 0.001;
            let shifted = base
                .points()
                .map(|p| point! { x: p.x() + offset, y: p.y() })
                .collect::<LineString>();
            RoadSegment::new(id, shifted)
        })
        .collect()
}

fn densify(line: &LineString, steps: usize) -> LineString {
    line.lines()
        .flat_map(|segment| {
            (0..steps).map(move |step| {
                let t = step as f64 / steps as f64;
                Point::from(segment.start) * (1.0 - t) + Point::from(segment.end) * t
            })
        })
        .collect()
}

fn match_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("match");
    group.significance_level(0.1).sample_size(30);

    let path = densify(&diagonal(), 100);
    let query = MatchQuery::new(path)
        .with_anchors(vec![point! { x: 0.5, y: 0.5 }])
        .with_markers(vec![
            Marker::new(point! { x: 0.2, y: 0.8 }, 1),
            Marker::new(point! { x: 0.8, y: 0.2 }, 2),
        ]);

    let matcher = MapMatcher::default();

    for count in [10, 100, 1_000] {
        let mut candidates = roads(&diagonal(), 0, count);
        candidates.extend(roads(&southern(), count, count));

        group.bench_function(format!("rank: {} roads", candidates.len()), |b| {
            b.iter(|| {
                let ranked = matcher
                    .rank(&query, &candidates)
                    .expect("Ranking must complete successfully");

                assert_eq!(ranked[0].id, 0);
            })
        });
    }

    group.finish();
}

criterion::criterion_group!(match_benches, match_benchmark);
criterion_main!(match_benches);
