// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orthowire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orthowire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use orthowire::config::RouteConfig;
use orthowire::model::Point;
use orthowire::route::{plan_route, reroute_wire};

mod fixtures;
mod profiler;

use fixtures::Case;

// Benchmark identity (keep stable):
// - Group names in this file: `route.direct`, `route.search`, `route.reroute_all`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (e.g. `small`, `medium`, `dense`).
// - If implementations move/deduplicate, update the wiring but do not rename
//   group or case IDs.
fn benches_route(c: &mut Criterion) {
    let config = RouteConfig::default();

    {
        let mut group = c.benchmark_group("route.direct");

        for (case_id, case) in [("small", Case::Small), ("dense", Case::Dense)] {
            let circuit = fixtures::fixture(case);
            let obstacles = circuit.obstacles();
            let existing = circuit.wire_segments(None);
            let start = Point::new(-fixtures::SPACING / 2.0, -fixtures::SPACING / 2.0);
            let end = Point::new(fixtures::SPACING * 20.0, -fixtures::SPACING / 2.0 + 20.0);

            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let route = plan_route(
                        black_box(&config),
                        black_box(start),
                        black_box(end),
                        black_box(&obstacles),
                        black_box(&existing),
                    );
                    black_box(route.points.len())
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("route.search");

        for (case_id, case) in [("small", Case::Small), ("medium", Case::Medium), ("dense", Case::Dense)]
        {
            let circuit = fixtures::fixture(case);
            let obstacles = circuit.obstacles();
            let existing = circuit.wire_segments(None);
            let (start, end) = fixtures::search_endpoints(case);

            group.throughput(Throughput::Elements(obstacles.len() as u64));
            group.bench_function(case_id, move |b| {
                b.iter(|| {
                    let route = plan_route(
                        black_box(&config),
                        black_box(start),
                        black_box(end),
                        black_box(&obstacles),
                        black_box(&existing),
                    );

                    let mut acc = route.points.len() as u64;
                    for point in &route.points {
                        acc = acc.wrapping_add(point.x.abs() as u64);
                        acc = acc.wrapping_add(point.y.abs() as u64);
                    }
                    black_box(acc)
                })
            });
        }

        group.finish();
    }

    {
        let mut group = c.benchmark_group("route.reroute_all");

        for (case_id, case) in [("small", Case::Small), ("medium", Case::Medium)] {
            let circuit = fixtures::fixture(case);
            let wire_ids = circuit.wires().iter().map(|wire| wire.id().clone()).collect::<Vec<_>>();

            group.throughput(Throughput::Elements(wire_ids.len() as u64));
            group.bench_function(case_id, |b| {
                b.iter_batched(
                    || circuit.clone(),
                    |mut circuit| {
                        for wire_id in &wire_ids {
                            reroute_wire(&mut circuit, wire_id, black_box(&config));
                        }
                        black_box(fixtures::checksum_circuit(&circuit))
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_route
}
criterion_main!(benches);
