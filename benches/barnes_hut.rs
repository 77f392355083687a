use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use rs_gravity::particles::{bounding_rect, direct_force, Particle, QuadTree, Simulation};
use rs_gravity::utils::SimulationConfig;

fn scattered(count: usize) -> Vec<Particle> {
    (0..count)
        .map(|i| {
            let x = ((i * 7919) % 800) as f64 + (i % 13) as f64 * 0.37;
            let y = ((i * 104_729) % 600) as f64 + (i % 11) as f64 * 0.53;
            Particle::new((x, y), (0.0, 0.0), 1.0 + (i % 5) as f64, 2.0).unwrap()
        })
        .collect()
}

pub fn bench_forces(c: &mut Criterion) {
    let mut group = c.benchmark_group("forces");
    group.measurement_time(std::time::Duration::from_secs(5));
    group.sample_size(50);
    let config = SimulationConfig::default();

    for count in [100, 500, 2000] {
        let particles = scattered(count);

        group.bench_with_input(BenchmarkId::new("barnes_hut", count), &particles, |b, particles| b.iter(|| {
            let boundary = bounding_rect(particles, config.bounds_margin).unwrap();
            let mut tree = QuadTree::build(boundary, config.tree_capacity, particles);
            tree.aggregate();
            let mut sum = (0.0, 0.0);
            for p in particles {
                let (fx, fy) = tree.compute_force(p, config.gravitational_constant, 0.5);
                sum = (sum.0 + fx, sum.1 + fy);
            }
            black_box(sum)
        }));

        group.bench_with_input(BenchmarkId::new("direct", count), &particles, |b, particles| b.iter(|| {
            let mut sum = (0.0, 0.0);
            for i in 0..particles.len() {
                let (fx, fy) = direct_force(i, particles, config.gravitational_constant);
                sum = (sum.0 + fx, sum.1 + fy);
            }
            black_box(sum)
        }));
    }
}

pub fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    group.sample_size(50);

    group.bench_function("random_500", |b| {
        let mut sim = Simulation::with_seed(SimulationConfig::default(), 1)
            .unwrap()
            .with_random_particles(500);
        b.iter(|| black_box(sim.step()))
    });
}

criterion_group!(benches, bench_forces, bench_step);
criterion_main!(benches);
