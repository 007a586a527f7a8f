use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use glob::glob;
use hrsw::Stopwatch;
use human_duration::human_duration;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use statespace::algorithms::Strategy;
use statespace::problems::maze_2d::Maze2DProblem;

const MAX_INSTANCE_TIME: Duration = Duration::from_secs(2);
const NUM_INSTANCES: u64 = 3;
const NUM_GOALS: u16 = 1;

const STRATEGIES: [Strategy; 3] = [
    Strategy::Graph,
    Strategy::BreadthFirst,
    Strategy::UniformCost,
];

fn solve(strategy: Strategy, problem: &Maze2DProblem) -> bool {
    strategy.solve(problem).is_ok()
}

fn compare_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("Maze2D Search");

    for path in glob("data/problems/Maze2D/*.maze")
        .unwrap()
        .filter_map(std::result::Result::ok)
    {
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        let base_problem = Maze2DProblem::try_from(path.as_path()).unwrap();
        let (x, y) = base_problem.space().dimensions();

        for i in 0..NUM_INSTANCES {
            let instance_name = format!("{name}[{x}x{y}]:{i}");
            let mut rng = ChaCha8Rng::seed_from_u64(i);

            let Some(problem) = base_problem.randomize(&mut rng, NUM_GOALS) else {
                log::warn!("Failed to generate {instance_name}");
                continue;
            };

            for strategy in STRATEGIES {
                let mut stopwatch = Stopwatch::new_started();
                let (result, stats) = strategy.solve_with_stats(&problem);
                stopwatch.stop();
                let elapsed = stopwatch.elapsed();
                if result.is_err() {
                    stats.print_stats(strategy.name()).unwrap();
                }
                if elapsed > MAX_INSTANCE_TIME {
                    log::warn!(
                        "Skipping {instance_name} as it takes too long with {} ({})",
                        strategy.name(),
                        human_duration(&elapsed)
                    );
                    continue;
                }

                group.bench_with_input(
                    BenchmarkId::new(strategy.to_string(), &instance_name),
                    &problem,
                    |b, p| b.iter(|| solve(strategy, p)),
                );
            }
        }
    }
    group.finish();
}

criterion_group!(benches, compare_strategies);
criterion_main!(benches);
