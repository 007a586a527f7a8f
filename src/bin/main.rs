use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use indoc::indoc;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing_subscriber::EnvFilter;

use statespace::algorithms::Strategy;
use statespace::algorithms::UnknownStrategy;
use statespace::problem::Problem;
use statespace::problems::graph::GraphProblem;
use statespace::problems::maze_2d::Maze2DProblem;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const BUILT_IN_MAZE: &str = indoc! {"
    ###########
    #S  #     #
    # # # ### #
    # #   #   #
    # ##### # #
    #       #G#
    ###########
"};

/// A comma separated list of strategies, or `all`.
#[derive(Clone, Debug)]
pub struct StrategyList(Vec<Strategy>);

fn parse_strategies(s: &str) -> Result<StrategyList, UnknownStrategy> {
    if s.eq_ignore_ascii_case("all") {
        return Ok(StrategyList(Strategy::ALL.to_vec()));
    }
    s.split(',')
        .map(|name| name.trim().parse())
        .collect::<Result<Vec<_>, _>>()
        .map(StrategyList)
}

/// Solves search problems with uninformed strategies
#[derive(Parser, Debug)]
#[clap(long_version = statespace::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Strategies to run: tree, graph, bfs, ucs or all. Defaults to all but tree.
    #[arg(short, long, env = "STATESPACE_STRATEGY", value_parser = parse_strategies)]
    pub strategy: Option<StrategyList>,

    /// Text mazes.
    #[arg(long)]
    pub maze: Vec<PathBuf>,

    /// Edge list graphs.
    #[arg(long)]
    pub graph: Vec<PathBuf>,

    /// Problem files, told apart by extension (.maze/.txt or .graph).
    #[arg()]
    pub problems: Vec<PathBuf>,

    /// Also solve this many random instances of every maze.
    #[arg(long, default_value_t = 0u64)]
    pub num_instances: u64,
    #[arg(long, default_value_t = 1u16)]
    pub instance_goals: u16,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

enum ProblemFile {
    Maze(PathBuf),
    Graph(PathBuf),
}

fn sniff(p: &Path) -> Option<ProblemFile> {
    match p.extension()?.to_str()? {
        "maze" | "txt" => Some(ProblemFile::Maze(p.to_path_buf())),
        "graph" => Some(ProblemFile::Graph(p.to_path_buf())),
        _ => None,
    }
}

fn solve<P>(problem: &P, strategies: &[Strategy]) -> std::io::Result<()>
where
    P: Problem,
{
    for strategy in strategies {
        if !strategy.terminates_on_cycles() {
            log::warn!("{} may not terminate on problems with cycles", strategy.name());
        }

        let mut stopwatch = Stopwatch::new_started();
        let (result, stats) = strategy.solve_with_stats(problem);
        stopwatch.stop();
        let elapsed = stopwatch.elapsed();

        match result {
            Ok(solution) => {
                println!(
                    "{} ({}): {} actions, cost {}",
                    strategy.name().bold(),
                    human_duration(&elapsed),
                    solution.len().green(),
                    solution.cost.green()
                );
                println!("  {solution}");
                debug_assert!(problem.is_valid_solution(&solution));
            }
            Err(e) => {
                println!(
                    "{} ({}): {}",
                    strategy.name().bold(),
                    human_duration(&elapsed),
                    e.red()
                );
            }
        }
        stats.write_stats(strategy.name(), anstream::stdout().lock())?;
    }
    anstream::stdout().flush()
}

fn solve_maze(p: &Path, args: &Args, strategies: &[Strategy]) -> std::io::Result<()> {
    let problem = match Maze2DProblem::try_from(p) {
        Ok(problem) => problem,
        Err(e) => {
            println!("Skipping {}: {}", p.display().yellow(), e.red());
            return Ok(());
        }
    };
    println!("* {}", p.display().cyan());
    println!("{problem}");
    solve(&problem, strategies)?;

    for instance in 0..args.num_instances {
        let mut rng = ChaCha8Rng::seed_from_u64(instance);
        match problem.randomize(&mut rng, args.instance_goals) {
            Some(random_problem) => {
                println!("** Instance {instance}");
                println!("{random_problem}");
                solve(&random_problem, strategies)?;
            }
            None => log::warn!(
                "Failed to generate random problem with seed {instance} and {} goals",
                args.instance_goals
            ),
        }
    }
    Ok(())
}

fn solve_graph(p: &Path, strategies: &[Strategy]) -> std::io::Result<()> {
    let problem = match GraphProblem::try_from(p) {
        Ok(problem) => problem,
        Err(e) => {
            println!("Skipping {}: {}", p.display().yellow(), e.red());
            return Ok(());
        }
    };
    println!("* {}", p.display().cyan());
    println!("{problem}");
    solve(&problem, strategies)
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    args.color.write_global();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let strategies = match &args.strategy {
        Some(StrategyList(strategies)) => strategies.clone(),
        None => vec![
            Strategy::Graph,
            Strategy::BreadthFirst,
            Strategy::UniformCost,
        ],
    };

    let mut files: Vec<ProblemFile> = vec![];
    files.extend(args.maze.iter().cloned().map(ProblemFile::Maze));
    files.extend(args.graph.iter().cloned().map(ProblemFile::Graph));
    for p in &args.problems {
        match sniff(p) {
            Some(file) => files.push(file),
            None => println!(
                "Skipping {}: unknown problem type, expected .maze, .txt or .graph",
                p.display().yellow()
            ),
        }
    }

    if files.is_empty() {
        let problem = Maze2DProblem::try_from(BUILT_IN_MAZE)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        println!("* Built-in maze");
        println!("{problem}");
        return solve(&problem, &strategies);
    }

    for file in &files {
        match file {
            ProblemFile::Maze(p) => solve_maze(p, &args, &strategies)?,
            ProblemFile::Graph(p) => solve_graph(p, &strategies)?,
        }
    }

    Ok(())
}
