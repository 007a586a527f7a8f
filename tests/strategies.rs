use indoc::indoc;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use statespace::algorithms::BreadthFirstSearch;
use statespace::algorithms::Strategy;
use statespace::algorithms::UniformCostSearch;
use statespace::algorithms::breadth_first_search;
use statespace::algorithms::graph_search;
use statespace::algorithms::tree_search;
use statespace::algorithms::uniform_cost_search;
use statespace::error::SearchError;
use statespace::problem::Problem;
use statespace::problem::ProblemDescriptor;
use statespace::problems::graph::GraphCost;
use statespace::problems::graph::GraphProblem;
use statespace::problems::maze_2d::Maze2DProblem;

const DIAMOND: &str = indoc! {"
    start A
    goal D
    A toB B 1
    A toC C 5
    B toD D 1
    C toD D 1
"};

fn diamond() -> GraphProblem {
    GraphProblem::try_from(DIAMOND).unwrap()
}

#[test]
fn diamond_uniform_cost_takes_the_cheap_branch() {
    let p = diamond();
    let solution = uniform_cost_search(&p).unwrap();

    assert_eq!(solution.actions, vec!["toB", "toD"]);
    assert_eq!(solution.cost, 2);
    assert_eq!(solution.start, "A");
    assert_eq!(solution.end, "D");
}

#[test]
fn diamond_breadth_first_takes_two_actions() {
    let p = diamond();
    let solution = breadth_first_search(&p).unwrap();

    assert_eq!(solution.len(), 2);
    assert!(p.is_valid_solution(&solution));
}

#[test]
fn diamond_graph_and_tree_search_find_valid_paths() {
    let p = diamond();

    let solution = graph_search(&p).unwrap();
    assert_eq!(solution.end, "D");
    assert!(p.is_valid_solution(&solution));

    let solution = tree_search(&p).unwrap();
    assert_eq!(solution.end, "D");
    assert!(p.is_valid_solution(&solution));
}

#[test]
fn root_goal_is_solved_without_actions() {
    let p = GraphProblem::new("A")
        .with_goal("A")
        .with_edge("A", "loop", "A", 3);

    for strategy in Strategy::ALL {
        let solution = strategy.solve(&p).unwrap();
        assert!(solution.is_empty(), "{strategy}");
        assert_eq!(solution.cost, 0, "{strategy}");
        assert_eq!(solution.start, solution.end, "{strategy}");
    }
}

#[test]
fn unreachable_goal_is_reported() {
    let p = GraphProblem::new("A")
        .with_goal("Z")
        .with_edge("A", "a", "B", 1)
        .with_edge("B", "b", "A", 1)
        .with_edge("B", "c", "C", 1);

    for strategy in Strategy::ALL.into_iter().filter(Strategy::terminates_on_cycles) {
        let (result, stats) = strategy.solve_with_stats(&p);
        assert_eq!(
            result,
            Err(SearchError::NoSolution { expanded: 3 }),
            "{strategy}"
        );
        assert_eq!(stats.expanded, 3, "{strategy}");
    }
}

#[test]
fn strategies_terminate_on_cycles() {
    // Every state has an edge back to the start.
    let mut p = GraphProblem::new("s0").with_goal("s9");
    for i in 0..9 {
        p.add_edge(format!("s{i}"), "back", "s0", 1).unwrap();
        p.add_edge(format!("s{i}"), "next", format!("s{}", i + 1), 1)
            .unwrap();
    }

    for strategy in Strategy::ALL.into_iter().filter(Strategy::terminates_on_cycles) {
        let solution = strategy.solve(&p).unwrap();
        assert_eq!(solution.len(), 9, "{strategy}");
        assert!(p.is_valid_solution(&solution), "{strategy}");
    }
}

/// Random digraph over `n` states with goal `n - 1`.
fn random_graph(rng: &mut ChaCha8Rng, n: u32, edges: u32) -> GraphProblem {
    let mut p = GraphProblem::new("0").with_goal((n - 1).to_string());
    for e in 0..edges {
        let from = rng.random_range(0..n);
        let to = rng.random_range(0..n);
        let cost: GraphCost = rng.random_range(0..10);
        p.add_edge(from.to_string(), format!("e{e}"), to.to_string(), cost)
            .unwrap();
    }
    p
}

/// The least cost of every simple path to a goal, by enumeration.
fn brute_force_least_cost(p: &GraphProblem) -> Option<GraphCost> {
    fn visit(
        p: &GraphProblem,
        s: &String,
        g: GraphCost,
        path: &mut Vec<String>,
        best: &mut Option<GraphCost>,
    ) {
        if p.goal_test(s) {
            *best = Some(best.map_or(g, |b| b.min(g)));
        }
        for edge in p.edges_from(s) {
            if path.contains(&edge.to) {
                continue;
            }
            path.push(edge.to.clone());
            visit(p, &edge.to, g + edge.cost, path, best);
            path.pop();
        }
    }

    let start = p.initial_state().clone();
    let mut best = None;
    visit(p, &start, 0, &mut vec![start.clone()], &mut best);
    best
}

/// The fewest actions to a goal, by enumeration.
fn brute_force_fewest_actions(p: &GraphProblem) -> Option<usize> {
    fn visit(p: &GraphProblem, s: &String, path: &mut Vec<String>, best: &mut Option<usize>) {
        if p.goal_test(s) {
            let len = path.len() - 1;
            *best = Some(best.map_or(len, |b| b.min(len)));
        }
        for edge in p.edges_from(s) {
            if path.contains(&edge.to) {
                continue;
            }
            path.push(edge.to.clone());
            visit(p, &edge.to, path, best);
            path.pop();
        }
    }

    let start = p.initial_state().clone();
    let mut best = None;
    visit(p, &start, &mut vec![start.clone()], &mut best);
    best
}

#[test]
fn uniform_cost_is_optimal_on_random_graphs() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    for _instance in 0..50 {
        let p = random_graph(&mut rng, 7, 16);

        match (uniform_cost_search(&p), brute_force_least_cost(&p)) {
            (Ok(solution), Some(best)) => {
                assert_eq!(solution.cost, best, "{p}");
                assert!(p.is_valid_solution(&solution), "{p}");
            }
            (Err(SearchError::NoSolution { .. }), None) => {}
            (result, best) => panic!("{p}\nUCS: {result:?}\nBest: {best:?}"),
        }
    }
}

#[test]
fn breadth_first_takes_fewest_actions_on_random_graphs() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for _instance in 0..50 {
        let p = random_graph(&mut rng, 7, 16);

        match (breadth_first_search(&p), brute_force_fewest_actions(&p)) {
            (Ok(solution), Some(fewest)) => {
                assert_eq!(solution.len(), fewest, "{p}");
                assert!(p.is_valid_solution(&solution), "{p}");
            }
            (Err(SearchError::NoSolution { .. }), None) => {}
            (result, fewest) => panic!("{p}\nBFS: {result:?}\nFewest: {fewest:?}"),
        }
    }
}

#[test]
fn graph_search_finds_valid_paths_on_random_graphs() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    for _instance in 0..50 {
        let p = random_graph(&mut rng, 7, 16);
        let reachable = brute_force_fewest_actions(&p).is_some();

        match graph_search(&p) {
            Ok(solution) => assert!(p.is_valid_solution(&solution), "{p}"),
            Err(SearchError::NoSolution { .. }) => assert!(!reachable, "{p}"),
        }
    }
}

#[test]
fn descriptor_problems_work_with_every_strategy() {
    // Walk a number line from 0 to 6 by +1 or +3, where +3 costs 5.
    let p = ProblemDescriptor::new(
        0i32,
        |s: &i32| if *s < 6 { vec![1, 3] } else { vec![] },
        |s: &i32, a: &i32| s + a,
        |s: &i32| *s == 6,
        |_from: &i32, a: &i32, _to: &i32| if *a == 3 { 5i64 } else { 1 },
    );

    for strategy in Strategy::ALL {
        let solution = strategy.solve(&p).unwrap();
        assert!(p.is_valid_solution(&solution), "{strategy}");
    }
    assert_eq!(uniform_cost_search(&p).unwrap().cost, 6);
    assert_eq!(breadth_first_search(&p).unwrap().len(), 2);
}

#[test]
fn maze_strategies_agree_on_reachability() {
    let p = Maze2DProblem::try_from(indoc! {"
        #########
        #S  #   #
        # # # # #
        # #   #G#
        #########
    "})
    .unwrap();

    let ucs = uniform_cost_search(&p).unwrap();
    let bfs = breadth_first_search(&p).unwrap();
    let graph = graph_search(&p).unwrap();

    for solution in [&ucs, &bfs, &graph] {
        assert!(p.is_valid_solution(solution));
    }
    assert!(ucs.cost <= bfs.cost);
    assert!(ucs.cost <= graph.cost);
    assert!(bfs.len() <= graph.len());
}

#[test]
fn mazes_take_diagonal_shortcuts() {
    let p = Maze2DProblem::try_from(indoc! {"
        S....
        .....
        ....G
    "})
    .unwrap();

    let mut ucs = UniformCostSearch::new(&p);
    let solution = ucs.run().unwrap();
    // Two diagonals and two straight moves.
    assert_eq!(solution.cost, 2 * 141 + 2 * 100);
    assert_eq!(solution.len(), 4);

    let mut bfs = BreadthFirstSearch::new(&p);
    assert_eq!(bfs.run().unwrap().len(), 4);
    assert_eq!(bfs.stats().decreased_keys, 0);
}

#[test]
fn romania_road_map() {
    let p = GraphProblem::try_from(include_str!("../data/problems/Graph/romania.graph")).unwrap();

    let ucs = uniform_cost_search(&p).unwrap();
    assert_eq!(ucs.cost, 418);
    assert_eq!(
        ucs.actions,
        vec!["toSibiu", "toRimnicuVilcea", "toPitesti", "toBucharest"]
    );

    let bfs = breadth_first_search(&p).unwrap();
    assert_eq!(bfs.actions, vec!["toSibiu", "toFagaras", "toBucharest"]);
    assert_eq!(bfs.cost, 450);
}

#[test]
fn sample_mazes_are_solvable() {
    for maze in [
        include_str!("../data/problems/Maze2D/rooms.maze"),
        include_str!("../data/problems/Maze2D/spiral.maze"),
    ] {
        let p = Maze2DProblem::try_from(maze).unwrap();
        let solution = uniform_cost_search(&p).unwrap();
        assert!(p.is_valid_solution(&solution));
    }
}
