//! Problems over an explicit, weighted directed graph.
//!
//! States and actions are plain names. Graphs can be built in code or parsed
//! from a small text format:
//!
//! ```text
//! # comments start with '#'
//! start A
//! goal D
//! A toB B 1
//! A toC C 5
//! B toD D 1
//! C toD D 1
//! ```
//!
//! Edge lines read `<from> <action> <to> <cost>`.

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::problem::Problem;

pub type GraphCost = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub action: String,
    pub to: String,
    pub cost: GraphCost,
}

/// Actions name the edge they take, so they must be unique per source state.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("State '{from}' already has an action named '{action}'")]
pub struct DuplicateAction {
    pub from: String,
    pub action: String,
}

#[derive(Clone, Debug)]
pub struct GraphProblem {
    start: String,
    goals: FxHashSet<String>,
    edges: FxHashMap<String, Vec<GraphEdge>>,
}

impl GraphProblem {
    #[must_use]
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goals: FxHashSet::default(),
            edges: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.add_goal(goal);
        self
    }

    /// Builder flavour of [`GraphProblem::add_edge`].
    ///
    /// Panics on a duplicate action in debug builds. Release builds keep the
    /// first edge.
    #[must_use]
    pub fn with_edge(
        mut self,
        from: impl Into<String>,
        action: impl Into<String>,
        to: impl Into<String>,
        cost: GraphCost,
    ) -> Self {
        let added = self.add_edge(from, action, to, cost);
        debug_assert!(added.is_ok(), "{added:?}");
        self
    }

    pub fn add_goal(&mut self, goal: impl Into<String>) {
        self.goals.insert(goal.into());
    }

    /// Adds an edge. Actions leaving a state are offered in insertion order.
    ///
    /// Fails without changes when `from` already has an edge named `action`.
    pub fn add_edge(
        &mut self,
        from: impl Into<String>,
        action: impl Into<String>,
        to: impl Into<String>,
        cost: GraphCost,
    ) -> Result<(), DuplicateAction> {
        let (from, action) = (from.into(), action.into());
        if self.edge(&from, &action).is_some() {
            return Err(DuplicateAction { from, action });
        }
        self.edges.entry(from).or_default().push(GraphEdge {
            action,
            to: to.into(),
            cost,
        });
        Ok(())
    }

    pub fn goals(&self) -> &FxHashSet<String> {
        &self.goals
    }

    pub fn edges_from(&self, s: &str) -> &[GraphEdge] {
        self.edges.get(s).map_or(&[], Vec::as_slice)
    }

    pub fn num_edges(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    fn edge(&self, s: &str, a: &str) -> Option<&GraphEdge> {
        self.edges_from(s).iter().find(|e| e.action == a)
    }
}

/// Unknown actions leave the state unchanged at no cost.
impl Problem for GraphProblem {
    type State = String;
    type Action = String;
    type Cost = GraphCost;

    fn initial_state(&self) -> &String {
        &self.start
    }

    fn actions(&self, s: &String) -> Vec<String> {
        self.edges_from(s).iter().map(|e| e.action.clone()).collect()
    }

    fn result(&self, s: &String, a: &String) -> String {
        self.edge(s, a).map_or_else(|| s.clone(), |e| e.to.clone())
    }

    fn goal_test(&self, s: &String) -> bool {
        self.goals.contains(s)
    }

    fn cost(&self, from: &String, a: &String, _to: &String) -> GraphCost {
        self.edge(from, a).map_or(0, |e| e.cost)
    }
}

impl std::fmt::Display for GraphProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut goals: Vec<&String> = self.goals.iter().collect();
        goals.sort();
        writeln!(
            f,
            "Graph({} edges) (s:{:?}, g:{:?}):",
            self.num_edges(),
            self.start,
            goals
        )?;
        let mut sources: Vec<&String> = self.edges.keys().collect();
        sources.sort();
        for from in sources {
            for e in &self.edges[from] {
                writeln!(f, "  {from} --{}({})--> {}", e.action, e.cost, e.to)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum GraphParseError {
    #[error("Missing 'start <state>' line")]
    MissingStart,
    #[error("Line {line}: expected '<from> <action> <to> <cost>', found '{content}'")]
    InvalidLine { line: usize, content: String },
    #[error("Line {line}: {e}")]
    DuplicateAction { line: usize, e: DuplicateAction },
    #[error("Line {line}: invalid cost: {e}")]
    InvalidCost {
        line: usize,
        e: std::num::ParseIntError,
    },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

impl std::convert::TryFrom<&str> for GraphProblem {
    type Error = GraphParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut start = None;
        let mut goals = vec![];
        let mut edges = vec![];

        for (i, line) in s.lines().enumerate() {
            let line_number = i + 1;
            let content = line.split('#').next().unwrap_or_default().trim();
            let words: Vec<&str> = content.split_whitespace().collect();

            match words.as_slice() {
                [] => {}
                ["start", s] => start = Some(s.to_string()),
                ["goal", g] => goals.push(g.to_string()),
                [from, action, to, cost] => {
                    let cost = cost
                        .parse::<GraphCost>()
                        .map_err(|e| GraphParseError::InvalidCost {
                            line: line_number,
                            e,
                        })?;
                    edges.push((
                        line_number,
                        from.to_string(),
                        action.to_string(),
                        to.to_string(),
                        cost,
                    ));
                }
                _ => {
                    return Err(GraphParseError::InvalidLine {
                        line: line_number,
                        content: content.to_string(),
                    });
                }
            }
        }

        let mut problem = GraphProblem::new(start.ok_or(GraphParseError::MissingStart)?);
        for goal in goals {
            problem.add_goal(goal);
        }
        for (line, from, action, to, cost) in edges {
            problem
                .add_edge(from, action, to, cost)
                .map_err(|e| GraphParseError::DuplicateAction { line, e })?;
        }
        Ok(problem)
    }
}

impl std::convert::TryFrom<&std::path::Path> for GraphProblem {
    type Error = GraphParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(p).map_err(|e| GraphParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        GraphProblem::try_from(text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    const DIAMOND: &str = indoc! {"
        # A small diamond where the cheap branch goes through B
        start A
        goal D
        A toB B 1
        A toC C 5
        B toD D 1
        C toD D 1
    "};

    #[test]
    fn parses_text() {
        let p = GraphProblem::try_from(DIAMOND).unwrap();

        assert_eq!(p.initial_state(), "A");
        assert!(p.goal_test(&"D".to_string()));
        assert!(!p.goal_test(&"A".to_string()));
        assert_eq!(p.num_edges(), 4);
        assert_eq!(p.actions(&"A".to_string()), vec!["toB", "toC"]);
        assert!(p.actions(&"D".to_string()).is_empty());
    }

    #[test]
    fn follows_edges() {
        let p = GraphProblem::try_from(DIAMOND).unwrap();
        let a = "A".to_string();
        let to_c = "toC".to_string();

        assert_eq!(p.result(&a, &to_c), "C");
        assert_eq!(p.cost(&a, &to_c, &"C".to_string()), 5);
        assert_eq!(p.result(&a, &"nope".to_string()), "A");
        assert_eq!(p.cost(&a, &"nope".to_string(), &a), 0);
    }

    #[test]
    fn builder_matches_parser() {
        let built = GraphProblem::new("A")
            .with_goal("D")
            .with_edge("A", "toB", "B", 1)
            .with_edge("A", "toC", "C", 5)
            .with_edge("B", "toD", "D", 1)
            .with_edge("C", "toD", "D", 1);
        let parsed = GraphProblem::try_from(DIAMOND).unwrap();

        assert_eq!(built.to_string(), parsed.to_string());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            GraphProblem::try_from("goal D\nA toD D 1"),
            Err(GraphParseError::MissingStart)
        ));
        assert!(matches!(
            GraphProblem::try_from("start A\nA toD D"),
            Err(GraphParseError::InvalidLine { line: 2, .. })
        ));
        assert!(matches!(
            GraphProblem::try_from("start A\nA toD D -1"),
            Err(GraphParseError::InvalidCost { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_actions() {
        // The second 'go' would never be taken.
        let text = indoc! {"
            start A
            goal C
            A go B 1
            A go C 1
        "};
        match GraphProblem::try_from(text) {
            Err(GraphParseError::DuplicateAction { line, e }) => {
                assert_eq!(line, 4);
                assert_eq!(e.from, "A");
                assert_eq!(e.action, "go");
            }
            other => panic!("{other:?}"),
        }

        // Same action name from another state is fine.
        assert!(GraphProblem::try_from("start A\nA go B 1\nB go C 1").is_ok());
    }

    #[test]
    fn add_edge_keeps_the_first_edge() {
        let mut p = GraphProblem::new("A");
        assert_eq!(p.add_edge("A", "go", "B", 1), Ok(()));
        assert_eq!(
            p.add_edge("A", "go", "C", 2),
            Err(DuplicateAction {
                from: "A".to_string(),
                action: "go".to_string(),
            })
        );

        assert_eq!(p.num_edges(), 1);
        assert_eq!(p.result(&"A".to_string(), &"go".to_string()), "B");
    }
}
