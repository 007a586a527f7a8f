//! 8-connected grid mazes.
//!
//! Mazes are read from text, one row per line:
//!
//! | Char | Cell |
//! |---|---|
//! | `S` | the start, exactly one |
//! | `G` | a goal, any number |
//! | `#`, `█` | wall |
//! | ` `, `.` | empty |
//!
//! Moving to an orthogonal neighbour costs 100 and to a diagonal one costs 141.

use derive_more::Display;
use nonmax::NonMaxU32;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::problem::Problem;
use crate::space::Action;
use crate::space::State;

const MAX_ELEMENTS_DISPLAYED: usize = 64;
const RANDOM_STATE_MAX_TRIES: usize = 10_000;

pub(crate) type CoordIntrinsic = u32;
pub type Coord = NonMaxU32;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[display("({x},{y})")]
pub struct Maze2DState {
    pub(crate) x: Coord,
    pub(crate) y: Coord,
}

impl Maze2DState {
    pub fn new(x: CoordIntrinsic, y: CoordIntrinsic) -> Option<Maze2DState> {
        Some(Maze2DState {
            x: Coord::new(x)?,
            y: Coord::new(y)?,
        })
    }
    pub fn new_from_usize(x: usize, y: usize) -> Option<Maze2DState> {
        let x = CoordIntrinsic::try_from(x).ok()?;
        let y = CoordIntrinsic::try_from(y).ok()?;
        Self::new(x, y)
    }
    #[inline(always)]
    pub fn x(&self) -> usize {
        self.x.get() as usize
    }
    #[inline(always)]
    pub fn y(&self) -> usize {
        self.y.get() as usize
    }
}
impl State for Maze2DState {}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Maze2DAction {
    #[display("↑")]
    Up = 0, // y++
    #[display("↓")]
    Down = 1, // y--
    #[display("←")]
    Left = 2, // x--
    #[display("→")]
    Right = 3, // x++
    #[display("↖")]
    LeftUp = 4, // x--, y++
    #[display("↗")]
    RightUp = 5, // x++, y++
    #[display("↙")]
    LeftDown = 6, // x--, y--
    #[display("↘")]
    RightDown = 7, // x++, y--
}
impl Action for Maze2DAction {}

impl Maze2DAction {
    pub const ALL: [Maze2DAction; 8] = [
        Maze2DAction::LeftDown,
        Maze2DAction::Left,
        Maze2DAction::LeftUp,
        Maze2DAction::Down,
        Maze2DAction::Up,
        Maze2DAction::RightDown,
        Maze2DAction::Right,
        Maze2DAction::RightUp,
    ];

    #[inline(always)]
    pub fn is_diagonal(&self) -> bool {
        *self > Maze2DAction::Right
    }

    /// The `(dx, dy)` step as wrapping offsets.
    #[rustfmt::skip]
    fn delta(&self) -> (CoordIntrinsic, CoordIntrinsic) {
        let prev = CoordIntrinsic::MAX;
        let same = 0;
        let next = 1;
        match self {
            Maze2DAction::Up        => (same, next),
            Maze2DAction::Down      => (same, prev),
            Maze2DAction::Left      => (prev, same),
            Maze2DAction::Right     => (next, same),
            Maze2DAction::LeftUp    => (prev, next),
            Maze2DAction::RightUp   => (next, next),
            Maze2DAction::LeftDown  => (prev, prev),
            Maze2DAction::RightDown => (next, prev),
        }
    }
}

pub type Maze2DCost = CoordIntrinsic;

pub const ORTHOGONAL_COST: Maze2DCost = 100u32;
pub const DIAGONAL_COST: Maze2DCost = 141u32; // 1.414213562373095

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Maze2DCell {
    #[display("░")]
    Empty,
    #[display("█")]
    Wall,
}

#[derive(Debug, Error)]
pub enum Maze2DCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Maze2DCell {
    type Error = Maze2DCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' | '░' => Ok(Maze2DCell::Empty),
            '#' | '█' => Ok(Maze2DCell::Wall),
            ch => Err(Maze2DCellParseError::InvalidCharacter(ch)),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Maze2DSpace {
    pub(crate) map: Vec<Vec<Maze2DCell>>,
}

impl Maze2DSpace {
    pub(crate) fn new_empty_with_dimensions(x: usize, y: usize) -> Self {
        Self {
            map: vec![vec![Maze2DCell::Empty; x]; y],
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        if self.map.is_empty() {
            return (0, 0);
        }
        (self.map[0].len(), self.map.len())
    }

    #[inline(always)]
    pub fn valid(&self, state: &Maze2DState) -> bool {
        let (max_x, max_y) = self.dimensions();
        state.x() < max_x && state.y() < max_y
    }

    /// The cell at `state`, `None` when out of bounds.
    #[inline(always)]
    pub fn at(&self, state: &Maze2DState) -> Option<Maze2DCell> {
        self.map.get(state.y())?.get(state.x()).copied()
    }

    #[inline(always)]
    fn is_open(&self, state: &Maze2DState) -> bool {
        self.at(state) == Some(Maze2DCell::Empty)
    }

    /// Where `action` leads from `state`, if that cell is empty.
    pub fn apply(&self, state: &Maze2DState, action: &Maze2DAction) -> Option<Maze2DState> {
        let (dx, dy) = action.delta();
        let s = Maze2DState::new(
            state.x.get().wrapping_add(dx),
            state.y.get().wrapping_add(dy),
        )?;
        self.is_open(&s).then_some(s)
    }

    /// A uniformly chosen empty cell.
    pub fn random_state<R: rand::Rng>(&self, r: &mut R) -> Option<Maze2DState> {
        let (max_x, max_y) = self.dimensions();
        if max_x == 0 || max_y == 0 {
            return None;
        }

        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            let x = r.random_range(0..max_x);
            let y = r.random_range(0..max_y);
            if self.map[y][x] == Maze2DCell::Empty {
                return Maze2DState::new_from_usize(x, y);
            }
        }

        None
    }
}

impl std::fmt::Display for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.dimensions();
        writeln!(f, "Maze2D({}x{}):", d.0, d.1)?;
        for line in self.map.iter().take(MAX_ELEMENTS_DISPLAYED) {
            for cell in line.iter().take(MAX_ELEMENTS_DISPLAYED) {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze2D{:?}", self.dimensions())
    }
}

/// A maze with a single start and a set of goals.
#[derive(Clone, Debug)]
pub struct Maze2DProblem {
    space: Maze2DSpace,
    start: Maze2DState,
    goals: FxHashSet<Maze2DState>,
}

impl Maze2DProblem {
    /// A problem without goals. Add some with [`Maze2DProblem::with_goal`].
    pub fn new(space: Maze2DSpace, start: Maze2DState) -> Self {
        debug_assert!(space.valid(&start));
        Self {
            space,
            start,
            goals: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn with_goal(mut self, goal: Maze2DState) -> Self {
        debug_assert!(self.space.valid(&goal));
        self.goals.insert(goal);
        self
    }

    pub fn space(&self) -> &Maze2DSpace {
        &self.space
    }

    pub fn start(&self) -> &Maze2DState {
        &self.start
    }

    pub fn goals(&self) -> &FxHashSet<Maze2DState> {
        &self.goals
    }

    /// Picks a new random start and `num_goals` random goals on the same maze.
    ///
    /// Gives up with `None` when not enough empty cells turn up.
    pub fn randomize<R: rand::Rng>(&self, r: &mut R, num_goals: u16) -> Option<Maze2DProblem> {
        let start = self.space.random_state(r)?;
        let mut goals = FxHashSet::default();

        for _tries in 0..RANDOM_STATE_MAX_TRIES {
            if goals.len() >= num_goals as usize {
                return Some(Maze2DProblem {
                    space: self.space.clone(),
                    start,
                    goals,
                });
            }
            if let Some(random_state) = self.space.random_state(r) {
                goals.insert(random_state);
            }
        }

        None
    }
}

impl Problem for Maze2DProblem {
    type State = Maze2DState;
    type Action = Maze2DAction;
    type Cost = Maze2DCost;

    #[inline(always)]
    fn initial_state(&self) -> &Maze2DState {
        &self.start
    }

    /// Moves towards the empty neighbours of `s`.
    fn actions(&self, s: &Maze2DState) -> Vec<Maze2DAction> {
        Maze2DAction::ALL
            .into_iter()
            .filter(|a| self.space.apply(s, a).is_some())
            .collect()
    }

    /// Blocked moves leave the state unchanged.
    #[inline(always)]
    fn result(&self, s: &Maze2DState, a: &Maze2DAction) -> Maze2DState {
        self.space.apply(s, a).unwrap_or(*s)
    }

    #[inline(always)]
    fn goal_test(&self, s: &Maze2DState) -> bool {
        self.goals.contains(s)
    }

    #[inline(always)]
    fn cost(&self, _from: &Maze2DState, a: &Maze2DAction, _to: &Maze2DState) -> Maze2DCost {
        if a.is_diagonal() {
            DIAGONAL_COST
        } else {
            ORTHOGONAL_COST
        }
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq)]
pub enum Maze2DProblemCell {
    Cell(Maze2DCell),
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

#[derive(Debug, Error)]
pub enum Maze2DProblemCellParseError {
    #[error("Invalid cell {e}")]
    InvalidCell { e: Maze2DCellParseError },
}

impl std::convert::TryFrom<char> for Maze2DProblemCell {
    type Error = Maze2DProblemCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'S' => Ok(Maze2DProblemCell::Start),
            'G' => Ok(Maze2DProblemCell::Goal),
            ch => {
                let cell = Maze2DCell::try_from(ch)
                    .map_err(|e| Maze2DProblemCellParseError::InvalidCell { e })?;
                Ok(Maze2DProblemCell::Cell(cell))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum Maze2DProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Maze is too large ({x}x{y})")]
    TooLarge { x: usize, y: usize },
    #[error("Invalid cell {e} found at ({x},{y})")]
    InvalidCell {
        e: Maze2DProblemCellParseError,
        x: usize,
        y: usize,
    },
    #[error("Line {y} is {width} cells wide, expected at most {max_x}")]
    LineTooLong { y: usize, width: usize, max_x: usize },
    #[error("No start 'S' found")]
    MissingStart,
    #[error("Found a second start at {second}, already had {first}")]
    MultipleStarts {
        first: Maze2DState,
        second: Maze2DState,
    },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

impl std::convert::TryFrom<&str> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    /// Parses a maze. Blank lines around it are ignored and short lines are
    /// padded with empty cells.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut lines: Vec<&str> = s
            .lines()
            .skip_while(|l| l.trim().is_empty())
            .collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.is_empty() || lines[0].is_empty() {
            return Err(Maze2DProblemParseError::EmptyInput);
        }

        let max_x = lines[0].chars().count();
        let max_y = lines.len();
        if Maze2DState::new_from_usize(max_x, max_y).is_none() {
            return Err(Maze2DProblemParseError::TooLarge { x: max_x, y: max_y });
        }

        let mut space = Maze2DSpace::new_empty_with_dimensions(max_x, max_y);
        let mut start: Option<Maze2DState> = None;
        let mut goals = FxHashSet::default();

        for (y, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width > max_x {
                return Err(Maze2DProblemParseError::LineTooLong { y, width, max_x });
            }

            for (x, ch) in line.chars().enumerate() {
                let cell = Maze2DProblemCell::try_from(ch)
                    .map_err(|e| Maze2DProblemParseError::InvalidCell { e, x, y })?;
                let state = Maze2DState::new_from_usize(x, y)
                    .ok_or(Maze2DProblemParseError::TooLarge { x: max_x, y: max_y })?;

                space.map[y][x] = match cell {
                    Maze2DProblemCell::Start => {
                        if let Some(first) = start {
                            return Err(Maze2DProblemParseError::MultipleStarts {
                                first,
                                second: state,
                            });
                        }
                        start = Some(state);
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::Goal => {
                        goals.insert(state);
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::Cell(c) => c,
                }
            }
        }

        Ok(Maze2DProblem {
            space,
            start: start.ok_or(Maze2DProblemParseError::MissingStart)?,
            goals,
        })
    }
}

impl std::convert::TryFrom<&std::path::Path> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(p).map_err(|e| Maze2DProblemParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        Maze2DProblem::try_from(text.as_str())
    }
}

impl std::fmt::Display for Maze2DProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.space.dimensions();
        writeln!(
            f,
            "Maze2DProblem({}x{}) (s:{}, {} goals):",
            d.0,
            d.1,
            self.start,
            self.goals.len()
        )?;
        let map = &self.space.map;
        for (y, line) in map.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
            for (x, cell) in line.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
                let s = Maze2DState::new_from_usize(x, y);

                let is_start = s.as_ref() == Some(&self.start);
                let is_goal = s.is_some_and(|s| self.goals.contains(&s));

                match (is_start, is_goal) {
                    (true, true) => write!(f, "!")?,
                    (true, false) => write!(f, "S")?,
                    (false, true) => write!(f, "G")?,
                    (false, false) => write!(f, "{cell}")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
