use num_traits::Zero;

use crate::space::Action;
use crate::space::Cost;
use crate::space::State;

const MAX_ACTIONS_DISPLAYED: usize = 20;

/// A sequence of actions taking the initial state to a goal state.
///
/// Actions are stored in traversal order, first action first. An empty
/// solution is a valid outcome: it means the initial state already satisfied
/// the goal test.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "inspect", derive(Clone))]
pub struct Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub start: St,
    pub end: St,
    /// The path cost of the goal node this solution was reconstructed from.
    pub cost: C,
    pub actions: Vec<A>,
}

impl<St, A, C> Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[A] {
        &self.actions
    }


    /// Runs sanity checks that need no problem at hand.
    ///
    /// Empty solutions must end where they start, at no cost.
    #[inline(always)]
    pub fn seems_valid(&self) -> bool {
        !self.is_empty() || (self.start == self.end && self.cost.is_zero())
    }
}

impl<St, A, C> std::fmt::Display for Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Solution({}, {:?}:{:?}",
            self.cost,
            self.start,
            self.actions
                .iter()
                .take(MAX_ACTIONS_DISPLAYED)
                .collect::<Vec<_>>(),
        )?;
        if self.actions.len() > MAX_ACTIONS_DISPLAYED {
            write!(f, "+{}", self.actions.len() - MAX_ACTIONS_DISPLAYED)?;
        }
        write!(f, ":{:?})", self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_solutions_stay_put() {
        let stay = Solution::<&str, &str, u32> {
            start: "A",
            end: "A",
            cost: 0,
            actions: vec![],
        };
        assert!(stay.is_empty());
        assert_eq!(stay.len(), 0);
        assert!(stay.seems_valid());

        let teleport = Solution::<&str, &str, u32> {
            end: "B",
            ..stay
        };
        assert!(!teleport.seems_valid());
    }

    #[test]
    fn display_truncates_long_solutions() {
        let s = Solution::<u32, u32, u32> {
            start: 0,
            end: 25,
            cost: 25,
            actions: (1..=25).collect(),
        };
        let text = s.to_string();
        assert!(text.starts_with("Solution(25, 0:[1, 2,"));
        assert!(text.contains("20]+5:25)"));
        assert!(!text.contains("21"));
    }
}
