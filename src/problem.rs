use std::fmt::Debug;
use std::marker::PhantomData;

use num_traits::SaturatingAdd;
use num_traits::Zero;

use crate::solution::Solution;
use crate::space::Action;
use crate::space::Cost;
use crate::space::State;

/// A search problem.
///
/// Problems are read-only while being searched. Every method must be a pure
/// function of its arguments, which also makes it fine to run several
/// searches over the same problem.
pub trait Problem: Debug {
    type State: State;
    type Action: Action;
    type Cost: Cost;

    fn initial_state(&self) -> &Self::State;

    /// Actions applicable on `s`. Dead ends have none.
    fn actions(&self, s: &Self::State) -> Vec<Self::Action>;

    /// The state reached by applying `a` on `s`.
    fn result(&self, s: &Self::State, a: &Self::Action) -> Self::State;

    fn goal_test(&self, s: &Self::State) -> bool;

    /// The cost of stepping from `from` to `to` through `a`.
    fn cost(&self, from: &Self::State, a: &Self::Action, to: &Self::State) -> Self::Cost;

    /// Applies `actions` from the initial state.
    ///
    /// Returns the state reached and the summed step costs, saturating like
    /// the path costs of search nodes do.
    fn replay<'a, I>(&self, actions: I) -> (Self::State, Self::Cost)
    where
        I: IntoIterator<Item = &'a Self::Action>,
        Self::Action: 'a,
    {
        let mut state = self.initial_state().clone();
        let mut cost = Self::Cost::zero();
        for a in actions {
            let next = self.result(&state, a);
            cost = cost.saturating_add(&self.cost(&state, a, &next));
            state = next;
        }
        (state, cost)
    }

    /// Checks that replaying a solution ends on a goal with the claimed cost.
    fn is_valid_solution(&self, solution: &Solution<Self::State, Self::Action, Self::Cost>) -> bool {
        if !solution.seems_valid() || solution.start != *self.initial_state() {
            return false;
        }
        let (end, cost) = self.replay(solution.actions());
        self.goal_test(&end) && end == solution.end && cost == solution.cost
    }
}

/// A [`Problem`] assembled from an initial state and four functions.
pub struct ProblemDescriptor<St, A, C, FA, FR, FG, FC>
where
    St: State,
    A: Action,
    C: Cost,
    FA: Fn(&St) -> Vec<A>,
    FR: Fn(&St, &A) -> St,
    FG: Fn(&St) -> bool,
    FC: Fn(&St, &A, &St) -> C,
{
    initial_state: St,
    actions: FA,
    result: FR,
    goal_test: FG,
    cost: FC,

    _phantom_action: PhantomData<A>,
    _phantom_cost: PhantomData<C>,
}

impl<St, A, C, FA, FR, FG, FC> ProblemDescriptor<St, A, C, FA, FR, FG, FC>
where
    St: State,
    A: Action,
    C: Cost,
    FA: Fn(&St) -> Vec<A>,
    FR: Fn(&St, &A) -> St,
    FG: Fn(&St) -> bool,
    FC: Fn(&St, &A, &St) -> C,
{
    #[must_use]
    pub fn new(initial_state: St, actions: FA, result: FR, goal_test: FG, cost: FC) -> Self {
        Self {
            initial_state,
            actions,
            result,
            goal_test,
            cost,
            _phantom_action: PhantomData,
            _phantom_cost: PhantomData,
        }
    }
}

impl<St, A, C, FA, FR, FG, FC> Debug for ProblemDescriptor<St, A, C, FA, FR, FG, FC>
where
    St: State,
    A: Action,
    C: Cost,
    FA: Fn(&St) -> Vec<A>,
    FR: Fn(&St, &A) -> St,
    FG: Fn(&St) -> bool,
    FC: Fn(&St, &A, &St) -> C,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ProblemDescriptor{{from {:?}}}", self.initial_state)
    }
}

impl<St, A, C, FA, FR, FG, FC> Problem for ProblemDescriptor<St, A, C, FA, FR, FG, FC>
where
    St: State,
    A: Action,
    C: Cost,
    FA: Fn(&St) -> Vec<A>,
    FR: Fn(&St, &A) -> St,
    FG: Fn(&St) -> bool,
    FC: Fn(&St, &A, &St) -> C,
{
    type State = St;
    type Action = A;
    type Cost = C;

    #[inline(always)]
    fn initial_state(&self) -> &St {
        &self.initial_state
    }
    #[inline(always)]
    fn actions(&self, s: &St) -> Vec<A> {
        (self.actions)(s)
    }
    #[inline(always)]
    fn result(&self, s: &St, a: &A) -> St {
        (self.result)(s, a)
    }
    #[inline(always)]
    fn goal_test(&self, s: &St) -> bool {
        (self.goal_test)(s)
    }
    #[inline(always)]
    fn cost(&self, from: &St, a: &A, to: &St) -> C {
        (self.cost)(from, a, to)
    }
}
