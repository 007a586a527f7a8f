use thiserror::Error;

/// Why a search could not return a solution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The frontier ran out before any goal was reached.
    #[error("No solution found after expanding {expanded} nodes")]
    NoSolution { expanded: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_mentions_the_effort() {
        let e = SearchError::NoSolution { expanded: 12 };
        assert_eq!(e.to_string(), "No solution found after expanding 12 nodes");
    }
}
