//! Containers that decide the exploration order of a search, and remember
//! what was already explored.

pub mod explored;
pub mod fifo;
pub mod priority_frontier;

pub use explored::ExploredSet;
pub use fifo::FifoFrontier;
pub use priority_frontier::FrontierEntry;
pub use priority_frontier::FrontierSlot;
pub use priority_frontier::PriorityFrontier;
pub use priority_frontier::UniformCostRank;
